pub mod database;
pub mod memory;
pub mod meshy;
pub mod metrics;
pub mod repository;
pub mod store;

pub use database::MongoDb;
pub use memory::InMemoryRepository;
pub use meshy::MeshyClient;
pub use self::metrics::{get_metrics, init_metrics};
pub use repository::ConsultationRepository;
pub use store::ConsultationStore;
