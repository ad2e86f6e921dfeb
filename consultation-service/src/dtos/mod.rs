pub mod consultations;
pub mod meshy;

pub use consultations::{ConsultationResponse, DeletedConsultationResponse};
pub use meshy::{ImageTo3dRequest, TextTo3dRequest};
