pub mod consultation;
pub mod validation;

pub use consultation::{BusinessType, Consultation, InvestmentAmount, NewConsultation};
pub use validation::{ConsultationCandidate, ValidationError};
