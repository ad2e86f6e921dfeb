use crate::models::{BusinessType, Consultation, InvestmentAmount};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationResponse {
    pub id: String,
    pub name: String,
    pub company: String,
    pub phone: String,
    pub business_type: BusinessType,
    pub investment_amount: InvestmentAmount,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Consultation> for ConsultationResponse {
    fn from(c: Consultation) -> Self {
        Self {
            id: c.id.to_hex(),
            name: c.name,
            company: c.company,
            phone: c.phone,
            business_type: c.business_type,
            investment_amount: c.investment_amount,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedConsultationResponse {
    pub id: String,
}
