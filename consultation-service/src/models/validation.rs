//! Intake validation for consultation requests.
//!
//! Checks run in a fixed order and stop at the first failing stage:
//! required fields, phone format, then enumeration membership.

use super::consultation::{BusinessType, InvestmentAmount, NewConsultation};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use service_core::error::AppError;
use thiserror::Error;

/// ASCII digits only; `\d` would also admit other Unicode decimal digits.
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^010-[0-9]{4}-[0-9]{4}$").expect("phone pattern is valid"));

/// Raw intake payload as submitted by the form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationCandidate {
    pub name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub business_type: Option<String>,
    pub investment_amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("모든 필수 항목을 입력해주세요.")]
    MissingFields(Vec<&'static str>),

    #[error("전화번호 형식이 올바르지 않습니다. (010-1234-5678)")]
    InvalidPhone,

    #[error("유효하지 않은 상담 유형입니다: {0}")]
    InvalidBusinessType(String),

    #[error("유효하지 않은 투자금액대입니다: {0}")]
    InvalidInvestmentAmount(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let errors = match &err {
            ValidationError::MissingFields(fields) => fields
                .iter()
                .map(|field| format!("{} is required", field))
                .collect(),
            other => vec![other.to_string()],
        };

        AppError::ValidationError {
            message: err.to_string(),
            errors,
        }
    }
}

/// Raw value, unless it is absent or whitespace only.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl ConsultationCandidate {
    /// Validates the payload and produces a normalized candidate with
    /// `name` and `company` trimmed. Phone and enumeration values must match
    /// exactly as submitted.
    pub fn validate(&self) -> Result<NewConsultation, ValidationError> {
        let fields = [
            ("name", present(&self.name)),
            ("company", present(&self.company)),
            ("phone", present(&self.phone)),
            ("businessType", present(&self.business_type)),
            ("investmentAmount", present(&self.investment_amount)),
        ];

        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(field, _)| *field)
            .collect();

        let [
            (_, Some(name)),
            (_, Some(company)),
            (_, Some(phone)),
            (_, Some(business_type)),
            (_, Some(investment_amount)),
        ] = fields
        else {
            return Err(ValidationError::MissingFields(missing));
        };

        if !PHONE_PATTERN.is_match(phone) {
            return Err(ValidationError::InvalidPhone);
        }

        let business_type: BusinessType = business_type
            .parse()
            .map_err(|_| ValidationError::InvalidBusinessType(business_type.to_string()))?;

        let investment_amount: InvestmentAmount = investment_amount
            .parse()
            .map_err(|_| ValidationError::InvalidInvestmentAmount(investment_amount.to_string()))?;

        Ok(NewConsultation {
            name: name.trim().to_string(),
            company: company.trim().to_string(),
            phone: phone.to_string(),
            business_type,
            investment_amount,
        })
    }
}
