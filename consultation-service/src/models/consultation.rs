use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of business the prospect wants to discuss.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BusinessType {
    #[serde(rename = "부동산 경매")]
    RealEstateAuction,
    #[serde(rename = "부동산 공매")]
    RealEstatePublicSale,
    #[serde(rename = "지분 투자")]
    EquityInvestment,
    #[serde(rename = "임야 개발")]
    ForestLandDevelopment,
    #[serde(rename = "투자 컨설팅")]
    InvestmentConsulting,
    #[serde(rename = "기타")]
    Other,
}

impl BusinessType {
    pub const ALL: [BusinessType; 6] = [
        BusinessType::RealEstateAuction,
        BusinessType::RealEstatePublicSale,
        BusinessType::EquityInvestment,
        BusinessType::ForestLandDevelopment,
        BusinessType::InvestmentConsulting,
        BusinessType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::RealEstateAuction => "부동산 경매",
            BusinessType::RealEstatePublicSale => "부동산 공매",
            BusinessType::EquityInvestment => "지분 투자",
            BusinessType::ForestLandDevelopment => "임야 개발",
            BusinessType::InvestmentConsulting => "투자 컨설팅",
            BusinessType::Other => "기타",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("Invalid business type: {}", s))
    }
}

/// Investment bracket, in KRW.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InvestmentAmount {
    #[serde(rename = "1억 미만")]
    Under100M,
    #[serde(rename = "1억~3억")]
    From100MTo300M,
    #[serde(rename = "3억~5억")]
    From300MTo500M,
    #[serde(rename = "5억 이상")]
    Over500M,
}

impl InvestmentAmount {
    pub const ALL: [InvestmentAmount; 4] = [
        InvestmentAmount::Under100M,
        InvestmentAmount::From100MTo300M,
        InvestmentAmount::From300MTo500M,
        InvestmentAmount::Over500M,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentAmount::Under100M => "1억 미만",
            InvestmentAmount::From100MTo300M => "1억~3억",
            InvestmentAmount::From300MTo500M => "3억~5억",
            InvestmentAmount::Over500M => "5억 이상",
        }
    }
}

impl fmt::Display for InvestmentAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentAmount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("Invalid investment amount: {}", s))
    }
}

/// A persisted consultation request.
///
/// Immutable once stored; the only transition after creation is deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub company: String,
    pub phone: String,
    pub business_type: BusinessType,
    pub investment_amount: InvestmentAmount,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Candidate that already passed validation; only the store turns it into a
/// [`Consultation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConsultation {
    pub name: String,
    pub company: String,
    pub phone: String,
    pub business_type: BusinessType,
    pub investment_amount: InvestmentAmount,
}

impl Consultation {
    pub fn new(candidate: NewConsultation) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            name: candidate.name,
            company: candidate.company,
            phone: candidate.phone,
            business_type: candidate.business_type,
            investment_amount: candidate.investment_amount,
            created_at: now,
            updated_at: now,
        }
    }
}
