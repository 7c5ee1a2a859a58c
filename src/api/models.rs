use crate::display::score::RiskScore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// Country models
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Country {
    pub name: String,
    pub alpha2: String,
    pub alpha3: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CountriesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub countries: Vec<Country>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CountryDetailResponse {
    #[serde(default)]
    pub success: bool,
    pub country: Country,
    #[serde(default)]
    pub risk_assessment: RiskAssessment,
}

// Risk assessment models

/// Stored assessment for one country.
///
/// The backend keeps whatever the assessor posted, so only the score fields
/// are typed and everything else is kept in `extra`.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RiskAssessment {
    #[serde(default, skip_serializing_if = "is_absent")]
    pub overall_risk: RiskScore,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub risk_scores: BTreeMap<String, RiskScore>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RiskAssessment {
    pub fn is_empty(&self) -> bool {
        is_absent(&self.overall_risk) && self.risk_scores.is_empty() && self.extra.is_empty()
    }
}

fn is_absent(score: &RiskScore) -> bool {
    matches!(score, RiskScore::Absent)
}

/// Response of `GET /api/countries/{code}/risk`.
///
/// Countries without stored data come back with empty `risk_scores`, an
/// `overall_risk` of "Not Assessed" and an explanatory `message`.
#[derive(Debug, Deserialize, Clone)]
pub struct CountryRiskResponse {
    #[serde(default)]
    pub success: bool,
    pub country_code: String,
    pub risk_assessment: Option<RiskAssessment>,
    #[serde(default)]
    pub risk_scores: BTreeMap<String, RiskScore>,
    #[serde(default)]
    pub overall_risk: RiskScore,
    pub message: Option<String>,
}

impl CountryRiskResponse {
    /// The stored assessment, or one built from the placeholder fields
    pub fn assessment(&self) -> RiskAssessment {
        match &self.risk_assessment {
            Some(assessment) => assessment.clone(),
            None => RiskAssessment {
                overall_risk: self.overall_risk.clone(),
                risk_scores: self.risk_scores.clone(),
                extra: Map::new(),
            },
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpdateRiskResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub country_code: String,
}

// Category models
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RiskCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data_sources: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RiskCategoriesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub categories: Vec<RiskCategory>,
}

// Search and statistics
#[derive(Debug, Deserialize, Clone)]
pub struct SearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub results: Vec<Country>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StatsResponse {
    #[serde(default)]
    pub success: bool,
    pub total_countries: usize,
    pub assessed_countries: usize,
    pub unassessed_countries: i64,
}

/// Error body the backend sends alongside non-success statuses
#[derive(Debug, Deserialize, Clone)]
pub struct ErrorBody {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
}
