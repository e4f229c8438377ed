use serde::{Deserialize, Serialize};
use crate::models::domain::{BloodType, MatchResult};

/// Response for the match endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDonorsResponse {
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub results: Vec<MatchResult>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Donor types a recipient can accept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityResponse {
    pub recipient: BloodType,
    pub donors: Vec<BloodType>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
