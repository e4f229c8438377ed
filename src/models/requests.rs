use crate::models::domain::{Coordinate, DonorCandidate, MatchMode, MatchRequest};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to rank a caller-supplied donor list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchDonorsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "blood_type", rename = "bloodType")]
    pub blood_type: String,
    #[serde(default)]
    pub location: Option<Coordinate>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "max_radius_km", rename = "maxRadiusKm", default)]
    pub max_radius_km: Option<f64>,
    #[serde(default)]
    pub mode: MatchMode,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[validate(length(max = 10000))]
    #[serde(default)]
    pub donors: Vec<DonorCandidate>,
}

impl MatchDonorsRequest {
    pub fn to_match_request(&self) -> MatchRequest {
        MatchRequest {
            blood_type: self.blood_type.clone(),
            location: self.location,
            max_radius_km: self.max_radius_km,
            mode: self.mode,
        }
    }
}

/// Query string for the nearby donors lookup
///
/// `+` must be sent percent-encoded (`A%2B`), otherwise it decodes to a
/// space and the blood type is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyDonorsQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "blood_type", rename = "bloodType")]
    pub blood_type: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    #[validate(range(min = 0.0, max = 20037.5))]
    #[serde(alias = "radius_km", rename = "radiusKm", default)]
    pub radius_km: Option<f64>,
    #[serde(default)]
    pub mode: MatchMode,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_request_defaults() {
        let req: MatchDonorsRequest = serde_json::from_str(r#"{"bloodType": "A+"}"#).unwrap();

        assert_eq!(req.mode, MatchMode::Compatible);
        assert!(req.donors.is_empty());
        assert!(req.limit.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_match_request_validation() {
        let req: MatchDonorsRequest =
            serde_json::from_str(r#"{"bloodType": "", "maxRadiusKm": -1.0}"#).unwrap();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("blood_type"));
        assert!(fields.contains_key("max_radius_km"));
    }

    #[test]
    fn test_match_request_all_types_mode() {
        let req: MatchDonorsRequest =
            serde_json::from_str(r#"{"bloodType": "O-", "mode": "allTypes"}"#).unwrap();
        assert_eq!(req.to_match_request().mode, MatchMode::AllTypes);
    }

    #[test]
    fn test_nearby_query_latitude_range() {
        let query = NearbyDonorsQuery {
            blood_type: "B+".to_string(),
            lat: 95.0,
            lng: 0.0,
            radius_km: None,
            mode: MatchMode::Compatible,
            limit: None,
        };
        assert!(query.validate().is_err());
    }
}
