// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BloodRequestRecord, BloodType, BoundingBox, Compatibility, Coordinate, Distance,
    DonorCandidate, DonorProfile, MatchMode, MatchRequest, MatchResult,
};
pub use requests::{MatchDonorsRequest, NearbyDonorsQuery};
pub use responses::{CompatibilityResponse, ErrorResponse, HealthResponse, MatchDonorsResponse};
