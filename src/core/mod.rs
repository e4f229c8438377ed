// Core algorithm exports
pub mod compatibility;
pub mod distance;
pub mod error;
pub mod matcher;

pub use compatibility::{acceptable_donors, can_donate, classify};
pub use distance::{calculate_bounding_box, distance_km, haversine_distance, is_within_bounding_box};
pub use error::MatchError;
pub use matcher::{match_donors, DonorMatcher, MatchOutcome};
