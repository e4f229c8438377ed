//! Donor Match - blood donor matching service
//!
//! This library ranks potential blood donors for a request: it keeps donors
//! whose type the recipient can accept, measures great-circle distance to
//! each one and orders them nearest first.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance::{distance_km, haversine_distance}, match_donors, DonorMatcher, MatchError};
pub use models::{BloodType, Compatibility, Coordinate, Distance, DonorCandidate, MatchMode, MatchRequest, MatchResult};
