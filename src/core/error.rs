use thiserror::Error;

/// Errors raised by the matching core
///
/// Every variant is fail-fast: a matching call that hits one of these
/// returns no partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("Invalid blood type: {0:?}")]
    InvalidBloodType(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid search radius: {0} km")]
    InvalidRadius(f64),
}
