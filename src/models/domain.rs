use crate::core::error::MatchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ABO/Rh blood group
///
/// Closed set of the eight canonical types. Parsing is exact: `"a+"`,
/// `" A+"` or `"Z+"` are rejected rather than coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BloodType {
    APositive,
    ANegative,
    BPositive,
    BNegative,
    AbPositive,
    AbNegative,
    OPositive,
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BloodType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| MatchError::InvalidBloodType(s.to_string()))
    }
}

impl TryFrom<String> for BloodType {
    type Error = MatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BloodType> for String {
    fn from(value: BloodType) -> Self {
        value.as_str().to_string()
    }
}

/// Geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting NaN and infinite components.
    ///
    /// Out-of-range but finite values are accepted; the distance code only
    /// does arithmetic on them.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, MatchError> {
        let coordinate = Self { latitude, longitude };
        coordinate.validate()?;
        Ok(coordinate)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.latitude.is_finite() && self.longitude.is_finite() {
            Ok(())
        } else {
            Err(MatchError::InvalidCoordinate(format!(
                "({}, {})",
                self.latitude, self.longitude
            )))
        }
    }
}

/// A potential donor supplied by the caller
///
/// The blood type stays a raw string so the matcher can report the exact
/// offending value. Name and phone are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorCandidate {
    pub id: String,
    #[serde(rename = "bloodType")]
    pub blood_type: String,
    #[serde(default)]
    pub location: Option<Coordinate>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// How a donor's type relates to the recipient's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Compatibility {
    PerfectMatch,
    Compatible,
    NotCompatible,
}

/// Distance between request and donor, if both locations are known
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Distance {
    Known(f64),
    Unknown,
}

impl Distance {
    pub fn km(&self) -> Option<f64> {
        match self {
            Distance::Known(km) => Some(*km),
            Distance::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Distance::Known(_))
    }
}

impl From<Option<f64>> for Distance {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Distance::Unknown, Distance::Known)
    }
}

impl From<Distance> for Option<f64> {
    fn from(value: Distance) -> Self {
        value.km()
    }
}

/// Whether donors are filtered by type before ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchMode {
    /// Only donors whose type the recipient can accept
    #[default]
    Compatible,
    /// Emergency broadcast: every donor, ranked by distance only
    AllTypes,
}

/// Input to one matching call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    #[serde(rename = "bloodType")]
    pub blood_type: String,
    #[serde(default)]
    pub location: Option<Coordinate>,
    #[serde(rename = "maxRadiusKm", default)]
    pub max_radius_km: Option<f64>,
    #[serde(default)]
    pub mode: MatchMode,
}

/// One ranked donor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "donorId")]
    pub donor_id: String,
    #[serde(rename = "bloodType")]
    pub blood_type: BloodType,
    pub compatibility: Compatibility,
    /// Kilometers rounded to 2 decimals, `null` when unknown
    #[serde(rename = "distanceKm")]
    pub distance: Distance,
    #[serde(rename = "distanceLabel")]
    pub distance_label: String,
    #[serde(rename = "etaMinutes")]
    pub eta_minutes: Option<u32>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Row of the `profiles` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonorProfile {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub last_latitude: Option<f64>,
    #[serde(default)]
    pub last_longitude: Option<f64>,
}

impl DonorProfile {
    pub fn location(&self) -> Option<Coordinate> {
        match (self.last_latitude, self.last_longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate { latitude, longitude }),
            _ => None,
        }
    }

    /// Convert to a matcher candidate. Profiles without a blood type on
    /// file cannot be matched and yield `None`.
    pub fn into_candidate(self) -> Option<DonorCandidate> {
        let location = self.location();
        Some(DonorCandidate {
            id: self.id,
            blood_type: self.blood_type?,
            location,
            name: self.full_name,
            phone: self.phone_number,
        })
    }
}

/// Row of the `blood_requests` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodRequestRecord {
    pub id: String,
    pub user_id: String,
    pub blood_type: String,
    pub urgency: String,
    pub units_requested: u32,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub hospital_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl BloodRequestRecord {
    pub fn location(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate { latitude, longitude }),
            _ => None,
        }
    }
}
