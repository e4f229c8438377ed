use crate::core::{
    compatibility::{can_donate, classify},
    distance::{distance_km, distance_label, estimate_eta_minutes, round_km},
    error::MatchError,
};
use crate::models::{BloodType, Distance, DonorCandidate, MatchMode, MatchRequest, MatchResult};

/// Result of the matching process
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub results: Vec<MatchResult>,
    pub total_candidates: usize,
}

/// Rank donors for a request
///
/// # Pipeline Stages
/// 1. Validate the request and every donor (fail-fast, no partial output)
/// 2. Drop donors the recipient cannot accept, unless in all-types mode
/// 3. Compute distances; drop known distances beyond the radius
/// 4. Stable sort by distance, unknown distances last in input order
///
/// Pure: no I/O and no shared state, so repeated calls with the same input
/// give identical output.
pub fn match_donors(
    request: &MatchRequest,
    donors: &[DonorCandidate],
) -> Result<Vec<MatchResult>, MatchError> {
    let recipient: BloodType = request.blood_type.parse()?;
    if let Some(origin) = &request.location {
        origin.validate()?;
    }
    if let Some(radius) = request.max_radius_km {
        if !radius.is_finite() || radius < 0.0 {
            return Err(MatchError::InvalidRadius(radius));
        }
    }

    // Stage 1: every record is checked before anything is emitted
    let mut validated = Vec::with_capacity(donors.len());
    for donor in donors {
        let blood_type: BloodType = donor.blood_type.parse()?;
        if let Some(location) = &donor.location {
            location.validate()?;
        }
        validated.push((donor, blood_type));
    }

    let mut known: Vec<(f64, &DonorCandidate, BloodType)> = Vec::new();
    let mut unknown: Vec<(&DonorCandidate, BloodType)> = Vec::new();

    for (donor, blood_type) in validated {
        // Stage 2: compatibility
        if request.mode == MatchMode::Compatible && !can_donate(blood_type, recipient) {
            continue;
        }

        // Stage 3: distance and radius
        match (request.location, donor.location) {
            (Some(origin), Some(location)) => {
                let km = distance_km(origin, location);
                if request.max_radius_km.is_some_and(|radius| km > radius) {
                    continue;
                }
                known.push((km, donor, blood_type));
            }
            // No value to test against the radius, so the donor stays
            _ => unknown.push((donor, blood_type)),
        }
    }

    // Stage 4: `sort_by` is stable, equal distances keep input order
    known.sort_by(|a, b| a.0.total_cmp(&b.0));

    let results = known
        .into_iter()
        .map(|(km, donor, blood_type)| {
            build_result(donor, blood_type, recipient, Distance::Known(km))
        })
        .chain(unknown.into_iter().map(|(donor, blood_type)| {
            build_result(donor, blood_type, recipient, Distance::Unknown)
        }))
        .collect();

    Ok(results)
}

fn build_result(
    donor: &DonorCandidate,
    blood_type: BloodType,
    recipient: BloodType,
    distance: Distance,
) -> MatchResult {
    let label = distance_label(distance);
    let eta_minutes = distance.km().map(estimate_eta_minutes);
    let distance = match distance {
        Distance::Known(km) => Distance::Known(round_km(km)),
        Distance::Unknown => Distance::Unknown,
    };

    MatchResult {
        donor_id: donor.id.clone(),
        blood_type,
        compatibility: classify(blood_type, recipient),
        distance,
        distance_label: label,
        eta_minutes,
        name: donor.name.clone(),
        phone: donor.phone.clone(),
    }
}

/// Matching orchestrator carrying service-level defaults
///
/// The default radius applies only when a request carries none; the limit
/// truncates the ranked list.
#[derive(Debug, Clone, Copy, Default)]
pub struct DonorMatcher {
    default_radius_km: Option<f64>,
    limit: Option<usize>,
}

impl DonorMatcher {
    pub fn new(default_radius_km: Option<f64>, limit: Option<usize>) -> Self {
        Self {
            default_radius_km,
            limit,
        }
    }

    pub fn default_radius_km(&self) -> Option<f64> {
        self.default_radius_km
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Copy of this matcher with a different result limit
    pub fn with_limit(&self, limit: Option<usize>) -> Self {
        Self { limit, ..*self }
    }

    /// Find donors for a request
    ///
    /// # Arguments
    /// * `request` - Recipient blood type, location, radius and mode
    /// * `donors` - All candidate donors, in the order ties should resolve
    ///
    /// # Returns
    /// MatchOutcome with ranked results, or the first validation error
    pub fn find_matches(
        &self,
        request: &MatchRequest,
        donors: &[DonorCandidate],
    ) -> Result<MatchOutcome, MatchError> {
        let total_candidates = donors.len();

        let effective;
        let request = if request.max_radius_km.is_none() && self.default_radius_km.is_some() {
            effective = MatchRequest {
                max_radius_km: self.default_radius_km,
                ..request.clone()
            };
            &effective
        } else {
            request
        };

        let mut results = match_donors(request, donors)?;
        if let Some(limit) = self.limit {
            results.truncate(limit);
        }

        Ok(MatchOutcome {
            results,
            total_candidates,
        })
    }
}
