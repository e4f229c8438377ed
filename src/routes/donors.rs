use actix_web::{http::header, http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::core::{acceptable_donors, calculate_bounding_box, DonorMatcher, MatchError};
use crate::models::{
    BloodType, CompatibilityResponse, Coordinate, DonorCandidate, DonorProfile, ErrorResponse,
    HealthResponse, MatchDonorsRequest, MatchDonorsResponse, MatchMode, MatchRequest,
    NearbyDonorsQuery,
};
use crate::services::{Authorizer, Claims, SupabaseClient, SupabaseError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    pub auth: Arc<dyn Authorizer>,
    pub matcher: DonorMatcher,
    pub default_limit: u16,
    pub max_limit: u16,
}

/// Configure all donor-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/compatibility/{blood_type}", web::get().to(compatibility))
        .route("/donors/match", web::post().to(match_donors))
        .route("/donors/nearby", web::get().to(nearby_donors))
        .route("/requests/{id}/donors", web::get().to(request_donors));
}

fn error_response(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn match_error_response(err: &MatchError) -> HttpResponse {
    let error = match err {
        MatchError::InvalidBloodType(_) => "Invalid blood type",
        MatchError::InvalidCoordinate(_) => "Invalid coordinate",
        MatchError::InvalidRadius(_) => "Invalid radius",
    };
    error_response(StatusCode::BAD_REQUEST, error, err.to_string())
}

fn supabase_error_response(err: &SupabaseError) -> HttpResponse {
    match err {
        SupabaseError::NotFound(message) => {
            error_response(StatusCode::NOT_FOUND, "Not found", message.clone())
        }
        _ => error_response(StatusCode::BAD_GATEWAY, "Backend request failed", err.to_string()),
    }
}

/// Run the route guard, turning a failure into a 401 response
fn authorize(state: &AppState, req: &HttpRequest) -> Result<Claims, HttpResponse> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    state.auth.authorize(header).map_err(|e| {
        tracing::info!("Rejected request to {}: {}", req.path(), e);
        error_response(StatusCode::UNAUTHORIZED, "Unauthorized", e.to_string())
    })
}

/// Requested limit, or the configured default, capped at the maximum
fn effective_limit(state: &AppState, requested: Option<u16>) -> usize {
    requested.unwrap_or(state.default_limit).min(state.max_limit) as usize
}

fn into_candidates(profiles: Vec<DonorProfile>) -> Vec<DonorCandidate> {
    profiles
        .into_iter()
        .filter_map(DonorProfile::into_candidate)
        .collect()
}

/// Match stored donors; a matcher error here means the stored data is bad
fn match_stored(
    matcher: &DonorMatcher,
    request: &MatchRequest,
    candidates: &[DonorCandidate],
) -> HttpResponse {
    match matcher.find_matches(request, candidates) {
        Ok(outcome) => HttpResponse::Ok().json(MatchDonorsResponse {
            match_id: uuid::Uuid::new_v4().to_string(),
            results: outcome.results,
            total_candidates: outcome.total_candidates,
        }),
        Err(e) => {
            tracing::error!("Stored donor data failed validation: {}", e);
            error_response(
                StatusCode::BAD_GATEWAY,
                "Malformed backend data",
                e.to_string(),
            )
        }
    }
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Compatibility table lookup
///
/// GET /api/v1/compatibility/{bloodType}
async fn compatibility(path: web::Path<String>) -> impl Responder {
    match path.parse::<BloodType>() {
        Ok(recipient) => HttpResponse::Ok().json(CompatibilityResponse {
            recipient,
            donors: acceptable_donors(recipient).to_vec(),
        }),
        Err(e) => match_error_response(&e),
    }
}

/// Rank a caller-supplied donor list
///
/// POST /api/v1/donors/match
///
/// Request body:
/// ```json
/// {
///   "bloodType": "A+",
///   "location": { "latitude": 40.71, "longitude": -74.0 },
///   "maxRadiusKm": 10,
///   "mode": "compatible|allTypes",
///   "limit": 20,
///   "donors": [{ "id": "d1", "bloodType": "O-", "location": null }]
/// }
/// ```
async fn match_donors(
    state: web::Data<AppState>,
    req: web::Json<MatchDonorsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let limit = effective_limit(&state, req.limit);

    tracing::info!(
        "Matching {} donors for blood type {}, limit: {}",
        req.donors.len(),
        req.blood_type,
        limit
    );

    let matcher = state.matcher.with_limit(Some(limit));
    match matcher.find_matches(&req.to_match_request(), &req.donors) {
        Ok(outcome) => {
            tracing::debug!(
                "Returning {} matches (from {} candidates)",
                outcome.results.len(),
                outcome.total_candidates
            );
            HttpResponse::Ok().json(MatchDonorsResponse {
                match_id: uuid::Uuid::new_v4().to_string(),
                results: outcome.results,
                total_candidates: outcome.total_candidates,
            })
        }
        Err(e) => {
            tracing::info!("Match request rejected: {}", e);
            match_error_response(&e)
        }
    }
}

/// Find stored donors near a point
///
/// GET /api/v1/donors/nearby?bloodType=A%2B&lat=40.71&lng=-74.0&radiusKm=10&mode=compatible&limit=20
async fn nearby_donors(
    state: web::Data<AppState>,
    query: web::Query<NearbyDonorsQuery>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(resp) = authorize(&state, &http_req) {
        return resp;
    }

    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let recipient = match query.blood_type.parse::<BloodType>() {
        Ok(t) => t,
        Err(e) => return match_error_response(&e),
    };
    let origin = match Coordinate::new(query.lat, query.lng) {
        Ok(c) => c,
        Err(e) => return match_error_response(&e),
    };

    let radius_km = query.radius_km.or(state.matcher.default_radius_km());
    if let Some(radius) = radius_km.filter(|r| !r.is_finite()) {
        return match_error_response(&MatchError::InvalidRadius(radius));
    }
    let blood_types = match query.mode {
        MatchMode::Compatible => Some(acceptable_donors(recipient)),
        MatchMode::AllTypes => None,
    };
    let bbox = radius_km.map(|r| calculate_bounding_box(origin.latitude, origin.longitude, r));

    let profiles = match state.supabase.fetch_donors(blood_types, bbox.as_ref()).await {
        Ok(profiles) => profiles,
        Err(e) => {
            tracing::error!("Failed to fetch donors near {:?}: {}", origin, e);
            return supabase_error_response(&e);
        }
    };

    let request = MatchRequest {
        blood_type: recipient.to_string(),
        location: Some(origin),
        max_radius_km: radius_km,
        mode: query.mode,
    };

    match_stored(
        &state.matcher.with_limit(Some(effective_limit(&state, query.limit))),
        &request,
        &into_candidates(profiles),
    )
}

/// Donors for a stored blood request, within the default radius and limit
///
/// GET /api/v1/requests/{id}/donors
async fn request_donors(
    state: web::Data<AppState>,
    path: web::Path<String>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(resp) = authorize(&state, &http_req) {
        return resp;
    }

    let request_id = path.into_inner();

    let record = match state.supabase.get_blood_request(&request_id).await {
        Ok(record) => record,
        Err(e) => {
            tracing::error!("Failed to fetch blood request {}: {}", request_id, e);
            return supabase_error_response(&e);
        }
    };

    let recipient = match record.blood_type.parse::<BloodType>() {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Blood request {} has invalid type: {}", request_id, e);
            return error_response(StatusCode::BAD_GATEWAY, "Malformed backend data", e.to_string());
        }
    };

    let location = record.location();
    if location.is_none() {
        tracing::warn!("Location data not available for request {}", request_id);
    }

    let radius_km = state.matcher.default_radius_km();
    let bbox = match (location, radius_km) {
        (Some(c), Some(r)) => Some(calculate_bounding_box(c.latitude, c.longitude, r)),
        _ => None,
    };

    let profiles = match state
        .supabase
        .fetch_donors(Some(acceptable_donors(recipient)), bbox.as_ref())
        .await
    {
        Ok(profiles) => profiles,
        Err(e) => {
            tracing::error!("Failed to fetch donors for request {}: {}", request_id, e);
            return supabase_error_response(&e);
        }
    };

    let request = MatchRequest {
        blood_type: recipient.to_string(),
        location,
        max_radius_km: radius_km,
        mode: MatchMode::Compatible,
    };

    tracing::info!(
        "Matching {} stored donors for request {} ({}, urgency: {})",
        profiles.len(),
        request_id,
        recipient,
        record.urgency
    );

    match_stored(
        &state.matcher.with_limit(Some(effective_limit(&state, None))),
        &request,
        &into_candidates(profiles),
    )
}
