use crate::models::{BloodRequestRecord, BloodType, BoundingBox, DonorProfile};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Table names in the Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub profiles: String,
    pub blood_requests: String,
}

impl Default for SupabaseTables {
    fn default() -> Self {
        Self {
            profiles: "profiles".to_string(),
            blood_requests: "blood_requests".to_string(),
        }
    }
}

const PROFILE_COLUMNS: &str =
    "id,full_name,phone_number,blood_type,last_latitude,last_longitude";

/// Supabase PostgREST client
///
/// Read-only access to the tables the matcher needs:
/// - Donor profiles, narrowed by blood type and bounding box
/// - Blood requests by id
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
    tables: SupabaseTables,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(
        base_url: String,
        api_key: String,
        tables: SupabaseTables,
        timeout: Duration,
    ) -> Result<Self, SupabaseError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
            tables,
        })
    }

    fn table_url(&self, table: &str, params: &[(&str, String)]) -> String {
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}/rest/v1/{}?{}", self.base_url, table, query)
    }

    async fn get_rows<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, SupabaseError> {
        let response = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Supabase request failed: {} - {}", status, body);
            return Err(SupabaseError::ApiError(format!("status {}", status)));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse rows: {}", e)))
    }

    /// Fetch donor profiles
    ///
    /// # Arguments
    /// * `blood_types` - Only these donor types, or every typed donor when `None`
    /// * `bounding_box` - Keep donors inside the box plus donors without a
    ///   location, whose distance the matcher cannot know
    pub async fn fetch_donors(
        &self,
        blood_types: Option<&[BloodType]>,
        bounding_box: Option<&BoundingBox>,
    ) -> Result<Vec<DonorProfile>, SupabaseError> {
        let mut params = vec![
            ("select", PROFILE_COLUMNS.to_string()),
            ("is_donor", "eq.true".to_string()),
        ];

        match blood_types {
            Some(types) => {
                let list = types.iter().map(BloodType::as_str).collect::<Vec<_>>().join(",");
                params.push(("blood_type", format!("in.({})", list)));
            }
            None => params.push(("blood_type", "not.is.null".to_string())),
        }

        if let Some(bbox) = bounding_box {
            params.push((
                "or",
                format!(
                    "(last_latitude.is.null,last_longitude.is.null,and(last_latitude.gte.{},last_latitude.lte.{},last_longitude.gte.{},last_longitude.lte.{}))",
                    bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon
                ),
            ));
        }

        // Stable row order keeps distance ties deterministic
        params.push(("order", "id.asc".to_string()));

        let url = self.table_url(&self.tables.profiles, &params);
        tracing::debug!("Fetching donors from: {}", url);

        let donors: Vec<DonorProfile> = self.get_rows(&url).await?;
        tracing::debug!("Fetched {} donor profiles", donors.len());

        Ok(donors)
    }

    /// Get a single blood request by id
    pub async fn get_blood_request(&self, id: &str) -> Result<BloodRequestRecord, SupabaseError> {
        let params = [
            ("select", "*".to_string()),
            ("id", format!("eq.{}", id)),
            ("limit", "1".to_string()),
        ];
        let url = self.table_url(&self.tables.blood_requests, &params);

        tracing::debug!("Fetching blood request: {}", id);

        let rows: Vec<BloodRequestRecord> = self.get_rows(&url).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| SupabaseError::NotFound(format!("Blood request {} not found", id)))
    }
}
