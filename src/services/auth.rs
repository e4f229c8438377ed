use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the authorization check
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingToken,

    #[error("Authorization header must use the Bearer scheme")]
    MalformedHeader,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// Claims of a Supabase access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Capability check guarding donor lookups
///
/// Takes the raw `Authorization` header value, if any.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, header: Option<&str>) -> Result<Claims, AuthError>;

    fn is_authorized(&self, header: Option<&str>) -> bool {
        self.authorize(header).is_ok()
    }
}

/// Verifies HS256 tokens signed with the project's JWT secret
pub struct JwtAuthorizer {
    key: DecodingKey,
    validation: Validation,
}

impl JwtAuthorizer {
    pub fn new(secret: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl Authorizer for JwtAuthorizer {
    fn authorize(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        let header = header.ok_or(AuthError::MissingToken)?;
        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MalformedHeader)?;

        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }
}
