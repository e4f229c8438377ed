use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use donor_match::config::{LoggingSettings, Settings};
use donor_match::core::DonorMatcher;
use donor_match::routes::{self, AppState};
use donor_match::services::{JwtAuthorizer, SupabaseClient, SupabaseTables};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// LOG_LEVEL and LOG_FORMAT override the configured logging section
fn init_logging(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_logging(&logging);

    info!("Starting donor matching service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Configuration error: {}", e))
    })?;

    info!("Configuration loaded successfully");

    let tables = SupabaseTables {
        profiles: settings.supabase.profiles_table.clone(),
        blood_requests: settings.supabase.requests_table.clone(),
    };
    let timeout = Duration::from_secs(settings.supabase.timeout_secs.unwrap_or(30));

    let supabase = SupabaseClient::new(
        settings.supabase.url.clone(),
        settings.supabase.api_key.clone(),
        tables,
        timeout,
    )
    .map_err(|e| {
        error!("Failed to create Supabase client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("Supabase client initialized for {}", settings.supabase.url);

    if settings.auth.jwt_secret.is_empty() {
        error!("auth.jwt_secret is empty, every guarded request will be rejected");
    }
    let auth = JwtAuthorizer::new(&settings.auth.jwt_secret, &settings.auth.audience);

    let matcher = DonorMatcher::new(settings.matching.default_radius_km, None);

    info!(
        "Matcher initialized (default radius: {:?} km, max limit: {})",
        settings.matching.default_radius_km, settings.matching.max_limit
    );

    let app_state = AppState {
        supabase: Arc::new(supabase),
        auth: Arc::new(auth),
        matcher,
        default_limit: settings.matching.default_limit,
        max_limit: settings.matching.max_limit,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
