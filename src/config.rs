use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub api_key: String,
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,
    #[serde(default = "default_requests_table")]
    pub requests_table: String,
    pub timeout_secs: Option<u64>,
}

fn default_profiles_table() -> String { "profiles".to_string() }
fn default_requests_table() -> String { "blood_requests".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    #[serde(default = "default_audience")]
    pub audience: String,
}

fn default_audience() -> String { "authenticated".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_radius_km")]
    pub default_radius_km: Option<f64>,
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_radius_km() -> Option<f64> { Some(10.0) }
fn default_limit() -> u16 { 50 }
fn default_max_limit() -> u16 { 500 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with DONOR_MATCH)
    /// 5. The plain Supabase variables (SUPABASE_URL, SUPABASE_KEY, SUPABASE_JWT_SECRET)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., DONOR_MATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("DONOR_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_supabase_env(settings, |name| std::env::var(name).ok())?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("DONOR_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Let the variables the Supabase tooling exports override config values
fn apply_supabase_env<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let overrides = [
        ("supabase.url", "SUPABASE_URL"),
        ("supabase.api_key", "SUPABASE_KEY"),
        // Applied last so the service role key wins over the anon key
        ("supabase.api_key", "SUPABASE_SERVICE_ROLE_KEY"),
        ("auth.jwt_secret", "SUPABASE_JWT_SECRET"),
    ];

    let mut builder = Config::builder().add_source(settings);
    for (key, var) in overrides {
        if let Some(value) = lookup(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    const MINIMAL: &str = r#"
[server]
host = "127.0.0.1"
port = 8080

[supabase]
url = "http://localhost:54321"
api_key = "file-key"

[auth]
jwt_secret = "file-secret"
"#;

    #[test]
    fn test_default_matching() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.default_radius_km, Some(10.0));
        assert_eq!(matching.default_limit, 50);
        assert_eq!(matching.max_limit, 500);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_minimal_file_fills_defaults() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(MINIMAL, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.supabase.profiles_table, "profiles");
        assert_eq!(settings.supabase.requests_table, "blood_requests");
        assert_eq!(settings.auth.audience, "authenticated");
        assert_eq!(settings.matching.max_limit, 500);
    }

    #[test]
    fn test_supabase_env_overrides() {
        let base = Config::builder()
            .add_source(File::from_str(MINIMAL, FileFormat::Toml))
            .build()
            .unwrap();

        let settings: Settings = apply_supabase_env(base, |name| match name {
            "SUPABASE_KEY" => Some("env-key".to_string()),
            "SUPABASE_JWT_SECRET" => Some("env-secret".to_string()),
            _ => None,
        })
        .unwrap()
        .try_deserialize()
        .unwrap();

        assert_eq!(settings.supabase.url, "http://localhost:54321");
        assert_eq!(settings.supabase.api_key, "env-key");
        assert_eq!(settings.auth.jwt_secret, "env-secret");
    }
}
