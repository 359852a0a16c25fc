use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::deserialize_vec_from_string_or_vec;

/// Application configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. config.yaml file (if exists)
/// 3. Environment variables with BV_ prefix (always wins)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub directory: DirectoryConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub security_headers: SecurityHeadersConfig,
    #[serde(default)]
    pub swagger: SwaggerConfig,
}

/// Where the three reference CSV files are fetched from.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectoryConfig {
    /// Base URL the CSV files are served under (required, no compiled-in default).
    #[serde(default)]
    pub base_url: String,

    /// Senate roster file name.
    #[serde(default = "default_senators_file")]
    pub senators_file: String,

    /// Assembly roster file name.
    #[serde(default = "default_assembly_file")]
    pub assembly_file: String,

    /// ZIP-to-district map file name.
    #[serde(default = "default_districts_file")]
    pub districts_file: String,

    /// Wall-clock budget for loading all three files, in seconds.
    #[serde(default = "default_load_timeout_secs")]
    pub load_timeout_secs: u64,
}

impl DirectoryConfig {
    /// Assemble the URL for one file under the base URL.
    #[must_use]
    pub fn url_for(&self, file: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), file)
    }

    /// The load budget as a [`Duration`].
    #[must_use]
    pub const fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// HTTP server bind address.
    #[serde(default = "default_host")]
    pub host: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests.
    /// Use `"*"` to allow any origin (not recommended for production).
    /// Accepts either an array or comma-separated string.
    /// Example: `["http://localhost:5173"]` or `"http://localhost:5173,https://app.example.com"`
    #[serde(
        default = "default_allowed_origins",
        deserialize_with = "deserialize_origins"
    )]
    pub allowed_origins: Vec<String>,
}

/// Deserialize origins from comma-separated string or array, filtering empty values.
fn deserialize_origins<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let origins: Vec<String> = deserialize_vec_from_string_or_vec(deserializer)?;
    Ok(origins.into_iter().filter(|s| !s.is_empty()).collect())
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_senators_file() -> String {
    "wisconsin_senators.csv".to_string()
}

fn default_assembly_file() -> String {
    "wisconsin_assembly.csv".to_string()
}

fn default_districts_file() -> String {
    "wisconsin_districts.csv".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_load_timeout_secs() -> u64 {
    5
}

#[allow(clippy::missing_const_for_fn)]
fn default_allowed_origins() -> Vec<String> {
    // Default to empty (no cross-origin requests allowed) - safe for production
    // Configure explicitly via BV_CORS__ALLOWED_ORIGINS or config.yaml
    vec![]
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecurityHeadersConfig {
    /// Enable security headers (default: true).
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Enable HSTS header (default: false, enable in production with HTTPS).
    #[serde(default)]
    pub hsts_enabled: bool,

    /// HSTS max-age in seconds (default: 31536000 = 1 year).
    #[serde(default = "default_hsts_max_age")]
    pub hsts_max_age: u64,

    /// Include subdomains in HSTS (default: true).
    #[serde(default = "default_true")]
    pub hsts_include_subdomains: bool,

    /// X-Frame-Options value: "DENY" or "SAMEORIGIN" (default: "DENY").
    #[serde(default = "default_frame_options")]
    pub frame_options: String,

    /// Content-Security-Policy header value (default: "default-src 'self'").
    #[serde(default = "default_csp")]
    pub content_security_policy: String,

    /// Referrer-Policy header value (default: "strict-origin-when-cross-origin").
    #[serde(default = "default_referrer_policy")]
    pub referrer_policy: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_true() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_hsts_max_age() -> u64 {
    31_536_000 // 1 year
}

fn default_frame_options() -> String {
    "DENY".to_string()
}

fn default_csp() -> String {
    "default-src 'self'".to_string()
}

fn default_referrer_policy() -> String {
    "strict-origin-when-cross-origin".to_string()
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            hsts_enabled: false,
            hsts_max_age: default_hsts_max_age(),
            hsts_include_subdomains: default_true(),
            frame_options: default_frame_options(),
            content_security_policy: default_csp(),
            referrer_policy: default_referrer_policy(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SwaggerConfig {
    /// Enable Swagger UI at /swagger-ui.
    /// Default: false (disabled for security - exposes API documentation).
    /// Enable in development via `BV_SWAGGER__ENABLED=true`
    #[serde(default)]
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: DirectoryConfig {
                base_url: String::new(),
                senators_file: default_senators_file(),
                assembly_file: default_assembly_file(),
                districts_file: default_districts_file(),
                load_timeout_secs: default_load_timeout_secs(),
            },
            server: ServerConfig {
                port: default_port(),
                host: default_host(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
            },
            cors: CorsConfig::default(),
            security_headers: SecurityHeadersConfig::default(),
            swagger: SwaggerConfig::default(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. config.yaml file (if exists)
    /// 3. Environment variables with BV_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("BV_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The data source is required
        if self.directory.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "directory.base_url is required. Set BV_DIRECTORY__BASE_URL environment variable or configure in config.yaml.".into(),
            ));
        }

        if !self.directory.base_url.starts_with("http://")
            && !self.directory.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(format!(
                "directory.base_url must start with http:// or https://, got: '{}'",
                self.directory.base_url
            )));
        }

        for (name, file) in [
            ("directory.senators_file", &self.directory.senators_file),
            ("directory.assembly_file", &self.directory.assembly_file),
            ("directory.districts_file", &self.directory.districts_file),
        ] {
            if file.is_empty() {
                return Err(ConfigError::Validation(format!("{name} cannot be empty")));
            }
        }

        // Load budget must be non-zero
        if self.directory.load_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "directory.load_timeout_secs cannot be 0".into(),
            ));
        }

        // Port must be non-zero
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port cannot be 0".into()));
        }

        // CORS origins must be valid URLs or "*"
        for origin in &self.cors.allowed_origins {
            if origin != "*" && !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "cors.allowed_origins contains invalid origin '{origin}'. Must be '*' or start with http:// or https://"
                )));
            }
        }

        // X-Frame-Options must be DENY or SAMEORIGIN
        let frame_opts = self.security_headers.frame_options.to_uppercase();
        if frame_opts != "DENY" && frame_opts != "SAMEORIGIN" {
            return Err(ConfigError::Validation(format!(
                "security_headers.frame_options must be 'DENY' or 'SAMEORIGIN', got: '{}'",
                self.security_headers.frame_options
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.directory.base_url = "https://data.badgervoice.org".into();
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert!(config.directory.base_url.is_empty());
        assert_eq!(config.directory.senators_file, "wisconsin_senators.csv");
        assert_eq!(config.directory.assembly_file, "wisconsin_assembly.csv");
        assert_eq!(config.directory.districts_file, "wisconsin_districts.csv");
        assert_eq!(config.directory.load_timeout_secs, 5);
    }

    #[test]
    fn test_validation_accepts_valid_config() {
        let config = valid_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_base_url() {
        let mut config = valid_config();
        config.directory.base_url = String::new();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("directory.base_url"));
    }

    #[test]
    fn test_validation_rejects_bad_base_url_scheme() {
        let mut config = valid_config();
        config.directory.base_url = "ftp://data.badgervoice.org".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_file_name() {
        let mut config = valid_config();
        config.directory.districts_file = String::new();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("directory.districts_file"));
    }

    #[test]
    fn test_url_for_joins_without_doubling_slashes() {
        let mut config = valid_config();
        config.directory.base_url = "https://data.badgervoice.org/".into();
        assert_eq!(
            config.directory.url_for("wisconsin_senators.csv"),
            "https://data.badgervoice.org/wisconsin_senators.csv"
        );
    }

    #[test]
    fn test_load_timeout_is_a_duration() {
        let mut config = valid_config();
        config.directory.load_timeout_secs = 7;
        assert_eq!(config.directory.load_timeout(), Duration::from_secs(7));
    }

    #[test]
    fn test_cors_defaults_to_empty() {
        let config = CorsConfig::default();
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_cors_validation_accepts_valid_origins() {
        let mut config = valid_config();
        config.cors.allowed_origins = vec![
            "http://localhost:3000".into(),
            "https://app.example.com".into(),
        ];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cors_deserialize_comma_separated_string() {
        // Simulate what figment does with env var
        let json = r#"{"allowed_origins": "http://localhost:5173,https://app.example.com"}"#;
        let config: CorsConfig = serde_json::from_str(json).expect("should parse");
        assert_eq!(config.allowed_origins.len(), 2);
        assert_eq!(config.allowed_origins[0], "http://localhost:5173");
        assert_eq!(config.allowed_origins[1], "https://app.example.com");
    }

    #[test]
    fn test_cors_deserialize_array() {
        let json = r#"{"allowed_origins": ["http://localhost:5173", "https://app.example.com"]}"#;
        let config: CorsConfig = serde_json::from_str(json).expect("should parse");
        assert_eq!(config.allowed_origins.len(), 2);
    }

    #[test]
    fn test_cors_deserialize_empty_string() {
        let json = r#"{"allowed_origins": ""}"#;
        let config: CorsConfig = serde_json::from_str(json).expect("should parse");
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_swagger_disabled_by_default() {
        let config = SwaggerConfig::default();
        assert!(!config.enabled);
    }

    #[test]
    fn test_swagger_can_be_enabled() {
        let json = r#"{"enabled": true}"#;
        let config: SwaggerConfig = serde_json::from_str(json).expect("should parse");
        assert!(config.enabled);
    }

    #[test]
    fn env_overrides_yaml_and_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r"
directory:
  base_url: https://yaml.example.org
server:
  port: 9000
",
            )?;
            jail.set_env("BV_SERVER__PORT", "9100");
            jail.set_env("BV_DIRECTORY__LOAD_TIMEOUT_SECS", "9");

            let config = Config::load().expect("loads");
            assert_eq!(config.directory.base_url, "https://yaml.example.org");
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.directory.load_timeout_secs, 9);
            Ok(())
        });
    }

    #[test]
    fn load_fails_without_base_url() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "server:\n  port: 9000\n")?;
            let err = Config::load().expect_err("base_url is required");
            assert!(err.to_string().contains("directory.base_url"));
            Ok(())
        });
    }

    // Table-driven boundary tests for validation rules

    #[test]
    fn port_boundaries() {
        let cases = [
            (0u16, false, "zero port"),
            (1, true, "minimum valid port"),
            (80, true, "common HTTP port"),
            (8080, true, "default port"),
            (65535, true, "maximum port"),
        ];

        for (port, should_pass, desc) in cases {
            let mut config = valid_config();
            config.server.port = port;
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn load_timeout_boundaries() {
        let cases = [
            (0u64, false, "zero budget"),
            (1, true, "minimum budget"),
            (5, true, "default budget"),
            (120, true, "generous budget"),
        ];

        for (secs, should_pass, desc) in cases {
            let mut config = valid_config();
            config.directory.load_timeout_secs = secs;
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn cors_origin_boundaries() {
        let cases = [
            (vec!["*"], true, "wildcard"),
            (vec!["http://localhost"], true, "http localhost"),
            (vec!["https://example.com"], true, "https domain"),
            (vec!["http://localhost:3000"], true, "with port"),
            (vec![], true, "empty list"),
            (vec!["ftp://files.com"], false, "ftp scheme"),
            (vec!["localhost"], false, "no scheme"),
            (vec!["//example.com"], false, "protocol-relative"),
        ];

        for (origins, should_pass, desc) in cases {
            let mut config = valid_config();
            config.cors.allowed_origins = origins.into_iter().map(String::from).collect();
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn frame_options_boundaries() {
        let cases = [
            ("DENY", true, "uppercase DENY"),
            ("SAMEORIGIN", true, "uppercase SAMEORIGIN"),
            ("deny", true, "lowercase deny"),
            ("sameorigin", true, "lowercase sameorigin"),
            ("Deny", true, "mixed case Deny"),
            ("ALLOW-FROM", false, "deprecated ALLOW-FROM"),
            ("", false, "empty string"),
            ("INVALID", false, "invalid value"),
        ];

        for (value, should_pass, desc) in cases {
            let mut config = valid_config();
            config.security_headers.frame_options = value.into();
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }
}
