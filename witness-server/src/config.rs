//! Server Configuration
//!
//! Layered configuration: built-in defaults, then an optional
//! `witness-server.toml` in the working directory, then `WITNESS_SERVER_*`
//! environment variables (a `.env` file is loaded first if present).

use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};

/// Environment variable holding the hex attestation key
pub const ATTESTATION_KEY_ENV: &str = "WITNESS_SERVER_ATTESTATION_SECRET_KEY";

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Attestation secret key (hex encoded)
    pub attestation_secret_key: Option<String>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Largest content accepted by the prepare endpoint, in bytes
    #[serde(default = "default_max_content_bytes")]
    pub max_content_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_max_content_bytes() -> usize {
    8 * 1024 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            attestation_secret_key: None,
            log_level: default_log_level(),
            json_logs: false,
            cors_origins: default_cors_origins(),
            max_content_bytes: default_max_content_bytes(),
        }
    }
}

impl Config {
    /// Load configuration from `witness-server.toml` and the environment
    pub fn load() -> Result<Self, ::config::ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut config: Config = ::config::Config::builder()
            .add_source(::config::File::with_name("witness-server").required(false))
            .add_source(
                ::config::Environment::with_prefix("WITNESS_SERVER")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_origins"),
            )
            .build()?
            .try_deserialize()?;

        // Hex keys can look numeric to `try_parsing`; take the raw string
        if let Ok(key) = std::env::var(ATTESTATION_KEY_ENV) {
            config.attestation_secret_key = Some(key);
        }

        Ok(config)
    }

    /// Get socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Request body cap: hex doubles the content, plus room for the JSON envelope
    pub fn request_body_limit(&self) -> usize {
        self.max_content_bytes.saturating_mul(2).saturating_add(4096)
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}
