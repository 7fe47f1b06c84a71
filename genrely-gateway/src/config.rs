//! Gateway configuration
//!
//! Explicit configuration struct passed into the orchestrator at
//! construction; nothing reads ambient process state at call time.
//! Resolution priority: environment variables > TOML config file >
//! compiled defaults. (The listen port additionally accepts a
//! command-line flag; see `main.rs`.)

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::{GatewayError, Result};

/// Maximum accepted upload size: 10 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the audio preprocessing collaborator
    pub audio_service_url: String,
    /// Base URL of the ML inference collaborator
    pub ml_service_url: String,
    /// Stage A timeout; long, preprocessing may run signal separation
    pub audio_timeout: Duration,
    /// Stage B timeout
    pub ml_timeout: Duration,
    /// Per-collaborator timeout for the detailed health probe
    pub health_timeout: Duration,
    /// Directory holding transient upload artifacts
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Redact upstream/internal error detail when true
    pub production: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            audio_service_url: "http://localhost:5001".to_string(),
            ml_service_url: "http://localhost:5002".to_string(),
            audio_timeout: Duration::from_secs(120),
            ml_timeout: Duration::from_secs(30),
            health_timeout: Duration::from_secs(5),
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            production: false,
        }
    }
}

/// Optional overrides from a TOML config file
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    host: Option<String>,
    port: Option<u16>,
    audio_service_url: Option<String>,
    ml_service_url: Option<String>,
    audio_timeout_ms: Option<u64>,
    ml_timeout_ms: Option<u64>,
    health_timeout_ms: Option<u64>,
    upload_dir: Option<PathBuf>,
    max_upload_bytes: Option<usize>,
    production: Option<bool>,
}

impl GatewayConfig {
    /// Load configuration: defaults, then the TOML file (if given), then
    /// environment variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = config_file {
            config.apply_file(path)?;
        }
        config.apply_env();
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let file: FileConfig = toml::from_str(&contents)
            .map_err(|e| GatewayError::Config(format!("invalid TOML in {}: {}", path.display(), e)))?;

        if let Some(v) = file.host {
            self.host = v;
        }
        if let Some(v) = file.port {
            self.port = v;
        }
        if let Some(v) = file.audio_service_url {
            self.audio_service_url = v;
        }
        if let Some(v) = file.ml_service_url {
            self.ml_service_url = v;
        }
        if let Some(v) = file.audio_timeout_ms {
            self.audio_timeout = Duration::from_millis(v);
        }
        if let Some(v) = file.ml_timeout_ms {
            self.ml_timeout = Duration::from_millis(v);
        }
        if let Some(v) = file.health_timeout_ms {
            self.health_timeout = Duration::from_millis(v);
        }
        if let Some(v) = file.upload_dir {
            self.upload_dir = v;
        }
        if let Some(v) = file.max_upload_bytes {
            self.max_upload_bytes = v;
        }
        if let Some(v) = file.production {
            self.production = v;
        }
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("GENRELY_AUDIO_SERVICE_URL") {
            self.audio_service_url = v;
        }
        if let Ok(v) = std::env::var("GENRELY_ML_SERVICE_URL") {
            self.ml_service_url = v;
        }
        if let Ok(v) = std::env::var("GENRELY_AUDIO_TIMEOUT_MS") {
            if let Ok(ms) = v.parse() {
                self.audio_timeout = Duration::from_millis(ms);
            }
        }
        if let Ok(v) = std::env::var("GENRELY_ML_TIMEOUT_MS") {
            if let Ok(ms) = v.parse() {
                self.ml_timeout = Duration::from_millis(ms);
            }
        }
        if let Ok(v) = std::env::var("GENRELY_UPLOAD_DIR") {
            self.upload_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("GENRELY_ENV") {
            self.production = v == "production";
        }
    }

    /// Validate that the configuration makes sense before serving
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(GatewayError::Config("port must not be 0".into()));
        }
        for (name, url) in [
            ("audio_service_url", &self.audio_service_url),
            ("ml_service_url", &self.ml_service_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(GatewayError::Config(format!(
                    "{name} must be an http(s) URL, got {url:?}"
                )));
            }
        }
        if self.audio_timeout.is_zero() || self.ml_timeout.is_zero() {
            return Err(GatewayError::Config("timeouts must be positive".into()));
        }
        if self.max_upload_bytes == 0 {
            return Err(GatewayError::Config("max_upload_bytes must be positive".into()));
        }
        Ok(())
    }
}
