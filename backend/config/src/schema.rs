use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CREDENTIALS_PATH: &str = "./google-credentials.json";
pub const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";
pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const DEFAULT_ORA_API_KEY: &str = "your-ora-api-key";
pub const DEFAULT_ORA_API_URL: &str = "https://api.ora.ai/v1";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Oravision runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OravisionConfig {
    pub server: ServerConfig,
    pub vision: VisionConfig,
    pub ora: OraConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Google Cloud Vision settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionConfig {
    /// Service-account key file, or a JSON object with an `api_key` entry.
    pub credentials_path: PathBuf,
    /// Explicit API key, preferred over the credentials file.
    pub api_key: Option<String>,
    pub endpoint: String,
    /// `maxResults` sent with every requested feature.
    pub max_results: u32,
    /// Client-side request timeout. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            api_key: None,
            endpoint: DEFAULT_VISION_ENDPOINT.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout_secs: None,
        }
    }
}

/// How the vision backend authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisionAuth {
    /// `?key=` query parameter.
    ApiKey(String),
    /// Service-account JSON file exchanged for OAuth bearer tokens.
    ServiceAccount(PathBuf),
}

impl VisionConfig {
    /// Resolve credentials: explicit key first, then the credentials file,
    /// which is either a service-account key or a JSON object with an
    /// `api_key` entry. `None` means the adapter serves fixtures.
    pub fn resolve_auth(&self) -> Option<VisionAuth> {
        if let Some(key) = self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            return Some(VisionAuth::ApiKey(key.to_string()));
        }
        read_credentials_file(&self.credentials_path)
    }
}

fn read_credentials_file(path: &Path) -> Option<VisionAuth> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No vision credentials file");
            return None;
        }
    };
    let json: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(json) => json,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Vision credentials file is not valid JSON");
            return None;
        }
    };

    if json.get("type").and_then(|v| v.as_str()) == Some("service_account") {
        let has_key = json
            .get("private_key")
            .and_then(|v| v.as_str())
            .is_some_and(|k| !k.trim().is_empty());
        if !has_key {
            warn!(path = %path.display(), "Service account file has no private_key");
            return None;
        }
        return Some(VisionAuth::ServiceAccount(path.to_path_buf()));
    }

    let key = json
        .get("api_key")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(|k| VisionAuth::ApiKey(k.to_string()));
    if key.is_none() {
        warn!(
            path = %path.display(),
            "Vision credentials file has neither a service account nor an api_key"
        );
    }
    key
}

/// Settings for the ORA completion API. The answer is simulated locally, so
/// these are only reported, never sent anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OraConfig {
    pub api_key: String,
    pub api_url: String,
}

impl Default for OraConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_ORA_API_KEY.to_string(),
            api_url: DEFAULT_ORA_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily-rolling NDJSON logs. Console only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }
}
