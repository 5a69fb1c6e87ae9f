//! Environment-variable loading.
//!
//! Every setting has a fixed default; an unparsable value logs a warning and
//! falls back to that default instead of failing startup.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::schema::{LoggingConfig, OraConfig, OravisionConfig, ServerConfig, VisionConfig};

pub const ENV_BIND: &str = "ORAVISION_BIND";
pub const ENV_PORT: &str = "ORAVISION_PORT";
pub const ENV_PORT_FALLBACK: &str = "PORT";
pub const ENV_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const ENV_VISION_KEY: &str = "GOOGLE_VISION_API_KEY";
pub const ENV_VISION_ENDPOINT: &str = "GOOGLE_VISION_ENDPOINT";
pub const ENV_VISION_MAX_RESULTS: &str = "GOOGLE_VISION_MAX_RESULTS";
pub const ENV_VISION_TIMEOUT: &str = "GOOGLE_VISION_TIMEOUT_SECS";
pub const ENV_ORA_KEY: &str = "ORA_API_KEY";
pub const ENV_ORA_URL: &str = "ORA_API_URL";
pub const ENV_LOG_LEVEL: &str = "RUST_LOG";
pub const ENV_LOG_DIR: &str = "ORAVISION_LOG_DIR";

impl OravisionConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_map(&std::env::vars().collect())
    }

    /// Load configuration from a provided map (useful for testing).
    pub fn from_env_map(env: &HashMap<String, String>) -> Self {
        let server_defaults = ServerConfig::default();
        let vision_defaults = VisionConfig::default();
        let ora_defaults = OraConfig::default();
        let logging_defaults = LoggingConfig::default();

        let port = lookup(env, ENV_PORT)
            .map(|_| ENV_PORT)
            .or_else(|| lookup(env, ENV_PORT_FALLBACK).map(|_| ENV_PORT_FALLBACK))
            .map(|name| parse_or(env, name, server_defaults.port))
            .unwrap_or(server_defaults.port);

        Self {
            server: ServerConfig {
                bind_address: string_or(env, ENV_BIND, server_defaults.bind_address),
                port,
            },
            vision: VisionConfig {
                credentials_path: lookup(env, ENV_CREDENTIALS)
                    .map(PathBuf::from)
                    .unwrap_or(vision_defaults.credentials_path),
                api_key: lookup(env, ENV_VISION_KEY).map(str::to_string),
                endpoint: string_or(env, ENV_VISION_ENDPOINT, vision_defaults.endpoint),
                max_results: parse_or(env, ENV_VISION_MAX_RESULTS, vision_defaults.max_results),
                timeout_secs: parse_opt(env, ENV_VISION_TIMEOUT),
            },
            ora: OraConfig {
                api_key: string_or(env, ENV_ORA_KEY, ora_defaults.api_key),
                api_url: string_or(env, ENV_ORA_URL, ora_defaults.api_url),
            },
            logging: LoggingConfig {
                level: string_or(env, ENV_LOG_LEVEL, logging_defaults.level),
                log_dir: lookup(env, ENV_LOG_DIR).map(PathBuf::from),
            },
        }
    }
}

/// Non-empty value of `name`.
fn lookup<'a>(env: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    env.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn string_or(env: &HashMap<String, String>, name: &str, default: String) -> String {
    lookup(env, name).map(str::to_string).unwrap_or(default)
}

fn parse_opt<T: FromStr>(env: &HashMap<String, String>, name: &str) -> Option<T> {
    let raw = lookup(env, name)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = raw, "Ignoring unparsable environment value");
            None
        }
    }
}

fn parse_or<T: FromStr>(env: &HashMap<String, String>, name: &str, default: T) -> T {
    parse_opt(env, name).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DEFAULT_CREDENTIALS_PATH, DEFAULT_ORA_API_URL, DEFAULT_PORT};

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = OravisionConfig::from_env_map(&HashMap::new());
        assert_eq!(cfg, OravisionConfig::default());
        assert_eq!(cfg.server.port, DEFAULT_PORT);
        assert_eq!(cfg.vision.credentials_path, PathBuf::from(DEFAULT_CREDENTIALS_PATH));
        assert_eq!(cfg.ora.api_url, DEFAULT_ORA_API_URL);
        assert!(cfg.vision.api_key.is_none());
    }

    #[test]
    fn reads_overrides() {
        let cfg = OravisionConfig::from_env_map(&env(&[
            (ENV_PORT, "8088"),
            (ENV_VISION_KEY, "k-123"),
            (ENV_VISION_MAX_RESULTS, "5"),
            (ENV_VISION_TIMEOUT, "30"),
            (ENV_ORA_URL, "http://localhost:9999"),
            (ENV_LOG_DIR, "/tmp/oravision-logs"),
        ]));
        assert_eq!(cfg.server.port, 8088);
        assert_eq!(cfg.vision.api_key.as_deref(), Some("k-123"));
        assert_eq!(cfg.vision.max_results, 5);
        assert_eq!(cfg.vision.timeout_secs, Some(30));
        assert_eq!(cfg.ora.api_url, "http://localhost:9999");
        assert_eq!(cfg.logging.log_dir, Some(PathBuf::from("/tmp/oravision-logs")));
    }

    #[test]
    fn port_falls_back_to_generic_var() {
        let cfg = OravisionConfig::from_env_map(&env(&[(ENV_PORT_FALLBACK, "4000")]));
        assert_eq!(cfg.server.port, 4000);

        let cfg =
            OravisionConfig::from_env_map(&env(&[(ENV_PORT, "5000"), (ENV_PORT_FALLBACK, "4000")]));
        assert_eq!(cfg.server.port, 5000);
    }

    #[test]
    fn bad_numbers_fall_back_to_defaults() {
        let cfg = OravisionConfig::from_env_map(&env(&[
            (ENV_PORT, "not-a-port"),
            (ENV_VISION_TIMEOUT, "soon"),
        ]));
        assert_eq!(cfg.server.port, DEFAULT_PORT);
        assert!(cfg.vision.timeout_secs.is_none());
    }

    #[test]
    fn blank_values_are_ignored() {
        let cfg = OravisionConfig::from_env_map(&env(&[(ENV_VISION_KEY, "  "), (ENV_BIND, "")]));
        assert!(cfg.vision.api_key.is_none());
        assert_eq!(cfg.server.bind_address, "0.0.0.0");
    }
}
