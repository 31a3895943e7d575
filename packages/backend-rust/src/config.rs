use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use mentor_algo::RngSource;

const DEFAULT_LOG_DIR: &str = "./logs";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    /// Fixed seed for the estimators' random draws; unset means OS entropy
    pub estimator_seed: Option<u64>,
    pub healthcheck_endpoint: String,
    /// Daily rolling log files next to stdout
    pub file_logs: bool,
    pub log_dir: PathBuf,
    /// RSS budget checked by the liveness probe; unset disables the check
    pub memory_limit_bytes: Option<u64>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let estimator_seed = std::env::var("ESTIMATOR_SEED")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok());

        let healthcheck_endpoint = normalize_healthcheck_endpoint(
            std::env::var("HEALTHCHECK_ENDPOINT")
                .ok()
                .as_deref()
                .unwrap_or("/health"),
        );

        let file_logs = env_bool("ENABLE_FILE_LOGS").unwrap_or(false);
        let log_dir = std::env::var("LOG_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        let memory_limit_bytes = std::env::var("HEALTH_MEMORY_LIMIT_MB")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|mb| *mb > 0)
            .map(|mb| mb * 1024 * 1024);

        Self {
            host,
            port,
            log_level,
            estimator_seed,
            healthcheck_endpoint,
            file_logs,
            log_dir,
            memory_limit_bytes,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn rng_source(&self) -> RngSource {
        RngSource::from_seed(self.estimator_seed)
    }

    /// Directory for rolling log files, when file logging is on
    pub fn log_file_dir(&self) -> Option<&Path> {
        self.file_logs.then_some(self.log_dir.as_path())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 3000,
            log_level: "info".to_string(),
            estimator_seed: None,
            healthcheck_endpoint: "/health".to_string(),
            file_logs: false,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            memory_limit_bytes: None,
        }
    }
}

pub fn env_bool(key: &str) -> Option<bool> {
    let value = std::env::var(key).ok()?;
    parse_bool(&value)
}

/// Accepts 1/true/yes/y/on and 0/false/no/n/off, case-insensitive
pub fn parse_bool(raw: &str) -> Option<bool> {
    let normalized = raw.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

pub fn normalize_healthcheck_endpoint(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "/health".to_string();
    }

    let with_slash = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };

    if with_slash != "/" {
        with_slash.trim_end_matches('/').to_string()
    } else {
        "/".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" on "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("No"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_normalize_healthcheck_endpoint() {
        assert_eq!(normalize_healthcheck_endpoint(""), "/health");
        assert_eq!(normalize_healthcheck_endpoint("status"), "/status");
        assert_eq!(normalize_healthcheck_endpoint("/healthz/"), "/healthz");
        assert_eq!(normalize_healthcheck_endpoint("/"), "/");
    }

    #[test]
    fn test_default_uses_entropy() {
        let config = Config::default();
        assert_eq!(config.rng_source(), RngSource::Entropy);
        assert_eq!(config.bind_addr().port(), 3000);
        assert_eq!(config.memory_limit_bytes, None);
    }

    #[test]
    fn test_log_file_dir_follows_flag() {
        let config = Config {
            log_dir: PathBuf::from("/var/log/mentor"),
            ..Config::default()
        };
        assert_eq!(config.log_file_dir(), None);

        let config = Config {
            file_logs: true,
            ..config
        };
        assert_eq!(config.log_file_dir(), Some(Path::new("/var/log/mentor")));
    }
}
