//! Runtime configuration
//!
//! Values come from the environment first, then command-line flags:
//!
//! | Variable | Flag | Default |
//! |---|---|---|
//! | `ZOEKT_URL` | `--url` | `http://localhost:6070` |
//! | `ZOEKT_TIMEOUT_MS` | `--timeout-ms` | `30000` |
//! | `ZOEKT_MCP_PORT` | `--port` | unset (stdio) |
//! | `ZOEKT_MCP_DEBUG` | `--debug` | off |

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_ZOEKT_URL: &str = "http://localhost:6070";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid zoekt URL '{0}': {1}")]
    InvalidUrl(String, String),
    #[error("invalid timeout '{0}': expected a positive number of milliseconds")]
    InvalidTimeout(String),
    #[error("invalid port '{0}'")]
    InvalidPort(String),
    #[error("missing value for {0}")]
    MissingValue(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub zoekt_url: Url,
    pub timeout: Duration,
    /// Serve over HTTP on this port instead of stdio
    pub http_port: Option<u16>,
    pub debug: bool,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let zoekt_url = parse_url(
            lookup("ZOEKT_URL")
                .as_deref()
                .unwrap_or(DEFAULT_ZOEKT_URL),
        )?;
        let timeout = match lookup("ZOEKT_TIMEOUT_MS") {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_millis(DEFAULT_TIMEOUT_MS),
        };
        let http_port = lookup("ZOEKT_MCP_PORT")
            .map(|raw| parse_port(&raw))
            .transpose()?;
        let debug = lookup("ZOEKT_MCP_DEBUG").is_some_and(|v| v == "1" || v == "true");

        Ok(Self {
            zoekt_url,
            timeout,
            http_port,
            debug,
        })
    }

    /// Apply recognized flags, returning the remaining positional arguments
    pub fn apply_args(&mut self, args: &[String]) -> Result<Vec<String>, ConfigError> {
        let mut rest = Vec::new();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--url" => self.zoekt_url = parse_url(flag_value(&mut iter, arg)?)?,
                "--timeout-ms" => self.timeout = parse_timeout(flag_value(&mut iter, arg)?)?,
                "--port" => self.http_port = Some(parse_port(flag_value(&mut iter, arg)?)?),
                "--debug" => self.debug = true,
                _ => rest.push(arg.clone()),
            }
        }

        Ok(rest)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zoekt_url: Url::parse(DEFAULT_ZOEKT_URL).expect("default URL is valid"),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            http_port: None,
            debug: false,
        }
    }
}

fn flag_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a str, ConfigError> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    let url =
        Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl(
            raw.to_string(),
            format!("unsupported scheme '{}'", other),
        )),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.zoekt_url.as_str(), "http://localhost:6070/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.http_port, None);
        assert!(!config.debug);
    }

    #[test]
    fn test_environment_values() {
        let config = load(&[
            ("ZOEKT_URL", "http://zoekt.internal:6070"),
            ("ZOEKT_TIMEOUT_MS", "2500"),
            ("ZOEKT_MCP_PORT", "8080"),
            ("ZOEKT_MCP_DEBUG", "1"),
        ])
        .unwrap();
        assert_eq!(config.zoekt_url.host_str(), Some("zoekt.internal"));
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.http_port, Some(8080));
        assert!(config.debug);
    }

    #[test]
    fn test_invalid_environment_values() {
        assert!(matches!(
            load(&[("ZOEKT_URL", "not a url")]),
            Err(ConfigError::InvalidUrl(..))
        ));
        assert!(matches!(
            load(&[("ZOEKT_URL", "ftp://host")]),
            Err(ConfigError::InvalidUrl(..))
        ));
        assert_eq!(
            load(&[("ZOEKT_TIMEOUT_MS", "0")]),
            Err(ConfigError::InvalidTimeout("0".into()))
        );
        assert_eq!(
            load(&[("ZOEKT_TIMEOUT_MS", "soon")]),
            Err(ConfigError::InvalidTimeout("soon".into()))
        );
        assert_eq!(
            load(&[("ZOEKT_MCP_PORT", "99999")]),
            Err(ConfigError::InvalidPort("99999".into()))
        );
    }

    #[test]
    fn test_flags_override_environment() {
        let mut config = load(&[("ZOEKT_URL", "http://a:1")]).unwrap();
        let rest = config
            .apply_args(&args(&[
                "search",
                "--url",
                "http://b:2",
                "foo",
                "--timeout-ms",
                "100",
                "--debug",
            ]))
            .unwrap();
        assert_eq!(rest, args(&["search", "foo"]));
        assert_eq!(config.zoekt_url.host_str(), Some("b"));
        assert_eq!(config.timeout, Duration::from_millis(100));
        assert!(config.debug);
    }

    #[test]
    fn test_flag_missing_value() {
        let mut config = Config::default();
        assert_eq!(
            config.apply_args(&args(&["serve", "--port"])),
            Err(ConfigError::MissingValue("--port".into()))
        );
    }
}
