use std::sync::Arc;
use std::time::Duration;

use log::warn;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Runtime configuration for the admin client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    server_url: Arc<str>,
    poll_interval: Duration,
    request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: Arc::from(DEFAULT_SERVER_URL),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: None,
        }
    }
}

impl AppConfig {
    pub fn new(server_url: impl Into<Arc<str>>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Self::default()
        }
    }

    /// Reads `ROSTER_SERVER_URL`, `ROSTER_POLL_INTERVAL` and
    /// `ROSTER_REQUEST_TIMEOUT`. Durations use humantime syntax (`5s`,
    /// `1m 30s`); unparsable values fall back to the default with a warning.
    pub fn from_environment() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let server_url = lookup("ROSTER_SERVER_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .map(Arc::from)
            .unwrap_or(defaults.server_url);

        let poll_interval = parse_duration(&lookup, "ROSTER_POLL_INTERVAL")
            .filter(|interval| !interval.is_zero())
            .unwrap_or(defaults.poll_interval);

        let request_timeout = parse_duration(&lookup, "ROSTER_REQUEST_TIMEOUT");

        Self {
            server_url,
            poll_interval,
            request_timeout,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

fn parse_duration(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    let raw = lookup(key)?;
    match humantime::parse_duration(raw.trim()) {
        Ok(duration) => Some(duration),
        Err(err) => {
            warn!("Ignoring {}={:?}: {}", key, raw, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.server_url(), "http://localhost:8080");
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ROSTER_SERVER_URL", "https://users.internal"),
            ("ROSTER_POLL_INTERVAL", "1m 30s"),
            ("ROSTER_REQUEST_TIMEOUT", "10s"),
        ]));
        assert_eq!(config.server_url(), "https://users.internal");
        assert_eq!(config.poll_interval(), Duration::from_secs(90));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn bad_or_zero_interval_falls_back() {
        let config = AppConfig::from_lookup(lookup(&[("ROSTER_POLL_INTERVAL", "soon")]));
        assert_eq!(config.poll_interval(), DEFAULT_POLL_INTERVAL);
        let config = AppConfig::from_lookup(lookup(&[("ROSTER_POLL_INTERVAL", "0s")]));
        assert_eq!(config.poll_interval(), DEFAULT_POLL_INTERVAL);
    }
}
