use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Content
    pub lang_dir: PathBuf,
    pub static_dir: PathBuf,

    // Site
    pub site_url: String,
    pub contact_email: String,

    // Sessions
    pub session_cookie: String,
    pub session_ttl_minutes: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // Content - dictionaries are <LANG_DIR>/<code>.json
            lang_dir: std::env::var("LANG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("lang")),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),

            // Site
            site_url: std::env::var("SITE_URL")
                .unwrap_or_else(|_| "https://your-app.azurewebsites.net".to_string()),
            contact_email: std::env::var("CONTACT_EMAIL")
                .unwrap_or_else(|_| "info@cloudcomputing.edu".to_string()),

            // Sessions
            session_cookie: std::env::var("SESSION_COOKIE")
                .unwrap_or_else(|_| "SITE_SESSION".to_string()),
            session_ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| parse_ttl_minutes(&v))
                .unwrap_or(24),
        })
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_minutes.saturating_mul(60))
    }
}

/// Minutes whose value in seconds fits a `u64`; anything else is malformed.
fn parse_ttl_minutes(value: &str) -> Option<u64> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|minutes| minutes.checked_mul(60).is_some())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            lang_dir: PathBuf::from("lang"),
            static_dir: PathBuf::from("static"),
            site_url: "https://your-app.azurewebsites.net".to_string(),
            contact_email: "info@cloudcomputing.edu".to_string(),
            session_cookie: "SITE_SESSION".to_string(),
            session_ttl_minutes: 24,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.lang_dir, PathBuf::from("lang"));
        assert_eq!(config.session_cookie, "SITE_SESSION");
    }

    #[test]
    fn test_session_ttl() {
        let config = Config {
            session_ttl_minutes: 2,
            ..Config::default()
        };
        assert_eq!(config.session_ttl(), Duration::from_secs(120));
    }

    #[test]
    fn test_session_ttl_saturates() {
        let config = Config {
            session_ttl_minutes: u64::MAX / 2,
            ..Config::default()
        };
        assert_eq!(config.session_ttl(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_parse_ttl_minutes() {
        assert_eq!(parse_ttl_minutes("30"), Some(30));
        assert_eq!(parse_ttl_minutes(" 0 "), Some(0));
        assert_eq!(parse_ttl_minutes(&(u64::MAX / 60).to_string()), Some(u64::MAX / 60));
    }

    #[test]
    fn test_parse_ttl_minutes_rejects_overflow_and_garbage() {
        assert_eq!(parse_ttl_minutes(&(u64::MAX / 60 + 1).to_string()), None);
        assert_eq!(parse_ttl_minutes(&u64::MAX.to_string()), None);
        assert_eq!(parse_ttl_minutes("-5"), None);
        assert_eq!(parse_ttl_minutes("ten"), None);
    }
}
