use std::time::Duration;

use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Process-wide settings, read once at startup.
///
/// A missing `ANTHROPIC_API_KEY` is not a startup failure: the handler
/// answers with a canned message instead.
#[derive(Clone)]
pub struct CompanionConfig {
    pub bind_addr: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub upstream_timeout: Duration,
}

impl CompanionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup("ANTHROPIC_API_KEY").filter(|key| !key.trim().is_empty());
        let base_url = lookup("ANTHROPIC_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string());
        let bind_addr =
            lookup("COMPANION_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let timeout_secs = match lookup("COMPANION_UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(
                        value = %raw,
                        default = DEFAULT_UPSTREAM_TIMEOUT_SECS,
                        "ignoring invalid COMPANION_UPSTREAM_TIMEOUT_SECS"
                    );
                    DEFAULT_UPSTREAM_TIMEOUT_SECS
                }
            },
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        Self {
            bind_addr,
            api_key,
            base_url,
            upstream_timeout: Duration::from_secs(timeout_secs),
        }
    }
}
