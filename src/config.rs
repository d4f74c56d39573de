use std::env;
use std::str::FromStr;
use std::time::Duration;
use log::warn;

pub const DEFAULT_PLACE_ID: u64 = 109983668079237;
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://games.roblox.com/v1/games";

#[derive(Clone, Debug)]
pub struct Config {
    // Listener
    pub bind_address: String,
    pub port: u16,

    // Target game and filter
    pub place_id: u64,
    pub max_playing: i64,

    // Upstream client
    pub upstream_base_url: String,
    pub upstream_timeout_ms: u64,
    pub upstream_max_attempts: u32,
    pub upstream_backoff_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            place_id: DEFAULT_PLACE_ID,
            max_playing: 6,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_timeout_ms: 15_000,
            upstream_max_attempts: 4,
            upstream_backoff_ms: 500,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset or unparseable keys keep
    /// their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            bind_address: lookup("BIND_ADDRESS")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.bind_address),

            port: parse_or(&lookup, "PORT", defaults.port),

            place_id: parse_or(&lookup, "PLACE_ID", defaults.place_id),

            max_playing: match lookup("MAX_PLAYING") {
                Some(raw) => parse_int_prefix(&raw).unwrap_or_else(|| {
                    warn!("Ignoring invalid MAX_PLAYING={:?}, using default {}", raw, defaults.max_playing);
                    defaults.max_playing
                }),
                None => defaults.max_playing,
            },

            upstream_base_url: lookup("UPSTREAM_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.upstream_base_url),

            upstream_timeout_ms: parse_or(&lookup, "UPSTREAM_TIMEOUT_MS", defaults.upstream_timeout_ms),

            upstream_max_attempts: parse_or(&lookup, "UPSTREAM_MAX_ATTEMPTS", defaults.upstream_max_attempts)
                .max(1),

            upstream_backoff_ms: parse_or(&lookup, "UPSTREAM_BACKOFF_MS", defaults.upstream_backoff_ms),
        }
    }

    pub fn bind(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    pub fn upstream_backoff_step(&self) -> Duration {
        Duration::from_millis(self.upstream_backoff_ms)
    }
}

/// Leading base-10 integer of `raw`, ignoring anything after it ("3.5" is 3, "6abc" is 6).
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = if s.starts_with('+') || s.starts_with('-') { 1 } else { 0 };
    let digits = s[sign_len..].chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                warn!("Ignoring invalid {}={:?}, using default {}", key, raw, default);
                default
            }
        },
        None => default,
    }
}
