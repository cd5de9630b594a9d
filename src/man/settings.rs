use std::default::Default;

use serde::{Deserialize, Serialize};

#[derive(Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    #[serde(rename = "connectTimeoutMillis")]
    pub connect_timeout_millis: u64,
    #[serde(rename = "readTimeoutMillis")]
    pub read_timeout_millis: u64,
    /// Delay before a view reload after a successful mutation, so the
    /// success notification gets a chance to render first.
    #[serde(rename = "reloadDelayMillis")]
    pub reload_delay_millis: u64,
    #[serde(rename = "notificationTtlMillis")]
    pub notification_ttl_millis: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: String::from("http://127.0.0.1:5000"),
            connect_timeout_millis: 1000,
            read_timeout_millis: 10000,
            reload_delay_millis: 1000,
            notification_ttl_millis: 5000,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let mut s = Settings::default();
        if let Ok(v) = std::env::var("STUDENTDESK_BASE_URL") {
            s.base_url = v;
        }
        if let Ok(v) = std::env::var("STUDENTDESK_CONNECT_TIMEOUT_MS") {
            if let Ok(n) = v.parse() {
                s.connect_timeout_millis = n;
            } else {
                log::warn!("Ignoring invalid STUDENTDESK_CONNECT_TIMEOUT_MS: {}", v);
            }
        }
        if let Ok(v) = std::env::var("STUDENTDESK_READ_TIMEOUT_MS") {
            if let Ok(n) = v.parse() {
                s.read_timeout_millis = n;
            } else {
                log::warn!("Ignoring invalid STUDENTDESK_READ_TIMEOUT_MS: {}", v);
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;

    #[test]
    fn defaults_match_deployment() {
        let s = Settings::default();
        assert_eq!(s.reload_delay_millis, 1000);
        assert_eq!(s.notification_ttl_millis, 5000);
        assert!(s.base_url.starts_with("http://"));
    }
}
