use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_appointment_duration_minutes: i32,
    pub default_buffer_minutes: i32,
    pub auto_fill_fan_out: usize,
    pub notify_webhook_url: String,
    pub notify_timeout_seconds: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            default_appointment_duration_minutes: parse_env_or("DEFAULT_APPOINTMENT_DURATION_MINUTES", 30),
            default_buffer_minutes: parse_env_or("DEFAULT_BUFFER_MINUTES", 15),
            auto_fill_fan_out: parse_env_or("AUTO_FILL_FAN_OUT", 5),
            notify_webhook_url: env::var("NOTIFY_WEBHOOK_URL")
                .unwrap_or_else(|_| {
                    warn!("NOTIFY_WEBHOOK_URL not set, using empty value");
                    String::new()
                }),
            notify_timeout_seconds: parse_env_or("NOTIFY_TIMEOUT_SECONDS", 10),
        };

        if !config.is_notification_configured() {
            warn!("Waitlist notification delivery not configured - missing NOTIFY_WEBHOOK_URL");
        }

        config
    }

    pub fn is_notification_configured(&self) -> bool {
        !self.notify_webhook_url.is_empty()
    }
}

fn parse_env_or<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
