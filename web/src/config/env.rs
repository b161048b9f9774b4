use std::sync::OnceLock;

use super::{
    CalendarSettings, API_TIMEOUT_VAR, API_URL_VAR, DEFAULT_DISALLOWED_DAYS,
    DEFAULT_MONTHS_AHEAD, DISALLOWED_DAYS_VAR, MONTHS_AHEAD_VAR,
};
use crate::error::ConfigError;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_timeout_secs: u64,
    pub calendar: CalendarSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset keys fall back
    /// to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = match lookup(API_URL_VAR) {
            Some(raw) => parse_base_url(&raw)?,
            None => DEFAULT_API_URL.to_string(),
        };

        let api_timeout_secs = match lookup(API_TIMEOUT_VAR) {
            Some(raw) => parse_number(API_TIMEOUT_VAR, &raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let months_ahead = match lookup(MONTHS_AHEAD_VAR) {
            Some(raw) => parse_number(MONTHS_AHEAD_VAR, &raw)?,
            None => DEFAULT_MONTHS_AHEAD,
        };

        let disallowed_days = match lookup(DISALLOWED_DAYS_VAR) {
            Some(raw) => parse_days(&raw)?,
            None => DEFAULT_DISALLOWED_DAYS.to_vec(),
        };

        Ok(Self {
            api_base_url,
            api_timeout_secs,
            calendar: CalendarSettings {
                months_ahead,
                disallowed_days,
            },
        })
    }
}

fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let url = reqwest::Url::parse(raw.trim()).map_err(|e| invalid(API_URL_VAR, raw, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(API_URL_VAR, raw, "expected an http(s) URL"));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| invalid(key, raw, "expected a non-negative integer"))
}

fn parse_days(raw: &str) -> Result<Vec<u32>, ConfigError> {
    let mut days = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let day: u32 = parse_number(DISALLOWED_DAYS_VAR, part)?;
        if !(1..=31).contains(&day) {
            return Err(invalid(DISALLOWED_DAYS_VAR, raw, format!("{} is not a day of the month", day)));
        }
        if !days.contains(&day) {
            days.push(day);
        }
    }
    days.sort_unstable();
    Ok(days)
}

/// Installs the process-wide configuration. Call once at start-up.
pub fn init(config: AppConfig) -> Result<(), ConfigError> {
    CONFIG.set(config).map_err(|_| ConfigError::AlreadyInitialized)
}

pub fn get() -> Option<&'static AppConfig> {
    CONFIG.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.api_timeout_secs, 30);
        assert_eq!(config.calendar, CalendarSettings::default());
        assert_eq!(config.calendar.disallowed_days, vec![5, 10, 15, 20, 25]);
    }

    #[test]
    fn reads_every_key() {
        let config = AppConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://calendar.example.com/api/"),
            (API_TIMEOUT_VAR, "5"),
            (MONTHS_AHEAD_VAR, "2"),
            (DISALLOWED_DAYS_VAR, " 25, 1,1 ,"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://calendar.example.com/api");
        assert_eq!(config.api_timeout_secs, 5);
        assert_eq!(config.calendar.months_ahead, 2);
        assert_eq!(config.calendar.disallowed_days, vec![1, 25]);
    }

    #[test]
    fn empty_day_list_disables_nothing() {
        let config = AppConfig::from_lookup(lookup(&[(DISALLOWED_DAYS_VAR, "")])).unwrap();
        assert!(config.calendar.disallowed_days.is_empty());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[(API_URL_VAR, "not a url")])),
            Err(ConfigError::InvalidValue { key: API_URL_VAR, .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[(API_URL_VAR, "ftp://files.example.com")])),
            Err(ConfigError::InvalidValue { key: API_URL_VAR, .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[(MONTHS_AHEAD_VAR, "-1")])),
            Err(ConfigError::InvalidValue { key: MONTHS_AHEAD_VAR, .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[(DISALLOWED_DAYS_VAR, "5,32")])),
            Err(ConfigError::InvalidValue { key: DISALLOWED_DAYS_VAR, .. })
        ));
    }
}
