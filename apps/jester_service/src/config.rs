use std::{env, str::FromStr, time::Duration};

use jester_llm::{PluginApiConfig, WaitConfig};

use crate::error::ConfigError;

const DEFAULT_API_BASE: &str = "https://api.steamship.com/api/v1";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub environment: String,
    pub bind_address: String,
    pub request_timeout: Duration,
    pub plugin: PluginApiConfig,
    pub wait: WaitConfig,
}

impl ServiceConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("JESTER_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::Missing("JESTER_API_KEY".to_string()))?;

        let mut plugin = PluginApiConfig::new(
            lookup("JESTER_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_key,
        );
        plugin.workspace = lookup("JESTER_WORKSPACE").filter(|w| !w.is_empty());
        if let Some(handle) = lookup("JESTER_PLUGIN_HANDLE") {
            plugin.plugin_handle = handle;
        }
        if let Some(handle) = lookup("JESTER_PLUGIN_INSTANCE") {
            plugin.instance_handle = handle;
        }
        plugin.max_words = parse(&lookup, "JESTER_MAX_WORDS", plugin.max_words)?;

        let poll_interval_ms: u64 = parse(&lookup, "JESTER_POLL_INTERVAL_MS", 1000)?;
        if poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "JESTER_POLL_INTERVAL_MS must be greater than 0".to_string(),
            ));
        }

        let wait = WaitConfig {
            poll_interval: Duration::from_millis(poll_interval_ms),
            max_wait: Duration::from_secs(parse(&lookup, "JESTER_WAIT_TIMEOUT_SECS", 60)?),
        };

        Ok(Self {
            environment: lookup("APP_ENVIRONMENT").unwrap_or_else(|| "dev".to_string()),
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            request_timeout: Duration::from_secs(parse(&lookup, "REQUEST_TIMEOUT_SECS", 90)?),
            plugin,
            wait,
        })
    }

    pub fn is_dev(&self) -> bool {
        self.environment == "dev"
    }
}

fn parse<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("{}={:?}: {}", key, raw, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = config(&[("JESTER_API_KEY", "secret")]).unwrap();

        assert!(config.is_dev());
        assert_eq!(config.bind_address, "0.0.0.0:8000");
        assert_eq!(config.request_timeout, Duration::from_secs(90));
        assert_eq!(config.plugin.api_base, DEFAULT_API_BASE);
        assert_eq!(config.plugin.plugin_handle, "prompt-generation-default");
        assert_eq!(config.plugin.instance_handle, "limit-100");
        assert_eq!(config.plugin.max_words, 100);
        assert_eq!(config.plugin.workspace, None);
        assert_eq!(config.wait.poll_interval, Duration::from_secs(1));
        assert_eq!(config.wait.max_wait, Duration::from_secs(60));
    }

    #[test]
    fn overrides_are_read() {
        let config = config(&[
            ("JESTER_API_KEY", "secret"),
            ("APP_ENVIRONMENT", "prod"),
            ("JESTER_WORKSPACE", "jokes"),
            ("JESTER_MAX_WORDS", "40"),
            ("JESTER_POLL_INTERVAL_MS", "250"),
            ("JESTER_WAIT_TIMEOUT_SECS", "15"),
        ])
        .unwrap();

        assert!(!config.is_dev());
        assert_eq!(config.plugin.workspace.as_deref(), Some("jokes"));
        assert_eq!(config.plugin.max_words, 40);
        assert_eq!(config.wait.poll_interval, Duration::from_millis(250));
        assert_eq!(config.wait.max_wait, Duration::from_secs(15));
    }

    #[test]
    fn missing_api_key_is_rejected() {
        assert!(matches!(config(&[]), Err(ConfigError::Missing(_))));
        assert!(matches!(
            config(&[("JESTER_API_KEY", "")]),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let result = config(&[("JESTER_API_KEY", "secret"), ("JESTER_POLL_INTERVAL_MS", "0")]);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unparsable_numbers_are_rejected() {
        let result = config(&[("JESTER_API_KEY", "secret"), ("JESTER_MAX_WORDS", "lots")]);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
