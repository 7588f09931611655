use edge_revenue_types::UserPlan;
use std::env;

/// Fallback seed for the mock data generator; override with `MOCK_SEED`
/// when a different fixture set is wanted.
const DEFAULT_MOCK_SEED: u64 = 20_240_601;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_addr: String,
    pub mock_seed: u64,
    pub demo_plan: UserPlan,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());

        let mock_seed = match env::var("MOCK_SEED") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("MOCK_SEED".to_string()))?,
            Err(_) => DEFAULT_MOCK_SEED,
        };

        let demo_plan = match env::var("DEMO_PLAN") {
            Ok(raw) => match raw.to_lowercase().as_str() {
                "free" => UserPlan::Free,
                "pro" => UserPlan::Pro,
                "enterprise" => UserPlan::Enterprise,
                _ => return Err(ConfigError::InvalidValue("DEMO_PLAN".to_string())),
            },
            Err(_) => UserPlan::Free,
        };

        Ok(Config {
            port,
            bind_addr,
            mock_seed,
            demo_plan,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(var) => write!(f, "Invalid value for: {}", var),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        // PORT is left out on purpose: the surrounding environment may
        // legitimately set it.
        let config = Config::from_env().unwrap();
        assert_eq!(config.demo_plan, UserPlan::Free);
        assert_eq!(config.mock_seed, DEFAULT_MOCK_SEED);
    }
}
