use crate::error::RateError;

pub const BASE_URL_VAR: &str = "BASE_URL";
pub const API_TOKEN_VAR: &str = "API_TOKEN";

/// Connection settings for the SIE API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub api_token: String,
}

impl Config {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.into(),
        }
    }

    /// Reads `BASE_URL` and `API_TOKEN`, loading `.env` first if there is one.
    pub fn from_env() -> Result<Self, RateError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, RateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(RateError::MissingConfiguration(key))
        };

        Ok(Self::new(required(BASE_URL_VAR)?, required(API_TOKEN_VAR)?))
    }
}
