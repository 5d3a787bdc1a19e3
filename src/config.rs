//! Configuration loaded from environment variables

use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_CEP: &str = "71503507";
pub const DEFAULT_BRASILAPI_URL: &str = "https://brasilapi.com.br";
pub const DEFAULT_VIACEP_URL: &str = "https://viacep.com.br";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub cep: String,
    pub brasilapi_url: String,
    pub viacep_url: String,
    pub timeout: Option<Duration>, // None = wait forever
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any variable source, `from_env` passes the process environment
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout = match var("LOOKUP_TIMEOUT_SECS") {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        Ok(Config {
            cep: var("CEP").unwrap_or_else(|| DEFAULT_CEP.to_string()),

            brasilapi_url: var("BRASILAPI_URL")
                .unwrap_or_else(|| DEFAULT_BRASILAPI_URL.to_string()),

            viacep_url: var("VIACEP_URL").unwrap_or_else(|| DEFAULT_VIACEP_URL.to_string()),

            timeout,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("LOOKUP_TIMEOUT_SECS must be a number of seconds, got {:?}", raw))?;

    if secs == 0 {
        return Err(anyhow!("LOOKUP_TIMEOUT_SECS must be greater than zero"));
    }

    Ok(Duration::from_secs(secs))
}
