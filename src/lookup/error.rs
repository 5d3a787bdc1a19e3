//! Error types for provider lookups and the race

use crate::lookup::types::Provider;
use thiserror::Error;

/// Failure of a single provider adapter
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{provider}: request failed: {source}")]
    Network {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider}: HTTP request failed: {status}")]
    Status {
        provider: Provider,
        status: reqwest::StatusCode,
    },

    #[error("{provider}: failed to decode JSON: {source}")]
    Decode {
        provider: Provider,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider}: CEP {cep} not found")]
    NotFound { provider: Provider, cep: String },

    #[error("{provider}: lookup panicked")]
    Panicked { provider: Provider },
}

impl LookupError {
    pub fn provider(&self) -> Provider {
        match self {
            LookupError::Network { provider, .. }
            | LookupError::Status { provider, .. }
            | LookupError::Decode { provider, .. }
            | LookupError::NotFound { provider, .. }
            | LookupError::Panicked { provider } => *provider,
        }
    }
}

#[derive(Debug, Error)]
pub enum RaceError {
    #[error("every provider failed")]
    AllFailed(Vec<LookupError>),
}
