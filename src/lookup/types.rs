//! Core data types for the lookup race
//! Wire shapes, the normalized address and the tagged result

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// The two lookup services raced against each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    BrasilApi,
    ViaCep,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::BrasilApi => write!(f, "BrasilAPI"),
            Provider::ViaCep => write!(f, "ViaBrasil"),
        }
    }
}

/// Normalized address, the same shape whichever provider answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub cep: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// BrasilAPI `/api/cep/v1/{cep}` body
#[derive(Debug, Deserialize)]
pub struct BrasilApiAddress {
    pub cep: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

impl From<BrasilApiAddress> for AddressRecord {
    fn from(wire: BrasilApiAddress) -> Self {
        AddressRecord {
            cep: wire.cep,
            street: wire.street,
            neighborhood: wire.neighborhood,
            city: wire.city,
            state: wire.state,
        }
    }
}

/// ViaCEP `/ws/{cep}/json/` body
#[derive(Debug, Deserialize)]
pub struct ViaCepAddress {
    pub cep: String,
    pub logradouro: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
}

impl From<ViaCepAddress> for AddressRecord {
    fn from(wire: ViaCepAddress) -> Self {
        AddressRecord {
            cep: wire.cep,
            street: wire.logradouro,
            neighborhood: wire.bairro,
            city: wire.localidade,
            state: wire.uf,
        }
    }
}

/// Result published by an adapter - the variant is the provider tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    BrasilApi(AddressRecord),
    ViaCep(AddressRecord),
}

impl LookupResult {
    pub fn provider(&self) -> Provider {
        match self {
            LookupResult::BrasilApi(_) => Provider::BrasilApi,
            LookupResult::ViaCep(_) => Provider::ViaCep,
        }
    }

    pub fn address(&self) -> &AddressRecord {
        match self {
            LookupResult::BrasilApi(address) | LookupResult::ViaCep(address) => address,
        }
    }
}

/// First successful result of a race and how long it took to arrive
#[derive(Debug, Clone)]
pub struct Winner {
    pub result: LookupResult,
    pub elapsed: Duration,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let address = self.result.address();
        writeln!(
            f,
            "[{}] Finished first in {:?}",
            self.result.provider(),
            self.elapsed
        )?;
        writeln!(f, "CEP: {}", address.cep)?;
        writeln!(f, "Street: {}", address.street)?;
        writeln!(f, "Neighborhood: {}", address.neighborhood)?;
        writeln!(f, "City: {}", address.city)?;
        writeln!(f, "State: {}", address.state)?;
        writeln!(f, "{}", "=".repeat(64))?;
        writeln!(f)
    }
}

/// What the drain barrier saw once every adapter task was joined
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Drained {
    pub joined: usize,
    pub unread: usize,
}

impl fmt::Display for Drained {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "joined: {}, unread: {}", self.joined, self.unread)
    }
}
