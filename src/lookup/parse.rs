//! Parse functions - decode provider bodies into AddressRecord

use crate::lookup::error::LookupError;
use crate::lookup::types::{AddressRecord, BrasilApiAddress, Provider, ViaCepAddress};
use serde_json::Value;

/// Decode a BrasilAPI body
pub fn parse_brasilapi(body: &[u8]) -> Result<AddressRecord, LookupError> {
    let wire: BrasilApiAddress =
        serde_json::from_slice(body).map_err(|source| LookupError::Decode {
            provider: Provider::BrasilApi,
            source,
        })?;

    Ok(wire.into())
}

/// Decode a ViaCEP body
///
/// ViaCEP answers unknown codes with `200 OK` and `{"erro": true}`, which
/// becomes `NotFound` rather than a decode error.
pub fn parse_viacep(body: &[u8], cep: &str) -> Result<AddressRecord, LookupError> {
    let decode = |source| LookupError::Decode {
        provider: Provider::ViaCep,
        source,
    };

    let value: Value = serde_json::from_slice(body).map_err(decode)?;

    if value.get("erro").is_some() {
        return Err(LookupError::NotFound {
            provider: Provider::ViaCep,
            cep: cep.to_string(),
        });
    }

    let wire: ViaCepAddress = serde_json::from_value(value).map_err(decode)?;
    Ok(wire.into())
}
