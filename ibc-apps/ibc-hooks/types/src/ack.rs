//! Acknowledgement encodings produced and inspected by the hooks middleware.
use base64::prelude::*;
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::primitives::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::HooksError;

/// JSON envelope of a channel acknowledgement: `{"result":"<base64>"}` or
/// `{"error":"<message>"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AckEnvelope {
    #[serde(rename = "result")]
    Result(String),
    #[serde(rename = "error")]
    Error(String),
}

impl AckEnvelope {
    pub fn into_acknowledgement(self) -> Result<Acknowledgement, HooksError> {
        let bytes = serde_json::to_vec(&self)?;
        Acknowledgement::try_from(bytes).map_err(|e| HooksError::InvalidAcknowledgement {
            reason: e.to_string(),
        })
    }
}

/// Returns a successful acknowledgement whose result is `base64(result)`.
pub fn result_acknowledgement(result: &[u8]) -> Result<Acknowledgement, HooksError> {
    AckEnvelope::Result(BASE64_STANDARD.encode(result)).into_acknowledgement()
}

/// Returns an error acknowledgement carrying the error's message.
pub fn error_acknowledgement(err: &HooksError) -> Acknowledgement {
    // A non-empty JSON document is always a valid acknowledgement.
    AckEnvelope::Error(err.to_string())
        .into_acknowledgement()
        .expect("error acknowledgement is never empty")
}

#[derive(Deserialize)]
struct AckErrorField {
    #[serde(default)]
    error: String,
}

/// Reports whether raw acknowledgement bytes carry a non-empty `error` field.
///
/// This inspects the JSON structure directly instead of trusting the channel's
/// own success flag, so application-specific acknowledgements are classified
/// the same way on every path.
pub fn is_json_ack_error(acknowledgement: &[u8]) -> bool {
    serde_json::from_slice::<AckErrorField>(acknowledgement)
        .map(|ack| !ack.error.is_empty())
        .unwrap_or(false)
}

/// Serializes a byte field as a standard base64 string.
pub mod base64_bytes {
    use base64::prelude::*;
    use ibc_core::primitives::prelude::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64_STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64_STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}

/// The acknowledgement of a wasm-routed transfer: the contract's response
/// next to the acknowledgement of the underlying transfer, both base64 encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAck {
    #[serde(with = "base64_bytes")]
    pub contract_result: Vec<u8>,
    #[serde(with = "base64_bytes")]
    pub ibc_ack: Vec<u8>,
}

impl ContractAck {
    /// Wraps the JSON encoding of this value into a success acknowledgement.
    pub fn into_acknowledgement(self) -> Result<Acknowledgement, HooksError> {
        let bytes = serde_json::to_vec(&self).map_err(|e| HooksError::BadResponse {
            reason: e.to_string(),
        })?;
        result_acknowledgement(&bytes)
    }
}
