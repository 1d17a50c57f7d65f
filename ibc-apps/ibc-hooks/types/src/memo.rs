//! Parsing of the JSON directives carried in an ICS-20 memo.
//!
//! A memo that is empty, not JSON, not an object, or lacks the requested key is
//! simply not routed. Only a memo that carries the key with a malformed value
//! is an error.

use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::address::validate_address;
use crate::error::HooksError;
use crate::{MARKER_KEY, WASM_KEY};

/// A memo decoded as a JSON object.
pub type JsonObject = Map<String, Value>;

/// Parses `memo` as a JSON object and reports whether it contains `key`.
///
/// The returned object is empty whenever the memo is not a JSON object.
pub fn json_string_has_key(memo: &str, key: &str) -> (bool, JsonObject) {
    if memo.is_empty() {
        return (false, JsonObject::new());
    }
    let object = match serde_json::from_str::<Value>(memo) {
        Ok(Value::Object(object)) => object,
        _ => return (false, JsonObject::new()),
    };
    (object.contains_key(key), object)
}

/// A validated `wasm` directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WasmDirective {
    pub contract: Signer,
    /// The `msg` object re-serialized to bytes.
    pub msg: Vec<u8>,
}

/// Validates the `wasm` directive of an inbound memo.
///
/// `Ok(None)` means the packet is not wasm-routed. `Err` means it is routed
/// but the directive is unusable, in which case the packet must be rejected
/// with an error acknowledgement.
pub fn validate_and_parse_wasm_memo(
    memo: &str,
    receiver: &str,
    bech32_prefix: &str,
) -> Result<Option<WasmDirective>, HooksError> {
    let (routed, mut metadata) = json_string_has_key(memo, WASM_KEY);
    if !routed {
        return Ok(None);
    }
    let bad_format = |reason: &str| HooksError::BadMetadataFormat {
        memo: memo.to_string(),
        reason: reason.to_string(),
    };

    let Some(Value::Object(mut wasm)) = metadata.remove(WASM_KEY) else {
        return Err(bad_format("wasm metadata is not a valid JSON map object"));
    };

    let contract = match wasm.remove("contract") {
        Some(Value::String(contract)) => contract,
        _ => return Err(bad_format(r#"could not find key wasm["contract"]"#)),
    };
    if validate_address(&contract, bech32_prefix).is_err() {
        return Err(bad_format(r#"wasm["contract"] is not a valid bech32 address"#));
    }
    if contract != receiver {
        return Err(bad_format(
            r#"wasm["contract"] should be the same as the receiver of the packet"#,
        ));
    }

    let msg = match wasm.remove("msg") {
        None | Some(Value::Null) => return Err(bad_format(r#"could not find key wasm["msg"]"#)),
        Some(msg @ Value::Object(_)) => msg,
        Some(_) => return Err(bad_format(r#"wasm["msg"] is not a map object"#)),
    };
    let msg = serde_json::to_vec(&msg).map_err(|e| bad_format(&e.to_string()))?;

    Ok(Some(WasmDirective {
        contract: contract.into(),
        msg,
    }))
}

/// Removes `key` from a memo object and renders what is left.
///
/// An object left empty renders as the empty string rather than `{}`, so a
/// packet that only carried the removed directive goes out with no memo at all.
pub fn remove_memo_key(
    mut object: JsonObject,
    key: &str,
) -> Result<(Option<Value>, String), HooksError> {
    let removed = object.remove(key);
    let memo = if object.is_empty() {
        String::new()
    } else {
        serde_json::to_string(&object)?
    };
    Ok((removed, memo))
}

/// Returns the callback contract named by a memo value, if the value is a
/// string holding a valid address. Anything else is ignored.
pub fn callback_address(value: &Value, bech32_prefix: &str) -> Option<Signer> {
    let address = value.as_str()?;
    validate_address(address, bech32_prefix).ok()?;
    Some(address.to_string().into())
}

/// A validated `marker` directive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkerDirective {
    pub transfer_auths: Vec<Signer>,
    pub allow_force_transfer: bool,
}

#[derive(Deserialize)]
struct MarkerPayload {
    #[serde(rename = "transfer-auths", default)]
    transfer_auths: Option<Vec<String>>,
    #[serde(rename = "allow-force-transfer", default)]
    allow_force_transfer: bool,
}

/// Parses the optional `marker` directive of an inbound memo.
///
/// The directive is either a JSON object or a string holding one. Any other
/// value is ignored. Every transfer authority must be a valid local address.
pub fn parse_marker_memo(
    memo: &str,
    bech32_prefix: &str,
) -> Result<Option<MarkerDirective>, HooksError> {
    let (found, mut metadata) = json_string_has_key(memo, MARKER_KEY);
    if !found {
        return Ok(None);
    }
    let bad_format = |reason: String| HooksError::BadMetadataFormat {
        memo: memo.to_string(),
        reason,
    };

    let payload: MarkerPayload = match metadata.remove(MARKER_KEY) {
        Some(value @ Value::Object(_)) => {
            serde_json::from_value(value).map_err(|e| bad_format(e.to_string()))?
        }
        Some(Value::String(encoded)) => {
            serde_json::from_str(&encoded).map_err(|e| bad_format(e.to_string()))?
        }
        _ => return Ok(None),
    };

    let transfer_auths = payload
        .transfer_auths
        .unwrap_or_default()
        .into_iter()
        .map(|address| {
            validate_address(&address, bech32_prefix)?;
            Ok(Signer::from(address))
        })
        .collect::<Result<Vec<_>, HooksError>>()?;

    Ok(Some(MarkerDirective {
        transfer_auths,
        allow_force_transfer: payload.allow_force_transfer,
    }))
}
