use alloc::collections::BTreeMap;
use alloc::sync::Arc;

use ibc_app_hooks::context::ContractKeeper;
use ibc_app_hooks::types::error::HooksError;
use ibc_app_transfer_types::BaseCoin;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use super::bank::MockBank;

/// Response data of the echo contract.
pub const ECHO_RESPONSE: &[u8] = b"this should echo";

/// Execution response of a contract asking to acknowledge later.
pub const ASYNC_ACK_RESPONSE: &[u8] = br#"{"is_async_ack":true}"#;

/// How a mock contract reacts to the calls it receives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractBehavior {
    /// Answers `{"echo":{..}}` executions with [`ECHO_RESPONSE`] and rejects
    /// any other message. Accepts every sudo call.
    Echo,
    /// Defers every acknowledgement, then answers the `ibc_async` sudo call
    /// with `response`.
    AsyncAck { response: Vec<u8> },
    /// Accepts executions, rejects every sudo call.
    RejectsSudo,
    /// Panics on any call.
    Panics,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Execution {
    pub sender: Signer,
    pub contract: Signer,
    pub msg: Vec<u8>,
    pub funds: Vec<BaseCoin>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SudoCall {
    pub contract: Signer,
    pub msg: Vec<u8>,
}

impl SudoCall {
    pub fn msg_json(&self) -> Value {
        serde_json::from_slice(&self.msg).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Default)]
pub struct MockContractsState {
    pub contracts: BTreeMap<String, ContractBehavior>,
    pub executions: Vec<Execution>,
    pub sudo_calls: Vec<SudoCall>,
}

/// A contract engine whose clones share the deployed contracts and the record
/// of the calls they received. Funds attached to successful executions move
/// through the shared [`MockBank`].
#[derive(Clone, Debug, Default)]
pub struct MockContractKeeper {
    pub bank: MockBank,
    pub state: Arc<Mutex<MockContractsState>>,
}

impl MockContractKeeper {
    pub fn new(bank: MockBank) -> Self {
        Self {
            bank,
            state: Arc::default(),
        }
    }

    pub fn with_contract(self, contract: &Signer, behavior: ContractBehavior) -> Self {
        self.deploy(contract, behavior);
        self
    }

    pub fn deploy(&self, contract: &Signer, behavior: ContractBehavior) {
        self.state
            .lock()
            .contracts
            .insert(contract.to_string(), behavior);
    }

    pub fn executions(&self) -> Vec<Execution> {
        self.state.lock().executions.clone()
    }

    pub fn sudo_calls(&self) -> Vec<SudoCall> {
        self.state.lock().sudo_calls.clone()
    }

    fn behavior(&self, contract: &Signer) -> Result<ContractBehavior, HooksError> {
        self.state
            .lock()
            .contracts
            .get(contract.as_ref())
            .cloned()
            .ok_or_else(|| HooksError::WasmError {
                description: format!("no such contract: {contract}"),
            })
    }

    fn transfer_funds(
        &self,
        sender: &Signer,
        contract: &Signer,
        funds: &[BaseCoin],
    ) -> Result<(), HooksError> {
        for coin in funds {
            let amount = coin
                .amount
                .to_string()
                .parse::<u128>()
                .map_err(|e| HooksError::Other(format!("amount out of range: {e}")))?;
            self.bank
                .send(sender.as_ref(), contract.as_ref(), coin.denom.as_str(), amount)?;
        }
        Ok(())
    }
}

fn has_key(msg: &[u8], key: &str) -> bool {
    serde_json::from_slice::<Value>(msg)
        .ok()
        .and_then(|value| value.as_object().map(|object| object.contains_key(key)))
        .unwrap_or(false)
}

impl ContractKeeper for MockContractKeeper {
    fn execute_contract(
        &mut self,
        sender: &Signer,
        contract: &Signer,
        msg: &[u8],
        funds: &[BaseCoin],
    ) -> Result<Vec<u8>, HooksError> {
        let response = match self.behavior(contract)? {
            ContractBehavior::Panics => panic!("contract {contract} panicked on execute"),
            ContractBehavior::Echo if has_key(msg, "echo") => ECHO_RESPONSE.to_vec(),
            ContractBehavior::Echo => {
                return Err(HooksError::WasmError {
                    description: "unknown variant, expected `echo`".to_string(),
                })
            }
            ContractBehavior::AsyncAck { .. } => ASYNC_ACK_RESPONSE.to_vec(),
            ContractBehavior::RejectsSudo => b"{}".to_vec(),
        };

        self.transfer_funds(sender, contract, funds)?;
        debug!(%sender, %contract, funds = funds.len(), "executed contract");
        self.state.lock().executions.push(Execution {
            sender: sender.clone(),
            contract: contract.clone(),
            msg: msg.to_vec(),
            funds: funds.to_vec(),
        });
        Ok(response)
    }

    fn sudo(&mut self, contract: &Signer, msg: &[u8]) -> Result<Vec<u8>, HooksError> {
        let behavior = self.behavior(contract)?;
        self.state.lock().sudo_calls.push(SudoCall {
            contract: contract.clone(),
            msg: msg.to_vec(),
        });

        match behavior {
            ContractBehavior::Panics => panic!("contract {contract} panicked on sudo"),
            ContractBehavior::AsyncAck { response } if has_key(msg, "ibc_async") => Ok(response),
            ContractBehavior::Echo | ContractBehavior::AsyncAck { .. } => Ok(Vec::new()),
            ContractBehavior::RejectsSudo => Err(HooksError::WasmError {
                description: "sudo rejected".to_string(),
            }),
        }
    }
}
