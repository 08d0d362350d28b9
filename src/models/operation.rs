//! Governance operations and their lifecycle status

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{hex, keccak256, Address, Bytes, TxHash, B256, U256};
use std::fmt;

use crate::abi::encoder::encode_params;
use crate::abi::value::render;
use crate::constants::governance;
use crate::models::call::DecodedCall;

/// Which timelock entry point an operation went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Queue,
    Cancel,
    Execute,
}

impl OperationKind {
    /// Map a timelock function name to a tracked kind.
    pub fn from_function_name(name: &str) -> Option<Self> {
        match name {
            governance::QUEUE_TRANSACTION => Some(OperationKind::Queue),
            governance::CANCEL_TRANSACTION => Some(OperationKind::Cancel),
            governance::EXECUTE_TRANSACTION => Some(OperationKind::Execute),
            _ => None,
        }
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            OperationKind::Queue => governance::QUEUE_TRANSACTION,
            OperationKind::Cancel => governance::CANCEL_TRANSACTION,
            OperationKind::Execute => governance::EXECUTE_TRANSACTION,
        }
    }

    /// Cancel and execute end an action's lifecycle.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OperationKind::Queue)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.function_name())
    }
}

/// Identity of a timelock action.
///
/// keccak-256 of `abi.encode(target, value, signature, data, eta)`, the same
/// key the timelock uses for `queuedTransactions`. Queue, cancel and execute
/// calls for one action share a fingerprint; transaction hashes and block
/// numbers play no part in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(B256);

impl Fingerprint {
    pub fn compute(target: Address, value: U256, signature: &str, data: &Bytes, eta: U256) -> Self {
        let encoded = encode_params(&[
            DynSolValue::Address(target),
            DynSolValue::Uint(value, 256),
            DynSolValue::String(signature.to_string()),
            DynSolValue::Bytes(data.to_vec()),
            DynSolValue::Uint(eta, 256),
        ]);
        Fingerprint(keccak256(encoded))
    }

    pub fn as_b256(&self) -> &B256 {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The decoded form of an operation's embedded call data
#[derive(Debug, Clone, PartialEq)]
pub enum Arguments {
    /// Values decoded against the types in the operation's signature
    Decoded(Vec<DynSolValue>),
    /// The data did not match the signature; the raw bytes are shown instead
    Undecodable { reason: String },
}

impl Arguments {
    /// The value standing in for the raw `data` argument in a layered call.
    pub fn as_value(&self, raw: &Bytes) -> DynSolValue {
        match self {
            Arguments::Decoded(values) => DynSolValue::Tuple(values.clone()),
            Arguments::Undecodable { .. } => DynSolValue::Bytes(raw.to_vec()),
        }
    }
}

/// A queue, cancel or execute call against a monitored timelock.
#[derive(Debug, Clone, PartialEq)]
pub struct GovernanceOperation {
    /// Hash of the transaction that carried the call
    pub source_hash: TxHash,
    pub kind: OperationKind,
    /// Timelock the multisig forwarded the call to
    pub timelock: Address,
    pub block_number: u64,
    pub timestamp: u64,
    /// Contract the timelock will call
    pub target: Address,
    /// Wei sent with the call
    pub value: U256,
    /// Function prototype, e.g. `transfer(address,uint256)`
    pub signature: String,
    /// Raw call data as submitted
    pub data: Bytes,
    /// Call data decoded against `signature`
    pub arguments: Arguments,
    /// Earliest execution time, Unix seconds
    pub eta: U256,
    pub fingerprint: Fingerprint,
}

impl GovernanceOperation {
    /// The timelock call with `data` replaced by its decoded arguments.
    pub fn layered_call(&self) -> DecodedCall {
        DecodedCall::new(
            self.kind.function_name().to_string(),
            vec![
                ("target".to_string(), DynSolValue::Address(self.target)),
                ("value".to_string(), DynSolValue::Uint(self.value, 256)),
                ("signature".to_string(), DynSolValue::String(self.signature.clone())),
                ("data".to_string(), self.arguments.as_value(&self.data)),
                ("eta".to_string(), DynSolValue::Uint(self.eta, 256)),
            ],
        )
    }

    /// Call data for display: decoded arguments as `[a, b]`, or raw hex.
    pub fn data_display(&self, raw: bool) -> String {
        if raw {
            return format!("0x{}", hex::encode(&self.data));
        }
        self.layered_call()
            .param(governance::DATA_INDEX)
            .map(render)
            .unwrap_or_default()
    }
}

/// Where a queued action ended up. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    Queued,
    /// Cancelled by the given transaction
    Cancelled(TxHash),
    /// Executed by the given transaction
    Executed(TxHash),
}

impl OperationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OperationStatus::Queued => "queued",
            OperationStatus::Cancelled(_) => "cancelled",
            OperationStatus::Executed(_) => "executed",
        }
    }

    /// The transaction that ended the lifecycle, if any.
    pub fn terminating_hash(&self) -> Option<TxHash> {
        match self {
            OperationStatus::Queued => None,
            OperationStatus::Cancelled(hash) | OperationStatus::Executed(hash) => Some(*hash),
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.terminating_hash() {
            Some(hash) => write!(f, "{} ({})", self.label(), hash),
            None => write!(f, "{}", self.label()),
        }
    }
}
