//! Error handling for the timelock monitor.
//!
//! Decoding errors are scoped to a single record and never abort a batch.
//! Every error that reaches the caller carries the hash of the offending
//! record through [`RecordError`], so a skipped transaction can be looked up
//! on a block explorer.
//!
//! Errors raised by the collaborators around the core (history fetching,
//! configuration, report output) are collected in [`MonitorError`].

use alloy_primitives::{hex, Address};
use std::fmt;
use thiserror::Error;

/// Errors produced while decoding a call payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The leading selector bytes are not registered in the active registry.
    #[error("unknown selector 0x{} in {registry} registry", hex::encode(.selector))]
    UnknownSelector {
        /// Name of the registry the payload was decoded against.
        registry: String,
        /// The four leading payload bytes.
        selector: [u8; 4],
    },

    /// The byte layout violates the declared parameter types.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The multisig forwarded the call to a contract that is not a monitored timelock.
    #[error("forwarded call targets {0}, which is not a monitored timelock")]
    NotTimelockTarget(Address),

    /// A timelock call that is not a queue, cancel or execute.
    #[error("unsupported governance action: {0}")]
    UnsupportedGovernanceAction(String),
}

impl DecodeError {
    /// Shorthand for [`DecodeError::MalformedPayload`].
    pub fn malformed(reason: impl Into<String>) -> Self {
        DecodeError::MalformedPayload(reason.into())
    }

    /// Whether this outcome means "not a governance record" rather than a failure.
    ///
    /// Filtered records are dropped silently; everything else is surfaced
    /// as a [`RecordError`].
    pub fn is_filter(&self) -> bool {
        matches!(
            self,
            DecodeError::NotTimelockTarget(_) | DecodeError::UnsupportedGovernanceAction(_)
        )
    }
}

/// Result type alias for decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// The decoding layer a record failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    /// The executor's call into the multisig.
    Multisig,
    /// The call the multisig forwards into the timelock.
    Timelock,
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeStage::Multisig => write!(f, "multisig"),
            DecodeStage::Timelock => write!(f, "timelock"),
        }
    }
}

/// A non-fatal decoding failure tied to the transaction that caused it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("record {hash} ({stage} layer): {source}")]
pub struct RecordError {
    /// Hash of the offending transaction.
    pub hash: String,
    /// Layer the failure happened in.
    pub stage: DecodeStage,
    /// Underlying cause.
    pub source: DecodeError,
}

/// Extension trait for attaching the offending record to a decode error.
pub trait RecordErrorExt<T> {
    /// Tag the error with the record hash and decoding stage.
    fn for_record(self, hash: &str, stage: DecodeStage) -> Result<T, RecordError>;
}

impl<T> RecordErrorExt<T> for DecodeResult<T> {
    fn for_record(self, hash: &str, stage: DecodeStage) -> Result<T, RecordError> {
        self.map_err(|source| RecordError {
            hash: hash.to_string(),
            stage,
            source,
        })
    }
}

/// Errors raised by the collaborators around the decoding core.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Errors talking to the transaction history service.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A JSON ABI document that could not be turned into a registry.
    #[error("ABI error: {0}")]
    Abi(String),

    /// Errors related to file I/O.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failures.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for the collaborators.
pub type MonitorResult<T> = Result<T, MonitorError>;

impl From<reqwest::Error> for MonitorError {
    fn from(e: reqwest::Error) -> Self {
        MonitorError::Rpc(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_are_not_errors() {
        assert!(DecodeError::NotTimelockTarget(Address::ZERO).is_filter());
        assert!(DecodeError::UnsupportedGovernanceAction("setDelay".to_string()).is_filter());
        assert!(!DecodeError::malformed("short").is_filter());
        let unknown = DecodeError::UnknownSelector {
            registry: "multisig".to_string(),
            selector: [0xde, 0xad, 0xbe, 0xef],
        };
        assert!(!unknown.is_filter());
    }

    #[test]
    fn test_record_error_carries_hash() {
        let result: DecodeResult<()> = Err(DecodeError::UnknownSelector {
            registry: "multisig".to_string(),
            selector: [0xde, 0xad, 0xbe, 0xef],
        });
        let err = result.for_record("0xabc", DecodeStage::Multisig).unwrap_err();

        assert_eq!(err.hash, "0xabc");
        assert_eq!(err.stage, DecodeStage::Multisig);
        assert_eq!(
            err.to_string(),
            "record 0xabc (multisig layer): unknown selector 0xdeadbeef in multisig registry"
        );
    }
}
