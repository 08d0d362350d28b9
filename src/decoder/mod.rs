//! Layered decoding of executor transactions into governance operations
//!
//! Each record goes through three layers:
//! 1. the executor's call into the multisig, which names the forwarded
//!    target and carries the forwarded payload;
//! 2. the forwarded call into the timelock (`queueTransaction`,
//!    `cancelTransaction` or `executeTransaction`);
//! 3. the operation's own call data, typed by its signature string.

pub mod embedded;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, U256};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::abi::decoder::decode;
use crate::abi::registry::SignatureRegistry;
use crate::abi::value::kind_name;
use crate::constants::{dialects, governance};
use crate::errors::{DecodeError, DecodeResult, DecodeStage, RecordError, RecordErrorExt};
use crate::models::call::DecodedCall;
use crate::models::operation::{Arguments, Fingerprint, GovernanceOperation, OperationKind};
use crate::models::record::RawRecord;

/// Where the multisig call keeps the forwarded target and payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardingLayout {
    /// Argument index of the forwarded target address
    pub target_index: usize,
    /// Argument index of the forwarded payload
    pub payload_index: usize,
}

impl Default for ForwardingLayout {
    fn default() -> Self {
        Self {
            target_index: 0,
            payload_index: 2,
        }
    }
}

/// Outcome of decoding a batch of records
#[derive(Debug, Clone, Default)]
pub struct DecodeReport {
    /// Governance operations, in input order
    pub operations: Vec<GovernanceOperation>,
    /// Records that could not be decoded
    pub errors: Vec<RecordError>,
    /// Records that decoded fine but are not governance actions
    pub filtered: usize,
}

impl DecodeReport {
    /// Number of records the report accounts for
    pub fn total(&self) -> usize {
        self.operations.len() + self.errors.len() + self.filtered
    }
}

/// Decodes executor transactions against a multisig and a timelock registry
#[derive(Debug, Clone)]
pub struct TransactionDecoder {
    multisig: SignatureRegistry,
    timelock: SignatureRegistry,
    timelocks: HashSet<Address>,
    layout: ForwardingLayout,
}

impl TransactionDecoder {
    /// Create a decoder that accepts calls forwarded to any of `timelocks`
    pub fn new(
        multisig: SignatureRegistry,
        timelock: SignatureRegistry,
        timelocks: impl IntoIterator<Item = Address>,
    ) -> Self {
        Self {
            multisig,
            timelock,
            timelocks: timelocks.into_iter().collect(),
            layout: ForwardingLayout::default(),
        }
    }

    /// Decoder over the built-in registries
    pub fn with_builtin_registries(timelocks: impl IntoIterator<Item = Address>) -> Self {
        Self::new(dialects::MULTISIG.clone(), dialects::TIMELOCK.clone(), timelocks)
    }

    /// Use a non-default multisig argument layout
    pub fn with_layout(mut self, layout: ForwardingLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn is_timelock(&self, address: &Address) -> bool {
        self.timelocks.contains(address)
    }

    /// Decode one record.
    ///
    /// Records that are not governance actions come back as
    /// [`DecodeError::NotTimelockTarget`] or
    /// [`DecodeError::UnsupportedGovernanceAction`]; check
    /// [`DecodeError::is_filter`] before treating them as failures.
    pub fn decode_record(&self, record: &RawRecord) -> Result<GovernanceOperation, RecordError> {
        let hash = record.hash.to_string();

        let outer = decode(&record.payload, &self.multisig).for_record(&hash, DecodeStage::Multisig)?;
        let (timelock, forwarded) = self.forwarded_call(&outer).for_record(&hash, DecodeStage::Multisig)?;

        let inner = decode(&forwarded, &self.timelock).for_record(&hash, DecodeStage::Timelock)?;
        let kind = OperationKind::from_function_name(&inner.function_name)
            .ok_or_else(|| DecodeError::UnsupportedGovernanceAction(inner.function_name.clone()))
            .for_record(&hash, DecodeStage::Timelock)?;

        build_operation(record, timelock, kind, &inner).for_record(&hash, DecodeStage::Timelock)
    }

    /// Decode a batch. Individual failures never abort the batch.
    pub fn decode_batch(&self, records: &[RawRecord]) -> DecodeReport {
        let mut report = DecodeReport::default();

        for record in records {
            match self.decode_record(record) {
                Ok(operation) => report.operations.push(operation),
                Err(e) if e.source.is_filter() => {
                    debug!("Skipping record {}: {}", record.hash, e.source);
                    report.filtered += 1;
                }
                Err(e) => {
                    warn!("Failed to decode {}", e);
                    report.errors.push(e);
                }
            }
        }

        debug!(
            "Decoded {} records: {} operations, {} filtered, {} errors",
            records.len(),
            report.operations.len(),
            report.filtered,
            report.errors.len()
        );
        report
    }

    /// Pull the forwarded target and payload out of the multisig call.
    fn forwarded_call(&self, outer: &DecodedCall) -> DecodeResult<(Address, Bytes)> {
        let target = outer
            .param(self.layout.target_index)
            .and_then(DynSolValue::as_address)
            .ok_or_else(|| {
                DecodeError::malformed(format!(
                    "{} has no address argument at {}",
                    outer.function_name, self.layout.target_index
                ))
            })?;

        if !self.is_timelock(&target) {
            return Err(DecodeError::NotTimelockTarget(target));
        }

        let payload = outer
            .param(self.layout.payload_index)
            .and_then(DynSolValue::as_bytes)
            .ok_or_else(|| {
                DecodeError::malformed(format!(
                    "{} has no bytes argument at {}",
                    outer.function_name, self.layout.payload_index
                ))
            })?;

        if payload.is_empty() {
            return Err(DecodeError::malformed("forwarded payload is empty"));
        }

        Ok((target, Bytes::copy_from_slice(payload)))
    }
}

fn expect_param<'a, T>(
    call: &'a DecodedCall,
    index: usize,
    expected: &str,
    extract: impl Fn(&'a DynSolValue) -> Option<T>,
) -> DecodeResult<T> {
    let value = call
        .param(index)
        .ok_or_else(|| DecodeError::malformed(format!("{} is missing argument {}", call.function_name, index)))?;
    extract(value).ok_or_else(|| {
        DecodeError::malformed(format!(
            "{} argument {} should be {}, found {}",
            call.function_name,
            index,
            expected,
            kind_name(value)
        ))
    })
}

/// Turn a decoded timelock call into an operation, decoding its embedded data.
fn build_operation(
    record: &RawRecord,
    timelock: Address,
    kind: OperationKind,
    call: &DecodedCall,
) -> DecodeResult<GovernanceOperation> {
    let target = expect_param(call, governance::TARGET_INDEX, "an address", DynSolValue::as_address)?;
    let value: U256 = expect_param(call, governance::VALUE_INDEX, "a uint", |v| v.as_uint().map(|(n, _)| n))?;
    let signature = expect_param(call, governance::SIGNATURE_INDEX, "a string", DynSolValue::as_str)?.to_string();
    let data = Bytes::copy_from_slice(expect_param(call, governance::DATA_INDEX, "bytes", DynSolValue::as_bytes)?);
    let eta = expect_param(call, governance::ETA_INDEX, "a uint", |v| v.as_uint().map(|(n, _)| n))?;

    let arguments = embedded::decode_arguments(&signature, &data);
    if let Arguments::Undecodable { reason } = &arguments {
        debug!("Call data of {} does not match `{}`: {}", record.hash, signature, reason);
    }

    let fingerprint = Fingerprint::compute(target, value, &signature, &data, eta);

    Ok(GovernanceOperation {
        source_hash: record.hash,
        kind,
        timelock,
        block_number: record.block_number,
        timestamp: record.timestamp,
        target,
        value,
        signature,
        data,
        arguments,
        eta,
        fingerprint,
    })
}
