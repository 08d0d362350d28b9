//! Raw transaction records

use alloy_primitives::{Address, Bytes, TxHash};

/// One on-chain transaction submitted by the monitored executor.
///
/// Records are immutable inputs; the payload is the executor's call into
/// the multisig, still fully encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Transaction hash
    pub hash: TxHash,
    /// Sender (the executor)
    pub from: Address,
    /// Recipient, `None` for contract creations
    pub to: Option<Address>,
    /// Block the transaction was included in
    pub block_number: u64,
    /// Block timestamp in Unix seconds
    pub timestamp: u64,
    /// Call payload
    pub payload: Bytes,
}
