//! Transaction monitoring for a governance executor

mod etherscan;

use alloy_primitives::Address;
use log::info;

use crate::correlator::{annotate_history, HistoryEntry};
use crate::decoder::TransactionDecoder;
use crate::errors::{MonitorResult, RecordError};
use crate::models::record::RawRecord;

pub use self::etherscan::EtherscanSource;

/// Supplier of an account's transaction history
#[allow(async_fn_in_trait)]
pub trait RecordSource {
    /// Up to `limit` of the account's most recent transactions, in any order
    async fn fetch_history(&self, account: &Address, limit: usize) -> MonitorResult<Vec<RawRecord>>;
}

/// Result of one monitoring pass
#[derive(Debug, Clone, Default)]
pub struct MonitorOutcome {
    /// Governance operations, newest first, with queue statuses resolved
    pub history: Vec<HistoryEntry>,
    /// Records that could not be decoded
    pub errors: Vec<RecordError>,
    /// Records that were not governance actions
    pub filtered: usize,
}

/// Sort records newest first and keep the most recent `limit`
pub fn newest_first(mut records: Vec<RawRecord>, limit: usize) -> Vec<RawRecord> {
    records.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.block_number.cmp(&a.block_number))
    });
    records.truncate(limit);
    records
}

/// Decode and correlate a batch of records
pub fn process_records(decoder: &TransactionDecoder, records: &[RawRecord]) -> MonitorOutcome {
    let report = decoder.decode_batch(records);
    MonitorOutcome {
        history: annotate_history(&report.operations),
        errors: report.errors,
        filtered: report.filtered,
    }
}

/// Monitor for observing an executor's governance transactions
pub struct Monitor<S> {
    source: S,
    decoder: TransactionDecoder,
    executor: Address,
    history_limit: usize,
}

impl<S: RecordSource> Monitor<S> {
    /// Create a new monitor
    pub fn new(source: S, decoder: TransactionDecoder, executor: Address, history_limit: usize) -> Self {
        Self {
            source,
            decoder,
            executor,
            history_limit,
        }
    }

    /// Get the executor's recent transactions, newest first
    pub async fn fetch_records(&self) -> MonitorResult<Vec<RawRecord>> {
        let records = self.source.fetch_history(&self.executor, self.history_limit).await?;
        Ok(newest_first(records, self.history_limit))
    }

    /// Fetch, decode and correlate the executor's history
    pub async fn run(&self) -> MonitorResult<MonitorOutcome> {
        let records = self.fetch_records().await?;
        let outcome = process_records(&self.decoder, &records);
        info!(
            "Processed {} transactions: {} governance operations, {} filtered, {} undecodable",
            records.len(),
            outcome.history.len(),
            outcome.filtered,
            outcome.errors.len()
        );
        Ok(outcome)
    }
}
