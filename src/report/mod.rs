//! Presentation of correlated governance history
//!
//! Everything here is post-processing over [`HistoryEntry`] values: labels,
//! raw/decoded toggles, relative times and substring filters. None of it
//! feeds back into decoding or correlation.

pub mod time;

use alloy_primitives::{Address, U256};
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::correlator::HistoryEntry;

/// Display names for addresses
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    names: HashMap<Address, String>,
}

impl AddressBook {
    /// Later entries win when an address is named twice
    pub fn new(entries: impl IntoIterator<Item = (Address, String)>) -> Self {
        Self {
            names: entries.into_iter().collect(),
        }
    }

    pub fn name_of(&self, address: &Address) -> Option<&str> {
        self.names.get(address).map(String::as_str)
    }

    /// The name if known, otherwise the checksummed address
    pub fn display(&self, address: &Address) -> String {
        self.name_of(address)
            .map(str::to_string)
            .unwrap_or_else(|| address.to_string())
    }
}

/// Rendering switches
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Show call data as raw hex instead of decoded arguments
    pub raw_data: bool,
    /// Show target addresses instead of their names
    pub raw_target: bool,
    /// Reference time for relative labels, Unix seconds
    pub now: i64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            raw_data: false,
            raw_target: false,
            now: time::now(),
        }
    }
}

/// One rendered history row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Position in the full history, assigned before filtering
    pub index: usize,
    /// Lifecycle status, queue operations only
    pub queue: Option<String>,
    /// Transaction that cancelled or executed the queued action
    pub terminated_by: Option<String>,
    pub tx_type: String,
    pub hash: String,
    /// Timelock the call went to
    pub to: String,
    pub timestamp: String,
    pub age: String,
    pub target: String,
    pub value: String,
    pub signature: String,
    pub data: String,
    pub eta: String,
    pub eta_relative: Option<String>,
    pub fingerprint: String,
}

/// Case-insensitive substring filters; empty filters match everything
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    pub signature: Option<String>,
    pub kind: Option<String>,
}

fn contains_ignore_case(haystack: &str, needle: &Option<String>) -> bool {
    match needle {
        Some(needle) if !needle.is_empty() => haystack.to_lowercase().contains(&needle.to_lowercase()),
        _ => true,
    }
}

impl RowFilter {
    pub fn matches(&self, row: &ReportRow) -> bool {
        contains_ignore_case(&row.signature, &self.signature) && contains_ignore_case(&row.tx_type, &self.kind)
    }
}

fn u256_to_i64(value: U256) -> Option<i64> {
    let limbs = value.as_limbs();
    if limbs[1..].iter().any(|&limb| limb != 0) {
        return None;
    }
    i64::try_from(limbs[0]).ok()
}

/// Render history entries into rows, keeping their order
pub fn build_rows(history: &[HistoryEntry], book: &AddressBook, options: &ReportOptions) -> Vec<ReportRow> {
    history
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let operation = &entry.operation;
            let timestamp = i64::try_from(operation.timestamp).unwrap_or(i64::MAX);
            let target = if options.raw_target {
                operation.target.to_string()
            } else {
                book.display(&operation.target)
            };

            ReportRow {
                index,
                queue: entry.status.map(|status| status.label().to_string()),
                terminated_by: entry
                    .status
                    .and_then(|status| status.terminating_hash())
                    .map(|hash| hash.to_string()),
                tx_type: operation.kind.to_string(),
                hash: operation.source_hash.to_string(),
                to: book.display(&operation.timelock),
                timestamp: time::format_timestamp(timestamp),
                age: time::relative_label(timestamp, options.now),
                target,
                value: operation.value.to_string(),
                signature: operation.signature.clone(),
                data: operation.data_display(options.raw_data),
                eta: operation.eta.to_string(),
                eta_relative: u256_to_i64(operation.eta).map(|eta| time::relative_label(eta, options.now)),
                fingerprint: operation.fingerprint.to_string(),
            }
        })
        .collect()
}

/// Keep the rows matching `filter`
pub fn filter_rows(rows: Vec<ReportRow>, filter: &RowFilter) -> Vec<ReportRow> {
    rows.into_iter().filter(|row| filter.matches(row)).collect()
}

/// Save rows as pretty JSON
pub fn save_report(rows: &[ReportRow], path: &Path) -> Result<()> {
    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    if let Some(parent) = absolute_path.parent() {
        if !parent.exists() {
            info!("Creating directory: {}", parent.display());
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(rows).context("Failed to serialize report to JSON")?;
    fs::write(&absolute_path, &json)
        .with_context(|| format!("Failed to write report: {}", absolute_path.display()))?;

    info!("Saved {} rows ({} bytes) to {}", rows.len(), json.len(), absolute_path.display());
    Ok(())
}
