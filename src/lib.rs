//! A library for decoding and correlating timelock governance transactions
//!
//! This crate reads the transaction history of a governance executor (usually a
//! multisig), peels the multisig and timelock call layers off each payload, and
//! matches every queued action with the cancel or execute call that ended it.

pub mod abi;
pub mod config;
pub mod constants;
pub mod correlator;
pub mod decoder;
pub mod errors;
pub mod models;
pub mod monitor;
pub mod report;

#[cfg(test)]
mod testing;

use anyhow::Result;
use log::info;

pub use monitor::{process_records, MonitorOutcome};

/// Main entry point for monitoring the executor named in `config`
pub async fn monitor_timelock(config: &config::MonitorConfig) -> Result<MonitorOutcome> {
    config.validate()?;

    // Initialize the decoder with the configured registries
    let decoder = config.decoder()?;

    let source = monitor::EtherscanSource::new(&config.etherscan_url, config.api_key.clone());
    let monitor = monitor::Monitor::new(source, decoder, config.executor, config.history_limit);

    info!("Monitoring governance transactions of {}", config.executor);
    let outcome = monitor.run().await?;

    Ok(outcome)
}

/// Version of the timelock monitor
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
