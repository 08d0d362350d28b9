//! Monitor configuration
//!
//! Loaded from a JSON file. Every field is optional; missing fields fall back
//! to the BasketDAO deployment the monitor was first written for.

use alloy_primitives::Address;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::abi::registry::SignatureRegistry;
use crate::constants::{addresses, dialects, history};
use crate::decoder::{ForwardingLayout, TransactionDecoder};
use crate::errors::{MonitorError, MonitorResult};
use crate::report::AddressBook;

/// An address with a display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedAddress {
    pub address: Address,
    pub name: String,
}

/// Extra JSON ABI files merged into the built-in registries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbiFiles {
    pub multisig: Vec<PathBuf>,
    pub timelock: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Account whose transactions are monitored
    pub executor: Address,
    /// Timelocks the multisig forwards governance calls to
    pub timelocks: Vec<NamedAddress>,
    /// Display names for targets
    pub labels: Vec<NamedAddress>,
    /// Transaction history API endpoint
    pub etherscan_url: String,
    pub api_key: Option<String>,
    /// Most recent transactions to fetch
    pub history_limit: usize,
    pub abi_files: AbiFiles,
    pub layout: ForwardingLayout,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            executor: addresses::EXECUTOR,
            timelocks: vec![NamedAddress {
                address: addresses::TIMELOCK,
                name: addresses::TIMELOCK_NAME.to_string(),
            }],
            labels: addresses::TARGET_LABELS
                .iter()
                .map(|(address, name)| NamedAddress {
                    address: *address,
                    name: name.to_string(),
                })
                .collect(),
            etherscan_url: history::ETHERSCAN_MAINNET_URL.to_string(),
            api_key: None,
            history_limit: history::DEFAULT_LIMIT,
            abi_files: AbiFiles::default(),
            layout: ForwardingLayout::default(),
        }
    }
}

impl MonitorConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> MonitorResult<Self> {
        info!("Loading configuration from {}", path.display());
        let json = fs::read_to_string(path)?;
        let config: MonitorConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Fill the API key from the environment if the file did not set one
    pub fn with_env(mut self) -> Self {
        if self.api_key.is_none() {
            if let Ok(key) = std::env::var(history::API_KEY_ENV) {
                if !key.trim().is_empty() {
                    debug!("Using API key from {}", history::API_KEY_ENV);
                    self.api_key = Some(key);
                }
            }
        }
        self
    }

    pub fn validate(&self) -> MonitorResult<()> {
        if self.timelocks.is_empty() {
            return Err(MonitorError::Config("at least one timelock is required".to_string()));
        }
        if self.history_limit == 0 {
            return Err(MonitorError::Config("history_limit must be positive".to_string()));
        }
        if self.layout.target_index == self.layout.payload_index {
            return Err(MonitorError::Config(
                "layout target_index and payload_index must differ".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timelock_addresses(&self) -> Vec<Address> {
        self.timelocks.iter().map(|timelock| timelock.address).collect()
    }

    /// Names for timelocks and labelled targets
    pub fn address_book(&self) -> AddressBook {
        AddressBook::new(
            self.timelocks
                .iter()
                .chain(self.labels.iter())
                .map(|named| (named.address, named.name.clone())),
        )
    }

    fn registry(builtin: &SignatureRegistry, files: &[PathBuf]) -> MonitorResult<SignatureRegistry> {
        let mut registry = builtin.clone();
        for path in files {
            let json = fs::read_to_string(path)?;
            let extra = SignatureRegistry::from_abi_json(builtin.name(), &json)?;
            info!("Loaded {} functions from {}", extra.len(), path.display());
            registry.extend(extra);
        }
        Ok(registry)
    }

    pub fn multisig_registry(&self) -> MonitorResult<SignatureRegistry> {
        Self::registry(&dialects::MULTISIG, &self.abi_files.multisig)
    }

    pub fn timelock_registry(&self) -> MonitorResult<SignatureRegistry> {
        Self::registry(&dialects::TIMELOCK, &self.abi_files.timelock)
    }

    /// Decoder for this configuration's registries, timelocks and layout
    pub fn decoder(&self) -> MonitorResult<TransactionDecoder> {
        Ok(TransactionDecoder::new(
            self.multisig_registry()?,
            self.timelock_registry()?,
            self.timelock_addresses(),
        )
        .with_layout(self.layout))
    }
}
