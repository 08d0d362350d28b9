//! Constants used throughout the monitor

pub mod addresses;
pub mod dialects;

/// Timelock functions that make up a governance lifecycle
pub mod governance {
    pub const QUEUE_TRANSACTION: &str = "queueTransaction";
    pub const CANCEL_TRANSACTION: &str = "cancelTransaction";
    pub const EXECUTE_TRANSACTION: &str = "executeTransaction";

    /// Positional layout shared by all three functions
    pub const TARGET_INDEX: usize = 0;
    pub const VALUE_INDEX: usize = 1;
    pub const SIGNATURE_INDEX: usize = 2;
    pub const DATA_INDEX: usize = 3;
    pub const ETA_INDEX: usize = 4;
}

/// Transaction history defaults
pub mod history {
    /// Most recent transactions fetched per invocation (the indexer's page cap)
    pub const DEFAULT_LIMIT: usize = 10_000;

    pub const ETHERSCAN_MAINNET_URL: &str = "https://api.etherscan.io/api";

    /// Environment variable holding the indexer API key
    pub const API_KEY_ENV: &str = "ETHERSCAN_API_KEY";
}
