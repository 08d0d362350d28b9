//! Well-known addresses of the BasketDAO governance deployment

use alloy_primitives::{address, Address};

/// Account that submits every governance transaction through the multisig
pub const EXECUTOR: Address = address!("2bF3cC8Fa6F067cc1741c7467C8Ee9F00e837757");

/// The 24 hour timelock
pub const TIMELOCK: Address = address!("AFa2c40DF28768eaB8aDD6f2572B32A7F8c86a5E");

pub const TIMELOCK_NAME: &str = "24 hour Timelock";

/// Display names for frequent timelock targets
pub const TARGET_LABELS: &[(Address, &str)] = &[
    (address!("db9daa0a50b33e4fe9d0ac16a1df1d335f96595e"), "Masterchef"),
    (address!("0309c98b1bffa350bcb3f9fb9780970ca32a5060"), "BDPI"),
];
