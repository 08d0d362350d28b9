//! Built-in signature registries
//!
//! The multisig registry covers the Gnosis Safe and the Gnosis MultiSigWallet
//! entry points. Both take the forwarded target as argument 0 and the
//! forwarded payload as argument 2. The timelock registry covers the
//! Compound-style timelock.

use once_cell::sync::Lazy;

use crate::abi::registry::SignatureRegistry;

pub const MULTISIG_REGISTRY_NAME: &str = "multisig";
pub const TIMELOCK_REGISTRY_NAME: &str = "timelock";

/// Multisig entry points
pub static MULTISIG: Lazy<SignatureRegistry> = Lazy::new(|| {
    SignatureRegistry::from_prototypes(
        MULTISIG_REGISTRY_NAME,
        &[
            "execTransaction(address to, uint256 value, bytes data, uint8 operation, uint256 safeTxGas, \
             uint256 baseGas, uint256 gasPrice, address gasToken, address refundReceiver, bytes signatures)",
            "submitTransaction(address destination, uint256 value, bytes data)",
        ],
    )
});

/// Timelock entry points, tracked and untracked
pub static TIMELOCK: Lazy<SignatureRegistry> = Lazy::new(|| {
    SignatureRegistry::from_prototypes(
        TIMELOCK_REGISTRY_NAME,
        &[
            "queueTransaction(address target, uint256 value, string signature, bytes data, uint256 eta)",
            "cancelTransaction(address target, uint256 value, string signature, bytes data, uint256 eta)",
            "executeTransaction(address target, uint256 value, string signature, bytes data, uint256 eta)",
            "acceptAdmin()",
            "setPendingAdmin(address pendingAdmin_)",
            "setDelay(uint256 delay_)",
        ],
    )
});
