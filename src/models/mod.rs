//! Data models for decoded governance history

pub mod call;
pub mod operation;
pub mod record;
#[cfg(test)]
mod tests;

pub use self::call::{DecodedCall, Param};
pub use self::operation::{Arguments, Fingerprint, GovernanceOperation, OperationKind, OperationStatus};
pub use self::record::RawRecord;
