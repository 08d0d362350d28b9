//! Lifecycle correlation of governance operations
//!
//! A queued action is matched to the cancel or execute calls that share its
//! fingerprint. When several terminating calls share a fingerprint, the
//! newest one decides the status.

#[cfg(test)]
mod tests;

use alloy_primitives::TxHash;
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::models::operation::{Fingerprint, GovernanceOperation, OperationKind, OperationStatus};

/// A queue operation together with where its lifecycle ended
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedOperation {
    pub operation: GovernanceOperation,
    pub status: OperationStatus,
}

/// Any operation in the history; only queue operations carry a status
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub operation: GovernanceOperation,
    pub status: Option<OperationStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Terminator {
    kind: OperationKind,
    hash: TxHash,
}

/// Cancel and execute calls indexed by fingerprint
#[derive(Debug, Clone, Default)]
pub struct TerminatorIndex {
    cancelled: HashSet<Fingerprint>,
    executed: HashSet<Fingerprint>,
    authoritative: HashMap<Fingerprint, Terminator>,
}

impl TerminatorIndex {
    /// Fold terminating operations into an index.
    ///
    /// `operations` must be ordered newest first: a fingerprint is only
    /// inserted when absent, so the first terminator seen for it is the one
    /// that decides the status. Queue operations are ignored.
    pub fn from_newest_first<'a>(operations: impl IntoIterator<Item = &'a GovernanceOperation>) -> Self {
        operations
            .into_iter()
            .filter(|operation| operation.kind.is_terminal())
            .fold(Self::default(), |mut index, operation| {
                match operation.kind {
                    OperationKind::Cancel => index.cancelled.insert(operation.fingerprint),
                    OperationKind::Execute => index.executed.insert(operation.fingerprint),
                    OperationKind::Queue => false,
                };
                index.authoritative.entry(operation.fingerprint).or_insert(Terminator {
                    kind: operation.kind,
                    hash: operation.source_hash,
                });
                index
            })
    }

    /// Status of a queued action with the given fingerprint
    pub fn status_of(&self, fingerprint: &Fingerprint) -> OperationStatus {
        match self.authoritative.get(fingerprint) {
            Some(Terminator {
                kind: OperationKind::Cancel,
                hash,
            }) => OperationStatus::Cancelled(*hash),
            Some(Terminator {
                kind: OperationKind::Execute,
                hash,
            }) => OperationStatus::Executed(*hash),
            Some(Terminator {
                kind: OperationKind::Queue,
                ..
            })
            | None => OperationStatus::Queued,
        }
    }

    pub fn is_cancelled(&self, fingerprint: &Fingerprint) -> bool {
        self.cancelled.contains(fingerprint)
    }

    pub fn is_executed(&self, fingerprint: &Fingerprint) -> bool {
        self.executed.contains(fingerprint)
    }

    /// Both cancelled and executed; the timelock itself should never allow this.
    pub fn is_conflicted(&self, fingerprint: &Fingerprint) -> bool {
        self.is_cancelled(fingerprint) && self.is_executed(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.authoritative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authoritative.is_empty()
    }
}

/// Cancels rank ahead of executes when two terminators are simultaneous.
fn terminal_rank(kind: OperationKind) -> u8 {
    match kind {
        OperationKind::Cancel => 0,
        OperationKind::Execute => 1,
        OperationKind::Queue => 2,
    }
}

fn newest_first_order(a: &GovernanceOperation, b: &GovernanceOperation) -> Ordering {
    b.timestamp
        .cmp(&a.timestamp)
        .then_with(|| b.block_number.cmp(&a.block_number))
        .then_with(|| terminal_rank(a.kind).cmp(&terminal_rank(b.kind)))
}

/// Terminating operations sorted newest first (stable for exact ties).
pub fn terminators_newest_first(operations: &[GovernanceOperation]) -> Vec<&GovernanceOperation> {
    let mut terminators: Vec<&GovernanceOperation> = operations
        .iter()
        .filter(|operation| operation.kind.is_terminal())
        .collect();
    terminators.sort_by(|a, b| newest_first_order(a, b));
    terminators
}

/// Build the terminator index for a batch in any input order.
pub fn index_terminators(operations: &[GovernanceOperation]) -> TerminatorIndex {
    let index = TerminatorIndex::from_newest_first(terminators_newest_first(operations));
    if !index.is_empty() {
        debug!("Indexed {} terminated actions", index.len());
    }
    index
}

fn resolve(index: &TerminatorIndex, operation: &GovernanceOperation) -> OperationStatus {
    if index.is_conflicted(&operation.fingerprint) {
        warn!(
            "Action {} queued in {} was both cancelled and executed; using the newest",
            operation.fingerprint, operation.source_hash
        );
    }
    index.status_of(&operation.fingerprint)
}

/// Resolve the status of every queue operation.
///
/// The output keeps the relative order of the queue operations in
/// `operations`. Unmatched queues resolve to [`OperationStatus::Queued`].
pub fn correlate(operations: &[GovernanceOperation]) -> Vec<TrackedOperation> {
    let index = index_terminators(operations);

    operations
        .iter()
        .filter(|operation| operation.kind == OperationKind::Queue)
        .map(|operation| TrackedOperation {
            operation: operation.clone(),
            status: resolve(&index, operation),
        })
        .collect()
}

/// Every operation in input order, with statuses attached to the queues.
pub fn annotate_history(operations: &[GovernanceOperation]) -> Vec<HistoryEntry> {
    let index = index_terminators(operations);

    operations
        .iter()
        .map(|operation| HistoryEntry {
            operation: operation.clone(),
            status: (operation.kind == OperationKind::Queue).then(|| resolve(&index, operation)),
        })
        .collect()
}
