#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::testing::{operation, txhash};

    const TRANSFER: &str = "transfer(address,uint256)";
    const SET_RATE: &str = "setRewardRate(uint256)";

    #[test]
    fn test_unmatched_queue_stays_queued() {
        let tracked = correlate(&[operation(OperationKind::Queue, 1, 100, TRANSFER)]);
        assert_eq!(tracked.len(), 1);
        assert_eq!(tracked[0].status, OperationStatus::Queued);
    }

    #[test]
    fn test_matched_terminators() {
        let operations = vec![
            operation(OperationKind::Queue, 1, 100, TRANSFER),
            operation(OperationKind::Queue, 2, 110, SET_RATE),
            operation(OperationKind::Execute, 3, 200, TRANSFER),
            operation(OperationKind::Cancel, 4, 210, SET_RATE),
        ];

        let tracked = correlate(&operations);
        assert_eq!(tracked[0].status, OperationStatus::Executed(txhash(3)));
        assert_eq!(tracked[1].status, OperationStatus::Cancelled(txhash(4)));
    }

    #[test]
    fn test_newest_terminator_wins() {
        let operations = vec![
            operation(OperationKind::Queue, 1, 100, TRANSFER),
            operation(OperationKind::Cancel, 2, 200, TRANSFER),
            operation(OperationKind::Execute, 3, 300, TRANSFER),
        ];

        let tracked = correlate(&operations);
        assert_eq!(tracked[0].status, OperationStatus::Executed(txhash(3)));

        // input order does not matter
        let reversed: Vec<_> = operations.iter().rev().cloned().collect();
        assert_eq!(correlate(&reversed)[0].status, OperationStatus::Executed(txhash(3)));
    }

    #[test]
    fn test_oldest_first_fold_is_stale() {
        let cancel = operation(OperationKind::Cancel, 2, 200, TRANSFER);
        let execute = operation(OperationKind::Execute, 3, 300, TRANSFER);
        let queue = operation(OperationKind::Queue, 1, 100, TRANSFER);

        let stale = TerminatorIndex::from_newest_first(vec![&cancel, &execute]);
        assert_eq!(stale.status_of(&queue.fingerprint), OperationStatus::Cancelled(txhash(2)));

        let fresh = TerminatorIndex::from_newest_first(vec![&execute, &cancel]);
        assert_eq!(fresh.status_of(&queue.fingerprint), OperationStatus::Executed(txhash(3)));
        assert!(fresh.is_conflicted(&queue.fingerprint));
        assert_eq!(fresh.len(), 1);
    }

    #[test]
    fn test_simultaneous_cancel_outranks_execute() {
        let operations = vec![
            operation(OperationKind::Queue, 1, 100, TRANSFER),
            operation(OperationKind::Execute, 2, 300, TRANSFER),
            operation(OperationKind::Cancel, 3, 300, TRANSFER),
        ];

        assert_eq!(correlate(&operations)[0].status, OperationStatus::Cancelled(txhash(3)));
    }

    #[test]
    fn test_terminators_sorted_newest_first() {
        let operations = vec![
            operation(OperationKind::Execute, 1, 100, TRANSFER),
            operation(OperationKind::Queue, 2, 500, TRANSFER),
            operation(OperationKind::Cancel, 3, 300, SET_RATE),
            operation(OperationKind::Execute, 4, 200, SET_RATE),
        ];

        let sorted: Vec<_> = terminators_newest_first(&operations)
            .iter()
            .map(|operation| operation.source_hash)
            .collect();
        assert_eq!(sorted, vec![txhash(3), txhash(4), txhash(1)]);
    }

    #[test]
    fn test_queue_order_is_preserved() {
        let operations = vec![
            operation(OperationKind::Queue, 5, 500, SET_RATE),
            operation(OperationKind::Cancel, 4, 400, TRANSFER),
            operation(OperationKind::Queue, 1, 100, TRANSFER),
            operation(OperationKind::Queue, 3, 300, "setDelay(uint256)"),
        ];

        let hashes: Vec<_> = correlate(&operations)
            .iter()
            .map(|tracked| tracked.operation.source_hash)
            .collect();
        assert_eq!(hashes, vec![txhash(5), txhash(1), txhash(3)]);
    }

    #[test]
    fn test_correlate_is_idempotent() {
        let operations = vec![
            operation(OperationKind::Queue, 1, 100, TRANSFER),
            operation(OperationKind::Queue, 2, 110, SET_RATE),
            operation(OperationKind::Execute, 3, 200, TRANSFER),
        ];

        assert_eq!(correlate(&operations), correlate(&operations));
        assert!(correlate(&[]).is_empty());
        assert!(index_terminators(&[]).is_empty());
    }

    #[test]
    fn test_annotate_history() {
        let operations = vec![
            operation(OperationKind::Execute, 3, 300, TRANSFER),
            operation(OperationKind::Queue, 2, 200, SET_RATE),
            operation(OperationKind::Queue, 1, 100, TRANSFER),
        ];

        let history = annotate_history(&operations);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].status, None);
        assert_eq!(history[1].status, Some(OperationStatus::Queued));
        assert_eq!(history[2].status, Some(OperationStatus::Executed(txhash(3))));
        assert_eq!(history[2].operation, operations[2]);
    }

    #[test]
    fn test_index_membership() {
        let operations = vec![
            operation(OperationKind::Cancel, 1, 100, TRANSFER),
            operation(OperationKind::Execute, 2, 200, SET_RATE),
        ];
        let index = index_terminators(&operations);
        let transfer = operations[0].fingerprint;
        let set_rate = operations[1].fingerprint;

        assert!(index.is_cancelled(&transfer));
        assert!(!index.is_executed(&transfer));
        assert!(index.is_executed(&set_rate));
        assert!(!index.is_conflicted(&set_rate));
        assert_eq!(index.len(), 2);
    }
}
