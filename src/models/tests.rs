#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::abi::DynSolValue;
    use crate::testing::{operation, transfer_data, txhash, uint, ETA, MASTERCHEF, RECIPIENT};
    use alloy_primitives::{Bytes, U256};

    const TRANSFER: &str = "transfer(address,uint256)";

    #[test]
    fn test_kind_from_function_name() {
        assert_eq!(OperationKind::from_function_name("queueTransaction"), Some(OperationKind::Queue));
        assert_eq!(OperationKind::from_function_name("cancelTransaction"), Some(OperationKind::Cancel));
        assert_eq!(OperationKind::from_function_name("executeTransaction"), Some(OperationKind::Execute));
        assert_eq!(OperationKind::from_function_name("setDelay"), None);

        assert!(!OperationKind::Queue.is_terminal());
        assert!(OperationKind::Cancel.is_terminal());
        assert_eq!(OperationKind::Execute.to_string(), "executeTransaction");
    }

    #[test]
    fn test_fingerprint_ignores_kind_and_hash() {
        let queue = operation(OperationKind::Queue, 1, 100, TRANSFER);
        let execute = operation(OperationKind::Execute, 2, 200_000, TRANSFER);

        assert_ne!(queue.source_hash, execute.source_hash);
        assert_eq!(queue.fingerprint, execute.fingerprint);
    }

    #[test]
    fn test_fingerprint_covers_every_field() {
        let data = transfer_data(1_000);
        let eta = U256::from(ETA);
        let base = Fingerprint::compute(MASTERCHEF, U256::ZERO, TRANSFER, &data, eta);

        assert_eq!(base, operation(OperationKind::Queue, 1, 100, TRANSFER).fingerprint);
        assert_ne!(base, Fingerprint::compute(MASTERCHEF, U256::from(1), TRANSFER, &data, eta));
        assert_ne!(base, Fingerprint::compute(MASTERCHEF, U256::ZERO, "transfer(address,uint)", &data, eta));
        assert_ne!(base, Fingerprint::compute(MASTERCHEF, U256::ZERO, TRANSFER, &transfer_data(1_001), eta));
        assert_ne!(base, Fingerprint::compute(MASTERCHEF, U256::ZERO, TRANSFER, &data, eta + U256::from(1)));
    }

    #[test]
    fn test_status_labels() {
        let hash = txhash(9);
        assert_eq!(OperationStatus::Queued.label(), "queued");
        assert_eq!(OperationStatus::Cancelled(hash).label(), "cancelled");
        assert_eq!(OperationStatus::Executed(hash).label(), "executed");

        assert_eq!(OperationStatus::Queued.terminating_hash(), None);
        assert_eq!(OperationStatus::Executed(hash).terminating_hash(), Some(hash));
        assert_eq!(OperationStatus::Queued.to_string(), "queued");
        assert_eq!(OperationStatus::Cancelled(hash).to_string(), format!("cancelled ({})", hash));
    }

    #[test]
    fn test_layered_call_replaces_data() {
        let queue = operation(OperationKind::Queue, 1, 100, TRANSFER);
        let call = queue.layered_call();

        assert_eq!(call.function_name, "queueTransaction");
        let names: Vec<&str> = call.params.iter().map(|param| param.name.as_str()).collect();
        assert_eq!(names, vec!["target", "value", "signature", "data", "eta"]);
        assert_eq!(
            call.param(3),
            Some(&DynSolValue::Tuple(vec![DynSolValue::Address(RECIPIENT), uint(1_000)]))
        );
        assert_eq!(queue.data_display(false), format!("[{}, 1000]", RECIPIENT));
        assert!(queue.data_display(true).starts_with("0x"));
    }

    #[test]
    fn test_undecodable_arguments_keep_raw_bytes() {
        let raw = Bytes::from(vec![0x01, 0x02]);
        let arguments = Arguments::Undecodable {
            reason: "too short".to_string(),
        };
        assert_eq!(arguments.as_value(&raw), DynSolValue::Bytes(vec![0x01, 0x02]));

        let mut undecodable = operation(OperationKind::Queue, 1, 100, "transfer(address)");
        undecodable.arguments = arguments;
        assert_eq!(undecodable.data_display(false), undecodable.data_display(true));
    }

    #[test]
    fn test_decoded_call_params() {
        let call = DecodedCall::new(
            "execTransaction".to_string(),
            vec![
                ("to".to_string(), DynSolValue::Address(MASTERCHEF)),
                ("data".to_string(), DynSolValue::Bytes(vec![0xff])),
            ],
        );

        assert_eq!(call.params[0].name, "to");
        assert_eq!(call.param(1), Some(&DynSolValue::Bytes(vec![0xff])));
        assert_eq!(call.param(2), None);
    }
}
