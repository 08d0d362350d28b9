//! Fixture builders shared by the unit tests

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{address, Address, Bytes, TxHash, B256, U256};

use crate::abi::encoder::{encode_call, encode_params};
use crate::constants::{addresses, dialects};
use crate::decoder::embedded::decode_arguments;
use crate::models::operation::{Fingerprint, GovernanceOperation, OperationKind};
use crate::models::record::RawRecord;

pub const MASTERCHEF: Address = address!("db9daa0a50b33e4fe9d0ac16a1df1d335f96595e");
pub const RECIPIENT: Address = address!("00000000000000000000000000000000000000aa");
pub const ETA: u64 = 1_612_000_000;

pub fn txhash(seed: u8) -> TxHash {
    B256::repeat_byte(seed)
}

pub fn uint(value: u64) -> DynSolValue {
    DynSolValue::Uint(U256::from(value), 256)
}

/// A 32-byte big-endian word
pub fn word(value: u64) -> Vec<u8> {
    U256::from(value).to_be_bytes::<32>().to_vec()
}

/// Call data for `transfer(RECIPIENT, amount)`
pub fn transfer_data(amount: u64) -> Bytes {
    Bytes::from(encode_params(&[DynSolValue::Address(RECIPIENT), uint(amount)]))
}

/// A decoded operation with fixed target, value, data and eta
pub fn operation(kind: OperationKind, seed: u8, timestamp: u64, signature: &str) -> GovernanceOperation {
    let data = transfer_data(1_000);
    let eta = U256::from(ETA);
    GovernanceOperation {
        source_hash: txhash(seed),
        kind,
        timelock: addresses::TIMELOCK,
        block_number: timestamp / 10,
        timestamp,
        target: MASTERCHEF,
        value: U256::ZERO,
        signature: signature.to_string(),
        arguments: decode_arguments(signature, &data),
        fingerprint: Fingerprint::compute(MASTERCHEF, U256::ZERO, signature, &data, eta),
        data,
        eta,
    }
}

/// Encoded timelock call
pub fn timelock_payload(function: &str, signature: &str, data: Bytes, eta: u64) -> Bytes {
    let function = dialects::TIMELOCK
        .by_name(function)
        .unwrap_or_else(|| panic!("{} is not a timelock function", function));
    Bytes::from(encode_call(
        function,
        &[
            DynSolValue::Address(MASTERCHEF),
            uint(0),
            DynSolValue::String(signature.to_string()),
            DynSolValue::Bytes(data.to_vec()),
            uint(eta),
        ],
    ))
}

/// Encoded Gnosis Safe `execTransaction` forwarding `inner` to `to`
pub fn safe_payload(to: Address, inner: Bytes) -> Bytes {
    let function = dialects::MULTISIG.by_name("execTransaction").unwrap();
    Bytes::from(encode_call(
        function,
        &[
            DynSolValue::Address(to),
            uint(0),
            DynSolValue::Bytes(inner.to_vec()),
            DynSolValue::Uint(U256::ZERO, 8),
            uint(0),
            uint(0),
            uint(0),
            DynSolValue::Address(Address::ZERO),
            DynSolValue::Address(Address::ZERO),
            DynSolValue::Bytes(vec![0x11; 65]),
        ],
    ))
}

pub fn record(seed: u8, timestamp: u64, payload: Bytes) -> RawRecord {
    RawRecord {
        hash: txhash(seed),
        from: addresses::EXECUTOR,
        to: Some(address!("1111111111111111111111111111111111111111")),
        block_number: timestamp / 10,
        timestamp,
        payload,
    }
}

/// A record queueing, cancelling or executing `transfer(RECIPIENT, amount)`
pub fn governance_record(seed: u8, timestamp: u64, function: &str, amount: u64) -> RawRecord {
    let inner = timelock_payload(function, "transfer(address,uint256)", transfer_data(amount), ETA);
    record(seed, timestamp, safe_payload(addresses::TIMELOCK, inner))
}

/// A `T[]...[]` encoding `depth` levels deep with `width` elements per level,
/// where every element offset of a level points at the same child array.
pub fn aliased_array(depth: usize, width: u64) -> Vec<u8> {
    let mut out = word(width);
    if depth == 1 {
        for i in 0..width {
            out.extend(word(i));
        }
    } else {
        for _ in 0..width {
            out.extend(word(width * 32));
        }
        out.extend(aliased_array(depth - 1, width));
    }
    out
}
