//! Display helpers for decoded values

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::hex;

/// Render a value for humans.
///
/// Integers render in decimal, byte strings as `0x` hex, arrays comma-joined
/// and tuples (including embedded argument lists) as `[a, b]`.
pub fn render(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(address) => address.to_string(),
        DynSolValue::Bool(flag) => flag.to_string(),
        DynSolValue::Uint(number, _) => number.to_string(),
        DynSolValue::Int(number, _) => number.to_string(),
        DynSolValue::FixedBytes(word, size) => format!("0x{}", hex::encode(&word[..(*size).min(word.len())])),
        DynSolValue::Function(function) => function.to_string(),
        DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        DynSolValue::String(text) => text.clone(),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            items.iter().map(render).collect::<Vec<_>>().join(",")
        }
        DynSolValue::Tuple(items) => format!("[{}]", items.iter().map(render).collect::<Vec<_>>().join(", ")),
        #[allow(unreachable_patterns)]
        _ => format!("{:?}", value),
    }
}

/// Short name of the value's kind, for error messages.
pub fn kind_name(value: &DynSolValue) -> &'static str {
    match value {
        DynSolValue::Address(_) => "address",
        DynSolValue::Bool(_) => "bool",
        DynSolValue::Uint(..) => "uint",
        DynSolValue::Int(..) => "int",
        DynSolValue::FixedBytes(..) => "fixed bytes",
        DynSolValue::Function(_) => "function",
        DynSolValue::Bytes(_) => "bytes",
        DynSolValue::String(_) => "string",
        DynSolValue::Array(_) => "array",
        DynSolValue::FixedArray(_) => "fixed array",
        DynSolValue::Tuple(_) => "tuple",
        #[allow(unreachable_patterns)]
        _ => "struct",
    }
}
