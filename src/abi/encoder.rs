//! Encoding of argument values, the inverse of [`crate::abi::decoder`]

use alloy_dyn_abi::DynSolValue;

use crate::abi::registry::FunctionSignature;

/// Encode values as a positional parameter list with no selector prefix.
pub fn encode_params(values: &[DynSolValue]) -> Vec<u8> {
    DynSolValue::Tuple(values.to_vec()).abi_encode_params()
}

/// Encode a full call payload: selector followed by the parameter list.
pub fn encode_call(function: &FunctionSignature, values: &[DynSolValue]) -> Vec<u8> {
    let mut payload = function.selector().to_vec();
    payload.extend_from_slice(&encode_params(values));
    payload
}
