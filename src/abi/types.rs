//! Parameter type expressions
//!
//! Signature strings embedded in timelock calls come straight from calldata,
//! so they are screened before they reach the type parser: the parsed type
//! is a recursive structure, and an unbounded chain of `[]` suffixes would
//! overflow the stack while it is built, walked or dropped.

use alloy_dyn_abi::DynSolType;

use crate::errors::{DecodeError, DecodeResult};

/// Most `(` and `[` a single type expression may contain.
pub const MAX_TYPE_BRACKETS: usize = 64;

fn check_brackets(expression: &str) -> DecodeResult<()> {
    let brackets = expression.bytes().filter(|b| matches!(b, b'(' | b'[')).count();
    if brackets > MAX_TYPE_BRACKETS {
        return Err(DecodeError::malformed(format!(
            "type expression nests {} brackets, at most {} are supported",
            brackets, MAX_TYPE_BRACKETS
        )));
    }
    Ok(())
}

/// Parse a Solidity type such as `uint256`, `address[]` or `(bool,bytes32)[2]`.
pub fn parse_type(expression: &str) -> DecodeResult<DynSolType> {
    let expression = expression.trim();
    check_brackets(expression)?;
    DynSolType::parse(expression)
        .map_err(|e| DecodeError::malformed(format!("unsupported type `{}`: {}", expression, e)))
}

/// Extract the type list from the parenthesised part of a signature.
///
/// `transfer(address,uint256)` yields `[address, uint256]`. Text before the
/// parenthesis is not validated, so any label is accepted.
pub fn argument_types(signature: &str) -> DecodeResult<Vec<DynSolType>> {
    let signature = signature.trim();
    let (open, close) = match (signature.find('('), signature.rfind(')')) {
        (Some(open), Some(close)) if open < close => (open, close),
        (None, _) => {
            return Err(DecodeError::malformed(format!(
                "signature `{}` has no parameter list",
                signature
            )))
        }
        _ => return Err(DecodeError::malformed(format!("signature `{}` is missing `)`", signature))),
    };

    let list = &signature[open..=close];
    if list[1..list.len() - 1].trim().is_empty() {
        return Ok(Vec::new());
    }

    match parse_type(list)? {
        DynSolType::Tuple(types) => Ok(types),
        other => Ok(vec![other]),
    }
}
