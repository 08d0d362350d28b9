//! Decoding of the call data embedded in a timelock operation
//!
//! The timelock stores a function prototype string next to raw argument
//! bytes. The prototype declares the layout of the bytes, so the type list is
//! parsed out of it at runtime and the bytes decoded as a plain tuple.

use alloy_primitives::Bytes;

use crate::abi::{argument_types, decode_params};
use crate::models::operation::Arguments;

/// Decode `data` against the parameter list of `signature`.
///
/// Never fails: a mismatch yields [`Arguments::Undecodable`] so the
/// operation can still be shown with its raw bytes.
pub fn decode_arguments(signature: &str, data: &Bytes) -> Arguments {
    let decoded = argument_types(signature).and_then(|types| decode_params(&types, data));
    match decoded {
        Ok(values) => Arguments::Decoded(values),
        Err(e) => Arguments::Undecodable { reason: e.to_string() },
    }
}
