//! Contract call coding for EVM payloads
//!
//! Payloads are laid out as a 4-byte selector followed by a positional
//! tuple of 32-byte words. Dynamic values (`bytes`, `string`, `T[]`) store an
//! offset in the head and their contents in the tail. Type parsing and the
//! codec itself come from `alloy-dyn-abi`; this module adds the registries
//! and the limits that keep hostile payloads from exhausting the process.

pub mod decoder;
pub mod encoder;
pub mod registry;
pub mod types;
pub mod value;

pub use alloy_dyn_abi::{DynSolType, DynSolValue};

pub use self::decoder::{decode, decode_params};
pub use self::encoder::{encode_call, encode_params};
pub use self::registry::{FunctionSignature, SignatureRegistry};
pub use self::types::{argument_types, parse_type};
pub use self::value::{kind_name, render};

/// Width of a single ABI word.
pub const WORD_SIZE: usize = 32;

/// Width of a function selector.
pub const SELECTOR_SIZE: usize = 4;
