//! Decoding of ABI-encoded call payloads
//!
//! Decoding itself is done by `alloy-dyn-abi`. Before any payload reaches it,
//! the encoding is walked once to bound the work it implies: element offsets
//! may alias one another, so a few kilobytes of nested arrays can otherwise
//! expand into an exponential number of values, and declared lengths are
//! allocated up front.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{hex, Selector};
use std::iter;

use crate::abi::registry::SignatureRegistry;
use crate::abi::{SELECTOR_SIZE, WORD_SIZE};
use crate::errors::{DecodeError, DecodeResult};
use crate::models::call::DecodedCall;

/// Decoded values allowed per word of input.
const EXPANSION_PER_WORD: usize = 4;

/// Floor of the value budget, so tiny payloads are never starved.
const MIN_VALUE_BUDGET: usize = 64;

/// A bounded window over encoded bytes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Span<'a> {
    bytes: &'a [u8],
}

impl<'a> Span<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `len` bytes starting at `offset`.
    pub fn take(&self, offset: usize, len: usize) -> DecodeResult<&'a [u8]> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| DecodeError::malformed("length overflows"))?;
        self.bytes.get(offset..end).ok_or_else(|| {
            DecodeError::malformed(format!(
                "read of {} bytes at offset {} exceeds {} available",
                len,
                offset,
                self.bytes.len()
            ))
        })
    }

    /// A new span starting at `offset` and running to the end.
    pub fn subspan(&self, offset: usize) -> DecodeResult<Span<'a>> {
        self.bytes.get(offset..).map(Span::new).ok_or_else(|| {
            DecodeError::malformed(format!("offset {} points outside {} bytes", offset, self.bytes.len()))
        })
    }

    /// A word interpreted as an offset or length.
    pub fn read_usize(&self, offset: usize) -> DecodeResult<usize> {
        let word = self.take(offset, WORD_SIZE)?;
        if word[..WORD_SIZE - 8].iter().any(|&b| b != 0) {
            return Err(DecodeError::malformed(format!(
                "offset or length at {} does not fit in 64 bits",
                offset
            )));
        }
        let mut low = [0u8; 8];
        low.copy_from_slice(&word[WORD_SIZE - 8..]);
        usize::try_from(u64::from_be_bytes(low))
            .map_err(|_| DecodeError::malformed(format!("offset or length at {} is too large", offset)))
    }
}

/// Remaining number of values a payload may still decode into.
struct Budget(usize);

impl Budget {
    fn for_input(len: usize) -> Self {
        Budget((len / WORD_SIZE).saturating_mul(EXPANSION_PER_WORD).max(MIN_VALUE_BUDGET))
    }

    fn charge(&mut self, values: usize) -> DecodeResult<()> {
        self.0 = self.0.checked_sub(values).ok_or_else(|| {
            DecodeError::malformed("encoding expands to more values than its size allows (aliased offsets?)")
        })?;
        Ok(())
    }
}

fn is_dynamic(ty: &DynSolType) -> bool {
    match ty {
        DynSolType::Bytes | DynSolType::String | DynSolType::Array(_) => true,
        DynSolType::FixedArray(inner, _) => is_dynamic(inner),
        DynSolType::Tuple(items) => items.iter().any(is_dynamic),
        _ => false,
    }
}

/// Bytes the type occupies in the head of its enclosing tuple.
fn head_size(ty: &DynSolType) -> usize {
    if is_dynamic(ty) {
        return WORD_SIZE;
    }
    match ty {
        DynSolType::FixedArray(inner, size) => head_size(inner).saturating_mul(*size),
        DynSolType::Tuple(items) => items.iter().fold(0usize, |sum, item| sum.saturating_add(head_size(item))),
        _ => WORD_SIZE,
    }
}

/// Values a static type decodes into, containers included.
fn static_values(ty: &DynSolType) -> usize {
    match ty {
        DynSolType::FixedArray(inner, size) => static_values(inner).saturating_mul(*size).saturating_add(1),
        DynSolType::Tuple(items) => items
            .iter()
            .fold(1usize, |sum, item| sum.saturating_add(static_values(item))),
        _ => 1,
    }
}

fn walk_sequence<'t>(
    types: impl Iterator<Item = &'t DynSolType>,
    span: Span<'_>,
    budget: &mut Budget,
) -> DecodeResult<()> {
    let mut head = 0usize;
    for ty in types {
        let size = head_size(ty);
        if is_dynamic(ty) {
            let offset = span.read_usize(head)?;
            walk_dynamic(ty, span.subspan(offset)?, budget)?;
        } else {
            budget.charge(static_values(ty))?;
            span.take(head, size)?;
        }
        head = head
            .checked_add(size)
            .ok_or_else(|| DecodeError::malformed("tuple head overflows"))?;
    }
    Ok(())
}

fn walk_dynamic(ty: &DynSolType, span: Span<'_>, budget: &mut Budget) -> DecodeResult<()> {
    match ty {
        DynSolType::Bytes | DynSolType::String => {
            budget.charge(1)?;
            let len = span.read_usize(0)?;
            span.take(WORD_SIZE, len)?;
            Ok(())
        }
        DynSolType::Array(inner) => {
            budget.charge(1)?;
            let len = span.read_usize(0)?;
            let elements = span.subspan(WORD_SIZE)?;
            let needed = len.saturating_mul(head_size(inner));
            if needed > elements.len() {
                return Err(DecodeError::malformed(format!(
                    "array of {} elements needs {} bytes, {} available",
                    len,
                    needed,
                    elements.len()
                )));
            }
            walk_sequence(iter::repeat(&**inner).take(len), elements, budget)
        }
        DynSolType::FixedArray(inner, size) => {
            budget.charge(1)?;
            walk_sequence(iter::repeat(&**inner).take(*size), span, budget)
        }
        DynSolType::Tuple(items) => {
            budget.charge(1)?;
            walk_sequence(items.iter(), span, budget)
        }
        other => Err(DecodeError::malformed(format!("static type {:?} in dynamic position", other))),
    }
}

/// Split the selector off a call payload.
pub fn split_selector(payload: &[u8]) -> DecodeResult<(Selector, &[u8])> {
    if payload.len() < SELECTOR_SIZE {
        return Err(DecodeError::malformed(format!(
            "payload of {} bytes is shorter than a selector",
            payload.len()
        )));
    }
    Ok((Selector::from_slice(&payload[..SELECTOR_SIZE]), &payload[SELECTOR_SIZE..]))
}

/// Decode a positional parameter list with no selector prefix.
///
/// Trailing bytes after the last referenced word are ignored.
pub fn decode_params(types: &[DynSolType], data: &[u8]) -> DecodeResult<Vec<DynSolValue>> {
    walk_sequence(types.iter(), Span::new(data), &mut Budget::for_input(data.len()))?;

    let decoded = DynSolType::Tuple(types.to_vec())
        .abi_decode_params(data)
        .map_err(|e| DecodeError::malformed(e.to_string()))?;
    match decoded {
        DynSolValue::Tuple(values) => Ok(values),
        other => Ok(vec![other]),
    }
}

/// Decode a call payload against a registry.
///
/// Fails with [`DecodeError::UnknownSelector`] when the selector is not
/// registered and with [`DecodeError::MalformedPayload`] when the body does
/// not match the declared parameter types.
pub fn decode(payload: &[u8], registry: &SignatureRegistry) -> DecodeResult<DecodedCall> {
    let (selector, body) = split_selector(payload)?;
    let function = registry
        .lookup(&selector)
        .ok_or_else(|| DecodeError::UnknownSelector {
            registry: registry.name().to_string(),
            selector: selector.0,
        })?;

    let values = decode_params(function.param_types(), body).map_err(|e| match e {
        DecodeError::MalformedPayload(reason) => {
            DecodeError::malformed(format!("{} (0x{}): {}", function.name(), hex::encode(selector), reason))
        }
        other => other,
    })?;

    Ok(DecodedCall::new(
        function.name().to_string(),
        function.param_names().into_iter().zip(values).collect(),
    ))
}
