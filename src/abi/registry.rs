//! Per-contract registries of known function signatures

use alloy_dyn_abi::DynSolType;
use alloy_json_abi::{Function, JsonAbi};
use alloy_primitives::Selector;
use log::{debug, warn};
use std::collections::HashMap;

use crate::abi::types::parse_type;
use crate::errors::{DecodeError, DecodeResult, MonitorError, MonitorResult};

/// A known function of a contract, with its parameter types resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    function: Function,
    param_types: Vec<DynSolType>,
}

impl FunctionSignature {
    /// Wrap an ABI function, failing if a parameter type is unsupported.
    pub fn new(function: Function) -> DecodeResult<Self> {
        let param_types = function
            .inputs
            .iter()
            .map(|input| parse_type(&input.selector_type()))
            .collect::<DecodeResult<Vec<_>>>()?;
        Ok(Self { function, param_types })
    }

    /// Parse a prototype such as `setDelay(uint256 delay_)`.
    pub fn parse(prototype: &str) -> DecodeResult<Self> {
        let function = Function::parse(prototype)
            .map_err(|e| DecodeError::malformed(format!("invalid prototype `{}`: {}", prototype, e)))?;
        Self::new(function)
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    /// First four bytes of the keccak-256 hash of the canonical signature.
    pub fn selector(&self) -> Selector {
        self.function.selector()
    }

    /// Canonical form, e.g. `transfer(address,uint256)`.
    pub fn canonical(&self) -> String {
        self.function.signature()
    }

    pub fn param_types(&self) -> &[DynSolType] {
        &self.param_types
    }

    /// Declared parameter names; unnamed parameters become `arg{i}`.
    pub fn param_names(&self) -> Vec<String> {
        self.function
            .inputs
            .iter()
            .enumerate()
            .map(|(i, input)| {
                if input.name.is_empty() {
                    format!("arg{}", i)
                } else {
                    input.name.clone()
                }
            })
            .collect()
    }
}

/// Known functions of one contract dialect, keyed by selector.
#[derive(Debug, Clone, Default)]
pub struct SignatureRegistry {
    name: String,
    functions: HashMap<Selector, FunctionSignature>,
}

impl SignatureRegistry {
    /// Create an empty registry
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            functions: HashMap::new(),
        }
    }

    /// Build a registry from signatures
    pub fn from_signatures(name: &str, signatures: impl IntoIterator<Item = FunctionSignature>) -> Self {
        let mut registry = Self::new(name);
        for signature in signatures {
            registry.register(signature);
        }
        registry
    }

    /// Build a registry from human-readable prototypes.
    ///
    /// Prototypes that do not parse are logged and left out.
    pub fn from_prototypes(name: &str, prototypes: &[&str]) -> Self {
        let mut registry = Self::new(name);
        for prototype in prototypes {
            match FunctionSignature::parse(prototype) {
                Ok(signature) => registry.register(signature),
                Err(e) => warn!("Skipping prototype in {} registry: {}", name, e),
            }
        }
        registry
    }

    /// Build a registry from a JSON ABI document.
    ///
    /// Non-function entries are ignored, as are functions whose parameter
    /// types cannot be resolved.
    pub fn from_abi_json(name: &str, json: &str) -> MonitorResult<Self> {
        let abi: JsonAbi = serde_json::from_str(json)
            .map_err(|e| MonitorError::Abi(format!("invalid ABI for {} registry: {}", name, e)))?;

        let mut registry = Self::new(name);
        for function in abi.functions() {
            match FunctionSignature::new(function.clone()) {
                Ok(signature) => registry.register(signature),
                Err(e) => debug!("Skipping ABI function {}: {}", function.name, e),
            }
        }

        Ok(registry)
    }

    /// Add a signature, replacing any previous one with the same selector
    pub fn register(&mut self, signature: FunctionSignature) {
        self.functions.insert(signature.selector(), signature);
    }

    /// Merge all functions of another registry into this one
    pub fn extend(&mut self, other: SignatureRegistry) {
        self.functions.extend(other.functions);
    }

    pub fn lookup(&self, selector: &Selector) -> Option<&FunctionSignature> {
        self.functions.get(selector)
    }

    pub fn by_name(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.values().find(|function| function.name() == name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
