//! Decoded contract calls

use alloy_dyn_abi::DynSolValue;

/// A decoded call argument
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Argument name from the registry
    pub name: String,
    /// Decoded value
    pub value: DynSolValue,
}

/// A call decoded against a signature registry.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCall {
    /// Function name
    pub function_name: String,
    /// Arguments in declaration order
    pub params: Vec<Param>,
}

impl DecodedCall {
    /// Create a new decoded call
    pub fn new(function_name: String, params: Vec<(String, DynSolValue)>) -> Self {
        Self {
            function_name,
            params: params
                .into_iter()
                .map(|(name, value)| Param { name, value })
                .collect(),
        }
    }

    /// Value of the argument at `index`
    pub fn param(&self, index: usize) -> Option<&DynSolValue> {
        self.params.get(index).map(|param| &param.value)
    }
}
