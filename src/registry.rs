//! Function descriptors for host query builders.
//!
//! A host that keeps its own function table (for validation, completion or
//! documentation) registers the catalog through [`FunctionRegistry`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{entries, ArgKind, Family, OperationEntry, Pairing, ResultKind};
use crate::core::{ExprError, Result};

/// Public description of one catalog operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDescriptor {
    /// Stable lowercase key, e.g. `json_extract`.
    pub key: &'static str,
    /// SQL name or operator text, e.g. `JSON_EXTRACT` or `->>`.
    pub name: &'static str,
    pub family: Family,
    pub min_args: usize,
    /// `None` for variadic operations.
    pub max_args: Option<usize>,
    /// Arguments from `pairs_from` onward come as path/value (or key/value) pairs.
    pub pairing: Pairing,
    pub arg_kinds: Vec<ArgKind>,
    /// Positions past `arg_kinds` cycle over `arg_kinds[repeat_from..]`.
    pub repeat_from: usize,
    pub result: ResultKind,
    pub template: &'static str,
}

impl From<&'static OperationEntry> for FunctionDescriptor {
    fn from(entry: &'static OperationEntry) -> Self {
        Self {
            key: entry.key,
            name: entry.name,
            family: entry.family,
            min_args: entry.min_args,
            max_args: entry.max_args,
            pairing: entry.pairing,
            arg_kinds: entry.arg_kinds.to_vec(),
            repeat_from: entry.repeat_from,
            result: entry.result,
            template: entry.template,
        }
    }
}

/// Descriptors for the whole catalog, in catalog order.
pub fn descriptors() -> Vec<FunctionDescriptor> {
    entries().iter().map(FunctionDescriptor::from).collect()
}

/// The catalog as pretty-printed JSON.
pub fn descriptors_json() -> Result<String> {
    serde_json::to_string_pretty(&descriptors())
        .map_err(|e| ExprError::InvalidConfig(format!("cannot serialize descriptors: {}", e)))
}

/// Host-side function table.
pub trait FunctionRegistry {
    fn register_function(&mut self, descriptor: FunctionDescriptor) -> Result<()>;
}

/// Registers every catalog operation; returns how many were added.
pub fn register_catalog(registry: &mut impl FunctionRegistry) -> Result<usize> {
    let mut count = 0;
    for descriptor in descriptors() {
        registry.register_function(descriptor)?;
        count += 1;
    }
    log::debug!("registered {} JSON functions", count);
    Ok(count)
}

/// In-memory [`FunctionRegistry`] keyed by descriptor key.
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    functions: BTreeMap<&'static str, FunctionDescriptor>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry already holding the whole catalog.
    pub fn with_catalog() -> Result<Self> {
        let mut registry = Self::new();
        register_catalog(&mut registry)?;
        Ok(registry)
    }

    pub fn get(&self, key: &str) -> Option<&FunctionDescriptor> {
        self.functions.get(key)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionDescriptor> {
        self.functions.values()
    }
}

impl FunctionRegistry for DescriptorRegistry {
    fn register_function(&mut self, descriptor: FunctionDescriptor) -> Result<()> {
        if self.functions.contains_key(descriptor.key) {
            return Err(ExprError::InvalidConfig(format!(
                "function '{}' is already registered",
                descriptor.key
            )));
        }
        self.functions.insert(descriptor.key, descriptor);
        Ok(())
    }
}
