//! # Generator Registry
//!
//! Maps block opcodes to the generator that emits code for them.
//!
//! A [`Generator`] is a single-method capability, blanket-implemented for any
//! matching `Fn`, so a block library is just one plain function per block
//! type registered at startup. The registry is populated once and read for
//! the rest of the process; there is no removal.

use std::collections::HashMap;

use tracing::debug;

use crate::block::Block;

use super::emitter::{Emitter, Fragment};
use super::error::{GenError, Result};

/// Emits the source fragment for one block type.
pub trait Generator: Send + Sync {
    fn emit(&self, block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment>;
}

impl<F> Generator for F
where
    F: Fn(&Block, &mut Emitter<'_>) -> Result<Fragment> + Send + Sync,
{
    fn emit(&self, block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment> {
        self(block, ctx)
    }
}

impl std::fmt::Debug for dyn Generator + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<generator>")
    }
}

/// Opcode → generator lookup table.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: HashMap<String, Box<dyn Generator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator for an opcode, replacing any previous one.
    pub fn register(&mut self, opcode: &str, generator: impl Generator + 'static) {
        if self
            .generators
            .insert(opcode.to_string(), Box::new(generator))
            .is_some()
        {
            debug!(opcode, "generator re-registered");
        }
    }

    /// Fails with [`GenError::UnknownBlockType`] when the opcode has no
    /// generator; the emitter catches that case and stubs the block out.
    pub fn lookup(&self, opcode: &str) -> Result<&dyn Generator> {
        self.generators
            .get(opcode)
            .map(|generator| generator.as_ref())
            .ok_or_else(|| GenError::UnknownBlockType(opcode.to_string()))
    }

    pub fn contains(&self, opcode: &str) -> bool {
        self.generators.contains_key(opcode)
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Registered opcodes, in no particular order.
    pub fn opcodes(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_block: &Block, _ctx: &mut Emitter<'_>) -> Result<Fragment> {
        Ok(Fragment::statement(";\n"))
    }

    #[test]
    fn lookup_of_missing_opcode_fails() {
        let registry = GeneratorRegistry::new();
        let err = registry.lookup("foo_bar").unwrap_err();
        assert_eq!(err, GenError::UnknownBlockType("foo_bar".to_string()));
    }

    #[test]
    fn registration_replaces_previous_generator() {
        let mut registry = GeneratorRegistry::new();
        registry.register("noop", noop);
        registry.register("noop", noop);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("noop"));
    }
}
