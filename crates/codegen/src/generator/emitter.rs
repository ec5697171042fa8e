//! # Emitter
//!
//! The per-pass generation context and tree walker.
//!
//! An [`Emitter`] borrows the registry and owns the auxiliary pools for
//! exactly one generation pass, so concurrent requests never share state.
//! Its two entry points, [`Emitter::statement_to_code`] and
//! [`Emitter::value_to_code`], are the only way generators resolve their
//! child blocks; traversal order and error recovery stay centralized here.
//!
//! The walk is depth-first: a generator composes its own text only after the
//! emitter has resolved the text of its children. Pool writes may happen in
//! any order along the way; dedup by key makes that ordering immaterial.

use tracing::warn;

use crate::block::Block;

use super::error::{GenError, Result};
use super::pools::CodePools;
use super::precedence::Precedence;
use super::registry::GeneratorRegistry;

/// What a generator returns: statement text, or expression text with its
/// binding strength.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Raw statement text, carrying its own terminators.
    Statement(String),
    /// Expression text and how tightly it binds.
    Expression {
        code: String,
        precedence: Precedence,
    },
}

impl Fragment {
    pub fn statement(code: impl Into<String>) -> Self {
        Fragment::Statement(code.into())
    }

    pub fn expression(code: impl Into<String>, precedence: Precedence) -> Self {
        Fragment::Expression {
            code: code.into(),
            precedence,
        }
    }
}

/// Generation context for one pass: registry lookups, child resolution and
/// pool registration.
pub struct Emitter<'a> {
    registry: &'a GeneratorRegistry,
    pools: CodePools,
}

impl<'a> Emitter<'a> {
    /// A fresh emitter with empty pools.
    pub fn new(registry: &'a GeneratorRegistry) -> Self {
        Self {
            registry,
            pools: CodePools::new(),
        }
    }

    /// The pools accumulated so far. Read-only; generators register through
    /// the `add_*` methods.
    pub fn pools(&self) -> &CodePools {
        &self.pools
    }

    /// Resolve a statement block and every block chained after it via `next`,
    /// in source order.
    ///
    /// A block with no registered generator becomes a visible placeholder
    /// comment rather than an error, so partial programs stay inspectable.
    pub fn statement_to_code(&mut self, block: &Block) -> Result<String> {
        let registry = self.registry;
        let mut code = match registry.lookup(block.opcode()) {
            Ok(generator) => match generator.emit(block, self)? {
                Fragment::Statement(text) => text,
                Fragment::Expression { .. } => {
                    return Err(GenError::ExpectedStatement {
                        opcode: block.opcode().to_string(),
                    })
                }
            },
            Err(GenError::UnknownBlockType(opcode)) => {
                warn!(%opcode, "no generator for statement block, emitting placeholder");
                format!("// unknown block type: {opcode}\n")
            }
            Err(other) => return Err(other),
        };

        if !code.is_empty() && !code.ends_with('\n') {
            code.push('\n');
        }

        if let Some(next) = block.next() {
            code.push_str(&self.statement_to_code(next)?);
        }

        Ok(code)
    }

    /// Resolve the expression connected to one of `block`'s input slots.
    ///
    /// An unconnected slot yields `default`, the generator's own sensible
    /// fallback (`"0"`, `"LOW"`, ...). The result is parenthesized when the
    /// child expression binds looser than `required`, so callers can splice
    /// the returned text directly into their template.
    pub fn value_to_code(
        &mut self,
        block: &Block,
        slot: &str,
        required: Precedence,
        default: &str,
    ) -> Result<String> {
        let Some(child) = block.input_block(slot)? else {
            return Ok(default.to_string());
        };

        let registry = self.registry;
        match registry.lookup(child.opcode()) {
            Ok(generator) => match generator.emit(child, self)? {
                Fragment::Expression { code, precedence } => {
                    if precedence.needs_parens(required) {
                        Ok(format!("({code})"))
                    } else {
                        Ok(code)
                    }
                }
                Fragment::Statement(_) => Err(GenError::ExpectedExpression {
                    opcode: child.opcode().to_string(),
                }),
            },
            Err(GenError::UnknownBlockType(opcode)) => {
                warn!(%opcode, slot, "no generator for value block, using slot default");
                Ok(format!("{default} /* unknown block type: {opcode} */"))
            }
            Err(other) => Err(other),
        }
    }

    /// Register an `#include` line, deduplicated by key.
    pub fn add_include(&mut self, key: &str, text: &str) {
        self.pools.includes.set(key, text);
    }

    /// Register a global definition, deduplicated by key.
    pub fn add_definition(&mut self, key: &str, text: &str) {
        self.pools.definitions.set(key, text);
    }

    /// Register a helper function body, deduplicated by key.
    pub fn add_function(&mut self, key: &str, text: &str) {
        self.pools.functions.set(key, text);
    }

    /// Register a one-time `setup()` statement, deduplicated by key.
    pub fn add_setup(&mut self, key: &str, text: &str) {
        self.pools.setups.set(key, text);
    }
}
