//! # The RoboPro Sketch Generator
//!
//! This module transforms visual block trees into Arduino sketch source.
//!
//! ## Generation Pipeline
//!
//! 1. **Registry lookup**: each block opcode maps to a [`Generator`]
//! 2. **Tree walk**: the [`Emitter`] resolves statements and input slots
//!    depth-first, children before parents
//! 3. **Pool accumulation**: generators register shared includes, globals,
//!    one-time setup statements and helper functions, deduplicated by key
//! 4. **Assembly**: pools and the statement body are merged into a complete
//!    `setup()`/`loop()` sketch
//!
//! ## Fragment Shapes
//!
//! - **Statement**: raw text carrying its own terminators, chained via the
//!   block's `next` link
//! - **Expression**: text plus a [`Precedence`] level, parenthesized by the
//!   consumer when it binds looser than the slot requires
//!
//! Pools are write-only during the walk and read-only during assembly; a
//! fresh [`Emitter`] per request keeps concurrent passes isolated.

use tracing::debug;

use crate::block::Program;

pub mod assembler;
pub mod emitter;
pub mod error;
pub mod pools;
pub mod precedence;
pub mod registry;


pub use emitter::{Emitter, Fragment};
pub use error::{GenError, Result};
pub use pools::{CodePools, Pool};
pub use precedence::Precedence;
pub use registry::{Generator, GeneratorRegistry};

/// Run one complete generation pass over a program.
///
/// Every call starts from fresh pools, so generating the same program twice
/// yields byte-identical output. Recoverable conditions (blocks with no
/// registered generator) produce placeholder text; structural errors in a
/// generator or block shape abort the pass.
pub fn generate_sketch(program: &Program, registry: &GeneratorRegistry) -> Result<String> {
    debug!(
        program = %program.name,
        scripts = program.scripts.len(),
        "starting generation pass"
    );

    let mut emitter = Emitter::new(registry);

    let mut body = String::new();
    for script in &program.scripts {
        body.push_str(&emitter.statement_to_code(script)?);
    }
    debug!(bytes = body.len(), "statement body generated");

    let sketch = assembler::assemble(emitter.pools(), &body);
    debug!(bytes = sketch.len(), "sketch assembled");
    Ok(sketch)
}
