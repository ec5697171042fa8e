//! RoboPro Code Generator Library
//!
//! Turns visual block programs from the RoboPro block editor into complete
//! Arduino sketch source text. The editor hands us a block tree; each block
//! type has a registered generator that emits a source fragment, and the
//! emitter assembles the fragments plus any shared declarations into a
//! `setup()`/`loop()` sketch.

pub mod block;
pub mod generator;

// Re-exports for the common path: build a registry, hand it a program.
pub use block::{Block, Program};
pub use generator::{
    generate_sketch, Emitter, Fragment, GenError, Generator, GeneratorRegistry, Precedence,
    Result,
};
