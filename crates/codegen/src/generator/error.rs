//! Error taxonomy for the generation pass.
//!
//! Only [`GenError::UnknownBlockType`] is recoverable: the emitter catches it
//! and substitutes placeholder text so a partially-implemented program still
//! generates. Everything else signals a mismatch between a generator and a
//! block shape, or an internal inconsistency, and aborts the pass.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("no generator registered for block type `{0}`")]
    UnknownBlockType(String),

    #[error("block type `{opcode}` has no input slot named `{slot}`")]
    MissingSlot { opcode: String, slot: String },

    #[error("block type `{opcode}` has no field named `{field}`")]
    NoSuchField { opcode: String, field: String },

    #[error("unrecognized precedence level: {0}")]
    UnrecognizedPrecedence(u8),

    #[error("block type `{opcode}` produced an expression where a statement was expected")]
    ExpectedStatement { opcode: String },

    #[error("block type `{opcode}` produced a statement where an expression was expected")]
    ExpectedExpression { opcode: String },
}

pub type Result<T> = std::result::Result<T, GenError>;
