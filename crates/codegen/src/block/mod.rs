//! # Block Tree Model
//!
//! The data the external block editor hands to the generator.
//!
//! A [`Block`] is one node of the visual program: a block-type identifier
//! (opcode), literal field values chosen via UI widgets, named input slots
//! that may have another block connected, and an optional `next` link to the
//! following statement block. Blocks form owned trees; the generator only
//! reads them.
//!
//! The distinction between *undeclared* and *declared-but-empty* matters for
//! error reporting: asking for a field or slot the block shape never declared
//! is a structural bug in a generator, while a declared field left blank or a
//! declared slot left unconnected is a normal editing state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::generator::{GenError, Result};

/// One node of the visual program tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Block-type identifier, e.g. `"pin_setDigitalOutput"`.
    pub opcode: String,

    /// Declared literal fields. A declared field may hold the empty string
    /// when the user has not picked a value yet.
    #[serde(default)]
    pub fields: HashMap<String, String>,

    /// Declared input slots. `None` means declared but unconnected.
    #[serde(default)]
    pub inputs: HashMap<String, Option<Box<Block>>>,

    /// The next statement block in this stack, if any.
    #[serde(default)]
    pub next: Option<Box<Block>>,
}

/// A whole visual program: one statement stack per top-level script.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub name: String,

    /// Top-level statement stacks, in editor order. Their generated bodies
    /// are concatenated in this order.
    #[serde(default)]
    pub scripts: Vec<Block>,
}

impl Block {
    pub fn new(opcode: &str) -> Self {
        Self {
            opcode: opcode.to_string(),
            fields: HashMap::new(),
            inputs: HashMap::new(),
            next: None,
        }
    }

    pub fn opcode(&self) -> &str {
        &self.opcode
    }

    /// Literal value of a declared field.
    ///
    /// Fails with [`GenError::NoSuchField`] if the field was never declared
    /// on this block shape. A declared-but-empty field returns `""`.
    pub fn field_value(&self, name: &str) -> Result<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| GenError::NoSuchField {
                opcode: self.opcode.clone(),
                field: name.to_string(),
            })
    }

    /// Field value with a fallback for the declared-but-empty case.
    ///
    /// Mirrors the editor-side `getFieldValue('PIN') || '0'` idiom.
    pub fn field_or(&self, name: &str, default: &str) -> Result<String> {
        let value = self.field_value(name)?;
        if value.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(value.to_string())
        }
    }

    /// The block connected to a declared input slot, or `None` if the slot
    /// is unconnected.
    ///
    /// Fails with [`GenError::MissingSlot`] if the slot was never declared
    /// on this block shape.
    pub fn input_block(&self, slot: &str) -> Result<Option<&Block>> {
        self.inputs
            .get(slot)
            .map(|connected| connected.as_deref())
            .ok_or_else(|| GenError::MissingSlot {
                opcode: self.opcode.clone(),
                slot: slot.to_string(),
            })
    }

    pub fn next(&self) -> Option<&Block> {
        self.next.as_deref()
    }

    pub fn set_field(&mut self, name: &str, value: &str) {
        self.fields.insert(name.to_string(), value.to_string());
    }

    /// Declare a field without a chosen value.
    pub fn declare_field(&mut self, name: &str) {
        self.fields.insert(name.to_string(), String::new());
    }

    pub fn connect_input(&mut self, slot: &str, child: Block) {
        self.inputs.insert(slot.to_string(), Some(Box::new(child)));
    }

    /// Declare an input slot without connecting anything to it.
    pub fn declare_input(&mut self, slot: &str) {
        self.inputs.insert(slot.to_string(), None);
    }

    pub fn set_next(&mut self, next: Block) {
        self.next = Some(Box::new(next));
    }

    // Chainable variants, mainly for building test programs.

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.set_field(name, value);
        self
    }

    pub fn with_declared_field(mut self, name: &str) -> Self {
        self.declare_field(name);
        self
    }

    pub fn with_input(mut self, slot: &str, child: Block) -> Self {
        self.connect_input(slot, child);
        self
    }

    pub fn with_declared_input(mut self, slot: &str) -> Self {
        self.declare_input(slot);
        self
    }

    pub fn with_next(mut self, next: Block) -> Self {
        self.set_next(next);
        self
    }
}

impl Program {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scripts: Vec::new(),
        }
    }

    pub fn add_script(&mut self, script: Block) {
        self.scripts.push(script);
    }

    pub fn with_script(mut self, script: Block) -> Self {
        self.add_script(script);
        self
    }
}
