//! # Auxiliary Code Pools
//!
//! Shared declarations accumulated while walking the block tree.
//!
//! Many blocks need the same one-time declaration: every servo block needs
//! `#include <Servo.h>`, every LED-strip block needs the strip definition and
//! its setup call. Each pool is a key→text map so those requests deduplicate:
//! re-registering a key overwrites in place, last write wins. Entries keep
//! insertion order so repeated passes over the same tree produce identical
//! output.

use std::collections::HashMap;

/// One deduplicated key→text mapping with stable insertion order.
#[derive(Debug, Default, Clone)]
pub struct Pool {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An overwritten key keeps its original position.
    pub fn set(&mut self, key: &str, text: &str) {
        match self.index.get(key) {
            Some(&position) => self.entries[position].1 = text.to_string(),
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), text.to_string()));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_str())
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, text)| (key.as_str(), text.as_str()))
    }

    /// Entry texts in insertion order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, text)| text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whole-pool clear; individual entries are never removed.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

/// The four pools a generation pass accumulates into.
#[derive(Debug, Default, Clone)]
pub struct CodePools {
    /// `#include` lines.
    pub includes: Pool,
    /// Global definitions: defines, globals, struct instances.
    pub definitions: Pool,
    /// Reusable helper function bodies.
    pub functions: Pool,
    /// One-time statements for the sketch's `setup()` routine.
    pub setups: Pool,
}

impl CodePools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every pool, called once at the start of a generation pass.
    pub fn reset(&mut self) {
        self.includes.reset();
        self.definitions.reset();
        self.functions.reset();
        self.setups.reset();
    }
}
