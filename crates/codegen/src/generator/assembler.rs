//! # Sketch Assembler
//!
//! Merges the auxiliary pools and the generated statement body into one
//! Arduino sketch.
//!
//! Section order is a hard contract: includes must precede any code that
//! references them, definitions must precede the helper functions that use
//! them, and `setup()` runs exactly once before `loop()` starts repeating on
//! the device. No pool is ever split across sections.

use super::pools::CodePools;

const HEADER: &str = "// Auto-generated Arduino sketch from RoboPro blocks.\n\
                      // DO NOT EDIT - changes will be overwritten.\n";

/// Statement indent inside `setup()` and `loop()`.
const INDENT: &str = "  ";

/// Assemble the final sketch text from one pass's pools and statement body.
pub fn assemble(pools: &CodePools, body: &str) -> String {
    let mut sketch = String::from(HEADER);
    sketch.push('\n');

    if !pools.includes.is_empty() {
        for text in pools.includes.texts() {
            sketch.push_str(text.trim_end());
            sketch.push('\n');
        }
        sketch.push('\n');
    }

    if !pools.definitions.is_empty() {
        for text in pools.definitions.texts() {
            sketch.push_str(text.trim_end());
            sketch.push('\n');
        }
        sketch.push('\n');
    }

    if !pools.functions.is_empty() {
        for text in pools.functions.texts() {
            sketch.push_str(text.trim_end());
            sketch.push_str("\n\n");
        }
    }

    sketch.push_str("void setup() {\n");
    for text in pools.setups.texts() {
        sketch.push_str(&indent_block(text));
    }
    sketch.push_str("}\n\n");

    sketch.push_str("void loop() {\n");
    sketch.push_str(&indent_block(body));
    sketch.push_str("}\n");

    sketch
}

/// Indent every non-empty line of a multi-line chunk by one level.
fn indent_block(text: &str) -> String {
    let mut indented = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            indented.push('\n');
        } else {
            indented.push_str(INDENT);
            indented.push_str(line.trim_start());
            indented.push('\n');
        }
    }
    indented
}
