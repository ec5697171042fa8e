//! Note picker block: a MIDI note number chosen on a piano widget.

use robopro_codegen::{Block, Emitter, Fragment, GeneratorRegistry, Precedence, Result};

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register("note", note);
}

/// Numeric value. Anything that does not parse as a number becomes `0`.
fn note(block: &Block, _ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let raw = block.field_value("NOTE")?;
    let code = if raw.trim().parse::<f64>().is_ok() {
        raw.trim().to_string()
    } else {
        "0".to_string()
    };
    Ok(Fragment::expression(code, Precedence::Atomic))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(value: &str) -> String {
        let mut registry = GeneratorRegistry::new();
        register(&mut registry);
        let holder = Block::new("holder")
            .with_input("NOTE", Block::new("note").with_field("NOTE", value));
        let mut emitter = Emitter::new(&registry);
        emitter
            .value_to_code(&holder, "NOTE", Precedence::None, "0")
            .unwrap()
    }

    #[test]
    fn numeric_note_passes_through() {
        assert_eq!(emit("60"), "60");
        assert_eq!(emit("61.5"), "61.5");
    }

    #[test]
    fn non_numeric_note_becomes_zero() {
        assert_eq!(emit("C4"), "0");
        assert_eq!(emit(""), "0");
    }
}
