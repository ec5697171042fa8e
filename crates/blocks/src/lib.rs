//! RoboPro Block Library
//!
//! One generator function per block type, grouped by device family. Each
//! module exposes a `register` function that installs its generators into a
//! [`GeneratorRegistry`]; [`standard_registry`] installs everything.
//!
//! Generators are deliberately thin string templates. Anything structural
//! (child resolution, precedence wrapping, pool dedup, assembly) lives in
//! `robopro_codegen`.

use robopro_codegen::GeneratorRegistry;

pub mod note;
pub mod pins;
pub mod robo_pro_bot;
pub mod robo_pro_station;

/// Registry with every block generator this library ships.
pub fn standard_registry() -> GeneratorRegistry {
    let mut registry = GeneratorRegistry::new();
    pins::register(&mut registry);
    note::register(&mut registry);
    robo_pro_bot::register(&mut registry);
    robo_pro_station::register(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_covers_all_families() {
        let registry = standard_registry();
        assert!(registry.contains("pin_setDigitalOutput"));
        assert!(registry.contains("note"));
        assert!(registry.contains("arduino_roboProBot_readSensor"));
        assert!(registry.contains("arduino_roboProStation_ledPixelTurn"));
    }
}
