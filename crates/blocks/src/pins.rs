//! # Pin Blocks
//!
//! Bare Arduino pin access: digital and analog reads and writes, pin mode
//! configuration, PWM, and hobby servo output. The servo block is the one
//! that needs shared declarations, registered per pin so two servos on
//! different pins each get their own instance.

use robopro_codegen::{Block, Emitter, Fragment, GeneratorRegistry, Precedence, Result};

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register("pin_setPinMode", set_pin_mode);
    registry.register("pin_setDigitalOutput", set_digital_output);
    registry.register("pin_setPwmOutput", set_pwm_output);
    registry.register("pin_readDigitalPin", read_digital_pin);
    registry.register("pin_readAnalogPin", read_analog_pin);
    registry.register("pin_setServoOutput", set_servo_output);
    registry.register("pin_menu_level", menu_level);
}

fn set_pin_mode(block: &Block, _ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let pin = block.field_or("PIN", "0")?;
    let mode = block.field_or("MODE", "INPUT")?;
    Ok(Fragment::statement(format!("pinMode({pin}, {mode});\n")))
}

fn set_digital_output(block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let pin = block.field_or("PIN", "0")?;
    let level = ctx.value_to_code(block, "LEVEL", Precedence::UnaryPostfix, "LOW")?;
    Ok(Fragment::statement(format!(
        "digitalWrite({pin}, {level});\n"
    )))
}

fn set_pwm_output(block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let pin = block.field_or("PIN", "0")?;
    let out = ctx.value_to_code(block, "OUT", Precedence::UnaryPostfix, "0")?;
    Ok(Fragment::statement(format!("analogWrite({pin}, {out});\n")))
}

fn read_digital_pin(block: &Block, _ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let pin = block.field_or("PIN", "0")?;
    Ok(Fragment::expression(
        format!("digitalRead({pin})"),
        Precedence::Atomic,
    ))
}

fn read_analog_pin(block: &Block, _ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let pin = block.field_or("PIN", "A1")?;
    Ok(Fragment::expression(
        format!("analogRead({pin})"),
        Precedence::Atomic,
    ))
}

/// Servo write. Registers the Servo library, a per-pin servo instance and
/// its one-time attach, then emits the write itself.
fn set_servo_output(block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let pin = block.field_or("PIN", "A1")?;
    let out = ctx.value_to_code(block, "OUT", Precedence::UnaryPostfix, "0")?;

    ctx.add_include("include_servo", "#include <Servo.h>");
    ctx.add_definition(
        &format!("definitions_servo{pin}"),
        &format!("Servo servo_{pin};"),
    );
    ctx.add_setup(
        &format!("setups_servo{pin}"),
        &format!("servo_{pin}.attach({pin});"),
    );

    Ok(Fragment::statement(format!("servo_{pin}.write({out});\n")))
}

fn menu_level(block: &Block, _ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let level = block.field_or("level", "LOW")?;
    Ok(Fragment::expression(level, Precedence::Atomic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use robopro_codegen::{generate_sketch, Program};

    fn sketch_of(block: Block) -> String {
        let mut registry = GeneratorRegistry::new();
        register(&mut registry);
        generate_sketch(&Program::new("test").with_script(block), &registry).unwrap()
    }

    #[test]
    fn digital_output_defaults_to_low() {
        let block = Block::new("pin_setDigitalOutput")
            .with_field("PIN", "13")
            .with_declared_input("LEVEL");
        assert!(sketch_of(block).contains("digitalWrite(13, LOW);"));
    }

    #[test]
    fn digital_output_takes_level_from_menu() {
        let block = Block::new("pin_setDigitalOutput")
            .with_field("PIN", "13")
            .with_input("LEVEL", Block::new("pin_menu_level").with_field("level", "HIGH"));
        assert!(sketch_of(block).contains("digitalWrite(13, HIGH);"));
    }

    #[test]
    fn servo_block_registers_shared_declarations_once() {
        let second = Block::new("pin_setServoOutput")
            .with_field("PIN", "9")
            .with_declared_input("OUT");
        let first = Block::new("pin_setServoOutput")
            .with_field("PIN", "9")
            .with_declared_input("OUT")
            .with_next(second);

        let sketch = sketch_of(first);
        assert_eq!(sketch.matches("#include <Servo.h>").count(), 1);
        assert_eq!(sketch.matches("Servo servo_9;").count(), 1);
        assert_eq!(sketch.matches("servo_9.attach(9);").count(), 1);
        assert_eq!(sketch.matches("servo_9.write(0);").count(), 2);
    }

    #[test]
    fn two_servos_get_separate_instances() {
        let second = Block::new("pin_setServoOutput")
            .with_field("PIN", "10")
            .with_declared_input("OUT");
        let first = Block::new("pin_setServoOutput")
            .with_field("PIN", "9")
            .with_declared_input("OUT")
            .with_next(second);

        let sketch = sketch_of(first);
        assert!(sketch.contains("Servo servo_9;"));
        assert!(sketch.contains("Servo servo_10;"));
        assert_eq!(sketch.matches("#include <Servo.h>").count(), 1);
    }

    #[test]
    fn empty_pin_field_falls_back() {
        let block = Block::new("pin_setPinMode")
            .with_declared_field("PIN")
            .with_declared_field("MODE");
        assert!(sketch_of(block).contains("pinMode(0, INPUT);"));
    }
}
