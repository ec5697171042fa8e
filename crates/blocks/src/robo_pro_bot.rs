//! # RoboPro Bot Blocks
//!
//! The two-wheeled robot kit. Only its sensor read is generated here; the
//! motor blocks run on the firmware side and never reach the sketch
//! generator.

use robopro_codegen::{Block, Emitter, Fragment, GeneratorRegistry, Precedence, Result};

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register("arduino_roboProBot_readSensor", read_sensor);
}

fn read_sensor(block: &Block, _ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let pin = block.field_or("PIN", "A1")?;
    Ok(Fragment::expression(
        format!("analogRead({pin})"),
        Precedence::Atomic,
    ))
}
