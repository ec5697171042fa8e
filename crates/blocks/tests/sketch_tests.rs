//! End-to-end sketch generation over the standard block library.

use robopro_blocks::standard_registry;
use robopro_codegen::{generate_sketch, Block, Program};

/// A blink program the way the editor would build it: two digital writes
/// chained on the green LED pin.
fn blink_program() -> Program {
    let turn_off = Block::new("arduino_roboProStation_setDigitalOutput")
        .with_field("PIN", "5")
        .with_input(
            "LEVEL",
            Block::new("arduino_roboProStation_menu_level").with_field("level", "LOW"),
        );
    let turn_on = Block::new("arduino_roboProStation_setDigitalOutput")
        .with_field("PIN", "5")
        .with_input(
            "LEVEL",
            Block::new("arduino_roboProStation_menu_level").with_field("level", "HIGH"),
        )
        .with_next(turn_off);

    Program::new("blink").with_script(turn_on)
}

#[test]
fn blink_sketch_has_both_writes_in_order() {
    let registry = standard_registry();
    let sketch = generate_sketch(&blink_program(), &registry).unwrap();

    let high_at = sketch.find("digitalWrite(5, HIGH);").unwrap();
    let low_at = sketch.find("digitalWrite(5, LOW);").unwrap();
    assert!(high_at < low_at);
    assert!(sketch.contains("void setup() {"));
    assert!(sketch.contains("void loop() {"));
}

#[test]
fn generation_is_idempotent() {
    let registry = standard_registry();
    let program = blink_program();

    let first = generate_sketch(&program, &registry).unwrap();
    let second = generate_sketch(&program, &registry).unwrap();
    assert_eq!(first, second);
}

#[test]
fn mixed_peripherals_order_their_sections() {
    let registry = standard_registry();

    let servo = Block::new("pin_setServoOutput")
        .with_field("PIN", "9")
        .with_input("OUT", Block::new("note").with_field("NOTE", "90"));
    let strip = Block::new("arduino_roboProStation_ledTurn")
        .with_field("VALUE", "on")
        .with_input(
            "COLOR",
            Block::new("arduino_roboProStation_menu_indicatorValues")
                .with_field("indicatorValues", "#0f0"),
        )
        .with_next(servo);

    let program = Program::new("mixed").with_script(strip);
    let sketch = generate_sketch(&program, &registry).unwrap();

    // Every include precedes every definition, every definition precedes the
    // helper functions and routines.
    let last_include = sketch.rfind("#include").unwrap();
    let first_definition = sketch.find("#define LED_STRIP_NUM_LEDS").unwrap();
    let setup_at = sketch.find("void setup()").unwrap();
    let loop_at = sketch.find("void loop()").unwrap();

    assert!(last_include < first_definition);
    assert!(first_definition < setup_at);
    assert!(setup_at < loop_at);

    // Both peripherals made it into setup exactly once.
    assert_eq!(sketch.matches("FastLED.addLeds").count(), 1);
    assert_eq!(sketch.matches("servo_9.attach(9);").count(), 1);

    // And the loop body holds both statements in script order.
    let fill_at = sketch.find("fill_solid(").unwrap();
    let write_at = sketch.find("servo_9.write(90);").unwrap();
    assert!(fill_at < write_at);
}

#[test]
fn unknown_blocks_do_not_abort_generation() {
    let registry = standard_registry();

    let known = Block::new("pin_setDigitalOutput")
        .with_field("PIN", "13")
        .with_declared_input("LEVEL");
    let unknown = Block::new("foo_bar").with_next(known);

    let sketch = generate_sketch(&Program::new("partial").with_script(unknown), &registry).unwrap();
    assert!(sketch.contains("// unknown block type: foo_bar"));
    assert!(sketch.contains("digitalWrite(13, LOW);"));
}

#[test]
fn editor_json_program_generates() {
    let json = r#"{
        "name": "thermometer",
        "scripts": [{
            "opcode": "arduino_roboProStation_setIndicatorValue",
            "inputs": {
                "VALUE": {
                    "opcode": "arduino_roboProStation_readSensor",
                    "fields": { "PIN": "A0" }
                }
            }
        }]
    }"#;

    let program: Program = serde_json::from_str(json).unwrap();
    let registry = standard_registry();
    let sketch = generate_sketch(&program, &registry).unwrap();

    assert!(sketch.contains("display.print(_readTemperature());"));
    assert!(sketch.contains("#include <DallasTemperature.h>"));
    assert!(sketch.contains("sensors.begin();"));
    assert!(sketch.contains("Disp1637Colon display(DIO_PIN, CLK_PIN);"));
}
