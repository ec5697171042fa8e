//! # RoboPro Station Blocks
//!
//! The stationary experiment kit: an addressable LED strip, three single
//! color LEDs, a buzzer, five buttons, analog sensors with a ds18b20
//! thermometer, and a four-digit seven-segment display.
//!
//! Most generators here request shared declarations for their peripheral
//! before emitting their own statement; the pool keys are per peripheral so
//! any number of blocks for the same hardware produce one declaration set.

use robopro_codegen::{Block, Emitter, Fragment, GeneratorRegistry, Precedence, Result};

/// Fixed wiring of the station board.
pub const BUZZER_PIN: u8 = 3;
pub const GREEN_LED_PIN: u8 = 5;
pub const YELLOW_LED_PIN: u8 = 6;
pub const RED_LED_PIN: u8 = 7;

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register("arduino_roboProStation_ledPixelTurn", led_pixel_turn);
    registry.register("arduino_roboProStation_ledTurn", led_turn);
    registry.register("arduino_roboProStation_colorLedTurn", color_led_turn);
    registry.register("arduino_roboProStation_playNoteForBeats", play_note_for_beats);
    registry.register("arduino_roboProStation_readSensor", read_sensor);
    registry.register("arduino_roboProStation_readButton", read_button);
    registry.register("arduino_roboProStation_readAnalogSensor", read_analog_sensor);
    registry.register("arduino_roboProStation_readDigitalPin", read_digital_pin);
    registry.register("arduino_roboProStation_setDigitalOutput", set_digital_output);
    registry.register("arduino_roboProStation_setPwmOutput", set_pwm_output);
    registry.register(
        "arduino_roboProStation_setIndicatorBrightness",
        set_indicator_brightness,
    );
    registry.register(
        "arduino_roboProStation_setIndicatorDigitValue",
        set_indicator_digit_value,
    );
    registry.register(
        "arduino_roboProStation_turnIndicatorSeparator",
        turn_indicator_separator,
    );
    registry.register("arduino_roboProStation_turnIndicator", turn_indicator);
    registry.register("arduino_roboProStation_setIndicatorValue", set_indicator_value);
    registry.register("arduino_roboProStation_menu_level", menu_level);
    registry.register("arduino_roboProStation_menu_leds", menu_leds);
    registry.register("arduino_roboProStation_menu_colorLeds", menu_color_leds);
    registry.register(
        "arduino_roboProStation_menu_indicatorDigits",
        menu_indicator_digits,
    );
    registry.register(
        "arduino_roboProStation_menu_indicatorValues",
        menu_indicator_values,
    );
}

// =============================================================================
// LED strip
// =============================================================================

fn led_pixel_turn(block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment> {
    setup_led_strip(ctx);
    let index = ctx.value_to_code(block, "LED_INDEX", Precedence::UnaryPostfix, "0")?;
    let mut color = ctx.value_to_code(block, "COLOR", Precedence::UnaryPostfix, "#000")?;
    let state = block.field_or("VALUE", "off")?;

    let mut code = if state == "off" {
        color = "#000".to_string();
        format!("// Turn off LED #{index}\n")
    } else {
        format!("// Turn on LED #{index}, color: {color}\n")
    };
    let color = adjust_color(&color);
    code.push_str(&format!(
        "leds[(uint16_t){index}] = strtol(\"{color}\", NULL, 0);\n"
    ));
    code.push_str("FastLED.show();\n");
    Ok(Fragment::statement(code))
}

fn led_turn(block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment> {
    setup_led_strip(ctx);
    let mut color = ctx.value_to_code(block, "COLOR", Precedence::UnaryPostfix, "#000")?;
    let state = block.field_or("VALUE", "off")?;

    let mut code = if state == "off" {
        color = "#000".to_string();
        "// Turn off the whole LED strip\n".to_string()
    } else {
        format!("// Turn on the whole LED strip, color: {color}\n")
    };
    let color = adjust_color(&color);
    code.push_str(&format!(
        "fill_solid(leds, LED_STRIP_NUM_LEDS, strtol(\"{color}\", NULL, 0));\n"
    ));
    code.push_str("FastLED.show();\n");
    Ok(Fragment::statement(code))
}

fn color_led_turn(block: &Block, _ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let pin = block.field_or("LED_PIN", &RED_LED_PIN.to_string())?;
    let state = block.field_or("VALUE", "off")?;

    let code = if state == "off" {
        format!("// Turn off color LED on pin {pin}\ndigitalWrite({pin}, LOW);\n")
    } else {
        format!("// Turn on color LED on pin {pin}\ndigitalWrite({pin}, HIGH);\n")
    };
    Ok(Fragment::statement(code))
}

// =============================================================================
// Buzzer
// =============================================================================

fn play_note_for_beats(block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let note = ctx.value_to_code(block, "NOTE", Precedence::UnaryPostfix, "0")?;
    let beats = ctx.value_to_code(block, "BEATS", Precedence::UnaryPostfix, "1")?;

    let mut code = format!("// Play note {note} for {beats} beats\n");
    code.push_str(&format!("int buzzerPin = {BUZZER_PIN};\n"));
    code.push_str(&format!(
        "int frequency = max(0, (int)(440.0 * pow(2.0, ({note} - 69.0) / 12.0)));\n"
    ));
    code.push_str("tone(buzzerPin, frequency);\n");
    code.push_str(&format!("delay({beats} * 1000);\n"));
    code.push_str("noTone(buzzerPin);\n");
    Ok(Fragment::statement(code))
}

// =============================================================================
// Sensors and buttons
// =============================================================================

fn read_sensor(block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment> {
    setup_sensor_pins(ctx);
    let pin = block.field_or("PIN", "A1")?;
    // A0 carries the ds18b20; everything else is a plain analog sensor
    // mapped to a 0-100 range.
    let code = if pin == "A0" {
        "_readTemperature()".to_string()
    } else {
        format!("_mapSensorValue({pin}, analogRead({pin}))")
    };
    Ok(Fragment::expression(code, Precedence::Atomic))
}

fn read_button(block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment> {
    setup_digital_input_pins(ctx);
    let pin = block.field_or("PIN", "0")?;
    Ok(Fragment::expression(
        format!("digitalRead({pin})"),
        Precedence::Atomic,
    ))
}

fn read_analog_sensor(block: &Block, _ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let pin = block.field_or("PIN", "A1")?;
    Ok(Fragment::expression(
        format!("analogRead({pin})"),
        Precedence::Atomic,
    ))
}

fn read_digital_pin(block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment> {
    setup_digital_input_pins(ctx);
    let pin = block.field_or("PIN", "0")?;
    Ok(Fragment::expression(
        format!("digitalRead({pin})"),
        Precedence::Atomic,
    ))
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

// =============================================================================
// Seven-segment indicator
// =============================================================================

fn set_indicator_brightness(block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment> {
    setup_indicator(ctx);
    let value = block.field_or("VALUE", "3")?;
    Ok(Fragment::statement(format!(
        "display.brightness({value});\n"
    )))
}

fn set_indicator_digit_value(block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment> {
    setup_indicator(ctx);
    let digit = ctx.value_to_code(block, "DIGIT", Precedence::UnaryPostfix, "0")?;
    let value = ctx.value_to_code(block, "VALUE", Precedence::UnaryPostfix, "")?;

    let mut code = format!("display.setCursor({digit});\n");
    code.push_str(&format!(
        "display.print(\"{}\");\n",
        value.replace('°', "*")
    ));
    code.push_str("display.update();\n");
    Ok(Fragment::statement(code))
}

fn turn_indicator_separator(block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment> {
    setup_indicator(ctx);
    let state = block.field_or("VALUE", "on")?;
    Ok(Fragment::statement(format!(
        "display.colon({});\ndisplay.update();\n",
        state == "on"
    )))
}

fn turn_indicator(block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment> {
    setup_indicator(ctx);
    let state = block.field_or("VALUE", "on")?;
    Ok(Fragment::statement(format!(
        "display.power({});\ndisplay.update();\n",
        state == "on"
    )))
}

fn set_indicator_value(block: &Block, ctx: &mut Emitter<'_>) -> Result<Fragment> {
    setup_indicator(ctx);
    let value = ctx.value_to_code(block, "VALUE", Precedence::UnaryPostfix, "\"\"")?;
    Ok(Fragment::statement(format!(
        "display.print({});\ndisplay.update();\n",
        value.replace('°', "*")
    )))
}

// =============================================================================
// Dropdown menus
// =============================================================================

fn menu_level(block: &Block, _ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let level = block.field_or("level", "LOW")?;
    Ok(Fragment::expression(level, Precedence::Atomic))
}

fn menu_leds(block: &Block, _ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let index = block.field_or("leds", "0")?;
    Ok(Fragment::expression(index, Precedence::Atomic))
}

fn menu_color_leds(block: &Block, _ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let pin = block.field_or("LED_PIN", &RED_LED_PIN.to_string())?;
    Ok(Fragment::expression(pin, Precedence::Atomic))
}

fn menu_indicator_digits(block: &Block, _ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let digit = block.field_or("indicatorDigits", "0")?;
    Ok(Fragment::expression(digit, Precedence::Atomic))
}

fn menu_indicator_values(block: &Block, _ctx: &mut Emitter<'_>) -> Result<Fragment> {
    let value = block.field_or("indicatorValues", "")?;
    Ok(Fragment::expression(value, Precedence::Atomic))
}

// =============================================================================
// Shared peripheral declarations
// =============================================================================

fn setup_led_strip(ctx: &mut Emitter<'_>) {
    ctx.add_include(
        "LED_STRIP",
        "#include <FastLED.h> // Addressable LED strip library",
    );
    ctx.add_definition(
        "LED_STRIP",
        "#define LED_STRIP_NUM_LEDS 16 // Number of LEDs on the strip\n\
         #define LED_STRIP_DATA_PIN 13 // Pin the strip is wired to\n\
         \n\
         CRGB leds[LED_STRIP_NUM_LEDS]; // One slot per LED on the strip",
    );
    ctx.add_setup(
        "LED_STRIP",
        "// Initialize the LED strip\n\
         FastLED.addLeds<NEOPIXEL, LED_STRIP_DATA_PIN>(leds, LED_STRIP_NUM_LEDS);\n\
         FastLED.setBrightness(32); // Strip brightness, 0 to 255",
    );
}

fn setup_sensor_pins(ctx: &mut Emitter<'_>) {
    ctx.add_include(
        "SENSOR_PINS",
        "#include <OneWire.h> // 1-Wire bus library\n\
         #include <DallasTemperature.h> // ds18b20 thermometer library",
    );
    ctx.add_definition(
        "SENSOR_PINS",
        "#define TEMP_SENSOR_PIN A0 // Pin wired to the temperature sensor\n\
         #define SOUND_SENSOR_PIN A3 // Pin wired to the microphone\n\
         #define LIGHT_SENSOR_PIN A4 // Pin wired to the light sensor\n\
         \n\
         OneWire oneWire(TEMP_SENSOR_PIN); // 1-Wire bus on the temperature pin\n\
         DallasTemperature sensors(&oneWire); // ds18b20 driver on that bus",
    );
    ctx.add_setup("SENSOR_PINS", "sensors.begin(); // Start the temperature sensor");
    ctx.add_function(
        "_readTemperature",
        "float _readTemperature() {\n  sensors.requestTemperatures(); // Measuring takes about a second\n  return sensors.getTempCByIndex(0);\n}",
    );
    ctx.add_function(
        "_mapSensorValue",
        "float _mapSensorValue(int pin, int rawValue) {\n  return map(rawValue, 0, 1023, 0, 100);\n}",
    );
}

fn setup_digital_input_pins(ctx: &mut Emitter<'_>) {
    ctx.add_definition(
        "PINS",
        "#define BUTTON_1_PIN 8 // Pin wired to button 1\n\
         #define BUTTON_2_PIN 9 // Pin wired to button 2\n\
         #define BUTTON_3_PIN 10 // Pin wired to button 3\n\
         #define BUTTON_4_PIN 11 // Pin wired to button 4\n\
         #define BUTTON_5_PIN 12 // Pin wired to button 5",
    );
    ctx.add_setup(
        "PINS",
        "// Initialize the button pins\n\
         pinMode(BUTTON_1_PIN, INPUT_PULLUP);\n\
         pinMode(BUTTON_2_PIN, INPUT_PULLUP);\n\
         pinMode(BUTTON_3_PIN, INPUT_PULLUP);\n\
         pinMode(BUTTON_4_PIN, INPUT_PULLUP);\n\
         pinMode(BUTTON_5_PIN, INPUT_PULLUP);",
    );
}

fn setup_indicator(ctx: &mut Emitter<'_>) {
    ctx.add_include(
        "INDICATOR",
        "#include <GyverSegment.h> // Seven-segment display library",
    );
    ctx.add_definition(
        "INDICATOR",
        "#define CLK_PIN 4 // CLK pin\n\
         #define DIO_PIN 2 // DIO pin\n\
         \n\
         Disp1637Colon display(DIO_PIN, CLK_PIN);",
    );
}

/// Normalize an editor color literal (`#rgb` or `#rrggbb`) into the
/// `0xRRGGBB` form `strtol` parses with base auto-detection.
fn adjust_color(color: &str) -> String {
    let digits = color.strip_prefix('#').unwrap_or(color);
    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };
    format!("0x{}", expanded.to_uppercase())
}
