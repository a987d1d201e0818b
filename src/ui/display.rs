//! SSD1306 OLED display wrapper.

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use heapless::String;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use segscope::status::Maybe;
use segscope::tracker::{Direction, TrackedState};

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    let _ = display.init();
    display.clear_buffer();
    let _ = display.flush();
    display
}

fn text_style() -> embedded_graphics::mono_font::MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Render the start-up screen shown until the first event.
pub fn draw_waiting<I2C>(display: &mut Display<I2C>)
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();

    let _ = Text::new("segscope", Point::new(0, 10), text_style()).draw(display);
    let _ = Text::new("Waiting for input", Point::new(0, 30), text_style()).draw(display);

    let _ = display.flush();
}

/// Render bearing, signed distance and proximity.
pub fn draw_status<I2C>(display: &mut Display<I2C>, state: &TrackedState)
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();

    let mut line: String<24> = String::new();

    let _ = write!(line, "BRG  {}", Maybe(state.bearing));
    let _ = Text::new(line.as_str(), Point::new(0, 10), text_style()).draw(display);

    line.clear();
    let _ = write!(line, "DIST {} m", Maybe(state.distance));
    let _ = Text::new(line.as_str(), Point::new(0, 24), text_style()).draw(display);

    line.clear();
    let _ = write!(line, "PROX {} m", Maybe(state.proximity));
    let _ = Text::new(line.as_str(), Point::new(0, 38), text_style()).draw(display);

    let footer = if state.degraded {
        "BAD READ"
    } else {
        match state.direction() {
            Direction::Approaching => "APPROACHING",
            Direction::Receding => "RECEDING",
            Direction::Unknown => "",
        }
    };
    let _ = Text::new(footer, Point::new(0, 52), text_style()).draw(display);

    let _ = display.flush();
}
