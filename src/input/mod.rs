//! Input lines - label parsing and pin binding.
//!
//! The firmware and the host tests bind pins through the same
//! [`PinBinder`] seam; only the pin types differ.

pub mod claims;
pub mod label;
pub mod watch;

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::digital::Wait;

use crate::error::Error;

pub use claims::PinClaims;
pub use label::{InputClass, InputLabel};
pub use watch::{EdgeChannel, EdgeWatch};

/// Turns a pin number into a configured HAL pin.
///
/// Range and double-use checks are done by the caller through
/// [`PinClaims`]; implementations only configure the hardware.
///
/// A segment line is bound twice under one claim: once as a level input
/// for the multiplexer and once as an edge source.
pub trait PinBinder {
    type Input: InputPin;
    type Output: OutputPin;
    type Watch: Wait;

    /// Configure `pin` as a level input read by the multiplexer.
    fn bind_input(&mut self, pin: u8) -> Result<Self::Input, Error>;

    /// Configure `pin` as an edge source for a monitored line.
    fn bind_watch(&mut self, pin: u8) -> Result<Self::Watch, Error>;

    /// Configure `pin` as a digit enable output.
    fn bind_output(&mut self, pin: u8) -> Result<Self::Output, Error>;
}
