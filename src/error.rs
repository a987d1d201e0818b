//! Unified error type for segscope.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.
//!
//! Only input binding can fail. Segment patterns that match no digit are
//! never an error; they decode to the invalid-digit sentinel instead.

use core::fmt;

/// Top-level error type used across the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Labels
    /// Label matches none of the recognised groups (`B<deg>`, `SEG_<x>`, `DIGIT_<n>_PIN`).
    UnknownLabel,

    /// `B` label whose suffix is not a decimal degree value.
    InvalidBearing,

    /// The same segment line or digit enable was configured twice.
    DuplicateLabel,

    // Pins
    /// Pin number does not exist on this chip.
    PinUnavailable(u8),

    /// Pin number is already bound to another label.
    PinInUse(u8),

    /// More inputs configured than the monitor can track.
    TooManyInputs,

    /// HAL refused to configure the pin.
    Gpio,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownLabel => f.write_str("unknown label"),
            Error::InvalidBearing => f.write_str("invalid bearing"),
            Error::DuplicateLabel => f.write_str("duplicate label"),
            Error::PinUnavailable(pin) => write!(f, "pin {} unavailable", pin),
            Error::PinInUse(pin) => write!(f, "pin {} already in use", pin),
            Error::TooManyInputs => f.write_str("too many inputs"),
            Error::Gpio => f.write_str("gpio configuration failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_pin_number() {
        assert_eq!(format!("{}", Error::PinUnavailable(52)), "pin 52 unavailable");
        assert_eq!(format!("{}", Error::PinInUse(13)), "pin 13 already in use");
    }

    #[test]
    fn errors_are_copy_and_comparable() {
        let e = Error::InvalidBearing;
        let copy = e;
        assert_eq!(e, copy);
        assert_ne!(Error::Gpio, Error::UnknownLabel);
    }
}
