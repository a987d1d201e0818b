//! Input label classification.
//!
//! Labels come from the startup pin table and are parsed once, when the
//! pin is bound. After that every line carries its parsed label by value.
//!
//! | Label            | Meaning                                   |
//! |------------------|-------------------------------------------|
//! | `B<degrees>`     | bearing selector position                 |
//! | `SEG_<x>[_...]`  | segment bus line, `x` in `A`..`G` or `DP` |
//! | `DIGIT_<n>_PIN`  | digit enable output, `n` in 1..=2         |

use core::fmt;

use crate::config::{BEARING_PREFIX, DIGIT_PREFIX, SEGMENT_PREFIX};
use crate::error::Error;
use crate::seg7::{DigitSelect, Segment};

/// Parsed input label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputLabel {
    /// Bearing selector position, degrees.
    Bearing(u16),
    Segment(Segment),
    DigitEnable(DigitSelect),
}

/// What an edge on a line of this label leads to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputClass {
    /// Updates the bearing directly.
    Bearing,
    /// Triggers a full multiplexed distance read.
    Segment,
    /// Output line; never monitored.
    DigitSelect,
}

impl InputLabel {
    pub fn parse(label: &str) -> Result<Self, Error> {
        if let Some(rest) = label.strip_prefix(SEGMENT_PREFIX) {
            // Anything after the segment name is free-form (`SEG_A_PIN_7`).
            let name = rest.split('_').next().unwrap_or("");
            return Segment::from_name(name)
                .map(InputLabel::Segment)
                .ok_or(Error::UnknownLabel);
        }

        if let Some(rest) = label.strip_prefix(DIGIT_PREFIX) {
            return rest
                .strip_suffix("_PIN")
                .and_then(|n| n.parse::<u8>().ok())
                .and_then(DigitSelect::from_number)
                .map(InputLabel::DigitEnable)
                .ok_or(Error::UnknownLabel);
        }

        if let Some(degrees) = label.strip_prefix(BEARING_PREFIX) {
            return degrees
                .parse::<u16>()
                .map(InputLabel::Bearing)
                .map_err(|_| Error::InvalidBearing);
        }

        Err(Error::UnknownLabel)
    }

    pub const fn class(self) -> InputClass {
        match self {
            InputLabel::Bearing(_) => InputClass::Bearing,
            InputLabel::Segment(_) => InputClass::Segment,
            InputLabel::DigitEnable(_) => InputClass::DigitSelect,
        }
    }

    /// Bearing and segment lines are watched for edges.
    pub const fn is_monitored(self) -> bool {
        !matches!(self.class(), InputClass::DigitSelect)
    }
}

impl fmt::Display for InputLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputLabel::Bearing(degrees) => write!(f, "{}{}", BEARING_PREFIX, degrees),
            InputLabel::Segment(segment) => write!(f, "{}{}", SEGMENT_PREFIX, segment),
            InputLabel::DigitEnable(select) => write!(f, "{}{}_PIN", DIGIT_PREFIX, select),
        }
    }
}
