//! Two-digit multiplexed read of the segment bus.
//!
//! Both digit positions share the eight segment lines. A position is read
//! by driving its enable line high, sampling the bus, and driving it low
//! again before the other position is enabled:
//! ```text
//! DIGIT_1  ‾‾‾‾|____________
//! DIGIT_2  ________|‾‾‾‾|___
//! sample       ^       ^
//!            digit1  digit2   -> digit1 + digit2 * 0.1 m
//! ```
//! The two positions can never be sampled at the same time.

use core::fmt;

use embedded_hal::digital::{InputPin, OutputPin};

use super::decoder::{decode_digit, BusSample, DecodedDigit, Segment};
use crate::error::Error;

/// Which digit position an enable line selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitSelect {
    /// Ones place.
    First,
    /// Tenths place.
    Second,
}

impl DigitSelect {
    pub const fn index(self) -> usize {
        match self {
            DigitSelect::First => 0,
            DigitSelect::Second => 1,
        }
    }

    /// Position number as written in labels (`DIGIT_1_PIN`, `DIGIT_2_PIN`).
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(DigitSelect::First),
            2 => Some(DigitSelect::Second),
            _ => None,
        }
    }
}

impl fmt::Display for DigitSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Both digit positions of one multiplexed read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DistanceReading {
    pub digit1: DecodedDigit,
    pub digit2: DecodedDigit,
    /// Decimal point line as sampled for each position. Not used for the distance.
    pub decimal_points: [bool; 2],
}

impl DistanceReading {
    /// Distance magnitude in meters: `digit1 + digit2 * 0.1`.
    ///
    /// Invalid digits contribute `-1` each, so a bad read produces a
    /// negative or otherwise meaningless value rather than an error.
    pub fn meters(&self) -> f64 {
        f64::from(self.digit1.value()) + f64::from(self.digit2.value()) * 0.1
    }

    /// Either position failed to decode; [`meters`](Self::meters) is contaminated.
    pub fn is_degraded(&self) -> bool {
        !(self.digit1.is_valid() && self.digit2.is_valid())
    }
}

/// Decode a pair of bus samples, first position then second.
pub fn decode_pair(first: BusSample, second: BusSample) -> DistanceReading {
    DistanceReading {
        digit1: decode_digit(first.pattern()),
        digit2: decode_digit(second.pattern()),
        decimal_points: [first.decimal_point(), second.decimal_point()],
    }
}

/// Segment bus inputs plus the two digit enable outputs.
///
/// Every line is optional: a line whose pin failed to bind reads as unlit
/// (inputs) or is skipped (enables).
pub struct DigitMux<I, O> {
    segments: [Option<I>; 8],
    enables: [Option<O>; 2],
}

impl<I, O> Default for DigitMux<I, O>
where
    I: InputPin,
    O: OutputPin,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I, O> DigitMux<I, O>
where
    I: InputPin,
    O: OutputPin,
{
    /// Mux with no lines attached.
    pub fn new() -> Self {
        Self {
            segments: core::array::from_fn(|_| None),
            enables: core::array::from_fn(|_| None),
        }
    }

    /// Attach the input pin for one segment line.
    pub fn attach_segment(&mut self, segment: Segment, pin: I) -> Result<(), Error> {
        let slot = &mut self.segments[segment.index()];
        if slot.is_some() {
            return Err(Error::DuplicateLabel);
        }
        *slot = Some(pin);
        Ok(())
    }

    /// Attach the output pin for one digit enable line. The line is driven
    /// low (inactive) immediately.
    pub fn attach_enable(&mut self, select: DigitSelect, mut pin: O) -> Result<(), Error> {
        let slot = &mut self.enables[select.index()];
        if slot.is_some() {
            return Err(Error::DuplicateLabel);
        }
        pin.set_low().map_err(|_| Error::Gpio)?;
        *slot = Some(pin);
        Ok(())
    }

    pub fn has_segment(&self, segment: Segment) -> bool {
        self.segments[segment.index()].is_some()
    }

    pub fn has_enable(&self, select: DigitSelect) -> bool {
        self.enables[select.index()].is_some()
    }

    /// Current level of one segment line; unbound or unreadable lines are unlit.
    pub fn read_line(&mut self, segment: Segment) -> bool {
        self.segments[segment.index()]
            .as_mut()
            .map_or(false, |pin| pin.is_high().unwrap_or(false))
    }

    /// Sample all eight bus lines once.
    pub fn sample_bus(&mut self) -> BusSample {
        let mut sample = BusSample::default();
        for segment in Segment::ALL {
            sample.set(segment, self.read_line(segment));
        }
        sample
    }

    /// A failed write is logged and otherwise ignored; the position then
    /// reads blank and decodes as invalid.
    fn drive_enable(&mut self, select: DigitSelect, active: bool) {
        if let Some(pin) = self.enables[select.index()].as_mut() {
            let driven = if active { pin.set_high() } else { pin.set_low() };
            if driven.is_err() {
                let level = if active { "high" } else { "low" };
                log_debug!("Failed to drive DIGIT_{} {}", select, level);
            }
        }
    }

    /// Enable one position, sample the bus, disable it again.
    pub fn sample_digit(&mut self, select: DigitSelect) -> BusSample {
        self.drive_enable(select, true);
        let sample = self.sample_bus();
        self.drive_enable(select, false);
        sample
    }

    /// Full multiplexed read: position 1, then position 2. One sample per
    /// position, no retries.
    pub fn decode_distance(&mut self) -> DistanceReading {
        let first = self.sample_digit(DigitSelect::First);
        let second = self.sample_digit(DigitSelect::Second);
        decode_pair(first, second)
    }
}
