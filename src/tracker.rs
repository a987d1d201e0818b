//! Consolidated bearing / distance / proximity state.
//!
//! The display only ever shows a magnitude, so direction of travel is
//! inferred from the trend between consecutive readings and folded into
//! the sign of the reported distance:
//!
//! ```text
//! previous <- current                (signed value carries forward)
//! current  <- raw reading
//! if previous is set:
//!     proximity <- current - previous
//!     current   <- -|current|  if proximity > 0
//!                  +|current|  otherwise (ties included)
//! ```

use crate::seg7::DistanceReading;

/// Everything the device knows, as of the last processed event.
///
/// Distance fields are in meters. All fields start unset and are only
/// ever reset by restarting the firmware.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrackedState {
    /// Last selected bearing (degrees).
    pub bearing: Option<u16>,
    /// Current distance, signed by inferred direction.
    pub distance: Option<f64>,
    /// Distance before the last segment event, with the sign it had then.
    pub previous_distance: Option<f64>,
    /// `distance - previous_distance`, computed before re-signing.
    pub proximity: Option<f64>,
    /// Last multiplexed read contained an undecodable digit.
    pub degraded: bool,
}

/// Direction implied by the sign of the reported distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Approaching,
    Receding,
    /// Fewer than two distance readings so far.
    Unknown,
}

impl TrackedState {
    pub fn direction(&self) -> Direction {
        match (self.proximity, self.distance) {
            (Some(_), Some(d)) if d.is_sign_negative() => Direction::Approaching,
            (Some(_), Some(_)) => Direction::Receding,
            _ => Direction::Unknown,
        }
    }
}

/// `|x|` without relying on `std` float methods.
fn magnitude(x: f64) -> f64 {
    if x.is_sign_negative() {
        -x
    } else {
        x
    }
}

/// Owner of the single [`TrackedState`].
#[derive(Debug, Default)]
pub struct ProximityTracker {
    state: TrackedState,
}

impl ProximityTracker {
    pub const fn new() -> Self {
        Self {
            state: TrackedState {
                bearing: None,
                distance: None,
                previous_distance: None,
                proximity: None,
                degraded: false,
            },
        }
    }

    pub fn state(&self) -> &TrackedState {
        &self.state
    }

    /// Bearing path. Distance fields are left alone.
    pub fn set_bearing(&mut self, degrees: u16) {
        self.state.bearing = Some(degrees);
    }

    /// Feed one raw (unsigned) distance magnitude through the transition.
    pub fn apply_distance(&mut self, raw: f64) {
        let state = &mut self.state;
        state.previous_distance = state.distance;

        let mut current = raw;
        if let Some(previous) = state.previous_distance {
            let proximity = current - previous;
            state.proximity = Some(proximity);
            current = if proximity > 0.0 {
                -magnitude(current)
            } else {
                magnitude(current)
            };
        }
        state.distance = Some(current);
    }

    /// Feed a multiplexed read. The degraded flag is recorded alongside;
    /// the numeric transition is the same as [`apply_distance`](Self::apply_distance).
    pub fn apply_reading(&mut self, reading: &DistanceReading) {
        self.state.degraded = reading.is_degraded();
        self.apply_distance(reading.meters());
    }
}
