//! Human-readable status line emitted after every processed event.
//!
//! ```text
//! Updated State: Bearing: 90, Distance: -1.5, Proximity: 0.7
//! Updated State: Bearing: None, Distance: 2.3, Proximity: None
//! ```
//! Not machine-parsed anywhere; the format is diagnostic only.

use core::fmt::{self, Write};

use heapless::String;

use crate::config::STATUS_LINE_CAPACITY;
use crate::tracker::TrackedState;

/// Optional field, printed as `None` when unset.
pub struct Maybe<T>(pub Option<T>);

impl fmt::Display for Maybe<u16> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => f.write_str("None"),
        }
    }
}

impl fmt::Display for Maybe<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{:.1}", v),
            None => f.write_str("None"),
        }
    }
}

/// Display adapter for one status line.
pub struct StatusLine<'a>(pub &'a TrackedState);

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        write!(
            f,
            "Updated State: Bearing: {}, Distance: {}, Proximity: {}",
            Maybe(s.bearing),
            Maybe(s.distance),
            Maybe(s.proximity)
        )?;
        if s.degraded {
            f.write_str(" [degraded]")?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusLine<'_> {
    fn format(&self, f: defmt::Formatter) {
        let s = self.0;
        defmt::write!(
            f,
            "Updated State: Bearing: {}, Distance: {}, Proximity: {}",
            s.bearing,
            s.distance,
            s.proximity
        );
        if s.degraded {
            defmt::write!(f, " [degraded]");
        }
    }
}

/// Render the status line into a fixed-capacity string.
pub fn render_status(state: &TrackedState) -> String<STATUS_LINE_CAPACITY> {
    let mut line = String::new();
    // Capacity covers the longest possible line.
    let _ = write!(line, "{}", StatusLine(state));
    line
}
