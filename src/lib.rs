//! Library interface for segscope.
//!
//! All decode and state logic lives here and can be tested on the host
//! (no embedded hardware required):
//!
//! - [`seg7`]: 7-segment digit lookup and two-digit multiplexed reads
//! - [`tracker`]: bearing / signed distance / proximity state
//! - [`input`]: label parsing, pin binding and per-line edge watchers
//! - [`monitor`]: the control object that turns queued edges into state updates
//!
//! Usage: `cargo test --lib`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and only adds the HAL glue and the OLED on top of this crate.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod logging;

pub mod config;
pub mod error;
pub mod input;
pub mod monitor;
pub mod seg7;
pub mod status;
pub mod tracker;

#[cfg(test)]
mod testing;

pub use error::Error;
pub use input::{EdgeChannel, EdgeWatch, InputLabel, PinBinder, PinClaims};
pub use monitor::{BindFailure, BindReport, Monitor, Watchers};
pub use seg7::{decode_digit, DecodedDigit, DistanceReading, SegmentPattern};
pub use status::{render_status, StatusLine};
pub use tracker::{ProximityTracker, TrackedState};

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests - end-to-end behaviour through the monitor
// ═══════════════════════════════════════════════════════════════════════════
