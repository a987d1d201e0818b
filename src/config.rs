//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and label
//! conventions live here so they can be tuned in one place.

// Labels

/// Prefix of bearing selector labels; the rest of the label is the bearing in degrees.
pub const BEARING_PREFIX: &str = "B";

/// Prefix of segment-bus labels (`SEG_A_PIN`, `SEG_DP_PIN`, ...).
pub const SEGMENT_PREFIX: &str = "SEG_";

/// Prefix of digit-enable labels (`DIGIT_1_PIN`, `DIGIT_2_PIN`).
pub const DIGIT_PREFIX: &str = "DIGIT_";

// GPIO pin assignments (nRF52840-DK numbering)
//
// Pin numbers are flat port numbers: P0.n = n, P1.n = 32 + n.
// Actual `embassy_nrf` pins are stolen by number in `main.rs`.
//
//   Bearing selector  → P0.02 P0.03 P0.04 P0.28 P0.29
//   Segment bus A..DP → P1.01 .. P1.08
//   Digit enables     → P1.10 P1.11
//   I²C SDA           → P0.26
//   I²C SCL           → P0.27

/// Label → pin table bound at startup.
///
/// Watchers are returned in table order. Edges are handled in the order
/// they arrive, whatever their place in the table.
pub const INPUT_PINS: &[(&str, u8)] = &[
    ("B270", 2),
    ("B325", 3),
    ("B0", 4),
    ("B45", 28),
    ("B90", 29),
    ("SEG_A_PIN", 33),
    ("SEG_B_PIN", 34),
    ("SEG_C_PIN", 35),
    ("SEG_D_PIN", 36),
    ("SEG_E_PIN", 37),
    ("SEG_F_PIN", 38),
    ("SEG_G_PIN", 39),
    ("SEG_DP_PIN", 40),
    ("DIGIT_1_PIN", 42),
    ("DIGIT_2_PIN", 43),
];

/// Pins driven by other peripherals (OLED I²C); never bound as inputs.
pub const RESERVED_PINS: &[u8] = &[26, 27];

/// Highest GPIO number on the nRF52840 (P1.15).
pub const MAX_PIN: u8 = 47;

/// Maximum number of monitored input lines (bearing + segment), and so of
/// edge watcher tasks.
pub const MAX_INPUTS: usize = 32;

/// Depth of the edge queue between the line watchers and the monitor.
/// A watcher waits for room rather than dropping an edge.
pub const EDGE_QUEUE_DEPTH: usize = 16;

// Output

/// Capacity of a rendered status line.
pub const STATUS_LINE_CAPACITY: usize = 96;
