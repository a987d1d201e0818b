//! 7-segment digit decoding.
//!
//! Segment order is fixed: A (top), B (top right), C (bottom right),
//! D (bottom), E (bottom left), F (top left), G (middle), then the decimal
//! point. Patterns are packed into a `u8`:
//! ```text
//! Bit:     7   6 5 4 3 2 1 0
//! Segment: DP  G F E D C B A
//! ```
//! The decimal point is sampled with the rest of the bus but never takes
//! part in digit decoding.

use core::fmt;

/// Mask of the seven digit segments (A..G).
pub const DIGIT_MASK: u8 = 0b0111_1111;

/// Sentinel value of a digit whose pattern matched no table entry.
pub const INVALID_DIGIT: i8 = -1;

/// One line of the shared segment bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    /// Decimal point.
    Dp,
}

impl Segment {
    /// Every bus line, in bit order.
    pub const ALL: [Segment; 8] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
        Segment::Dp,
    ];

    /// Bit position on the bus.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn bit(self) -> u8 {
        1 << self.index()
    }

    /// Parse the segment name used in labels (`A`..`G`, `DP`).
    pub fn from_name(name: &str) -> Option<Self> {
        let seg = match name {
            "A" => Segment::A,
            "B" => Segment::B,
            "C" => Segment::C,
            "D" => Segment::D,
            "E" => Segment::E,
            "F" => Segment::F,
            "G" => Segment::G,
            "DP" => Segment::Dp,
            _ => return None,
        };
        Some(seg)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Segment::A => "A",
            Segment::B => "B",
            Segment::C => "C",
            Segment::D => "D",
            Segment::E => "E",
            Segment::F => "F",
            Segment::G => "G",
            Segment::Dp => "DP",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lit/unlit state of the seven digit segments, A..G.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPattern(u8);

impl SegmentPattern {
    /// All segments dark.
    pub const BLANK: Self = Self(0);

    /// Build from packed bits; the decimal point bit is dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & DIGIT_MASK)
    }

    /// Build from segment states in A..G order.
    pub const fn from_states(states: [bool; 7]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < 7 {
            if states[i] {
                bits |= 1 << i;
            }
            i += 1;
        }
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Segment states in A..G order.
    pub fn states(self) -> [bool; 7] {
        core::array::from_fn(|i| self.0 & (1 << i) != 0)
    }

    /// Whether `segment` is lit. The decimal point is never part of a pattern.
    pub const fn is_lit(self, segment: Segment) -> bool {
        self.0 & segment.bit() & DIGIT_MASK != 0
    }
}

/// Table row helper: lit flags written in A..G order, as in a datasheet.
const fn abcdefg(flags: [u8; 7]) -> SegmentPattern {
    let mut states = [false; 7];
    let mut i = 0;
    while i < 7 {
        states[i] = flags[i] != 0;
        i += 1;
    }
    SegmentPattern::from_states(states)
}

/// Digit lookup table, indexed by digit value.
pub const DIGIT_MAP: [SegmentPattern; 10] = [
    abcdefg([1, 1, 1, 1, 1, 1, 0]), // 0
    abcdefg([0, 1, 1, 0, 0, 0, 0]), // 1
    abcdefg([1, 1, 0, 1, 1, 0, 1]), // 2
    abcdefg([1, 1, 1, 1, 0, 0, 1]), // 3
    abcdefg([0, 1, 1, 0, 0, 1, 1]), // 4
    abcdefg([1, 0, 1, 1, 0, 1, 1]), // 5
    abcdefg([1, 0, 1, 1, 1, 1, 1]), // 6
    abcdefg([1, 1, 1, 0, 0, 0, 0]), // 7
    abcdefg([1, 1, 1, 1, 1, 1, 1]), // 8
    abcdefg([1, 1, 1, 1, 0, 1, 1]), // 9
];

/// One sample of all eight bus lines, decimal point included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusSample(u8);

impl BusSample {
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Sample carrying `pattern` with the decimal point set as given.
    pub const fn from_pattern(pattern: SegmentPattern, decimal_point: bool) -> Self {
        let dp = if decimal_point { Segment::Dp.bit() } else { 0 };
        Self(pattern.bits() | dp)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Set or clear a single line.
    pub fn set(&mut self, segment: Segment, lit: bool) {
        if lit {
            self.0 |= segment.bit();
        } else {
            self.0 &= !segment.bit();
        }
    }

    pub const fn is_lit(self, segment: Segment) -> bool {
        self.0 & segment.bit() != 0
    }

    /// The seven digit segments of this sample.
    pub const fn pattern(self) -> SegmentPattern {
        SegmentPattern::from_bits(self.0)
    }

    pub const fn decimal_point(self) -> bool {
        self.is_lit(Segment::Dp)
    }
}

/// Result of a table lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodedDigit {
    Digit(u8),
    /// Pattern matched no table entry.
    Invalid,
}

impl DecodedDigit {
    /// Numeric value, with `Invalid` mapped to [`INVALID_DIGIT`].
    pub const fn value(self) -> i8 {
        match self {
            DecodedDigit::Digit(d) => d as i8,
            DecodedDigit::Invalid => INVALID_DIGIT,
        }
    }

    pub const fn is_valid(self) -> bool {
        matches!(self, DecodedDigit::Digit(_))
    }
}

/// Decode a segment pattern by exact lookup. Never fails; unknown
/// patterns degrade to [`DecodedDigit::Invalid`].
pub fn decode_digit(pattern: SegmentPattern) -> DecodedDigit {
    DIGIT_MAP
        .iter()
        .position(|p| *p == pattern)
        .map_or(DecodedDigit::Invalid, |d| DecodedDigit::Digit(d as u8))
}

/// Pattern that displays `digit`, if it is a single decimal digit.
pub fn encode_digit(digit: u8) -> Option<SegmentPattern> {
    DIGIT_MAP.get(digit as usize).copied()
}
