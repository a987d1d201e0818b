//! 7-segment display input - digit decoding and two-digit multiplexing.
//!
//! ## Components
//!
//! - **Decoder**: exact lookup of a 7-segment pattern to a digit 0-9
//! - **Mux**: enables each digit position in turn and samples the shared bus

pub mod decoder;
pub mod mux;

pub use decoder::{
    decode_digit, encode_digit, BusSample, DecodedDigit, Segment, SegmentPattern, DIGIT_MAP,
    INVALID_DIGIT,
};
pub use mux::{decode_pair, DigitMux, DigitSelect, DistanceReading};
