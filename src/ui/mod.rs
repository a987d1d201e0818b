//! User interface - OLED status screen.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C, redrawn after every event

pub mod display;
