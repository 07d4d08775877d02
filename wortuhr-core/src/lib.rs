//! Wortuhr Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert die Zeit → Wort → LED → Farbe Pipeline und die Traits
//! für RTC und LED-Strip.

#![no_std]

pub mod bcd;
pub mod board;
pub mod color;
pub mod encoder;
pub mod render;
pub mod resolver;
pub mod schedule;
pub mod traits;
pub mod types;
pub mod words;

// Re-exports für einfachen Zugriff
pub use board::{BoardConfig, ClockBoard, RefreshOutcome, RefreshState};
pub use color::hsv_to_rgb;
pub use encoder::time_mask;
pub use render::{FrameRenderer, HueWheel, PixelBuffer};
pub use resolver::LitLeds;
pub use schedule::{NightWindow, TimeOfDay};
pub use traits::{ClockError, LedError, RealTimeClock, SmartLedWriter};
pub use types::{CalendarDate, ClockReading, ClockStatus, TimeSetRequest};
pub use words::{BYTES_PER_LED, LED_COUNT, WORD_TABLE, Word, WordMask, WordSpan};
