//! Nachtabsenkung
//!
//! Prüft ob eine Uhrzeit in einem (ggf. über Mitternacht reichenden)
//! Zeitfenster liegt.

use crate::types::ClockReading;

/// Uhrzeit mit Minutenauflösung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    const fn minutes(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

impl From<ClockReading> for TimeOfDay {
    fn from(reading: ClockReading) -> Self {
        Self::new(reading.hour, reading.minute)
    }
}

/// Liegt `time` im Intervall [`start`, `end`]? Beide Grenzen inklusive.
///
/// Ist `end` vor `start`, reicht das Intervall über Mitternacht.
pub fn is_time_within_interval(time: TimeOfDay, start: TimeOfDay, end: TimeOfDay) -> bool {
    let (time, start, end) = (time.minutes(), start.minutes(), end.minutes());
    if end < start {
        time >= start || time <= end
    } else {
        time >= start && time <= end
    }
}

/// Zeitfenster mit reduzierter Helligkeit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// Helligkeit (value, 0-100 %) innerhalb des Fensters
    pub value: u8,
}

impl NightWindow {
    pub fn contains(&self, time: TimeOfDay) -> bool {
        is_time_within_interval(time, self.start, self.end)
    }
}
