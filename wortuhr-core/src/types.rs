//! Core Types für die Wortuhr
//!
//! Datenstrukturen ohne Hardware-Dependencies

use crate::traits::ClockError;
use crate::words::WordMask;

/// Uhrzeit wie sie vom RTC gelesen wird (24-Stunden-Format)
///
/// Die Sekunde wird mitgelesen, spielt für die Wortauswahl aber keine Rolle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl ClockReading {
    /// Erstellt eine geprüfte Uhrzeit
    ///
    /// # Fehlerbehandlung
    /// `ClockError::InvalidInput` wenn ein Feld außerhalb von 0..24 / 0..60 liegt
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, ClockError> {
        let reading = Self {
            hour,
            minute,
            second,
        };
        reading.validate()?;
        Ok(reading)
    }

    pub fn validate(&self) -> Result<(), ClockError> {
        if self.hour < 24 && self.minute < 60 && self.second < 60 {
            Ok(())
        } else {
            Err(ClockError::InvalidInput)
        }
    }

    /// Parst "HH:MM:SS" (z.B. aus `CLOCK_INITIAL_TIME`)
    ///
    /// # Fehlerbehandlung
    /// `ClockError::InvalidInput` bei falschem Format oder ungültiger Zeit
    pub fn parse_hms(text: &str) -> Result<Self, ClockError> {
        let mut fields = text.trim().split(':').map(|field| field.parse::<u8>());
        let mut next = || match fields.next() {
            Some(Ok(value)) => Ok(value),
            _ => Err(ClockError::InvalidInput),
        };
        let (hour, minute, second) = (next()?, next()?, next()?);
        if fields.next().is_some() {
            return Err(ClockError::InvalidInput);
        }
        Self::new(hour, minute, second)
    }

    /// Stunde und Minute als Schlüssel für die Änderungserkennung
    pub fn hour_minute(&self) -> (u8, u8) {
        (self.hour, self.minute)
    }
}

/// Kalenderdatum wie es im RTC abgelegt wird
///
/// Der DS3231 speichert nur zweistellige Jahre, daher 2000..=2099.
/// `weekday`: 1 = Montag ... 7 = Sonntag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub weekday: u8,
}

impl CalendarDate {
    pub const MIN_YEAR: u16 = 2000;
    pub const MAX_YEAR: u16 = 2099;

    /// Erstellt ein geprüftes Datum und berechnet den Wochentag
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ClockError> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return Err(ClockError::InvalidInput);
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(ClockError::InvalidInput);
        }
        Ok(Self {
            year,
            month,
            day,
            weekday: weekday(year, month, day),
        })
    }
}

pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Tage im Monat, 0 für ungültige Monate
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Wochentag nach Sakamoto, 1 = Montag ... 7 = Sonntag
///
/// Nur für bereits geprüfte Daten (Monat 1..=12, Jahr >= 1)
fn weekday(year: u16, month: u8, day: u8) -> u8 {
    const OFFSETS: [u16; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let year = if month < 3 { year - 1 } else { year };
    let sunday_based = (year + year / 4 - year / 100 + year / 400
        + OFFSETS[(month - 1) as usize]
        + day as u16)
        % 7;
    if sunday_based == 0 { 7 } else { sunday_based as u8 }
}

/// Anfrage zum Stellen der Uhr (z.B. vom WebSocket)
///
/// Wird nur zwischen zwei Frames angewendet, nie direkt aus einem
/// anderen Task heraus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSetRequest {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeSetRequest {
    /// Prüft alle Felder und zerlegt die Anfrage in Datum und Uhrzeit
    pub fn validate(&self) -> Result<(CalendarDate, ClockReading), ClockError> {
        let date = CalendarDate::new(self.year, self.month, self.day)?;
        let time = ClockReading::new(self.hour, self.minute, self.second)?;
        Ok((date, time))
    }
}

/// Status-Nachricht für Channel-Kommunikation
///
/// Wird vom Clock-Task bei jeder Änderung der Wort-Maske veröffentlicht.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockStatus {
    pub hour: u8,
    pub minute: u8,
    pub mask: WordMask,
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for ClockReading {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{=u8:02}:{=u8:02}:{=u8:02}",
            self.hour,
            self.minute,
            self.second
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CalendarDate {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{=u16}-{=u8:02}-{=u8:02} (Tag {=u8})",
            self.year,
            self.month,
            self.day,
            self.weekday
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimeSetRequest {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "TimeSetRequest {{ {=u16}-{=u8:02}-{=u8:02} {=u8:02}:{=u8:02}:{=u8:02} }}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ClockStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "ClockStatus {{ {=u8:02}:{=u8:02}, {} }}",
            self.hour,
            self.minute,
            self.mask
        )
    }
}
