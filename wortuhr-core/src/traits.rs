//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use crate::render::PixelBuffer;
use crate::types::{CalendarDate, ClockReading};

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    WriteFailed,
}

/// Fehler-Typ für Uhr-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// Kommunikation mit dem RTC-Chip fehlgeschlagen (I2C)
    Communication,
    /// Stunde/Minute/Datum außerhalb des gültigen Bereichs
    InvalidInput,
    /// Übertragung an den LED-Strip fehlgeschlagen
    TransmitFailed,
}

impl From<LedError> for ClockError {
    fn from(_: LedError) -> Self {
        ClockError::TransmitFailed
    }
}

/// Trait für SmartLED Hardware-Zugriff
///
/// Abstrahiert den Zugriff auf den RGB LED-Strip (WS2812/Neopixel).
///
/// # Implementierungen
/// - **Production:** RmtLedWriter (ESP32 RMT Peripheral)
/// - **Testing:** MockLedWriter (in-memory Mock)
pub trait SmartLedWriter: Send {
    /// Schreibt einen kompletten Frame auf den Strip
    ///
    /// Kehrt erst zurück, wenn die Übertragung abgeschlossen ist. Der Buffer
    /// darf danach sofort für den nächsten Frame verändert werden.
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn write(&mut self, frame: &PixelBuffer) -> Result<(), LedError>;
}

/// Trait für batteriegepufferte Echtzeituhren (z.B. DS3231)
///
/// # Implementierungen
/// - **Production:** Ds3231 (I2C)
/// - **Testing:** MockRtc
pub trait RealTimeClock {
    /// Liest Stunde, Minute und Sekunde
    ///
    /// # Fehlerbehandlung
    /// `ClockError::Communication` bei Bus-Fehlern
    fn get_time(&mut self) -> Result<ClockReading, ClockError>;

    /// Setzt die Uhrzeit (24-Stunden-Format)
    ///
    /// Bei einem Fehler bleibt die zuvor gelesene Zeit im Speicher gültig.
    fn set_time(&mut self, hour: u8, minute: u8, second: u8) -> Result<(), ClockError>;

    fn get_date(&mut self) -> Result<CalendarDate, ClockError>;

    fn set_date(&mut self, date: CalendarDate) -> Result<(), ClockError>;

    /// Setzt Datum und Uhrzeit zusammen
    ///
    /// Chips mit gemeinsamem Registerblock sollten das in einer Transaktion
    /// erledigen, sonst kann ein Tageswechsel zwischen den beiden
    /// Schreibzugriffen das Datum verfälschen.
    fn set_date_time(&mut self, date: CalendarDate, time: ClockReading) -> Result<(), ClockError> {
        self.set_date(date)?;
        self.set_time(time.hour, time.minute, time.second)
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for LedError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LedError::WriteFailed => defmt::write!(fmt, "WriteFailed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ClockError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ClockError::Communication => defmt::write!(fmt, "Communication"),
            ClockError::InvalidInput => defmt::write!(fmt, "InvalidInput"),
            ClockError::TransmitFailed => defmt::write!(fmt, "TransmitFailed"),
        }
    }
}
