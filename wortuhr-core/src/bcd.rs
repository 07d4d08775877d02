//! BCD-Konvertierung für RTC-Register
//!
//! Der DS3231 speichert Zeit und Datum als Binary Coded Decimal.
//! Register-Layout ab Adresse 0x00:
//! Sekunde, Minute, Stunde, Wochentag, Tag, Monat (Bit 7 = Jahrhundert), Jahr

use crate::types::{CalendarDate, ClockReading};

/// Dezimal (0..=99) → BCD
pub fn to_bcd(decimal: u8) -> u8 {
    ((decimal / 10) << 4) | (decimal % 10)
}

/// BCD → Dezimal
pub fn from_bcd(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Stunden-Register im 24-Stunden-Modus dekodieren
///
/// Bit 6 (12/24-Umschaltung) und Bit 7 werden ignoriert.
pub fn hour_from_bcd(raw: u8) -> u8 {
    from_bcd(raw & 0x3F)
}

/// Register 0x00..=0x02 → Uhrzeit (ungeprüft)
pub fn decode_time(registers: &[u8; 3]) -> ClockReading {
    ClockReading {
        hour: hour_from_bcd(registers[2]),
        minute: from_bcd(registers[1] & 0x7F),
        second: from_bcd(registers[0] & 0x7F),
    }
}

/// Uhrzeit → Register 0x00..=0x02 (24-Stunden-Modus)
pub fn encode_time(hour: u8, minute: u8, second: u8) -> [u8; 3] {
    [to_bcd(second), to_bcd(minute), to_bcd(hour)]
}

/// Register 0x03..=0x06 → Datum (ungeprüft)
pub fn decode_date(registers: &[u8; 4]) -> CalendarDate {
    CalendarDate {
        year: CalendarDate::MIN_YEAR + u16::from(from_bcd(registers[3])),
        month: from_bcd(registers[2] & 0x1F),
        day: from_bcd(registers[1] & 0x3F),
        weekday: registers[0] & 0x07,
    }
}

/// Datum → Register 0x03..=0x06
pub fn encode_date(date: &CalendarDate) -> [u8; 4] {
    let year = date.year.saturating_sub(CalendarDate::MIN_YEAR) % 100;
    [
        date.weekday,
        to_bcd(date.day),
        to_bcd(date.month),
        to_bcd(year as u8),
    ]
}

/// Datum und Uhrzeit → Register 0x00..=0x06 für einen einzigen Schreibzugriff
pub fn encode_date_time(date: &CalendarDate, time: &ClockReading) -> [u8; 7] {
    let [second, minute, hour] = encode_time(time.hour, time.minute, time.second);
    let [weekday, day, month, year] = encode_date(date);
    [second, minute, hour, weekday, day, month, year]
}

/// Temperatur-Register 0x11/0x12 → Viertelgrad
///
/// MSB ist der vorzeichenbehaftete Ganzzahlanteil, die oberen zwei Bits
/// des LSB zählen in 0,25 °C Schritten.
pub fn temperature_quarters(msb: u8, lsb: u8) -> i16 {
    i16::from(msb as i8) * 4 + i16::from(lsb >> 6)
}
