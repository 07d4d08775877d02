// DS3231 Echtzeituhr über I2C
//
// Generisch über embedded_hal::i2c::I2c, damit jeder blockierende
// I2C-Treiber (hier esp_hal::i2c::master::I2c) genutzt werden kann.

use embedded_hal::i2c::I2c;
use wortuhr_core::bcd::{
    decode_date, decode_time, encode_date, encode_date_time, encode_time, temperature_quarters,
};
use wortuhr_core::{CalendarDate, ClockError, ClockReading, RealTimeClock};

/// Feste I2C-Adresse des DS3231
const DS3231_ADDR: u8 = 0x68;

/// Register-Adressen
mod reg {
    pub const SECONDS: u8 = 0x00;
    pub const WEEKDAY: u8 = 0x03;
    pub const TEMP_MSB: u8 = 0x11;
}

/// DS3231 Treiber
pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Liest `N` Register ab `start`
    fn read_registers<const N: usize>(&mut self, start: u8) -> Result<[u8; N], ClockError> {
        let mut buffer = [0u8; N];
        self.i2c
            .write_read(DS3231_ADDR, &[start], &mut buffer)
            .map_err(|_| ClockError::Communication)?;
        Ok(buffer)
    }

    /// Schreibt `N` Register ab `start` in einer Transaktion
    fn write_registers<const N: usize>(
        &mut self,
        start: u8,
        values: [u8; N],
    ) -> Result<(), ClockError> {
        // Adresse + max. 7 Register (0x00..=0x06)
        let mut storage = [0u8; 8];
        let frame = storage.get_mut(..=N).ok_or(ClockError::InvalidInput)?;
        frame[0] = start;
        frame[1..].copy_from_slice(&values);
        self.i2c
            .write(DS3231_ADDR, frame)
            .map_err(|_| ClockError::Communication)
    }

    /// Chip-Temperatur in 0,25 °C Schritten
    ///
    /// # Fehlerbehandlung
    /// `ClockError::Communication` bei Bus-Fehlern
    pub fn temperature(&mut self) -> Result<i16, ClockError> {
        let [msb, lsb] = self.read_registers::<2>(reg::TEMP_MSB)?;
        Ok(temperature_quarters(msb, lsb))
    }

    /// Gibt den I2C-Bus wieder frei
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> RealTimeClock for Ds3231<I2C> {
    fn get_time(&mut self) -> Result<ClockReading, ClockError> {
        let registers = self.read_registers::<3>(reg::SECONDS)?;
        Ok(decode_time(&registers))
    }

    fn set_time(&mut self, hour: u8, minute: u8, second: u8) -> Result<(), ClockError> {
        ClockReading::new(hour, minute, second)?;
        self.write_registers(reg::SECONDS, encode_time(hour, minute, second))
    }

    fn get_date(&mut self) -> Result<CalendarDate, ClockError> {
        let registers = self.read_registers::<4>(reg::WEEKDAY)?;
        Ok(decode_date(&registers))
    }

    fn set_date(&mut self, date: CalendarDate) -> Result<(), ClockError> {
        CalendarDate::new(date.year, date.month, date.day)?;
        self.write_registers(reg::WEEKDAY, encode_date(&date))
    }

    /// Schreibt 0x00..=0x06 in einer Transaktion, der Chip übernimmt alle
    /// Register gemeinsam und kann dazwischen nicht weiterzählen
    fn set_date_time(&mut self, date: CalendarDate, time: ClockReading) -> Result<(), ClockError> {
        CalendarDate::new(date.year, date.month, date.day)?;
        time.validate()?;
        self.write_registers(reg::SECONDS, encode_date_time(&date, &time))
    }
}
