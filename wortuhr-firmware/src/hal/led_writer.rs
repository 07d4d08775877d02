// RMT-Implementierung des SmartLedWriter Traits
//
// Schreibt den kompletten Pixel-Buffer der Wortuhr auf den WS2812 Strip.

use esp_hal::Blocking;
use esp_hal::rmt::{PulseCode, Rmt};
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;
use wortuhr_core::{LED_COUNT, LedError, PixelBuffer, SmartLedWriter};

/// Buffer-Größe für den Strip (3 Farben * 8 Bits pro LED + 1 Reset)
pub const LED_BUFFER_SIZE: usize = LED_COUNT * 24 + 1;

/// Real Hardware LED Writer
///
/// Nutzt ESP32 RMT Peripheral um WS2812 LEDs anzusteuern.
///
/// Hinweis: Der Buffer muss 'static sein, daher wird er im Task erstellt
/// und als Parameter übergeben statt im Constructor allokiert.
pub struct RmtLedWriter<'a> {
    led: SmartLedsAdapter<'a, LED_BUFFER_SIZE>,
}

impl<'a> RmtLedWriter<'a> {
    /// Erstellt einen neuen RmtLedWriter
    ///
    /// # Parameter
    /// - `gpio8`: GPIO8 Peripheral für die Datenleitung
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Buffer für LED-Daten (erstellt mit smart_led_buffer!(LED_COUNT))
    ///
    /// # Fehlerbehandlung
    /// `LedError::WriteFailed` wenn das RMT Peripheral nicht initialisiert werden kann
    pub fn new(
        gpio8: esp_hal::peripherals::GPIO8<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [PulseCode; LED_BUFFER_SIZE],
    ) -> Result<Self, LedError> {
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))
            .map_err(|_| LedError::WriteFailed)?;

        let led = SmartLedsAdapter::new(rmt.channel0, gpio8, buffer);

        Ok(Self { led })
    }
}

impl SmartLedWriter for RmtLedWriter<'_> {
    fn write(&mut self, frame: &PixelBuffer) -> Result<(), LedError> {
        // Der Adapter sendet pro Pixel g, r, b. Der Buffer liegt schon in
        // Strip-Reihenfolge (G, B, R) vor, also Byte 1 in `r` und Byte 2 in `b`.
        let pixels = frame.pixels().map(|[first, second, third]| RGB8 {
            g: first,
            r: second,
            b: third,
        });

        self.led.write(pixels).map_err(|_| LedError::WriteFailed)
    }
}
