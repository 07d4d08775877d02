// Clock Task - RTC lesen, Wörter berechnen, LED-Strip ansteuern
use defmt::{error, info, warn};
use embassy_time::{Duration, Timer};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use esp_hal_smartled::smart_led_buffer;
use wortuhr_core::{ClockBoard, ClockError, ClockReading, RealTimeClock, SmartLedWriter};

use crate::config::{
    BOARD_CONFIG, CLOCK_INITIAL_TIME, FRAME_INTERVAL_MS, I2C_FREQUENCY_KHZ, LED_COUNT,
    RMT_CLOCK_MHZ, RTC_RETRY_DELAY_MS,
};
use crate::hal::{Ds3231, RmtLedWriter};
use crate::{ClockStatusPublisher, LatestStatus, TimeSetReceiver};

/// Clock Logic - Testbare Refresh-Schleife ohne Hardware-Abhängigkeit
///
/// Pro Durchlauf:
/// - höchstens eine wartende Stell-Anfrage an den RTC weitergeben
/// - `ClockBoard::refresh` (RTC lesen → Maske → Frame → Strip)
/// - bei geänderter Maske Status an alle Subscriber senden
/// - Pause von `FRAME_INTERVAL_MS`
///
/// Bei RTC-Fehlern bleibt der letzte Frame auf dem Strip stehen und es
/// wird nach `RTC_RETRY_DELAY_MS` erneut gelesen.
///
/// # Parameter
/// - `rtc`: Echtzeituhr (DS3231 oder Mock)
/// - `led`: LED Writer (Hardware oder Mock)
/// - `status_publisher`: PubSub Publisher für Status-Broadcasts
/// - `latest_status`: Letzter Status für neue WebSocket-Clients
/// - `time_set_receiver`: Channel Receiver für Stell-Anfragen vom WebSocket
pub async fn clock_logic<R: RealTimeClock, L: SmartLedWriter>(
    mut rtc: R,
    mut led: L,
    status_publisher: ClockStatusPublisher,
    latest_status: &'static LatestStatus,
    time_set_receiver: TimeSetReceiver,
) -> ! {
    let mut board = ClockBoard::new(BOARD_CONFIG);
    let mut rtc_failing = false;

    loop {
        // Stell-Anfragen nur zwischen zwei Frames anwenden
        if let Ok(request) = time_set_receiver.try_receive() {
            info!("Clock: Setting RTC to {}", request);
            match board.apply_time_set(&mut rtc, &request) {
                Ok(()) => info!("Clock: RTC set"),
                Err(e) => warn!("Clock: Failed to set RTC: {}", e),
            }
        }

        let pause = match board.refresh(&mut rtc, &mut led) {
            Ok(outcome) => {
                if rtc_failing {
                    info!("Clock: RTC reachable again ({})", outcome.reading);
                    rtc_failing = false;
                }
                if let Some(status) = outcome.changed {
                    info!("Clock: {}", status);
                    latest_status.lock(|latest| latest.set(Some(status)));
                    status_publisher.publish_immediate(status);
                }
                FRAME_INTERVAL_MS
            }
            Err(ClockError::TransmitFailed) => {
                error!("Clock: Failed to write to LED strip");
                FRAME_INTERVAL_MS
            }
            Err(e) => {
                if !rtc_failing {
                    warn!("Clock: RTC read failed ({}), keeping last frame", e);
                    rtc_failing = true;
                }
                RTC_RETRY_DELAY_MS
            }
        };

        // Async Delay: gibt CPU an andere Tasks zurück
        Timer::after(Duration::from_millis(pause)).await;
    }
}

/// Stellt den RTC einmalig auf `CLOCK_INITIAL_TIME`, falls gesetzt
fn seed_rtc<R: RealTimeClock>(rtc: &mut R) {
    let Some(text) = CLOCK_INITIAL_TIME else {
        return;
    };

    match ClockReading::parse_hms(text) {
        Ok(time) => match rtc.set_time(time.hour, time.minute, time.second) {
            Ok(()) => info!("Clock: RTC seeded with {}", time),
            Err(e) => warn!("Clock: Failed to seed RTC: {}", e),
        },
        Err(_) => warn!("Clock: CLOCK_INITIAL_TIME '{}' is not HH:MM:SS", text),
    }
}

/// Clock Task - Embassy Task für die Anzeige
///
/// Initialisiert RMT + I2C, stellt ggf. den RTC und ruft dann die
/// testbare `clock_logic()` Funktion auf.
///
/// # Parameter
/// - `gpio8`: GPIO8 Peripheral für die LED-Datenleitung
/// - `rmt_peripheral`: RMT Peripheral für präzises Timing
/// - `i2c0`, `sda`, `scl`: I2C Bus zum DS3231
/// - `status_publisher`: PubSub Publisher für Status-Broadcasts
/// - `latest_status`: Letzter Status für neue WebSocket-Clients
/// - `time_set_receiver`: Channel Receiver für Stell-Anfragen
#[embassy_executor::task]
pub async fn clock_task(
    gpio8: esp_hal::peripherals::GPIO8<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    i2c0: esp_hal::peripherals::I2C0<'static>,
    sda: esp_hal::peripherals::GPIO6<'static>,
    scl: esp_hal::peripherals::GPIO7<'static>,
    status_publisher: ClockStatusPublisher,
    latest_status: &'static LatestStatus,
    time_set_receiver: TimeSetReceiver,
) {
    // Buffer für SmartLED Daten erstellen (114 LEDs)
    // Macro allokiert Speicher im richtigen Format für RMT
    let mut rmt_buffer = smart_led_buffer!(LED_COUNT);

    let led = match RmtLedWriter::new(gpio8, rmt_peripheral, RMT_CLOCK_MHZ, &mut rmt_buffer) {
        Ok(led) => led,
        Err(e) => {
            error!("Clock: Failed to initialize RMT: {}", e);
            return;
        }
    };

    let i2c_config = I2cConfig::default().with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ));
    let i2c = match I2c::new(i2c0, i2c_config) {
        Ok(i2c) => i2c.with_sda(sda).with_scl(scl),
        Err(_) => {
            error!("Clock: Failed to initialize I2C");
            return;
        }
    };

    let mut rtc = Ds3231::new(i2c);
    seed_rtc(&mut rtc);

    match rtc.temperature() {
        Ok(quarters) => info!("Clock: DS3231 temperature {} C", f32::from(quarters) / 4.0),
        Err(e) => warn!("Clock: DS3231 not responding ({})", e),
    }

    clock_logic(rtc, led, status_publisher, latest_status, time_set_receiver).await
}
