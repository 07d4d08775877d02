// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul enthält die konkreten Implementierungen der Traits
// aus wortuhr-core (SmartLedWriter, RealTimeClock).

pub mod led_writer;
pub mod rtc_ds3231;

pub use led_writer::{LED_BUFFER_SIZE, RmtLedWriter};
pub use rtc_ds3231::Ds3231;
