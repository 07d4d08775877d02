// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
//
// Die Pins (LED-Daten GPIO8, I2C SDA GPIO6 / SCL GPIO7) stecken im Typ der
// Peripherals und werden in main.rs beim Spawnen von clock_task festgelegt.

use wortuhr_core::{BoardConfig, NightWindow, TimeOfDay};

// ============================================================================
// LED Konfiguration
// ============================================================================

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// Anzahl der LEDs im Strip (10 Zeilen à 11 Buchstaben + 4 Minuten-Punkte)
pub const LED_COUNT: usize = wortuhr_core::LED_COUNT;

// ============================================================================
// Renderer Konfiguration
// ============================================================================

/// Pause zwischen zwei Frames in Millisekunden (~50 Frames/s)
pub const FRAME_INTERVAL_MS: u64 = 20;

/// Farbton-Schritt pro Frame in Grad (ein Umlauf = 360 Frames ≈ 7,2 s)
pub const HUE_STEP: u16 = 1;

/// Sättigung in Prozent
pub const SATURATION: u8 = 100;

/// Helligkeit tagsüber in Prozent
pub const BRIGHTNESS: u8 = 100;

/// Nachtabsenkung: 22:00 bis 07:00 (beide Grenzen inklusive)
pub const NIGHT_START: TimeOfDay = TimeOfDay::new(22, 0);
pub const NIGHT_END: TimeOfDay = TimeOfDay::new(7, 0);

/// Helligkeit während der Nacht in Prozent
pub const NIGHT_BRIGHTNESS: u8 = 20;

/// Renderer-Parameter für das ClockBoard
pub const BOARD_CONFIG: BoardConfig = BoardConfig {
    hue_step: HUE_STEP,
    saturation: SATURATION,
    value: BRIGHTNESS,
    night: Some(NightWindow {
        start: NIGHT_START,
        end: NIGHT_END,
        value: NIGHT_BRIGHTNESS,
    }),
};

// ============================================================================
// RTC Konfiguration (DS3231)
// ============================================================================

/// I2C Bus-Frequenz in kHz (DS3231 kann bis 400 kHz)
pub const I2C_FREQUENCY_KHZ: u32 = 100;

/// Wartezeit nach einem RTC-Fehler in Millisekunden
/// Das Display bleibt währenddessen auf dem letzten Frame stehen
pub const RTC_RETRY_DELAY_MS: u64 = 500;

/// Optionale Startzeit ("HH:MM:SS")
/// Wird zur Build-Zeit aus der Environment Variable CLOCK_INITIAL_TIME geladen
/// Ist sie gesetzt, wird der RTC beim Booten einmal gestellt
pub const CLOCK_INITIAL_TIME: Option<&str> = option_env!("CLOCK_INITIAL_TIME");

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
#[cfg(feature = "network")]
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
/// Setze diese in .env file (siehe .env.example)
#[cfg(feature = "network")]
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Wartezeit vor einem neuen Verbindungsversuch in Sekunden
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// Gesamt-Heap: ~100 KB für WiFi-Stack

// ============================================================================
// HTTP Server Konfiguration
// ============================================================================

/// HTTP Buffer-Größe in Bytes
/// Für HTTP Request/Response Headers und Body
pub const HTTP_BUFFER_SIZE: usize = 1024;

/// TCP RX Buffer-Größe in Bytes
pub const TCP_RX_BUFFER_SIZE: usize = 1024;

/// TCP TX Buffer-Größe in Bytes
pub const TCP_TX_BUFFER_SIZE: usize = 1024;

/// WebSocket Message Buffer-Größe in Bytes
/// set_time-Nachrichten sind < 128 Bytes
pub const WEBSOCKET_BUFFER_SIZE: usize = 512;

/// JSON Serialisierungs-Buffer für WebSocket Status-Updates
/// Für {"type":"status","hour":..,"minute":..,"mask":..,"timestamp_ms":..}
pub const JSON_STATUS_BUFFER_SIZE: usize = 128;

/// JSON Serialisierungs-Buffer für WebSocket Error-Messages
/// Für {"type":"error","message":"..."}
pub const JSON_ERROR_BUFFER_SIZE: usize = 128;
