// WebSocket-Protokoll-Definitionen
// Definiert die JSON-Nachrichten für Client ↔ Server Kommunikation

use serde::{Deserialize, Serialize};
use wortuhr_core::{ClockStatus, TimeSetRequest};

/// Client → Server Nachrichten
/// Kommandos vom Browser an den ESP32
///
/// Hinweis: Flache Struktur mit optionalen Feldern für serde-json-core Kompatibilität
/// Beispiel: {"type":"set_time","year":2025,"month":1,"day":12,"hour":7,"minute":13,"second":0}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WsClientMessage {
    #[serde(rename = "type")]
    pub msg_type: MessageType,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub month: Option<u8>,
    #[serde(default)]
    pub day: Option<u8>,
    #[serde(default)]
    pub hour: Option<u8>,
    #[serde(default)]
    pub minute: Option<u8>,
    #[serde(default)]
    pub second: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    SetTime,
    GetStatus,
}

impl WsClientMessage {
    /// Baut die Stell-Anfrage, falls alle Felder vorhanden sind
    ///
    /// Die Wertebereiche werden erst mit `TimeSetRequest::validate` geprüft.
    pub fn time_set_request(&self) -> Option<TimeSetRequest> {
        Some(TimeSetRequest {
            year: self.year?,
            month: self.month?,
            day: self.day?,
            hour: self.hour?,
            minute: self.minute?,
            second: self.second?,
        })
    }
}

/// Server → Client Nachrichten
/// Status-Updates und Fehler vom ESP32 an den Browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum WsServerMessage {
    #[serde(rename = "status")]
    Status {
        hour: u8,
        minute: u8,
        /// Bitmaske der aktiven Wörter (Bit = Word-Index)
        mask: u32,
        timestamp_ms: u64,
    },
    #[serde(rename = "error")]
    Error { message: &'static str },
}

impl WsServerMessage {
    pub fn status(status: &ClockStatus, timestamp_ms: u64) -> Self {
        WsServerMessage::Status {
            hour: status.hour,
            minute: status.minute,
            mask: status.mask.bits(),
            timestamp_ms,
        }
    }
}
