// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;
#[cfg(feature = "network")]
pub mod web;

// Re-exports von wortuhr-core
pub use wortuhr_core::{ClockError, ClockStatus, LedError, TimeSetRequest};

use core::cell::Cell;

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::pubsub::{PubSubChannel, Publisher, Subscriber};

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Diese Type-Aliase vereinfachen die Lesbarkeit der Funktionssignaturen.
// Statt:  Publisher<'static, NoopRawMutex, ClockStatus, 2, 8, 1>
// Nutze:  ClockStatusPublisher

/// PubSubChannel für Status-Broadcasts (Clock Task → WebSockets)
/// - 2: Nachrichten-Kapazität im Queue
/// - 8: Maximale Anzahl Subscribers (WebSocket-Connections)
/// - 1: Publisher (nur der Clock Task)
pub type ClockStatusChannel = PubSubChannel<NoopRawMutex, ClockStatus, 2, 8, 1>;

/// Publisher für Status-Broadcasts
pub type ClockStatusPublisher = Publisher<'static, NoopRawMutex, ClockStatus, 2, 8, 1>;

/// Subscriber für Status-Broadcasts
pub type ClockStatusSubscriber = Subscriber<'static, NoopRawMutex, ClockStatus, 2, 8, 1>;

/// Zuletzt veröffentlichter Status
/// Der PubSubChannel hält keine alten Nachrichten, neue WebSocket-Clients
/// lesen den aktuellen Stand deshalb hier.
pub type LatestStatus = Mutex<NoopRawMutex, Cell<Option<ClockStatus>>>;

/// Channel für Stell-Anfragen (WebSocket → Clock Task)
/// Der Clock Task ist der einzige Schreiber auf den RTC und holt sich
/// Anfragen nur zwischen zwei Frames ab.
/// - 2: Nachrichten-Kapazität
pub type TimeSetChannel = Channel<NoopRawMutex, TimeSetRequest, 2>;

/// Sender für Stell-Anfragen
pub type TimeSetSender = Sender<'static, NoopRawMutex, TimeSetRequest, 2>;

/// Receiver für Stell-Anfragen (Clock Task)
pub type TimeSetReceiver = Receiver<'static, NoopRawMutex, TimeSetRequest, 2>;

// ============================================================================
// Testing-Strategie
// ============================================================================
//
// Dieses Crate kompiliert nur für riscv32imac-unknown-none-elf.
// Die komplette Anzeige-Logik (Encoder, Resolver, Renderer, Refresh-Zyklus,
// BCD-Register) liegt deshalb in wortuhr-core und wird auf dem Host getestet:
//
// - Unit Tests: `cargo test -p wortuhr-core`
// - Integration Tests mit MockRtc/MockLedWriter: `cargo test -p wortuhr-tests`
//
// Hier bleibt nur die Verdrahtung mit der Hardware (RMT, I2C, WiFi, HTTP).
