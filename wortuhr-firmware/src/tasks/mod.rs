// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Tasks kommunizieren über Embassy Channels (Clock → HTTP Status, HTTP → Clock Stell-Anfragen).

pub mod clock;
#[cfg(feature = "network")]
pub mod http;
#[cfg(feature = "network")]
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use clock::clock_task;
#[cfg(feature = "network")]
pub use http::http_server_task;
#[cfg(feature = "network")]
pub use wifi::{connection_task, dhcp_task, net_task};
