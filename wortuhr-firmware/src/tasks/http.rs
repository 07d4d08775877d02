// HTTP Server Task - Serviert HTML und WebSocket
use core::future::pending;
use defmt::{info, warn};
use embassy_futures::select::{Either, select};
use embassy_net::Stack;
use embassy_time::{Duration, Instant};
use picoserve::{io::embedded_io_async, response::IntoResponse, response::ws, routing::get};
use serde::Serialize;

use crate::config::*;
use crate::web::{
    INDEX_HTML,
    protocol::{MessageType, WsClientMessage, WsServerMessage},
};
use crate::{ClockStatus, ClockStatusChannel, ClockStatusSubscriber, LatestStatus, TimeSetSender};

/// Response-Enum für WebSocket-Endpoint
/// Ermöglicht Rückgabe von entweder WebSocket-Upgrade oder HTTP-Fehler
enum WebSocketResponse {
    Upgrade(
        ws::UpgradedWebSocket<ws::UnspecifiedProtocol, ws::CallbackNotUsingState<WebSocketHandler>>,
    ),
    ServiceUnavailable,
}

impl IntoResponse for WebSocketResponse {
    async fn write_to<
        R: embedded_io_async::Read,
        W: picoserve::response::ResponseWriter<Error = R::Error>,
    >(
        self,
        connection: picoserve::response::Connection<'_, R>,
        response_writer: W,
    ) -> Result<picoserve::ResponseSent, W::Error> {
        match self {
            WebSocketResponse::Upgrade(ws) => ws.write_to(connection, response_writer).await,
            WebSocketResponse::ServiceUnavailable => {
                picoserve::response::Response::new(
                    picoserve::response::StatusCode::new(503),
                    "Service Unavailable: Too many WebSocket connections (max 8)",
                )
                .with_header("Retry-After", "5")
                .write_to(connection, response_writer)
                .await
            }
        }
    }
}

/// HTTP Server Task - läuft parallel zum Clock Task
///
/// Dieser Task stellt den HTTP-Server bereit:
/// - Serviert index.html auf GET /
/// - WebSocket-Endpoint auf /ws zum Stellen der Uhr
/// - Leitet Status-Updates vom Clock Task an den Browser weiter
///
/// **Task Pool:** Diese Task wird 4x gespawnt für concurrent connections.
///
/// # Parameter
/// - `task_id`: Eindeutige ID für diese Server-Instanz (0..3)
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `status_channel`: PubSub Channel für Status-Broadcasts (WebSocketHandler erstellt Subscriber)
/// - `latest_status`: Letzter Status für neu verbundene Clients
/// - `time_set_sender`: Channel Sender für Stell-Anfragen
#[embassy_executor::task(pool_size = 4)]
pub async fn http_server_task(
    task_id: usize,
    stack: &'static Stack<'static>,
    status_channel: &'static ClockStatusChannel,
    latest_status: &'static LatestStatus,
    time_set_sender: TimeSetSender,
) {
    info!("HTTP: Server task {} starting on port 80...", task_id);

    let app = picoserve::Router::new().route("/", get(serve_html)).route(
        "/ws",
        get(
            move |upgrade: picoserve::response::WebSocketUpgrade| async move {
                info!("HTTP: WebSocket upgrade requested");

                // Bei mehr als 8 gleichzeitigen Clients schlägt die
                // Subscriber-Allokation fehl, dann HTTP 503 statt Panic.
                match status_channel.subscriber() {
                    Ok(status_subscriber) => {
                        let handler = WebSocketHandler {
                            time_set_sender,
                            status_subscriber,
                            latest_status,
                        };
                        WebSocketResponse::Upgrade(upgrade.on_upgrade(handler))
                    }
                    Err(_) => {
                        warn!("HTTP: No subscriber slots available, sending HTTP 503");
                        WebSocketResponse::ServiceUnavailable
                    }
                }
            },
        ),
    );

    // Server-Konfiguration
    let config = picoserve::Config::new(picoserve::Timeouts {
        start_read_request: Some(Duration::from_secs(5)),
        read_request: Some(Duration::from_secs(1)),
        write: Some(Duration::from_secs(1)),
        persistent_start_read_request: Some(Duration::from_secs(5)),
    })
    .keep_connection_alive();

    let mut http_buffer = [0u8; HTTP_BUFFER_SIZE];
    let mut rx_buffer = [0u8; TCP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_TX_BUFFER_SIZE];

    let server = picoserve::Server::new(&app, &config, &mut http_buffer);

    // task_id ermöglicht mehrere concurrent Server-Instanzen
    let _ = server
        .listen_and_serve(task_id, *stack, 80, &mut rx_buffer, &mut tx_buffer)
        .await;

    info!("HTTP: Server task {} ended", task_id);
}

/// Serviert die HTML-Hauptseite
async fn serve_html() -> impl IntoResponse {
    picoserve::response::Response::new(picoserve::response::StatusCode::OK, INDEX_HTML)
        .with_header("Content-Type", "text/html; charset=utf-8")
}

/// WebSocket-Handler State
struct WebSocketHandler {
    time_set_sender: TimeSetSender,
    status_subscriber: ClockStatusSubscriber,
    latest_status: &'static LatestStatus,
}

impl ws::WebSocketCallback for WebSocketHandler {
    async fn run<R: embedded_io_async::Read, W: embedded_io_async::Write<Error = R::Error>>(
        mut self,
        mut rx: ws::SocketRx<R>,
        mut tx: ws::SocketTx<W>,
    ) -> Result<(), W::Error> {
        info!("HTTP: WebSocket connection established");

        let mut buffer = [0u8; WEBSOCKET_BUFFER_SIZE];

        // Aktuellen Stand sofort senden
        self.send_latest_status(&mut tx).await?;

        let close_reason = loop {
            // Gleichzeitig auf Browser-Nachrichten und Status-Broadcasts warten
            match select(
                rx.next_message(&mut buffer, pending()),
                self.status_subscriber.next_message_pure(),
            )
            .await
            {
                Either::First(ws_result) => {
                    let ws_result = ws_result?.ignore_never_b();

                    match ws_result {
                        Ok(ws::Message::Text(data)) => {
                            match serde_json_core::from_slice::<WsClientMessage>(data.as_bytes()) {
                                Ok((msg, _)) => self.handle_message(&mut tx, msg).await?,
                                Err(_) => {
                                    info!("HTTP: JSON parse error");
                                    send_error(&mut tx, "JSON parse error").await?;
                                }
                            }
                        }
                        Ok(ws::Message::Binary(data)) => {
                            info!(
                                "HTTP: Received binary message: {} bytes (ignored)",
                                data.len()
                            );
                        }
                        Ok(ws::Message::Ping(data)) => {
                            tx.send_pong(data).await?;
                        }
                        Ok(ws::Message::Pong(_)) => {}
                        Ok(ws::Message::Close(_reason)) => {
                            info!("HTTP: WebSocket close received");
                            break None;
                        }
                        Err(error) => {
                            info!("HTTP: WebSocket error");
                            break Some((error.code(), "WebSocket Error"));
                        }
                    }
                }
                // Status-Update vom Clock Task
                Either::Second(status) => {
                    send_status(&mut tx, &status).await?;
                }
            }
        };

        info!("HTTP: WebSocket connection closed");
        tx.close(close_reason).await
    }
}

impl WebSocketHandler {
    async fn handle_message<W: embedded_io_async::Write>(
        &mut self,
        tx: &mut ws::SocketTx<W>,
        msg: WsClientMessage,
    ) -> Result<(), W::Error> {
        match msg.msg_type {
            MessageType::GetStatus => self.send_latest_status(tx).await,
            MessageType::SetTime => {
                let Some(request) = msg.time_set_request() else {
                    return send_error(tx, "set_time needs year, month, day, hour, minute, second")
                        .await;
                };

                // Ungültige Werte gar nicht erst an den Clock Task schicken
                if request.validate().is_err() {
                    info!("HTTP: Rejected invalid time {}", request);
                    return send_error(tx, "invalid date or time").await;
                }

                info!("HTTP: Forwarding {} to clock task", request);
                // Die neue Zeit kommt als Status-Broadcast zurück, sobald der
                // Clock Task sie beim nächsten Frame gelesen hat
                self.time_set_sender.send(request).await;
                Ok(())
            }
        }
    }

    async fn send_latest_status<W: embedded_io_async::Write>(
        &self,
        tx: &mut ws::SocketTx<W>,
    ) -> Result<(), W::Error> {
        match self.latest_status.lock(|latest| latest.get()) {
            Some(status) => send_status(tx, &status).await,
            None => Ok(()),
        }
    }
}

/// Serialisiert eine Nachricht und sendet sie als Text-Frame
///
/// Nachrichten, die nicht in den Buffer passen, werden verworfen.
async fn send_json<W: embedded_io_async::Write, T: Serialize, const N: usize>(
    tx: &mut ws::SocketTx<W>,
    message: &T,
) -> Result<(), W::Error> {
    let mut json_buffer = [0u8; N];
    let Ok(n) = serde_json_core::to_slice(message, &mut json_buffer) else {
        warn!("HTTP: JSON buffer too small");
        return Ok(());
    };
    match core::str::from_utf8(&json_buffer[..n]) {
        Ok(json_str) => tx.send_text(json_str).await,
        Err(_) => Ok(()),
    }
}

async fn send_status<W: embedded_io_async::Write>(
    tx: &mut ws::SocketTx<W>,
    status: &ClockStatus,
) -> Result<(), W::Error> {
    let message = WsServerMessage::status(status, Instant::now().as_millis());
    send_json::<W, _, JSON_STATUS_BUFFER_SIZE>(tx, &message).await
}

async fn send_error<W: embedded_io_async::Write>(
    tx: &mut ws::SocketTx<W>,
    message: &'static str,
) -> Result<(), W::Error> {
    let error = WsServerMessage::Error { message };
    send_json::<W, _, JSON_ERROR_BUFFER_SIZE>(tx, &error).await
}
