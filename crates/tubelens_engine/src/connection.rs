use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use client_logging::{client_debug, client_info, client_warn};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc as async_mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use crate::{ConnectionEvent, ConnectionSettings, SendError, TransportError};

/// Write side of the connection. Cheap to clone; all clones share one socket.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    frame_tx: async_mpsc::UnboundedSender<String>,
    open: Arc<AtomicBool>,
    shutdown: CancellationToken,
}

/// Read side of the connection: lifecycle events and inbound frames.
#[derive(Debug)]
pub struct EventStream {
    event_rx: mpsc::Receiver<ConnectionEvent>,
}

impl ConnectionHandle {
    /// Starts connecting in the background and returns immediately.
    ///
    /// `ConnectionEvent::Opened` arrives on the stream once the handshake is
    /// done; until then every `send` fails with [`SendError::NotOpen`].
    pub fn open(settings: ConnectionSettings) -> (Self, EventStream) {
        let (frame_tx, frame_rx) = async_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();
        let open = Arc::new(AtomicBool::new(false));
        let shutdown = CancellationToken::new();

        let worker = Worker {
            settings,
            frame_rx,
            event_tx,
            open: open.clone(),
            shutdown: shutdown.clone(),
        };
        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    worker.emit(ConnectionEvent::Error(TransportError::Runtime(
                        err.to_string(),
                    )));
                    return;
                }
            };
            runtime.block_on(worker.run());
        });

        (
            Self {
                frame_tx,
                open,
                shutdown,
            },
            EventStream { event_rx },
        )
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Serializes `message` as JSON and writes it as one text frame.
    pub fn send<T: Serialize>(&self, message: &T) -> Result<(), SendError> {
        if !self.is_open() {
            return Err(SendError::NotOpen);
        }
        let frame =
            serde_json::to_string(message).map_err(|err| SendError::Encode(err.to_string()))?;
        self.frame_tx.send(frame).map_err(|_| SendError::Closed)
    }

    /// Requests a graceful close. `Closed` follows on the event stream.
    pub fn close(&self) {
        self.shutdown.cancel();
    }
}

impl EventStream {
    pub fn try_recv(&self) -> Option<ConnectionEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ConnectionEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Blocks until the next event; `None` once the connection worker is gone.
    pub fn recv(&self) -> Option<ConnectionEvent> {
        self.event_rx.recv().ok()
    }
}

struct Worker {
    settings: ConnectionSettings,
    frame_rx: async_mpsc::UnboundedReceiver<String>,
    event_tx: mpsc::Sender<ConnectionEvent>,
    open: Arc<AtomicBool>,
    shutdown: CancellationToken,
}

impl Worker {
    fn emit(&self, event: ConnectionEvent) {
        let _ = self.event_tx.send(event);
    }

    async fn run(mut self) {
        let endpoint = match self.settings.endpoint_url() {
            Ok(endpoint) => endpoint,
            Err(err) => {
                self.emit(ConnectionEvent::Error(err));
                return;
            }
        };

        client_info!("Connecting to {endpoint}");
        let timeout = self.settings.connect_timeout;
        let connect = tokio::time::timeout(timeout, connect_async(endpoint.as_str()));
        let ws = tokio::select! {
            _ = self.shutdown.cancelled() => {
                self.emit(ConnectionEvent::Closed {
                    reason: Some("closed before connecting".to_string()),
                });
                return;
            }
            result = connect => match result {
                Ok(Ok((ws, _response))) => ws,
                Ok(Err(err)) => {
                    self.emit(ConnectionEvent::Error(TransportError::Connect(err.to_string())));
                    return;
                }
                Err(_) => {
                    self.emit(ConnectionEvent::Error(TransportError::Timeout(timeout)));
                    return;
                }
            },
        };

        self.open.store(true, Ordering::SeqCst);
        self.emit(ConnectionEvent::Opened);

        let (mut ws_tx, mut ws_rx) = ws.split();
        let reason = loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    self.open.store(false, Ordering::SeqCst);
                    if let Err(err) = ws_tx.send(Message::Close(None)).await {
                        client_debug!("Close frame not delivered: {err}");
                    }
                    break Some("closed by client".to_string());
                }
                frame = self.frame_rx.recv() => {
                    let Some(frame) = frame else {
                        break Some("connection handle dropped".to_string());
                    };
                    client_debug!("Sending frame ({} bytes)", frame.len());
                    if let Err(err) = ws_tx.send(Message::Text(frame.into())).await {
                        self.emit(ConnectionEvent::Error(TransportError::Protocol(err.to_string())));
                        break None;
                    }
                }
                inbound = ws_rx.next() => match inbound {
                    Some(Ok(Message::Text(text))) => {
                        self.emit(ConnectionEvent::Message(text.as_str().to_owned()));
                    }
                    Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                        Ok(text) => self.emit(ConnectionEvent::Message(text)),
                        Err(_) => {
                            client_warn!("Dropping binary frame that is not UTF-8");
                            self.emit(ConnectionEvent::Error(TransportError::InvalidUtf8));
                        }
                    },
                    Some(Ok(Message::Close(frame))) => {
                        break frame
                            .map(|frame| frame.reason.as_str().to_owned())
                            .filter(|reason| !reason.is_empty());
                    }
                    // Pings are answered by tungstenite itself.
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        self.emit(ConnectionEvent::Error(TransportError::Protocol(err.to_string())));
                        break None;
                    }
                    None => break None,
                },
            }
        };

        self.open.store(false, Ordering::SeqCst);
        client_info!("Connection to {endpoint} closed");
        self.emit(ConnectionEvent::Closed { reason });
    }
}
