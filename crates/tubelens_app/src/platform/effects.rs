use std::sync::mpsc;
use std::thread;

use client_logging::{client_debug, client_info, client_warn};
use tubelens_core::{Effect, Msg, OutboundRequest};
use tubelens_engine::{ConnectionEvent, ConnectionHandle, EventStream, SendError};

use super::app::Inbound;

/// Anything that can put a request on the wire.
pub trait RequestSink {
    fn send_request(&self, request: &OutboundRequest) -> Result<(), SendError>;
}

impl RequestSink for ConnectionHandle {
    fn send_request(&self, request: &OutboundRequest) -> Result<(), SendError> {
        self.send(request)
    }
}

pub struct EffectRunner<S> {
    sink: S,
    msg_tx: mpsc::Sender<Inbound>,
}

impl<S: RequestSink> EffectRunner<S> {
    pub fn new(sink: S, msg_tx: mpsc::Sender<Inbound>) -> Self {
        Self { sink, msg_tx }
    }

    /// Executes `effects` and returns the alerts the user should see.
    ///
    /// A send that fails is fed back as `Msg::SendFailed` so the core can
    /// settle the request it had marked pending.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<String> {
        let mut alerts = Vec::new();
        for effect in effects {
            match effect {
                Effect::Send(request) => match self.sink.send_request(&request) {
                    Ok(()) => client_info!("Sent {} for {}", request.action(), request.key()),
                    Err(err) => {
                        client_warn!("Could not send {} for {}: {}", request.action(), request.key(), err);
                        let _ = self.msg_tx.send(Inbound::Core(Msg::SendFailed {
                            key: request.key(),
                            detail: err.to_string(),
                        }));
                    }
                },
                Effect::ShowAlert { message } => alerts.push(message),
            }
        }
        alerts
    }
}

/// Forwards connection events into the app inbox until either side goes away.
pub fn spawn_event_pump(events: EventStream, msg_tx: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if msg_tx.send(Inbound::Core(map_event(event))).is_err() {
                break;
            }
        }
        client_debug!("Connection event pump stopped");
    });
}

fn map_event(event: ConnectionEvent) -> Msg {
    match event {
        ConnectionEvent::Opened => Msg::ConnectionOpened,
        ConnectionEvent::Message(raw) => Msg::FrameReceived(raw),
        ConnectionEvent::Closed { reason } => Msg::ConnectionClosed { reason },
        ConnectionEvent::Error(err) => Msg::ConnectionFailed {
            detail: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use tubelens_core::RequestKey;
    use tubelens_engine::TransportError;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        sent: RefCell<Vec<OutboundRequest>>,
        reject: Option<SendError>,
    }

    impl RequestSink for RecordingSink {
        fn send_request(&self, request: &OutboundRequest) -> Result<(), SendError> {
            if let Some(err) = &self.reject {
                return Err(err.clone());
            }
            self.sent.borrow_mut().push(request.clone());
            Ok(())
        }
    }

    #[test]
    fn sends_requests_and_collects_alerts() {
        let (msg_tx, msg_rx) = mpsc::channel();
        let runner = EffectRunner::new(RecordingSink::default(), msg_tx);
        let request = OutboundRequest::search("cats").unwrap();

        let alerts = runner.run(vec![
            Effect::Send(request.clone()),
            Effect::ShowAlert {
                message: "hello".to_string(),
            },
        ]);

        assert_eq!(alerts, vec!["hello".to_string()]);
        assert_eq!(runner.sink.sent.borrow().as_slice(), &[request]);
        assert!(msg_rx.try_recv().is_err());
    }

    #[test]
    fn send_while_closed_is_fed_back_as_failure() {
        let (msg_tx, msg_rx) = mpsc::channel();
        let sink = RecordingSink {
            reject: Some(SendError::NotOpen),
            ..RecordingSink::default()
        };
        let runner = EffectRunner::new(sink, msg_tx);

        runner.run(vec![Effect::Send(
            OutboundRequest::channel_profile("UC1").unwrap(),
        )]);

        match msg_rx.try_recv() {
            Ok(Inbound::Core(Msg::SendFailed { key, detail })) => {
                assert_eq!(key, RequestKey::Channel("UC1".to_string()));
                assert_eq!(detail, "connection is not open");
            }
            other => panic!("expected send failure, got {other:?}"),
        }
    }

    #[test]
    fn connection_events_map_to_core_messages() {
        assert_eq!(map_event(ConnectionEvent::Opened), Msg::ConnectionOpened);
        assert_eq!(
            map_event(ConnectionEvent::Message("[]".to_string())),
            Msg::FrameReceived("[]".to_string())
        );
        assert_eq!(
            map_event(ConnectionEvent::Error(TransportError::InvalidUtf8)),
            Msg::ConnectionFailed {
                detail: "binary frame is not valid UTF-8".to_string()
            }
        );
    }
}
