use std::future::Future;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use pretty_assertions::assert_eq;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;
use tubelens_engine::{
    ConnectionEvent, ConnectionHandle, ConnectionSettings, EventStream, SendError,
    TransportError,
};

const WAIT: Duration = Duration::from_secs(5);

/// Accepts one WebSocket client on an ephemeral port and hands it to `handler`.
async fn spawn_server<F, Fut>(handler: F) -> String
where
    F: FnOnce(WebSocketStream<TcpStream>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        handler(ws).await;
    });
    format!("ws://{addr}/ws")
}

fn settings(endpoint: String) -> ConnectionSettings {
    ConnectionSettings {
        endpoint,
        connect_timeout: Duration::from_secs(2),
    }
}

fn next_event(events: &EventStream) -> ConnectionEvent {
    tokio::task::block_in_place(|| events.recv_timeout(WAIT)).expect("connection event")
}

async fn drain(ws: &mut WebSocketStream<TcpStream>) {
    while let Some(Ok(_)) = ws.next().await {}
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn frames_flow_both_ways_in_order() {
    let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
    let endpoint = spawn_server(move |mut ws| async move {
        if let Some(Ok(Message::Text(text))) = ws.next().await {
            let _ = seen_tx.send(text.as_str().to_owned());
        }
        ws.send(Message::Text(r#"{"query":"cats","overallSentiment":"positive"}"#.into()))
            .await
            .unwrap();
        ws.send(Message::Text("[]".into())).await.unwrap();
        ws.close(Some(CloseFrame {
            code: CloseCode::Normal,
            reason: "bye".into(),
        }))
        .await
        .unwrap();
        drain(&mut ws).await;
    })
    .await;

    let (handle, events) = ConnectionHandle::open(settings(endpoint));
    assert_eq!(next_event(&events), ConnectionEvent::Opened);
    assert!(handle.is_open());

    handle
        .send(&serde_json::json!({"action": "search", "query": "cats"}))
        .unwrap();
    let seen = tokio::time::timeout(WAIT, seen_rx.recv()).await.unwrap();
    assert_eq!(seen.as_deref(), Some(r#"{"action":"search","query":"cats"}"#));

    assert_eq!(
        next_event(&events),
        ConnectionEvent::Message(r#"{"query":"cats","overallSentiment":"positive"}"#.to_string())
    );
    assert_eq!(next_event(&events), ConnectionEvent::Message("[]".to_string()));
    assert_eq!(
        next_event(&events),
        ConnectionEvent::Closed {
            reason: Some("bye".to_string())
        }
    );
    assert!(!handle.is_open());
    assert_eq!(handle.send(&"late"), Err(SendError::NotOpen));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn binary_frames_are_decoded_or_reported() {
    let endpoint = spawn_server(|mut ws| async move {
        ws.send(Message::Binary(vec![0xff, 0xfe].into())).await.unwrap();
        ws.send(Message::Binary(b"[1]".to_vec().into())).await.unwrap();
        drain(&mut ws).await;
    })
    .await;

    let (handle, events) = ConnectionHandle::open(settings(endpoint));
    assert_eq!(next_event(&events), ConnectionEvent::Opened);
    assert_eq!(
        next_event(&events),
        ConnectionEvent::Error(TransportError::InvalidUtf8)
    );
    assert_eq!(next_event(&events), ConnectionEvent::Message("[1]".to_string()));
    handle.close();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn client_close_reports_closed_and_rejects_sends() {
    let endpoint = spawn_server(|mut ws| async move {
        drain(&mut ws).await;
    })
    .await;

    let (handle, events) = ConnectionHandle::open(settings(endpoint));
    assert_eq!(next_event(&events), ConnectionEvent::Opened);

    handle.close();
    assert_eq!(
        next_event(&events),
        ConnectionEvent::Closed {
            reason: Some("closed by client".to_string())
        }
    );
    assert_eq!(handle.send(&"anything"), Err(SendError::NotOpen));
}

#[test]
fn refused_connection_is_an_error_and_send_is_rejected() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let (handle, events) = ConnectionHandle::open(settings(format!("ws://127.0.0.1:{port}/ws")));

    assert_eq!(handle.send(&"early"), Err(SendError::NotOpen));
    match events.recv_timeout(WAIT) {
        Some(ConnectionEvent::Error(TransportError::Connect(_))) => {}
        other => panic!("expected connect error, got {other:?}"),
    }
    assert!(!handle.is_open());
}

#[test]
fn invalid_endpoint_never_connects() {
    let (handle, events) = ConnectionHandle::open(settings("http://localhost/ws".to_string()));

    match events.recv_timeout(WAIT) {
        Some(ConnectionEvent::Error(TransportError::InvalidEndpoint { endpoint, .. })) => {
            assert_eq!(endpoint, "http://localhost/ws");
        }
        other => panic!("expected invalid endpoint, got {other:?}"),
    }
    assert_eq!(events.recv_timeout(Duration::from_millis(100)), None);
    assert_eq!(handle.send(&"x"), Err(SendError::NotOpen));
}
