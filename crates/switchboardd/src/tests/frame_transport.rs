//! End-to-end tests of the frame transport over TCP.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use rstest::{fixture, rstest};
use serde_json::{Map, Value, json};

use switchboard_config::SocketEndpoint;

use crate::collaborators::Collaborators;
use crate::dispatch::{Router, SharedRouter};
use crate::placeholder::{CancellingDialogs, MemoryConfigStore, MemoryTagStore, NoWindows};
use crate::tests::support::FakeApplication;
use crate::transport::{FrameConnectionHandler, ListenerHandle, SocketListener};

struct Server {
    router: SharedRouter,
    address: SocketAddr,
    handle: Option<ListenerHandle>,
}

impl Server {
    fn start(max_frame_bytes: usize) -> Self {
        let application = FakeApplication::default();
        application.add_file(4, "/notes/drag.md", "drag me");
        let mut preferences = Map::new();
        preferences.insert("darkTheme".to_owned(), json!(true));
        let collaborators = Collaborators::new(
            Box::new(application),
            Box::new(MemoryConfigStore::with_values(preferences)),
            Box::new(MemoryTagStore::new()),
            Box::new(NoWindows),
            Box::new(CancellingDialogs),
        );
        let router = SharedRouter::new(Router::new(collaborators));

        let listener =
            SocketListener::bind(&SocketEndpoint::tcp("127.0.0.1", 0)).expect("bind listener");
        let address = listener.local_addr().expect("listener address");
        let handler = Arc::new(FrameConnectionHandler::new(router.clone(), max_frame_bytes));
        let handle = listener.start(handler).expect("start listener");
        Self {
            router,
            address,
            handle: Some(handle),
        }
    }

    fn connect(&self) -> Client {
        let stream = TcpStream::connect(self.address).expect("connect");
        stream
            .set_read_timeout(Some(Duration::from_secs(2)))
            .expect("set read timeout");
        let reader = BufReader::new(stream.try_clone().expect("clone stream"));
        Client { stream, reader }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.shutdown();
            let _ = handle.join();
        }
    }
}

struct Client {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
}

impl Client {
    fn send(&mut self, frame: Value) {
        let mut line = serde_json::to_vec(&frame).expect("encode frame");
        line.push(b'\n');
        self.stream.write_all(&line).expect("write frame");
        self.stream.flush().expect("flush");
    }

    fn receive(&mut self) -> Value {
        let mut line = String::new();
        self.reader.read_line(&mut line).expect("read frame");
        serde_json::from_str(&line).expect("decode frame")
    }

    /// Next frame, or `None` if nothing arrives within `wait`.
    fn try_receive(&mut self, wait: Duration) -> Option<Value> {
        self.stream
            .set_read_timeout(Some(wait))
            .expect("set read timeout");
        let mut line = String::new();
        let received = match self.reader.read_line(&mut line) {
            Ok(read) if read > 0 => Some(serde_json::from_str(&line).expect("decode frame")),
            _ => None,
        };
        self.stream
            .set_read_timeout(Some(Duration::from_secs(2)))
            .expect("restore read timeout");
        received
    }

    /// Whether the server hung up. A reset counts, a read timeout does not.
    fn closed(&mut self) -> bool {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(read) => read == 0,
            Err(error) => !matches!(
                error.kind(),
                io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
            ),
        }
    }

    /// Round-trips a config query, which also proves the connection has
    /// been attached as the frontend.
    fn sync(&mut self) {
        self.send(json!({"channel": "config", "payload": "darkTheme"}));
        assert_eq!(
            self.receive(),
            json!({"channel": "config", "payload": true})
        );
    }
}

#[fixture]
fn server() -> Server {
    Server::start(1024)
}

#[rstest]
fn config_query_is_answered_on_its_channel(server: Server) {
    let mut client = server.connect();
    client.sync();
}

#[rstest]
fn typo_query_before_dictionary_is_not_ready(server: Server) {
    let mut client = server.connect();
    client.send(json!({"channel": "typo", "payload": {"type": "suggest", "term": "teh"}}));
    assert_eq!(client.receive(), json!({"channel": "typo", "payload": []}));
}

#[rstest]
fn correlated_call_is_echoed_with_return_value(server: Server) {
    let mut client = server.connect();
    client.send(json!({
        "channel": "message",
        "payload": {"cypher": "k1", "command": "get-tags-database", "content": {}}
    }));
    assert_eq!(
        client.receive(),
        json!({
            "channel": "message",
            "payload": {
                "cypher": "k1",
                "command": "get-tags-database",
                "content": {},
                "returnValue": {}
            }
        })
    );
}

#[rstest]
fn notifications_push_to_the_frontend(server: Server) {
    let mut client = server.connect();
    client.send(json!({"channel": "message", "payload": {"command": "get-stats"}}));
    assert_eq!(
        client.receive(),
        json!({"channel": "message", "payload": {"command": "stats", "content": {"files": 1}}})
    );
}

#[rstest]
fn drag_start_is_sent_to_the_requesting_connection(server: Server) {
    let mut client = server.connect();
    client.send(json!({
        "channel": "message",
        "payload": {"command": "file-drag-start", "content": {"hash": 4}}
    }));
    assert_eq!(
        client.receive(),
        json!({
            "channel": "message",
            "payload": {"command": "start-drag", "content": {"file": "/notes/drag.md"}}
        })
    );
}

#[rstest]
fn newest_connection_receives_pushes(server: Server) {
    let mut first = server.connect();
    first.sync();
    let mut second = server.connect();
    second.sync();

    server
        .router
        .with_router(|router| router.notify("config-update"))
        .expect("notify");

    assert_eq!(
        second.receive(),
        json!({"channel": "message", "payload": {"command": "config-update", "content": {}}})
    );
}

#[rstest]
fn closing_newer_connection_restores_earlier_frontend(server: Server) {
    let mut first = server.connect();
    first.sync();
    let mut second = server.connect();
    second.sync();
    drop(second);

    // The closed connection detaches on its own thread; keep pushing until
    // the earlier connection receives one.
    let expected =
        json!({"channel": "message", "payload": {"command": "config-update", "content": {}}});
    let received = (0..40).find_map(|_| {
        server
            .router
            .with_router(|router| router.notify("config-update"))
            .expect("notify");
        first.try_receive(Duration::from_millis(50))
    });

    assert_eq!(received, Some(expected));
    assert!(
        server
            .router
            .with_router(|router| router.has_frontend())
            .expect("inspect router")
    );
}

#[rstest]
fn unread_frontend_does_not_block_other_connections(server: Server) {
    let mut other = server.connect();
    other.sync();
    let mut stalled = server.connect();
    stalled.sync();

    // Far more than the socket buffers hold; `stalled` never reads it.
    let chunk = "x".repeat(64 * 1024);
    for _ in 0..256 {
        server
            .router
            .with_router(|router| router.send("stats", json!(chunk)))
            .expect("push");
    }

    other.sync();
}

#[rstest]
fn malformed_frames_are_skipped(server: Server) {
    let mut client = server.connect();
    client
        .stream
        .write_all(b"not json\n{\"channel\":\"bogus\",\"payload\":1}\n")
        .expect("write garbage");
    client.sync();
}

#[test]
fn oversized_frame_closes_the_connection() {
    let server = Server::start(64);
    let mut client = server.connect();
    let payload = "x".repeat(200);
    client.send(json!({"channel": "config", "payload": payload}));
    assert!(client.closed());
}
