//! Runtime tests through a scripted driver.
//!
//! The driver replays a fixed list of inputs and records everything the
//! runtime renders, writes and opens. Connection attempts succeed or fail
//! according to the script, and the outcome is delivered as the next input,
//! the same way the terminal driver does it.

use std::{
    collections::VecDeque,
    io,
    sync::{Arc, Mutex},
};

use huddle_cli::{Driver, DriverInput, Runtime, RuntimeConfig, command::HELP};

/// Everything the runtime did to the outside world.
#[derive(Debug, Default)]
struct Record {
    rendered: Vec<String>,
    sent: Vec<String>,
    opened: Vec<String>,
    stopped: bool,
}

struct ScriptedDriver {
    inputs: VecDeque<DriverInput>,
    record: Arc<Mutex<Record>>,
    refuse_connections: bool,
    fail_sends: bool,
}

impl ScriptedDriver {
    fn new(inputs: impl IntoIterator<Item = DriverInput>) -> (Self, Arc<Mutex<Record>>) {
        let record = Arc::new(Mutex::new(Record::default()));
        let driver = Self {
            inputs: inputs.into_iter().collect(),
            record: Arc::clone(&record),
            refuse_connections: false,
            fail_sends: false,
        };
        (driver, record)
    }
}

impl Driver for ScriptedDriver {
    type Error = io::Error;

    async fn next_input(&mut self) -> io::Result<Option<DriverInput>> {
        Ok(self.inputs.pop_front())
    }

    async fn open(&mut self, url: &str) -> io::Result<()> {
        self.record.lock().unwrap().opened.push(url.to_string());
        let outcome = if self.refuse_connections {
            DriverInput::Failed { reason: "refused".into() }
        } else {
            DriverInput::Opened
        };
        self.inputs.push_front(outcome);
        Ok(())
    }

    async fn send_frame(&mut self, frame: String) -> io::Result<()> {
        if self.fail_sends {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"));
        }
        self.record.lock().unwrap().sent.push(frame);
        Ok(())
    }

    async fn render(&mut self, line: &str) -> io::Result<()> {
        self.record.lock().unwrap().rendered.push(line.to_string());
        Ok(())
    }

    fn stop(&mut self) {
        self.record.lock().unwrap().stopped = true;
    }
}

fn line(text: &str) -> DriverInput {
    DriverInput::Line(text.to_string())
}

fn config() -> RuntimeConfig {
    RuntimeConfig { url: "ws://x".into(), username: "alice".into(), ..RuntimeConfig::default() }
}

/// Feed inputs one at a time, the way `run` does after startup.
async fn feed(runtime: &mut Runtime<ScriptedDriver>, inputs: impl IntoIterator<Item = DriverInput>) {
    for input in inputs {
        runtime.process_input(input).await.unwrap();
    }
}

#[tokio::test]
async fn create_room_session() {
    let (driver, record) = ScriptedDriver::new([
        line("/create Foo"),
        DriverInput::Frame(
            r#"{"type":"room_created","payload":{"room_code":"ABC123","room_name":"Foo"}}"#.into(),
        ),
        line("/quit"),
        line("never read"),
    ]);

    Runtime::new(driver, config()).run().await.unwrap();

    let record = record.lock().unwrap();
    assert_eq!(record.opened, ["ws://x"]);
    assert_eq!(record.sent, [r#"{"type":"create_room","payload":{"room_name":"Foo"}}"#]);
    assert_eq!(
        record.rendered,
        [
            "[connection] connected",
            "[room] code= name=Foo",
            "[room] code=ABC123 name=Foo",
            "Room created successfully! Room Code: ABC123",
        ]
    );
    assert!(record.stopped);
}

#[tokio::test]
async fn end_of_input_stops_runtime() {
    let config = RuntimeConfig { auto_connect: false, ..config() };
    let (driver, record) = ScriptedDriver::new([line("hello?")]);

    Runtime::new(driver, config).run().await.unwrap();

    let record = record.lock().unwrap();
    assert!(record.opened.is_empty());
    assert!(record.sent.is_empty());
    assert_eq!(record.rendered, ["[error] transport not connected"]);
    assert!(record.stopped);
}

#[tokio::test]
async fn chat_and_join_use_configured_username() {
    let (driver, record) = ScriptedDriver::new([]);
    let mut runtime = Runtime::new(driver, config());

    feed(
        &mut runtime,
        [DriverInput::Opened, line("/join XYZ"), line("hi all"), line("/join ABC bob")],
    )
    .await;

    let record = record.lock().unwrap();
    assert_eq!(
        record.sent,
        [
            r#"{"type":"join_room","payload":{"room_code":"XYZ","username":"alice"}}"#,
            r#"{"type":"send_message","payload":{"username":"alice","message":"hi all"}}"#,
            r#"{"type":"join_room","payload":{"room_code":"ABC","username":"bob"}}"#,
        ]
    );
    assert_eq!(runtime.client().room_code(), "ABC");
}

#[tokio::test]
async fn connect_command_uses_given_or_configured_url() {
    let config = RuntimeConfig { auto_connect: false, ..config() };
    let (driver, record) =
        ScriptedDriver::new([line("/connect"), line("/connect ws://other/ws"), line("/quit")]);

    Runtime::new(driver, config).run().await.unwrap();

    let record = record.lock().unwrap();
    assert_eq!(record.opened, ["ws://x", "ws://other/ws"]);
    assert_eq!(record.rendered, ["[connection] connected"]);
}

#[tokio::test]
async fn leave_without_room_reports_error() {
    let (driver, record) = ScriptedDriver::new([]);
    let mut runtime = Runtime::new(driver, config());

    feed(&mut runtime, [DriverInput::Opened, line("/leave")]).await;

    let record = record.lock().unwrap();
    assert!(record.sent.is_empty());
    assert_eq!(record.rendered.last().map(String::as_str), Some("[error] not in a room"));
    assert_eq!(runtime.client().last_error(), "");
}

#[tokio::test]
async fn refused_connection_reports_error() {
    let (mut driver, record) = ScriptedDriver::new([line("/quit")]);
    driver.refuse_connections = true;

    Runtime::new(driver, config()).run().await.unwrap();

    let record = record.lock().unwrap();
    assert_eq!(record.rendered, ["[error] connection failed: refused"]);
}

#[tokio::test]
async fn failed_write_becomes_transport_failure() {
    let (mut driver, record) = ScriptedDriver::new([]);
    driver.fail_sends = true;
    let mut runtime = Runtime::new(driver, config());

    feed(&mut runtime, [DriverInput::Opened, line("hello")]).await;

    let record = record.lock().unwrap();
    assert_eq!(
        record.rendered,
        [
            "[connection] connected",
            "[connection] disconnected",
            "[error] connection failed: broken pipe",
        ]
    );
}

#[tokio::test]
async fn server_close_and_peer_traffic() {
    let (driver, record) = ScriptedDriver::new([]);
    let mut runtime = Runtime::new(driver, config());

    feed(
        &mut runtime,
        [
            DriverInput::Opened,
            DriverInput::Frame(r#"{"type":"user_connected","payload":{"username":"bob"}}"#.into()),
            DriverInput::Frame("not json".into()),
            DriverInput::Frame(r#"{"type":"something_new","payload":{}}"#.into()),
            DriverInput::Closed { reason: "bye".into() },
        ],
    )
    .await;

    let record = record.lock().unwrap();
    assert_eq!(
        record.rendered,
        ["[connection] connected", "User connected: bob", "[connection] disconnected"]
    );
}

#[tokio::test]
async fn help_status_and_bad_commands() {
    let (driver, record) = ScriptedDriver::new([]);
    let mut runtime = Runtime::new(driver, config());

    feed(&mut runtime, [line("/help")]).await;
    assert_eq!(record.lock().unwrap().rendered, HELP.lines().collect::<Vec<_>>());
    record.lock().unwrap().rendered.clear();

    feed(&mut runtime, [line("/dance"), line("/join"), line("   ")]).await;
    assert_eq!(
        record.lock().unwrap().rendered,
        ["[error] unknown command /dance, try /help", "[error] /join: missing room code"]
    );
    record.lock().unwrap().rendered.clear();

    feed(&mut runtime, [line("/status")]).await;
    assert_eq!(
        record.lock().unwrap().rendered,
        ["[status] connection=disconnected url=-", "[status] room code= name=", "[status] messages=0"]
    );
}
