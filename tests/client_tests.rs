//! Client tests against a local TCP listener standing in for the boiler

use hargassner::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

const TEMPLATE: &str = "<DAQPRJ><ANALOG>\
    <CHANNEL id='0' name='ZK'/>\
    <CHANNEL id='1' name='TK' unit='°C'/>\
    <CHANNEL id='2' name='TRG'/>\
    </ANALOG><DIGITAL>\
    <CHANNEL id='0' bit='0' name='Stoerung'/>\
    </DIGITAL></DAQPRJ>";

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn config(port: u16) -> ClientConfig {
    ClientConfig::new("127.0.0.1")
        .with_port(port)
        .with_template(TEMPLATE)
        .with_connect_timeout(ms(500))
        .with_read_timeout(ms(200))
        .with_backoff(BackoffConfig::new(ms(50), ms(200)))
        .with_startup_wait(Duration::from_secs(2))
}

async fn listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

async fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {}", what);
        tokio::time::sleep(ms(10)).await;
    }
}

async fn send(stream: &mut TcpStream, data: &str) {
    stream.write_all(data.as_bytes()).await.unwrap();
    stream.flush().await.unwrap();
}

#[tokio::test]
async fn test_end_to_end_decode() {
    let (listener, port) = listener().await;
    let client = TelemetryClient::new(config(port)).unwrap();

    let notified = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notified);
    client.subscribe(move |_: &DecodedSample| -> std::result::Result<(), ObserverError> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let (accepted, state) = tokio::join!(listener.accept(), client.start());
    let (mut boiler, _) = accepted.unwrap();
    assert_eq!(state.unwrap(), ConnectionState::Connected);

    send(&mut boiler, "pm 7 55.3 180 1\r\n").await;
    wait_until("first sample", || client.statistics().samples_decoded == 1).await;

    let sample = client.latest_sample().unwrap();
    assert_eq!(sample.value("ZK"), Some(Value::Integer(7)));
    assert_eq!(sample.value("TK"), Some(Value::Float(55.3)));
    assert_eq!(sample.get("TK").unwrap().unit.as_deref(), Some("°C"));
    assert_eq!(sample.value("TRG"), Some(Value::Integer(180)));
    assert_eq!(sample.value("Stoerung"), Some(Value::Bool(true)));

    send(&mut boiler, "pm 7 55.3 180 0\r\n").await;
    wait_until("second sample", || client.statistics().samples_decoded == 2).await;

    let sample = client.latest_sample().unwrap();
    assert_eq!(sample.value("Stoerung"), Some(Value::Bool(false)));
    assert_eq!(sample.len(), 4);

    let snapshot = client.snapshot();
    assert!(snapshot.connection.connected);
    assert!(snapshot.connection.last_update.is_some());
    assert_eq!(snapshot.connection.statistics.lines_received, 2);
    assert_eq!(notified.load(Ordering::SeqCst), 2);

    client.stop().await;
    assert_eq!(client.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_diagnostic_lines_not_counted() {
    let (listener, port) = listener().await;
    let client = TelemetryClient::new(config(port)).unwrap();

    let (accepted, _) = tokio::join!(listener.accept(), client.start());
    let (mut boiler, _) = accepted.unwrap();

    send(&mut boiler, "z 12 diagnostic\r\n\r\nhello\r\npm 1 2 3 0\r\n").await;
    wait_until("sample", || client.statistics().samples_decoded == 1).await;

    let stats = client.statistics();
    assert_eq!(stats.lines_received, 1);
    assert_eq!(stats.dropped_lines, 2);
    assert_eq!(stats.decode_errors, 0);

    client.stop().await;
}

#[tokio::test]
async fn test_last_good_line_of_chunk_wins() {
    let (listener, port) = listener().await;
    let client = TelemetryClient::new(config(port)).unwrap();

    let (accepted, _) = tokio::join!(listener.accept(), client.start());
    let (mut boiler, _) = accepted.unwrap();

    send(&mut boiler, "pm 1 20 30 0\npm foo\npm 2 21 31 1\npm bar\n").await;
    wait_until("all lines", || client.statistics().lines_received == 4).await;

    let stats = client.statistics();
    assert_eq!(stats.samples_decoded, 2);
    assert_eq!(stats.decode_errors, 2);
    assert_eq!(stats.length_mismatches, 0);
    assert_eq!(
        client.latest_sample().unwrap().value("ZK"),
        Some(Value::Integer(2))
    );

    client.stop().await;
}

#[tokio::test]
async fn test_fragmented_line_is_reassembled() {
    let (listener, port) = listener().await;
    let client = TelemetryClient::new(config(port)).unwrap();

    let (accepted, _) = tokio::join!(listener.accept(), client.start());
    let (mut boiler, _) = accepted.unwrap();

    send(&mut boiler, "pm 7 55").await;
    tokio::time::sleep(ms(50)).await;
    send(&mut boiler, ".3 180 1\n").await;
    wait_until("sample", || client.statistics().samples_decoded == 1).await;

    let sample = client.latest_sample().unwrap();
    assert_eq!(sample.value("TK"), Some(Value::Float(55.3)));
    assert!(sample.is_complete());

    client.stop().await;
}

#[tokio::test]
async fn test_reconnects_after_close_and_keeps_stale_sample() {
    let (listener, port) = listener().await;
    let client = TelemetryClient::new(config(port)).unwrap();

    let (accepted, _) = tokio::join!(listener.accept(), client.start());
    let (mut boiler, _) = accepted.unwrap();
    send(&mut boiler, "pm 3 40.5 170 0\n").await;
    wait_until("sample", || client.statistics().samples_decoded == 1).await;
    drop(boiler);

    // Closed by peer: counted as a failure, then reconnected after backoff
    let (mut boiler, _) = listener.accept().await.unwrap();
    let stats = client.statistics();
    assert_eq!(stats.reconnect_attempts, 1);
    assert_eq!(stats.last_error.as_deref(), Some("Connection closed by boiler"));
    assert_eq!(
        client.latest_sample().unwrap().value("ZK"),
        Some(Value::Integer(3))
    );

    send(&mut boiler, "pm 4 41.5 171 0\n").await;
    wait_until("fresh sample", || client.statistics().samples_decoded == 2).await;
    assert_eq!(
        client.latest_sample().unwrap().value("ZK"),
        Some(Value::Integer(4))
    );

    client.stop().await;
}

#[tokio::test]
async fn test_refused_connection_retries_with_backoff() {
    let (listener, port) = listener().await;
    drop(listener);

    let client =
        TelemetryClient::new(config(port).with_startup_wait(ms(300))).unwrap();
    let state = client.start().await.unwrap();
    assert_ne!(state, ConnectionState::Connected);

    wait_until("several attempts", || {
        client.statistics().reconnect_attempts >= 3
    })
    .await;

    let snapshot = client.snapshot();
    assert!(!snapshot.connection.connected);
    assert!(snapshot.sample.is_none());
    assert!(snapshot
        .connection
        .statistics
        .last_error
        .unwrap()
        .contains("127.0.0.1"));

    client.stop().await;
}

#[tokio::test]
async fn test_stop_during_idle_read() {
    let (listener, port) = listener().await;
    let client = TelemetryClient::new(config(port)).unwrap();

    let (accepted, _) = tokio::join!(listener.accept(), client.start());
    let (mut boiler, _) = accepted.unwrap();
    send(&mut boiler, "pm 9 60.0 190 1\n").await;
    wait_until("sample", || client.statistics().samples_decoded == 1).await;

    // Boiler stays silent; the read is in flight when stop arrives
    tokio::time::sleep(ms(50)).await;
    let started = Instant::now();
    client.stop().await;
    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(!client.is_running());

    let snapshot = client.snapshot();
    assert_eq!(snapshot.connection.state, ConnectionState::Disconnected);
    assert_eq!(
        snapshot.sample.unwrap().value("ZK"),
        Some(Value::Integer(9))
    );

    // Socket released: the boiler side sees EOF
    let mut buf = [0u8; 8];
    let read = tokio::time::timeout(
        Duration::from_secs(1),
        tokio::io::AsyncReadExt::read(&mut boiler, &mut buf),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(read, 0);

    client.stop().await;
}

#[tokio::test]
async fn test_silent_boiler_keeps_connection() {
    let (listener, port) = listener().await;
    let client = TelemetryClient::new(config(port).with_read_timeout(ms(50))).unwrap();

    let (accepted, state) = tokio::join!(listener.accept(), client.start());
    let (mut boiler, _) = accepted.unwrap();
    assert_eq!(state.unwrap(), ConnectionState::Connected);

    // Several read timeouts elapse with nothing on the wire
    tokio::time::sleep(ms(400)).await;

    let snapshot = client.snapshot();
    assert_eq!(client.state(), ConnectionState::Connected);
    assert_eq!(snapshot.connection.statistics.reconnect_attempts, 0);
    assert!(snapshot.connection.statistics.last_error.is_none());
    assert!(
        tokio::time::timeout(ms(100), listener.accept()).await.is_err(),
        "client opened a second connection"
    );

    // The original socket still carries telemetry
    send(&mut boiler, "pm 3 41.5 150 0\n").await;
    wait_until("sample", || client.statistics().samples_decoded == 1).await;
    assert_eq!(client.statistics().reconnect_attempts, 0);

    client.stop().await;
}

#[tokio::test]
async fn test_start_twice_is_noop() {
    let (listener, port) = listener().await;
    let client = TelemetryClient::new(config(port)).unwrap();

    let (accepted, _) = tokio::join!(listener.accept(), client.start());
    let _boiler = accepted.unwrap();

    assert_eq!(client.start().await.unwrap(), ConnectionState::Connected);
    assert!(client.is_running());

    client.stop().await;
}

#[tokio::test]
async fn test_unsubscribed_observer_not_called() {
    let (listener, port) = listener().await;
    let client = TelemetryClient::new(config(port)).unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let id = client.subscribe(move |_: &DecodedSample| -> std::result::Result<(), ObserverError> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    client.subscribe(|_: &DecodedSample| -> std::result::Result<(), ObserverError> {
        Err(ObserverError::new("always fails"))
    });
    assert!(client.unsubscribe(id));

    let (accepted, _) = tokio::join!(listener.accept(), client.start());
    let (mut boiler, _) = accepted.unwrap();
    send(&mut boiler, "pm 1 2 3 0\n").await;
    wait_until("sample", || client.statistics().samples_decoded == 1).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    client.stop().await;
}
