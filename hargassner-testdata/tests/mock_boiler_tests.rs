//! The telemetry client against the mock boiler

use hargassner::boiler::{self, BoilerState};
use hargassner::{BackoffConfig, ClientConfig, ConnectionState, Language, TelemetryClient};
use hargassner_testdata::{BoilerPhase, MessageGenerator, MockBoiler, MockBoilerConfig};
use std::time::{Duration, Instant};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn client_config(port: u16) -> ClientConfig {
    ClientConfig::new("127.0.0.1")
        .with_port(port)
        .with_read_timeout(ms(200))
        .with_backoff(BackoffConfig::new(ms(50), ms(200)))
        .with_startup_wait(Duration::from_secs(2))
}

async fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {}", what);
        tokio::time::sleep(ms(10)).await;
    }
}

#[tokio::test]
async fn test_client_decodes_generated_stream() {
    let schema = MessageGenerator::for_firmware("V14_1HAR_q1", None)
        .unwrap()
        .schema()
        .clone();
    let mock = MockBoiler::start(
        schema,
        MockBoilerConfig::new()
            .with_interval(ms(20))
            .with_seed(7)
            .with_phase(BoilerPhase::Running)
            .with_noise_every(2)
            .with_fragmentation(true),
    )
    .await
    .unwrap();

    let client = TelemetryClient::new(client_config(mock.port())).unwrap();
    assert_eq!(client.start().await.unwrap(), ConnectionState::Connected);

    wait_until("three samples", || client.statistics().samples_decoded >= 3).await;

    let snapshot = client.snapshot();
    let sample = snapshot.sample.unwrap();
    assert!(sample.is_complete());
    assert_eq!(sample.len(), client.schema().len());
    assert_eq!(BoilerState::from_sample(&sample), Some(BoilerState::FullFiring));
    assert_eq!(boiler::operation_status(&sample, Language::En), "OK");

    let stats = snapshot.connection.statistics;
    assert_eq!(stats.decode_errors, 0);
    assert_eq!(stats.length_mismatches, 0);
    assert!(stats.dropped_lines >= 1);

    client.stop().await;
    mock.stop().await;
}

#[tokio::test]
async fn test_client_notices_boiler_going_away() {
    let mock = MockBoiler::scripted(
        vec!["pm 7 55.3 180 1".to_string()],
        MockBoilerConfig::new().with_interval(ms(20)),
    )
    .await
    .unwrap();

    let template = "<DAQPRJ><ANALOG>\
        <CHANNEL id='0' name='ZK'/><CHANNEL id='1' name='TK'/><CHANNEL id='2' name='TRG'/>\
        </ANALOG><DIGITAL><CHANNEL id='0' bit='0' name='Störung'/></DIGITAL></DAQPRJ>";
    let client =
        TelemetryClient::new(client_config(mock.port()).with_template(template)).unwrap();
    client.start().await.unwrap();

    wait_until("a sample", || client.latest_sample().is_some()).await;
    mock.stop().await;

    wait_until("a reconnect attempt", || {
        client.statistics().reconnect_attempts >= 1
    })
    .await;
    assert_ne!(client.state(), ConnectionState::Connected);
    assert!(client.latest_sample().is_some());

    client.stop().await;
}
