// Hargassner Testdata - Mock boiler
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! A TCP server that streams telemetry like a boiler's telnet port.
//!
//! Each accepted client gets its own stream of generated (or scripted)
//! lines at a fixed interval. Diagnostic noise and split writes can be
//! enabled to exercise framing on the client side.

use crate::generator::{BoilerPhase, MessageGenerator};
use hargassner::Schema;
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Mock boiler behaviour.
#[derive(Debug, Clone)]
pub struct MockBoilerConfig {
    /// Delay between lines.
    pub interval: Duration,
    /// Emit a diagnostic line before every n-th telemetry line (0 = never).
    pub noise_every: usize,
    /// Split each line across two writes.
    pub fragment: bool,
    /// Seed for generated lines (per client: seed + client index).
    pub seed: Option<u64>,
    /// Fixed phase, or `None` to vary phases.
    pub phase: Option<BoilerPhase>,
    /// Probability that a generated line reports a fault.
    pub fault_probability: f64,
}

impl Default for MockBoilerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            noise_every: 0,
            fragment: false,
            seed: None,
            phase: None,
            fault_probability: 0.0,
        }
    }
}

impl MockBoilerConfig {
    /// Create a new config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Interleave a diagnostic line every `n` lines.
    pub fn with_noise_every(mut self, n: usize) -> Self {
        self.noise_every = n;
        self
    }

    /// Split lines across writes.
    pub fn with_fragmentation(mut self, fragment: bool) -> Self {
        self.fragment = fragment;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Pin the boiler phase.
    pub fn with_phase(mut self, phase: BoilerPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Set the fault probability.
    pub fn with_fault_probability(mut self, probability: f64) -> Self {
        self.fault_probability = probability;
        self
    }
}

#[derive(Debug, Clone)]
enum Source {
    Generated(Arc<Schema>),
    Scripted(Arc<Vec<String>>),
}

/// Running mock boiler.
#[derive(Debug)]
pub struct MockBoiler {
    addr: SocketAddr,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
    connections: Arc<AtomicUsize>,
}

impl MockBoiler {
    /// Serve generated lines on an ephemeral localhost port.
    pub async fn start(schema: Arc<Schema>, config: MockBoilerConfig) -> io::Result<Self> {
        Self::bind("127.0.0.1:0", schema, config).await
    }

    /// Serve generated lines on `addr`.
    pub async fn bind(
        addr: impl ToSocketAddrs,
        schema: Arc<Schema>,
        config: MockBoilerConfig,
    ) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Self::spawn(listener, Source::Generated(schema), config)
    }

    /// Serve fixed lines, cycling, on an ephemeral localhost port.
    pub async fn scripted(lines: Vec<String>, config: MockBoilerConfig) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        Self::spawn(listener, Source::Scripted(Arc::new(lines)), config)
    }

    fn spawn(listener: TcpListener, source: Source, config: MockBoilerConfig) -> io::Result<Self> {
        let addr = listener.local_addr()?;
        let (shutdown, shutdown_rx) = watch::channel(false);
        let connections = Arc::new(AtomicUsize::new(0));

        let task = tokio::spawn(accept_loop(
            listener,
            source,
            config,
            shutdown_rx,
            Arc::clone(&connections),
        ));

        Ok(Self {
            addr,
            shutdown,
            task,
            connections,
        })
    }

    /// Listening address.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Listening port.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Clients accepted so far.
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Stop accepting and close all client streams.
    pub async fn stop(self) {
        self.shutdown.send_replace(true);
        let _ = self.task.await;
    }
}

async fn stopped(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}

async fn accept_loop(
    listener: TcpListener,
    source: Source,
    config: MockBoilerConfig,
    mut shutdown: watch::Receiver<bool>,
    connections: Arc<AtomicUsize>,
) {
    loop {
        let accepted = tokio::select! {
            _ = stopped(&mut shutdown) => break,
            accepted = listener.accept() => accepted,
        };

        match accepted {
            Ok((stream, _peer)) => {
                let index = connections.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(serve(
                    stream,
                    LineSource::new(&source, &config, index),
                    config.clone(),
                    shutdown.clone(),
                ));
            }
            Err(_) => tokio::time::sleep(Duration::from_millis(50)).await,
        }
    }
}

enum LineSource {
    Generated {
        generator: MessageGenerator,
        phase: Option<BoilerPhase>,
    },
    Scripted {
        lines: Arc<Vec<String>>,
        next: usize,
    },
}

impl LineSource {
    fn new(source: &Source, config: &MockBoilerConfig, index: usize) -> Self {
        match source {
            Source::Generated(schema) => {
                let schema = Arc::clone(schema);
                let generator = match config.seed {
                    Some(seed) => MessageGenerator::with_seed(schema, seed.wrapping_add(index as u64)),
                    None => MessageGenerator::new(schema),
                };
                Self::Generated {
                    generator: generator.with_fault_probability(config.fault_probability),
                    phase: config.phase,
                }
            }
            Source::Scripted(lines) => Self::Scripted {
                lines: Arc::clone(lines),
                next: 0,
            },
        }
    }

    fn next_line(&mut self) -> Option<String> {
        match self {
            Self::Generated { generator, phase } => {
                let phase = match phase {
                    Some(phase) => *phase,
                    None => generator.random_phase(),
                };
                Some(generator.generate(phase))
            }
            Self::Scripted { lines, next } => {
                if lines.is_empty() {
                    return None;
                }
                let line = lines[*next % lines.len()].clone();
                *next += 1;
                Some(line)
            }
        }
    }
}

async fn serve(
    mut stream: TcpStream,
    mut source: LineSource,
    config: MockBoilerConfig,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(config.interval);
    let mut sent = 0usize;

    loop {
        tokio::select! {
            _ = stopped(&mut shutdown) => break,
            _ = ticker.tick() => {}
        }

        let Some(line) = source.next_line() else {
            continue;
        };

        if config.noise_every > 0 && sent % config.noise_every == 0 {
            let noise = format!("z {} diagnostic\r\n", sent);
            if stream.write_all(noise.as_bytes()).await.is_err() {
                break;
            }
        }

        let payload = format!("{}\r\n", line);
        if write_line(&mut stream, payload.as_bytes(), config.fragment)
            .await
            .is_err()
        {
            break;
        }
        sent += 1;
    }
}

async fn write_line(stream: &mut TcpStream, payload: &[u8], fragment: bool) -> io::Result<()> {
    if fragment && payload.len() > 1 {
        let (head, tail) = payload.split_at(payload.len() / 2);
        stream.write_all(head).await?;
        stream.flush().await?;
        tokio::time::sleep(Duration::from_millis(5)).await;
        stream.write_all(tail).await?;
    } else {
        stream.write_all(payload).await?;
    }
    stream.flush().await
}
