// Hargassner Exporter - Stream probe
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Connects to a boiler once and prints what it sends.
//!
//! ```bash
//! hargassner-probe 192.168.1.50 --count 5
//! ```

use clap::Parser;
use hargassner::decoder::{telemetry_payload, DEFAULT_MARKER};
use hargassner::{Language, LineDecoder, SchemaCompiler, TextEncoding, DEFAULT_FIRMWARE};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Hargassner telemetry stream probe
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Boiler IP address or hostname
    host: String,

    /// Boiler telnet port
    #[arg(short, long, default_value = "23")]
    port: u16,

    /// Stop after this many telemetry lines
    #[arg(short, long, default_value = "10")]
    count: usize,

    /// Stop after this many seconds
    #[arg(short, long, default_value = "60")]
    duration: u64,

    /// Firmware used to check token counts
    #[arg(short, long, default_value = DEFAULT_FIRMWARE)]
    firmware: String,
}

#[derive(Debug, Default)]
struct ProbeStats {
    messages: usize,
    telemetry: usize,
    decoded: usize,
    bytes: usize,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let decoder = match SchemaCompiler::new(Language::En).for_firmware(&args.firmware) {
        Ok(schema) => LineDecoder::new(Arc::new(schema)),
        Err(e) => {
            error!("Cannot compile firmware {}: {}", args.firmware, e);
            std::process::exit(2);
        }
    };
    let expected = decoder.schema().expected_token_count();

    let address = (args.host.as_str(), args.port);
    let stream = match timeout(Duration::from_secs(10), TcpStream::connect(address)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            error!("Connection to {}:{} failed: {}", args.host, args.port, e);
            std::process::exit(1);
        }
        Err(_) => {
            error!("Connection to {}:{} timed out", args.host, args.port);
            std::process::exit(1);
        }
    };
    info!(
        "Connected to {}:{}, expecting {} tokens per line",
        args.host, args.port, expected
    );

    let started = Instant::now();
    let deadline = started + Duration::from_secs(args.duration);
    let mut reader = BufReader::new(stream);
    let mut stats = ProbeStats::default();
    let mut buffer = Vec::new();

    while stats.telemetry < args.count {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            info!("Duration elapsed");
            break;
        }

        buffer.clear();
        let read = match timeout(remaining, reader.read_until(b'\n', &mut buffer)).await {
            Ok(Ok(0)) => {
                warn!("Connection closed by boiler");
                break;
            }
            Ok(Ok(n)) => n,
            Ok(Err(e)) => {
                error!("Read failed: {}", e);
                break;
            }
            Err(_) => {
                info!("Duration elapsed");
                break;
            }
        };
        stats.bytes += read;

        let line = decode_line(&buffer);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        stats.messages += 1;

        match telemetry_payload(line, DEFAULT_MARKER) {
            Some(payload) => {
                stats.telemetry += 1;
                let tokens = payload.split_whitespace().count();
                let marker = if tokens == expected { "ok" } else { "MISMATCH" };
                println!("[{:>3}] {} tokens ({})", stats.telemetry, tokens, marker);
                println!("      {}", truncate(line, 120));

                if let Ok(sample) = decoder.decode(line) {
                    stats.decoded += 1;
                    println!("      {} parameters decoded", sample.len());
                }
            }
            None => println!("[dbg] {}", truncate(line, 120)),
        }
    }

    let elapsed = started.elapsed().as_secs_f64();
    println!();
    println!("=== Probe Statistics ===");
    println!("Messages:        {}", stats.messages);
    println!("Telemetry lines: {}", stats.telemetry);
    println!("Decoded:         {}", stats.decoded);
    println!("Bytes received:  {}", stats.bytes);
    println!("Elapsed:         {:.1} s", elapsed);
    if elapsed > 0.0 {
        println!("Rate:            {:.2} lines/s", stats.telemetry as f64 / elapsed);
    }
}

fn decode_line(bytes: &[u8]) -> String {
    TextEncoding::DEFAULT_CHAIN
        .iter()
        .find_map(|encoding| encoding.decode(bytes))
        .unwrap_or_else(|| String::from_utf8_lossy(bytes).into_owned())
}

fn truncate(line: &str, max_chars: usize) -> String {
    match line.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &line[..index]),
        None => line.to_string(),
    }
}
