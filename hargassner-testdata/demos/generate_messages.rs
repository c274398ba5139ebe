//! Example: Generate synthetic telemetry lines.
//!
//! Run with: cargo run --example generate_messages -- [count] [text|json] [seed]

use chrono::{Duration, Utc};
use hargassner::DEFAULT_FIRMWARE;
use hargassner_testdata::{BoilerPhase, MessageGenerator};
use serde::Serialize;

#[derive(Serialize)]
struct Record {
    timestamp: String,
    phase: BoilerPhase,
    tokens: usize,
    line: String,
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let count: usize = args.first().and_then(|s| s.parse().ok()).unwrap_or(10);
    let json = args.get(1).map(|s| s == "json").unwrap_or(false);
    let seed: Option<u64> = args.get(2).and_then(|s| s.parse().ok());

    let mut generator = match MessageGenerator::for_firmware(DEFAULT_FIRMWARE, seed) {
        Ok(generator) => generator.with_fault_probability(0.05),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let start = Utc::now();
    for i in 0..count {
        let phase = generator.random_phase();
        let line = generator.generate(phase);

        if json {
            let record = Record {
                timestamp: (start + Duration::seconds(i as i64)).to_rfc3339(),
                phase,
                tokens: line.split_whitespace().count() - 1,
                line,
            };
            match serde_json::to_string(&record) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("  Warning: Could not serialize line {}: {}", i, e),
            }
        } else {
            println!("{}", line);
        }
    }
}
