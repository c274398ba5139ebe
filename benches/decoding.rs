//! Benchmarks for schema compilation and telemetry line decoding

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hargassner::{FrameAssembler, Language, LineDecoder, SchemaCompiler, DEFAULT_FIRMWARE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

fn generate_lines(count: usize, tokens: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            let values: Vec<String> = (0..tokens)
                .map(|i| {
                    if i % 3 == 0 {
                        format!("{:.1}", rng.gen_range(-20.0..90.0))
                    } else {
                        rng.gen_range(0..65536).to_string()
                    }
                })
                .collect();
            format!("pm {}", values.join(" "))
        })
        .collect()
}

fn bench_schema(c: &mut Criterion) {
    let mut group = c.benchmark_group("schema");
    let compiler = SchemaCompiler::new(Language::En);

    group.bench_function("compile_catalog_template", |b| {
        b.iter(|| {
            let schema = compiler.for_firmware(black_box(DEFAULT_FIRMWARE));
            black_box(schema)
        })
    });

    group.finish();
}

fn bench_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoding");

    let schema = Arc::new(SchemaCompiler::default().for_firmware(DEFAULT_FIRMWARE).unwrap());
    let decoder = LineDecoder::new(Arc::clone(&schema));
    let lines = generate_lines(1000, schema.expected_token_count());

    group.throughput(Throughput::Elements(1000));

    group.bench_function("decode_1000_lines", |b| {
        b.iter(|| {
            for line in &lines {
                let sample = decoder.decode(line);
                black_box(sample);
            }
        })
    });

    let short = generate_lines(1000, schema.expected_token_count() - 10);
    group.bench_function("decode_1000_short_lines", |b| {
        b.iter(|| {
            for line in &short {
                let sample = decoder.decode(line);
                black_box(sample);
            }
        })
    });

    group.finish();
}

fn bench_framing(c: &mut Criterion) {
    let mut group = c.benchmark_group("framing");

    let lines = generate_lines(1000, 121);
    let mut stream = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        stream.extend_from_slice(line.as_bytes());
        stream.extend_from_slice(b"\r\n");
        if i % 10 == 0 {
            stream.extend_from_slice(b"z diagnostic\r\n");
        }
    }

    group.throughput(Throughput::Bytes(stream.len() as u64));

    group.bench_function("assemble_4k_chunks", |b| {
        b.iter(|| {
            let mut assembler = FrameAssembler::new();
            for chunk in stream.chunks(4096) {
                let out = assembler.on_bytes(chunk);
                black_box(out);
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_schema, bench_decoding, bench_framing);
criterion_main!(benches);
