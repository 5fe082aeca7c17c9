//! End-to-end tokenizer throughput benchmarks.
//!
//! Measures per-byte `process` overhead across corpora with different
//! repetition structure, since the MDL gate's admit rate (and therefore
//! the average token length) depends heavily on how compressible the
//! input is.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lzs_core::{Config, TokenizerCore};

fn highly_repetitive(len: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog "
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect()
}

fn pseudo_random(len: usize) -> Vec<u8> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state & 0xFF) as u8
        })
        .collect()
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer_process");
    for &len in &[4096usize, 65536] {
        let repetitive = highly_repetitive(len);
        let random = pseudo_random(len);

        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(
            BenchmarkId::new("repetitive", len),
            &repetitive,
            |b, input| {
                b.iter(|| {
                    let mut t = TokenizerCore::new(Config::default()).unwrap();
                    for &byte in input {
                        black_box(t.process(byte).unwrap());
                    }
                    black_box(t.flush());
                });
            },
        );
        group.bench_with_input(BenchmarkId::new("random", len), &random, |b, input| {
            b.iter(|| {
                let mut t = TokenizerCore::new(Config::default()).unwrap();
                for &byte in input {
                    black_box(t.process(byte).unwrap());
                }
                black_box(t.flush());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_process);
criterion_main!(benches);
