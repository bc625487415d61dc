//! Keyword Automaton Benchmarks
//!
//! Benchmarks for trie maintenance, failure-link construction and scanning,
//! implemented with the Criterion framework.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode, Throughput,
};
use keyword_automaton_lib::data_structures::aho_corasick::Automaton;
use keyword_automaton_lib::data_structures::keyword_trie::KeywordTrie;
use std::time::Duration;

/// Deterministic pseudo-random words over a small alphabet.
fn words(count: usize, len: usize, seed: u64) -> Vec<String> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            (0..len)
                .map(|_| {
                    state = state
                        .wrapping_mul(6_364_136_223_846_793_005)
                        .wrapping_add(1_442_695_040_888_963_407);
                    char::from(b'a' + ((state >> 33) % 8) as u8)
                })
                .collect()
        })
        .collect()
}

/// Benchmark keyword insertion and removal
fn bench_trie_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyword_trie");
    group.measurement_time(Duration::from_secs(2));

    for count in [100, 1_000, 10_000] {
        let keywords = words(count, 8, 7);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("insert", count), &keywords, |b, keywords| {
            b.iter(|| {
                let mut trie = KeywordTrie::new();
                for keyword in keywords {
                    trie.insert(black_box(keyword)).unwrap();
                }
                trie
            });
        });

        group.bench_with_input(
            BenchmarkId::new("insert_remove", count),
            &keywords,
            |b, keywords| {
                b.iter(|| {
                    let mut trie = KeywordTrie::new();
                    for keyword in keywords {
                        trie.insert(keyword).unwrap();
                    }
                    for keyword in keywords {
                        trie.remove(black_box(keyword)).unwrap();
                    }
                    trie
                });
            },
        );
    }
    group.finish();
}

/// Benchmark failure-link construction
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("aho_corasick_build");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));

    for count in [100, 1_000, 10_000] {
        let mut automaton = Automaton::from_keywords(words(count, 8, 11)).unwrap();
        group.throughput(Throughput::Elements(automaton.trie().node_count() as u64));
        group.bench_function(BenchmarkId::new("build", count), |b| {
            b.iter(|| black_box(automaton.build()));
        });
    }
    group.finish();
}

/// Benchmark scanning with different keyword set sizes
fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("aho_corasick_scan");
    group.measurement_time(Duration::from_secs(2));

    let text: String = words(1, 64 * 1024, 13).concat();
    group.throughput(Throughput::Bytes(text.len() as u64));

    for count in [10, 100, 1_000] {
        let automaton = Automaton::from_keywords(words(count, 6, 17)).unwrap();
        group.bench_with_input(BenchmarkId::new("find_iter", count), &text, |b, text| {
            b.iter(|| automaton.find_iter(black_box(text)).unwrap().count());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_trie_updates, bench_build, bench_scan);
criterion_main!(benches);
