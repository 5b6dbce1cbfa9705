//! Codec parsing and printing performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flb_benchmarks::{classic_config, yaml_config};
use flb_config::{Config, Format};

/// Benchmark classic-format parsing
fn bench_classic_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("classic_parsing");

    for plugin_count in [10, 50, 100, 500].iter() {
        group.throughput(Throughput::Elements(*plugin_count as u64));

        let content = classic_config(*plugin_count);

        group.bench_with_input(
            BenchmarkId::new("plugins", plugin_count),
            &content,
            |b, content| {
                b.iter(|| black_box(Config::parse_str(content, Format::Classic).unwrap()));
            },
        );
    }

    group.finish();
}

/// Benchmark classic-format printing
fn bench_classic_printing(c: &mut Criterion) {
    let mut group = c.benchmark_group("classic_printing");

    for plugin_count in [10, 100].iter() {
        let config = Config::parse_str(&classic_config(*plugin_count), Format::Classic).unwrap();

        group.bench_with_input(
            BenchmarkId::new("plugins", plugin_count),
            &config,
            |b, config| {
                b.iter(|| black_box(config.dump(Format::Classic).unwrap()));
            },
        );
    }

    group.finish();
}

/// Benchmark YAML parsing into the unified model
fn bench_yaml_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("yaml_parsing");

    for plugin_count in [10, 100].iter() {
        group.throughput(Throughput::Elements(*plugin_count as u64));

        let content = yaml_config(*plugin_count);

        group.bench_with_input(
            BenchmarkId::new("plugins", plugin_count),
            &content,
            |b, content| {
                b.iter(|| black_box(Config::parse_str(content, Format::Yaml).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_classic_parsing,
    bench_classic_printing,
    bench_yaml_parsing
);
criterion_main!(benches);
