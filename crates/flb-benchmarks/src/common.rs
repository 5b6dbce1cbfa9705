//! Shared fixture generators for benchmarks

use std::fmt::Write;

/// Build a classic-format configuration with the given number of
/// input/filter/output triples
pub fn classic_config(plugin_count: usize) -> String {
    let mut out = String::from("[SERVICE]\n    flush 1\n    http_server on\n");
    for i in 0..plugin_count {
        write!(
            out,
            "[INPUT]\n    name dummy\n    tag bench.{i}\n    rate {i}\n",
        )
        .unwrap();
        write!(
            out,
            "[FILTER]\n    name grep\n    match bench.{i}\n    regex level error\n",
        )
        .unwrap();
        write!(
            out,
            "[OUTPUT]\n    name es\n    match bench.{i}\n    port 9200\n    index bench-{i}\n",
        )
        .unwrap();
    }
    out
}

/// Build the YAML equivalent of [`classic_config`]
pub fn yaml_config(plugin_count: usize) -> String {
    let mut out = String::from("service:\n  flush: 1\npipeline:\n  inputs:\n");
    for i in 0..plugin_count {
        write!(out, "    - name: dummy\n      tag: bench.{i}\n      rate: {i}\n").unwrap();
    }
    out.push_str("  outputs:\n");
    for i in 0..plugin_count {
        write!(out, "    - name: es\n      match: bench.{i}\n      port: 9200\n").unwrap();
    }
    out
}
