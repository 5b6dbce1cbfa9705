//! fluentbit-config benchmarking suite
//!
//! Criterion benchmarks for the classic codec, the structured codecs and
//! the schema validator.

pub mod common;

pub use common::*;
