//! Sequential versus data-parallel benchmarks of min, max, sum and average
//! over a random integer array.

pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod input;
pub mod logging;
pub mod reduction;
pub mod report;
pub mod runner;

pub use config::{BenchConfig, Overrides, DEFAULT_THREADS};
pub use error::{BenchError, Result};
pub use generator::ArrayGenerator;
pub use reduction::{Operation, ReductionValue};
pub use report::safe_speedup;
pub use runner::{BenchmarkRecord, BenchmarkReport, BenchmarkRunner, Timing};
