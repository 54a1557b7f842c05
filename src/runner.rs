//! Times each reduction sequentially and in parallel.

use std::time::{Duration, Instant};

use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::error::{BenchError, Result};
use crate::reduction::{Operation, ReductionValue};
use crate::report::safe_speedup;

/// Wall-clock time of both passes of one operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Timing {
    /// Single-threaded pass.
    #[serde(rename = "seq_time_s", serialize_with = "duration_secs")]
    pub sequential: Duration,
    /// Parallel pass, including pool dispatch.
    #[serde(rename = "par_time_s", serialize_with = "duration_secs")]
    pub parallel: Duration,
}

impl Timing {
    /// Builds a timing from raw seconds. Negative or non-finite inputs clamp
    /// to zero.
    pub fn from_secs(sequential: f64, parallel: f64) -> Self {
        Self {
            sequential: secs_to_duration(sequential),
            parallel: secs_to_duration(parallel),
        }
    }

    /// Sequential time in seconds.
    pub fn seq_secs(&self) -> f64 {
        self.sequential.as_secs_f64()
    }

    /// Parallel time in seconds.
    pub fn par_secs(&self) -> f64 {
        self.parallel.as_secs_f64()
    }

    /// Guarded sequential / parallel ratio.
    pub fn speedup(&self) -> f64 {
        safe_speedup(self.seq_secs(), self.par_secs())
    }
}

fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f64(secs)
    } else {
        Duration::ZERO
    }
}

fn duration_secs<S>(value: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(value.as_secs_f64())
}

/// Results and timings for one operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BenchmarkRecord {
    /// Which statistic was computed.
    pub operation: Operation,
    /// Result of the sequential pass.
    pub sequential: ReductionValue,
    /// Result of the parallel pass.
    pub parallel: ReductionValue,
    /// Elapsed time of both passes.
    #[serde(flatten)]
    pub timing: Timing,
    /// Guarded speedup derived from `timing`.
    pub speedup: f64,
}

impl BenchmarkRecord {
    /// Assembles a record and derives its speedup.
    pub fn new(
        operation: Operation,
        sequential: ReductionValue,
        parallel: ReductionValue,
        timing: Timing,
    ) -> Self {
        Self {
            operation,
            sequential,
            parallel,
            timing,
            speedup: timing.speedup(),
        }
    }

    /// Whether both passes produced the same value.
    pub fn results_agree(&self) -> bool {
        self.sequential.agrees_with(&self.parallel)
    }
}

/// Everything produced by one benchmark run.
#[derive(Clone, Debug, Serialize)]
pub struct BenchmarkReport {
    /// Number of elements reduced.
    pub len: usize,
    /// Worker threads used for the parallel passes.
    pub workers: usize,
    /// Seed the input array was generated from.
    pub seed: u64,
    /// One entry per operation, in execution order.
    pub records: Vec<BenchmarkRecord>,
}

impl BenchmarkReport {
    /// Bundles the run parameters with its records.
    pub fn new(len: usize, workers: usize, seed: u64, records: Vec<BenchmarkRecord>) -> Self {
        Self {
            len,
            workers,
            seed,
            records,
        }
    }

    /// Record for `op`, if it was run.
    pub fn record(&self, op: Operation) -> Option<&BenchmarkRecord> {
        self.records.iter().find(|record| record.operation == op)
    }
}

/// Owns the worker pool and runs sequential/parallel pairs.
pub struct BenchmarkRunner {
    pool: ThreadPool,
}

impl BenchmarkRunner {
    /// Builds a runner backed by a dedicated pool of `workers` threads.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(BenchError::InvalidConfig(
                "worker count must be at least 1".into(),
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|idx| format!("reduce-worker-{idx}"))
            .build()?;
        info!(workers, "worker pool ready");
        Ok(Self { pool })
    }

    /// Threads in the pool.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Times `op` once sequentially and once in parallel over `data`.
    pub fn run_operation(&self, op: Operation, data: &[i32]) -> BenchmarkRecord {
        let start = Instant::now();
        let sequential = op.sequential(data);
        let seq_elapsed = start.elapsed();

        let start = Instant::now();
        let parallel = op.parallel(data, &self.pool);
        let par_elapsed = start.elapsed();

        debug!(
            op = op.key(),
            seq_us = seq_elapsed.as_micros() as u64,
            par_us = par_elapsed.as_micros() as u64,
            "timed reduction"
        );
        let record = BenchmarkRecord::new(
            op,
            sequential,
            parallel,
            Timing {
                sequential: seq_elapsed,
                parallel: par_elapsed,
            },
        );
        if !record.results_agree() {
            warn!(
                op = op.key(),
                sequential = %record.sequential,
                parallel = %record.parallel,
                "sequential and parallel results differ"
            );
        }
        record
    }

    /// Runs every operation in `ops` over `data` and collects a report.
    pub fn run_all(&self, ops: &[Operation], data: &[i32], seed: u64) -> BenchmarkReport {
        let records = ops
            .iter()
            .map(|&op| self.run_operation(op, data))
            .collect();
        BenchmarkReport::new(data.len(), self.workers(), seed, records)
    }
}
