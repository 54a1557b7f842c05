//! Sequential and data-parallel reductions over `&[i32]`.
//!
//! Every parallel pass splits the input into one contiguous chunk per worker,
//! folds each chunk from the operator's identity on its own thread and merges
//! the partials with the same associative, commutative operator.

use std::fmt;

use clap::ValueEnum;
use rayon::prelude::*;
use rayon::ThreadPool;
use serde::Serialize;

/// The four statistics the harness measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Smallest element.
    #[value(name = "min")]
    Minimum,
    /// Largest element.
    #[value(name = "max")]
    Maximum,
    /// Sum of all elements, widened to `i64`.
    Sum,
    /// Arithmetic mean.
    #[value(name = "avg")]
    Average,
}

impl Operation {
    /// All operations in report order.
    pub const ALL: [Operation; 4] = [
        Operation::Minimum,
        Operation::Maximum,
        Operation::Sum,
        Operation::Average,
    ];

    /// Human readable name used in console output.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Minimum => "Minimum",
            Operation::Maximum => "Maximum",
            Operation::Sum => "Sum",
            Operation::Average => "Average",
        }
    }

    /// Short key used in exported artifacts.
    pub fn key(self) -> &'static str {
        match self {
            Operation::Minimum => "min",
            Operation::Maximum => "max",
            Operation::Sum => "sum",
            Operation::Average => "avg",
        }
    }

    /// Single-threaded pass over `data`.
    pub fn sequential(self, data: &[i32]) -> ReductionValue {
        match self {
            Operation::Minimum => {
                let min = seq_fold(data, i32::MAX, |acc, v| if v < acc { v } else { acc });
                ReductionValue::int_or_empty(data, min as i64)
            }
            Operation::Maximum => {
                let max = seq_fold(data, i32::MIN, |acc, v| if v > acc { v } else { acc });
                ReductionValue::int_or_empty(data, max as i64)
            }
            Operation::Sum => ReductionValue::Int(seq_fold(data, 0i64, |acc, v| acc + v as i64)),
            Operation::Average => {
                let sum = seq_fold(data, 0i64, |acc, v| acc + v as i64);
                ReductionValue::mean(sum, data.len())
            }
        }
    }

    /// Statically partitioned pass over `data` inside `pool`.
    pub fn parallel(self, data: &[i32], pool: &ThreadPool) -> ReductionValue {
        match self {
            Operation::Minimum => {
                let min = par_fold(data, pool, i32::MAX, |acc, v| acc.min(v), i32::min);
                ReductionValue::int_or_empty(data, min as i64)
            }
            Operation::Maximum => {
                let max = par_fold(data, pool, i32::MIN, |acc, v| acc.max(v), i32::max);
                ReductionValue::int_or_empty(data, max as i64)
            }
            Operation::Sum => {
                let sum = par_fold(data, pool, 0i64, |acc, v| acc + v as i64, |a, b| a + b);
                ReductionValue::Int(sum)
            }
            Operation::Average => {
                let sum = par_fold(data, pool, 0i64, |acc, v| acc + v as i64, |a, b| a + b);
                ReductionValue::mean(sum, data.len())
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a single reduction.
///
/// Min, max and average over an empty slice have no meaningful value and
/// yield [`ReductionValue::Empty`]; the sum of an empty slice is `Int(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReductionValue {
    /// Integral result (min, max, sum).
    Int(i64),
    /// Floating-point result (average).
    Float(f64),
    /// No result for empty input.
    Empty,
}

impl ReductionValue {
    fn int_or_empty(data: &[i32], value: i64) -> Self {
        if data.is_empty() {
            ReductionValue::Empty
        } else {
            ReductionValue::Int(value)
        }
    }

    fn mean(sum: i64, len: usize) -> Self {
        if len == 0 {
            ReductionValue::Empty
        } else {
            ReductionValue::Float(sum as f64 / len as f64)
        }
    }

    /// Numeric view of the value, `None` when empty.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ReductionValue::Int(v) => Some(v as f64),
            ReductionValue::Float(v) => Some(v),
            ReductionValue::Empty => None,
        }
    }

    /// Whether two results agree. Floats are compared with a relative
    /// tolerance of `1e-9`.
    pub fn agrees_with(&self, other: &ReductionValue) -> bool {
        match (*self, *other) {
            (ReductionValue::Float(a), ReductionValue::Float(b)) => {
                (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
            }
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for ReductionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReductionValue::Int(v) => write!(f, "{v}"),
            ReductionValue::Float(v) => write!(f, "{v:.4}"),
            ReductionValue::Empty => f.write_str("none"),
        }
    }
}

/// Chunk length that gives every worker one contiguous slice.
pub fn static_chunk_len(len: usize, workers: usize) -> usize {
    let workers = workers.max(1);
    len.div_ceil(workers).max(1)
}

fn seq_fold<A, F>(data: &[i32], identity: A, fold: F) -> A
where
    F: Fn(A, i32) -> A,
{
    let mut acc = identity;
    for &value in data {
        acc = fold(acc, value);
    }
    acc
}

fn par_fold<A, F, C>(data: &[i32], pool: &ThreadPool, identity: A, fold: F, combine: C) -> A
where
    A: Copy + Send + Sync,
    F: Fn(A, i32) -> A + Sync + Send,
    C: Fn(A, A) -> A + Sync + Send,
{
    let chunk = static_chunk_len(data.len(), pool.current_num_threads());
    pool.install(|| {
        data.par_chunks(chunk)
            .map(|part| part.iter().fold(identity, |acc, &v| fold(acc, v)))
            .reduce(|| identity, &combine)
    })
}
