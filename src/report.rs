//! Console output: array echo, per-operation result lines and the summary
//! table.

use std::io::{self, Write};

use crate::runner::BenchmarkRecord;

const RULE_WIDTH: usize = 60;

/// `sequential / parallel`, or `0.0` when either time is non-positive.
pub fn safe_speedup(seq_secs: f64, par_secs: f64) -> f64 {
    if seq_secs > 0.0 && par_secs > 0.0 {
        seq_secs / par_secs
    } else {
        0.0
    }
}

/// Writes the run header.
pub fn write_header<W: Write>(
    out: &mut W,
    len: usize,
    workers: usize,
    seed: u64,
) -> io::Result<()> {
    writeln!(
        out,
        "reduce-bench starting (len={len}, workers={workers}, seed={seed})"
    )
}

/// Echoes the generated array on one line.
pub fn write_array<W: Write>(out: &mut W, data: &[i32]) -> io::Result<()> {
    write!(out, "\nArray Elements:")?;
    for value in data {
        write!(out, " {value}")?;
    }
    writeln!(out)
}

/// `Minimum (Seq): 1, Parallel: 1`
pub fn write_result_line<W: Write>(out: &mut W, record: &BenchmarkRecord) -> io::Result<()> {
    writeln!(
        out,
        "{} (Seq): {}, Parallel: {}",
        record.operation.label(),
        record.sequential,
        record.parallel
    )
}

/// Writes the fixed-width timing table.
pub fn write_summary<W: Write>(out: &mut W, records: &[BenchmarkRecord]) -> io::Result<()> {
    let rule = "-".repeat(RULE_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(
        out,
        "{:<15}{:<14}{:<14}{}",
        "Operation", "Seq Time (s)", "Par Time (s)", "Speedup"
    )?;
    writeln!(out, "{rule}")?;
    for record in records {
        writeln!(out, "{}", format_row(record))?;
    }
    writeln!(out, "{rule}")
}

/// One table row, `<Operation><SeqTime><ParTime><Speedup>x`.
pub fn format_row(record: &BenchmarkRecord) -> String {
    format!(
        "{:<15}{:<14.6}{:<14.6}{:.2}x",
        record.operation.label(),
        record.timing.seq_secs(),
        record.timing.par_secs(),
        record.speedup
    )
}
