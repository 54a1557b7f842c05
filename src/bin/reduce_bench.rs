//! Binary entry point: reads N, benchmarks the four reductions and prints
//! the timing table.
#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use reduce_bench::{
    config::{BenchConfig, Overrides},
    export,
    input::{parse_len, read_len},
    logging::init_logging,
    report::{write_array, write_header, write_result_line, write_summary},
    ArrayGenerator, BenchmarkReport, BenchmarkRunner, Operation, Result,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "reduce-bench",
    version,
    about = "Sequential vs parallel min/max/sum/average over a random array"
)]
struct Args {
    /// Number of array elements; prompted for on stdin when omitted.
    #[arg(value_name = "N", allow_negative_numbers = true)]
    len: Option<String>,

    /// Worker threads for the parallel passes (default 4).
    #[arg(long, env = "REDUCE_BENCH_THREADS")]
    threads: Option<usize>,

    /// RNG seed for a reproducible array.
    #[arg(long)]
    seed: Option<u64>,

    /// Operations to run; defaults to all four.
    #[arg(long = "op", value_enum)]
    ops: Vec<Operation>,

    /// Do not print the generated array.
    #[arg(long)]
    no_echo: bool,

    /// Config file (TOML); defaults to the user config directory.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a JSON report with host metadata.
    #[arg(long = "json", value_name = "FILE")]
    json_out: Option<PathBuf>,

    /// Write a CSV report.
    #[arg(long = "csv", value_name = "FILE")]
    csv_out: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    init_logging(&args.log_level)?;
    let config = BenchConfig::load(args.config.clone())?.apply(Overrides {
        threads: args.threads,
        seed: args.seed,
        no_echo: args.no_echo,
        json_out: args.json_out.clone(),
        csv_out: args.csv_out.clone(),
    })?;
    info!(
        threads = config.threads,
        seed = ?config.seed,
        source = ?config.source,
        "configuration resolved"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let len = match args.len.as_deref() {
        Some(raw) => parse_len(raw)?,
        None => read_len(&mut io::stdin().lock(), &mut out)?,
    };

    let runner = BenchmarkRunner::new(config.threads)?;
    let mut generator = ArrayGenerator::new(config.seed);
    let data = generator.generate(len)?;

    write_header(&mut out, data.len(), runner.workers(), generator.seed())?;
    if config.echo_array {
        write_array(&mut out, &data)?;
    }
    writeln!(out)?;

    let ops = if args.ops.is_empty() {
        Operation::ALL.to_vec()
    } else {
        args.ops
    };
    let mut records = Vec::with_capacity(ops.len());
    for op in ops {
        let record = runner.run_operation(op, &data);
        write_result_line(&mut out, &record)?;
        records.push(record);
    }
    write_summary(&mut out, &records)?;
    out.flush()?;

    let report = BenchmarkReport::new(data.len(), runner.workers(), generator.seed(), records);
    if let Some(path) = config.json_out.as_deref() {
        export::write_json(path, &report)?;
    }
    if let Some(path) = config.csv_out.as_deref() {
        export::write_csv(path, &report)?;
    }
    Ok(())
}
