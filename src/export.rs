//! Machine-readable run artifacts.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use csv::Writer;
use serde::Serialize;
use sysinfo::{RefreshKind, System};
use tracing::info;

use crate::error::Result;
use crate::runner::BenchmarkReport;

/// Host details recorded next to the timings.
#[derive(Debug, Serialize)]
pub struct EnvMetadata {
    /// When the sample was taken.
    pub timestamp_utc: DateTime<Utc>,
    /// Host name, when the OS reports one.
    pub hostname: Option<String>,
    /// Long OS name and version.
    pub os_version: Option<String>,
    /// Brand string of the first CPU.
    pub cpu_brand: Option<String>,
    /// Physical cores, when detectable.
    pub cpu_physical_cores: Option<usize>,
    /// Logical cores; always at least one.
    pub cpu_logical_cores: usize,
    /// Installed memory in bytes.
    pub total_memory_bytes: u64,
}

impl EnvMetadata {
    /// Samples the current host.
    pub fn collect() -> Self {
        let mut sys = System::new_with_specifics(RefreshKind::everything());
        sys.refresh_all();
        Self {
            timestamp_utc: Utc::now(),
            hostname: System::host_name(),
            os_version: System::long_os_version(),
            cpu_brand: sys.cpus().first().map(|cpu| cpu.brand().to_string()),
            cpu_physical_cores: sys.physical_core_count(),
            cpu_logical_cores: sys.cpus().len().max(1),
            total_memory_bytes: sys.total_memory(),
        }
    }
}

#[derive(Serialize)]
struct JsonArtifact<'a> {
    env: EnvMetadata,
    report: &'a BenchmarkReport,
}

/// Writes the report plus host metadata as pretty JSON.
pub fn write_json(path: &Path, report: &BenchmarkReport) -> Result<()> {
    ensure_parent(path)?;
    let artifact = JsonArtifact {
        env: EnvMetadata::collect(),
        report,
    };
    fs::write(path, serde_json::to_vec_pretty(&artifact)?)?;
    info!(path = %path.display(), "wrote json report");
    Ok(())
}

/// Writes one CSV row per operation.
pub fn write_csv(path: &Path, report: &BenchmarkReport) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = Writer::from_path(path)?;
    writer.write_record([
        "operation",
        "sequential",
        "parallel",
        "seq_time_s",
        "par_time_s",
        "speedup",
    ])?;
    for record in &report.records {
        writer.write_record(&[
            record.operation.key().to_string(),
            record.sequential.to_string(),
            record.parallel.to_string(),
            format!("{:.9}", record.timing.seq_secs()),
            format!("{:.9}", record.timing.par_secs()),
            format!("{:.3}", record.speedup),
        ])?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = report.records.len(), "wrote csv report");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}
