//! Layered run configuration: defaults, then an optional TOML file, then
//! command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{BenchError, Result};

/// Worker threads used when nothing else is configured.
pub const DEFAULT_THREADS: usize = 4;

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Worker threads in the parallel pool.
    pub threads: usize,
    /// Fixed RNG seed; `None` uses the process seed.
    pub seed: Option<u64>,
    /// Print the generated array before benchmarking.
    pub echo_array: bool,
    /// Write a JSON report here.
    pub json_out: Option<PathBuf>,
    /// Write a CSV report here.
    pub csv_out: Option<PathBuf>,
    /// File the settings were read from, if any.
    pub source: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            seed: None,
            echo_array: true,
            json_out: None,
            csv_out: None,
            source: None,
        }
    }
}

/// Values supplied on the command line; `None` keeps the lower layer.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// `--threads`
    pub threads: Option<usize>,
    /// `--seed`
    pub seed: Option<u64>,
    /// `--no-echo`
    pub no_echo: bool,
    /// `--json`
    pub json_out: Option<PathBuf>,
    /// `--csv`
    pub csv_out: Option<PathBuf>,
}

impl BenchConfig {
    /// Reads `explicit`, or the default location when `None`. A missing file
    /// yields the defaults.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self> {
        let path = explicit.or_else(default_config_path);
        match path {
            Some(path) if path.exists() => {
                let contents = fs::read_to_string(&path)?;
                Self::from_toml_str(&contents, &path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Parses settings from TOML text; `path` is used for error messages.
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self> {
        let raw: RawConfig = toml::from_str(contents).map_err(|source| BenchError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        let defaults = Self::default();
        let config = Self {
            threads: raw.threads.unwrap_or(defaults.threads),
            seed: raw.seed,
            echo_array: raw.echo_array.unwrap_or(defaults.echo_array),
            json_out: raw.export.json,
            csv_out: raw.export.csv,
            source: Some(path.to_path_buf()),
        };
        debug!(path = %path.display(), "loaded config file");
        config.validate()
    }

    /// Applies command-line overrides on top of this config.
    pub fn apply(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(threads) = overrides.threads {
            self.threads = threads;
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        if overrides.no_echo {
            self.echo_array = false;
        }
        if let Some(json) = overrides.json_out {
            self.json_out = Some(json);
        }
        if let Some(csv) = overrides.csv_out {
            self.csv_out = Some(csv);
        }
        self.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.threads == 0 {
            return Err(BenchError::InvalidConfig(
                "threads must be at least 1".into(),
            ));
        }
        Ok(self)
    }
}

/// `$XDG_CONFIG_HOME/reduce-bench/config.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("reduce-bench").join("config.toml"))
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    threads: Option<usize>,
    seed: Option<u64>,
    echo_array: Option<bool>,
    #[serde(default)]
    export: ExportSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExportSection {
    json: Option<PathBuf>,
    csv: Option<PathBuf>,
}
