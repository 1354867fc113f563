//! Step output writer.
//!
//! Outputs are appended to the file named by `$GITHUB_OUTPUT` as
//! `name=value` lines. Without that file they are printed as legacy
//! `::set-output` commands.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const OUTPUT_FILE_ENV: &str = "GITHUB_OUTPUT";

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write output file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Output value for '{0}' must be a single line")]
    Multiline(String),
}

/// Destination for step outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutput {
    File(PathBuf),
    Stdout,
}

impl WorkflowOutput {
    /// Use `$GITHUB_OUTPUT` when set and non-empty.
    pub fn from_env() -> Self {
        match std::env::var_os(OUTPUT_FILE_ENV) {
            Some(path) if !path.is_empty() => Self::File(PathBuf::from(path)),
            _ => Self::Stdout,
        }
    }

    pub fn set(&self, name: &str, value: &str) -> Result<(), OutputError> {
        if value.contains('\n') {
            return Err(OutputError::Multiline(name.to_string()));
        }
        match self {
            Self::File(path) => append_line(path, &format!("{}={}", name, value)),
            Self::Stdout => {
                println!("::set-output name={}::{}", name, value);
                Ok(())
            }
        }
    }

    /// Write the `duration` output in minutes.
    pub fn set_duration(&self, elapsed: Duration) -> Result<(), OutputError> {
        let minutes = duration_minutes(elapsed);
        debug!("duration output: {} minutes", minutes);
        self.set("duration", &minutes.to_string())
    }
}

/// Elapsed time in fractional minutes.
pub fn duration_minutes(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() / 60.0
}

fn append_line(path: &Path, line: &str) -> Result<(), OutputError> {
    let to_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)?;
    writeln!(file, "{}", line).map_err(to_error)
}
