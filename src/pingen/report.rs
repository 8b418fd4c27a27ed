//! Errors and the per-run error report
//!
//! Per-file problems are [`VariantError`]s. They never abort a run: the driver
//! records them in a [`Report`] that it threads through every parse, and the
//! affected variant simply produces an empty pin table. Only [`DriverError`]s,
//! which are checked before any file is read, stop the run.

use log::error;
use std::fmt;
use std::path::PathBuf;

/// A problem with one variant file.
#[derive(Debug, Clone, PartialEq)]
pub enum VariantError {
    /// The file could not be read
    Io { path: PathBuf, message: String },
    /// A bracketed declaration held no usable records
    NoPins { path: PathBuf },
    /// Port and bit-mask tables have different lengths
    PortBitMismatch {
        path: PathBuf,
        ports: usize,
        bits: usize,
    },
    /// A parallel-table file with neither tables nor an include
    NoPinsOrInclude { path: PathBuf },
    /// Following includes led back to a file already on the chain
    CircularInclude { path: PathBuf, chain: Vec<PathBuf> },
    /// An include pointed at a file that does not exist
    MissingInclude { from: PathBuf, target: PathBuf },
}

impl fmt::Display for VariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantError::Io { path, message } => {
                write!(f, "cannot read {}: {}", path.display(), message)
            }
            VariantError::NoPins { path } => write!(f, "no pins found in {}", path.display()),
            VariantError::PortBitMismatch { path, ports, bits } => write!(
                f,
                "ports/pins mismatch in {} ({} ports, {} pins)",
                path.display(),
                ports,
                bits
            ),
            VariantError::NoPinsOrInclude { path } => {
                write!(f, "no pins or include reference found in {}", path.display())
            }
            VariantError::CircularInclude { path, chain } => {
                write!(f, "circular include of {} via ", path.display())?;
                let chain: Vec<String> = chain.iter().map(|p| p.display().to_string()).collect();
                write!(f, "{}", chain.join(" -> "))
            }
            VariantError::MissingInclude { from, target } => write!(
                f,
                "{} includes {}, which does not exist",
                from.display(),
                target.display()
            ),
        }
    }
}

impl std::error::Error for VariantError {}

/// A precondition failure that stops the run before any parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverError {
    MissingBasePath(PathBuf),
    MissingHardware(PathBuf),
    Config(String),
    Io(String),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::MissingBasePath(path) => {
                write!(f, "Can't find base path: {}", path.display())
            }
            DriverError::MissingHardware(path) => {
                write!(f, "Can't find hardware at: {}", path.display())
            }
            DriverError::Config(msg) => write!(f, "Configuration error: {}", msg),
            DriverError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for DriverError {}

impl From<config::ConfigError> for DriverError {
    fn from(err: config::ConfigError) -> Self {
        DriverError::Config(err.to_string())
    }
}

/// Accumulates per-file errors for one run.
#[derive(Debug, Default)]
pub struct Report {
    errors: Vec<VariantError>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and keep an error. Errors are only ever added.
    pub fn record(&mut self, err: VariantError) {
        error!("{}", err);
        self.errors.push(err);
    }

    pub fn errors(&self) -> &[VariantError] {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Process exit status: the error count, saturated so it never wraps to 0.
    pub fn exit_code(&self) -> i32 {
        self.errors.len().min(255) as i32
    }
}
