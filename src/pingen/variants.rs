//! Variant file parsers
//!
//! Each board variant describes its pins in one of two dialects, chosen by where
//! the file was found rather than by inspecting its contents:
//!
//! - [`bracketed`]: SAM-style `variant.cpp`, one `{ ... }` record per pin
//! - [`parallel`]: AVR-style `pins_arduino.*`, parallel port and bit-mask tables,
//!   with includes followed to a shared base variant
//!
//! Both are single forward scans over the file's lines. [`Dialect::parse_file`]
//! is the common entry point used by the driver.

pub mod bracketed;
pub mod parallel;

use crate::pingen::pins::PinTable;
use crate::pingen::report::Report;
use serde::Serialize;
use std::fmt;
use std::path::Path;

pub use parallel::ParallelTableParser;

/// Source dialect of a variant file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    Bracketed,
    ParallelTable,
}

impl Dialect {
    /// Parse one variant file.
    ///
    /// Failures are recorded in `report` and produce an empty table, so one bad
    /// file never stops the others from being processed.
    pub fn parse_file(self, path: &Path, report: &mut Report) -> PinTable {
        let result = match self {
            Dialect::Bracketed => bracketed::parse_file(path),
            Dialect::ParallelTable => ParallelTableParser::new().parse_file(path),
        };

        result.unwrap_or_else(|err| {
            report.record(err);
            PinTable::empty()
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Bracketed => "bracketed",
            Dialect::ParallelTable => "parallel-table",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
