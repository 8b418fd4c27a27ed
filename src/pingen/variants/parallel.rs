//! Parallel-table dialect (`pins_arduino.*`)
//!
//! AVR variants describe pins with two arrays indexed by pin number: one of port
//! macros (`PD`, `PORT_B`) and one of bit masks (`_BV(3)`). Pin `n` is the `n`th
//! entry of each. Many variants are thin aliases that only
//! `#include "../<base>/pins_arduino.h"`; those are resolved by parsing the base.

use crate::pingen::patterns::{classify_parallel, ParallelLine, TableState};
use crate::pingen::pins::{PinTable, Port};
use crate::pingen::report::VariantError;
use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of scanning one parallel-table file.
#[derive(Debug, Clone, PartialEq)]
pub enum ParallelScan<'a> {
    /// The file's own tables, possibly empty or of unequal length
    Table { ports: Vec<Port>, bits: Vec<u32> },
    /// The file forwards to another variant; the relative target as written
    Include(&'a str),
}

/// Scan the text of a parallel-table variant file.
///
/// Scanning stops at the first include found outside a table: the file is a
/// forwarding stub and contributes no pins of its own.
pub fn scan_source(source: &str) -> ParallelScan<'_> {
    let mut state = TableState::Outside;
    let mut ports = Vec::new();
    let mut bits = Vec::new();

    for line in source.lines() {
        match classify_parallel(line, state) {
            ParallelLine::PortTableStart => state = TableState::Ports,
            ParallelLine::BitTableStart => state = TableState::Bits,
            ParallelLine::TableEnd => state = TableState::Outside,
            ParallelLine::Port(port) => ports.push(port),
            ParallelLine::Bit(bit) => bits.push(bit),
            ParallelLine::Include(target) => return ParallelScan::Include(target),
            ParallelLine::Other => {}
        }
    }

    ParallelScan::Table { ports, bits }
}

/// `pins_arduino.c` tables are sometimes shared by several MCUs behind
/// preprocessor conditionals, which a line scanner flattens into one table.
pub fn may_combine_variants(path: &Path) -> bool {
    path.to_string_lossy().ends_with("pins_arduino.c")
}

/// Parses parallel-table files, following includes to the variant that
/// actually defines the tables.
#[derive(Debug, Default)]
pub struct ParallelTableParser {
    /// Files currently being resolved, as (canonical, as-given) paths
    chain: Vec<(PathBuf, PathBuf)>,
}

impl ParallelTableParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `path`, resolving includes relative to its directory.
    pub fn parse_file(&mut self, path: &Path) -> Result<PinTable, VariantError> {
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if self.chain.iter().any(|(seen, _)| *seen == key) {
            let mut chain: Vec<PathBuf> = self.chain.iter().map(|(_, p)| p.clone()).collect();
            chain.push(path.to_path_buf());
            return Err(VariantError::CircularInclude {
                path: path.to_path_buf(),
                chain,
            });
        }

        info!("reading {}", path.display());
        let bytes = fs::read(path).map_err(|e| self.read_error(path, e))?;
        let source = String::from_utf8_lossy(&bytes);
        if may_combine_variants(path) {
            warn!(
                "check generated pins for {}; multiple MCU variants may be combined",
                path.display()
            );
        }

        self.chain.push((key, path.to_path_buf()));
        let result = self.resolve(path, scan_source(&source));
        self.chain.pop();
        result
    }

    fn resolve(&mut self, path: &Path, scan: ParallelScan<'_>) -> Result<PinTable, VariantError> {
        match scan {
            ParallelScan::Include(target) => {
                let target_path = path.parent().unwrap_or(Path::new("")).join(target);
                info!("{} -> {}", path.display(), target);
                self.parse_file(&target_path)
            }
            ParallelScan::Table { ports, bits } => {
                let table = PinTable::from_columns(&ports, &bits).map_err(|mismatch| {
                    VariantError::PortBitMismatch {
                        path: path.to_path_buf(),
                        ports: mismatch.ports,
                        bits: mismatch.bits,
                    }
                })?;
                if table.is_empty() {
                    return Err(VariantError::NoPinsOrInclude {
                        path: path.to_path_buf(),
                    });
                }
                Ok(table)
            }
        }
    }

    fn read_error(&self, path: &Path, err: io::Error) -> VariantError {
        match self.chain.last() {
            Some((_, from)) if err.kind() == io::ErrorKind::NotFound => {
                VariantError::MissingInclude {
                    from: from.clone(),
                    target: path.to_path_buf(),
                }
            }
            _ => VariantError::Io {
                path: path.to_path_buf(),
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(letter: char) -> Port {
        Port::from_letter(letter).unwrap()
    }

    const UNO_LIKE: &str = "\
#include <avr/pgmspace.h>

const uint8_t PROGMEM digital_pin_to_port_PGM[] = {
\tPA, /* 0 */
\tPA,
\tPB,
};

const uint8_t PROGMEM digital_pin_to_bit_mask_PGM[] = {
\t_BV(0), /* 0, port A */
\t_BV(1),
\t_BV(13),
};
";

    #[test]
    fn test_scan_collects_both_columns() {
        assert_eq!(
            scan_source(UNO_LIKE),
            ParallelScan::Table {
                ports: vec![port('A'), port('A'), port('B')],
                bits: vec![0, 1, 13],
            }
        );
    }

    #[test]
    fn test_scan_stops_at_include() {
        let source = "#include \"../standard/pins_arduino.h\"\nconst uint8_t PROGMEM digital_pin_to_port_PGM[] = {\n\tPB,\n};\n";
        assert_eq!(
            scan_source(source),
            ParallelScan::Include("../standard/pins_arduino.h")
        );
    }

    #[test]
    fn test_include_inside_table_is_not_followed() {
        let source = "\
const uint8_t PROGMEM digital_pin_to_port_PGM[] = {
#include \"../standard/pins_arduino.h\"
\tPC,
};
";
        assert_eq!(
            scan_source(source),
            ParallelScan::Table {
                ports: vec![port('C')],
                bits: vec![],
            }
        );
    }

    #[test]
    fn test_only_c_tables_may_combine_variants() {
        assert!(may_combine_variants(Path::new("variants/gemma/pins_arduino.c")));
        assert!(!may_combine_variants(Path::new("variants/standard/pins_arduino.h")));
    }

    #[test]
    fn test_other_arrays_are_ignored() {
        let source = "\
const uint16_t PROGMEM port_to_mode_PGM[] = {
\tPA,
};
const uint8_t PROGMEM digital_pin_to_timer_PGM[] = {
\t_BV(4),
};
";
        assert_eq!(
            scan_source(source),
            ParallelScan::Table {
                ports: vec![],
                bits: vec![],
            }
        );
    }
}
