//! Bracketed-record dialect (`variant.cpp`)
//!
//! The pin table is a `g_APinDescription` array with one `{ ... }` initializer per
//! physical pin. Records that do not start with a port and bit (empty braces,
//! `NOT_A_PORT`, analog-only entries) still take up a pin number.

use crate::pingen::patterns::{classify_bracketed, BracketedLine};
use crate::pingen::pins::{PinTable, SlotBuilder};
use crate::pingen::report::VariantError;
use log::info;
use std::fs;
use std::path::Path;

/// Scan the text of a bracketed variant file.
pub fn parse_source(source: &str) -> PinTable {
    let mut inside_declaration = false;
    let mut slots = SlotBuilder::new();

    for line in source.lines() {
        match classify_bracketed(line) {
            BracketedLine::Comment => {}
            BracketedLine::DeclarationStart => inside_declaration = true,
            BracketedLine::DeclarationEnd => inside_declaration = false,
            BracketedLine::Record(data) if inside_declaration => match data {
                Some((port, bit)) => slots.usable(port, bit),
                None => slots.unusable(),
            },
            BracketedLine::Record(_) | BracketedLine::Other => {}
        }
    }

    slots.finish()
}

/// Read and scan a bracketed variant file. A table without usable pins is an error.
pub fn parse_file(path: &Path) -> Result<PinTable, VariantError> {
    info!("reading {}", path.display());
    let bytes = fs::read(path).map_err(|e| VariantError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    // Vendor files are not always UTF-8; only ASCII landmarks matter
    let table = parse_source(&String::from_utf8_lossy(&bytes));
    if table.is_empty() {
        return Err(VariantError::NoPins {
            path: path.to_path_buf(),
        });
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pingen::pins::{PinRecord, Port};

    fn record(pin_index: usize, letter: char, bit: u32) -> PinRecord {
        PinRecord::new(pin_index, Port::from_letter(letter).unwrap(), bit)
    }

    #[test]
    fn test_empty_record_consumes_an_index() {
        let source = "\
extern const PinDescription g_APinDescription[]=
{
  {PORTA, 5},
  {},
  {PORTB, PIO_PC2},
} ;
";
        let table = parse_source(source);
        assert_eq!(table.records(), &[record(0, 'A', 5), record(2, 'B', 2)]);
    }

    #[test]
    fn test_records_outside_declaration_are_ignored() {
        let source = "\
static const Foo other[] = {
  { PORTC, 1 },
};
const PinDescription g_APinDescription[]=
{
  { PIOD, 3 },
}
  { PORTE, 4 },
";
        let table = parse_source(source);
        assert_eq!(table.records(), &[record(0, 'D', 3)]);
    }

    #[test]
    fn test_commented_records_do_not_count() {
        let source = "\
const PinDescription g_APinDescription[]=
{
  // { PORTA, 9 },
  { PORTA, 1 },
}
";
        let table = parse_source(source);
        assert_eq!(table.records(), &[record(0, 'A', 1)]);
    }

    #[test]
    fn test_declaration_without_records_is_empty() {
        let source = "const PinDescription g_APinDescription[]=\n{\n}\n";
        assert!(parse_source(source).is_empty());
    }
}
