//! Line Patterns for Variant Files
//!
//! This module defines the syntactic landmarks of the two variant dialects. Nothing
//! here parses C: each pattern recognises one shape of line that vendors actually
//! write, and the parsers in [`crate::pingen::variants`] decide what the landmark
//! means given their current state.
//!
//! # Bracketed dialect (`variant.cpp`)
//!
//! ```text
//! extern const PinDescription g_APinDescription[]=
//! {
//!   { PIOA, PIO_PA8A_URXD, ID_PIOA, ... },   // pin 0
//!   { NOT_A_PORT, 0, 0, ... },               // unusable, still consumes an index
//! } ;
//! ```
//!
//! # Parallel-table dialect (`pins_arduino.h`)
//!
//! ```text
//! const uint8_t PROGMEM digital_pin_to_port_PGM[] = {
//!     PD, /* 0 */
//! };
//! const uint8_t PROGMEM digital_pin_to_bit_mask_PGM[] = {
//!     _BV(0), /* 0, port D */
//! };
//! ```

use crate::pingen::pins::Port;
use once_cell::sync::Lazy;
use regex::Regex;

/// Substring that opens the bracketed pin description table.
pub const BRACKETED_DECLARATION_START: &str = "const PinDescription g_APinDescription";

/// Prefix of the line that closes the bracketed table.
pub const BRACKETED_DECLARATION_END: &str = "}";

/// Prefix of the line that opens the port table.
pub const PORT_TABLE_START: &str = "const uint8_t PROGMEM digital_pin_to_port_PGM[";

/// Prefix of the line that opens the bit-mask table.
pub const BIT_TABLE_START: &str = "const uint8_t PROGMEM digital_pin_to_bit_mask_PGM[";

/// Prefix of the line that closes either parallel table.
pub const TABLE_END: &str = "};";

/// A `{ ... }` record anywhere on the line. Greedy, so the capture spans from the
/// first opening brace to the last closing brace.
static RECORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(.*)\}").unwrap());

/// Port letter and bit inside a record, e.g. `PORTA, 5` or `PIOB, PIO_PC2`.
static RECORD_DATA_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:PORT|PIO)([A-L]),\s*(?:PIO_P[A-F])?([0-9]+)").unwrap());

/// A port table entry: `PD` or `PORT_D`.
static PORT_ENTRY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*P(?:ORT_)?([A-L])").unwrap());

/// A bit-mask table entry: `_BV( 3 )`.
static BIT_ENTRY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*_BV\(\s*([0-9]+)\s*\)").unwrap());

/// A forwarding include to a sibling variant one directory up.
static INCLUDE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^#include "(\.\./[^/]+/pins_arduino\.h)""#).unwrap());

/// Landmark recognised on a single line of a bracketed variant file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketedLine {
    /// Full-line `//` comment, never matched against anything else
    Comment,
    DeclarationStart,
    DeclarationEnd,
    /// A `{ ... }` record. `None` when the contents carry no usable port/bit.
    Record(Option<(Port, u32)>),
    Other,
}

/// Which parallel table, if any, the scanner is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableState {
    #[default]
    Outside,
    Ports,
    Bits,
}

/// Landmark recognised on a single line of a parallel-table variant file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParallelLine<'a> {
    PortTableStart,
    BitTableStart,
    TableEnd,
    Port(Port),
    Bit(u32),
    /// Relative include target, e.g. `../standard/pins_arduino.h`
    Include(&'a str),
    Other,
}

/// Classify one line of a bracketed variant file.
///
/// The closing marker is tested before the record pattern, so a line is never
/// counted both as the end of the table and as a pin.
pub fn classify_bracketed(line: &str) -> BracketedLine {
    if line.trim().starts_with("//") {
        BracketedLine::Comment
    } else if line.contains(BRACKETED_DECLARATION_START) {
        BracketedLine::DeclarationStart
    } else if line.starts_with(BRACKETED_DECLARATION_END) {
        BracketedLine::DeclarationEnd
    } else if let Some(caps) = RECORD_REGEX.captures(line) {
        BracketedLine::Record(record_data(&caps[1]))
    } else {
        BracketedLine::Other
    }
}

/// Extract the port letter and bit from the contents of a bracketed record.
pub fn record_data(contents: &str) -> Option<(Port, u32)> {
    let caps = RECORD_DATA_REGEX.captures(contents)?;
    let port = Port::from_letter(caps[1].chars().next()?)?;
    let bit = caps[2].parse().ok()?;
    Some((port, bit))
}

/// Classify one line of a parallel-table variant file given the table being read.
///
/// Inside a table only the closing marker and that table's entries are
/// recognised. Outside, the table openers take precedence over includes.
pub fn classify_parallel(line: &str, state: TableState) -> ParallelLine<'_> {
    match state {
        TableState::Ports | TableState::Bits if line.starts_with(TABLE_END) => ParallelLine::TableEnd,
        TableState::Ports => port_entry(line).map_or(ParallelLine::Other, ParallelLine::Port),
        TableState::Bits => bit_entry(line).map_or(ParallelLine::Other, ParallelLine::Bit),
        TableState::Outside => {
            if line.starts_with(PORT_TABLE_START) {
                ParallelLine::PortTableStart
            } else if line.starts_with(BIT_TABLE_START) {
                ParallelLine::BitTableStart
            } else if let Some(target) = include_target(line) {
                ParallelLine::Include(target)
            } else {
                ParallelLine::Other
            }
        }
    }
}

/// Port letter from a port table entry line.
pub fn port_entry(line: &str) -> Option<Port> {
    let caps = PORT_ENTRY_REGEX.captures(line)?;
    Port::from_letter(caps[1].chars().next()?)
}

/// Bit number from a bit-mask table entry line.
pub fn bit_entry(line: &str) -> Option<u32> {
    let caps = BIT_ENTRY_REGEX.captures(line)?;
    caps[1].parse().ok()
}

/// Relative target of a sibling-variant include directive.
pub fn include_target(line: &str) -> Option<&str> {
    INCLUDE_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
