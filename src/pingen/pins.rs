//! Pin data model
//!
//! A [`PinTable`] is the result of scanning one variant file: the ordered
//! [`PinRecord`]s it describes. Tables are built once by a parser and never
//! mutated afterwards.

use serde::{Serialize, Serializer};
use std::fmt;

/// A hardware I/O port, named by a single letter from `A` to `L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port(char);

impl Port {
    /// Validate a port letter. Only uppercase `A`..=`L` are ports.
    pub fn from_letter(letter: char) -> Option<Self> {
        matches!(letter, 'A'..='L').then_some(Port(letter))
    }

    pub fn letter(self) -> char {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Port {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.0)
    }
}

/// One logical digital pin and the port/bit it drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PinRecord {
    pub pin_index: usize,
    pub port: Port,
    pub bit: u32,
}

impl PinRecord {
    pub fn new(pin_index: usize, port: Port, bit: u32) -> Self {
        Self {
            pin_index,
            port,
            bit,
        }
    }
}

/// Port and bit columns of different lengths cannot be zipped into pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMismatch {
    pub ports: usize,
    pub bits: usize,
}

/// Ordered pin records recovered from one variant file.
///
/// An empty table is meaningful: the variant has no usable pins, or its parse
/// failure has already been reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PinTable {
    records: Vec<PinRecord>,
}

impl PinTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Zip parallel port and bit columns; pin indices follow position.
    pub fn from_columns(ports: &[Port], bits: &[u32]) -> Result<Self, ColumnMismatch> {
        if ports.len() != bits.len() {
            return Err(ColumnMismatch {
                ports: ports.len(),
                bits: bits.len(),
            });
        }

        let records = ports
            .iter()
            .zip(bits)
            .enumerate()
            .map(|(pin_index, (&port, &bit))| PinRecord::new(pin_index, port, bit))
            .collect();
        Ok(Self { records })
    }

    pub fn records(&self) -> &[PinRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PinRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a PinTable {
    type Item = &'a PinRecord;
    type IntoIter = std::slice::Iter<'a, PinRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Builds a table one physical slot at a time.
///
/// Every slot consumes an index, usable or not, so that logical pin numbers stay
/// aligned with the board's pin header.
#[derive(Debug, Default)]
pub struct SlotBuilder {
    next_index: usize,
    records: Vec<PinRecord>,
}

impl SlotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a slot that maps to a port/bit.
    pub fn usable(&mut self, port: Port, bit: u32) {
        self.records.push(PinRecord::new(self.next_index, port, bit));
        self.next_index += 1;
    }

    /// Record a slot that cannot be used as a digital pin.
    pub fn unusable(&mut self) {
        self.next_index += 1;
    }

    pub fn finish(self) -> PinTable {
        PinTable {
            records: self.records,
        }
    }
}
