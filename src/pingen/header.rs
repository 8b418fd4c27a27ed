//! Header generation
//!
//! Turns a variant's [`PinTable`] into the `_define_pin(...)` declarations the
//! DirectIO library includes for that board. An empty table produces no header:
//! the absence of the file is how a variant without usable pins shows up.

use crate::pingen::pins::PinTable;
use log::info;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where a variant's header goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderTarget {
    /// Variant directory name, e.g. `standard` or `arduino_due_x`
    pub variant: String,
    /// Hardware family directory name, e.g. `avr` or `sam`
    pub family: String,
}

impl HeaderTarget {
    pub fn new(variant: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            family: family.into(),
        }
    }

    /// `<out_dir>/<family>/<variant>.h`, or `<out_dir>/<variant>.h` when not grouping.
    pub fn output_path(&self, out_dir: &Path, group_by_family: bool) -> PathBuf {
        let dir = if group_by_family {
            out_dir.join(&self.family)
        } else {
            out_dir.to_path_buf()
        };
        dir.join(format!("{}.h", self.variant))
    }
}

/// A header that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedHeader {
    pub path: PathBuf,
    pub pins: usize,
}

/// Render the header text, or `None` when there are no pins to declare.
pub fn render_header(variant_name: &str, table: &PinTable) -> Option<String> {
    if table.is_empty() {
        return None;
    }

    let mut out = format!("// DirectIO support for {}\n\n", variant_name);
    for record in table {
        out.push_str(&format!(
            "_define_pin({}, PORT_{}, {});\n",
            record.pin_index, record.port, record.bit
        ));
    }
    Some(out)
}

/// Write the header for one variant. Returns `None` when nothing was written.
pub fn write_header(
    out_dir: &Path,
    group_by_family: bool,
    target: &HeaderTarget,
    table: &PinTable,
) -> io::Result<Option<GeneratedHeader>> {
    let Some(text) = render_header(&target.variant, table) else {
        return Ok(None);
    };

    let path = target.output_path(out_dir, group_by_family);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, text)?;
    info!("generated {} ({} pins)", path.display(), table.len());

    Ok(Some(GeneratedHeader {
        path,
        pins: table.len(),
    }))
}
