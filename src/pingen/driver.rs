//! Run orchestration
//!
//! A run checks the base path once, parses every discovered variant file exactly
//! once, then writes one header per variant that produced pins. Per-file errors
//! go into the caller's [`Report`]; only precondition failures return early.

use crate::pingen::config::PingenConfig;
use crate::pingen::discovery::discover;
use crate::pingen::header::{write_header, GeneratedHeader, HeaderTarget};
use crate::pingen::pins::PinTable;
use crate::pingen::report::{DriverError, Report};
use crate::pingen::variants::Dialect;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The parse result for one variant file.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedVariant {
    pub variant: String,
    pub family: String,
    pub dialect: Dialect,
    pub pins: PinTable,
}

/// Parse results keyed by source file path.
pub type VariantResults = BTreeMap<PathBuf, ParsedVariant>;

/// Verify the base path and the required vendor's hardware directory exist.
pub fn check_base_path(base: &Path, required_vendor: &str) -> Result<(), DriverError> {
    if !base.exists() {
        return Err(DriverError::MissingBasePath(base.to_path_buf()));
    }

    let hardware = base.join("packages").join(required_vendor).join("hardware");
    if !hardware.exists() {
        return Err(DriverError::MissingHardware(hardware));
    }
    Ok(())
}

/// Parse every variant file below `base`.
pub fn collect_variants(base: &Path, config: &PingenConfig, report: &mut Report) -> VariantResults {
    discover(base, &config.discovery)
        .into_iter()
        .map(|file| {
            let pins = file.dialect.parse_file(&file.path, report);
            let parsed = ParsedVariant {
                variant: file.target.variant,
                family: file.target.family,
                dialect: file.dialect,
                pins,
            };
            (file.path, parsed)
        })
        .collect()
}

/// Check, parse and write headers for every variant below `base`.
pub fn generate(
    base: &Path,
    config: &PingenConfig,
    report: &mut Report,
) -> Result<Vec<GeneratedHeader>, DriverError> {
    check_base_path(base, &config.discovery.required_vendor)?;
    let results = collect_variants(base, config, report);
    write_headers(&results, config)
}

/// Write one header per non-empty result.
pub fn write_headers(
    results: &VariantResults,
    config: &PingenConfig,
) -> Result<Vec<GeneratedHeader>, DriverError> {
    let mut generated = Vec::new();
    for parsed in results.values() {
        let target = HeaderTarget::new(&parsed.variant, &parsed.family);
        let written = write_header(
            &config.output.dir,
            config.output.group_by_family,
            &target,
            &parsed.pins,
        )
        .map_err(|e| DriverError::Io(e.to_string()))?;
        generated.extend(written);
    }
    Ok(generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_base_path() {
        let err = check_base_path(Path::new("/definitely/not/here"), "arduino").unwrap_err();
        assert_eq!(
            err,
            DriverError::MissingBasePath(PathBuf::from("/definitely/not/here"))
        );
    }

    #[test]
    fn test_missing_hardware_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_base_path(dir.path(), "arduino").unwrap_err();
        assert_eq!(
            err,
            DriverError::MissingHardware(dir.path().join("packages/arduino/hardware"))
        );
    }

    #[test]
    fn test_present_hardware_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("packages/arduino/hardware")).unwrap();
        assert!(check_base_path(dir.path(), "arduino").is_ok());
    }
}
