//! End-to-end runs of the library driver over the fixture tree

use pingen::pingen::config::{Loader, PingenConfig};
use pingen::pingen::driver::{collect_variants, generate};
use pingen::pingen::report::{DriverError, Report, VariantError};
use pingen::pingen::variants::Dialect;
use std::path::{Path, PathBuf};

fn boards() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/boards")
}

fn config_with_output(out: &Path) -> PingenConfig {
    Loader::new()
        .set_override("output.dir", out.to_string_lossy().into_owned())
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn test_every_file_parsed_once() {
    let out = tempfile::tempdir().unwrap();
    let mut report = Report::new();
    let results = collect_variants(&boards(), &config_with_output(out.path()), &mut report);

    assert_eq!(results.len(), 12);
    let bracketed = results
        .values()
        .filter(|v| v.dialect == Dialect::Bracketed)
        .count();
    assert_eq!(bracketed, 3);

    let empty: Vec<&str> = results
        .values()
        .filter(|v| v.pins.is_empty())
        .map(|v| v.variant.as_str())
        .collect();
    assert_eq!(empty.len(), report.error_count());
}

#[test]
fn test_error_kinds_from_fixtures() {
    let out = tempfile::tempdir().unwrap();
    let mut report = Report::new();
    collect_variants(&boards(), &config_with_output(out.path()), &mut report);

    let count = |pred: fn(&VariantError) -> bool| report.errors().iter().filter(|e| pred(e)).count();
    assert_eq!(count(|e| matches!(e, VariantError::PortBitMismatch { .. })), 1);
    assert_eq!(count(|e| matches!(e, VariantError::CircularInclude { .. })), 2);
    assert_eq!(count(|e| matches!(e, VariantError::MissingInclude { .. })), 1);
    assert_eq!(count(|e| matches!(e, VariantError::NoPinsOrInclude { .. })), 1);
    assert_eq!(count(|e| matches!(e, VariantError::NoPins { .. })), 1);
    assert_eq!(report.exit_code(), 6);
}

#[test]
fn test_generate_writes_only_non_empty_variants() {
    let out = tempfile::tempdir().unwrap();
    let mut report = Report::new();
    let generated = generate(&boards(), &config_with_output(out.path()), &mut report).unwrap();

    let mut written: Vec<PathBuf> = generated
        .iter()
        .map(|g| g.path.strip_prefix(out.path()).unwrap().to_path_buf())
        .collect();
    written.sort();
    assert_eq!(
        written,
        vec![
            PathBuf::from("avr/eightanaloginputs.h"),
            PathBuf::from("avr/ethernet.h"),
            PathBuf::from("avr/mega.h"),
            PathBuf::from("avr/standard.h"),
            PathBuf::from("sam/arduino_due_x.h"),
            PathBuf::from("samd/mkrzero.h"),
        ]
    );
    let pins: usize = generated.iter().map(|g| g.pins).sum();
    assert_eq!(pins, 20 * 3 + 6 + 5 + 4);
}

#[test]
fn test_generate_checks_base_path_first() {
    let mut report = Report::new();
    let config = Loader::new().build().unwrap();
    let err = generate(Path::new("/no/such/base"), &config, &mut report).unwrap_err();

    assert!(matches!(err, DriverError::MissingBasePath(_)));
    assert!(report.is_clean());
}
