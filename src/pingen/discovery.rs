//! Variant file discovery
//!
//! Board packages are laid out as
//! `packages/<vendor>/hardware/<family>/<version>/variants/<variant>/<file>`.
//! The family decides the dialect: SAM families keep their pin table in
//! `variant.cpp`, AVR in `pins_arduino.h` (occasionally `pins_arduino.c`).

use crate::pingen::config::DiscoveryConfig;
use crate::pingen::header::HeaderTarget;
use crate::pingen::variants::Dialect;
use ignore::WalkBuilder;
use log::{debug, warn};
use std::path::{Component, Path, PathBuf};

const PACKAGES_DIR: &str = "packages";

/// Components below `packages/` down to and including the file name.
const LAYOUT_DEPTH: usize = 7;

const BRACKETED_FILE: &str = "variant.cpp";
const PARALLEL_FILE_PREFIX: &str = "pins_arduino.";

/// A variant file found under the base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantFile {
    pub path: PathBuf,
    pub dialect: Dialect,
    pub target: HeaderTarget,
}

/// Find every variant file below `<base>/packages`, sorted by path.
pub fn discover(base: &Path, config: &DiscoveryConfig) -> Vec<VariantFile> {
    let packages = base.join(PACKAGES_DIR);
    let walker = WalkBuilder::new(&packages)
        .standard_filters(false)
        .max_depth(Some(LAYOUT_DEPTH))
        .build();

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(&packages) else {
            continue;
        };
        if let Some((dialect, target)) = classify_path(relative, config) {
            debug!("found {} variant {}", dialect, entry.path().display());
            found.push(VariantFile {
                path: entry.path().to_path_buf(),
                dialect,
                target,
            });
        }
    }

    found.sort_by(|a, b| a.path.cmp(&b.path));
    found
}

/// Match a path relative to `packages/` against the variant layout.
pub fn classify_path(relative: &Path, config: &DiscoveryConfig) -> Option<(Dialect, HeaderTarget)> {
    let parts: Vec<&str> = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Option<_>>()?;

    let [_vendor, hardware, family, _version, variants, variant, file] = parts.as_slice() else {
        return None;
    };
    if *hardware != "hardware" || *variants != "variants" {
        return None;
    }

    let dialect = if *file == BRACKETED_FILE
        && config
            .bracketed_family_prefixes
            .iter()
            .any(|prefix| family.starts_with(prefix.as_str()))
    {
        Dialect::Bracketed
    } else if file.starts_with(PARALLEL_FILE_PREFIX)
        && config.parallel_families.iter().any(|f| f == family)
    {
        Dialect::ParallelTable
    } else {
        return None;
    };

    Some((dialect, HeaderTarget::new(*variant, *family)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pingen::config::load_defaults;
    use std::fs;

    fn discovery() -> DiscoveryConfig {
        load_defaults().unwrap().discovery
    }

    #[test]
    fn test_classify_sam_variant() {
        let rel = Path::new("arduino/hardware/sam/1.6.12/variants/arduino_due_x/variant.cpp");
        let (dialect, target) = classify_path(rel, &discovery()).unwrap();
        assert_eq!(dialect, Dialect::Bracketed);
        assert_eq!(target, HeaderTarget::new("arduino_due_x", "sam"));
    }

    #[test]
    fn test_classify_samd_uses_family_prefix() {
        let rel = Path::new("arduino/hardware/samd/1.8.3/variants/mkrzero/variant.cpp");
        let (dialect, target) = classify_path(rel, &discovery()).unwrap();
        assert_eq!(dialect, Dialect::Bracketed);
        assert_eq!(target.family, "samd");
    }

    #[test]
    fn test_classify_avr_variants() {
        let rel = Path::new("arduino/hardware/avr/1.8.6/variants/standard/pins_arduino.h");
        let (dialect, _) = classify_path(rel, &discovery()).unwrap();
        assert_eq!(dialect, Dialect::ParallelTable);

        let rel = Path::new("arduino/hardware/avr/1.8.6/variants/eightanaloginputs/pins_arduino.c");
        assert!(classify_path(rel, &discovery()).is_some());
    }

    #[test]
    fn test_classify_rejects_other_layouts() {
        let config = discovery();
        for rel in [
            "arduino/hardware/avr/1.8.6/variants/standard/variant.cpp",
            "arduino/hardware/sam/1.6.12/variants/due/pins_arduino.h",
            "arduino/hardware/avr/1.8.6/cores/arduino/pins_arduino.h",
            "arduino/tools/avr/1.8.6/variants/standard/pins_arduino.h",
            "arduino/hardware/avr/variants/standard/pins_arduino.h",
        ] {
            assert!(classify_path(Path::new(rel), &config).is_none(), "{}", rel);
        }
    }

    #[test]
    fn test_discover_sorts_results() {
        let dir = tempfile::tempdir().unwrap();
        let variants = dir.path().join("packages/arduino/hardware/avr/1.0.0/variants");
        for name in ["mega", "standard", "leonardo"] {
            fs::create_dir_all(variants.join(name)).unwrap();
            fs::write(variants.join(name).join("pins_arduino.h"), "").unwrap();
        }
        fs::write(variants.join("standard").join("notes.txt"), "").unwrap();

        let found = discover(dir.path(), &discovery());
        let names: Vec<&str> = found.iter().map(|f| f.target.variant.as_str()).collect();
        assert_eq!(names, vec!["leonardo", "mega", "standard"]);
    }
}
