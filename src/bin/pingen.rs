//! Command-line interface for pingen
//! Scans an Arduino data directory for board variants and writes one DirectIO pin
//! header per variant.
//!
//! Usage:
//!   pingen `<base-path>` [--config `<file>`] [--output `<dir>`] [--flat]   - Write headers
//!   pingen `<base-path>` --format json                                 - Print pin tables
//!
//! The exit status is the number of variant files that failed to parse.

use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use pingen::pingen::config::{Loader, PingenConfig};
use pingen::pingen::driver::{check_base_path, collect_variants, generate};
use pingen::pingen::report::{DriverError, Report};
use std::path::Path;

/// Project configuration picked up from the working directory when `--config` is absent.
const LOCAL_CONFIG_FILE: &str = "pingen.toml";

fn main() {
    let matches = Command::new("pingen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate DirectIO pin headers from Arduino board variants")
        .arg_required_else_help(true)
        .arg(
            Arg::new("base-path")
                .help("Arduino data directory containing packages/<vendor>/hardware")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults (default: ./pingen.toml if present)"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Directory that receives the generated headers"),
        )
        .arg(
            Arg::new("flat")
                .long("flat")
                .help("Do not nest headers under their hardware family")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output: 'headers' writes files, 'json' prints pin tables")
                .value_parser(["headers", "json"])
                .default_value("headers"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable debug messages")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let mut builder = env_logger::Builder::from_default_env();
    if matches.get_flag("verbose") {
        builder.filter(None, LevelFilter::Debug);
    } else {
        builder.filter(None, LevelFilter::Info);
    }
    builder.init();

    let base = matches
        .get_one::<String>("base-path")
        .expect("base-path is required");
    let config = load_config(
        matches.get_one::<String>("config"),
        matches.get_one::<String>("output"),
        matches.get_flag("flat"),
    )
    .unwrap_or_else(|e| fail(&e));
    let format = matches
        .get_one::<String>("format")
        .expect("format has a default");

    let code = run(Path::new(base), &config, format).unwrap_or_else(|e| fail(&e));
    std::process::exit(code);
}

/// Layer the user's config file and CLI flags over the defaults.
fn load_config(
    file: Option<&String>,
    output: Option<&String>,
    flat: bool,
) -> Result<PingenConfig, DriverError> {
    let mut loader = match file {
        Some(file) => Loader::new().with_file(file),
        None => Loader::new().with_optional_file(LOCAL_CONFIG_FILE),
    };
    if let Some(output) = output {
        loader = loader.set_override("output.dir", output.as_str())?;
    }
    if flat {
        loader = loader.set_override("output.group_by_family", false)?;
    }
    Ok(loader.build()?)
}

/// Run one generation pass and return the process exit status.
fn run(base: &Path, config: &PingenConfig, format: &str) -> Result<i32, DriverError> {
    let mut report = Report::new();

    match format {
        "json" => {
            check_base_path(base, &config.discovery.required_vendor)?;
            let results = collect_variants(base, config, &mut report);
            let json = serde_json::to_string_pretty(&results)
                .map_err(|e| DriverError::Io(e.to_string()))?;
            println!("{}", json);
        }
        _ => {
            generate(base, config, &mut report)?;
        }
    }

    Ok(report.exit_code())
}

/// Print a fatal error with usage guidance and exit with status 1.
fn fail(err: &DriverError) -> ! {
    eprintln!("{}", err);
    eprintln!();
    eprintln!("usage: pingen <base-path> [--config <file>] [--output <dir>] [--flat]");
    std::process::exit(1);
}
