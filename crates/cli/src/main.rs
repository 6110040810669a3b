//! snapconv — convert Gadget-1 snapshots to a columnar container.
//!
//! Gadget-1 carries no metadata, so the unit system and (optionally) the IC
//! time come from the command line; everything else is reconstructed from
//! the snapshot itself. For a multi-file snapshot pass the filename base,
//! i.e. excluding ".0".

mod commands;

use std::process;

use snapconv_bigfile::BigfileWriter;
use snapconv_core::{Result, Settings, UnitSystem};
use snapconv_engine::convert;
use tracing_subscriber::EnvFilter;

use commands::build_cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let matches = build_cli().get_matches();
    if let Err(e) = run(&matches) {
        eprintln!("snapconv: {}", e);
        process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let source = matches.get_one::<String>("source").cloned().unwrap_or_default();
    let dest = matches.get_one::<String>("dest").cloned().unwrap_or_default();
    let time_ic = matches.get_one::<f64>("time-ic").copied();
    let subsample = matches.get_one::<u64>("subsample").copied();
    let unit_system: UnitSystem = matches
        .get_one::<String>("unit-system")
        .map(String::as_str)
        .unwrap_or("Kpc")
        .parse()?;

    let settings = Settings::new(source, dest, time_ic, unit_system, subsample)?;
    let mut sink = BigfileWriter::new(&settings.dest)?;
    let summary = convert(&settings, &mut sink)?;

    println!(
        "converted {} fragment(s) into {} dataset(s): {} particles, columns [{}]",
        summary.fragments,
        summary.datasets.len(),
        summary.particles,
        summary.columns.join(", ")
    );
    Ok(())
}
