//! Clap command tree definition.

use clap::{Arg, Command};

/// Build the `snapconv` command.
pub fn build_cli() -> Command {
    Command::new("snapconv")
        .about("Convert a Gadget-1 snapshot to a columnar container")
        .arg(
            Arg::new("source")
                .required(true)
                .help("Gadget filename base, EXCLUDING any \".0\" fragment suffix"),
        )
        .arg(
            Arg::new("dest")
                .required(true)
                .help("Output container root; created on the fly"),
        )
        .arg(
            Arg::new("time-ic")
                .long("time-ic")
                .value_parser(clap::value_parser!(f64))
                .help("Time of the simulation's ICs, default is the snapshot time"),
        )
        .arg(
            Arg::new("unit-system")
                .long("unit-system")
                .default_value("Kpc")
                .help("Length unit system: Mpc or Kpc"),
        )
        .arg(
            Arg::new("subsample")
                .long("subsample")
                .value_parser(clap::value_parser!(u64))
                .help("Keep every n-th particle"),
        )
}
