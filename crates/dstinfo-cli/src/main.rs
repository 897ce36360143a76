//! `dstinfo` — print the local UTC offset and the next two DST transitions.
//!
//! ## Usage
//!
//! ```sh
//! # Inspect the OS-configured zone
//! dstinfo
//!
//! # Inspect another zone
//! TZ=America/Los_Angeles dstinfo
//! ```
//!
//! Library diagnostics go to stderr at `warn` and above; set `RUST_LOG` to
//! change the filter (e.g. `RUST_LOG=debug` shows the detected zone).
//!
//! Exits with status 1 if the clock could not be read or any line could not
//! be produced; the lines that could be produced are still printed.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tz_inspect::report::DEFAULT_TRANSITIONS;
use tz_inspect::{Report, TimeZoneInspector};

#[derive(Parser)]
#[command(
    name = "dstinfo",
    version,
    about = "Print the local UTC offset and upcoming daylight saving time transitions"
)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let now = tz_inspect::inspector::now().context("Unable to determine system time")?;
    let inspector = TimeZoneInspector::local();
    let report = Report::build(&inspector, now, DEFAULT_TRANSITIONS);

    for line in &report.lines {
        println!("{}", line);
    }
    for failure in &report.failures {
        eprintln!("dstinfo: {}", failure);
    }

    if !report.is_clean() {
        process::exit(1);
    }
    Ok(())
}
