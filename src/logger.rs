//! Logger setup for the binary. The library only uses the `log` macros.

use std::io::Write;

use log::LevelFilter;

/// Sends this crate's records to stderr as `LEVEL message`, at Debug with
/// `--verbose` and Info otherwise. Dependencies only get through at Warn.
pub fn init_logger(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_CRATE_NAME"), level)
        .format(|buf, record| writeln!(buf, "{:>5} {}", record.level(), record.args()))
        .init();
}
