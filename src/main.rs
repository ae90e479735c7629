//! demand-pager - translate logical addresses through a simulated MMU
//!
//! Usage: demand-pager [OPTIONS] <ADDRESSES>
//!
//! Arguments:
//!   ADDRESSES  - File containing one logical address per line
//!
//! Options:
//!   -o, --output <FILE>         Output file [default: output.txt]
//!   -b, --backing-store <FILE>  Backing store [default: BACKING_STORE.bin]
//!   -f, --frames <N>            Physical frames, 1-256 [default: 256]
//!   -v, --verbose               More logging (repeatable)

use std::process::ExitCode;

use clap::Parser;
use log::error;

use demand_pager::cli::{run, Config};

fn main() -> ExitCode {
    // clap exits with 2 on usage errors and 0 for --help/--version
    let config = Config::parse();

    let mut builder = env_logger::Builder::from_default_env();
    builder.format_timestamp(None);
    builder.filter_level(config.log_level());
    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    }
    builder.try_init().unwrap_or_default();

    match run(&config) {
        Ok(_) => {
            println!("Successfully generated output file '{}'", config.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            e.exit_code()
        }
    }
}
