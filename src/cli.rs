//! Command-line configuration and the file-to-file simulation driver.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::{error, info, LevelFilter};

use crate::backing_store::BackingStore;
use crate::constants::*;
use crate::error::Result;
use crate::io::{read_virtual_addresses, ResultSink, Statistics};
use crate::vm_manager::VmManager;

#[derive(Parser, Debug, Clone)]
#[command(name = "demand-pager")]
#[command(about = "Translate logical addresses to physical addresses with demand paging")]
#[command(version)]
pub struct Config {
    /// File with one logical address per line
    pub addresses: PathBuf,

    /// Where translations and fault statistics are written
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Binary file that pages are loaded from
    #[arg(short, long, default_value = DEFAULT_BACKING_STORE)]
    pub backing_store: PathBuf,

    /// Number of physical frames
    #[arg(short, long, default_value_t = MAX_FRAMES, value_parser = parse_frames)]
    pub frames: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_frames(s: &str) -> std::result::Result<usize, String> {
    let frames: usize = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if frames == 0 || frames > MAX_FRAMES {
        return Err(format!("must be between 1 and {}", MAX_FRAMES));
    }
    Ok(frames)
}

impl Config {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Run a whole simulation: read the address list, translate, write the output file.
pub fn run(config: &Config) -> Result<Statistics> {
    let addresses = read_virtual_addresses(&config.addresses)?;
    let mut sink = ResultSink::create(&config.output)?;
    let backing_store = BackingStore::open(&config.backing_store)?;

    info!(
        "{} addresses from {}, backing store {} ({} pages), {} frames",
        addresses.len(),
        config.addresses.display(),
        config.backing_store.display(),
        backing_store.page_count(),
        config.frames
    );

    let mut vm = VmManager::with_frame_capacity(backing_store, config.frames);
    let outcome = vm.run(&addresses, &mut sink);

    // keep whatever was translated before a failure
    if let Err(e) = sink.finish() {
        error!("failed to flush {}: {}", config.output.display(), e);
        outcome?;
        return Err(e);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["demand-pager", "addresses.txt"]).unwrap();
        assert_eq!(config.addresses, PathBuf::from("addresses.txt"));
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT_FILE));
        assert_eq!(config.backing_store, PathBuf::from(DEFAULT_BACKING_STORE));
        assert_eq!(config.frames, MAX_FRAMES);
        assert_eq!(config.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "demand-pager", "-vv", "-o", "out.txt", "--backing-store", "store.bin", "--frames", "16", "in.txt",
        ])
        .unwrap();
        assert_eq!(config.output, PathBuf::from("out.txt"));
        assert_eq!(config.backing_store, PathBuf::from("store.bin"));
        assert_eq!(config.frames, 16);
        assert_eq!(config.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_argument_count() {
        assert!(Config::try_parse_from(["demand-pager"]).is_err());
        assert!(Config::try_parse_from(["demand-pager", "a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn test_frames_range() {
        assert!(Config::try_parse_from(["demand-pager", "--frames", "0", "a.txt"]).is_err());
        assert!(Config::try_parse_from(["demand-pager", "--frames", "257", "a.txt"]).is_err());
        assert!(Config::try_parse_from(["demand-pager", "--frames", "1", "a.txt"]).is_ok());
    }
}
