//! Error types for the paging simulator.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, VmError>;

#[derive(Error, Debug)]
pub enum VmError {
    /// Every physical frame has been handed out and there is no eviction
    #[error("physical memory exhausted: all {capacity} frames are allocated")]
    FrameExhausted { capacity: usize },

    /// Short read or out-of-range page in the backing store
    #[error("failed to read page {page} from backing store: {source}")]
    BackingStoreRead {
        page: u32,
        #[source]
        source: io::Error,
    },

    #[error("malformed address on line {line}: {text:?} ({reason})")]
    MalformedAddress {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("no addresses to translate; fault rate is undefined")]
    EmptyInput,

    #[error("unable to open address list {}: {source}", path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to open output file {}: {source}", path.display())]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to open backing store {}: {source}", path.display())]
    OpenBackingStore {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl VmError {
    /// Process exit code for this error. Code 2 is left to clap for usage errors.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    fn code(&self) -> u8 {
        match self {
            Self::OpenInput { .. } => 3,
            Self::OpenOutput { .. } => 4,
            Self::OpenBackingStore { .. } => 5,
            Self::MalformedAddress { .. } => 6,
            Self::EmptyInput => 7,
            Self::FrameExhausted { .. } => 8,
            Self::BackingStoreRead { .. } => 9,
            Self::Io(_) => 10,
        }
    }
}
