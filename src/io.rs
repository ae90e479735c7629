use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::constants::*;
use crate::error::{Result, VmError};
use crate::translation::{Translation, VirtualAddress};

/// Read the address list, one base-10 address per line
pub fn read_virtual_addresses<P: AsRef<Path>>(path: P) -> Result<Vec<VirtualAddress>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| VmError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|e| {
        let bytes = e.as_bytes();
        let bad = e.utf8_error().valid_up_to();
        let start = bytes[..bad].iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
        let end = bytes[bad..].iter().position(|&b| b == b'\n').map_or(bytes.len(), |i| bad + i);
        VmError::MalformedAddress {
            line: bytes[..bad].iter().filter(|&&b| b == b'\n').count() + 1,
            text: String::from_utf8_lossy(&bytes[start..end]).trim().to_string(),
            reason: "not valid UTF-8".to_string(),
        }
    })?;
    parse_virtual_addresses(&content)
}

/// Parse an address list. Blank lines are skipped; anything else that is not an
/// address in `0..=MAX_VIRTUAL_ADDRESS` aborts the whole parse.
pub fn parse_virtual_addresses(content: &str) -> Result<Vec<VirtualAddress>> {
    let mut addresses = Vec::with_capacity(content.lines().count());

    for (idx, line) in content.lines().enumerate() {
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        let malformed = |reason: &str| VmError::MalformedAddress {
            line: idx + 1,
            text: token.to_string(),
            reason: reason.to_string(),
        };

        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("not a non-negative integer"));
        }
        let address: u32 = token
            .parse()
            .map_err(|_| malformed(&format!("exceeds maximum address {}", MAX_VIRTUAL_ADDRESS)))?;
        if address > MAX_VIRTUAL_ADDRESS {
            return Err(malformed(&format!("exceeds maximum address {}", MAX_VIRTUAL_ADDRESS)));
        }
        addresses.push(VirtualAddress::from_raw(address));
    }

    Ok(addresses)
}

/// Fault accounting for a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    pub page_faults: u32,
    pub total_addresses: usize,
}

impl Statistics {
    /// Faults per translated address; undefined for an empty run
    pub fn fault_rate(&self) -> Result<f64> {
        if self.total_addresses == 0 {
            return Err(VmError::EmptyInput);
        }
        Ok(self.page_faults as f64 / self.total_addresses as f64)
    }
}

/// Writes translation records and the final statistics in the output format
pub struct ResultSink<W: Write> {
    out: W,
}

impl ResultSink<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| VmError::OpenOutput {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ResultSink<W> {
    pub fn new(out: W) -> Self {
        ResultSink { out }
    }

    pub fn write_translation(&mut self, translation: &Translation) -> Result<()> {
        writeln!(self.out, "{}", translation)?;
        Ok(())
    }

    pub fn write_statistics(&mut self, stats: &Statistics) -> Result<()> {
        let rate = stats.fault_rate()?;
        writeln!(self.out, "Page Faults = {}", stats.page_faults)?;
        writeln!(self.out, "Page Fault Rate = {:.3}", rate)?;
        Ok(())
    }

    /// Flush everything written so far
    pub fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
