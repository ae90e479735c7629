pub mod backing_store;
pub mod cli;
pub mod constants;
pub mod error;
pub mod io;
pub mod memory;
pub mod translation;
pub mod vm_manager;

// Re-export commonly used items for convenience
pub use constants::*;
pub use error::{Result, VmError};
pub use io::{ResultSink, Statistics};
pub use translation::{PhysicalAddress, Translation, VirtualAddress};
pub use vm_manager::VmManager;
