//! `tessnote-vault` — vault adapters behind the `VaultPort` seam.

pub mod fs;
pub mod memory;

pub use fs::FsVault;
pub use memory::MemoryVault;
