#![forbid(unsafe_code)]

pub mod file;
mod memory;
mod port;

pub use file::{FileStorage, SyncPolicy};
pub use memory::MemoryStorage;
pub use port::SlotStorage;
