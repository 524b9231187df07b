//! Infrastructure adapters for the storage ports.

pub mod fs;
pub mod memory;

pub use fs::{DirectoryResultStore, LocalVideoStore};
pub use memory::{InMemoryResultStore, InMemoryVideoStore};
