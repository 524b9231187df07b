//! Local filesystem adapters.

mod result_store;
mod video_store;

pub use result_store::DirectoryResultStore;
pub use video_store::LocalVideoStore;
