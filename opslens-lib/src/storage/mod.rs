//! Persistence of runs, metrics, and artifacts.
//!
//! The [`Store`] trait is the contract the rest of the crate programs
//! against. [`JsonStore`] keeps one JSON document per run on disk and is what
//! the command line uses; [`MemoryStore`] keeps everything in memory.

mod json_store;
mod memory_store;
mod queries;
mod run_document;
mod store;
mod store_lock;

pub use json_store::JsonStore;
pub use memory_store::MemoryStore;
pub use store::{DailyValue, Metric, Store};
