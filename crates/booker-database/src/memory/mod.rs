//! In-process store for tests and single-node development.

pub mod store;

pub use store::MemoryStore;
