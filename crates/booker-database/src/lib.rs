//! # booker-database
//!
//! Seat inventory persistence for the event booker: the store traits,
//! PostgreSQL connection management, repositories and the transactional
//! booking engine, plus an in-memory backend with the same semantics.

pub mod connection;
pub mod engine;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use engine::PgBookingEngine;
pub use memory::MemoryStore;
pub use store::{BookingEngine, InventoryStore, UserDirectory};
pub use stores::Stores;
