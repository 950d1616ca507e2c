//! # booker-entity
//!
//! Domain entity models for the event booker. Every struct in this crate
//! represents a database table row or a creation input. Row entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and `sqlx::FromRow`.
//!
//! The admission and transition checks live here so that every store
//! backend applies the same rules inside its own locking.

pub mod booking;
pub mod event;
pub mod user;
