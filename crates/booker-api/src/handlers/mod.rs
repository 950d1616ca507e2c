//! Route handlers organized by domain.

pub mod booking;
pub mod event;
pub mod health;
pub mod user;
