//! Background reconciliation for the event booker.
//!
//! This crate provides:
//! - [`ExpiryReconciler`], one sweep that cancels reservations past their
//!   deadline and notifies the affected users
//! - [`ReconcilerScheduler`], an owned task that repeats the sweep on a
//!   fixed interval until stopped

pub mod reconciler;
pub mod scheduler;

pub use reconciler::{ExpiryReconciler, SweepReport};
pub use scheduler::ReconcilerScheduler;
