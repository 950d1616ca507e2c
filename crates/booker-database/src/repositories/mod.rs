//! PostgreSQL repositories for events, bookings and users.

pub mod booking;
pub mod event;
pub mod user;

pub use booking::BookingRepository;
pub use event::EventRepository;
pub use user::UserRepository;
