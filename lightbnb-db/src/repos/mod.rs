//! Repository implementations for database access
//!
//! Each repository borrows the process-wide pool and issues exactly one
//! statement per call.

pub mod properties;
pub mod reservations;
pub mod users;

pub use properties::{Property, PropertyRepo, PropertyWithRating};
pub use reservations::{GuestReservation, ReservationRepo};
pub use users::{User, UserRepo};
