//! Builders turning parsed response records into typed domain records
//!
//! The parsers hand over loosely typed [`RawRecord`]s keyed by the exact
//! server field names; the builders in this module map those onto the
//! domain records, applying renames, type coercion, defaults and
//! validation. The raw record is discarded afterwards and never inspected
//! again downstream.
//!
//! [`RawRecord`]: crate::app::services::response_parser::RawRecord

pub mod booking;
pub mod group;
pub mod system;
pub mod user;

#[cfg(test)]
pub mod tests;

// Re-export main entry points for easy access
pub use booking::{BookingKind, booking_from_live_response, clock_on_date, end_clock_on_date};
pub use group::build_group;
pub use system::build_system;
pub use user::build_user;
