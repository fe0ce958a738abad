//! Building [`Booking`] records and running sheet timestamps
//!
//! Bookings come from two very different response shapes:
//! - the live `getbooking` / `nextbooking` endpoints answer with a bare
//!   three-line payload (username, offset in minutes, session token) that
//!   is relative to "now"
//! - running sheet rows carry absolute `HH:MM` clock times that have to be
//!   combined with the sheet's reference date

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::debug;

use crate::Result;
use crate::app::models::Booking;
use crate::constants::PUMAPI_TIME_FORMAT;

/// Which live booking endpoint a response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingKind {
    /// The booking running right now (`getbooking`)
    Current,
    /// The upcoming booking (`nextbooking`)
    Next,
}

/// Build a booking from a live `getbooking` / `nextbooking` response
///
/// The payload is three lines: username, offset from now in minutes, and a
/// session token. An empty body means there is no such booking and yields
/// `Ok(None)`.
///
/// For a current booking the offset is the remaining time (start = now,
/// end = now + offset); for a next booking it is the lead time (start =
/// now + offset) and the end is unknown. "Now" is truncated to the full
/// minute so derived timestamps line up with the server's clock grid; it
/// is passed in explicitly to keep construction deterministic.
pub fn booking_from_live_response(
    text: &str,
    kind: BookingKind,
    system_id: i32,
    now: NaiveDateTime,
) -> Result<Option<Booking>> {
    if text.trim().is_empty() {
        debug!("No {:?} booking for system {}", kind, system_id);
        return Ok(None);
    }

    let mut lines = text.lines();
    let username = lines.next().unwrap_or("").trim().to_string();
    let minutes = lines.next().unwrap_or("").trim();
    let minutes = minutes.parse::<i64>().map_err(|err| {
        crate::Error::malformed_response(format!(
            "booking offset is not an integer: '{}' ({})",
            minutes, err
        ))
    })?;
    let session = lines.next().map(str::trim).filter(|line| !line.is_empty());

    // zero out seconds (and below) of the reference time
    let now = now
        .date()
        .and_hms_opt(now.hour(), now.minute(), 0)
        .unwrap_or(now);
    let offset = Duration::minutes(minutes);

    let (starttime, endtime) = match kind {
        BookingKind::Current => (now, Some(now + offset)),
        BookingKind::Next => (now + offset, None),
    };

    let mut booking = Booking::new(username, system_id, starttime, endtime);
    if let Some(session) = session {
        booking = booking.with_session(session);
    }

    debug!("Built booking record: {}", booking);
    Ok(Some(booking))
}

/// Combine an `HH:MM` clock time with a reference date
pub fn clock_on_date(time_str: &str, date: NaiveDate) -> Result<NaiveDateTime> {
    let time = NaiveTime::parse_from_str(time_str.trim(), PUMAPI_TIME_FORMAT)?;
    Ok(date.and_time(time))
}

/// Combine an end-of-booking `HH:MM` clock time with a reference date
///
/// An end time of exactly 00:00 means the session runs until midnight,
/// i.e. it ends on the day after the reference date.
pub fn end_clock_on_date(time_str: &str, date: NaiveDate) -> Result<NaiveDateTime> {
    let end = clock_on_date(time_str, date)?;
    if end.time() == NaiveTime::MIN {
        return Ok(end + Duration::days(1));
    }
    Ok(end)
}
