//! Domain records for PPMS entities
//!
//! This module contains the typed records built from PUMAPI responses:
//! users, booking systems, bookings, running sheet reservations and groups.
//! All records are plain immutable values; they are created fresh for every
//! parsed response and never mutated afterwards (the only exception is a
//! system's machine catalogue, which is derived once right after
//! construction).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_EXPIRY_DAYS;
use crate::{Error, Result};

// =============================================================================
// User
// =============================================================================

/// A PPMS user account
///
/// Note the two full-name fields: `fullname` is the display form
/// ("First Last") whereas `ppms_fullname` is the order PPMS reports in
/// running sheets ("Last First"). Both are kept because running sheet rows
/// are matched against `ppms_fullname` first and `fullname` second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// PPMS account / login name - primary key for user lookups
    pub username: String,

    /// Display full name ("First Last"); equals `username` if unknown
    pub fullname: String,

    /// Email address (may be empty)
    pub email: String,

    /// Account expiry in days, never below the facility default
    pub expiry_days: u32,

    /// Full name in PPMS reporting order ("Last First")
    pub ppms_fullname: Option<String>,

    /// The PPMS group (unitlogin) the user belongs to
    pub ppms_group: Option<String>,

    /// Whether the account is marked active in PPMS
    pub active: bool,
}

impl User {
    /// Create a user record; the username is mandatory
    pub fn new(
        username: impl Into<String>,
        fullname: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(Error::invalid_user("username must not be empty"));
        }

        let fullname = fullname.into();
        let fullname = if fullname.trim().is_empty() {
            username.clone()
        } else {
            fullname
        };

        Ok(Self {
            username,
            fullname,
            email: email.into(),
            expiry_days: DEFAULT_EXPIRY_DAYS,
            ppms_fullname: None,
            ppms_group: None,
            active: true,
        })
    }

    /// Set the PPMS-order full name ("Last First")
    pub fn with_ppms_fullname(mut self, ppms_fullname: impl Into<String>) -> Self {
        self.ppms_fullname = Some(ppms_fullname.into());
        self
    }

    /// Set the PPMS group (unitlogin)
    pub fn with_ppms_group(mut self, ppms_group: impl Into<String>) -> Self {
        self.ppms_group = Some(ppms_group.into());
        self
    }

    /// Set the active flag
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Set the expiry, clamped to the facility-wide lower bound
    pub fn with_expiry_days(mut self, days: u32) -> Self {
        self.expiry_days = days.max(DEFAULT_EXPIRY_DAYS);
        self
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.username)
    }
}

// =============================================================================
// System (booking resource)
// =============================================================================

/// A bookable system (instrument) in PPMS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    /// Numeric system ID - primary key for system lookups
    pub system_id: i32,

    /// System name as shown in PPMS (and in running sheet `Object` fields)
    pub name: String,

    /// Room / location description
    pub localisation: String,

    /// System type label (e.g. a microscope family)
    pub system_type: String,

    /// Core facility the system belongs to
    pub core_facility_ref: u32,

    /// Whether the system has booking schedules enabled
    pub schedules: bool,

    /// Whether the system is active
    pub active: bool,

    /// Whether usage statistics are recorded
    pub stats: bool,

    /// Whether the system can be booked at all
    pub bookable: bool,

    /// Whether users need granted autonomy to book
    pub autonomy_required: bool,

    /// Whether autonomy is additionally required after hours
    pub autonomy_required_after_hours: bool,

    /// Machine catalogue derived from the system name, if any
    pub machine_catalogue: Option<String>,
}

impl System {
    /// Create a system record (without a machine catalogue)
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        system_id: i32,
        name: String,
        localisation: String,
        system_type: String,
        core_facility_ref: u32,
        schedules: bool,
        active: bool,
        stats: bool,
        bookable: bool,
        autonomy_required: bool,
        autonomy_required_after_hours: bool,
    ) -> Self {
        Self {
            system_id,
            name,
            localisation,
            system_type,
            core_facility_ref,
            schedules,
            active,
            stats,
            bookable,
            autonomy_required,
            autonomy_required_after_hours,
            machine_catalogue: None,
        }
    }

    /// Attach the machine catalogue derived from the system name
    pub fn with_machine_catalogue(mut self, catalogue: Option<&str>) -> Self {
        self.machine_catalogue = catalogue.map(str::to_string);
        self
    }
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "system_id: {}, name: {}, localisation: {}, system_type: {}",
            self.system_id, self.name, self.localisation, self.system_type
        )
    }
}

// =============================================================================
// Booking
// =============================================================================

/// A booking (reservation) of a system in PPMS
///
/// The end time is `None` while the booking is open-ended, which is how a
/// "next booking" response is reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Account name of the booking user
    pub username: String,

    /// ID of the booked system
    pub system_id: i32,

    /// Start of the booking (facility-local time)
    pub starttime: NaiveDateTime,

    /// End of the booking; `None` for open-ended bookings
    pub endtime: Option<NaiveDateTime>,

    /// Opaque session token reported by PPMS, if any
    pub session: Option<String>,
}

impl Booking {
    /// Create a booking record
    pub fn new(
        username: impl Into<String>,
        system_id: i32,
        starttime: NaiveDateTime,
        endtime: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            username: username.into(),
            system_id,
            starttime,
            endtime,
            session: None,
        }
    }

    /// Attach the session token
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }
}

impl std::fmt::Display for Booking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "username: {} - system: {} - reservation_start: {} - reservation_end: {}",
            self.username,
            self.system_id,
            self.starttime,
            self.endtime
                .map(|end| end.to_string())
                .unwrap_or_else(|| "open".to_string())
        )?;
        if let Some(session) = &self.session {
            write!(f, " - session: {}", session)?;
        }
        Ok(())
    }
}

// =============================================================================
// Reservation (running sheet entry)
// =============================================================================

/// A fully resolved running sheet entry
///
/// Unlike [`Booking`], both endpoints are always known and the system has
/// been cross-referenced, so the machine catalogue is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Account name of the resolved user
    pub username: String,

    /// ID of the resolved system
    pub system_id: i32,

    /// Machine catalogue of the resolved system, if any
    pub machine_catalogue: Option<String>,

    /// Start of the reservation (facility-local time)
    pub reservation_start: NaiveDateTime,

    /// End of the reservation; on the following day if the session crosses
    /// midnight
    pub reservation_end: NaiveDateTime,
}

impl std::fmt::Display for Reservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "username: {} - system: {} - machine_catalogue: {} - reservation_start: {} - reservation_end: {}",
            self.username,
            self.system_id,
            self.machine_catalogue.as_deref().unwrap_or("-"),
            self.reservation_start,
            self.reservation_end
        )
    }
}

// =============================================================================
// Group
// =============================================================================

/// A PPMS group ("unit")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group login / identifier ("unitlogin" in PPMS)
    pub unitlogin: String,

    /// Human-readable group name
    pub unitname: String,

    /// Billing code of the group
    pub unitbcode: String,

    /// Department the group belongs to
    pub department: String,

    /// Institution the group belongs to
    pub institution: String,

    /// Name of the group head
    pub head_name: String,

    /// Email address of the group head
    pub head_email: String,

    /// Whether the group is marked active in PPMS
    pub active: bool,
}
