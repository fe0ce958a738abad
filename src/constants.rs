//! Application constants for the PUMAPI client
//!
//! This module contains the PUMAPI action names, the exact field names used
//! in server response headers, time formats and the machine catalogue
//! mapping used throughout the client.

// =============================================================================
// PUMAPI Actions
// =============================================================================

/// API action names as submitted in the `action` form field
pub mod actions {
    pub const AUTH: &str = "auth";
    pub const GET_USERS: &str = "getusers";
    pub const GET_USER: &str = "getuser";
    pub const GET_ADMINS: &str = "getadmins";
    pub const GET_GROUPS: &str = "getgroups";
    pub const GET_GROUP: &str = "getgroup";
    pub const GET_GROUP_USERS: &str = "getgroupusers";
    pub const GET_USER_EXPERIENCE: &str = "getuserexp";
    pub const GET_SYSTEMS: &str = "getsystems";
    pub const GET_BOOKING: &str = "getbooking";
    pub const NEXT_BOOKING: &str = "nextbooking";
    pub const GET_RUNNING_SHEET: &str = "getrunningsheet";
}

/// Substring (lowercased) identifying a rejected request in a response body
///
/// PUMAPI replies with HTTP 200 even to unauthorized requests, so the body
/// text is the only reliable signal.
pub const NOT_AUTHORIZED_MARKER: &str = "request not authorized";

// =============================================================================
// Response Field Names
// =============================================================================

/// Header field names exactly as emitted by the server
///
/// Casing and embedded spaces matter: these strings are used as lookup keys
/// into parsed response records.
pub mod fields {
    // "getuser" / "getgroup" responses
    pub const LOGIN: &str = "login";
    pub const LNAME: &str = "lname";
    pub const FNAME: &str = "fname";
    pub const EMAIL: &str = "email";
    pub const UNITLOGIN: &str = "unitlogin";
    pub const ACTIVE: &str = "active";
    pub const UNITNAME: &str = "unitname";
    pub const UNITBCODE: &str = "unitbcode";
    pub const DEPARTMENT: &str = "department";
    pub const HEADNAME: &str = "headname";
    pub const HEADEMAIL: &str = "heademail";
    pub const INSTITUTION: &str = "institution";

    // "getsystems" response
    pub const SYSTEM_ID: &str = "System id";
    pub const NAME: &str = "Name";
    pub const LOCALISATION: &str = "Localisation";
    pub const TYPE: &str = "Type";
    pub const CORE_FACILITY_REF: &str = "Core facility ref";
    pub const SCHEDULES: &str = "Schedules";
    pub const SYSTEM_ACTIVE: &str = "Active";
    pub const STATS: &str = "Stats";
    pub const BOOKABLE: &str = "Bookable";
    pub const AUTONOMY_REQUIRED: &str = "Autonomy Required";
    pub const AUTONOMY_REQUIRED_AFTER_HOURS: &str = "Autonomy Required After Hours";

    // "getrunningsheet" response
    pub const SHEET_USER: &str = "User";
    pub const SHEET_OBJECT: &str = "Object";
    pub const SHEET_START_TIME: &str = "Start time";
    pub const SHEET_END_TIME: &str = "End time";
}

// =============================================================================
// Time Formats
// =============================================================================

/// Date format used in request parameters (e.g. the running sheet `day`)
pub const PUMAPI_DATE_FORMAT: &str = "%Y-%m-%d";

/// Clock time format used in running sheet rows
pub const PUMAPI_TIME_FORMAT: &str = "%H:%M";

// =============================================================================
// Domain Defaults
// =============================================================================

/// Default account expiry in days, applied as a lower bound to user records
pub const DEFAULT_EXPIRY_DAYS: u32 = 30;

/// Machine catalogue category tokens, in match priority order
///
/// A system belongs to the first catalogue whose token occurs
/// (case-insensitively) in its name; systems matching none have no catalogue.
pub const MACHINE_CATALOGUES: &[&str] = &[
    "confocal",
    "widefield",
    "two-photon",
    "lightsheet",
    "slide scanner",
    "electron",
    "workstation",
];

/// Find the machine catalogue for a system name, if any
pub fn machine_catalogue_for(system_name: &str) -> Option<&'static str> {
    let name = system_name.to_lowercase();
    MACHINE_CATALOGUES
        .iter()
        .find(|token| name.contains(*token))
        .copied()
}
