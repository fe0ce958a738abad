//! Name-based lookups over the facility registry
//!
//! Running sheet rows reference systems by their display name and users by
//! a full name in PPMS reporting order; these lookups resolve both back to
//! the cached records. All matches are exact (the server emits names
//! verbatim), no pattern matching is involved.

use super::FacilityRegistry;
use crate::app::models::{System, User};

impl FacilityRegistry {
    /// Find a system by its exact name
    pub fn find_system_by_name(&self, name: &str) -> Option<&System> {
        self.systems.values().find(|system| system.name == name)
    }

    /// Find a user by the exact display full name ("First Last")
    pub fn find_user_by_fullname(&self, fullname: &str) -> Option<&User> {
        self.users.values().find(|user| user.fullname == fullname)
    }

    /// Find a user by the exact PPMS-order full name ("Last First")
    ///
    /// Users without a `ppms_fullname` never match here; callers fall back
    /// to [`find_user_by_fullname`](Self::find_user_by_fullname).
    pub fn find_user_by_ppms_fullname(&self, ppms_fullname: &str) -> Option<&User> {
        self.users
            .values()
            .find(|user| user.ppms_fullname.as_deref() == Some(ppms_fullname))
    }
}
