//! Registry of resolved PPMS systems and users
//!
//! Running sheet reconstruction has to cross-reference systems by name and
//! users by full name. This registry caches records that have already been
//! fetched so every row of a sheet does not trigger another round trip.
//! It is owned by a single connection and lives exactly as long as that
//! connection; it is deliberately not shared process-wide.

use std::collections::HashMap;

use crate::app::models::{System, User};

pub mod query;

#[cfg(test)]
pub mod tests;

/// Per-connection cache of resolved systems and users
///
/// Systems are indexed by their numeric ID, users by their login name;
/// the name-based lookups used by the running sheet live in [`query`].
#[derive(Debug, Clone, Default)]
pub struct FacilityRegistry {
    /// Systems indexed by system ID
    pub(crate) systems: HashMap<i32, System>,

    /// Users indexed by login name
    pub(crate) users: HashMap<String, User>,
}

impl FacilityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a system record
    pub fn insert_system(&mut self, system: System) {
        self.systems.insert(system.system_id, system);
    }

    /// Add or replace a user record
    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.username.clone(), user);
    }

    /// Get a system by its ID
    pub fn get_system(&self, system_id: i32) -> Option<&System> {
        self.systems.get(&system_id)
    }

    /// Get a user by login name
    pub fn get_user(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Number of cached systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Number of cached users
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Iterate over all cached systems
    pub fn systems(&self) -> impl Iterator<Item = &System> {
        self.systems.values()
    }

    /// Iterate over all cached users
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }
}
