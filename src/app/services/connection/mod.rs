//! Connection to a PUMAPI instance
//!
//! The connection owns the transport, the per-session registry of resolved
//! systems and users, and the configuration. All PUMAPI operations are
//! plain blocking request/parse/build sequences; nothing here is retried,
//! parsing a given response twice yields the same records.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use tracing::{debug, error, info, warn};

use crate::app::adapters::http::HttpTransport;
use crate::app::models::{Booking, Group, System, User};
use crate::app::services::facility_registry::FacilityRegistry;
use crate::app::services::record_builder::{
    BookingKind, booking_from_live_response, build_group, build_system, build_user,
};
use crate::app::services::response_parser::{RawRecord, parse_multi_response, parse_single_response};
use crate::app::services::running_sheet::{RunningSheetBuilder, SheetResult};
use crate::config::PumapiConfig;
use crate::constants::{NOT_AUTHORIZED_MARKER, PUMAPI_DATE_FORMAT, actions};
use crate::{Error, Result};

#[cfg(test)]
pub mod tests;

/// Capability of submitting one PUMAPI action and returning the body text
///
/// Implementations perform the actual (blocking) I/O; the connection layers
/// the response checks and parsing on top. Keeping this a trait allows
/// driving the connection from scripted responses in tests.
pub trait Transport {
    /// Submit an action with additional form parameters, returning the raw
    /// response body
    fn request(&self, action: &str, params: &[(&str, String)]) -> Result<String>;
}

/// Authentication state of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No authentication attempted yet
    NotTried,
    /// Authentication request is underway
    Attempting,
    /// The server accepted the API key
    Good,
    /// The server rejected the API key
    Failed,
}

/// Connection object to communicate with a PPMS instance
pub struct Connection {
    transport: Box<dyn Transport>,
    config: PumapiConfig,
    registry: FacilityRegistry,
    auth_state: AuthState,
}

impl Connection {
    /// Open a connection to the configured PUMAPI and authenticate
    pub fn connect(config: PumapiConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        let mut connection = Self::with_transport(Box::new(transport), config);
        connection.authenticate()?;
        Ok(connection)
    }

    /// Create a connection over an existing transport, without authenticating
    pub fn with_transport(transport: Box<dyn Transport>, config: PumapiConfig) -> Self {
        Self {
            transport,
            config,
            registry: FacilityRegistry::new(),
            auth_state: AuthState::NotTried,
        }
    }

    /// Authenticate against PPMS using the `auth` action
    pub fn authenticate(&mut self) -> Result<()> {
        debug!(
            "Attempting authentication against {} with key [{}...]",
            self.config.base_url,
            &self.config.api_key[..self.config.api_key.len().min(2)]
        );
        self.auth_state = AuthState::Attempting;

        let response = self.request(actions::AUTH, &[])?;
        if response.to_lowercase().contains("error") {
            self.auth_state = AuthState::Failed;
            error!("Authentication failed with an error: {}", response);
            return Err(Error::authorization(actions::AUTH));
        }

        self.auth_state = AuthState::Good;
        info!("Authentication succeeded, response=[{}]", response.trim());
        Ok(())
    }

    /// Current authentication state
    pub fn auth_state(&self) -> AuthState {
        self.auth_state
    }

    /// The registry of systems and users resolved so far
    pub fn registry(&self) -> &FacilityRegistry {
        &self.registry
    }

    /// Submit a request and check the response for the rejection marker
    ///
    /// PUMAPI answers HTTP 200 even to unauthorized requests; the body text
    /// is the only reliable signal.
    fn request(&mut self, action: &str, params: &[(&str, String)]) -> Result<String> {
        let text = self.transport.request(action, params)?;
        if text.to_lowercase().contains(NOT_AUTHORIZED_MARKER) {
            self.auth_state = AuthState::Failed;
            error!("Not authorized to run action `{}`", action);
            return Err(Error::authorization(action));
        }
        Ok(text)
    }

    // ======================= users / groups =======================

    /// Get all user login names known to PPMS
    ///
    /// With `active_only` the server filters to accounts marked active.
    pub fn get_users(&mut self, active_only: bool) -> Result<Vec<String>> {
        let mut params = Vec::new();
        if active_only {
            params.push(("active", "true".to_string()));
        }
        let response = self.request(actions::GET_USERS, &params)?;

        let users: Vec<String> = response
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        info!("{} users in the PPMS database", users.len());
        Ok(users)
    }

    /// Fetch the details of one user and build a typed record
    pub fn get_user(&mut self, login: &str) -> Result<User> {
        let response = self.request(actions::GET_USER, &[("login", login.to_string())])?;
        let record = parse_single_response(&response, true)?;
        match record {
            Some(record) => build_user(&record),
            None => Err(Error::user_not_found(login)),
        }
    }

    /// Get all PPMS administrator accounts
    pub fn get_admins(&mut self) -> Result<Vec<User>> {
        let response = self.request(actions::GET_ADMINS, &[])?;
        let logins: Vec<String> = response
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        let mut admins = Vec::with_capacity(logins.len());
        for login in &logins {
            admins.push(self.get_user(login)?);
        }
        debug!("{} admins in the PPMS database", admins.len());
        Ok(admins)
    }

    /// Get all group identifiers ("unitlogin") known to PPMS
    pub fn get_groups(&mut self) -> Result<Vec<String>> {
        let response = self.request(actions::GET_GROUPS, &[])?;
        let groups: Vec<String> = response
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        debug!("{} groups in the PPMS database", groups.len());
        Ok(groups)
    }

    /// Fetch the details of one group
    pub fn get_group(&mut self, unitlogin: &str) -> Result<Group> {
        let response = self.request(actions::GET_GROUP, &[("unitlogin", unitlogin.to_string())])?;
        let record = parse_single_response(&response, true)?;
        match record {
            Some(record) => build_group(&record),
            None => Err(Error::group_not_found(unitlogin)),
        }
    }

    /// Get all members of a group
    pub fn get_group_users(&mut self, unitlogin: &str) -> Result<Vec<User>> {
        let response =
            self.request(actions::GET_GROUP_USERS, &[("unitlogin", unitlogin.to_string())])?;
        let logins: Vec<String> = response
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        let mut members = Vec::with_capacity(logins.len());
        for login in &logins {
            members.push(self.get_user(login)?);
        }
        debug!("{} members in PPMS group [{}]", members.len(), unitlogin);
        Ok(members)
    }

    /// Get user experience ("user rights") entries
    ///
    /// Both filters are optional; the raw records are returned as-is since
    /// the response columns vary between PPMS versions.
    pub fn get_user_experience(
        &mut self,
        login: Option<&str>,
        system_id: Option<i32>,
    ) -> Result<Vec<RawRecord>> {
        let mut params = Vec::new();
        if let Some(login) = login {
            params.push(("login", login.to_string()));
        }
        if let Some(system_id) = system_id {
            params.push(("id", system_id.to_string()));
        }
        let response = self.request(actions::GET_USER_EXPERIENCE, &params)?;

        let parsed = parse_multi_response(&response, false, true)?;
        debug!("Received {} experience entries", parsed.len());
        Ok(parsed)
    }

    /// Get the email addresses of the given users
    ///
    /// Users without an address are skipped with a warning. One request per
    /// user, so this is slow for long lists.
    pub fn get_users_emails(&mut self, logins: &[String]) -> Result<Vec<String>> {
        let mut emails = Vec::new();
        for login in logins {
            let user = self.get_user(login)?;
            if user.email.is_empty() {
                warn!("No email address for user {}", login);
                continue;
            }
            emails.push(user.email);
        }
        Ok(emails)
    }

    // ======================= systems =======================

    /// Get all systems in PPMS, keyed by system ID
    ///
    /// Rows whose system ID cannot be parsed are logged and skipped
    /// entirely.
    pub fn get_systems(&mut self) -> Result<HashMap<i32, System>> {
        let response = self.request(actions::GET_SYSTEMS, &[])?;
        let records = parse_multi_response(&response, true, false)?;

        let mut systems = HashMap::new();
        for record in &records {
            match build_system(record) {
                Ok(system) => {
                    systems.insert(system.system_id, system);
                }
                Err(err) => {
                    error!("Unable to build system record: {}", err);
                }
            }
        }
        debug!("Found {} systems in PPMS", systems.len());
        Ok(systems)
    }

    /// Fetch all systems and store them in the connection registry
    pub fn update_systems(&mut self) -> Result<usize> {
        let systems = self.get_systems()?;
        let count = systems.len();
        for (_, system) in systems {
            self.registry.insert_system(system);
        }
        info!("Updated registry with {} systems", count);
        Ok(count)
    }

    /// Fetch all (active) users and store them in the connection registry
    ///
    /// Users that fail to resolve individually are logged and skipped so
    /// one broken account does not abort the whole pass.
    pub fn update_users(&mut self, active_only: bool) -> Result<usize> {
        let logins = self.get_users(active_only)?;
        let mut count = 0;
        for login in &logins {
            match self.get_user(login) {
                Ok(user) => {
                    self.registry.insert_user(user);
                    count += 1;
                }
                Err(err) => warn!("Skipping user [{}]: {}", login, err),
            }
        }
        info!("Updated registry with {} users", count);
        Ok(count)
    }

    // ======================= bookings =======================

    /// Get the booking currently running on a system
    pub fn get_booking(&mut self, system_id: i32) -> Result<Option<Booking>> {
        self.booking_request(system_id, BookingKind::Current)
    }

    /// Get the next upcoming booking of a system
    pub fn get_next_booking(&mut self, system_id: i32) -> Result<Option<Booking>> {
        self.booking_request(system_id, BookingKind::Next)
    }

    fn booking_request(&mut self, system_id: i32, kind: BookingKind) -> Result<Option<Booking>> {
        let action = match kind {
            BookingKind::Current => actions::GET_BOOKING,
            BookingKind::Next => actions::NEXT_BOOKING,
        };
        let response = self.request(action, &[("id", system_id.to_string())])?;
        booking_from_live_response(&response, kind, system_id, Local::now().naive_local())
    }

    // ======================= running sheet =======================

    /// Get the fully resolved running sheet of the configured facility
    ///
    /// The registry is populated on first use (systems plus active users);
    /// subsequent calls on the same connection reuse the cached records.
    pub fn get_running_sheet(
        &mut self,
        day: NaiveDate,
        restrict_to_managed: bool,
    ) -> Result<SheetResult> {
        if self.registry.system_count() == 0 {
            self.update_systems()?;
        }
        if self.registry.user_count() == 0 {
            self.update_users(true)?;
        }

        let params = [
            ("plateformid", self.config.core_facility_id.to_string()),
            ("day", day.format(PUMAPI_DATE_FORMAT).to_string()),
        ];
        let response = self.request(actions::GET_RUNNING_SHEET, &params)?;
        let records = parse_multi_response(&response, true, true)?;

        let result = RunningSheetBuilder::new(&self.registry).build(&records, day, restrict_to_managed);
        info!(
            "Running sheet for {}: {} reservations ({} rows skipped)",
            day, result.stats.reservations_built, result.stats.rows_skipped
        );
        Ok(result)
    }
}
