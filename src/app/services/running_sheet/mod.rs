//! Running sheet reconstruction
//!
//! A running sheet is a facility's full schedule for one day, reported by
//! the server as one multi-record response. Each row names its system and
//! user in prose form ("Object" and "User" columns) and carries bare
//! `HH:MM` clock times, so turning rows into usable reservation records
//! requires cross-referencing previously fetched systems and users and
//! anchoring the clock times on the sheet's date.
//!
//! Reconstruction favors availability over completeness: a row whose
//! system or user cannot be resolved (or whose times do not parse) is
//! logged and skipped, never failing the whole day.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::app::models::{Reservation, User};
use crate::app::services::facility_registry::FacilityRegistry;
use crate::app::services::record_builder::{clock_on_date, end_clock_on_date};
use crate::app::services::response_parser::RawRecord;
use crate::constants::fields;

#[cfg(test)]
pub mod tests;

/// Reconstruction result with reservations and per-row statistics
#[derive(Debug, Clone)]
pub struct SheetResult {
    /// Successfully resolved reservations, in response order
    pub reservations: Vec<Reservation>,

    /// Per-row reconstruction statistics
    pub stats: SheetStats,
}

/// Statistics of one running sheet reconstruction
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct SheetStats {
    /// Total number of rows in the response
    pub rows_total: usize,

    /// Number of rows resolved into reservations
    pub reservations_built: usize,

    /// Number of rows skipped because of unresolved references or bad times
    pub rows_skipped: usize,

    /// Number of rows dropped by the managed-systems filter
    pub rows_filtered: usize,

    /// Skip reasons, for diagnostics
    pub errors: Vec<String>,
}

impl SheetStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builder resolving running sheet rows against a facility registry
#[derive(Debug)]
pub struct RunningSheetBuilder<'a> {
    registry: &'a FacilityRegistry,
}

impl<'a> RunningSheetBuilder<'a> {
    /// Create a builder over the given registry
    pub fn new(registry: &'a FacilityRegistry) -> Self {
        Self { registry }
    }

    /// Resolve parsed sheet rows into reservations for the given day
    ///
    /// Output order follows the response; rows are not re-sorted by time.
    /// With `restrict_to_managed` set, rows whose system has no machine
    /// catalogue are dropped (counted separately from skips).
    pub fn build(
        &self,
        records: &[RawRecord],
        day: NaiveDate,
        restrict_to_managed: bool,
    ) -> SheetResult {
        let mut stats = SheetStats::new();
        let mut reservations = Vec::new();

        for record in records {
            stats.rows_total += 1;
            match self.resolve_row(record, day) {
                Ok(reservation) => {
                    if restrict_to_managed && reservation.machine_catalogue.is_none() {
                        debug!(
                            "Dropping reservation on unmanaged system {}",
                            reservation.system_id
                        );
                        stats.rows_filtered += 1;
                        continue;
                    }
                    reservations.push(reservation);
                    stats.reservations_built += 1;
                }
                Err(reason) => {
                    warn!("Skipping running sheet row {}: {}", stats.rows_total, reason);
                    stats
                        .errors
                        .push(format!("row {}: {}", stats.rows_total, reason));
                    stats.rows_skipped += 1;
                }
            }
        }

        debug!(
            "Running sheet for {}: {} rows, {} reservations, {} skipped, {} filtered",
            day, stats.rows_total, stats.reservations_built, stats.rows_skipped, stats.rows_filtered
        );

        SheetResult {
            reservations,
            stats,
        }
    }

    /// Resolve a single row, reporting the skip reason on failure
    fn resolve_row(
        &self,
        record: &RawRecord,
        day: NaiveDate,
    ) -> std::result::Result<Reservation, String> {
        let object = record
            .get_str(fields::SHEET_OBJECT)
            .ok_or_else(|| format!("missing '{}' field", fields::SHEET_OBJECT))?;
        let system = self
            .registry
            .find_system_by_name(object)
            .ok_or_else(|| format!("no system named '{}'", object))?;

        let reported_name = record
            .get_str(fields::SHEET_USER)
            .ok_or_else(|| format!("missing '{}' field", fields::SHEET_USER))?;
        let user = self
            .resolve_user(reported_name)
            .ok_or_else(|| format!("no user matching '{}'", reported_name))?;

        let start_str = record
            .get_str(fields::SHEET_START_TIME)
            .ok_or_else(|| format!("missing '{}' field", fields::SHEET_START_TIME))?;
        let end_str = record
            .get_str(fields::SHEET_END_TIME)
            .ok_or_else(|| format!("missing '{}' field", fields::SHEET_END_TIME))?;

        let reservation_start = clock_on_date(start_str, day)
            .map_err(|err| format!("bad start time '{}': {}", start_str, err))?;
        let reservation_end = end_clock_on_date(end_str, day)
            .map_err(|err| format!("bad end time '{}': {}", end_str, err))?;

        Ok(Reservation {
            username: user.username.clone(),
            system_id: system.system_id,
            machine_catalogue: system.machine_catalogue.clone(),
            reservation_start,
            reservation_end,
        })
    }

    /// Resolve a reported user name to a known user
    ///
    /// Sheets report users in PPMS order ("Last First"), so that index is
    /// tried first; the display full name is only a fallback. This order
    /// must not change.
    fn resolve_user(&self, reported_name: &str) -> Option<&User> {
        self.registry
            .find_user_by_ppms_fullname(reported_name)
            .or_else(|| self.registry.find_user_by_fullname(reported_name))
    }
}
