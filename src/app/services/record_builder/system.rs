//! Building [`System`] records from `getsystems` response rows

use tracing::debug;

use crate::app::models::System;
use crate::app::services::response_parser::RawRecord;
use crate::constants::{fields, machine_catalogue_for};
use crate::{Error, Result};

/// Build a system record from one parsed `getsystems` row
///
/// The system ID and core facility ref are mandatory integers; boolean
/// flags missing from the row default to `false`. The machine catalogue is
/// derived from the system name right after construction.
pub fn build_system(record: &RawRecord) -> Result<System> {
    let system_id = record.require_i32(fields::SYSTEM_ID)?;
    let name = record.require_str(fields::NAME)?.to_string();

    let core_facility_ref = record.require_i32(fields::CORE_FACILITY_REF)?;
    let core_facility_ref = u32::try_from(core_facility_ref).map_err(|_| {
        Error::malformed_response(format!(
            "negative core facility ref for system {}: {}",
            system_id, core_facility_ref
        ))
    })?;

    let catalogue = machine_catalogue_for(&name);

    let system = System::new(
        system_id,
        name,
        record.get_str(fields::LOCALISATION).unwrap_or("").to_string(),
        record.get_str(fields::TYPE).unwrap_or("").to_string(),
        core_facility_ref,
        record.get_bool(fields::SCHEDULES).unwrap_or(false),
        record.get_bool(fields::SYSTEM_ACTIVE).unwrap_or(false),
        record.get_bool(fields::STATS).unwrap_or(false),
        record.get_bool(fields::BOOKABLE).unwrap_or(false),
        record.get_bool(fields::AUTONOMY_REQUIRED).unwrap_or(false),
        record
            .get_bool(fields::AUTONOMY_REQUIRED_AFTER_HOURS)
            .unwrap_or(false),
    )
    .with_machine_catalogue(catalogue);

    debug!("Built system record: {}", system);
    Ok(system)
}
