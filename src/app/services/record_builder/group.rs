//! Building [`Group`] records from `getgroup` responses

use crate::Result;
use crate::app::models::Group;
use crate::app::services::response_parser::RawRecord;
use crate::constants::fields;

/// Build a group record from a parsed `getgroup` response
///
/// The unitlogin is mandatory; all other fields default to empty strings
/// when the server omits them.
pub fn build_group(record: &RawRecord) -> Result<Group> {
    let unitlogin = record.require_str(fields::UNITLOGIN)?.to_string();

    Ok(Group {
        unitlogin,
        unitname: record.get_str(fields::UNITNAME).unwrap_or("").to_string(),
        unitbcode: record.get_str(fields::UNITBCODE).unwrap_or("").to_string(),
        department: record.get_str(fields::DEPARTMENT).unwrap_or("").to_string(),
        institution: record
            .get_str(fields::INSTITUTION)
            .unwrap_or("")
            .to_string(),
        head_name: record.get_str(fields::HEADNAME).unwrap_or("").to_string(),
        head_email: record.get_str(fields::HEADEMAIL).unwrap_or("").to_string(),
        active: record.get_bool(fields::ACTIVE).unwrap_or(true),
    })
}
