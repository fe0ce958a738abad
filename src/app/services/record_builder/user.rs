//! Building [`User`] records from `getuser` responses

use tracing::debug;

use crate::Result;
use crate::app::models::User;
use crate::app::services::response_parser::RawRecord;
use crate::constants::fields;

/// Build a user record from a parsed `getuser` response
///
/// The login name is mandatory; a record without one fails with
/// [`InvalidUser`](crate::Error::InvalidUser).
///
/// The two name forms are assembled in opposite orders: `fullname` is the
/// display form "First Last" while `ppms_fullname` is "Last First", the
/// order PPMS uses when reporting users in running sheets. Both orders are
/// relied upon by the running sheet user resolution and must not be mixed
/// up.
pub fn build_user(record: &RawRecord) -> Result<User> {
    let username = record.get_str(fields::LOGIN).unwrap_or("");
    let lname = record.get_str(fields::LNAME).unwrap_or("").trim();
    let fname = record.get_str(fields::FNAME).unwrap_or("").trim();
    let email = record.get_str(fields::EMAIL).unwrap_or("");

    let fullname = format!("{} {}", fname, lname).trim().to_string();
    let ppms_fullname = format!("{} {}", lname, fname).trim().to_string();

    let mut user = User::new(username, fullname, email)?
        .with_active(record.get_bool(fields::ACTIVE).unwrap_or(true));

    if !ppms_fullname.is_empty() {
        user = user.with_ppms_fullname(ppms_fullname);
    }
    if let Some(unitlogin) = record.get_str(fields::UNITLOGIN) {
        if !unitlogin.is_empty() {
            user = user.with_ppms_group(unitlogin);
        }
    }

    debug!("Built user record: {}", user);
    Ok(user)
}
