//! Tests driving the connection against scripted responses

use std::collections::HashMap;

use crate::app::services::connection::{AuthState, Connection, Transport};
use crate::config::PumapiConfig;
use crate::{Error, Result};

/// Transport answering from a canned action -> body map
///
/// Keys are the action name followed by ` name=value` for every parameter,
/// e.g. `getuser login=pumapi`.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: HashMap<String, String>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, key: &str, body: &str) -> Self {
        self.responses.insert(key.to_string(), body.to_string());
        self
    }
}

fn request_key(action: &str, params: &[(&str, String)]) -> String {
    let mut key = action.to_string();
    for (name, value) in params {
        key.push_str(&format!(" {}={}", name, value));
    }
    key
}

impl Transport for ScriptedTransport {
    fn request(&self, action: &str, params: &[(&str, String)]) -> Result<String> {
        let key = request_key(action, params);
        self.responses
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::transport(format!("no scripted response for '{}'", key)))
    }
}

fn connection(transport: ScriptedTransport) -> Connection {
    Connection::with_transport(
        Box::new(transport),
        PumapiConfig::new("https://ppms.example.org/pumapi/", "secret-key"),
    )
}

const USER_PUMAPI: &str = "login,lname,fname,email,phone,bcode,affiliation,unitlogin,\
                           mustchpwd,mustchbcode,active\r\n\
                           \"pumapi\",\"Python\",\"PumAPI\",\"pumapi@example.org\",\"\",\"\",\"\",\
                           \"pumapi_group\",false,false,true\r\n";

#[test]
fn test_authentication_success() {
    let mut conn = connection(ScriptedTransport::new().with_response("auth", "42"));
    assert_eq!(conn.auth_state(), AuthState::NotTried);

    conn.authenticate().unwrap();
    assert_eq!(conn.auth_state(), AuthState::Good);
}

#[test]
fn test_authentication_error_response() {
    let mut conn = connection(
        ScriptedTransport::new().with_response("auth", "error: client version not supported"),
    );

    let result = conn.authenticate();
    assert!(matches!(result, Err(Error::Authorization { .. })));
    assert_eq!(conn.auth_state(), AuthState::Failed);
}

#[test]
fn test_not_authorized_marker_fails_the_call() {
    let mut conn =
        connection(ScriptedTransport::new().with_response("getusers", "Request not authorized"));

    let result = conn.get_users(false);
    assert!(matches!(result, Err(Error::Authorization { .. })));
    assert_eq!(conn.auth_state(), AuthState::Failed);
}

#[test]
fn test_get_users_splits_lines() {
    let mut conn = connection(
        ScriptedTransport::new()
            .with_response("getusers", "alice\r\nbob\r\npumapi\r\n")
            .with_response("getusers active=true", "pumapi\r\n"),
    );

    assert_eq!(conn.get_users(false).unwrap(), vec!["alice", "bob", "pumapi"]);
    assert_eq!(conn.get_users(true).unwrap(), vec!["pumapi"]);
}

#[test]
fn test_get_user() {
    let mut conn =
        connection(ScriptedTransport::new().with_response("getuser login=pumapi", USER_PUMAPI));

    let user = conn.get_user("pumapi").unwrap();
    assert_eq!(user.username, "pumapi");
    assert_eq!(user.fullname, "PumAPI Python");
    assert_eq!(user.ppms_fullname.as_deref(), Some("Python PumAPI"));
}

#[test]
fn test_get_user_unknown_login() {
    let mut conn = connection(ScriptedTransport::new().with_response("getuser login=ghost", ""));

    let result = conn.get_user("ghost");
    assert!(matches!(result, Err(Error::UserNotFound { .. })));
}

#[test]
fn test_get_group() {
    let group_body = "heademail,unitname,unitlogin,unitbcode,department,headname,active,\
                      institution\r\n\
                      \"head@example.org\",\"Core Facility\",\"pumapi_group\",\"bc-1\",\
                      \"Support\",\"Head Person\",true,\"Famous Foundation\"\r\n";
    let mut conn = connection(
        ScriptedTransport::new()
            .with_response("getgroup unitlogin=pumapi_group", group_body)
            .with_response("getgroup unitlogin=ghosts", ""),
    );

    let group = conn.get_group("pumapi_group").unwrap();
    assert_eq!(group.unitname, "Core Facility");
    assert_eq!(group.head_email, "head@example.org");

    assert!(matches!(
        conn.get_group("ghosts"),
        Err(Error::GroupNotFound { .. })
    ));
}

#[test]
fn test_get_systems_skips_unparsable_rows() {
    let body = "Core facility ref,System id,Type,Name,Localisation,Schedules,Active,Stats,\
                Bookable,Autonomy Required,Autonomy Required After Hours\r\n\
                2,31,\"Virtualized Workstations\",\"VDI (Development)\",\"\",True,True,True,\
                True,False,False\r\n\
                2,\"broken-id\",\"Microscopes\",\"Shiny Scope\",\"Room 1\",True,True,True,True,\
                False,False\r\n";
    let mut conn = connection(ScriptedTransport::new().with_response("getsystems", body));

    let systems = conn.get_systems().unwrap();
    assert_eq!(systems.len(), 1);
    assert_eq!(systems[&31].name, "VDI (Development)");
}

#[test]
fn test_update_systems_populates_the_registry() {
    let body = "Core facility ref,System id,Type,Name,Localisation,Schedules,Active,Stats,\
                Bookable,Autonomy Required,Autonomy Required After Hours\r\n\
                2,31,\"Virtualized Workstations\",\"VDI (Development)\",\"\",True,True,True,\
                True,False,False\r\n";
    let mut conn = connection(ScriptedTransport::new().with_response("getsystems", body));

    assert_eq!(conn.update_systems().unwrap(), 1);
    assert_eq!(conn.registry().system_count(), 1);
    assert!(conn.registry().find_system_by_name("VDI (Development)").is_some());
}

#[test]
fn test_get_admins_resolves_each_login() {
    let mut conn = connection(
        ScriptedTransport::new()
            .with_response("getadmins", "pumapi\r\n")
            .with_response("getuser login=pumapi", USER_PUMAPI),
    );

    let admins = conn.get_admins().unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].username, "pumapi");
}

#[test]
fn test_get_user_experience() {
    let body = "login,id,last training,booked hours\n\
                pumapi,31,n/a,12.5\n\
                other,31,2024-01-15,3\n";
    let mut conn = connection(ScriptedTransport::new().with_response("getuserexp id=31", body));

    let records = conn.get_user_experience(None, Some(31)).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get_str("login"), Some("pumapi"));
    assert!(records[0].get("last training").unwrap().is_missing());
    assert_eq!(records[1].get_f64("booked hours"), Some(3.0));
}

#[test]
fn test_get_users_emails_skips_blank_addresses() {
    let no_email = "login,lname,fname,email\r\n\"quiet\",\"Doe\",\"Jo\",\"\"\r\n";
    let mut conn = connection(
        ScriptedTransport::new()
            .with_response("getuser login=pumapi", USER_PUMAPI)
            .with_response("getuser login=quiet", no_email),
    );

    let emails = conn
        .get_users_emails(&["pumapi".to_string(), "quiet".to_string()])
        .unwrap();
    assert_eq!(emails, vec!["pumapi@example.org"]);
}

#[test]
fn test_live_booking_roundtrip() {
    let mut conn = connection(
        ScriptedTransport::new()
            .with_response("getbooking id=31", "pumapi\n45\nS-0042\n")
            .with_response("nextbooking id=31", "")
            .with_response("getbooking id=42", ""),
    );

    let booking = conn.get_booking(31).unwrap().unwrap();
    assert_eq!(booking.username, "pumapi");
    assert_eq!(booking.system_id, 31);
    assert_eq!(booking.session.as_deref(), Some("S-0042"));
    // the end is offset by the reported minutes
    let duration = booking.endtime.unwrap() - booking.starttime;
    assert_eq!(duration.num_minutes(), 45);

    assert_eq!(conn.get_next_booking(31).unwrap(), None);
    assert_eq!(conn.get_booking(42).unwrap(), None);
}
