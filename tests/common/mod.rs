//! Shared helpers for the integration tests

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use pumapi_client::app::services::connection::Transport;
use pumapi_client::{Error, Result};

#[derive(Default)]
struct Inner {
    responses: RefCell<HashMap<String, String>>,
    calls: RefCell<HashMap<String, usize>>,
}

/// Transport answering from a canned request -> body map
///
/// Keys are the action name followed by ` name=value` for every form
/// parameter, e.g. `getuser login=pumapi`. Every request is counted so
/// tests can assert how often an endpoint was hit. Clones share state,
/// which lets a test keep a handle after moving the transport into a
/// connection.
#[derive(Default, Clone)]
pub struct ScriptedTransport {
    inner: Rc<Inner>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, key: &str, body: &str) -> Self {
        self.inner
            .responses
            .borrow_mut()
            .insert(key.to_string(), body.to_string());
        self
    }

    /// How often the given request key was submitted
    pub fn call_count(&self, key: &str) -> usize {
        self.inner.calls.borrow().get(key).copied().unwrap_or(0)
    }
}

pub fn request_key(action: &str, params: &[(&str, String)]) -> String {
    let mut key = action.to_string();
    for (name, value) in params {
        key.push_str(&format!(" {}={}", name, value));
    }
    key
}

impl Transport for ScriptedTransport {
    fn request(&self, action: &str, params: &[(&str, String)]) -> Result<String> {
        let key = request_key(action, params);
        *self.inner.calls.borrow_mut().entry(key.clone()).or_insert(0) += 1;
        self.inner
            .responses
            .borrow()
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::transport(format!("no scripted response for '{}'", key)))
    }
}

/// A `getuser` response body for the given names
pub fn getuser_body(login: &str, lname: &str, fname: &str, email: &str) -> String {
    format!(
        "login,lname,fname,email,phone,bcode,affiliation,unitlogin,\
         mustchpwd,mustchbcode,active\r\n\
         \"{}\",\"{}\",\"{}\",\"{}\",\"\",\"\",\"\",\"demo_group\",false,false,true\r\n",
        login, lname, fname, email
    )
}

/// A `getsystems` response body from (core ref, id, type, name, room) rows
pub fn getsystems_body(rows: &[(u32, i32, &str, &str, &str)]) -> String {
    let mut body = String::from(
        "Core facility ref,System id,Type,Name,Localisation,Schedules,Active,Stats,\
         Bookable,Autonomy Required,Autonomy Required After Hours\r\n",
    );
    for (core_ref, system_id, system_type, name, room) in rows {
        body.push_str(&format!(
            "{},{},\"{}\",\"{}\",\"{}\",True,True,True,True,False,False\r\n",
            core_ref, system_id, system_type, name, room
        ));
    }
    body
}
