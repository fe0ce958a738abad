//! PUMAPI Client Library
//!
//! A Rust client for Stratocore's PPMS Utility Management API (PUMAPI),
//! the HTTP interface of the PPMS lab-equipment booking and user management
//! platform.
//!
//! PUMAPI answers `POST` requests with quasi-CSV text: some fields are
//! double-quoted, booleans and bare integers are not, and quoted fields may
//! themselves contain commas. This library provides tools for:
//! - Repairing the inconsistent field quoting so responses can be split
//!   reliably (a general-purpose CSV parser cannot cope with this format)
//! - Parsing single-record and multi-record responses into loosely typed
//!   intermediate records
//! - Building typed domain records (users, systems, bookings, groups) from
//!   those intermediates
//! - Reconstructing a facility's daily "running sheet" into fully resolved
//!   reservation records, including the midnight-rollover rule
//! - Caching resolved users and systems per connection for cross-referencing

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod connection;
        pub mod facility_registry;
        pub mod record_builder;
        pub mod response_parser;
        pub mod running_sheet;
    }
    pub mod adapters {
        pub mod http;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Booking, Group, Reservation, System, User};
pub use app::services::connection::Connection;
pub use config::PumapiConfig;

/// Result type alias for PUMAPI client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for PUMAPI communication and response processing
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The server refused the request ("request not authorized")
    #[error("Not authorized to run action `{action}`")]
    Authorization { action: String },

    /// HTTP transport failure
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Response text violates the expected header/data structure
    #[error("Malformed PUMAPI response: {message}")]
    MalformedResponse { message: String },

    /// A user record could not be constructed
    #[error("Invalid user record: {message}")]
    InvalidUser { message: String },

    /// User account unknown to PPMS
    #[error("User [{login}] is unknown to PPMS")]
    UserNotFound { login: String },

    /// Group unknown to PPMS
    #[error("Group [{unitlogin}] is unknown to PPMS")]
    GroupNotFound { unitlogin: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an authorization error for a given API action
    pub fn authorization(action: impl Into<String>) -> Self {
        Self::Authorization {
            action: action.into(),
        }
    }

    /// Create a transport error with a plain message
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a malformed-response error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create an invalid-user error
    pub fn invalid_user(message: impl Into<String>) -> Self {
        Self::InvalidUser {
            message: message.into(),
        }
    }

    /// Create a user-not-found error
    pub fn user_not_found(login: impl Into<String>) -> Self {
        Self::UserNotFound {
            login: login.into(),
        }
    }

    /// Create a group-not-found error
    pub fn group_not_found(unitlogin: impl Into<String>) -> Self {
        Self::GroupNotFound {
            unitlogin: unitlogin.into(),
        }
    }

    /// Create a date/time parsing error with a plain message
    pub fn datetime_parsing(message: impl Into<String>) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport {
            message: "HTTP request failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: Some(error),
        }
    }
}
