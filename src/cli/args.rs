//! Command line argument definitions

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};

/// Query a PPMS instance through PUMAPI
#[derive(Parser, Debug)]
#[command(name = "pumapi-client", version, about)]
pub struct Args {
    /// URL of the PUMAPI endpoint
    #[arg(long, env = "PUMAPI_URL")]
    pub url: String,

    /// API key used for authentication
    #[arg(long, env = "PUMAPI_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Core facility ref for running sheet requests
    #[arg(long, default_value_t = 2)]
    pub facility: u32,

    /// Print results as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the details of one user account
    User {
        /// PPMS login name
        login: String,
    },

    /// List all systems of the PPMS instance
    Systems,

    /// Show the details of one group
    Group {
        /// Group identifier ("unitlogin")
        unitlogin: String,
    },

    /// Show the current or next booking of a system
    Booking {
        /// Numeric system ID
        system_id: i32,

        /// Query the upcoming booking instead of the running one
        #[arg(long)]
        next: bool,
    },

    /// Resolve the running sheet of a day into reservations
    RunningSheet {
        /// Day to fetch (YYYY-MM-DD), defaults to today
        #[arg(long)]
        day: Option<NaiveDate>,

        /// Only keep reservations on systems with a machine catalogue
        #[arg(long)]
        managed_only: bool,
    },
}
