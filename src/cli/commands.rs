//! Command dispatch for the CLI binary

use anyhow::Context;
use chrono::Local;
use colored::Colorize;

use crate::app::services::connection::Connection;
use crate::cli::args::{Args, Command};
use crate::config::PumapiConfig;

/// Open a connection and execute the requested command
pub fn run(args: Args) -> anyhow::Result<()> {
    let config = PumapiConfig::new(&args.url, &args.api_key)
        .with_timeout_secs(args.timeout)
        .with_core_facility_id(args.facility);
    let mut connection =
        Connection::connect(config).context("opening the PUMAPI connection failed")?;

    match &args.command {
        Command::User { login } => {
            let user = connection.get_user(login)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                println!("{} {}", "username:".bold(), user.username);
                println!("{} {}", "fullname:".bold(), user.fullname);
                println!("{} {}", "email:".bold(), user.email);
                println!(
                    "{} {}",
                    "group:".bold(),
                    user.ppms_group.as_deref().unwrap_or("-")
                );
                let state = if user.active {
                    "active".green()
                } else {
                    "inactive".red()
                };
                println!("{} {}", "state:".bold(), state);
            }
        }

        Command::Systems => {
            let systems = connection.get_systems()?;
            let mut systems: Vec<_> = systems.into_values().collect();
            systems.sort_by_key(|system| system.system_id);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&systems)?);
            } else {
                for system in &systems {
                    let catalogue = system
                        .machine_catalogue
                        .as_deref()
                        .unwrap_or("-")
                        .to_string();
                    println!(
                        "{:>6}  {}  [{}]  {}",
                        system.system_id.to_string().bold(),
                        system.name,
                        catalogue.cyan(),
                        system.localisation.dimmed()
                    );
                }
                println!("{} systems", systems.len().to_string().bold());
            }
        }

        Command::Group { unitlogin } => {
            let group = connection.get_group(unitlogin)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&group)?);
            } else {
                println!("{} {}", "group:".bold(), group.unitlogin);
                println!("{} {}", "name:".bold(), group.unitname);
                println!("{} {} <{}>", "head:".bold(), group.head_name, group.head_email);
                println!("{} {}", "department:".bold(), group.department);
                println!("{} {}", "institution:".bold(), group.institution);
            }
        }

        Command::Booking { system_id, next } => {
            let booking = if *next {
                connection.get_next_booking(*system_id)?
            } else {
                connection.get_booking(*system_id)?
            };
            match booking {
                Some(booking) if args.json => {
                    println!("{}", serde_json::to_string_pretty(&booking)?)
                }
                Some(booking) => println!("{}", booking),
                None => println!("{}", "no booking".dimmed()),
            }
        }

        Command::RunningSheet { day, managed_only } => {
            let day = day.unwrap_or_else(|| Local::now().date_naive());
            let sheet = connection.get_running_sheet(day, *managed_only)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&sheet.reservations)?);
            } else {
                for reservation in &sheet.reservations {
                    println!("{}", reservation);
                }
                println!(
                    "{} reservations on {} ({} rows skipped, {} filtered)",
                    sheet.stats.reservations_built.to_string().bold(),
                    day,
                    sheet.stats.rows_skipped,
                    sheet.stats.rows_filtered
                );
            }
        }
    }

    Ok(())
}
