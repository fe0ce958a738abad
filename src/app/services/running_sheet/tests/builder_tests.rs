//! Tests for the running sheet builder

use chrono::NaiveDate;

use crate::app::models::{System, User};
use crate::app::services::facility_registry::FacilityRegistry;
use crate::app::services::response_parser::parse_multi_response;
use crate::app::services::running_sheet::RunningSheetBuilder;

const SHEET_HEADER: &str = "Location,Start time,End time,Object,User,Training,Assisted";

fn sheet_response(rows: &[&str]) -> String {
    let mut text = format!("{}\r\n", SHEET_HEADER);
    for row in rows {
        text.push_str(row);
        text.push_str("\r\n");
    }
    text
}

fn test_system(system_id: i32, name: &str) -> System {
    System::new(
        system_id,
        name.to_string(),
        "Room 4".to_string(),
        "Microscope".to_string(),
        2,
        true,
        true,
        true,
        true,
        false,
        false,
    )
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 18).unwrap()
}

fn create_test_registry() -> FacilityRegistry {
    let mut registry = FacilityRegistry::new();
    registry.insert_system(
        test_system(31, "Zeiss LSM-700 Confocal").with_machine_catalogue(Some("confocal")),
    );
    registry.insert_system(test_system(42, "Our Brand-New Microscope"));
    registry.insert_user(
        User::new("pumapi", "PumAPI Rust", "pumapi@example.org")
            .unwrap()
            .with_ppms_fullname("Rust PumAPI"),
    );
    registry.insert_user(User::new("jdoe", "Jane Doe", "jane@example.org").unwrap());
    registry
}

fn build(
    rows: &[&str],
    restrict_to_managed: bool,
) -> crate::app::services::running_sheet::SheetResult {
    let text = sheet_response(rows);
    let records = parse_multi_response(&text, true, true).unwrap();
    let registry = create_test_registry();
    RunningSheetBuilder::new(&registry).build(&records, day(), restrict_to_managed)
}

#[test]
fn test_rows_resolve_into_reservations() {
    let result = build(
        &[
            "\"Room 4\",\"08:00\",\"09:30\",\"Zeiss LSM-700 Confocal\",\"Rust PumAPI\",\"\",\"\"",
            "\"Room 4\",\"10:00\",\"12:00\",\"Our Brand-New Microscope\",\"Jane Doe\",\"\",\"\"",
        ],
        false,
    );

    assert_eq!(result.stats.rows_total, 2);
    assert_eq!(result.stats.reservations_built, 2);
    assert_eq!(result.stats.rows_skipped, 0);

    let first = &result.reservations[0];
    assert_eq!(first.username, "pumapi");
    assert_eq!(first.system_id, 31);
    assert_eq!(first.machine_catalogue.as_deref(), Some("confocal"));
    assert_eq!(first.reservation_start, day().and_hms_opt(8, 0, 0).unwrap());
    assert_eq!(first.reservation_end, day().and_hms_opt(9, 30, 0).unwrap());

    // the second row's user only matches via the display-name fallback
    let second = &result.reservations[1];
    assert_eq!(second.username, "jdoe");
    assert_eq!(second.machine_catalogue, None);
}

#[test]
fn test_midnight_end_rolls_over() {
    let result = build(
        &["\"Room 4\",\"22:00\",\"00:00\",\"Zeiss LSM-700 Confocal\",\"Rust PumAPI\",\"\",\"\""],
        false,
    );

    let reservation = &result.reservations[0];
    assert_eq!(
        reservation.reservation_start,
        day().and_hms_opt(22, 0, 0).unwrap()
    );
    assert_eq!(
        reservation.reservation_end,
        NaiveDate::from_ymd_opt(2024, 5, 19)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    );
}

#[test]
fn test_unknown_system_skips_only_that_row() {
    let result = build(
        &[
            "\"Room 4\",\"08:00\",\"09:00\",\"Decommissioned Scope\",\"Rust PumAPI\",\"\",\"\"",
            "\"Room 4\",\"10:00\",\"12:00\",\"Our Brand-New Microscope\",\"Jane Doe\",\"\",\"\"",
        ],
        false,
    );

    assert_eq!(result.stats.rows_total, 2);
    assert_eq!(result.stats.reservations_built, 1);
    assert_eq!(result.stats.rows_skipped, 1);
    assert_eq!(result.reservations[0].username, "jdoe");
    assert_eq!(result.stats.errors.len(), 1);
    assert!(result.stats.errors[0].contains("Decommissioned Scope"));
}

#[test]
fn test_unknown_user_skips_only_that_row() {
    let result = build(
        &[
            "\"Room 4\",\"08:00\",\"09:00\",\"Our Brand-New Microscope\",\"Nobody Known\",\"\",\"\"",
            "\"Room 4\",\"10:00\",\"12:00\",\"Our Brand-New Microscope\",\"Jane Doe\",\"\",\"\"",
        ],
        false,
    );

    assert_eq!(result.stats.reservations_built, 1);
    assert_eq!(result.stats.rows_skipped, 1);
}

#[test]
fn test_ppms_fullname_wins_over_display_name() {
    // a second user whose *display* name collides with the first user's
    // PPMS-order name must not shadow the PPMS-order match
    let mut registry = create_test_registry();
    registry.insert_user(User::new("impostor", "Rust PumAPI", "").unwrap());

    let text = sheet_response(&[
        "\"Room 4\",\"08:00\",\"09:00\",\"Our Brand-New Microscope\",\"Rust PumAPI\",\"\",\"\"",
    ]);
    let records = parse_multi_response(&text, true, true).unwrap();
    let result = RunningSheetBuilder::new(&registry).build(&records, day(), false);

    assert_eq!(result.reservations[0].username, "pumapi");
}

#[test]
fn test_restrict_to_managed_filters_uncatalogued_systems() {
    let result = build(
        &[
            "\"Room 4\",\"08:00\",\"09:00\",\"Zeiss LSM-700 Confocal\",\"Rust PumAPI\",\"\",\"\"",
            "\"Room 4\",\"10:00\",\"12:00\",\"Our Brand-New Microscope\",\"Jane Doe\",\"\",\"\"",
        ],
        true,
    );

    assert_eq!(result.stats.reservations_built, 1);
    assert_eq!(result.stats.rows_filtered, 1);
    assert_eq!(result.stats.rows_skipped, 0);
    assert_eq!(result.reservations[0].system_id, 31);
}

#[test]
fn test_empty_sheet_yields_empty_result() {
    let records = parse_multi_response("", true, true).unwrap();
    let registry = create_test_registry();
    let result = RunningSheetBuilder::new(&registry).build(&records, day(), false);

    assert!(result.reservations.is_empty());
    assert_eq!(result.stats.rows_total, 0);
}

#[test]
fn test_bad_clock_time_skips_the_row() {
    let result = build(
        &["\"Room 4\",\"late\",\"09:00\",\"Our Brand-New Microscope\",\"Jane Doe\",\"\",\"\""],
        false,
    );

    assert_eq!(result.stats.rows_skipped, 1);
    assert!(result.reservations.is_empty());
}

#[test]
fn test_output_preserves_response_order() {
    // rows out of chronological order stay in response order
    let result = build(
        &[
            "\"Room 4\",\"14:00\",\"15:00\",\"Our Brand-New Microscope\",\"Jane Doe\",\"\",\"\"",
            "\"Room 4\",\"08:00\",\"09:00\",\"Zeiss LSM-700 Confocal\",\"Rust PumAPI\",\"\",\"\"",
        ],
        false,
    );

    assert_eq!(
        result.reservations[0].reservation_start,
        day().and_hms_opt(14, 0, 0).unwrap()
    );
    assert_eq!(
        result.reservations[1].reservation_start,
        day().and_hms_opt(8, 0, 0).unwrap()
    );
}
