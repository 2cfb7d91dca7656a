//! Configuration defaults, fail-closed resolution and theater assembly.

use theater_core::{Customer, SchedulerError, TheaterError};
use theater_infra::config::{
    ALL_PARAMS, AuditoriumConfig, ConfigError, ConfigParam, MissingConfigError, TheaterConfig,
    default_value, param_name, resolve_config_value,
};

#[test]
fn test_missing_rows_and_seats_apply_defaults() {
    assert_eq!(resolve_config_value(ConfigParam::AuditoriumRows, None), Ok(5.0));
    assert_eq!(
        resolve_config_value(ConfigParam::AuditoriumSeatsPerRow, None),
        Ok(10.0)
    );
    assert_eq!(resolve_config_value(ConfigParam::FirstLineIndex, None), Ok(1.0));
}

#[test]
fn test_missing_ticket_price_fails_closed() {
    let err = resolve_config_value(ConfigParam::TicketPrice, None).unwrap_err();
    assert_eq!(err.param_name, "ticket_price");
    let msg = format!("{err}");
    assert!(msg.contains("ticket_price"), "error must identify the parameter");
    assert!(msg.contains("fail-closed"), "error must state fail-closed");
}

#[test]
fn test_explicit_value_wins_over_default() {
    assert_eq!(
        resolve_config_value(ConfigParam::AuditoriumRows, Some(12.0)),
        Ok(12.0)
    );
}

#[test]
fn test_non_finite_and_negative_values_rejected() {
    for bad in [f64::NAN, f64::INFINITY, -1.0] {
        let result = resolve_config_value(ConfigParam::TicketPrice, Some(bad));
        match result {
            Err(MissingConfigError { param_name, .. }) => assert_eq!(param_name, "ticket_price"),
            Ok(v) => panic!("expected rejection of {bad}, got {v}"),
        }
    }
}

#[test]
fn test_all_params_resolve_or_fail_closed() {
    for &param in ALL_PARAMS {
        match (default_value(param), resolve_config_value(param, None)) {
            (Some(expected), Ok(resolved)) => assert_eq!(resolved, expected),
            (None, Err(err)) => assert_eq!(err.param_name, param_name(param)),
            (default, result) => panic!("{param:?}: default {default:?} resolved to {result:?}"),
        }
    }
}

#[test]
fn test_default_showing_builds_life_and_logan() {
    let theater = TheaterConfig::default_showing(8.0).build().unwrap();
    let titles: Vec<&str> = theater.venues().map(|v| v.title()).collect();
    assert_eq!(titles, vec!["Life", "Logan"]);
    for venue in theater.venues() {
        assert_eq!(venue.rows(), 5);
        assert_eq!(venue.seats_per_row(), 10);
    }
    let lines: Vec<&str> = theater.lines().iter().map(|l| l.name()).collect();
    assert_eq!(lines, vec!["express", "first", "second"]);
    assert_eq!(theater.next_line(), Some(1));
    assert_eq!(theater.ticket_price(), 8.0);
}

#[test]
fn test_built_theater_serves_immediately() {
    let mut theater = TheaterConfig::default_showing(8.0).build().unwrap();
    theater
        .enqueue(Customer::new("ann", "Logan", 3), false)
        .unwrap();
    assert!(theater.serve_next().unwrap().is_some());
    assert_eq!(theater.tickets_sold_for("Logan"), Ok(3));
}

#[test]
fn test_from_json_str_with_partial_fields() {
    let json = r#"{
        "ticket_price": 9.5,
        "auditoriums": [
            { "title": "Logan", "rows": 2, "seats_per_row": 3 },
            { "title": "Alien" }
        ],
        "first_line": 2
    }"#;
    let config = TheaterConfig::from_json_str(json).unwrap();
    assert_eq!(config.lines.len(), 3);
    let theater = config.build().unwrap();
    assert_eq!(theater.venue("Logan").unwrap().capacity(), 6);
    assert_eq!(theater.venue("Alien").unwrap().capacity(), 50);
    assert_eq!(theater.next_line(), Some(2));
}

#[test]
fn test_from_json_str_rejects_malformed_document() {
    let err = TheaterConfig::from_json_str("{ \"ticket_price\": ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_build_without_price_fails_closed() {
    let mut config = TheaterConfig::default_showing(1.0);
    config.ticket_price = None;
    match config.build() {
        Err(ConfigError::Missing(err)) => assert_eq!(err.param_name, "ticket_price"),
        other => panic!("expected missing ticket price, got {other:?}"),
    }
}

#[test]
fn test_build_rejects_zero_price_and_empty_layouts() {
    let zero_price = TheaterConfig::default_showing(0.0).build().unwrap_err();
    assert!(matches!(
        zero_price,
        ConfigError::Invalid {
            param_name: "ticket_price",
            ..
        }
    ));

    let mut config = TheaterConfig::default_showing(5.0);
    config.auditoriums.push(AuditoriumConfig::new("Empty", 0, 4));
    assert!(matches!(
        config.build(),
        Err(ConfigError::Invalid {
            param_name: "rows",
            ..
        })
    ));

    let mut config = TheaterConfig::default_showing(5.0);
    config.auditoriums.push(AuditoriumConfig::new("Narrow", 3, 0));
    assert!(matches!(
        config.build(),
        Err(ConfigError::Invalid {
            param_name: "seats_per_row",
            ..
        })
    ));
}

#[test]
fn test_build_rejects_duplicate_titles_and_missing_lines() {
    let mut config = TheaterConfig::default_showing(5.0);
    config.auditoriums.push(AuditoriumConfig::new("Life", 1, 1));
    assert_eq!(
        config.build().unwrap_err(),
        ConfigError::DuplicateVenue {
            title: "Life".to_string()
        }
    );

    let mut config = TheaterConfig::default_showing(5.0);
    config.lines.clear();
    assert_eq!(config.build().unwrap_err(), ConfigError::NoLines);
}

#[test]
fn test_build_rejects_first_line_past_last_line() {
    let mut config = TheaterConfig::default_showing(5.0);
    config.first_line = Some(3);
    assert!(matches!(
        config.build(),
        Err(ConfigError::Invalid {
            param_name: "first_line",
            ..
        })
    ));
}

#[test]
fn test_build_rejects_layout_overflowing_seat_positions() {
    let mut config = TheaterConfig::default_showing(5.0);
    config
        .auditoriums
        .push(AuditoriumConfig::new("Stadium", u32::MAX, 2));
    assert!(matches!(
        config.build(),
        Err(ConfigError::Invalid {
            param_name: "seats_per_row",
            ..
        })
    ));
}

#[test]
fn test_fractional_counts_fail_to_parse() {
    let json = r#"{
        "ticket_price": 5.0,
        "auditoriums": [{ "title": "Logan", "rows": 2.5 }]
    }"#;
    assert!(matches!(
        TheaterConfig::from_json_str(json),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_theater_errors_keep_their_source() {
    let err = ConfigError::from(TheaterError::Scheduler(
        SchedulerError::SchedulerNotInitialized,
    ));
    assert_eq!(
        err.to_string(),
        "customer line order has not been established"
    );
    assert!(std::error::Error::source(&err).is_some());
}
