//! Integration tests for the connection-tracking pipeline.
//!
//! These tests are implemented in:
//! `crates/flowtrace-tracker/tests/pipeline_test.rs`
//!
//! Covered scenarios:
//! - `pipeline_client_and_server_views_of_one_connection`: Connect/accept views track and close independently
//! - `pipeline_short_lived_connection_reported_exactly_once`: Flows opened and closed between drains are not lost
//! - `pipeline_long_lived_connection_recurs_until_closed`: Open set is a recurring snapshot
//! - `pipeline_churn_does_not_accumulate_backlog`: Closed backlog is bounded by drain cadence
//! - `pipeline_events_round_trip_through_json_lines`: Recorded event streams replay into identical state
