//! Tests for the helper lifecycle: prepare, enumerate, get rows.

use std::io::Write;

use etlt_model::{Row, Value};
use etlt_temporal::{TemporalError, Type2Config, Type2Helper};

fn row(key: &str, start: &str, end: &str) -> Row {
    Row::new().with("key", key).with("start", start).with("end", end)
}

fn helper() -> Type2Helper {
    Type2Helper::new(Type2Config::new("start", "end").with_pseudo_key(["key"])).unwrap()
}

#[test]
fn get_rows_round_trips_prepared_rows() {
    let rows = vec![
        row("x", "2000-01-01", "2000-01-31"),
        row("y", "2000-01-01 00:00:00", "2000-03-31"),
        row("x", "2000-02-01", "2000-02-29"),
    ];
    let mut helper = helper();
    helper.prepare_owned(rows).unwrap();

    // grouped by key, midnight suffix normalised away
    assert_eq!(
        helper.get_rows().unwrap(),
        vec![
            row("x", "2000-01-01", "2000-01-31"),
            row("x", "2000-02-01", "2000-02-29"),
            row("y", "2000-01-01", "2000-03-31"),
        ]
    );
}

#[test]
fn prepare_data_leaves_caller_rows_untouched() {
    let rows = vec![row("x", "2000-01-01", "2000-01-31")];
    let snapshot = rows.clone();
    let mut helper = helper();
    helper.prepare_data(&rows).unwrap();
    helper.enumerate("ordinal", 1);
    assert_eq!(rows, snapshot);
}

#[test]
fn enumerate_numbers_rows_per_key_in_interval_order() {
    let rows = vec![
        row("x", "2000-03-01", "2000-03-31"),
        row("y", "2000-01-01", "2000-12-31"),
        row("x", "2000-01-01", "2000-01-31"),
        row("x", "2000-02-01", "2000-02-29"),
    ];
    let mut helper = helper();
    helper.prepare_data(&rows).unwrap();
    helper.enumerate("seq", 10);

    let numbered: Vec<(Value, Value, Value)> = helper
        .get_rows()
        .unwrap()
        .into_iter()
        .map(|row| {
            (
                row.get("key").cloned().unwrap_or_default(),
                row.get("start").cloned().unwrap_or_default(),
                row.get("seq").cloned().unwrap_or_default(),
            )
        })
        .collect();

    assert_eq!(
        numbered,
        vec![
            ("x".into(), "2000-01-01".into(), Value::Int(10)),
            ("x".into(), "2000-02-01".into(), Value::Int(11)),
            ("x".into(), "2000-03-01".into(), Value::Int(12)),
            ("y".into(), "2000-01-01".into(), Value::Int(10)),
        ]
    );
}

#[test]
fn empty_pseudo_key_forms_one_group() {
    let mut helper = Type2Helper::new(Type2Config::new("start", "end")).unwrap();
    helper
        .prepare_data(&[
            row("x", "2000-01-01", "2000-01-31"),
            row("y", "2000-02-01", "2000-02-29"),
        ])
        .unwrap();
    assert_eq!(helper.groups().len(), 1);
}

#[test]
fn missing_interval_field_is_reported() {
    let mut helper = helper();
    let err = helper
        .prepare_data(&[Row::new().with("key", "x").with("start", "2000-01-01")])
        .unwrap_err();
    assert!(matches!(err, TemporalError::MissingField { field } if field == "end"));
}

#[test]
fn invalid_config_is_rejected() {
    let err = Type2Helper::new(Type2Config::new("date", "date")).unwrap_err();
    assert!(matches!(err, TemporalError::InvalidConfig { .. }));
}

#[test]
fn config_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "start_field = \"valid_from\"\nend_field = \"valid_to\"\npseudo_key = [\"customer\"]"
    )
    .unwrap();

    let config = Type2Config::from_path(file.path()).unwrap();
    assert_eq!(config.start_field, "valid_from");
    assert_eq!(config.pseudo_key, vec!["customer".to_string()]);
}

#[test]
fn config_from_missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Type2Config::from_path(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, TemporalError::ConfigRead { .. }));
}
