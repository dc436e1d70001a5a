//! Tests for routing rows through transformer steps.

use std::collections::HashMap;

use etlt_dimension::{DimensionError, KeyResolver, Type1Dimension};
use etlt_dimension::Result as DimensionResult;
use etlt_ingest::{CsvOptions, read_rows};
use etlt_model::{Row, Value};
use etlt_transform::{
    EXCEPTION_REASON, LookupStep, Result, Routed, RowSink, StepOutcome, TransformError,
    Transformer, VecSink, from_fn,
};

fn copy_field(field: &'static str) -> impl etlt_transform::Step {
    from_fn(format!("copy {field}"), move |in_row, _tmp, out_row| {
        if let Some(value) = in_row.get(field) {
            out_row.insert(field, value.clone());
        }
        Ok(StepOutcome::Continue)
    })
}

fn run(transformer: &mut Transformer, rows: Vec<Row>) -> (VecSink, VecSink, VecSink) {
    let mut transformed = VecSink::new();
    let mut parked = VecSink::new();
    let mut ignored = VecSink::new();
    transformer
        .run(rows, &mut transformed, &mut parked, &mut ignored)
        .unwrap();
    (transformed, parked, ignored)
}

#[test]
fn steps_run_in_order_and_share_tmp_row() {
    let mut transformer = Transformer::new()
        .with_step(from_fn("stash", |in_row, tmp_row, _out| {
            let name = in_row.get("name").and_then(Value::as_str).unwrap_or("");
            tmp_row.insert("upper", name.to_uppercase());
            Ok(StepOutcome::Continue)
        }))
        .with_step(from_fn("emit", |_in, tmp_row, out_row| {
            out_row.insert("name", tmp_row.get("upper").cloned().unwrap_or_default());
            Ok(StepOutcome::Continue)
        }));

    let routed = transformer
        .transform_row(&Row::new().with("name", "abc"))
        .unwrap();
    assert_eq!(routed, Routed::Transformed(Row::new().with("name", "ABC")));
}

#[test]
fn park_and_ignore_stop_later_steps() {
    let mut transformer = Transformer::new()
        .with_step(from_fn("filter", |in_row, _tmp, _out| {
            Ok(match in_row.get("kind").and_then(Value::as_str) {
                Some("test") => StepOutcome::Ignore("test record".to_string()),
                Some("bad") => StepOutcome::Park("bad kind".to_string()),
                _ => StepOutcome::Continue,
            })
        }))
        .with_step(copy_field("kind"));

    let rows = vec![
        Row::new().with("kind", "test"),
        Row::new().with("kind", "bad"),
        Row::new().with("kind", "good"),
    ];
    let (transformed, parked, ignored) = run(&mut transformer, rows);

    assert_eq!(transformed.into_rows(), vec![Row::new().with("kind", "good")]);
    assert_eq!(parked.reasons().collect::<Vec<_>>(), vec![Some("bad kind")]);
    assert_eq!(ignored.reasons().collect::<Vec<_>>(), vec![Some("test record")]);
}

#[test]
fn parked_rows_keep_the_source_row() {
    let mut transformer = Transformer::new().with_step(from_fn("mutate", |in_row, _tmp, _out| {
        in_row.insert("kind", "changed");
        Ok(StepOutcome::Park("always".to_string()))
    }));

    let source = Row::new().with("kind", "original");
    let (_, parked, _) = run(&mut transformer, vec![source.clone()]);
    assert_eq!(parked.into_rows(), vec![source]);
}

#[test]
fn failing_step_parks_row_as_exception() {
    let mut transformer = Transformer::new()
        .with_step(from_fn("parse amount", |in_row, _tmp, out_row| {
            let text = in_row.get("amount").and_then(Value::as_str).unwrap_or("");
            let amount: i64 = text.parse().map_err(|_| TransformError::Step {
                step: "parse amount".to_string(),
                message: format!("not a number: {text}"),
            })?;
            out_row.insert("amount", amount);
            Ok(StepOutcome::Continue)
        }));

    let rows = vec![Row::new().with("amount", "12"), Row::new().with("amount", "x")];
    let (transformed, parked, _) = run(&mut transformer, rows);

    assert_eq!(transformed.len(), 1);
    assert_eq!(parked.reasons().collect::<Vec<_>>(), vec![Some(EXCEPTION_REASON)]);
    let summary = transformer.summary();
    assert_eq!((summary.parked, summary.errors), (1, 1));
}

#[test]
fn missing_mandatory_fields_are_listed() {
    let mut transformer = Transformer::new()
        .with_step(copy_field("a"))
        .with_step(copy_field("b"))
        .with_step(copy_field("c"))
        .with_mandatory_fields(["a", "b", "c"]);

    let routed = transformer
        .transform_row(&Row::new().with("b", "x").with("c", ""))
        .unwrap();
    assert_eq!(routed, Routed::Parked("a c".to_string()));
}

struct Countries {
    ids: HashMap<Value, i64>,
}

impl KeyResolver<Value> for Countries {
    fn resolve(&mut self, key: &Value, _enhancement: Option<&Row>) -> DimensionResult<Option<i64>> {
        if key == &Value::from("??") {
            return Err(DimensionError::resolve(key, "lookup failed"));
        }
        Ok(self.ids.get(key).copied())
    }
}

#[test]
fn lookup_step_replaces_natural_keys() {
    let dimension = Type1Dimension::new(Countries {
        ids: HashMap::from([(Value::from("NL"), 31)]),
    });
    let mut transformer = Transformer::new()
        .with_step(LookupStep::new("country", "country_id", dimension))
        .with_mandatory_fields(["country_id"]);

    let rows = vec![
        Row::new().with("country", "NL"),
        Row::new().with("country", "XX"),
        Row::new().with("country", "??"),
        Row::new().with("country", Value::Null),
    ];
    let (transformed, parked, _) = run(&mut transformer, rows);

    assert_eq!(
        transformed.into_rows(),
        vec![Row::new().with("country_id", 31)]
    );
    assert_eq!(
        parked.reasons().collect::<Vec<_>>(),
        vec![Some("country_id"), Some(EXCEPTION_REASON), Some("country_id")]
    );
}

struct FailingSink;

impl RowSink for FailingSink {
    fn write(&mut self, _row: Row, _reason: Option<&str>) -> Result<()> {
        Err(TransformError::Sink {
            sink: "parked",
            message: "disk full".to_string(),
        })
    }
}

#[test]
fn sink_error_aborts_the_run() {
    let mut transformer = Transformer::new().with_step(from_fn("park", |_in, _tmp, _out| {
        Ok(StepOutcome::Park("no".to_string()))
    }));

    let rows = vec![Row::new(), Row::new()];
    let err = transformer
        .run(rows, &mut VecSink::new(), &mut FailingSink, &mut VecSink::new())
        .unwrap_err();
    assert!(matches!(err, TransformError::Sink { .. }));
    assert_eq!(transformer.summary().total, 1);
    assert_eq!(transformer.summary().parked, 0);
}

#[test]
fn csv_source_summary() {
    let input = "code,name\nNL,Netherlands\nBE,\n#,comment\nDE,Germany\n";
    let rows = read_rows(input.as_bytes(), &CsvOptions::default()).unwrap();

    let mut transformer = Transformer::new()
        .with_step(from_fn("skip comments", |in_row, _tmp, _out| {
            Ok(match in_row.get("code").and_then(Value::as_str) {
                Some("#") => StepOutcome::Ignore("comment".to_string()),
                _ => StepOutcome::Continue,
            })
        }))
        .with_step(copy_field("code"))
        .with_step(copy_field("name"))
        .with_mandatory_fields(["code", "name"]);

    let (_, parked, _) = run(&mut transformer, rows);
    assert_eq!(parked.reasons().collect::<Vec<_>>(), vec![Some("name")]);

    insta::assert_json_snapshot!(transformer.summary(), @r#"
    {
      "total": 4,
      "transformed": 2,
      "parked": 1,
      "ignored": 1,
      "errors": 0
    }
    "#);
}
