// ABOUTME: Tests for FunctionTool - schema derivation, execute, and the
// ABOUTME: protocol adapter's success and error envelopes.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::*;
use crate::bind::Binder;
use crate::error::{ConversionError, ToolError};
use crate::schema::Schema;
use crate::shape::{FieldShape, ParameterShape, RecordShape, Shaped, TypeShape};

#[derive(Debug, Deserialize)]
struct Lookup {
    id: i64,
    #[serde(default)]
    note: String,
}

impl Shaped for Lookup {
    fn shape() -> TypeShape {
        RecordShape::new("Lookup")
            .field(FieldShape::new::<i64>("id").describe("Record id"))
            .field(FieldShape::new::<String>("note").omit_empty())
            .into()
    }
}

fn input(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("test input must be an object"),
    }
}

fn lookup_tool() -> FunctionTool {
    FunctionTool::new("lookup", "Look up a record", |p: Lookup| async move {
        Json(json!({"id": p.id, "note": p.note}))
    })
}

#[test]
fn test_schema_derived_at_construction() {
    let tool = lookup_tool();
    let schema = tool.schema().unwrap();
    assert_eq!(schema.required, vec!["id"]);
    assert_eq!(
        schema.properties["id"],
        json!({"type": "integer", "description": "Record id"})
    );
    assert!(matches!(tool.shape(), ParameterShape::Record(_)));
    assert_eq!(tool.name(), "lookup");
    assert_eq!(tool.description(), "Look up a record");
}

#[tokio::test]
async fn test_execute_binds_and_zero_fills() {
    let tool = lookup_tool();
    let out = tool
        .execute(CallContext::new(), input(json!({"id": "42"})))
        .await
        .unwrap();
    assert_eq!(out, json!({"id": 42, "note": ""}));
}

#[tokio::test]
async fn test_bind_failure_skips_invocation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let tool = FunctionTool::new("count", "Counts calls", move |_p: Lookup| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    let err = tool
        .execute(CallContext::new(), input(json!({"id": [1]})))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Conversion { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    tool.execute(CallContext::new(), input(json!({"id": 1})))
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unit_return_is_null() {
    let tool = FunctionTool::new("noop", "Does nothing", |_: ()| async {});
    let out = tool.execute(CallContext::new(), Map::new()).await.unwrap();
    assert_eq!(out, Value::Null);
    assert!(tool.schema().unwrap().is_empty());
}

#[tokio::test]
async fn test_result_return_ok_and_err() {
    let tool = FunctionTool::new("div", "Divide 100", |p: Lookup| async move {
        if p.id == 0 {
            anyhow::bail!("division by zero");
        }
        Ok(100 / p.id)
    });

    let out = tool
        .execute(CallContext::new(), input(json!({"id": 4})))
        .await
        .unwrap();
    assert_eq!(out, json!(25));

    let err = tool
        .execute(CallContext::new(), input(json!({"id": 0})))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Execution(_)));
}

#[tokio::test]
async fn test_opaque_map_receives_raw_arguments() {
    let tool = FunctionTool::new(
        "raw",
        "Echo raw arguments",
        |args: Map<String, Value>| async move { Value::Object(args) },
    );
    assert!(tool.schema().unwrap().is_empty());

    let raw = json!({"anything": {"nested": [1, "two"]}, "flag": "yes"});
    let out = tool
        .execute(CallContext::new(), input(raw.clone()))
        .await
        .unwrap();
    assert_eq!(out, raw);
}

#[tokio::test]
async fn test_single_value_parameter() {
    let tool = FunctionTool::new("sum", "Sum numbers", |values: Vec<i64>| async move {
        values.iter().sum::<i64>()
    });
    assert_eq!(tool.schema().unwrap().required, vec!["value"]);

    let out = tool
        .execute(CallContext::new(), input(json!({"value": [1, "2", 3]})))
        .await
        .unwrap();
    assert_eq!(out, json!(6));
}

#[tokio::test]
async fn test_context_is_passed_through() {
    let tool = FunctionTool::with_context("ctx", "Reports cancellation", |ctx: CallContext, _: ()| {
        async move { ctx.is_cancelled() }
    });
    let ctx = CallContext::new();
    ctx.cancel();
    let out = tool.execute(ctx, Map::new()).await.unwrap();
    assert_eq!(out, json!(true));
}

#[tokio::test]
async fn test_call_success_envelope() {
    let tool = lookup_tool();
    let result = tool
        .call(CallContext::new(), Some(json!({"id": 7, "note": "hi"})))
        .await;
    assert!(!result.is_error);
    assert_eq!(result.value(), Some(json!({"id": 7, "note": "hi"})));
}

#[tokio::test]
async fn test_call_error_envelope() {
    let tool = lookup_tool();
    let result = tool
        .call(CallContext::new(), Some(json!({"id": "abc"})))
        .await;
    assert!(result.is_error);
    assert!(result.content.contains("failed to convert parameter id"));
}

#[tokio::test]
async fn test_call_rejects_non_object_arguments() {
    let tool = lookup_tool();
    let result = tool.call(CallContext::new(), Some(json!([1, 2]))).await;
    assert!(result.is_error);
    assert!(result.content.starts_with("Invalid arguments"));
}

#[tokio::test]
async fn test_call_without_arguments_uses_empty_map() {
    let tool = lookup_tool();
    let result = tool.call(CallContext::new(), None).await;
    assert!(!result.is_error);
    assert_eq!(result.value(), Some(json!({"id": 0, "note": ""})));
}

#[tokio::test]
async fn test_missing_required_reports_schema() {
    let tool = lookup_tool().with_binder(Binder::strict());
    let result = tool.call(CallContext::new(), Some(json!({}))).await;
    assert!(result.is_error);
    assert!(result.content.starts_with("The {"));
    assert!(result.content.ends_with("schema is required to execute lookup."));
}

#[tokio::test]
async fn test_function_raised_missing_required() {
    let tool = FunctionTool::new("search", "Search", |p: Lookup| async move {
        if p.note.is_empty() {
            return Err(ToolError::missing("note"));
        }
        Ok(p.note)
    })
    .with_schema(None);

    let result = tool.call(CallContext::new(), Some(json!({"id": 1}))).await;
    assert!(result.is_error);
    assert_eq!(result.content, "Required: note");
}

#[test]
fn test_with_schema_overrides() {
    let tool = lookup_tool().with_schema(Some(Schema::empty()));
    assert!(tool.schema().unwrap().is_empty());

    let suppressed = lookup_tool().with_schema(None);
    assert!(suppressed.schema().is_none());
    assert_eq!(suppressed.info().input_schema["type"], "object");
}

#[test]
fn test_info_exports_schema() {
    let info = lookup_tool().info();
    assert_eq!(info.name, "lookup");
    assert_eq!(info.input_schema["required"], json!(["id"]));
}

#[test]
fn test_decode_arguments() {
    assert!(decode_arguments(None).unwrap().is_empty());
    assert!(decode_arguments(Some(Value::Null)).unwrap().is_empty());
    assert_eq!(decode_arguments(Some(json!({"a": 1}))).unwrap().len(), 1);
    assert!(decode_arguments(Some(json!("text"))).is_err());
}

/// Execute a single-value tool over `$ty` with the value absent, then present.
macro_rules! assert_binds {
    ($ty:ty, absent: $absent:expr, present: $present:expr => $expected:expr) => {{
        let tool = FunctionTool::new("echo", "Echoes its value", |v: $ty| async move { Json(v) });
        let absent = tool.execute(CallContext::new(), Map::new()).await;
        assert_eq!(absent.unwrap(), $absent, "absent {}", stringify!($ty));
        let present = tool
            .execute(CallContext::new(), input(json!({"value": $present})))
            .await;
        assert_eq!(present.unwrap(), $expected, "present {}", stringify!($ty));
    }};
}

#[tokio::test]
async fn test_every_shaped_type_binds_absent_and_present() {
    assert_binds!((), absent: json!(null), present: json!(1) => json!(null));
    assert_binds!(bool, absent: json!(false), present: json!("T") => json!(true));
    assert_binds!(i8, absent: json!(0), present: json!(300) => json!(44));
    assert_binds!(i16, absent: json!(0), present: json!("-12") => json!(-12));
    assert_binds!(i32, absent: json!(0), present: json!(7.9) => json!(7));
    assert_binds!(i64, absent: json!(0), present: json!("42") => json!(42));
    assert_binds!(isize, absent: json!(0), present: json!(-3) => json!(-3));
    assert_binds!(u8, absent: json!(0), present: json!("7") => json!(7));
    assert_binds!(u16, absent: json!(0), present: json!(65537) => json!(1));
    assert_binds!(u32, absent: json!(0), present: json!(9) => json!(9));
    assert_binds!(u64, absent: json!(0), present: json!("18") => json!(18));
    assert_binds!(usize, absent: json!(0), present: json!(5) => json!(5));
    assert_binds!(f32, absent: json!(0.0), present: json!(1.5) => json!(1.5));
    assert_binds!(f64, absent: json!(0.0), present: json!("2.25") => json!(2.25));
    assert_binds!(String, absent: json!(""), present: json!(5) => json!("5"));
    assert_binds!(char, absent: json!("\u{0}"), present: json!("z") => json!("z"));
    assert_binds!(Value, absent: json!(null), present: json!({"a": 1}) => json!({"a": 1}));
    assert_binds!(Option<i32>, absent: json!(null), present: json!("3") => json!(3));
    assert_binds!(Box<i32>, absent: json!(0), present: json!(4) => json!(4));
    assert_binds!(Vec<i32>, absent: json!([]), present: json!([1, "2"]) => json!([1, 2]));
    assert_binds!(
        [u8; 3],
        absent: json!([0, 0, 0]),
        present: json!([1, "2", 3]) => json!([1, 2, 3])
    );
    assert_binds!(HashSet<i32>, absent: json!([]), present: json!([5]) => json!([5]));
    assert_binds!(BTreeSet<i32>, absent: json!([]), present: json!([2, 1]) => json!([1, 2]));
    assert_binds!(
        HashMap<String, i32>,
        absent: json!({}),
        present: json!({"a": "1"}) => json!({"a": 1})
    );
    assert_binds!(
        BTreeMap<String, bool>,
        absent: json!({}),
        present: json!({"b": "t"}) => json!({"b": true})
    );
    assert_binds!(HashMap<u32, String>, absent: json!({}), present: json!(null) => json!({}));
    assert_binds!(BTreeMap<u32, String>, absent: json!({}), present: json!(null) => json!({}));
    // Untyped maps receive the whole input, `value` key included.
    assert_binds!(Map<String, Value>, absent: json!({}), present: json!(2) => json!({"value": 2}));
    assert_binds!(
        HashMap<String, Value>,
        absent: json!({}),
        present: json!(2) => json!({"value": 2})
    );
}

#[tokio::test]
async fn test_integer_keyed_map_value_is_a_conversion_error() {
    let tool = FunctionTool::new("keys", "Integer keys", |m: BTreeMap<u32, String>| async move {
        Json(m)
    });
    let err = tool
        .execute(CallContext::new(), input(json!({"value": {"1": "x"}})))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Conversion { ref field, .. } if field == "value"));
}

#[derive(Debug, Serialize, Deserialize)]
struct Swatch {
    id: i64,
    grade: char,
    rgb: [u8; 3],
}

impl Shaped for Swatch {
    fn shape() -> TypeShape {
        RecordShape::new("Swatch")
            .field(FieldShape::new::<i64>("id"))
            .field(FieldShape::new::<char>("grade"))
            .field(FieldShape::new::<[u8; 3]>("rgb"))
            .into()
    }
}

fn swatch_tool() -> FunctionTool {
    FunctionTool::new("swatch", "Echoes a swatch", |s: Swatch| async move { Json(s) })
}

#[tokio::test]
async fn test_char_and_array_fields_zero_fill_when_absent() {
    let out = swatch_tool()
        .execute(CallContext::new(), input(json!({"id": 1})))
        .await
        .unwrap();
    assert_eq!(out, json!({"id": 1, "grade": "\u{0}", "rgb": [0, 0, 0]}));

    let single = FunctionTool::new("grade", "Echoes a grade", |c: char| async move { c });
    let out = single.execute(CallContext::new(), Map::new()).await.unwrap();
    assert_eq!(out, json!("\u{0}"));
}

#[tokio::test]
async fn test_char_and_array_fields_report_field_errors() {
    let err = swatch_tool()
        .execute(CallContext::new(), input(json!({"id": 1, "grade": "ab"})))
        .await
        .unwrap_err();
    match err {
        ToolError::Conversion { field, source } => {
            assert_eq!(field, "grade");
            assert!(matches!(source, ConversionError::Parse { .. }));
        }
        other => panic!("Expected conversion error, got {other:?}"),
    }

    let err = swatch_tool()
        .execute(CallContext::new(), input(json!({"rgb": [1, 2]})))
        .await
        .unwrap_err();
    match err {
        ToolError::Conversion { field, source } => {
            assert_eq!(field, "rgb");
            assert!(matches!(source, ConversionError::Length { expected: 3, found: 2, .. }));
        }
        other => panic!("Expected conversion error, got {other:?}"),
    }

    let single = FunctionTool::new("grade", "Echoes a grade", |c: char| async move { c });
    let err = single
        .execute(CallContext::new(), input(json!({"value": "ab"})))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Conversion { ref field, .. } if field == "value"));
}
