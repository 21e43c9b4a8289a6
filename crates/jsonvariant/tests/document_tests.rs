/// Document building from JSON text, serializer output and serde interop.
use std::fmt::Write as _;

use jsonvariant::{
    to_json_string, write_json, Arena, DocumentError, JsonArray, JsonObject, ParseOptions,
    Variant, DEFAULT_NESTING_LIMIT, MAX_RENDER_DEPTH,
};
use serde_json::{json, Value};

/// Parse `json` and assert it renders back to the same compact text.
fn assert_roundtrip(json: &str) {
    let arena = Arena::new();
    let root = arena.parse(json).expect("parse failed");
    assert_eq!(to_json_string(root).unwrap(), json, "roundtrip failed for {json}");
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn parse_scalars() {
    let arena = Arena::new();
    assert!(arena.parse("null").unwrap().is_null());
    assert!(arena.parse("true").unwrap().get::<bool>());
    assert_eq!(arena.parse("-12").unwrap().get::<i64>(), -12);
    assert_eq!(arena.parse("0.5").unwrap().get::<f64>(), 0.5);
    assert_eq!(arena.parse(r#""hi""#).unwrap().get::<&str>(), "hi");
}

#[test]
fn parse_preserves_member_order() {
    let arena = Arena::new();
    let root = arena.parse(r#"{"z":1,"a":2,"m":3}"#).unwrap();
    let keys: Vec<&str> = root.get::<JsonObject>().keys().collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn parse_builds_navigable_tree() {
    let arena = Arena::new();
    let root = arena
        .parse(r#"{"sensor":"gps","time":1351824120,"data":[48.756080,2.302038]}"#)
        .unwrap();
    let object = root.get::<JsonObject>();
    assert_eq!(object.get("sensor").get::<&str>(), "gps");
    assert_eq!(object.get("time").get::<i64>(), 1_351_824_120);
    let data = object.get("data").get::<JsonArray>();
    assert_eq!(data.len(), 2);
    assert_eq!(data.get(0).get::<f64>(), 48.75608);
    assert!(object.get("missing").is_null());
}

#[test]
fn parsed_tree_is_mutable_in_place() {
    let arena = Arena::new();
    let root = arena.parse(r#"{"count":1,"tags":["a"]}"#).unwrap();
    let object = root.get::<JsonObject>();
    object.get("count").set(2);
    object.get("tags").get::<JsonArray>().add("b");
    assert_eq!(root.to_string(), r#"{"count":2,"tags":["a","b"]}"#);
}

#[test]
fn invalid_json_is_an_error() {
    let arena = Arena::new();
    let err = arena.parse("{not json").unwrap_err();
    assert!(matches!(err, DocumentError::JsonParse(_)));
    assert!(err.to_string().starts_with("JSON parse error"));
}

// ============================================================================
// Nesting limit
// ============================================================================

#[test]
fn default_nesting_limit() {
    assert_eq!(ParseOptions::default().nesting_limit, DEFAULT_NESTING_LIMIT);
    let arena = Arena::new();
    let ok = "[".repeat(DEFAULT_NESTING_LIMIT) + &"]".repeat(DEFAULT_NESTING_LIMIT);
    assert!(arena.parse(&ok).is_ok());
    let deep = "[".repeat(DEFAULT_NESTING_LIMIT + 1) + &"]".repeat(DEFAULT_NESTING_LIMIT + 1);
    let err = arena.parse(&deep).unwrap_err();
    assert!(matches!(
        err,
        DocumentError::NestingLimitExceeded { limit } if limit == DEFAULT_NESTING_LIMIT
    ));
}

#[test]
fn zero_nesting_limit_accepts_only_scalars() {
    let arena = Arena::new();
    let options = ParseOptions::default().nesting_limit(0);
    assert!(arena.parse_with("42", options).is_ok());
    assert!(arena.parse_with("[]", options).is_err());
    assert!(arena.parse_with("{}", options).is_err());
}

// ============================================================================
// Serializer output
// ============================================================================

#[test]
fn roundtrip_compact_documents() {
    assert_roundtrip("null");
    assert_roundtrip("[]");
    assert_roundtrip("{}");
    assert_roundtrip(r#"[1,-2,0.25,true,false,null,"s"]"#);
    assert_roundtrip(r#"{"a":{"b":{"c":[{}]}}}"#);
    assert_roundtrip(r#"{"esc":"line\nbreak \"quoted\" back\\slash"}"#);
}

#[test]
fn whole_floats_lose_fraction() {
    let arena = Arena::new();
    let v = arena.variant();
    v.set(42.0);
    assert_eq!(to_json_string(v).unwrap(), "42");
    v.set(-0.0);
    assert_eq!(to_json_string(v).unwrap(), "0");
    v.set(f64::INFINITY);
    assert_eq!(to_json_string(v).unwrap(), "null");
    v.set(2.5f32);
    assert_eq!(to_json_string(v).unwrap(), "2.5");
}

#[test]
fn serializer_agrees_with_serde_json_for_floats() {
    let arena = Arena::new();
    let v = arena.variant();
    for value in [42.0, -0.0, 0.1, -7.25, 1e21, 1.5e-300, f64::MAX, f64::NAN] {
        v.set(value);
        assert_eq!(
            to_json_string(v).unwrap(),
            serde_json::to_string(&v).unwrap(),
            "disagreement for {value}"
        );
    }
    v.set(42.0);
    assert_eq!(serde_json::to_string(&v).unwrap(), "42");
    v.set(-0.0);
    assert_eq!(serde_json::to_string(&v).unwrap(), "0");
}

#[test]
fn write_json_appends() {
    let arena = Arena::new();
    let v = arena.variant();
    v.set(1);
    let mut out = String::from("value=");
    write_json(v, &mut out).unwrap();
    assert_eq!(out, "value=1");
}

// ============================================================================
// serde interop
// ============================================================================

#[test]
fn serialize_matches_writer_for_documents() {
    let text = r#"{"id":7,"ok":true,"ratio":0.25,"whole":42.0,"big":1e21,"items":[1,-0.0,{"k":"v"}],"none":null}"#;
    let arena = Arena::new();
    let root = arena.parse(text).unwrap();
    let rendered = to_json_string(root).unwrap();
    assert_eq!(serde_json::to_string(&root).unwrap(), rendered);
    assert!(rendered.starts_with(r#"{"id":7,"ok":true,"ratio":0.25,"whole":42,"big":"#));
    assert!(rendered.ends_with(r#""items":[1,0,{"k":"v"}],"none":null}"#));
}

#[test]
fn serialize_array_handle() {
    let arena = Arena::new();
    let array = arena.array();
    array.add(1);
    array.add("two");
    array.add_array().add(3.5);
    assert_eq!(serde_json::to_string(&array).unwrap(), r#"[1,"two",[3.5]]"#);
    assert_eq!(serde_json::to_value(array).unwrap(), json!([1, "two", [3.5]]));
}

#[test]
fn serialize_object_handle() {
    let arena = Arena::new();
    let object = arena.object();
    object.insert("b", false);
    object.insert("a", ());
    object.insert_object("c").insert("d", 4);
    assert_eq!(
        serde_json::to_string(&object).unwrap(),
        r#"{"b":false,"a":null,"c":{"d":4}}"#
    );
}

#[test]
fn get_serde_value_is_deep_copy() {
    let arena = Arena::new();
    let root = arena.parse(r#"{"a":[1,2.5,"x"],"b":null}"#).unwrap();
    let value = root.get::<Value>();
    assert_eq!(value, json!({"a": [1, 2.5, "x"], "b": null}));

    root.get::<JsonObject>().insert("c", 3);
    assert_eq!(value, json!({"a": [1, 2.5, "x"], "b": null}));
}

#[test]
fn import_copies_serde_value() {
    let source = json!({"list": [true, {"n": -1}], "name": "dev"});
    let arena = Arena::new();
    let root = arena.import(&source);
    assert_eq!(root.get::<Value>(), source);
}

#[test]
fn invalid_handles_serialize_as_null() {
    assert_eq!(serde_json::to_string(&JsonArray::invalid()).unwrap(), "null");
    assert_eq!(serde_json::to_string(&JsonObject::invalid()).unwrap(), "null");
}

// ============================================================================
// Render depth
// ============================================================================

/// Chain `depth` arrays, each the only element of its parent.
fn nest_arrays(root: Variant<'_>, depth: usize) {
    let mut current = root.to_array();
    for _ in 1..depth {
        current = current.add_array();
    }
}

#[test]
fn render_depth_limit_is_inclusive() {
    let arena = Arena::new();
    let root = arena.variant();
    nest_arrays(root, MAX_RENDER_DEPTH);
    let text = to_json_string(root).unwrap();
    assert_eq!(text.len(), 2 * MAX_RENDER_DEPTH);
}

#[test]
fn tree_past_render_depth_fails_cleanly() {
    let arena = Arena::new();
    let root = arena.variant();
    nest_arrays(root, 200_000);

    let err = to_json_string(root).unwrap_err();
    assert!(matches!(err, DocumentError::Serialize(_)));
    assert!(err.to_string().contains("nesting depth"));
    assert!(serde_json::to_string(&root).is_err());
    assert_eq!(root.get::<String>(), "");
    assert_eq!(root.get::<Value>(), Value::Null);

    let mut out = String::from("kept");
    assert!(write_json(root, &mut out).is_err());
    assert_eq!(out, "kept");

    let mut shown = String::new();
    assert!(write!(shown, "{root}").is_err());
}

#[test]
fn self_containing_array_fails_instead_of_looping() {
    let arena = Arena::new();
    let root = arena.variant();
    let array = root.to_array();
    array.add(1);
    array.add(array);
    assert_eq!(array.len(), 2);
    assert!(matches!(
        to_json_string(root),
        Err(DocumentError::Serialize(_))
    ));
}

// ============================================================================
// Arena lifecycle
// ============================================================================

#[test]
fn reset_reclaims_everything() {
    let mut arena = Arena::with_capacity(256);
    {
        let root = arena.parse(r#"{"a":"long enough string to allocate"}"#).unwrap();
        assert!(!root.is_null());
    }
    arena.reset();
    let root = arena.parse("[1]").unwrap();
    assert_eq!(root.get::<JsonArray>().len(), 1);
}
