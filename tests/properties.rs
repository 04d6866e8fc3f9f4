//! Behavioural properties of record validation and serialization, exercised
//! through the public API only.

use chrono::DateTime;
use news_records::{
    Article, CoverageSpectrum, Issue, Keying, MediaSource, Record, Violation,
    schema::collection_validator, serialize, validate,
};
use serde_json::{Map, Value, json};
use test_case::test_case;

fn raw(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn issue() -> Value {
    json!({
        "_id": "i1",
        "title": "Housing reform passes first reading",
        "category": "society",
        "summary": "A contested bill moves forward.",
        "imageUrl": "https://img.example/i1.png",
        "keywords": ["housing", "rent"],
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-02T12:30:00Z",
        "leftSummary": "Tenants gain protections.",
        "centerSummary": "",
        "rightSummary": "Landlords warn of shortages.",
        "biasComparison": "Framing splits along ownership lines.",
        "view": 12,
        "coverageSpectrum": {"left": 5, "center": 3, "right": 2, "total": 10},
        "leftKeywords": ["tenants"],
        "centerKeywords": [],
        "rightKeywords": ["supply"],
    })
}

fn article() -> Value {
    json!({
        "_id": "a1",
        "preview": "Lawmakers voted late on Tuesday.",
        "title": "Housing bill advances",
        "keywords": ["housing"],
        "content": "Full text.",
        "url": "http://x",
        "reporter": "J. Doe",
        "publishedAt": "Tue, 2 Jan 2024",
        "issueId": "i1",
        "category": "politics",
        "imageUrl": "http://x/img.png",
        "sourceId": "m1",
        "embedding": [0.25, -1.5, 3.0],
    })
}

fn media_source() -> Value {
    json!({
        "_id": "m1",
        "name": "Outlet",
        "perspective": "center_left",
        "description": "A daily paper.",
        "websiteUrl": "https://outlet.example",
        "foundedYear": 1901,
        "ownershipInfo": "Family owned",
        "createdAt": "2023-06-01T08:00:00Z",
        "category_list": [{"name": "Politics", "url": "https://outlet.example/politics"}],
    })
}

fn round_trips<R: Record>(input: &Value) {
    let record: R = validate(&raw(input.clone())).unwrap();
    assert_eq!(Value::Object(serialize(&record, Keying::Alias)), *input);
}

#[test]
fn alias_round_trip() {
    round_trips::<Issue>(&issue());
    round_trips::<Article>(&article());
    round_trips::<MediaSource>(&media_source());
}

#[test]
fn either_convention_yields_the_same_record() {
    let aliased = Issue::validate_value(&issue()).unwrap();

    let internal = aliased.to_record(Keying::Internal);
    assert_eq!(Issue::validate(&internal).unwrap(), aliased);

    let mut mixed = raw(issue());
    let created_at = mixed.remove("createdAt").unwrap();
    mixed.insert("created_at".to_string(), created_at);
    let id = mixed.remove("_id").unwrap();
    mixed.insert("id".to_string(), id);
    assert_eq!(Issue::validate(&mixed).unwrap(), aliased);
}

#[test_case("category", "weather"; "issue category")]
#[test_case("category", "Politics"; "vocabulary is case sensitive")]
fn unknown_category_is_one_violation(field: &str, value: &str) {
    let mut input = raw(issue());
    input.insert(field.to_string(), json!(value));

    let report = Issue::validate(&input).unwrap_err();
    assert_eq!(report.len(), 1);
    assert!(matches!(
        report.get(field),
        Some(Violation::EnumMembership { value: v, .. }) if v == value
    ));
}

#[test]
fn unknown_perspective_is_one_violation() {
    let mut input = raw(media_source());
    input.insert("perspective".to_string(), json!("far_left"));

    let report = MediaSource::validate(&input).unwrap_err();
    assert_eq!(report.len(), 1);
    assert!(matches!(
        report.get("perspective"),
        Some(Violation::EnumMembership { .. })
    ));
}

#[test_case("title", 1, true; "shortest title")]
#[test_case("title", 0, false; "empty title")]
#[test_case("title", 200, true; "longest title")]
#[test_case("title", 201, false; "title too long")]
#[test_case("summary", 500, true; "longest summary")]
#[test_case("summary", 501, false; "summary too long")]
#[test_case("leftSummary", 0, true; "empty perspective summary")]
#[test_case("leftSummary", 501, false; "perspective summary too long")]
fn issue_length_bounds(key: &str, len: usize, valid: bool) {
    let mut input = raw(issue());
    input.insert(key.to_string(), json!("é".repeat(len)));
    assert_eq!(Issue::validate(&input).is_ok(), valid);
}

#[test_case(1, true; "shortest keyword")]
#[test_case(50, true; "longest keyword")]
#[test_case(0, false; "empty keyword")]
#[test_case(51, false; "keyword too long")]
fn keyword_length_bounds(len: usize, valid: bool) {
    let mut input = raw(article());
    input.insert("keywords".to_string(), json!(["ok", "k".repeat(len)]));

    let result = Article::validate(&input);
    assert_eq!(result.is_ok(), valid);
    if let Err(report) = result {
        assert!(matches!(
            report.get("keywords.1"),
            Some(Violation::LengthConstraint { .. })
        ));
    }
}

#[test_case(1800, true; "earliest")]
#[test_case(2026, true; "latest")]
#[test_case(1799, false; "too early")]
#[test_case(2027, false; "too late")]
fn founded_year_bounds(year: i64, valid: bool) {
    let mut input = raw(media_source());
    input.insert("foundedYear".to_string(), json!(year));
    assert_eq!(MediaSource::validate(&input).is_ok(), valid);
}

#[test]
fn violations_accumulate() {
    let input = raw(json!({"_id": "m1", "foundedYear": 1799}));

    let report = MediaSource::validate(&input).unwrap_err();
    assert_eq!(report.len(), 3);
    assert_eq!(report.get("name"), Some(&Violation::MissingRequiredField));
    assert_eq!(report.get("perspective"), Some(&Violation::MissingRequiredField));
    assert!(matches!(
        report.get("founded_year"),
        Some(Violation::RangeConstraint { .. })
    ));
}

#[test]
fn issue_missing_title() {
    let input = raw(json!({
        "_id": "i1",
        "summary": "s",
        "createdAt": "2024-01-01T00:00:00Z",
    }));

    let report = Issue::validate(&input).unwrap_err();
    assert_eq!(report.entity(), "Issue");
    assert_eq!(report.len(), 1);
    assert_eq!(report.get("title"), Some(&Violation::MissingRequiredField));
}

#[test]
fn issue_title_too_long() {
    let input = raw(json!({
        "_id": "i1",
        "title": "t".repeat(201),
        "summary": "s",
        "createdAt": "2024-01-01T00:00:00Z",
    }));

    let report = Issue::validate(&input).unwrap_err();
    assert_eq!(
        report.get("title"),
        Some(&Violation::LengthConstraint {
            min: None,
            max: Some(200),
            actual: 201,
        })
    );
}

#[test]
fn media_source_founded_too_early() {
    let input = raw(json!({
        "_id": "m1",
        "name": "Outlet",
        "perspective": "left",
        "foundedYear": 1799,
    }));

    let report = MediaSource::validate(&input).unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(
        report.get("founded_year"),
        Some(&Violation::RangeConstraint {
            min: Some(1800),
            max: None,
            actual: 1799,
        })
    );
}

#[test]
fn inconsistent_coverage_total_is_accepted() {
    let mut input = raw(issue());
    input.insert(
        "coverageSpectrum".to_string(),
        json!({"left": 5, "center": 3, "right": 2, "total": 999}),
    );

    let issue = Issue::validate(&input).unwrap();
    let spectrum = issue.coverage_spectrum().unwrap();
    assert_eq!(*spectrum, CoverageSpectrum::new(5, 3, 2, 999));
    assert!(!spectrum.is_consistent());
}

#[test]
fn minimal_article_omits_optional_fields() {
    let input = raw(json!({"_id": "a1", "title": "T", "content": "C", "url": "http://x"}));

    let article = Article::validate(&input).unwrap();
    let record = article.to_record(Keying::Internal);

    assert_eq!(
        Value::Object(record),
        json!({"id": "a1", "title": "T", "content": "C", "url": "http://x"})
    );
}

#[test]
fn report_serializes_for_callers() {
    let input = raw(json!({"_id": "i1", "summary": "s", "createdAt": 0}));

    let report = Issue::validate(&input).unwrap_err();
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({
            "entity": "Issue",
            "violations": [{"path": "title", "kind": "missing_required_field"}],
        })
    );
}

#[test_case(json!(9_223_372_036_854_775_808_u64); "just above i64")]
#[test_case(json!(u64::MAX); "largest u64")]
fn view_accepts_any_non_negative_integer(view: Value) {
    let mut input = raw(issue());
    input.insert("view".to_string(), view.clone());

    let issue = Issue::validate(&input).unwrap();
    assert_eq!(issue.view(), view.as_u64());
    assert_eq!(issue.to_record(Keying::Alias)["view"], view);
}

/// Checks a serialized value against one property of an exported validator.
fn assert_conforms(path: &str, value: &Value, property: &Value) {
    if let Some(allowed) = property.get("enum").and_then(Value::as_array) {
        assert!(allowed.contains(value), "{path}: {value} not in enum");
        return;
    }

    let chars = |s: &str| u64::try_from(s.chars().count()).unwrap();
    match property["bsonType"].as_str() {
        Some("string") => {
            let s = value.as_str().unwrap_or_else(|| panic!("{path}: expected string"));
            if let Some(min) = property.get("minLength").and_then(Value::as_u64) {
                assert!(chars(s) >= min, "{path}: shorter than {min}");
            }
            if let Some(max) = property.get("maxLength").and_then(Value::as_u64) {
                assert!(chars(s) <= max, "{path}: longer than {max}");
            }
            if property.get("pattern").is_some() {
                assert!(s.ends_with('Z'), "{path}: {s} is not in UTC");
                assert!(DateTime::parse_from_rfc3339(s).is_ok(), "{path}: {s} is not RFC 3339");
            }
        }
        Some("int") => {
            assert!(value.is_i64() || value.is_u64(), "{path}: expected integer");
            if let Some(min) = property.get("minimum").and_then(Value::as_i64) {
                assert!(value.as_i64().is_none_or(|i| i >= min), "{path}: below {min}");
            }
            if let Some(max) = property.get("maximum").and_then(Value::as_i64) {
                assert!(value.as_i64().is_some_and(|i| i <= max), "{path}: above {max}");
            }
        }
        Some("double") => assert!(value.is_f64(), "{path}: expected double"),
        Some("array") => {
            let items = value.as_array().unwrap_or_else(|| panic!("{path}: expected array"));
            for (index, item) in items.iter().enumerate() {
                assert_conforms(&format!("{path}.{index}"), item, &property["items"]);
            }
        }
        Some("object") => {
            let map = value.as_object().unwrap_or_else(|| panic!("{path}: expected object"));
            let properties = property["properties"].as_object().unwrap();
            for key in property["required"].as_array().into_iter().flatten() {
                let key = key.as_str().unwrap();
                assert!(map.contains_key(key), "{path}: missing required {key}");
            }
            for (key, item) in map {
                let nested = properties
                    .get(key)
                    .unwrap_or_else(|| panic!("{path}: undeclared key {key}"));
                assert_conforms(&format!("{path}.{key}"), item, nested);
            }
        }
        other => panic!("{path}: unexpected bsonType {other:?}"),
    }
}

fn conforms_to_collection_validator<R: Record>(input: &Value) {
    let record = R::validate_value(input).unwrap();
    let validator = collection_validator(R::schema());
    let serialized = Value::Object(record.to_record(Keying::Alias));

    assert_conforms(R::schema().entity, &serialized, &validator["$jsonSchema"]);
}

#[test]
fn serialized_records_satisfy_their_collection_validator() {
    conforms_to_collection_validator::<Issue>(&issue());
    conforms_to_collection_validator::<Article>(&article());
    conforms_to_collection_validator::<MediaSource>(&media_source());

    let mut offset = raw(issue());
    offset.insert("createdAt".to_string(), json!("2024-01-01T09:00:00.5+09:00"));
    conforms_to_collection_validator::<Issue>(&Value::Object(offset));
}

#[test]
fn timestamps_are_emitted_in_utc() {
    let mut input = raw(issue());
    input.insert("createdAt".to_string(), json!("2024-01-01T09:00:00+09:00"));

    let record = Issue::validate(&input).unwrap().to_record(Keying::Alias);
    assert_eq!(record["createdAt"], json!("2024-01-01T00:00:00Z"));
}
