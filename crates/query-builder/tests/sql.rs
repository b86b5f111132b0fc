//! Queries compiled all the way to SQL text and bind parameters.

use chrono::{TimeZone, Utc};
use compiler::{QueryError, QueryParser};
use model::{Schema, Value};
use query_builder::{Generic, NameMappings, Postgres, SqlPredicateFactory};
use sift_syntax::ParseError;

const SCHEMA: &str = r#"{"fields":[
    {"name":"id","type":"int64"},
    {"name":"name","type":"string"},
    {"name":"createdAt","type":"date"},
    {"name":"active","type":"boolean"},
    {"name":"status","type":"enum","enum_name":"Status","symbols":["OPEN","CLOSED"],"column":"state"}
]}"#;

fn parser() -> QueryParser<SqlPredicateFactory> {
    let schema = Schema::from_json(SCHEMA).unwrap();
    QueryParser::new(SqlPredicateFactory::new(NameMappings::from_schema(&schema)))
        .with_mappers(schema.value_mappers().unwrap())
}

fn sql(query: &str) -> String {
    parser().parse(query).unwrap().render(&Generic).sql
}

#[test]
fn test_templates() {
    let cases = vec![
        ("id = 1", "id = ?"),
        ("id != 1", "NOT id = ?"),
        ("id > 1", "id > ?"),
        ("id >= 1", "id >= ?"),
        ("id < 1", "id < ?"),
        ("id <= 1", "id <= ?"),
        ("name ≈ a*", "name LIKE ?"),
        ("name !≈ a*", "name NOT LIKE ?"),
        ("id ∈ [1, 2, 3]", "id IN (?, ?, ?)"),
        ("id = 1 && name = x", "id = ? AND name = ?"),
        ("id = 1 || name = x", "id = ? OR name = ?"),
        ("(id = 1)", "(id = ?)"),
    ];

    for (query, expected) in cases {
        assert_eq!(sql(query), expected, "Failed for: {}", query);
    }
}

#[test]
fn test_column_names() {
    assert_eq!(sql("createdAt > 2021-01-01"), "created_at > ?");
    assert_eq!(sql("status = OPEN"), "state = ?");
}

#[test]
fn test_params_in_query_order() {
    let fragment = parser()
        .parse("active = true && (name ≈ 'Jo*' || id ∈ [7, 9]) && createdAt < 2021-02-05T10:15")
        .unwrap()
        .render(&Postgres);

    assert_eq!(
        fragment.sql,
        r#""active" = $1 AND ("name" LIKE $2 OR "id" IN ($3, $4)) AND "created_at" < $5"#
    );
    assert_eq!(
        fragment.params,
        vec![
            Value::Boolean(true),
            Value::from("Jo%"),
            Value::Long(7),
            Value::Long(9),
            Value::Timestamp(Utc.with_ymd_and_hms(2021, 2, 5, 10, 15, 0).unwrap()),
        ]
    );
}

#[test]
fn test_enum_params() {
    let fragment = parser().parse("status ∈ [OPEN, CLOSED]").unwrap().render(&Generic);
    assert_eq!(
        fragment.params,
        vec![
            Value::Enum("Status".to_string(), "OPEN".to_string()),
            Value::Enum("Status".to_string(), "CLOSED".to_string()),
        ]
    );
}

#[test]
fn test_unknown_name() {
    let err = parser().parse("id = 1 && height > 3").unwrap_err();
    assert!(matches!(err, QueryError::Parse(ParseError::UnknownField(name)) if name == "height"));
}

#[test]
fn test_like_on_non_string_fails() {
    let err = parser().parse("active ≈ tr*").unwrap_err();
    assert!(matches!(err, QueryError::Mapping(_)));
}

#[test]
fn test_fragment_serializes() {
    let fragment = parser().parse("id = 1").unwrap().render(&Generic);
    let json = serde_json::to_value(&fragment).unwrap();
    assert_eq!(json["sql"], "id = ?");
    assert_eq!(json["params"][0]["Long"], 1);
}
