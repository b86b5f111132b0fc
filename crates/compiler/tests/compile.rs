//! Compilation through a factory that renders predicates as text.

use compiler::{PredicateFactory, QueryError, QueryParser, QueryResult};
use model::{Mapper, Value, ValueMappers};
use sift_syntax::{ParseError, parse};

/// Accepts a fixed set of fields and renders everything else as an error.
struct Render {
    fields: Vec<&'static str>,
}

impl Render {
    fn comparison(&self, field: &str, op: &str, value: &Value) -> QueryResult<String> {
        if !self.fields.contains(&field) {
            return Err(QueryError::unknown_field(field));
        }
        Ok(format!("{field} {op} {value}"))
    }
}

impl PredicateFactory for Render {
    type Predicate = String;

    fn equal(&self, field: &str, value: Value) -> QueryResult<String> {
        self.comparison(field, "=", &value)
    }

    fn not_equal(&self, field: &str, value: Value) -> QueryResult<String> {
        self.comparison(field, "<>", &value)
    }

    fn greater_than(&self, field: &str, value: Value) -> QueryResult<String> {
        self.comparison(field, ">", &value)
    }

    fn greater_than_or_equal(&self, field: &str, value: Value) -> QueryResult<String> {
        self.comparison(field, ">=", &value)
    }

    fn less_than(&self, field: &str, value: Value) -> QueryResult<String> {
        self.comparison(field, "<", &value)
    }

    fn less_than_or_equal(&self, field: &str, value: Value) -> QueryResult<String> {
        self.comparison(field, "<=", &value)
    }

    fn like(&self, field: &str, value: Value) -> QueryResult<String> {
        if value.as_str().is_none() {
            return Err(QueryError::type_mismatch(field, &value, "string"));
        }
        self.comparison(field, "LIKE", &value)
    }

    fn not_like(&self, field: &str, value: Value) -> QueryResult<String> {
        if value.as_str().is_none() {
            return Err(QueryError::type_mismatch(field, &value, "string"));
        }
        self.comparison(field, "NOT LIKE", &value)
    }

    fn is_in(&self, field: &str, values: Vec<Value>) -> QueryResult<String> {
        let values: Vec<String> = values.iter().map(Value::to_string).collect();
        self.comparison(field, "IN", &Value::String(format!("({})", values.join(", "))))
    }

    fn and(&self, left: String, right: String) -> String {
        format!("{left} AND {right}")
    }

    fn or(&self, left: String, right: String) -> String {
        format!("{left} OR {right}")
    }

    fn parenthesis(&self, inner: String) -> String {
        format!("({inner})")
    }
}

fn parser() -> QueryParser<Render> {
    let mappers = ValueMappers::new(vec![
        Mapper::to_int("age"),
        Mapper::to_string("name"),
        Mapper::to_date("created"),
        Mapper::to_boolean("active"),
    ])
    .unwrap();

    QueryParser::new(Render {
        fields: vec!["age", "name", "created", "active"],
    })
    .with_mappers(mappers)
}

#[test]
fn test_compile_every_operator() {
    let cases = vec![
        ("age = 1", "age = 1"),
        ("age != 1", "age <> 1"),
        ("age > 1", "age > 1"),
        ("age >= 1", "age >= 1"),
        ("age < 1", "age < 1"),
        ("age <= 1", "age <= 1"),
        ("name ≈ 'A*'", "name LIKE A*"),
        ("name !≈ '*B'", "name NOT LIKE *B"),
        ("age ∈ [1, 2]", "age IN (1, 2)"),
    ];

    for (query, expected) in cases {
        assert_eq!(parser().parse(query).unwrap(), expected, "Failed for: {}", query);
    }
}

#[test]
fn test_compile_keeps_structure() {
    assert_eq!(
        parser()
            .parse("age > 18 && (name = Bob || active = TRUE) || age < 3")
            .unwrap(),
        "age > 18 AND (name = Bob OR active = true) OR age < 3"
    );
}

#[test]
fn test_compile_dates() {
    assert_eq!(
        parser().parse("created >= 2021-02-05T10:15").unwrap(),
        "created >= 2021-02-05T10:15:00.000Z"
    );
}

#[test]
fn test_compile_same_ast_twice() {
    let parser = parser();
    let node = parse("age = 1 && (name ≈ x* || age ∈ [4, 5])").unwrap();
    assert_eq!(parser.compile(&node).unwrap(), parser.compile(&node).unwrap());
}

#[test]
fn test_parse_errors_propagate() {
    for query in ["", "(", "()", "&& age = 1", "age = 1 &&", "age ~ 1"] {
        let err = parser().parse(query).unwrap_err();
        assert!(matches!(err, QueryError::Parse(_)), "Unexpected error for {}: {:?}", query, err);
    }
}

#[test]
fn test_mapping_errors_propagate() {
    let err = parser().parse("name = x && age = old").unwrap_err();
    match err {
        QueryError::Mapping(e) => {
            assert_eq!(e.field, "age");
            assert_eq!(e.literal, "old");
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[test]
fn test_factory_errors_propagate() {
    let err = parser().parse("age = 1 || missing = 2").unwrap_err();
    assert!(matches!(err, QueryError::Parse(ParseError::UnknownField(name)) if name == "missing"));

    let err = parser().parse("age ≈ 1*").unwrap_err();
    assert!(matches!(err, QueryError::Mapping(_)));
}

#[test]
fn test_max_depth_applies() {
    let parser = parser().with_max_depth(1);
    assert!(parser.parse("(age = 1)").is_ok());
    assert!(matches!(
        parser.parse("((age = 1))"),
        Err(QueryError::Parse(ParseError::NestingTooDeep { .. }))
    ));
}
