use crate::{
    core::{value::Value, value_type::ValueType},
    mapping::error::{BoxError, MappingError},
};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::{fmt, sync::Arc};
use tracing::debug;

type Coerce = Arc<dyn Fn(&str) -> Result<Value, BoxError> + Send + Sync>;

const MAX_DATE_LEN: usize = 10;

/// Coerces the literal text of a comparison into the typed value of one field.
#[derive(Clone)]
pub struct Mapper {
    name: String,
    value_type: ValueType,
    coerce: Coerce,
}

impl Mapper {
    pub fn new<F>(name: impl Into<String>, value_type: ValueType, coerce: F) -> Self
    where
        F: Fn(&str) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            value_type,
            coerce: Arc::new(coerce),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn map(&self, literal: &str) -> Result<Value, MappingError> {
        (self.coerce)(literal).map_err(|err| {
            debug!("Failed to map {} for field {}: {}", literal, self.name, err);
            MappingError::wrap(&self.name, literal, err)
        })
    }

    /// Builds the standard mapper for a declared value type.
    pub fn for_type(name: impl Into<String>, value_type: &ValueType) -> Self {
        let name = name.into();
        match value_type {
            ValueType::Boolean => Self::to_boolean(name),
            ValueType::Int8 => Self::to_byte(name),
            ValueType::Int16 => Self::to_short(name),
            ValueType::Int32 => Self::to_int(name),
            ValueType::Int64 => Self::to_long(name),
            ValueType::Float32 => Self::to_float(name),
            ValueType::Float64 => Self::to_double(name),
            ValueType::Char => Self::to_char(name),
            ValueType::String => Self::to_string(name),
            ValueType::Date => Self::to_date(name),
            ValueType::LocalDate => Self::to_local_date(name),
            ValueType::LocalDateTime => Self::to_local_date_time(name),
            ValueType::Enum { enum_name, symbols } => {
                Self::to_enum(name, enum_name.clone(), symbols.clone())
            }
        }
    }

    /// `"true"` in any case maps to `true`, everything else to `false`.
    pub fn to_boolean(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Boolean, |s| {
            Ok(Value::Boolean(s.eq_ignore_ascii_case("true")))
        })
    }

    pub fn to_byte(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Int8, |s| Ok(Value::Byte(s.parse()?)))
    }

    pub fn to_short(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Int16, |s| Ok(Value::Short(s.parse()?)))
    }

    pub fn to_int(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Int32, |s| Ok(Value::Int(s.parse()?)))
    }

    pub fn to_long(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Int64, |s| Ok(Value::Long(s.parse()?)))
    }

    pub fn to_float(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Float32, |s| Ok(Value::Float(s.parse()?)))
    }

    pub fn to_double(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Float64, |s| Ok(Value::Double(s.parse()?)))
    }

    pub fn to_char(name: impl Into<String>) -> Self {
        let name = name.into();
        let field = name.clone();
        Self::new(name, ValueType::Char, move |s| {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => Err(MappingError::new(&field, s, "expected a single character").into()),
            }
        })
    }

    /// Strips one optional pair of single quotes, then one optional pair of
    /// double quotes. Each side is stripped independently.
    pub fn to_string(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::String, |s| Ok(Value::String(unquote(s).to_string())))
    }

    /// Date with precision picked from the literal: `2021-2-5`,
    /// `2021-2-5T10:15`, `2021-2-5T10:15:16` or `2021-2-5T10:15:16.17`.
    /// The result is an instant in UTC.
    pub fn to_date(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Date, |s| Ok(Value::Timestamp(parse_date(s)?.and_utc())))
    }

    pub fn to_local_date(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::LocalDate, |s| {
            Ok(Value::Date(NaiveDate::parse_from_str(s, "%Y-%m-%d")?))
        })
    }

    pub fn to_local_date_time(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::LocalDateTime, |s| {
            let parsed = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))?;
            Ok(Value::DateTime(parsed))
        })
    }

    /// Matches the literal against the enum symbols exactly.
    pub fn to_enum(
        name: impl Into<String>,
        enum_name: impl Into<String>,
        symbols: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let enum_name = enum_name.into();
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        let value_type = ValueType::Enum {
            enum_name: enum_name.clone(),
            symbols: symbols.clone(),
        };

        Self::new(name, value_type, move |s| {
            if symbols.iter().any(|symbol| symbol == s) {
                Ok(Value::Enum(enum_name.clone(), s.to_string()))
            } else {
                Err(format!("Unable to parse enum: {enum_name}, value: {s}").into())
            }
        })
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .finish()
    }
}

impl fmt::Display for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value_type)
    }
}

impl PartialEq for Mapper {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value_type == other.value_type
    }
}

fn unquote(s: &str) -> &str {
    let s = s.strip_prefix('\'').unwrap_or(s);
    let s = s.strip_suffix('\'').unwrap_or(s);
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

fn parse_date(s: &str) -> Result<NaiveDateTime, BoxError> {
    if s.chars().count() <= MAX_DATE_LEN {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| format!("Invalid date: {s} ({e})"))?;
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }

    let invalid = |e: chrono::ParseError| format!("Invalid date-time: {s} ({e})");

    if s.matches(':').count() == 1 {
        return Ok(NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").map_err(invalid)?);
    }

    match s.split_once('.') {
        None => Ok(NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").map_err(invalid)?),
        Some((seconds, millis)) => {
            let base = NaiveDateTime::parse_from_str(seconds, "%Y-%m-%dT%H:%M:%S").map_err(invalid)?;
            if millis.is_empty() || millis.len() > 3 || !millis.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("Invalid date-time: {s} (bad milliseconds)").into());
            }
            let millis: i64 = millis.parse()?;
            Ok(base + TimeDelta::milliseconds(millis))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_boolean_never_fails() {
        let mapper = Mapper::to_boolean("active");
        assert_eq!(mapper.map("true").unwrap(), Value::Boolean(true));
        assert_eq!(mapper.map("TRUE").unwrap(), Value::Boolean(true));
        assert_eq!(mapper.map("yes").unwrap(), Value::Boolean(false));
        assert_eq!(mapper.map("").unwrap(), Value::Boolean(false));
    }

    #[test]
    fn test_integers_are_strict() {
        assert_eq!(Mapper::to_byte("b").map("-12").unwrap(), Value::Byte(-12));
        assert_eq!(Mapper::to_short("s").map("300").unwrap(), Value::Short(300));
        assert_eq!(Mapper::to_int("i").map("42").unwrap(), Value::Int(42));
        assert_eq!(Mapper::to_long("l").map("9000000000").unwrap(), Value::Long(9_000_000_000));

        assert!(Mapper::to_byte("b").map("300").is_err());
        assert!(Mapper::to_int("i").map(" 42").is_err());
        assert!(Mapper::to_int("i").map("4.2").is_err());
    }

    #[test]
    fn test_floats() {
        assert_eq!(Mapper::to_float("f").map("1.5").unwrap(), Value::Float(1.5));
        assert_eq!(Mapper::to_double("d").map("-0.25").unwrap(), Value::Double(-0.25));
        assert!(Mapper::to_double("d").map("abc").is_err());
    }

    #[test]
    fn test_char_requires_single_character() {
        let mapper = Mapper::to_char("c");
        assert_eq!(mapper.map("x").unwrap(), Value::Char('x'));
        assert_eq!(mapper.map("≈").unwrap(), Value::Char('≈'));

        let err = mapper.map("xy").unwrap_err();
        assert_eq!(err.field, "c");
        assert_eq!(err.literal, "xy");
        assert!(err.source.is_none());
        assert!(mapper.map("").is_err());
    }

    #[test]
    fn test_string_quote_stripping() {
        let mapper = Mapper::to_string("s");
        let cases = vec![
            ("plain", "plain"),
            ("'single'", "single"),
            ("\"double\"", "double"),
            ("'half", "half"),
            ("half'", "half"),
            ("'\"both\"'", "both"),
            ("''", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(
                mapper.map(input).unwrap(),
                Value::String(expected.to_string()),
                "Failed for: {}",
                input
            );
        }
    }

    #[test]
    fn test_date_precision_detection() {
        let mapper = Mapper::to_date("created");
        let cases = vec![
            ("2021-02-05", Utc.with_ymd_and_hms(2021, 2, 5, 0, 0, 0).unwrap()),
            ("2021-2-5", Utc.with_ymd_and_hms(2021, 2, 5, 0, 0, 0).unwrap()),
            ("2021-02-05T10:15", Utc.with_ymd_and_hms(2021, 2, 5, 10, 15, 0).unwrap()),
            ("2021-02-05T10:15:16", Utc.with_ymd_and_hms(2021, 2, 5, 10, 15, 16).unwrap()),
            (
                "2021-02-05T10:15:16.17",
                Utc.with_ymd_and_hms(2021, 2, 5, 10, 15, 16).unwrap() + TimeDelta::milliseconds(17),
            ),
            (
                "2021-02-05T10:15:16.170",
                Utc.with_ymd_and_hms(2021, 2, 5, 10, 15, 16).unwrap() + TimeDelta::milliseconds(170),
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(mapper.map(input).unwrap(), Value::Timestamp(expected), "Failed for: {}", input);
        }
    }

    #[test]
    fn test_date_rejects_garbage() {
        let mapper = Mapper::to_date("created");
        for input in ["yesterday", "2021-13-45", "2021-02-05 10:15", "2021-02-05T10:15:16.1234"] {
            assert!(mapper.map(input).is_err(), "Expected failure for: {}", input);
        }
    }

    #[test]
    fn test_local_date_and_time() {
        assert_eq!(
            Mapper::to_local_date("d").map("2021-02-05").unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2021, 2, 5).unwrap())
        );

        let mapper = Mapper::to_local_date_time("dt");
        let expected = NaiveDate::from_ymd_opt(2021, 2, 5)
            .unwrap()
            .and_hms_milli_opt(10, 15, 16, 170)
            .unwrap();
        assert_eq!(mapper.map("2021-02-05T10:15:16.17").unwrap(), Value::DateTime(expected));

        let minutes = NaiveDate::from_ymd_opt(2021, 2, 5)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap();
        assert_eq!(mapper.map("2021-02-05T10:15").unwrap(), Value::DateTime(minutes));
        assert!(mapper.map("2021-02-05").is_err());
    }

    #[test]
    fn test_enum_is_case_sensitive() {
        let mapper = Mapper::to_enum("status", "Status", ["ACTIVE", "CLOSED"]);
        assert_eq!(
            mapper.map("ACTIVE").unwrap(),
            Value::Enum("Status".to_string(), "ACTIVE".to_string())
        );

        let err = mapper.map("active").unwrap_err();
        assert_eq!(err.field, "status");
        assert!(err.reason.contains("Unable to parse enum: Status"));
    }

    #[test]
    fn test_for_type_dispatch() {
        let mapper = Mapper::for_type("age", &ValueType::Int32);
        assert_eq!(mapper, Mapper::to_int("age"));
        assert_eq!(format!("{mapper}"), "age: int32");
    }
}
