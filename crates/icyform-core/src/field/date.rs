use crate::{SchemaError, value::Value};
use serde_json::Value as JsonValue;
use std::{
    fmt,
    sync::{LazyLock, OnceLock},
};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{self, OwnedFormatItem, well_known::Rfc3339},
};

///
/// CONSTANTS
///

/// Default format of date fields.
pub const DEFAULT_DATE_FORMAT: &str = "[year]-[month]-[day]";

/// Default format of datetime fields.
pub const DEFAULT_DATETIME_FORMAT: &str = "[year]-[month]-[day] [hour]:[minute]";

// seconds and subseconds are optional, covering `datetime-local` input
const ISO_DATETIME_FORMAT: &str =
    "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]";
const SPACED_DATETIME_FORMAT: &str =
    "[year]-[month]-[day] [hour]:[minute][optional [:[second][optional [.[subsecond]]]]]";

static ISO_DATETIMES: LazyLock<Vec<OwnedFormatItem>> = LazyLock::new(|| {
    [ISO_DATETIME_FORMAT, SPACED_DATETIME_FORMAT]
        .into_iter()
        .filter_map(|format| format_description::parse_owned::<2>(format).ok())
        .collect()
});

static ISO_DATE: LazyLock<Option<OwnedFormatItem>> =
    LazyLock::new(|| format_description::parse_owned::<2>(DEFAULT_DATE_FORMAT).ok());

///
/// DateFormat
///
/// Format description of a date field, compiled on first use.
///
/// Raw text is parsed with the field's own format first, then as RFC 3339,
/// then as a bare ISO date or datetime. Numbers are read as unix
/// milliseconds. When `allow_time` is off the time of day is dropped.
///

#[derive(Clone)]
pub struct DateFormat {
    pattern: String,
    allow_time: bool,
    compiled: OnceLock<Option<OwnedFormatItem>>,
}

impl DateFormat {
    pub fn new(pattern: impl Into<String>, allow_time: bool) -> Self {
        Self {
            pattern: pattern.into(),
            allow_time,
            compiled: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn date() -> Self {
        Self::new(DEFAULT_DATE_FORMAT, false)
    }

    #[must_use]
    pub fn datetime() -> Self {
        Self::new(DEFAULT_DATETIME_FORMAT, true)
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub const fn allow_time(&self) -> bool {
        self.allow_time
    }

    #[must_use]
    pub fn with_pattern(self, pattern: impl Into<String>) -> Self {
        Self::new(pattern, self.allow_time)
    }

    #[must_use]
    pub fn with_allow_time(self, allow_time: bool) -> Self {
        Self::new(self.pattern, allow_time)
    }

    fn compiled(&self) -> Option<&OwnedFormatItem> {
        self.compiled
            .get_or_init(|| format_description::parse_owned::<2>(&self.pattern).ok())
            .as_ref()
    }

    /// Reject a pattern that does not compile.
    pub(crate) fn check(&self) -> Result<(), SchemaError> {
        match self.compiled() {
            Some(_) => Ok(()),
            None => Err(SchemaError::contract(
                "field.date_format",
                format!("invalid date format '{}'", self.pattern),
            )),
        }
    }

    /// Raw data to a date value. Empty text is kept as empty text; anything
    /// else that does not read as a date becomes `Null`.
    #[must_use]
    pub fn parse(&self, raw: &JsonValue) -> Value {
        let parsed = match raw {
            JsonValue::String(s) if s.is_empty() => return Value::Text(String::new()),
            JsonValue::String(s) => self.parse_text(s),
            JsonValue::Number(n) => n.as_i64().and_then(from_unix_millis),
            _ => None,
        };

        parsed.map_or(Value::Null, |dt| {
            if self.allow_time {
                Value::Date(dt)
            } else {
                Value::Date(dt.date().midnight())
            }
        })
    }

    fn parse_text(&self, s: &str) -> Option<PrimitiveDateTime> {
        if let Some(format) = self.compiled() {
            if let Ok(dt) = PrimitiveDateTime::parse(s, format) {
                return Some(dt);
            }
            if let Ok(date) = Date::parse(s, format) {
                return Some(date.midnight());
            }
        }

        if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
            let utc = dt.to_offset(UtcOffset::UTC);
            return Some(PrimitiveDateTime::new(utc.date(), utc.time()));
        }

        if let Some(dt) = ISO_DATETIMES
            .iter()
            .find_map(|format| PrimitiveDateTime::parse(s, format).ok())
        {
            return Some(dt);
        }

        let iso_date = ISO_DATE.as_ref()?;
        Date::parse(s, iso_date).ok().map(Date::midnight)
    }

    /// Render a date value with this format. Text passes through; `Null`
    /// has no rendering.
    #[must_use]
    pub fn format(&self, value: &Value) -> Option<String> {
        match value {
            Value::Date(dt) => Some(
                self.compiled()
                    .and_then(|format| dt.format(format).ok())
                    .unwrap_or_else(|| value.to_string()),
            ),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

fn from_unix_millis(millis: i64) -> Option<PrimitiveDateTime> {
    let dt = OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()?;

    Some(PrimitiveDateTime::new(dt.date(), dt.time()))
}

impl fmt::Debug for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateFormat")
            .field("pattern", &self.pattern)
            .field("allow_time", &self.allow_time)
            .finish()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn parses_with_field_format() {
        let format = DateFormat::new("[day]/[month]/[year]", false);

        assert_eq!(
            format.parse(&json!("05/03/2024")),
            Value::Date(datetime!(2024-03-05 0:00))
        );
    }

    #[test]
    fn falls_back_to_iso_and_rfc3339() {
        let format = DateFormat::datetime();

        assert_eq!(
            format.parse(&json!("2024-03-05T10:30:00")),
            Value::Date(datetime!(2024-03-05 10:30))
        );
        assert_eq!(
            format.parse(&json!("2024-03-05T10:30:00+02:00")),
            Value::Date(datetime!(2024-03-05 8:30))
        );
    }

    #[test]
    fn iso_seconds_and_subseconds_are_optional() {
        let format = DateFormat::datetime();

        assert_eq!(
            format.parse(&json!("2024-03-05T10:30")),
            Value::Date(datetime!(2024-03-05 10:30))
        );
        assert_eq!(
            format.parse(&json!("2024-03-05T10:30:00.123")),
            Value::Date(datetime!(2024-03-05 10:30:00.123))
        );
        assert_eq!(
            format.parse(&json!("2024-03-05 10:30:15")),
            Value::Date(datetime!(2024-03-05 10:30:15))
        );
        assert_eq!(
            DateFormat::date().parse(&json!("2024-03-05T10:30")),
            Value::Date(datetime!(2024-03-05 0:00))
        );
    }

    #[test]
    fn date_fields_drop_time_of_day() {
        let format = DateFormat::date();

        assert_eq!(
            format.parse(&json!("2024-03-05T10:30:00")),
            Value::Date(datetime!(2024-03-05 0:00))
        );
    }

    #[test]
    fn numbers_are_unix_millis() {
        let format = DateFormat::datetime();

        assert_eq!(
            format.parse(&json!(86_400_000)),
            Value::Date(datetime!(1970-01-02 0:00))
        );
    }

    #[test]
    fn unreadable_input() {
        let format = DateFormat::date();

        assert_eq!(format.parse(&json!(null)), Value::Null);
        assert_eq!(format.parse(&json!("not a date")), Value::Null);
        assert_eq!(format.parse(&json!("")), Value::from(""));
    }

    #[test]
    fn formats_back_with_field_format() {
        let format = DateFormat::datetime();
        let value = format.parse(&json!("2024-03-05 10:30"));

        assert_eq!(format.format(&value).as_deref(), Some("2024-03-05 10:30"));
        assert_eq!(format.format(&Value::Null), None);
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(DateFormat::new("[nonsense]", false).check().is_err());
        assert!(DateFormat::date().check().is_ok());
    }
}
