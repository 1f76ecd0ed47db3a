use super::words::{EMAIL_DOMAINS, FIRST_NAMES, LAST_NAMES, LOREM};
use icyform_core::SchemaError;
use rand::{Rng, RngCore, seq::IndexedRandom};
use serde_json::Value as JsonValue;
use time::{Duration, OffsetDateTime, format_description::well_known::Rfc3339};
use ulid::Ulid;
use uuid::Builder;

/// Signature shared by stock and custom generators.
pub type GenerateFn = fn(&mut dyn RngCore, &[JsonValue]) -> Result<JsonValue, SchemaError>;

/// 2024-01-01T00:00:00Z; relative dates are generated before this instant so
/// a seed always yields the same output.
pub const REFERENCE_TIMESTAMP: i64 = 1_704_067_200;

const DEFAULT_NUMBER_MAX: i64 = 99_999;
const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;

pub(super) const STOCK: &[(&str, GenerateFn)] = &[
    ("date.past", date_past),
    ("internet.email", internet_email),
    ("lorem.sentence", lorem_sentence),
    ("lorem.word", lorem_word),
    ("lorem.words", lorem_words),
    ("name.firstName", first_name),
    ("name.lastName", last_name),
    ("random.arrayElement", random_array_element),
    ("random.boolean", random_boolean),
    ("random.number", random_number),
    ("random.ulid", random_ulid),
    ("random.uuid", random_uuid),
];

// ---- sampling ------------------------------------------------------------

/// Index in `0..len`; a zero `len` yields 0.
pub(super) fn below(rng: &mut dyn RngCore, len: usize) -> usize {
    rng.random_range(0..len.max(1))
}

fn between(rng: &mut dyn RngCore, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }

    rng.random_range(min..=max)
}

fn choose<'a>(rng: &mut dyn RngCore, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

// ---- arguments -----------------------------------------------------------

fn count_arg(
    path: &'static str,
    args: &[JsonValue],
    default: u64,
) -> Result<u64, SchemaError> {
    match args.first() {
        None | Some(JsonValue::Null) => Ok(default),
        Some(arg) => arg
            .as_u64()
            .ok_or_else(|| SchemaError::contract(path, format!("expected a count, got {arg}"))),
    }
}

fn int_arg(path: &'static str, arg: Option<&JsonValue>, default: i64) -> Result<i64, SchemaError> {
    match arg {
        None | Some(JsonValue::Null) => Ok(default),
        Some(arg) => arg
            .as_i64()
            .ok_or_else(|| SchemaError::contract(path, format!("expected an integer, got {arg}"))),
    }
}

fn text_arg(args: &[JsonValue], index: usize) -> Option<&str> {
    args.get(index).and_then(JsonValue::as_str)
}

// ---- random --------------------------------------------------------------

fn random_uuid(rng: &mut dyn RngCore, _: &[JsonValue]) -> Result<JsonValue, SchemaError> {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);

    let uuid = Builder::from_random_bytes(bytes).into_uuid();

    Ok(JsonValue::from(uuid.to_string()))
}

fn random_ulid(rng: &mut dyn RngCore, _: &[JsonValue]) -> Result<JsonValue, SchemaError> {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);

    let timestamp_ms = u64::try_from(REFERENCE_TIMESTAMP).unwrap_or_default() * 1_000;
    let ulid = Ulid::from_parts(timestamp_ms, u128::from_be_bytes(bytes));

    Ok(JsonValue::from(ulid.to_string()))
}

/// `[]` draws from `0..=99999`, `[max]` from `0..=max`, `[{min, max}]` from
/// `min..=max`.
fn random_number(rng: &mut dyn RngCore, args: &[JsonValue]) -> Result<JsonValue, SchemaError> {
    const PATH: &str = "random.number";

    let (min, max) = match args.first() {
        None | Some(JsonValue::Null) => (0, DEFAULT_NUMBER_MAX),
        Some(JsonValue::Object(bounds)) => (
            int_arg(PATH, bounds.get("min"), 0)?,
            int_arg(PATH, bounds.get("max"), DEFAULT_NUMBER_MAX)?,
        ),
        Some(max) => (0, int_arg(PATH, Some(max), DEFAULT_NUMBER_MAX)?),
    };

    Ok(JsonValue::from(between(rng, min, max)))
}

fn random_boolean(rng: &mut dyn RngCore, _: &[JsonValue]) -> Result<JsonValue, SchemaError> {
    Ok(JsonValue::Bool(rng.random_bool(0.5)))
}

fn random_array_element(
    rng: &mut dyn RngCore,
    args: &[JsonValue],
) -> Result<JsonValue, SchemaError> {
    let Some(JsonValue::Array(items)) = args.first() else {
        return Err(SchemaError::contract(
            "random.arrayElement",
            "expected an array argument",
        ));
    };

    Ok(items.choose(rng).cloned().unwrap_or(JsonValue::Null))
}

// ---- lorem ---------------------------------------------------------------

fn words(rng: &mut dyn RngCore, count: u64) -> Vec<&'static str> {
    (0..count).map(|_| choose(rng, LOREM)).collect()
}

fn lorem_word(rng: &mut dyn RngCore, _: &[JsonValue]) -> Result<JsonValue, SchemaError> {
    Ok(JsonValue::from(choose(rng, LOREM)))
}

fn lorem_words(rng: &mut dyn RngCore, args: &[JsonValue]) -> Result<JsonValue, SchemaError> {
    let count = count_arg("lorem.words", args, 3)?;

    Ok(JsonValue::from(words(rng, count).join(" ")))
}

fn lorem_sentence(rng: &mut dyn RngCore, args: &[JsonValue]) -> Result<JsonValue, SchemaError> {
    let random_count = rng.random_range(3..=10);
    let count = count_arg("lorem.sentence", args, random_count)?.max(1);
    let text = words(rng, count).join(" ");

    let mut chars = text.chars();
    let sentence = chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect::<String>()
    });

    Ok(JsonValue::from(format!("{sentence}.")))
}

// ---- name / internet -----------------------------------------------------

fn first_name(rng: &mut dyn RngCore, _: &[JsonValue]) -> Result<JsonValue, SchemaError> {
    Ok(JsonValue::from(choose(rng, FIRST_NAMES)))
}

fn last_name(rng: &mut dyn RngCore, _: &[JsonValue]) -> Result<JsonValue, SchemaError> {
    Ok(JsonValue::from(choose(rng, LAST_NAMES)))
}

/// `[first?, last?]` seed the local part; missing names are drawn.
fn internet_email(rng: &mut dyn RngCore, args: &[JsonValue]) -> Result<JsonValue, SchemaError> {
    let first = text_arg(args, 0).map_or_else(|| choose(rng, FIRST_NAMES).to_string(), str::to_string);
    let last = text_arg(args, 1).map_or_else(|| choose(rng, LAST_NAMES).to_string(), str::to_string);
    let suffix = rng.random_range(0..100u32);
    let domain = choose(rng, EMAIL_DOMAINS);

    let local: String = format!("{first}.{last}{suffix}")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect();

    Ok(JsonValue::from(format!("{}@{domain}", local.to_ascii_lowercase())))
}

// ---- date ----------------------------------------------------------------

/// RFC 3339 timestamp within `[years]` (default 1) before the reference
/// instant.
fn date_past(rng: &mut dyn RngCore, args: &[JsonValue]) -> Result<JsonValue, SchemaError> {
    const PATH: &str = "date.past";

    let years = count_arg(PATH, args, 1)?.max(1);
    let span = years.saturating_mul(SECONDS_PER_YEAR);
    let offset = rng.random_range(1..=span);

    let reference = OffsetDateTime::from_unix_timestamp(REFERENCE_TIMESTAMP)
        .map_err(|err| SchemaError::contract(PATH, err.to_string()))?;
    let seconds = i64::try_from(offset).unwrap_or(i64::MAX);
    let past = reference
        .checked_sub(Duration::seconds(seconds))
        .ok_or_else(|| SchemaError::contract(PATH, "date out of range"))?;

    let formatted = past
        .format(&Rfc3339)
        .map_err(|err| SchemaError::contract(PATH, err.to_string()))?;

    Ok(JsonValue::from(formatted))
}
