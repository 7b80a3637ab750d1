//! # Primitive Validators
//!
//! Total predicates over a single raw JSON value. Each takes an
//! `Option<&Value>` where `None` stands for an absent field; every
//! predicate answers `false` for `None`.
//!
//! Numeric fields arrive either as JSON numbers or as base-10 numerals in
//! strings (`"4"`, `"3.18"`). The `parse_*` companions perform the same
//! check and return the decoded value, so the schema validators can decode
//! and diagnose in a single pass.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use cardset_core::Rarity;

/// Keys of a cards delta, in wire order.
pub const DELTA_BUCKETS: [&str; 3] = ["added", "deleted", "updated"];

/// Formats accepted for date strings without an offset (read as UTC).
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn is_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(_)))
}

/// True for JSON arrays only; objects and `null` are not arrays.
pub fn is_array(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Array(_)))
}

pub fn is_integer(value: Option<&Value>) -> bool {
    parse_integer(value).is_some()
}

pub fn is_float(value: Option<&Value>) -> bool {
    parse_float(value).is_some()
}

pub fn is_rarity_class(value: Option<&Value>) -> bool {
    parse_rarity(value).is_some()
}

pub fn is_date(value: Option<&Value>) -> bool {
    parse_date(value).is_some()
}

/// True for JSON booleans only. The string `"false"` is not a boolean.
pub fn is_boolean(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(_)))
}

/// True iff `value` is an object with exactly the keys `added`, `deleted`
/// and `updated`, each holding an array.
pub fn is_modified_cards_shape(value: Option<&Value>) -> bool {
    let Some(Value::Object(map)) = value else {
        return false;
    };
    map.len() == DELTA_BUCKETS.len()
        && DELTA_BUCKETS
            .iter()
            .all(|bucket| is_array(map.get(*bucket)))
}

/// Decode an integer from a JSON number without a fractional part or from
/// a string holding an optionally signed run of decimal digits.
///
/// `"3.45"`, `"2 things"` and `" 4"` are rejected.
pub fn parse_integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
            (f.fract() == 0.0 && in_range).then_some(f as i64)
        }),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Decode a float from a JSON number or from a string holding a decimal
/// numeral with an optional fractional part.
///
/// Exponents, `inf`, `NaN` and trailing text are rejected.
pub fn parse_float(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if is_decimal_numeral(s) => s.parse().ok(),
        _ => None,
    }
}

pub fn parse_rarity(value: Option<&Value>) -> Option<Rarity> {
    value?.as_str().and_then(Rarity::parse)
}

/// Decode a calendar date/time from an RFC 3339 string, an offset-less
/// ISO 8601 date-time (taken as UTC), or a bare `YYYY-MM-DD` date
/// (midnight UTC).
pub fn parse_date(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let s = value?.as_str()?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `[+-]digits[.digits]`, with at least one digit overall.
fn is_decimal_numeral(s: &str) -> bool {
    let unsigned = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && all_digits(fraction) && !(whole.is_empty() && fraction.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(f: fn(Option<&Value>) -> bool, v: Value) -> bool {
        f(Some(&v))
    }

    #[test]
    fn every_predicate_rejects_undefined() {
        let predicates: [fn(Option<&Value>) -> bool; 8] = [
            is_string,
            is_array,
            is_integer,
            is_float,
            is_rarity_class,
            is_date,
            is_boolean,
            is_modified_cards_shape,
        ];
        for predicate in predicates {
            assert!(!predicate(None));
        }
    }

    #[test]
    fn string_predicate() {
        assert!(check(is_string, json!("this is a string")));
        assert!(!check(is_string, json!({ "string": "this is not" })));
        assert!(!check(is_string, json!(3)));
    }

    #[test]
    fn array_predicate() {
        assert!(check(is_array, json!([1, 2, 3])));
        assert!(check(is_array, json!([])));
        assert!(!check(is_array, json!({ "data": "this is a string" })));
        assert!(!check(is_array, Value::Null));
    }

    #[test]
    fn integer_predicate() {
        assert!(check(is_integer, json!("4")));
        assert!(check(is_integer, json!(4)));
        assert!(check(is_integer, json!("-12")));
        assert!(!check(is_integer, json!("3.45")));
        assert!(!check(is_integer, json!(3.45)));
        assert!(!check(is_integer, json!("2 things")));
        assert!(!check(is_integer, json!("this is a string")));
        assert!(!check(is_integer, json!(true)));
    }

    #[test]
    fn integer_accepts_whole_json_float() {
        assert_eq!(parse_integer(Some(&json!(4.0))), Some(4));
    }

    #[test]
    fn float_predicate() {
        assert!(check(is_float, json!("3.18")));
        assert!(check(is_float, json!("3")));
        assert!(check(is_float, json!(3.18)));
        assert!(check(is_float, json!(".5")));
        assert!(!check(is_float, json!("this is not a number")));
        assert!(!check(is_float, json!("2 things")));
        assert!(!check(is_float, json!("1e5")));
        assert!(!check(is_float, json!("NaN")));
        assert!(!check(is_float, json!("inf")));
        assert!(!check(is_float, json!(".")));
        assert!(!check(is_float, json!("")));
    }

    #[test]
    fn float_decodes_numeral() {
        assert_eq!(parse_float(Some(&json!("3.18"))), Some(3.18));
        assert_eq!(parse_float(Some(&json!("-2"))), Some(-2.0));
    }

    #[test]
    fn rarity_predicate() {
        for class in ["common", "uncommon", "rare", "mythic rare"] {
            assert!(check(is_rarity_class, json!(class)), "{class}");
        }
        assert!(!check(is_rarity_class, json!("very uncommon")));
        assert!(!check(is_rarity_class, json!("Rare")));
        assert!(!check(is_rarity_class, json!(2)));
    }

    #[test]
    fn date_predicate() {
        assert!(check(is_date, json!("2021-12-24T10:20:12.002Z")));
        assert!(check(is_date, json!("2022-12-20T19:37:15.023+02:00")));
        assert!(check(is_date, json!("2022-12-20T19:37:15")));
        assert!(check(is_date, json!("2022-12-20")));
        assert!(!check(is_date, json!("2022-13-40")));
        assert!(!check(is_date, json!("yesterday")));
        assert!(!check(is_date, json!(20221220)));
    }

    #[test]
    fn boolean_predicate() {
        assert!(check(is_boolean, json!(false)));
        assert!(check(is_boolean, json!(true)));
        assert!(!check(is_boolean, json!("false")));
        assert!(!check(is_boolean, json!(0)));
    }

    #[test]
    fn modified_cards_shape_predicate() {
        assert!(check(
            is_modified_cards_shape,
            json!({ "added": [], "deleted": [], "updated": [] })
        ));
        assert!(!check(
            is_modified_cards_shape,
            json!({ "added": [], "updated": [] })
        ));
        assert!(!check(
            is_modified_cards_shape,
            json!({ "added": [], "deleted": [], "updated": [], "moved": [] })
        ));
        assert!(!check(
            is_modified_cards_shape,
            json!({ "added": [], "deleted": "none", "updated": [] })
        ));
        assert!(!check(
            is_modified_cards_shape,
            json!([{ "added": "this is invalid" }, { "deleted": "this is invalid" }])
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every integer numeral is also a float numeral.
        #[test]
        fn integer_numerals_are_floats(n in any::<i64>()) {
            let v = Value::String(n.to_string());
            prop_assert!(is_integer(Some(&v)));
            prop_assert!(is_float(Some(&v)));
            prop_assert_eq!(parse_integer(Some(&v)), Some(n));
        }

        /// Decimal numerals with a fractional part are floats but never integers.
        #[test]
        fn fractional_numerals_are_not_integers(whole in 0u32..100_000, frac in "[0-9]{1,6}") {
            let v = Value::String(format!("{whole}.{frac}"));
            prop_assert!(is_float(Some(&v)));
            prop_assert!(!is_integer(Some(&v)));
        }

        /// Trailing text after a numeral disqualifies it.
        #[test]
        fn trailing_text_is_rejected(n in any::<i32>(), tail in " ?[a-zA-Z]{1,8}") {
            let v = Value::String(format!("{n}{tail}"));
            prop_assert!(!is_integer(Some(&v)));
            prop_assert!(!is_float(Some(&v)));
        }

        /// Only the four exact rarity strings are rarity classes.
        #[test]
        fn arbitrary_words_are_not_rarities(word in "[a-z ]{0,12}") {
            let expected = matches!(word.as_str(), "common" | "uncommon" | "rare" | "mythic rare");
            prop_assert_eq!(is_rarity_class(Some(&Value::String(word))), expected);
        }
    }
}
