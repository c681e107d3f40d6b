//! Parsing helpers for free-form numeric answers
//!
//! Amounts often arrive as text ("月額500円程度", "1,000円〜2,000円"). These
//! helpers pull numbers out of such answers and bucket numeric values into
//! labelled bands. Full-width digits are accepted wherever ASCII digits are.

use regex::Regex;
use std::sync::LazyLock;

static YEN_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9,０-９，]+)\s*円").expect("yen amount pattern"));

static YEN_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9,０-９，]+)\s*円?\s*[〜～\-−]\s*([0-9,０-９，]+)\s*円")
        .expect("yen range pattern")
});

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9,]+").expect("digit run pattern"));

/// Replace full-width digits with ASCII ones, and the full-width comma too
/// when `comma` is set
fn to_ascii_digits(text: &str, comma: bool) -> String {
    text.chars()
        .map(|c| match c {
            '０'..='９' => char::from_digit(c as u32 - '０' as u32, 10).unwrap_or(c),
            '，' if comma => ',',
            c => c,
        })
        .collect()
}

/// Parse a run of digits and thousands separators
fn parse_amount(digits: &str) -> Option<u64> {
    to_ascii_digits(digits, true).replace(',', "").parse().ok()
}

/// The first yen amount in `text`.
///
/// Only the first number followed by 円 is considered; `None` when there is
/// none or it does not parse.
///
/// ```
/// use survey_core::parsers::parse_first_yen_amount;
///
/// assert_eq!(parse_first_yen_amount("月額500円程度"), Some(500));
/// assert_eq!(parse_first_yen_amount("1,000円〜2,000円"), Some(1000));
/// assert_eq!(parse_first_yen_amount("無料"), None);
/// ```
pub fn parse_first_yen_amount(text: &str) -> Option<u64> {
    let captures = YEN_AMOUNT.captures(text)?;
    parse_amount(&captures[1])
}

/// Midpoint of a yen range such as "500円〜1,000円", falling back to the
/// first single amount ("1000円以上" gives 1000).
pub fn parse_range_to_midpoint(text: &str) -> Option<f64> {
    if let Some(captures) = YEN_RANGE.captures(text) {
        let low = parse_amount(&captures[1]);
        let high = parse_amount(&captures[2]);
        if let (Some(low), Some(high)) = (low, high) {
            return Some((low as f64 + high as f64) / 2.0);
        }
    }
    parse_first_yen_amount(text).map(|amount| amount as f64)
}

/// Every number in `text`, in order of appearance. Commas inside a number
/// are thousands separators.
pub fn extract_numbers(text: &str) -> Vec<u64> {
    let text = to_ascii_digits(text, false);
    DIGIT_RUN
        .find_iter(&text)
        .filter_map(|m| m.as_str().replace(',', "").parse().ok())
        .collect()
}

/// Label of the first band whose upper bound is at least `value`.
///
/// `thresholds` are `(upper bound, label)` pairs in ascending order. A
/// missing or NaN value, or one above every bound, gets `default`.
///
/// ```
/// use survey_core::parsers::categorize_by_threshold;
///
/// let bands = [(500.0, "low"), (1000.0, "mid"), (f64::INFINITY, "high")];
/// assert_eq!(categorize_by_threshold(Some(300.0), &bands, "other"), "low");
/// assert_eq!(categorize_by_threshold(Some(800.0), &bands, "other"), "mid");
/// assert_eq!(categorize_by_threshold(None, &bands, "other"), "other");
/// ```
pub fn categorize_by_threshold<'a>(
    value: Option<f64>,
    thresholds: &[(f64, &'a str)],
    default: &'a str,
) -> &'a str {
    let Some(value) = value else {
        return default;
    };
    thresholds
        .iter()
        .find(|(upper, _)| value <= *upper)
        .map_or(default, |&(_, label)| label)
}
