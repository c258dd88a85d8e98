//! Small text helpers shared by the page extractor and the provider adapters.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid float regex")
});

static DOLLAR_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\d+(?:\.\d{2})?)").expect("valid price regex"));

static BOLD_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</?b>").expect("valid tag regex"));

/// Parses the numeric prefix of `text`, ignoring leading whitespace and anything after the
/// number. `"29.99 USD"` gives `29.99`, `"USD 29.99"` gives `None`.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let m = LEADING_FLOAT.find(text.trim_start())?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Drops everything that is not a digit or a dot before parsing, so `"$1,250.00"` gives `1250.0`.
pub fn parse_loose_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    parse_float_prefix(&cleaned)
}

/// First `$NN` or `$NN.NN` amount in free text.
pub fn find_dollar_amount(text: &str) -> Option<f64> {
    let caps = DOLLAR_AMOUNT.captures(text)?;
    caps.get(1)?.as_str().parse::<f64>().ok()
}

pub fn strip_bold_tags(text: &str) -> String {
    BOLD_TAG.replace_all(text, "").into_owned()
}
