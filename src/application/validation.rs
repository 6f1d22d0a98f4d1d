//! Common validation utilities for use cases

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationErrors;

static NON_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").expect("valid regex"));
static UNIT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)unit\s*").expect("valid regex"));

/// Return the trimmed value of a required field or `message` when it is
/// missing or blank
pub fn require_field<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| message.to_string())
}

/// Treat blank query parameters as absent
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Spellings under which a year of study may have been stored.
///
/// "2", "2nd Year" and "year 2" all yield `["2", <raw>, "2nd Year"]`; values
/// without digits are matched verbatim.
pub fn year_candidates(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    let digits = NON_DIGITS.replace_all(raw, "");

    let Ok(year) = digits.parse::<u32>() else {
        return vec![raw.to_string()];
    };

    let suffix = match year {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };

    let mut candidates = vec![year.to_string(), raw.to_string(), format!("{year}{suffix} Year")];
    candidates.sort();
    candidates.dedup();
    candidates
}

/// Strip a leading "unit" from a unit filter so "Unit 3" matches "3"
pub fn unit_fragment(raw: &str) -> String {
    UNIT_PREFIX.replace(raw.trim(), "").trim().to_string()
}

/// Clamp a requested page size into `1..=max`, using `default` when absent
pub fn clamp_limit(requested: Option<i64>, default: i64, max: i64) -> i64 {
    requested.unwrap_or(default).clamp(1, max)
}

/// Flatten validator errors into one human-readable message
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field))
            })
        })
        .collect();
    messages.sort();

    if messages.is_empty() {
        "Missing required fields".to_string()
    } else {
        messages.join("; ")
    }
}
