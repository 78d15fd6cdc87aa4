use once_cell::sync::Lazy;
use regex::Regex;

pub static RELATIVE_TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(\d+)\s*([hd])\s+ago\s*$").expect("Failed to compile relative time regex")
});

/// Hours assumed for a label of "today"
pub const TODAY_HOURS: u64 = 12;
/// Hours assumed for a label of "yesterday"
pub const YESTERDAY_HOURS: u64 = 36;

/// Approximate how many hours ago a relative-time label refers to.
///
/// Returns `None` for anything that is not one of the known shapes; callers
/// treat that as "inside every window".
pub fn parse_hours_ago(label: &str) -> Option<u64> {
    let trimmed = label.trim();

    if trimmed.eq_ignore_ascii_case("today") {
        return Some(TODAY_HOURS);
    }
    if trimmed.eq_ignore_ascii_case("yesterday") {
        return Some(YESTERDAY_HOURS);
    }

    let captures = RELATIVE_TIME_PATTERN.captures(trimmed)?;
    let amount: u64 = captures.get(1)?.as_str().parse().ok()?;

    match captures.get(2)?.as_str().to_ascii_lowercase().as_str() {
        "h" => Some(amount),
        "d" => amount.checked_mul(24),
        _ => None,
    }
}
