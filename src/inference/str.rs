use once_cell::sync::Lazy;
use regex::Regex;

// ------- Date shape policy -------
//
// Exact lexical shapes only; no calendar validation (`2025-13-45` passes).
// Fractional seconds are accepted on the `T` form since framework JSON
// serializers emit microseconds there. Digits are ASCII only.

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap()
});

static DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$").unwrap()
});

static ISO_8601: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]{1,9})?(Z|[+-][0-9]{2}:[0-9]{2})?$").unwrap()
});

pub fn is_date_string(s: &str) -> bool {
    // cheap reject before touching any regex
    if s.len() < 10 || !s.as_bytes()[0].is_ascii_digit() {
        return false;
    }
    DATE.is_match(s) || DATE_TIME.is_match(s) || ISO_8601.is_match(s)
}
