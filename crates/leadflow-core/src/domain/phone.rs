use regex::Regex;
use std::sync::OnceLock;

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[\d\s\-()]{10,}$").expect("phone pattern"))
}

/// Accepts an optional leading `+` followed by at least ten digits,
/// spaces, dashes or parentheses.
pub fn is_valid_phone(value: &str) -> bool {
    phone_re().is_match(value.trim())
}
