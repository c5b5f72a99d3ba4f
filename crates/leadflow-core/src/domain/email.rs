use regex::Regex;
use std::sync::OnceLock;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
}

pub fn normalize_email(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_ascii_lowercase())
}

pub fn is_valid_email(value: &str) -> bool {
    email_re().is_match(value.trim())
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, normalize_email};

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  Ada@Example.com ");
        assert_eq!(value.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn valid_email_requires_local_part_domain_and_dot() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email(" grace@navy.mil.us "));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@@example.com"));
        assert!(!is_valid_email(""));
    }
}
