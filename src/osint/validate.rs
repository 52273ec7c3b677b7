//! Input validation
//!
//! Compiled-once regexes for the identifier shapes the lookups accept.
//! Validation never rejects a request; handlers record the verdict in the
//! report and carry on.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[1-9]\d{0,15}$").unwrap();
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref DOMAIN_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{1,61}[a-zA-Z0-9]\.[a-zA-Z]{2,}$").unwrap();
    static ref USERNAME_RE: Regex = Regex::new(r"^[a-zA-Z0-9_]{3,20}$").unwrap();
    static ref IPV4_RE: Regex = Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$"
    )
    .unwrap();
}

/// Strip common formatting characters before phone validation.
pub fn clean_phone(number: &str) -> String {
    number
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

pub fn is_valid_phone(number: &str) -> bool {
    PHONE_RE.is_match(&clean_phone(number))
}

/// Country-code prefix of an E.164-style number, if present.
pub fn phone_country_prefix(number: &str) -> Option<&str> {
    if number.starts_with('+') {
        number.get(1..3)
    } else {
        None
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Split an email into (local part, domain), if it contains an `@`.
pub fn split_email(email: &str) -> Option<(&str, &str)> {
    email.split_once('@')
}

pub fn is_valid_domain(domain: &str) -> bool {
    DOMAIN_RE.is_match(domain)
}

pub fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

pub fn is_valid_ipv4(ip: &str) -> bool {
    IPV4_RE.is_match(ip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("+14155552671"));
        assert!(is_valid_phone("+1 (415) 555-2671"));
        assert!(is_valid_phone("4155552671"));
        assert!(!is_valid_phone("+0123"));
        assert!(!is_valid_phone("not-a-number"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_phone_country_prefix() {
        assert_eq!(phone_country_prefix("+14155552671"), Some("14"));
        assert_eq!(phone_country_prefix("4155552671"), None);
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("no spaces@example.com"));
        assert!(!is_valid_email("plain"));
    }

    #[test]
    fn test_split_email() {
        assert_eq!(split_email("user@example.com"), Some(("user", "example.com")));
        assert_eq!(split_email("nodomain"), None);
    }

    #[test]
    fn test_domain_validation() {
        assert!(is_valid_domain("example.com"));
        assert!(is_valid_domain("sub-domain.co"));
        assert!(!is_valid_domain("-bad.com"));
        assert!(!is_valid_domain("nodot"));
    }

    #[test]
    fn test_username_validation() {
        assert!(is_valid_username("john_doe42"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("way_too_long_username_here"));
        assert!(!is_valid_username("has space"));
    }

    #[test]
    fn test_ipv4_validation() {
        assert!(is_valid_ipv4("8.8.8.8"));
        assert!(is_valid_ipv4("255.255.255.255"));
        assert!(!is_valid_ipv4("256.1.1.1"));
        assert!(!is_valid_ipv4("1.2.3"));
        assert!(!is_valid_ipv4("example.com"));
    }
}
