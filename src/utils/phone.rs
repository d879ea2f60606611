// utils/phone.rs
use regex::Regex;
use std::sync::OnceLock;

/// WhatsApp wants bare digits in the recipient field.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Lenient international-number check: optional +, common separators,
/// 7 to 15 digits total.
pub fn is_valid_phone(phone: &str) -> bool {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    let re = PHONE_RE.get_or_init(|| Regex::new(r"^\+?[0-9][0-9 ().\-]{4,18}[0-9]$").unwrap());

    if !re.is_match(phone) {
        return false;
    }

    let digits = normalize_phone(phone);
    (7..=15).contains(&digits.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+1 234-567-8900"), "12345678900");
        assert_eq!(normalize_phone("(92) 300 1234567"), "923001234567");
        assert_eq!(normalize_phone("12345678900"), "12345678900");
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("+1 234-567-8900"));
        assert!(is_valid_phone("+923001234567"));
        assert!(is_valid_phone("0300 1234567"));

        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("not a number"));
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("+123456789012345678901"));
    }
}
