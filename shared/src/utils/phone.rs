//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// E.164 format: leading '+', 2-15 digits, no leading zero
static E164_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").unwrap());

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is valid E.164
pub fn is_valid_phone(phone: &str) -> bool {
    E164_REGEX.is_match(&normalize_phone_number(phone))
}

/// Mask a phone number for logging, keeping only the last four digits
pub fn mask_phone(phone: &str) -> String {
    if phone.len() <= 4 {
        return "*".repeat(phone.len());
    }

    let visible = 4;
    let last_digits = &phone[phone.len() - visible..];

    if let Some(rest) = phone.strip_prefix('+') {
        format!("+{}{}", "*".repeat(rest.len() - visible), last_digits)
    } else {
        format!("{}{}", "*".repeat(phone.len() - visible), last_digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_e164() {
        assert!(is_valid_phone("+919876543210"));
        assert!(is_valid_phone("+14155552671"));
        assert!(is_valid_phone("+91 98765 43210")); // normalized before matching
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(!is_valid_phone("9876543210")); // missing '+'
        assert!(!is_valid_phone("+0123456789")); // leading zero
        assert!(!is_valid_phone("+1")); // too short
        assert!(!is_valid_phone("not-a-number"));
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("+919876543210"), "+********3210");
        assert_eq!(mask_phone("1234"), "****");
    }
}
