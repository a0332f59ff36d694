//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number regex (E.164 format)
static E164_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{1,14}$").unwrap()
});

/// Normalize a phone number by removing common formatting characters
///
/// Spaces, dashes, dots and parentheses are dropped; digits and a leading
/// `+` are kept. Input containing anything else, or no digit at all, is
/// only trimmed, so distinct identifiers never collapse onto one key. The
/// result is the key under which verification records are stored.
pub fn normalize_phone_number(phone: &str) -> String {
    let trimmed = phone.trim();
    let is_formatted_number = trimmed.chars().any(|c| c.is_ascii_digit())
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '.' | '(' | ')'));

    if is_formatted_number {
        trimmed
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect()
    } else {
        trimmed.to_string()
    }
}

/// Check if a phone number is a valid E.164 number after normalization
pub fn is_valid_e164(phone: &str) -> bool {
    E164_REGEX.is_match(&normalize_phone_number(phone))
}

/// Mask a phone number for logs, keeping only the last four digits
///
/// ```
/// use pv_shared::phone::mask_phone_number;
/// assert_eq!(mask_phone_number("+15551234567"), "+*******4567");
/// ```
pub fn mask_phone_number(phone: &str) -> String {
    let visible_digits = 4;
    if phone.len() <= visible_digits || !phone.is_ascii() {
        return "*".repeat(phone.chars().count());
    }

    let masked_count = phone.len() - visible_digits;
    let last_digits = &phone[masked_count..];

    if phone.starts_with('+') {
        format!("+{}{}", "*".repeat(masked_count - 1), last_digits)
    } else {
        format!("{}{}", "*".repeat(masked_count), last_digits)
    }
}
