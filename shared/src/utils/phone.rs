//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Chinese mobile phone number regex
static CHINA_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^1[3-9]\d{9}$").unwrap()
});

/// Coerce raw input to its integer representation, as a string of digits.
///
/// Leading whitespace and a single `+` sign are skipped, then the leading run of
/// ASCII digits is taken and everything after it is ignored. Leading zeros are
/// dropped. Returns `None` when the input does not start with a number, or is
/// negative.
///
/// ```
/// use vg_shared::phone::coerce_numeric;
///
/// assert_eq!(coerce_numeric(" 13812345678"), Some("13812345678".to_string()));
/// assert_eq!(coerce_numeric("013812345678"), Some("13812345678".to_string()));
/// assert_eq!(coerce_numeric("138-1234-5678"), Some("138".to_string()));
/// assert_eq!(coerce_numeric("abc"), None);
/// ```
pub fn coerce_numeric(raw: &str) -> Option<String> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let digits: String = unsigned
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return None;
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        Some("0".to_string())
    } else {
        Some(significant.to_string())
    }
}

/// Check if an already-coerced number is a valid Chinese mobile number
pub fn is_valid_chinese_mobile(phone: &str) -> bool {
    CHINA_MOBILE_REGEX.is_match(phone)
}

/// Coerce raw input and return it only if it is a valid Chinese mobile number
pub fn normalize_chinese_mobile(raw: &str) -> Option<String> {
    coerce_numeric(raw).filter(|phone| is_valid_chinese_mobile(phone))
}

/// Mask a phone number for display (e.g., 138****5678)
pub fn mask_phone_number(phone: &str) -> String {
    if phone.len() >= 7 && phone.is_ascii() {
        format!("{}****{}", &phone[0..3], &phone[phone.len() - 4..])
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_numeric() {
        assert_eq!(coerce_numeric("13812345678"), Some("13812345678".to_string()));
        assert_eq!(coerce_numeric("  13812345678"), Some("13812345678".to_string()));
        assert_eq!(coerce_numeric("+13812345678"), Some("13812345678".to_string()));
        assert_eq!(coerce_numeric("0013812345678"), Some("13812345678".to_string()));
        assert_eq!(coerce_numeric("13812345678abc"), Some("13812345678".to_string()));
        assert_eq!(coerce_numeric("000"), Some("0".to_string()));
        assert_eq!(coerce_numeric("-13812345678"), None);
        assert_eq!(coerce_numeric("abc"), None);
        assert_eq!(coerce_numeric(""), None);
    }

    #[test]
    fn test_is_valid_chinese_mobile() {
        assert!(is_valid_chinese_mobile("13812345678"));
        assert!(is_valid_chinese_mobile("14712345678"));
        assert!(is_valid_chinese_mobile("15912345678"));
        assert!(is_valid_chinese_mobile("16612345678"));
        assert!(is_valid_chinese_mobile("17712345678"));
        assert!(is_valid_chinese_mobile("18612345678"));
        assert!(is_valid_chinese_mobile("19912345678"));
        assert!(!is_valid_chinese_mobile("12812345678")); // Invalid prefix
        assert!(!is_valid_chinese_mobile("10812345678")); // Invalid prefix
        assert!(!is_valid_chinese_mobile("23812345678")); // Must start with 1
        assert!(!is_valid_chinese_mobile("1381234567"));  // Too short
        assert!(!is_valid_chinese_mobile("138123456789")); // Too long
        assert!(!is_valid_chinese_mobile("1381234567a"));
    }

    #[test]
    fn test_normalize_chinese_mobile() {
        assert_eq!(
            normalize_chinese_mobile(" 013812345678"),
            Some("13812345678".to_string())
        );
        // Formatting characters end the numeric prefix
        assert_eq!(normalize_chinese_mobile("138-1234-5678"), None);
        assert_eq!(normalize_chinese_mobile("+8613812345678"), None);
        assert_eq!(normalize_chinese_mobile("phone"), None);
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("13812345678"), "138****5678");
        assert_eq!(mask_phone_number("12345"), "****");
        assert_eq!(mask_phone_number(""), "****");
    }
}
