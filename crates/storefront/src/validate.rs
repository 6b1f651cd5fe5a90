//! Input validation helpers.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));
static PHONE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-\s()]+$").expect("phone pattern is valid"));
static SSN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}-[0-9]{7}$").expect("ssn pattern is valid"));

const STRENGTH_LEVELS: [&str; 5] = ["매우 약함", "약함", "보통", "강함", "매우 강함"];
const SSN_WEIGHTS: [u32; 12] = [2, 3, 4, 5, 6, 7, 8, 9, 2, 3, 4, 5];

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Digits, spaces, `+ - ( )` only, with at least ten digits.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_CHARS.is_match(phone) && phone.chars().filter(char::is_ascii_digit).count() >= 10
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    /// One point each for length >= 8, lowercase, uppercase, digit, symbol.
    pub score: u8,
    pub level: &'static str,
}

pub fn password_strength(password: &str) -> PasswordStrength {
    let checks = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = checks.iter().filter(|passed| **passed).count();
    PasswordStrength {
        score: score as u8,
        level: STRENGTH_LEVELS[score.min(STRENGTH_LEVELS.len() - 1)],
    }
}

/// `YYMMDD-NNNNNNN` with a valid weighted mod-11 check digit.
pub fn is_valid_korean_ssn(ssn: &str) -> bool {
    if !SSN.is_match(ssn) {
        return false;
    }
    let digits: Vec<u32> = ssn.chars().filter_map(|c| c.to_digit(10)).collect();
    let sum: u32 = digits.iter().zip(SSN_WEIGHTS).map(|(d, w)| d * w).sum();
    let check = (11 - sum % 11) % 10;
    digits.get(12) == Some(&check)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("kim@example.co.kr"));
        assert!(!is_valid_email("kim@example"));
        assert!(!is_valid_email("kim lee@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phone_needs_ten_digits_and_allowed_chars() {
        assert!(is_valid_phone("010-1234-5678"));
        assert!(is_valid_phone("+82 (10) 1234 5678"));
        assert!(!is_valid_phone("010-123-456"));
        assert!(!is_valid_phone("010-1234-567a"));
    }

    #[test]
    fn password_levels() {
        assert_eq!(password_strength("").level, "매우 약함");
        assert_eq!(password_strength("abc").level, "약함");
        assert_eq!(password_strength("abcdefgh").level, "보통");
        assert_eq!(password_strength("abcdefg1").level, "강함");
        assert_eq!(password_strength("Abcdefg1").score, 4);
        let max = password_strength("Abcdefg1!");
        assert_eq!(max.score, 5);
        assert_eq!(max.level, "매우 강함");
    }

    #[test]
    fn ssn_checksum() {
        // Weighted sum 124, check digit (11 - 124 % 11) % 10 = 8.
        assert!(is_valid_korean_ssn("900101-1234568"));
        assert!(!is_valid_korean_ssn("900101-1234561"));
        assert!(!is_valid_korean_ssn("9001011234568"));
    }
}
