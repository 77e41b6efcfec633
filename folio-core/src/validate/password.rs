//! Password-strength scoring.
//!
//! A bounded, single-pass score from 0 to 4: one point each for minimum
//! length, mixed case, a digit, and a symbol. Registration requires
//! [`MIN_REGISTRATION_SCORE`].

/// Minimum length before a password earns its length point.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Minimum acceptable score for registration.
pub const MIN_REGISTRATION_SCORE: u8 = 3;

/// Result of scoring a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    /// Score in 0..=4.
    pub score: u8,
}

impl PasswordStrength {
    /// Returns a human-readable label for the score.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self.score {
            0 | 1 => "weak",
            2 => "fair",
            3 => "good",
            _ => "strong",
        }
    }

    /// Returns true if the score meets the registration minimum.
    #[must_use]
    pub const fn acceptable(&self) -> bool {
        self.score >= MIN_REGISTRATION_SCORE
    }
}

/// Scores a password in a single pass over its characters.
#[must_use]
pub fn score_password(password: &str) -> PasswordStrength {
    let mut length = 0usize;
    let mut has_lower = false;
    let mut has_upper = false;
    let mut has_digit = false;
    let mut has_symbol = false;

    for c in password.chars() {
        length += 1;
        if c.is_lowercase() {
            has_lower = true;
        } else if c.is_uppercase() {
            has_upper = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        } else if !c.is_whitespace() {
            has_symbol = true;
        }
    }

    let mut score = 0u8;
    if length >= MIN_PASSWORD_LEN {
        score += 1;
    }
    if has_lower && has_upper {
        score += 1;
    }
    if has_digit {
        score += 1;
    }
    if has_symbol {
        score += 1;
    }

    PasswordStrength { score }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scores_zero() {
        assert_eq!(score_password("").score, 0);
    }

    #[test]
    fn test_length_alone() {
        let strength = score_password("aaaaaaaa");
        assert_eq!(strength.score, 1);
        assert_eq!(strength.label(), "weak");
    }

    #[test]
    fn test_mixed_case_and_digit() {
        let strength = score_password("Abcdef12");
        assert_eq!(strength.score, 3);
        assert_eq!(strength.label(), "good");
        assert!(strength.acceptable());
    }

    #[test]
    fn test_full_score() {
        let strength = score_password("Tr1cky-Password");
        assert_eq!(strength.score, 4);
        assert_eq!(strength.label(), "strong");
    }

    #[test]
    fn test_short_but_complex() {
        // All character classes, but below the length bar.
        let strength = score_password("Ab1!");
        assert_eq!(strength.score, 3);
    }

    #[test]
    fn test_whitespace_is_not_a_symbol() {
        assert_eq!(score_password("abcd efgh").score, 1);
    }
}
