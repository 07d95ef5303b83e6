//! Password policy.

use std::fmt;

use serde_json::Value;

use super::ValidationError;

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARACTERS: &str = "!?`~@#$%'^\"&*()-_=+[]{}\\|;:,<.>/";

/// A single rule a password failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    TooShort { min_length: usize },
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
    MissingSpecial,
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min_length } => {
                write!(f, "Password must be at least {} characters long.", min_length)
            }
            Self::MissingUppercase => {
                f.write_str("Password must contain at least one uppercase letter.")
            }
            Self::MissingLowercase => {
                f.write_str("Password must contain at least one lowercase letter.")
            }
            Self::MissingDigit => f.write_str("Password must contain at least one number."),
            Self::MissingSpecial => {
                f.write_str("Password must contain at least one special character.")
            }
        }
    }
}

/// Fixed rules a new password has to meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl PasswordPolicy {
    pub const DEFAULT: Self = Self {
        min_length: 10,
        require_uppercase: true,
        require_lowercase: true,
        require_digit: true,
        require_special: true,
    };

    /// Check `password` against every rule.
    ///
    /// Rules are evaluated independently, so several violations can be
    /// reported at once. They come back in a fixed order: length, uppercase,
    /// lowercase, digit, special character.
    pub fn validate(&self, password: &str) -> Result<(), Vec<PolicyViolation>> {
        let mut violations = Vec::new();

        if password.chars().count() < self.min_length {
            violations.push(PolicyViolation::TooShort {
                min_length: self.min_length,
            });
        }
        if self.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
            violations.push(PolicyViolation::MissingUppercase);
        }
        if self.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
            violations.push(PolicyViolation::MissingLowercase);
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            violations.push(PolicyViolation::MissingDigit);
        }
        if self.require_special && !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
            violations.push(PolicyViolation::MissingSpecial);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Validate an untyped value, as found in a decoded JSON form body.
    pub fn validate_value(
        &self,
        value: &Value,
    ) -> Result<Result<(), Vec<PolicyViolation>>, ValidationError> {
        match value {
            Value::String(password) => Ok(self.validate(password)),
            _ => Err(ValidationError::NotAString),
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Live feedback for a "new password" + "confirm password" pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordFeedback {
    pub violations: Vec<PolicyViolation>,
    pub confirmation_matches: bool,
}

impl PasswordFeedback {
    pub fn is_acceptable(&self) -> bool {
        self.violations.is_empty() && self.confirmation_matches
    }
}

pub fn password_feedback(password: &str, confirmation: &str) -> PasswordFeedback {
    PasswordFeedback {
        violations: PasswordPolicy::DEFAULT.validate(password).err().unwrap_or_default(),
        confirmation_matches: password == confirmation,
    }
}
