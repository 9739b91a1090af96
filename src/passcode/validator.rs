use std::collections::HashSet;

use thiserror::Error;
use tracing::warn;

use super::parser::parse_passcode;
use crate::rooms::{RoomCatalog, FINAL_LEVEL};

pub const MIN_LENGTH: usize = 5;
pub const MAX_LENGTH: usize = 8;

/// Why a passcode was turned away. `Display` is the message shown to the player.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasscodeError {
    #[error("Please enter a passcode")]
    EmptyInput,

    #[error("ACCESS DENIED - Passcode must be 5-8 characters (got {0})")]
    BadLength(usize),

    #[error("ACCESS DENIED - Passcode must begin with a level: 1, 2 or 3")]
    BadLevelPrefix,

    #[error("ACCESS DENIED - Department must be 2-5 uppercase letters after the level")]
    BadDepartment,

    #[error("ACCESS DENIED - Passcode must end in a 2-3 digit room number")]
    BadRoomNumber,

    #[error("ACCESS DENIED - Invalid passcode format")]
    BadFormat,

    #[error("ACCESS DENIED - Room {attempted} does not exist on Level {level}")]
    RoomNotFound { level: u8, attempted: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(PasscodeError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn reason(&self) -> Option<&PasscodeError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<(), PasscodeError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(err) => Err(err),
        }
    }
}

/// Checks raw passcode input against the format and the catalog's known rooms.
#[derive(Debug, Clone)]
pub struct PasscodeValidator {
    // Index 0 holds level 1
    known: Vec<HashSet<String>>,
}

impl PasscodeValidator {
    pub fn new(catalog: &RoomCatalog) -> Self {
        let known = (1..=FINAL_LEVEL)
            .map(|level| catalog.level_codes(level))
            .collect();
        PasscodeValidator { known }
    }

    pub fn validate(&self, input: &str) -> ValidationResult {
        let result = self.check(input);
        if let ValidationResult::Invalid(ref err) = result {
            warn!(input, reason = %err, "passcode rejected");
        }
        result
    }

    fn check(&self, input: &str) -> ValidationResult {
        if input.trim().is_empty() {
            return ValidationResult::Invalid(PasscodeError::EmptyInput);
        }

        let length = input.chars().count();
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return ValidationResult::Invalid(PasscodeError::BadLength(length));
        }

        let Some(parts) = parse_passcode(input) else {
            return ValidationResult::Invalid(diagnose_format(input));
        };

        let attempted = parts.level_key();
        let known = self
            .known
            .get(usize::from(parts.level) - 1)
            .is_some_and(|codes| codes.contains(&attempted));
        if !known {
            return ValidationResult::Invalid(PasscodeError::RoomNotFound {
                level: parts.level,
                attempted,
            });
        }

        ValidationResult::Valid
    }
}

/// Name the first part of a malformed passcode that is wrong.
fn diagnose_format(input: &str) -> PasscodeError {
    let mut chars = input.chars();
    if !matches!(chars.next(), Some('1'..='3')) {
        return PasscodeError::BadLevelPrefix;
    }

    let rest = chars.as_str();
    let letters = rest.chars().take_while(|c| c.is_ascii_uppercase()).count();
    if !(2..=5).contains(&letters) {
        return PasscodeError::BadDepartment;
    }

    let digits = rest.chars().rev().take_while(|c| c.is_ascii_digit()).count();
    if !(2..=3).contains(&digits) {
        return PasscodeError::BadRoomNumber;
    }

    PasscodeError::BadFormat
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasscodeValidator {
        PasscodeValidator::new(&RoomCatalog::builtin().unwrap())
    }

    fn reason(input: &str) -> PasscodeError {
        validator().validate(input).reason().cloned().unwrap()
    }

    #[test]
    fn test_every_catalog_room_is_valid() {
        let catalog = RoomCatalog::builtin().unwrap();
        let validator = PasscodeValidator::new(&catalog);
        for room in catalog.rooms() {
            assert!(validator.validate(&room.code).is_valid(), "{}", room.code);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(reason(""), PasscodeError::EmptyInput);
        assert_eq!(reason("   "), PasscodeError::EmptyInput);
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(reason("1EC2"), PasscodeError::BadLength(4));
        assert_eq!(reason("1ECABC123"), PasscodeError::BadLength(9));
        // Five characters get past the length gate
        assert_eq!(
            reason("1AB12"),
            PasscodeError::RoomNotFound {
                level: 1,
                attempted: "AB12".to_string()
            }
        );
    }

    #[test]
    fn test_level_prefix() {
        assert_eq!(reason("9XX999"), PasscodeError::BadLevelPrefix);
        assert_eq!(reason("0EC210"), PasscodeError::BadLevelPrefix);
        assert_eq!(reason("EC2101"), PasscodeError::BadLevelPrefix);
    }

    #[test]
    fn test_lowercase_is_rejected() {
        let result = validator().validate("1ec210");
        assert!(!result.is_valid());
        assert_eq!(result.reason(), Some(&PasscodeError::BadDepartment));
    }

    #[test]
    fn test_department_length() {
        assert_eq!(reason("1E2100"), PasscodeError::BadDepartment);
        assert_eq!(reason("1ABCDEF1"), PasscodeError::BadDepartment);
    }

    #[test]
    fn test_room_number_digits() {
        assert_eq!(reason("1EC2100"), PasscodeError::BadRoomNumber);
        assert_eq!(reason("1EC21X0"), PasscodeError::BadRoomNumber);
        assert_eq!(reason("1ECABC"), PasscodeError::BadRoomNumber);
    }

    #[test]
    fn test_generic_format() {
        assert_eq!(reason("1EC1A10"), PasscodeError::BadFormat);
    }

    #[test]
    fn test_room_not_found() {
        assert_eq!(
            reason("1EC999"),
            PasscodeError::RoomNotFound {
                level: 1,
                attempted: "EC999".to_string()
            }
        );
        // Real room, wrong level
        assert!(matches!(reason("2EC210"), PasscodeError::RoomNotFound { level: 2, .. }));
    }

    #[test]
    fn test_final_level_digit_count() {
        assert!(validator().validate("3FINAL01").is_valid());
        assert!(matches!(reason("3FINA001"), PasscodeError::RoomNotFound { .. }));
        // Final rooms use 2 digits; a 3 digit level 1 shape is not enough
        assert!(matches!(reason("1FINAL01"), PasscodeError::RoomNotFound { .. }));
    }

    #[test]
    fn test_room_not_found_message() {
        let message = reason("2EC999").to_string();
        assert!(message.contains("Level 2"));
        assert!(message.contains("EC999"));
    }

    #[test]
    fn test_into_result() {
        let validator = validator();
        assert!(validator.validate("1EC210").into_result().is_ok());
        assert_eq!(
            validator.validate("").into_result(),
            Err(PasscodeError::EmptyInput)
        );
    }
}
