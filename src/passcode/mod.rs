pub mod parser;
pub mod validator;

pub use parser::{parse_passcode, PasscodeParts};
pub use validator::{PasscodeError, PasscodeValidator, ValidationResult, MAX_LENGTH, MIN_LENGTH};
