use lazy_static::lazy_static;
use regex::Regex;

use crate::rooms::types::room_number_width;

lazy_static! {
    static ref PASSCODE_REGEX: Regex = Regex::new(r"^[1-3][A-Z]{2,5}[0-9]{2,3}$").unwrap();
}

/// A passcode split into its positional parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasscodeParts<'a> {
    pub level: u8,
    pub department: &'a str,
    pub room_number: &'a str,
}

impl PasscodeParts<'_> {
    pub fn level_key(&self) -> String {
        format!("{}{}", self.department, self.room_number)
    }
}

pub fn is_well_formed(code: &str) -> bool {
    PASSCODE_REGEX.is_match(code)
}

/// Split a well-formed passcode into level, department and room number.
///
/// The room number is the trailing 3 characters, or the trailing 2 on the
/// final level. The department is whatever sits between the level digit and
/// the room number, so a code whose digit count does not suit its level
/// yields parts that match no room.
pub fn parse_passcode(code: &str) -> Option<PasscodeParts<'_>> {
    if !is_well_formed(code) {
        return None;
    }

    // The regex guarantees ASCII, so byte offsets are char offsets
    let level = code.as_bytes()[0] - b'0';
    let width = room_number_width(level);
    let split = code.len() - width;

    Some(PasscodeParts {
        level,
        department: &code[1..split],
        room_number: &code[split..],
    })
}
