use thiserror::Error;
use tracing::{error, info};

use super::tracker::NavigationTracker;
use crate::passcode::{PasscodeError, PasscodeValidator};
use crate::rooms::{Room, RoomCatalog, RoomMapping};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error(transparent)]
    Passcode(#[from] PasscodeError),

    #[error("ROOM DATA MISSING - {0} passed validation but is not in the catalog")]
    RoomDataMissing(String),
}

/// Everything a room screen needs.
#[derive(Debug, Clone, Copy)]
pub struct RoomView<'a> {
    pub room: &'a Room,
    pub next_room: Option<&'a str>,
    pub mapping: Option<&'a RoomMapping>,
    pub is_final: bool,
    next: Option<&'a Room>,
}

impl<'a> RoomView<'a> {
    /// The next passcode panel is shown only on the way to a final room.
    pub fn shows_next_passcode(&self) -> bool {
        self.next_room.is_some() && !self.is_final
    }

    /// Hint towards the next room. Final rooms have none.
    pub fn hint(&self) -> Option<&'a str> {
        if self.is_final {
            return None;
        }
        match (self.mapping, self.next_room) {
            (Some(mapping), Some(_)) => Some(mapping.hint.as_str()),
            _ => None,
        }
    }

    /// The room the clue leads to, read from the catalog.
    pub fn next_room_record(&self) -> Option<&'a Room> {
        self.next
    }

    pub fn breadcrumbs(&self) -> Vec<String> {
        vec![
            "Home".to_string(),
            format!("Level {}", self.room.level),
            self.room.label(),
        ]
    }
}

/// Resolves passcodes into room views.
#[derive(Debug, Clone)]
pub struct RoomNavigator<'a> {
    catalog: &'a RoomCatalog,
    validator: PasscodeValidator,
}

impl<'a> RoomNavigator<'a> {
    pub fn new(catalog: &'a RoomCatalog) -> Self {
        RoomNavigator {
            catalog,
            validator: PasscodeValidator::new(catalog),
        }
    }

    pub fn catalog(&self) -> &'a RoomCatalog {
        self.catalog
    }

    pub fn validator(&self) -> &PasscodeValidator {
        &self.validator
    }

    /// `None` when no room has this code; the caller returns to the entry terminal.
    pub fn resolve(&self, code: &str) -> Option<RoomView<'a>> {
        let room = self.catalog.room_by_code(code)?;
        let next_room = self.catalog.next_room(code);
        Some(RoomView {
            room,
            next_room,
            mapping: self.catalog.room_mapping(code),
            is_final: self.catalog.is_final_room(code),
            next: next_room.and_then(|c| self.catalog.room_by_code(c)),
        })
    }

    /// Validate `input`, resolve it, and record the visit on `tracker`.
    pub fn enter(
        &self,
        input: &str,
        tracker: &mut NavigationTracker,
    ) -> Result<RoomView<'a>, NavigationError> {
        self.validator.validate(input).into_result()?;

        let Some(view) = self.resolve(input) else {
            error!(code = input, "validated passcode has no room record");
            return Err(NavigationError::RoomDataMissing(input.to_string()));
        };

        tracker.set_current_room(Some(&view.room.code));
        info!(
            code = %view.room.code,
            level = view.room.level,
            completion = tracker.completion_percentage(),
            "entered room"
        );
        Ok(view)
    }
}
