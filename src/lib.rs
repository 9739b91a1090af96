//! Mystery.exe: a passcode-driven escape room.
//!
//! A visitor types a passcode at the entry terminal, lands in the matching
//! room, and reads a hint pointing at the next passcode until one of the
//! final rooms is reached.

pub mod config;
pub mod logging;
pub mod navigation;
pub mod passcode;
pub mod rooms;
pub mod status;

pub use config::Config;
pub use navigation::{NavigationError, NavigationTracker, RoomNavigator, RoomView};
pub use passcode::{PasscodeError, PasscodeValidator, ValidationResult};
pub use rooms::{Room, RoomCatalog, RoomMapping};
