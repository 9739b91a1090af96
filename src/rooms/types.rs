use serde::{Deserialize, Serialize};

/// Number of rooms the completion percentage is measured against.
pub const TOTAL_ROOMS: usize = 12;

/// Highest level; rooms on it are final.
pub const FINAL_LEVEL: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Room {
    pub code: String,
    pub level: u8,
    pub department: String,
    pub room_number: String,
    pub name: String,
    pub description: String,
    pub clearance: String,
    pub theme: String,
    pub clue_image: String,
    pub status: String,
    #[serde(default)]
    pub is_final: bool,
}

impl Room {
    /// Code assembled from the room's parts. Equal to `code` in a valid catalog.
    pub fn composed_code(&self) -> String {
        format!("{}{}{}", self.level, self.department, self.room_number)
    }

    /// The key the passcode validator looks up within a level.
    pub fn level_key(&self) -> String {
        format!("{}{}", self.department, self.room_number)
    }

    /// "EC 210", as shown in headers and breadcrumbs.
    pub fn label(&self) -> String {
        format!("{} {}", self.department, self.room_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoomMapping {
    pub from: String,
    pub to: String,
    pub description: String,
    pub hint: String,
}

/// One `level_N.toml` file.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogFile {
    #[serde(default, rename = "room")]
    pub rooms: Vec<Room>,
    #[serde(default, rename = "mapping")]
    pub mappings: Vec<RoomMapping>,
}

/// Width of the room number for a level: 3 digits below the final level, 2 on it.
pub fn room_number_width(level: u8) -> usize {
    if level == FINAL_LEVEL {
        2
    } else {
        3
    }
}
