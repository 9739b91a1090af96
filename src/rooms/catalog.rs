use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use super::types::{room_number_width, Room, RoomMapping, FINAL_LEVEL, TOTAL_ROOMS};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid catalog pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("no level_*.toml files in {0}")]
    Empty(PathBuf),

    #[error("duplicate room code {0}")]
    DuplicateRoom(String),

    #[error("room {code} does not match its parts (expected {composed})")]
    CodeMismatch { code: String, composed: String },

    #[error("room {code}: {reason}")]
    InvalidRoom { code: String, reason: String },

    #[error("mapping {from} -> {to}: {reason}")]
    InvalidMapping {
        from: String,
        to: String,
        reason: String,
    },

    #[error("room {0} is not final but has no outgoing mapping")]
    DeadEnd(String),
}

/// Read-only registry of rooms and the edges between them.
///
/// Built once at startup. Construction checks every structural invariant
/// and refuses a catalog that breaks any of them.
#[derive(Debug, Clone)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
    mappings: Vec<RoomMapping>,
    by_code: HashMap<String, usize>,
    by_from: HashMap<String, usize>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<Room>, mappings: Vec<RoomMapping>) -> Result<Self, CatalogError> {
        let mut by_code = HashMap::with_capacity(rooms.len());
        for (index, room) in rooms.iter().enumerate() {
            check_room(room)?;
            if by_code.insert(room.code.clone(), index).is_some() {
                return Err(CatalogError::DuplicateRoom(room.code.clone()));
            }
        }

        let mut by_from = HashMap::with_capacity(mappings.len());
        for (index, mapping) in mappings.iter().enumerate() {
            let invalid = |reason: &str| CatalogError::InvalidMapping {
                from: mapping.from.clone(),
                to: mapping.to.clone(),
                reason: reason.to_string(),
            };

            let from = by_code
                .get(&mapping.from)
                .map(|&i| &rooms[i])
                .ok_or_else(|| invalid("unknown source room"))?;
            let to = by_code
                .get(&mapping.to)
                .map(|&i| &rooms[i])
                .ok_or_else(|| invalid("unknown target room"))?;

            if from.is_final {
                return Err(invalid("final rooms cannot lead anywhere"));
            }
            if to.level != from.level + 1 {
                return Err(invalid("target must be exactly one level deeper"));
            }
            if mapping.hint.trim().is_empty() || mapping.description.trim().is_empty() {
                return Err(invalid("hint and description must not be empty"));
            }
            if by_from.insert(mapping.from.clone(), index).is_some() {
                return Err(invalid("source room already has an outgoing mapping"));
            }
        }

        if let Some(room) = rooms
            .iter()
            .find(|r| !r.is_final && !by_from.contains_key(&r.code))
        {
            return Err(CatalogError::DeadEnd(room.code.clone()));
        }

        if rooms.len() != TOTAL_ROOMS {
            warn!(
                rooms = rooms.len(),
                expected = TOTAL_ROOMS,
                "catalog size differs from the completion denominator"
            );
        }

        Ok(RoomCatalog {
            rooms,
            mappings,
            by_code,
            by_from,
        })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        super::loader::load_builtin()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn mappings(&self) -> &[RoomMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn room_by_code(&self, code: &str) -> Option<&Room> {
        let room = self.by_code.get(code).map(|&i| &self.rooms[i]);
        if room.is_none() {
            debug!(code, "no room with this code");
        }
        room
    }

    /// Rooms on `level`, in catalog order.
    pub fn rooms_by_level(&self, level: u8) -> Vec<&Room> {
        self.rooms.iter().filter(|r| r.level == level).collect()
    }

    pub fn is_valid_room_code(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// False for unknown codes.
    pub fn is_final_room(&self, code: &str) -> bool {
        self.room_by_code(code).is_some_and(|r| r.is_final)
    }

    pub fn room_level(&self, code: &str) -> Option<u8> {
        self.room_by_code(code).map(|r| r.level)
    }

    pub fn room_mapping(&self, code: &str) -> Option<&RoomMapping> {
        self.by_from.get(code).map(|&i| &self.mappings[i])
    }

    pub fn next_room(&self, code: &str) -> Option<&str> {
        self.room_mapping(code).map(|m| m.to.as_str())
    }

    /// `department + room_number` keys of every room on `level`.
    pub fn level_codes(&self, level: u8) -> HashSet<String> {
        self.rooms
            .iter()
            .filter(|r| r.level == level)
            .map(Room::level_key)
            .collect()
    }

    /// Room counts for levels 1 through 3.
    pub fn level_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for room in &self.rooms {
            if let Some(slot) = counts.get_mut(usize::from(room.level).wrapping_sub(1)) {
                *slot += 1;
            }
        }
        counts
    }

    /// The chain of codes from `code` to its final room, `code` included.
    /// Empty for unknown codes.
    pub fn trail(&self, code: &str) -> Vec<&str> {
        let mut trail = Vec::new();
        let Some(room) = self.room_by_code(code) else {
            return trail;
        };
        let mut current = room.code.as_str();
        trail.push(current);
        // Levels strictly increase along mappings, so this terminates
        while let Some(next) = self.next_room(current) {
            trail.push(next);
            current = next;
        }
        trail
    }
}

fn check_room(room: &Room) -> Result<(), CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidRoom {
        code: room.code.clone(),
        reason,
    };

    if !(1..=FINAL_LEVEL).contains(&room.level) {
        return Err(invalid(format!("level {} is outside 1..={FINAL_LEVEL}", room.level)));
    }

    let department_ok = (2..=5).contains(&room.department.len())
        && room.department.chars().all(|c| c.is_ascii_uppercase());
    if !department_ok {
        return Err(invalid(format!(
            "department {:?} must be 2-5 uppercase letters",
            room.department
        )));
    }

    let width = room_number_width(room.level);
    if room.room_number.len() != width || !room.room_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(format!(
            "room number {:?} must be {width} digits on level {}",
            room.room_number, room.level
        )));
    }

    let composed = room.composed_code();
    if composed != room.code {
        return Err(CatalogError::CodeMismatch {
            code: room.code.clone(),
            composed,
        });
    }

    let expected_image = format!("/clues/{}.jpg", room.code);
    if room.clue_image != expected_image {
        return Err(invalid(format!(
            "clue image {:?} should be {expected_image:?}",
            room.clue_image
        )));
    }

    if room.is_final != (room.level == FINAL_LEVEL) {
        return Err(invalid("only level 3 rooms are final".to_string()));
    }

    let display = [
        ("name", &room.name),
        ("description", &room.description),
        ("clearance", &room.clearance),
        ("theme", &room.theme),
        ("status", &room.status),
    ];
    if let Some((field, _)) = display.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(invalid(format!("{field} must not be empty")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn catalog() -> RoomCatalog {
        RoomCatalog::builtin().unwrap()
    }

    fn room(code: &str, level: u8, department: &str, number: &str) -> Room {
        Room {
            code: code.to_string(),
            level,
            department: department.to_string(),
            room_number: number.to_string(),
            name: "Room".to_string(),
            description: "A room".to_string(),
            clearance: "OPEN".to_string(),
            theme: "Test".to_string(),
            clue_image: format!("/clues/{code}.jpg"),
            status: "IDLE".to_string(),
            is_final: level == FINAL_LEVEL,
        }
    }

    fn mapping(from: &str, to: &str) -> RoomMapping {
        RoomMapping {
            from: from.to_string(),
            to: to.to_string(),
            description: format!("{from} leads to {to}"),
            hint: "Keep going...".to_string(),
        }
    }

    fn small_rooms() -> Vec<Room> {
        vec![
            room("1AB100", 1, "AB", "100"),
            room("2AB200", 2, "AB", "200"),
            room("3FINAL09", 3, "FINAL", "09"),
        ]
    }

    fn small_mappings() -> Vec<RoomMapping> {
        vec![mapping("1AB100", "2AB200"), mapping("2AB200", "3FINAL09")]
    }

    // -------------------------------------------------------------------------
    // Built-in data
    // -------------------------------------------------------------------------

    #[test]
    fn test_every_room_is_well_formed() {
        let pattern = Regex::new(r"^[1-3][A-Z]{2,5}[0-9]{2,3}$").unwrap();
        for room in catalog().rooms() {
            assert!(pattern.is_match(&room.code), "{}", room.code);
            assert_eq!(room.clue_image, format!("/clues/{}.jpg", room.code));
            assert!((1..=3).contains(&room.level));
        }
    }

    #[test]
    fn test_lookup_round_trips() {
        let catalog = catalog();
        for room in catalog.rooms() {
            assert_eq!(catalog.room_by_code(&room.code), Some(room));
        }
    }

    #[test]
    fn test_four_rooms_per_level() {
        let catalog = catalog();
        for level in 1..=3 {
            assert_eq!(catalog.rooms_by_level(level).len(), 4);
        }
        assert_eq!(catalog.level_counts(), [4, 4, 4]);
    }

    #[test]
    fn test_rooms_by_level_preserves_order() {
        let codes: Vec<_> = catalog()
            .rooms_by_level(1)
            .iter()
            .map(|r| r.code.clone())
            .collect();
        assert_eq!(codes, vec!["1EC210", "1EC211", "1EC205", "1EC204"]);
    }

    #[test]
    fn test_only_level_three_is_final() {
        let catalog = catalog();
        for room in catalog.rooms() {
            assert_eq!(room.is_final, room.level == 3, "{}", room.code);
        }
        assert!(catalog.is_final_room("3FINAL01"));
        assert!(!catalog.is_final_room("1EC210"));
        assert!(!catalog.is_final_room("nonexistent"));
    }

    #[test]
    fn test_next_room_forms_forest() {
        let catalog = catalog();
        for room in catalog.rooms() {
            match room.level {
                1 | 2 => assert!(catalog.next_room(&room.code).is_some(), "{}", room.code),
                _ => assert!(catalog.next_room(&room.code).is_none(), "{}", room.code),
            }
        }
    }

    #[test]
    fn test_known_mappings() {
        let catalog = catalog();
        assert_eq!(catalog.next_room("1EC210"), Some("2EC212"));
        assert_eq!(catalog.next_room("2EC212"), Some("3FINAL01"));
        assert_eq!(catalog.next_room("3FINAL01"), None);
        assert_eq!(catalog.next_room("1EC205"), Some("2EC203"));
        assert_eq!(
            catalog.room_mapping("2EC203").map(|m| m.hint.as_str()),
            Some("Past, present, and future align...")
        );
    }

    #[test]
    fn test_unknown_codes_are_absent() {
        let catalog = catalog();
        assert!(catalog.room_by_code("1EC999").is_none());
        assert!(!catalog.is_valid_room_code("1EC999"));
        assert!(catalog.room_mapping("1EC999").is_none());
        assert_eq!(catalog.room_level("1EC999"), None);
        assert_eq!(catalog.room_level("2EC213"), Some(2));
    }

    #[test]
    fn test_level_codes() {
        let codes = catalog().level_codes(3);
        assert_eq!(codes.len(), 4);
        assert!(codes.contains("FINAL01"));
        assert!(!codes.contains("EC210"));
    }

    #[test]
    fn test_trail_follows_theme() {
        let catalog = catalog();
        assert_eq!(catalog.trail("1EC211"), vec!["1EC211", "2EC213", "3FINAL02"]);
        assert_eq!(catalog.trail("3FINAL04"), vec!["3FINAL04"]);
        assert!(catalog.trail("nope").is_empty());
    }

    // -------------------------------------------------------------------------
    // Load-time checks
    // -------------------------------------------------------------------------

    #[test]
    fn test_small_catalog_is_accepted() {
        let catalog = RoomCatalog::new(small_rooms(), small_mappings()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.level_counts(), [1, 1, 1]);
    }

    #[test]
    fn test_code_mismatch_is_rejected() {
        let mut rooms = small_rooms();
        rooms[0].room_number = "101".to_string();
        let err = RoomCatalog::new(rooms, small_mappings()).unwrap_err();
        assert!(matches!(err, CatalogError::CodeMismatch { .. }));
    }

    #[test]
    fn test_wrong_room_number_width_is_rejected() {
        let mut rooms = small_rooms();
        rooms[2] = room("3FINAL009", 3, "FINAL", "009");
        let mappings = vec![mapping("1AB100", "2AB200"), mapping("2AB200", "3FINAL009")];
        let err = RoomCatalog::new(rooms, mappings).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRoom { .. }));
    }

    #[test]
    fn test_bad_clue_image_is_rejected() {
        let mut rooms = small_rooms();
        rooms[1].clue_image = "/clues/other.jpg".to_string();
        assert!(RoomCatalog::new(rooms, small_mappings()).is_err());
    }

    #[test]
    fn test_final_flag_must_match_level() {
        let mut rooms = small_rooms();
        rooms[1].is_final = true;
        assert!(RoomCatalog::new(rooms, small_mappings()).is_err());
    }

    #[test]
    fn test_empty_display_string_is_rejected() {
        let mut rooms = small_rooms();
        rooms[0].clearance = "  ".to_string();
        assert!(RoomCatalog::new(rooms, small_mappings()).is_err());
    }

    #[test]
    fn test_duplicate_room_is_rejected() {
        let mut rooms = small_rooms();
        rooms.push(rooms[0].clone());
        let err = RoomCatalog::new(rooms, small_mappings()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateRoom(code) if code == "1AB100"));
    }

    #[test]
    fn test_mapping_to_unknown_room_is_rejected() {
        let mappings = vec![mapping("1AB100", "2ZZ999"), mapping("2AB200", "3FINAL09")];
        let err = RoomCatalog::new(small_rooms(), mappings).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidMapping { .. }));
    }

    #[test]
    fn test_mapping_must_descend_one_level() {
        let mappings = vec![mapping("1AB100", "3FINAL09"), mapping("2AB200", "3FINAL09")];
        assert!(RoomCatalog::new(small_rooms(), mappings).is_err());
    }

    #[test]
    fn test_second_outgoing_mapping_is_rejected() {
        let mut rooms = small_rooms();
        rooms.push(room("2AB201", 2, "AB", "201"));
        let mut mappings = small_mappings();
        mappings.push(mapping("1AB100", "2AB201"));
        mappings.push(mapping("2AB201", "3FINAL09"));
        assert!(RoomCatalog::new(rooms, mappings).is_err());
    }

    #[test]
    fn test_dead_end_is_rejected() {
        let mappings = vec![mapping("1AB100", "2AB200")];
        let err = RoomCatalog::new(small_rooms(), mappings).unwrap_err();
        assert!(matches!(err, CatalogError::DeadEnd(code) if code == "2AB200"));
    }
}
