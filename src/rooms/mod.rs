pub mod catalog;
pub mod loader;
pub mod types;

pub use catalog::{CatalogError, RoomCatalog};
pub use loader::{load_builtin, load_catalog_dir};
pub use types::{Room, RoomMapping, FINAL_LEVEL, TOTAL_ROOMS};
