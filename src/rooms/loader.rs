use std::path::Path;

use tracing::{debug, info};

use super::catalog::{CatalogError, RoomCatalog};
use super::types::CatalogFile;

const BUILTIN_LEVELS: [(&str, &str); 3] = [
    ("level_1.toml", include_str!("../../rooms/level_1.toml")),
    ("level_2.toml", include_str!("../../rooms/level_2.toml")),
    ("level_3.toml", include_str!("../../rooms/level_3.toml")),
];

pub fn parse_catalog_file(name: &str, content: &str) -> Result<CatalogFile, CatalogError> {
    toml::from_str(content).map_err(|source| CatalogError::Parse {
        file: name.to_string(),
        source,
    })
}

pub fn load_catalog_file(path: &Path) -> Result<CatalogFile, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog_file(&path.display().to_string(), &content)
}

/// Merge files in the order given into one validated catalog.
fn assemble(files: Vec<CatalogFile>) -> Result<RoomCatalog, CatalogError> {
    let mut rooms = Vec::new();
    let mut mappings = Vec::new();
    for file in files {
        rooms.extend(file.rooms);
        mappings.extend(file.mappings);
    }
    RoomCatalog::new(rooms, mappings)
}

pub fn load_builtin() -> Result<RoomCatalog, CatalogError> {
    let files = BUILTIN_LEVELS
        .iter()
        .map(|(name, content)| parse_catalog_file(name, content))
        .collect::<Result<Vec<_>, _>>()?;
    assemble(files)
}

pub fn load_catalog_dir(dir: &Path) -> Result<RoomCatalog, CatalogError> {
    // Only the file name is a pattern; the directory is matched literally
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join("level_*.toml");
    let pattern = pattern.to_string_lossy();
    let mut paths: Vec<_> = glob::glob(&pattern)?.filter_map(|p| p.ok()).collect();

    // Sort by filename so level_1, level_2, level_3 are in order
    paths.sort();

    if paths.is_empty() {
        return Err(CatalogError::Empty(dir.to_path_buf()));
    }

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        debug!(path = %path.display(), "reading catalog file");
        files.push(load_catalog_file(path)?);
    }

    let catalog = assemble(files)?;
    info!(dir = %dir.display(), rooms = catalog.len(), "loaded room catalog");
    Ok(catalog)
}
