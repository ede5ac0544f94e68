use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::StoreError;

use super::collection::CardCollection;

fn read(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the full collection to a JSON file.
pub fn save_collection(path: &Path, collection: &CardCollection) -> Result<(), StoreError> {
    let data = serde_json::to_string_pretty(collection)?;
    fs::write(path, data).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a collection previously written by [`save_collection`].
pub fn load_collection(path: &Path) -> Result<CardCollection, StoreError> {
    let data = read(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Parse a species list: one name per line, blank lines ignored.
pub fn parse_species(text: &str) -> HashSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load the list of valid creature species names.
pub fn load_species(path: &Path) -> Result<HashSet<String>, StoreError> {
    Ok(parse_species(&read(path)?))
}
