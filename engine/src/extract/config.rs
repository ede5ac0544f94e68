use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

use super::classify::RowClassifier;
use super::clauses::ClauseTable;
use super::symbols::SymbolTable;

/// Static tables the extractors consult. Passed by reference so tests can
/// swap in fixture tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    #[serde(default)]
    pub symbols: SymbolTable,
    #[serde(default)]
    pub clauses: ClauseTable,
}

impl ExtractConfig {
    pub fn new(symbols: SymbolTable, clauses: ClauseTable) -> Self {
        ExtractConfig { symbols, clauses }
    }

    /// Load tables from JSON. Missing sections fall back to the built-in tables.
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let data = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn classifier(&self) -> RowClassifier<'_> {
        RowClassifier::new(&self.symbols, &self.clauses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_default_clauses() {
        let config = ExtractConfig::from_json(
            r#"{"symbols": [{"icon": "/x/fire.png", "token": "Fire", "kind": "energy"}]}"#,
        )
        .unwrap();
        assert_eq!(config.symbols.lookup("/x/fire.png"), Ok("Fire"));
        assert!(config.symbols.lookup("/card/fire.png").is_err());
        assert_eq!(config.clauses, ClauseTable::default());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(ExtractConfig::from_json("{not json").is_err());
    }
}
