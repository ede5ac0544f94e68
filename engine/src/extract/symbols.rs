use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::data::card::Token;
use crate::error::UnknownIconError;

/// What an icon stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// Elemental energy, including colorless and the empty cost icon.
    Energy,
    /// Print or promo markers (shining star, Galactic, LEGEND...).
    Marker,
}

/// One icon identifier and the token it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub icon: String,
    pub token: Token,
    pub kind: SymbolKind,
}

/// Fixed mapping from icon source path to canonical token.
///
/// Icon identifiers are compared case-insensitively. Synonymous paths (the
/// site serves most energy icons from two directories) map to the same token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    entries: HashMap<String, (Token, SymbolKind)>,
}

const ENERGY: &[(&str, &str)] = &[
    ("colorless", "C"),
    ("darkness", "K"),
    ("dragon", "D"),
    ("electric", "E"),
    ("fairy", "Y"),
    ("fighting", "F"),
    ("fire", "R"),
    ("grass", "G"),
    ("metal", "M"),
    ("psychic", "P"),
    ("water", "W"),
    ("empty", "-"),
];

const MARKERS: &[(&str, &str)] = &[
    ("/card/image/shining.png", "-Star"),
    ("/card/image/g.png", "Galactic"),
    ("/card/image/galactic.png", "Galactic"),
    ("/card/image/gl.png", "GL"),
    ("/card/image/e4.png", "E4"),
    ("/card/image/fb.png", "FB"),
    ("/card/image/c.png", "Champion"),
    ("/card/image/m.png", "Movie"),
    ("/card/image/legend.png", "LEGEND"),
];

impl SymbolTable {
    pub fn new(entries: impl IntoIterator<Item = SymbolEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| (e.icon.to_lowercase(), (e.token, e.kind)))
            .collect();
        SymbolTable { entries }
    }

    /// Resolve an icon identifier to its token.
    pub fn lookup(&self, icon: &str) -> Result<&str, UnknownIconError> {
        self.entries
            .get(&icon.to_lowercase())
            .map(|(token, _)| token.as_str())
            .ok_or_else(|| UnknownIconError(icon.to_string()))
    }

    pub fn kind(&self, icon: &str) -> Option<SymbolKind> {
        self.entries.get(&icon.to_lowercase()).map(|(_, kind)| *kind)
    }

    /// Whether `icon` is an energy icon, i.e. one that can appear in a cost.
    pub fn is_energy_icon(&self, icon: &str) -> bool {
        self.kind(icon) == Some(SymbolKind::Energy)
    }

    /// Every distinct token the table can produce.
    pub fn tokens(&self) -> BTreeSet<&str> {
        self.entries.values().map(|(t, _)| t.as_str()).collect()
    }

    pub fn entries(&self) -> Vec<SymbolEntry> {
        let mut out: Vec<SymbolEntry> = self
            .entries
            .iter()
            .map(|(icon, (token, kind))| SymbolEntry {
                icon: icon.clone(),
                token: token.clone(),
                kind: *kind,
            })
            .collect();
        out.sort_by(|a, b| a.icon.cmp(&b.icon));
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SymbolTable {
    /// The icon set used by serebii.net card pages.
    fn default() -> Self {
        let energy = ENERGY.iter().flat_map(|(name, token)| {
            ["/card/image/", "/card/"].into_iter().map(move |dir| SymbolEntry {
                icon: format!("{dir}{name}.png"),
                token: token.to_string(),
                kind: SymbolKind::Energy,
            })
        });
        // Broken electric icon path on some older pages.
        let stray = std::iter::once(SymbolEntry {
            icon: "/card/image/.png".to_string(),
            token: "E".to_string(),
            kind: SymbolKind::Energy,
        });
        let markers = MARKERS.iter().map(|(icon, token)| SymbolEntry {
            icon: icon.to_string(),
            token: token.to_string(),
            kind: SymbolKind::Marker,
        });
        SymbolTable::new(energy.chain(stray).chain(markers))
    }
}

impl Serialize for SymbolTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SymbolTable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<SymbolEntry>::deserialize(deserializer)?;
        Ok(SymbolTable::new(entries))
    }
}
