use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical string code for an icon (e.g. "R" for fire energy).
pub type Token = String;

/// Printed weakness modifier when the card leaves the field blank.
pub const DEFAULT_WEAKNESS_MODIFIER: &str = "×2";

/// Base damage recorded for attacks that print none.
pub const NO_DAMAGE: &str = "0";

/// Which kind of card a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Creature,
    Energy,
    Trainer,
}

/// An attack printed on a creature card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    /// Attack name.
    pub name: String,
    /// Energy icons in printed order.
    pub energy_cost: Vec<Token>,
    /// Printed damage, possibly with a "+" or "×" suffix. "0" when absent.
    pub base_damage: String,
    /// Effect text, empty when the attack has none.
    pub description: String,
}

/// A creature (Pokémon) card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureCard {
    /// Card name (e.g., "Charizard").
    pub name: String,
    /// Species, evolution stage and special-status tags, in page order.
    pub traits: Vec<String>,
    /// Hit points; 0 when the card prints none.
    pub hit_points: u32,
    /// Element type tokens.
    pub element_types: Vec<Token>,
    /// Ability name -> description.
    pub abilities: BTreeMap<String, String>,
    /// Attacks in printed order.
    pub attacks: Vec<Attack>,
    /// Weakness token -> modifier (e.g. "×2").
    pub weaknesses: BTreeMap<Token, String>,
    /// Resistance token -> modifier (e.g. "-30").
    pub resistances: BTreeMap<Token, String>,
    /// Number of energy icons in the retreat row.
    pub retreat_cost: u32,
}

/// An energy card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyCard {
    pub name: String,
    pub is_basic: bool,
    pub description: String,
}

impl Default for EnergyCard {
    fn default() -> Self {
        EnergyCard {
            name: String::new(),
            is_basic: true,
            description: String::new(),
        }
    }
}

/// A trainer card of any variant (item, supporter, stadium, tool...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerCard {
    pub name: String,
    /// Subtype tags, e.g. `["Trainer"]` or a more specific category.
    pub subtype: Vec<String>,
    pub description: String,
}

/// One extracted card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CardRecord {
    Creature(CreatureCard),
    Energy(EnergyCard),
    Trainer(TrainerCard),
}

impl CardRecord {
    pub fn name(&self) -> &str {
        match self {
            CardRecord::Creature(c) => &c.name,
            CardRecord::Energy(c) => &c.name,
            CardRecord::Trainer(c) => &c.name,
        }
    }

    pub fn kind(&self) -> CardKind {
        match self {
            CardRecord::Creature(_) => CardKind::Creature,
            CardRecord::Energy(_) => CardKind::Energy,
            CardRecord::Trainer(_) => CardKind::Trainer,
        }
    }

    pub fn as_creature(&self) -> Option<&CreatureCard> {
        match self {
            CardRecord::Creature(c) => Some(c),
            _ => None,
        }
    }
}

impl CreatureCard {
    pub fn is_mega(&self) -> bool {
        self.traits.iter().any(|t| t == "Mega")
    }
}

impl From<CreatureCard> for CardRecord {
    fn from(card: CreatureCard) -> Self {
        CardRecord::Creature(card)
    }
}

impl From<EnergyCard> for CardRecord {
    fn from(card: EnergyCard) -> Self {
        CardRecord::Energy(card)
    }
}

impl From<TrainerCard> for CardRecord {
    fn from(card: TrainerCard) -> Self {
        CardRecord::Trainer(card)
    }
}
