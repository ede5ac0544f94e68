use serde::{Deserialize, Serialize};

/// How a clause's text is compared against a row's flattened text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClausePattern {
    Exact,
    Prefix,
    Suffix,
}

/// What happens to a row that carries a known clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseAction {
    /// Discard the row.
    Drop,
    /// Record a fixed ability instead of parsing the row.
    Ability { name: String, text: String },
    /// Append a trait tag to the card.
    Trait(String),
}

/// A block of rule text printed verbatim across many cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub pattern: ClausePattern,
    pub text: String,
    pub action: ClauseAction,
}

impl Clause {
    pub fn matches(&self, row_text: &str) -> bool {
        match self.pattern {
            ClausePattern::Exact => row_text == self.text,
            ClausePattern::Prefix => row_text.starts_with(&self.text),
            ClausePattern::Suffix => row_text.ends_with(&self.text),
        }
    }
}

/// Ordered list of known clauses; the first matching entry wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClauseTable {
    clauses: Vec<Clause>,
}

pub const MEGA_CLAUSE: &str =
    "When 1 of your Pokémon becomes a Mega Evolution Pokémon, your turn ends.";
pub const BABY_ABILITY: &str = "Baby Pokémon";
pub const BABY_TEXT: &str = "If this Baby Pokémon is your Active Pokémon and your opponent tries to attack, your opponent flips a coin (before doing anything else required in order to use that attack). If tails, your opponent's turn ends without an attack.";
pub const HOLON_ABILITY: &str = "Holon Pokémon";
pub const HOLON_TEXT_1: &str = "You may attach this as an Energy card from your hand to 1 of your Pokémon that already has an Energy card attached to it. When you attach this card, return an Energy card attached to that Pokémon to your hand. While attached, this card is a Special Energy card and provides every type of Energy but 2 Energy at a time. (Has no effect other than providing Energy.)";
// The printed icon is lost from the flattened text, hence the double space.
const HOLON_TEXT_2_ROW: &str = "You may attach this as an Energy card from your hand to 1 of your Pokémon. While attached, this card is a Special Energy card and provides  Energy.";
pub const HOLON_TEXT_2: &str = "You may attach this as an Energy card from your hand to 1 of your Pokémon. While attached, this card is a Special Energy card and provides C Energy.";

impl ClauseTable {
    pub fn new(clauses: Vec<Clause>) -> Self {
        ClauseTable { clauses }
    }

    pub fn empty() -> Self {
        ClauseTable {
            clauses: Vec::new(),
        }
    }

    /// First clause of one of `patterns` that matches `row_text`.
    pub fn find(&self, row_text: &str, patterns: &[ClausePattern]) -> Option<&Clause> {
        self.clauses
            .iter()
            .filter(|c| patterns.contains(&c.pattern))
            .find(|c| c.matches(row_text))
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }
}

fn clause(pattern: ClausePattern, text: &str, action: ClauseAction) -> Clause {
    Clause {
        pattern,
        text: text.to_string(),
        action,
    }
}

fn ability(name: &str, text: &str) -> ClauseAction {
    ClauseAction::Ability {
        name: name.to_string(),
        text: text.to_string(),
    }
}

impl Default for ClauseTable {
    /// Rule clauses found on serebii.net creature card pages.
    fn default() -> Self {
        use ClauseAction::Drop;
        use ClausePattern::*;

        ClauseTable::new(vec![
            clause(Exact, MEGA_CLAUSE, ClauseAction::Trait("Mega".to_string())),
            clause(
                Exact,
                "When Pokémon-ex has been Knocked Out, your opponent takes 2 Prize cards.",
                Drop,
            ),
            clause(
                Exact,
                "When Pokémon-EX has been Knocked Out, your opponent takes 2 Prize cards.",
                Drop,
            ),
            clause(
                Exact,
                "You may have any number of Arceus cards in your deck",
                Drop,
            ),
            clause(
                Prefix,
                "If this Baby Pokémon is your Active Pokémon",
                ability(BABY_ABILITY, BABY_TEXT),
            ),
            clause(
                Exact,
                "You may have up to 4 Basic Pokémon cards in your deck with Unown in their names",
                Drop,
            ),
            clause(Exact, HOLON_TEXT_1, ability(HOLON_ABILITY, HOLON_TEXT_1)),
            clause(Exact, HOLON_TEXT_2_ROW, ability(HOLON_ABILITY, HOLON_TEXT_2)),
            clause(Prefix, "You can't have more than ", Drop),
            clause(
                Suffix,
                "Lv. X can use any attack, Poké-Power, or Poké-Body from its previous Level.",
                Drop,
            ),
            clause(Suffix, "Once you have both cards, place both on your Bench", Drop),
            clause(
                Suffix,
                "BREAK retains the attacks, Abilities, Weakness, Resistance, and Retreat Cost \
                 of its previous Evolution.",
                Drop,
            ),
        ])
    }
}
