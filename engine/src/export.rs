//! Text export of an extracted collection: one description per line, split by
//! card kind, plus a one-line rendering of every creature card.
//!
//! Descriptions refer to their own card by name; the export rewrites those
//! references to a fixed phrase so identical effects read identically.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::data::card::{CardRecord, CreatureCard};
use crate::data::collection::CardCollection;
use crate::error::ExportError;

/// Phrase substituted for a card's own name.
pub const THIS_CARD: &str = "this Pokémon";
/// Phrase substituted for any species name in anonymized card lines.
pub const OTHER_SPECIES: &str = "_othermon_";

pub const ATTACK_TEXT_FILE: &str = "attack_text.txt";
pub const ABILITY_TEXT_FILE: &str = "ability_text.txt";
pub const TRAINER_TEXT_FILE: &str = "trainer_text.txt";
pub const ENERGY_TEXT_FILE: &str = "energy_text.txt";
pub const CARD_TEXT_FILE: &str = "card_texts.csv";

/// Replace every occurrence of `name` in `text` with [`THIS_CARD`].
pub fn replace_name(text: &str, name: &str) -> String {
    if name.is_empty() {
        return text.to_string();
    }
    text.replace(name, THIS_CARD)
}

/// End a description line with a period unless it already ends with one or
/// with a closing parenthesis.
pub fn terminate(text: &str) -> String {
    if text.ends_with('.') || text.ends_with(')') {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

/// Replace every species name with [`OTHER_SPECIES`]. Longer names go first so
/// a name containing a shorter one is replaced whole.
pub fn anonymize_species(line: &str, species: &[String]) -> String {
    let mut names: Vec<&String> = species.iter().filter(|s| !s.is_empty()).collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    names
        .into_iter()
        .fold(line.to_string(), |line, name| line.replace(name.as_str(), OTHER_SPECIES))
}

/// One-line summary of a creature card, with its own name replaced.
pub fn card_text_line(card: &CreatureCard) -> String {
    let mut out = format!(
        "{} HP # {} TYPE # ",
        card.hit_points,
        card.element_types.join(" / ")
    );
    for (n, (ability, description)) in card.abilities.iter().enumerate() {
        let description = description.replace(ability.as_str(), "of this");
        out.push_str(&format!("ABILITY{}: {} #", n + 1, description));
    }
    for (n, attack) in card.attacks.iter().enumerate() {
        out.push_str(&format!(
            "  ATTACK{}:  COSTS {},  {} DAMAGE,  DESCRIPTION: {} # # ",
            n + 1,
            attack.energy_cost.join(" / "),
            attack.base_damage,
            attack.description
        ));
    }
    if !card.name.is_empty() {
        out = out.replace(card.name.as_str(), "this pokémon");
    }

    out.push_str("  WEAKNESSES: ");
    for (token, modifier) in &card.weaknesses {
        out.push_str(&format!("{token}({modifier}) "));
    }
    out.push_str("#  RESISTANCES: ");
    for (token, modifier) in &card.resistances {
        out.push_str(&format!("{token}({modifier}) "));
    }
    out.push_str(&format!("#  RETREAT COST: {}", card.retreat_cost));
    out
}

/// Number of lines written per file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub attacks: usize,
    pub abilities: usize,
    pub trainers: usize,
    pub energies: usize,
    pub cards: usize,
}

struct LineFile {
    path: PathBuf,
    out: BufWriter<File>,
}

impl LineFile {
    fn create(dir: &Path, name: &str) -> Result<Self, ExportError> {
        let path = dir.join(name);
        let file = File::create(&path).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(LineFile {
            path,
            out: BufWriter::new(file),
        })
    }

    fn line(&mut self, text: &str) -> Result<(), ExportError> {
        writeln!(self.out, "{text}").map_err(|source| ExportError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn finish(mut self) -> Result<(), ExportError> {
        self.out.flush().map_err(|source| ExportError::Io {
            path: self.path,
            source,
        })
    }
}

/// Writes the export files into a directory, replacing earlier exports.
pub struct TextExporter {
    dir: PathBuf,
    species: Vec<String>,
}

impl TextExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        TextExporter {
            dir: dir.into(),
            species: Vec::new(),
        }
    }

    /// Anonymize these species names in the card line file.
    pub fn with_species(mut self, species: impl IntoIterator<Item = String>) -> Self {
        self.species = species.into_iter().collect();
        self
    }

    pub fn export(&self, collection: &CardCollection) -> Result<ExportSummary, ExportError> {
        let mut attacks = LineFile::create(&self.dir, ATTACK_TEXT_FILE)?;
        let mut abilities = LineFile::create(&self.dir, ABILITY_TEXT_FILE)?;
        let mut trainers = LineFile::create(&self.dir, TRAINER_TEXT_FILE)?;
        let mut energies = LineFile::create(&self.dir, ENERGY_TEXT_FILE)?;
        let mut cards = LineFile::create(&self.dir, CARD_TEXT_FILE)?;
        let mut summary = ExportSummary::default();

        let set_count = collection.sets.len();
        for (set_idx, card_idx, record) in collection.iter_indexed() {
            debug!(
                set = set_idx + 1,
                of = set_count,
                card = card_idx + 1,
                name = record.name(),
                "exporting card"
            );
            match record {
                CardRecord::Trainer(card) if !card.description.is_empty() => {
                    trainers.line(&terminate(&card.description))?;
                    summary.trainers += 1;
                }
                CardRecord::Energy(card) if !card.description.is_empty() => {
                    energies.line(&terminate(&card.description))?;
                    summary.energies += 1;
                }
                CardRecord::Creature(card) => {
                    for description in card.abilities.values().filter(|d| !d.is_empty()) {
                        abilities.line(&terminate(&replace_name(description, &card.name)))?;
                        summary.abilities += 1;
                    }
                    for attack in card.attacks.iter().filter(|a| !a.description.is_empty()) {
                        attacks.line(&terminate(&replace_name(&attack.description, &card.name)))?;
                        summary.attacks += 1;
                    }
                    cards.line(&anonymize_species(&card_text_line(card), &self.species))?;
                    summary.cards += 1;
                }
                _ => {}
            }
        }

        for file in [attacks, abilities, trainers, energies, cards] {
            file.finish()?;
        }
        info!(dir = %self.dir.display(), ?summary, "text export written");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::card::Attack;

    #[test]
    fn replace_name_replaces_every_occurrence() {
        assert_eq!(
            replace_name("Heal 20 from Pikachu. Pikachu is now Asleep.", "Pikachu"),
            "Heal 20 from this Pokémon. this Pokémon is now Asleep."
        );
        assert_eq!(replace_name("No name here.", ""), "No name here.");
    }

    #[test]
    fn replace_name_matches_naive_count_for_nested_names() {
        // "Mew" is contained in "Mewtwo"; a full replace rewrites both.
        let text = "Mewtwo copies Mew.";
        let replaced = replace_name(text, "Mew");
        assert_eq!(replaced.matches(THIS_CARD).count(), text.matches("Mew").count());
    }

    #[test]
    fn terminate_adds_missing_period() {
        assert_eq!(terminate("Draw a card"), "Draw a card.");
        assert_eq!(terminate("Draw a card."), "Draw a card.");
        assert_eq!(terminate("(Once per turn)"), "(Once per turn)");
    }

    #[test]
    fn longer_species_are_replaced_first() {
        let species = vec!["Mew".to_string(), "Mewtwo".to_string()];
        assert_eq!(
            anonymize_species("Mewtwo and Mew", &species),
            "_othermon_ and _othermon_"
        );
    }

    #[test]
    fn card_line_layout() {
        let mut card = CreatureCard {
            name: "Charmander".to_string(),
            hit_points: 50,
            element_types: vec!["R".to_string()],
            retreat_cost: 1,
            ..Default::default()
        };
        card.attacks.push(Attack {
            name: "Ember".to_string(),
            energy_cost: vec!["R".to_string(), "C".to_string()],
            base_damage: "30".to_string(),
            description: "Charmander discards 1 R Energy.".to_string(),
        });
        card.weaknesses.insert("W".to_string(), "×2".to_string());

        assert_eq!(
            card_text_line(&card),
            "50 HP # R TYPE #   ATTACK1:  COSTS R / C,  30 DAMAGE,  DESCRIPTION: this pokémon discards 1 R Energy. # #   WEAKNESSES: W(×2) #  RESISTANCES: #  RETREAT COST: 1"
        );
    }
}
