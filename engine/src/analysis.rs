//! Attack-description statistics over an extracted collection.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::error;

use crate::data::collection::CardCollection;
use crate::export::replace_name;

/// Damage amounts and coin counts folded into placeholders, in order.
const GENERIC_PATTERNS: &[(&str, &str)] = &[
    (r"[0-9]{1,2}0 damage|[1-9] damage counters?", "_AMOUNT_ damage"),
    (r"( _AMOUNT_ damage plus)? [0-9]{1,2}0 more damage", " _AMOUNT_ more damage"),
    (r"flip [a1-9] coins?", "flip _N_ coins"),
];

static GENERIC_REGEXES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    GENERIC_PATTERNS
        .iter()
        .filter_map(|(pattern, with)| match Regex::new(pattern) {
            Ok(re) => Some((re, *with)),
            Err(e) => {
                error!(pattern = *pattern, error = %e, "generic attack pattern does not compile");
                None
            }
        })
        .collect()
});

/// Counts in first-seen order, so ties rank by first appearance.
#[derive(Debug, Default)]
struct Tally {
    index: HashMap<String, usize>,
    counts: Vec<(String, usize)>,
}

impl Tally {
    fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.counts.len());
                self.counts.push((key.to_string(), 1));
            }
        }
    }

    fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked = self.counts.clone();
        // Stable sort keeps first-seen order among equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

/// An attack name printed several times, always with the same effect text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleDescriptionAttack {
    pub name: String,
    pub description: String,
    pub printings: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttackReport {
    pub total_attacks: usize,
    pub with_description: usize,
    /// Most common lower-cased descriptions.
    pub top_descriptions: Vec<(String, usize)>,
    /// Most common descriptions after folding amounts and coin counts.
    pub top_generic: Vec<(String, usize)>,
    pub unique_names: usize,
    /// Ranked by printings, most first.
    pub single_description: Vec<SingleDescriptionAttack>,
}

impl AttackReport {
    pub fn percent_with_description(&self) -> f64 {
        if self.total_attacks == 0 {
            return 0.0;
        }
        100.0 * self.with_description as f64 / self.total_attacks as f64
    }

    pub fn from_collection(collection: &CardCollection, top: usize) -> Self {
        let generic = |text: &str| {
            GENERIC_REGEXES.iter().fold(text.to_string(), |text, (re, with)| {
                re.replace_all(&text, *with).into_owned()
            })
        };

        let mut total_attacks = 0;
        let mut descriptions = Tally::default();
        let mut generic_descriptions = Tally::default();
        let mut by_name: Vec<(String, Tally)> = Vec::new();
        let mut name_index: HashMap<String, usize> = HashMap::new();

        let creatures = collection
            .iter_indexed()
            .filter_map(|(_, _, record)| record.as_creature());
        for card in creatures {
            for attack in &card.attacks {
                total_attacks += 1;
                let mut description = replace_name(&attack.description, &card.name);
                if !description.is_empty() && !description.ends_with('.') {
                    description.push('.');
                }

                let i = *name_index.entry(attack.name.clone()).or_insert_with(|| {
                    by_name.push((attack.name.clone(), Tally::default()));
                    by_name.len() - 1
                });
                by_name[i].1.add(&description);

                if !description.is_empty() {
                    let lower = description.to_lowercase();
                    generic_descriptions.add(&generic(&lower));
                    descriptions.add(&lower);
                }
            }
        }

        let mut single_description: Vec<SingleDescriptionAttack> = by_name
            .iter()
            .filter_map(|(name, tally)| {
                let printings: usize = tally.counts.iter().map(|(_, n)| n).sum();
                match tally.counts.as_slice() {
                    [(description, _)] if printings > 1 => Some(SingleDescriptionAttack {
                        name: name.clone(),
                        description: description.clone(),
                        printings,
                    }),
                    _ => None,
                }
            })
            .collect();
        single_description.sort_by(|a, b| b.printings.cmp(&a.printings));

        AttackReport {
            total_attacks,
            with_description: descriptions.counts.iter().map(|(_, n)| n).sum(),
            top_descriptions: descriptions.most_common(top),
            top_generic: generic_descriptions.most_common(top),
            unique_names: by_name.len(),
            single_description,
        }
    }

    /// Plain-text rendering.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Total number of attacks: {}", self.total_attacks);
        let _ = writeln!(out, "Number of attacks with descriptions: {}", self.with_description);
        let _ = writeln!(
            out,
            "Percentage of attacks with descriptions: {:.2}% \n",
            self.percent_with_description()
        );

        let _ = writeln!(out, "Top {} attack descriptions:", self.top_descriptions.len());
        for (text, count) in &self.top_descriptions {
            let _ = writeln!(out, "{} ({count})", text.trim());
        }
        let _ = writeln!(
            out,
            "\nTop {} descriptions with generic damage strings:",
            self.top_generic.len()
        );
        for (text, count) in &self.top_generic {
            let _ = writeln!(out, "{} ({count})", text.trim());
        }

        let _ = writeln!(out, "\nNumber of unique attack names: {}", self.unique_names);
        let _ = writeln!(
            out,
            "Number of unique attack names where all instances have the same description: {}",
            self.single_description.len()
        );
        for attack in &self.single_description {
            let _ = writeln!(
                out,
                "There are {} instances of the attack {}\n Description:{}",
                attack.printings, attack.name, attack.description
            );
        }
        out
    }
}
