//! Per-page dispatch and per-set accumulation.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::data::card::CardRecord;
use crate::data::collection::CardSet;
use crate::error::ExtractError;
use crate::extract::{
    extract_creature, extract_energy, extract_trainer, ClassificationWarning, ExtractConfig,
};
use crate::markup::{HtmlPage, MarkupNode};
use crate::page;

/// Which extractor a page goes to, decided from its type hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    Creature,
    Energy,
    Trainer { subtype: Vec<String> },
}

impl PageKind {
    pub fn from_type_hint(hint: &[String], species: &HashSet<String>) -> Self {
        match hint.first() {
            None => PageKind::Trainer {
                subtype: vec!["Trainer".to_string()],
            },
            Some(first) if species.contains(first) => PageKind::Creature,
            Some(first) if first == "Energy" => PageKind::Energy,
            Some(_) => PageKind::Trainer {
                subtype: hint.to_vec(),
            },
        }
    }
}

/// One card page: its table rows and the type tags listed beside it.
#[derive(Debug, Clone)]
pub struct CardPage<N> {
    pub rows: Vec<N>,
    pub type_hint: Vec<String>,
}

/// A record plus the classification warnings raised while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub record: CardRecord,
    pub warnings: Vec<ClassificationWarning>,
}

/// A card that could not be extracted and was left out of its set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFailure {
    /// Zero-based position of the page within the set.
    pub index: usize,
    pub error: ExtractError,
}

/// Outcome of extracting one set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetReport {
    pub set: CardSet,
    pub failures: Vec<CardFailure>,
    /// `(page index, warning)` pairs.
    pub warnings: Vec<(usize, ClassificationWarning)>,
}

/// Runs the extractors over card pages. Holds only read-only tables, so a
/// ripper can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct Ripper<'a> {
    config: &'a ExtractConfig,
    species: &'a HashSet<String>,
}

impl<'a> Ripper<'a> {
    pub fn new(config: &'a ExtractConfig, species: &'a HashSet<String>) -> Self {
        Ripper { config, species }
    }

    /// Extract a single page.
    pub fn extract<N: MarkupNode>(&self, page: &CardPage<N>) -> Result<Extracted, ExtractError> {
        let kind = PageKind::from_type_hint(&page.type_hint, self.species);
        let (record, warnings) = match kind {
            PageKind::Creature => {
                let (card, warnings) = extract_creature(&page.rows, &page.type_hint, self.config)?;
                (CardRecord::Creature(card), warnings)
            }
            PageKind::Energy => (
                CardRecord::Energy(extract_energy(&page.rows, self.config)?),
                Vec::new(),
            ),
            PageKind::Trainer { subtype } => {
                let mut card = extract_trainer(&page.rows, self.config)?;
                card.subtype = subtype;
                (CardRecord::Trainer(card), Vec::new())
            }
        };
        Ok(Extracted { record, warnings })
    }

    /// Extract every page of a set. Failed pages are reported and skipped.
    pub fn rip_set<N, I>(&self, name: &str, pages: I) -> SetReport
    where
        N: MarkupNode,
        I: IntoIterator<Item = CardPage<N>>,
    {
        let mut report = SetReport {
            set: CardSet::new(name),
            ..Default::default()
        };
        for (index, page) in pages.into_iter().enumerate() {
            report.record(index, self.extract(&page));
        }
        report.log_summary();
        report
    }

    /// Like [`Ripper::rip_set`] for raw page HTML. A `None` hint is read from
    /// the page itself.
    pub fn rip_html_set<'h, I>(&self, name: &str, pages: I) -> SetReport
    where
        I: IntoIterator<Item = (&'h str, Option<Vec<String>>)>,
    {
        let mut report = SetReport {
            set: CardSet::new(name),
            ..Default::default()
        };
        for (index, (html, hint)) in pages.into_iter().enumerate() {
            report.record(index, self.extract_html(html, hint));
        }
        report.log_summary();
        report
    }

    /// Parse and extract one card page.
    pub fn extract_html(
        &self,
        html: &str,
        type_hint: Option<Vec<String>>,
    ) -> Result<Extracted, ExtractError> {
        let parsed = HtmlPage::parse(html);
        let root = parsed.root();
        let rows = page::card_rows(&root)?;
        let type_hint = type_hint.unwrap_or_else(|| page::type_hint(&root));
        self.extract(&CardPage { rows, type_hint })
    }
}

impl SetReport {
    fn record(&mut self, index: usize, outcome: Result<Extracted, ExtractError>) {
        match outcome {
            Ok(extracted) => {
                debug!(
                    set = %self.set.name,
                    index,
                    name = extracted.record.name(),
                    "card extracted"
                );
                self.warnings
                    .extend(extracted.warnings.into_iter().map(|w| (index, w)));
                self.set.records.push(extracted.record);
            }
            Err(error) => {
                warn!(set = %self.set.name, index, %error, "skipping card");
                self.failures.push(CardFailure { index, error });
            }
        }
    }

    fn log_summary(&self) {
        info!(
            set = %self.set.name,
            records = self.set.len(),
            failures = self.failures.len(),
            warnings = self.warnings.len(),
            "set extracted"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hint(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn type_hint_dispatch() {
        let species: HashSet<String> = ["Pikachu".to_string()].into_iter().collect();
        assert_eq!(
            PageKind::from_type_hint(&[], &species),
            PageKind::Trainer {
                subtype: hint(&["Trainer"])
            }
        );
        assert_eq!(
            PageKind::from_type_hint(&hint(&["Pikachu", "Basic"]), &species),
            PageKind::Creature
        );
        assert_eq!(
            PageKind::from_type_hint(&hint(&["Energy"]), &species),
            PageKind::Energy
        );
        assert_eq!(
            PageKind::from_type_hint(&hint(&["Supporter"]), &species),
            PageKind::Trainer {
                subtype: hint(&["Supporter"])
            }
        );
    }
}
