//! Row classification for creature card tables.
//!
//! Card tables carry no field-kind markers, so each row's role is inferred
//! by an ordered list of rules. Content rules run first and look only at a
//! row's flattened text; rows they do not claim are "structural". Position
//! rules then assign the fixed roles (header, weakness/resistance, retreat,
//! footer) by index among structural rows, and the shape rule splits the
//! remaining rows into attacks and abilities. First match wins at every step.

use tracing::warn;

use crate::markup::MarkupNode;

use super::clauses::{ClauseAction, ClausePattern, ClauseTable};
use super::symbols::SymbolTable;

/// Role of one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Dropped without contributing to the record.
    Noise,
    /// A rule clause that stands for a fixed ability.
    BoilerplateAbility { name: String, text: String },
    /// A rule clause that tags the card (e.g. "Mega").
    BoilerplateTrait(String),
    StatHeader,
    WeaknessResistance,
    RetreatCost,
    Attack,
    Ability,
}

/// The result of classifying one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub kind: RowKind,
    /// Name of the rule that decided.
    pub rule: &'static str,
    /// Set when the rule fell back to a guess.
    pub ambiguity: Option<String>,
}

impl Verdict {
    fn new(kind: RowKind, rule: &'static str) -> Self {
        Verdict {
            kind,
            rule,
            ambiguity: None,
        }
    }
}

/// A row whose classification was a guess; worth a manual look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationWarning {
    /// Index of the row in the card's row sequence.
    pub row: usize,
    pub reason: String,
}

/// Flattened view of a row that content rules inspect.
#[derive(Debug, Clone)]
pub struct RowText {
    /// Trimmed flattened text.
    pub text: String,
    /// Trimmed non-empty text segments.
    pub strings: Vec<String>,
}

impl RowText {
    pub fn of<N: MarkupNode>(row: &N) -> Self {
        RowText {
            text: row.trimmed_text(),
            strings: row.strings(),
        }
    }
}

/// Position of a structural row among all structural rows of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPosition {
    pub index: usize,
    pub len: usize,
}

type ContentPredicate = fn(&RowText, &ClauseTable) -> Option<RowKind>;

/// Content rules, in priority order.
const CONTENT_RULES: &[(&str, ContentPredicate)] = &[
    ("boilerplate clause", boilerplate_clause),
    ("card cross-reference", cross_reference),
    ("rule-reference suffix", rule_reference_suffix),
    ("section captions", section_captions),
    ("empty row", empty_row),
];

type PositionPredicate = fn(RowPosition) -> Option<RowKind>;

/// Position rules, in priority order.
const POSITION_RULES: &[(&str, PositionPredicate)] = &[
    ("first row", header_position),
    ("footer", footer_position),
    ("retreat row", retreat_position),
    ("weakness row", weakness_position),
];

fn header_position(p: RowPosition) -> Option<RowKind> {
    (p.index == 0).then_some(RowKind::StatHeader)
}

fn footer_position(p: RowPosition) -> Option<RowKind> {
    (p.index + 1 == p.len).then_some(RowKind::Noise)
}

fn retreat_position(p: RowPosition) -> Option<RowKind> {
    (p.index + 2 == p.len).then_some(RowKind::RetreatCost)
}

fn weakness_position(p: RowPosition) -> Option<RowKind> {
    (p.index + 3 == p.len).then_some(RowKind::WeaknessResistance)
}

const CAPTIONS: &[&str] = &["Weakness", "Resistance", "Retreat Cost"];

fn clause_kind(action: &ClauseAction) -> RowKind {
    match action {
        ClauseAction::Drop => RowKind::Noise,
        ClauseAction::Ability { name, text } => RowKind::BoilerplateAbility {
            name: name.clone(),
            text: text.clone(),
        },
        ClauseAction::Trait(tag) => RowKind::BoilerplateTrait(tag.clone()),
    }
}

fn boilerplate_clause(row: &RowText, clauses: &ClauseTable) -> Option<RowKind> {
    clauses
        .find(&row.text, &[ClausePattern::Exact, ClausePattern::Prefix])
        .map(|c| clause_kind(&c.action))
}

fn cross_reference(row: &RowText, _: &ClauseTable) -> Option<RowKind> {
    row.text.contains('#').then_some(RowKind::Noise)
}

fn rule_reference_suffix(row: &RowText, clauses: &ClauseTable) -> Option<RowKind> {
    clauses
        .find(&row.text, &[ClausePattern::Suffix])
        .map(|c| clause_kind(&c.action))
}

/// Only a row naming every caption counts; value rows may carry one or two
/// caption labels next to their icons.
fn section_captions(row: &RowText, _: &ClauseTable) -> Option<RowKind> {
    let captions_only = row.strings.iter().all(|s| CAPTIONS.contains(&s.as_str()))
        && CAPTIONS.iter().all(|c| row.strings.iter().any(|s| s == c));
    captions_only.then_some(RowKind::Noise)
}

fn empty_row(row: &RowText, _: &ClauseTable) -> Option<RowKind> {
    row.text.is_empty().then_some(RowKind::Noise)
}

/// Ordered-rule classifier over injected symbol and clause tables.
#[derive(Debug, Clone, Copy)]
pub struct RowClassifier<'c> {
    symbols: &'c SymbolTable,
    clauses: &'c ClauseTable,
}

impl<'c> RowClassifier<'c> {
    pub fn new(symbols: &'c SymbolTable, clauses: &'c ClauseTable) -> Self {
        RowClassifier { symbols, clauses }
    }

    /// Content rules only. `None` means the row is structural.
    pub fn classify_content(&self, row: &RowText) -> Option<Verdict> {
        CONTENT_RULES
            .iter()
            .find_map(|&(name, rule)| rule(row, self.clauses).map(|kind| Verdict::new(kind, name)))
    }

    /// Position and shape rules for a structural row.
    pub fn classify_structural<N: MarkupNode>(&self, row: &N, position: RowPosition) -> Verdict {
        POSITION_RULES
            .iter()
            .find_map(|&(name, rule)| rule(position).map(|kind| Verdict::new(kind, name)))
            .unwrap_or_else(|| self.classify_shape(row))
    }

    /// Full classification of a row at a known structural position.
    pub fn classify<N: MarkupNode>(&self, row: &N, position: RowPosition) -> Verdict {
        self.classify_content(&RowText::of(row))
            .unwrap_or_else(|| self.classify_structural(row, position))
    }

    /// Attack or ability, decided by the first cell's shape: an energy icon
    /// (a cost) or an empty, icon-less cell means attack.
    pub fn classify_shape<N: MarkupNode>(&self, row: &N) -> Verdict {
        const RULE: &str = "cell shape";

        let cells = row.cells();
        let Some(first) = cells.first() else {
            return Verdict {
                kind: RowKind::Noise,
                rule: RULE,
                ambiguity: Some("row has text but no cells; dropped".to_string()),
            };
        };

        let icon = first.find("img");
        let src = icon
            .as_ref()
            .map(|img| img.attr("src").unwrap_or_default().to_string());

        match src {
            Some(src) if self.symbols.is_energy_icon(&src) => Verdict::new(RowKind::Attack, RULE),
            // A known non-energy symbol is neither a cost nor an ability label.
            Some(src) if self.symbols.kind(&src).is_some() => Verdict {
                kind: RowKind::Ability,
                rule: RULE,
                ambiguity: Some(format!(
                    "first cell icon `{src}` is not an energy icon; treated as ability"
                )),
            },
            Some(_) => Verdict::new(RowKind::Ability, RULE),
            None if first.trimmed_text().is_empty() => Verdict::new(RowKind::Attack, RULE),
            None => Verdict::new(RowKind::Ability, RULE),
        }
    }

    /// Classify a card's whole row sequence. Returns one verdict per input
    /// row, in order, plus any ambiguity warnings (which are also logged).
    pub fn classify_rows<N: MarkupNode>(
        &self,
        rows: &[N],
    ) -> (Vec<Verdict>, Vec<ClassificationWarning>) {
        let content: Vec<Option<Verdict>> = rows
            .iter()
            .map(|row| self.classify_content(&RowText::of(row)))
            .collect();
        let len = content.iter().filter(|v| v.is_none()).count();

        let mut verdicts = Vec::with_capacity(rows.len());
        let mut warnings = Vec::new();
        let mut structural = 0;

        for (i, (row, verdict)) in rows.iter().zip(content).enumerate() {
            let verdict = verdict.unwrap_or_else(|| {
                let position = RowPosition {
                    index: structural,
                    len,
                };
                structural += 1;
                self.classify_structural(row, position)
            });
            if let Some(reason) = &verdict.ambiguity {
                warn!(row = i, rule = verdict.rule, "{reason}");
                warnings.push(ClassificationWarning {
                    row: i,
                    reason: reason.clone(),
                });
            }
            verdicts.push(verdict);
        }

        (verdicts, warnings)
    }
}
