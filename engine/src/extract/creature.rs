use tracing::debug;

use crate::data::card::{Attack, CreatureCard, DEFAULT_WEAKNESS_MODIFIER, NO_DAMAGE};
use crate::error::ExtractError;
use crate::markup::MarkupNode;

use super::classify::{ClassificationWarning, RowKind};
use super::config::ExtractConfig;
use super::normalize::{icon_tokens, normalize, normalize_body};
use super::symbols::SymbolTable;

/// Build a creature card from its table rows.
///
/// `traits` are the type tags found on the page (species, stage...); rule
/// clauses may append to them.
pub fn extract_creature<N: MarkupNode>(
    rows: &[N],
    traits: &[String],
    config: &ExtractConfig,
) -> Result<(CreatureCard, Vec<ClassificationWarning>), ExtractError> {
    let symbols = &config.symbols;
    let (verdicts, warnings) = config.classifier().classify_rows(rows);

    for (required, what) in [
        (RowKind::StatHeader, "header"),
        (RowKind::WeaknessResistance, "weakness/resistance"),
        (RowKind::RetreatCost, "retreat cost"),
    ] {
        if !verdicts.iter().any(|v| v.kind == required) {
            return Err(ExtractError::malformed(format!(
                "missing {what} row ({} rows)",
                rows.len()
            )));
        }
    }

    let mut card = CreatureCard {
        traits: traits.to_vec(),
        ..Default::default()
    };

    for (row, verdict) in rows.iter().zip(verdicts) {
        match verdict.kind {
            RowKind::Noise => {}
            RowKind::BoilerplateAbility { name, text } => {
                card.abilities.insert(name, text);
            }
            RowKind::BoilerplateTrait(tag) => card.traits.push(tag),
            RowKind::StatHeader => read_header(row, symbols, &mut card)?,
            RowKind::WeaknessResistance => read_weak_resist(row, symbols, &mut card)?,
            RowKind::RetreatCost => card.retreat_cost = row.find_all("img").len() as u32,
            RowKind::Attack => card.attacks.push(extract_attack(row, symbols)?),
            RowKind::Ability => {
                let (name, description) = extract_ability(row, symbols)?;
                card.abilities.insert(name, description);
            }
        }
    }

    debug!(
        name = %card.name,
        attacks = card.attacks.len(),
        abilities = card.abilities.len(),
        "extracted creature card"
    );
    Ok((card, warnings))
}

fn bold_text<N: MarkupNode>(node: &N) -> Option<String> {
    node.find("b")
        .map(|b| b.trimmed_text())
        .filter(|name| !name.is_empty())
}

/// Hit points printed as e.g. "60 HP": the text before the 3-character
/// suffix, 0 when nothing precedes it.
pub fn parse_hit_points(text: &str) -> Result<u32, ExtractError> {
    let text = text.trim();
    let keep = text.chars().count().saturating_sub(3);
    let digits: String = text.chars().take(keep).collect();
    let digits = digits.trim();
    if digits.is_empty() {
        return Ok(0);
    }
    digits
        .parse()
        .map_err(|_| ExtractError::malformed(format!("unreadable hit points `{text}`")))
}

fn read_header<N: MarkupNode>(
    row: &N,
    symbols: &SymbolTable,
    card: &mut CreatureCard,
) -> Result<(), ExtractError> {
    let cells = row.cells();
    card.name = cells
        .first()
        .and_then(bold_text)
        .ok_or_else(|| ExtractError::malformed("header row has no name"))?;

    if let Some(hp) = row.find_with_attrs("font", &[("color", "#FF0000")]) {
        card.hit_points = parse_hit_points(&hp.text())?;
    }

    // An unreadable type icon makes the whole header malformed.
    if let Some(types) = cells.last() {
        card.element_types = icon_tokens(types, symbols).map_err(|e| {
            ExtractError::malformed(format!("unknown type icon `{}` in header", e.0))
        })?;
    }
    Ok(())
}

fn read_weak_resist<N: MarkupNode>(
    row: &N,
    symbols: &SymbolTable,
    card: &mut CreatureCard,
) -> Result<(), ExtractError> {
    let cells = row.cells();
    let [_, weak, _, resist, ..] = cells.as_slice() else {
        return Err(ExtractError::malformed(format!(
            "weakness/resistance row has {} cells, expected 4",
            cells.len()
        )));
    };

    let mut modifier = weak.trimmed_text();
    if modifier.is_empty() {
        modifier = DEFAULT_WEAKNESS_MODIFIER.to_string();
    }
    for token in icon_tokens(weak, symbols).map_err(|e| ExtractError::icon(e, "weakness"))? {
        card.weaknesses.insert(token, modifier.clone());
    }

    let modifier = resist.trimmed_text();
    for token in icon_tokens(resist, symbols).map_err(|e| ExtractError::icon(e, "resistance"))? {
        card.resistances.insert(token, modifier.clone());
    }
    Ok(())
}

/// Cell 0 holds the cost icons, cell 1 the bold name optionally followed by
/// a line break and effect text, cell 2 the damage.
pub fn extract_attack<N: MarkupNode>(
    row: &N,
    symbols: &SymbolTable,
) -> Result<Attack, ExtractError> {
    let cells = row.cells();
    let [cost, name_cell, rest @ ..] = cells.as_slice() else {
        return Err(ExtractError::malformed("attack row has no name cell"));
    };

    let energy_cost =
        icon_tokens(cost, symbols).map_err(|e| ExtractError::icon(e, "attack cost"))?;
    let name =
        bold_text(name_cell).ok_or_else(|| ExtractError::malformed("attack row has no name"))?;

    let description = if name_cell.trimmed_text() != name {
        normalize_body(name_cell, symbols)
            .map_err(|e| ExtractError::icon(e, "attack description"))?
    } else {
        String::new()
    };

    let base_damage = rest
        .first()
        .map(|c| c.trimmed_text())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| NO_DAMAGE.to_string());

    Ok(Attack {
        name,
        energy_cost,
        base_damage,
        description,
    })
}

/// Returns `(name, description)`.
///
/// Poké-Power/Poké-Body rows mark cell 0 with an icon or a label starting
/// with "P" and keep name and text together in cell 1. Plain ability rows
/// put the name in cell 0 and the text in cell 1.
pub fn extract_ability<N: MarkupNode>(
    row: &N,
    symbols: &SymbolTable,
) -> Result<(String, String), ExtractError> {
    let cells = row.cells();
    let [label, body, ..] = cells.as_slice() else {
        return Err(ExtractError::malformed("ability row needs two cells"));
    };

    let marked = label.find("img").is_some() || label.trimmed_text().starts_with('P');
    if marked {
        let name =
            bold_text(body).ok_or_else(|| ExtractError::malformed("ability row has no name"))?;
        let text = body.find("font").unwrap_or_else(|| body.clone());
        let description = normalize_body(&text, symbols)
            .map_err(|e| ExtractError::icon(e, "ability description"))?;
        Ok((name, description))
    } else {
        let name = label.trimmed_text();
        let description =
            normalize(body, symbols).map_err(|e| ExtractError::icon(e, "ability description"))?;
        Ok((name, description))
    }
}
