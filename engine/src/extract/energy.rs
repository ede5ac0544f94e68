use tracing::debug;

use crate::data::card::EnergyCard;
use crate::error::ExtractError;
use crate::markup::MarkupNode;

use super::config::ExtractConfig;
use super::normalize::normalize;

/// Row holding the bold name and the italic "special" annotation.
const NAME_ROW: usize = 1;
/// Row holding the description paragraph.
const TEXT_ROW: usize = 3;

/// Paragraph of the fixed description row, shared with trainer cards.
pub(crate) fn description_paragraph<N: MarkupNode>(
    rows: &[N],
    kind: &str,
) -> Result<N, ExtractError> {
    rows.get(TEXT_ROW)
        .ok_or_else(|| {
            ExtractError::malformed(format!("{kind} card has {} rows, expected 4", rows.len()))
        })?
        .find("p")
        .ok_or_else(|| ExtractError::malformed(format!("{kind} card has no description")))
}

pub fn extract_energy<N: MarkupNode>(
    rows: &[N],
    config: &ExtractConfig,
) -> Result<EnergyCard, ExtractError> {
    let paragraph = description_paragraph(rows, "energy")?;
    let name_row = &rows[NAME_ROW];

    let mut name = name_row
        .find("b")
        .map(|b| b.trimmed_text())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ExtractError::malformed("energy card has no name"))?;
    if !name.ends_with("Energy") {
        name.push_str(" Energy");
    }

    let is_basic = name_row
        .find("i")
        .map_or(true, |i| i.trimmed_text().is_empty());

    let description = normalize(&paragraph, &config.symbols)
        .map_err(|e| ExtractError::icon(e, "energy description"))?;

    debug!(name = %name, is_basic, "extracted energy card");
    Ok(EnergyCard {
        name,
        is_basic,
        description,
    })
}
