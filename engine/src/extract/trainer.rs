use tracing::debug;

use crate::data::card::TrainerCard;
use crate::error::ExtractError;
use crate::markup::MarkupNode;

use super::config::ExtractConfig;
use super::energy::description_paragraph;
use super::normalize::normalize;

/// Name and description of a trainer card. The subtype is left empty; the
/// caller assigns it from the page's type hint.
pub fn extract_trainer<N: MarkupNode>(
    rows: &[N],
    config: &ExtractConfig,
) -> Result<TrainerCard, ExtractError> {
    let paragraph = description_paragraph(rows, "trainer")?;

    let name = rows[1]
        .find("td")
        .map(|td| td.trimmed_text())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ExtractError::malformed("trainer card has no name"))?;

    let description = normalize(&paragraph, &config.symbols)
        .map_err(|e| ExtractError::icon(e, "trainer description"))?;

    debug!(name = %name, "extracted trainer card");
    Ok(TrainerCard {
        name,
        subtype: Vec::new(),
        description,
    })
}
