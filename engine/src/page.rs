//! Queries against whole serebii.net pages: where the card table is, what
//! type tags a card lists, and the links from index pages to sets and cards.

use crate::error::ExtractError;
use crate::markup::MarkupNode;

const CARD_TABLE: &[(&str, &str)] = &[
    ("width", "100%"),
    ("border", "0"),
    ("cellspacing", "0"),
    ("cellpadding", "5"),
];

const STAR_ICON: &str = "/card/image/star.png";

/// Rows of the card's data table, without its title row.
pub fn card_rows<N: MarkupNode>(page: &N) -> Result<Vec<N>, ExtractError> {
    let table = page
        .find_with_attrs("table", CARD_TABLE)
        .ok_or_else(|| ExtractError::malformed("page has no card table"))?;
    Ok(table.find_all("tr").into_iter().skip(1).collect())
}

/// Type tags listed beside the card (species, "Energy", trainer kinds).
/// Empty when the page lists none.
pub fn type_hint<N: MarkupNode>(page: &N) -> Vec<String> {
    let Some(cell) = page
        .find_with_attrs("td", &[("width", "160")])
        .or_else(|| page.find_with_attrs("td", &[("width", "125")]))
    else {
        return Vec::new();
    };

    cell.find_all("a")
        .iter()
        .filter_map(|link| {
            let strings = link.strings();
            if strings.len() > 1 {
                let star = link
                    .find("img")
                    .and_then(|img| img.attr("src").map(|src| src == STAR_ICON))
                    .unwrap_or(false);
                Some(if star { "Pokémon-star" } else { "Pokémon SP" }.to_string())
            } else {
                strings.first().map(|label| strip_link_label(label))
            }
        })
        .collect()
}

/// Type links read "Cards <tag> Cards"-style; keep the middle.
fn strip_link_label(label: &str) -> String {
    let len = label.chars().count();
    label
        .chars()
        .skip(6)
        .take(len.saturating_sub(12))
        .collect()
}

/// An expansion listed on a set index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionLink {
    pub url: String,
    /// Text segments of the listing row (name, release info...).
    pub labels: Vec<String>,
}

impl ExpansionLink {
    pub fn name(&self) -> &str {
        self.labels.first().map(String::as_str).unwrap_or_default()
    }
}

/// Expansions listed on an index page, in page order.
pub fn expansion_links<N: MarkupNode>(index: &N, base_url: &str) -> Vec<ExpansionLink> {
    let Some(table) = index.find_with_attrs("table", &[("width", "100% border=")]) else {
        return Vec::new();
    };
    table
        .find_all("tr")
        .iter()
        .skip(1)
        .filter_map(|row| {
            let href = row.find("a")?.attr("href")?.to_string();
            Some(ExpansionLink {
                url: format!("{base_url}{href}"),
                labels: row.strings(),
            })
        })
        .collect()
}

/// Links to every card page of an expansion, in page order.
pub fn card_links<N: MarkupNode>(expansion: &N, base_url: &str) -> Vec<String> {
    expansion
        .find_all_with_attrs("td", &[("width", "20%")])
        .iter()
        .skip(1)
        .filter_map(|cell| {
            let href = cell.find("a")?.attr("href")?.to_string();
            Some(format!("{base_url}{href}"))
        })
        .collect()
}
