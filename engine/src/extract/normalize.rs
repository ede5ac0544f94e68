//! Markup-to-text normalization.
//!
//! A description fragment mixes text, inline icon `<img>` nodes and
//! formatting tags. Icons are resolved in document order and substituted
//! positionally into the serialized fragment: the n-th `<img>` tag becomes the
//! n-th token. A global replace would be wrong because the same token can
//! stand for several distinct icon tags. Remaining tags are then stripped.

use crate::data::card::Token;
use crate::error::UnknownIconError;
use crate::markup::MarkupNode;

use super::symbols::SymbolTable;

/// Tokens for every icon below `node`, in document order.
pub fn icon_tokens<N: MarkupNode>(
    node: &N,
    symbols: &SymbolTable,
) -> Result<Vec<Token>, UnknownIconError> {
    node.find_all("img")
        .iter()
        .map(|img| symbols.lookup(img.attr("src").unwrap_or_default()).map(str::to_string))
        .collect()
}

/// Flatten `node` to text with icons replaced by their tokens.
pub fn normalize<N: MarkupNode>(
    node: &N,
    symbols: &SymbolTable,
) -> Result<String, UnknownIconError> {
    let tokens = icon_tokens(node, symbols)?;
    Ok(normalize_markup(&node.outer_markup(), &tokens))
}

/// Like [`normalize`], but only the segment after the first line break.
///
/// Two-part fields (a bold label, `<br>`, then body text) use this so the
/// label is not repeated in the description. Without a break the whole
/// fragment is the body.
pub fn normalize_body<N: MarkupNode>(
    node: &N,
    symbols: &SymbolTable,
) -> Result<String, UnknownIconError> {
    let markup = node.outer_markup();
    let body = skip_header(&markup);
    // Only icons inside the body take part in the substitution.
    let all = icon_tokens(node, symbols)?;
    let skipped = count_icon_tags(&markup) - count_icon_tags(body);
    Ok(normalize_markup(body, &all[skipped.min(all.len())..]))
}

/// Substitute `tokens` for `<img>` tags in order, strip tags, decode the
/// common entities and trim.
pub fn normalize_markup(markup: &str, tokens: &[Token]) -> String {
    let substituted = substitute_icons(markup, tokens);
    decode_entities(&strip_tags(&substituted)).trim().to_string()
}

/// Everything after the first `<br>` tag, or the whole input if there is none.
pub fn skip_header(markup: &str) -> &str {
    let lower = markup.to_ascii_lowercase();
    let Some(start) = lower.find("<br") else {
        return markup;
    };
    match markup[start..].find('>') {
        Some(end) => &markup[start + end + 1..],
        None => markup,
    }
}

fn count_icon_tags(markup: &str) -> usize {
    markup.to_ascii_lowercase().matches("<img").count()
}

fn substitute_icons(markup: &str, tokens: &[Token]) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `markup`.
    let lower = markup.to_ascii_lowercase();
    let mut out = String::with_capacity(markup.len());
    let mut tokens = tokens.iter();
    let mut pos = 0;

    while let Some(rel) = lower[pos..].find("<img") {
        let start = pos + rel;
        let Some(end) = markup[start..].find('>') else {
            break;
        };
        out.push_str(&markup[pos..start]);
        if let Some(token) = tokens.next() {
            out.push_str(token);
        }
        pos = start + end + 1;
    }
    out.push_str(&markup[pos..]);
    out
}

/// Remove markup tags. A `<` only opens a tag when a tag name, `/name` or
/// `!` follows it and a `>` closes it; any other `<` is text.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        match after.find('>') {
            Some(end) if opens_tag(after) => {
                out.push_str(&rest[..start]);
                rest = &after[end + 1..];
            }
            _ => {
                out.push_str(&rest[..=start]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn opens_tag(after_lt: &str) -> bool {
    let name = after_lt.strip_prefix('/').unwrap_or(after_lt);
    name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '!')
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::HtmlPage;

    fn tokens(list: &[&str]) -> Vec<Token> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn substitution_is_positional() {
        let markup = r#"<p>Attach <img src="/card/fire.png"> then <img src="/card/water.png"> and <img src="/card/fire.png">.</p>"#;
        assert_eq!(
            normalize_markup(markup, &tokens(&["R", "W", "R"])),
            "Attach R then W and R."
        );
    }

    #[test]
    fn tags_are_stripped_and_entities_decoded() {
        let markup = "<td> <i>Flip a coin</i> &amp; <b>heal</b><br>20&nbsp;damage. </td>";
        assert_eq!(normalize_markup(markup, &[]), "Flip a coin & heal20 damage.");
    }

    #[test]
    fn lone_angle_brackets_are_text() {
        assert_eq!(strip_tags("Damage < 50 stays"), "Damage < 50 stays");
        assert_eq!(strip_tags("a <= b > c"), "a <= b > c");
        assert_eq!(strip_tags("HP <"), "HP <");
        assert_eq!(strip_tags("x </b> y <!-- c --> z"), "x  y  z");
    }

    #[test]
    fn escaped_comparison_survives_renormalizing() {
        let page = HtmlPage::parse("<p>Does 10 damage if HP &lt; 50.</p>");
        let p = page.root().find("p").unwrap();
        let once = normalize(&p, &SymbolTable::default()).unwrap();
        assert_eq!(once, "Does 10 damage if HP < 50.");
        assert_eq!(normalize_markup(&once, &[]), once);
    }

    #[test]
    fn header_is_skipped_up_to_first_break() {
        assert_eq!(skip_header("<b>Name</b><br>Body<br>More"), "Body<br>More");
        assert_eq!(skip_header("<b>Name</b> only"), "<b>Name</b> only");
    }

    #[test]
    fn body_uses_only_icons_after_the_header() {
        let page = HtmlPage::parse(
            r#"<table><tr><td><b>Energy <img src="/card/grass.png"></b><br>Needs <img src="/card/fire.png"> energy.</td></tr></table>"#,
        );
        let cell = page.root().find("td").unwrap();
        let symbols = SymbolTable::default();
        assert_eq!(normalize_body(&cell, &symbols).unwrap(), "Needs R energy.");
        assert_eq!(normalize(&cell, &symbols).unwrap(), "Energy GNeeds R energy.");
    }

    #[test]
    fn unknown_icon_fails() {
        let page = HtmlPage::parse(r#"<p>Odd <img src="/card/image/nope.png"></p>"#);
        let p = page.root().find("p").unwrap();
        let err = normalize(&p, &SymbolTable::default()).unwrap_err();
        assert_eq!(err.0, "/card/image/nope.png");
    }
}
