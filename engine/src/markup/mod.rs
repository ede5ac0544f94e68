//! Read-only view of a parsed markup tree.
//!
//! The extractors only need a handful of queries: tag name, attribute
//! values, child/descendant enumeration in document order, flattened text and
//! the serialized markup of a node. [`MarkupNode`] captures exactly that,
//! so extraction never depends on how the page was fetched or parsed.

mod html;

pub use html::{HtmlNode, HtmlPage};

/// A node of a parsed markup tree. Only element nodes are exposed; text is
/// reached through [`MarkupNode::text`] and [`MarkupNode::strings`].
pub trait MarkupNode: Clone {
    /// Lower-case tag name.
    fn tag(&self) -> &str;

    fn attr(&self, name: &str) -> Option<&str>;

    /// Child elements, in document order.
    fn children(&self) -> Vec<Self>;

    /// Descendant elements (excluding `self`), in document order.
    fn descendants(&self) -> Vec<Self>;

    /// All descendant text concatenated, untrimmed.
    fn text(&self) -> String;

    /// Descendant text segments, each trimmed, empty ones dropped.
    fn strings(&self) -> Vec<String>;

    /// Serialized markup of this node including its own tags.
    fn outer_markup(&self) -> String;

    /// Descendants with the given tag.
    fn find_all(&self, tag: &str) -> Vec<Self> {
        self.descendants()
            .into_iter()
            .filter(|n| n.tag().eq_ignore_ascii_case(tag))
            .collect()
    }

    /// First descendant with the given tag.
    fn find(&self, tag: &str) -> Option<Self> {
        self.descendants()
            .into_iter()
            .find(|n| n.tag().eq_ignore_ascii_case(tag))
    }

    /// First descendant with the given tag whose attributes all match.
    fn find_with_attrs(&self, tag: &str, attrs: &[(&str, &str)]) -> Option<Self> {
        self.find_all_with_attrs(tag, attrs).into_iter().next()
    }

    /// Descendants with the given tag whose attributes all match.
    fn find_all_with_attrs(&self, tag: &str, attrs: &[(&str, &str)]) -> Vec<Self> {
        self.find_all(tag)
            .into_iter()
            .filter(|n| {
                attrs.iter().all(|(name, value)| {
                    n.attr(name)
                        .is_some_and(|v| v.eq_ignore_ascii_case(value))
                })
            })
            .collect()
    }

    /// Table cells (`td`) below this node.
    fn cells(&self) -> Vec<Self> {
        self.find_all("td")
    }

    /// `text()` with surrounding whitespace removed.
    fn trimmed_text(&self) -> String {
        self.text().trim().to_string()
    }
}
