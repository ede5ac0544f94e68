use scraper::{ElementRef, Html};

use super::MarkupNode;

/// A parsed HTML page.
pub struct HtmlPage {
    html: Html,
}

impl HtmlPage {
    /// Parse a full page.
    pub fn parse(source: &str) -> Self {
        HtmlPage {
            html: Html::parse_document(source),
        }
    }

    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode(self.html.root_element())
    }
}

/// [`MarkupNode`] over a `scraper` element.
#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a>(pub ElementRef<'a>);

impl<'a> MarkupNode for HtmlNode<'a> {
    fn tag(&self) -> &str {
        self.0.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.0.value().attr(name)
    }

    fn children(&self) -> Vec<Self> {
        self.0
            .children()
            .filter_map(ElementRef::wrap)
            .map(HtmlNode)
            .collect()
    }

    fn descendants(&self) -> Vec<Self> {
        // `descendants()` yields the node itself first.
        self.0
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .map(HtmlNode)
            .collect()
    }

    fn text(&self) -> String {
        self.0.text().collect()
    }

    fn strings(&self) -> Vec<String> {
        self.0
            .text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn outer_markup(&self) -> String {
        self.0.html()
    }
}
