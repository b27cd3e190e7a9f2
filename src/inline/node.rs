//! Rendered markup tree
//!
//! A small owned element tree standing between the Markdown parser and the
//! HTML text that ends up on the clipboard. Each render pass builds a fresh
//! tree; nothing here is retained once a copy or export finishes.

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input"];

// ─────────────────────────────────────────────────────────────────────────────
// Node Types
// ─────────────────────────────────────────────────────────────────────────────

/// A node in the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedNode {
    /// A structural element such as `p`, `h1` or `code`
    Element(Element),
    /// Text content, escaped on serialization
    Text(String),
    /// Raw markup passed through verbatim (inline or block HTML from the source)
    Raw(String),
}

/// An element with a tag, ordered attributes and owned children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name
    pub tag: String,
    /// Attributes in source order
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order
    pub children: Vec<RenderedNode>,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: impl Into<RenderedNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Builder-style text child append.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(RenderedNode::Text(text.into()))
    }

    /// Get an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any existing value in place.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// The current inline style, or an empty string when absent.
    pub fn style(&self) -> &str {
        self.attribute("style").unwrap_or("")
    }

    /// Replace the inline style.
    pub fn set_style(&mut self, declarations: impl Into<String>) {
        self.set_attribute("style", declarations);
    }

    /// Append declarations after the current inline style.
    ///
    /// This is a plain string append: `current + " " + declarations`. Repeated
    /// properties are resolved by the renderer (last declaration wins).
    pub fn append_style(&mut self, declarations: &str) {
        let merged = format!("{} {}", self.style(), declarations);
        self.set_style(merged);
    }

    /// Child elements only, skipping text and raw nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(RenderedNode::as_element)
    }

    /// All descendant elements with the given tag, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_by_tag(tag, &mut found);
        found
    }

    fn collect_by_tag<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if child.tag == tag {
                found.push(child);
            }
            child.collect_by_tag(tag, found);
        }
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, output: &mut String) {
        for child in &self.children {
            match child {
                RenderedNode::Text(text) => output.push_str(text),
                RenderedNode::Element(element) => {
                    if element.tag == "br" {
                        output.push('\n');
                    }
                    element.collect_text(output);
                    if is_block_tag(&element.tag) && !output.ends_with('\n') {
                        output.push('\n');
                    }
                }
                RenderedNode::Raw(_) => {}
            }
        }
    }

    /// Serialize this element and its subtree to HTML.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        self.write_html(&mut html);
        html
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            out.push_str(" />");
            return;
        }

        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }

    /// Serialize only the children, without this element's own tags.
    pub fn inner_html(&self) -> String {
        let mut html = String::new();
        for child in &self.children {
            child.write_html(&mut html);
        }
        html
    }
}

impl RenderedNode {
    /// Serialize this node to HTML.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        self.write_html(&mut html);
        html
    }

    fn write_html(&self, out: &mut String) {
        match self {
            RenderedNode::Element(element) => element.write_html(out),
            RenderedNode::Text(text) => out.push_str(&escape_text(text)),
            RenderedNode::Raw(raw) => out.push_str(raw),
        }
    }

    /// Borrow the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            RenderedNode::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<Element> for RenderedNode {
    fn from(element: Element) -> Self {
        RenderedNode::Element(element)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility Functions
// ─────────────────────────────────────────────────────────────────────────────

fn is_block_tag(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "li"
            | "pre"
            | "blockquote"
            | "tr"
            | "hr"
            | "div"
            | "section"
            | "dt"
            | "dd"
    )
}

/// Escape text content.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value for use inside double quotes.
pub fn escape_attribute(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_defaults_to_empty() {
        let element = Element::new("p");
        assert_eq!(element.style(), "");
    }

    #[test]
    fn test_append_style_keeps_existing_text_first() {
        let mut element = Element::new("p").with_attribute("style", "color: red;");
        element.append_style("margin: 0;");
        assert_eq!(element.style(), "color: red; margin: 0;");
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut element = Element::new("a")
            .with_attribute("href", "/one")
            .with_attribute("title", "t");
        element.set_attribute("href", "/two");
        assert_eq!(
            element.attributes,
            vec![
                ("href".to_string(), "/two".to_string()),
                ("title".to_string(), "t".to_string())
            ]
        );
    }

    #[test]
    fn test_serialize_escapes_text_and_attributes() {
        let element = Element::new("a")
            .with_attribute("title", "say \"hi\" & <go>")
            .with_text("1 < 2 & 3 > 2");
        assert_eq!(
            element.to_html(),
            "<a title=\"say &quot;hi&quot; &amp; &lt;go&gt;\">1 &lt; 2 &amp; 3 &gt; 2</a>"
        );
    }

    #[test]
    fn test_serialize_void_elements() {
        let element = Element::new("p")
            .with_text("line")
            .with_child(Element::new("br"))
            .with_child(Element::new("img").with_attribute("src", "a.png"));
        assert_eq!(element.to_html(), "<p>line<br /><img src=\"a.png\" /></p>");
    }

    #[test]
    fn test_raw_nodes_pass_through() {
        let element = Element::new("p").with_child(RenderedNode::Raw("<kbd>Ctrl</kbd>".into()));
        assert_eq!(element.to_html(), "<p><kbd>Ctrl</kbd></p>");
        assert_eq!(element.inner_html(), "<kbd>Ctrl</kbd>");
    }

    #[test]
    fn test_child_elements_skip_text_and_raw() {
        let element = Element::new("p")
            .with_text("lead ")
            .with_child(Element::new("em").with_text("x"))
            .with_child(RenderedNode::Raw("<br>".into()))
            .with_child(Element::new("code"));

        let tags: Vec<&str> = element.child_elements().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["em", "code"]);
    }

    #[test]
    fn test_find_all_in_document_order() {
        let root = Element::new("div")
            .with_child(Element::new("p").with_text("a"))
            .with_child(
                Element::new("blockquote").with_child(Element::new("p").with_text("b")),
            )
            .with_child(Element::new("p").with_text("c"));

        let texts: Vec<String> = root.find_all("p").iter().map(|p| p.text_content()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_text_content_separates_blocks() {
        let root = Element::new("div")
            .with_child(Element::new("h1").with_text("Title"))
            .with_child(
                Element::new("p")
                    .with_text("Body ")
                    .with_child(Element::new("strong").with_text("bold")),
            );
        assert_eq!(root.text_content(), "Title\nBody bold\n");
    }
}
