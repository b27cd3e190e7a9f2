//! Markdown to rendered tree, using comrak
//!
//! comrak parses the source into its arena AST; this module walks that AST
//! and builds the owned `Element` tree the inliner works on, producing the
//! same element structure comrak's own HTML renderer would.

use comrak::{
    nodes::{AstNode, ListType, NodeValue, TableAlignment},
    parse_document, Arena, Options,
};

use crate::inline::{Element, RenderedNode};

/// Tag of the container element wrapping a rendered document.
pub const ROOT_TAG: &str = "div";

/// Comment emitted in place of raw HTML when raw HTML is disallowed.
const RAW_HTML_OMITTED: &str = "<!-- raw HTML omitted -->";

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for markdown parsing.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Enable GitHub Flavored Markdown tables
    pub tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub strikethrough: bool,
    /// Enable autolink URLs and emails
    pub autolink: bool,
    /// Enable task lists (- [ ] and - [x])
    pub tasklist: bool,
    /// Enable superscript (^text^)
    pub superscript: bool,
    /// Enable footnotes
    pub footnotes: bool,
    /// Enable front matter (YAML/TOML), which is dropped from output
    pub front_matter_delimiter: Option<String>,
    /// Pass raw HTML from the source through unchanged
    pub allow_raw_html: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
            superscript: false,
            footnotes: true,
            front_matter_delimiter: Some("---".to_string()),
            allow_raw_html: true,
        }
    }
}

impl MarkdownOptions {
    /// Convert to comrak Options.
    fn to_comrak_options(&self) -> Options {
        let mut options = Options::default();

        options.extension.strikethrough = self.strikethrough;
        options.extension.table = self.tables;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;
        options.extension.superscript = self.superscript;
        options.extension.footnotes = self.footnotes;
        options.extension.front_matter_delimiter = self.front_matter_delimiter.clone();

        options
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Render markdown into a tree rooted at a `div` container.
///
/// Returns `None` when the source produces no content at all (blank input),
/// which callers treat as "no document to inline".
pub fn render_tree(markdown: &str) -> Option<Element> {
    render_tree_with_options(markdown, &MarkdownOptions::default())
}

/// Render markdown with custom options.
pub fn render_tree_with_options(markdown: &str, options: &MarkdownOptions) -> Option<Element> {
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &options.to_comrak_options());

    let mut container = Element::new(ROOT_TAG);
    let converter = Converter { options };
    converter.convert_children(root, &Context::default(), &mut container.children);

    if container.children.is_empty() {
        None
    } else {
        Some(container)
    }
}

/// Render markdown straight to an (un-inlined) HTML fragment.
pub fn render_fragment(markdown: &str) -> String {
    render_tree(markdown)
        .map(|root| root.inner_html())
        .unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// State threaded down the AST walk.
#[derive(Debug, Clone, Default)]
struct Context {
    /// Paragraphs directly inside items of a tight list render without `<p>`
    tight_list: bool,
    /// Column alignments of the enclosing table
    alignments: Vec<TableAlignment>,
    /// Whether the enclosing table row is the header row
    header_row: bool,
}

struct Converter<'o> {
    options: &'o MarkdownOptions,
}

impl Converter<'_> {
    fn convert_children<'a>(
        &self,
        node: &'a AstNode<'a>,
        ctx: &Context,
        out: &mut Vec<RenderedNode>,
    ) {
        for child in node.children() {
            self.convert_node(child, ctx, out);
        }
    }

    /// Convert one comrak node, pushing zero or more rendered nodes.
    fn convert_node<'a>(&self, node: &'a AstNode<'a>, ctx: &Context, out: &mut Vec<RenderedNode>) {
        let value = node.data.borrow().value.clone();

        let element = match value {
            NodeValue::Document => {
                self.convert_children(node, ctx, out);
                return;
            }
            NodeValue::FrontMatter(_) => return,
            NodeValue::BlockQuote => self.wrap(node, "blockquote", &Context::default()),
            NodeValue::List(list) => {
                let mut element = match list.list_type {
                    ListType::Bullet => Element::new("ul"),
                    ListType::Ordered => {
                        let mut ol = Element::new("ol");
                        if list.start != 1 {
                            ol.set_attribute("start", list.start.to_string());
                        }
                        ol
                    }
                };
                let inner = Context {
                    tight_list: list.tight,
                    ..Context::default()
                };
                self.convert_children(node, &inner, &mut element.children);
                element
            }
            NodeValue::Item(_) => self.wrap(node, "li", ctx),
            NodeValue::TaskItem(symbol) => {
                let mut checkbox = Element::new("input")
                    .with_attribute("type", "checkbox")
                    .with_attribute("disabled", "");
                if symbol.map(|c| c == 'x' || c == 'X').unwrap_or(false) {
                    checkbox.set_attribute("checked", "");
                }
                let mut li = Element::new("li").with_child(checkbox).with_text(" ");
                self.convert_children(node, ctx, &mut li.children);
                li
            }
            NodeValue::Paragraph => {
                if ctx.tight_list && is_in_list_item(node) {
                    self.convert_children(node, &Context::default(), out);
                    return;
                }
                self.wrap(node, "p", &Context::default())
            }
            NodeValue::Heading(heading) => {
                self.wrap(node, &format!("h{}", heading.level.clamp(1, 6)), ctx)
            }
            NodeValue::CodeBlock(code) => {
                let mut code_element = Element::new("code");
                if let Some(language) = code.info.split_whitespace().next() {
                    code_element.set_attribute("class", format!("language-{}", language));
                }
                Element::new("pre").with_child(code_element.with_text(code.literal))
            }
            NodeValue::HtmlBlock(html) => {
                out.push(self.raw(html.literal));
                return;
            }
            NodeValue::HtmlInline(html) => {
                out.push(self.raw(html));
                return;
            }
            NodeValue::ThematicBreak => Element::new("hr"),
            NodeValue::Table(table) => self.convert_table(node, table.alignments),
            NodeValue::TableRow(header) => {
                let inner = Context {
                    header_row: header,
                    ..ctx.clone()
                };
                self.wrap(node, "tr", &inner)
            }
            NodeValue::TableCell => {
                let column = node.preceding_siblings().count().saturating_sub(1);
                let tag = if ctx.header_row { "th" } else { "td" };
                let mut cell = self.wrap(node, tag, &Context::default());
                match ctx.alignments.get(column) {
                    Some(TableAlignment::Left) => cell.set_attribute("align", "left"),
                    Some(TableAlignment::Center) => cell.set_attribute("align", "center"),
                    Some(TableAlignment::Right) => cell.set_attribute("align", "right"),
                    _ => {}
                }
                cell
            }
            NodeValue::Text(text) => {
                out.push(RenderedNode::Text(text));
                return;
            }
            NodeValue::SoftBreak => {
                out.push(RenderedNode::Text("\n".to_string()));
                return;
            }
            NodeValue::LineBreak => {
                out.push(Element::new("br").into());
                out.push(RenderedNode::Text("\n".to_string()));
                return;
            }
            NodeValue::Code(code) => Element::new("code").with_text(code.literal),
            NodeValue::Emph => self.wrap(node, "em", ctx),
            NodeValue::Strong => self.wrap(node, "strong", ctx),
            NodeValue::Strikethrough => self.wrap(node, "del", ctx),
            NodeValue::Superscript => self.wrap(node, "sup", ctx),
            NodeValue::Link(link) => {
                let mut a = Element::new("a").with_attribute("href", link.url);
                if !link.title.is_empty() {
                    a.set_attribute("title", link.title);
                }
                self.convert_children(node, ctx, &mut a.children);
                a
            }
            NodeValue::Image(link) => {
                let mut alt = Element::new("span");
                self.convert_children(node, ctx, &mut alt.children);
                let mut img = Element::new("img")
                    .with_attribute("src", link.url)
                    .with_attribute("alt", alt.text_content());
                if !link.title.is_empty() {
                    img.set_attribute("title", link.title);
                }
                img
            }
            NodeValue::FootnoteReference(reference) => Element::new("sup").with_child(
                Element::new("a")
                    .with_attribute("href", format!("#fn-{}", reference.name))
                    .with_text(reference.name),
            ),
            NodeValue::FootnoteDefinition(definition) => {
                let mut element =
                    Element::new("div").with_attribute("id", format!("fn-{}", definition.name));
                self.convert_children(node, &Context::default(), &mut element.children);
                element
            }
            // Node kinds without a dedicated element keep their content
            _ => {
                self.convert_children(node, ctx, out);
                return;
            }
        };

        out.push(element.into());
    }

    fn wrap<'a>(&self, node: &'a AstNode<'a>, tag: &str, ctx: &Context) -> Element {
        let mut element = Element::new(tag);
        self.convert_children(node, ctx, &mut element.children);
        element
    }

    fn convert_table<'a>(&self, node: &'a AstNode<'a>, alignments: Vec<TableAlignment>) -> Element {
        let ctx = Context {
            alignments,
            ..Context::default()
        };
        let mut thead = Element::new("thead");
        let mut tbody = Element::new("tbody");

        for row in node.children() {
            let is_header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
            let target = if is_header { &mut thead } else { &mut tbody };
            self.convert_node(row, &ctx, &mut target.children);
        }

        let mut table = Element::new("table");
        if !thead.children.is_empty() {
            table.children.push(thead.into());
        }
        if !tbody.children.is_empty() {
            table.children.push(tbody.into());
        }
        table
    }

    fn raw(&self, html: String) -> RenderedNode {
        if self.options.allow_raw_html {
            RenderedNode::Raw(html)
        } else {
            RenderedNode::Raw(RAW_HTML_OMITTED.to_string())
        }
    }
}

fn is_in_list_item<'a>(node: &'a AstNode<'a>) -> bool {
    node.parent()
        .map(|parent| {
            matches!(
                parent.data.borrow().value,
                NodeValue::Item(_) | NodeValue::TaskItem(_)
            )
        })
        .unwrap_or(false)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tags(root: &Element) -> Vec<&str> {
        root.child_elements().map(|e| e.tag.as_str()).collect()
    }

    #[test]
    fn test_blank_document_has_no_root() {
        assert!(render_tree("").is_none());
        assert!(render_tree("   \n\n").is_none());
    }

    #[test]
    fn test_heading_and_paragraph() {
        let root = render_tree("# Title\n\nBody").unwrap();
        assert_eq!(root.tag, ROOT_TAG);
        assert_eq!(tags(&root), vec!["h1", "p"]);
        assert_eq!(root.inner_html(), "<h1>Title</h1><p>Body</p>");
    }

    #[test]
    fn test_heading_levels() {
        let root = render_tree("## Two\n\n###### Six").unwrap();
        assert_eq!(tags(&root), vec!["h2", "h6"]);
    }

    #[test]
    fn test_fenced_code_block() {
        let root = render_tree("```rust\nlet x = 1;\n```").unwrap();
        assert_eq!(
            root.inner_html(),
            "<pre><code class=\"language-rust\">let x = 1;\n</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_block_without_info() {
        let root = render_tree("```\nx=1\n```").unwrap();
        assert_eq!(root.inner_html(), "<pre><code>x=1\n</code></pre>");
    }

    #[test]
    fn test_inline_formatting() {
        let root = render_tree("Use **bold**, *it*, `code` and ~~gone~~").unwrap();
        assert_eq!(
            root.inner_html(),
            "<p>Use <strong>bold</strong>, <em>it</em>, <code>code</code> and <del>gone</del></p>"
        );
    }

    #[test]
    fn test_tight_list_items_have_no_paragraphs() {
        let root = render_tree("- one\n- two").unwrap();
        assert_eq!(root.inner_html(), "<ul><li>one</li><li>two</li></ul>");
    }

    #[test]
    fn test_loose_list_items_keep_paragraphs() {
        let root = render_tree("- one\n\n- two").unwrap();
        assert_eq!(
            root.inner_html(),
            "<ul><li><p>one</p></li><li><p>two</p></li></ul>"
        );
    }

    #[test]
    fn test_ordered_list_start() {
        let root = render_tree("3. three\n4. four").unwrap();
        let ol = root.child_elements().next().unwrap();
        assert_eq!(ol.tag, "ol");
        assert_eq!(ol.attribute("start"), Some("3"));
    }

    #[test]
    fn test_task_list_checkboxes() {
        let root = render_tree("- [ ] open\n- [x] done").unwrap();
        let inputs = root.find_all("input");
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].attribute("checked"), None);
        assert_eq!(inputs[1].attribute("checked"), Some(""));
    }

    #[test]
    fn test_table_structure_and_alignment() {
        let root = render_tree("| L | R |\n|:--|--:|\n| a | b |").unwrap();
        let table = root.child_elements().next().unwrap();
        assert_eq!(tags(table), vec!["thead", "tbody"]);

        let headers = root.find_all("th");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].attribute("align"), Some("left"));
        assert_eq!(headers[1].attribute("align"), Some("right"));

        let cells = root.find_all("td");
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1].text_content(), "b");
    }

    #[test]
    fn test_link_and_image() {
        let root = render_tree("[site](https://example.com \"Home\") ![logo](a.png)").unwrap();
        let a = root.find_all("a")[0];
        assert_eq!(a.attribute("href"), Some("https://example.com"));
        assert_eq!(a.attribute("title"), Some("Home"));

        let img = root.find_all("img")[0];
        assert_eq!(img.attribute("src"), Some("a.png"));
        assert_eq!(img.attribute("alt"), Some("logo"));
    }

    #[test]
    fn test_blockquote_and_rule() {
        let root = render_tree("> quoted\n\n---").unwrap();
        assert_eq!(tags(&root), vec!["blockquote", "hr"]);
        assert_eq!(root.find_all("p").len(), 1);
    }

    #[test]
    fn test_raw_html_passthrough() {
        let root = render_tree("Press <kbd>Ctrl</kbd> now").unwrap();
        assert_eq!(root.inner_html(), "<p>Press <kbd>Ctrl</kbd> now</p>");
    }

    #[test]
    fn test_raw_html_omitted_when_disallowed() {
        let options = MarkdownOptions {
            allow_raw_html: false,
            ..MarkdownOptions::default()
        };
        let root = render_tree_with_options("<div>x</div>", &options).unwrap();
        assert_eq!(root.inner_html(), RAW_HTML_OMITTED);
    }

    #[test]
    fn test_front_matter_is_dropped() {
        let root = render_tree("---\ntitle: x\n---\n\nBody").unwrap();
        assert_eq!(tags(&root), vec!["p"]);
    }

    #[test]
    fn test_text_is_escaped_on_output() {
        assert_eq!(render_fragment("a < b & c"), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_hard_line_break() {
        let root = render_tree("one  \ntwo").unwrap();
        assert_eq!(root.inner_html(), "<p>one<br />\ntwo</p>");
    }

    #[test]
    fn test_malformed_markdown_does_not_panic() {
        let inputs = [
            "# Unclosed heading",
            "```\nunclosed code block",
            "| broken | table",
            "[unclosed link(",
            "![broken image",
            "***nested emphasis**",
        ];
        for input in inputs {
            assert!(render_tree(input).is_some(), "Failed to render: {}", input);
        }
    }
}
