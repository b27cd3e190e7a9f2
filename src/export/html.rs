//! HTML Export Generation
//!
//! Two outputs are produced from Markdown source:
//!
//! - the preview document: a standalone page whose `<style>` block carries
//!   the template's stylesheet and, last, any user override sheet, so the
//!   browser cascade does the styling;
//! - the inlined fragment: the rendered tree with every declaration written
//!   into `style` attributes, for pasting into hosts that drop stylesheets.

use crate::config::Theme;
use crate::error::{Error, Result};
use crate::inline::inlined;
use crate::inline::node::escape_text;
use crate::markdown::{render_fragment, render_tree};
use crate::style::{OverrideSheet, Template};
use log::info;
use std::fs;
use std::path::Path;

/// Id of the preview container; copy operates on this element's subtree.
pub const PREVIEW_ELEMENT_ID: &str = "formatted-preview";

// ─────────────────────────────────────────────────────────────────────────────
// HTML Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Generate the complete preview document.
///
/// # Arguments
///
/// * `markdown` - The markdown source text
/// * `stylesheet` - Template stylesheet or the document's custom CSS
/// * `override_sheet` - User override sheet, emitted last so it wins
/// * `theme` - Page theme
/// * `title` - Optional document title
pub fn generate_preview_document(
    markdown: &str,
    stylesheet: &str,
    override_sheet: Option<&OverrideSheet>,
    theme: Theme,
    title: Option<&str>,
) -> String {
    let body = render_fragment(markdown);
    let override_css = override_sheet
        .map(|sheet| {
            let source = css_comment_text(&sheet.source_path.display().to_string());
            format!("/* {} */\n{}", source, sheet.css)
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="ContentMorph">
    <title>{title}</title>
    <style>
{theme_css}
{base_css}
{stylesheet}
{override_css}
    </style>
</head>
<body>
    <div id="{id}" class="preview-container">
{body}
    </div>
</body>
</html>"#,
        title = escape_text(title.unwrap_or("Preview")),
        theme_css = generate_theme_css(theme),
        base_css = PREVIEW_BASE_CSS,
        stylesheet = stylesheet,
        override_css = override_css,
        id = PREVIEW_ELEMENT_ID,
        body = body,
    )
}

/// Render `markdown` and inline `template` into it.
///
/// Blank input yields an empty string.
pub fn generate_inlined_fragment(markdown: &str, template: &Template) -> String {
    render_tree(markdown)
        .map(|root| inlined(&root, template).to_html())
        .unwrap_or_default()
}

/// Export a markdown file as an inlined HTML fragment file.
pub fn export_to_html_file(source_path: &Path, output_path: &Path, template: &Template) -> Result<()> {
    let markdown = fs::read_to_string(source_path).map_err(|source| Error::FileRead {
        path: source_path.to_path_buf(),
        source,
    })?;

    write_html_file(output_path, &generate_inlined_fragment(&markdown, template))?;
    info!(
        "Exported {} to {} with template '{}'",
        source_path.display(),
        output_path.display(),
        template.name
    );
    Ok(())
}

/// Write generated HTML to disk.
pub fn write_html_file(output_path: &Path, html: &str) -> Result<()> {
    fs::write(output_path, html).map_err(|source| Error::FileWrite {
        path: output_path.to_path_buf(),
        source,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// CSS Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Layout rules shared by every template's preview.
const PREVIEW_BASE_CSS: &str = r#"
/* Keep images inside the container */
.preview-container img {
    max-width: 100%;
    height: auto;
    border-radius: 8px;
    display: block;
    margin: 1rem 0;
}

/* Left-align content */
.preview-container {
    margin-left: 0 !important;
    margin-right: auto !important;
}
"#;

fn generate_theme_css(theme: Theme) -> String {
    let (background, text) = match theme {
        Theme::Light => ("#ffffff", "#1d1d1f"),
        Theme::Dark => ("#191919", "#d6d6d6"),
    };

    format!(
        r#"
:root {{
    color-scheme: {scheme};
}}

body {{
    margin: 0;
    padding: 32px 24px;
    background-color: {background};
    color: {text};
}}
"#,
        scheme = theme.label(),
        background = background,
        text = text,
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Make `s` safe inside a `/* */` comment in a `<style>` block.
fn css_comment_text(s: &str) -> String {
    s.replace("*/", "* /").replace("</", "< /")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
