//! Built-in publishing templates
//!
//! `default` is the article style tuned for article platforms that strip
//! stylesheets. `social` and `modern` are layered on top of it and only
//! override the tags they care about.

use super::rules::{StyleRule, Template};

// ─────────────────────────────────────────────────────────────────────────────
// Fixed Declarations
// ─────────────────────────────────────────────────────────────────────────────

/// Reading style set on the root element, identical for every template.
pub const BASE_READING_STYLE: &str = "font-family: -apple-system-font, BlinkMacSystemFont, \"Helvetica Neue\", \"PingFang SC\", \"Hiragino Sans GB\", \"Microsoft YaHei UI\", \"Microsoft YaHei\", Arial, sans-serif; font-size: 15px; line-height: 1.75; color: rgb(63, 63, 63); letter-spacing: 2px; word-wrap: break-word; word-break: break-word; background-color: rgb(255, 255, 255);";

/// Replaces the generic `code` rule for `code` directly inside `pre`.
pub const CODE_BLOCK_STYLE: &str = "font-family: Menlo, \"Operator Mono\", Consolas, Monaco, monospace; font-size: 13px; display: block; padding: 0.5em 1em 1em; overflow-x: auto; line-height: 1.75; white-space: pre-wrap; word-wrap: break-word; color: rgb(201, 209, 217); background: transparent;";

/// Name of the template used when nothing else is selected.
pub const DEFAULT_TEMPLATE: &str = "default";

/// Template given to the first rewrite variant of a new session.
pub const SOCIAL_TEMPLATE: &str = "social";

// ─────────────────────────────────────────────────────────────────────────────
// Rule Tables
// ─────────────────────────────────────────────────────────────────────────────

const DEFAULT_RULES: &[(&str, &str)] = &[
    ("h1", "font-size: 24px; font-weight: bold; margin: 0.6em 0; line-height: 1.4; color: rgb(30, 30, 30); letter-spacing: 2px;"),
    ("h2", "font-size: 17px; font-weight: bold; margin: 0.6em 0; line-height: 1.5; color: rgb(30, 30, 30); letter-spacing: 2px;"),
    ("h3", "font-size: 15px; font-weight: bold; margin: 0.5em 0; line-height: 1.5; color: rgb(30, 30, 30); letter-spacing: 2px;"),
    ("h4", "font-size: 15px; font-weight: bold; margin: 0.4em 0; line-height: 1.5; color: rgb(63, 63, 63); letter-spacing: 2px;"),
    ("h5", "font-size: 15px; font-weight: bold; margin: 0.4em 0; line-height: 1.5; color: rgb(63, 63, 63); letter-spacing: 2px;"),
    ("h6", "font-size: 15px; font-weight: bold; margin: 0.4em 0; line-height: 1.5; color: rgb(99, 99, 99); letter-spacing: 2px;"),
    ("p", "margin: 0px 8px 1em; padding: 0px; line-height: 1.75; color: rgb(63, 63, 63); font-size: 15px; letter-spacing: 2px;"),
    ("section", "margin-left: 8px; margin-right: 8px;"),
    ("strong", "font-weight: bold;"),
    ("b", "font-weight: bold;"),
    ("em", "font-style: italic;"),
    ("i", "font-style: italic;"),
    ("code", "font-family: Menlo, \"Operator Mono\", Consolas, Monaco, monospace; font-size: 13px; background-color: rgba(27, 31, 35, 0.05); padding: 0.2em 0.4em; border-radius: 3px; color: rgb(215, 58, 73);"),
    ("pre", "margin: 0px 8px 10px; display: block; overflow-x: auto; color: rgb(201, 209, 217); background: rgb(13, 17, 23); text-align: left; line-height: 1.5; border-radius: 8px; font-size: 14px;"),
    ("blockquote", "margin: 1em 8px; padding: 0.8em 1em; border-left: 4px solid rgb(220, 220, 220); background-color: rgba(0, 0, 0, 0.03); color: rgb(99, 99, 99);"),
    ("ul", "margin: 1em 8px; padding-left: 1.5em; list-style-type: disc;"),
    ("ol", "margin: 1em 8px; padding-left: 1.5em; list-style-type: decimal;"),
    ("li", "margin: 0.5em 0; line-height: 1.75; color: rgb(63, 63, 63); font-size: 15px; letter-spacing: 2px;"),
    ("table", "margin: 1em 8px; border-collapse: collapse; width: calc(100% - 16px); font-size: 14px;"),
    ("th", "padding: 0.6em 1em; border: 1px solid rgb(229, 229, 229); text-align: left; font-weight: bold; background-color: rgb(248, 248, 248); color: rgb(30, 30, 30);"),
    ("td", "padding: 0.6em 1em; border: 1px solid rgb(229, 229, 229); text-align: left; color: rgb(63, 63, 63);"),
    ("img", "max-width: 100%; height: auto; display: block; margin: 0 auto; border-radius: 9px; box-shadow: rgb(180, 180, 180) 0px 0px 0.5em 0px;"),
    ("a", "color: rgb(0, 128, 255); text-decoration: underline; font-weight: bold;"),
    ("hr", "border-style: solid; border-width: 1px 0 0; border-color: rgba(0, 0, 0, 0.1); transform: scale(1, 0.5); margin: 1em 0;"),
    ("del", "text-decoration: line-through; opacity: 0.7;"),
    ("s", "text-decoration: line-through; opacity: 0.7;"),
    ("u", "text-decoration: underline;"),
    ("mark", "background-color: rgb(255, 243, 205); padding: 0.1em 0.3em; border-radius: 2px;"),
    ("small", "font-size: 12px; color: rgb(99, 99, 99);"),
    ("sub", "font-size: 0.75em; vertical-align: sub;"),
    ("sup", "font-size: 0.75em; vertical-align: super;"),
    ("kbd", "display: inline-block; padding: 3px 6px; font-size: 12px; line-height: 1; color: rgb(68, 77, 86); vertical-align: middle; background-color: rgb(250, 251, 252); border: 1px solid rgb(209, 213, 218); border-radius: 3px; box-shadow: inset 0 -1px 0 rgb(209, 213, 218); font-family: Menlo, Consolas, monospace;"),
];

const SOCIAL_RULES: &[(&str, &str)] = &[
    ("h1", "font-size: 20px; font-weight: bold; color: #000; margin-bottom: 15px;"),
    ("p", "margin-bottom: 12px; font-size: 15px; line-height: 1.8; color: #333;"),
    ("strong", "font-weight: bold; color: #ff2442;"),
    ("blockquote", "background: #f9f9f9; padding: 15px; border-radius: 12px; font-size: 14px; color: #666; margin: 20px 0;"),
];

const MODERN_RULES: &[(&str, &str)] = &[
    ("h1", "font-size: 32px; font-weight: 700; letter-spacing: -0.5px; margin-bottom: 24px; color: #1d1d1f;"),
    ("h3", "font-size: 20px; font-weight: 600; margin-top: 32px; margin-bottom: 12px; color: #1d1d1f;"),
    ("p", "margin-bottom: 16px; line-height: 1.7; color: #424245;"),
    ("ul", "list-style-type: none; padding: 0;"),
    ("li", "padding: 8px 0; border-bottom: 1px solid #f5f5f7;"),
];

fn rules(table: &[(&str, &str)]) -> Vec<StyleRule> {
    table
        .iter()
        .map(|(tag, declarations)| StyleRule::new(*tag, *declarations))
        .collect()
}

/// The built-in templates in display order.
pub fn builtin_templates() -> Vec<Template> {
    let default = Template::new(
        DEFAULT_TEMPLATE,
        "Article style with muted body text and dark code blocks",
        rules(DEFAULT_RULES),
        DEFAULT_STYLESHEET,
    );
    let social = default.layered(
        SOCIAL_TEMPLATE,
        "Compact social post with highlighted emphasis",
        rules(SOCIAL_RULES),
        SOCIAL_STYLESHEET,
    );
    let modern = default.layered(
        "modern",
        "Minimal layout with large headings and divided list items",
        rules(MODERN_RULES),
        MODERN_STYLESHEET,
    );
    vec![default, social, modern]
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview Stylesheets
// ─────────────────────────────────────────────────────────────────────────────

const DEFAULT_STYLESHEET: &str = r#"/* Article style */
.preview-container {
  font-family: -apple-system-font, BlinkMacSystemFont, "Helvetica Neue", "PingFang SC", "Hiragino Sans GB", "Microsoft YaHei UI", "Microsoft YaHei", Arial, sans-serif;
  font-size: 15px;
  color: rgb(63, 63, 63);
  background-color: transparent;
  line-height: 1.75;
  letter-spacing: 2px;
  max-width: 677px;
  margin: 0 auto;
  padding: 40px;
}

/* Paragraphs */
.preview-container p {
  margin: 0px 8px 1em;
  padding: 0px;
  color: rgb(63, 63, 63);
  font-size: 15px;
  letter-spacing: 2px;
  line-height: 1.75;
  text-align: left;
}

/* Headings */
.preview-container h1 { font-size: 24px; font-weight: bold; color: rgb(30, 30, 30); margin: 0.6em 0; line-height: 1.4; }
.preview-container h2 { font-size: 17px; font-weight: bold; color: rgb(30, 30, 30); margin: 0.6em 0; line-height: 1.5; }
.preview-container h3 { font-size: 15px; font-weight: bold; color: rgb(30, 30, 30); margin: 0.5em 0; line-height: 1.5; }
.preview-container h4,
.preview-container h5,
.preview-container h6 { font-size: 15px; font-weight: bold; color: rgb(63, 63, 63); margin: 0.4em 0; line-height: 1.5; }

/* Emphasis */
.preview-container strong,
.preview-container b { font-weight: bold; color: inherit; }
.preview-container em,
.preview-container i { font-style: italic; }
.preview-container del,
.preview-container s { text-decoration: line-through; opacity: 0.7; }

/* Links */
.preview-container a { color: rgb(0, 128, 255); text-decoration: underline; font-weight: bold; }

/* Images */
.preview-container img {
  max-width: 100%;
  height: auto;
  border-radius: 9px;
  box-shadow: rgb(180, 180, 180) 0px 0px 0.5em 0px;
  display: block;
  margin: 0 auto;
}

/* Rules */
.preview-container hr {
  border-style: solid;
  border-width: 1px 0 0;
  border-color: rgba(0, 0, 0, 0.1);
  transform: scale(1, 0.5);
  margin: 1em 0;
}

/* Code blocks */
.preview-container pre {
  margin: 0px 8px 10px;
  display: block;
  overflow-x: auto;
  color: rgb(201, 209, 217);
  background: rgb(13, 17, 23);
  text-align: left;
  line-height: 1.5;
  border-radius: 8px;
  padding: 0px;
  font-size: 14px;
}

.preview-container pre code {
  font-family: Menlo, "Operator Mono", Consolas, Monaco, monospace;
  font-size: 13px;
  display: block;
  padding: 0.5em 1em 1em;
  overflow-x: auto;
  line-height: 1.75;
  color: rgb(201, 209, 217);
  background: transparent;
  white-space: pre-wrap;
  word-wrap: break-word;
}

/* Inline code */
.preview-container code {
  font-family: Menlo, "Operator Mono", Consolas, Monaco, monospace;
  font-size: 13px;
  background-color: rgba(27, 31, 35, 0.05);
  padding: 0.2em 0.4em;
  border-radius: 3px;
  color: rgb(215, 58, 73);
}

/* Quotes */
.preview-container blockquote {
  margin: 1em 8px;
  padding: 0.8em 1em;
  border-left: 4px solid rgb(220, 220, 220);
  background-color: rgba(0, 0, 0, 0.03);
  color: rgb(99, 99, 99);
}

.preview-container blockquote p { margin: 0.5em 0; padding: 0; color: inherit; }

/* Lists */
.preview-container ul { margin: 1em 8px; padding-left: 1.5em; list-style-type: disc; }
.preview-container ol { margin: 1em 8px; padding-left: 1.5em; list-style-type: decimal; }
.preview-container li { margin: 0.5em 0; color: rgb(63, 63, 63); font-size: 15px; letter-spacing: 2px; line-height: 1.75; }

/* Tables */
.preview-container table {
  margin: 1em 8px;
  border-collapse: collapse;
  width: calc(100% - 16px);
  font-size: 14px;
  overflow-x: auto;
  display: block;
}

.preview-container th,
.preview-container td { padding: 0.6em 1em; border: 1px solid rgb(229, 229, 229); text-align: left; }
.preview-container th { font-weight: bold; background-color: rgb(248, 248, 248); color: rgb(30, 30, 30); }
.preview-container td { color: rgb(63, 63, 63); }
"#;

const SOCIAL_STYLESHEET: &str = r#"/* Social post style */
.preview-container {
  padding: 30px;
  line-height: 1.8;
  font-family: "PingFang SC", "Hiragino Sans GB", "Microsoft YaHei", sans-serif;
  color: #333;
  max-width: 450px;
  margin: 0 auto;
  background: #fff;
}
h1 { font-size: 20px; font-weight: bold; color: #000; margin-bottom: 15px; }
p { margin-bottom: 12px; font-size: 15px; }
strong { color: #ff2442; }
blockquote { background: #f9f9f9; padding: 15px; border-radius: 12px; font-size: 14px; color: #666; margin: 20px 0; }
"#;

const MODERN_STYLESHEET: &str = r#"/* Modern minimal style */
.preview-container {
  padding: 40px;
  line-height: 1.7;
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
  color: #1d1d1f;
  max-width: 600px;
  margin: 0 auto;
  background: #fff;
}
h1 { font-size: 32px; font-weight: 700; letter-spacing: -0.5px; margin-bottom: 24px; }
h3 { font-size: 20px; font-weight: 600; margin-top: 32px; margin-bottom: 12px; }
p { margin-bottom: 16px; color: #424245; }
ul { list-style-type: none; padding: 0; }
li { padding: 8px 0; border-bottom: 1px solid #f5f5f7; display: flex; align-items: center; }
li::before { content: "•"; color: #0071e3; margin-right: 12px; font-weight: bold; }
"#;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
