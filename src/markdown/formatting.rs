//! Markdown Formatting Operations
//!
//! Toolbar-style insertion commands for the source editor. A command either
//! wraps the current selection or, with nothing selected, inserts a
//! placeholder and places the cursor on it.
//!
//! # Usage
//! ```ignore
//! use contentmorph::markdown::formatting::{apply_format, FormatCommand};
//!
//! let result = apply_format("Hello world", Some((0, 5)), FormatCommand::Bold);
//! assert_eq!(result.text, "**Hello** world");
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Format Command Enum
// ─────────────────────────────────────────────────────────────────────────────

/// Formatting commands that can be applied to source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    /// Heading level 1-3
    Heading(u8),
    /// Bold text (**text**)
    Bold,
    /// Italic text (*text*)
    Italic,
    /// Strikethrough (~~text~~)
    Strikethrough,
    /// Blockquote (> text)
    Blockquote,
    /// Inline code (`code`)
    InlineCode,
    /// Fenced code block
    CodeBlock,
    /// Bullet list item
    BulletList,
    /// Numbered list item
    NumberedList,
    /// Task list item
    TaskList,
    /// Link ([text](url))
    Link,
    /// Image (![alt](url))
    Image,
    /// Table skeleton
    Table,
    /// Horizontal rule
    HorizontalRule,
}

impl FormatCommand {
    /// Parse a command name as used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name.to_ascii_lowercase().as_str() {
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "strikethrough" => Self::Strikethrough,
            "quote" => Self::Blockquote,
            "code" => Self::InlineCode,
            "codeblock" => Self::CodeBlock,
            "ul" => Self::BulletList,
            "ol" => Self::NumberedList,
            "task" => Self::TaskList,
            "link" => Self::Link,
            "image" => Self::Image,
            "table" => Self::Table,
            "hr" => Self::HorizontalRule,
            _ => return None,
        };
        Some(command)
    }

    /// Wrap selected text.
    fn wrap(&self, selected: &str) -> String {
        match self {
            Self::Heading(level) => format!("{} {}", heading_marker(*level), selected),
            Self::Bold => format!("**{}**", selected),
            Self::Italic => format!("*{}*", selected),
            Self::Strikethrough => format!("~~{}~~", selected),
            Self::Blockquote => format!("> {}", selected),
            Self::InlineCode => format!("`{}`", selected),
            Self::CodeBlock => format!("```\n{}\n```", selected),
            Self::BulletList => format!("- {}", selected),
            Self::NumberedList => format!("1. {}", selected),
            Self::TaskList => format!("- [ ] {}", selected),
            Self::Link => format!("[{}](url)", selected),
            Self::Image => format!("![{}](url)", selected),
            Self::Table | Self::HorizontalRule => self.placeholder().0,
        }
    }

    /// Text inserted with no selection, and the byte range of the part the
    /// user is expected to overwrite.
    fn placeholder(&self) -> (String, usize, usize) {
        let (text, offset, len) = match self {
            Self::Heading(level) => {
                let marker = heading_marker(*level);
                return (
                    format!("{} Heading", marker),
                    marker.len() + 1,
                    "Heading".len(),
                );
            }
            Self::Bold => ("**bold text**", 2, 9),
            Self::Italic => ("*italic text*", 1, 11),
            Self::Strikethrough => ("~~struck text~~", 2, 11),
            Self::Blockquote => ("> quoted text", 2, 11),
            Self::InlineCode => ("`code`", 1, 4),
            Self::CodeBlock => ("```javascript\ncode block\n```", 14, 10),
            Self::BulletList => ("- list item", 2, 9),
            Self::NumberedList => ("1. list item", 3, 9),
            Self::TaskList => ("- [ ] task item", 6, 9),
            Self::Link => ("[link text](https://example.com)", 1, 9),
            Self::Image => ("![image description](https://example.com/image.jpg)", 2, 17),
            Self::Table => (
                "| Column 1 | Column 2 | Column 3 |\n|----------|----------|----------|\n| Cell | Cell | Cell |",
                2,
                8,
            ),
            Self::HorizontalRule => ("\n---\n", 5, 0),
        };
        (text.to_string(), offset, len)
    }
}

fn heading_marker(level: u8) -> String {
    "#".repeat(level.clamp(1, 6) as usize)
}

// ─────────────────────────────────────────────────────────────────────────────
// Format Result
// ─────────────────────────────────────────────────────────────────────────────

/// Result of applying a formatting command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatResult {
    /// The new text after formatting
    pub text: String,
    /// New cursor position (byte offset)
    pub cursor: usize,
    /// Placeholder range to select, when a placeholder was inserted
    pub selection: Option<(usize, usize)>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Apply
// ─────────────────────────────────────────────────────────────────────────────

/// Apply `command` to `text` at `selection` (byte offsets, start..end).
///
/// With a non-empty selection the selected text is wrapped and the cursor
/// lands after the inserted markup. With an empty or missing selection a
/// placeholder is inserted at the cursor and selected. Offsets that fall
/// inside a multi-byte character are moved to the nearest boundary.
pub fn apply_format(
    text: &str,
    selection: Option<(usize, usize)>,
    command: FormatCommand,
) -> FormatResult {
    let (start, end) = match selection {
        Some((a, b)) => {
            let (a, b) = if a <= b { (a, b) } else { (b, a) };
            (floor_char_boundary(text, a), ceil_char_boundary(text, b))
        }
        None => (text.len(), text.len()),
    };

    let before = &text[..start];
    let selected = &text[start..end];
    let after = &text[end..];

    if selected.is_empty() {
        let (insert, offset, len) = command.placeholder();
        let cursor = start + offset;
        return FormatResult {
            text: format!("{}{}{}", before, insert, after),
            cursor,
            selection: if len > 0 { Some((cursor, cursor + len)) } else { None },
        };
    }

    let insert = command.wrap(selected);
    FormatResult {
        cursor: start + insert.len(),
        text: format!("{}{}{}", before, insert, after),
        selection: None,
    }
}

/// Largest char boundary at or below `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest char boundary at or above `index`.
fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_wraps_selection() {
        let result = apply_format("Hello world", Some((0, 5)), FormatCommand::Bold);
        assert_eq!(result.text, "**Hello** world");
        assert_eq!(result.cursor, 9);
        assert_eq!(result.selection, None);
    }

    #[test]
    fn test_reversed_selection_is_normalized() {
        let result = apply_format("Hello world", Some((5, 0)), FormatCommand::Italic);
        assert_eq!(result.text, "*Hello* world");
    }

    #[test]
    fn test_placeholder_inserted_at_cursor() {
        let result = apply_format("ab", Some((1, 1)), FormatCommand::Bold);
        assert_eq!(result.text, "a**bold text**b");
        assert_eq!(result.cursor, 3);
        assert_eq!(result.selection, Some((3, 12)));
        assert_eq!(&result.text[3..12], "bold text");
    }

    #[test]
    fn test_no_selection_appends_to_end() {
        let result = apply_format("Intro\n", None, FormatCommand::BulletList);
        assert_eq!(result.text, "Intro\n- list item");
    }

    #[test]
    fn test_heading_levels() {
        let result = apply_format("Title", Some((0, 5)), FormatCommand::Heading(2));
        assert_eq!(result.text, "## Title");

        let result = apply_format("", None, FormatCommand::Heading(3));
        assert_eq!(result.text, "### Heading");
        assert_eq!(result.selection, Some((4, 11)));
    }

    #[test]
    fn test_code_block_wraps_lines() {
        let result = apply_format("x = 1", Some((0, 5)), FormatCommand::CodeBlock);
        assert_eq!(result.text, "```\nx = 1\n```");
    }

    #[test]
    fn test_link_with_selection() {
        let result = apply_format("see docs", Some((4, 8)), FormatCommand::Link);
        assert_eq!(result.text, "see [docs](url)");
    }

    #[test]
    fn test_placeholder_ranges_point_at_placeholder_text() {
        let commands = [
            (FormatCommand::Italic, "italic text"),
            (FormatCommand::Strikethrough, "struck text"),
            (FormatCommand::Blockquote, "quoted text"),
            (FormatCommand::InlineCode, "code"),
            (FormatCommand::CodeBlock, "code block"),
            (FormatCommand::NumberedList, "list item"),
            (FormatCommand::TaskList, "task item"),
            (FormatCommand::Link, "link text"),
            (FormatCommand::Image, "image description"),
            (FormatCommand::Table, "Column 1"),
        ];
        for (command, expected) in commands {
            let result = apply_format("", None, command);
            let (a, b) = result.selection.expect("placeholder selection");
            assert_eq!(&result.text[a..b], expected, "{:?}", command);
        }
    }

    #[test]
    fn test_horizontal_rule_has_no_selection() {
        let result = apply_format("a", None, FormatCommand::HorizontalRule);
        assert_eq!(result.text, "a\n---\n");
        assert_eq!(result.cursor, 6);
        assert_eq!(result.selection, None);
    }

    #[test]
    fn test_multibyte_selection_is_clamped() {
        // 'é' is two bytes; offsets 1..2 fall inside it.
        let text = "é!";
        let result = apply_format(text, Some((1, 2)), FormatCommand::Bold);
        assert_eq!(result.text, "**é**!");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(FormatCommand::from_name("H2"), Some(FormatCommand::Heading(2)));
        assert_eq!(FormatCommand::from_name("task"), Some(FormatCommand::TaskList));
        assert_eq!(FormatCommand::from_name("blink"), None);
    }
}
