//! Style inlining
//!
//! Copies a template's declarations into each element's own `style`
//! attribute so the result survives hosts that discard `<style>` blocks and
//! classes.
//!
//! The walk is a single top-down recursion that carries the parent's tag,
//! which is all the structural context the `pre > code` case needs.
//!
//! Inlining is not idempotent: running it twice over the same tree appends
//! every rule a second time. Callers always inline a freshly rendered tree.

use super::node::{Element, RenderedNode};
use crate::style::templates::{BASE_READING_STYLE, CODE_BLOCK_STYLE};
use crate::style::Template;

const INLINE_CODE_TAG: &str = "code";
const PREFORMATTED_TAG: &str = "pre";

/// Inline `template` into the tree rooted at `root`, in place.
///
/// The root receives the base reading style; every descendant element whose
/// tag the template styles gets that rule appended to its current style.
pub fn inline_tree(root: &mut Element, template: &Template) {
    root.set_style(BASE_READING_STYLE);
    inline_children(root, template);
}

/// Inline into a copy of the tree, leaving `root` untouched.
pub fn inlined(root: &Element, template: &Template) -> Element {
    let mut copy = root.clone();
    inline_tree(&mut copy, template);
    copy
}

fn inline_children(parent: &mut Element, template: &Template) {
    let parent_tag = parent.tag.clone();
    for child in &mut parent.children {
        if let RenderedNode::Element(element) = child {
            apply_rule(element, &parent_tag, template);
            inline_children(element, template);
        }
    }
}

fn apply_rule(element: &mut Element, parent_tag: &str, template: &Template) {
    if element.tag == INLINE_CODE_TAG && parent_tag == PREFORMATTED_TAG {
        element.set_style(CODE_BLOCK_STYLE);
        return;
    }

    if let Some(declarations) = template.declarations_for(&element.tag) {
        element.append_style(declarations);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::parser::render_tree;
    use crate::style::{StyleRule, TemplateRegistry};
    use pretty_assertions::assert_eq;

    fn template(name: &str) -> Template {
        TemplateRegistry::builtin().get(name).unwrap().clone()
    }

    fn first<'a>(root: &'a Element, tag: &str) -> &'a Element {
        root.find_all(tag)
            .into_iter()
            .next()
            .unwrap_or_else(|| panic!("no <{}> in tree", tag))
    }

    #[test]
    fn test_heading_and_paragraph_get_default_rules() {
        let default = template("default");
        let mut root = render_tree("# Title\n\nBody").unwrap();
        inline_tree(&mut root, &default);

        assert!(first(&root, "h1")
            .style()
            .ends_with(default.declarations_for("h1").unwrap()));
        assert!(first(&root, "p")
            .style()
            .ends_with(default.declarations_for("p").unwrap()));
    }

    #[test]
    fn test_rule_is_appended_after_existing_style() {
        let default = template("default");
        let mut root = Element::new("div")
            .with_child(Element::new("p").with_attribute("style", "color: red;").with_text("x"));
        inline_tree(&mut root, &default);

        let expected = format!("color: red; {}", default.declarations_for("p").unwrap());
        assert_eq!(first(&root, "p").style(), expected);
    }

    #[test]
    fn test_append_to_missing_style_uses_empty_prefix() {
        let t = Template::new("t", "", vec![StyleRule::new("p", "margin: 0;")], "");
        let mut root = Element::new("div").with_child(Element::new("p"));
        inline_tree(&mut root, &t);
        assert_eq!(first(&root, "p").style(), " margin: 0;");
    }

    #[test]
    fn test_fenced_code_gets_code_block_style() {
        let default = template("default");
        let mut root = render_tree("```\nx=1\n```").unwrap();
        inline_tree(&mut root, &default);

        let code = first(&root, "code");
        assert_eq!(code.style(), CODE_BLOCK_STYLE);
        assert!(!code.style().contains(default.declarations_for("code").unwrap()));
        assert!(first(&root, "pre")
            .style()
            .ends_with(default.declarations_for("pre").unwrap()));
    }

    #[test]
    fn test_code_block_style_replaces_existing_style() {
        let default = template("default");
        let mut root = Element::new("div").with_child(
            Element::new("pre")
                .with_child(Element::new("code").with_attribute("style", "color: pink;")),
        );
        inline_tree(&mut root, &default);
        assert_eq!(first(&root, "code").style(), CODE_BLOCK_STYLE);
    }

    #[test]
    fn test_inline_code_outside_pre_gets_generic_rule() {
        let default = template("default");
        let mut root = render_tree("Run `cargo` now").unwrap();
        inline_tree(&mut root, &default);

        let code = first(&root, "code");
        let generic = default.declarations_for("code").unwrap();
        assert_eq!(code.style(), format!(" {}", generic));
        assert!(!code.style().contains(CODE_BLOCK_STYLE));
    }

    #[test]
    fn test_code_nested_deeper_than_pre_child_gets_generic_rule() {
        let default = template("default");
        let mut root = Element::new("div").with_child(
            Element::new("pre").with_child(Element::new("span").with_child(Element::new("code"))),
        );
        inline_tree(&mut root, &default);
        assert!(first(&root, "code")
            .style()
            .ends_with(default.declarations_for("code").unwrap()));
    }

    #[test]
    fn test_every_pre_code_is_overridden() {
        let default = template("default");
        let mut root = render_tree("```\na\n```\n\ntext `b`\n\n```js\nc\n```").unwrap();
        inline_tree(&mut root, &default);

        let styles: Vec<bool> = root
            .find_all("code")
            .iter()
            .map(|code| code.style() == CODE_BLOCK_STYLE)
            .collect();
        assert_eq!(styles, vec![true, false, true]);
    }

    #[test]
    fn test_root_gets_base_style_even_without_recognized_tags() {
        let empty = Template::new("empty", "", Vec::new(), "");
        let mut root = Element::new("div").with_child(Element::new("custom-tag"));
        inline_tree(&mut root, &empty);

        assert_eq!(root.style(), BASE_READING_STYLE);
        assert_eq!(first(&root, "custom-tag").style(), "");
    }

    #[test]
    fn test_root_tag_is_not_matched_by_rules() {
        let t = Template::new("t", "", vec![StyleRule::new("div", "padding: 1px;")], "");
        let mut root = Element::new("div").with_child(Element::new("div"));
        inline_tree(&mut root, &t);

        assert_eq!(root.style(), BASE_READING_STYLE);
        assert_eq!(first(&root, "div").style(), " padding: 1px;");
    }

    #[test]
    fn test_inlining_twice_duplicates_declarations() {
        let default = template("default");
        let mut root = render_tree("Body").unwrap();
        inline_tree(&mut root, &default);
        inline_tree(&mut root, &default);

        let p_rule = default.declarations_for("p").unwrap();
        assert_eq!(first(&root, "p").style().matches(p_rule).count(), 2);
        // root style is set, not appended
        assert_eq!(root.style(), BASE_READING_STYLE);
    }

    #[test]
    fn test_switching_template_changes_rules_but_not_base() {
        let source = "# Title\n\nBody";
        let default = template("default");
        let social = template("social");

        let a = inlined(&render_tree(source).unwrap(), &default);
        let b = inlined(&render_tree(source).unwrap(), &social);

        assert_ne!(first(&a, "h1").style(), first(&b, "h1").style());
        assert!(first(&b, "h1")
            .style()
            .ends_with(social.declarations_for("h1").unwrap()));
        assert_eq!(a.style(), b.style());
    }

    #[test]
    fn test_inlined_leaves_source_tree_untouched() {
        let default = template("default");
        let source = render_tree("# Title").unwrap();
        let before = source.clone();
        let _ = inlined(&source, &default);
        assert_eq!(source, before);
    }

    #[test]
    fn test_text_and_raw_nodes_are_untouched() {
        let default = template("default");
        let mut root = render_tree("Press <kbd>K</kbd>").unwrap();
        inline_tree(&mut root, &default);
        assert!(root.to_html().contains("<kbd>K</kbd>"));
    }
}
