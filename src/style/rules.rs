//! Style rule tables
//!
//! A template is a flat tag → declaration mapping. Declarations are kept as
//! the literal `property: value;` text they were authored as; nothing here
//! parses CSS.

use crate::error::{Error, Result};
use log::debug;

// ─────────────────────────────────────────────────────────────────────────────
// Style Rule
// ─────────────────────────────────────────────────────────────────────────────

/// One tag's inline declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Element tag name the rule applies to
    pub tag: String,
    /// Literal declaration block, e.g. `"margin: 0; color: rgb(63, 63, 63);"`
    pub declarations: String,
}

impl StyleRule {
    pub fn new(tag: impl Into<String>, declarations: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            declarations: declarations.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Template
// ─────────────────────────────────────────────────────────────────────────────

/// A named publishing style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Lookup key, e.g. `"default"`
    pub name: String,
    /// Short human-readable description
    pub description: String,
    /// Inline rule table in authoring order, at most one rule per tag
    rules: Vec<StyleRule>,
    /// Stylesheet used by the on-screen preview document
    pub stylesheet: String,
}

impl Template {
    /// Build a template from rules. A tag defined twice keeps its first
    /// position but takes the last declarations.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        rules: impl IntoIterator<Item = StyleRule>,
        stylesheet: impl Into<String>,
    ) -> Self {
        let mut template = Self {
            name: name.into(),
            description: description.into(),
            rules: Vec::new(),
            stylesheet: stylesheet.into(),
        };
        template.extend(rules);
        template
    }

    /// Start a new template from this one's rules, then override with `rules`.
    pub fn layered(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        rules: impl IntoIterator<Item = StyleRule>,
        stylesheet: impl Into<String>,
    ) -> Self {
        let mut template = Self::new(name, description, self.rules.clone(), stylesheet);
        template.extend(rules);
        template
    }

    fn extend(&mut self, rules: impl IntoIterator<Item = StyleRule>) {
        for rule in rules {
            match self.rules.iter_mut().find(|existing| existing.tag == rule.tag) {
                Some(existing) => existing.declarations = rule.declarations,
                None => self.rules.push(rule),
            }
        }
    }

    /// Declarations for a tag, if the template styles it.
    pub fn declarations_for(&self, tag: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.tag == tag)
            .map(|rule| rule.declarations.as_str())
    }

    /// All rules in authoring order.
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Template Registry
// ─────────────────────────────────────────────────────────────────────────────

/// The set of selectable templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
}

impl TemplateRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in templates.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for template in super::templates::builtin_templates() {
            registry.register(template);
        }
        registry
    }

    /// Add a template, replacing one with the same name.
    pub fn register(&mut self, template: Template) {
        debug!("Registering template '{}'", template.name);
        match self.templates.iter_mut().find(|t| t.name == template.name) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }

    /// Get a template by name.
    pub fn get(&self, name: &str) -> Result<&Template> {
        self.templates
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::InvalidTemplate(name.to_string()))
    }

    /// Whether a template with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.templates.iter().any(|t| t.name == name)
    }

    /// Look up a tag's declarations in a template.
    ///
    /// Returns `Ok(None)` when the template does not style the tag and
    /// `Error::InvalidTemplate` when the template itself is unknown.
    pub fn lookup(&self, tag: &str, template_name: &str) -> Result<Option<&str>> {
        Ok(self.get(template_name)?.declarations_for(tag))
    }

    /// Template names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.name.as_str())
    }

    /// All templates in registration order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
