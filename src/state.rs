//! Session state management for ContentMorph
//!
//! This module defines `Session`, which owns everything a user works on:
//! the base document, the AI variants derived from it, the style context of
//! each, the optional override sheet, and transient feedback (toasts, the
//! last generation error, the copy confirmation).
//!
//! Time is passed in as seconds (`now: f64`) rather than read from a clock,
//! so debouncing and toast expiry are deterministic under test.

use crate::config::Theme;
use crate::error::{Error, Result};
use crate::export::{export_inlined_content, generate_preview_document, ClipboardSink, CopyOutcome};
use crate::generate::{GenerationRequest, GenerationResponse};
use crate::markdown::{apply_format, render_tree, FormatCommand, FormatResult};
use crate::samples::{self, DEFAULT_BASE_CONTENT, DEFAULT_VARIANT_PROMPT, NEW_VARIANT_PROMPT};
use crate::style::{
    OverrideSheet, OverrideSheetError, TemplateRegistry, DEFAULT_TEMPLATE, SOCIAL_TEMPLATE,
};
use log::{debug, info, warn};
use std::path::Path;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Id of the base document.
pub const BASE_ID: &str = "base";

/// Quiet period before a base-document edit is committed.
pub const DEBOUNCE_SECS: f64 = 0.15;

/// How long the copy confirmation stays visible.
pub const COPY_CONFIRMATION_SECS: f64 = 2.0;

/// Default toast duration.
pub const TOAST_SECS: f64 = 2.0;

/// Shown in place of a variant that has no content yet.
pub const EMPTY_VARIANT_PLACEHOLDER: &str = "No content yet. Generate or type to begin.";

// ─────────────────────────────────────────────────────────────────────────────
// Style Context
// ─────────────────────────────────────────────────────────────────────────────

/// Styling choice of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleContext {
    /// Template whose rules are inlined on copy
    pub template: String,
    /// Hand-edited preview stylesheet replacing the template's, if any
    pub custom_css: Option<String>,
}

impl StyleContext {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            custom_css: None,
        }
    }

    /// Stylesheet for the preview document: the custom one if set, otherwise
    /// the template's.
    pub fn stylesheet<'a>(&'a self, registry: &'a TemplateRegistry) -> Result<&'a str> {
        match &self.custom_css {
            Some(css) => Ok(css.as_str()),
            None => Ok(registry.get(&self.template)?.stylesheet.as_str()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Debouncer
// ─────────────────────────────────────────────────────────────────────────────

/// Holds the latest pending edit until it has been quiet for `window` seconds.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: f64,
    pending: Option<(String, f64)>,
}

impl Debouncer {
    pub fn new(window: f64) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Record an edit; each push restarts the window.
    pub fn push(&mut self, content: String, now: f64) {
        self.pending = Some((content, now + self.window));
    }

    /// Take the pending edit if its window has elapsed.
    pub fn take_ready(&mut self, now: f64) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(c, _)| c),
            _ => None,
        }
    }

    /// Take the pending edit regardless of the window.
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(content, _)| content)
    }

    /// Drop the pending edit.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Variants
// ─────────────────────────────────────────────────────────────────────────────

/// Generation lifecycle of a variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    /// A request is in flight; `base_revision` is the base it was built from
    Generating { request_id: u64, base_revision: u64 },
    /// Content was generated from base revision `base_revision`
    Succeeded { base_revision: u64 },
    /// The last request failed
    Failed { message: String },
}

/// One AI-rewritten version of the base document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub id: String,
    pub title: String,
    pub prompt: String,
    pub content: String,
    pub style: StyleContext,
    pub expanded: bool,
    pub generation: GenerationState,
}

impl Variant {
    pub fn is_generating(&self) -> bool {
        matches!(self.generation, GenerationState::Generating { .. })
    }

    /// Error message of the last failed request.
    pub fn error(&self) -> Option<&str> {
        match &self.generation {
            GenerationState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// What the preview currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveView<'a> {
    pub id: &'a str,
    pub content: &'a str,
    pub style: &'a StyleContext,
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// All documents and transient state of one editing session.
#[derive(Debug, Clone)]
pub struct Session {
    base_content: String,
    base_style: StyleContext,
    /// Incremented whenever committed base content changes
    base_revision: u64,
    debouncer: Debouncer,
    variants: Vec<Variant>,
    active_id: String,
    next_variant_number: usize,
    next_request_id: u64,
    override_sheet: Option<OverrideSheet>,
    toast: Option<Toast>,
    last_error: Option<String>,
    copied_until: Option<f64>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with the default base template.
    pub fn new() -> Self {
        Self::with_template(DEFAULT_TEMPLATE)
    }

    /// Create a session whose base document uses `template`.
    ///
    /// Starts with the sample base content and one collapsed variant set up
    /// for a social rewrite.
    pub fn with_template(template: &str) -> Self {
        let first = Variant {
            id: "variant-1".to_string(),
            title: "Style 1".to_string(),
            prompt: DEFAULT_VARIANT_PROMPT.to_string(),
            content: String::new(),
            style: StyleContext::new(SOCIAL_TEMPLATE),
            expanded: false,
            generation: GenerationState::Idle,
        };

        Self {
            base_content: DEFAULT_BASE_CONTENT.to_string(),
            base_style: StyleContext::new(template),
            base_revision: 0,
            debouncer: Debouncer::new(DEBOUNCE_SECS),
            variants: vec![first],
            active_id: BASE_ID.to_string(),
            next_variant_number: 2,
            next_request_id: 1,
            override_sheet: None,
            toast: None,
            last_error: None,
            copied_until: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Base Document
    // ─────────────────────────────────────────────────────────────────────────

    pub fn base_content(&self) -> &str {
        &self.base_content
    }

    pub fn base_style(&self) -> &StyleContext {
        &self.base_style
    }

    pub fn base_revision(&self) -> u64 {
        self.base_revision
    }

    /// Record a keystroke-level edit; committed once quiet.
    pub fn edit_base_content(&mut self, content: impl Into<String>, now: f64) {
        self.debouncer.push(content.into(), now);
    }

    /// Commit the pending edit if its quiet period has elapsed.
    ///
    /// Returns `true` if base content was committed.
    pub fn commit_pending_edits(&mut self, now: f64) -> bool {
        match self.debouncer.take_ready(now) {
            Some(content) => {
                self.commit_base(content);
                true
            }
            None => false,
        }
    }

    /// Commit any pending edit immediately.
    pub fn flush_edits(&mut self) {
        if let Some(content) = self.debouncer.flush() {
            self.commit_base(content);
        }
    }

    /// Replace base content now, discarding any pending edit.
    pub fn set_base_content_immediately(&mut self, content: impl Into<String>) {
        self.debouncer.cancel();
        self.commit_base(content.into());
    }

    pub fn has_pending_edits(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Apply a toolbar formatting command to the base document.
    ///
    /// Pending edits are flushed first so the selection refers to the text
    /// the user sees. The result is committed as a new revision.
    pub fn format_base(
        &mut self,
        selection: Option<(usize, usize)>,
        command: FormatCommand,
    ) -> FormatResult {
        self.flush_edits();
        let result = apply_format(&self.base_content, selection, command);
        self.set_base_content_immediately(result.text.clone());
        result
    }

    fn commit_base(&mut self, content: String) {
        if content != self.base_content {
            self.base_content = content;
            self.base_revision += 1;
            debug!("Base content committed, revision {}", self.base_revision);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Variant Management
    // ─────────────────────────────────────────────────────────────────────────

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn variant(&self, id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    fn variant_mut(&mut self, id: &str) -> Result<&mut Variant> {
        self.variants
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| Error::UnknownVariant(id.to_string()))
    }

    /// Add a variant, make it active and expanded, and collapse the others.
    ///
    /// Returns the new variant's id.
    pub fn add_variant(&mut self) -> String {
        let id = format!("variant-{}", self.next_variant_number);
        self.next_variant_number += 1;

        for variant in &mut self.variants {
            variant.expanded = false;
        }
        self.variants.push(Variant {
            id: id.clone(),
            title: format!("Style {}", self.variants.len() + 1),
            prompt: NEW_VARIANT_PROMPT.to_string(),
            content: String::new(),
            style: StyleContext::new(DEFAULT_TEMPLATE),
            expanded: true,
            generation: GenerationState::Idle,
        });
        self.active_id = id.clone();

        info!("Added variant {}", id);
        id
    }

    /// Remove a variant. If it was active, the base document becomes active.
    pub fn remove_variant(&mut self, id: &str) -> Result<()> {
        let index = self
            .variants
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| Error::UnknownVariant(id.to_string()))?;
        self.variants.remove(index);

        if self.active_id == id {
            self.active_id = BASE_ID.to_string();
        }
        info!("Removed variant {}", id);
        Ok(())
    }

    /// Make `id` active and flip its expansion; every other variant collapses.
    pub fn toggle_variant(&mut self, id: &str) -> Result<()> {
        if self.variant(id).is_none() {
            return Err(Error::UnknownVariant(id.to_string()));
        }
        for variant in &mut self.variants {
            variant.expanded = variant.id == id && !variant.expanded;
        }
        self.active_id = id.to_string();
        Ok(())
    }

    /// Make the base document active.
    pub fn select_base(&mut self) {
        self.active_id = BASE_ID.to_string();
    }

    pub fn rename_variant(&mut self, id: &str, title: impl Into<String>) -> Result<()> {
        self.variant_mut(id)?.title = title.into();
        Ok(())
    }

    pub fn set_variant_prompt(&mut self, id: &str, prompt: impl Into<String>) -> Result<()> {
        self.variant_mut(id)?.prompt = prompt.into();
        Ok(())
    }

    /// Overwrite a variant's content by hand.
    pub fn set_variant_content(&mut self, id: &str, content: impl Into<String>) -> Result<()> {
        self.variant_mut(id)?.content = content.into();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Generation
    // ─────────────────────────────────────────────────────────────────────────

    /// Mark `id` as generating and build the request for it.
    ///
    /// Pending base edits are committed first so the request carries the
    /// text the user sees.
    pub fn begin_generation(&mut self, id: &str) -> Result<GenerationRequest> {
        self.flush_edits();
        let request_id = self.next_request_id;
        let base_revision = self.base_revision;
        let base_content = self.base_content.clone();

        let variant = self.variant_mut(id)?;
        if variant.is_generating() {
            return Err(Error::AlreadyGenerating(id.to_string()));
        }
        variant.generation = GenerationState::Generating {
            request_id,
            base_revision,
        };
        let request = GenerationRequest {
            variant_id: variant.id.clone(),
            request_id,
            base_content,
            prompt: variant.prompt.clone(),
        };

        self.next_request_id += 1;
        Ok(request)
    }

    /// Apply a response to the variant that issued it.
    ///
    /// Responses for removed variants, or for requests the variant is no
    /// longer waiting on, are dropped. Returns `true` if the response was
    /// applied.
    pub fn complete_generation(&mut self, response: GenerationResponse) -> bool {
        let Some(variant) = self.variants.iter_mut().find(|v| v.id == response.variant_id) else {
            debug!(
                "Dropping response {} for removed variant {}",
                response.request_id, response.variant_id
            );
            return false;
        };

        let base_revision = match variant.generation {
            GenerationState::Generating {
                request_id,
                base_revision,
            } if request_id == response.request_id => base_revision,
            _ => {
                debug!(
                    "Dropping response {} not awaited by variant {}",
                    response.request_id, response.variant_id
                );
                return false;
            }
        };

        match response.result {
            Ok(content) => {
                info!("Variant {} generated", variant.id);
                variant.content = content;
                variant.generation = GenerationState::Succeeded { base_revision };
                self.last_error = None;
            }
            Err(e) => {
                let message = e.to_string();
                warn!("Variant {} generation failed: {}", variant.id, message);
                variant.generation = GenerationState::Failed {
                    message: message.clone(),
                };
                self.last_error = Some(message);
            }
        }
        true
    }

    pub fn is_generating(&self, id: &str) -> bool {
        self.variant(id).map(Variant::is_generating).unwrap_or(false)
    }

    /// Whether the variant's content was generated from an older base.
    pub fn is_stale(&self, id: &str) -> bool {
        match self.variant(id).map(|v| &v.generation) {
            Some(GenerationState::Succeeded { base_revision }) => {
                *base_revision != self.base_revision
            }
            _ => false,
        }
    }

    /// Most recent generation error, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Active View & Styling
    // ─────────────────────────────────────────────────────────────────────────

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    /// Content and style of the active document.
    pub fn active_view(&self) -> ActiveView<'_> {
        match self.variant(&self.active_id) {
            Some(variant) => ActiveView {
                id: &variant.id,
                content: if variant.content.is_empty() {
                    EMPTY_VARIANT_PLACEHOLDER
                } else {
                    &variant.content
                },
                style: &variant.style,
            },
            None => ActiveView {
                id: BASE_ID,
                content: &self.base_content,
                style: &self.base_style,
            },
        }
    }

    fn style_mut(&mut self, target: &str) -> Result<&mut StyleContext> {
        if target == BASE_ID {
            Ok(&mut self.base_style)
        } else {
            Ok(&mut self.variant_mut(target)?.style)
        }
    }

    /// Switch the active document to `name`, dropping any custom stylesheet.
    pub fn apply_template(&mut self, registry: &TemplateRegistry, name: &str) -> Result<()> {
        if !registry.contains(name) {
            return Err(Error::InvalidTemplate(name.to_string()));
        }
        let target = self.active_id.clone();
        let style = self.style_mut(&target)?;
        style.template = name.to_string();
        style.custom_css = None;

        info!("Applied template '{}' to {}", name, target);
        Ok(())
    }

    /// Replace the preview stylesheet of `target` (`BASE_ID` or a variant id).
    pub fn set_custom_css(&mut self, target: &str, css: impl Into<String>) -> Result<()> {
        self.style_mut(target)?.custom_css = Some(css.into());
        Ok(())
    }

    /// Full preview document for the active view.
    pub fn preview_document(&self, registry: &TemplateRegistry, theme: Theme) -> Result<String> {
        let view = self.active_view();
        let stylesheet = view.style.stylesheet(registry)?;
        Ok(generate_preview_document(
            view.content,
            stylesheet,
            self.override_sheet.as_ref(),
            theme,
            None,
        ))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Override Sheet
    // ─────────────────────────────────────────────────────────────────────────

    pub fn override_sheet(&self) -> Option<&OverrideSheet> {
        self.override_sheet.as_ref()
    }

    /// Load a stylesheet from disk, replacing any earlier one.
    ///
    /// On failure the current sheet is kept and a warning toast is shown.
    pub fn load_override_sheet(
        &mut self,
        path: &Path,
        now: f64,
    ) -> std::result::Result<(), OverrideSheetError> {
        match OverrideSheet::load(path) {
            Ok(sheet) => {
                self.override_sheet = Some(sheet);
                self.show_toast("CSS loaded", now, TOAST_SECS);
                Ok(())
            }
            Err(e) => {
                let message = match &e {
                    OverrideSheetError::UnsupportedFile(_) => "Please choose a CSS file",
                    OverrideSheetError::Read { .. } => "Failed to read the CSS file",
                };
                self.show_toast(message, now, TOAST_SECS);
                Err(e)
            }
        }
    }

    /// Remove the override sheet. Returns `true` if one was installed.
    pub fn reset_override_sheet(&mut self, now: f64) -> bool {
        if self.override_sheet.take().is_some() {
            info!("Override sheet removed");
            self.show_toast("Reset to the default styles", now, TOAST_SECS);
            true
        } else {
            self.show_toast("Already using the default styles", now, TOAST_SECS);
            false
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Copy
    // ─────────────────────────────────────────────────────────────────────────

    /// Copy the active view, inlined with its template, to `sink`.
    pub fn copy_active(
        &mut self,
        registry: &TemplateRegistry,
        sink: &mut dyn ClipboardSink,
        now: f64,
    ) -> Result<CopyOutcome> {
        let view = self.active_view();
        let template = registry.get(&view.style.template)?;
        let root = render_tree(view.content);

        let outcome = export_inlined_content(root.as_ref(), template, sink)?;
        self.copied_until = Some(now + COPY_CONFIRMATION_SECS);
        self.show_toast("Copied", now, COPY_CONFIRMATION_SECS);
        Ok(outcome)
    }

    /// Whether the copy confirmation is still showing.
    pub fn is_copied(&self, now: f64) -> bool {
        self.copied_until.map(|until| now < until).unwrap_or(false)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Samples
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the base document with a named example.
    pub fn load_sample(&mut self, name: &str, now: f64) -> Result<()> {
        let content = samples::sample(name).ok_or_else(|| Error::UnknownSample(name.to_string()))?;
        self.set_base_content_immediately(content);
        self.show_toast("Sample content loaded", now, TOAST_SECS);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toasts
    // ─────────────────────────────────────────────────────────────────────────

    /// Show a temporary toast message.
    ///
    /// `current_time` is in seconds; `duration` is how long it stays.
    pub fn show_toast(&mut self, message: impl Into<String>, current_time: f64, duration: f64) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: current_time + duration,
        });
    }

    /// Clear the toast once it has expired.
    pub fn update_toast(&mut self, current_time: f64) {
        if let Some(toast) = &self.toast {
            if current_time >= toast.expires_at {
                self.toast = None;
            }
        }
    }

    pub fn toast_message(&self) -> Option<&str> {
        self.toast.as_ref().map(|t| t.message.as_str())
    }

    pub fn clear_toast(&mut self) {
        self.toast = None;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::clipboard::tests::FakeClipboard;
    use crate::generate::GenerationError;
    use crate::style::CODE_BLOCK_STYLE;
    use std::fs;
    use tempfile::TempDir;

    fn ok_response(request: &GenerationRequest, content: &str) -> GenerationResponse {
        GenerationResponse {
            variant_id: request.variant_id.clone(),
            request_id: request.request_id,
            result: Ok(content.to_string()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Initial state
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_new_session() {
        let session = Session::new();
        assert_eq!(session.active_id(), BASE_ID);
        assert_eq!(session.base_content(), DEFAULT_BASE_CONTENT);
        assert_eq!(session.base_style().template, "default");
        assert_eq!(session.variants().len(), 1);

        let first = &session.variants()[0];
        assert_eq!(first.title, "Style 1");
        assert_eq!(first.prompt, DEFAULT_VARIANT_PROMPT);
        assert_eq!(first.style.template, "social");
        assert!(!first.expanded);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Debounce
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_debouncer_waits_for_quiet_period() {
        let mut debouncer = Debouncer::new(0.15);
        debouncer.push("a".to_string(), 1.0);
        assert_eq!(debouncer.take_ready(1.1), None);
        debouncer.push("ab".to_string(), 1.1);
        assert_eq!(debouncer.take_ready(1.2), None);
        assert_eq!(debouncer.take_ready(1.3), Some("ab".to_string()));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_base_edits_commit_after_debounce() {
        let mut session = Session::new();
        session.edit_base_content("Draft", 0.0);
        assert!(!session.commit_pending_edits(0.1));
        assert_eq!(session.base_content(), DEFAULT_BASE_CONTENT);

        assert!(session.commit_pending_edits(0.2));
        assert_eq!(session.base_content(), "Draft");
        assert_eq!(session.base_revision(), 1);
    }

    #[test]
    fn test_immediate_set_cancels_pending_edit() {
        let mut session = Session::new();
        session.edit_base_content("typed", 0.0);
        session.set_base_content_immediately("pasted");

        assert!(!session.has_pending_edits());
        assert!(!session.commit_pending_edits(10.0));
        assert_eq!(session.base_content(), "pasted");
    }

    #[test]
    fn test_unchanged_commit_keeps_revision() {
        let mut session = Session::new();
        session.set_base_content_immediately(DEFAULT_BASE_CONTENT);
        assert_eq!(session.base_revision(), 0);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Variant management
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_add_variant_activates_and_collapses_siblings() {
        let mut session = Session::new();
        session.toggle_variant("variant-1").unwrap();
        assert!(session.variant("variant-1").unwrap().expanded);

        let id = session.add_variant();
        assert_eq!(id, "variant-2");
        assert_eq!(session.active_id(), "variant-2");

        let added = session.variant(&id).unwrap();
        assert_eq!(added.title, "Style 2");
        assert_eq!(added.prompt, NEW_VARIANT_PROMPT);
        assert_eq!(added.style.template, "default");
        assert!(added.expanded);
        assert!(!session.variant("variant-1").unwrap().expanded);
    }

    #[test]
    fn test_variant_ids_are_not_reused() {
        let mut session = Session::new();
        let second = session.add_variant();
        session.remove_variant(&second).unwrap();
        assert_eq!(session.add_variant(), "variant-3");
    }

    #[test]
    fn test_remove_active_variant_falls_back_to_base() {
        let mut session = Session::new();
        let id = session.add_variant();
        session.remove_variant(&id).unwrap();

        assert_eq!(session.active_id(), BASE_ID);
        assert!(matches!(
            session.remove_variant(&id),
            Err(Error::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_toggle_variant_flips_expansion() {
        let mut session = Session::new();
        session.toggle_variant("variant-1").unwrap();
        session.toggle_variant("variant-1").unwrap();
        assert!(!session.variant("variant-1").unwrap().expanded);
        assert_eq!(session.active_id(), "variant-1");
        assert!(session.toggle_variant("variant-9").is_err());
    }

    #[test]
    fn test_rename_and_edit_variant() {
        let mut session = Session::new();
        session.rename_variant("variant-1", "Thread").unwrap();
        session.set_variant_prompt("variant-1", "Make it a thread").unwrap();
        session.set_variant_content("variant-1", "1/ hello").unwrap();

        let variant = session.variant("variant-1").unwrap();
        assert_eq!(variant.title, "Thread");
        assert_eq!(variant.prompt, "Make it a thread");
        assert_eq!(variant.content, "1/ hello");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Generation
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_begin_generation_builds_request() {
        let mut session = Session::new();
        session.edit_base_content("Fresh base", 0.0);

        let request = session.begin_generation("variant-1").unwrap();
        assert_eq!(request.base_content, "Fresh base");
        assert_eq!(request.prompt, DEFAULT_VARIANT_PROMPT);
        assert!(session.is_generating("variant-1"));

        assert!(matches!(
            session.begin_generation("variant-1"),
            Err(Error::AlreadyGenerating(_))
        ));
    }

    #[test]
    fn test_successful_generation_sets_content() {
        let mut session = Session::new();
        let request = session.begin_generation("variant-1").unwrap();

        assert!(session.complete_generation(ok_response(&request, "# Rewritten")));
        let variant = session.variant("variant-1").unwrap();
        assert_eq!(variant.content, "# Rewritten");
        assert!(!session.is_generating("variant-1"));
        assert!(!session.is_stale("variant-1"));
    }

    #[test]
    fn test_http_error_is_scoped_to_variant() {
        let mut session = Session::new();
        let second = session.add_variant();
        session.set_variant_content(&second, "kept").unwrap();

        let failing = session.begin_generation("variant-1").unwrap();
        let running = session.begin_generation(&second).unwrap();

        session.complete_generation(GenerationResponse {
            variant_id: failing.variant_id.clone(),
            request_id: failing.request_id,
            result: Err(GenerationError::Api {
                status: 401,
                message: "Invalid API key".to_string(),
            }),
        });

        let failed = session.variant("variant-1").unwrap();
        assert!(!failed.is_generating());
        assert!(failed.error().unwrap().contains("Invalid API key"));
        assert!(session.last_error().unwrap().contains("Invalid API key"));

        let sibling = session.variant(&second).unwrap();
        assert!(sibling.is_generating());
        assert_eq!(sibling.content, "kept");

        session.complete_generation(ok_response(&running, "done"));
        assert_eq!(session.last_error(), None);
        assert!(session.variant("variant-1").unwrap().error().is_some());
    }

    #[test]
    fn test_response_after_base_edit_is_stale() {
        let mut session = Session::new();
        let request = session.begin_generation("variant-1").unwrap();
        session.set_base_content_immediately("Edited meanwhile");

        assert!(session.complete_generation(ok_response(&request, "old rewrite")));
        assert_eq!(session.variant("variant-1").unwrap().content, "old rewrite");
        assert!(session.is_stale("variant-1"));
    }

    #[test]
    fn test_response_for_removed_variant_is_dropped() {
        let mut session = Session::new();
        let id = session.add_variant();
        let request = session.begin_generation(&id).unwrap();
        session.remove_variant(&id).unwrap();

        assert!(!session.complete_generation(ok_response(&request, "late")));
    }

    #[test]
    fn test_response_with_unknown_request_id_is_dropped() {
        let mut session = Session::new();
        let request = session.begin_generation("variant-1").unwrap();
        let mut other = ok_response(&request, "x");
        other.request_id += 100;

        assert!(!session.complete_generation(other));
        assert!(session.is_generating("variant-1"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Active view & styling
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_active_view_placeholder_for_empty_variant() {
        let mut session = Session::new();
        session.toggle_variant("variant-1").unwrap();

        let view = session.active_view();
        assert_eq!(view.id, "variant-1");
        assert_eq!(view.content, EMPTY_VARIANT_PLACEHOLDER);
        assert_eq!(view.style.template, "social");
    }

    #[test]
    fn test_apply_template_to_active_document() {
        let registry = TemplateRegistry::builtin();
        let mut session = Session::new();
        session.set_custom_css(BASE_ID, "p { color: red; }").unwrap();

        session.apply_template(&registry, "modern").unwrap();
        assert_eq!(session.base_style().template, "modern");
        assert_eq!(session.base_style().custom_css, None);

        let err = session.apply_template(&registry, "retro").unwrap_err();
        assert!(matches!(err, Error::InvalidTemplate(_)));
        assert_eq!(session.base_style().template, "modern");
    }

    #[test]
    fn test_custom_css_replaces_template_stylesheet() {
        let registry = TemplateRegistry::builtin();
        let mut session = Session::new();
        session.set_custom_css("variant-1", "h1 { color: teal; }").unwrap();

        let style = &session.variant("variant-1").unwrap().style;
        assert_eq!(style.stylesheet(&registry).unwrap(), "h1 { color: teal; }");
        assert_eq!(
            session.base_style().stylesheet(&registry).unwrap(),
            registry.get("default").unwrap().stylesheet
        );
    }

    #[test]
    fn test_preview_document_uses_active_stylesheet() {
        let registry = TemplateRegistry::builtin();
        let mut session = Session::new();
        session.set_custom_css(BASE_ID, "h1 { color: teal; }").unwrap();

        let html = session.preview_document(&registry, Theme::Light).unwrap();
        assert!(html.contains("h1 { color: teal; }"));
        assert!(html.contains("Welcome to ContentMorph"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Override sheet
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_txt_override_sheet_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "p { color: red; }").unwrap();

        let mut session = Session::new();
        let err = session.load_override_sheet(&path, 5.0).unwrap_err();

        assert!(matches!(err, OverrideSheetError::UnsupportedFile(_)));
        assert!(session.override_sheet().is_none());
        assert_eq!(session.toast_message(), Some("Please choose a CSS file"));
    }

    #[test]
    fn test_load_and_reset_override_sheet() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("a.css");
        let second = dir.path().join("b.CSS");
        fs::write(&first, "p { color: red; }").unwrap();
        fs::write(&second, "p { color: blue; }").unwrap();

        let mut session = Session::new();
        session.load_override_sheet(&first, 0.0).unwrap();
        session.load_override_sheet(&second, 1.0).unwrap();
        assert_eq!(session.override_sheet().unwrap().css, "p { color: blue; }");

        assert!(session.reset_override_sheet(2.0));
        assert!(session.override_sheet().is_none());
        assert!(!session.reset_override_sheet(3.0));
        assert_eq!(
            session.toast_message(),
            Some("Already using the default styles")
        );
    }

    #[test]
    fn test_unreadable_override_sheet_keeps_previous() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.css");
        fs::write(&good, "p {}").unwrap();

        let mut session = Session::new();
        session.load_override_sheet(&good, 0.0).unwrap();
        let err = session
            .load_override_sheet(&dir.path().join("missing.css"), 1.0)
            .unwrap_err();

        assert!(matches!(err, OverrideSheetError::Read { .. }));
        assert_eq!(session.override_sheet().unwrap().source_path, good);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Copy
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_copy_active_uses_active_template_and_confirms() {
        let registry = TemplateRegistry::builtin();
        let mut session = Session::new();
        session.set_base_content_immediately("```\nx=1\n```");
        let mut sink = FakeClipboard::default();

        let outcome = session.copy_active(&registry, &mut sink, 10.0).unwrap();

        assert_eq!(outcome, CopyOutcome::Rich);
        let (html, _) = sink.html.unwrap();
        assert!(html.contains(&crate::inline::node::escape_attribute(CODE_BLOCK_STYLE)));
        assert!(session.is_copied(11.9));
        assert!(!session.is_copied(12.0));
        assert_eq!(session.toast_message(), Some("Copied"));
    }

    #[test]
    fn test_copy_failure_does_not_confirm() {
        let registry = TemplateRegistry::builtin();
        let mut session = Session::new();
        let mut sink = FakeClipboard {
            fail_html: true,
            fail_text: true,
            ..FakeClipboard::default()
        };

        let err = session.copy_active(&registry, &mut sink, 0.0).unwrap_err();
        assert!(matches!(err, Error::Clipboard(_)));
        assert!(!session.is_copied(0.5));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Formatting
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_format_base_wraps_selection_and_bumps_revision() {
        let mut session = Session::new();
        session.set_base_content_immediately("Hello world");
        let revision = session.base_revision();

        let result = session.format_base(Some((0, 5)), FormatCommand::Bold);

        assert_eq!(session.base_content(), "**Hello** world");
        assert_eq!(result.cursor, 9);
        assert_eq!(session.base_revision(), revision + 1);
    }

    #[test]
    fn test_format_base_sees_pending_edit() {
        let mut session = Session::new();
        session.set_base_content_immediately("old");
        session.edit_base_content("Title", 1.0);

        session.format_base(Some((0, 5)), FormatCommand::Italic);

        assert!(!session.has_pending_edits());
        assert_eq!(session.base_content(), "*Title*");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Samples & toasts
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_sample() {
        let mut session = Session::new();
        session.load_sample("code", 0.0).unwrap();
        assert!(session.base_content().starts_with("# API reference"));
        assert_eq!(session.toast_message(), Some("Sample content loaded"));

        assert!(matches!(
            session.load_sample("poem", 0.0),
            Err(Error::UnknownSample(_))
        ));
    }

    #[test]
    fn test_toast_expires() {
        let mut session = Session::new();
        session.show_toast("hello", 1.0, 2.0);
        session.update_toast(2.5);
        assert_eq!(session.toast_message(), Some("hello"));
        session.update_toast(3.0);
        assert_eq!(session.toast_message(), None);
    }
}
