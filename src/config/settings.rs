//! User settings and preferences for ContentMorph
//!
//! This module defines the `Settings` struct holding the persisted
//! preferences: generation endpoint configuration, the page theme and the
//! template new documents start with. serde handles JSON persistence.

use crate::error::{Error, Result};
use crate::generate::{ApiConfig, GenerationError};
use crate::style::DEFAULT_TEMPLATE;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Page theme for the preview document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Toggle between light and dark.
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Get a display label for the theme.
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Generation API Format
// ─────────────────────────────────────────────────────────────────────────────

/// Wire format spoken by the generation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WireFormat {
    /// OpenAI-compatible chat completions
    #[default]
    #[serde(rename = "chat")]
    ChatCompletions,
    /// `{ baseContent, prompt }` → `{ result }` proxy
    #[serde(rename = "proxy")]
    Proxy,
}

impl WireFormat {
    /// Parse a format name as used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "chat" => Some(WireFormat::ChatCompletions),
            "proxy" => Some(WireFormat::Proxy),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences and application settings.
///
/// This struct is serialized to JSON and persisted to the user's config directory.
/// All fields have sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Generation Endpoint
    // ─────────────────────────────────────────────────────────────────────────
    /// Endpoint URL
    pub api_url: String,

    /// Bearer credential
    pub api_key: String,

    /// Model identifier
    pub api_model: String,

    /// Request/response format the endpoint speaks
    pub api_format: WireFormat,

    // ─────────────────────────────────────────────────────────────────────────
    // Appearance
    // ─────────────────────────────────────────────────────────────────────────
    /// Page theme (light or dark)
    pub theme: Theme,

    /// Template applied to the base document of a new session
    pub default_template: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            api_model: String::new(),
            api_format: WireFormat::default(),
            theme: Theme::default(),
            default_template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl Settings {
    /// Replace the endpoint configuration.
    ///
    /// Values are trimmed; each must be non-blank. On error nothing changes.
    pub fn set_api(&mut self, url: &str, key: &str, model: &str) -> Result<()> {
        let (url, key, model) = (url.trim(), key.trim(), model.trim());
        if url.is_empty() {
            return Err(Error::MissingSetting("API URL"));
        }
        if key.is_empty() {
            return Err(Error::MissingSetting("API key"));
        }
        if model.is_empty() {
            return Err(Error::MissingSetting("model name"));
        }

        self.api_url = url.to_string();
        self.api_key = key.to_string();
        self.api_model = model.to_string();
        Ok(())
    }

    /// Build the configuration injected into the generation client.
    ///
    /// The proxy format needs only the URL; chat completions need all three.
    pub fn api_config(&self) -> std::result::Result<ApiConfig, GenerationError> {
        if self.api_url.trim().is_empty() {
            return Err(GenerationError::ConfigurationMissing("API URL"));
        }
        if self.api_format == WireFormat::ChatCompletions {
            if self.api_key.trim().is_empty() {
                return Err(GenerationError::ConfigurationMissing("API key"));
            }
            if self.api_model.trim().is_empty() {
                return Err(GenerationError::ConfigurationMissing("model name"));
            }
        }

        Ok(ApiConfig {
            endpoint: self.api_url.trim().to_string(),
            api_key: self.api_key.trim().to_string(),
            model: self.api_model.trim().to_string(),
            format: self.api_format,
        })
    }

    /// Whether all endpoint settings needed for generation are present.
    pub fn is_api_configured(&self) -> bool {
        self.api_config().is_ok()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Trim string settings and reset values that are out of range.
    pub fn sanitize(&mut self, known_templates: &[&str]) {
        self.api_url = self.api_url.trim().to_string();
        self.api_key = self.api_key.trim().to_string();
        self.api_model = self.api_model.trim().to_string();

        if !known_templates.contains(&self.default_template.as_str()) {
            self.default_template = DEFAULT_TEMPLATE.to_string();
        }
    }

    /// Parse settings from JSON and sanitize against the built-in templates.
    pub fn from_json_sanitized(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        let registry = crate::style::TemplateRegistry::builtin();
        let names: Vec<&str> = registry.names().collect();
        settings.sanitize(&names);
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
