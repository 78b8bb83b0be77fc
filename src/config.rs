//! Configuration loading
//!
//! `defaults/tokenised.default.toml` is embedded into the crate so the
//! documented defaults and runtime behavior stay in sync. Callers layer their
//! own files and overrides on top through [`Loader`] before deserializing into
//! [`TokenisedConfig`].

use crate::builder::Encoding;
use crate::parsing::{Parser, TokenRole, TokenSet};
use crate::rendering::Renderer;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/tokenised.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct TokenisedConfig {
    pub tokens: TokensConfig,
    pub parser: ParserConfig,
    pub render: RenderConfig,
}

/// Delimiter literals, one per [`TokenRole`].
#[derive(Debug, Clone, Deserialize)]
pub struct TokensConfig {
    pub escape: String,
    pub tag_open: String,
    pub tag_close: String,
    pub tag_modifier: String,
    pub tag_path_separator: String,
}

impl TokensConfig {
    pub fn to_token_set(&self) -> TokenSet {
        TokenSet::new()
            .with(TokenRole::Escape, self.escape.as_str())
            .with(TokenRole::TagOpen, self.tag_open.as_str())
            .with(TokenRole::TagClose, self.tag_close.as_str())
            .with(TokenRole::TagModifier, self.tag_modifier.as_str())
            .with(TokenRole::TagPathSeparator, self.tag_path_separator.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub whitespace_pattern: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub encoding: Encoding,
    pub standard_modifiers: bool,
}

impl TokenisedConfig {
    /// Parser using the configured tokens and whitespace pattern.
    pub fn parser(&self) -> Result<Parser, regex::Error> {
        Parser::from_config(self)
    }

    pub fn renderer(&self) -> Renderer {
        if self.render.standard_modifiers {
            Renderer::with_standard_modifiers()
        } else {
            Renderer::new()
        }
    }
}

/// Layers user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file, ignored when absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `tokens.tag_open`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<TokenisedConfig, ConfigError> {
        let config: TokenisedConfig = self.builder.build()?.try_deserialize()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<TokenisedConfig, ConfigError> {
    Loader::new().build()
}
