//! Extraction coordinator.
//!
//! Runs the three extractors concurrently and bundles their outputs. Any
//! fatal extractor error aborts the whole run before anything is written.

use std::path::PathBuf;

use crate::diagnostics::Diagnostics;
use crate::model::{ParsedMarkupDoc, ParsedScriptDoc, ParsedStyleDoc};
use crate::{markup, script, style};

/// Source locations for the three extractors.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Markup source directory, handed to the external markup parser
    pub html_dir: PathBuf,

    /// Stylesheet source directory
    pub sass_dir: PathBuf,

    /// Glob pattern for script sources
    pub js_glob: String,

    /// External markup parser command; the markup directory is appended as
    /// the final argument
    pub markup_command: String,
}

/// Errors that abort extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Failed to run markup parser '{command}': {message}")]
    MarkupCommand { command: String, message: String },

    #[error("Markup parser '{command}' exited with status {status:?}: {stderr}")]
    MarkupParser {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("Markup parser '{command}' produced malformed output: {message}")]
    MarkupOutput { command: String, message: String },

    #[error("Failed to read stylesheet source {path}: {message}")]
    StyleRead { path: String, message: String },

    #[error("Invalid script glob pattern '{pattern}': {message}")]
    ScriptGlob { pattern: String, message: String },
}

/// The three intermediate collections plus warnings raised at the
/// extraction boundary.
#[derive(Debug)]
pub struct Extraction {
    pub markup: Vec<ParsedMarkupDoc>,
    pub styles: Vec<ParsedStyleDoc>,
    pub scripts: Vec<ParsedScriptDoc>,
    pub diagnostics: Diagnostics,
}

/// Run all three extractions concurrently; fail if any of them fails.
pub async fn extract(config: &ExtractConfig) -> Result<Extraction, ExtractError> {
    let (markup, (styles, style_diags), (scripts, script_diags)) = tokio::try_join!(
        markup::extract_markup(&config.markup_command, &config.html_dir),
        style::extract_styles(&config.sass_dir),
        script::extract_scripts(&config.js_glob),
    )?;

    let mut diagnostics = Diagnostics::new();
    diagnostics.extend(style_diags);
    diagnostics.extend(script_diags);

    tracing::info!(
        "Extracted {} markup docs, {} style docs, {} script doclets",
        markup.len(),
        styles.len(),
        scripts.len()
    );

    Ok(Extraction {
        markup,
        styles,
        scripts,
        diagnostics,
    })
}
