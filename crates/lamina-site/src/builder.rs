//! End-to-end site builder: extract, aggregate, snapshot, render.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use lamina_aggregate::{aggregate, ComponentTree, HtmlHighlighter};
use lamina_extract::{extract, ExtractConfig, ExtractError};

use crate::templates::TemplateEngine;

/// Configuration for building a style guide.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Markup source directory
    pub html_dir: PathBuf,

    /// Stylesheet source directory
    pub sass_dir: PathBuf,

    /// Glob pattern for script sources
    pub js_glob: String,

    /// External markup parser command
    pub markup_command: String,

    /// Output directory for rendered pages (erased on every run)
    pub dest: PathBuf,

    /// Output path for the serialized component tree
    pub dest_json: PathBuf,

    /// Site title shown in the page shell
    pub title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            html_dir: PathBuf::from("src/html"),
            sass_dir: PathBuf::from("src/sass"),
            js_glob: "src/js/**/*.js".to_string(),
            markup_command: "lamina-markup-parser".to_string(),
            dest: PathBuf::from("build"),
            dest_json: PathBuf::from("build/data.json"),
            title: "Style Guide".to_string(),
        }
    }
}

/// Result of a build run.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of components rendered
    pub components: usize,

    /// Warnings raised during extraction and aggregation, in order
    pub warnings: Vec<lamina_extract::Warning>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that abort a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Failed to render template: {0}")]
    Template(String),

    #[error("Failed to serialize component tree: {0}")]
    Serialize(String),

    #[error("Failed to write output: {0}")]
    Write(String),
}

/// Builds the full style guide from the three documentation sources.
pub struct SiteBuilder {
    config: SiteConfig,
    templates: TemplateEngine,
    highlighter: HtmlHighlighter,
}

impl SiteBuilder {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
            highlighter: HtmlHighlighter,
        }
    }

    /// Run the whole pipeline. Extraction failures abort before any output
    /// is written; everything downstream degrades to warnings.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let extract_config = ExtractConfig {
            html_dir: self.config.html_dir.clone(),
            sass_dir: self.config.sass_dir.clone(),
            js_glob: self.config.js_glob.clone(),
            markup_command: self.config.markup_command.clone(),
        };

        let extraction = extract(&extract_config).await?;

        let (tree, agg_diags) = aggregate(
            &extraction.markup,
            &extraction.styles,
            &extraction.scripts,
            &self.highlighter,
        );

        // Extraction warnings happened first; keep that order
        let mut diagnostics = extraction.diagnostics;
        diagnostics.extend(agg_diags);

        self.reset_dest()?;
        self.write_snapshot(&tree)?;
        self.write_pages(&tree)?;

        let duration = start.elapsed();

        tracing::info!(
            "Built {} component pages in {}ms",
            tree.len(),
            duration.as_millis()
        );

        Ok(BuildResult {
            components: tree.len(),
            warnings: diagnostics.into_iter().collect(),
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.dest.clone(),
        })
    }

    /// Erase and recreate the output directory.
    fn reset_dest(&self) -> Result<(), BuildError> {
        if self.config.dest.exists() {
            fs::remove_dir_all(&self.config.dest)
                .map_err(|e| BuildError::Write(e.to_string()))?;
        }
        fs::create_dir_all(&self.config.dest).map_err(|e| BuildError::Write(e.to_string()))?;
        Ok(())
    }

    /// Serialize the whole tree to the configured JSON path.
    fn write_snapshot(&self, tree: &ComponentTree) -> Result<(), BuildError> {
        let json =
            serde_json::to_string_pretty(tree).map_err(|e| BuildError::Serialize(e.to_string()))?;

        if let Some(parent) = self.config.dest_json.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| BuildError::Write(e.to_string()))?;
            }
        }

        fs::write(&self.config.dest_json, json).map_err(|e| BuildError::Write(e.to_string()))?;

        Ok(())
    }

    /// Render one page per component via the two-stage template render.
    fn write_pages(&self, tree: &ComponentTree) -> Result<(), BuildError> {
        for (name, entry) in tree.iter() {
            let body = self
                .templates
                .render_component(name, entry)
                .map_err(|e| BuildError::Template(e.to_string()))?;

            let page = self
                .templates
                .render_layout(&self.config.title, name, &body, tree.names())
                .map_err(|e| BuildError::Template(e.to_string()))?;

            let path = self.config.dest.join(format!("{}.html", name));
            fs::write(&path, page).map_err(|e| BuildError::Write(e.to_string()))?;

            tracing::debug!("Wrote {}", path.display());
        }

        Ok(())
    }
}
