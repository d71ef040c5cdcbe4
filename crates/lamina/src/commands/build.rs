//! Build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use lamina_site::{SiteBuilder, SiteConfig};

/// Configuration file structure (lamina.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    sources: SourcesConfig,
    #[serde(default)]
    output: OutputConfig,
    #[serde(default)]
    site: SiteSettings,
}

#[derive(Debug, Deserialize)]
struct SourcesConfig {
    /// Markup source directory handed to the external markup parser
    #[serde(default = "default_html")]
    html: String,
    /// Stylesheet source directory
    #[serde(default = "default_sass")]
    sass: String,
    /// Glob pattern for script sources
    #[serde(default = "default_js")]
    js: String,
    /// External markup parser command
    #[serde(default = "default_markup_command")]
    markup_command: String,
}

#[derive(Debug, Deserialize)]
struct OutputConfig {
    #[serde(default = "default_dest")]
    dest: String,
    #[serde(default = "default_dest_json")]
    dest_json: String,
}

#[derive(Debug, Deserialize)]
struct SiteSettings {
    #[serde(default = "default_title")]
    title: String,
}

fn default_html() -> String {
    "src/html".to_string()
}
fn default_sass() -> String {
    "src/sass".to_string()
}
fn default_js() -> String {
    "src/js/**/*.js".to_string()
}
fn default_markup_command() -> String {
    "lamina-markup-parser".to_string()
}
fn default_dest() -> String {
    "build".to_string()
}
fn default_dest_json() -> String {
    "build/data.json".to_string()
}
fn default_title() -> String {
    "Style Guide".to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            html: default_html(),
            sass: default_sass(),
            js: default_js(),
            markup_command: default_markup_command(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dest: default_dest(),
            dest_json: default_dest_json(),
        }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
    }
}

/// Load configuration from the config file if it exists.
/// Returns an error if the file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, json: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building style guide...");

    let file_config = load_config(config_path)?;

    let config = SiteConfig {
        html_dir: PathBuf::from(&file_config.sources.html),
        sass_dir: PathBuf::from(&file_config.sources.sass),
        js_glob: file_config.sources.js,
        markup_command: file_config.sources.markup_command,
        dest: output.unwrap_or_else(|| PathBuf::from(&file_config.output.dest)),
        dest_json: json.unwrap_or_else(|| PathBuf::from(&file_config.output.dest_json)),
        title: file_config.site.title,
    };

    let result = SiteBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} component pages in {}ms ({} warnings)",
        result.components,
        result.duration_ms,
        result.warnings.len()
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
