//! Stylesheet doc-comment parser - line-by-line state machine.
//!
//! Scans a stylesheet source tree for `///` doc comments and resolves each
//! block against the declaration that immediately follows it. Only variable,
//! mixin, and function declarations are recognized; anything else is dropped
//! with a warning at this boundary so no free-form kind string leaks
//! downstream.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::coordinator::ExtractError;
use crate::diagnostics::{Diagnostics, Warning};
use crate::model::{ParsedStyleDoc, StyleKind, StyleParameter};

static RE_DOC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*///\s?(.*)$").unwrap());

static RE_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^@group\s+(\S.*)$").unwrap());

static RE_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@param\s+(?:\{[^}]*\}\s+)?\$([A-Za-z][\w-]*)\s*(?:-\s*(.*))?$").unwrap()
});

static RE_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\$([A-Za-z][\w-]*)\s*:").unwrap());

static RE_MIXIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*@mixin\s+([A-Za-z][\w-]*)\s*(?:\(([^)]*)\))?").unwrap());

static RE_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*@function\s+([A-Za-z][\w-]*)\s*(?:\(([^)]*)\))?").unwrap());

static RE_BLANK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*$").unwrap());

/// Doc block accumulated while scanning `///` lines.
#[derive(Debug, Default)]
struct PendingDoc {
    group: Vec<String>,
    description: Vec<String>,
    parameters: Vec<StyleParameter>,
}

/// Extract stylesheet doc comments from every `.scss`/`.sass` file under
/// `sass_dir`. An unreadable tree or file is fatal; an unrecognized
/// declaration kind is a warning.
pub async fn extract_styles(
    sass_dir: &Path,
) -> Result<(Vec<ParsedStyleDoc>, Diagnostics), ExtractError> {
    if !sass_dir.exists() {
        return Err(ExtractError::StyleRead {
            path: sass_dir.display().to_string(),
            message: "directory not found".to_string(),
        });
    }

    let mut files: Vec<PathBuf> = WalkDir::new(sass_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            matches!(
                e.path().extension().and_then(|x| x.to_str()),
                Some("scss") | Some("sass")
            )
        })
        .map(|e| e.into_path())
        .collect();

    // Directory walk order is platform-dependent
    files.sort();

    let mut docs = Vec::new();
    let mut diags = Diagnostics::new();

    for file in files {
        let content = fs::read_to_string(&file).map_err(|e| ExtractError::StyleRead {
            path: file.display().to_string(),
            message: e.to_string(),
        })?;

        parse_file(&content, &file, &mut docs, &mut diags);
    }

    tracing::debug!("Stylesheet parser returned {} doc comments", docs.len());

    Ok((docs, diags))
}

/// Parse a single stylesheet file, appending docs and warnings in file order.
fn parse_file(content: &str, path: &Path, docs: &mut Vec<ParsedStyleDoc>, diags: &mut Diagnostics) {
    let mut pending: Option<PendingDoc> = None;

    for line in content.lines() {
        if let Some(caps) = RE_DOC.captures(line) {
            let text = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let doc = pending.get_or_insert_with(PendingDoc::default);

            if let Some(group) = RE_GROUP.captures(text) {
                doc.group
                    .extend(group[1].split_whitespace().map(str::to_string));
            } else if let Some(param) = RE_PARAM.captures(text) {
                doc.parameters.push(StyleParameter {
                    name: param[1].to_string(),
                    description: param.get(2).map(|m| m.as_str().to_string()),
                });
            } else {
                doc.description.push(text.to_string());
            }
            continue;
        }

        let Some(doc) = pending.take() else {
            continue;
        };

        // A doc block must be adjacent to its declaration
        if RE_BLANK.is_match(line) {
            continue;
        }

        match resolve_declaration(line, doc) {
            Ok(parsed) => docs.push(parsed),
            Err(kind) => diags.warn(Warning::UnknownStyleKind {
                path: path.display().to_string(),
                kind,
            }),
        }
    }
}

/// Resolve the declaration line following a doc block into a typed doc, or
/// return the unrecognized leading token.
fn resolve_declaration(line: &str, doc: PendingDoc) -> Result<ParsedStyleDoc, String> {
    let (kind, name, signature) = if let Some(caps) = RE_VARIABLE.captures(line) {
        (StyleKind::Variable, caps[1].to_string(), None)
    } else if let Some(caps) = RE_MIXIN.captures(line) {
        let sig = caps.get(2).map(|m| m.as_str().to_string());
        (StyleKind::Mixin, caps[1].to_string(), sig)
    } else if let Some(caps) = RE_FUNCTION.captures(line) {
        let sig = caps.get(2).map(|m| m.as_str().to_string());
        (StyleKind::Function, caps[1].to_string(), sig)
    } else {
        let token = line.split_whitespace().next().unwrap_or("").to_string();
        return Err(token);
    };

    let mut parameters = doc.parameters;

    // Fall back to the signature when no @param tags were written
    if parameters.is_empty() {
        if let Some(sig) = signature {
            parameters = parse_signature(&sig);
        }
    }

    let description = if doc.description.is_empty() {
        None
    } else {
        Some(doc.description.join("\n").trim().to_string()).filter(|s| !s.is_empty())
    };

    // Undocumented group falls into the "undefined" bucket, which no markup
    // doc defines, so the aggregator will warn and drop it
    let group = if doc.group.is_empty() {
        vec!["undefined".to_string()]
    } else {
        doc.group
    };

    Ok(ParsedStyleDoc {
        group,
        kind,
        name,
        description,
        parameters,
    })
}

/// Parameter names from a declaration signature like `$size, $color: red`.
fn parse_signature(signature: &str) -> Vec<StyleParameter> {
    signature
        .split(',')
        .filter_map(|part| {
            let part = part.trim();
            let name = part.strip_prefix('$')?;
            let name = name
                .split(|c: char| c == ':' || c.is_whitespace())
                .next()?
                .trim_end_matches("...");
            if name.is_empty() {
                return None;
            }
            Some(StyleParameter {
                name: name.to_string(),
                description: None,
            })
        })
        .collect()
}
