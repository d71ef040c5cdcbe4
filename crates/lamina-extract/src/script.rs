//! Script doclet parser.
//!
//! Resolves a glob pattern to a set of script source files and parses each
//! one's `/** ... */` doc comments into doclets. A failure in one file is
//! downgraded to a warning so the remaining files still contribute their
//! doclets; only a malformed glob pattern is fatal.

use std::fs;
use std::sync::LazyLock;

use regex::Regex;

use crate::coordinator::ExtractError;
use crate::diagnostics::{Diagnostics, Warning};
use crate::model::{DocTag, ParsedScriptDoc};

static RE_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*/\*\*(.*)$").unwrap());

static RE_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)\*/").unwrap());

static RE_STAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\*?\s?(.*)$").unwrap());

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z][\w-]*)\s*(.*)$").unwrap());

static RE_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:export\s+)?(?:async\s+)?function\s+([A-Za-z_$][\w$]*)").unwrap());

static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:export\s+)?class\s+([A-Za-z_$][\w$]*)").unwrap());

static RE_BINDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:var|let|const)\s+([A-Za-z_$][\w$]*)\s*=").unwrap());

static RE_METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z_$][\w$]*)\s*[:(]").unwrap());

/// Extract doclets from every file matching `pattern`, in glob order.
pub async fn extract_scripts(
    pattern: &str,
) -> Result<(Vec<ParsedScriptDoc>, Diagnostics), ExtractError> {
    let paths = glob::glob(pattern).map_err(|e| ExtractError::ScriptGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut docs = Vec::new();
    let mut diags = Diagnostics::new();

    for entry in paths {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                diags.warn(Warning::ScriptFileFailed {
                    path: e.path().display().to_string(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                diags.warn(Warning::ScriptFileFailed {
                    path: path.display().to_string(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        match parse_file(&content) {
            Ok(parsed) => docs.extend(parsed),
            Err(message) => diags.warn(Warning::ScriptFileFailed {
                path: path.display().to_string(),
                message,
            }),
        }
    }

    tracing::debug!("Script parser returned {} doclets", docs.len());

    Ok((docs, diags))
}

/// Parse all doclets in one source file.
fn parse_file(content: &str) -> Result<Vec<ParsedScriptDoc>, String> {
    let mut docs = Vec::new();
    let mut lines = content.lines().enumerate().peekable();

    while let Some((line_no, line)) = lines.next() {
        let Some(open) = RE_OPEN.captures(line) else {
            continue;
        };

        let mut body: Vec<String> = Vec::new();
        let remainder = &open[1];

        // One-line doclet: /** ... */
        if let Some(close) = RE_CLOSE.captures(remainder) {
            body.push(close[1].trim().to_string());
        } else {
            if !remainder.trim().is_empty() {
                body.push(remainder.trim().to_string());
            }

            let mut closed = false;
            for (_, line) in lines.by_ref() {
                if let Some(close) = RE_CLOSE.captures(line) {
                    let text = strip_star(&close[1]);
                    if !text.trim().is_empty() {
                        body.push(text);
                    }
                    closed = true;
                    break;
                }
                body.push(strip_star(line));
            }

            if !closed {
                return Err(format!("unclosed doc comment at line {}", line_no + 1));
            }
        }

        // The declaration follows on the next non-blank line
        let declaration = loop {
            let Some(&(_, line)) = lines.peek() else {
                break None;
            };
            if line.trim().is_empty() {
                lines.next();
                continue;
            }
            // Another doclet right behind this one leaves it declaration-less
            if RE_OPEN.is_match(line) {
                break None;
            }
            break Some(line);
        };

        docs.push(build_doclet(&body, declaration));
    }

    Ok(docs)
}

/// Strip a leading ` * ` continuation marker from a doclet body line.
fn strip_star(line: &str) -> String {
    RE_STAR
        .captures(line)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| line.to_string())
}

/// Assemble a doclet from its body lines and the following declaration.
fn build_doclet(body: &[String], declaration: Option<&str>) -> ParsedScriptDoc {
    let mut tags = Vec::new();
    let mut description = Vec::new();

    for line in body {
        if let Some(caps) = RE_TAG.captures(line) {
            let value = caps[2].trim();
            tags.push(DocTag {
                title: caps[1].to_string(),
                value: if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                },
            });
        } else {
            description.push(line.as_str());
        }
    }

    let (kind, name) = declaration.map(classify_declaration).unwrap_or_default();

    // An explicit @name tag wins over the declaration site
    let name = tags
        .iter()
        .find(|t| t.title == "name")
        .and_then(|t| t.value.clone())
        .or(name)
        .unwrap_or_else(|| "(anonymous)".to_string());

    let description = description.join("\n").trim().to_string();

    ParsedScriptDoc {
        kind: kind.unwrap_or_else(|| "member".to_string()),
        name,
        description: if description.is_empty() {
            None
        } else {
            Some(description)
        },
        tags,
    }
}

/// Derive (kind, name) from the declaration line following a doclet.
fn classify_declaration(line: &str) -> (Option<String>, Option<String>) {
    if let Some(caps) = RE_FUNCTION.captures(line) {
        (Some("function".to_string()), Some(caps[1].to_string()))
    } else if let Some(caps) = RE_CLASS.captures(line) {
        (Some("class".to_string()), Some(caps[1].to_string()))
    } else if let Some(caps) = RE_BINDING.captures(line) {
        (Some("member".to_string()), Some(caps[1].to_string()))
    } else if let Some(caps) = RE_METHOD.captures(line) {
        (Some("function".to_string()), Some(caps[1].to_string()))
    } else {
        (None, None)
    }
}
