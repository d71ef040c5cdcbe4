//! Markdown rendering with pluggable syntax highlighting.
//!
//! Fenced code blocks are handed to a highlighter keyed by the block's
//! declared language. The highlighter is an external collaborator behind a
//! trait so tests can assert on delegation.

use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// Syntax highlighter for fenced code blocks. Implementations return a
/// complete HTML fragment for the block.
pub trait Highlight {
    fn highlight(&self, lang: &str, code: &str) -> String;
}

/// Default highlighter: escapes the source and tags it with the language
/// class, leaving actual colorizing to client-side tooling.
#[derive(Debug, Default)]
pub struct HtmlHighlighter;

impl Highlight for HtmlHighlighter {
    fn highlight(&self, lang: &str, code: &str) -> String {
        let escaped = escape_html(code);
        if lang.is_empty() {
            format!("<pre><code>{}</code></pre>", escaped)
        } else {
            format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                escape_html(lang),
                escaped
            )
        }
    }
}

/// Render a markdown body to HTML, routing fenced code blocks through the
/// highlighter.
pub fn render_markdown(md: &str, highlighter: &dyn Highlight) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(md, options);

    let mut events: Vec<Event> = Vec::new();
    let mut code_block: Option<(String, String)> = None; // (lang, source)

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match &kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .unwrap_or("")
                        .to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code_block = Some((lang, String::new()));
            }

            Event::Text(text) if code_block.is_some() => {
                if let Some((_, source)) = code_block.as_mut() {
                    source.push_str(&text);
                }
            }

            Event::End(TagEnd::CodeBlock) => {
                let (lang, source) = code_block.take().unwrap_or_default();
                events.push(Event::Html(highlighter.highlight(&lang, &source).into()));
            }

            other => events.push(other),
        }
    }

    let mut output = String::new();
    html::push_html(&mut output, events.into_iter());
    output
}

/// Minimal HTML escaping for code content.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
