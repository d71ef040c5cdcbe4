//! Aggregation engine for lamina.
//!
//! Folds the three intermediate collections from extraction into one
//! insertion-ordered component tree. Markup docs define the key space;
//! style and script docs attach to existing entries or are dropped with a
//! warning. Aggregation itself never fails.

pub mod engine;
pub mod markdown;
pub mod tree;

pub use engine::aggregate;
pub use markdown::{render_markdown, Highlight, HtmlHighlighter};
pub use tree::{ComponentEntry, ComponentTree};
