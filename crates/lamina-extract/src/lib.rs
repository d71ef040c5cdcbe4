//! Documentation extraction for lamina.
//!
//! Three independent extractors produce the intermediate collections the
//! aggregation engine folds together: markup component docs (via an external
//! process), stylesheet doc comments, and script doclets. The coordinator
//! runs all three concurrently and fails the run if any of them fails.

pub mod coordinator;
pub mod diagnostics;
pub mod markup;
pub mod model;
pub mod script;
pub mod style;

pub use coordinator::{extract, ExtractConfig, ExtractError, Extraction};
pub use diagnostics::{Diagnostics, Warning};
pub use model::{
    DocTag, MarkupBlock, ParsedMarkupDoc, ParsedScriptDoc, ParsedStyleDoc, StyleKind,
    StyleParameter,
};
