//! Static site renderer for lamina.
//!
//! Takes the aggregated component tree and turns it into one HTML page per
//! component plus a JSON snapshot of the whole tree.

pub mod builder;
pub mod templates;

pub use builder::{BuildError, BuildResult, SiteBuilder, SiteConfig};
pub use templates::TemplateEngine;
