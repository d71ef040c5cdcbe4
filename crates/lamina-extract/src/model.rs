//! Intermediate data model shared by the three extractors.

use serde::{Deserialize, Serialize};

/// A single named block inside a markup component doc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupBlock {
    /// Canonical component key
    pub name: String,

    /// Human-readable heading, if the parser emits one
    #[serde(default)]
    pub title: Option<String>,
}

/// One markup component doc, as emitted on stdout by the external markup
/// parser. The first block's name is the canonical component key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedMarkupDoc {
    pub blocks: Vec<MarkupBlock>,

    /// Raw markdown body of the component doc
    pub md: String,
}

impl ParsedMarkupDoc {
    /// Canonical component name, taken from the first block.
    pub fn component_name(&self) -> Option<&str> {
        self.blocks.first().map(|b| b.name.as_str())
    }
}

/// The closed set of stylesheet doc kinds the aggregator recognizes.
///
/// Any other declaration kind is rejected at the extraction boundary with a
/// warning rather than flowing downstream as a free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    Variable,
    Mixin,
    Function,
}

/// A parameter declared on a mixin or function doc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleParameter {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// One stylesheet doc comment, attached to a component via its `@group` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedStyleDoc {
    /// Group annotation values; the first element is the component key
    pub group: Vec<String>,

    pub kind: StyleKind,

    /// Name of the documented variable/mixin/function
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<StyleParameter>,
}

impl ParsedStyleDoc {
    /// Component key this doc wants to attach to.
    pub fn group_key(&self) -> Option<&str> {
        self.group.first().map(|g| g.as_str())
    }
}

/// A single `@tag value` annotation inside a script doclet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocTag {
    pub title: String,

    #[serde(default)]
    pub value: Option<String>,
}

/// One script doclet, attached to a component via a `@component` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedScriptDoc {
    /// Free-form kind string from the declaration site (function, class, ...)
    pub kind: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<DocTag>,
}

impl ParsedScriptDoc {
    /// Linear scan of the tag list for the first component-declaring tag.
    pub fn component_key(&self) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.title == "component")
            .and_then(|t| t.value.as_deref())
    }
}
