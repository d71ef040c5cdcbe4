//! The unified component tree.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use lamina_extract::{ParsedScriptDoc, ParsedStyleDoc, StyleKind};

/// Everything known about one component: rendered markup body plus the
/// stylesheet and script docs that declared membership in it.
///
/// All four list fields are always present so the renderer can iterate
/// unconditionally, and they serialize even when empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentEntry {
    /// Body markdown rendered to HTML
    pub html: String,

    /// Stylesheet docs with kind = variable, in attachment order
    pub variables: Vec<ParsedStyleDoc>,

    /// Stylesheet docs with kind = mixin
    pub mixins: Vec<ParsedStyleDoc>,

    /// Stylesheet docs with kind = function
    pub functions: Vec<ParsedStyleDoc>,

    /// Script doclets
    pub scripts: Vec<ParsedScriptDoc>,
}

impl ComponentEntry {
    /// A fresh entry with empty attachment lists.
    pub fn new(html: String) -> Self {
        Self {
            html,
            variables: Vec::new(),
            mixins: Vec::new(),
            functions: Vec::new(),
            scripts: Vec::new(),
        }
    }

    /// The attachment list a style doc of the given kind belongs in.
    pub fn style_list_mut(&mut self, kind: StyleKind) -> &mut Vec<ParsedStyleDoc> {
        match kind {
            StyleKind::Variable => &mut self.variables,
            StyleKind::Mixin => &mut self.mixins,
            StyleKind::Function => &mut self.functions,
        }
    }
}

/// Mapping from component name to entry, preserving insertion order.
///
/// The markup seed pass is the only place entries are created; re-inserting
/// an existing name replaces the entry but keeps its original position,
/// so page generation stays deterministic.
#[derive(Debug, Default, PartialEq)]
pub struct ComponentTree {
    names: Vec<String>,
    entries: HashMap<String, ComponentEntry>,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Returns true if an entry with this name already
    /// existed (and was replaced).
    pub fn insert(&mut self, name: String, entry: ComponentEntry) -> bool {
        let replaced = self.entries.insert(name.clone(), entry).is_some();
        if !replaced {
            self.names.push(name);
        }
        replaced
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ComponentEntry> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ComponentEntry> {
        self.entries.get_mut(name)
    }

    /// Component names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComponentEntry)> {
        self.names
            .iter()
            .filter_map(|name| self.entries.get(name).map(|e| (name.as_str(), e)))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Serialize for ComponentTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.names.len()))?;
        for (name, entry) in self.iter() {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}
