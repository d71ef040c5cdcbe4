//! The three-pass aggregation fold.

use lamina_extract::{
    Diagnostics, ParsedMarkupDoc, ParsedScriptDoc, ParsedStyleDoc, Warning,
};

use crate::markdown::{render_markdown, Highlight};
use crate::tree::{ComponentEntry, ComponentTree};

/// Fold the three intermediate collections into one component tree.
///
/// Never fails: markup docs seed the key space, style and script docs attach
/// to existing entries, and every anomaly is downgraded to a warning with
/// the offending record dropped. The returned tree contains an entry for
/// every (non-empty) markup doc and nothing else.
pub fn aggregate(
    markup: &[ParsedMarkupDoc],
    styles: &[ParsedStyleDoc],
    scripts: &[ParsedScriptDoc],
    highlighter: &dyn Highlight,
) -> (ComponentTree, Diagnostics) {
    let mut tree = ComponentTree::new();
    let mut diags = Diagnostics::new();

    // Seed pass: markup docs alone define which components exist
    for doc in markup {
        let Some(name) = doc.component_name() else {
            diags.warn(Warning::MarkupDocWithoutBlocks);
            continue;
        };

        let html = render_markdown(&doc.md, highlighter);
        let replaced = tree.insert(name.to_string(), ComponentEntry::new(html));

        // Last write wins, but duplicate names are almost certainly an
        // authoring error, so surface them
        if replaced {
            diags.warn(Warning::DuplicateComponent {
                name: name.to_string(),
            });
        }
    }

    // Style attach pass
    for doc in styles {
        let group = doc.group_key().unwrap_or("").to_string();
        match tree.get_mut(&group) {
            Some(entry) => entry.style_list_mut(doc.kind).push(doc.clone()),
            None => diags.warn(Warning::StyleDocWithoutComponent { group }),
        }
    }

    // Script attach pass
    for doc in scripts {
        let Some(key) = doc.component_key() else {
            diags.warn(Warning::DocletWithoutComponentTag {
                kind: doc.kind.clone(),
                name: doc.name.clone(),
            });
            continue;
        };

        match tree.get_mut(key) {
            Some(entry) => entry.scripts.push(doc.clone()),
            None => diags.warn(Warning::ScriptDocWithoutComponent {
                group: key.to_string(),
            }),
        }
    }

    tracing::info!(
        "Aggregated {} components ({} warnings)",
        tree.len(),
        diags.len()
    );

    (tree, diags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::HtmlHighlighter;
    use lamina_extract::{DocTag, MarkupBlock, StyleKind, StyleParameter};
    use pretty_assertions::assert_eq;

    fn markup(name: &str, md: &str) -> ParsedMarkupDoc {
        ParsedMarkupDoc {
            blocks: vec![MarkupBlock {
                name: name.to_string(),
                title: None,
            }],
            md: md.to_string(),
        }
    }

    fn style(group: &[&str], kind: StyleKind, name: &str) -> ParsedStyleDoc {
        ParsedStyleDoc {
            group: group.iter().map(|g| g.to_string()).collect(),
            kind,
            name: name.to_string(),
            description: None,
            parameters: Vec::new(),
        }
    }

    fn script(component: Option<&str>, kind: &str, name: &str) -> ParsedScriptDoc {
        ParsedScriptDoc {
            kind: kind.to_string(),
            name: name.to_string(),
            description: None,
            tags: component
                .map(|c| {
                    vec![DocTag {
                        title: "component".to_string(),
                        value: Some(c.to_string()),
                    }]
                })
                .unwrap_or_default(),
        }
    }

    #[test]
    fn button_end_to_end() {
        let markup_docs = vec![markup("button", "# Button")];
        let mut mixin = style(&["button"], StyleKind::Mixin, "primary");
        mixin.parameters.push(StyleParameter {
            name: "size".to_string(),
            description: None,
        });
        let script_docs = vec![script(Some("button"), "function", "toggle")];

        let (tree, diags) =
            aggregate(&markup_docs, &[mixin], &script_docs, &HtmlHighlighter);

        assert!(diags.is_empty());
        assert_eq!(tree.names(), &["button"]);

        let entry = tree.get("button").unwrap();
        assert!(entry.html.contains("<h1>Button</h1>"));
        assert_eq!(entry.mixins.len(), 1);
        assert_eq!(entry.mixins[0].name, "primary");
        assert_eq!(entry.mixins[0].parameters[0].name, "size");
        assert_eq!(entry.scripts.len(), 1);
        assert!(entry.variables.is_empty());
        assert!(entry.functions.is_empty());
    }

    #[test]
    fn every_entry_has_all_four_lists() {
        let (tree, _) = aggregate(&[markup("badge", "Badge")], &[], &[], &HtmlHighlighter);

        let entry = tree.get("badge").unwrap();
        assert!(entry.variables.is_empty());
        assert!(entry.mixins.is_empty());
        assert!(entry.functions.is_empty());
        assert!(entry.scripts.is_empty());
    }

    #[test]
    fn style_docs_attach_by_kind_in_original_order() {
        let markup_docs = vec![markup("grid", "")];
        let styles = vec![
            style(&["grid"], StyleKind::Variable, "gutter"),
            style(&["grid"], StyleKind::Mixin, "row"),
            style(&["grid"], StyleKind::Variable, "columns"),
            style(&["grid"], StyleKind::Function, "span"),
        ];

        let (tree, diags) = aggregate(&markup_docs, &styles, &[], &HtmlHighlighter);

        assert!(diags.is_empty());
        let entry = tree.get("grid").unwrap();
        let vars: Vec<_> = entry.variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(vars, vec!["gutter", "columns"]);
        assert_eq!(entry.mixins[0].name, "row");
        assert_eq!(entry.functions[0].name, "span");
    }

    #[test]
    fn unmatched_style_doc_warns_without_creating_a_key() {
        let markup_docs = vec![markup("button", "")];
        let styles = vec![style(&["missing"], StyleKind::Variable, "orphan")];

        let (tree, diags) = aggregate(&markup_docs, &styles, &[], &HtmlHighlighter);

        assert_eq!(tree.names(), &["button"]);
        assert!(!tree.contains("missing"));
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags.warnings()[0],
            Warning::StyleDocWithoutComponent {
                group: "missing".to_string()
            }
        );
    }

    #[test]
    fn untagged_doclet_warns_and_is_dropped() {
        let markup_docs = vec![markup("button", "")];
        let scripts = vec![script(None, "function", "stray")];

        let (tree, diags) = aggregate(&markup_docs, &[], &scripts, &HtmlHighlighter);

        assert!(tree.get("button").unwrap().scripts.is_empty());
        assert_eq!(
            diags.warnings()[0],
            Warning::DocletWithoutComponentTag {
                kind: "function".to_string(),
                name: "stray".to_string()
            }
        );
    }

    #[test]
    fn doclet_with_unknown_component_warns_and_is_dropped() {
        let scripts = vec![script(Some("ghost"), "class", "Ghost")];

        let (tree, diags) = aggregate(&[], &[], &scripts, &HtmlHighlighter);

        assert!(tree.is_empty());
        assert_eq!(
            diags.warnings()[0],
            Warning::ScriptDocWithoutComponent {
                group: "ghost".to_string()
            }
        );
    }

    #[test]
    fn duplicate_markup_doc_wins_last_and_warns() {
        let markup_docs = vec![markup("button", "first"), markup("button", "second")];

        let (tree, diags) = aggregate(&markup_docs, &[], &[], &HtmlHighlighter);

        assert_eq!(tree.len(), 1);
        assert!(tree.get("button").unwrap().html.contains("second"));
        assert_eq!(
            diags.warnings()[0],
            Warning::DuplicateComponent {
                name: "button".to_string()
            }
        );
    }

    #[test]
    fn markup_doc_without_blocks_is_skipped() {
        let docs = vec![ParsedMarkupDoc {
            blocks: vec![],
            md: "orphan".to_string(),
        }];

        let (tree, diags) = aggregate(&docs, &[], &[], &HtmlHighlighter);

        assert!(tree.is_empty());
        assert_eq!(diags.warnings()[0], Warning::MarkupDocWithoutBlocks);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let markup_docs = vec![markup("button", "# B"), markup("modal", "# M")];
        let styles = vec![
            style(&["button"], StyleKind::Variable, "radius"),
            style(&["modal"], StyleKind::Mixin, "overlay"),
        ];
        let scripts = vec![script(Some("modal"), "function", "open")];

        let (first, _) = aggregate(&markup_docs, &styles, &scripts, &HtmlHighlighter);
        let (second, _) = aggregate(&markup_docs, &styles, &scripts, &HtmlHighlighter);

        assert_eq!(first, second);
    }

    #[test]
    fn seed_order_follows_markup_discovery_order() {
        let markup_docs = vec![
            markup("zeta", ""),
            markup("alpha", ""),
            markup("kappa", ""),
        ];

        let (tree, _) = aggregate(&markup_docs, &[], &[], &HtmlHighlighter);

        assert_eq!(tree.names(), &["zeta", "alpha", "kappa"]);
    }
}
