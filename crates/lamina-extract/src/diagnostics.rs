//! Warning collection for recoverable anomalies.
//!
//! Warnings are collected into an ordered sequence returned alongside the
//! component tree (rather than written to a process-global sink) so callers
//! and tests can assert on them.

/// A recoverable anomaly. The offending record is dropped from the final
/// tree; the run still succeeds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Warning {
    #[error("Found a style doc missing HTML documentation: {group}")]
    StyleDocWithoutComponent { group: String },

    #[error("Found a script doclet missing a component name: {kind} {name}")]
    DocletWithoutComponentTag { kind: String, name: String },

    #[error("Found a script doc missing HTML documentation: {group}")]
    ScriptDocWithoutComponent { group: String },

    #[error("Duplicate component name '{name}' - the later markup doc replaces the earlier one")]
    DuplicateComponent { name: String },

    #[error("Markup doc has no component blocks and was skipped")]
    MarkupDocWithoutBlocks,

    #[error("Unrecognized stylesheet doc kind in {path}: {kind}")]
    UnknownStyleKind { path: String, kind: String },

    #[error("Failed to parse script file {path}: {message}")]
    ScriptFileFailed { path: String, message: String },
}

/// Ordered collector of warnings.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning, echoing it to the log channel.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Absorb all warnings from another collector, preserving order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Warning;
    type IntoIter = std::vec::IntoIter<Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.warnings.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_warnings_in_order() {
        let mut diags = Diagnostics::new();

        diags.warn(Warning::StyleDocWithoutComponent {
            group: "missing".to_string(),
        });
        diags.warn(Warning::DocletWithoutComponentTag {
            kind: "function".to_string(),
            name: "init".to_string(),
        });

        assert_eq!(diags.len(), 2);
        assert!(matches!(
            diags.warnings()[0],
            Warning::StyleDocWithoutComponent { .. }
        ));
        assert!(matches!(
            diags.warnings()[1],
            Warning::DocletWithoutComponentTag { .. }
        ));
    }

    #[test]
    fn extend_preserves_order() {
        let mut first = Diagnostics::new();
        first.warn(Warning::MarkupDocWithoutBlocks);

        let mut second = Diagnostics::new();
        second.warn(Warning::DuplicateComponent {
            name: "button".to_string(),
        });

        first.extend(second);

        assert_eq!(first.len(), 2);
        assert!(matches!(
            first.warnings()[1],
            Warning::DuplicateComponent { .. }
        ));
    }

    #[test]
    fn warning_messages_name_the_offender() {
        let w = Warning::StyleDocWithoutComponent {
            group: "toolbar".to_string(),
        };
        assert_eq!(
            w.to_string(),
            "Found a style doc missing HTML documentation: toolbar"
        );
    }
}
