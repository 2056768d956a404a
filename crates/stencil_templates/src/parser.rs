//! Placeholder extraction without substitution.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::token::{tokenize, Token};

/// The result of scanning a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedTemplate {
    /// The template text, unchanged.
    pub content: String,
    /// Every `{identifier}` referenced, duplicates collapsed.
    pub variable_names: BTreeSet<String>,
    /// Identifiers of escaped `\{identifier\}` placeholders.
    pub escaped: BTreeSet<String>,
    /// Raw nested placeholders, in order of appearance.
    pub nested: Vec<String>,
}

impl ParsedTemplate {
    /// Whether the template references the given variable.
    pub fn references(&self, name: &str) -> bool {
        self.variable_names.contains(name)
    }
}

/// Scans templates for placeholders.
///
/// The parser does not judge identifiers: `{user-name}` is collected like
/// any other name and rejected later by a `NameValidator`.
pub struct TemplateParser;

impl TemplateParser {
    pub fn parse(template: &str) -> ParsedTemplate {
        let mut parsed = ParsedTemplate {
            content: template.to_string(),
            ..Default::default()
        };

        for token in tokenize(template) {
            match token {
                Token::Placeholder(name) => {
                    parsed.variable_names.insert(name.to_string());
                }
                Token::Escaped(name) => {
                    parsed.escaped.insert(name.to_string());
                }
                Token::Nested(raw) => parsed.nested.push(raw.to_string()),
                Token::Text(_) => {}
            }
        }

        parsed
    }

    /// Placeholder identifiers in order of first appearance.
    pub fn names_in_order(template: &str) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        tokenize(template)
            .into_iter()
            .filter_map(|token| match token {
                Token::Placeholder(name) if seen.insert(name) => Some(name),
                _ => None,
            })
            .collect()
    }
}
