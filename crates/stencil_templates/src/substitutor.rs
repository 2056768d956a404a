//! Variable substitution.
//!
//! Substitution reduces the token stream from [`crate::token`] into the
//! output string:
//!
//! | Token | Output |
//! |-------|--------|
//! | text | copied unchanged |
//! | `\{name\}` | literal `{name}` |
//! | `{outer_{inner}}` | copied unchanged |
//! | `{name}`, preserving | copied unchanged |
//! | `{name}`, known | the value, HTML-escaped unless `name` is a raw key |
//! | `{name}`, unknown | removed, `name` reported once |
//!
//! Each identifier is looked up and escaped once per call, so every
//! occurrence of a placeholder renders to the same text.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::token::{tokenize, Token};

/// Keys whose values are inserted without HTML escaping by default.
pub const DEFAULT_RAW_KEYS: &[&str] = &["input_markdown"];

/// Options controlling substitution.
#[derive(Debug, Clone)]
pub struct SubstituteOptions {
    /// Leave every placeholder untouched.
    pub preserve_placeholders: bool,
    /// Keys holding free-form markdown that must keep its literal markup.
    pub raw_keys: HashSet<String>,
}

impl Default for SubstituteOptions {
    fn default() -> Self {
        Self {
            preserve_placeholders: false,
            raw_keys: DEFAULT_RAW_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl SubstituteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preserve_placeholders(mut self, preserve: bool) -> Self {
        self.preserve_placeholders = preserve;
        self
    }

    pub fn with_raw_key(mut self, key: impl Into<String>) -> Self {
        self.raw_keys.insert(key.into());
        self
    }

    pub fn with_raw_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.raw_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_raw(&self, key: &str) -> bool {
        self.raw_keys.contains(key)
    }
}

/// Output of a substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub output: String,
    /// Unknown identifiers, each once, in order of first appearance.
    pub unknown_variables: Vec<String>,
}

/// Substitutes variables into templates.
pub struct VariableSubstitutor;

impl VariableSubstitutor {
    pub fn substitute(
        template: &str,
        variables: &HashMap<String, String>,
        options: &SubstituteOptions,
    ) -> Substitution {
        Self::reduce(&tokenize(template), template.len(), variables, options)
    }

    /// Fold a token stream into output text.
    pub fn reduce(
        tokens: &[Token<'_>],
        size_hint: usize,
        variables: &HashMap<String, String>,
        options: &SubstituteOptions,
    ) -> Substitution {
        let mut output = String::with_capacity(size_hint);
        let mut resolved: HashMap<&str, Cow<'_, str>> = HashMap::new();
        let mut unknown = Vec::new();
        let mut seen_unknown = HashSet::new();

        for token in tokens {
            match *token {
                Token::Text(text) | Token::Nested(text) => output.push_str(text),
                Token::Escaped(name) => push_braced(&mut output, name),
                Token::Placeholder(name) if options.preserve_placeholders => {
                    push_braced(&mut output, name)
                }
                Token::Placeholder(name) => match variables.get(name) {
                    Some(value) => {
                        let rendered = resolved
                            .entry(name)
                            .or_insert_with(|| render_value(name, value, options));
                        output.push_str(rendered);
                    }
                    None => {
                        if seen_unknown.insert(name) {
                            unknown.push(name.to_string());
                        }
                    }
                },
            }
        }

        if !unknown.is_empty() {
            debug!("Removed unknown placeholders: {}", unknown.join(", "));
        }

        Substitution {
            output,
            unknown_variables: unknown,
        }
    }
}

fn push_braced(output: &mut String, name: &str) {
    output.push('{');
    output.push_str(name);
    output.push('}');
}

fn render_value<'v>(key: &str, value: &'v str, options: &SubstituteOptions) -> Cow<'v, str> {
    if options.is_raw(key) {
        Cow::Borrowed(value)
    } else {
        html_escape(value)
    }
}

/// Escape `&`, `<`, `>`, `"`, and `'` as HTML entities.
pub fn html_escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
