//! Template tokenizer.
//!
//! Templates are scanned line by line into a flat token stream. A token
//! never spans a line break, and the line terminator (including any `\r`
//! and trailing whitespace) always lands in a `Text` token, so concatenating
//! the raw form of every token reproduces the input byte for byte.
//!
//! # Grammar
//!
//! - `\{name\}` - escaped placeholder, rendered as literal `{name}`
//! - `{name}` - placeholder
//! - `{outer_{inner}}` - nested placeholder, passed through verbatim
//! - anything else, including `{ "json": 1 }` and unbalanced braces - text
//!
//! Placeholder content is "identifier-shaped": ASCII letters, digits, `_`,
//! `-`, or `.`. Whether the identifier is a *legal* name is decided later by
//! a `NameValidator`, so `{user-name}` still tokenizes as a placeholder.
//!
//! This includes literal braces that happen to be identifier-shaped, such as
//! the regex quantifier in `\d{3}`: it tokenizes as the placeholder `3` and
//! is then rejected as an invalid name. Write `\d\{3\}` to keep the braces.

/// A lexical unit of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text copied through unchanged.
    Text(&'a str),
    /// The identifier of an escaped `\{name\}` placeholder.
    Escaped(&'a str),
    /// The identifier of a `{name}` placeholder.
    Placeholder(&'a str),
    /// The full raw text of a nested placeholder, braces included.
    Nested(&'a str),
}

impl Token<'_> {
    /// Whether the token refers to a substitution site.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Token::Placeholder(_))
    }
}

/// Tokenize a whole template, one line at a time.
pub fn tokenize(template: &str) -> Vec<Token<'_>> {
    template.split_inclusive('\n').flat_map(tokenize_line).collect()
}

/// Tokenize a single line (with or without its terminator).
pub fn tokenize_line(line: &str) -> Vec<Token<'_>> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let matched = match bytes[i] {
            b'\\' => match_escaped(line, i),
            b'{' => match_group(line, i),
            _ => None,
        };

        match matched {
            Some((token, end)) => {
                if text_start < i {
                    tokens.push(Token::Text(&line[text_start..i]));
                }
                tokens.push(token);
                i = end;
                text_start = end;
            }
            None => i += 1,
        }
    }

    if text_start < bytes.len() {
        tokens.push(Token::Text(&line[text_start..]));
    }

    tokens
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.')
}

/// Match `\{ident\}` starting at `start`. Returns the token and end offset.
fn match_escaped(line: &str, start: usize) -> Option<(Token<'_>, usize)> {
    let bytes = line.as_bytes();
    if bytes.get(start + 1) != Some(&b'{') {
        return None;
    }

    let ident_start = start + 2;
    let mut j = ident_start;
    while j < bytes.len() && is_identifier_byte(bytes[j]) {
        j += 1;
    }

    if j == ident_start || bytes.get(j) != Some(&b'\\') || bytes.get(j + 1) != Some(&b'}') {
        return None;
    }

    Some((Token::Escaped(&line[ident_start..j]), j + 2))
}

/// Match a brace group starting at `start`.
///
/// The group must close on the same line. Its outermost content (the
/// characters outside any inner group) must be identifier-shaped; when inner
/// groups exist the whole group is a nested placeholder.
fn match_group(line: &str, start: usize) -> Option<(Token<'_>, usize)> {
    let bytes = line.as_bytes();
    let mut depth = 0usize;
    let mut has_inner = false;
    let mut shell_is_identifier = true;
    let mut shell_len = 0usize;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        let j = start + offset;
        match b {
            b'{' => {
                depth += 1;
                if depth > 1 {
                    has_inner = true;
                }
            }
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    if !shell_is_identifier {
                        return None;
                    }
                    if has_inner {
                        return Some((Token::Nested(&line[start..=j]), j + 1));
                    }
                    if shell_len == 0 {
                        return None;
                    }
                    return Some((Token::Placeholder(&line[start + 1..j]), j + 1));
                }
            }
            b'\n' | b'\r' => return None,
            _ if depth == 1 => {
                shell_len += 1;
                if !is_identifier_byte(b) {
                    shell_is_identifier = false;
                }
            }
            _ => {}
        }
    }

    None
}
