// file: src/highlight/mod.rs
// description: wraps search term matches in <mark> tags for UI rendering
// reference: https://docs.rs/regex

use crate::error::{AppError, Result};
use regex::{Regex, RegexBuilder};

/// How a search term is matched against the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The term is escaped and matched as an exact substring.
    Literal,
    /// The term is compiled as a live regular expression. Metacharacters in
    /// the term change matching semantics; callers wanting exact-substring
    /// behavior must use `Literal` instead.
    Pattern,
}

/// Compiled highlighter for a single search term.
///
/// Matching is case-insensitive and non-overlapping; every occurrence is
/// wrapped in `<mark>...</mark>` with the original casing preserved.
#[derive(Debug, Clone)]
pub struct Highlighter {
    // None when the term is empty, which makes highlighting the identity
    regex: Option<Regex>,
}

impl Highlighter {
    /// Compile a highlighter for `term`.
    ///
    /// An empty term yields a no-op highlighter. In `Pattern` mode an invalid
    /// expression is a construction error; it is never caught internally.
    pub fn new(term: &str, mode: MatchMode) -> Result<Self> {
        if term.is_empty() {
            return Ok(Self { regex: None });
        }

        let source = match mode {
            MatchMode::Literal => regex::escape(term),
            MatchMode::Pattern => term.to_string(),
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|source| AppError::Pattern {
                pattern: term.to_string(),
                source,
            })?;

        Ok(Self { regex: Some(regex) })
    }

    /// Wrap every match of the term in `text` with `<mark>` tags.
    pub fn highlight(&self, text: &str) -> String {
        match &self.regex {
            None => text.to_string(),
            Some(regex) => regex.replace_all(text, "<mark>${0}</mark>").into_owned(),
        }
    }
}

/// One-shot highlight with `Pattern` semantics, matching the original
/// frontend helper: `search_term` is a live expression, so unescaped
/// metacharacters alter matching. Prefer constructing a [`Highlighter`]
/// with an explicit [`MatchMode`] in new code.
pub fn highlight(text: &str, search_term: &str) -> Result<String> {
    Ok(Highlighter::new(search_term, MatchMode::Pattern)?.highlight(text))
}
