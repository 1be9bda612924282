//! Compiled patterns: the boundary to the host regex engine.
//!
//! A [`Pattern`] is made from a fully rendered node tree. Rendering happens
//! first; the engine is never invoked for a tree that cannot be rendered. All
//! positions reported by this module are **character** (not byte) offsets.
//!
//! The host engine is [`fancy_regex`], a backtracking engine with lookaround.
//! A `Pattern` may be shared between threads because the engine's compiled
//! regex is `Send + Sync`; that guarantee comes from the engine, not from this
//! crate.

pub mod dialect;

use std::borrow::Cow;
use std::fmt;

use fancy_regex::{Regex, RegexBuilder};
use log::debug;

use crate::expr::{Node, Unrepresentable};

/// Default budget of backtracking steps for a single search.
pub const DEFAULT_BACKTRACK_LIMIT: usize = 1_000_000;

/// Errors raised while compiling or running a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The node tree has no rendering; the engine was not invoked.
    CannotRender(Unrepresentable),
    /// The engine refused text that the algebra produced.
    ///
    /// This is always a defect in the algebra or its dialect translation,
    /// never a property of the input being matched.
    EngineRejectedPattern { pattern: String, message: String },
    /// A search exhausted the engine's backtracking budget.
    CatastrophicMatchCost { pattern: String, message: String },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CannotRender(reason) => write!(f, "Cannot render pattern: {reason}"),
            Self::EngineRejectedPattern { pattern, message } => {
                write!(f, "Regex engine rejected pattern {pattern:?}: {message}")
            }
            Self::CatastrophicMatchCost { pattern, message } => {
                write!(f, "Search with pattern {pattern:?} gave up: {message}")
            }
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CannotRender(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<Unrepresentable> for PatternError {
    fn from(reason: Unrepresentable) -> Self {
        Self::CannotRender(reason)
    }
}

/// Limits handed to the host engine when compiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Backtracking steps allowed per search before it is abandoned.
    pub backtrack_limit: usize,
    /// Size limit for the compiled automata the engine delegates to.
    /// `None` keeps the engine's default.
    pub delegate_size_limit: Option<usize>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
            delegate_size_limit: None,
        }
    }
}

/// A compiled, engine-ready regular expression.
///
/// Not `Clone`: every instance owns its compiled engine state. Matching keeps
/// no position between calls.
#[derive(Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

// ─── Compilation ────────────────────────────────────────────────────────────

impl Pattern {
    /// Render `root` and compile it with default engine options.
    pub fn compile(root: impl Into<Node>) -> Result<Self, PatternError> {
        Self::compile_with(root, &EngineOptions::default())
    }

    pub fn compile_with(
        root: impl Into<Node>,
        options: &EngineOptions,
    ) -> Result<Self, PatternError> {
        let root: Node = root.into();
        let source = root.render()?;
        let engine_source = dialect::translate(&source);
        debug!("compiling pattern {source:?} as {engine_source:?}");

        let mut builder = RegexBuilder::new(&engine_source);
        builder.backtrack_limit(options.backtrack_limit);
        if let Some(limit) = options.delegate_size_limit {
            builder.delegate_size_limit(limit);
        }
        let regex = builder
            .build()
            .map_err(|err| PatternError::EngineRejectedPattern {
                pattern: source.clone(),
                message: err.to_string(),
            })?;
        Ok(Self { source, regex })
    }

    /// The rendered pattern text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The text actually handed to the engine.
    pub fn engine_source(&self) -> &str {
        self.regex.as_str()
    }
}

// ─── Matching ───────────────────────────────────────────────────────────────

impl Pattern {
    /// Whether the first match covers the whole of `input`.
    ///
    /// Only the first match is considered: a pattern whose first match is a
    /// prefix of `input` does not fully match, even if another alternative
    /// could have covered it.
    pub fn fully_matches(&self, input: &str) -> Result<bool, PatternError> {
        let found = self
            .regex
            .find(input)
            .map_err(|err| match_failure(&self.source, err))?;
        let Some(found) = found else {
            return Ok(false);
        };
        let start = input[..found.start()].chars().count();
        let end = start + found.as_str().chars().count();
        Ok(start == 0 && end == input.chars().count())
    }

    /// Every non-overlapping match in `input`, leftmost first.
    ///
    /// The iterator is lazy; calling `find_all` again scans from the start.
    pub fn find_all<'r, 't>(&'r self, input: &'t str) -> Matches<'r, 't> {
        Matches {
            pattern: self,
            inner: self.regex.find_iter(input),
            failed: false,
        }
    }

    /// Replace every match with `template`; `$1` and `${name}` expand to groups.
    pub fn replace_all(&self, input: &str, template: &str) -> Result<String, PatternError> {
        self.regex
            .try_replacen(input, 0, template)
            .map(Cow::into_owned)
            .map_err(|err| match_failure(&self.source, err))
    }

    /// Remove every match from `input`.
    pub fn strip_all(&self, input: &str) -> Result<String, PatternError> {
        self.replace_all(input, "")
    }
}

/// Iterator over the matches of a [`Pattern`] in one input.
///
/// Stops after the first engine failure, which it yields.
pub struct Matches<'r, 't> {
    pattern: &'r Pattern,
    inner: fancy_regex::Matches<'r, 't>,
    failed: bool,
}

impl<'t> Iterator for Matches<'_, 't> {
    type Item = Result<&'t str, PatternError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.inner.next()? {
            Ok(found) => Some(Ok(found.as_str())),
            Err(err) => {
                self.failed = true;
                Some(Err(match_failure(&self.pattern.source, err)))
            }
        }
    }
}

/// Classify an engine error raised while searching.
fn match_failure(pattern: &str, err: fancy_regex::Error) -> PatternError {
    match err {
        fancy_regex::Error::RuntimeError(inner) => PatternError::CatastrophicMatchCost {
            pattern: pattern.to_string(),
            message: inner.to_string(),
        },
        other => PatternError::EngineRejectedPattern {
            pattern: pattern.to_string(),
            message: other.to_string(),
        },
    }
}
