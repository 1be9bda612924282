//! Character items, ranges and bracketed character fields.

use std::ops::RangeInclusive;

use super::ast::Character;

/// One entry between the brackets of a character field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldItem {
    Single(Character),
    Range(CharacterRange),
}

/// A closed range of characters, `lower-upper`.
///
/// Only meaningful inside a character field; there is no general-context
/// rendering for a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharacterRange {
    lower: char,
    upper: char,
}

impl CharacterRange {
    pub fn new(lower: char, upper: char) -> Self {
        Self { lower, upper }
    }

    pub fn lower(&self) -> char {
        self.lower
    }

    pub fn upper(&self) -> char {
        self.upper
    }
}

impl From<RangeInclusive<char>> for CharacterRange {
    fn from(range: RangeInclusive<char>) -> Self {
        Self::new(*range.start(), *range.end())
    }
}

impl From<char> for FieldItem {
    fn from(c: char) -> Self {
        FieldItem::Single(c.into())
    }
}

impl From<Character> for FieldItem {
    fn from(c: Character) -> Self {
        FieldItem::Single(c)
    }
}

impl From<CharacterRange> for FieldItem {
    fn from(range: CharacterRange) -> Self {
        FieldItem::Range(range)
    }
}

impl From<RangeInclusive<char>> for FieldItem {
    fn from(range: RangeInclusive<char>) -> Self {
        FieldItem::Range(range.into())
    }
}

/// A set of characters and ranges matching any one character, `[…]`, or any
/// character outside the set, `[^…]`.
///
/// No semantic validation is done: an empty field renders as `[]`, which no
/// engine accepts, and building one is the caller's mistake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CharacterField {
    items: Vec<FieldItem>,
    negated: bool,
}

impl CharacterField {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldItem>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            negated: false,
        }
    }

    /// A field matching every character *except* those in this field.
    ///
    /// Negation only applies once: negating `[^A-Z]` again leaves it as
    /// `[^A-Z]`, it does not flip back to `[A-Z]`.
    pub fn negated(self) -> Self {
        Self {
            negated: true,
            ..self
        }
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn items(&self) -> &[FieldItem] {
        &self.items
    }
}
