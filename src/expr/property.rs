//! Unicode property tags (`\p{…}` / `\P{…}`) and character-type shorthands.

use super::ast::{Literal, Node};

/// General-category properties usable with `\p{…}` and `\P{…}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnicodeProperty {
    /// Any kind of letter from any language.
    Letter,
    /// A lowercase letter that has an uppercase variant.
    LowercaseLetter,
    /// An uppercase letter that has a lowercase variant.
    UppercaseLetter,
    /// A letter used at the start of a word when only the first letter is
    /// capitalised.
    TitlecaseLetter,
    /// Union of the uppercase, lowercase and titlecase letters.
    CasedLetter,
    ModifierLetter,
    /// A letter or ideograph without case variants.
    OtherLetter,
    /// A character combined with another (accents, enclosing boxes).
    Mark,
    NonSpacingMark,
    SpacingMark,
    EnclosingMark,
    /// Any kind of whitespace or invisible separator.
    Separator,
}

impl UnicodeProperty {
    pub fn code(self) -> &'static str {
        match self {
            Self::Letter => "L",
            Self::LowercaseLetter => "Ll",
            Self::UppercaseLetter => "Lu",
            Self::TitlecaseLetter => "Lt",
            Self::CasedLetter => "L&",
            Self::ModifierLetter => "Lm",
            Self::OtherLetter => "Lo",
            Self::Mark => "M",
            Self::NonSpacingMark => "Mn",
            Self::SpacingMark => "Mc",
            Self::EnclosingMark => "Me",
            Self::Separator => "Z",
        }
    }

    /// A character with this property, `\p{X}`.
    pub fn matching(self) -> Node {
        Literal::new(format!("\\p{{{}}}", self.code())).into()
    }

    /// A character without this property, `\P{X}`.
    pub fn not_matching(self) -> Node {
        Literal::new(format!("\\P{{{}}}", self.code())).into()
    }
}

/// Predefined character types.
///
/// Vertical whitespace is line feed, vertical tab, form feed, carriage return,
/// next line (U+0085) and the line and paragraph separators. Horizontal
/// whitespace is tab and the space separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterType {
    Any,                     // .
    Decimal,                 // \d
    NotDecimal,              // \D
    Whitespace,              // \s
    NotWhitespace,           // \S
    Word,                    // \w
    NotWord,                 // \W
    NotNewline,              // \N
    HorizontalWhitespace,    // \h
    NotHorizontalWhitespace, // \H
    VerticalWhitespace,      // \v
    NotVerticalWhitespace,   // \V
    Newline,                 // \R, `\r\n` or one vertical whitespace character
}

impl CharacterType {
    pub fn token(self) -> &'static str {
        match self {
            Self::Any => ".",
            Self::Decimal => "\\d",
            Self::NotDecimal => "\\D",
            Self::Whitespace => "\\s",
            Self::NotWhitespace => "\\S",
            Self::Word => "\\w",
            Self::NotWord => "\\W",
            Self::NotNewline => "\\N",
            Self::HorizontalWhitespace => "\\h",
            Self::NotHorizontalWhitespace => "\\H",
            Self::VerticalWhitespace => "\\v",
            Self::NotVerticalWhitespace => "\\V",
            Self::Newline => "\\R",
        }
    }
}

impl From<CharacterType> for Node {
    fn from(kind: CharacterType) -> Self {
        Literal::new(kind.token()).into()
    }
}
