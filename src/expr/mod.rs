//! Regular-expression construction algebra.
//!
//! Node trees are built bottom-up from combinators and rendered to pattern
//! text. Escaping is decided by where a character lands, so callers never
//! write a backslash by hand.
//!
//! # Rendered syntax
//!
//! | Construct                      | Text            |
//! |--------------------------------|-----------------|
//! | [`literal`] / [`text`]         | `a`, `\.`, `\+` |
//! | [`chars`] / [`chars_of`]       | `[a-z_]`        |
//! | [`CharacterField::negated`]    | `[^a-z_]`       |
//! | [`capturing`]                  | `(…)`           |
//! | [`non_capturing`]              | `(?:…)`         |
//! | [`negative_lookahead`]         | `(?!…)`         |
//! | [`one_of`]                     | `(?:A\|B\|C)`   |
//! | [`Quantify::maybe`]            | `X?`            |
//! | [`Quantify::zero_or_more`]     | `X*`            |
//! | [`Quantify::one_or_more`]      | `X+`            |
//! | [`Quantify::repeating`]        | `X{n}`          |
//! | [`Quantify::at_least`]         | `X{n,}`         |
//! | [`Quantify::repeating_between`]| `X{n,m}`        |
//! | [`UnicodeProperty::matching`]  | `\p{L}`         |
//! | [`line`]                       | `^…$`           |
//!
//! Non-ASCII characters render as `\x{h}` escapes, one per UTF-16 code unit.

pub mod ast;
pub mod char_class;
pub mod combinators;
pub mod property;
pub mod render;

pub use ast::{Character, Group, GroupKind, Literal, Node, Quantified, Quantifier, Sequence};
pub use char_class::{CharacterField, CharacterRange, FieldItem};
pub use combinators::{
    Lookahead, Quantify, capturing, char, chars, chars_of, line, literal, negative_lookahead,
    never, non_capturing, one_of, pure, sequence, text,
};
pub use property::{CharacterType, UnicodeProperty};
pub use render::{RenderResult, Unrepresentable};
