//! Fail-closed rendering of node trees to pattern text.
//!
//! A render either produces the complete text of a node or reports why some
//! fragment inside it cannot be represented. A composite never emits partial
//! text: the first unrepresentable child fails the whole render.

use std::fmt;

use log::warn;

use crate::escape::{EscapeContext, encode_scalar};

use super::ast::*;
use super::char_class::{CharacterField, CharacterRange, FieldItem};

/// A fragment with no faithful representation in the requested context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unrepresentable {
    /// A literal built with [`never`](super::never).
    Never,
    /// A character with no codepoints.
    EmptyCharacter(EscapeContext),
    InvertedRange { lower: char, upper: char },
    InvertedRepetition { min: u32, max: u32 },
}

impl fmt::Display for Unrepresentable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => write!(f, "Fragment is deliberately unrepresentable"),
            Self::EmptyCharacter(context) => {
                write!(f, "Empty character has no representation in {context}")
            }
            Self::InvertedRange { lower, upper } => {
                write!(f, "Character range {lower:?}-{upper:?} is inverted")
            }
            Self::InvertedRepetition { min, max } => {
                write!(f, "Repetition {{{min},{max}}} has a minimum above its maximum")
            }
        }
    }
}

impl std::error::Error for Unrepresentable {}

pub type RenderResult = Result<String, Unrepresentable>;

impl Character {
    /// Encode every codepoint of this character for `context`, in order.
    pub fn render(&self, context: EscapeContext) -> RenderResult {
        if self.as_str().is_empty() {
            warn!("cannot represent an empty character in {context}");
            return Err(Unrepresentable::EmptyCharacter(context));
        }
        Ok(self
            .as_str()
            .chars()
            .map(|c| encode_scalar(c, context))
            .collect())
    }
}

impl CharacterRange {
    /// Render as `lower-upper` for use between field brackets.
    pub fn render(&self) -> RenderResult {
        if self.lower() > self.upper() {
            return Err(Unrepresentable::InvertedRange {
                lower: self.lower(),
                upper: self.upper(),
            });
        }
        let lower = encode_scalar(self.lower(), EscapeContext::CharacterField);
        let upper = encode_scalar(self.upper(), EscapeContext::CharacterField);
        Ok(format!("{lower}-{upper}"))
    }
}

impl FieldItem {
    pub fn render(&self) -> RenderResult {
        match self {
            FieldItem::Single(c) => c.render(EscapeContext::CharacterField),
            FieldItem::Range(range) => range.render(),
        }
    }
}

impl CharacterField {
    pub fn render(&self) -> RenderResult {
        let body = self
            .items()
            .iter()
            .map(FieldItem::render)
            .collect::<RenderResult>()?;
        let negation = if self.is_negated() { "^" } else { "" };
        Ok(format!("[{negation}{body}]"))
    }
}

impl Sequence {
    pub fn render(&self) -> RenderResult {
        self.nodes().iter().map(Node::render).collect()
    }
}

impl Group {
    pub fn render(&self) -> RenderResult {
        let body = self.body().render()?;
        Ok(format!("({}{body})", self.kind().prefix()))
    }
}

impl Quantifier {
    /// The suffix text, or why it cannot be written.
    pub fn suffix(self) -> RenderResult {
        Ok(match self {
            Quantifier::Optional => "?".to_string(),
            Quantifier::ZeroOrMore => "*".to_string(),
            Quantifier::OneOrMore => "+".to_string(),
            Quantifier::Exactly(n) => format!("{{{n}}}"),
            Quantifier::AtLeast(n) => format!("{{{n},}}"),
            Quantifier::Between(min, max) if min > max => {
                return Err(Unrepresentable::InvertedRepetition { min, max });
            }
            Quantifier::Between(min, max) => format!("{{{min},{max}}}"),
        })
    }
}

impl Quantified {
    pub fn render(&self) -> RenderResult {
        let target = self.target().render()?;
        let suffix = self.quantifier().suffix()?;
        Ok(target + &suffix)
    }
}

impl Node {
    /// Render this node in general context.
    pub fn render(&self) -> RenderResult {
        match self {
            Node::Literal(literal) => literal
                .text()
                .map(str::to_string)
                .map_err(Unrepresentable::clone),
            Node::Char(c) => c.render(EscapeContext::General),
            Node::Field(field) => field.render(),
            Node::Sequence(seq) => seq.render(),
            Node::Group(group) => group.render(),
            Node::Quantified(quantified) => quantified.render(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq<const N: usize>(nodes: [Node; N]) -> Sequence {
        Sequence::new(nodes)
    }

    #[test]
    fn field_rendering() {
        let field = CharacterField::new([FieldItem::from('+'), ('0'..='9').into()]);
        assert_eq!(field.render().unwrap(), "[+0-9]");
        assert_eq!(field.negated().render().unwrap(), "[^+0-9]");
    }

    #[test]
    fn bare_hyphen_in_field_is_escaped() {
        let field = CharacterField::new(['a', '-', 'z']);
        assert_eq!(field.render().unwrap(), "[a\\-z]");
    }

    #[test]
    fn dot_in_field_is_not_escaped() {
        assert_eq!(CharacterField::new(['.']).render().unwrap(), "[.]");
        assert_eq!(Node::from('.').render().unwrap(), "\\.");
        assert_eq!(Node::from('-').render().unwrap(), "-");
    }

    #[test]
    fn range_renders_bounds() {
        assert_eq!(CharacterRange::new('A', 'Z').render().unwrap(), "A-Z");
        assert_eq!(CharacterRange::new('[', ']').render().unwrap(), "\\[-\\]");
    }

    #[test]
    fn inverted_range_fails_the_field() {
        let field = CharacterField::new([FieldItem::from('a'), ('z'..='a').into()]);
        assert_eq!(
            field.render(),
            Err(Unrepresentable::InvertedRange {
                lower: 'z',
                upper: 'a'
            })
        );
    }

    #[test]
    fn empty_field_is_not_validated() {
        assert_eq!(CharacterField::default().render().unwrap(), "[]");
    }

    #[test]
    fn empty_character_fails_in_both_contexts() {
        let empty = Character::cluster("");
        assert_eq!(
            empty.render(EscapeContext::General),
            Err(Unrepresentable::EmptyCharacter(EscapeContext::General))
        );
        let field = CharacterField::new([FieldItem::from('a'), empty.into()]);
        assert_eq!(
            field.render(),
            Err(Unrepresentable::EmptyCharacter(EscapeContext::CharacterField))
        );
    }

    #[test]
    fn cluster_encodes_each_scalar() {
        let cluster = Character::cluster("e\u{301}");
        assert_eq!(cluster.render(EscapeContext::General).unwrap(), "e\\x{301}");
    }

    #[test]
    fn group_prefixes() {
        let body = seq(['a'.into(), '.'.into()]);
        let render = |kind| Group::new(kind, body.clone()).render().unwrap();
        assert_eq!(render(GroupKind::Capturing), "(a\\.)");
        assert_eq!(render(GroupKind::NonCapturing), "(?:a\\.)");
        assert_eq!(render(GroupKind::NegativeLookahead), "(?!a\\.)");
    }

    #[test]
    fn sequence_fails_on_any_child() {
        let ok = seq(['a'.into(), Literal::new("\\d").into()]);
        assert_eq!(ok.render().unwrap(), "a\\d");

        let bad = seq(['a'.into(), Literal::never().into(), 'b'.into()]);
        assert_eq!(bad.render(), Err(Unrepresentable::Never));
    }

    #[test]
    fn first_failure_wins() {
        let bad = seq([
            Character::cluster("").into(),
            Literal::never().into(),
        ]);
        assert_eq!(
            bad.render(),
            Err(Unrepresentable::EmptyCharacter(EscapeContext::General))
        );
    }

    #[test]
    fn quantifier_suffixes() {
        assert_eq!(Quantifier::Optional.suffix().unwrap(), "?");
        assert_eq!(Quantifier::ZeroOrMore.suffix().unwrap(), "*");
        assert_eq!(Quantifier::OneOrMore.suffix().unwrap(), "+");
        assert_eq!(Quantifier::Exactly(4).suffix().unwrap(), "{4}");
        assert_eq!(Quantifier::AtLeast(2).suffix().unwrap(), "{2,}");
        assert_eq!(Quantifier::Between(4, 14).suffix().unwrap(), "{4,14}");
        assert_eq!(
            Quantifier::Between(3, 1).suffix(),
            Err(Unrepresentable::InvertedRepetition { min: 3, max: 1 })
        );
    }

    #[test]
    fn quantified_sequence_is_grouped() {
        let ab = Node::from(seq(['A'.into(), 'B'.into()]));
        let plus = Quantified::new(ab, Quantifier::OneOrMore);
        assert_eq!(plus.render().unwrap(), "(?:AB)+");
    }

    #[test]
    fn quantified_astral_character_is_grouped() {
        let smile = Quantified::new('\u{1F600}'.into(), Quantifier::ZeroOrMore);
        assert_eq!(smile.render().unwrap(), "(?:\\x{d83d}\\x{de00})*");
    }

    #[test]
    fn quantified_quantifier_is_grouped() {
        let inner = Quantified::new(CharacterField::new(['a']).into(), Quantifier::OneOrMore);
        let outer = Quantified::new(inner.into(), Quantifier::Optional);
        assert_eq!(outer.render().unwrap(), "(?:[a]+)?");
    }

    #[test]
    fn unrepresentable_display() {
        assert_eq!(
            Unrepresentable::EmptyCharacter(EscapeContext::CharacterField).to_string(),
            "Empty character has no representation in character field context"
        );
        assert_eq!(
            Unrepresentable::InvertedRange {
                lower: 'z',
                upper: 'a'
            }
            .to_string(),
            "Character range 'z'-'a' is inverted"
        );
        assert_eq!(
            Unrepresentable::InvertedRepetition { min: 3, max: 1 }.to_string(),
            "Repetition {3,1} has a minimum above its maximum"
        );
    }

    #[test]
    fn render_is_repeatable() {
        let node = Node::from(Group::new(
            GroupKind::Capturing,
            seq(['x'.into(), CharacterField::new(['y']).negated().into()]),
        ));
        assert_eq!(node.render(), node.render());
    }
}
