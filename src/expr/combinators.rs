//! Shorthand constructors and combinators for building node trees.

use std::ops::RangeInclusive;

use itertools::Itertools;

use super::ast::*;
use super::char_class::{CharacterField, FieldItem};

/// Build a [`Sequence`] from anything convertible into nodes.
///
/// ```
/// use reggie::{chars_of, seq};
///
/// let s = seq!['a', chars_of("xyz"), 'b'];
/// assert_eq!(s.render().unwrap(), "a[xyz]b");
/// ```
#[macro_export]
macro_rules! seq {
    ($($node:expr),* $(,)?) => {
        $crate::Sequence::new([$(::core::convert::Into::<$crate::Node>::into($node)),*])
    };
}

/// Insert pre-rendered pattern text without escaping it.
pub fn pure(text: impl Into<String>) -> Literal {
    Literal::new(text)
}

/// A fragment that never renders; any tree containing it fails to render.
pub fn never() -> Literal {
    Literal::never()
}

/// A field holding a single character, `[c]`.
pub fn char(c: char) -> CharacterField {
    CharacterField::new([c])
}

pub fn chars<I>(items: I) -> CharacterField
where
    I: IntoIterator,
    I::Item: Into<FieldItem>,
{
    CharacterField::new(items)
}

/// A field holding every character of `text` as a separate item.
pub fn chars_of(text: &str) -> CharacterField {
    CharacterField::new(text.chars())
}

/// One character matched literally in general context.
pub fn literal(c: char) -> Node {
    Node::Char(c.into())
}

/// A string matched literally, each character escaped for general context.
pub fn text(s: &str) -> Sequence {
    s.chars().map(Node::from).collect()
}

pub fn sequence<I>(nodes: I) -> Sequence
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    nodes.into_iter().map(Into::<Node>::into).collect()
}

pub fn capturing(body: impl Into<Node>) -> Group {
    Group::new(GroupKind::Capturing, group_body(body.into()))
}

pub fn non_capturing(body: impl Into<Node>) -> Group {
    Group::new(GroupKind::NonCapturing, group_body(body.into()))
}

pub fn negative_lookahead(body: impl Into<Node>) -> Group {
    Group::new(GroupKind::NegativeLookahead, group_body(body.into()))
}

fn group_body(node: Node) -> Sequence {
    match node {
        Node::Sequence(seq) => seq,
        other => Sequence::new([other]),
    }
}

/// A non-capturing choice group, `(?:A|B|C)`.
///
/// Each alternative is rendered on its own first and only its text is kept.
/// The texts and the `|` separators are joined as literals, so nothing is
/// escaped a second time. An alternative that cannot be rendered is kept as an
/// unrepresentable literal and fails the whole group.
pub fn one_of<I>(alternatives: I) -> Group
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    let rendered = alternatives.into_iter().map(|alt| {
        let alt: Node = alt.into();
        Node::Literal(Literal::from_rendered(alt.render()))
    });
    let body = Itertools::intersperse(rendered, Node::Literal(pure("|"))).collect();
    Group::new(GroupKind::NonCapturing, body)
}

/// Anchor `body` to the start and end of the input, `^body$`.
pub fn line(body: impl Into<Node>) -> Sequence {
    seq![pure("^"), body, pure("$")]
}

/// Repetition suffixes for anything that converts into a [`Node`].
///
/// Composite targets are wrapped in a non-capturing group first, so
/// `seq!['A', 'B'].one_or_more()` renders `(?:AB)+`, never `AB+`.
pub trait Quantify: Into<Node> {
    /// `?`
    fn maybe(self) -> Node {
        Quantified::new(self.into(), Quantifier::Optional).into()
    }

    /// `*`
    fn zero_or_more(self) -> Node {
        Quantified::new(self.into(), Quantifier::ZeroOrMore).into()
    }

    /// `+`
    fn one_or_more(self) -> Node {
        Quantified::new(self.into(), Quantifier::OneOrMore).into()
    }

    /// `{n}`
    fn repeating(self, count: u32) -> Node {
        Quantified::new(self.into(), Quantifier::Exactly(count)).into()
    }

    /// `{n,m}`
    fn repeating_between(self, range: RangeInclusive<u32>) -> Node {
        let (min, max) = range.into_inner();
        Quantified::new(self.into(), Quantifier::Between(min, max)).into()
    }

    /// `{n,}`
    fn at_least(self, count: u32) -> Node {
        Quantified::new(self.into(), Quantifier::AtLeast(count)).into()
    }
}

impl<T: Into<Node>> Quantify for T {}

pub trait Lookahead: Into<Node> {
    /// This node, only where `other` does not come next.
    fn not_followed_by(self, other: impl Into<Node>) -> Node {
        seq![self, negative_lookahead(other)].into()
    }

    /// This node, only where it is not immediately repeated.
    ///
    /// `'.'` becomes `\.(?!\.)`, which rules out a doubled full stop.
    fn strictly_non_repeating(self) -> Node {
        let node: Node = self.into();
        node.clone().not_followed_by(node)
    }
}

impl<T: Into<Node>> Lookahead for T {}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(node: impl Into<Node>) -> String {
        let node: Node = node.into();
        node.render().unwrap()
    }

    #[test]
    fn seq_macro_converts_each_element() {
        let s = seq!['a', pure("\\d"), char('-'), literal('.')];
        assert_eq!(s.len(), 4);
        assert_eq!(render(s), "a\\d[\\-]\\.");
    }

    #[test]
    fn text_escapes_general_specials() {
        assert_eq!(render(text("+1")), "\\+1");
        assert_eq!(render(text("a.b|c")), "a\\.b\\|c");
    }

    #[test]
    fn chars_of_makes_one_item_per_character() {
        let field = chars_of("a-]");
        assert_eq!(field.items().len(), 3);
        assert_eq!(render(field), "[a\\-\\]]");
    }

    #[test]
    fn group_helpers() {
        assert_eq!(render(capturing(text("ab"))), "(ab)");
        assert_eq!(render(non_capturing('a')), "(?:a)");
        assert_eq!(render(negative_lookahead(char('x'))), "(?![x])");
    }

    #[test]
    fn sequence_of_groups() {
        let s = sequence([capturing('a'), non_capturing('b')]);
        assert_eq!(render(s), "(a)(?:b)");
    }

    #[test]
    fn one_or_more_groups_sequences() {
        assert_eq!(render(seq!['A', 'B'].one_or_more()), "(?:AB)+");
        assert_ne!(render(seq!['A', 'B'].one_or_more()), "AB+");
    }

    #[test]
    fn quantifiers_on_atoms() {
        let digit = chars(['0'..='9']);
        assert_eq!(render(digit.clone().maybe()), "[0-9]?");
        assert_eq!(render(digit.clone().zero_or_more()), "[0-9]*");
        assert_eq!(render(digit.clone().repeating(4)), "[0-9]{4}");
        assert_eq!(render(digit.clone().repeating_between(4..=14)), "[0-9]{4,14}");
        assert_eq!(render(digit.at_least(2)), "[0-9]{2,}");
        assert_eq!(render(literal('x').one_or_more()), "x+");
        assert_eq!(render(text("+1").maybe()), "(?:\\+1)?");
    }

    #[test]
    fn quantified_literal_is_grouped() {
        assert_eq!(render(pure("\\p{L}").one_or_more()), "(?:\\p{L})+");
    }

    #[test]
    fn alternation_renders_each_choice_once() {
        let group = one_of([Node::from(text("a|b")), chars_of("xy").into(), pure("\\d").into()]);
        assert_eq!(render(group), "(?:a\\|b|[xy]|\\d)");
    }

    #[test]
    fn alternation_separators_are_not_escaped() {
        let group = one_of(['a', 'b']);
        assert_eq!(render(group), "(?:a|b)");
    }

    #[test]
    fn alternation_fails_closed() {
        let group = one_of([Node::from('a'), never().into()]);
        assert_eq!(
            Node::from(group).render(),
            Err(crate::expr::Unrepresentable::Never)
        );
    }

    #[test]
    fn alternation_of_one_and_none() {
        assert_eq!(render(one_of(['a'])), "(?:a)");
        assert_eq!(render(one_of(Vec::<Node>::new())), "(?:)");
    }

    #[test]
    fn line_anchors() {
        assert_eq!(render(line(char('a').one_or_more())), "^[a]+$");
    }

    #[test]
    fn not_followed_by_uses_negative_lookahead() {
        assert_eq!(render(literal('a').not_followed_by(text("bc"))), "a(?!bc)");
    }

    #[test]
    fn strictly_non_repeating() {
        assert_eq!(render(char('\'').strictly_non_repeating()), "['](?!['])");
        assert_eq!(render(literal('.').strictly_non_repeating()), "\\.(?!\\.)");
    }
}
