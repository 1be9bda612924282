//! Node types of the construction algebra.
//!
//! Every node owns its children outright. Nodes are never mutated once built:
//! combinators consume their inputs and return new nodes.

use super::char_class::CharacterField;
use super::render::Unrepresentable;

/// A composable regular-expression fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Pre-rendered text emitted verbatim.
    Literal(Literal),
    /// One character matched literally, escaped for general context.
    Char(Character),
    /// A bracketed character field.
    Field(CharacterField),
    /// An ordered concatenation.
    Sequence(Sequence),
    /// A parenthesised sequence.
    Group(Group),
    /// A target followed by a repetition suffix.
    Quantified(Quantified),
}

/// Text that bypasses escaping entirely.
///
/// A literal may also hold the reason it has no representation, which makes
/// every ancestor unrepresentable too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    text: Result<String, Unrepresentable>,
}

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Ok(text.into()),
        }
    }

    /// A literal that never renders.
    pub fn never() -> Self {
        Self::from_rendered(Err(Unrepresentable::Never))
    }

    /// Capture the outcome of an earlier render as a literal.
    pub fn from_rendered(text: Result<String, Unrepresentable>) -> Self {
        Self { text }
    }

    pub fn text(&self) -> Result<&str, &Unrepresentable> {
        self.text.as_deref()
    }

    pub fn is_representable(&self) -> bool {
        self.text.is_ok()
    }
}

/// A single user-perceived character, stored as its codepoints in order.
///
/// Usually one `char`, but a cluster such as `e` followed by a combining acute
/// accent is kept together and encoded codepoint by codepoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Character {
    scalars: String,
}

impl Character {
    /// A character made of every codepoint in `scalars`.
    ///
    /// An empty cluster is accepted here but can never be rendered.
    pub fn cluster(scalars: impl Into<String>) -> Self {
        Self {
            scalars: scalars.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.scalars
    }

    /// Whether the encoded form is exactly one pattern atom.
    ///
    /// Clusters and codepoints outside the BMP encode to several tokens, and a
    /// quantifier placed after them would bind to the last token only.
    pub(crate) fn is_single_token(&self) -> bool {
        let mut scalars = self.scalars.chars();
        match (scalars.next(), scalars.next()) {
            (Some(c), None) => c.len_utf16() == 1,
            _ => false,
        }
    }
}

impl From<char> for Character {
    fn from(c: char) -> Self {
        Self {
            scalars: c.to_string(),
        }
    }
}

/// An ordered concatenation of nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    nodes: Vec<Node>,
}

impl Sequence {
    pub fn new(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl FromIterator<Node> for Sequence {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Capturing,         // (…)
    NonCapturing,      // (?:…)
    NegativeLookahead, // (?!…)
}

impl GroupKind {
    /// Text placed between the opening parenthesis and the body.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Capturing => "",
            Self::NonCapturing => "?:",
            Self::NegativeLookahead => "?!",
        }
    }
}

/// A sequence wrapped in parentheses of a fixed kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    kind: GroupKind,
    body: Sequence,
}

impl Group {
    pub fn new(kind: GroupKind, body: Sequence) -> Self {
        Self { kind, body }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn body(&self) -> &Sequence {
        &self.body
    }

    /// The same body wrapped in a group of another kind.
    pub fn with_kind(self, kind: GroupKind) -> Self {
        Self { kind, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Optional,          // ?
    ZeroOrMore,        // *
    OneOrMore,         // +
    Exactly(u32),      // {n}
    AtLeast(u32),      // {n,}
    Between(u32, u32), // {n,m}
}

/// A node followed by a repetition suffix.
///
/// Built through [`Quantified::new`], which wraps composite targets in a
/// non-capturing group so the suffix binds to the whole target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantified {
    target: Box<Node>,
    quantifier: Quantifier,
}

impl Quantified {
    pub fn new(target: Node, quantifier: Quantifier) -> Self {
        let target = if target.needs_grouping() {
            Node::Group(Group::new(GroupKind::NonCapturing, Sequence::new([target])))
        } else {
            target
        };
        Self {
            target: Box::new(target),
            quantifier,
        }
    }

    pub fn target(&self) -> &Node {
        &self.target
    }

    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }
}

impl Node {
    /// Whether a quantifier applied directly after this node's text would bind
    /// to less than the whole node.
    pub(crate) fn needs_grouping(&self) -> bool {
        match self {
            Node::Field(_) | Node::Group(_) => false,
            Node::Char(c) => !c.is_single_token(),
            Node::Sequence(seq) => match seq.nodes() {
                [only] => only.needs_grouping(),
                _ => true,
            },
            Node::Literal(_) | Node::Quantified(_) => true,
        }
    }
}

impl From<Literal> for Node {
    fn from(literal: Literal) -> Self {
        Node::Literal(literal)
    }
}

impl From<Character> for Node {
    fn from(c: Character) -> Self {
        Node::Char(c)
    }
}

impl From<char> for Node {
    fn from(c: char) -> Self {
        Node::Char(c.into())
    }
}

impl From<CharacterField> for Node {
    fn from(field: CharacterField) -> Self {
        Node::Field(field)
    }
}

impl From<Sequence> for Node {
    fn from(seq: Sequence) -> Self {
        Node::Sequence(seq)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

impl From<Quantified> for Node {
    fn from(quantified: Quantified) -> Self {
        Node::Quantified(quantified)
    }
}
