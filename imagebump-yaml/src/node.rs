//! The document tree: spanned scalars, ordered mappings, sequences.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::parser;

/// Byte range into the original document source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Presentation style of a scalar, as found in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalarStyle {
    #[default]
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

/// A scalar leaf: the parsed string value plus everything needed to put a
/// replacement back exactly where, and how, the original was written.
#[derive(Debug, Clone)]
pub struct Scalar {
    value: String,
    style: ScalarStyle,
    span: Span,
    dirty: bool,
}

impl Scalar {
    pub(crate) fn new(value: String, style: ScalarStyle, span: Span) -> Self {
        Self {
            value,
            style,
            span,
            dirty: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn style(&self) -> ScalarStyle {
        self.style
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace the scalar's content. The original presentation style is kept
    /// and re-applied on serialization.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }

    /// Render the current value in the original style.
    ///
    /// Block forms cannot hold a single-line replacement, so literal and
    /// folded scalars fall back to double quotes when rewritten.
    pub(crate) fn render(&self) -> String {
        match self.style {
            ScalarStyle::Plain => self.value.clone(),
            ScalarStyle::SingleQuoted => format!("'{}'", self.value.replace('\'', "''")),
            ScalarStyle::DoubleQuoted | ScalarStyle::Literal | ScalarStyle::Folded => {
                let mut out = String::with_capacity(self.value.len() + 2);
                out.push('"');
                for c in self.value.chars() {
                    match c {
                        '"' => out.push_str("\\\""),
                        '\\' => out.push_str("\\\\"),
                        '\n' => out.push_str("\\n"),
                        '\t' => out.push_str("\\t"),
                        '\r' => out.push_str("\\r"),
                        c => out.push(c),
                    }
                }
                out.push('"');
                out
            }
        }
    }
}

#[derive(Debug, Clone)]
struct MapEntry {
    key: Scalar,
    value: Node,
}

/// An ordered mapping. Key order is meaningful and preserved. Duplicate keys
/// are not rejected; the first occurrence wins on lookup.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<MapEntry>,
}

impl Mapping {
    pub(crate) fn push(&mut self, key: Scalar, value: Node) {
        self.entries.push(MapEntry { key, value });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First value whose key equals `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|e| e.key.value() == key)
            .map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries
            .iter_mut()
            .find(|e| e.key.value() == key)
            .map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key.value() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Scalar, &Node)> {
        self.entries.iter().map(|e| (&e.key, &e.value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Scalar, &mut Node)> {
        self.entries.iter_mut().map(|e| (&e.key, &mut e.value))
    }
}

/// An ordered list of nodes.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    items: Vec<Node>,
}

impl Sequence {
    pub(crate) fn push(&mut self, node: Node) {
        self.items.push(node);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [Node] {
        &mut self.items
    }
}

/// A node of the document tree.
#[derive(Debug, Clone)]
pub enum Node {
    Scalar(Scalar),
    Mapping(Mapping),
    Sequence(Sequence),
}

impl Node {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Node::Sequence(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_scalar_mut(&mut self) -> Option<&mut Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Node::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Sequence> {
        match self {
            Node::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Human-readable node kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Scalar(_) => "scalar",
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
        }
    }

    fn collect_edits(&self, edits: &mut Vec<(Span, String)>) {
        match self {
            Node::Scalar(s) => {
                if s.is_dirty() {
                    edits.push((s.span(), s.render()));
                }
            }
            Node::Mapping(m) => {
                for e in &m.entries {
                    if e.key.is_dirty() {
                        edits.push((e.key.span(), e.key.render()));
                    }
                    e.value.collect_edits(edits);
                }
            }
            Node::Sequence(s) => {
                for item in &s.items {
                    item.collect_edits(edits);
                }
            }
        }
    }
}

/// A parsed document: the original text plus exactly one root node.
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    root: Node,
}

impl Document {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let root = parser::parse(text)?;
        Ok(Self {
            source: text.to_string(),
            root,
        })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Document::parse(s)
    }
}

impl fmt::Display for Document {
    /// Serialize by splicing: only mutated scalars are re-rendered; every
    /// other byte of the source is reproduced untouched.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut edits = Vec::new();
        self.root.collect_edits(&mut edits);
        edits.sort_by_key(|(span, _)| span.start);

        let mut out = String::with_capacity(self.source.len());
        let mut pos = 0;
        for (span, replacement) in edits {
            out.push_str(&self.source[pos..span.start]);
            // A zero-width span marks a value that was absent in the source
            // (`key:` with nothing after it); it needs a separating space.
            if span.is_empty() {
                out.push(' ');
            }
            out.push_str(&replacement);
            pos = span.end;
        }
        out.push_str(&self.source[pos..]);
        f.write_str(&out)
    }
}
