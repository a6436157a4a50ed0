use serde::{Deserialize, Serialize};

/// A block-level node of a Markdown document.
///
/// A whole document is just a `Vec<Block>`; there's no wrapper type for it. Blocks nest other blocks through
/// [`Block::List`] and [`Block::BlockQuote`], and carry inline content through [`Block::Paragraph`] and
/// [`Block::Heading`]. Everything else is a leaf.
///
/// # Examples
///
/// ```
/// use mdwalk::md_elem::*;
/// let parsed = parse("# Hello\n\n> world", &ParseOptions::default()).unwrap();
///
/// let expected = vec![
///     Block::heading(1, vec!["Hello".into()]),
///     Block::BlockQuote(BlockQuote {
///         items: vec![Block::paragraph(vec!["world".into()])],
///     }),
/// ];
/// assert_eq!(parsed, expected);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    // Container blocks
    List(List),
    BlockQuote(BlockQuote),

    // Blocks with inline content
    Paragraph(Paragraph),
    Heading(Heading),

    // Leaf blocks
    CodeBlock(CodeBlock),
    /// Block-level HTML, including the tags themselves.
    Html(String),
    /// Content that has no dedicated variant. The literal is opaque to this crate.
    Custom(String),
    /// ```markdown
    /// -----
    /// ```
    ThematicBreak,
}

/// Inline content: the text flow within a [`Paragraph`] or [`Heading`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    /// A line ending within a paragraph that isn't a hard break. Renderers typically emit a newline or a space.
    SoftBreak,
    /// A hard line break (two trailing spaces, or a trailing backslash).
    LineBreak,
    /// `inline code`
    Code(String),
    /// A single inline tag, like `<span>`. The text between an opening and closing tag is not part of this node.
    Html(String),
    Custom(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Link(Link),
    Image(Image),
}

/// Whether a [`List`] is bulleted or numbered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListType {
    Unordered,
    Ordered,
}

/// Container block representing a list.
///
/// Each entry of `items` is one list item, which is itself a sequence of blocks: an item can hold several
/// paragraphs, a nested list, a code block, and so on. The items are never flattened into each other.
///
/// # Examples
///
/// ```
/// use mdwalk::md_elem::*;
/// let md_text = "- alpha\n\n  > bravo\n- charlie";
/// let parsed = parse(md_text, &ParseOptions::default()).unwrap();
///
/// let expected = List {
///     list_type: ListType::Unordered,
///     items: vec![
///         vec![
///             Block::paragraph(vec!["alpha".into()]),
///             Block::BlockQuote(BlockQuote {
///                 items: vec![Block::paragraph(vec!["bravo".into()])],
///             }),
///         ],
///         vec![Block::paragraph(vec!["charlie".into()])],
///     ],
/// };
/// assert_eq!(parsed, vec![Block::List(expected)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct List {
    pub items: Vec<Vec<Block>>,
    pub list_type: ListType,
}

/// Container block representing block-quoted content.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockQuote {
    pub items: Vec<Block>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: Vec<Inline>,
}

/// A heading, either ATX (`## Title`) or setext (underlined).
///
/// The level is whatever the parser reported; typically 1 through 6. It isn't range-checked, so trees built by hand
/// can carry any `u8`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    pub text: Vec<Inline>,
    pub level: u8,
}

/// A fenced or indented code block.
///
/// `language` is the full info string after the opening fence (for ` ```rust title=x`, that's `rust title=x`), or
/// `None` if there wasn't one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeBlock {
    pub text: String,
    pub language: Option<String>,
}

/// Inline link.
///
/// Reference-style links (`[text][1]`) are resolved against their definitions when the tree is read, so a `Link`
/// always carries its destination directly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub children: Vec<Inline>,
    pub title: Option<String>,
    pub url: Option<String>,
}

/// Inline image. Its `children` are the alt text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Image {
    pub children: Vec<Inline>,
    pub title: Option<String>,
    pub url: Option<String>,
}

impl Block {
    pub fn paragraph(text: Vec<Inline>) -> Self {
        Self::Paragraph(Paragraph { text })
    }

    pub fn heading(level: u8, text: Vec<Inline>) -> Self {
        Self::Heading(Heading { text, level })
    }
}

impl Inline {
    /// A link with no title.
    pub fn link<S: Into<String>>(children: Vec<Inline>, url: S) -> Self {
        Self::Link(Link {
            children,
            title: None,
            url: Some(url.into()),
        })
    }

    /// An image with no title.
    pub fn image<S: Into<String>>(alt: Vec<Inline>, url: S) -> Self {
        Self::Image(Image {
            children: alt,
            title: None,
            url: Some(url.into()),
        })
    }
}

impl From<&str> for Inline {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Inline {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

macro_rules! from_for_block {
    ($variant:ident) => {
        impl From<$variant> for Block {
            fn from(value: $variant) -> Self {
                Self::$variant(value)
            }
        }
    };
}
from_for_block!(List);
from_for_block!(BlockQuote);
from_for_block!(Paragraph);
from_for_block!(Heading);
from_for_block!(CodeBlock);
