use crate::md_elem::tree::*;
use markdown::mdast;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Write};

/// Options for parsing Markdown.
///
/// See: [`parse`].
#[derive(Default, Debug)]
pub struct ParseOptions {
    pub mdast_options: markdown::ParseOptions,
    /// Whether to keep Markdown that has no [`Block`] or [`Inline`] counterpart. Defaults to `false`.
    ///
    /// Some Markdown flavors have elements this crate's tree doesn't model: tables, footnotes, math, front matter,
    /// strikethrough, and so on. If this field is `true`, each of those becomes a [`Block::Custom`] or
    /// [`Inline::Custom`] holding the element's plain text. Otherwise, [`parse`] returns an `Err` containing
    /// [`InvalidMd::Unsupported`].
    pub allow_unknown_markdown: bool,
}

impl ParseOptions {
    /// GitHub-flavored Markdown. Elements without a dedicated variant are kept as `Custom` nodes.
    pub fn gfm() -> Self {
        Self {
            mdast_options: markdown::ParseOptions::gfm(),
            allow_unknown_markdown: true,
        }
    }
}

/// Parses Markdown text into a sequence of [`Block`]s.
///
/// The parsing itself is done by the [`markdown`] crate; this function translates its syntax tree into ours.
///
/// # Examples
///
/// ```
/// use mdwalk::md_elem::*;
/// let md_text = "Hello, [world](https://example.com).";
/// let parsed = parse(md_text, &ParseOptions::default()).unwrap();
///
/// let expected = vec![Block::paragraph(vec![
///     "Hello, ".into(),
///     Inline::link(vec!["world".into()], "https://example.com"),
///     ".".into(),
/// ])];
/// assert_eq!(parsed, expected);
/// ```
pub fn parse(text: &str, options: &ParseOptions) -> Result<Vec<Block>, InvalidMd> {
    let ast = markdown::to_mdast(text, &options.mdast_options).map_err(|e| InvalidMd::ParseError(format!("{e}")))?;
    let definitions = Definitions::new(&ast);
    let reader = Reader {
        definitions,
        allow_unknown_markdown: options.allow_unknown_markdown,
    };
    reader.blocks(vec![ast])
}

/// Various error conditions that can come from trying to parse Markdown.
#[derive(Debug, PartialEq, Eq)]
pub enum InvalidMd {
    /// Encountered a Markdown component that has no [`Block`] or [`Inline`] counterpart.
    ///
    /// See [`ParseOptions::allow_unknown_markdown`].
    Unsupported(MarkdownPart),
    /// A reference-style link or image (`[text][id]`) whose `[id]: url` definition is missing.
    MissingReferenceDefinition(String),
    /// Internal error. You shouldn't get this.
    NonListItemDirectlyUnderList(MarkdownPart),
    /// Internal error. You shouldn't get this.
    NonInlineWhereInlineExpected(MarkdownPart),
    /// Internal error. You shouldn't get this.
    NonBlockWhereBlockExpected(MarkdownPart),
    /// The underlying parser rejected the input.
    ParseError(String),
}

impl std::error::Error for InvalidMd {}

/// A portion of unparsable markdown.
///
/// This wraps the AST from the underlying library; the only thing you can really do with it is to use its `Debug`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkdownPart {
    node: Box<mdast::Node>,
}

impl MarkdownPart {
    fn new(node: mdast::Node) -> Self {
        Self { node: Box::new(node) }
    }
}

impl Display for InvalidMd {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidMd::Unsupported(part) => {
                write!(f, "unsupported node: {:?}", part.node)
            }
            InvalidMd::MissingReferenceDefinition(id) => {
                write!(f, "couldn't find definition for link/image: {}", id)
            }
            InvalidMd::NonListItemDirectlyUnderList(part) => {
                write!(f, "expected a list item, but found: {:?}", part.node)
            }
            InvalidMd::NonInlineWhereInlineExpected(part) => {
                write!(f, "expected an inline element, but found: {:?}", part.node)
            }
            InvalidMd::NonBlockWhereBlockExpected(part) => {
                write!(f, "expected a block element, but found: {:?}", part.node)
            }
            InvalidMd::ParseError(s) => {
                write!(f, "error when parsing markdown: {s}")
            }
        }?;
        f.write_char('\n')
    }
}

struct Reader {
    definitions: Definitions,
    allow_unknown_markdown: bool,
}

impl Reader {
    fn blocks(&self, nodes: Vec<mdast::Node>) -> Result<Vec<Block>, InvalidMd> {
        let mut result = Vec::with_capacity(nodes.len());
        for node in nodes {
            self.block(node, &mut result)?;
        }
        Ok(result)
    }

    /// Reads a single block-level node, appending zero or more blocks to `out`.
    fn block(&self, node: mdast::Node, out: &mut Vec<Block>) -> Result<(), InvalidMd> {
        let block = match node {
            mdast::Node::Root(node) => {
                out.extend(self.blocks(node.children)?);
                return Ok(());
            }
            mdast::Node::Blockquote(node) => Block::BlockQuote(BlockQuote {
                items: self.blocks(node.children)?,
            }),
            mdast::Node::List(node) => {
                let list_type = if node.ordered {
                    ListType::Ordered
                } else {
                    ListType::Unordered
                };
                let mut items = Vec::with_capacity(node.children.len());
                for child in node.children {
                    let mdast::Node::ListItem(item) = child else {
                        return Err(InvalidMd::NonListItemDirectlyUnderList(MarkdownPart::new(child)));
                    };
                    items.push(self.blocks(item.children)?);
                }
                Block::List(List { items, list_type })
            }
            mdast::Node::Code(node) => {
                let mdast::Code { value, lang, meta, .. } = node;
                let language = match (lang, meta) {
                    (Some(lang), Some(meta)) => Some(format!("{lang} {meta}")),
                    (lang, _) => lang,
                };
                Block::CodeBlock(CodeBlock { text: value, language })
            }
            mdast::Node::Html(node) => Block::Html(node.value),
            mdast::Node::Paragraph(node) => Block::paragraph(self.inlines(node.children)?),
            mdast::Node::Heading(node) => Block::heading(node.depth, self.inlines(node.children)?),
            mdast::Node::ThematicBreak(_) => Block::ThematicBreak,
            mdast::Node::Definition(node) => {
                log::debug!("dropping link definition for {:?}; its links were resolved inline", node.identifier);
                return Ok(());
            }
            mdast::Node::FootnoteDefinition(_)
            | mdast::Node::Math(_)
            | mdast::Node::Table(_)
            | mdast::Node::Toml(_)
            | mdast::Node::Yaml(_)
            | mdast::Node::MdxJsxFlowElement(_)
            | mdast::Node::MdxjsEsm(_)
            | mdast::Node::MdxFlowExpression(_) => Block::Custom(self.unknown_markdown(node)?),
            mdast::Node::ListItem(_) | mdast::Node::TableRow(_) | mdast::Node::TableCell(_) => {
                // should have been handled by their List or Table
                return Err(InvalidMd::NonBlockWhereBlockExpected(MarkdownPart::new(node)));
            }
            mdast::Node::Break(_)
            | mdast::Node::InlineCode(_)
            | mdast::Node::InlineMath(_)
            | mdast::Node::Delete(_)
            | mdast::Node::Emphasis(_)
            | mdast::Node::MdxTextExpression(_)
            | mdast::Node::FootnoteReference(_)
            | mdast::Node::Image(_)
            | mdast::Node::ImageReference(_)
            | mdast::Node::MdxJsxTextElement(_)
            | mdast::Node::Link(_)
            | mdast::Node::LinkReference(_)
            | mdast::Node::Strong(_)
            | mdast::Node::Text(_) => {
                return Err(InvalidMd::NonBlockWhereBlockExpected(MarkdownPart::new(node)));
            }
        };
        out.push(block);
        Ok(())
    }

    fn inlines(&self, nodes: Vec<mdast::Node>) -> Result<Vec<Inline>, InvalidMd> {
        let mut result = Vec::with_capacity(nodes.len());
        for node in nodes {
            self.inline(node, &mut result)?;
        }
        Ok(result)
    }

    /// Reads a single inline node, appending zero or more inlines to `out`.
    fn inline(&self, node: mdast::Node, out: &mut Vec<Inline>) -> Result<(), InvalidMd> {
        let inline = match node {
            mdast::Node::Text(node) => {
                push_text_lines(&node.value, out);
                return Ok(());
            }
            mdast::Node::Break(_) => Inline::LineBreak,
            mdast::Node::InlineCode(node) => Inline::Code(node.value),
            // HTML can be either inline or block; inside a paragraph, it's inline.
            mdast::Node::Html(node) => Inline::Html(node.value),
            mdast::Node::Emphasis(node) => Inline::Emphasis(self.inlines(node.children)?),
            mdast::Node::Strong(node) => Inline::Strong(self.inlines(node.children)?),
            mdast::Node::Link(node) => Inline::Link(Link {
                children: self.inlines(node.children)?,
                title: node.title,
                url: Some(node.url),
            }),
            mdast::Node::LinkReference(node) => {
                let (url, title) = self.definitions.resolve(&node.identifier, node.label)?;
                Inline::Link(Link {
                    children: self.inlines(node.children)?,
                    title,
                    url: Some(url),
                })
            }
            mdast::Node::Image(node) => Inline::Image(Image {
                children: alt_text(node.alt),
                title: node.title,
                url: Some(node.url),
            }),
            mdast::Node::ImageReference(node) => {
                let (url, title) = self.definitions.resolve(&node.identifier, node.label)?;
                Inline::Image(Image {
                    children: alt_text(node.alt),
                    title,
                    url: Some(url),
                })
            }
            mdast::Node::Delete(_)
            | mdast::Node::FootnoteReference(_)
            | mdast::Node::InlineMath(_)
            | mdast::Node::MdxTextExpression(_)
            | mdast::Node::MdxJsxTextElement(_) => Inline::Custom(self.unknown_markdown(node)?),
            mdast::Node::Root(_)
            | mdast::Node::Blockquote(_)
            | mdast::Node::FootnoteDefinition(_)
            | mdast::Node::MdxJsxFlowElement(_)
            | mdast::Node::List(_)
            | mdast::Node::MdxjsEsm(_)
            | mdast::Node::Toml(_)
            | mdast::Node::Yaml(_)
            | mdast::Node::Code(_)
            | mdast::Node::Math(_)
            | mdast::Node::MdxFlowExpression(_)
            | mdast::Node::Heading(_)
            | mdast::Node::Table(_)
            | mdast::Node::ThematicBreak(_)
            | mdast::Node::TableRow(_)
            | mdast::Node::TableCell(_)
            | mdast::Node::ListItem(_)
            | mdast::Node::Definition(_)
            | mdast::Node::Paragraph(_) => {
                return Err(InvalidMd::NonInlineWhereInlineExpected(MarkdownPart::new(node)));
            }
        };
        out.push(inline);
        Ok(())
    }

    /// Returns the plain-text content of a node we have no variant for, or an error if that's not allowed.
    fn unknown_markdown(&self, node: mdast::Node) -> Result<String, InvalidMd> {
        if self.allow_unknown_markdown {
            let literal = node.to_string();
            log::warn!("keeping unsupported markdown as a custom node: {literal:?}");
            Ok(literal)
        } else {
            Err(InvalidMd::Unsupported(MarkdownPart::new(node)))
        }
    }
}

/// mdast keeps soft line breaks as `\n` or `\r\n` within its text nodes; we split them out into
/// [`Inline::SoftBreak`]s.
fn push_text_lines(text: &str, out: &mut Vec<Inline>) {
    let mut lines = text.split('\n');
    if let Some(first) = lines.next() {
        push_line(first, lines.clone().next().is_some(), out);
    }
    while let Some(line) = lines.next() {
        out.push(Inline::SoftBreak);
        push_line(line, lines.clone().next().is_some(), out);
    }
}

/// A line that's followed by a break loses its `\r`, if it has one.
fn push_line(line: &str, has_break: bool, out: &mut Vec<Inline>) {
    let line = if has_break {
        line.strip_suffix('\r').unwrap_or(line)
    } else {
        line
    };
    if !line.is_empty() {
        out.push(Inline::Text(line.to_string()));
    }
}

fn alt_text(alt: String) -> Vec<Inline> {
    if alt.is_empty() {
        Vec::new()
    } else {
        vec![Inline::Text(alt)]
    }
}

/// Link reference definitions (`[id]: https://example.com "title"`), keyed by their normalized identifier.
#[derive(Debug, Default, PartialEq)]
struct Definitions {
    links: HashMap<String, (String, Option<String>)>,
}

impl Definitions {
    fn new(node: &mdast::Node) -> Self {
        let mut result = Self::default();
        result.build(node);
        result
    }

    fn build(&mut self, node: &mdast::Node) {
        if let mdast::Node::Definition(def) = node {
            match self.links.entry(def.identifier.to_owned()) {
                Entry::Occupied(_) => {
                    log::debug!("ignoring duplicate definition for {:?}; the first one wins", def.identifier);
                }
                Entry::Vacant(entry) => {
                    entry.insert((def.url.to_owned(), def.title.to_owned()));
                }
            }
        }
        if let Some(children) = node.children() {
            for child in children {
                self.build(child);
            }
        }
    }

    fn resolve(&self, identifier: &str, label: Option<String>) -> Result<(String, Option<String>), InvalidMd> {
        match self.links.get(identifier) {
            Some((url, title)) => Ok((url.to_owned(), title.to_owned())),
            None => {
                let human_visible_identifier = label.unwrap_or_else(|| identifier.to_string());
                Err(InvalidMd::MissingReferenceDefinition(human_visible_identifier))
            }
        }
    }
}
