use crate::md_elem::*;
use crate::walk::into_ok;

/// Rewrites every block in the tree, replacing each with zero, one, or many blocks.
///
/// This is a post-order, depth-first walk over the block-nesting constructs. A [`Block::List`] has each of its items
/// rewritten first; `f` then sees the rebuilt list (with its already-rewritten items). [`Block::BlockQuote`] works
/// the same way. Every other block is handed to `f` as-is: this walk doesn't descend into inline content.
///
/// Whatever `f` returns takes the node's place: an empty `Vec` deletes it, `vec![block]` keeps or replaces it, and a
/// longer `Vec` splits it. Sibling order is preserved.
///
/// # Examples
///
/// ```
/// use mdwalk::md_elem::*;
/// use mdwalk::walk::apply_blocks;
///
/// let doc = parse("intro\n\n---\n\n> ---\n> quoted", &ParseOptions::default()).unwrap();
/// let without_breaks = apply_blocks(doc, |block| match block {
///     Block::ThematicBreak => vec![],
///     other => vec![other],
/// });
///
/// assert_eq!(
///     without_breaks,
///     vec![
///         Block::paragraph(vec!["intro".into()]),
///         Block::BlockQuote(BlockQuote {
///             items: vec![Block::paragraph(vec!["quoted".into()])],
///         }),
///     ]
/// );
/// ```
pub fn apply_blocks<F>(elements: Vec<Block>, mut f: F) -> Vec<Block>
where
    F: FnMut(Block) -> Vec<Block>,
{
    into_ok(try_apply_blocks(elements, |block| Ok(f(block))))
}

/// Like [`apply_blocks`], but `f` can fail. The first error aborts the walk and is returned as-is.
pub fn try_apply_blocks<F, E>(elements: Vec<Block>, mut f: F) -> Result<Vec<Block>, E>
where
    F: FnMut(Block) -> Result<Vec<Block>, E>,
{
    BlockRewriter { f: &mut f }.rewrite_all(elements)
}

/// Rewrites the inline content of every block, replacing each inline with zero, one, or many inlines.
///
/// Blocks themselves are never added or removed: each input block produces exactly one output block. Paragraph and
/// heading text is rewritten as described in [`apply_inline`]; lists and block quotes are rebuilt around their
/// rewritten contents; everything else passes through unchanged.
///
/// # Examples
///
/// ```
/// use mdwalk::md_elem::*;
/// use mdwalk::walk::apply_inlines;
///
/// let doc = parse("See [the docs](https://example.com).", &ParseOptions::default()).unwrap();
/// let stripped = apply_inlines(doc, |inline| match inline {
///     Inline::Link(link) => link.children,
///     other => vec![other],
/// });
///
/// assert_eq!(stripped, vec![Block::paragraph(vec!["See ".into(), "the docs".into(), ".".into()])]);
/// ```
pub fn apply_inlines<F>(elements: Vec<Block>, mut f: F) -> Vec<Block>
where
    F: FnMut(Inline) -> Vec<Inline>,
{
    into_ok(try_apply_inlines(elements, |inline| Ok(f(inline))))
}

/// Like [`apply_inlines`], but `f` can fail. The first error aborts the walk and is returned as-is.
pub fn try_apply_inlines<F, E>(elements: Vec<Block>, mut f: F) -> Result<Vec<Block>, E>
where
    F: FnMut(Inline) -> Result<Vec<Inline>, E>,
{
    let mut rewriter = InlineRewriter { f: &mut f };
    elements.into_iter().map(|block| rewriter.rewrite_block(block)).collect()
}

/// Rewrites a single inline node and its descendants.
///
/// This is post-order: for [`Inline::Emphasis`], [`Inline::Strong`], [`Inline::Link`], and [`Inline::Image`], the
/// children are rewritten first, the container is rebuilt around them (keeping its title and url), and only then is
/// `f` applied to the rebuilt container. That means `f` always sees already-rewritten descendants. Leaves go straight
/// to `f`.
pub fn apply_inline<F>(inline: Inline, mut f: F) -> Vec<Inline>
where
    F: FnMut(Inline) -> Vec<Inline>,
{
    into_ok(try_apply_inline(inline, |inline| Ok(f(inline))))
}

/// Like [`apply_inline`], but `f` can fail. The first error aborts the walk and is returned as-is.
pub fn try_apply_inline<F, E>(inline: Inline, mut f: F) -> Result<Vec<Inline>, E>
where
    F: FnMut(Inline) -> Result<Vec<Inline>, E>,
{
    InlineRewriter { f: &mut f }.rewrite_inline(inline)
}

struct BlockRewriter<'f, F> {
    f: &'f mut F,
}

impl<F, E> BlockRewriter<'_, F>
where
    F: FnMut(Block) -> Result<Vec<Block>, E>,
{
    fn rewrite_all(&mut self, blocks: Vec<Block>) -> Result<Vec<Block>, E> {
        let mut result = Vec::with_capacity(blocks.len());
        for block in blocks {
            result.extend(self.rewrite(block)?);
        }
        Ok(result)
    }

    fn rewrite(&mut self, block: Block) -> Result<Vec<Block>, E> {
        let rebuilt = match block {
            Block::List(List { items, list_type }) => {
                let items = items
                    .into_iter()
                    .map(|item| self.rewrite_all(item))
                    .collect::<Result<_, _>>()?;
                Block::List(List { items, list_type })
            }
            Block::BlockQuote(BlockQuote { items }) => Block::BlockQuote(BlockQuote {
                items: self.rewrite_all(items)?,
            }),
            leaf @ (Block::Paragraph(_)
            | Block::Heading(_)
            | Block::CodeBlock(_)
            | Block::Html(_)
            | Block::Custom(_)
            | Block::ThematicBreak) => leaf,
        };
        (self.f)(rebuilt)
    }
}

struct InlineRewriter<'f, F> {
    f: &'f mut F,
}

impl<F, E> InlineRewriter<'_, F>
where
    F: FnMut(Inline) -> Result<Vec<Inline>, E>,
{
    /// Rebuilds a block around its rewritten inlines. Always returns exactly one block.
    fn rewrite_block(&mut self, block: Block) -> Result<Block, E> {
        let block = match block {
            Block::Paragraph(Paragraph { text }) => Block::Paragraph(Paragraph {
                text: self.rewrite_inlines(text)?,
            }),
            Block::Heading(Heading { text, level }) => Block::Heading(Heading {
                text: self.rewrite_inlines(text)?,
                level,
            }),
            Block::List(List { items, list_type }) => {
                let mut new_items = Vec::with_capacity(items.len());
                for item in items {
                    new_items.push(self.rewrite_blocks(item)?);
                }
                Block::List(List {
                    items: new_items,
                    list_type,
                })
            }
            Block::BlockQuote(BlockQuote { items }) => Block::BlockQuote(BlockQuote {
                items: self.rewrite_blocks(items)?,
            }),
            other @ (Block::CodeBlock(_) | Block::Html(_) | Block::Custom(_) | Block::ThematicBreak) => other,
        };
        Ok(block)
    }

    fn rewrite_blocks(&mut self, blocks: Vec<Block>) -> Result<Vec<Block>, E> {
        blocks.into_iter().map(|block| self.rewrite_block(block)).collect()
    }

    fn rewrite_inlines(&mut self, inlines: Vec<Inline>) -> Result<Vec<Inline>, E> {
        let mut result = Vec::with_capacity(inlines.len());
        for inline in inlines {
            result.extend(self.rewrite_inline(inline)?);
        }
        Ok(result)
    }

    fn rewrite_inline(&mut self, inline: Inline) -> Result<Vec<Inline>, E> {
        let rebuilt = match inline {
            Inline::Emphasis(children) => Inline::Emphasis(self.rewrite_inlines(children)?),
            Inline::Strong(children) => Inline::Strong(self.rewrite_inlines(children)?),
            Inline::Link(Link { children, title, url }) => Inline::Link(Link {
                children: self.rewrite_inlines(children)?,
                title,
                url,
            }),
            Inline::Image(Image { children, title, url }) => Inline::Image(Image {
                children: self.rewrite_inlines(children)?,
                title,
                url,
            }),
            leaf @ (Inline::Text(_)
            | Inline::SoftBreak
            | Inline::LineBreak
            | Inline::Code(_)
            | Inline::Html(_)
            | Inline::Custom(_)) => leaf,
        };
        (self.f)(rebuilt)
    }
}
