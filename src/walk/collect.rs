use crate::md_elem::*;
use crate::walk::into_ok;
use std::marker::PhantomData;

/// Collects values from every block in the tree, without changing it.
///
/// Lists and block quotes are visited after their contents: their nested blocks contribute first, and then the
/// container's own `f` result is appended. Every other block contributes just its own `f` result. In particular, this
/// does _not_ look at inline content; use [`collect_inlines`] for that.
///
/// The output is flat, in depth-first, left-to-right, descendants-before-self order.
///
/// # Examples
///
/// ```
/// use mdwalk::md_elem::*;
/// use mdwalk::walk::collect_blocks;
///
/// let doc = parse("# One\n\n> ## Two\n\n### Three", &ParseOptions::default()).unwrap();
/// let levels = collect_blocks(&doc, |block| match block {
///     Block::Heading(heading) => vec![heading.level],
///     _ => vec![],
/// });
/// assert_eq!(levels, vec![1, 2, 3]);
/// ```
pub fn collect_blocks<'md, A, F>(elements: &'md [Block], mut f: F) -> Vec<A>
where
    F: FnMut(&'md Block) -> Vec<A>,
{
    into_ok(try_collect_blocks(elements, |block| Ok(f(block))))
}

/// Like [`collect_blocks`], but `f` can fail. The first error aborts the walk and is returned as-is.
pub fn try_collect_blocks<'md, A, E, F>(elements: &'md [Block], mut f: F) -> Result<Vec<A>, E>
where
    F: FnMut(&'md Block) -> Result<Vec<A>, E>,
{
    let mut collector = Collector {
        f: &mut f,
        out: Vec::new(),
        _error: PhantomData,
    };
    collector.collect_blocks_into(elements)?;
    Ok(collector.out)
}

/// Collects values from every inline in the tree, without changing it.
///
/// Inline content lives in paragraphs and headings; lists and block quotes are searched for more of them. Blocks with
/// no inline content (code blocks, HTML, and so on) contribute nothing. Within the inlines, emphasis, strong, links,
/// and images contribute their children's results before their own.
///
/// # Examples
///
/// ```
/// use mdwalk::md_elem::*;
/// use mdwalk::walk::collect_inlines;
///
/// let doc = parse("- > [a](http://a) and [b](http://b)", &ParseOptions::default()).unwrap();
/// let urls = collect_inlines(&doc, |inline| match inline {
///     Inline::Link(link) => link.url.iter().cloned().collect(),
///     _ => vec![],
/// });
/// assert_eq!(urls, vec!["http://a", "http://b"]);
/// ```
pub fn collect_inlines<'md, A, F>(elements: &'md [Block], mut f: F) -> Vec<A>
where
    F: FnMut(&'md Inline) -> Vec<A>,
{
    into_ok(try_collect_inlines(elements, |inline| Ok(f(inline))))
}

/// Like [`collect_inlines`], but `f` can fail. The first error aborts the walk and is returned as-is.
pub fn try_collect_inlines<'md, A, E, F>(elements: &'md [Block], mut f: F) -> Result<Vec<A>, E>
where
    F: FnMut(&'md Inline) -> Result<Vec<A>, E>,
{
    let mut collector = Collector {
        f: &mut f,
        out: Vec::new(),
        _error: PhantomData,
    };
    collector.collect_block_inlines_into(elements)?;
    Ok(collector.out)
}

/// Finds every block matching `predicate`, in the same order as [`collect_blocks`].
///
/// The matches are returned as references into `elements`, untouched. Like `collect_blocks`, this doesn't look at
/// inline content.
pub fn filter_blocks<'md, P>(elements: &'md [Block], mut predicate: P) -> Vec<&'md Block>
where
    P: FnMut(&Block) -> bool,
{
    into_ok(try_filter_blocks(elements, |block| Ok(predicate(block))))
}

/// Like [`filter_blocks`], but `predicate` can fail. The first error aborts the walk and is returned as-is.
pub fn try_filter_blocks<'md, P, E>(elements: &'md [Block], mut predicate: P) -> Result<Vec<&'md Block>, E>
where
    P: FnMut(&Block) -> Result<bool, E>,
{
    try_collect_blocks(elements, |block| Ok(if predicate(block)? { vec![block] } else { vec![] }))
}

/// Finds every inline matching `predicate`, in the same order as [`collect_inlines`].
///
/// # Examples
///
/// ```
/// use mdwalk::md_elem::*;
/// use mdwalk::walk::filter_inlines;
///
/// let doc = parse("![a](a.png) and **![b](b.png)**", &ParseOptions::default()).unwrap();
/// let images = filter_inlines(&doc, |inline| matches!(inline, Inline::Image(_)));
/// assert_eq!(
///     images,
///     vec![
///         &Inline::image(vec!["a".into()], "a.png"),
///         &Inline::image(vec!["b".into()], "b.png"),
///     ]
/// );
/// ```
pub fn filter_inlines<'md, P>(elements: &'md [Block], mut predicate: P) -> Vec<&'md Inline>
where
    P: FnMut(&Inline) -> bool,
{
    into_ok(try_filter_inlines(elements, |inline| Ok(predicate(inline))))
}

/// Like [`filter_inlines`], but `predicate` can fail. The first error aborts the walk and is returned as-is.
pub fn try_filter_inlines<'md, P, E>(elements: &'md [Block], mut predicate: P) -> Result<Vec<&'md Inline>, E>
where
    P: FnMut(&Inline) -> Result<bool, E>,
{
    try_collect_inlines(elements, |inline| Ok(if predicate(inline)? { vec![inline] } else { vec![] }))
}

struct Collector<'f, F, A, E> {
    f: &'f mut F,
    out: Vec<A>,
    _error: PhantomData<fn() -> E>,
}

impl<'md, F, A, E> Collector<'_, F, A, E>
where
    F: FnMut(&'md Block) -> Result<Vec<A>, E>,
{
    fn collect_blocks_into(&mut self, blocks: &'md [Block]) -> Result<(), E> {
        for block in blocks {
            match block {
                Block::List(list) => {
                    for item in &list.items {
                        self.collect_blocks_into(item)?;
                    }
                }
                Block::BlockQuote(quote) => self.collect_blocks_into(&quote.items)?,
                Block::Paragraph(_)
                | Block::Heading(_)
                | Block::CodeBlock(_)
                | Block::Html(_)
                | Block::Custom(_)
                | Block::ThematicBreak => {}
            }
            self.out.extend((self.f)(block)?);
        }
        Ok(())
    }
}

impl<'md, F, A, E> Collector<'_, F, A, E>
where
    F: FnMut(&'md Inline) -> Result<Vec<A>, E>,
{
    fn collect_block_inlines_into(&mut self, blocks: &'md [Block]) -> Result<(), E> {
        for block in blocks {
            match block {
                Block::Paragraph(Paragraph { text }) | Block::Heading(Heading { text, .. }) => {
                    self.collect_inlines_into(text)?
                }
                Block::List(list) => {
                    for item in &list.items {
                        self.collect_block_inlines_into(item)?;
                    }
                }
                Block::BlockQuote(quote) => self.collect_block_inlines_into(&quote.items)?,
                Block::CodeBlock(_) | Block::Html(_) | Block::Custom(_) | Block::ThematicBreak => {}
            }
        }
        Ok(())
    }

    fn collect_inlines_into(&mut self, inlines: &'md [Inline]) -> Result<(), E> {
        for inline in inlines {
            match inline {
                Inline::Emphasis(children)
                | Inline::Strong(children)
                | Inline::Link(Link { children, .. })
                | Inline::Image(Image { children, .. }) => self.collect_inlines_into(children)?,
                Inline::Text(_)
                | Inline::SoftBreak
                | Inline::LineBreak
                | Inline::Code(_)
                | Inline::Html(_)
                | Inline::Custom(_) => {}
            }
            self.out.extend((self.f)(inline)?);
        }
        Ok(())
    }
}
