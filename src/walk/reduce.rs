use crate::md_elem::*;
use crate::walk::{into_ok, Monoid};
use std::convert::Infallible;

type Children<'a, R, E> = Option<Box<dyn FnMut(Vec<R>) -> Result<R, E> + 'a>>;
type Literal<'a, R, E> = Option<Box<dyn FnMut(&str) -> Result<R, E> + 'a>>;
type Marker<'a, R, E> = Option<Box<dyn FnMut() -> Result<R, E> + 'a>>;
type Linked<'a, R, E> = Option<Box<dyn FnMut(Vec<R>, Option<&str>, Option<&str>) -> Result<R, E> + 'a>>;

/// How to fold each kind of block into an `R`, for [`reduce`].
///
/// Each combinator receives the already-folded results of the node's children (if it has any), along with the node's
/// own data. A node whose combinator hasn't been set folds to a clone of [`default_value`](Self::default_value); its
/// children still get folded first, so their combinators still run.
///
/// Combinators are set with the `on_*` methods, or the `try_on_*` methods for ones that can fail. The inline-level
/// combinators live in [`inline`](Self::inline).
///
/// A list is folded in two steps: each item's blocks are folded through `list_item`, and then those results go to
/// `list`. The top-level blocks of the document are folded through `document`, and that is what [`reduce`] returns.
pub struct BlockAlgebra<'a, R, E = Infallible> {
    pub inline: InlineAlgebra<'a, R, E>,
    pub default_value: R,
    list: Option<Box<dyn FnMut(Vec<R>, ListType) -> Result<R, E> + 'a>>,
    list_item: Children<'a, R, E>,
    block_quote: Children<'a, R, E>,
    code_block: Option<Box<dyn FnMut(&str, Option<&str>) -> Result<R, E> + 'a>>,
    html: Literal<'a, R, E>,
    paragraph: Children<'a, R, E>,
    heading: Option<Box<dyn FnMut(Vec<R>, u8) -> Result<R, E> + 'a>>,
    custom: Literal<'a, R, E>,
    thematic_break: Marker<'a, R, E>,
    document: Children<'a, R, E>,
}

/// How to fold each kind of inline into an `R`. See [`BlockAlgebra`].
pub struct InlineAlgebra<'a, R, E = Infallible> {
    text: Literal<'a, R, E>,
    soft_break: Marker<'a, R, E>,
    line_break: Marker<'a, R, E>,
    code: Literal<'a, R, E>,
    html: Literal<'a, R, E>,
    custom: Literal<'a, R, E>,
    emphasis: Children<'a, R, E>,
    strong: Children<'a, R, E>,
    /// Gets the link's folded children, then its title and url.
    link: Linked<'a, R, E>,
    /// Gets the image's folded alt text, then its title and url.
    image: Linked<'a, R, E>,
}

macro_rules! combinator_setters {
    ($algebra:ident { $($variant:ident($($arg:ident: $arg_ty:ty),*)),* $(,)? }) => {
        paste::paste! {
            impl<'a, R: 'a, E: 'a> $algebra<'a, R, E> {
                $(
                    #[doc = "Sets the combinator for `" $variant "` nodes."]
                    pub fn [<on_ $variant>]<F>(&mut self, mut f: F) -> &mut Self
                    where
                        F: FnMut($($arg_ty),*) -> R + 'a,
                    {
                        self.$variant = Some(Box::new(move |$($arg: $arg_ty),*| Ok(f($($arg),*))));
                        self
                    }

                    #[doc = "Sets a fallible combinator for `" $variant "` nodes."]
                    pub fn [<try_on_ $variant>]<F>(&mut self, f: F) -> &mut Self
                    where
                        F: FnMut($($arg_ty),*) -> Result<R, E> + 'a,
                    {
                        self.$variant = Some(Box::new(f));
                        self
                    }
                )*
            }
        }
    };
}

combinator_setters!(BlockAlgebra {
    list(items: Vec<R>, list_type: ListType),
    list_item(children: Vec<R>),
    block_quote(children: Vec<R>),
    code_block(text: &str, language: Option<&str>),
    html(html: &str),
    paragraph(children: Vec<R>),
    heading(children: Vec<R>, level: u8),
    custom(custom: &str),
    thematic_break(),
    document(children: Vec<R>),
});

combinator_setters!(InlineAlgebra {
    text(text: &str),
    soft_break(),
    line_break(),
    code(code: &str),
    html(html: &str),
    custom(custom: &str),
    emphasis(children: Vec<R>),
    strong(children: Vec<R>),
    link(children: Vec<R>, title: Option<&str>, url: Option<&str>),
    image(children: Vec<R>, title: Option<&str>, url: Option<&str>),
});

impl<R, E> BlockAlgebra<'_, R, E> {
    /// An algebra with no combinators set: everything folds to `default_value`.
    pub fn new(default_value: R) -> Self {
        Self {
            inline: InlineAlgebra {
                text: None,
                soft_break: None,
                line_break: None,
                code: None,
                html: None,
                custom: None,
                emphasis: None,
                strong: None,
                link: None,
                image: None,
            },
            default_value,
            list: None,
            list_item: None,
            block_quote: None,
            code_block: None,
            html: None,
            paragraph: None,
            heading: None,
            custom: None,
            thematic_break: None,
            document: None,
        }
    }
}

impl<'a, M, E> BlockAlgebra<'a, M, E>
where
    M: Monoid + Clone + 'a,
    E: 'a,
{
    /// An algebra that collects into a [`Monoid`].
    ///
    /// Every node that has children concatenates them with [`Monoid::concat`], and every leaf is [`Monoid::empty`].
    /// On its own that always reduces to `empty`; override the combinators for the nodes you want to extract.
    ///
    /// ```
    /// use mdwalk::md_elem::*;
    /// use mdwalk::walk::{reduce, BlockAlgebra, Monoid};
    ///
    /// let doc = parse("Hello, [world](https://example.com)!", &ParseOptions::default()).unwrap();
    ///
    /// let mut urls: BlockAlgebra<Vec<String>> = BlockAlgebra::collecting();
    /// urls.inline.on_link(|children, _, url| {
    ///     Vec::concat(children).combine(url.into_iter().map(str::to_string).collect())
    /// });
    /// assert_eq!(reduce(&doc, &mut urls), vec!["https://example.com"]);
    /// ```
    pub fn collecting() -> Self {
        let mut algebra = Self::new(M::empty());
        algebra
            .on_list(|items, _| M::concat(items))
            .on_list_item(M::concat)
            .on_block_quote(M::concat)
            .on_paragraph(M::concat)
            .on_heading(|children, _| M::concat(children))
            .on_document(M::concat);
        algebra
            .inline
            .on_emphasis(M::concat)
            .on_strong(M::concat)
            .on_link(|children, _, _| M::concat(children))
            .on_image(|children, _, _| M::concat(children));
        algebra
    }
}

/// Calls the combinator at the given field path, or clones the default value if it isn't set.
macro_rules! invoke {
    ($algebra:ident, $($field:ident).+ ($($arg:expr),*)) => {
        match &mut $algebra.$($field).+ {
            Some(combinator) => combinator($($arg),*),
            None => Ok($algebra.default_value.clone()),
        }
    };
}

/// Folds the whole document into a single value.
///
/// The walk is depth-first and left to right. For every container, all of its children are folded (in order) before
/// the container's own combinator is called with their results.
///
/// # Examples
///
/// ```
/// use mdwalk::md_elem::*;
/// use mdwalk::walk::{reduce, BlockAlgebra};
///
/// let doc = parse("# Title\n\nSome _text_ here.", &ParseOptions::default()).unwrap();
///
/// let mut plain = BlockAlgebra::new(String::new());
/// plain.on_heading(|children, _| children.concat());
/// plain.on_paragraph(|children| children.concat());
/// plain.on_document(|children| children.join("\n"));
/// plain.inline.on_text(str::to_string).on_emphasis(|children| children.concat());
///
/// assert_eq!(reduce(&doc, &mut plain), "Title\nSome text here.");
/// ```
pub fn reduce<R: Clone>(document: &[Block], algebra: &mut BlockAlgebra<'_, R>) -> R {
    into_ok(try_reduce(document, algebra))
}

/// Like [`reduce`], but the combinators can fail. The first error aborts the fold and is returned as-is.
pub fn try_reduce<R: Clone, E>(document: &[Block], algebra: &mut BlockAlgebra<'_, R, E>) -> Result<R, E> {
    let children = algebra.fold_blocks(document)?;
    invoke!(algebra, document(children))
}

impl<R: Clone, E> BlockAlgebra<'_, R, E> {
    fn fold_blocks(&mut self, blocks: &[Block]) -> Result<Vec<R>, E> {
        blocks.iter().map(|block| self.fold_block(block)).collect()
    }

    fn fold_block(&mut self, block: &Block) -> Result<R, E> {
        match block {
            Block::List(list) => {
                let items = list
                    .items
                    .iter()
                    .map(|item| {
                        let children = self.fold_blocks(item)?;
                        invoke!(self, list_item(children))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                invoke!(self, list(items, list.list_type))
            }
            Block::BlockQuote(quote) => {
                let children = self.fold_blocks(&quote.items)?;
                invoke!(self, block_quote(children))
            }
            Block::Paragraph(paragraph) => {
                let children = self.fold_inlines(&paragraph.text)?;
                invoke!(self, paragraph(children))
            }
            Block::Heading(heading) => {
                let children = self.fold_inlines(&heading.text)?;
                invoke!(self, heading(children, heading.level))
            }
            Block::CodeBlock(code) => invoke!(self, code_block(code.text.as_str(), code.language.as_deref())),
            Block::Html(value) => invoke!(self, html(value.as_str())),
            Block::Custom(value) => invoke!(self, custom(value.as_str())),
            Block::ThematicBreak => invoke!(self, thematic_break()),
        }
    }

    fn fold_inlines(&mut self, inlines: &[Inline]) -> Result<Vec<R>, E> {
        inlines.iter().map(|inline| self.fold_inline(inline)).collect()
    }

    fn fold_inline(&mut self, inline: &Inline) -> Result<R, E> {
        match inline {
            Inline::Text(value) => invoke!(self, inline.text(value.as_str())),
            Inline::SoftBreak => invoke!(self, inline.soft_break()),
            Inline::LineBreak => invoke!(self, inline.line_break()),
            Inline::Code(value) => invoke!(self, inline.code(value.as_str())),
            Inline::Html(value) => invoke!(self, inline.html(value.as_str())),
            Inline::Custom(value) => invoke!(self, inline.custom(value.as_str())),
            Inline::Emphasis(children) => {
                let children = self.fold_inlines(children)?;
                invoke!(self, inline.emphasis(children))
            }
            Inline::Strong(children) => {
                let children = self.fold_inlines(children)?;
                invoke!(self, inline.strong(children))
            }
            Inline::Link(link) => {
                let children = self.fold_inlines(&link.children)?;
                invoke!(self, inline.link(children, link.title.as_deref(), link.url.as_deref()))
            }
            Inline::Image(image) => {
                let children = self.fold_inlines(&image.children)?;
                invoke!(self, inline.image(children, image.title.as_deref(), image.url.as_deref()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::md_elem::tree_test_utils::*;
    use crate::walk::collect_inlines;
    use std::cell::RefCell;

    fn sample_doc() -> Vec<Block> {
        vec![
            Block::heading(2, inlines!["Intro to ", link["cats"]("http://cats")]),
            Block::paragraph(inlines![
                "They ",
                em["really"],
                " like ",
                strong[link["boxes"]("http://boxes")],
            ]),
            list!(Ordered;
                [para!("one"), quote![Block::paragraph(inlines![img[link["x"]("http://inner")]("http://img")])]],
                [para!("two")],
            ),
            Block::CodeBlock(CodeBlock {
                text: "let x = 1;".to_string(),
                language: Some("rust".to_string()),
            }),
            Block::ThematicBreak,
        ]
    }

    fn render(algebra: &mut BlockAlgebra<String>) {
        algebra
            .on_heading(|children, level| format!("{} {}", "#".repeat(usize::from(level)), children.concat()))
            .on_paragraph(|children| children.concat())
            .on_list_item(|children| children.join(" / "))
            .on_list(|items, list_type| match list_type {
                ListType::Ordered => format!("ol({})", items.join(", ")),
                ListType::Unordered => format!("ul({})", items.join(", ")),
            })
            .on_block_quote(|children| format!("> {}", children.concat()))
            .on_code_block(|text, language| format!("```{}: {text}", language.unwrap_or("")))
            .on_thematic_break(|| "---".to_string())
            .on_document(|children| children.join("\n"));
        algebra
            .inline
            .on_text(str::to_string)
            .on_emphasis(|children| format!("_{}_", children.concat()))
            .on_strong(|children| format!("**{}**", children.concat()))
            .on_link(|children, _, url| format!("[{}]({})", children.concat(), url.unwrap_or("")))
            .on_image(|children, _, url| format!("![{}]({})", children.concat(), url.unwrap_or("")));
    }

    #[test]
    fn render_whole_tree() {
        let mut algebra = BlockAlgebra::new(String::new());
        render(&mut algebra);
        assert_eq!(
            reduce(&sample_doc(), &mut algebra),
            [
                "## Intro to [cats](http://cats)",
                "They _really_ like **[boxes](http://boxes)**",
                "ol(one / > ![[x](http://inner)](http://img), two)",
                "```rust: let x = 1;",
                "---",
            ]
            .join("\n")
        );
    }

    #[test]
    fn unset_combinators_use_default() {
        let mut algebra = BlockAlgebra::new(7);
        assert_eq!(reduce(&sample_doc(), &mut algebra), 7);
        assert_eq!(reduce(&[], &mut algebra), 7);
    }

    #[test]
    fn children_folded_even_when_parent_unset() {
        let texts = RefCell::new(Vec::new());
        let mut algebra = BlockAlgebra::new(());
        algebra.inline.on_text(|text| texts.borrow_mut().push(text.to_string()));
        reduce(&sample_doc(), &mut algebra);
        drop(algebra);
        assert_eq!(
            texts.into_inner(),
            vec!["Intro to ", "cats", "They ", "really", " like ", "boxes", "one", "x", "two"]
        );
    }

    #[test]
    fn post_order() {
        let doc = vec![
            list!(Unordered; [Block::heading(1, inlines![em["a"]])]),
            Block::Html("<br>".to_string()),
        ];
        let seen = RefCell::new(Vec::new());
        let record = |name: &str| seen.borrow_mut().push(name.to_string());

        let mut algebra = BlockAlgebra::new(());
        algebra
            .on_list(|_, _| record("list"))
            .on_list_item(|_| record("item"))
            .on_heading(|_, _| record("heading"))
            .on_html(|_| record("html"))
            .on_document(|_| record("document"));
        algebra.inline.on_text(|_| record("text")).on_emphasis(|_| record("emphasis"));
        reduce(&doc, &mut algebra);
        drop(algebra);

        assert_eq!(
            seen.into_inner(),
            vec!["text", "emphasis", "heading", "item", "list", "html", "document"]
        );
    }

    #[test]
    fn combinators_see_node_data() {
        let doc = vec![
            Block::heading(4, inlines![]),
            list!(Unordered; [], []),
            Block::Custom("custom".to_string()),
            Block::paragraph(vec![
                Inline::Code("c".to_string()),
                Inline::Html("<i>".to_string()),
                Inline::SoftBreak,
                Inline::LineBreak,
                Inline::Link(Link {
                    children: vec![],
                    title: Some("a title".to_string()),
                    url: None,
                }),
            ]),
        ];
        let mut algebra: BlockAlgebra<Vec<String>> = BlockAlgebra::collecting();
        algebra
            .on_heading(|_, level| vec![format!("heading {level}")])
            .on_list(|items, list_type| vec![format!("{list_type:?} with {}", items.len())])
            .on_custom(|custom| vec![custom.to_string()]);
        algebra
            .inline
            .on_code(|code| vec![format!("code {code}")])
            .on_html(|html| vec![html.to_string()])
            .on_soft_break(|| vec!["soft".to_string()])
            .on_line_break(|| vec!["hard".to_string()])
            .on_link(|_, title, url| vec![format!("{title:?} {url:?}")]);
        assert_eq!(
            reduce(&doc, &mut algebra),
            vec![
                "heading 4",
                "Unordered with 2",
                "custom",
                "code c",
                "<i>",
                "soft",
                "hard",
                "Some(\"a title\") None",
            ]
        );
    }

    #[test]
    fn collecting_without_overrides_is_empty() {
        let mut algebra: BlockAlgebra<String> = BlockAlgebra::collecting();
        assert_eq!(reduce(&sample_doc(), &mut algebra), "");
    }

    #[test]
    fn collecting_link_urls_matches_collect_inlines() {
        let doc = sample_doc();
        let mut algebra: BlockAlgebra<Vec<String>> = BlockAlgebra::collecting();
        algebra.inline.on_link(|children, _, url| {
            let mut urls = Vec::concat(children);
            urls.extend(url.map(str::to_string));
            urls
        });

        let collected = collect_inlines(&doc, |inline| match inline {
            Inline::Link(link) => link.url.iter().cloned().collect(),
            _ => vec![],
        });
        assert_eq!(reduce(&doc, &mut algebra), collected);
        assert_eq!(collected, vec!["http://cats", "http://boxes", "http://inner"]);
    }

    #[test]
    fn collecting_into_string() {
        let mut algebra: BlockAlgebra<String> = BlockAlgebra::collecting();
        algebra.inline.on_code(str::to_string);
        algebra.on_code_block(|text, _| text.to_string());
        let doc = vec![
            Block::paragraph(vec![Inline::Code("a".to_string()), "b".into(), Inline::Code("c".to_string())]),
            Block::CodeBlock(CodeBlock {
                text: "d".to_string(),
                language: None,
            }),
        ];
        assert_eq!(reduce(&doc, &mut algebra), "acd");
    }

    #[test]
    fn first_error_aborts() {
        let calls = RefCell::new(0);
        let mut algebra: BlockAlgebra<(), String> = BlockAlgebra::new(());
        algebra.try_on_code_block(|text, _| Err(format!("no code allowed: {text}")));
        algebra.inline.on_text(|_| *calls.borrow_mut() += 1);
        algebra.on_thematic_break(|| panic!("should have stopped at the code block"));

        let result = try_reduce(&sample_doc(), &mut algebra);
        drop(algebra);
        assert_eq!(result, Err("no code allowed: let x = 1;".to_string()));
        assert_eq!(calls.into_inner(), 9);
    }

    #[test]
    fn error_from_inside_list_item() {
        let mut algebra: BlockAlgebra<usize, &str> = BlockAlgebra::collecting_count();
        algebra.inline.try_on_image(|_, _, _| Err("image"));
        assert_eq!(try_reduce(&sample_doc(), &mut algebra), Err("image"));
    }

    impl Monoid for usize {
        fn empty() -> Self {
            0
        }

        fn combine(self, other: Self) -> Self {
            self + other
        }
    }

    impl<'a, E: 'a> BlockAlgebra<'a, usize, E> {
        fn collecting_count() -> Self {
            let mut algebra = Self::collecting();
            algebra.inline.on_text(|_| 1);
            algebra
        }
    }

    #[test]
    fn counting_text_nodes() {
        let mut algebra = BlockAlgebra::collecting_count();
        assert_eq!(reduce(&sample_doc(), &mut algebra), 9);
    }
}
