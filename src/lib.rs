//! Generic traversals over a Markdown document tree.
//!
//! [`md_elem`] holds the tree itself: [`md_elem::Block`]s, which nest other blocks through lists and block quotes, and
//! [`md_elem::Inline`]s, which hold the text flow of paragraphs and headings. [`md_elem::parse`] reads one from
//! Markdown text.
//!
//! [`walk`] holds the operations over that tree, so that you don't need to write the recursion yourself:
//!
//! ```
//! use mdwalk::md_elem::*;
//! use mdwalk::walk::*;
//!
//! let doc = parse("# Hello\n\n- see [the docs](https://example.com/docs)", &ParseOptions::gfm()).unwrap();
//!
//! // Pull out every link's url.
//! let urls = collect_inlines(&doc, |inline| match inline {
//!     Inline::Link(link) => link.url.iter().cloned().collect(),
//!     _ => vec![],
//! });
//! assert_eq!(urls, vec!["https://example.com/docs"]);
//!
//! // Replace each link with its text.
//! let unlinked = apply_inlines(doc, |inline| match inline {
//!     Inline::Link(link) => link.children,
//!     other => vec![other],
//! });
//! assert!(filter_inlines(&unlinked, |inline| matches!(inline, Inline::Link(_))).is_empty());
//! ```
pub mod md_elem;
pub mod walk;
