//! The document tree, and reading it from Markdown text.
mod read;
mod tree;

pub use read::*;
pub use tree::*;

#[cfg(test)]
pub(crate) mod tree_test_utils;
