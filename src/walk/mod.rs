//! Generic walks over a parsed document.
//!
//! There are four families:
//!
//! - [`apply_blocks`], [`apply_inlines`] and [`apply_inline`] rebuild the tree, replacing each node with whatever the
//!   caller's function returns for it.
//! - [`collect_blocks`] and [`collect_inlines`] pull a flat list of values out of the tree.
//! - [`filter_blocks`] and [`filter_inlines`] find the nodes that match a predicate.
//! - [`reduce`] folds the whole tree into a single value, driven by a [`BlockAlgebra`].
//!
//! All of them visit nodes depth-first, left to right, with a container's descendants before the container itself.
//! Each has a `try_` form whose function returns a `Result`; the first `Err` stops the walk and is returned unchanged.
mod apply;
mod collect;
mod monoid;
mod reduce;

pub use apply::*;
pub use collect::*;
pub use monoid::*;
pub use reduce::*;

use std::convert::Infallible;

/// Unwraps the result of a `try_` walk whose error type can't be constructed.
pub(crate) fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
