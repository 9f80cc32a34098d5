//! Snippets bundled into contest solutions by `cftemplate`.
//!
//! Each module is pasted as-is into a single-file solution, so a module may
//! only refer to another one through a top-level `use crate::...;`.

#[macro_use]
pub mod macros;

pub mod binary_search;
pub mod bit;
pub mod combination;
pub mod monoid;
pub mod num;
pub mod output;
pub mod prelude;
pub mod scanner;
pub mod segment_tree;
pub mod union_find;
