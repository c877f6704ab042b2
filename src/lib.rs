//! This crate is a small, ordered, in-memory index of Hawaiian sayings and their
//! English translations.
//!
//! ## Balanced Binary Search Tree
//!
//! The index is a Binary Search Tree keyed by the Hawaiian phrase of each saying.
//! A BST is defined recursively using the notion of a `Node`. A `Node` stores a
//! record and may have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)`, so the tree keeps itself balanced (AVL style):
//! for every `Node`, the heights of its two subtrees differ by at most one. That
//! bounds the height by `O(lg N)` where `N` is the number of sayings. Visiting the
//! left subtree, then the subtree root, then the right subtree yields the sayings
//! in sorted order, and the same descent answers "what comes just before/after
//! this phrase" even for phrases that aren't stored.
//!
//! # Examples
//!
//! ```
//! use sayings::{Record, Saying, Tree};
//!
//! let mut tree = Tree::new();
//! tree.insert(Saying::new("aloha kakahiaka", "good morning")).unwrap();
//! tree.insert(Saying::new("aloha ahiahi", "good evening")).unwrap();
//! tree.insert(Saying::new("mahalo nui", "thank you very much")).unwrap();
//!
//! assert_eq!(tree.first().map(Record::key), Some("aloha ahiahi"));
//! assert_eq!(tree.find_by_translation_substring("good").len(), 2);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
mod error;
pub mod record;

pub use avl::Tree;
pub use error::{Error, Result};
pub use record::{Record, Saying};
