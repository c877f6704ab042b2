//! A height-balanced (AVL) index of records. Every node exclusively owns its
//! children, so the tree can be mutated in place without any `unsafe` or shared
//! pointers. Records are ordered by [`Record::key`] and keys are unique:
//! inserting a key twice is an error rather than an overwrite.
//!
//! # Examples
//!
//! ```
//! use sayings::{Error, Record, Saying, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.member("aloha"));
//! assert!(tree.first().is_none());
//!
//! tree.insert(Saying::new("mahalo", "thank you")).unwrap();
//! tree.insert(Saying::new("aloha", "love")).unwrap();
//! tree.insert(Saying::new("ohana", "family")).unwrap();
//!
//! assert!(tree.member("aloha"));
//! assert_eq!(tree.first().map(Record::key), Some("aloha"));
//! assert_eq!(tree.last().map(Record::key), Some("ohana"));
//!
//! // Neighbors are defined for keys that aren't in the tree as well.
//! assert_eq!(tree.successor("kapu").map(Record::key), Some("mahalo"));
//!
//! // The same key can't be inserted twice.
//! assert_eq!(
//!     tree.insert(Saying::new("aloha", "hello")),
//!     Err(Error::DuplicateKey { key: "aloha".to_string() }),
//! );
//! assert_eq!(tree.len(), 3);
//! ```

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::record::{Record, Saying};

/// A self-balancing Binary Search Tree (specifically, an AVL tree) of records
/// keyed by [`Record::key`].
///
/// After every successful [`insert`][Tree::insert] the heights of the two
/// subtrees of every node differ by at most one, so lookups, neighbor queries
/// and inserts all take `O(lg N)`.
#[derive(Clone, Debug)]
pub struct Tree<R = Saying> {
    root: Link<R>,
    len: usize,
}

impl<R> Default for Tree<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Tree<R> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: Link(None),
            len: 0,
        }
    }

    /// The number of records in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no records.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// How many levels are in the tree. An empty tree has height 0 and a tree
    /// with a single record has height 1.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// The record with the smallest key, if any.
    pub fn first(&self) -> Option<&R> {
        let mut node = self.root.node()?;
        while let Some(left) = node.left.node() {
            node = left;
        }
        Some(&node.record)
    }

    /// The record with the largest key, if any.
    pub fn last(&self) -> Option<&R> {
        let mut node = self.root.node()?;
        while let Some(right) = node.right.node() {
            node = right;
        }
        Some(&node.record)
    }

    /// Iterates over the records in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sayings::{Record, Saying, Tree};
    ///
    /// let mut tree = Tree::new();
    /// for key in ["pono", "aloha", "kokua"] {
    ///     tree.insert(Saying::new(key, "")).unwrap();
    /// }
    ///
    /// let keys: Vec<_> = tree.iter().map(Record::key).collect();
    /// assert_eq!(keys, ["aloha", "kokua", "pono"]);
    /// ```
    pub fn iter(&self) -> Iter<'_, R> {
        Iter::new(self.root.node())
    }

    /// Collects every record in ascending key order. The result is a fresh
    /// snapshot; it does not track later inserts.
    pub fn in_order(&self) -> Vec<&R> {
        self.iter().collect()
    }
}

impl<R: Record> Tree<R> {
    /// Inserts the record into the tree, rebalancing on the way back up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if a record with the same key is already
    /// stored. In that case the tree is left exactly as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use sayings::{Error, Record, Saying, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(Saying::new("ohana", "family")).unwrap();
    ///
    /// let err = tree.insert(Saying::new("ohana", "relatives")).unwrap_err();
    /// assert_eq!(err, Error::DuplicateKey { key: "ohana".to_string() });
    ///
    /// // The original translation survives.
    /// assert_eq!(tree.get("ohana").map(Record::translation), Some("family"));
    /// ```
    pub fn insert(&mut self, record: R) -> Result<()> {
        let key = record.key().to_owned();
        if let Err(err) = self.root.insert(record, &key) {
            tracing::debug!(%key, "rejected saying with duplicate key");
            return Err(err);
        }
        self.len += 1;
        Ok(())
    }

    /// Whether a record with exactly this key is stored.
    pub fn member(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Potentially finds the record stored under the given key. If no record
    /// has the key, `None` is returned.
    pub fn get(&self, key: &str) -> Option<&R> {
        self.root.node().and_then(|n| n.find(key))
    }

    /// The record with the greatest key strictly less than `key`. `key` itself
    /// does not need to be in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use sayings::{Record, Saying, Tree};
    ///
    /// let mut tree = Tree::new();
    /// for key in ["aloha", "mahalo", "ohana"] {
    ///     tree.insert(Saying::new(key, "")).unwrap();
    /// }
    ///
    /// assert_eq!(tree.predecessor("mahalo").map(Record::key), Some("aloha"));
    /// assert_eq!(tree.predecessor("zebra").map(Record::key), Some("ohana"));
    /// assert!(tree.predecessor("aloha").is_none());
    /// ```
    pub fn predecessor(&self, key: &str) -> Option<&R> {
        self.root.node().and_then(|n| n.predecessor(key))
    }

    /// The record with the least key strictly greater than `key`. `key` itself
    /// does not need to be in the tree.
    pub fn successor(&self, key: &str) -> Option<&R> {
        self.root.node().and_then(|n| n.successor(key))
    }

    /// Every record whose key contains `needle`. Matching is case-sensitive and
    /// the order of the results is unspecified.
    pub fn find_by_key_substring(&self, needle: &str) -> Vec<&R> {
        self.scan(|record| record.key().contains(needle))
    }

    /// Every record whose translation contains `needle`. Matching is
    /// case-sensitive and the order of the results is unspecified.
    pub fn find_by_translation_substring(&self, needle: &str) -> Vec<&R> {
        self.scan(|record| record.translation().contains(needle))
    }

    /// Visits every node once and keeps the records accepted by `matches`.
    fn scan<F>(&self, matches: F) -> Vec<&R>
    where
        F: Fn(&R) -> bool,
    {
        let mut found = Vec::new();
        if let Some(root) = self.root.node() {
            root.collect_matching(&matches, &mut found);
        }
        found
    }
}

impl<'a, R> IntoIterator for &'a Tree<R> {
    type Item = &'a R;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the records of a [`Tree`] in ascending key order.
///
/// Created by [`Tree::iter`]. It holds at most one entry per level of the tree.
pub struct Iter<'a, R> {
    stack: Vec<&'a Node<R>>,
}

impl<'a, R> Iter<'a, R> {
    fn new(root: Option<&'a Node<R>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<R>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.node();
        }
    }
}

impl<'a, R> Iterator for Iter<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.node());
        Some(&node.record)
    }
}

/// An owning, possibly empty, link to a subtree.
#[derive(Clone, Debug)]
struct Link<R>(Option<Box<Node<R>>>);

impl<R> Link<R> {
    fn node(&self) -> Option<&Node<R>> {
        self.0.as_deref()
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }

    fn height(&self) -> usize {
        self.node().map_or(0, |n| n.height)
    }
}

impl<R: Record> Link<R> {
    /// Inserts `record` (whose key is `key`) into this subtree. On the way
    /// back up every visited link is rebalanced. Nothing is modified if `key`
    /// is already present.
    fn insert(&mut self, record: R, key: &str) -> Result<()> {
        let node = match &mut self.0 {
            Some(node) => node,
            None => {
                self.0 = Some(Box::new(Node::new(record)));
                return Ok(());
            }
        };

        match key.cmp(node.record.key()) {
            Ordering::Less => node.left.insert(record, key)?,
            Ordering::Equal => {
                return Err(Error::DuplicateKey {
                    key: key.to_owned(),
                })
            }
            Ordering::Greater => node.right.insert(record, key)?,
        }

        self.balance(key);
        Ok(())
    }

    /// Restores the AVL invariant at this link after `key` was inserted below
    /// it. The side of the child the new key went to picks between a single
    /// and a double rotation.
    ///
    /// See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for terminology.
    fn balance(&mut self, key: &str) {
        let Some(root) = self.0.as_deref_mut() else {
            return;
        };
        root.fix_height();

        let balance = root.balance_factor();
        if balance > 1 {
            match root.left.node().map(|left| key.cmp(left.record.key())) {
                Some(Ordering::Less) => self.rotate_right(),
                Some(Ordering::Greater) => self.rotate_left_right(),
                _ => {}
            }
        } else if balance < -1 {
            match root.right.node().map(|right| key.cmp(right.record.key())) {
                Some(Ordering::Greater) => self.rotate_left(),
                Some(Ordering::Less) => self.rotate_right_left(),
                _ => {}
            }
        }

        if cfg!(debug_assertions) {
            let Some(root) = self.node() else {
                return;
            };
            let left_height = root.left.height();
            let right_height = root.right.height();
            assert_eq!(root.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }
    }

    /// Rotate self to the right. This moves the left child up vertically and
    /// self down vertically. Used to rebalance the tree when the left child is
    /// too tall, so a missing left child leaves the link untouched.
    ///
    /// # Diagram
    ///
    /// ```text
    ///       old_root               new_root
    ///        /     \                /     \
    ///   new_root    z   rotate ->  x    old_root
    ///    / \                               /  \
    ///   x   y                             y    z
    /// ```
    fn rotate_right(&mut self) {
        let Some(mut old_root) = self.0.take() else {
            return;
        };
        let Some(mut new_root) = old_root.left.0.take() else {
            self.0 = Some(old_root);
            return;
        };
        tracing::trace!(pivot = new_root.record.key(), "rotating right");

        old_root.left = new_root.right.take();
        old_root.fix_height();

        new_root.right = Link(Some(old_root));
        new_root.fix_height();
        self.0 = Some(new_root);
    }

    /// Mirror image of [`rotate_right`][Link::rotate_right].
    fn rotate_left(&mut self) {
        let Some(mut old_root) = self.0.take() else {
            return;
        };
        let Some(mut new_root) = old_root.right.0.take() else {
            self.0 = Some(old_root);
            return;
        };
        tracing::trace!(pivot = new_root.record.key(), "rotating left");

        old_root.right = new_root.left.take();
        old_root.fix_height();

        new_root.left = Link(Some(old_root));
        new_root.fix_height();
        self.0 = Some(new_root);
    }

    fn rotate_left_right(&mut self) {
        if let Some(root) = self.0.as_deref_mut() {
            root.left.rotate_left();
        }
        self.rotate_right();
    }

    fn rotate_right_left(&mut self) {
        if let Some(root) = self.0.as_deref_mut() {
            root.right.rotate_right();
        }
        self.rotate_left();
    }
}

#[derive(Clone, Debug)]
struct Node<R> {
    record: R,
    left: Link<R>,
    right: Link<R>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

impl<R> Node<R> {
    fn new(record: R) -> Self {
        Self {
            record,
            left: Link(None),
            right: Link(None),
            height: 1,
        }
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = self.left.height().max(self.right.height()) + 1;
    }

    /// Left subtree height minus right subtree height.
    fn balance_factor(&self) -> isize {
        self.left.height() as isize - self.right.height() as isize
    }
}

impl<R: Record> Node<R> {
    fn find(&self, key: &str) -> Option<&R> {
        match key.cmp(self.record.key()) {
            Ordering::Less => self.left.node().and_then(|n| n.find(key)),
            Ordering::Equal => Some(&self.record),
            Ordering::Greater => self.right.node().and_then(|n| n.find(key)),
        }
    }

    fn predecessor(&self, key: &str) -> Option<&R> {
        if key <= self.record.key() {
            self.left.node().and_then(|n| n.predecessor(key))
        } else {
            // Anything smaller than `key` in the right subtree is closer than us.
            self.right
                .node()
                .and_then(|n| n.predecessor(key))
                .or(Some(&self.record))
        }
    }

    fn successor(&self, key: &str) -> Option<&R> {
        if key >= self.record.key() {
            self.right.node().and_then(|n| n.successor(key))
        } else {
            self.left
                .node()
                .and_then(|n| n.successor(key))
                .or(Some(&self.record))
        }
    }

    /// Pre-order walk pushing every record accepted by `matches` into `found`.
    fn collect_matching<'a, F>(&'a self, matches: &F, found: &mut Vec<&'a R>)
    where
        F: Fn(&R) -> bool,
    {
        if matches(&self.record) {
            found.push(&self.record);
        }
        if let Some(left) = self.left.node() {
            left.collect_matching(matches, found);
        }
        if let Some(right) = self.right.node() {
            right.collect_matching(matches, found);
        }
    }
}
