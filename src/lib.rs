//! A height-balanced Binary Search Tree (an AVL tree) over a single element type, plus a cursor
//! that walks it in order and notices when the tree changed underneath it.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! add, find, and remove stored elements. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores an element
//! and will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have an
//!    element less than its own element.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have an
//!    element greater than its own element.
//!
//! Searching takes `O(height)`. An AVL tree additionally keeps, for every `Node`, the heights of
//! its two subtrees within one of each other. That bounds the height by roughly `1.44 lg N`, so
//! every operation is `O(lg N)`.
//!
//! ## Ordering
//!
//! "Less", "greater" and "equal" are whatever the tree's [`Comparator`] says. Two elements the
//! comparator calls equal are the same entry: adding the second overwrites the first.
//!
//! ## Walking a tree
//!
//! [`Tree::iter`] borrows the tree, so the compiler rules out changes while it is alive.
//! [`Tree::cursor`] hands out a [`Cursor`] that doesn't borrow the tree between steps. Instead the
//! tree counts structural changes in its *epoch* and the cursor refuses to step once that count has
//! moved on.
//!
//! ```
//! use avl_bst::{Error, Tree};
//!
//! let mut tree: Tree<_> = vec![5, 3, 8, 1, 4, 7, 9, 2, 6].into_iter().collect();
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7, 8, 9]);
//!
//! let mut cursor = tree.cursor();
//! assert_eq!(cursor.next(&tree), Ok(&1));
//!
//! tree.remove(&3);
//! assert!(matches!(cursor.next(&tree), Err(Error::Modified { .. })));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod compare;
mod cursor;
mod error;
mod iter;
mod lexicon;
mod tree;
mod util;


pub use compare::{Comparator, Natural};
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use iter::Iter;
pub use lexicon::Lexicon;
pub use tree::Tree;
