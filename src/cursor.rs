//! An in-order walk over a [`Tree`] that does not borrow it between steps.
//!
//! A [`Cursor`] is bound to one tree and remembers the tree's epoch at that moment. Every step is
//! handed the tree again and first checks that it is the same tree and that no node has been added
//! or removed since binding. A cursor that fails either check reports an [`Error`] instead of
//! walking a tree whose shape it no longer knows.
//!
//! The cursor keeps a stack of markers, one per node on the path from the root to the next element.
//! Each marker records which child step reaches its node and whether the node's own element has been
//! yielded (meaning the walk is now inside its right subtree). Nodes are found again from the root
//! on every step, so the cursor never holds on to a node.
//!
//! # Examples
//!
//! ```
//! use avl_bst::{Cursor, Error, Tree};
//!
//! let mut tree: Tree<_> = vec![2, 1, 3].into_iter().collect();
//!
//! let mut cursor = tree.cursor();
//! let mut seen = Vec::new();
//! while cursor.has_next(&tree)? {
//!     seen.push(*cursor.next(&tree)?);
//! }
//! assert_eq!(seen, [1, 2, 3]);
//! assert_eq!(cursor.next(&tree), Err(Error::Exhausted));
//!
//! // Overwriting doesn't move any nodes so a fresh cursor survives it.
//! let mut cursor = tree.cursor();
//! tree.add(2);
//! assert_eq!(cursor.next(&tree), Ok(&1));
//!
//! // Removing does.
//! tree.remove(&3);
//! assert!(matches!(cursor.has_next(&tree), Err(Error::Modified { .. })));
//!
//! // Unbound cursors can't be used at all.
//! assert_eq!(Cursor::new().has_next(&tree), Err(Error::Unbound));
//! # Ok::<(), Error>(())
//! ```

use crate::error::{Error, Result};
use crate::tree::{Node, Tree};

/// A walk over the elements of a [`Tree`] in ascending order that checks for structural changes
/// on every step. Created by [`Tree::cursor`] or [`Cursor::bind`].
#[derive(Clone, Debug, Default)]
pub struct Cursor {
    binding: Option<Binding>,
    /// The path from the root to the next element. Empty once exhausted.
    markers: Vec<Marker>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Binding {
    tree: u64,
    epoch: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Root,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug)]
struct Marker {
    step: Step,
    /// Whether this node's element has been yielded. Only such nodes sit below a `Right` step.
    yielded: bool,
}

impl Cursor {
    /// A cursor that isn't bound to any tree. Every step on it fails with [`Error::Unbound`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a cursor to `tree`, positioned before its smallest element.
    pub fn bind<T, C>(tree: &Tree<T, C>) -> Self {
        let mut cursor = Self {
            binding: Some(Binding {
                tree: tree.id(),
                epoch: tree.epoch(),
            }),
            markers: Vec::new(),
        };
        if let Some(root) = tree.root() {
            cursor.markers.push(Marker {
                step: Step::Root,
                yielded: false,
            });
            cursor.push_left_spine(root);
        }

        cursor
    }

    /// Whether the cursor has been bound to a tree.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Whether another element is left.
    ///
    /// # Errors
    ///
    /// If the cursor is unbound, `tree` is not the tree it was bound to, or `tree` has gained or
    /// lost a node since binding.
    pub fn has_next<T, C>(&self, tree: &Tree<T, C>) -> Result<bool> {
        self.check(tree)?;
        Ok(!self.markers.is_empty())
    }

    /// Returns the next element and moves past it.
    ///
    /// # Errors
    ///
    /// The same conditions as [`has_next`][Cursor::has_next], plus [`Error::Exhausted`] when
    /// there is no next element.
    pub fn next<'t, T, C>(&mut self, tree: &'t Tree<T, C>) -> Result<&'t T> {
        if !self.has_next(tree)? {
            return Err(Error::Exhausted);
        }
        // A matching tree and epoch mean the markers still describe a real path.
        let node = self.resolve(tree).ok_or(Error::Modified {
            expected: self.binding.map_or(0, |b| b.epoch),
            found: tree.epoch(),
        })?;
        self.advance(node);

        Ok(&node.value)
    }

    fn check<T, C>(&self, tree: &Tree<T, C>) -> Result<()> {
        let binding = self.binding.ok_or(Error::Unbound)?;
        if binding.tree != tree.id() {
            return Err(Error::ForeignTree);
        }
        if binding.epoch != tree.epoch() {
            return Err(Error::Modified {
                expected: binding.epoch,
                found: tree.epoch(),
            });
        }

        Ok(())
    }

    /// Follows the markers down from the root to the node the top marker stands for.
    fn resolve<'t, T, C>(&self, tree: &'t Tree<T, C>) -> Option<&'t Node<T>> {
        let (first, rest) = self.markers.split_first()?;
        debug_assert_eq!(first.step, Step::Root);

        rest.iter().try_fold(tree.root()?, |node, marker| match marker.step {
            Step::Left => node.left.as_deref(),
            Step::Right => node.right.as_deref(),
            Step::Root => None,
        })
    }

    /// Moves past `node`, which the top marker stands for.
    fn advance<T>(&mut self, node: &Node<T>) {
        let mut marker = self.markers.pop().expect("Advancing => pending marker");
        match node.right.as_deref() {
            Some(right) => {
                marker.yielded = true;
                self.markers.push(marker);
                self.markers.push(Marker {
                    step: Step::Right,
                    yielded: false,
                });
                self.push_left_spine(right);
            }
            None => {
                while self.markers.last().map_or(false, |marker| marker.yielded) {
                    self.markers.pop();
                }
            }
        }
    }

    /// Pushes a marker for every left child below `node`, whose own marker is already on top.
    fn push_left_spine<T>(&mut self, node: &Node<T>) {
        let mut node = node;
        while let Some(left) = node.left.as_deref() {
            self.markers.push(Marker {
                step: Step::Left,
                yielded: false,
            });
            node = left;
        }
    }
}
