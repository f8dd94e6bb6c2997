use std::iter::FusedIterator;

use crate::tree::Node;

/// An iterator over the elements of a [`Tree`][crate::Tree] in ascending order.
///
/// This `struct` is created by the [`iter`][crate::Tree::iter] method on
/// [`Tree`][crate::Tree]. It borrows the tree for its whole life.
///
/// # Examples
///
/// ```
/// use avl_bst::Tree;
///
/// let tree: Tree<_> = vec![2, 3, 1].into_iter().collect();
///
/// let mut iter = tree.iter();
/// assert_eq!(iter.len(), 3);
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.collect::<Vec<_>>(), [&2, &3]);
/// ```
pub struct Iter<'a, T> {
    /// The left spine still to be visited. The top is the next element.
    pending: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = Self {
            pending: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.pending.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            pending: self.pending.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;

        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
