//! Ordering plumbing for [`Tree`][crate::Tree].
//!
//! Every ordering decision a tree makes (where to descend, whether an `add` overwrites, which
//! element `find` returns) goes through a [`Comparator`]. Element types with a total order can use
//! [`Natural`]; anything else supplies its own comparator when the tree is built.
//!
//! # Examples
//!
//! ```
//! use avl_bst::Tree;
//!
//! // Order (track number, title) pairs by track number only.
//! let mut album = Tree::with_comparator(|a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0));
//!
//! album.add((2, 'b'));
//! album.add((1, 'a'));
//!
//! // Same track number => overwrite.
//! assert!(!album.add((2, 'z')));
//! assert_eq!(album.find(&(2, ' ')), Some(&(2, 'z')));
//! ```

use std::cmp::Ordering;

/// A three-way comparison over `T`. `Less`, `Equal` and `Greater` play the role of a negative,
/// zero, or positive comparison result.
///
/// Implementations must describe a total order: it has to be consistent between calls, otherwise
/// lookups may miss elements that are present.
pub trait Comparator<T: ?Sized> {
    /// Compares `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders elements by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T> Comparator<T> for Natural
where
    T: Ord + ?Sized,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T, F> Comparator<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
