//! Errors reported by a [`Cursor`][crate::Cursor].
//!
//! Every variant is a usage error: the caller stepped a cursor it never bound, handed it the wrong
//! tree, kept stepping after the end, or changed the tree's structure mid-walk. None of them go away
//! by retrying. Lookups that simply miss are not errors, they come back as `None`/`false`.

use thiserror::Error;

/// Errors that can occur while stepping a [`Cursor`][crate::Cursor].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The cursor was created with [`Cursor::new`][crate::Cursor::new] and never bound to a tree.
    #[error("cursor is not bound to a tree")]
    Unbound,

    /// The cursor was handed a tree other than the one it was bound to.
    #[error("cursor was bound to a different tree")]
    ForeignTree,

    /// A node was added or removed (or the tree cleared) after the cursor was bound.
    #[error("tree structure has been modified (cursor epoch {expected}, tree epoch {found})")]
    Modified {
        /// The epoch captured when the cursor was bound.
        expected: u64,
        /// The tree's current epoch.
        found: u64,
    },

    /// `next` was called although `has_next` is `false`.
    #[error("attempt to get next from a cursor with no elements left")]
    Exhausted,
}

/// A `Result` alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
