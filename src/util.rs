/// What happened below a node during `add`. Parents use `grew` to decide whether their own balance
/// factor shifts.
pub(crate) enum Insertion {
    /// An equal element was already stored and has been overwritten. Nothing moved.
    Replaced,
    /// A new leaf was created somewhere in the subtree.
    Created {
        /// Whether the subtree this was returned from got taller.
        grew: bool,
    },
}

/// The result of removing an element from a subtree.
pub(crate) struct Removal<T> {
    /// The element that used to be stored in the removed node.
    pub(crate) value: T,
    /// Whether the subtree this was returned from got shorter.
    pub(crate) shrank: bool,
}
