//! A self-balancing Binary Search Tree (specifically, an AVL tree) over a single element type. The
//! element is its own key: elements that compare equal under the tree's [`Comparator`] are the same
//! entry, so adding one overwrites the other.
//!
//! # Examples
//!
//! ```
//! use avl_bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! assert!(tree.add(1));
//! assert_eq!(tree.find(&1), Some(&1));
//!
//! // Adding an equal element overwrites it and reports that no node was created.
//! assert!(!tree.add(1));
//! assert_eq!(tree.size(), 1);
//!
//! assert!(tree.remove(&1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::sync::atomic::{self, AtomicU64};

use crate::compare::{Comparator, Natural};
use crate::cursor::Cursor;
use crate::iter::Iter;
use crate::util::{Insertion, Removal};

const LEFT_HEAVY: i8 = -1;
const EVEN: i8 = 0;
const RIGHT_HEAVY: i8 = 1;

/// Source of the identities cursors use to recognise the tree they were bound to.
static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A self-balancing Binary Search Tree. This can be used for adding, finding, and removing
/// elements, and for visiting them in ascending order.
///
/// `C` decides the order. It defaults to [`Natural`], the element type's own [`Ord`].
pub struct Tree<T, C = Natural> {
    root: Link<T>,
    len: usize,
    /// Bumped once for every node created or removed, and on `clear`. Never on overwrite.
    epoch: u64,
    id: u64,
    comparator: C,
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Generate a new, empty `Tree` ordered by `T`'s [`Ord`] implementation.
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T> Default for Tree<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> Tree<T, C> {
    /// Generate a new, empty `Tree` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_bst::Tree;
    ///
    /// let mut tree = Tree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// tree.extend(vec![1, 3, 2]);
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            len: 0,
            epoch: 0,
            id: NEXT_TREE_ID.fetch_add(1, atomic::Ordering::Relaxed),
            comparator,
        }
    }

    /// The number of distinct elements in the tree.
    pub fn size(&self) -> usize {
        self.len
    }

    /// Same as [`size`][Tree::size].
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The modification counter. It moves forward whenever a node is created or removed and when
    /// the tree is cleared; overwriting an element in place leaves it alone.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The comparator this tree orders its elements by.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
        self.epoch += 1;
    }

    /// Calls `visitor` on every element in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![3, 1, 2].into_iter().collect();
    ///
    /// let mut seen = Vec::new();
    /// tree.for_each(|x| seen.push(*x));
    /// assert_eq!(seen, [1, 2, 3]);
    /// ```
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&T),
    {
        Node::walk(&self.root, &mut visitor);
    }

    /// Like [`for_each`][Tree::for_each] but also hands `visitor` the caller's `context` on every
    /// call.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![3, 1, 2].into_iter().collect();
    ///
    /// let mut total = 0;
    /// tree.for_each_with(|x, total| *total += x, &mut total);
    /// assert_eq!(total, 6);
    /// ```
    pub fn for_each_with<D, F>(&self, mut visitor: F, context: &mut D)
    where
        F: FnMut(&T, &mut D),
    {
        self.for_each(|value| visitor(value, context));
    }

    /// An iterator over the elements in ascending order. It borrows the tree, so the tree can't
    /// change while it is alive. See [`cursor`][Tree::cursor] for a walk that doesn't hold a
    /// borrow.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Binds a new [`Cursor`] to this tree, positioned before the smallest element.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_bst::Tree;
    ///
    /// let mut tree: Tree<_> = vec![2, 1].into_iter().collect();
    /// let mut cursor = tree.cursor();
    ///
    /// assert_eq!(cursor.next(&tree), Ok(&1));
    ///
    /// // Changing the tree's shape invalidates the cursor.
    /// tree.add(3);
    /// assert!(cursor.next(&tree).is_err());
    /// ```
    pub fn cursor(&self) -> Cursor {
        Cursor::bind(self)
    }

    /// The number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        Node::height(&self.root)
    }

    /// Recomputes every subtree height and checks each node's stored balance factor against it.
    /// Returns `true` when every balance factor equals the right height minus the left height and
    /// lies in `-1..=1`.
    pub fn is_balanced(&self) -> bool {
        Node::checked_height(&self.root).is_some()
    }

    pub(crate) fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }
}

impl<T, C> Tree<T, C>
where
    C: Comparator<T>,
{
    /// Finds the stored element that compares equal to `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, key: &T) -> Option<&T> {
        Node::find(&self.root, key, &self.comparator)
    }

    /// Whether an element comparing equal to `key` is stored.
    pub fn contains(&self, key: &T) -> bool {
        self.find(key).is_some()
    }

    /// The smallest stored element that does not compare less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(tree.ceiling(&20), Some(&20));
    /// assert_eq!(tree.ceiling(&21), Some(&30));
    /// assert_eq!(tree.ceiling(&31), None);
    /// ```
    pub fn ceiling(&self, key: &T) -> Option<&T> {
        let mut candidate = None;
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            match self.comparator.compare(key, &node.value) {
                Ordering::Less => {
                    candidate = Some(&node.value);
                    link = node.left.as_deref();
                }
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => link = node.right.as_deref(),
            }
        }

        candidate
    }

    /// The smallest element.
    pub fn first(&self) -> Option<&T> {
        self.iter().next()
    }

    /// The largest element.
    pub fn last(&self) -> Option<&T> {
        let mut node = self.root()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }

        Some(&node.value)
    }

    /// Adds `value` to the tree. If an equal element is already stored it is overwritten with
    /// `value` and `false` is returned. Otherwise a new node is created and `true` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_bst::Tree;
    ///
    /// let mut tree =
    ///     Tree::with_comparator(|a: &(i32, &'static str), b: &(i32, &'static str)| a.0.cmp(&b.0));
    ///
    /// assert!(tree.add((1, "one")));
    /// assert!(!tree.add((1, "uno")));
    ///
    /// assert_eq!(tree.find(&(1, "")), Some(&(1, "uno")));
    /// ```
    pub fn add(&mut self, value: T) -> bool {
        match Node::insert(&mut self.root, value, &self.comparator) {
            Insertion::Replaced => false,
            Insertion::Created { .. } => {
                self.len += 1;
                self.epoch += 1;
                true
            }
        }
    }

    /// Removes the element comparing equal to `key`. Returns whether there was one.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    ///
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// assert_eq!(tree.find(&1), None);
    /// ```
    pub fn remove(&mut self, key: &T) -> bool {
        self.take(key).is_some()
    }

    /// Removes the element comparing equal to `key` and hands it back.
    pub fn take(&mut self, key: &T) -> Option<T> {
        let Removal { value, .. } = Node::remove(&mut self.root, key, &self.comparator)?;
        self.len -= 1;
        self.epoch += 1;

        Some(value)
    }
}

/// Copies are built by adding the source's elements in ascending order to a fresh tree, so the
/// copy holds the same elements but not necessarily the same shape.
impl<T, C> Clone for Tree<T, C>
where
    T: Clone,
    C: Comparator<T> + Clone,
{
    fn clone(&self) -> Self {
        let mut copy = Self::with_comparator(self.comparator.clone());
        copy.extend(self.iter().cloned());
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.comparator = source.comparator.clone();
        self.extend(source.iter().cloned());
    }
}

impl<T, C> fmt::Debug for Tree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> Extend<T> for Tree<T, C>
where
    C: Comparator<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T, C> IntoIterator for &'a Tree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    /// Right subtree height minus left subtree height. Only leaves `-1..=1` inside a rebalance.
    balance: i8,
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
            balance: EVEN,
        })
    }

    fn left_mut(&mut self) -> &mut Self {
        self.left.as_deref_mut().expect("Rotated node => left child")
    }

    fn right_mut(&mut self) -> &mut Self {
        self.right.as_deref_mut().expect("Rotated node => right child")
    }

    fn find<'a, C>(link: &'a Link<T>, key: &T, comparator: &C) -> Option<&'a T>
    where
        C: Comparator<T>,
    {
        let node = link.as_deref()?;
        match comparator.compare(key, &node.value) {
            Ordering::Less => Self::find(&node.left, key, comparator),
            Ordering::Equal => Some(&node.value),
            Ordering::Greater => Self::find(&node.right, key, comparator),
        }
    }

    fn insert<C>(link: &mut Link<T>, value: T, comparator: &C) -> Insertion
    where
        C: Comparator<T>,
    {
        let node = match link.as_mut() {
            Some(node) => node,
            None => {
                *link = Some(Self::new_boxed(value));
                return Insertion::Created { grew: true };
            }
        };

        let insertion = match comparator.compare(&value, &node.value) {
            Ordering::Equal => {
                node.value = value;
                Insertion::Replaced
            }
            Ordering::Less => match Self::insert(&mut node.left, value, comparator) {
                Insertion::Created { grew: true } => Insertion::Created {
                    grew: Self::grow(node, -1),
                },
                other => other,
            },
            Ordering::Greater => match Self::insert(&mut node.right, value, comparator) {
                Insertion::Created { grew: true } => Insertion::Created {
                    grew: Self::grow(node, 1),
                },
                other => other,
            },
        };

        if cfg!(debug_assertions) {
            if let Some(left) = node.left.as_deref() {
                assert_eq!(comparator.compare(&left.value, &node.value), Ordering::Less);
            }
            if let Some(right) = node.right.as_deref() {
                assert_eq!(comparator.compare(&right.value, &node.value), Ordering::Greater);
            }
        }

        insertion
    }

    /// Deletes the node comparing equal to `key` from the subtree at `link`. A node with two
    /// children takes over its in-order predecessor's element and the predecessor's node is
    /// deleted instead.
    fn remove<C>(link: &mut Link<T>, key: &T, comparator: &C) -> Option<Removal<T>>
    where
        C: Comparator<T>,
    {
        let node = link.as_mut()?;
        match comparator.compare(key, &node.value) {
            Ordering::Less => {
                let removal = Self::remove(&mut node.left, key, comparator)?;
                Some(Self::left_removed(node, removal))
            }
            Ordering::Greater => {
                let removal = Self::remove(&mut node.right, key, comparator)?;
                Some(Self::right_removed(node, removal))
            }
            Ordering::Equal if node.left.is_some() && node.right.is_some() => {
                let predecessor =
                    Self::remove_largest(&mut node.left).expect("Two children => predecessor");
                let value = mem::replace(&mut node.value, predecessor.value);
                Some(Self::left_removed(
                    node,
                    Removal {
                        value,
                        shrank: predecessor.shrank,
                    },
                ))
            }
            Ordering::Equal => Self::unlink(link),
        }
    }

    /// Deletes the largest node in the subtree by recursing to the right until there is no right
    /// child.
    fn remove_largest(link: &mut Link<T>) -> Option<Removal<T>> {
        let node = link.as_mut()?;
        if node.right.is_some() {
            let removal = Self::remove_largest(&mut node.right)?;
            return Some(Self::right_removed(node, removal));
        }

        Self::unlink(link)
    }

    /// Replaces the node at `link`, which has at most one child, with that child.
    fn unlink(link: &mut Link<T>) -> Option<Removal<T>> {
        let Node {
            value, left, right, ..
        } = *link.take()?;
        debug_assert!(left.is_none() || right.is_none());
        *link = left.or(right);

        Some(Removal {
            value,
            shrank: true,
        })
    }

    fn left_removed(node: &mut Box<Self>, removal: Removal<T>) -> Removal<T> {
        let shrank = removal.shrank && Self::shrink(node, 1);
        Removal { shrank, ..removal }
    }

    fn right_removed(node: &mut Box<Self>, removal: Removal<T>) -> Removal<T> {
        let shrank = removal.shrank && Self::shrink(node, -1);
        Removal { shrank, ..removal }
    }

    /// Applies a taller child (`delta` is the side that grew) and reports whether `node` itself
    /// got taller. After a rotation the subtree is back to its old height.
    fn grow(node: &mut Box<Self>, delta: i8) -> bool {
        Self::rebalance(node, delta);
        node.balance != EVEN
    }

    /// Applies a shorter child (`delta` points away from the side that shrank) and reports whether
    /// `node` itself got shorter.
    fn shrink(node: &mut Box<Self>, delta: i8) -> bool {
        Self::rebalance(node, delta);
        node.balance == EVEN
    }

    /// Adds `delta` to the balance factor and rotates if that pushed it out of `-1..=1`.
    ///
    /// See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for terminology.
    fn rebalance(node: &mut Box<Self>, delta: i8) {
        node.balance += delta;
        if node.balance < LEFT_HEAVY {
            Self::fix_left_imbalance(node);
        } else if node.balance > RIGHT_HEAVY {
            Self::fix_right_imbalance(node);
        }

        if cfg!(debug_assertions) {
            assert!((LEFT_HEAVY..=RIGHT_HEAVY).contains(&node.balance));
        }
    }

    /// The left subtree is two levels taller than the right one. A left child leaning the other
    /// way needs a double rotation, anything else a single right rotation.
    fn fix_left_imbalance(node: &mut Box<Self>) {
        let child = node.left.as_deref().expect("Left imbalance => left child");
        let child_balance = child.balance;
        let grandchild_balance = child.right.as_ref().map(|n| n.balance);
        match child_balance {
            RIGHT_HEAVY => {
                let grandchild_balance = grandchild_balance.expect("Right heavy => right child");
                Self::rotate_left(node.left.as_mut().expect("Left imbalance => left child"));
                Self::rotate_right(node);
                Self::settle_double_rotation(node, grandchild_balance);
            }
            EVEN => {
                // Only reachable when removing. The subtree keeps its height.
                Self::rotate_right(node);
                node.balance = RIGHT_HEAVY;
                node.right_mut().balance = LEFT_HEAVY;
            }
            _ => {
                Self::rotate_right(node);
                node.balance = EVEN;
                node.right_mut().balance = EVEN;
            }
        }
    }

    /// Mirror image of [`fix_left_imbalance`][Node::fix_left_imbalance].
    fn fix_right_imbalance(node: &mut Box<Self>) {
        let child = node.right.as_deref().expect("Right imbalance => right child");
        let child_balance = child.balance;
        let grandchild_balance = child.left.as_ref().map(|n| n.balance);
        match child_balance {
            LEFT_HEAVY => {
                let grandchild_balance = grandchild_balance.expect("Left heavy => left child");
                Self::rotate_right(node.right.as_mut().expect("Right imbalance => right child"));
                Self::rotate_left(node);
                Self::settle_double_rotation(node, grandchild_balance);
            }
            EVEN => {
                Self::rotate_left(node);
                node.balance = LEFT_HEAVY;
                node.left_mut().balance = RIGHT_HEAVY;
            }
            _ => {
                Self::rotate_left(node);
                node.balance = EVEN;
                node.left_mut().balance = EVEN;
            }
        }
    }

    /// After a double rotation the old grandchild is on top. Its old lean decides which of its new
    /// children ended up short a level.
    fn settle_double_rotation(node: &mut Box<Self>, grandchild_balance: i8) {
        let (left, right) = match grandchild_balance {
            LEFT_HEAVY => (EVEN, RIGHT_HEAVY),
            RIGHT_HEAVY => (LEFT_HEAVY, EVEN),
            _ => (EVEN, EVEN),
        };
        node.balance = EVEN;
        node.left_mut().balance = left;
        node.right_mut().balance = right;
    }

    /// Rotate `root` to the right. This moves the left child up vertically and `root` down
    /// vertically. Balance factors are left for the caller to fix.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///      old_root                new_root
    ///      /     \                 /     \
    ///  new_root   z    rotate ->  x    old_root
    ///   /  \                             /  \
    ///  x    y                           y    z
    /// ```
    fn rotate_right(root: &mut Box<Self>) {
        let mut new_root = root.left.take().expect("Rotate right => left child");
        root.left = new_root.right.take();
        mem::swap(root, &mut new_root);
        root.right = Some(new_root);
    }

    /// Rotate `root` to the left, the mirror image of [`rotate_right`][Node::rotate_right].
    ///
    /// ## Panics
    ///
    /// When called on a node without a right child.
    fn rotate_left(root: &mut Box<Self>) {
        let mut new_root = root.right.take().expect("Rotate left => right child");
        root.right = new_root.left.take();
        mem::swap(root, &mut new_root);
        root.left = Some(new_root);
    }

    fn walk<F>(link: &Link<T>, visitor: &mut F)
    where
        F: FnMut(&T),
    {
        if let Some(node) = link {
            Self::walk(&node.left, visitor);
            visitor(&node.value);
            Self::walk(&node.right, visitor);
        }
    }

    fn height(link: &Link<T>) -> usize {
        link.as_deref().map_or(0, |node| {
            Self::height(&node.left).max(Self::height(&node.right)) + 1
        })
    }

    /// The height of the subtree, or `None` if any stored balance factor is wrong.
    fn checked_height(link: &Link<T>) -> Option<usize> {
        let node = match link {
            Some(node) => node,
            None => return Some(0),
        };
        let left = Self::checked_height(&node.left)?;
        let right = Self::checked_height(&node.right)?;

        let factor = right as isize - left as isize;
        if factor != isize::from(node.balance) || factor.abs() > 1 {
            return None;
        }

        Some(left.max(right) + 1)
    }
}
