use avl_bst::{Comparator, Tree};

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use crate::Op;

type Entry = (i8, i8);

/// Orders entries by their key only, so adding an entry with a known key overwrites its value.
fn by_key(a: &Entry, b: &Entry) -> Ordering {
    a.0.cmp(&b.0)
}

fn entry_tree() -> Tree<Entry, fn(&Entry, &Entry) -> Ordering> {
    Tree::with_comparator(by_key as fn(&Entry, &Entry) -> Ordering)
}

/// Applies a set of operations to a tree and a `BTreeMap`.
/// This way we can ensure that after a random smattering of adds
/// and removes we have the same set of keys in both.
fn do_ops<C>(ops: &[Op<Entry>], tree: &mut Tree<Entry, C>, map: &mut BTreeMap<i8, i8>)
where
    C: Comparator<Entry>,
{
    for op in ops {
        match *op {
            Op::Add((k, v)) => {
                assert_eq!(tree.add((k, v)), map.insert(k, v).is_none());
            }
            Op::Remove((k, _)) => {
                assert_eq!(tree.remove(&(k, 0)), map.remove(&k).is_some());
            }
        }
        assert!(tree.is_balanced());
        assert_eq!(tree.size(), map.len());
    }
}

fn is_strictly_ascending<T: Ord>(tree: &Tree<T>) -> bool {
    let xs: Vec<_> = tree.iter().collect();
    xs.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<Entry>>) -> bool {
    let mut tree = entry_tree();
    let mut map = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut map);
    map.iter().all(|(k, v)| tree.find(&(*k, 0)) == Some(&(*k, *v)))
        && tree.iter().map(|(k, _)| k).eq(map.keys())
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.find(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.remove(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have added the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    tree.is_balanced()
        && is_strictly_ascending(&tree)
        && deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
}

#[quickcheck]
fn missing_remove_changes_nothing(xs: Vec<i16>, missing: i16) -> bool {
    let mut tree: Tree<_> = xs.into_iter().filter(|x| *x != missing).collect();
    let before: Vec<_> = tree.iter().copied().collect();
    let (size, epoch) = (tree.size(), tree.epoch());

    !tree.remove(&missing)
        && tree.size() == size
        && tree.epoch() == epoch
        && tree.iter().copied().eq(before)
}

#[quickcheck]
fn overwrite_returns_newest(xs: Vec<Entry>) -> bool {
    let mut tree = entry_tree();
    let mut latest = BTreeMap::new();
    for (k, v) in xs {
        let size = tree.size();
        let created = tree.add((k, v));
        if created == (tree.size() == size) {
            return false;
        }
        latest.insert(k, v);
    }

    latest.into_iter().all(|(k, v)| tree.find(&(k, 0)) == Some(&(k, v)))
}

#[quickcheck]
fn height_bound(xs: Vec<u32>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();
    let bound = (1.44 * ((tree.size() + 2) as f64).log2()).ceil() as usize;

    tree.height() <= bound
}

#[quickcheck]
fn copies_are_independent(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let original: Tree<_> = xs.into_iter().collect();
    let before: Vec<_> = original.iter().copied().collect();

    let mut copy = original.clone();
    for delete in &deletes {
        copy.remove(delete);
    }
    copy.add(i8::MIN);

    original.size() == before.len()
        && original.iter().copied().eq(before)
        && copy.is_balanced()
}

#[test]
fn round_trip() {
    let mut tree: Tree<_> = vec![5, 3, 8, 1, 4, 7, 9, 2, 6].into_iter().collect();
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), (1..=9).collect::<Vec<_>>());

    assert!(tree.remove(&3));
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn large_sequential_tree_stays_shallow() {
    let mut tree = Tree::new();
    for x in 0..100_000u32 {
        tree.add(x);
    }
    assert!(tree.height() <= 24);
    assert!(tree.is_balanced());

    for x in (0..100_000u32).filter(|x| x % 3 != 0) {
        assert!(tree.remove(&x));
    }
    assert_eq!(tree.size(), 33_334);
    assert!(tree.is_balanced());
    assert!(is_strictly_ascending(&tree));
}
