use avl_bst::{Error, Tree};

use crate::Op;

#[quickcheck]
fn cursor_matches_iter(ops: Vec<Op<i16>>) -> bool {
    let mut tree = Tree::new();
    for op in ops {
        match op {
            Op::Add(x) => tree.add(x),
            Op::Remove(x) => tree.remove(&x),
        };
    }

    let mut cursor = tree.cursor();
    let mut walked = Vec::new();
    while cursor.has_next(&tree).unwrap() {
        walked.push(*cursor.next(&tree).unwrap());
    }

    walked.len() == tree.size() && walked.iter().eq(tree.iter())
}

#[quickcheck]
fn structural_change_is_reported(xs: Vec<i16>, steps: usize, extra: i16) -> bool {
    let mut tree: Tree<_> = xs.into_iter().collect();
    let mut cursor = tree.cursor();
    for _ in 0..steps % (tree.size() + 1) {
        cursor.next(&tree).unwrap();
    }

    if !tree.add(extra) {
        // Overwrites don't move anything.
        return cursor.has_next(&tree).is_ok();
    }

    let modified = Error::Modified {
        expected: tree.epoch() - 1,
        found: tree.epoch(),
    };
    cursor.has_next(&tree) == Err(modified) && cursor.next(&tree) == Err(modified)
}
