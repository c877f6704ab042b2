use sayings::{Error, Record, Saying, Tree};

use std::collections::{BTreeSet, HashSet};

/// Builds a tree from `(key, translation)` pairs, skipping keys that were
/// already inserted. Returns the tree and the set of keys that made it in.
fn build(pairs: &[(u8, u8)]) -> (Tree<Saying>, BTreeSet<String>) {
    let mut tree = Tree::new();
    let mut keys = BTreeSet::new();
    for (k, v) in pairs {
        let key = format!("{k:03}");
        if tree.insert(Saying::new(key.clone(), v.to_string())).is_ok() {
            keys.insert(key);
        }
    }

    (tree, keys)
}

quickcheck::quickcheck! {
    fn insert_then_member(pairs: Vec<(u8, u8)>) -> bool {
        let mut tree = Tree::new();
        for (k, v) in &pairs {
            let key = format!("{k:03}");
            let was_member = tree.member(&key);
            let inserted = tree.insert(Saying::new(key.clone(), v.to_string())).is_ok();
            if was_member == inserted || !tree.member(&key) {
                return false;
            }
        }

        true
    }
}

quickcheck::quickcheck! {
    fn in_order_is_strictly_increasing(pairs: Vec<(u8, u8)>) -> bool {
        let (tree, keys) = build(&pairs);
        let in_order: Vec<&str> = tree.in_order().into_iter().map(Record::key).collect();

        in_order.windows(2).all(|w| w[0] < w[1])
            && in_order.iter().copied().eq(keys.iter().map(String::as_str))
            && tree.len() == keys.len()
    }
}

quickcheck::quickcheck! {
    fn duplicate_insert_changes_nothing(pairs: Vec<(u8, u8)>, pick: usize) -> bool {
        let (mut tree, keys) = build(&pairs);
        let Some(key) = keys.iter().nth(pick % keys.len().max(1)) else {
            return true;
        };

        let before: Vec<Saying> = tree.iter().cloned().collect();
        let result = tree.insert(Saying::new(key.clone(), "replacement"));
        let after: Vec<Saying> = tree.iter().cloned().collect();

        result == Err(Error::DuplicateKey { key: key.clone() }) && before == after
    }
}

quickcheck::quickcheck! {
    fn height_is_logarithmic(pairs: Vec<(u8, u8)>) -> bool {
        let (tree, _) = build(&pairs);

        // An AVL tree with n nodes is never taller than ~1.44 lg(n + 2).
        let bound = 1.45 * ((tree.len() + 2) as f64).log2();
        (tree.height() as f64) <= bound
    }
}

quickcheck::quickcheck! {
    fn substring_scans_match_a_linear_filter(pairs: Vec<(u8, u8)>, needle: u8) -> bool {
        let (tree, _) = build(&pairs);
        let needle = (needle % 10).to_string();

        let by_key: HashSet<&str> = tree
            .find_by_key_substring(&needle)
            .into_iter()
            .map(Record::key)
            .collect();
        let expected_by_key: HashSet<&str> = tree
            .iter()
            .map(Record::key)
            .filter(|k| k.contains(&needle))
            .collect();

        let by_translation: HashSet<&str> = tree
            .find_by_translation_substring(&needle)
            .into_iter()
            .map(Record::key)
            .collect();
        let expected_by_translation: HashSet<&str> = tree
            .iter()
            .filter(|r| r.translation().contains(&needle))
            .map(Record::key)
            .collect();

        by_key == expected_by_key && by_translation == expected_by_translation
    }
}

#[test]
fn sayings_scenario() {
    let mut tree = Tree::new();
    for (hawaiian, english) in [
        ("mahalo", "thank you"),
        ("aloha", "love"),
        ("ohana", "family"),
    ] {
        tree.insert(Saying::new(hawaiian, english)).unwrap();
    }

    assert_eq!(tree.first().map(Record::key), Some("aloha"));
    assert_eq!(tree.last().map(Record::key), Some("ohana"));
    assert_eq!(tree.predecessor("mahalo").map(Record::key), Some("aloha"));
    assert_eq!(tree.successor("mahalo").map(Record::key), Some("ohana"));
    assert_eq!(tree.predecessor("aloha"), None);
    assert_eq!(tree.successor("ohana"), None);
    assert_eq!(
        tree.find_by_translation_substring("love"),
        [&Saying::new("aloha", "love")]
    );
}
