//! Group-by and count helpers over an ordered record sequence.
//!
//! Groups keep the order in which their key was first seen, so charts built
//! from them are stable across recomputes.

use std::collections::HashMap;
use std::hash::Hash;

/// Group `items` by `key`. Returns `(key, members)` pairs in first-occurrence
/// order of the key; members keep their input order.
pub fn group_by<'a, T, K, F>(items: &'a [T], key: F) -> Vec<(K, Vec<&'a T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a T>)> = Vec::new();
    for item in items {
        let k = key(item);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }
    groups
}

/// Count `items` by `key`, first-occurrence order.
pub fn count_by<T, K, F>(items: &[T], key: F) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    group_by(items, key)
        .into_iter()
        .map(|(k, members)| (k, members.len()))
        .collect()
}
