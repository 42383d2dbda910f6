use std::{
    collections::{hash_map::Entry, HashMap},
    hash::Hash,
};

use tracing::debug;

use super::{
    error::{MatchError, Side},
    pairing::Pairing,
    Matcher,
};

/// Pairs elements that are equal. Neither list may contain the same element twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMatcher;

impl IdentityMatcher {
    pub fn new() -> Self {
        IdentityMatcher
    }
}

impl<T: Eq + Hash> Matcher<T> for IdentityMatcher {
    fn match_nonempty(&self, list_a: &[T], list_b: &[T]) -> Result<Vec<Pairing>, MatchError> {
        pair_equal_keys(list_a.iter(), list_b.iter())
    }
}

/// Pairs elements whose extracted keys are equal. Neither list may contain the same key twice.
#[derive(Clone, Copy)]
pub struct KeyedIdentityMatcher<F> {
    key: F,
}

impl<F> KeyedIdentityMatcher<F> {
    pub fn new(key: F) -> Self {
        KeyedIdentityMatcher { key }
    }
}

impl<T, K, F> Matcher<T> for KeyedIdentityMatcher<F>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    fn match_nonempty(&self, list_a: &[T], list_b: &[T]) -> Result<Vec<Pairing>, MatchError> {
        pair_equal_keys(list_a.iter().map(&self.key), list_b.iter().map(&self.key))
    }
}

fn index_keys<K: Eq + Hash>(keys: impl Iterator<Item = K>, side: Side) -> Result<HashMap<K, usize>, MatchError> {
    let mut result = HashMap::new();
    for (index, key) in keys.enumerate() {
        match result.entry(key) {
            Entry::Occupied(_) => return Err(MatchError::DuplicateKey { side, index }),
            Entry::Vacant(entry) => {
                entry.insert(index);
            }
        }
    }
    Ok(result)
}

fn pair_equal_keys<K: Eq + Hash>(
    keys_a: impl Iterator<Item = K>,
    keys_b: impl Iterator<Item = K>,
) -> Result<Vec<Pairing>, MatchError> {
    let map_a = index_keys(keys_a, Side::A)?;
    let mut map_b = index_keys(keys_b, Side::B)?;

    let mut result = Vec::with_capacity(map_a.len() + map_b.len());
    for (key, a) in map_a {
        match map_b.remove(&key) {
            Some(b) => result.push(Pairing::Both(a, b)),
            None => result.push(Pairing::OnlyA(a)),
        }
    }
    result.extend(map_b.into_values().map(Pairing::OnlyB));
    result.sort_unstable();

    debug!(
        pairs = result.iter().filter(|pairing| pairing.is_paired()).count(),
        total = result.len(),
        "identity matching done"
    );
    Ok(result)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pairs_equal_names() {
        let a = ["Sheet1", "Summary", "Data"];
        let b = ["Data", "Sheet2", "Sheet1"];
        let actual = IdentityMatcher.match_lists(&a, &b).unwrap();
        assert_eq!(
            actual,
            vec![Pairing::Both(0, 2), Pairing::Both(2, 0), Pairing::OnlyA(1), Pairing::OnlyB(1)]
        );
    }

    #[test]
    fn duplicate_in_a() {
        let actual = IdentityMatcher.match_lists(&["A", "B", "B"], &["A"]);
        assert_eq!(actual, Err(MatchError::DuplicateKey { side: Side::A, index: 2 }));
    }

    #[test]
    fn duplicate_in_b() {
        let actual = IdentityMatcher.match_lists(&["A"], &["A", "B", "B"]);
        assert_eq!(actual, Err(MatchError::DuplicateKey { side: Side::B, index: 2 }));
    }

    #[test]
    fn same_list_with_duplicates_is_identity() {
        let list = ["A", "B", "B"];
        let actual = IdentityMatcher.match_lists(&list, &list).unwrap();
        assert_eq!(actual, vec![Pairing::Both(0, 0), Pairing::Both(1, 1), Pairing::Both(2, 2)]);
    }

    #[test]
    fn by_extracted_key() {
        let matcher = KeyedIdentityMatcher::new(|name: &&str| name.to_lowercase());
        let actual = matcher.match_lists(&["Alpha", "beta"], &["BETA", "gamma"]).unwrap();
        assert_eq!(actual, vec![Pairing::Both(1, 0), Pairing::OnlyA(0), Pairing::OnlyB(1)]);
    }

    #[test]
    fn duplicate_extracted_key() {
        let matcher = KeyedIdentityMatcher::new(|name: &&str| name.to_lowercase());
        let actual = matcher.match_lists(&["x"], &["Beta", "BETA"]);
        assert_eq!(actual, Err(MatchError::DuplicateKey { side: Side::B, index: 1 }));
    }
}
