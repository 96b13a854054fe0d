// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Partitioning a flat item pool into per-category buckets.
//!
//! `partition` walks the input once and appends every item to the bucket of
//! its key, so each item lands in exactly one bucket and no item is lost or
//! duplicated. Within a bucket the source order is kept, although nothing
//! downstream relies on it.
//!
//! Lookups for keys that never occurred return an empty slice. The map only
//! stores keys it has seen (or that were registered through `with_keys`),
//! which means an empty pool yields an empty map, and every key still reads as
//! an empty bucket.

use crate::item::Stratified;
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Returned by `BucketMap::ensure_non_empty` when the item source yielded nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("the item source yielded no items")]
pub struct EmptyInputError;

/// Items grouped by category key.
#[derive(Debug, Clone)]
pub struct BucketMap<K, T> {
    buckets: FxHashMap<K, Vec<T>>,
    num_items: usize,
}

impl<K, T> Default for BucketMap<K, T> {
    fn default() -> Self {
        Self {
            buckets: FxHashMap::default(),
            num_items: 0,
        }
    }
}

impl<K, T> BucketMap<K, T>
where
    K: Eq + Hash,
{
    /// Creates an empty `BucketMap`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `BucketMap` with an empty bucket registered for every key in `keys`.
    pub fn with_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let buckets = keys.into_iter().map(|k| (k, Vec::new())).collect();
        Self {
            buckets,
            num_items: 0,
        }
    }

    /// Appends `item` to the bucket of `key`.
    #[inline]
    pub fn insert(&mut self, key: K, item: T) {
        self.buckets.entry(key).or_default().push(item);
        self.num_items += 1;
    }

    /// Returns the items of the bucket `key`, or an empty slice if there is none.
    #[inline]
    pub fn bucket(&self, key: &K) -> &[T] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the number of items in the bucket `key`.
    #[inline]
    pub fn pool_size(&self, key: &K) -> usize {
        self.bucket(key).len()
    }

    /// Returns `true` if an entry exists for `key`, even an empty one.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.buckets.contains_key(key)
    }

    /// Returns the number of bucket entries.
    #[inline]
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the total number of items across all buckets.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// Returns `true` if no bucket holds any item.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_items == 0
    }

    /// Iterates over the keys with an entry, in arbitrary order.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.buckets.keys()
    }

    /// Iterates over `(key, bucket)` pairs, in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[T])> {
        self.buckets.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Fails with `EmptyInputError` if the map holds no items.
    ///
    /// Partitioning an empty pool is not an error in itself. Callers that
    /// treat an empty item source as fatal can opt in here.
    #[inline]
    pub fn ensure_non_empty(self) -> Result<Self, EmptyInputError> {
        if self.is_empty() {
            Err(EmptyInputError)
        } else {
            Ok(self)
        }
    }

    /// Consumes the map, returning the raw buckets.
    #[inline]
    pub fn into_inner(self) -> FxHashMap<K, Vec<T>> {
        self.buckets
    }
}

impl<K, T> Extend<(K, T)> for BucketMap<K, T>
where
    K: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (key, item) in iter {
            self.insert(key, item);
        }
    }
}

impl<K, T> FromIterator<(K, T)> for BucketMap<K, T>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Groups `items` into buckets keyed by `key_of`.
///
/// # Examples
///
/// ```rust
/// use strata_model::partition::partition;
///
/// let marks = vec![2, 3, 2, 5, 2];
/// let buckets = partition(marks, |m| *m);
///
/// assert_eq!(buckets.pool_size(&2), 3);
/// assert_eq!(buckets.pool_size(&5), 1);
/// assert_eq!(buckets.pool_size(&7), 0);
/// ```
pub fn partition<K, T, I, F>(items: I, mut key_of: F) -> BucketMap<K, T>
where
    K: Eq + Hash,
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> K,
{
    let map: BucketMap<K, T> = items
        .into_iter()
        .map(|item| (key_of(&item), item))
        .collect();

    tracing::trace!(
        items = map.num_items(),
        buckets = map.num_buckets(),
        "partitioned item pool"
    );
    map
}

/// Groups `items` into buckets keyed by their own category.
#[inline]
pub fn partition_stratified<T, I>(items: I) -> BucketMap<T::Key, T>
where
    T: Stratified,
    I: IntoIterator<Item = T>,
{
    partition(items, |item: &T| item.key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Item, ItemId};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn items(keys: &[u8]) -> Vec<Item<u8>> {
        keys.iter()
            .enumerate()
            .map(|(i, &k)| Item::bare(ItemId::new(i as u64), k))
            .collect()
    }

    #[test]
    fn test_partition_groups_by_key() {
        let pool = items(&[2, 3, 2, 5, 2, 3]);
        let buckets = partition_stratified(pool);

        assert_eq!(buckets.num_buckets(), 3);
        assert_eq!(buckets.num_items(), 6);
        assert_eq!(buckets.pool_size(&2), 3);
        assert_eq!(buckets.pool_size(&3), 2);
        assert_eq!(buckets.pool_size(&5), 1);

        let twos: Vec<u64> = buckets.bucket(&2).iter().map(|i| i.id().get()).collect();
        assert_eq!(twos, vec![0, 2, 4]);
    }

    #[test]
    fn test_absent_key_reads_as_empty_bucket() {
        let buckets = partition_stratified(items(&[2, 2]));
        assert!(buckets.bucket(&9).is_empty());
        assert_eq!(buckets.pool_size(&9), 0);
        assert!(!buckets.contains_key(&9));
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        let buckets: BucketMap<u8, Item<u8>> = partition_stratified(Vec::new());
        assert_eq!(buckets.num_buckets(), 0);
        assert!(buckets.is_empty());
        assert_eq!(buckets.ensure_non_empty().unwrap_err(), EmptyInputError);
    }

    #[test]
    fn test_ensure_non_empty_passes_populated_map() {
        let buckets = partition_stratified(items(&[1]));
        assert_eq!(buckets.ensure_non_empty().map(|b| b.num_items()), Ok(1));
    }

    #[test]
    fn test_with_keys_registers_empty_entries() {
        let mut buckets: BucketMap<u8, Item<u8>> = BucketMap::with_keys([2, 3, 5]);
        assert_eq!(buckets.num_buckets(), 3);
        assert!(buckets.contains_key(&5));
        assert!(buckets.is_empty());

        buckets.insert(5, Item::bare(ItemId::new(0), 5));
        assert_eq!(buckets.pool_size(&5), 1);
        assert_eq!(buckets.num_buckets(), 3);
    }

    #[test]
    fn test_partition_with_closure_over_references() {
        let words = ["apple", "avocado", "banana", "blueberry", "cherry"];
        let buckets = partition(words.iter(), |w| w.as_bytes()[0]);
        assert_eq!(buckets.pool_size(&b'a'), 2);
        assert_eq!(buckets.pool_size(&b'b'), 2);
        assert_eq!(buckets.pool_size(&b'c'), 1);
    }

    proptest! {
        #[test]
        fn every_item_lands_in_exactly_one_bucket(keys in prop::collection::vec(0u8..8, 0..200)) {
            let pool = items(&keys);
            let buckets = partition_stratified(pool.clone());

            prop_assert_eq!(buckets.num_items(), pool.len());

            let mut seen: HashMap<ItemId, u8> = HashMap::new();
            for (key, bucket) in buckets.iter() {
                for item in bucket {
                    prop_assert_eq!(item.key(), *key);
                    prop_assert!(seen.insert(item.id(), *key).is_none());
                }
            }
            prop_assert_eq!(seen.len(), pool.len());
            for item in &pool {
                prop_assert_eq!(seen.get(&item.id()), Some(&item.key()));
            }
        }
    }
}
