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

//! Pool items and the stratification contract.
//!
//! The sampling crates only ever look at two properties of an item: an
//! identifier that is unique within the pool, and the category key it is
//! bucketed under. Everything else travels along untouched. Callers with their
//! own record types implement `Stratified` directly; `Item<K, P>` covers the
//! common case of wrapping an arbitrary payload.

use std::hash::Hash;

/// An item that can be bucketed by category and tracked by identifier.
pub trait Stratified {
    /// Identifier unique within one pool.
    type Id: Eq + Hash + Clone;
    /// Category the item is bucketed under.
    type Key: Eq + Hash + Clone;

    /// Returns the identifier of this item.
    fn id(&self) -> Self::Id;

    /// Returns the category key of this item.
    fn key(&self) -> Self::Key;
}

impl<T> Stratified for &T
where
    T: Stratified + ?Sized,
{
    type Id = T::Id;
    type Key = T::Key;

    #[inline]
    fn id(&self) -> Self::Id {
        (**self).id()
    }

    #[inline]
    fn key(&self) -> Self::Key {
        (**self).key()
    }
}

/// Identifier of an `Item`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(u64);

impl ItemId {
    /// Creates a new `ItemId`.
    #[inline(always)]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[inline(always)]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// A pool item: identifier, category key and an opaque payload.
///
/// # Examples
///
/// ```rust
/// use strata_model::item::{Item, ItemId, Stratified};
///
/// let q = Item::new(ItemId::new(7), 3u32, "Define a monoid.");
/// assert_eq!(q.id(), ItemId::new(7));
/// assert_eq!(q.key(), 3);
/// assert_eq!(*q.payload(), "Define a monoid.");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<K, P = ()> {
    id: ItemId,
    key: K,
    payload: P,
}

impl<K, P> Item<K, P> {
    /// Creates a new `Item`.
    #[inline]
    pub fn new(id: ItemId, key: K, payload: P) -> Self {
        Self { id, key, payload }
    }

    /// Returns a reference to the category key.
    #[inline]
    pub fn key_ref(&self) -> &K {
        &self.key
    }

    /// Returns a reference to the payload.
    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consumes the item, returning its payload.
    #[inline]
    pub fn into_payload(self) -> P {
        self.payload
    }
}

impl<K> Item<K, ()> {
    /// Creates an item without payload.
    #[inline]
    pub fn bare(id: ItemId, key: K) -> Self {
        Self::new(id, key, ())
    }
}

impl<K, P> Stratified for Item<K, P>
where
    K: Eq + Hash + Clone,
{
    type Id = ItemId;
    type Key = K;

    #[inline]
    fn id(&self) -> ItemId {
        self.id
    }

    #[inline]
    fn key(&self) -> K {
        self.key.clone()
    }
}
