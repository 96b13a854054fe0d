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

use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Identifiers already allocated during the current run.
///
/// A `UsedSet` lives exactly as long as one allocation run. It is created
/// empty when the run starts and dropped when the run returns.
#[derive(Debug, Clone)]
pub struct UsedSet<Id> {
    ids: FxHashSet<Id>,
}

impl<Id> Default for UsedSet<Id> {
    fn default() -> Self {
        Self {
            ids: FxHashSet::default(),
        }
    }
}

impl<Id> UsedSet<Id>
where
    Id: Eq + Hash,
{
    /// Creates an empty `UsedSet` with room for `capacity` identifiers.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns `true` if `id` has already been allocated.
    #[inline]
    pub fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    /// Marks every identifier in `ids` as allocated.
    #[inline]
    pub fn insert_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = Id>,
    {
        self.ids.extend(ids);
    }
}
