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

//! Quota plans.
//!
//! A plan is an ordered list of requests, each asking for `count` items of the
//! category `key` under a unique `label`. Plan order is significant: requests
//! that share a key compete for the same bucket and earlier requests draw first.
//!
//! Plans are validated when they are built. Counts arrive as signed integers
//! because callers frequently source them from untyped configuration, and a
//! negative count there is a programming error that must surface before any
//! sampling happens rather than being clamped to zero.

use crate::index::RequestIndex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

/// The error type for quota plan validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// A request asks for a negative number of items.
    #[error("request '{label}' at {index} asks for a negative number of items ({count})")]
    NegativeCount {
        index: RequestIndex,
        label: String,
        count: i64,
    },
    /// A request count does not fit into `usize` on this platform.
    #[error("request '{label}' at {index} asks for {count} items, which is not addressable")]
    CountOverflow {
        index: RequestIndex,
        label: String,
        count: i64,
    },
    /// Two requests share a label, making the results ambiguous.
    #[error("label '{label}' is used by both {first} and {second}")]
    DuplicateLabel {
        label: String,
        first: RequestIndex,
        second: RequestIndex,
    },
    /// A request has an empty label.
    #[error("request at {index} has an empty label")]
    EmptyLabel { index: RequestIndex },
}

/// An unvalidated request as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestSpec<K> {
    pub key: K,
    pub count: i64,
    pub label: String,
}

impl<K> RequestSpec<K> {
    /// Creates a new `RequestSpec`.
    #[inline]
    pub fn new(key: K, count: i64, label: impl Into<String>) -> Self {
        Self {
            key,
            count,
            label: label.into(),
        }
    }
}

/// A validated request for `count` unique items from the bucket `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaRequest<K> {
    key: K,
    count: usize,
    label: String,
}

impl<K> QuotaRequest<K> {
    /// Returns the category key this request draws from.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the number of items wanted.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the label results are attributed to.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<K> std::fmt::Display for QuotaRequest<K>
where
    K: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} x {:?}", self.label, self.count, self.key)
    }
}

/// An ordered, validated sequence of quota requests.
///
/// Every `QuotaPlan` has unique, non-empty labels and non-negative counts.
///
/// # Examples
///
/// ```rust
/// use strata_model::plan::QuotaPlanBuilder;
///
/// let plan = QuotaPlanBuilder::new()
///     .request(2u32, 10, "A")
///     .request(2u32, 5, "B1")
///     .request(3u32, 5, "B2")
///     .build()
///     .unwrap();
///
/// assert_eq!(plan.len(), 3);
/// assert_eq!(plan.total_wanted(), 20);
/// assert_eq!(plan.keys().collect::<Vec<_>>(), vec![&2, &3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaPlan<K> {
    requests: Vec<QuotaRequest<K>>,
}

impl<K> Default for QuotaPlan<K> {
    fn default() -> Self {
        Self {
            requests: Vec::new(),
        }
    }
}

impl<K> QuotaPlan<K> {
    /// Validates `specs` in order and builds a plan from them.
    ///
    /// The first violation in plan order is reported. For each request the
    /// label is checked before the count, and the count before uniqueness.
    pub fn try_from_requests<I>(specs: I) -> Result<Self, PlanError>
    where
        I: IntoIterator<Item = RequestSpec<K>>,
    {
        let specs = specs.into_iter();
        let mut requests = Vec::with_capacity(specs.size_hint().0);
        let mut seen: FxHashMap<String, RequestIndex> = FxHashMap::default();

        for (position, spec) in specs.enumerate() {
            let index = RequestIndex::new(position);
            let RequestSpec { key, count, label } = spec;

            if label.is_empty() {
                return Err(PlanError::EmptyLabel { index });
            }
            if count < 0 {
                return Err(PlanError::NegativeCount {
                    index,
                    label,
                    count,
                });
            }
            let Ok(count_usize) = usize::try_from(count) else {
                return Err(PlanError::CountOverflow {
                    index,
                    label,
                    count,
                });
            };
            if let Some(&first) = seen.get(&label) {
                return Err(PlanError::DuplicateLabel {
                    label,
                    first,
                    second: index,
                });
            }

            seen.insert(label.clone(), index);
            requests.push(QuotaRequest {
                key,
                count: count_usize,
                label,
            });
        }

        tracing::trace!(requests = requests.len(), "validated quota plan");
        Ok(Self { requests })
    }

    /// Returns the number of requests.
    #[inline]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns `true` if the plan has no requests.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Returns the request at `index`, if any.
    #[inline]
    pub fn get(&self, index: RequestIndex) -> Option<&QuotaRequest<K>> {
        self.requests.get(index.get())
    }

    /// Returns all requests in plan order.
    #[inline]
    pub fn requests(&self) -> &[QuotaRequest<K>] {
        &self.requests
    }

    /// Iterates over the requests in plan order together with their indices.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (RequestIndex, &QuotaRequest<K>)> {
        self.requests
            .iter()
            .enumerate()
            .map(|(i, r)| (RequestIndex::new(i), r))
    }

    /// Returns the index of the request labeled `label`.
    pub fn index_of(&self, label: &str) -> Option<RequestIndex> {
        self.requests
            .iter()
            .position(|r| r.label == label)
            .map(RequestIndex::new)
    }

    /// Sum of all requested counts, saturating at `usize::MAX`.
    #[inline]
    pub fn total_wanted(&self) -> usize {
        self.requests
            .iter()
            .map(|r| r.count)
            .fold(0, usize::saturating_add)
    }
}

impl<K> QuotaPlan<K>
where
    K: Eq + Hash,
{
    /// Iterates over the distinct keys in order of first reference.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        let mut seen: FxHashSet<&K> = FxHashSet::default();
        self.requests
            .iter()
            .map(|r| &r.key)
            .filter(move |k| seen.insert(*k))
    }
}

impl<'a, K> IntoIterator for &'a QuotaPlan<K> {
    type Item = &'a QuotaRequest<K>;
    type IntoIter = std::slice::Iter<'a, QuotaRequest<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.iter()
    }
}

/// Builder for `QuotaPlan`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaPlanBuilder<K> {
    specs: Vec<RequestSpec<K>>,
}

impl<K> Default for QuotaPlanBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> QuotaPlanBuilder<K> {
    /// Creates an empty `QuotaPlanBuilder`.
    #[inline]
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// Appends a request for `count` items of `key` under `label`.
    #[inline]
    pub fn request(mut self, key: K, count: i64, label: impl Into<String>) -> Self {
        self.specs.push(RequestSpec::new(key, count, label));
        self
    }

    /// Appends an already assembled request.
    #[inline]
    pub fn push(&mut self, spec: RequestSpec<K>) -> &mut Self {
        self.specs.push(spec);
        self
    }

    /// Validates the collected requests and builds the plan.
    #[inline]
    pub fn build(self) -> Result<QuotaPlan<K>, PlanError> {
        QuotaPlan::try_from_requests(self.specs)
    }
}
