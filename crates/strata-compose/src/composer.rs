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

//! End-to-end composition: layout in, document and report out.

use crate::{document::Document, layout::Layout};
use rand::Rng;
use strata_model::{
    item::Stratified,
    partition::{EmptyInputError, partition_stratified},
    plan::PlanError,
};
use strata_sample::{
    allocator::Allocator,
    report::{ShortageReport, ShortfallError},
    stats::AllocationStatistics,
};

/// The error type for composing a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    /// The layout does not describe a valid quota plan.
    #[error("invalid layout: {0}")]
    Plan(#[from] PlanError),
    /// The item source was empty and the composer requires items.
    #[error(transparent)]
    EmptyInput(#[from] EmptyInputError),
    /// Some part was not fully served and the composer is strict.
    #[error("document incomplete: {0}")]
    Shortfall(#[from] ShortfallError),
}

/// A composed document together with the allocation diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition<T, K> {
    pub document: Document<T>,
    pub report: ShortageReport<K>,
    pub statistics: AllocationStatistics,
}

/// Composes documents from an item pool.
///
/// # Configuration
/// * `require_items`: Fail with `ComposeError::EmptyInput` when the item source is empty.
/// * `strict`: Fail with `ComposeError::Shortfall` when any part is not fully served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Composer {
    require_items: bool,
    strict: bool,
}

impl Composer {
    /// Creates a lenient composer: empty pools and shortfalls are reported, not raised.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn require_items(mut self, require_items: bool) -> Self {
        self.require_items = require_items;
        self
    }

    #[inline]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Partitions `items`, serves `layout` with `allocator` and assembles the document.
    ///
    /// The layout is validated before the items are read, so a malformed
    /// layout never consumes randomness.
    pub fn compose<T, I, R>(
        &self,
        items: I,
        layout: &Layout<T::Key>,
        allocator: &mut Allocator<R>,
    ) -> Result<Composition<T, T::Key>, ComposeError>
    where
        T: Stratified + Clone,
        I: IntoIterator<Item = T>,
        R: Rng,
    {
        let plan = layout.plan()?;

        let buckets = partition_stratified(items);
        let buckets = if self.require_items {
            buckets.ensure_non_empty()?
        } else {
            buckets
        };

        let outcome = allocator.allocate(&buckets, &plan);
        if self.strict {
            outcome.report.ensure_fulfilled()?;
        }

        let document = Document::assemble(layout, outcome.allocation);
        tracing::debug!(
            sections = document.sections().len(),
            items = document.num_items(),
            fulfilled = outcome.report.is_fulfilled(),
            "composed document"
        );

        Ok(Composition {
            document,
            report: outcome.report,
            statistics: outcome.statistics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SectionSpec;
    use rand::{SeedableRng, rngs::StdRng};
    use strata_model::item::{Item, ItemId};
    use strata_sample::allocator::AllocatorBuilder;
    use test_log::test;

    fn items(n: u64, key: u32) -> Vec<Item<u32>> {
        (0..n).map(|i| Item::bare(ItemId::new(i), key)).collect()
    }

    fn layout() -> Layout<u32> {
        Layout::new().section(SectionSpec::new("Only").part("p", 2, 3))
    }

    #[test]
    fn test_lenient_composer_reports_shortfall() {
        let mut allocator = Allocator::new(StdRng::seed_from_u64(1));
        let composition = Composer::new()
            .compose(items(2, 2), &layout(), &mut allocator)
            .unwrap();

        assert_eq!(composition.document.num_items(), 2);
        assert_eq!(composition.report.shortfall("p"), Some(1));
    }

    #[test]
    fn test_strict_composer_fails_on_shortfall() {
        let mut allocator = Allocator::new(StdRng::seed_from_u64(1));
        let err = Composer::new()
            .strict(true)
            .compose(items(2, 2), &layout(), &mut allocator)
            .unwrap_err();

        assert!(matches!(err, ComposeError::Shortfall(ShortfallError { delivered: 2, .. })));
    }

    #[test]
    fn test_require_items_rejects_empty_pool() {
        let mut allocator = Allocator::new(StdRng::seed_from_u64(1));
        let err = Composer::new()
            .require_items(true)
            .compose(Vec::<Item<u32>>::new(), &layout(), &mut allocator)
            .unwrap_err();
        assert_eq!(err, ComposeError::EmptyInput(EmptyInputError));

        let lenient = Composer::new()
            .compose(Vec::<Item<u32>>::new(), &layout(), &mut allocator)
            .unwrap();
        assert_eq!(lenient.document.num_items(), 0);
        assert_eq!(lenient.report.pool_size(&2), Some(0));
    }

    #[test]
    fn test_invalid_layout_is_rejected() {
        let bad = Layout::new().section(SectionSpec::new("Bad").part("p", 2u32, -2));
        let mut allocator = Allocator::new(StdRng::seed_from_u64(1));
        let err = Composer::new()
            .compose(items(5, 2), &bad, &mut allocator)
            .unwrap_err();

        assert!(matches!(err, ComposeError::Plan(PlanError::NegativeCount { .. })));
        assert!(err.to_string().starts_with("invalid layout: "));
    }

    #[test]
    fn test_keys_need_no_debug_output() {
        #[derive(Clone, PartialEq, Eq, Hash)]
        struct Topic(&'static str);

        let pool = (0..4).map(|i| Item::bare(ItemId::new(i), Topic("algebra")));
        let layout =
            Layout::new().section(SectionSpec::new("Only").part("p", Topic("algebra"), 3));
        let mut allocator = AllocatorBuilder::new().seed(2).log_requests(true).build();

        let composition = Composer::new()
            .strict(true)
            .compose(pool, &layout, &mut allocator)
            .unwrap();
        assert_eq!(composition.document.num_items(), 3);
        assert_eq!(composition.report.pool_size(&Topic("algebra")), Some(4));
    }
}
