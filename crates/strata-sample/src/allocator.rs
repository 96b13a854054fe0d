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

//! # Quota Allocator
//!
//! Serves the requests of a `QuotaPlan` from a partitioned pool.
//!
//! ## Algorithm
//!
//! Requests are processed strictly in plan order. For each request the
//! allocator:
//!
//! 1. takes the bucket of the request's key (an absent key is an empty bucket),
//! 2. drops every item whose identifier is already in the run's used-set,
//! 3. draws `min(count, remaining)` items uniformly without replacement,
//! 4. adds the drawn identifiers to the used-set and records the items under
//!    the request's label.
//!
//! Requests that share a key therefore compete for the same bucket and the
//! earlier request wins when there are not enough items for both. Randomness
//! only decides *which* items a request receives, never *how many*.
//!
//! After the last request, a `ShortageReport` is built from the wanted and
//! delivered counts and the pre-allocation bucket sizes of every referenced key.
//!
//! ## Failure Semantics
//!
//! Running out of items is reported, not raised. The only error is a malformed
//! plan, and plans are validated before the first draw: `allocate` takes an
//! already validated `QuotaPlan` and cannot fail, while `allocate_requests`
//! validates raw `RequestSpec`s and returns `PlanError` without drawing
//! anything when they are invalid.
//!
//! ## Usage
//!
//! ```rust
//! use strata_model::{item::{Item, ItemId}, partition::partition_stratified, plan::QuotaPlanBuilder};
//! use strata_sample::allocator::AllocatorBuilder;
//!
//! let pool: Vec<Item<u32>> = (0..15)
//!     .map(|i| Item::bare(ItemId::new(i), if i < 12 { 2 } else { 3 }))
//!     .collect();
//! let buckets = partition_stratified(pool);
//!
//! let plan = QuotaPlanBuilder::new()
//!     .request(2, 10, "A")
//!     .request(2, 5, "B1")
//!     .request(3, 5, "B2")
//!     .request(5, 7, "C")
//!     .build()
//!     .unwrap();
//!
//! let mut allocator = AllocatorBuilder::new().seed(42).build();
//! let outcome = allocator.allocate(&buckets, &plan);
//!
//! assert_eq!(outcome.report.delivered("A"), Some(10));
//! assert_eq!(outcome.report.delivered("B1"), Some(2));
//! assert_eq!(outcome.report.delivered("B2"), Some(3));
//! assert_eq!(outcome.report.delivered("C"), Some(0));
//! assert_eq!(outcome.report.pool_size(&2), Some(12));
//! ```

use crate::{
    allocation::Allocation,
    config::AllocatorConfig,
    draw::draw_without_replacement,
    monitor::{allocation_monitor::AllocationMonitor, log::LogMonitor, no_op::NoOpMonitor},
    report::{RequestLine, ShortageReport},
    stats::{AllocationStatistics, AllocationStatisticsBuilder},
    used::UsedSet,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;
use strata_model::{
    item::Stratified,
    partition::BucketMap,
    plan::{PlanError, QuotaPlan, RequestSpec},
};

/// Everything an allocation run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome<T, K> {
    /// The items drawn per request label.
    pub allocation: Allocation<T>,
    /// Wanted, delivered and pool-size figures.
    pub report: ShortageReport<K>,
    /// Counters and timing of the run.
    pub statistics: AllocationStatistics,
}

impl<T, K> AllocationOutcome<T, K> {
    /// Returns `true` if every request was fully served.
    #[inline]
    pub fn is_fulfilled(&self) -> bool {
        self.report.is_fulfilled()
    }

    /// Splits the outcome into allocation and report.
    #[inline]
    pub fn into_parts(self) -> (Allocation<T>, ShortageReport<K>) {
        (self.allocation, self.report)
    }
}

/// Serves `plan` from `buckets` using `rng`.
///
/// This is the allocation core for callers that manage their own random
/// source. The used-set is local to the call, so concurrent calls with
/// separate generators are fully independent.
#[inline]
pub fn allocate<T, R>(
    buckets: &BucketMap<T::Key, T>,
    plan: &QuotaPlan<T::Key>,
    rng: &mut R,
) -> AllocationOutcome<T, T::Key>
where
    T: Stratified + Clone,
    R: Rng + ?Sized,
{
    allocate_with_monitor(buckets, plan, rng, &mut NoOpMonitor)
}

/// Like `allocate`, reporting progress to `monitor`.
pub fn allocate_with_monitor<T, R, M>(
    buckets: &BucketMap<T::Key, T>,
    plan: &QuotaPlan<T::Key>,
    rng: &mut R,
    monitor: &mut M,
) -> AllocationOutcome<T, T::Key>
where
    T: Stratified + Clone,
    R: Rng + ?Sized,
    M: AllocationMonitor<T::Key> + ?Sized,
{
    let start = std::time::Instant::now();
    let _span = tracing::debug_span!(
        "allocate",
        requests = plan.len(),
        pool_items = buckets.num_items()
    )
    .entered();

    monitor.on_enter_run(plan, buckets.num_items());

    let mut used: UsedSet<T::Id> =
        UsedSet::with_capacity(plan.total_wanted().min(buckets.num_items()));
    let mut entries = Vec::with_capacity(plan.len());
    let mut lines = Vec::with_capacity(plan.len());

    for (index, request) in plan.iter() {
        let candidates = eligible_candidates(buckets.bucket(request.key()), &used);
        let available = candidates.len();

        let drawn: Vec<T> = draw_without_replacement(candidates, request.count(), rng)
            .into_iter()
            .cloned()
            .collect();
        used.insert_all(drawn.iter().map(|item| item.id()));

        tracing::trace!(
            label = request.label(),
            wanted = request.count(),
            available,
            delivered = drawn.len(),
            "served request"
        );

        let line = RequestLine::new(
            index,
            request.label(),
            request.key().clone(),
            request.count(),
            drawn.len(),
        );
        monitor.on_request(&line);
        lines.push(line);
        entries.push((request.label().to_owned(), drawn));
    }

    let pools = plan
        .keys()
        .map(|key| (key.clone(), buckets.pool_size(key)))
        .collect();
    let report = ShortageReport::new(lines, pools);

    let statistics = AllocationStatisticsBuilder::new()
        .requests(plan.len())
        .pool_items(buckets.num_items())
        .items_drawn(report.total_delivered())
        .short_requests(report.shortfalls().count())
        .duration(start.elapsed())
        .build();

    tracing::debug!(
        wanted = report.total_wanted(),
        delivered = statistics.items_drawn,
        short_requests = statistics.short_requests,
        "allocation complete"
    );

    monitor.on_exit_run(&report, &statistics);

    AllocationOutcome {
        allocation: Allocation::from_entries(entries),
        report,
        statistics,
    }
}

/// Items of `bucket` not yet allocated in this run.
///
/// Repeated identifiers inside one bucket collapse to their first occurrence,
/// so a request can never receive the same identifier twice.
fn eligible_candidates<'b, T>(bucket: &'b [T], used: &UsedSet<T::Id>) -> Vec<&'b T>
where
    T: Stratified,
{
    let mut seen: FxHashSet<T::Id> = FxHashSet::default();
    bucket
        .iter()
        .filter(|item| {
            let id = item.id();
            !used.contains(&id) && seen.insert(id)
        })
        .collect()
}

/// A quota allocator owning its random source.
#[derive(Debug, Clone)]
pub struct Allocator<R = ChaCha8Rng> {
    rng: R,
    config: AllocatorConfig,
}

impl<R> Allocator<R>
where
    R: Rng,
{
    /// Creates an allocator with the default configuration around `rng`.
    #[inline]
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, AllocatorConfig::default())
    }

    /// Creates an allocator with `config` around `rng`.
    ///
    /// The seed in `config` is ignored since `rng` is already constructed.
    #[inline]
    pub fn with_config(rng: R, config: AllocatorConfig) -> Self {
        Self { rng, config }
    }

    #[inline]
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Returns the random source.
    #[inline]
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Serves `plan` from `buckets`.
    ///
    /// With `log_requests` enabled, every request is reported through a `LogMonitor`.
    pub fn allocate<T>(
        &mut self,
        buckets: &BucketMap<T::Key, T>,
        plan: &QuotaPlan<T::Key>,
    ) -> AllocationOutcome<T, T::Key>
    where
        T: Stratified + Clone,
    {
        if self.config.log_requests {
            allocate_with_monitor(buckets, plan, &mut self.rng, &mut LogMonitor::new())
        } else {
            allocate_with_monitor(buckets, plan, &mut self.rng, &mut NoOpMonitor)
        }
    }

    /// Serves `plan` from `buckets`, reporting progress to `monitor`.
    #[inline]
    pub fn allocate_with_monitor<T, M>(
        &mut self,
        buckets: &BucketMap<T::Key, T>,
        plan: &QuotaPlan<T::Key>,
        monitor: &mut M,
    ) -> AllocationOutcome<T, T::Key>
    where
        T: Stratified + Clone,
        M: AllocationMonitor<T::Key> + ?Sized,
    {
        allocate_with_monitor(buckets, plan, &mut self.rng, monitor)
    }

    /// Validates `specs` and serves them from `buckets`.
    ///
    /// An invalid plan is rejected before any item is drawn and leaves the
    /// random source untouched.
    pub fn allocate_requests<T, I>(
        &mut self,
        buckets: &BucketMap<T::Key, T>,
        specs: I,
    ) -> Result<AllocationOutcome<T, T::Key>, PlanError>
    where
        T: Stratified + Clone,
        I: IntoIterator<Item = RequestSpec<T::Key>>,
    {
        let plan = QuotaPlan::try_from_requests(specs).inspect_err(|e| {
            tracing::debug!(error = %e, "rejected quota plan");
        })?;
        Ok(self.allocate(buckets, &plan))
    }
}

/// Builder for `Allocator`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocatorBuilder {
    config: AllocatorConfig,
}

impl AllocatorBuilder {
    /// Creates a builder with the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    #[inline]
    pub fn config(mut self, config: AllocatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Seeds the generator for reproducible runs.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Enables or disables per-request logging.
    #[inline]
    pub fn log_requests(mut self, log_requests: bool) -> Self {
        self.config.log_requests = log_requests;
        self
    }

    /// Builds an allocator backed by a ChaCha8 generator, seeded from the
    /// configuration or else from the thread-local generator.
    pub fn build(self) -> Allocator<ChaCha8Rng> {
        let rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        tracing::trace!(config = %self.config, "built allocator");
        Allocator::with_config(rng, self.config)
    }

    /// Builds an allocator around a caller-supplied generator. The configured
    /// seed is ignored.
    #[inline]
    pub fn build_with_rng<R>(self, rng: R) -> Allocator<R>
    where
        R: Rng,
    {
        Allocator::with_config(rng, self.config)
    }
}
