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

use rand::{SeedableRng, rngs::StdRng};
use std::collections::HashSet;
use strata_model::{
    item::{Item, ItemId, Stratified},
    partition::{BucketMap, partition_stratified},
    plan::{PlanError, QuotaPlanBuilder, RequestSpec},
};
use strata_sample::allocator::{Allocator, AllocatorBuilder, allocate};
use test_log::test;

type Question = Item<u32, String>;

fn question_bank(twos: usize, threes: usize, fives: usize) -> Vec<Question> {
    let mut bank = Vec::new();
    let mut id = 0u64;
    for (marks, n) in [(2u32, twos), (3, threes), (5, fives)] {
        for _ in 0..n {
            bank.push(Item::new(ItemId::new(id), marks, format!("question {id}")));
            id += 1;
        }
    }
    bank
}

#[test]
fn shared_bucket_is_exhausted_by_earlier_request() {
    let buckets = partition_stratified(question_bank(12, 3, 0));
    let plan = QuotaPlanBuilder::new()
        .request(2, 10, "A")
        .request(2, 5, "B1")
        .request(3, 5, "B2")
        .request(5, 7, "C")
        .build()
        .unwrap();

    let outcome = AllocatorBuilder::new().build().allocate(&buckets, &plan);
    let report = &outcome.report;

    assert_eq!(report.delivered("A"), Some(10));
    assert_eq!(report.delivered("B1"), Some(2));
    assert_eq!(report.delivered("B2"), Some(3));
    assert_eq!(report.delivered("C"), Some(0));
    assert_eq!(report.pool_size(&2), Some(12));
    assert_eq!(report.pool_size(&3), Some(3));
    assert_eq!(report.pool_size(&5), Some(0));

    let mut seen = HashSet::new();
    for (_, items) in outcome.allocation.iter() {
        for q in items {
            assert!(seen.insert(q.id()), "{} allocated twice", q.id());
        }
    }
    assert_eq!(seen.len(), 15);

    // Payloads travel through untouched.
    for q in outcome.allocation.get("B2").unwrap() {
        assert_eq!(q.payload(), &format!("question {}", q.id().get()));
    }
}

#[test]
fn empty_pool_yields_empty_results_and_zero_pools() {
    let buckets: BucketMap<u32, Question> = partition_stratified(Vec::new());
    assert_eq!(buckets.num_buckets(), 0);

    let plan = QuotaPlanBuilder::new()
        .request(2, 10, "A")
        .request(3, 5, "B")
        .build()
        .unwrap();
    let outcome = allocate(&buckets, &plan, &mut StdRng::seed_from_u64(0));

    assert_eq!(outcome.allocation.num_drawn(), 0);
    assert!(outcome.report.lines().iter().all(|l| l.delivered() == 0));
    assert!(outcome.report.pools().iter().all(|(_, n)| *n == 0));
    assert_eq!(outcome.report.pools().len(), 2);
}

#[test]
fn negative_count_fails_before_drawing() {
    let buckets = partition_stratified(question_bank(4, 0, 0));
    let mut allocator = Allocator::new(StdRng::seed_from_u64(1));

    let result = allocator.allocate_requests(
        &buckets,
        vec![RequestSpec::new(2, 2, "A"), RequestSpec::new(2, -1, "B")],
    );
    assert!(matches!(result, Err(PlanError::NegativeCount { .. })));
}

#[test]
fn duplicate_labels_fail() {
    let buckets = partition_stratified(question_bank(4, 4, 0));
    let mut allocator = AllocatorBuilder::new().seed(3).build();

    let result = allocator.allocate_requests(
        &buckets,
        vec![RequestSpec::new(2, 1, "X"), RequestSpec::new(3, 1, "X")],
    );
    assert!(matches!(result, Err(PlanError::DuplicateLabel { .. })));
}

#[test]
fn full_bucket_draw_varies_order_but_not_membership() {
    let buckets = partition_stratified(question_bank(10, 0, 0));
    let plan = QuotaPlanBuilder::new().request(2, 10, "A").build().unwrap();

    let mut orderings = HashSet::new();
    for _ in 0..8 {
        let outcome = AllocatorBuilder::new().build().allocate(&buckets, &plan);
        let order: Vec<u64> = outcome
            .allocation
            .get("A")
            .unwrap()
            .iter()
            .map(|q| q.id().get())
            .collect();

        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..10).collect::<Vec<u64>>());
        orderings.insert(order);
    }

    assert!(orderings.len() > 1, "eight OS-seeded runs produced one ordering");
}

#[test]
fn report_is_printable() {
    let buckets = partition_stratified(question_bank(3, 0, 0));
    let plan = QuotaPlanBuilder::new().request(2, 5, "short").build().unwrap();
    let outcome = AllocatorBuilder::new().seed(5).build().allocate(&buckets, &plan);

    let text = outcome.report.to_string();
    assert!(text.contains("short"));
    assert!(outcome.report.ensure_fulfilled().is_err());
}
