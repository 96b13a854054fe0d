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

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::StdRng};
use std::hint::black_box;
use strata_model::{
    item::{Item, ItemId},
    partition::{BucketMap, partition_stratified},
    plan::{QuotaPlan, QuotaPlanBuilder},
};
use strata_sample::allocator::allocate;

fn make_pool(size: usize, categories: u32) -> BucketMap<u32, Item<u32>> {
    partition_stratified(
        (0..size as u64).map(|i| Item::bare(ItemId::new(i), (i % categories as u64) as u32)),
    )
}

/// Every category is requested twice, each time for a third of its bucket.
fn make_plan(size: usize, categories: u32) -> QuotaPlan<u32> {
    let per_request = (size / categories as usize / 3) as i64;
    let mut builder = QuotaPlanBuilder::new();
    for key in 0..categories {
        builder = builder
            .request(key, per_request, format!("{key}-first"))
            .request(key, per_request, format!("{key}-second"));
    }
    builder.build().expect("benchmark plan is valid")
}

fn bench_allocate(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate");

    for &size in &[100usize, 1_000, 10_000, 100_000] {
        let buckets = make_pool(size, 3);
        let plan = make_plan(size, 3);
        let mut rng = StdRng::seed_from_u64(42);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let outcome = allocate(black_box(&buckets), black_box(&plan), &mut rng);
                black_box(outcome.statistics.items_drawn)
            })
        });
    }

    group.finish();
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");

    for &size in &[1_000usize, 100_000] {
        let items: Vec<Item<u32>> = (0..size as u64)
            .map(|i| Item::bare(ItemId::new(i), (i % 7) as u32))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| black_box(partition_stratified(items.iter()).num_items()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_allocate, bench_partition);
criterion_main!(benches);
