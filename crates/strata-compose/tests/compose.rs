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

use std::collections::HashSet;
use strata_compose::{
    composer::{ComposeError, Composer},
    layout::{Layout, SectionSpec},
};
use strata_model::item::{Item, ItemId, Stratified};
use strata_sample::allocator::AllocatorBuilder;
use test_log::test;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Question {
    number: u32,
    marks: u8,
    text: String,
}

impl Stratified for Question {
    type Id = u32;
    type Key = u8;

    fn id(&self) -> u32 {
        self.number
    }

    fn key(&self) -> u8 {
        self.marks
    }
}

fn bank() -> Vec<Question> {
    let mut out = Vec::new();
    for (marks, n) in [(2u8, 25u32), (3, 8), (5, 9)] {
        for _ in 0..n {
            let number = out.len() as u32;
            out.push(Question {
                number,
                marks,
                text: format!("Q{number} ({marks} marks)"),
            });
        }
    }
    out
}

fn exam_layout() -> Layout<u8> {
    Layout::new()
        .section(SectionSpec::new("Section A").part("A", 2, 10))
        .section(SectionSpec::new("Section B").part("B1", 2, 5).part("B2", 3, 5))
        .section(SectionSpec::new("Section C").part("C", 5, 7))
}

#[test]
fn exam_paper_is_fully_composed_from_a_sufficient_bank() {
    let mut allocator = AllocatorBuilder::new().seed(2024).build();
    let composition = Composer::new()
        .strict(true)
        .compose(bank(), &exam_layout(), &mut allocator)
        .unwrap();
    let doc = &composition.document;

    let titles: Vec<&str> = doc.sections().iter().map(|s| s.title()).collect();
    assert_eq!(titles, vec!["Section A", "Section B", "Section C"]);
    assert_eq!(doc.num_items(), 27);

    let section_b = doc.section("Section B").unwrap();
    assert!(section_b.part("B1").unwrap().items().iter().all(|q| q.marks == 2));
    assert!(section_b.part("B2").unwrap().items().iter().all(|q| q.marks == 3));
    assert!(doc.section("Section C").unwrap().parts()[0].items().iter().all(|q| q.marks == 5));

    let unique: HashSet<u32> = doc.items().map(|q| q.number).collect();
    assert_eq!(unique.len(), 27);
    assert!(doc.items().all(|q| q.text.starts_with(&format!("Q{} ", q.number))));

    let marks: u32 = doc.items().map(|q| q.marks as u32).sum();
    assert_eq!(marks, 10 * 2 + 5 * 2 + 5 * 3 + 7 * 5);
    assert!(composition.report.is_fulfilled());
}

#[test]
fn small_bank_is_composed_leniently_with_a_report() {
    let small: Vec<Question> = bank().into_iter().filter(|q| q.number % 3 == 0).collect();
    let twos = small.iter().filter(|q| q.marks == 2).count();

    let mut allocator = AllocatorBuilder::new().seed(7).build();
    let composition = Composer::new()
        .compose(small.iter().cloned(), &exam_layout(), &mut allocator)
        .unwrap();

    let report = &composition.report;
    assert_eq!(report.pool_size(&2), Some(twos));
    assert_eq!(report.delivered("A"), Some(twos.min(10)));
    assert_eq!(report.delivered("B1"), Some(twos.saturating_sub(10).min(5)));
    assert!(!report.is_fulfilled());

    let err = Composer::new()
        .strict(true)
        .compose(small, &exam_layout(), &mut allocator)
        .unwrap_err();
    assert!(matches!(err, ComposeError::Shortfall(_)));
}

#[test]
fn references_into_caller_storage_can_be_composed() {
    let items: Vec<Item<u8, &str>> = vec![
        Item::new(ItemId::new(1), 2, "first"),
        Item::new(ItemId::new(2), 2, "second"),
    ];
    let layout = Layout::new().section(SectionSpec::new("Refs").part("r", 2u8, 2));

    let mut allocator = AllocatorBuilder::new().seed(1).build();
    let composition = Composer::new()
        .compose(items.iter(), &layout, &mut allocator)
        .unwrap();

    let mut payloads: Vec<&str> = composition
        .document
        .items()
        .map(|item| *item.payload())
        .collect();
    payloads.sort_unstable();
    assert_eq!(payloads, vec!["first", "second"]);
}
