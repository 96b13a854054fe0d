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

//! Document layouts.
//!
//! Parts are requested in layout order: the parts of the first section come
//! first, and within a section parts keep their declaration order. Two parts
//! naming the same category compete for one bucket, with the earlier part
//! served first.

use strata_model::plan::{PlanError, QuotaPlan, RequestSpec};

/// A request for `count` items of category `key`, attributed to `label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartSpec<K> {
    pub label: String,
    pub key: K,
    pub count: i64,
}

/// A titled group of parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpec<K> {
    title: String,
    parts: Vec<PartSpec<K>>,
}

impl<K> SectionSpec<K> {
    /// Creates an empty section.
    #[inline]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            parts: Vec::new(),
        }
    }

    /// Appends a part asking for `count` items of `key` under `label`.
    #[inline]
    pub fn part(mut self, label: impl Into<String>, key: K, count: i64) -> Self {
        self.parts.push(PartSpec {
            label: label.into(),
            key,
            count,
        });
        self
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn parts(&self) -> &[PartSpec<K>] {
        &self.parts
    }
}

/// An ordered list of sections.
///
/// # Examples
///
/// ```rust
/// use strata_compose::layout::{Layout, SectionSpec};
///
/// let layout = Layout::new()
///     .section(SectionSpec::new("Section A").part("A", 2u32, 10))
///     .section(
///         SectionSpec::new("Section B")
///             .part("B1", 2u32, 5)
///             .part("B2", 3u32, 5),
///     )
///     .section(SectionSpec::new("Section C").part("C", 5u32, 7));
///
/// let plan = layout.plan().unwrap();
/// assert_eq!(plan.len(), 4);
/// assert_eq!(plan.total_wanted(), 27);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout<K> {
    sections: Vec<SectionSpec<K>>,
}

impl<K> Default for Layout<K> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
        }
    }
}

impl<K> Layout<K> {
    /// Creates an empty layout.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section.
    #[inline]
    pub fn section(mut self, section: SectionSpec<K>) -> Self {
        self.sections.push(section);
        self
    }

    #[inline]
    pub fn sections(&self) -> &[SectionSpec<K>] {
        &self.sections
    }

    /// Total number of parts across all sections.
    #[inline]
    pub fn num_parts(&self) -> usize {
        self.sections.iter().map(|s| s.parts.len()).sum()
    }
}

impl<K> Layout<K>
where
    K: Clone,
{
    /// Flattens the layout into a validated quota plan.
    ///
    /// Part labels must be unique across the whole layout, not just within a section.
    pub fn plan(&self) -> Result<QuotaPlan<K>, PlanError> {
        QuotaPlan::try_from_requests(self.sections.iter().flat_map(|section| {
            section
                .parts
                .iter()
                .map(|part| RequestSpec::new(part.key.clone(), part.count, part.label.clone()))
        }))
    }
}
