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

use crate::layout::Layout;
use strata_sample::allocation::Allocation;

/// The items drawn for one part of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part<T> {
    label: String,
    wanted: usize,
    items: Vec<T>,
}

impl<T> Part<T> {
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of items the layout asked for.
    #[inline]
    pub fn wanted(&self) -> usize {
        self.wanted
    }

    #[inline]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// A titled section of an assembled document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<T> {
    title: String,
    parts: Vec<Part<T>>,
}

impl<T> Section<T> {
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn parts(&self) -> &[Part<T>] {
        &self.parts
    }

    /// Returns the part labeled `label`.
    pub fn part(&self, label: &str) -> Option<&Part<T>> {
        self.parts.iter().find(|p| p.label == label)
    }

    /// Number of items across all parts of this section.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.parts.iter().map(|p| p.items.len()).sum()
    }
}

/// A document assembled from an allocation, shaped like its layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<T> {
    sections: Vec<Section<T>>,
}

impl<T> Document<T> {
    /// Arranges the items of `allocation` into the sections of `layout`.
    ///
    /// Parts whose label is missing from `allocation` come out empty.
    pub fn assemble<K>(layout: &Layout<K>, mut allocation: Allocation<T>) -> Self {
        let sections = layout
            .sections()
            .iter()
            .map(|spec| Section {
                title: spec.title().to_owned(),
                parts: spec
                    .parts()
                    .iter()
                    .map(|part| Part {
                        label: part.label.clone(),
                        wanted: usize::try_from(part.count).unwrap_or(0),
                        items: allocation.take(&part.label).unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        Self { sections }
    }

    #[inline]
    pub fn sections(&self) -> &[Section<T>] {
        &self.sections
    }

    /// Returns the first section titled `title`.
    pub fn section(&self, title: &str) -> Option<&Section<T>> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Total number of items in the document.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.sections.iter().map(Section::num_items).sum()
    }

    /// Iterates over every item in document order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.sections
            .iter()
            .flat_map(|s| s.parts.iter())
            .flat_map(|p| p.items.iter())
    }

    #[inline]
    pub fn into_sections(self) -> Vec<Section<T>> {
        self.sections
    }
}
