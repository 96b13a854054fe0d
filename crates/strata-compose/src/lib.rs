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

//! # Strata Compose
//!
//! Assembles sectioned documents from a labeled item pool.
//!
//! A `Layout` describes the document: an ordered list of titled sections, each
//! made of parts that ask for a number of items of one category. The
//! `Composer` flattens the layout into a quota plan, partitions the pool,
//! runs the allocator and arranges the drawn items back into a `Document`
//! with the same section structure, next to the allocator's shortage report.
//!
//! ## Modules
//!
//! - `layout`: `Layout`, `SectionSpec` and `PartSpec`.
//! - `document`: the assembled `Document`.
//! - `composer`: `Composer`, `Composition` and `ComposeError`.

pub mod composer;
pub mod document;
pub mod layout;
