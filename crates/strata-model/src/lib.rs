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

//! # Strata Model
//!
//! **The data model for stratified quota sampling.**
//!
//! This crate defines what goes into an allocation run: the items of the pool,
//! the quota plan naming how many items each labeled request wants from which
//! category, and the partition of the pool into per-category buckets.
//!
//! ## Architecture
//!
//! * **`item`**: The `Stratified` trait (identifier plus category key) and a
//!   ready-made `Item<K, P>` carrying an opaque payload.
//! * **`index`**: Strongly-typed `RequestIndex` for addressing requests in a plan.
//! * **`plan`**: `QuotaPlan` and its builder. Plans are validated on
//!   construction, so a `QuotaPlan` value is always label-unique with
//!   non-negative counts.
//! * **`partition`**: Groups a flat item collection into a `BucketMap`.
//!
//! ## Design Philosophy
//!
//! 1.  **Fail-Fast**: Caller mistakes in the plan are rejected before any item is drawn.
//! 2.  **Open Key Space**: Category keys are any `Eq + Hash` type. Nothing
//!     assumes a fixed set of categories; absent keys read as empty buckets.

pub mod index;
pub mod item;
pub mod partition;
pub mod plan;
