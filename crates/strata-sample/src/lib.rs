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

//! # Strata Sample
//!
//! Quota allocation over a partitioned item pool.
//!
//! Given a `BucketMap` and a validated `QuotaPlan`, the allocator serves each
//! request in plan order by drawing uniformly at random, without replacement,
//! from the items of the requested bucket that no earlier request has taken.
//! Running short is expected: a request receives `min(wanted, available)`
//! items and the difference is recorded in a `ShortageReport` instead of being
//! raised as an error.
//!
//! ## Modules
//!
//! - `allocator`: `Allocator` and `AllocatorBuilder`, plus the free function
//!   `allocate` for callers that manage their own random source.
//! - `draw`: uniform draw without replacement (full shuffle, then prefix).
//! - `used`: the run-scoped set of already allocated identifiers.
//! - `allocation`: per-label results in plan order.
//! - `report`: wanted, delivered and pool-size diagnostics.
//! - `stats`: run statistics.
//! - `config`: `AllocatorConfig` (seed, request logging).
//! - `monitor`: observer hooks (`AllocationMonitor`) with no-op, logging and
//!   composite implementations.
//!
//! ## Randomness
//!
//! The random source is injected. `AllocatorBuilder::build` uses a ChaCha8
//! generator seeded from the OS unless a seed is configured, and
//! `AllocatorBuilder::build_with_rng` accepts any `rand::Rng`. Each allocator
//! owns its generator, so concurrent runs on separate allocators never share
//! state.

pub mod allocation;
pub mod allocator;
pub mod config;
pub mod draw;
pub mod monitor;
pub mod report;
pub mod stats;
pub mod used;
