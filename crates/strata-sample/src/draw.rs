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

//! Uniform sampling without replacement.

use rand::Rng;
use rand::seq::SliceRandom;

/// Draws `min(count, candidates.len())` distinct elements of `candidates`.
///
/// The whole candidate vector is shuffled with a Fisher-Yates shuffle and the
/// prefix is kept, so every ordered subset of the requested size is equally
/// likely. Elements are moved out, not cloned.
///
/// # Examples
///
/// ```rust
/// use rand::{SeedableRng, rngs::StdRng};
/// use strata_sample::draw::draw_without_replacement;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let drawn = draw_without_replacement((0..10).collect(), 4, &mut rng);
/// assert_eq!(drawn.len(), 4);
/// ```
#[inline]
pub fn draw_without_replacement<T, R>(mut candidates: Vec<T>, count: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    if count == 0 {
        candidates.clear();
        return candidates;
    }

    candidates.shuffle(rng);
    candidates.truncate(count);
    candidates
}
