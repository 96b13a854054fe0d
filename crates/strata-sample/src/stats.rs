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

/// Statistics collected during one allocation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationStatistics {
    /// Number of requests processed.
    pub requests: usize,
    /// Number of items in the partitioned pool.
    pub pool_items: usize,
    /// Number of items drawn across all requests.
    pub items_drawn: usize,
    /// Number of requests that received fewer items than wanted.
    pub short_requests: usize,
    /// Wall-clock duration of the run.
    pub duration: std::time::Duration,
}

impl std::fmt::Display for AllocationStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Allocation Statistics:")?;
        writeln!(f, "  Requests: {}", self.requests)?;
        writeln!(f, "  Pool Items: {}", self.pool_items)?;
        writeln!(f, "  Items Drawn: {}", self.items_drawn)?;
        writeln!(f, "  Short Requests: {}", self.short_requests)?;
        writeln!(
            f,
            "  Duration (ms): {:.3}",
            self.duration.as_secs_f64() * 1000.0
        )
    }
}

/// Builder for `AllocationStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationStatisticsBuilder {
    requests: usize,
    pool_items: usize,
    items_drawn: usize,
    short_requests: usize,
    duration: std::time::Duration,
}

impl Default for AllocationStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AllocationStatisticsBuilder {
    /// Creates a new `AllocationStatisticsBuilder` with all counters at zero.
    #[inline]
    pub fn new() -> Self {
        Self {
            requests: 0,
            pool_items: 0,
            items_drawn: 0,
            short_requests: 0,
            duration: std::time::Duration::ZERO,
        }
    }

    #[inline]
    pub fn requests(mut self, requests: usize) -> Self {
        self.requests = requests;
        self
    }

    #[inline]
    pub fn pool_items(mut self, pool_items: usize) -> Self {
        self.pool_items = pool_items;
        self
    }

    #[inline]
    pub fn items_drawn(mut self, items_drawn: usize) -> Self {
        self.items_drawn = items_drawn;
        self
    }

    #[inline]
    pub fn short_requests(mut self, short_requests: usize) -> Self {
        self.short_requests = short_requests;
        self
    }

    #[inline]
    pub fn duration(mut self, duration: std::time::Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Builds the `AllocationStatistics` instance.
    #[inline]
    pub fn build(self) -> AllocationStatistics {
        AllocationStatistics {
            requests: self.requests,
            pool_items: self.pool_items,
            items_drawn: self.items_drawn,
            short_requests: self.short_requests,
            duration: self.duration,
        }
    }
}
