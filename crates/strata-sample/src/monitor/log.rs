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

use crate::{
    monitor::allocation_monitor::AllocationMonitor,
    report::{RequestLine, ShortageReport},
    stats::AllocationStatistics,
};
use strata_model::plan::QuotaPlan;

/// A monitor that forwards allocation events to `tracing`.
///
/// Served requests are logged at `DEBUG`, short requests at `WARN`, and the
/// run summary at `INFO`. Requests are identified by label and plan position,
/// so any key type can be logged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogMonitor {
    requests_seen: usize,
    short_seen: usize,
}

impl LogMonitor {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests observed in the current run.
    #[inline]
    pub fn requests_seen(&self) -> usize {
        self.requests_seen
    }

    /// Number of short requests observed in the current run.
    #[inline]
    pub fn short_seen(&self) -> usize {
        self.short_seen
    }
}

impl<K> AllocationMonitor<K> for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_run(&mut self, plan: &QuotaPlan<K>, pool_items: usize) {
        self.requests_seen = 0;
        self.short_seen = 0;
        tracing::debug!(
            requests = plan.len(),
            wanted = plan.total_wanted(),
            pool_items,
            "allocation run started"
        );
    }

    fn on_request(&mut self, line: &RequestLine<K>) {
        self.requests_seen += 1;
        if line.is_fulfilled() {
            tracing::debug!(
                label = line.label(),
                index = line.index().get(),
                delivered = line.delivered(),
                "request served"
            );
        } else {
            self.short_seen += 1;
            tracing::warn!(
                label = line.label(),
                index = line.index().get(),
                wanted = line.wanted(),
                delivered = line.delivered(),
                "request short of items"
            );
        }
    }

    fn on_exit_run(&mut self, report: &ShortageReport<K>, stats: &AllocationStatistics) {
        tracing::info!(
            requests = stats.requests,
            wanted = report.total_wanted(),
            delivered = report.total_delivered(),
            short_requests = stats.short_requests,
            elapsed_us = stats.duration.as_micros() as u64,
            "allocation run finished"
        );
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(requests_seen: {}, short_seen: {})",
            self.requests_seen, self.short_seen
        )
    }
}
