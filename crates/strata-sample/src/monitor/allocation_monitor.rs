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

use crate::{report::RequestLine, report::ShortageReport, stats::AllocationStatistics};
use strata_model::plan::QuotaPlan;

/// Receives events from an allocation run.
///
/// Hooks are called synchronously, in plan order, on the thread running the
/// allocation. A monitor observes; it cannot alter what is drawn.
pub trait AllocationMonitor<K> {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once before the first request is served.
    fn on_enter_run(&mut self, _plan: &QuotaPlan<K>, _pool_items: usize) {}

    /// Called after each request has been served.
    fn on_request(&mut self, line: &RequestLine<K>);

    /// Called once after the report has been built.
    fn on_exit_run(&mut self, _report: &ShortageReport<K>, _stats: &AllocationStatistics) {}
}

impl<K> std::fmt::Debug for dyn AllocationMonitor<K> + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllocationMonitor({})", self.name())
    }
}

impl<K> std::fmt::Display for dyn AllocationMonitor<K> + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllocationMonitor({})", self.name())
    }
}
