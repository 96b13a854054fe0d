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

/// A composite monitor that forwards events to all of its monitors, in the
/// order they were added.
pub struct CompositeMonitor<'a, K> {
    monitors: Vec<Box<dyn AllocationMonitor<K> + 'a>>,
}

impl<'a, K> std::fmt::Debug for CompositeMonitor<'a, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let monitors_str = self
            .monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ");

        f.debug_struct("CompositeMonitor")
            .field("monitors", &monitors_str)
            .finish()
    }
}

impl<'a, K> std::fmt::Display for CompositeMonitor<'a, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let monitors_str = self
            .monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ");

        write!(f, "CompositeMonitor([{}])", monitors_str)
    }
}

impl<'a, K> Default for CompositeMonitor<'a, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K> CompositeMonitor<'a, K> {
    /// Creates a new empty `CompositeMonitor`.
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Adds a monitor.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: AllocationMonitor<K> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor.
    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn AllocationMonitor<K> + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, K> AllocationMonitor<K> for CompositeMonitor<'a, K> {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_run(&mut self, plan: &QuotaPlan<K>, pool_items: usize) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_enter_run(plan, pool_items);
        }
    }

    fn on_request(&mut self, line: &RequestLine<K>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_request(line);
        }
    }

    fn on_exit_run(&mut self, report: &ShortageReport<K>, stats: &AllocationStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_exit_run(report, stats);
        }
    }
}
