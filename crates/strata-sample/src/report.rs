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

//! Shortage diagnostics.
//!
//! A `ShortageReport` records, per request, how many items were wanted and how
//! many were delivered, and per referenced key how large the bucket was before
//! the run started. Pool sizes are taken from the partition, so they are not
//! reduced by items that earlier requests consumed.
//!
//! A shortfall is data, not an error. Callers that need every request fully
//! served call `ShortageReport::ensure_fulfilled`.

use strata_model::index::RequestIndex;

/// Raised by `ShortageReport::ensure_fulfilled` when some request came up short.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{short_requests} request(s) not fully served; '{label}' received {delivered} of {wanted}"
)]
pub struct ShortfallError {
    /// Label of the first short request in plan order.
    pub label: String,
    pub wanted: usize,
    pub delivered: usize,
    /// Number of short requests in the run.
    pub short_requests: usize,
}

/// Outcome of a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine<K> {
    index: RequestIndex,
    label: String,
    key: K,
    wanted: usize,
    delivered: usize,
}

impl<K> RequestLine<K> {
    /// Creates a new `RequestLine`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `delivered > wanted`.
    #[inline]
    pub fn new(
        index: RequestIndex,
        label: impl Into<String>,
        key: K,
        wanted: usize,
        delivered: usize,
    ) -> Self {
        debug_assert!(
            delivered <= wanted,
            "called `RequestLine::new` with delivered > wanted: delivered is {} but wanted is {}",
            delivered,
            wanted
        );

        Self {
            index,
            label: label.into(),
            key,
            wanted,
            delivered,
        }
    }

    #[inline]
    pub fn index(&self) -> RequestIndex {
        self.index
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn wanted(&self) -> usize {
        self.wanted
    }

    #[inline]
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Number of wanted items that were not delivered.
    #[inline]
    pub fn shortfall(&self) -> usize {
        self.wanted.saturating_sub(self.delivered)
    }

    /// Returns `true` if the request was fully served.
    #[inline]
    pub fn is_fulfilled(&self) -> bool {
        self.delivered >= self.wanted
    }
}

/// Wanted, delivered and pool-size figures of one allocation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortageReport<K> {
    lines: Vec<RequestLine<K>>,
    pools: Vec<(K, usize)>,
}

impl<K> Default for ShortageReport<K> {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            pools: Vec::new(),
        }
    }
}

impl<K> ShortageReport<K> {
    /// Creates a report from per-request lines (plan order) and per-key pool sizes.
    #[inline]
    pub fn new(lines: Vec<RequestLine<K>>, pools: Vec<(K, usize)>) -> Self {
        Self { lines, pools }
    }

    /// Returns the per-request lines in plan order.
    #[inline]
    pub fn lines(&self) -> &[RequestLine<K>] {
        &self.lines
    }

    /// Returns the line for `label`.
    pub fn line(&self, label: &str) -> Option<&RequestLine<K>> {
        self.lines.iter().find(|l| l.label == label)
    }

    /// Returns the pre-allocation pool size of every referenced key, in order
    /// of first reference in the plan.
    #[inline]
    pub fn pools(&self) -> &[(K, usize)] {
        &self.pools
    }

    #[inline]
    pub fn wanted(&self, label: &str) -> Option<usize> {
        self.line(label).map(RequestLine::wanted)
    }

    #[inline]
    pub fn delivered(&self, label: &str) -> Option<usize> {
        self.line(label).map(RequestLine::delivered)
    }

    #[inline]
    pub fn shortfall(&self, label: &str) -> Option<usize> {
        self.line(label).map(RequestLine::shortfall)
    }

    /// Iterates over the requests that were not fully served.
    #[inline]
    pub fn shortfalls(&self) -> impl Iterator<Item = &RequestLine<K>> {
        self.lines.iter().filter(|l| !l.is_fulfilled())
    }

    /// Returns `true` if every request was fully served.
    #[inline]
    pub fn is_fulfilled(&self) -> bool {
        self.lines.iter().all(RequestLine::is_fulfilled)
    }

    /// Sum of all wanted counts, saturating at `usize::MAX`.
    #[inline]
    pub fn total_wanted(&self) -> usize {
        self.lines
            .iter()
            .map(RequestLine::wanted)
            .fold(0, usize::saturating_add)
    }

    #[inline]
    pub fn total_delivered(&self) -> usize {
        self.lines.iter().map(RequestLine::delivered).sum()
    }

    /// Fails with the first short request if any request was not fully served.
    pub fn ensure_fulfilled(&self) -> Result<(), ShortfallError> {
        let mut short = self.shortfalls();
        match short.next() {
            None => Ok(()),
            Some(first) => Err(ShortfallError {
                label: first.label.clone(),
                wanted: first.wanted,
                delivered: first.delivered,
                short_requests: 1 + short.count(),
            }),
        }
    }
}

impl<K> ShortageReport<K>
where
    K: PartialEq,
{
    /// Returns the pre-allocation size of the bucket `key`, if the plan referenced it.
    pub fn pool_size(&self, key: &K) -> Option<usize> {
        self.pools.iter().find(|(k, _)| k == key).map(|(_, n)| *n)
    }
}

impl<K> std::fmt::Display for ShortageReport<K>
where
    K: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:<16} | {:<8} | {:<6} | {:<9} | {:<9}",
            "Request", "Key", "Wanted", "Delivered", "Shortfall"
        )?;
        writeln!(f, "{}", "-".repeat(60))?;
        for line in &self.lines {
            writeln!(
                f,
                "{:<16} | {:<8} | {:<6} | {:<9} | {:<9}",
                line.label,
                format!("{:?}", line.key),
                line.wanted,
                line.delivered,
                line.shortfall()
            )?;
        }
        writeln!(f, "Pool sizes:")?;
        for (key, size) in &self.pools {
            writeln!(f, "  {:?}: {}", key, size)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ShortageReport<u8> {
        ShortageReport::new(
            vec![
                RequestLine::new(RequestIndex::new(0), "A", 2, 10, 10),
                RequestLine::new(RequestIndex::new(1), "B1", 2, 5, 2),
                RequestLine::new(RequestIndex::new(2), "B2", 3, 5, 3),
                RequestLine::new(RequestIndex::new(3), "C", 5, 7, 0),
            ],
            vec![(2, 12), (3, 3), (5, 0)],
        )
    }

    #[test]
    fn test_lookups_by_label_and_key() {
        let r = report();
        assert_eq!(r.wanted("B1"), Some(5));
        assert_eq!(r.delivered("B1"), Some(2));
        assert_eq!(r.shortfall("B1"), Some(3));
        assert_eq!(r.delivered("missing"), None);
        assert_eq!(r.pool_size(&2), Some(12));
        assert_eq!(r.pool_size(&5), Some(0));
        assert_eq!(r.pool_size(&9), None);
    }

    #[test]
    fn test_totals_and_shortfalls() {
        let r = report();
        assert_eq!(r.total_wanted(), 27);
        assert_eq!(r.total_delivered(), 15);
        assert!(!r.is_fulfilled());

        let short: Vec<&str> = r.shortfalls().map(RequestLine::label).collect();
        assert_eq!(short, vec!["B1", "B2", "C"]);
    }

    #[test]
    fn test_total_wanted_saturates() {
        let r: ShortageReport<u8> = ShortageReport::new(
            vec![
                RequestLine::new(RequestIndex::new(0), "A", 1, usize::MAX, 4),
                RequestLine::new(RequestIndex::new(1), "B", 1, usize::MAX, 0),
            ],
            vec![(1, 4)],
        );
        assert_eq!(r.total_wanted(), usize::MAX);
        assert_eq!(r.total_delivered(), 4);
        assert_eq!(r.shortfall("A"), Some(usize::MAX - 4));
    }

    #[test]
    fn test_ensure_fulfilled_reports_first_short_request() {
        let err = report().ensure_fulfilled().unwrap_err();
        assert_eq!(
            err,
            ShortfallError {
                label: "B1".to_string(),
                wanted: 5,
                delivered: 2,
                short_requests: 3,
            }
        );
        assert_eq!(
            err.to_string(),
            "3 request(s) not fully served; 'B1' received 2 of 5"
        );
    }

    #[test]
    fn test_fulfilled_report_passes() {
        let r = ShortageReport::new(
            vec![RequestLine::new(RequestIndex::new(0), "A", 'x', 0, 0)],
            vec![('x', 0)],
        );
        assert!(r.is_fulfilled());
        assert_eq!(r.ensure_fulfilled(), Ok(()));
        assert!(ShortageReport::<u8>::default().is_fulfilled());
    }

    #[test]
    fn test_display_lists_every_request_and_pool() {
        let text = format!("{}", report());
        assert!(text.starts_with("Request"));
        for label in ["A ", "B1", "B2", "C "] {
            assert!(text.contains(label), "missing {label} in\n{text}");
        }
        assert!(text.contains("  2: 12"));
        assert!(text.contains("  5: 0"));
    }
}
