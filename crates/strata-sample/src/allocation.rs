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

use rustc_hash::FxHashMap;

/// The items drawn for each request of a plan, in plan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation<T> {
    entries: Vec<(String, Vec<T>)>,
}

impl<T> Default for Allocation<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Allocation<T> {
    /// Creates an allocation from `(label, items)` pairs in plan order.
    #[inline]
    pub fn from_entries(entries: Vec<(String, Vec<T>)>) -> Self {
        Self { entries }
    }

    /// Returns the items drawn for `label`, or `None` if the plan has no such label.
    pub fn get(&self, label: &str) -> Option<&[T]> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, items)| items.as_slice())
    }

    /// Removes and returns the items drawn for `label`.
    pub fn take(&mut self, label: &str) -> Option<Vec<T>> {
        let position = self.entries.iter().position(|(l, _)| l == label)?;
        Some(std::mem::take(&mut self.entries[position].1))
    }

    /// Iterates over `(label, items)` in plan order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &[T])> {
        self.entries
            .iter()
            .map(|(label, items)| (label.as_str(), items.as_slice()))
    }

    /// Returns the number of requests.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the allocation covers no requests.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of items drawn across all requests.
    #[inline]
    pub fn num_drawn(&self) -> usize {
        self.entries.iter().map(|(_, items)| items.len()).sum()
    }

    /// Consumes the allocation, returning the `(label, items)` pairs in plan order.
    #[inline]
    pub fn into_entries(self) -> Vec<(String, Vec<T>)> {
        self.entries
    }

    /// Consumes the allocation, returning a map from label to items.
    #[inline]
    pub fn into_map(self) -> FxHashMap<String, Vec<T>> {
        self.entries.into_iter().collect()
    }
}

impl<T> IntoIterator for Allocation<T> {
    type Item = (String, Vec<T>);
    type IntoIter = std::vec::IntoIter<(String, Vec<T>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Allocation<u32> {
        Allocation::from_entries(vec![
            ("A".to_string(), vec![1, 2, 3]),
            ("B".to_string(), vec![]),
            ("C".to_string(), vec![9]),
        ])
    }

    #[test]
    fn test_lookup_by_label() {
        let a = sample();
        assert_eq!(a.get("A"), Some(&[1, 2, 3][..]));
        assert_eq!(a.get("B"), Some(&[][..]));
        assert_eq!(a.get("missing"), None);
    }

    #[test]
    fn test_iteration_keeps_plan_order() {
        let a = sample();
        let labels: Vec<&str> = a.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_counts() {
        let a = sample();
        assert_eq!(a.len(), 3);
        assert_eq!(a.num_drawn(), 4);
        assert!(!a.is_empty());
        assert!(Allocation::<u32>::default().is_empty());
    }

    #[test]
    fn test_take_leaves_empty_entry() {
        let mut a = sample();
        assert_eq!(a.take("A"), Some(vec![1, 2, 3]));
        assert_eq!(a.get("A"), Some(&[][..]));
        assert_eq!(a.take("nope"), None);
    }

    #[test]
    fn test_into_map() {
        let map = sample().into_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map["C"], vec![9]);
    }
}
