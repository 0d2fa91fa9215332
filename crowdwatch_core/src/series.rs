// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-capacity rolling series backing the trend chart.
//!
//! [`RollingSeries`] is struct-of-arrays storage: one label axis and two
//! numeric axes held in parallel `Vec`s. Appending beyond capacity evicts the
//! oldest point from **every** axis in lock-step — the axes must never drift
//! to different lengths, which would misalign the chart's x-axis labels
//! against its y-values.

use alloc::string::String;
use alloc::vec::Vec;

/// Number of points retained by the dashboard's trend chart.
pub const WINDOW_POINTS: usize = 15;

/// A bounded, insertion-ordered history of `(label, human_count,
/// violation_count)` points.
///
/// Length never exceeds the capacity; inserting into a full series evicts the
/// oldest point (FIFO). There is no removal operation other than eviction and
/// no access pattern beyond "all current points in order".
#[derive(Clone, Debug)]
pub struct RollingSeries {
    labels: Vec<String>,
    human_counts: Vec<u32>,
    violation_counts: Vec<u32>,
    capacity: usize,
}

impl Default for RollingSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingSeries {
    /// Creates an empty series with the dashboard's standard capacity of
    /// [`WINDOW_POINTS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(WINDOW_POINTS)
    }

    /// Creates an empty series retaining at most `capacity` points.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "series capacity must not be zero");
        Self {
            labels: Vec::with_capacity(capacity),
            human_counts: Vec::with_capacity(capacity),
            violation_counts: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends one point, evicting the oldest point from every axis in
    /// lock-step if the series is full.
    pub fn append(&mut self, label: String, human_count: u32, violation_count: u32) {
        self.labels.push(label);
        self.human_counts.push(human_count);
        self.violation_counts.push(violation_count);

        if self.labels.len() > self.capacity {
            self.labels.remove(0);
            self.human_counts.remove(0);
            self.violation_counts.remove(0);
        }

        debug_assert!(
            self.labels.len() == self.human_counts.len()
                && self.labels.len() == self.violation_counts.len(),
            "parallel axes must stay the same length"
        );
    }

    /// Returns the number of retained points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if no points have been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the maximum number of points this series retains.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The label axis, oldest first.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The headcount axis, oldest first.
    #[must_use]
    pub fn human_counts(&self) -> &[u32] {
        &self.human_counts
    }

    /// The violation axis, oldest first.
    #[must_use]
    pub fn violation_counts(&self) -> &[u32] {
        &self.violation_counts
    }

    /// Returns the most recently appended point, if any.
    #[must_use]
    pub fn newest(&self) -> Option<(&str, u32, u32)> {
        let last = self.labels.len().checked_sub(1)?;
        Some((
            self.labels[last].as_str(),
            self.human_counts[last],
            self.violation_counts[last],
        ))
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::ToString as _;

    use super::*;

    fn filled(appends: usize) -> RollingSeries {
        let mut series = RollingSeries::new();
        for i in 0..appends {
            #[expect(clippy::cast_possible_truncation, reason = "test indices are small")]
            series.append(format!("t{i}"), i as u32, (i * 10) as u32);
        }
        series
    }

    #[test]
    fn length_is_min_of_appends_and_capacity() {
        for n in [0, 1, 14, 15, 16, 40] {
            let series = filled(n);
            assert_eq!(series.len(), n.min(WINDOW_POINTS), "after {n} appends");
        }
    }

    #[test]
    fn axes_report_equal_length_after_every_append() {
        let mut series = RollingSeries::new();
        for i in 0..20_u32 {
            series.append(i.to_string(), i, i);
            assert_eq!(series.labels().len(), series.human_counts().len());
            assert_eq!(series.labels().len(), series.violation_counts().len());
        }
    }

    #[test]
    fn sixteenth_append_evicts_exactly_the_oldest_point() {
        let mut series = filled(WINDOW_POINTS);
        assert_eq!(series.labels()[0], "t0");

        series.append("t15".to_string(), 15, 150);

        assert_eq!(series.len(), WINDOW_POINTS);
        assert_eq!(series.labels()[0], "t1", "oldest label evicted");
        assert_eq!(series.human_counts()[0], 1, "oldest count evicted");
        assert_eq!(series.violation_counts()[0], 10, "oldest violation evicted");
        assert_eq!(
            series.newest(),
            Some(("t15", 15, 150)),
            "newest point is the one just appended"
        );
    }

    #[test]
    fn twenty_appends_retain_the_last_fifteen() {
        let series = filled(20);
        assert_eq!(series.len(), 15);
        // Appends are zero-indexed, so the oldest survivor of 20 appends is
        // index 5: the first five points were evicted.
        assert_eq!(series.labels()[0], "t5");
        assert_eq!(series.human_counts()[0], 5);
        assert_eq!(series.newest().map(|(label, ..)| label), Some("t19"));
    }

    #[test]
    fn custom_capacity_is_honored() {
        let mut series = RollingSeries::with_capacity(2);
        series.append("a".to_string(), 1, 0);
        series.append("b".to_string(), 2, 0);
        series.append("c".to_string(), 3, 0);
        assert_eq!(series.labels(), ["b", "c"]);
        assert_eq!(series.capacity(), 2);
    }

    #[test]
    #[should_panic(expected = "series capacity must not be zero")]
    fn zero_capacity_panics() {
        let _ = RollingSeries::with_capacity(0);
    }
}
