//! # Simulation Time
//!
//! Julian dates and the interval collections used for entity availability
//! and step-valued properties.
//!
//! A [`JulianDate`] is split into a whole day number and the seconds elapsed
//! in that day so that sub-millisecond precision survives for dates far from
//! the epoch.

use std::cmp::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Seconds in one Julian day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian day number of the Unix epoch at midnight.
const UNIX_EPOCH_DAY: i64 = 2_440_587;

/// The Unix epoch starts at noon of the Julian day (Julian days start at noon).
const UNIX_EPOCH_SECONDS: f64 = 43_200.0;

/// A point in simulation time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JulianDate {
    day_number: i64,
    seconds_of_day: f64,
}

impl JulianDate {
    /// Earliest representable date. Used to sample constant properties.
    pub const MINIMUM: Self = Self {
        day_number: -1_930_999,
        seconds_of_day: 0.0,
    };

    /// Latest representable date.
    pub const MAXIMUM: Self = Self {
        day_number: 5_373_484,
        seconds_of_day: 0.0,
    };

    /// Creates a date, normalising seconds into `[0, 86400)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(day_number: i64, seconds_of_day: f64) -> Self {
        let extra_days = (seconds_of_day / SECONDS_PER_DAY).floor();
        Self {
            day_number: day_number + extra_days as i64,
            seconds_of_day: seconds_of_day - extra_days * SECONDS_PER_DAY,
        }
    }

    /// Current wall clock time.
    #[must_use]
    pub fn now() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self::new(
            UNIX_EPOCH_DAY,
            UNIX_EPOCH_SECONDS + since_epoch.as_secs_f64(),
        )
    }

    /// Whole Julian day number.
    #[inline]
    #[must_use]
    pub const fn day_number(&self) -> i64 {
        self.day_number
    }

    /// Seconds elapsed within the day.
    #[inline]
    #[must_use]
    pub const fn seconds_of_day(&self) -> f64 {
        self.seconds_of_day
    }

    /// Returns a new date offset by `seconds`.
    #[must_use]
    pub fn add_seconds(&self, seconds: f64) -> Self {
        Self::new(self.day_number, self.seconds_of_day + seconds)
    }

    /// Returns a new date offset by `days`.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Self::new(self.day_number + days, self.seconds_of_day)
    }

    /// Seconds from `other` to `self` (positive when `self` is later).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn seconds_difference(&self, other: &Self) -> f64 {
        (self.day_number - other.day_number) as f64 * SECONDS_PER_DAY
            + (self.seconds_of_day - other.seconds_of_day)
    }

    /// Fractional Julian day count.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_days(&self) -> f64 {
        self.day_number as f64 + self.seconds_of_day / SECONDS_PER_DAY
    }

    /// Total ordering of two dates.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.day_number.cmp(&other.day_number).then_with(|| {
            self.seconds_of_day
                .partial_cmp(&other.seconds_of_day)
                .unwrap_or(Ordering::Equal)
        })
    }
}

impl PartialOrd for JulianDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Default for JulianDate {
    fn default() -> Self {
        Self::new(0, 0.0)
    }
}

/// A closed, open or half-open span of time carrying `data`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval<T = ()> {
    /// Start of the interval.
    pub start: JulianDate,
    /// End of the interval.
    pub stop: JulianDate,
    /// Whether `start` itself belongs to the interval.
    pub is_start_included: bool,
    /// Whether `stop` itself belongs to the interval.
    pub is_stop_included: bool,
    /// Payload associated with the interval.
    pub data: T,
}

impl<T> TimeInterval<T> {
    /// Creates a closed interval `[start, stop]`.
    #[must_use]
    pub const fn new(start: JulianDate, stop: JulianDate, data: T) -> Self {
        Self {
            start,
            stop,
            is_start_included: true,
            is_stop_included: true,
            data,
        }
    }

    /// Excludes the start instant.
    #[must_use]
    pub fn with_start_excluded(mut self) -> Self {
        self.is_start_included = false;
        self
    }

    /// Excludes the stop instant.
    #[must_use]
    pub fn with_stop_excluded(mut self) -> Self {
        self.is_stop_included = false;
        self
    }

    /// True when no instant falls inside the interval.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self.stop.compare(&self.start) {
            Ordering::Less => true,
            Ordering::Equal => !(self.is_start_included && self.is_stop_included),
            Ordering::Greater => false,
        }
    }

    /// True when `time` falls inside the interval.
    #[must_use]
    pub fn contains(&self, time: &JulianDate) -> bool {
        if self.is_empty() {
            return false;
        }
        let after_start = match time.compare(&self.start) {
            Ordering::Greater => true,
            Ordering::Equal => self.is_start_included,
            Ordering::Less => false,
        };
        let before_stop = match time.compare(&self.stop) {
            Ordering::Less => true,
            Ordering::Equal => self.is_stop_included,
            Ordering::Greater => false,
        };
        after_start && before_stop
    }
}

/// An ordered set of intervals.
///
/// Intervals are kept sorted by start time. Overlaps are allowed; lookups
/// return the earliest-starting interval containing the query time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeIntervalCollection<T = ()> {
    intervals: Vec<TimeInterval<T>>,
}

impl<T> Default for TimeIntervalCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimeIntervalCollection<T> {
    /// Creates an empty collection. An empty collection contains no time.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Builds a collection from intervals in any order.
    #[must_use]
    pub fn from_intervals(intervals: impl IntoIterator<Item = TimeInterval<T>>) -> Self {
        let mut collection = Self::new();
        for interval in intervals {
            collection.add_interval(interval);
        }
        collection
    }

    /// Inserts an interval, keeping start order. Empty intervals are dropped.
    pub fn add_interval(&mut self, interval: TimeInterval<T>) {
        if interval.is_empty() {
            return;
        }
        let index = self
            .intervals
            .partition_point(|existing| existing.start.compare(&interval.start) != Ordering::Greater);
        self.intervals.insert(index, interval);
    }

    /// Finds the interval containing `time`.
    #[must_use]
    pub fn find_interval_containing(&self, time: &JulianDate) -> Option<&TimeInterval<T>> {
        self.intervals.iter().find(|interval| interval.contains(time))
    }

    /// Finds the data of the interval containing `time`.
    #[must_use]
    pub fn find_data_for_interval_containing(&self, time: &JulianDate) -> Option<&T> {
        self.find_interval_containing(time).map(|interval| &interval.data)
    }

    /// True when some interval contains `time`.
    #[must_use]
    pub fn contains(&self, time: &JulianDate) -> bool {
        self.find_interval_containing(time).is_some()
    }

    /// Number of intervals.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// True when the collection holds no interval.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Earliest start, if any.
    #[must_use]
    pub fn start(&self) -> Option<JulianDate> {
        self.intervals.first().map(|interval| interval.start)
    }

    /// Latest stop, if any.
    #[must_use]
    pub fn stop(&self) -> Option<JulianDate> {
        self.intervals
            .iter()
            .map(|interval| interval.stop)
            .max_by(JulianDate::compare)
    }

    /// Iterates intervals in start order.
    pub fn iter(&self) -> impl Iterator<Item = &TimeInterval<T>> {
        self.intervals.iter()
    }
}
