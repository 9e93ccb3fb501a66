//! # Time-Varying Properties
//!
//! Every attribute of an entity is a [`Property`]: a value source that can be
//! queried at any simulation time and that knows whether it is constant over
//! all time.
//!
//! ## Implementations
//!
//! | Type | Value | Constant when |
//! |------|-------|---------------|
//! | [`ConstantProperty`] | fixed (possibly undefined) | always |
//! | [`SampledProperty`] | linear interpolation of samples | no samples |
//! | [`TimeIntervalCollectionProperty`] | step value per interval | no intervals |
//! | [`CompositeProperty`] | delegates to the property of the interval | no intervals |
//! | [`CallbackProperty`] | caller-supplied closure | caller decides |
//! | [`DynamicProperty`] | settable value | never |
//!
//! A property that exists but resolves to `None` is different from a property
//! that is absent: the first is a defined-but-undefined value, the second
//! means "use the default".

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::math::{Cartesian2, Cartesian3, Color, Quaternion};
use crate::time::{JulianDate, TimeIntervalCollection};

/// A value source queryable at any simulation time.
pub trait Property<T>: Send + Sync + fmt::Debug {
    /// Value at `time`, `None` when undefined.
    fn value(&self, time: &JulianDate) -> Option<T>;

    /// True when the value is the same at every time.
    fn is_constant(&self) -> bool;
}

/// Shared handle to a property, as stored on graphics descriptions.
pub type PropertyRef<T> = Arc<dyn Property<T>>;

/// Bound satisfied by every value type stored in a property.
pub trait PropertyValue: Clone + Send + Sync + fmt::Debug + 'static {}

impl<T: Clone + Send + Sync + fmt::Debug + 'static> PropertyValue for T {}

/// Wraps `value` in a [`ConstantProperty`].
#[must_use]
pub fn constant<T: PropertyValue>(value: T) -> PropertyRef<T> {
    Arc::new(ConstantProperty::new(value))
}

/// Wraps `value` in a [`DynamicProperty`], which always reports itself as time-varying.
#[must_use]
pub fn dynamic<T: PropertyValue>(value: T) -> PropertyRef<T> {
    DynamicProperty::shared(Some(value))
}

/// A constant property that resolves to `None` at every time.
#[must_use]
pub fn undefined<T: PropertyValue>() -> PropertyRef<T> {
    Arc::new(ConstantProperty::<T>::undefined())
}

/// Absent properties count as constant.
#[inline]
#[must_use]
pub fn is_constant<T>(property: Option<&PropertyRef<T>>) -> bool {
    property.map_or(true, |property| property.is_constant())
}

/// Value of an optional property at `time`.
#[inline]
#[must_use]
pub fn value_of<T>(property: Option<&PropertyRef<T>>, time: &JulianDate) -> Option<T> {
    property.and_then(|property| property.value(time))
}

/// Value of an optional property at `time`, or `default` when absent or undefined.
#[inline]
#[must_use]
pub fn value_or<T>(property: Option<&PropertyRef<T>>, time: &JulianDate, default: T) -> T {
    value_of(property, time).unwrap_or(default)
}

/// Types that can be linearly interpolated between samples.
pub trait Interpolate: Sized {
    /// Value at fraction `t` in `[0, 1]` from `self` to `other`.
    #[must_use]
    fn interpolate(&self, other: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Cartesian2 {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.x.interpolate(&other.x, t),
            self.y.interpolate(&other.y, t),
        )
    }
}

impl Interpolate for Cartesian3 {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self.lerp(*other, t)
    }
}

impl Interpolate for Quaternion {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self.nlerp(*other, t)
    }
}

impl Interpolate for Color {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self.lerp(*other, t)
    }
}

impl Interpolate for crate::math::Rectangle {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.west.interpolate(&other.west, t),
            self.south.interpolate(&other.south, t),
            self.east.interpolate(&other.east, t),
            self.north.interpolate(&other.north, t),
        )
    }
}

/// A property with the same value at every time.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantProperty<T> {
    value: Option<T>,
}

impl<T> ConstantProperty<T> {
    /// Creates a defined constant.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self { value: Some(value) }
    }

    /// Creates a constant that is always undefined.
    #[must_use]
    pub const fn undefined() -> Self {
        Self { value: None }
    }
}

impl<T: PropertyValue> Property<T> for ConstantProperty<T> {
    fn value(&self, _time: &JulianDate) -> Option<T> {
        self.value.clone()
    }

    fn is_constant(&self) -> bool {
        true
    }
}

/// Samples interpolated linearly; undefined outside the sampled range.
#[derive(Clone, Debug)]
pub struct SampledProperty<T> {
    samples: Vec<(JulianDate, T)>,
}

impl<T> Default for SampledProperty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SampledProperty<T> {
    /// Creates a property without samples.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Adds a sample, replacing any sample at the same time.
    pub fn add_sample(&mut self, time: JulianDate, value: T) {
        match self
            .samples
            .binary_search_by(|(sample_time, _)| sample_time.compare(&time))
        {
            Ok(index) => self.samples[index].1 = value,
            Err(index) => self.samples.insert(index, (time, value)),
        }
    }

    /// Builder form of [`Self::add_sample`].
    #[must_use]
    pub fn with_sample(mut self, time: JulianDate, value: T) -> Self {
        self.add_sample(time, value);
        self
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True without samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl<T: PropertyValue + Interpolate> Property<T> for SampledProperty<T> {
    fn value(&self, time: &JulianDate) -> Option<T> {
        let index = match self
            .samples
            .binary_search_by(|(sample_time, _)| sample_time.compare(time))
        {
            Ok(index) => return Some(self.samples[index].1.clone()),
            Err(index) => index,
        };
        if index == 0 || index >= self.samples.len() {
            return None;
        }
        let (start_time, start) = &self.samples[index - 1];
        let (stop_time, stop) = &self.samples[index];
        let span = stop_time.seconds_difference(start_time);
        let fraction = time.seconds_difference(start_time) / span;
        Some(start.interpolate(stop, fraction))
    }

    fn is_constant(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Step values keyed by time interval.
#[derive(Clone, Debug, Default)]
pub struct TimeIntervalCollectionProperty<T> {
    intervals: TimeIntervalCollection<T>,
}

impl<T> TimeIntervalCollectionProperty<T> {
    /// Wraps an interval collection.
    #[must_use]
    pub const fn new(intervals: TimeIntervalCollection<T>) -> Self {
        Self { intervals }
    }

    /// The underlying intervals.
    #[must_use]
    pub const fn intervals(&self) -> &TimeIntervalCollection<T> {
        &self.intervals
    }
}

impl<T: PropertyValue> Property<T> for TimeIntervalCollectionProperty<T> {
    fn value(&self, time: &JulianDate) -> Option<T> {
        self.intervals.find_data_for_interval_containing(time).cloned()
    }

    fn is_constant(&self) -> bool {
        self.intervals.is_empty()
    }
}

/// Delegates to a different property per time interval.
#[derive(Clone, Debug)]
pub struct CompositeProperty<T> {
    intervals: TimeIntervalCollection<PropertyRef<T>>,
}

impl<T> CompositeProperty<T> {
    /// Wraps an interval collection of properties.
    #[must_use]
    pub const fn new(intervals: TimeIntervalCollection<PropertyRef<T>>) -> Self {
        Self { intervals }
    }
}

impl<T: PropertyValue> Property<T> for CompositeProperty<T> {
    fn value(&self, time: &JulianDate) -> Option<T> {
        self.intervals
            .find_data_for_interval_containing(time)
            .and_then(|property| property.value(time))
    }

    fn is_constant(&self) -> bool {
        self.intervals.is_empty()
    }
}

type Callback<T> = Box<dyn Fn(&JulianDate) -> Option<T> + Send + Sync>;

/// Value computed by a closure.
pub struct CallbackProperty<T> {
    callback: Callback<T>,
    is_constant: bool,
}

impl<T> CallbackProperty<T> {
    /// Creates a property from `callback`; `is_constant` declares whether it
    /// depends on time.
    pub fn new(
        callback: impl Fn(&JulianDate) -> Option<T> + Send + Sync + 'static,
        is_constant: bool,
    ) -> Self {
        Self {
            callback: Box::new(callback),
            is_constant,
        }
    }
}

impl<T> fmt::Debug for CallbackProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackProperty")
            .field("is_constant", &self.is_constant)
            .finish_non_exhaustive()
    }
}

impl<T: PropertyValue> Property<T> for CallbackProperty<T> {
    fn value(&self, time: &JulianDate) -> Option<T> {
        (self.callback)(time)
    }

    fn is_constant(&self) -> bool {
        self.is_constant
    }
}

/// A settable value that always reports itself as time-varying.
///
/// Authoring tools use it to change a definition in place; the owner must
/// notify the entity afterwards so classification is recomputed.
#[derive(Debug, Default)]
pub struct DynamicProperty<T> {
    value: RwLock<Option<T>>,
}

impl<T: PropertyValue> DynamicProperty<T> {
    /// Creates a property holding `value`.
    #[must_use]
    pub fn new(value: Option<T>) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Creates a shared property holding `value`.
    #[must_use]
    pub fn shared(value: Option<T>) -> Arc<Self> {
        Arc::new(Self::new(value))
    }

    /// Replaces the value.
    pub fn set_value(&self, value: Option<T>) {
        *self.value.write() = value;
    }

    /// Current value regardless of time.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.value.read().clone()
    }
}

impl<T: PropertyValue> Property<T> for DynamicProperty<T> {
    fn value(&self, _time: &JulianDate) -> Option<T> {
        self.get()
    }

    fn is_constant(&self) -> bool {
        false
    }
}
