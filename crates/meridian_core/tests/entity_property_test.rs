//! Integration tests for properties, availability and entity change events.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use approx::assert_relative_eq;
use meridian_core::{
    constant, dynamic, is_constant, undefined, value_or, CallbackProperty, Color,
    CompositeProperty, Entity, EntityHandle, EntityProperty, JulianDate, MaterialProperty,
    Property, PropertyRef, SampledProperty, TimeInterval, TimeIntervalCollection,
    TimeIntervalCollectionProperty,
};
use parking_lot::Mutex;

fn day(n: i64) -> JulianDate {
    JulianDate::new(2_451_545 + n, 0.0)
}

#[test]
fn test_constancy_of_property_kinds() {
    assert!(constant(1.0_f64).is_constant());
    assert!(undefined::<f64>().is_constant());
    assert!(!dynamic(1.0_f64).is_constant());
    assert!(SampledProperty::<f64>::new().is_constant());
    assert!(!SampledProperty::<f64>::new().with_sample(day(0), 1.0).is_constant());
    assert!(TimeIntervalCollectionProperty::<bool>::new(TimeIntervalCollection::new()).is_constant());
    assert!(CallbackProperty::<f64>::new(|_| Some(1.0), true).is_constant());
    assert!(!CallbackProperty::<f64>::new(|_| Some(1.0), false).is_constant());

    assert!(is_constant::<f64>(None));
    assert!(!is_constant(Some(&dynamic(1.0_f64))));
}

#[test]
fn test_sampled_property_interpolates_inside_range() {
    let property = SampledProperty::<f64>::new()
        .with_sample(day(0), 0.0)
        .with_sample(day(2), 10.0);

    assert_eq!(property.value(&day(0)), Some(0.0));
    assert_relative_eq!(property.value(&day(1)).unwrap_or_default(), 5.0, epsilon = 1e-9);
    assert_eq!(property.value(&day(-1)), None);
    assert_eq!(property.value(&day(3)), None);
}

#[test]
fn test_interval_property_steps_between_values() {
    let property = TimeIntervalCollectionProperty::new(TimeIntervalCollection::from_intervals([
        TimeInterval::new(day(1), day(2), "late").with_start_excluded(),
        TimeInterval::new(day(0), day(1), "early"),
    ]));

    assert_eq!(property.value(&day(0)), Some("early"));
    assert_eq!(property.value(&day(1)), Some("early"));
    assert_eq!(property.value(&day(2)), Some("late"));
    assert_eq!(property.value(&day(3)), None);
    assert!(!property.is_constant());
}

#[test]
fn test_composite_property_delegates_per_interval() {
    let ramp: PropertyRef<f64> = Arc::new(
        SampledProperty::new()
            .with_sample(day(1), 10.0)
            .with_sample(day(3), 30.0),
    );
    let property = CompositeProperty::new(TimeIntervalCollection::from_intervals([
        TimeInterval::new(day(0), day(1), constant(1.0)).with_stop_excluded(),
        TimeInterval::new(day(1), day(3), ramp),
    ]));

    assert_eq!(property.value(&day(0)), Some(1.0));
    assert_relative_eq!(property.value(&day(2)).unwrap_or_default(), 20.0, epsilon = 1e-9);
    assert_eq!(property.value(&day(4)), None);
}

#[test]
fn test_value_or_falls_back_for_absent_and_undefined() {
    let time = day(0);
    assert_eq!(value_or(None, &time, 7), 7);
    assert_eq!(value_or(Some(&undefined()), &time, 7), 7);
    assert_eq!(value_or(Some(&constant(3)), &time, 7), 3);
}

#[test]
fn test_availability_and_show() {
    let mut entity = Entity::new();
    assert!(entity.is_available(&day(0)));
    assert!(entity.is_showing(&day(0)));

    entity.availability = Some(TimeIntervalCollection::from_intervals([TimeInterval::new(
        day(0),
        day(1),
        (),
    )]));
    assert!(entity.is_available(&day(1)));
    assert!(!entity.is_available(&day(2)));

    entity.availability = Some(TimeIntervalCollection::new());
    assert!(!entity.is_available(&day(0)));

    entity.show = Some(constant(false));
    assert!(!entity.is_showing(&day(0)));
}

#[test]
fn test_modify_raises_definition_changed() {
    let handle = EntityHandle::new(Entity::new());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let listener = handle.definition_changed().add_listener(move |change| {
        sink.lock().push(change.property);
    });

    handle.modify(EntityProperty::Position, |entity| {
        entity.position = Some(constant(meridian_core::Cartesian3::UNIT_Z));
    });
    handle.notify(EntityProperty::Box);
    assert_eq!(*seen.lock(), vec![EntityProperty::Position, EntityProperty::Box]);
    assert!(handle.read().position.is_some());

    assert!(handle.definition_changed().remove_listener(listener));
    handle.notify(EntityProperty::Show);
    assert_eq!(seen.lock().len(), 2);
    assert_eq!(handle.definition_changed().listener_count(), 0);
}

#[test]
fn test_handles_share_state_but_not_identity() {
    let first = EntityHandle::new(Entity::new());
    let alias = first.clone();
    let other = EntityHandle::new(Entity::new());

    assert!(first.ptr_eq(&alias));
    assert_eq!(first.id(), alias.id());
    assert!(!first.ptr_eq(&other));
    assert_ne!(first.id(), other.id());

    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    first.definition_changed().add_listener(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    alias.modify(EntityProperty::Name, |entity| entity.name = Some("alias".to_owned()));
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(first.read().name.as_deref(), Some("alias"));
}

#[test]
fn test_material_constancy_follows_uniforms() {
    assert!(MaterialProperty::color(Color::RED).is_constant());
    assert!(MaterialProperty::checkerboard().is_constant());

    let pulsing = MaterialProperty::color_property(
        Arc::new(SampledProperty::new().with_sample(day(0), Color::RED)),
    );
    assert!(!pulsing.is_constant());
    assert!(pulsing.is_color());
}
