//! Fixtures shared by the per-kind updater tests.

#![allow(dead_code, unused_macros)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use meridian_core::{DynamicProperty, JulianDate, PropertyRef, PropertyValue};
use meridian_geometry::{GeometryKind, GeometryUpdater, PrimitiveCollection, SharedPrimitives};

/// Fixed evaluation time, J2000.
pub fn time() -> JulianDate {
    JulianDate::new(2_451_545, 43_200.0)
}

/// Settable property that always reports itself as time-varying.
pub fn dynamic_property<T: PropertyValue>(value: Option<T>) -> Arc<DynamicProperty<T>> {
    DynamicProperty::shared(value)
}

/// Type-erased handle to a settable property.
pub fn erased<T: PropertyValue>(property: &Arc<DynamicProperty<T>>) -> PropertyRef<T> {
    Arc::clone(property) as PropertyRef<T>
}

/// Counts `geometry_changed` notifications.
pub fn count_changes<K: GeometryKind>(updater: &GeometryUpdater<K>) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    updater.geometry_changed().add_listener(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    count
}

/// Current notification count.
pub fn changes(count: &AtomicUsize) -> usize {
    count.load(Ordering::SeqCst)
}

/// Standard and ground containers.
pub fn containers() -> (SharedPrimitives, SharedPrimitives) {
    (PrimitiveCollection::shared(), PrimitiveCollection::shared())
}

/// Number of primitives in a shared container.
pub fn primitive_count(container: &SharedPrimitives) -> usize {
    container.lock().len()
}

/// Behaviour every geometry kind shares.
///
/// `$field` is the entity field holding the kind's graphics and `$create`
/// builds an entity whose geometry is fully defined, filled and not on
/// terrain.
macro_rules! geometry_updater_contract {
    ($kind:ident, $field:ident, $create:ident) => {
        mod contract {
            use std::sync::Arc;

            use meridian_core::{
                constant, Color, DistanceDisplayCondition, Entity, EntityHandle, EntityProperty,
                GraphicsStyle, JulianDate, MaterialProperty, Property, SampledProperty, ShadowMode,
                TimeInterval, TimeIntervalCollection, TimeIntervalCollectionProperty,
            };
            use meridian_geometry::{
                ColorAttribute, GeometryKind, GeometryUpdater, SceneContext, UpdaterError,
            };

            use crate::common::{changes, count_changes, time};

            type Kind = super::$kind;
            type Updater = GeometryUpdater<Kind>;

            fn style(entity: &mut Entity) -> &mut GraphicsStyle {
                &mut entity
                    .$field
                    .as_mut()
                    .expect("fixture defines graphics")
                    .style
            }

            fn updater(entity: Entity) -> Updater {
                Updater::new(EntityHandle::new(entity), SceneContext::default())
            }

            fn stepped(first: bool, second: bool) -> Arc<TimeIntervalCollectionProperty<bool>> {
                let (t1, t2, t3) = (
                    JulianDate::new(0, 0.0),
                    JulianDate::new(10, 0.0),
                    JulianDate::new(20, 0.0),
                );
                Arc::new(TimeIntervalCollectionProperty::new(
                    TimeIntervalCollection::from_intervals([
                        TimeInterval::new(t1, t2, first),
                        TimeInterval::new(t2, t3, second).with_start_excluded(),
                    ]),
                ))
            }

            #[test]
            fn test_constructor_defaults() {
                let mut entity = Entity::new();
                entity.$field = Some(Default::default());
                let updater = updater(entity);

                assert!(!updater.is_destroyed());
                assert!(!updater.is_closed());
                assert!(!updater.fill_enabled());
                assert!(updater.fill_material_property().is_none());
                assert!(!updater.outline_enabled());
                assert!(updater.has_constant_fill());
                assert!(updater.has_constant_outline());
                assert!(updater.outline_color_property().is_none());
                assert!((updater.outline_width() - 1.0).abs() < f64::EPSILON);
                assert!(updater.shadows_property().is_none());
                assert!(updater.distance_display_condition_property().is_none());
                assert!(!updater.is_dynamic());
                assert!(!updater.on_terrain());
                assert_eq!(updater.is_outline_visible(&time()), Ok(false));
                assert_eq!(updater.is_filled(&time()), Ok(false));

                updater.destroy();
                assert!(updater.is_destroyed());
            }

            #[test]
            fn test_no_geometry_without_graphics() {
                let updater = updater(Entity::new());
                assert!(!updater.fill_enabled());
                assert!(!updater.outline_enabled());
                assert!(!updater.is_dynamic());
            }

            #[test]
            fn test_not_filled_or_outlined_is_disabled() {
                let mut entity = super::$create();
                style(&mut entity).fill = Some(constant(false));
                style(&mut entity).outline = Some(constant(false));
                let updater = updater(entity);

                assert!(!updater.fill_enabled());
                assert!(!updater.outline_enabled());
                assert!(!updater.is_dynamic());
            }

            #[test]
            fn test_default_graphics_values() {
                let updater = updater(super::$create());
                let classification = updater.classification();

                assert_eq!(
                    updater.is_closed(),
                    classification
                        .options
                        .as_ref()
                        .is_some_and(<Kind as GeometryKind>::is_closed)
                );
                assert!(updater.fill_enabled());
                let material = updater.fill_material_property().expect("default material");
                assert!(material.is_color());
                assert_eq!(
                    material.color_source().and_then(|color| color.value(&time())),
                    Some(Color::WHITE)
                );
                assert!(!updater.outline_enabled());
                assert!(updater.has_constant_fill());
                assert!(updater.has_constant_outline());
                assert!(updater.outline_color_property().is_none());
                assert!((updater.outline_width() - 1.0).abs() < f64::EPSILON);

                let shadows = updater.shadows_property().expect("default shadows");
                assert!(shadows.is_constant());
                assert_eq!(shadows.value(&time()), Some(ShadowMode::Disabled));
                let condition = updater
                    .distance_display_condition_property()
                    .expect("default display condition");
                assert_eq!(
                    condition.value(&time()),
                    Some(DistanceDisplayCondition::default())
                );
                assert!(!updater.is_dynamic());
            }

            #[test]
            fn test_material_is_exposed() {
                let material = MaterialProperty::grid(Color::BLUE).shared();
                let mut entity = super::$create();
                style(&mut entity).material = Some(Arc::clone(&material));
                let updater = updater(entity);

                let exposed = updater.fill_material_property().expect("material");
                assert!(Arc::ptr_eq(&exposed, &material));
            }

            #[test]
            fn test_time_varying_outline_width_is_dynamic() {
                let mut entity = super::$create();
                style(&mut entity).outline_width =
                    Some(Arc::new(SampledProperty::<f64>::new().with_sample(time(), 1.0)));
                assert!(updater(entity).is_dynamic());
            }

            #[test]
            fn test_time_varying_color_is_dynamic() {
                let color = SampledProperty::new().with_sample(time(), Color::WHITE);
                let mut entity = super::$create();
                style(&mut entity).material =
                    Some(MaterialProperty::color_property(Arc::new(color)).shared());
                assert!(updater(entity).is_dynamic());
            }

            #[test]
            fn test_exposes_outline_width() {
                let mut entity = super::$create();
                style(&mut entity).outline_width = Some(constant(8.0));
                assert!((updater(entity).outline_width() - 8.0).abs() < f64::EPSILON);
            }

            #[test]
            fn test_attributes_at_creation_time() {
                let t2 = JulianDate::new(10, 0.0);
                let t3 = JulianDate::new(20, 0.0);
                let fill_color = SampledProperty::new()
                    .with_sample(time(), Color::YELLOW)
                    .with_sample(t2, Color::BLUE)
                    .with_sample(t3, Color::RED);
                let outline_color = SampledProperty::new()
                    .with_sample(time(), Color::BLUE)
                    .with_sample(t2, Color::RED)
                    .with_sample(t3, Color::YELLOW);

                let mut entity = super::$create();
                let graphics = style(&mut entity);
                graphics.fill = Some(stepped(false, true));
                graphics.material =
                    Some(MaterialProperty::color_property(Arc::new(fill_color)).shared());
                graphics.outline = Some(stepped(false, true));
                graphics.outline_color = Some(Arc::new(outline_color));
                let updater = updater(entity);

                let fill = updater
                    .create_fill_geometry_instance(&t2)
                    .expect("fill instance");
                assert_eq!(
                    fill.attributes.color,
                    Some(ColorAttribute::from_color(Color::BLUE))
                );
                assert!(!fill.attributes.show.is_shown());

                let outline = updater
                    .create_outline_geometry_instance(&t2)
                    .expect("outline instance");
                assert_eq!(
                    outline.attributes.color,
                    Some(ColorAttribute::from_color(Color::RED))
                );
                assert!(!outline.attributes.show.is_shown());
            }

            #[test]
            fn test_fill_instance_obeys_entity_show() {
                let mut entity = super::$create();
                entity.show = Some(constant(false));
                style(&mut entity).fill = Some(constant(true));
                let updater = updater(entity);

                let instance = updater
                    .create_fill_geometry_instance(&time())
                    .expect("fill instance");
                assert!(!instance.attributes.show.is_shown());
            }

            #[test]
            fn test_outline_instance_obeys_entity_show() {
                let mut entity = super::$create();
                entity.show = Some(constant(false));
                style(&mut entity).outline = Some(constant(true));
                let updater = updater(entity);

                let instance = updater
                    .create_outline_geometry_instance(&time())
                    .expect("outline instance");
                assert!(!instance.attributes.show.is_shown());
            }

            #[test]
            fn test_fill_instance_requires_fill() {
                let updater = updater(Entity::new());
                assert_eq!(
                    updater.create_fill_geometry_instance(&time()),
                    Err(UpdaterError::FillNotEnabled {
                        kind: <Kind as GeometryKind>::NAME
                    })
                );
            }

            #[test]
            fn test_outline_instance_requires_outline() {
                let updater = updater(Entity::new());
                assert_eq!(
                    updater.create_outline_geometry_instance(&time()),
                    Err(UpdaterError::OutlineNotEnabled {
                        kind: <Kind as GeometryKind>::NAME
                    })
                );
            }

            #[test]
            fn test_static_geometry_has_no_dynamic_updater() {
                let updater = updater(super::$create());
                let (primitives, ground) = crate::common::containers();
                assert!(matches!(
                    updater.create_dynamic_updater(primitives, ground),
                    Err(UpdaterError::NotDynamic { .. })
                ));
            }

            #[test]
            fn test_destroyed_updater_rejects_calls() {
                let updater = updater(super::$create());
                updater.destroy();
                updater.destroy();

                let destroyed = Err(UpdaterError::Destroyed {
                    kind: <Kind as GeometryKind>::NAME,
                });
                assert_eq!(updater.create_fill_geometry_instance(&time()), destroyed);
                assert_eq!(
                    updater.on_entity_property_changed(EntityProperty::Show),
                    Err(UpdaterError::Destroyed {
                        kind: <Kind as GeometryKind>::NAME
                    })
                );
                assert_eq!(
                    updater.is_filled(&time()),
                    Err(UpdaterError::Destroyed {
                        kind: <Kind as GeometryKind>::NAME
                    })
                );
                assert_eq!(
                    updater.is_outline_visible(&time()),
                    Err(UpdaterError::Destroyed {
                        kind: <Kind as GeometryKind>::NAME
                    })
                );
                assert_eq!(updater.entity().definition_changed().listener_count(), 0);
            }

            #[test]
            fn test_unrelated_property_does_not_raise() {
                let updater = updater(super::$create());
                let count = count_changes(&updater);

                updater.entity().modify(EntityProperty::ViewFrom, |entity| {
                    entity.view_from = Some(constant(meridian_core::Cartesian3::UNIT_X));
                });
                updater.entity().modify(EntityProperty::Name, |entity| {
                    entity.name = Some("renamed".to_owned());
                });
                assert_eq!(changes(&count), 0);
            }
        }
    };
}
