//! Static-path updater: one per entity and geometry kind.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use meridian_core::{
    value_of, value_or, Color, DistanceDisplayCondition, Entity, EntityHandle, EntityId,
    EntityProperty, Event, GeometryGraphics, JulianDate, ListenerId, MaterialRef, PropertyRef,
    ShadowMode,
};
use parking_lot::RwLock;

use super::dynamic::DynamicGeometryUpdater;
use super::{classify, flag_at, observes, Classification, GeometryKind, OptionContext};
use crate::error::{UpdaterError, UpdaterResult};
use crate::geometry::VertexFormat;
use crate::instance::{
    ColorAttribute, DistanceDisplayConditionAttribute, GeometryInstance, InstanceAttributes,
    ShowAttribute,
};
use crate::primitive::SharedPrimitives;
use crate::scene::SceneContext;

/// Payload of `geometry_changed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeometryChanged {
    /// Entity whose geometry changed
    pub entity: EntityId,
    /// Geometry kind name
    pub kind: &'static str,
}

/// State shared between an updater, its entity listener and its dynamic updaters.
#[derive(Debug)]
pub(crate) struct UpdaterShared<K: GeometryKind> {
    pub(crate) entity: EntityHandle,
    pub(crate) scene: SceneContext,
    classification: RwLock<Arc<Classification<K>>>,
    geometry_changed: Event<GeometryChanged>,
    terrain_warning_logged: AtomicBool,
    destroyed: AtomicBool,
}

impl<K: GeometryKind> UpdaterShared<K> {
    fn new(entity: EntityHandle, scene: SceneContext) -> Self {
        let shared = Self {
            entity,
            scene,
            classification: RwLock::new(Arc::new(Classification::disabled())),
            geometry_changed: Event::new(),
            terrain_warning_logged: AtomicBool::new(false),
            destroyed: AtomicBool::new(false),
        };
        let initial = shared.reclassify();
        *shared.classification.write() = Arc::new(initial);
        shared
    }

    pub(crate) fn classification(&self) -> Arc<Classification<K>> {
        Arc::clone(&self.classification.read())
    }

    /// The owning updater stopped listening, so the snapshot is no longer kept current.
    pub(crate) fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Acquire)
    }

    fn reclassify(&self) -> Classification<K> {
        let next = {
            let entity = self.entity.read();
            classify::<K>(&entity, self.entity.id(), &self.scene)
        };
        if next.outline_suppressed_on_terrain
            && !self.terrain_warning_logged.swap(true, Ordering::Relaxed)
        {
            tracing::warn!(
                entity = %self.entity.id(),
                kind = K::NAME,
                "outline is not supported for geometry on terrain, ignoring it"
            );
        }
        next
    }

    fn on_entity_property_changed(&self, property: EntityProperty) {
        if !observes::<K>(property) {
            return;
        }

        let next = Arc::new(self.reclassify());
        let previous = std::mem::replace(&mut *self.classification.write(), Arc::clone(&next));

        let raise = if next.is_disabled() {
            !previous.is_disabled()
        } else if next.is_dynamic {
            !previous.is_dynamic
        } else {
            true
        };
        if raise {
            self.geometry_changed.raise(&GeometryChanged {
                entity: self.entity.id(),
                kind: K::NAME,
            });
        }
    }
}

/// Fill visibility at `time` for an already locked entity.
pub(crate) fn fill_visible<K: GeometryKind>(
    entity: &Entity,
    classification: &Classification<K>,
    time: &JulianDate,
) -> bool {
    classification.fill_enabled
        && K::graphics(entity).is_some_and(|graphics| {
            let style = graphics.style();
            entity.is_available(time)
                && entity.is_showing(time)
                && flag_at(style.show.as_ref(), time, true)
                && flag_at(style.fill.as_ref(), time, true)
        })
}

/// Outline visibility at `time` for an already locked entity.
pub(crate) fn outline_visible<K: GeometryKind>(
    entity: &Entity,
    classification: &Classification<K>,
    time: &JulianDate,
) -> bool {
    classification.outline_enabled
        && K::graphics(entity).is_some_and(|graphics| {
            let style = graphics.style();
            entity.is_available(time)
                && entity.is_showing(time)
                && flag_at(style.show.as_ref(), time, true)
                && flag_at(style.outline.as_ref(), time, false)
        })
}

/// Watches one entity and exposes how its geometry of kind `K` is drawn.
///
/// Static geometry is drawn from the instances returned by
/// [`create_fill_geometry_instance`](Self::create_fill_geometry_instance) and
/// [`create_outline_geometry_instance`](Self::create_outline_geometry_instance);
/// dynamic geometry through [`create_dynamic_updater`](Self::create_dynamic_updater).
#[derive(Debug)]
pub struct GeometryUpdater<K: GeometryKind> {
    shared: Arc<UpdaterShared<K>>,
    listener: ListenerId,
}

impl<K: GeometryKind> GeometryUpdater<K> {
    /// Classifies `entity` and subscribes to its changes.
    #[must_use]
    pub fn new(entity: EntityHandle, scene: SceneContext) -> Self {
        let shared = Arc::new(UpdaterShared::new(entity, scene));
        let weak = Arc::downgrade(&shared);
        let listener = shared.entity.definition_changed().add_listener(move |change| {
            if let Some(shared) = weak.upgrade() {
                shared.on_entity_property_changed(change.property);
            }
        });
        tracing::debug!(entity = %shared.entity.id(), kind = K::NAME, "geometry updater created");
        Self { shared, listener }
    }

    fn ensure_alive(&self) -> UpdaterResult<()> {
        if self.is_destroyed() {
            return Err(UpdaterError::Destroyed { kind: K::NAME });
        }
        Ok(())
    }

    /// Observed entity.
    #[inline]
    #[must_use]
    pub fn entity(&self) -> &EntityHandle {
        &self.shared.entity
    }

    /// Current snapshot of the derived attributes.
    #[must_use]
    pub fn classification(&self) -> Arc<Classification<K>> {
        self.shared.classification()
    }

    /// The geometry may be filled at some time.
    #[must_use]
    pub fn fill_enabled(&self) -> bool {
        self.classification().fill_enabled
    }

    /// The geometry may be outlined at some time.
    #[must_use]
    pub fn outline_enabled(&self) -> bool {
        self.classification().outline_enabled
    }

    /// Geometry must be rebuilt per frame.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.classification().is_dynamic
    }

    /// The fill is a closed volume.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.classification().is_closed
    }

    /// The fill is clamped to terrain.
    #[must_use]
    pub fn on_terrain(&self) -> bool {
        self.classification().on_terrain
    }

    /// Fill visibility never changes.
    #[must_use]
    pub fn has_constant_fill(&self) -> bool {
        self.classification().has_constant_fill
    }

    /// Outline visibility never changes.
    #[must_use]
    pub fn has_constant_outline(&self) -> bool {
        self.classification().has_constant_outline
    }

    /// Fill material.
    #[must_use]
    pub fn fill_material_property(&self) -> Option<MaterialRef> {
        self.classification().fill_material_property.clone()
    }

    /// Outline colour, only when outlined.
    #[must_use]
    pub fn outline_color_property(&self) -> Option<PropertyRef<Color>> {
        self.classification().outline_color_property.clone()
    }

    /// Constant outline width, 1.0 otherwise.
    #[must_use]
    pub fn outline_width(&self) -> f64 {
        self.classification().outline_width
    }

    /// Shadow mode.
    #[must_use]
    pub fn shadows_property(&self) -> Option<PropertyRef<ShadowMode>> {
        self.classification().shadows_property.clone()
    }

    /// Display distance range.
    #[must_use]
    pub fn distance_display_condition_property(
        &self,
    ) -> Option<PropertyRef<DistanceDisplayCondition>> {
        self.classification()
            .distance_display_condition_property
            .clone()
    }

    /// Event raised when the classification changes.
    #[inline]
    #[must_use]
    pub fn geometry_changed(&self) -> &Event<GeometryChanged> {
        &self.shared.geometry_changed
    }

    /// Fill visibility at `time`.
    ///
    /// # Errors
    ///
    /// [`UpdaterError::Destroyed`] after [`destroy`](Self::destroy).
    pub fn is_filled(&self, time: &JulianDate) -> UpdaterResult<bool> {
        self.ensure_alive()?;
        let classification = self.classification();
        let entity = self.shared.entity.read();
        Ok(fill_visible(&entity, &classification, time))
    }

    /// Outline visibility at `time`.
    ///
    /// # Errors
    ///
    /// [`UpdaterError::Destroyed`] after [`destroy`](Self::destroy).
    pub fn is_outline_visible(&self, time: &JulianDate) -> UpdaterResult<bool> {
        self.ensure_alive()?;
        let classification = self.classification();
        let entity = self.shared.entity.read();
        Ok(outline_visible(&entity, &classification, time))
    }

    /// Re-classifies after `property` changed on the entity.
    ///
    /// Normally driven by the entity's `definition_changed` event.
    ///
    /// # Errors
    ///
    /// [`UpdaterError::Destroyed`] after [`destroy`](Self::destroy).
    pub fn on_entity_property_changed(&self, property: EntityProperty) -> UpdaterResult<()> {
        self.ensure_alive()?;
        self.shared.on_entity_property_changed(property);
        Ok(())
    }

    /// Fill instance for static geometry, resolved at `time`.
    ///
    /// # Errors
    ///
    /// - [`UpdaterError::Destroyed`] after [`destroy`](Self::destroy)
    /// - [`UpdaterError::FillNotEnabled`] when the geometry is never filled
    /// - [`UpdaterError::UnresolvedShape`] when a mandatory shape value is
    ///   undefined at `time`
    pub fn create_fill_geometry_instance(&self, time: &JulianDate) -> UpdaterResult<GeometryInstance> {
        self.ensure_alive()?;
        let classification = self.classification();
        if !classification.fill_enabled {
            return Err(UpdaterError::FillNotEnabled { kind: K::NAME });
        }

        let entity = self.shared.entity.read();
        let graphics = K::graphics(&entity).ok_or(UpdaterError::UnresolvedShape { kind: K::NAME })?;
        let material = classification
            .fill_material_property
            .as_ref()
            .filter(|material| material.is_color());

        let context = OptionContext::at(
            self.shared.entity.id(),
            VertexFormat::for_fill(material.is_some()),
            *time,
            &self.shared.scene,
        );
        let options = K::options(&entity, graphics, &context);
        let geometry = K::fill_geometry(&options)
            .filter(|_| K::has_shape(&options))
            .ok_or(UpdaterError::UnresolvedShape { kind: K::NAME })?;

        let attributes = InstanceAttributes {
            show: ShowAttribute::new(fill_visible(&entity, &classification, time)),
            color: material.map(|material| {
                ColorAttribute::from_color(value_or(material.color_source(), time, Color::WHITE))
            }),
            distance_display_condition: display_condition(&classification, time),
        };

        Ok(GeometryInstance {
            id: self.shared.entity.id(),
            geometry: geometry.into(),
            model_matrix: K::model_matrix(&options),
            attributes,
        })
    }

    /// Outline instance for static geometry, resolved at `time`.
    ///
    /// # Errors
    ///
    /// - [`UpdaterError::Destroyed`] after [`destroy`](Self::destroy)
    /// - [`UpdaterError::OutlineNotEnabled`] when the geometry is never outlined
    /// - [`UpdaterError::UnresolvedShape`] when a mandatory shape value is
    ///   undefined at `time`
    pub fn create_outline_geometry_instance(
        &self,
        time: &JulianDate,
    ) -> UpdaterResult<GeometryInstance> {
        self.ensure_alive()?;
        let classification = self.classification();
        if !classification.outline_enabled {
            return Err(UpdaterError::OutlineNotEnabled { kind: K::NAME });
        }

        let entity = self.shared.entity.read();
        let graphics = K::graphics(&entity).ok_or(UpdaterError::UnresolvedShape { kind: K::NAME })?;
        let context = OptionContext::at(
            self.shared.entity.id(),
            VertexFormat::PositionOnly,
            *time,
            &self.shared.scene,
        );
        let options = K::options(&entity, graphics, &context);
        let geometry = K::outline_geometry(&options)
            .filter(|_| K::has_shape(&options))
            .ok_or(UpdaterError::UnresolvedShape { kind: K::NAME })?;

        let outline_color = value_or(
            classification.outline_color_property.as_ref(),
            time,
            Color::BLACK,
        );
        let attributes = InstanceAttributes {
            show: ShowAttribute::new(outline_visible(&entity, &classification, time)),
            color: Some(ColorAttribute::from_color(outline_color)),
            distance_display_condition: display_condition(&classification, time),
        };

        Ok(GeometryInstance {
            id: self.shared.entity.id(),
            geometry: geometry.into(),
            model_matrix: K::model_matrix(&options),
            attributes,
        })
    }

    /// Per-frame updater drawing into `primitives` and `ground_primitives`.
    ///
    /// # Errors
    ///
    /// - [`UpdaterError::Destroyed`] after [`destroy`](Self::destroy)
    /// - [`UpdaterError::NotDynamic`] for static geometry
    pub fn create_dynamic_updater(
        &self,
        primitives: SharedPrimitives,
        ground_primitives: SharedPrimitives,
    ) -> UpdaterResult<DynamicGeometryUpdater<K>> {
        self.ensure_alive()?;
        if !self.classification().is_dynamic {
            return Err(UpdaterError::NotDynamic { kind: K::NAME });
        }
        Ok(DynamicGeometryUpdater::new(
            Arc::clone(&self.shared),
            primitives,
            ground_primitives,
        ))
    }

    /// True after [`destroy`](Self::destroy).
    #[inline]
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.shared.is_destroyed()
    }

    /// Unsubscribes from the entity. Safe to call more than once.
    ///
    /// Dynamic updaters created from this one reject further updates.
    pub fn destroy(&self) {
        if self.shared.destroyed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.shared
            .entity
            .definition_changed()
            .remove_listener(self.listener);
        tracing::debug!(entity = %self.shared.entity.id(), kind = K::NAME, "geometry updater destroyed");
    }
}

impl<K: GeometryKind> Drop for GeometryUpdater<K> {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn display_condition<K: GeometryKind>(
    classification: &Classification<K>,
    time: &JulianDate,
) -> Option<DistanceDisplayConditionAttribute> {
    value_of(classification.distance_display_condition_property.as_ref(), time)
        .map(DistanceDisplayConditionAttribute::from_condition)
}
