//! # Geometry Updaters
//!
//! The per-entity, per-kind controllers.
//!
//! ## Architecture
//!
//! - [`GeometryKind`]: small strategy per geometry kind (which properties
//!   shape it, how options are resolved, whether the result is closed)
//! - [`classify`]: pure function from an entity definition to an immutable
//!   [`Classification`] snapshot
//! - [`GeometryUpdater`]: owns the current snapshot, re-classifies on entity
//!   changes, raises `geometry_changed`, builds static instances
//! - [`DynamicGeometryUpdater`]: rebuilds primitives every frame for
//!   geometry whose shape varies with time
//!
//! ## Static vs dynamic
//!
//! ```text
//! definition changed ──► classify ──► is_dynamic?
//!                                       │ no  ─► create_fill/outline_geometry_instance(t)
//!                                       │ yes ─► create_dynamic_updater ─► update(t) each frame
//! ```

mod classification;
mod dynamic;
mod geometry_updater;

pub use classification::{classify, Classification};
pub use dynamic::{BoundingSphereState, DynamicGeometryUpdater};
pub use geometry_updater::{GeometryChanged, GeometryUpdater};

use std::fmt;

use meridian_core::{
    Entity, EntityId, EntityProperty, GeometryGraphics, JulianDate, Matrix4, PropertyRef,
};

use crate::geometry::{Geometry, VertexFormat};
use crate::scene::SceneContext;

/// How option builders resolve properties.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolve {
    /// Sample every property at one time.
    At(JulianDate),
    /// Sample assuming every property is constant.
    Constant,
}

impl Resolve {
    /// Time at which properties are sampled.
    #[inline]
    #[must_use]
    pub fn time(&self) -> JulianDate {
        match self {
            Self::At(time) => *time,
            Self::Constant => JulianDate::MINIMUM,
        }
    }
}

/// Inputs shared by every option builder.
#[derive(Clone, Copy, Debug)]
pub struct OptionContext<'a> {
    /// Entity the options are built for
    pub id: EntityId,
    /// Vertex format of the fill
    pub vertex_format: VertexFormat,
    /// Sampling mode
    pub resolve: Resolve,
    /// Scene defaults
    pub scene: &'a SceneContext,
}

impl<'a> OptionContext<'a> {
    /// Context sampling at `time`.
    #[must_use]
    pub const fn at(
        id: EntityId,
        vertex_format: VertexFormat,
        time: JulianDate,
        scene: &'a SceneContext,
    ) -> Self {
        Self {
            id,
            vertex_format,
            resolve: Resolve::At(time),
            scene,
        }
    }

    /// Context sampling constant values.
    #[must_use]
    pub const fn constant(id: EntityId, vertex_format: VertexFormat, scene: &'a SceneContext) -> Self {
        Self {
            id,
            vertex_format,
            resolve: Resolve::Constant,
            scene,
        }
    }

    /// Time at which properties are sampled.
    #[inline]
    #[must_use]
    pub fn time(&self) -> JulianDate {
        self.resolve.time()
    }
}

/// Per-kind strategy plugged into the generic updaters.
pub trait GeometryKind: fmt::Debug + Send + Sync + 'static {
    /// Kind name used in errors and logs.
    const NAME: &'static str;

    /// Entity field holding the description.
    const PROPERTY: EntityProperty;

    /// Geometry description type.
    type Graphics: GeometryGraphics;

    /// Resolved options record.
    type Options: Clone + fmt::Debug + Send + Sync;

    /// Fill descriptor.
    type FillGeometry: Into<Geometry>;

    /// Outline descriptor.
    type OutlineGeometry: Into<Geometry>;

    /// Description of this kind on `entity`.
    fn graphics(entity: &Entity) -> Option<&Self::Graphics>;

    /// True when every mandatory shape property is defined.
    fn has_required_properties(entity: &Entity, graphics: &Self::Graphics) -> bool;

    /// True when any shape-affecting property varies with time.
    fn is_shape_dynamic(entity: &Entity, graphics: &Self::Graphics) -> bool;

    /// Kind-specific part of the on-terrain predicate.
    fn is_on_terrain(_graphics: &Self::Graphics) -> bool {
        false
    }

    /// Resolves the options record.
    fn options(entity: &Entity, graphics: &Self::Graphics, context: &OptionContext<'_>) -> Self::Options;

    /// True when the mandatory shape values resolved.
    fn has_shape(options: &Self::Options) -> bool;

    /// True when the fill geometry is a closed volume.
    fn is_closed(options: &Self::Options) -> bool;

    /// Fill descriptor, `None` when the shape did not resolve.
    fn fill_geometry(options: &Self::Options) -> Option<Self::FillGeometry>;

    /// Outline descriptor, `None` when the shape did not resolve.
    fn outline_geometry(options: &Self::Options) -> Option<Self::OutlineGeometry>;

    /// Local-to-world transform for positioned kinds.
    fn model_matrix(_options: &Self::Options) -> Option<Matrix4> {
        None
    }
}

/// Entity fields whose change triggers re-classification of kind `K`.
#[must_use]
pub fn observed_properties<K: GeometryKind>() -> [EntityProperty; 4] {
    [
        EntityProperty::Availability,
        EntityProperty::Position,
        EntityProperty::Orientation,
        K::PROPERTY,
    ]
}

fn observes<K: GeometryKind>(property: EntityProperty) -> bool {
    observed_properties::<K>().contains(&property)
}

/// Boolean flag at `time`: `when_absent` if the property is absent, false if
/// it resolves to undefined.
pub(crate) fn flag_at(property: Option<&PropertyRef<bool>>, time: &JulianDate, when_absent: bool) -> bool {
    property.map_or(when_absent, |property| property.value(time).unwrap_or(false))
}

/// Boolean flag assuming a constant property; time-varying counts as true.
pub(crate) fn may_be_true(property: Option<&PropertyRef<bool>>, when_absent: bool) -> bool {
    property.map_or(when_absent, |property| {
        !property.is_constant() || property.value(&JulianDate::MINIMUM).unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::{constant, DynamicProperty};
    use std::sync::Arc;

    #[test]
    fn test_flag_semantics() {
        let now = JulianDate::now();
        assert!(flag_at(None, &now, true));
        assert!(!flag_at(None, &now, false));
        let undefined: PropertyRef<bool> = meridian_core::undefined();
        assert!(!flag_at(Some(&undefined), &now, true));
        assert!(flag_at(Some(&constant(true)), &now, false));
    }

    #[test]
    fn test_may_be_true() {
        let varying: PropertyRef<bool> = Arc::new(DynamicProperty::new(Some(false)));
        assert!(may_be_true(Some(&varying), false));
        assert!(!may_be_true(Some(&constant(false)), true));
        assert!(may_be_true(None, true));
    }

    #[test]
    fn test_constant_resolve_uses_minimum() {
        assert_eq!(Resolve::Constant.time(), JulianDate::MINIMUM);
        let now = JulianDate::now();
        assert_eq!(Resolve::At(now).time(), now);
    }
}
