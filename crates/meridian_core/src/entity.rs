//! # Entities
//!
//! An [`Entity`] is a bag of optional time-varying properties plus at most one
//! geometry description per kind. It is shared through an [`EntityHandle`],
//! which owns the entity state and its definition-changed event.
//!
//! ## Change notification
//!
//! Mutations go through [`EntityHandle::modify`], which releases the write
//! lock before raising, so listeners are free to read the entity.
//! Mutating a property in place (for example [`crate::DynamicProperty::set_value`])
//! requires an explicit [`EntityHandle::notify`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::event::Event;
use crate::graphics::{
    BoxGraphics, CylinderGraphics, PlaneGraphics, PolygonGraphics, PolylineVolumeGraphics,
    RectangleGraphics,
};
use crate::math::{Cartesian3, Quaternion};
use crate::property::{value_or, PropertyRef};
use crate::time::{JulianDate, TimeIntervalCollection};

/// Unique entity identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

impl EntityId {
    /// Allocates a fresh identifier.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Entity fields whose replacement is reported through `definition_changed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityProperty {
    /// Display name
    Name,
    /// Entity visibility
    Show,
    /// Position
    Position,
    /// Orientation
    Orientation,
    /// Suggested camera offset
    ViewFrom,
    /// Availability intervals
    Availability,
    /// Box description
    Box,
    /// Cylinder description
    Cylinder,
    /// Plane description
    Plane,
    /// Polygon description
    Polygon,
    /// Rectangle description
    Rectangle,
    /// Polyline volume description
    PolylineVolume,
}

impl EntityProperty {
    /// Property name as used in documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Show => "show",
            Self::Position => "position",
            Self::Orientation => "orientation",
            Self::ViewFrom => "viewFrom",
            Self::Availability => "availability",
            Self::Box => "box",
            Self::Cylinder => "cylinder",
            Self::Plane => "plane",
            Self::Polygon => "polygon",
            Self::Rectangle => "rectangle",
            Self::PolylineVolume => "polylineVolume",
        }
    }
}

impl fmt::Display for EntityProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of `definition_changed`.
///
/// Carries no old or new value. Fields hold differently typed properties, so
/// listeners read the current value through [`EntityHandle::read`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefinitionChanged {
    /// Entity that changed
    pub entity: EntityId,
    /// Field that changed
    pub property: EntityProperty,
}

/// Time-aware bag of graphical properties.
#[derive(Clone, Debug, Default)]
pub struct Entity {
    /// Display name
    pub name: Option<String>,
    /// Visibility, true when absent
    pub show: Option<PropertyRef<bool>>,
    /// Earth-fixed position
    pub position: Option<PropertyRef<Cartesian3>>,
    /// Orientation, east-north-up when absent
    pub orientation: Option<PropertyRef<Quaternion>>,
    /// Suggested camera offset
    pub view_from: Option<PropertyRef<Cartesian3>>,
    /// Times at which the entity exists, always when absent
    pub availability: Option<TimeIntervalCollection>,
    /// Box description
    pub r#box: Option<BoxGraphics>,
    /// Cylinder description
    pub cylinder: Option<CylinderGraphics>,
    /// Plane description
    pub plane: Option<PlaneGraphics>,
    /// Polygon description
    pub polygon: Option<PolygonGraphics>,
    /// Rectangle description
    pub rectangle: Option<RectangleGraphics>,
    /// Polyline volume description
    pub polyline_volume: Option<PolylineVolumeGraphics>,
}

impl Entity {
    /// Creates an empty entity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `time` falls within the availability.
    #[must_use]
    pub fn is_available(&self, time: &JulianDate) -> bool {
        self.availability
            .as_ref()
            .map_or(true, |availability| availability.contains(time))
    }

    /// Entity-level visibility at `time`.
    #[must_use]
    pub fn is_showing(&self, time: &JulianDate) -> bool {
        value_or(self.show.as_ref(), time, true)
    }
}

#[derive(Debug)]
struct EntityCell {
    id: EntityId,
    state: RwLock<Entity>,
    definition_changed: Event<DefinitionChanged>,
}

/// Shared handle to an entity and its change notifications.
#[derive(Clone, Debug)]
pub struct EntityHandle {
    inner: Arc<EntityCell>,
}

impl EntityHandle {
    /// Takes ownership of `entity` under a fresh id.
    #[must_use]
    pub fn new(entity: Entity) -> Self {
        Self {
            inner: Arc::new(EntityCell {
                id: EntityId::next(),
                state: RwLock::new(entity),
                definition_changed: Event::new(),
            }),
        }
    }

    /// Entity id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.inner.id
    }

    /// Read access to the current definition.
    pub fn read(&self) -> RwLockReadGuard<'_, Entity> {
        self.inner.state.read()
    }

    /// Mutates the definition, then reports `property` as changed.
    pub fn modify<R>(&self, property: EntityProperty, f: impl FnOnce(&mut Entity) -> R) -> R {
        let result = {
            let mut state = self.inner.state.write();
            f(&mut state)
        };
        self.notify(property);
        result
    }

    /// Reports `property` as changed without touching the definition.
    pub fn notify(&self, property: EntityProperty) {
        self.inner.definition_changed.raise(&DefinitionChanged {
            entity: self.inner.id,
            property,
        });
    }

    /// Event raised after every reported change.
    #[must_use]
    pub fn definition_changed(&self) -> &Event<DefinitionChanged> {
        &self.inner.definition_changed
    }

    /// True when both handles refer to the same entity.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::constant;
    use crate::time::TimeInterval;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_availability_and_show_defaults() {
        let mut entity = Entity::new();
        let now = JulianDate::now();
        assert!(entity.is_available(&now));
        assert!(entity.is_showing(&now));

        entity.availability = Some(TimeIntervalCollection::new());
        assert!(!entity.is_available(&now));

        entity.availability = Some(TimeIntervalCollection::from_intervals([TimeInterval::new(
            now.add_seconds(-1.0),
            now.add_seconds(1.0),
            (),
        )]));
        assert!(entity.is_available(&now));

        entity.show = Some(constant(false));
        assert!(!entity.is_showing(&now));
    }

    #[test]
    fn test_modify_notifies_after_releasing_lock() {
        let handle = EntityHandle::new(Entity::new());
        let observed = Arc::new(AtomicUsize::new(0));
        let reader = handle.clone();
        let counter = Arc::clone(&observed);
        handle.definition_changed().add_listener(move |change| {
            assert_eq!(change.entity, reader.id());
            assert_eq!(change.property, EntityProperty::Name);
            if reader.read().name.is_some() {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        handle.modify(EntityProperty::Name, |entity| {
            entity.name = Some("tower".to_owned());
        });
        assert_eq!(observed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = EntityHandle::new(Entity::new());
        let b = EntityHandle::new(Entity::new());
        assert_ne!(a.id(), b.id());
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
    }
}
