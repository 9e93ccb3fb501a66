//! # MERIDIAN Core
//!
//! The data model that geometry updaters observe.
//!
//! ## Modules
//!
//! - [`time`] - Julian dates and interval collections
//! - [`math`] - Vectors, colours, rectangles, ellipsoid
//! - [`property`] - Time-varying properties
//! - [`material`] - Fill materials
//! - [`event`] - Synchronous listener lists
//! - [`graphics`] - Per-kind geometry descriptions
//! - [`entity`] - Entities and shared entity handles
//!
//! ## Example
//!
//! ```rust
//! use meridian_core::{constant, BoxGraphics, Cartesian3, Entity, EntityHandle, EntityProperty};
//!
//! let mut entity = Entity::new();
//! entity.position = Some(constant(Cartesian3::from_degrees(0.0, 0.0, 0.0)));
//! entity.r#box = Some(BoxGraphics {
//!     dimensions: Some(constant(Cartesian3::new(1.0, 2.0, 3.0))),
//!     ..BoxGraphics::default()
//! });
//!
//! let handle = EntityHandle::new(entity);
//! handle.modify(EntityProperty::Show, |entity| entity.show = Some(constant(false)));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod entity;
pub mod event;
pub mod graphics;
pub mod material;
pub mod math;
pub mod property;
pub mod time;

pub use entity::{DefinitionChanged, Entity, EntityHandle, EntityId, EntityProperty};
pub use event::{Event, ListenerId};
pub use graphics::{
    BoxGraphics, CylinderGraphics, GeometryGraphics, GraphicsStyle, PlaneGraphics,
    PolygonGraphics, PolylineVolumeGraphics, RectangleGraphics,
};
pub use material::{MaterialProperty, MaterialRef, MaterialValue, StripeOrientation};
pub use math::{
    BoundingSphere, Cartesian2, Cartesian3, Cartographic, Color, CornerType,
    DistanceDisplayCondition, Ellipsoid, Matrix4, Plane, PolygonHierarchy, Quaternion, Rectangle,
    ShadowMode,
};
pub use property::{
    constant, dynamic, is_constant, undefined, value_of, value_or, CallbackProperty, CompositeProperty,
    ConstantProperty, DynamicProperty, Interpolate, Property, PropertyRef, PropertyValue,
    SampledProperty, TimeIntervalCollectionProperty,
};
pub use time::{JulianDate, TimeInterval, TimeIntervalCollection};
