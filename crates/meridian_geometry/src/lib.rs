//! # MERIDIAN Geometry
//!
//! Decides how an entity's geometry is drawn and keeps the render
//! primitives of time-varying geometry up to date.
//!
//! ## Design Principles
//!
//! 1. **Classification is a snapshot** - recomputed from scratch on every
//!    relevant entity change and swapped in whole
//! 2. **One generic updater** - each geometry kind only supplies a small
//!    [`GeometryKind`] strategy
//! 3. **Exclusive ownership** - a dynamic updater removes only the primitives
//!    it inserted, never scans shared containers
//! 4. **Usage errors fail fast** - undefined property values never error, they
//!    simply hide the geometry
//!
//! ## Example
//!
//! ```rust
//! use meridian_core::{constant, BoxGraphics, Cartesian3, Entity, EntityHandle, JulianDate};
//! use meridian_geometry::{BoxGeometryUpdater, SceneContext};
//!
//! let mut entity = Entity::new();
//! entity.position = Some(constant(Cartesian3::from_degrees(0.0, 0.0, 0.0)));
//! entity.r#box = Some(BoxGraphics {
//!     dimensions: Some(constant(Cartesian3::new(1.0, 2.0, 3.0))),
//!     ..BoxGraphics::default()
//! });
//!
//! let updater = BoxGeometryUpdater::new(EntityHandle::new(entity), SceneContext::default());
//! assert!(updater.fill_enabled());
//! assert!(!updater.is_dynamic());
//!
//! let instance = updater.create_fill_geometry_instance(&JulianDate::now()).unwrap();
//! assert!(instance.attributes.show.is_shown());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod geometry;
pub mod instance;
pub mod kinds;
pub mod primitive;
pub mod scene;
pub mod updater;

pub use error::{ConfigError, ConfigResult, UpdaterError, UpdaterResult};
pub use geometry::{Bounded, Geometry, VertexFormat};
pub use instance::{
    ColorAttribute, DistanceDisplayConditionAttribute, GeometryInstance, InstanceAttributes,
    ShowAttribute,
};
pub use kinds::{
    BoxGeometryUpdater, BoxKind, CylinderGeometryUpdater, CylinderKind,
    DynamicBoxGeometryUpdater, DynamicCylinderGeometryUpdater, DynamicPlaneGeometryUpdater,
    DynamicPolygonGeometryUpdater, DynamicPolylineVolumeGeometryUpdater,
    DynamicRectangleGeometryUpdater, PlaneGeometryUpdater, PlaneKind, PolygonGeometryUpdater,
    PolygonKind, PolylineVolumeGeometryUpdater, PolylineVolumeKind, RectangleGeometryUpdater,
    RectangleKind,
};
pub use primitive::{
    Appearance, Primitive, PrimitiveCollection, PrimitiveId, PrimitiveKind, SharedPrimitives,
};
pub use scene::{SceneConfig, SceneContext};
pub use updater::{
    classify, BoundingSphereState, Classification, DynamicGeometryUpdater, GeometryChanged,
    GeometryKind, GeometryUpdater, OptionContext, Resolve,
};
