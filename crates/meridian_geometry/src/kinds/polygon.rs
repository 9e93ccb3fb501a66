//! Polygons on, above, or extruded from the ellipsoid.
//!
//! A polygon without `height`, `extruded_height` and per-position heights
//! and with a solid colour fill is drawn clamped to terrain when the scene
//! supports ground primitives.

use meridian_core::{
    value_of, value_or, BoundingSphere, Entity, EntityId, EntityProperty, JulianDate,
    PolygonGraphics, PolygonHierarchy,
};

use super::{any_dynamic, height_extent};
use crate::geometry::{Bounded, VertexFormat};
use crate::updater::{DynamicGeometryUpdater, GeometryKind, GeometryUpdater, OptionContext};

/// Polygon fill descriptor in Earth-fixed coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonGeometry {
    /// Outer ring and holes
    pub polygon_hierarchy: PolygonHierarchy,
    /// Height above the ellipsoid
    pub height: Option<f64>,
    /// Height of the extruded face
    pub extruded_height: Option<f64>,
    /// Use the height of each position
    pub per_position_height: bool,
    /// Angular distance between points in radians
    pub granularity: f64,
    /// Texture rotation in radians
    pub st_rotation: f64,
    /// Top cap of an extruded polygon
    pub close_top: bool,
    /// Bottom cap of an extruded polygon
    pub close_bottom: bool,
    /// Vertex attributes to generate
    pub vertex_format: VertexFormat,
}

impl Bounded for PolygonGeometry {
    fn bounding_sphere(&self) -> BoundingSphere {
        polygon_sphere(&self.polygon_hierarchy, self.height, self.extruded_height)
    }
}

/// Polygon outline descriptor in Earth-fixed coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonOutlineGeometry {
    /// Outer ring and holes
    pub polygon_hierarchy: PolygonHierarchy,
    /// Height above the ellipsoid
    pub height: Option<f64>,
    /// Height of the extruded face
    pub extruded_height: Option<f64>,
    /// Use the height of each position
    pub per_position_height: bool,
    /// Angular distance between points in radians
    pub granularity: f64,
}

impl Bounded for PolygonOutlineGeometry {
    fn bounding_sphere(&self) -> BoundingSphere {
        polygon_sphere(&self.polygon_hierarchy, self.height, self.extruded_height)
    }
}

fn polygon_sphere(
    hierarchy: &PolygonHierarchy,
    height: Option<f64>,
    extruded_height: Option<f64>,
) -> BoundingSphere {
    BoundingSphere::from_points(&hierarchy.positions).expanded(height_extent(height, extruded_height))
}

/// Resolved polygon options.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonOptions {
    /// Entity the options belong to
    pub id: EntityId,
    /// Fill vertex format
    pub vertex_format: VertexFormat,
    /// Outer ring and holes
    pub polygon_hierarchy: Option<PolygonHierarchy>,
    /// Height above the ellipsoid
    pub height: Option<f64>,
    /// Height of the extruded face
    pub extruded_height: Option<f64>,
    /// Angular distance between points in radians
    pub granularity: f64,
    /// Texture rotation in radians
    pub st_rotation: f64,
    /// Use the height of each position
    pub per_position_height: bool,
    /// Top cap of an extruded polygon
    pub close_top: bool,
    /// Bottom cap of an extruded polygon
    pub close_bottom: bool,
}

impl PolygonOptions {
    /// True when the extruded face sits at a different height than the base.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_extruded(&self) -> bool {
        self.extruded_height
            .is_some_and(|extruded| extruded != self.height.unwrap_or(0.0))
    }
}

/// Polygon geometry kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolygonKind;

impl GeometryKind for PolygonKind {
    const NAME: &'static str = "polygon";
    const PROPERTY: EntityProperty = EntityProperty::Polygon;

    type Graphics = PolygonGraphics;
    type Options = PolygonOptions;
    type FillGeometry = PolygonGeometry;
    type OutlineGeometry = PolygonOutlineGeometry;

    fn graphics(entity: &Entity) -> Option<&PolygonGraphics> {
        entity.polygon.as_ref()
    }

    fn has_required_properties(_entity: &Entity, graphics: &PolygonGraphics) -> bool {
        graphics.hierarchy.is_some()
    }

    fn is_shape_dynamic(_entity: &Entity, graphics: &PolygonGraphics) -> bool {
        any_dynamic!(
            graphics.hierarchy.as_ref(),
            graphics.height.as_ref(),
            graphics.extruded_height.as_ref(),
            graphics.granularity.as_ref(),
            graphics.st_rotation.as_ref(),
            graphics.per_position_height.as_ref(),
            graphics.close_top.as_ref(),
            graphics.close_bottom.as_ref(),
        )
    }

    fn is_on_terrain(graphics: &PolygonGraphics) -> bool {
        graphics.height.is_none()
            && graphics.extruded_height.is_none()
            && graphics
                .per_position_height
                .as_ref()
                .map_or(true, |per_position_height| {
                    per_position_height.is_constant()
                        && !per_position_height
                            .value(&JulianDate::MINIMUM)
                            .unwrap_or(false)
                })
    }

    fn options(
        _entity: &Entity,
        graphics: &PolygonGraphics,
        context: &OptionContext<'_>,
    ) -> PolygonOptions {
        let time = context.time();
        PolygonOptions {
            id: context.id,
            vertex_format: context.vertex_format,
            polygon_hierarchy: value_of(graphics.hierarchy.as_ref(), &time),
            height: value_of(graphics.height.as_ref(), &time),
            extruded_height: value_of(graphics.extruded_height.as_ref(), &time),
            granularity: value_or(
                graphics.granularity.as_ref(),
                &time,
                context.scene.config().default_granularity,
            ),
            st_rotation: value_or(graphics.st_rotation.as_ref(), &time, 0.0),
            per_position_height: value_or(graphics.per_position_height.as_ref(), &time, false),
            close_top: value_or(graphics.close_top.as_ref(), &time, true),
            close_bottom: value_or(graphics.close_bottom.as_ref(), &time, true),
        }
    }

    fn has_shape(options: &PolygonOptions) -> bool {
        options.polygon_hierarchy.is_some()
    }

    #[allow(clippy::float_cmp)]
    fn is_closed(options: &PolygonOptions) -> bool {
        let extruded = options.is_extruded();
        !options.per_position_height
            && ((!extruded && options.height.unwrap_or(0.0) == 0.0)
                || (extruded && options.close_top && options.close_bottom))
    }

    fn fill_geometry(options: &PolygonOptions) -> Option<PolygonGeometry> {
        Some(PolygonGeometry {
            polygon_hierarchy: options.polygon_hierarchy.clone()?,
            height: options.height,
            extruded_height: options.extruded_height,
            per_position_height: options.per_position_height,
            granularity: options.granularity,
            st_rotation: options.st_rotation,
            close_top: options.close_top,
            close_bottom: options.close_bottom,
            vertex_format: options.vertex_format,
        })
    }

    fn outline_geometry(options: &PolygonOptions) -> Option<PolygonOutlineGeometry> {
        Some(PolygonOutlineGeometry {
            polygon_hierarchy: options.polygon_hierarchy.clone()?,
            height: options.height,
            extruded_height: options.extruded_height,
            per_position_height: options.per_position_height,
            granularity: options.granularity,
        })
    }
}

/// Updater for polygon geometry.
pub type PolygonGeometryUpdater = GeometryUpdater<PolygonKind>;

/// Per-frame updater for time-varying polygons.
pub type DynamicPolygonGeometryUpdater = DynamicGeometryUpdater<PolygonKind>;
