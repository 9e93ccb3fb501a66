//! Geographic rectangles on, above, or extruded from the ellipsoid.

use meridian_core::{
    value_of, value_or, BoundingSphere, Cartesian3, Ellipsoid, Entity, EntityId, EntityProperty,
    Rectangle, RectangleGraphics,
};

use super::any_dynamic;
use crate::geometry::{Bounded, VertexFormat};
use crate::updater::{DynamicGeometryUpdater, GeometryKind, GeometryUpdater, OptionContext};

/// Rectangle fill descriptor in Earth-fixed coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectangleGeometry {
    /// Extent in radians
    pub rectangle: Rectangle,
    /// Height above the ellipsoid
    pub height: Option<f64>,
    /// Height of the extruded face
    pub extruded_height: Option<f64>,
    /// Angular distance between points in radians
    pub granularity: f64,
    /// Texture rotation in radians
    pub st_rotation: f64,
    /// Rotation of the rectangle in radians
    pub rotation: f64,
    /// Top cap of an extruded rectangle
    pub close_top: bool,
    /// Bottom cap of an extruded rectangle
    pub close_bottom: bool,
    /// Vertex attributes to generate
    pub vertex_format: VertexFormat,
}

impl Bounded for RectangleGeometry {
    fn bounding_sphere(&self) -> BoundingSphere {
        rectangle_sphere(&self.rectangle, self.height, self.extruded_height)
    }
}

/// Rectangle outline descriptor in Earth-fixed coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectangleOutlineGeometry {
    /// Extent in radians
    pub rectangle: Rectangle,
    /// Height above the ellipsoid
    pub height: Option<f64>,
    /// Height of the extruded face
    pub extruded_height: Option<f64>,
    /// Angular distance between points in radians
    pub granularity: f64,
    /// Rotation of the rectangle in radians
    pub rotation: f64,
}

impl Bounded for RectangleOutlineGeometry {
    fn bounding_sphere(&self) -> BoundingSphere {
        rectangle_sphere(&self.rectangle, self.height, self.extruded_height)
    }
}

fn rectangle_sphere(
    rectangle: &Rectangle,
    height: Option<f64>,
    extruded_height: Option<f64>,
) -> BoundingSphere {
    let base = height.unwrap_or(0.0);
    let points: Vec<Cartesian3> = [Some(base), extruded_height]
        .into_iter()
        .flatten()
        .flat_map(|height| rectangle.sample_points(height))
        .map(|cartographic| Ellipsoid::WGS84.cartographic_to_cartesian(&cartographic))
        .collect();
    BoundingSphere::from_points(&points)
}

/// Resolved rectangle options.
#[derive(Clone, Debug, PartialEq)]
pub struct RectangleOptions {
    /// Entity the options belong to
    pub id: EntityId,
    /// Fill vertex format
    pub vertex_format: VertexFormat,
    /// Extent in radians
    pub rectangle: Option<Rectangle>,
    /// Height above the ellipsoid
    pub height: Option<f64>,
    /// Height of the extruded face
    pub extruded_height: Option<f64>,
    /// Angular distance between points in radians
    pub granularity: f64,
    /// Texture rotation in radians
    pub st_rotation: f64,
    /// Rotation of the rectangle in radians
    pub rotation: f64,
    /// Top cap of an extruded rectangle
    pub close_top: bool,
    /// Bottom cap of an extruded rectangle
    pub close_bottom: bool,
}

impl RectangleOptions {
    /// True when the extruded face sits at a different height than the base.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_extruded(&self) -> bool {
        self.extruded_height
            .is_some_and(|extruded| extruded != self.height.unwrap_or(0.0))
    }
}

/// Rectangle geometry kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct RectangleKind;

impl GeometryKind for RectangleKind {
    const NAME: &'static str = "rectangle";
    const PROPERTY: EntityProperty = EntityProperty::Rectangle;

    type Graphics = RectangleGraphics;
    type Options = RectangleOptions;
    type FillGeometry = RectangleGeometry;
    type OutlineGeometry = RectangleOutlineGeometry;

    fn graphics(entity: &Entity) -> Option<&RectangleGraphics> {
        entity.rectangle.as_ref()
    }

    fn has_required_properties(_entity: &Entity, graphics: &RectangleGraphics) -> bool {
        graphics.coordinates.is_some()
    }

    fn is_shape_dynamic(_entity: &Entity, graphics: &RectangleGraphics) -> bool {
        any_dynamic!(
            graphics.coordinates.as_ref(),
            graphics.height.as_ref(),
            graphics.extruded_height.as_ref(),
            graphics.granularity.as_ref(),
            graphics.st_rotation.as_ref(),
            graphics.rotation.as_ref(),
            graphics.close_top.as_ref(),
            graphics.close_bottom.as_ref(),
        )
    }

    fn is_on_terrain(graphics: &RectangleGraphics) -> bool {
        graphics.height.is_none() && graphics.extruded_height.is_none()
    }

    fn options(
        _entity: &Entity,
        graphics: &RectangleGraphics,
        context: &OptionContext<'_>,
    ) -> RectangleOptions {
        let time = context.time();
        RectangleOptions {
            id: context.id,
            vertex_format: context.vertex_format,
            rectangle: value_of(graphics.coordinates.as_ref(), &time),
            height: value_of(graphics.height.as_ref(), &time),
            extruded_height: value_of(graphics.extruded_height.as_ref(), &time),
            granularity: value_or(
                graphics.granularity.as_ref(),
                &time,
                context.scene.config().default_granularity,
            ),
            st_rotation: value_or(graphics.st_rotation.as_ref(), &time, 0.0),
            rotation: value_or(graphics.rotation.as_ref(), &time, 0.0),
            close_top: value_or(graphics.close_top.as_ref(), &time, true),
            close_bottom: value_or(graphics.close_bottom.as_ref(), &time, true),
        }
    }

    fn has_shape(options: &RectangleOptions) -> bool {
        options.rectangle.is_some()
    }

    fn is_closed(options: &RectangleOptions) -> bool {
        options.is_extruded() && options.close_top && options.close_bottom
    }

    fn fill_geometry(options: &RectangleOptions) -> Option<RectangleGeometry> {
        Some(RectangleGeometry {
            rectangle: options.rectangle?,
            height: options.height,
            extruded_height: options.extruded_height,
            granularity: options.granularity,
            st_rotation: options.st_rotation,
            rotation: options.rotation,
            close_top: options.close_top,
            close_bottom: options.close_bottom,
            vertex_format: options.vertex_format,
        })
    }

    fn outline_geometry(options: &RectangleOptions) -> Option<RectangleOutlineGeometry> {
        Some(RectangleOutlineGeometry {
            rectangle: options.rectangle?,
            height: options.height,
            extruded_height: options.extruded_height,
            granularity: options.granularity,
            rotation: options.rotation,
        })
    }
}

/// Updater for rectangle geometry.
pub type RectangleGeometryUpdater = GeometryUpdater<RectangleKind>;

/// Per-frame updater for time-varying rectangles.
pub type DynamicRectangleGeometryUpdater = DynamicGeometryUpdater<RectangleKind>;
