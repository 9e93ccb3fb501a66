//! Boxes centred on the entity position.

use meridian_core::{
    value_of, BoundingSphere, BoxGraphics, Cartesian3, Entity, EntityId, EntityProperty, Matrix4,
    Quaternion,
};

use super::{any_dynamic, entity_model_matrix, is_placement_dynamic};
use crate::geometry::{Bounded, VertexFormat};
use crate::updater::{DynamicGeometryUpdater, GeometryKind, GeometryUpdater, OptionContext};

/// Box fill descriptor in the local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxGeometry {
    /// Minimum corner
    pub minimum: Cartesian3,
    /// Maximum corner
    pub maximum: Cartesian3,
    /// Vertex attributes to generate
    pub vertex_format: VertexFormat,
}

impl BoxGeometry {
    /// Box of `dimensions` centred on the origin.
    #[must_use]
    pub fn from_dimensions(dimensions: Cartesian3, vertex_format: VertexFormat) -> Self {
        let half = dimensions * 0.5;
        Self {
            minimum: -half,
            maximum: half,
            vertex_format,
        }
    }
}

impl Bounded for BoxGeometry {
    fn bounding_sphere(&self) -> BoundingSphere {
        box_sphere(self.minimum, self.maximum)
    }
}

/// Box outline descriptor in the local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxOutlineGeometry {
    /// Minimum corner
    pub minimum: Cartesian3,
    /// Maximum corner
    pub maximum: Cartesian3,
}

impl BoxOutlineGeometry {
    /// Outline of a box of `dimensions` centred on the origin.
    #[must_use]
    pub fn from_dimensions(dimensions: Cartesian3) -> Self {
        let half = dimensions * 0.5;
        Self {
            minimum: -half,
            maximum: half,
        }
    }
}

impl Bounded for BoxOutlineGeometry {
    fn bounding_sphere(&self) -> BoundingSphere {
        box_sphere(self.minimum, self.maximum)
    }
}

fn box_sphere(minimum: Cartesian3, maximum: Cartesian3) -> BoundingSphere {
    BoundingSphere::new(
        (minimum + maximum) * 0.5,
        maximum.distance(minimum) * 0.5,
    )
}

/// Resolved box options.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxOptions {
    /// Entity the options belong to
    pub id: EntityId,
    /// Fill vertex format
    pub vertex_format: VertexFormat,
    /// Centre
    pub position: Option<Cartesian3>,
    /// Orientation, east-north-up when `None`
    pub orientation: Option<Quaternion>,
    /// Length, width and height
    pub dimensions: Option<Cartesian3>,
}

/// Box geometry kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxKind;

impl GeometryKind for BoxKind {
    const NAME: &'static str = "box";
    const PROPERTY: EntityProperty = EntityProperty::Box;

    type Graphics = BoxGraphics;
    type Options = BoxOptions;
    type FillGeometry = BoxGeometry;
    type OutlineGeometry = BoxOutlineGeometry;

    fn graphics(entity: &Entity) -> Option<&BoxGraphics> {
        entity.r#box.as_ref()
    }

    fn has_required_properties(entity: &Entity, graphics: &BoxGraphics) -> bool {
        entity.position.is_some() && graphics.dimensions.is_some()
    }

    fn is_shape_dynamic(entity: &Entity, graphics: &BoxGraphics) -> bool {
        is_placement_dynamic(entity) || any_dynamic!(graphics.dimensions.as_ref())
    }

    fn options(entity: &Entity, graphics: &BoxGraphics, context: &OptionContext<'_>) -> BoxOptions {
        let time = context.time();
        BoxOptions {
            id: context.id,
            vertex_format: context.vertex_format,
            position: value_of(entity.position.as_ref(), &time),
            orientation: value_of(entity.orientation.as_ref(), &time),
            dimensions: value_of(graphics.dimensions.as_ref(), &time),
        }
    }

    fn has_shape(options: &BoxOptions) -> bool {
        options.position.is_some() && options.dimensions.is_some()
    }

    fn is_closed(_options: &BoxOptions) -> bool {
        true
    }

    fn fill_geometry(options: &BoxOptions) -> Option<BoxGeometry> {
        options
            .dimensions
            .map(|dimensions| BoxGeometry::from_dimensions(dimensions, options.vertex_format))
    }

    fn outline_geometry(options: &BoxOptions) -> Option<BoxOutlineGeometry> {
        options.dimensions.map(BoxOutlineGeometry::from_dimensions)
    }

    fn model_matrix(options: &BoxOptions) -> Option<Matrix4> {
        options
            .position
            .map(|position| entity_model_matrix(position, options.orientation))
    }
}

/// Updater for box geometry.
pub type BoxGeometryUpdater = GeometryUpdater<BoxKind>;

/// Per-frame updater for time-varying boxes.
pub type DynamicBoxGeometryUpdater = DynamicGeometryUpdater<BoxKind>;
