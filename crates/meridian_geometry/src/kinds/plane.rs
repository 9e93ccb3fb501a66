//! Flat rectangles in a plane through the entity position.

use meridian_core::{
    value_of, BoundingSphere, Cartesian2, Cartesian3, Entity, EntityId, EntityProperty, Matrix4,
    Plane, PlaneGraphics, Quaternion,
};

use super::{any_dynamic, entity_model_matrix, is_placement_dynamic};
use crate::geometry::{Bounded, VertexFormat};
use crate::updater::{DynamicGeometryUpdater, GeometryKind, GeometryUpdater, OptionContext};

/// Plane fill descriptor in the local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneGeometry {
    /// Plane containing the rectangle
    pub plane: Plane,
    /// Width and height
    pub dimensions: Cartesian2,
    /// Vertex attributes to generate
    pub vertex_format: VertexFormat,
}

impl Bounded for PlaneGeometry {
    fn bounding_sphere(&self) -> BoundingSphere {
        plane_sphere(&self.plane, self.dimensions)
    }
}

/// Plane outline descriptor in the local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneOutlineGeometry {
    /// Plane containing the rectangle
    pub plane: Plane,
    /// Width and height
    pub dimensions: Cartesian2,
}

impl Bounded for PlaneOutlineGeometry {
    fn bounding_sphere(&self) -> BoundingSphere {
        plane_sphere(&self.plane, self.dimensions)
    }
}

fn plane_sphere(plane: &Plane, dimensions: Cartesian2) -> BoundingSphere {
    BoundingSphere::new(plane.origin(), dimensions.magnitude() * 0.5)
}

/// Resolved plane options.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneOptions {
    /// Entity the options belong to
    pub id: EntityId,
    /// Fill vertex format
    pub vertex_format: VertexFormat,
    /// Local origin
    pub position: Option<Cartesian3>,
    /// Orientation, east-north-up when `None`
    pub orientation: Option<Quaternion>,
    /// Plane in the local frame
    pub plane: Option<Plane>,
    /// Width and height
    pub dimensions: Option<Cartesian2>,
}

/// Plane geometry kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaneKind;

impl GeometryKind for PlaneKind {
    const NAME: &'static str = "plane";
    const PROPERTY: EntityProperty = EntityProperty::Plane;

    type Graphics = PlaneGraphics;
    type Options = PlaneOptions;
    type FillGeometry = PlaneGeometry;
    type OutlineGeometry = PlaneOutlineGeometry;

    fn graphics(entity: &Entity) -> Option<&PlaneGraphics> {
        entity.plane.as_ref()
    }

    fn has_required_properties(entity: &Entity, graphics: &PlaneGraphics) -> bool {
        entity.position.is_some() && graphics.plane.is_some() && graphics.dimensions.is_some()
    }

    fn is_shape_dynamic(entity: &Entity, graphics: &PlaneGraphics) -> bool {
        is_placement_dynamic(entity)
            || any_dynamic!(graphics.plane.as_ref(), graphics.dimensions.as_ref())
    }

    fn options(entity: &Entity, graphics: &PlaneGraphics, context: &OptionContext<'_>) -> PlaneOptions {
        let time = context.time();
        PlaneOptions {
            id: context.id,
            vertex_format: context.vertex_format,
            position: value_of(entity.position.as_ref(), &time),
            orientation: value_of(entity.orientation.as_ref(), &time),
            plane: value_of(graphics.plane.as_ref(), &time),
            dimensions: value_of(graphics.dimensions.as_ref(), &time),
        }
    }

    fn has_shape(options: &PlaneOptions) -> bool {
        options.position.is_some() && options.plane.is_some() && options.dimensions.is_some()
    }

    fn is_closed(_options: &PlaneOptions) -> bool {
        false
    }

    fn fill_geometry(options: &PlaneOptions) -> Option<PlaneGeometry> {
        Some(PlaneGeometry {
            plane: options.plane?,
            dimensions: options.dimensions?,
            vertex_format: options.vertex_format,
        })
    }

    fn outline_geometry(options: &PlaneOptions) -> Option<PlaneOutlineGeometry> {
        Some(PlaneOutlineGeometry {
            plane: options.plane?,
            dimensions: options.dimensions?,
        })
    }

    fn model_matrix(options: &PlaneOptions) -> Option<Matrix4> {
        options
            .position
            .map(|position| entity_model_matrix(position, options.orientation))
    }
}

/// Updater for plane geometry.
pub type PlaneGeometryUpdater = GeometryUpdater<PlaneKind>;

/// Per-frame updater for time-varying planes.
pub type DynamicPlaneGeometryUpdater = DynamicGeometryUpdater<PlaneKind>;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_is_centred_on_plane_origin() {
        let geometry = PlaneOutlineGeometry {
            plane: Plane::new(Cartesian3::UNIT_Z, -2.0),
            dimensions: Cartesian2::new(6.0, 8.0),
        };
        let sphere = geometry.bounding_sphere();
        assert_eq!(sphere.center, Cartesian3::new(0.0, 0.0, 2.0));
        assert_relative_eq!(sphere.radius, 5.0);
    }

    #[test]
    fn test_plane_is_never_closed() {
        let options = PlaneOptions {
            id: EntityId::next(),
            vertex_format: VertexFormat::PositionAndNormal,
            position: Some(Cartesian3::from_degrees(0.0, 0.0, 0.0)),
            orientation: None,
            plane: Some(Plane::new(Cartesian3::UNIT_X, 0.0)),
            dimensions: Some(Cartesian2::new(1.0, 2.0)),
        };
        assert!(PlaneKind::has_shape(&options));
        assert!(!PlaneKind::is_closed(&options));
    }
}
