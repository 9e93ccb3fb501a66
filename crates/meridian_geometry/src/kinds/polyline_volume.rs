//! 2D shapes extruded along a polyline.

use meridian_core::{
    value_of, value_or, BoundingSphere, Cartesian2, Cartesian3, CornerType, Entity, EntityId,
    EntityProperty, PolylineVolumeGraphics,
};

use super::any_dynamic;
use crate::geometry::{Bounded, VertexFormat};
use crate::updater::{DynamicGeometryUpdater, GeometryKind, GeometryUpdater, OptionContext};

/// Polyline volume fill descriptor in Earth-fixed coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PolylineVolumeGeometry {
    /// Centre line
    pub polyline_positions: Vec<Cartesian3>,
    /// Cross-section in metres
    pub shape_positions: Vec<Cartesian2>,
    /// Angular distance between points in radians
    pub granularity: f64,
    /// Corner style
    pub corner_type: CornerType,
    /// Vertex attributes to generate
    pub vertex_format: VertexFormat,
}

impl Bounded for PolylineVolumeGeometry {
    fn bounding_sphere(&self) -> BoundingSphere {
        volume_sphere(&self.polyline_positions, &self.shape_positions)
    }
}

/// Polyline volume outline descriptor in Earth-fixed coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PolylineVolumeOutlineGeometry {
    /// Centre line
    pub polyline_positions: Vec<Cartesian3>,
    /// Cross-section in metres
    pub shape_positions: Vec<Cartesian2>,
    /// Angular distance between points in radians
    pub granularity: f64,
    /// Corner style
    pub corner_type: CornerType,
}

impl Bounded for PolylineVolumeOutlineGeometry {
    fn bounding_sphere(&self) -> BoundingSphere {
        volume_sphere(&self.polyline_positions, &self.shape_positions)
    }
}

fn volume_sphere(positions: &[Cartesian3], shape: &[Cartesian2]) -> BoundingSphere {
    let reach = shape
        .iter()
        .map(|point| point.magnitude())
        .fold(0.0, f64::max);
    BoundingSphere::from_points(positions).expanded(reach)
}

/// Resolved polyline volume options.
#[derive(Clone, Debug, PartialEq)]
pub struct PolylineVolumeOptions {
    /// Entity the options belong to
    pub id: EntityId,
    /// Fill vertex format
    pub vertex_format: VertexFormat,
    /// Centre line
    pub polyline_positions: Option<Vec<Cartesian3>>,
    /// Cross-section
    pub shape_positions: Option<Vec<Cartesian2>>,
    /// Angular distance between points in radians
    pub granularity: f64,
    /// Corner style
    pub corner_type: CornerType,
}

/// Polyline volume geometry kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolylineVolumeKind;

impl GeometryKind for PolylineVolumeKind {
    const NAME: &'static str = "polylineVolume";
    const PROPERTY: EntityProperty = EntityProperty::PolylineVolume;

    type Graphics = PolylineVolumeGraphics;
    type Options = PolylineVolumeOptions;
    type FillGeometry = PolylineVolumeGeometry;
    type OutlineGeometry = PolylineVolumeOutlineGeometry;

    fn graphics(entity: &Entity) -> Option<&PolylineVolumeGraphics> {
        entity.polyline_volume.as_ref()
    }

    fn has_required_properties(_entity: &Entity, graphics: &PolylineVolumeGraphics) -> bool {
        graphics.positions.is_some() && graphics.shape.is_some()
    }

    fn is_shape_dynamic(_entity: &Entity, graphics: &PolylineVolumeGraphics) -> bool {
        any_dynamic!(
            graphics.positions.as_ref(),
            graphics.shape.as_ref(),
            graphics.granularity.as_ref(),
            graphics.corner_type.as_ref(),
        )
    }

    fn options(
        _entity: &Entity,
        graphics: &PolylineVolumeGraphics,
        context: &OptionContext<'_>,
    ) -> PolylineVolumeOptions {
        let time = context.time();
        PolylineVolumeOptions {
            id: context.id,
            vertex_format: context.vertex_format,
            polyline_positions: value_of(graphics.positions.as_ref(), &time),
            shape_positions: value_of(graphics.shape.as_ref(), &time),
            granularity: value_or(
                graphics.granularity.as_ref(),
                &time,
                context.scene.config().default_granularity,
            ),
            corner_type: value_or(graphics.corner_type.as_ref(), &time, CornerType::default()),
        }
    }

    fn has_shape(options: &PolylineVolumeOptions) -> bool {
        options.polyline_positions.is_some() && options.shape_positions.is_some()
    }

    fn is_closed(_options: &PolylineVolumeOptions) -> bool {
        true
    }

    fn fill_geometry(options: &PolylineVolumeOptions) -> Option<PolylineVolumeGeometry> {
        Some(PolylineVolumeGeometry {
            polyline_positions: options.polyline_positions.clone()?,
            shape_positions: options.shape_positions.clone()?,
            granularity: options.granularity,
            corner_type: options.corner_type,
            vertex_format: options.vertex_format,
        })
    }

    fn outline_geometry(options: &PolylineVolumeOptions) -> Option<PolylineVolumeOutlineGeometry> {
        Some(PolylineVolumeOutlineGeometry {
            polyline_positions: options.polyline_positions.clone()?,
            shape_positions: options.shape_positions.clone()?,
            granularity: options.granularity,
            corner_type: options.corner_type,
        })
    }
}

/// Updater for polyline volume geometry.
pub type PolylineVolumeGeometryUpdater = GeometryUpdater<PolylineVolumeKind>;

/// Per-frame updater for time-varying polyline volumes.
pub type DynamicPolylineVolumeGeometryUpdater = DynamicGeometryUpdater<PolylineVolumeKind>;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_covers_cross_section() {
        let geometry = PolylineVolumeOutlineGeometry {
            polyline_positions: vec![Cartesian3::new(-10.0, 0.0, 0.0), Cartesian3::new(10.0, 0.0, 0.0)],
            shape_positions: vec![Cartesian2::new(3.0, 4.0), Cartesian2::new(-1.0, 0.0)],
            granularity: 0.01,
            corner_type: CornerType::Mitered,
        };
        let sphere = geometry.bounding_sphere();
        assert_eq!(sphere.center, Cartesian3::ZERO);
        assert_relative_eq!(sphere.radius, 15.0);
    }

    #[test]
    fn test_shape_needs_positions_and_cross_section() {
        let mut options = PolylineVolumeOptions {
            id: EntityId::next(),
            vertex_format: VertexFormat::PositionAndNormal,
            polyline_positions: Some(Cartesian3::from_degrees_array(&[0.0, 0.0, 1.0, 0.0])),
            shape_positions: None,
            granularity: 0.01,
            corner_type: CornerType::Rounded,
        };
        assert!(!PolylineVolumeKind::has_shape(&options));
        assert!(PolylineVolumeKind::fill_geometry(&options).is_none());

        options.shape_positions = Some(vec![Cartesian2::new(1.0, 1.0)]);
        assert!(PolylineVolumeKind::has_shape(&options));
        assert!(PolylineVolumeKind::is_closed(&options));
    }
}
