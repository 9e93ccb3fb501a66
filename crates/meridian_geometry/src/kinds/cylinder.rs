//! Cylinders and truncated cones centred on the entity position.

use meridian_core::{
    value_of, value_or, BoundingSphere, Cartesian3, CylinderGraphics, Entity, EntityId,
    EntityProperty, Matrix4, Quaternion,
};

use super::{any_dynamic, entity_model_matrix, is_placement_dynamic};
use crate::geometry::{Bounded, VertexFormat};
use crate::updater::{DynamicGeometryUpdater, GeometryKind, GeometryUpdater, OptionContext};

/// Cylinder fill descriptor in the local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CylinderGeometry {
    /// Length along the local z axis
    pub length: f64,
    /// Radius at `+length / 2`
    pub top_radius: f64,
    /// Radius at `-length / 2`
    pub bottom_radius: f64,
    /// Edges around the perimeter
    pub slices: u32,
    /// Vertex attributes to generate
    pub vertex_format: VertexFormat,
}

impl Bounded for CylinderGeometry {
    fn bounding_sphere(&self) -> BoundingSphere {
        cylinder_sphere(self.length, self.top_radius, self.bottom_radius)
    }
}

/// Cylinder outline descriptor in the local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CylinderOutlineGeometry {
    /// Length along the local z axis
    pub length: f64,
    /// Radius at `+length / 2`
    pub top_radius: f64,
    /// Radius at `-length / 2`
    pub bottom_radius: f64,
    /// Edges around the perimeter
    pub slices: u32,
    /// Lines joining the two caps
    pub number_of_vertical_lines: u32,
}

impl Bounded for CylinderOutlineGeometry {
    fn bounding_sphere(&self) -> BoundingSphere {
        cylinder_sphere(self.length, self.top_radius, self.bottom_radius)
    }
}

fn cylinder_sphere(length: f64, top_radius: f64, bottom_radius: f64) -> BoundingSphere {
    let radius = top_radius.abs().max(bottom_radius.abs());
    BoundingSphere::new(Cartesian3::ZERO, (length * 0.5).hypot(radius))
}

/// Resolved cylinder options.
#[derive(Clone, Debug, PartialEq)]
pub struct CylinderOptions {
    /// Entity the options belong to
    pub id: EntityId,
    /// Fill vertex format
    pub vertex_format: VertexFormat,
    /// Centre
    pub position: Option<Cartesian3>,
    /// Orientation, east-north-up when `None`
    pub orientation: Option<Quaternion>,
    /// Length
    pub length: Option<f64>,
    /// Top radius
    pub top_radius: Option<f64>,
    /// Bottom radius
    pub bottom_radius: Option<f64>,
    /// Edges around the perimeter
    pub slices: u32,
    /// Outline vertical lines
    pub number_of_vertical_lines: u32,
}

impl CylinderOptions {
    fn dimensions(&self) -> Option<(f64, f64, f64)> {
        Some((self.length?, self.top_radius?, self.bottom_radius?))
    }
}

/// Cylinder geometry kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct CylinderKind;

impl GeometryKind for CylinderKind {
    const NAME: &'static str = "cylinder";
    const PROPERTY: EntityProperty = EntityProperty::Cylinder;

    type Graphics = CylinderGraphics;
    type Options = CylinderOptions;
    type FillGeometry = CylinderGeometry;
    type OutlineGeometry = CylinderOutlineGeometry;

    fn graphics(entity: &Entity) -> Option<&CylinderGraphics> {
        entity.cylinder.as_ref()
    }

    fn has_required_properties(entity: &Entity, graphics: &CylinderGraphics) -> bool {
        entity.position.is_some()
            && graphics.length.is_some()
            && graphics.top_radius.is_some()
            && graphics.bottom_radius.is_some()
    }

    fn is_shape_dynamic(entity: &Entity, graphics: &CylinderGraphics) -> bool {
        is_placement_dynamic(entity)
            || any_dynamic!(
                graphics.length.as_ref(),
                graphics.top_radius.as_ref(),
                graphics.bottom_radius.as_ref(),
                graphics.slices.as_ref(),
                graphics.number_of_vertical_lines.as_ref(),
            )
    }

    fn options(
        entity: &Entity,
        graphics: &CylinderGraphics,
        context: &OptionContext<'_>,
    ) -> CylinderOptions {
        let time = context.time();
        let config = context.scene.config();
        CylinderOptions {
            id: context.id,
            vertex_format: context.vertex_format,
            position: value_of(entity.position.as_ref(), &time),
            orientation: value_of(entity.orientation.as_ref(), &time),
            length: value_of(graphics.length.as_ref(), &time),
            top_radius: value_of(graphics.top_radius.as_ref(), &time),
            bottom_radius: value_of(graphics.bottom_radius.as_ref(), &time),
            slices: value_or(graphics.slices.as_ref(), &time, config.default_slices),
            number_of_vertical_lines: value_or(
                graphics.number_of_vertical_lines.as_ref(),
                &time,
                config.default_vertical_lines,
            ),
        }
    }

    fn has_shape(options: &CylinderOptions) -> bool {
        options.position.is_some() && options.dimensions().is_some()
    }

    fn is_closed(_options: &CylinderOptions) -> bool {
        true
    }

    fn fill_geometry(options: &CylinderOptions) -> Option<CylinderGeometry> {
        let (length, top_radius, bottom_radius) = options.dimensions()?;
        Some(CylinderGeometry {
            length,
            top_radius,
            bottom_radius,
            slices: options.slices,
            vertex_format: options.vertex_format,
        })
    }

    fn outline_geometry(options: &CylinderOptions) -> Option<CylinderOutlineGeometry> {
        let (length, top_radius, bottom_radius) = options.dimensions()?;
        Some(CylinderOutlineGeometry {
            length,
            top_radius,
            bottom_radius,
            slices: options.slices,
            number_of_vertical_lines: options.number_of_vertical_lines,
        })
    }

    fn model_matrix(options: &CylinderOptions) -> Option<Matrix4> {
        options
            .position
            .map(|position| entity_model_matrix(position, options.orientation))
    }
}

/// Updater for cylinder geometry.
pub type CylinderGeometryUpdater = GeometryUpdater<CylinderKind>;

/// Per-frame updater for time-varying cylinders.
pub type DynamicCylinderGeometryUpdater = DynamicGeometryUpdater<CylinderKind>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SceneConfig, SceneContext};
    use approx::assert_relative_eq;
    use meridian_core::constant;

    #[test]
    fn test_sphere_covers_wider_cap() {
        let geometry = CylinderGeometry {
            length: 6.0,
            top_radius: 4.0,
            bottom_radius: 1.0,
            slices: 16,
            vertex_format: VertexFormat::PositionAndNormal,
        };
        assert_relative_eq!(geometry.bounding_sphere().radius, 5.0);
    }

    #[test]
    fn test_slices_default_to_scene_config() {
        let scene = SceneContext::new(SceneConfig {
            default_slices: 24,
            default_vertical_lines: 4,
            ..SceneConfig::default()
        });
        let graphics = CylinderGraphics {
            length: Some(constant(10.0)),
            top_radius: Some(constant(1.0)),
            bottom_radius: Some(constant(2.0)),
            ..CylinderGraphics::default()
        };
        let context =
            OptionContext::constant(EntityId::next(), VertexFormat::PositionAndNormal, &scene);
        let options = CylinderKind::options(&Entity::new(), &graphics, &context);
        assert_eq!(options.slices, 24);
        assert_eq!(options.number_of_vertical_lines, 4);
        assert!(!CylinderKind::has_shape(&options));

        let outline = CylinderKind::outline_geometry(&options);
        assert_eq!(outline.map(|outline| outline.number_of_vertical_lines), Some(4));
    }
}
