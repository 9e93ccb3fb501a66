//! # Geometry Kinds
//!
//! One [`GeometryKind`](crate::updater::GeometryKind) per supported shape,
//! each with its options record and fill/outline descriptors.
//!
//! | Kind            | Placement            | Closed                          |
//! |-----------------|----------------------|---------------------------------|
//! | Box             | entity position      | always                          |
//! | Cylinder        | entity position      | always                          |
//! | Plane           | entity position      | never                           |
//! | Polygon         | ellipsoid            | on ground, or extruded and capped |
//! | Rectangle       | ellipsoid            | extruded and capped             |
//! | Polyline volume | ellipsoid            | always                          |

/// True when any of the optional properties varies with time.
macro_rules! any_dynamic {
    ($first:expr $(, $rest:expr)* $(,)?) => {
        !meridian_core::is_constant($first) $(|| !meridian_core::is_constant($rest))*
    };
}

pub(crate) use any_dynamic;

pub mod box_geometry;
pub mod cylinder;
pub mod plane;
pub mod polygon;
pub mod polyline_volume;
pub mod rectangle;

pub use box_geometry::{
    BoxGeometry, BoxGeometryUpdater, BoxKind, BoxOptions, BoxOutlineGeometry,
    DynamicBoxGeometryUpdater,
};
pub use cylinder::{
    CylinderGeometry, CylinderGeometryUpdater, CylinderKind, CylinderOptions,
    CylinderOutlineGeometry, DynamicCylinderGeometryUpdater,
};
pub use plane::{
    DynamicPlaneGeometryUpdater, PlaneGeometry, PlaneGeometryUpdater, PlaneKind, PlaneOptions,
    PlaneOutlineGeometry,
};
pub use polygon::{
    DynamicPolygonGeometryUpdater, PolygonGeometry, PolygonGeometryUpdater, PolygonKind,
    PolygonOptions, PolygonOutlineGeometry,
};
pub use polyline_volume::{
    DynamicPolylineVolumeGeometryUpdater, PolylineVolumeGeometry, PolylineVolumeGeometryUpdater,
    PolylineVolumeKind, PolylineVolumeOptions, PolylineVolumeOutlineGeometry,
};
pub use rectangle::{
    DynamicRectangleGeometryUpdater, RectangleGeometry, RectangleGeometryUpdater, RectangleKind,
    RectangleOptions, RectangleOutlineGeometry,
};

use meridian_core::{Cartesian3, Ellipsoid, Entity, Matrix4, Quaternion};

/// Local frame of a positioned entity: its orientation when set, east-north-up otherwise.
pub(crate) fn entity_model_matrix(position: Cartesian3, orientation: Option<Quaternion>) -> Matrix4 {
    match orientation {
        Some(orientation) => Matrix4::from_rotation_translation(orientation, position),
        None => Ellipsoid::WGS84.east_north_up_to_fixed_frame(position),
    }
}

/// True when the entity's position or orientation varies with time.
pub(crate) fn is_placement_dynamic(entity: &Entity) -> bool {
    any_dynamic!(entity.position.as_ref(), entity.orientation.as_ref())
}

/// Sphere radius growth from an optional height pair.
pub(crate) fn height_extent(height: Option<f64>, extruded_height: Option<f64>) -> f64 {
    height
        .unwrap_or(0.0)
        .abs()
        .max(extruded_height.unwrap_or(0.0).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use meridian_core::{constant, DynamicProperty};
    use std::sync::Arc;

    #[test]
    fn test_model_matrix_uses_orientation_when_present() {
        let position = Cartesian3::from_degrees(10.0, 20.0, 0.0);
        let matrix = entity_model_matrix(position, Some(Quaternion::IDENTITY));
        assert_eq!(matrix.translation(), position);
        assert_relative_eq!(matrix.column(0).x, 1.0);

        let enu = entity_model_matrix(position, None);
        assert_eq!(enu.translation(), position);
        let up = enu.column(2);
        assert!(up.dot(position) > 0.0);
    }

    #[test]
    fn test_placement_dynamic() {
        let mut entity = Entity::new();
        assert!(!is_placement_dynamic(&entity));
        entity.position = Some(constant(Cartesian3::UNIT_X));
        assert!(!is_placement_dynamic(&entity));
        entity.orientation = Some(Arc::new(DynamicProperty::new(Some(Quaternion::IDENTITY))));
        assert!(is_placement_dynamic(&entity));
    }

    #[test]
    fn test_height_extent() {
        assert_relative_eq!(height_extent(None, None), 0.0);
        assert_relative_eq!(height_extent(Some(-30.0), Some(10.0)), 30.0);
    }
}
