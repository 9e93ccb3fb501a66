//! # Geometry Descriptors
//!
//! The boundary with tessellation. Each kind produces a fill and an outline
//! descriptor holding fully resolved, time-free parameters; the renderer's
//! tessellator turns them into vertex and index buffers.

use meridian_core::BoundingSphere;

use crate::kinds::box_geometry::{BoxGeometry, BoxOutlineGeometry};
use crate::kinds::cylinder::{CylinderGeometry, CylinderOutlineGeometry};
use crate::kinds::plane::{PlaneGeometry, PlaneOutlineGeometry};
use crate::kinds::polygon::{PolygonGeometry, PolygonOutlineGeometry};
use crate::kinds::polyline_volume::{PolylineVolumeGeometry, PolylineVolumeOutlineGeometry};
use crate::kinds::rectangle::{RectangleGeometry, RectangleOutlineGeometry};

/// Vertex attributes a fill tessellation must generate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    /// Positions only (outlines)
    PositionOnly,
    /// Positions and normals (per-instance colour shading)
    #[default]
    PositionAndNormal,
    /// Positions, normals and texture coordinates (materials)
    PositionNormalAndSt,
}

impl VertexFormat {
    /// Format required by the fill appearance.
    #[inline]
    #[must_use]
    pub const fn for_fill(is_color_material: bool) -> Self {
        if is_color_material {
            Self::PositionAndNormal
        } else {
            Self::PositionNormalAndSt
        }
    }
}

/// Geometry whose extent is known before tessellation.
pub trait Bounded {
    /// Sphere enclosing the geometry in its own coordinate frame.
    fn bounding_sphere(&self) -> BoundingSphere;
}

/// Any fill or outline descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Box fill
    Box(BoxGeometry),
    /// Box outline
    BoxOutline(BoxOutlineGeometry),
    /// Cylinder fill
    Cylinder(CylinderGeometry),
    /// Cylinder outline
    CylinderOutline(CylinderOutlineGeometry),
    /// Plane fill
    Plane(PlaneGeometry),
    /// Plane outline
    PlaneOutline(PlaneOutlineGeometry),
    /// Polygon fill
    Polygon(PolygonGeometry),
    /// Polygon outline
    PolygonOutline(PolygonOutlineGeometry),
    /// Rectangle fill
    Rectangle(RectangleGeometry),
    /// Rectangle outline
    RectangleOutline(RectangleOutlineGeometry),
    /// Polyline volume fill
    PolylineVolume(PolylineVolumeGeometry),
    /// Polyline volume outline
    PolylineVolumeOutline(PolylineVolumeOutlineGeometry),
}

macro_rules! geometry_variants {
    ($($variant:ident($descriptor:ty)),* $(,)?) => {
        $(
            impl From<$descriptor> for Geometry {
                fn from(descriptor: $descriptor) -> Self {
                    Self::$variant(descriptor)
                }
            }
        )*

        impl Bounded for Geometry {
            fn bounding_sphere(&self) -> BoundingSphere {
                match self {
                    $(Self::$variant(descriptor) => descriptor.bounding_sphere(),)*
                }
            }
        }
    };
}

geometry_variants!(
    Box(BoxGeometry),
    BoxOutline(BoxOutlineGeometry),
    Cylinder(CylinderGeometry),
    CylinderOutline(CylinderOutlineGeometry),
    Plane(PlaneGeometry),
    PlaneOutline(PlaneOutlineGeometry),
    Polygon(PolygonGeometry),
    PolygonOutline(PolygonOutlineGeometry),
    Rectangle(RectangleGeometry),
    RectangleOutline(RectangleOutlineGeometry),
    PolylineVolume(PolylineVolumeGeometry),
    PolylineVolumeOutline(PolylineVolumeOutlineGeometry),
);

impl Geometry {
    /// True for outline descriptors.
    #[must_use]
    pub const fn is_outline(&self) -> bool {
        matches!(
            self,
            Self::BoxOutline(_)
                | Self::CylinderOutline(_)
                | Self::PlaneOutline(_)
                | Self::PolygonOutline(_)
                | Self::RectangleOutline(_)
                | Self::PolylineVolumeOutline(_)
        )
    }
}
