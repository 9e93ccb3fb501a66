//! # Geometry Descriptions
//!
//! One struct per geometry kind. Every description shares a
//! [`GraphicsStyle`] (visibility, fill, outline, material, shadows, display
//! distance) and adds the properties that determine its shape.
//!
//! Any property may be absent (use the default) or time-varying.

use crate::material::MaterialRef;
use crate::math::{
    Cartesian2, Cartesian3, Color, CornerType, DistanceDisplayCondition, Plane, PolygonHierarchy,
    Rectangle, ShadowMode,
};
use crate::property::PropertyRef;

/// Appearance properties shared by every geometry kind.
#[derive(Clone, Debug, Default)]
pub struct GraphicsStyle {
    /// Visibility, true when absent
    pub show: Option<PropertyRef<bool>>,
    /// Whether the interior is drawn, true when absent
    pub fill: Option<PropertyRef<bool>>,
    /// Fill material, white when absent
    pub material: Option<MaterialRef>,
    /// Whether the outline is drawn, false when absent
    pub outline: Option<PropertyRef<bool>>,
    /// Outline colour, black when absent
    pub outline_color: Option<PropertyRef<Color>>,
    /// Outline width in pixels, 1 when absent
    pub outline_width: Option<PropertyRef<f64>>,
    /// Shadow casting/receiving
    pub shadows: Option<PropertyRef<ShadowMode>>,
    /// Camera distance range in which the geometry is drawn
    pub distance_display_condition: Option<PropertyRef<DistanceDisplayCondition>>,
}

/// Access to the shared style of a geometry description.
pub trait GeometryGraphics {
    /// Shared appearance properties.
    fn style(&self) -> &GraphicsStyle;
}

macro_rules! impl_geometry_graphics {
    ($($graphics:ty),* $(,)?) => {
        $(
            impl GeometryGraphics for $graphics {
                #[inline]
                fn style(&self) -> &GraphicsStyle {
                    &self.style
                }
            }
        )*
    };
}

impl_geometry_graphics!(
    BoxGraphics,
    CylinderGraphics,
    PlaneGraphics,
    PolygonGraphics,
    RectangleGraphics,
    PolylineVolumeGraphics,
);

/// A box centred on the entity position.
#[derive(Clone, Debug, Default)]
pub struct BoxGraphics {
    /// Shared appearance
    pub style: GraphicsStyle,
    /// Length, width and height in metres
    pub dimensions: Option<PropertyRef<Cartesian3>>,
}

/// A cylinder or truncated cone centred on the entity position.
#[derive(Clone, Debug, Default)]
pub struct CylinderGraphics {
    /// Shared appearance
    pub style: GraphicsStyle,
    /// Length in metres
    pub length: Option<PropertyRef<f64>>,
    /// Radius of the top cap
    pub top_radius: Option<PropertyRef<f64>>,
    /// Radius of the bottom cap
    pub bottom_radius: Option<PropertyRef<f64>>,
    /// Edges around the perimeter
    pub slices: Option<PropertyRef<u32>>,
    /// Vertical lines drawn in the outline
    pub number_of_vertical_lines: Option<PropertyRef<u32>>,
}

/// A flat rectangle in a plane through the entity position.
#[derive(Clone, Debug, Default)]
pub struct PlaneGraphics {
    /// Shared appearance
    pub style: GraphicsStyle,
    /// Plane in the entity's local frame
    pub plane: Option<PropertyRef<Plane>>,
    /// Width and height in metres
    pub dimensions: Option<PropertyRef<Cartesian2>>,
}

/// A polygon on, above, or extruded from the ellipsoid.
#[derive(Clone, Debug, Default)]
pub struct PolygonGraphics {
    /// Shared appearance
    pub style: GraphicsStyle,
    /// Outer ring and holes
    pub hierarchy: Option<PropertyRef<PolygonHierarchy>>,
    /// Height above the ellipsoid
    pub height: Option<PropertyRef<f64>>,
    /// Height of the extruded face
    pub extruded_height: Option<PropertyRef<f64>>,
    /// Angular distance between points in radians
    pub granularity: Option<PropertyRef<f64>>,
    /// Texture rotation in radians
    pub st_rotation: Option<PropertyRef<f64>>,
    /// Use the height of each position instead of `height`
    pub per_position_height: Option<PropertyRef<bool>>,
    /// Whether the top of an extruded polygon is capped
    pub close_top: Option<PropertyRef<bool>>,
    /// Whether the bottom of an extruded polygon is capped
    pub close_bottom: Option<PropertyRef<bool>>,
}

/// A geographic rectangle on, above, or extruded from the ellipsoid.
#[derive(Clone, Debug, Default)]
pub struct RectangleGraphics {
    /// Shared appearance
    pub style: GraphicsStyle,
    /// Extent in radians
    pub coordinates: Option<PropertyRef<Rectangle>>,
    /// Height above the ellipsoid
    pub height: Option<PropertyRef<f64>>,
    /// Height of the extruded face
    pub extruded_height: Option<PropertyRef<f64>>,
    /// Angular distance between points in radians
    pub granularity: Option<PropertyRef<f64>>,
    /// Texture rotation in radians
    pub st_rotation: Option<PropertyRef<f64>>,
    /// Rotation of the rectangle in radians
    pub rotation: Option<PropertyRef<f64>>,
    /// Whether the top of an extruded rectangle is capped
    pub close_top: Option<PropertyRef<bool>>,
    /// Whether the bottom of an extruded rectangle is capped
    pub close_bottom: Option<PropertyRef<bool>>,
}

/// A 2D shape extruded along a polyline.
#[derive(Clone, Debug, Default)]
pub struct PolylineVolumeGraphics {
    /// Shared appearance
    pub style: GraphicsStyle,
    /// Centre line
    pub positions: Option<PropertyRef<Vec<Cartesian3>>>,
    /// Cross-section in metres
    pub shape: Option<PropertyRef<Vec<Cartesian2>>>,
    /// Angular distance between points in radians
    pub granularity: Option<PropertyRef<f64>>,
    /// Corner style
    pub corner_type: Option<PropertyRef<CornerType>>,
}
