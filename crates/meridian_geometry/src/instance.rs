//! # Geometry Instances
//!
//! An immutable snapshot pairing a geometry descriptor with the per-instance
//! attributes the renderer reads: visibility, colour and display distance.
//!
//! Attribute values use fixed byte layouts so they can be written straight
//! into instance buffers.

use bytemuck::{Pod, Zeroable};
use meridian_core::{Color, DistanceDisplayCondition, EntityId, Matrix4};

use crate::geometry::Geometry;

/// RGBA colour attribute, one byte per channel.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct ColorAttribute {
    /// Packed RGBA
    pub value: [u8; 4],
}

impl ColorAttribute {
    /// Packs a colour.
    #[must_use]
    pub fn from_color(color: Color) -> Self {
        Self {
            value: color.to_bytes(),
        }
    }

    /// True when alpha is below 255.
    #[inline]
    #[must_use]
    pub const fn is_translucent(&self) -> bool {
        self.value[3] != u8::MAX
    }
}

/// Visibility attribute.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct ShowAttribute {
    /// 1 when shown, 0 when hidden
    pub value: [u8; 1],
}

impl ShowAttribute {
    /// Creates the attribute.
    #[must_use]
    pub const fn new(show: bool) -> Self {
        Self {
            value: [show as u8],
        }
    }

    /// Decoded value.
    #[inline]
    #[must_use]
    pub const fn is_shown(&self) -> bool {
        self.value[0] != 0
    }
}

/// Near/far camera distance attribute.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct DistanceDisplayConditionAttribute {
    /// `[near, far]`
    pub value: [f32; 2],
}

impl DistanceDisplayConditionAttribute {
    /// Packs a condition. Distances beyond `f32::MAX` saturate.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_condition(condition: DistanceDisplayCondition) -> Self {
        let clamp = |distance: f64| distance.min(f64::from(f32::MAX)) as f32;
        Self {
            value: [clamp(condition.near), clamp(condition.far)],
        }
    }
}

/// Attributes attached to one geometry instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceAttributes {
    /// Visibility at the creation time
    pub show: ShowAttribute,
    /// Colour, absent for material-driven fills
    pub color: Option<ColorAttribute>,
    /// Display distance, absent when it does not resolve
    pub distance_display_condition: Option<DistanceDisplayConditionAttribute>,
}

impl InstanceAttributes {
    /// Attributes in upload order: show, colour, distance display condition.
    #[must_use]
    pub fn packed(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(
            std::mem::size_of::<ShowAttribute>()
                + std::mem::size_of::<ColorAttribute>()
                + std::mem::size_of::<DistanceDisplayConditionAttribute>(),
        );
        bytes.extend_from_slice(bytemuck::bytes_of(&self.show));
        if let Some(color) = &self.color {
            bytes.extend_from_slice(bytemuck::bytes_of(color));
        }
        if let Some(condition) = &self.distance_display_condition {
            bytes.extend_from_slice(bytemuck::bytes_of(condition));
        }
        bytes
    }
}

/// Geometry plus attributes, as handed to a primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryInstance {
    /// Entity the instance was built for
    pub id: EntityId,
    /// Geometry descriptor
    pub geometry: Geometry,
    /// Local-to-world transform, `None` for geometry already in world space
    pub model_matrix: Option<Matrix4>,
    /// Per-instance attributes
    pub attributes: InstanceAttributes,
}
