//! # Material Properties
//!
//! Fill materials for geometry. A [`MaterialProperty::Color`] is the only
//! material that can be expressed as a per-instance colour attribute; all
//! others go through the material system and are resolved to a
//! [`MaterialValue`] per frame.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::math::{Cartesian2, Color};
use crate::property::{constant, is_constant, value_or, PropertyRef};
use crate::time::JulianDate;

/// Shared handle to a material, compared by identity.
pub type MaterialRef = Arc<MaterialProperty>;

/// Direction of stripes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StripeOrientation {
    /// Horizontal stripes
    #[default]
    Horizontal,
    /// Vertical stripes
    Vertical,
}

/// Time-varying material definition.
#[derive(Clone, Debug)]
pub enum MaterialProperty {
    /// Solid colour.
    Color {
        /// Fill colour, white when absent
        color: Option<PropertyRef<Color>>,
    },
    /// Grid lines over a translucent cell colour.
    Grid {
        /// Line colour
        color: Option<PropertyRef<Color>>,
        /// Alpha of the cells between lines
        cell_alpha: Option<PropertyRef<f64>>,
        /// Lines per axis
        line_count: Option<PropertyRef<Cartesian2>>,
        /// Line thickness in pixels per axis
        line_thickness: Option<PropertyRef<Cartesian2>>,
        /// Line offset per axis
        line_offset: Option<PropertyRef<Cartesian2>>,
    },
    /// Alternating two-colour checkerboard.
    Checkerboard {
        /// First colour
        even_color: Option<PropertyRef<Color>>,
        /// Second colour
        odd_color: Option<PropertyRef<Color>>,
        /// Tiles per axis
        repeat: Option<PropertyRef<Cartesian2>>,
    },
    /// Alternating two-colour stripes.
    Stripe {
        /// First colour
        even_color: Option<PropertyRef<Color>>,
        /// Second colour
        odd_color: Option<PropertyRef<Color>>,
        /// Number of stripe pairs
        repeat: Option<PropertyRef<f64>>,
        /// Offset into the pattern
        offset: Option<PropertyRef<f64>>,
        /// Stripe direction
        orientation: Option<PropertyRef<StripeOrientation>>,
    },
}

/// Material uniforms resolved at one time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaterialValue {
    /// Solid colour
    Color {
        /// Fill colour
        color: Color,
    },
    /// Grid
    Grid {
        /// Line colour
        color: Color,
        /// Cell alpha
        cell_alpha: f64,
        /// Lines per axis
        line_count: Cartesian2,
        /// Line thickness per axis
        line_thickness: Cartesian2,
        /// Line offset per axis
        line_offset: Cartesian2,
    },
    /// Checkerboard
    Checkerboard {
        /// First colour
        even_color: Color,
        /// Second colour
        odd_color: Color,
        /// Tiles per axis
        repeat: Cartesian2,
    },
    /// Stripes
    Stripe {
        /// First colour
        even_color: Color,
        /// Second colour
        odd_color: Color,
        /// Number of stripe pairs
        repeat: f64,
        /// Offset into the pattern
        offset: f64,
        /// Stripe direction
        orientation: StripeOrientation,
    },
}

impl MaterialValue {
    /// True when any colour of the material is not opaque.
    #[must_use]
    pub fn is_translucent(&self) -> bool {
        match self {
            Self::Color { color } => color.alpha < 1.0,
            Self::Grid {
                color, cell_alpha, ..
            } => color.alpha < 1.0 || *cell_alpha < 1.0,
            Self::Checkerboard {
                even_color,
                odd_color,
                ..
            }
            | Self::Stripe {
                even_color,
                odd_color,
                ..
            } => even_color.alpha < 1.0 || odd_color.alpha < 1.0,
        }
    }
}

impl MaterialProperty {
    /// Solid colour material with a constant colour.
    #[must_use]
    pub fn color(color: Color) -> Self {
        Self::Color {
            color: Some(constant(color)),
        }
    }

    /// Solid colour material driven by a property.
    #[must_use]
    pub fn color_property(color: PropertyRef<Color>) -> Self {
        Self::Color { color: Some(color) }
    }

    /// Grid material with default spacing.
    #[must_use]
    pub fn grid(color: Color) -> Self {
        Self::Grid {
            color: Some(constant(color)),
            cell_alpha: None,
            line_count: None,
            line_thickness: None,
            line_offset: None,
        }
    }

    /// Black and white checkerboard.
    #[must_use]
    pub const fn checkerboard() -> Self {
        Self::Checkerboard {
            even_color: None,
            odd_color: None,
            repeat: None,
        }
    }

    /// Black and white stripes.
    #[must_use]
    pub const fn stripe() -> Self {
        Self::Stripe {
            even_color: None,
            odd_color: None,
            repeat: None,
            offset: None,
            orientation: None,
        }
    }

    /// Wraps the material in a shared handle.
    #[must_use]
    pub fn shared(self) -> MaterialRef {
        Arc::new(self)
    }

    /// True for solid colour materials.
    #[inline]
    #[must_use]
    pub const fn is_color(&self) -> bool {
        matches!(self, Self::Color { .. })
    }

    /// Colour property of a solid colour material.
    #[must_use]
    pub const fn color_source(&self) -> Option<&PropertyRef<Color>> {
        match self {
            Self::Color { color } => color.as_ref(),
            _ => None,
        }
    }

    /// True when every uniform is constant.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        match self {
            Self::Color { color } => is_constant(color.as_ref()),
            Self::Grid {
                color,
                cell_alpha,
                line_count,
                line_thickness,
                line_offset,
            } => {
                is_constant(color.as_ref())
                    && is_constant(cell_alpha.as_ref())
                    && is_constant(line_count.as_ref())
                    && is_constant(line_thickness.as_ref())
                    && is_constant(line_offset.as_ref())
            }
            Self::Checkerboard {
                even_color,
                odd_color,
                repeat,
            } => {
                is_constant(even_color.as_ref())
                    && is_constant(odd_color.as_ref())
                    && is_constant(repeat.as_ref())
            }
            Self::Stripe {
                even_color,
                odd_color,
                repeat,
                offset,
                orientation,
            } => {
                is_constant(even_color.as_ref())
                    && is_constant(odd_color.as_ref())
                    && is_constant(repeat.as_ref())
                    && is_constant(offset.as_ref())
                    && is_constant(orientation.as_ref())
            }
        }
    }

    /// Resolves every uniform at `time`, applying defaults.
    #[must_use]
    pub fn value(&self, time: &JulianDate) -> MaterialValue {
        match self {
            Self::Color { color } => MaterialValue::Color {
                color: value_or(color.as_ref(), time, Color::WHITE),
            },
            Self::Grid {
                color,
                cell_alpha,
                line_count,
                line_thickness,
                line_offset,
            } => MaterialValue::Grid {
                color: value_or(color.as_ref(), time, Color::WHITE),
                cell_alpha: value_or(cell_alpha.as_ref(), time, 0.1),
                line_count: value_or(line_count.as_ref(), time, Cartesian2::new(8.0, 8.0)),
                line_thickness: value_or(line_thickness.as_ref(), time, Cartesian2::new(1.0, 1.0)),
                line_offset: value_or(line_offset.as_ref(), time, Cartesian2::ZERO),
            },
            Self::Checkerboard {
                even_color,
                odd_color,
                repeat,
            } => MaterialValue::Checkerboard {
                even_color: value_or(even_color.as_ref(), time, Color::WHITE),
                odd_color: value_or(odd_color.as_ref(), time, Color::BLACK),
                repeat: value_or(repeat.as_ref(), time, Cartesian2::new(2.0, 2.0)),
            },
            Self::Stripe {
                even_color,
                odd_color,
                repeat,
                offset,
                orientation,
            } => MaterialValue::Stripe {
                even_color: value_or(even_color.as_ref(), time, Color::WHITE),
                odd_color: value_or(odd_color.as_ref(), time, Color::BLACK),
                repeat: value_or(repeat.as_ref(), time, 1.0),
                offset: value_or(offset.as_ref(), time, 0.0),
                orientation: value_or(orientation.as_ref(), time, StripeOrientation::Horizontal),
            },
        }
    }

    /// True when the material at `time` needs blending.
    #[must_use]
    pub fn is_translucent(&self, time: &JulianDate) -> bool {
        self.value(time).is_translucent()
    }
}

impl Default for MaterialProperty {
    fn default() -> Self {
        Self::color(Color::WHITE)
    }
}
