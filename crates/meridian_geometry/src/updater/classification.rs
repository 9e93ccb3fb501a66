//! Derived state of one entity/kind pair.
//!
//! [`classify`] recomputes everything from scratch on every call, so it is
//! safe to run any number of times per external change.

use meridian_core::{
    constant, is_constant, Color, DistanceDisplayCondition, Entity, EntityId, GeometryGraphics,
    GraphicsStyle, JulianDate, MaterialProperty, MaterialRef, PropertyRef, ShadowMode,
};

use super::{may_be_true, GeometryKind, OptionContext};
use crate::geometry::VertexFormat;
use crate::scene::SceneContext;

/// Immutable snapshot of the derived attributes of a geometry.
#[derive(Debug)]
pub struct Classification<K: GeometryKind> {
    /// The geometry may be filled at some time
    pub fill_enabled: bool,
    /// The geometry may be outlined at some time
    pub outline_enabled: bool,
    /// A shape, material or outline width property varies with time
    pub is_dynamic: bool,
    /// The static fill geometry is a closed volume
    pub is_closed: bool,
    /// The fill is clamped to terrain
    pub on_terrain: bool,
    /// Fill visibility never changes
    pub has_constant_fill: bool,
    /// Outline visibility never changes
    pub has_constant_outline: bool,
    /// Fill material, the entity's own instance when it set one
    pub fill_material_property: Option<MaterialRef>,
    /// Outline colour, only when outlined
    pub outline_color_property: Option<PropertyRef<Color>>,
    /// Constant outline width, 1.0 otherwise
    pub outline_width: f64,
    /// Shadow mode
    pub shadows_property: Option<PropertyRef<ShadowMode>>,
    /// Display distance range
    pub distance_display_condition_property: Option<PropertyRef<DistanceDisplayCondition>>,
    /// An outline was requested but dropped because the fill is on terrain
    pub outline_suppressed_on_terrain: bool,
    /// Options resolved assuming constant properties, static geometry only
    pub options: Option<K::Options>,
}

impl<K: GeometryKind> Classification<K> {
    /// Snapshot of a geometry that is never drawn.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            fill_enabled: false,
            outline_enabled: false,
            is_dynamic: false,
            is_closed: false,
            on_terrain: false,
            has_constant_fill: true,
            has_constant_outline: true,
            fill_material_property: None,
            outline_color_property: None,
            outline_width: 1.0,
            shadows_property: None,
            distance_display_condition_property: None,
            outline_suppressed_on_terrain: false,
            options: None,
        }
    }

    /// True when neither fill nor outline can ever be drawn.
    #[inline]
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        !self.fill_enabled && !self.outline_enabled
    }
}

impl<K: GeometryKind> Default for Classification<K> {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Derives the classification of kind `K` for `entity`.
#[must_use]
pub fn classify<K: GeometryKind>(entity: &Entity, id: EntityId, scene: &SceneContext) -> Classification<K> {
    let Some(graphics) = K::graphics(entity) else {
        return Classification::disabled();
    };
    let style = graphics.style();

    let fill_enabled = may_be_true(style.fill.as_ref(), true);
    let outline_requested = may_be_true(style.outline.as_ref(), false);
    if !fill_enabled && !outline_requested {
        return Classification::disabled();
    }
    if is_hidden::<K>(entity, graphics) {
        return Classification::disabled();
    }

    let material = style
        .material
        .clone()
        .unwrap_or_else(|| MaterialProperty::default().shared());
    let on_terrain = fill_enabled
        && material.is_color()
        && scene.ground_primitives_supported()
        && K::is_on_terrain(graphics);
    let outline_enabled = outline_requested && !on_terrain;

    let is_dynamic = K::is_shape_dynamic(entity, graphics)
        || !is_constant(style.outline_width.as_ref())
        || !material.is_constant();

    let options = (!is_dynamic).then(|| {
        let context = OptionContext::constant(id, VertexFormat::for_fill(material.is_color()), scene);
        K::options(entity, graphics, &context)
    });

    Classification {
        fill_enabled,
        outline_enabled,
        is_dynamic,
        is_closed: options.as_ref().is_some_and(K::is_closed),
        on_terrain,
        has_constant_fill: !fill_enabled || has_constant_visibility(entity, style, style.fill.as_ref()),
        has_constant_outline: !outline_enabled
            || has_constant_visibility(entity, style, style.outline.as_ref()),
        fill_material_property: Some(material),
        outline_color_property: outline_enabled.then(|| {
            style
                .outline_color
                .clone()
                .unwrap_or_else(|| constant(Color::BLACK))
        }),
        outline_width: style
            .outline_width
            .as_ref()
            .filter(|width| width.is_constant())
            .and_then(|width| width.value(&JulianDate::MINIMUM))
            .unwrap_or(1.0),
        shadows_property: Some(
            style
                .shadows
                .clone()
                .unwrap_or_else(|| constant(ShadowMode::Disabled)),
        ),
        distance_display_condition_property: Some(
            style
                .distance_display_condition
                .clone()
                .unwrap_or_else(|| constant(DistanceDisplayCondition::default())),
        ),
        outline_suppressed_on_terrain: outline_requested && on_terrain,
        options,
    }
}

/// Missing mandatory shape, or a constant `show` that is not true.
fn is_hidden<K: GeometryKind>(entity: &Entity, graphics: &K::Graphics) -> bool {
    if !K::has_required_properties(entity, graphics) {
        return true;
    }
    graphics.style().show.as_ref().is_some_and(|show| {
        show.is_constant() && show.value(&JulianDate::MINIMUM) != Some(true)
    })
}

fn has_constant_visibility(
    entity: &Entity,
    style: &GraphicsStyle,
    flag: Option<&PropertyRef<bool>>,
) -> bool {
    entity.availability.is_none() && is_constant(style.show.as_ref()) && is_constant(flag)
}
