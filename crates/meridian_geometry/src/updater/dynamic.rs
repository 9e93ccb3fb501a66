//! Per-frame updater for time-varying geometry.
//!
//! Each [`update`](DynamicGeometryUpdater::update) releases the primitives
//! inserted by the previous one and builds new ones from options resolved at
//! the frame time. Shared containers are only ever touched through the ids
//! this updater recorded.

use std::sync::Arc;

use meridian_core::{
    value_of, value_or, BoundingSphere, Color, GeometryGraphics, JulianDate, MaterialProperty,
    ShadowMode,
};

use super::geometry_updater::UpdaterShared;
use super::{flag_at, GeometryKind, OptionContext};
use crate::error::{UpdaterError, UpdaterResult};
use crate::geometry::{Bounded, VertexFormat};
use crate::instance::{
    ColorAttribute, DistanceDisplayConditionAttribute, GeometryInstance, InstanceAttributes,
    ShowAttribute,
};
use crate::primitive::{Appearance, Primitive, PrimitiveId, PrimitiveKind, SharedPrimitives};

/// Result of a bounding sphere query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundingSphereState {
    /// Sphere of the primitives built by the last update, world coordinates
    Done(BoundingSphere),
    /// Nothing is currently drawn
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OwnedPrimitive {
    container: PrimitiveKind,
    id: PrimitiveId,
}

#[derive(Debug, Default)]
enum PrimitiveState {
    #[default]
    Absent,
    Present {
        fill: Option<OwnedPrimitive>,
        outline: Option<OwnedPrimitive>,
        bounding_sphere: BoundingSphere,
    },
}

/// Rebuilds the primitives of one dynamic geometry every frame.
#[derive(Debug)]
pub struct DynamicGeometryUpdater<K: GeometryKind> {
    shared: Arc<UpdaterShared<K>>,
    primitives: SharedPrimitives,
    ground_primitives: SharedPrimitives,
    state: PrimitiveState,
    options: Option<K::Options>,
    destroyed: bool,
}

impl<K: GeometryKind> DynamicGeometryUpdater<K> {
    pub(crate) fn new(
        shared: Arc<UpdaterShared<K>>,
        primitives: SharedPrimitives,
        ground_primitives: SharedPrimitives,
    ) -> Self {
        tracing::debug!(entity = %shared.entity.id(), kind = K::NAME, "dynamic updater created");
        Self {
            shared,
            primitives,
            ground_primitives,
            state: PrimitiveState::Absent,
            options: None,
            destroyed: false,
        }
    }

    fn container(&self, kind: PrimitiveKind) -> &SharedPrimitives {
        match kind {
            PrimitiveKind::Standard => &self.primitives,
            PrimitiveKind::Ground => &self.ground_primitives,
        }
    }

    fn insert(&self, primitive: Primitive) -> OwnedPrimitive {
        let container = primitive.kind;
        let id = self.container(container).lock().add(primitive);
        OwnedPrimitive { container, id }
    }

    fn ensure_alive(&self) -> UpdaterResult<()> {
        if self.destroyed || self.shared.is_destroyed() {
            return Err(UpdaterError::Destroyed { kind: K::NAME });
        }
        Ok(())
    }

    fn release(&mut self) {
        if let PrimitiveState::Present { fill, outline, .. } = std::mem::take(&mut self.state) {
            for owned in [fill, outline].into_iter().flatten() {
                self.container(owned.container).lock().remove(owned.id);
            }
        }
    }

    /// Rebuilds the primitives for `time`.
    ///
    /// Leaves nothing drawn when the entity is hidden, unavailable, or its
    /// shape does not resolve at `time`.
    ///
    /// # Errors
    ///
    /// [`UpdaterError::Destroyed`] after [`destroy`](Self::destroy) or once the
    /// owning [`GeometryUpdater`](super::GeometryUpdater) is destroyed. In the
    /// latter case the primitives drawn so far are removed first.
    pub fn update(&mut self, time: &JulianDate) -> UpdaterResult<()> {
        self.release();
        self.ensure_alive()?;

        let shared = Arc::clone(&self.shared);
        let classification = shared.classification();
        let id = shared.entity.id();

        let (fill, outline, options) = {
            let entity = shared.entity.read();
            let Some(graphics) = K::graphics(&entity) else {
                return Ok(());
            };
            let style = graphics.style();
            if !entity.is_available(time)
                || !entity.is_showing(time)
                || !flag_at(style.show.as_ref(), time, true)
            {
                return Ok(());
            }

            let material = style
                .material
                .clone()
                .unwrap_or_else(|| MaterialProperty::default().shared());
            let context = OptionContext::at(
                id,
                VertexFormat::for_fill(material.is_color()),
                *time,
                &shared.scene,
            );
            let options = K::options(&entity, graphics, &context);
            if !K::has_shape(&options) {
                self.options = Some(options);
                return Ok(());
            }

            let on_terrain = classification.on_terrain;
            let closed = K::is_closed(&options);
            let model_matrix = K::model_matrix(&options);
            let shadows = value_or(style.shadows.as_ref(), time, ShadowMode::Disabled);
            let distance_display_condition = value_of(style.distance_display_condition.as_ref(), time)
                .map(DistanceDisplayConditionAttribute::from_condition);

            let fill = K::fill_geometry(&options)
                .filter(|_| flag_at(style.fill.as_ref(), time, true))
                .map(|geometry| {
                    let (color, appearance) = if material.is_color() {
                        let color = ColorAttribute::from_color(value_or(
                            material.color_source(),
                            time,
                            Color::WHITE,
                        ));
                        let appearance = Appearance::PerInstanceColor {
                            flat: on_terrain,
                            closed,
                            translucent: color.is_translucent(),
                        };
                        (Some(color), appearance)
                    } else {
                        let value = material.value(time);
                        let appearance = Appearance::Material {
                            material: value,
                            closed,
                            translucent: value.is_translucent(),
                        };
                        (None, appearance)
                    };
                    let instance = GeometryInstance {
                        id,
                        geometry: geometry.into(),
                        model_matrix,
                        attributes: InstanceAttributes {
                            show: ShowAttribute::new(true),
                            color,
                            distance_display_condition,
                        },
                    };
                    let kind = if on_terrain {
                        PrimitiveKind::Ground
                    } else {
                        PrimitiveKind::Standard
                    };
                    Primitive::new(kind, vec![instance], appearance).with_shadows(shadows)
                });

            let outline = K::outline_geometry(&options)
                .filter(|_| !on_terrain && flag_at(style.outline.as_ref(), time, false))
                .map(|geometry| {
                    let color = ColorAttribute::from_color(value_or(
                        style.outline_color.as_ref(),
                        time,
                        Color::BLACK,
                    ));
                    let instance = GeometryInstance {
                        id,
                        geometry: geometry.into(),
                        model_matrix,
                        attributes: InstanceAttributes {
                            show: ShowAttribute::new(true),
                            color: Some(color),
                            distance_display_condition,
                        },
                    };
                    let appearance = Appearance::PerInstanceColor {
                        flat: true,
                        closed: false,
                        translucent: color.is_translucent(),
                    };
                    let width = shared
                        .scene
                        .clamp_line_width(value_or(style.outline_width.as_ref(), time, 1.0));
                    Primitive::new(PrimitiveKind::Standard, vec![instance], appearance)
                        .with_shadows(shadows)
                        .with_line_width(width)
                });

            (fill, outline, options)
        };

        let bounding_sphere = fill
            .as_ref()
            .or(outline.as_ref())
            .and_then(|primitive| primitive.instances.first())
            .map(instance_bounding_sphere);
        if let Some(bounding_sphere) = bounding_sphere {
            let fill = fill.map(|primitive| self.insert(primitive));
            let outline = outline.map(|primitive| self.insert(primitive));
            self.state = PrimitiveState::Present {
                fill,
                outline,
                bounding_sphere,
            };
        }
        self.options = Some(options);

        tracing::trace!(entity = %id, kind = K::NAME, drawn = self.is_drawn(), "dynamic geometry rebuilt");
        Ok(())
    }

    fn is_drawn(&self) -> bool {
        matches!(self.state, PrimitiveState::Present { .. })
    }

    /// Bounding sphere of what the last update drew.
    ///
    /// # Errors
    ///
    /// [`UpdaterError::Destroyed`] after [`destroy`](Self::destroy) or once the
    /// owning updater is destroyed.
    pub fn bounding_sphere(&self) -> UpdaterResult<BoundingSphereState> {
        self.ensure_alive()?;
        Ok(match self.state {
            PrimitiveState::Present {
                bounding_sphere, ..
            } => BoundingSphereState::Done(bounding_sphere),
            PrimitiveState::Absent => BoundingSphereState::Failed,
        })
    }

    /// Options resolved by the last update.
    #[must_use]
    pub const fn options(&self) -> Option<&K::Options> {
        self.options.as_ref()
    }

    /// True after [`destroy`](Self::destroy).
    #[inline]
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Removes every primitive this updater inserted. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.release();
        self.destroyed = true;
        tracing::debug!(entity = %self.shared.entity.id(), kind = K::NAME, "dynamic updater destroyed");
    }
}

impl<K: GeometryKind> Drop for DynamicGeometryUpdater<K> {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn instance_bounding_sphere(instance: &GeometryInstance) -> BoundingSphere {
    let local = instance.geometry.bounding_sphere();
    match &instance.model_matrix {
        Some(model_matrix) => local.transform(model_matrix),
        None => local,
    }
}
