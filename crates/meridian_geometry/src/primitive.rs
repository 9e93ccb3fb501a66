//! # Primitive Containers
//!
//! Render primitives and the collections dynamic updaters insert them into.
//! Many updaters share one collection; each tracks the ids it inserted and
//! removes only those.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use meridian_core::{MaterialValue, ShadowMode};
use parking_lot::Mutex;

use crate::instance::GeometryInstance;

/// Unique primitive identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(u64);

static NEXT_PRIMITIVE_ID: AtomicU64 = AtomicU64::new(1);

impl PrimitiveId {
    fn next() -> Self {
        Self(NEXT_PRIMITIVE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Which container a primitive belongs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Regular 3D primitive
    Standard,
    /// Terrain-clamped ground primitive
    Ground,
}

/// How instances are shaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Appearance {
    /// Colour comes from the per-instance colour attribute.
    PerInstanceColor {
        /// Unlit shading
        flat: bool,
        /// Back faces can be culled
        closed: bool,
        /// Needs blending
        translucent: bool,
    },
    /// Colour comes from a material.
    Material {
        /// Material uniforms at build time
        material: MaterialValue,
        /// Back faces can be culled
        closed: bool,
        /// Needs blending
        translucent: bool,
    },
}

impl Appearance {
    /// True when the appearance needs blending.
    #[must_use]
    pub const fn is_translucent(&self) -> bool {
        match self {
            Self::PerInstanceColor { translucent, .. } | Self::Material { translucent, .. } => {
                *translucent
            }
        }
    }
}

/// A batch of instances drawn with one appearance.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    /// Identifier assigned at construction
    pub id: PrimitiveId,
    /// Container kind
    pub kind: PrimitiveKind,
    /// Instances drawn by this primitive
    pub instances: Vec<GeometryInstance>,
    /// Shading
    pub appearance: Appearance,
    /// Shadow mode
    pub shadows: ShadowMode,
    /// Line width for outline primitives
    pub line_width: Option<f32>,
    /// Built on a worker when true; dynamic rebuilds are always synchronous
    pub asynchronous: bool,
}

impl Primitive {
    /// Creates a synchronous primitive.
    #[must_use]
    pub fn new(kind: PrimitiveKind, instances: Vec<GeometryInstance>, appearance: Appearance) -> Self {
        Self {
            id: PrimitiveId::next(),
            kind,
            instances,
            appearance,
            shadows: ShadowMode::Disabled,
            line_width: None,
            asynchronous: false,
        }
    }

    /// Sets the shadow mode.
    #[must_use]
    pub fn with_shadows(mut self, shadows: ShadowMode) -> Self {
        self.shadows = shadows;
        self
    }

    /// Sets the outline line width.
    #[must_use]
    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = Some(width);
        self
    }
}

/// Ordered container of primitives.
#[derive(Clone, Debug, Default)]
pub struct PrimitiveCollection {
    primitives: Vec<Primitive>,
}

/// Collection shared between the scene and dynamic updaters.
pub type SharedPrimitives = Arc<Mutex<PrimitiveCollection>>;

impl PrimitiveCollection {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            primitives: Vec::new(),
        }
    }

    /// Creates an empty shared collection.
    #[must_use]
    pub fn shared() -> SharedPrimitives {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Appends a primitive and returns its id.
    pub fn add(&mut self, primitive: Primitive) -> PrimitiveId {
        let id = primitive.id;
        self.primitives.push(primitive);
        id
    }

    /// Removes and returns the primitive with `id`.
    pub fn remove(&mut self, id: PrimitiveId) -> Option<Primitive> {
        let index = self.primitives.iter().position(|primitive| primitive.id == id)?;
        Some(self.primitives.remove(index))
    }

    /// True when a primitive with `id` is present.
    #[must_use]
    pub fn contains(&self, id: PrimitiveId) -> bool {
        self.primitives.iter().any(|primitive| primitive.id == id)
    }

    /// Primitive with `id`.
    #[must_use]
    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives.iter().find(|primitive| primitive.id == id)
    }

    /// Number of primitives.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// True when empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Primitives in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter()
    }
}
