//! # Math Value Types
//!
//! Plain `Copy` values resolved from time-varying properties: vectors,
//! rotations, colours, geographic rectangles and the WGS84 ellipsoid used to
//! place geometry on the globe.
//!
//! All vectors are Earth-fixed cartesian coordinates in metres unless noted.

use std::ops::{Add, Mul, Neg, Sub};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 2D vector - shape outlines, plane dimensions, material repeats
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Cartesian2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Cartesian2 {
    /// Creates a new Cartesian2
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Length
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// 3D vector - positions, dimensions, directions
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Cartesian3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Cartesian3 {
    /// Creates a new Cartesian3
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit X vector
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit Y vector
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit Z vector
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Position on the WGS84 ellipsoid from longitude/latitude in degrees.
    #[must_use]
    pub fn from_degrees(longitude: f64, latitude: f64, height: f64) -> Self {
        Self::from_radians(longitude.to_radians(), latitude.to_radians(), height)
    }

    /// Position on the WGS84 ellipsoid from longitude/latitude in radians.
    #[must_use]
    pub fn from_radians(longitude: f64, latitude: f64, height: f64) -> Self {
        Ellipsoid::WGS84.cartographic_to_cartesian(&Cartographic::new(longitude, latitude, height))
    }

    /// Positions from a flat `[lon, lat, lon, lat, ...]` list in degrees.
    #[must_use]
    pub fn from_degrees_array(coordinates: &[f64]) -> Vec<Self> {
        coordinates
            .chunks_exact(2)
            .map(|pair| Self::from_degrees(pair[0], pair[1], 0.0))
            .collect()
    }

    /// Positions from a flat `[lon, lat, lon, lat, ...]` list in radians.
    #[must_use]
    pub fn from_radians_array(coordinates: &[f64]) -> Vec<Self> {
        coordinates
            .chunks_exact(2)
            .map(|pair| Self::from_radians(pair[0], pair[1], 0.0))
            .collect()
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn magnitude_squared(self) -> f64 {
        self.dot(self)
    }

    /// Length
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).magnitude()
    }

    /// Unit vector in the same direction, `None` for the zero vector.
    #[must_use]
    pub fn normalize(self) -> Option<Self> {
        let magnitude = self.magnitude();
        (magnitude > f64::EPSILON).then(|| self * (1.0 / magnitude))
    }

    /// Component-wise product
    #[must_use]
    pub fn multiply_components(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Linear interpolation towards `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Add for Cartesian3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Cartesian3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Cartesian3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Cartesian3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Longitude/latitude in radians plus height above the ellipsoid in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cartographic {
    /// Longitude in radians
    pub longitude: f64,
    /// Latitude in radians
    pub latitude: f64,
    /// Height in metres
    pub height: f64,
}

impl Cartographic {
    /// Creates a new Cartographic
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64, height: f64) -> Self {
        Self {
            longitude,
            latitude,
            height,
        }
    }
}

/// Quaternion for rotations
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
    /// W component
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// Creates a new Quaternion
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// No rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Rotation of `angle` radians about `axis`.
    #[must_use]
    pub fn from_axis_angle(axis: Cartesian3, angle: f64) -> Self {
        let Some(axis) = axis.normalize() else {
            return Self::IDENTITY;
        };
        let (sin, cos) = (angle * 0.5).sin_cos();
        Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos)
    }

    /// Shortest rotation taking `from` onto `to`.
    #[must_use]
    pub fn from_unit_vectors(from: Cartesian3, to: Cartesian3) -> Self {
        let dot = from.dot(to);
        if dot < -1.0 + 1e-12 {
            let axis = Cartesian3::UNIT_X.cross(from);
            let axis = if axis.magnitude_squared() < 1e-12 {
                Cartesian3::UNIT_Y.cross(from)
            } else {
                axis
            };
            return Self::from_axis_angle(axis, std::f64::consts::PI);
        }
        let axis = from.cross(to);
        Self::new(axis.x, axis.y, axis.z, 1.0 + dot).normalize()
    }

    /// Length
    #[must_use]
    pub fn magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Unit quaternion, identity for a degenerate input.
    #[must_use]
    pub fn normalize(self) -> Self {
        let magnitude = self.magnitude();
        if magnitude <= f64::EPSILON {
            return Self::IDENTITY;
        }
        let inverse = 1.0 / magnitude;
        Self::new(
            self.x * inverse,
            self.y * inverse,
            self.z * inverse,
            self.w * inverse,
        )
    }

    /// Normalised linear interpolation.
    #[must_use]
    pub fn nlerp(self, other: Self, t: f64) -> Self {
        let dot = self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w;
        let sign = if dot < 0.0 { -1.0 } else { 1.0 };
        Self::new(
            self.x + (other.x * sign - self.x) * t,
            self.y + (other.y * sign - self.y) * t,
            self.z + (other.z * sign - self.z) * t,
            self.w + (other.w * sign - self.w) * t,
        )
        .normalize()
    }

    /// Rotates a vector.
    #[must_use]
    pub fn rotate(self, vector: Cartesian3) -> Cartesian3 {
        let q = Cartesian3::new(self.x, self.y, self.z);
        let t = q.cross(vector) * 2.0;
        vector + t * self.w + q.cross(t)
    }
}

/// 4x4 affine transform, column-major.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Matrix4 {
    /// Column-major elements
    pub elements: [f64; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Builds a transform from its three axes and origin.
    #[must_use]
    pub const fn from_columns(
        x_axis: Cartesian3,
        y_axis: Cartesian3,
        z_axis: Cartesian3,
        origin: Cartesian3,
    ) -> Self {
        Self {
            elements: [
                x_axis.x, x_axis.y, x_axis.z, 0.0, //
                y_axis.x, y_axis.y, y_axis.z, 0.0, //
                z_axis.x, z_axis.y, z_axis.z, 0.0, //
                origin.x, origin.y, origin.z, 1.0,
            ],
        }
    }

    /// Rotation followed by translation.
    #[must_use]
    pub fn from_rotation_translation(rotation: Quaternion, translation: Cartesian3) -> Self {
        let rotation = rotation.normalize();
        Self::from_columns(
            rotation.rotate(Cartesian3::UNIT_X),
            rotation.rotate(Cartesian3::UNIT_Y),
            rotation.rotate(Cartesian3::UNIT_Z),
            translation,
        )
    }

    /// Translation component
    #[must_use]
    pub const fn translation(&self) -> Cartesian3 {
        Cartesian3::new(self.elements[12], self.elements[13], self.elements[14])
    }

    /// Column `index` as a vector (upper three rows).
    #[must_use]
    pub const fn column(&self, index: usize) -> Cartesian3 {
        let base = index * 4;
        Cartesian3::new(
            self.elements[base],
            self.elements[base + 1],
            self.elements[base + 2],
        )
    }

    /// Largest axis scale of the linear part.
    #[must_use]
    pub fn maximum_scale(&self) -> f64 {
        self.column(0)
            .magnitude()
            .max(self.column(1).magnitude())
            .max(self.column(2).magnitude())
    }

    /// Applies the transform to a point.
    #[must_use]
    pub fn transform_point(&self, point: Cartesian3) -> Cartesian3 {
        self.column(0) * point.x + self.column(1) * point.y + self.column(2) * point.z
            + self.translation()
    }

    /// `self * other`
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let mut elements = [0.0; 16];
        for column in 0..4 {
            for row in 0..4 {
                elements[column * 4 + row] = (0..4)
                    .map(|k| self.elements[k * 4 + row] * other.elements[column * 4 + k])
                    .sum();
            }
        }
        Self { elements }
    }
}

/// RGBA colour with components in `[0, 1]`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub red: f32,
    /// Green
    pub green: f32,
    /// Blue
    pub blue: f32,
    /// Alpha
    pub alpha: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    /// Creates a new Color
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque red
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque blue
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    /// Opaque yellow
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0, 1.0);
    /// Fully transparent
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Copy with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self::new(self.red, self.green, self.blue, alpha)
    }

    /// Packs into RGBA bytes.
    #[must_use]
    pub fn to_bytes(self) -> [u8; 4] {
        [
            float_to_byte(self.red),
            float_to_byte(self.green),
            float_to_byte(self.blue),
            float_to_byte(self.alpha),
        ]
    }

    /// Linear interpolation towards `other`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t as f32;
        Self::new(
            self.red + (other.red - self.red) * t,
            self.green + (other.green - self.green) * t,
            self.blue + (other.blue - self.blue) * t,
            self.alpha + (other.alpha - self.alpha) * t,
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_byte(value: f32) -> u8 {
    if value >= 1.0 {
        255
    } else if value <= 0.0 {
        0
    } else {
        (value * 256.0).floor().min(255.0) as u8
    }
}

/// Geographic extent in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Westernmost longitude
    pub west: f64,
    /// Southernmost latitude
    pub south: f64,
    /// Easternmost longitude
    pub east: f64,
    /// Northernmost latitude
    pub north: f64,
}

impl Rectangle {
    /// Creates a rectangle from radians.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Creates a rectangle from degrees.
    #[must_use]
    pub fn from_degrees(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self::new(
            west.to_radians(),
            south.to_radians(),
            east.to_radians(),
            north.to_radians(),
        )
    }

    /// Corners and centre at `height`.
    #[must_use]
    pub fn sample_points(&self, height: f64) -> [Cartographic; 5] {
        [
            Cartographic::new(self.west, self.south, height),
            Cartographic::new(self.east, self.south, height),
            Cartographic::new(self.east, self.north, height),
            Cartographic::new(self.west, self.north, height),
            Cartographic::new(
                (self.west + self.east) * 0.5,
                (self.south + self.north) * 0.5,
                height,
            ),
        ]
    }
}

/// Plane in Hessian normal form: `normal . p + distance = 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Unit normal
    pub normal: Cartesian3,
    /// Signed distance from the origin
    pub distance: f64,
}

impl Plane {
    /// Creates a new Plane
    #[must_use]
    pub const fn new(normal: Cartesian3, distance: f64) -> Self {
        Self { normal, distance }
    }

    /// Point of the plane closest to the origin.
    #[must_use]
    pub fn origin(&self) -> Cartesian3 {
        self.normal * -self.distance
    }
}

/// Outer ring of a polygon plus nested holes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonHierarchy {
    /// Outer boundary
    pub positions: Vec<Cartesian3>,
    /// Holes, each may contain islands
    pub holes: Vec<PolygonHierarchy>,
}

impl PolygonHierarchy {
    /// Creates a hierarchy without holes.
    #[must_use]
    pub const fn new(positions: Vec<Cartesian3>) -> Self {
        Self {
            positions,
            holes: Vec::new(),
        }
    }

    /// Adds a hole.
    #[must_use]
    pub fn with_hole(mut self, hole: Self) -> Self {
        self.holes.push(hole);
        self
    }
}

/// Camera distance range in which geometry is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceDisplayCondition {
    /// Closest distance
    pub near: f64,
    /// Farthest distance
    pub far: f64,
}

impl DistanceDisplayCondition {
    /// Creates a new condition.
    #[must_use]
    pub const fn new(near: f64, far: f64) -> Self {
        Self { near, far }
    }
}

impl Default for DistanceDisplayCondition {
    fn default() -> Self {
        Self::new(0.0, f64::MAX)
    }
}

/// Whether geometry casts and/or receives shadows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShadowMode {
    /// No shadows
    #[default]
    Disabled,
    /// Casts and receives
    Enabled,
    /// Casts only
    CastOnly,
    /// Receives only
    ReceiveOnly,
}

/// Corner style for extruded polyline shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerType {
    /// Rounded corners
    #[default]
    Rounded,
    /// Sharp corners
    Mitered,
    /// Clipped corners
    Beveled,
}

/// Sphere enclosing a piece of geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    /// Centre
    pub center: Cartesian3,
    /// Radius
    pub radius: f64,
}

impl BoundingSphere {
    /// Creates a new BoundingSphere
    #[must_use]
    pub const fn new(center: Cartesian3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Centroid-based sphere around `points`. Empty input gives a zero sphere.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_points(points: &[Cartesian3]) -> Self {
        if points.is_empty() {
            return Self::default();
        }
        let sum = points
            .iter()
            .fold(Cartesian3::ZERO, |acc, point| acc + *point);
        let center = sum * (1.0 / points.len() as f64);
        let radius = points
            .iter()
            .map(|point| point.distance(center))
            .fold(0.0, f64::max);
        Self::new(center, radius)
    }

    /// Sphere grown by `amount` metres.
    #[must_use]
    pub fn expanded(self, amount: f64) -> Self {
        Self::new(self.center, self.radius + amount.abs())
    }

    /// Sphere after applying `transform`.
    #[must_use]
    pub fn transform(self, transform: &Matrix4) -> Self {
        Self::new(
            transform.transform_point(self.center),
            self.radius * transform.maximum_scale(),
        )
    }
}

/// Reference ellipsoid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// Semi-axes in metres
    pub radii: Cartesian3,
}

impl Ellipsoid {
    /// WGS84 reference ellipsoid
    pub const WGS84: Self = Self {
        radii: Cartesian3::new(6_378_137.0, 6_378_137.0, 6_356_752.314_245_179),
    };

    /// Surface normal at a geographic location.
    #[must_use]
    pub fn geodetic_surface_normal_cartographic(&self, cartographic: &Cartographic) -> Cartesian3 {
        let cos_latitude = cartographic.latitude.cos();
        Cartesian3::new(
            cos_latitude * cartographic.longitude.cos(),
            cos_latitude * cartographic.longitude.sin(),
            cartographic.latitude.sin(),
        )
    }

    /// Surface normal below a cartesian point, `None` at the centre.
    #[must_use]
    pub fn geodetic_surface_normal(&self, position: Cartesian3) -> Option<Cartesian3> {
        let radii_squared = self.radii.multiply_components(self.radii);
        Cartesian3::new(
            position.x / radii_squared.x,
            position.y / radii_squared.y,
            position.z / radii_squared.z,
        )
        .normalize()
    }

    /// Converts longitude/latitude/height to Earth-fixed cartesian.
    #[must_use]
    pub fn cartographic_to_cartesian(&self, cartographic: &Cartographic) -> Cartesian3 {
        let normal = self.geodetic_surface_normal_cartographic(cartographic);
        let k = self
            .radii
            .multiply_components(self.radii)
            .multiply_components(normal);
        let gamma = normal.dot(k).sqrt();
        k * (1.0 / gamma) + normal * cartographic.height
    }

    /// Local east-north-up frame at `origin`, expressed in Earth-fixed axes.
    #[must_use]
    pub fn east_north_up_to_fixed_frame(&self, origin: Cartesian3) -> Matrix4 {
        let Some(up) = self.geodetic_surface_normal(origin) else {
            return Matrix4::from_columns(
                Cartesian3::UNIT_X,
                Cartesian3::UNIT_Y,
                Cartesian3::UNIT_Z,
                origin,
            );
        };
        let east = Cartesian3::new(-origin.y, origin.x, 0.0)
            .normalize()
            .unwrap_or(Cartesian3::UNIT_Y);
        let north = up.cross(east);
        Matrix4::from_columns(east, north, up, origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_degrees_on_equator() {
        let position = Cartesian3::from_degrees(0.0, 0.0, 0.0);
        assert_relative_eq!(position.x, 6_378_137.0, epsilon = 1e-6);
        assert_relative_eq!(position.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(position.z, 0.0, epsilon = 1e-6);

        let pole = Cartesian3::from_degrees(0.0, 90.0, 10.0);
        assert_relative_eq!(pole.z, 6_356_762.314_245_179, epsilon = 1e-6);
    }

    #[test]
    fn test_radians_array_pairs() {
        let positions = Cartesian3::from_radians_array(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0]);
        assert_eq!(positions.len(), 3);
    }

    #[test]
    fn test_color_bytes() {
        assert_eq!(Color::WHITE.to_bytes(), [255, 255, 255, 255]);
        assert_eq!(Color::BLUE.to_bytes(), [0, 0, 255, 255]);
        assert_eq!(Color::new(0.5, 0.0, 0.0, 0.5).to_bytes(), [128, 0, 0, 128]);
    }

    #[test]
    fn test_rotation_translation_matrix() {
        let rotation = Quaternion::from_axis_angle(Cartesian3::UNIT_Z, std::f64::consts::FRAC_PI_2);
        let matrix = Matrix4::from_rotation_translation(rotation, Cartesian3::new(1.0, 2.0, 3.0));
        let point = matrix.transform_point(Cartesian3::UNIT_X);
        assert_relative_eq!(point.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(point.y, 3.0, epsilon = 1e-12);
        assert_relative_eq!(point.z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_east_north_up_frame_is_orthonormal() {
        let origin = Cartesian3::from_degrees(-75.0, 40.0, 0.0);
        let frame = Ellipsoid::WGS84.east_north_up_to_fixed_frame(origin);
        let (east, north, up) = (frame.column(0), frame.column(1), frame.column(2));
        assert_relative_eq!(east.dot(north), 0.0, epsilon = 1e-12);
        assert_relative_eq!(east.dot(up), 0.0, epsilon = 1e-12);
        assert_relative_eq!(up.magnitude(), 1.0, epsilon = 1e-12);
        assert_eq!(frame.translation(), origin);
    }

    #[test]
    fn test_bounding_sphere_from_points() {
        let sphere = BoundingSphere::from_points(&[
            Cartesian3::new(-1.0, 0.0, 0.0),
            Cartesian3::new(1.0, 0.0, 0.0),
        ]);
        assert_eq!(sphere.center, Cartesian3::ZERO);
        assert_relative_eq!(sphere.radius, 1.0);
        assert_eq!(BoundingSphere::from_points(&[]), BoundingSphere::default());
    }

    #[test]
    fn test_multiply_with_identity() {
        let matrix = Matrix4::from_rotation_translation(
            Quaternion::from_axis_angle(Cartesian3::UNIT_X, 0.3),
            Cartesian3::new(4.0, 5.0, 6.0),
        );
        assert_eq!(matrix.multiply(&Matrix4::IDENTITY), matrix);
    }
}
