use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Linear RGB color with channels in [0, 1]
///
/// Laid out as three packed f32 so a color stream can be uploaded as-is.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable,
)]
#[repr(C)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
    pub const GREEN: Rgb = Rgb::new(0.0, 1.0, 0.0);
    pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from 8-bit channels.
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::from_u8(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// A half-line with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a ray, normalizing the direction.
    ///
    /// A zero or non-finite direction falls back to -Z rather than failing.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize().unwrap_or(DVec3::NEG_Z),
        }
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Distance from `point` to the closest point of the ray.
    ///
    /// Points behind the origin measure their distance to the origin.
    pub fn distance_to_point(&self, point: DVec3) -> f64 {
        let along = (point - self.origin).dot(self.direction);
        if along < 0.0 {
            return self.origin.distance(point);
        }
        self.at(along).distance(point)
    }
}

/// Uniform scale plus translation placing a mesh in the scene
///
/// `world = local * scale + translation`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelTransform {
    pub scale: f64,
    pub translation: DVec3,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ModelTransform {
    pub const IDENTITY: ModelTransform = ModelTransform {
        scale: 1.0,
        translation: DVec3::ZERO,
    };

    /// Transform that fits the box `[min, max]` into a box of edge
    /// `box_size` centered at the origin.
    ///
    /// Returns `None` when the box has no extent.
    pub fn fit_bounds(min: DVec3, max: DVec3, box_size: f64) -> Option<Self> {
        let dim = max - min;
        let max_dim = dim.max_element();
        if !max_dim.is_finite() || max_dim <= 0.0 {
            return None;
        }
        let scale = box_size / max_dim;
        Some(Self {
            scale,
            translation: (-min - dim / 2.0) * scale,
        })
    }

    pub fn local_to_world(&self, point: DVec3) -> DVec3 {
        point * self.scale + self.translation
    }

    pub fn world_to_local(&self, point: DVec3) -> DVec3 {
        (point - self.translation) / self.scale
    }

    /// Bring a world-space ray into the mesh's local space.
    pub fn ray_to_local(&self, ray: &Ray) -> Ray {
        Ray::new(self.world_to_local(ray.origin), ray.direction / self.scale)
    }
}

/// Perspective camera parameters supplied each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: DVec3,
    /// Viewing direction (normalized on use)
    pub forward: DVec3,
    pub up: DVec3,
    /// Vertical field of view in radians
    pub fov_y: f64,
    /// Viewport width / height
    pub aspect: f64,
    /// Near clip distance
    pub near: f64,
}

impl Default for Camera {
    fn default() -> Self {
        let position = DVec3::new(0.0, 0.2, 2.5);
        Self {
            position,
            forward: (-position).normalize(),
            up: DVec3::Y,
            fov_y: 75f64.to_radians(),
            aspect: 1.0,
            near: 0.01,
        }
    }
}

impl Camera {
    /// Camera at `position` looking at `target`
    pub fn looking_at(position: DVec3, target: DVec3) -> Self {
        Self {
            position,
            forward: target - position,
            ..Self::default()
        }
    }

    /// Normalized viewing direction, -Z when degenerate
    pub fn view_dir(&self) -> DVec3 {
        self.forward.try_normalize().unwrap_or(DVec3::NEG_Z)
    }
}

/// Per-frame input from the windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub camera: Camera,
    /// Pointer in normalized device coordinates, [-1, 1] on both axes, +Y up
    pub pointer: DVec2,
}
