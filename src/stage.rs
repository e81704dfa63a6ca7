//! Shared scene state mutated by transitions
//!
//! The [`Stage`] is the only thing transitions touch: the camera eye, the
//! model pose (absent when the model failed to load) and the background
//! color the renderer clears to. The GPU side reads it once per frame.

use cgmath::{Matrix4, Rad, Vector3};

use crate::error::{Result, VitrineError};

/// Linear RGB triple with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a `0xRRGGBB` literal
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Parses `#RRGGBB` (the leading `#` is optional)
    pub fn parse_hex(text: &str) -> Result<Self> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(VitrineError::InvalidColor(text.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| VitrineError::InvalidColor(text.to_string()))
    }

    /// Component-wise linear interpolation; `t >= 1` lands exactly on `to`
    pub fn lerp(self, to: Rgb, t: f32) -> Rgb {
        if t >= 1.0 {
            return to;
        }
        Rgb {
            r: self.r + (to.r - self.r) * t,
            g: self.g + (to.g - self.g) * t,
            b: self.b + (to.b - self.b) * t,
        }
    }
}

impl From<Rgb> for wgpu::Color {
    fn from(color: Rgb) -> Self {
        wgpu::Color {
            r: color.r as f64,
            g: color.g as f64,
            b: color.b as f64,
            a: 1.0,
        }
    }
}

/// Linear interpolation between two vectors; `t >= 1` lands exactly on `to`
pub fn lerp_vec3(from: Vector3<f32>, to: Vector3<f32>, t: f32) -> Vector3<f32> {
    if t >= 1.0 {
        to
    } else {
        from + (to - from) * t
    }
}

/// Linear interpolation between two scalars; `t >= 1` lands exactly on `to`
pub fn lerp_f32(from: f32, to: f32, t: f32) -> f32 {
    if t >= 1.0 {
        to
    } else {
        from + (to - from) * t
    }
}

/// Position, Euler rotation (radians, XYZ order) and scale of the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl ModelTransform {
    pub fn new(position: Vector3<f32>, scale: f32) -> Self {
        Self {
            position,
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(scale, scale, scale),
        }
    }

    /// Builds the model matrix as `T * Rx * Ry * Rz * S`
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

/// Camera, model pose and background shared by every transition
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    /// Camera eye; the camera always looks at the origin
    pub camera: Vector3<f32>,
    /// `None` until (and unless) the model asset loaded
    pub model: Option<ModelTransform>,
    pub background: Rgb,
}

impl Stage {
    pub fn new(camera: Vector3<f32>, model: Option<ModelTransform>, background: Rgb) -> Self {
        Self {
            camera,
            model,
            background,
        }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let royal_blue = Rgb::from_hex(0x4169E1);
        assert_eq!(royal_blue.r, 0x41 as f32 / 255.0);
        assert_eq!(royal_blue.g, 0x69 as f32 / 255.0);
        assert_eq!(royal_blue.b, 0xE1 as f32 / 255.0);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::parse_hex("#DC143C").unwrap(), Rgb::from_hex(0xDC143C));
        assert_eq!(Rgb::parse_hex("f0e68c").unwrap(), Rgb::from_hex(0xF0E68C));
        assert!(Rgb::parse_hex("#12345").is_err());
        assert!(Rgb::parse_hex("#GG0000").is_err());
    }

    #[test]
    fn test_lerp_endpoints_are_exact() {
        let from = Rgb::new(0.1, 0.7, 0.3);
        let to = Rgb::from_hex(0x4169E1);
        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);

        let a = Vector3::new(0.0, -0.6, 3.0);
        let b = Vector3::new(0.0, -0.1, 3.0);
        assert_eq!(lerp_vec3(a, b, 0.0), a);
        assert_eq!(lerp_vec3(a, b, 1.0), b);
        assert_eq!(lerp_f32(4.0, 8.0, 0.5), 6.0);
    }

    #[test]
    fn test_model_matrix_translation_and_scale() {
        let transform = ModelTransform::new(Vector3::new(0.0, -1.0, 0.0), 0.5);
        let matrix = transform.matrix();
        assert_eq!(matrix.w.y, -1.0);
        assert_eq!(matrix.x.x, 0.5);
        assert_eq!(matrix.y.y, 0.5);
    }
}
