//! Showcase configuration
//!
//! Every constant the scene and its transitions use lives here, with the
//! landing page values as defaults. Override through the `with_*` builders
//! before handing the config to [`VitrineApp::new`].
//!
//! ```no_run
//! use vitrine::config::ShowcaseConfig;
//! use vitrine::stage::Rgb;
//!
//! let config = ShowcaseConfig::default()
//!     .with_model_path("assets/W3X.obj")
//!     .with_background(Rgb::from_hex(0x101020));
//! ```
//!
//! [`VitrineApp::new`]: crate::app::VitrineApp::new

use std::f32::consts::PI;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cgmath::Vector3;

use crate::error::Result;
use crate::navigation::NavPoint;
use crate::stage::{ModelTransform, Rgb, Stage};

/// Point 1: glide everything back to the resting pose
#[derive(Debug, Clone, PartialEq)]
pub struct ResetConfig {
    pub duration: Duration,
    pub camera: Vector3<f32>,
    pub model_position: Vector3<f32>,
    pub background: Rgb,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1000),
            camera: Vector3::new(0.0, -0.1, 3.0),
            model_position: Vector3::new(0.0, -0.45, 0.0),
            background: Rgb::from_hex(0x4169E1),
        }
    }
}

/// Point 3: pull the camera back, then spin freely on every axis
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomConfig {
    pub duration: Duration,
    pub camera: Vector3<f32>,
    /// Applied instantly when the transition starts
    pub model_position: Vector3<f32>,
    pub background: Rgb,
    /// Radians per frame once the zoom completes
    pub spin: Vector3<f32>,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1000),
            camera: Vector3::new(0.0, 0.0, 9.0),
            model_position: Vector3::new(0.0, 4.8, 0.0),
            background: Rgb::from_hex(0xF0E68C),
            spin: Vector3::new(0.01, 0.01, 0.01),
        }
    }
}

/// Point 2: background fade running alongside a fast X sweep
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeConfig {
    pub camera: Vector3<f32>,
    pub model_position: Vector3<f32>,
    pub background: Rgb,
    pub color_duration: Duration,
    /// Total X rotation swept, in radians
    pub sweep_angle: f32,
    pub sweep_duration: Duration,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            camera: Vector3::new(0.0, -0.2, 3.0),
            model_position: Vector3::new(0.0, -0.2, 0.0),
            background: Rgb::from_hex(0xDC143C),
            color_duration: Duration::from_millis(2000),
            sweep_angle: PI * 4.0,
            sweep_duration: Duration::from_millis(1800),
        }
    }
}

/// Per-frame increments of the ambient rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleConfig {
    pub y_speed: f32,
    pub x_speed: f32,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            y_speed: 0.01,
            x_speed: 0.005,
        }
    }
}

/// A white-ish directional light shining towards the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Scene lighting: two directional lights plus ambient fill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightConfig {
    pub key: DirectionalLight,
    pub back: DirectionalLight,
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            key: DirectionalLight {
                position: [0.0, 0.0, 5.0],
                color: [1.0, 1.0, 1.0],
                intensity: 0.8,
            },
            back: DirectionalLight {
                position: [-5.0, 0.0, -5.0],
                color: [1.0, 1.0, 1.0],
                intensity: 0.8,
            },
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.3,
        }
    }
}

/// Top-level configuration for the showcase
#[derive(Debug, Clone, PartialEq)]
pub struct ShowcaseConfig {
    pub title: String,
    pub window_size: (u32, u32),
    pub model_path: PathBuf,
    pub model_scale: f32,
    pub model_position: Vector3<f32>,
    pub camera: Vector3<f32>,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub background: Rgb,
    pub initial_point: Option<NavPoint>,
    pub idle: IdleConfig,
    pub lights: LightConfig,
    pub reset: ResetConfig,
    pub zoom: ZoomConfig,
    pub composite: CompositeConfig,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            title: "Vitrine".to_string(),
            window_size: (1200, 800),
            model_path: PathBuf::from("W3X.obj"),
            model_scale: 0.5,
            model_position: Vector3::new(0.0, -1.0, 0.0),
            camera: Vector3::new(0.0, -0.6, 3.0),
            fov_y: 75.0,
            background: Rgb::from_hex(0x4169E1),
            initial_point: Some(NavPoint::Point1),
            idle: IdleConfig::default(),
            lights: LightConfig::default(),
            reset: ResetConfig::default(),
            zoom: ZoomConfig::default(),
            composite: CompositeConfig::default(),
        }
    }
}

impl ShowcaseConfig {
    pub fn with_model_path(mut self, path: impl AsRef<Path>) -> Self {
        self.model_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    /// Sets the startup background from a `#RRGGBB` string
    pub fn with_background_hex(self, hex: &str) -> Result<Self> {
        Ok(self.with_background(Rgb::parse_hex(hex)?))
    }

    pub fn with_initial_point(mut self, point: Option<NavPoint>) -> Self {
        self.initial_point = point;
        self
    }

    pub fn with_reset(mut self, reset: ResetConfig) -> Self {
        self.reset = reset;
        self
    }

    pub fn with_zoom(mut self, zoom: ZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_composite(mut self, composite: CompositeConfig) -> Self {
        self.composite = composite;
        self
    }

    /// Resting pose given to the model right after it loads
    pub fn initial_model_transform(&self) -> ModelTransform {
        ModelTransform::new(self.model_position, self.model_scale)
    }

    /// Stage as it looks at startup; `model_loaded` is false when the asset failed
    pub fn initial_stage(&self, model_loaded: bool) -> Stage {
        let model = model_loaded.then(|| self.initial_model_transform());
        Stage::new(self.camera, model, self.background)
    }
}
