// src/lib.rs
//! Vitrine
//!
//! A landing-scene showcase built on wgpu and winit: one rotating 3D model,
//! three navigation points, and animated camera, model and background
//! transitions between them.

pub mod animation;
pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod navigation;
pub mod stage;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::VitrineApp;
pub use config::ShowcaseConfig;
pub use error::{Result, VitrineError};

/// Creates a showcase with the default configuration
pub fn default() -> Result<VitrineApp> {
    VitrineApp::new(ShowcaseConfig::default())
}
