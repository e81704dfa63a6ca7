//! Error types for the Vitrine showcase
//!
//! Everything that can fail at startup (window, GPU, asset) funnels into
//! [`VitrineError`]. Once the event loop runs, nothing in the frame path
//! returns an error: missing pieces degrade to no-ops.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while setting up or running the showcase
#[derive(Debug, Error)]
pub enum VitrineError {
    #[error("failed to load model `{path}`: {source}")]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("model `{0}` contains no meshes")]
    EmptyModel(PathBuf),

    #[error("invalid hex color `{0}`, expected `#RRGGBB`")]
    InvalidColor(String),

    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create render surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture format")]
    NoSurfaceFormat,
}

pub type Result<T> = std::result::Result<T, VitrineError>;
