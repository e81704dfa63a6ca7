//! # Graphics Module
//!
//! Everything needed to put the stage on screen: the camera, the loaded
//! model, the global uniforms and the render engine.
//!
//! - **Camera** ([`camera`]) - Perspective camera looking at the origin
//! - **Model** ([`model`]) - OBJ loading, mesh buffers and draw helpers
//! - **Global bindings** ([`global_bindings`]) - Camera + light uniform block
//! - **Render engine** ([`render_engine`]) - Surface, pipeline and frame submission
//!
//! None of this decides *what* the stage looks like; transitions mutate
//! [`Stage`](crate::stage::Stage) and the app copies it in here once per frame.

pub mod camera;
pub mod depth_texture;
pub mod global_bindings;
pub mod model;
pub mod render_engine;
pub mod vertex;

// Re-export commonly used types
pub use camera::{CameraUniform, ShowcaseCamera};
pub use model::Model;
pub use render_engine::RenderEngine;
