//! # User Interface Module
//!
//! Dear ImGui overlay for the showcase. It only carries the navigation
//! points; everything else on screen is the 3D scene.
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu
//! - [`navigation_panel`] - The row of point indicators
//!
//! Pointer events go to the overlay first. While the cursor is over the
//! panel, ImGui captures it and the click never reaches the scene.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::navigation_panel;
