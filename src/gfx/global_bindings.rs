//! Global uniform bindings for camera and lighting
//!
//! One uniform block bound at group 0 in the model pipeline. It carries the
//! camera matrices plus the two directional lights and the ambient term.

use crate::config::{DirectionalLight, LightConfig};
use crate::wgpu_utils::{single_resource_group, single_uniform_layout, UniformBuffer};

use super::camera::CameraUniform;

/// MUST match the `Globals` struct in `shader.wgsl` exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    // xyz = position, w = intensity
    key_light: [f32; 4],
    key_color: [f32; 4],
    back_light: [f32; 4],
    back_color: [f32; 4],
    // rgb = color, a = intensity
    ambient: [f32; 4],
}

impl GlobalUBOContent {
    pub fn new(camera: CameraUniform, lights: &LightConfig) -> Self {
        let pack = |light: &DirectionalLight| {
            (
                [
                    light.position[0],
                    light.position[1],
                    light.position[2],
                    light.intensity,
                ],
                [light.color[0], light.color[1], light.color[2], 1.0],
            )
        };
        let (key_light, key_color) = pack(&lights.key);
        let (back_light, back_color) = pack(&lights.back);

        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            key_light,
            key_color,
            back_light,
            back_color,
            ambient: [
                lights.ambient_color[0],
                lights.ambient_color[1],
                lights.ambient_color[2],
                lights.ambient_intensity,
            ],
        }
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Layout, buffer and bind group for the global uniforms
pub struct GlobalBindings {
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    ubo: GlobalUBO,
    lights: LightConfig,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, camera: CameraUniform, lights: LightConfig) -> Self {
        let layout = single_uniform_layout(
            device,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            "Globals Bind Group Layout",
        );
        let ubo = GlobalUBO::new(device, &GlobalUBOContent::new(camera, &lights));
        let bind_group =
            single_resource_group(device, &layout, ubo.binding_resource(), "Global Bind Group");

        Self {
            layout,
            bind_group,
            ubo,
            lights,
        }
    }

    /// Refreshes the camera part of the block; lights stay as configured
    pub fn update_camera(&mut self, queue: &wgpu::Queue, camera: CameraUniform) {
        self.ubo
            .update_content(queue, GlobalUBOContent::new(camera, &self.lights));
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
