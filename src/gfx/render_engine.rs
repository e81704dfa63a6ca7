//! WGPU-based rendering engine
//!
//! Owns the surface, device, depth buffer and the single model pipeline.
//! Each frame it clears to the stage background, draws the model (when one
//! loaded) and hands the encoder to the overlay callback.

use std::{iter, sync::Arc};

use log::{error, info, warn};
use wgpu::TextureFormat;

use super::{
    camera::CameraUniform,
    depth_texture::{pick_sample_count, DepthTexture, MsaaTarget, SAMPLE_COUNT},
    global_bindings::GlobalBindings,
    model::{DrawModel, Model},
    vertex::Vertex3D,
};
use crate::config::LightConfig;
use crate::error::{Result, VitrineError};
use crate::stage::Rgb;
use crate::wgpu_utils::single_uniform_layout;

const GLOBALS_GROUP: u32 = 0;
const TRANSFORM_GROUP: u32 = 1;

/// Idle and free-spin speeds are per frame, so frames must follow the display refresh
pub const PRESENT_MODE: wgpu::PresentMode = wgpu::PresentMode::AutoVsync;

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: DepthTexture,
    msaa_target: Option<MsaaTarget>,
    sample_count: u32,
    format: TextureFormat,

    pipeline: wgpu::RenderPipeline,
    transform_layout: wgpu::BindGroupLayout,
    global_bindings: GlobalBindings,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `lights` - Scene lighting baked into the global uniforms
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        lights: LightConfig,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        // Colors are authored as plain hex values, so keep the surface linear
        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(VitrineError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: PRESENT_MODE,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count =
            pick_sample_count(adapter.get_texture_format_features(format).flags, SAMPLE_COUNT);
        let depth_texture = DepthTexture::new(&device, &config, sample_count, "depth_texture");
        let msaa_target = MsaaTarget::new(&device, &config, sample_count);
        info!("surface {format:?}, {sample_count}x multisampling");

        let global_bindings = GlobalBindings::new(&device, CameraUniform::default(), lights);
        let transform_layout = single_uniform_layout(
            &device,
            wgpu::ShaderStages::VERTEX,
            "Transform Bind Group Layout",
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Model Pipeline Layout"),
            bind_group_layouts: &[global_bindings.layout(), &transform_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Model Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex3D::desc()],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
                unclipped_depth: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthTexture::FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        });

        Ok(RenderEngine {
            device: device.into(),
            config,
            format,
            surface,
            queue: queue.into(),
            pipeline,
            transform_layout,
            depth_texture,
            msaa_target,
            sample_count,
            global_bindings,
        })
    }

    /// Renders one frame, then lets `draw_overlay` record into the same encoder
    pub fn render_frame_with_ui<F>(&mut self, model: Option<&Model>, background: Rgb, draw_overlay: F)
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(err) => {
                error!("failed to acquire surface texture: {err}");
                return;
            }
        };

        let surface_texture_view =
            surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor {
                    format: Some(self.format),
                    ..Default::default()
                });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // With multisampling the pass draws into the MSAA target and resolves to the surface
        let (color_view, resolve_target) = match &self.msaa_target {
            Some(target) => (&target.view, Some(&surface_texture_view)),
            None => (&surface_texture_view, None),
        };

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(background.into()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(model) = model {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_bind_group(GLOBALS_GROUP, self.global_bindings.bind_group(), &[]);
                render_pass.draw_model(model, TRANSFORM_GROUP);
            }
        }

        draw_overlay(
            &self.device,
            &self.queue,
            &mut encoder,
            &surface_texture_view,
        );

        self.queue.submit(iter::once(encoder.finish()));
        surface_texture.present();
    }

    /// Pushes this frame's camera into the global uniforms
    pub fn update(&mut self, camera_uniform: CameraUniform) {
        self.global_bindings
            .update_camera(&self.queue, camera_uniform);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            DepthTexture::new(&self.device, &self.config, self.sample_count, "depth_texture");
        self.msaa_target = MsaaTarget::new(&self.device, &self.config, self.sample_count);
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> TextureFormat {
        self.format
    }

    pub fn transform_layout(&self) -> &wgpu::BindGroupLayout {
        &self.transform_layout
    }
}
