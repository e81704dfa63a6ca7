//! Render attachments
//!
//! The depth buffer and, when multisampling is on, the multisampled color
//! target that resolves into the swapchain image. Both are recreated
//! whenever the surface is resized.

/// Samples per pixel requested for the model pass
pub const SAMPLE_COUNT: u32 = 4;

/// `requested` if the color format can render and resolve at that count, else 1
pub fn pick_sample_count(flags: wgpu::TextureFormatFeatureFlags, requested: u32) -> u32 {
    if requested > 1
        && flags.sample_count_supported(requested)
        && flags.contains(wgpu::TextureFormatFeatureFlags::MULTISAMPLE_RESOLVE)
    {
        requested
    } else {
        1
    }
}

fn attachment_descriptor<'a>(
    label: &'a str,
    config: &wgpu::SurfaceConfiguration,
    format: wgpu::TextureFormat,
    sample_count: u32,
) -> wgpu::TextureDescriptor<'a> {
    wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    }
}

pub struct DepthTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    /// Standard depth buffer format used by the render pipeline
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Creates a depth texture matching the surface configuration
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
        label: &str,
    ) -> Self {
        let texture = device.create_texture(&attachment_descriptor(
            label,
            config,
            Self::FORMAT,
            sample_count,
        ));
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }
}

/// Multisampled color target resolved into the surface texture
pub struct MsaaTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl MsaaTarget {
    /// Returns `None` when `sample_count` is 1 and the pass renders straight to the surface
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> Option<Self> {
        if sample_count <= 1 {
            return None;
        }
        let texture = device.create_texture(&attachment_descriptor(
            "msaa_color_texture",
            config,
            config.format,
            sample_count,
        ));
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Some(Self { texture, view })
    }
}
