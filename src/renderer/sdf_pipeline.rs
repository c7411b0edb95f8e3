//! SDF-based WebGPU render pipeline
//!
//! Renders the entire scene in fragment shader using signed distance fields.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::layout::FrameLayout;
use crate::consts::*;
use crate::sim::Scene;

/// Maximum number of knives drawn (stuck + thrown)
const MAX_KNIVES: usize = 8;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    resolution: [f32; 2],  // offset 0
    time: f32,             // offset 8
    screen_shake: f32,     // offset 12
    target_pos: [f32; 2],  // offset 16
    target_radius: f32,    // offset 24
    target_rotation: f32,  // offset 28
    target_variant: u32,   // offset 32
    target_visible: u32,   // offset 36
    left_half_y: f32,      // offset 40
    right_half_y: f32,     // offset 44
    half_gap: f32,         // offset 48
    knife_count: u32,      // offset 52
    dim: f32,              // offset 56 - darkens the arena behind overlays
    halves_visible: u32,   // offset 60
}

/// x, y, rotation, knife length
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct KnivesUniform {
    knives: [[f32; 4]; MAX_KNIVES],
}

// ============================================================================
// SDF RENDER STATE
// ============================================================================

pub struct SdfRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,

    globals_buffer: wgpu::Buffer,
    knives_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    pub size: (u32, u32),
    start_time: f64,
}

impl SdfRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sdf-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sdf_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("sdf_shader.wgsl").into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Globals {
                resolution: [width as f32, height as f32],
                time: 0.0,
                screen_shake: 0.0,
                target_pos: [TARGET_X, TARGET_Y],
                target_radius: TARGET_DIAMETER / 2.0,
                target_rotation: 0.0,
                target_variant: 0,
                target_visible: 0,
                left_half_y: TARGET_Y,
                right_half_y: TARGET_Y,
                half_gap: TARGET_HALF_GAP,
                knife_count: 0,
                dim: 0.0,
                halves_visible: 0,
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let knives_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("knives"),
            contents: bytemuck::bytes_of(&KnivesUniform::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sdf_bind_group_layout"),
            entries: &[uniform_entry(0), uniform_entry(1)],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sdf_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: knives_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sdf_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sdf_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[], // No vertex buffers - fullscreen triangle
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            knives_buffer,
            bind_group,
            size: (width, height),
            start_time: 0.0,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn set_start_time(&mut self, time: f64) {
        self.start_time = time;
    }

    /// Update GPU buffers from the frame layout and render
    pub fn render(
        &mut self,
        layout: &FrameLayout,
        screen_shake: f32,
        time: f64,
    ) -> Result<(), wgpu::SurfaceError> {
        let elapsed = ((time - self.start_time) / 1000.0) as f32;
        let knife_count = layout.knives.len().min(MAX_KNIVES) as u32;
        let (left_half_y, right_half_y) = layout.halves_y.unwrap_or((TARGET_Y, TARGET_Y));

        let globals = Globals {
            resolution: [self.size.0 as f32, self.size.1 as f32],
            time: elapsed,
            screen_shake,
            target_pos: [layout.target_pos.x, layout.target_pos.y],
            target_radius: TARGET_DIAMETER / 2.0,
            target_rotation: layout.target_rotation,
            target_variant: layout.target_variant,
            target_visible: layout.target_visible as u32,
            left_half_y,
            right_half_y,
            half_gap: TARGET_HALF_GAP,
            knife_count,
            dim: match layout.scene {
                Scene::Play => 0.0,
                Scene::Load | Scene::Pass | Scene::Over => 0.6,
            },
            halves_visible: layout.halves_y.is_some() as u32,
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let mut knives = KnivesUniform::zeroed();
        for (slot, knife) in knives.knives.iter_mut().zip(layout.knives.iter()) {
            *slot = [knife.pos.x, knife.pos.y, knife.rotation, KNIFE_LENGTH];
        }
        self.queue
            .write_buffer(&self.knives_buffer, 0, bytemuck::bytes_of(&knives));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sdf_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sdf_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_struct_sizes_match_shader() {
        assert_eq!(std::mem::size_of::<Globals>(), 64);
        assert_eq!(std::mem::size_of::<KnivesUniform>(), 16 * MAX_KNIVES);
    }
}
