use glitchwave_core::ShaderKind;
use wgpu::util::DeviceExt;
use wgpu::{BindGroup, Buffer, Device, Queue, RenderPipeline, TextureFormat, TextureView};

use crate::shaders::{self, QUAD_VERTICES};
use crate::uniforms::Uniforms;

const QUAD_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

/// Holds one render pipeline per shader program plus the GPU resources
/// shared across all of them: a uniform buffer, its bind group, and the
/// static full-screen quad.
pub struct ShaderPrograms {
    pub oscillator: RenderPipeline,
    pub noise: RenderPipeline,
    pub audio_reactive: RenderPipeline,

    bind_group: BindGroup,
    uniform_buf: Buffer,
    quad_buf: Buffer,
}

impl ShaderPrograms {
    pub fn new(device: &Device, target_format: TextureFormat) -> Self {
        // --- bind group layout -------------------------------------------------
        // binding 0 : Uniforms uniform buffer, read by both stages
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("synth_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("synth_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // --- buffers -----------------------------------------------------------
        let uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("synth_uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let quad_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("fullscreen_quad"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("synth_bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buf.as_entire_binding(),
            }],
        });

        // --- pipelines --------------------------------------------------------
        let make = |kind: ShaderKind| {
            let label = kind.name();
            let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label),
                source: wgpu::ShaderSource::Wgsl(shaders::source(kind).into()),
            });
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &module,
                    entry_point: "vs_main",
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &QUAD_ATTRIBUTES,
                    }],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &module,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: target_format,
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
                multiview: None,
                cache: None,
            })
        };

        log::debug!("built shader programs for {target_format:?}");

        Self {
            oscillator: make(ShaderKind::Oscillator),
            noise: make(ShaderKind::Noise),
            audio_reactive: make(ShaderKind::AudioReactive),
            bind_group,
            uniform_buf,
            quad_buf,
        }
    }

    /// Upload uniforms and record one render pass drawing the quad into
    /// `view`. `clear` picks between clearing the target and loading it.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        queue: &Queue,
        view: &TextureView,
        kind: ShaderKind,
        uniforms: &Uniforms,
        clear: Option<wgpu::Color>,
    ) {
        queue.write_buffer(&self.uniform_buf, 0, bytemuck::bytes_of(uniforms));

        let load = match clear {
            Some(color) => wgpu::LoadOp::Clear(color),
            None => wgpu::LoadOp::Load,
        };

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(kind.name()),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(self.pipeline_for(kind));
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.quad_buf.slice(..));
        pass.draw(0..QUAD_VERTICES.len() as u32, 0..1);
    }

    pub fn pipeline_for(&self, kind: ShaderKind) -> &RenderPipeline {
        match kind {
            ShaderKind::Oscillator => &self.oscillator,
            ShaderKind::Noise => &self.noise,
            ShaderKind::AudioReactive => &self.audio_reactive,
        }
    }
}
