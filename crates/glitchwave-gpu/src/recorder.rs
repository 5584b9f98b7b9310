use glitchwave_core::{FrameInputs, RenderBackend, ShaderKind};
use wgpu::{CommandEncoder, Device, Queue, TextureView};

use crate::pipeline::ShaderPrograms;
use crate::uniforms::Uniforms;

/// [`RenderBackend`] over one frame's command encoder and target view.
///
/// `clear` is deferred into the load op of the following draw, so the pair
/// records a single render pass.
pub struct PassRecorder<'a> {
    pub device: &'a Device,
    pub queue: &'a Queue,
    pub programs: &'a ShaderPrograms,
    pub encoder: &'a mut CommandEncoder,
    pub view: &'a TextureView,
    clear: Option<wgpu::Color>,
}

impl<'a> PassRecorder<'a> {
    pub fn new(
        device: &'a Device,
        queue: &'a Queue,
        programs: &'a ShaderPrograms,
        encoder: &'a mut CommandEncoder,
        view: &'a TextureView,
    ) -> Self {
        Self {
            device,
            queue,
            programs,
            encoder,
            view,
            clear: None,
        }
    }
}

impl RenderBackend for PassRecorder<'_> {
    type Error = wgpu::Error;

    fn clear(&mut self, [r, g, b, a]: [f32; 4]) {
        self.clear = Some(wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        });
    }

    fn draw(&mut self, shader: ShaderKind, inputs: &FrameInputs) -> Result<(), wgpu::Error> {
        let uniforms = Uniforms::from(inputs);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        self.programs.draw(
            self.encoder,
            self.queue,
            self.view,
            shader,
            &uniforms,
            self.clear.take(),
        );
        match pollster::block_on(self.device.pop_error_scope()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
