use glitchwave_core::FrameInputs;

/// All per-frame data uploaded to the GPU as a single uniform buffer.
/// Must match the `Uniforms` struct in `shaders::PRELUDE`.
/// `repr(C)` + `bytemuck` ensures safe casting to `&[u8]`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    pub time: f32,
    pub audio_level: f32,
    pub resolution: [f32; 2], // 8-byte aligned, matches vec2<f32>
    pub frequency: f32,
    pub speed: f32,
    pub intensity: f32,
    pub scale: f32,
}

impl From<&FrameInputs> for Uniforms {
    fn from(inputs: &FrameInputs) -> Self {
        let p = inputs.params;
        Self {
            time: inputs.time,
            audio_level: inputs.audio_level,
            resolution: inputs.resolution.to_array(),
            frequency: p.frequency,
            speed: p.speed,
            intensity: p.intensity,
            scale: p.scale,
        }
    }
}
