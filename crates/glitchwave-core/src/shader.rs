//! The three fragment programs, as CPU reference implementations.
//!
//! These mirror the WGSL in `glitchwave-gpu` line for line and are what the
//! tests pin the formulas against. `frag_coord` is in pixels with the origin
//! at the bottom-left corner and pixel centres at `+0.5`.

use glam::{Vec2, Vec3};

use crate::params::ParameterSet;

/// Which fragment program draws the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Oscillator,
    Noise,
    AudioReactive,
}

impl ShaderKind {
    pub const ALL: [ShaderKind; 3] = [
        ShaderKind::Oscillator,
        ShaderKind::Noise,
        ShaderKind::AudioReactive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShaderKind::Oscillator => "oscillator",
            ShaderKind::Noise => "noise",
            ShaderKind::AudioReactive => "audio_reactive",
        }
    }

    pub fn uses_audio(self) -> bool {
        self == ShaderKind::AudioReactive
    }
}

/// Everything a shader reads for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    pub time: f32,
    pub resolution: Vec2,
    pub params: ParameterSet,
    /// Zero unless the active shader is audio-reactive.
    pub audio_level: f32,
}

pub fn shade(kind: ShaderKind, frag_coord: Vec2, inputs: &FrameInputs) -> Vec3 {
    let uv = frag_coord / inputs.resolution;
    match kind {
        ShaderKind::Oscillator => oscillator(uv, inputs),
        ShaderKind::Noise => noise_field(uv, inputs),
        ShaderKind::AudioReactive => audio_reactive(uv, inputs),
    }
}

pub fn oscillator(uv: Vec2, inputs: &FrameInputs) -> Vec3 {
    let FrameInputs { time, params: p, .. } = *inputs;
    let wave = (uv.x * p.frequency * p.scale + time * p.speed * 10.0).sin() * 0.5 + 0.5;
    let wave2 = (uv.y * p.frequency * p.scale * 0.7 + time * p.speed * 8.0).cos() * 0.5 + 0.5;
    Vec3::new(
        wave * p.intensity,
        wave2 * p.intensity * 0.8,
        (wave + wave2) * 0.5 * p.intensity,
    )
}

pub fn noise_field(uv: Vec2, inputs: &FrameInputs) -> Vec3 {
    let FrameInputs { time, params: p, .. } = *inputs;
    let n = value_noise(uv * p.frequency * p.scale + Vec2::splat(time * p.speed));
    Vec3::splat(n * p.intensity)
}

pub fn audio_reactive(uv: Vec2, inputs: &FrameInputs) -> Vec3 {
    let FrameInputs {
        time,
        params: p,
        audio_level: a,
        ..
    } = *inputs;
    let dist = (uv - Vec2::splat(0.5)).length();
    let wave = (dist * p.frequency * p.scale + time * p.speed * 5.0 + a * 20.0).sin() * 0.5 + 0.5;
    Vec3::new(
        wave * p.intensity * (1.0 + a),
        wave * p.intensity * 0.7,
        wave * p.intensity * (0.5 + a * 0.5),
    )
}

// ---------------------------------------------------------------------------
// Value noise
// ---------------------------------------------------------------------------

/// GLSL `fract`: always in `[0, 1)`, also for negative input.
fn fract(x: f32) -> f32 {
    x - x.floor()
}

fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Sine hash of a lattice point, in `[0, 1)`.
pub fn hash(st: Vec2) -> f32 {
    fract(st.dot(Vec2::new(12.9898, 78.233)).sin() * 43758.547)
}

/// Smoothstep-interpolated value noise over the integer lattice.
pub fn value_noise(st: Vec2) -> f32 {
    let i = st.floor();
    let f = st - i;
    let a = hash(i);
    let b = hash(i + Vec2::new(1.0, 0.0));
    let c = hash(i + Vec2::new(0.0, 1.0));
    let d = hash(i + Vec2::new(1.0, 1.0));
    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);
    mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}
