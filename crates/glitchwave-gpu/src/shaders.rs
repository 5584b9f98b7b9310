//! WGSL sources for the three fragment programs.
//!
//! Every module shares [`PRELUDE`]: the uniform block, a pass-through vertex
//! shader for the static quad in [`QUAD_VERTICES`], and `frag_uv`, which
//! flips `@builtin(position)` (top-left origin) into a bottom-left origin so
//! the patterns are oriented like their GL counterparts.

use glitchwave_core::ShaderKind;

/// Two triangles covering clip space.
pub const QUAD_VERTICES: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

pub const PRELUDE: &str = r#"
struct Uniforms {
    time:        f32,
    audio_level: f32,
    resolution:  vec2<f32>,
    frequency:   f32,
    speed:       f32,
    intensity:   f32,
    scale:       f32,
};

@group(0) @binding(0) var<uniform> globals: Uniforms;

@vertex
fn vs_main(@location(0) position: vec2<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 0.0, 1.0);
}

fn frag_uv(pos: vec4<f32>) -> vec2<f32> {
    let frag = vec2<f32>(pos.x, globals.resolution.y - pos.y);
    return frag / globals.resolution;
}
"#;

pub const OSCILLATOR_WGSL: &str = r#"
@fragment
fn fs_main(@builtin(position) pos: vec4<f32>) -> @location(0) vec4<f32> {
    let uv = frag_uv(pos);
    let fs = globals.frequency * globals.scale;

    let wave  = sin(uv.x * fs + globals.time * globals.speed * 10.0) * 0.5 + 0.5;
    let wave2 = cos(uv.y * fs * 0.7 + globals.time * globals.speed * 8.0) * 0.5 + 0.5;

    let color = vec3<f32>(
        wave * globals.intensity,
        wave2 * globals.intensity * 0.8,
        (wave + wave2) * 0.5 * globals.intensity
    );
    return vec4<f32>(color, 1.0);
}
"#;

pub const NOISE_WGSL: &str = r#"
fn random(st: vec2<f32>) -> f32 {
    return fract(sin(dot(st, vec2<f32>(12.9898, 78.233))) * 43758.5453123);
}

fn value_noise(st: vec2<f32>) -> f32 {
    let i = floor(st);
    let f = fract(st);
    let a = random(i);
    let b = random(i + vec2<f32>(1.0, 0.0));
    let c = random(i + vec2<f32>(0.0, 1.0));
    let d = random(i + vec2<f32>(1.0, 1.0));
    let w = f * f * (3.0 - 2.0 * f);
    return mix(a, b, w.x) + (c - a) * w.y * (1.0 - w.x) + (d - b) * w.x * w.y;
}

@fragment
fn fs_main(@builtin(position) pos: vec4<f32>) -> @location(0) vec4<f32> {
    let uv = frag_uv(pos);
    let n = value_noise(uv * globals.frequency * globals.scale + globals.time * globals.speed);
    return vec4<f32>(vec3<f32>(n * globals.intensity), 1.0);
}
"#;

pub const AUDIO_REACTIVE_WGSL: &str = r#"
@fragment
fn fs_main(@builtin(position) pos: vec4<f32>) -> @location(0) vec4<f32> {
    let uv = frag_uv(pos);
    let dist = length(uv - vec2<f32>(0.5));
    let a = globals.audio_level;

    let wave = sin(dist * globals.frequency * globals.scale
                   + globals.time * globals.speed * 5.0
                   + a * 20.0) * 0.5 + 0.5;
    let k = wave * globals.intensity;

    return vec4<f32>(k * (1.0 + a), k * 0.7, k * (0.5 + a * 0.5), 1.0);
}
"#;

/// Full module source (prelude + fragment stage) for one program.
pub fn source(kind: ShaderKind) -> String {
    let body = match kind {
        ShaderKind::Oscillator => OSCILLATOR_WGSL,
        ShaderKind::Noise => NOISE_WGSL,
        ShaderKind::AudioReactive => AUDIO_REACTIVE_WGSL,
    };
    format!("{PRELUDE}\n{body}")
}
