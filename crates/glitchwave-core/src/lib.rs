pub mod audio;
pub mod params;
pub mod presets;
pub mod render_loop;
pub mod shader;
pub mod sources;
pub mod synth;
pub mod transport;

pub use params::{ParamName, ParameterSet, UnknownParameter};
pub use presets::Preset;
pub use shader::{FrameInputs, ShaderKind};
pub use synth::{Features, Status, Synth};

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A snapshot source of spectral magnitudes, one byte per frequency bin.
///
/// Implementations fill `out` with the most recent analysis frame, scaled the
/// way a Web Audio `AnalyserNode` scales `getByteFrequencyData` output.
pub trait SpectrumSource {
    fn byte_frequency_data(&mut self, out: &mut [u8]);

    /// Number of bins a full read yields.
    fn bin_count(&self) -> usize;
}

/// The rendering collaborator the render loop draws through.
///
/// The loop never manages GPU resources itself; it asks the backend to clear
/// and then to draw one of the fixed shader programs with the frame inputs.
pub trait RenderBackend {
    type Error;

    fn clear(&mut self, color: [f32; 4]);
    fn draw(&mut self, shader: ShaderKind, inputs: &FrameInputs) -> Result<(), Self::Error>;
}
