pub mod pipeline;
pub mod recorder;
pub mod shaders;
pub mod uniforms;

pub use pipeline::ShaderPrograms;
pub use recorder::PassRecorder;
pub use uniforms::Uniforms;
