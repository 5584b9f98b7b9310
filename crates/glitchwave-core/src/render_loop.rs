use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::Vec2;

use crate::audio::AudioLevelProvider;
use crate::shader::{FrameInputs, ShaderKind};
use crate::synth::Synth;
use crate::RenderBackend;

pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Start/stop handle for a [`RenderLoop`]. Clones share the same flag.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    running: Arc<AtomicBool>,
}

impl LoopHandle {
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::AcqRel) {
            log::info!("render loop stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn(ShaderKind),
    Stopped,
}

/// One step of the per-frame procedure. The host calls [`RenderLoop::frame`]
/// from its vsync callback and keeps rescheduling while the handle runs.
pub struct RenderLoop {
    handle: LoopHandle,
    frames: u64,
}

impl RenderLoop {
    pub fn start() -> (Self, LoopHandle) {
        let handle = LoopHandle {
            running: Arc::new(AtomicBool::new(true)),
        };
        let lp = Self {
            handle: handle.clone(),
            frames: 0,
        };
        (lp, handle)
    }

    pub fn handle(&self) -> &LoopHandle {
        &self.handle
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance the clock, clear, and draw with the preset's shader.
    ///
    /// Backend errors are returned unhandled; the loop keeps no retry state.
    pub fn frame<B: RenderBackend>(
        &mut self,
        synth: &mut Synth,
        audio: &mut AudioLevelProvider,
        resolution: Vec2,
        backend: &mut B,
    ) -> Result<FrameOutcome, B::Error> {
        if !self.handle.is_running() {
            return Ok(FrameOutcome::Stopped);
        }

        let time = synth.transport_mut().tick();
        backend.clear(CLEAR_COLOR);

        let shader = synth.active().shader();
        let audio_level = if shader.uses_audio() {
            audio.level(time)
        } else {
            0.0
        };
        let inputs = FrameInputs {
            time,
            resolution,
            params: *synth.params(),
            audio_level,
        };
        backend.draw(shader, &inputs)?;

        self.frames += 1;
        Ok(FrameOutcome::Drawn(shader))
    }
}
