use std::fmt;

use crate::SpectrumSource;

/// Lowest frequency bins averaged into the level.
pub const LEVEL_BINS: usize = 32;

/// Synthetic level used whenever no microphone is capturing.
pub fn fallback_level(time: f32) -> f32 {
    (time * 2.0).sin() * 0.5 + 0.5
}

/// Mean of the first [`LEVEL_BINS`] bytes, normalised to `[0, 1]`.
///
/// Shorter spectra are averaged over what is there; an empty one is silent.
pub fn spectrum_level(bins: &[u8]) -> f32 {
    let low = &bins[..bins.len().min(LEVEL_BINS)];
    if low.is_empty() {
        return 0.0;
    }
    let sum: u32 = low.iter().map(|&b| b as u32).sum();
    (sum as f32 / low.len() as f32) / 255.0
}

enum State {
    Uninitialized,
    Capturing {
        source: Box<dyn SpectrumSource>,
        scratch: Vec<u8>,
    },
    Fallback,
}

/// Reduces microphone input to one scalar per frame.
///
/// `Uninitialized` becomes `Capturing` or `Fallback` exactly once; both are
/// terminal. Until capture is attached the synthetic fallback is used.
pub struct AudioLevelProvider {
    state: State,
}

impl Default for AudioLevelProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioLevelProvider {
    pub fn new() -> Self {
        Self {
            state: State::Uninitialized,
        }
    }

    /// A provider that never captures.
    pub fn disabled() -> Self {
        Self {
            state: State::Fallback,
        }
    }

    /// Resolve capture setup. Errors are logged and end in `Fallback`.
    pub fn attach<E: fmt::Display>(&mut self, setup: Result<Box<dyn SpectrumSource>, E>) {
        if !matches!(self.state, State::Uninitialized) {
            log::debug!("audio provider already resolved, ignoring attach");
            return;
        }
        self.state = match setup {
            Ok(source) => {
                let scratch = vec![0; source.bin_count()];
                log::info!("audio capture active ({} bins)", scratch.len());
                State::Capturing { source, scratch }
            }
            Err(err) => {
                log::warn!("microphone unavailable, using synthetic audio level: {err}");
                State::Fallback
            }
        };
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.state, State::Capturing { .. })
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self.state, State::Uninitialized)
    }

    /// Current level in `[0, 1]`, read fresh on every call.
    pub fn level(&mut self, time: f32) -> f32 {
        let raw = match &mut self.state {
            State::Capturing { source, scratch } => {
                source.byte_frequency_data(scratch);
                spectrum_level(scratch)
            }
            State::Uninitialized | State::Fallback => fallback_level(time),
        };
        raw.clamp(0.0, 1.0)
    }
}
