use std::fmt;

use crate::params::{ParamName, ParameterSet, UnknownParameter};
use crate::presets::Preset;
use crate::sources::{SlotId, SourceSlots};
use crate::transport::{PlayState, Transport};

/// Optional parts of the synthesizer. The full build has both on; the
/// stripped-down "simple" build has neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub audio: bool,
    pub editor: bool,
}

impl Features {
    pub const FULL: Features = Features {
        audio: true,
        editor: true,
    };
    pub const SIMPLE: Features = Features {
        audio: false,
        editor: false,
    };
}

impl Default for Features {
    fn default() -> Self {
        Self::FULL
    }
}

/// Text of the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Preset(Preset),
    Randomized,
    Playing,
    Paused,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Preset(p) => write!(f, "STATUS: {}_", p.label()),
            Status::Randomized => f.write_str("STATUS: RANDOMIZED_"),
            Status::Playing => f.write_str("STATUS: PLAYING_"),
            Status::Paused => f.write_str("STATUS: PAUSED_"),
        }
    }
}

/// The synthesizer instance: parameter store, active preset, clock and
/// status. Owned by whatever composes the UI and the render loop.
#[derive(Debug, Clone)]
pub struct Synth {
    params: ParameterSet,
    active: Preset,
    transport: Transport,
    status: Status,
    sources: SourceSlots,
    features: Features,
}

impl Synth {
    pub fn new(features: Features) -> Self {
        let active = Preset::Oscillator;
        Self {
            params: active.defaults(),
            active,
            transport: Transport::new(),
            status: Status::Preset(active),
            sources: SourceSlots::new(),
            features,
        }
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn active(&self) -> Preset {
        self.active
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    pub fn sources(&self) -> &SourceSlots {
        &self.sources
    }

    pub fn sources_mut(&mut self) -> &mut SourceSlots {
        &mut self.sources
    }

    pub fn time(&self) -> f32 {
        self.transport.time()
    }

    /// Load a preset by id. Unknown ids load the oscillator instead; the
    /// resolved preset is returned.
    pub fn load_preset(&mut self, id: &str) -> Preset {
        let preset = Preset::resolve(id);
        self.load(preset);
        preset
    }

    pub fn load(&mut self, preset: Preset) {
        log::info!("Loading preset: {}", preset.id());
        self.active = preset;
        self.params = preset.defaults();
        self.status = Status::Preset(preset);
        if preset.requires_camera() && self.sources.request(SlotId::S0) {
            log::debug!("webcam preset requested slot s0");
        }
    }

    pub fn set_parameter(&mut self, name: ParamName, value: f32) {
        self.params.set(name, value);
    }

    pub fn set_parameter_by_name(&mut self, name: &str, value: f32) -> Result<(), UnknownParameter> {
        let name: ParamName = name.parse()?;
        self.set_parameter(name, value);
        Ok(())
    }

    pub fn randomize(&mut self, rng: &mut fastrand::Rng) {
        self.params = ParameterSet::random(rng);
        self.status = Status::Randomized;
        log::debug!("randomized parameters: {:?}", self.params);
    }

    pub fn toggle_play(&mut self) -> PlayState {
        let state = self.transport.toggle();
        self.status = match state {
            PlayState::Playing => Status::Playing,
            PlayState::Paused => Status::Paused,
        };
        state
    }

    /// Text for the code panel, regenerated from the live parameters.
    pub fn code_description(&self) -> String {
        self.active.description(&self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SlotState;
    use crate::transport::FRAME_STEP;

    fn synth() -> Synth {
        Synth::new(Features::FULL)
    }

    #[test]
    fn starts_on_oscillator_playing() {
        let s = synth();
        assert_eq!(s.active(), Preset::Oscillator);
        assert_eq!(*s.params(), Preset::Oscillator.defaults());
        assert!(s.transport().is_playing());
    }

    #[test]
    fn every_preset_loads_its_defaults() {
        let mut s = synth();
        for p in Preset::ALL {
            s.randomize(&mut fastrand::Rng::with_seed(1));
            assert_eq!(s.load_preset(p.id()), p);
            assert_eq!(s.active(), p);
            assert_eq!(*s.params(), p.defaults());
        }
    }

    #[test]
    fn unknown_preset_matches_oscillator() {
        let mut a = synth();
        let mut b = synth();
        a.load_preset("noise");
        b.load_preset("noise");
        assert_eq!(a.load_preset("vaporwave"), Preset::Oscillator);
        b.load_preset("oscillator");
        assert_eq!(a.params(), b.params());
        assert_eq!(a.active(), b.active());
    }

    #[test]
    fn unknown_preset_status_names_the_fallback() {
        let mut s = synth();
        s.load_preset("noise");
        s.load_preset("vaporwave");
        assert_eq!(s.status(), Status::Preset(Preset::Oscillator));
        assert_eq!(s.status().to_string(), "STATUS: OSCILLATOR_");
    }

    #[test]
    fn noise_scenario() {
        let mut s = synth();
        s.load_preset("noise");
        assert_eq!(*s.params(), ParameterSet::new(10.0, 0.05, 0.8, 2.0));
        assert_eq!(s.status().to_string(), "STATUS: NOISE_");
    }

    #[test]
    fn set_parameter_scenario() {
        let mut s = synth();
        s.load_preset("oscillator");
        s.set_parameter(ParamName::Scale, 2.5);
        assert_eq!(*s.params(), ParameterSet::new(20.0, 0.1, 1.0, 2.5));
    }

    #[test]
    fn set_parameter_by_name() {
        let mut s = synth();
        s.set_parameter_by_name("freq", 33.0).unwrap();
        assert_eq!(s.params().frequency, 33.0);
        let err = s.set_parameter_by_name("hue", 1.0).unwrap_err();
        assert_eq!(err.0, "hue");
        assert_eq!(s.params().frequency, 33.0);
    }

    #[test]
    fn randomize_sets_status_and_ranges() {
        let mut s = synth();
        let mut rng = fastrand::Rng::with_seed(99);
        for _ in 0..200 {
            s.randomize(&mut rng);
            let p = s.params();
            assert!(p.frequency >= 5.0 && p.frequency < 55.0);
            assert!(p.speed >= 0.01 && p.speed < 0.51);
            assert!(p.intensity >= 0.5 && p.intensity < 2.5);
            assert!(p.scale >= 0.5 && p.scale < 4.5);
        }
        assert_eq!(s.status().to_string(), "STATUS: RANDOMIZED_");
        // Randomizing keeps the active preset, and therefore its shader.
        assert_eq!(s.active(), Preset::Oscillator);
    }

    #[test]
    fn toggle_play_updates_status_and_clock() {
        let mut s = synth();
        assert_eq!(s.toggle_play(), PlayState::Paused);
        assert_eq!(s.status().to_string(), "STATUS: PAUSED_");
        s.transport_mut().tick();
        assert_eq!(s.time(), 0.0);
        assert_eq!(s.toggle_play(), PlayState::Playing);
        assert_eq!(s.status().to_string(), "STATUS: PLAYING_");
        s.transport_mut().tick();
        assert_eq!(s.time(), FRAME_STEP);
    }

    #[test]
    fn webcam_requests_slot_once() {
        let mut s = synth();
        s.load_preset("webcam");
        assert_eq!(s.sources().state(SlotId::S0), SlotState::Requested);
        s.sources_mut().resolve(SlotId::S0, Err("denied"));
        s.load_preset("webcam");
        assert_eq!(s.sources().state(SlotId::S0), SlotState::Failed);
    }

    #[test]
    fn code_description_follows_active_preset() {
        let mut s = synth();
        s.load_preset("noise");
        s.set_parameter(ParamName::Frequency, 12.5);
        assert_eq!(s.code_description(), "// Noise Field\nnoise(12.5, 0.05).out()");
    }

    #[test]
    fn status_text_for_every_preset() {
        assert_eq!(Status::Preset(Preset::Kaleidoscope).to_string(), "STATUS: KALEIDOSCOPE_");
        assert_eq!(Status::Preset(Preset::Audio).to_string(), "STATUS: AUDIO_");
    }
}
