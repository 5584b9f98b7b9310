use crate::params::ParameterSet;
use crate::shader::ShaderKind;

/// The six curated starting points offered by the preset buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Oscillator,
    Noise,
    Webcam,
    Audio,
    Kaleidoscope,
    Fractal,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Oscillator,
        Preset::Noise,
        Preset::Webcam,
        Preset::Audio,
        Preset::Kaleidoscope,
        Preset::Fractal,
    ];

    /// Stable string identifier, as carried by `data-preset` on the buttons.
    pub fn id(self) -> &'static str {
        match self {
            Preset::Oscillator => "oscillator",
            Preset::Noise => "noise",
            Preset::Webcam => "webcam",
            Preset::Audio => "audio",
            Preset::Kaleidoscope => "kaleidoscope",
            Preset::Fractal => "fractal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::Oscillator => "OSCILLATOR",
            Preset::Noise => "NOISE",
            Preset::Webcam => "WEBCAM",
            Preset::Audio => "AUDIO",
            Preset::Kaleidoscope => "KALEIDOSCOPE",
            Preset::Fractal => "FRACTAL",
        }
    }

    pub fn from_id(id: &str) -> Option<Preset> {
        Preset::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Like [`Preset::from_id`], but unknown ids fall back to the oscillator.
    pub fn resolve(id: &str) -> Preset {
        Preset::from_id(id).unwrap_or_else(|| {
            log::debug!("unknown preset {id:?}, using oscillator");
            Preset::Oscillator
        })
    }

    pub fn defaults(self) -> ParameterSet {
        match self {
            Preset::Oscillator => ParameterSet::new(20.0, 0.1, 1.0, 1.0),
            Preset::Noise => ParameterSet::new(10.0, 0.05, 0.8, 2.0),
            Preset::Webcam => ParameterSet::new(5.0, 0.02, 1.2, 1.5),
            Preset::Audio => ParameterSet::new(15.0, 0.2, 1.5, 1.2),
            Preset::Kaleidoscope => ParameterSet::new(30.0, 0.3, 1.3, 0.8),
            Preset::Fractal => ParameterSet::new(40.0, 0.08, 1.1, 3.0),
        }
    }

    /// Which of the three shader programs draws this preset.
    ///
    /// Webcam has no video-sampling program; it draws through the oscillator.
    pub fn shader(self) -> ShaderKind {
        match self {
            Preset::Oscillator | Preset::Kaleidoscope | Preset::Fractal | Preset::Webcam => {
                ShaderKind::Oscillator
            }
            Preset::Noise => ShaderKind::Noise,
            Preset::Audio => ShaderKind::AudioReactive,
        }
    }

    pub fn requires_camera(self) -> bool {
        self == Preset::Webcam
    }

    /// Hydra-style pseudo-code shown in the code panel. Decorative only.
    pub fn description(self, p: &ParameterSet) -> String {
        let (f, s, i, sc) = (p.frequency, p.speed, p.intensity, p.scale);
        match self {
            Preset::Oscillator => format!("// Oscillator Visual\nosc({f}, {s}, {i}).out()"),
            Preset::Noise => format!("// Noise Field\nnoise({f}, {s}).out()"),
            Preset::Webcam => format!("// Webcam Input\ns0.initCam()\nsrc(s0).scale({sc}).out()"),
            Preset::Audio => {
                format!("// Audio Reactive\nosc(() => a.fft[0] * {f}, {s}, {i}).out()")
            }
            Preset::Kaleidoscope => format!(
                "// Kaleidoscope Effect\nosc({f}, {s}, {i})\n  .kaleid(4)\n  .out()"
            ),
            Preset::Fractal => format!(
                "// Fractal Pattern\nnoise({f}, {s})\n  .scale({sc})\n  .modulate(osc(10, 0.1))\n  .out()"
            ),
        }
    }
}
