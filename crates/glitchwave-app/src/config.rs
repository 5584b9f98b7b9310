use clap::Parser;
use glitchwave_core::Features;

#[derive(Parser, Debug, Clone)]
#[command(name = "glitchwave", version, about = "Real-time visual synthesizer with audio-reactive presets")]
pub struct Config {
    /// Preset loaded at startup; unknown ids fall back to `oscillator`.
    #[arg(long, default_value = "oscillator")]
    pub preset: String,

    /// Never open the microphone; the audio preset uses a synthetic level.
    #[arg(long, default_value_t = false)]
    pub no_audio: bool,

    /// Hide the code panel and its toggle button.
    #[arg(long, default_value_t = false)]
    pub no_editor: bool,

    /// Shorthand for `--no-audio --no-editor`.
    #[arg(long, default_value_t = false)]
    pub simple: bool,

    /// Case-insensitive substring of the input device name.
    #[arg(long)]
    pub device: Option<String>,

    #[arg(long, default_value_t = false)]
    pub list_devices: bool,

    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    #[arg(long, default_value_t = 720)]
    pub height: u32,

    #[arg(long, default_value_t = false)]
    pub skip_welcome: bool,

    /// Seed for the randomize button; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Config {
    pub fn features(&self) -> Features {
        Features {
            audio: !(self.simple || self.no_audio),
            editor: !(self.simple || self.no_editor),
        }
    }

    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("glitchwave").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn defaults() {
        let c = parse(&[]);
        assert_eq!(c.preset, "oscillator");
        assert_eq!((c.width, c.height), (1280, 720));
        assert_eq!(c.features(), Features::FULL);
        assert!(!c.skip_welcome);
        assert!(c.device.is_none());
    }

    #[test]
    fn simple_turns_both_features_off() {
        assert_eq!(parse(&["--simple"]).features(), Features::SIMPLE);
    }

    #[test]
    fn features_toggle_independently() {
        let c = parse(&["--no-audio"]);
        assert_eq!(c.features(), Features { audio: false, editor: true });
        let c = parse(&["--no-editor"]);
        assert_eq!(c.features(), Features { audio: true, editor: false });
    }

    #[test]
    fn preset_and_device_are_free_strings() {
        let c = parse(&["--preset", "plasma", "--device", "usb"]);
        assert_eq!(c.preset, "plasma");
        assert_eq!(c.device.as_deref(), Some("usb"));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let c = parse(&["--seed", "12"]);
        assert_eq!(c.rng().u64(..), c.rng().u64(..));
    }

    #[test]
    fn rejects_non_numeric_size() {
        let err = Config::try_parse_from(["glitchwave", "--width", "wide"]);
        assert!(err.is_err());
    }
}
