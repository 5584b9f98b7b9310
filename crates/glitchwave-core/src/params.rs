use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// ParameterSet: the four live knobs every shader reads
// ---------------------------------------------------------------------------

/// The four knobs. The store does not clamp; only the sliders are bounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
    pub frequency: f32,
    pub speed: f32,
    pub intensity: f32,
    pub scale: f32,
}

impl ParameterSet {
    pub const fn new(frequency: f32, speed: f32, intensity: f32, scale: f32) -> Self {
        Self {
            frequency,
            speed,
            intensity,
            scale,
        }
    }

    pub fn get(&self, name: ParamName) -> f32 {
        match name {
            ParamName::Frequency => self.frequency,
            ParamName::Speed => self.speed,
            ParamName::Intensity => self.intensity,
            ParamName::Scale => self.scale,
        }
    }

    pub fn set(&mut self, name: ParamName, value: f32) {
        match name {
            ParamName::Frequency => self.frequency = value,
            ParamName::Speed => self.speed = value,
            ParamName::Intensity => self.intensity = value,
            ParamName::Scale => self.scale = value,
        }
    }

    /// Draw every knob independently from its own uniform range.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        let mut draw = |name: ParamName| {
            let (lo, hi) = name.random_range();
            let v = lo + rng.f32() * (hi - lo);
            // f32 rounding can land exactly on the open upper bound.
            if v < hi {
                v
            } else {
                lo
            }
        };
        Self {
            frequency: draw(ParamName::Frequency),
            speed: draw(ParamName::Speed),
            intensity: draw(ParamName::Intensity),
            scale: draw(ParamName::Scale),
        }
    }
}

// ---------------------------------------------------------------------------
// ParamName
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamName {
    Frequency,
    Speed,
    Intensity,
    Scale,
}

impl ParamName {
    pub const ALL: [ParamName; 4] = [
        ParamName::Frequency,
        ParamName::Speed,
        ParamName::Intensity,
        ParamName::Scale,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParamName::Frequency => "frequency",
            ParamName::Speed => "speed",
            ParamName::Intensity => "intensity",
            ParamName::Scale => "scale",
        }
    }

    /// Prefix of the slider / value-label element ids (`freq-slider`, ...).
    pub fn control_prefix(self) -> &'static str {
        match self {
            ParamName::Frequency => "freq",
            ParamName::Speed => "speed",
            ParamName::Intensity => "intensity",
            ParamName::Scale => "scale",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParamName::Frequency => "FREQUENCY",
            ParamName::Speed => "SPEED",
            ParamName::Intensity => "INTENSITY",
            ParamName::Scale => "SCALE",
        }
    }

    /// Bounds of the UI slider. The store itself accepts any value.
    pub fn slider_range(self) -> RangeInclusive<f32> {
        match self {
            ParamName::Frequency => 1.0..=100.0,
            ParamName::Speed => 0.0..=1.0,
            ParamName::Intensity => 0.0..=3.0,
            ParamName::Scale => 0.1..=5.0,
        }
    }

    /// Half-open `[lo, hi)` range used by randomization.
    pub fn random_range(self) -> (f32, f32) {
        match self {
            ParamName::Frequency => (5.0, 55.0),
            ParamName::Speed => (0.01, 0.51),
            ParamName::Intensity => (0.5, 2.5),
            ParamName::Scale => (0.5, 4.5),
        }
    }

    /// Text shown in the paired `*-value` label.
    pub fn format_value(self, value: f32) -> String {
        match self {
            ParamName::Frequency | ParamName::Scale => format!("{value:.1}"),
            ParamName::Speed | ParamName::Intensity => format!("{value:.2}"),
        }
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamName {
    type Err = UnknownParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frequency" | "freq" => Ok(ParamName::Frequency),
            "speed" => Ok(ParamName::Speed),
            "intensity" => Ok(ParamName::Intensity),
            "scale" => Ok(ParamName::Scale),
            other => Err(UnknownParameter(other.to_string())),
        }
    }
}

/// Returned when a parameter is addressed by a name outside the four knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownParameter(pub String);

impl fmt::Display for UnknownParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown parameter: {:?}", self.0)
    }
}

impl std::error::Error for UnknownParameter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_including_slider_prefix() {
        assert_eq!("frequency".parse(), Ok(ParamName::Frequency));
        assert_eq!("freq".parse(), Ok(ParamName::Frequency));
        assert_eq!("speed".parse(), Ok(ParamName::Speed));
        assert_eq!("intensity".parse(), Ok(ParamName::Intensity));
        assert_eq!("scale".parse(), Ok(ParamName::Scale));
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "hue".parse::<ParamName>().unwrap_err();
        assert_eq!(err, UnknownParameter("hue".into()));
        assert_eq!(err.to_string(), "unknown parameter: \"hue\"");
    }

    #[test]
    fn control_prefix_round_trips_through_parse() {
        for name in ParamName::ALL {
            assert_eq!(name.control_prefix().parse(), Ok(name));
        }
    }

    #[test]
    fn set_touches_only_one_field() {
        let mut p = ParameterSet::new(1.0, 2.0, 3.0, 4.0);
        p.set(ParamName::Intensity, 9.0);
        assert_eq!(p, ParameterSet::new(1.0, 2.0, 9.0, 4.0));
        assert_eq!(p.get(ParamName::Intensity), 9.0);
    }

    #[test]
    fn set_does_not_clamp() {
        let mut p = ParameterSet::new(1.0, 2.0, 3.0, 4.0);
        p.set(ParamName::Frequency, 1000.0);
        p.set(ParamName::Speed, -5.0);
        assert_eq!(p.frequency, 1000.0);
        assert_eq!(p.speed, -5.0);
    }

    #[test]
    fn random_stays_in_half_open_ranges() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..2000 {
            let p = ParameterSet::random(&mut rng);
            for name in ParamName::ALL {
                let (lo, hi) = name.random_range();
                let v = p.get(name);
                assert!(v >= lo && v < hi, "{name} out of range: {v}");
            }
        }
    }

    #[test]
    fn random_draws_are_not_locked_together() {
        // With independent draws, the per-knob position within its range
        // should not be identical across all four knobs.
        let mut rng = fastrand::Rng::with_seed(42);
        let p = ParameterSet::random(&mut rng);
        let pos: Vec<f32> = ParamName::ALL
            .iter()
            .map(|&n| {
                let (lo, hi) = n.random_range();
                (p.get(n) - lo) / (hi - lo)
            })
            .collect();
        assert!(pos.windows(2).any(|w| (w[0] - w[1]).abs() > 1e-3), "{pos:?}");
    }

    #[test]
    fn format_value_precision() {
        assert_eq!(ParamName::Frequency.format_value(20.0), "20.0");
        assert_eq!(ParamName::Speed.format_value(0.05), "0.05");
        assert_eq!(ParamName::Intensity.format_value(1.0), "1.00");
        assert_eq!(ParamName::Scale.format_value(2.54), "2.5");
    }

    #[test]
    fn slider_ranges_contain_every_random_range() {
        for name in ParamName::ALL {
            let (lo, hi) = name.random_range();
            let r = name.slider_range();
            assert!(r.contains(&lo) && r.contains(&hi), "{name}");
        }
    }
}
