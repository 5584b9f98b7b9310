/// Virtual time added per rendered frame while playing (a 60 Hz step).
///
/// Visual speed is tied to the frame rate, not wall-clock time: a paused
/// stretch is simply lost, with no catch-up on resume.
pub const FRAME_STEP: f32 = 0.016;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Paused,
}

/// Play/pause flag plus the virtual clock it gates. The clock never resets.
#[derive(Debug, Clone)]
pub struct Transport {
    state: PlayState,
    time: f32,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    pub fn new() -> Self {
        Self {
            state: PlayState::Playing,
            time: 0.0,
        }
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance one frame. Returns the clock after the step.
    pub fn tick(&mut self) -> f32 {
        if self.is_playing() {
            self.time += FRAME_STEP;
        }
        self.time
    }

    pub fn toggle(&mut self) -> PlayState {
        self.state = match self.state {
            PlayState::Playing => PlayState::Paused,
            PlayState::Paused => PlayState::Playing,
        };
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_playing_at_zero() {
        let t = Transport::new();
        assert_eq!(t.state(), PlayState::Playing);
        assert_eq!(t.time(), 0.0);
    }

    #[test]
    fn tick_advances_by_fixed_step() {
        let mut t = Transport::new();
        assert_eq!(t.tick(), FRAME_STEP);
        assert_eq!(t.tick(), FRAME_STEP + FRAME_STEP);
    }

    #[test]
    fn paused_clock_is_frozen() {
        let mut t = Transport::new();
        t.tick();
        let before = t.time();
        assert_eq!(t.toggle(), PlayState::Paused);
        for _ in 0..1000 {
            t.tick();
        }
        assert_eq!(t.time(), before);
    }

    #[test]
    fn double_toggle_restores_rate() {
        let mut t = Transport::new();
        t.toggle();
        t.toggle();
        assert!(t.is_playing());
        let before = t.time();
        let after = t.tick();
        assert_eq!(after - before, FRAME_STEP);
    }

    #[test]
    fn resume_does_not_catch_up() {
        let mut t = Transport::new();
        t.toggle();
        for _ in 0..50 {
            t.tick();
        }
        t.toggle();
        assert_eq!(t.tick(), FRAME_STEP);
    }
}
