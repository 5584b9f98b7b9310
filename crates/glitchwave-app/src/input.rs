use glitchwave_core::{ParamName, Preset};

// ---------------------------------------------------------------------------
// Key: windowing-library-independent key representation
// ---------------------------------------------------------------------------

/// A keyboard key, independent of any windowing library.
///
/// `main.rs` maps `winit::keyboard::PhysicalKey` → `Key`; everything else
/// in the input pipeline works purely with this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    R,
    F,
    C,
    H,
    Q,
    Escape,
}

// ---------------------------------------------------------------------------
// InputAction: what the app does in response to input
// ---------------------------------------------------------------------------

/// High-level action produced by the control panel or a key press.
/// The app applies these between frames; widgets never touch state directly.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// Preset id as carried by the button; unknown ids fall back.
    LoadPreset(String),
    SetParameter(ParamName, f32),
    Randomize,
    ToggleFullscreen,
    TogglePlay,
    ToggleCode,
    /// Dismiss the welcome overlay and start on the oscillator.
    StartFromWelcome,
    ShowWelcome,
    ShowAbout,
    CloseAbout,
    Quit,
}

impl InputAction {
    pub fn load(preset: Preset) -> Self {
        InputAction::LoadPreset(preset.id().to_string())
    }
}

// ---------------------------------------------------------------------------
// InputState
// ---------------------------------------------------------------------------

pub struct InputState {
    editor: bool,
}

impl InputState {
    pub fn new(editor: bool) -> Self {
        Self { editor }
    }

    /// Translate a `Key` press into an `InputAction`, if the key is mapped.
    pub fn on_key(&self, key: Key) -> Option<InputAction> {
        match key {
            Key::Digit1 => Some(InputAction::load(Preset::ALL[0])),
            Key::Digit2 => Some(InputAction::load(Preset::ALL[1])),
            Key::Digit3 => Some(InputAction::load(Preset::ALL[2])),
            Key::Digit4 => Some(InputAction::load(Preset::ALL[3])),
            Key::Digit5 => Some(InputAction::load(Preset::ALL[4])),
            Key::Digit6 => Some(InputAction::load(Preset::ALL[5])),
            Key::R => Some(InputAction::Randomize),
            Key::F => Some(InputAction::ToggleFullscreen),
            Key::C if self.editor => Some(InputAction::ToggleCode),
            Key::C => None,
            Key::H => Some(InputAction::ShowWelcome),
            Key::Q | Key::Escape => Some(InputAction::Quit),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> InputState {
        InputState::new(true)
    }

    #[test]
    fn digit_keys_load_presets_in_button_order() {
        let keys = [
            Key::Digit1,
            Key::Digit2,
            Key::Digit3,
            Key::Digit4,
            Key::Digit5,
            Key::Digit6,
        ];
        for (key, preset) in keys.into_iter().zip(Preset::ALL) {
            assert_eq!(
                input().on_key(key),
                Some(InputAction::LoadPreset(preset.id().to_string())),
                "{key:?}"
            );
        }
    }

    #[test]
    fn digit_1_loads_oscillator() {
        assert_eq!(
            input().on_key(Key::Digit1),
            Some(InputAction::LoadPreset("oscillator".into()))
        );
    }

    #[test]
    fn no_key_toggles_play() {
        let keys = [
            Key::Digit1,
            Key::R,
            Key::F,
            Key::C,
            Key::H,
            Key::Q,
            Key::Escape,
        ];
        for key in keys {
            assert_ne!(input().on_key(key), Some(InputAction::TogglePlay), "{key:?}");
        }
    }

    #[test]
    fn r_randomizes() {
        assert_eq!(input().on_key(Key::R), Some(InputAction::Randomize));
    }

    #[test]
    fn f_toggles_fullscreen() {
        assert_eq!(input().on_key(Key::F), Some(InputAction::ToggleFullscreen));
    }

    #[test]
    fn c_toggles_code_only_with_editor() {
        assert_eq!(input().on_key(Key::C), Some(InputAction::ToggleCode));
        assert_eq!(InputState::new(false).on_key(Key::C), None);
    }

    #[test]
    fn h_shows_help() {
        assert_eq!(input().on_key(Key::H), Some(InputAction::ShowWelcome));
    }

    #[test]
    fn q_and_escape_quit() {
        assert_eq!(input().on_key(Key::Q), Some(InputAction::Quit));
        assert_eq!(input().on_key(Key::Escape), Some(InputAction::Quit));
    }
}
