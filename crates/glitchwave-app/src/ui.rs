use egui::{Align2, Color32, Id, RichText, Sense};
use glitchwave_core::{ParamName, Preset, Synth};

use crate::input::InputAction;

/// Widget ids of the control surface. Panels and widgets are keyed by these
/// so they stay stable across frames and layouts.
pub mod ids {
    use glitchwave_core::{ParamName, Preset};

    pub const GL_CANVAS: &str = "gl-canvas";
    pub const STATUS_BAR: &str = "status-bar";
    pub const CONTROLS: &str = "controls";
    pub const RANDOMIZE_BTN: &str = "randomize-btn";
    pub const FULLSCREEN_BTN: &str = "fullscreen-btn";
    pub const TOGGLE_CODE_BTN: &str = "toggle-code-btn";
    pub const CODE_EDITOR_CONTAINER: &str = "code-editor-container";
    pub const WELCOME_OVERLAY: &str = "welcome-overlay";
    pub const START_BTN: &str = "start-btn";
    pub const HELP_BTN: &str = "help-btn";
    pub const ABOUT_BTN: &str = "about-btn";
    pub const ABOUT_OVERLAY: &str = "about-overlay";

    pub fn slider(name: ParamName) -> String {
        format!("{}-slider", name.control_prefix())
    }

    pub fn value(name: ParamName) -> String {
        format!("{}-value", name.control_prefix())
    }

    pub fn preset_button(preset: Preset) -> String {
        format!("preset-btn-{}", preset.id())
    }
}

const ACCENT: Color32 = Color32::from_rgb(0x00, 0xff, 0x41);

const ABOUT_TEXT: &str = "A visual synthesizer inspired by Hydra, designed for artists of all skill levels.

FEATURES:
• Real-time visual generation
• Audio reactive capabilities
• Webcam input support
• No coding required
• Fullscreen immersive mode

CONTROLS:
• Frequency: Controls pattern density
• Speed: Animation timing
• Intensity: Color brightness
• Scale: Pattern size

Click the canvas to pause or resume.";

const WELCOME_TEXT: &str = "Pick a preset, drag the sliders, hit RANDOMIZE.
Click the canvas to pause. Keys: 1-6 presets, R randomize, F fullscreen, C code, H help, Q quit.";

/// Things only the window owner can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRequest {
    Fullscreen(bool),
    Quit,
}

/// Presentation state of the control surface.
#[derive(Debug, Clone)]
pub struct UiState {
    pub show_welcome: bool,
    pub show_about: bool,
    pub show_code: bool,
    pub fullscreen: bool,
}

impl UiState {
    pub fn new(show_welcome: bool) -> Self {
        Self {
            show_welcome,
            show_about: false,
            show_code: false,
            fullscreen: false,
        }
    }

    /// Adopt the window's live fullscreen state. The window manager can
    /// leave fullscreen without going through the button.
    pub fn sync_fullscreen(&mut self, live: bool) {
        if self.fullscreen != live {
            log::debug!("fullscreen changed outside the ui: {live}");
            self.fullscreen = live;
        }
    }

    pub fn fullscreen_label(&self) -> &'static str {
        if self.fullscreen {
            "EXIT FULLSCREEN"
        } else {
            "FULLSCREEN"
        }
    }

    pub fn code_label(&self) -> &'static str {
        if self.show_code {
            "HIDE CODE"
        } else {
            "SHOW CODE"
        }
    }

    /// Apply one action to the synth and the panel state.
    pub fn apply(
        &mut self,
        action: InputAction,
        synth: &mut Synth,
        rng: &mut fastrand::Rng,
    ) -> Option<WindowRequest> {
        match action {
            InputAction::LoadPreset(id) => {
                synth.load_preset(&id);
            }
            InputAction::SetParameter(name, value) => synth.set_parameter(name, value),
            InputAction::Randomize => synth.randomize(rng),
            InputAction::TogglePlay => {
                let state = synth.toggle_play();
                log::debug!("transport → {state:?}");
            }
            InputAction::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                return Some(WindowRequest::Fullscreen(self.fullscreen));
            }
            InputAction::ToggleCode => {
                if synth.features().editor {
                    self.show_code = !self.show_code;
                }
            }
            InputAction::StartFromWelcome => {
                self.show_welcome = false;
                synth.load(Preset::Oscillator);
            }
            InputAction::ShowWelcome => self.show_welcome = true,
            InputAction::ShowAbout => self.show_about = true,
            InputAction::CloseAbout => self.show_about = false,
            InputAction::Quit => return Some(WindowRequest::Quit),
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Lay out the whole control surface for one frame and collect the actions
/// the user triggered.
pub fn draw(ctx: &egui::Context, synth: &Synth, state: &UiState) -> Vec<InputAction> {
    let mut actions = Vec::new();

    egui::TopBottomPanel::bottom(ids::STATUS_BAR).show(ctx, |ui| {
        ui.label(RichText::new(synth.status().to_string()).monospace().color(ACCENT));
    });

    egui::SidePanel::left(ids::CONTROLS)
        .resizable(false)
        .show(ctx, |ui| controls(ui, synth, state, &mut actions));

    if synth.features().editor && state.show_code {
        egui::SidePanel::right(ids::CODE_EDITOR_CONTAINER)
            .default_width(320.0)
            .show(ctx, |ui| {
                let code = synth.code_description();
                ui.add(
                    egui::TextEdit::multiline(&mut code.as_str())
                        .code_editor()
                        .text_color(ACCENT)
                        .desired_width(f32::INFINITY),
                );
            });
    }

    // The canvas: everything not covered by a panel. Transparent so the
    // shader output drawn underneath shows through.
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let canvas = ui.interact(ui.max_rect(), Id::new(ids::GL_CANVAS), Sense::click());
            if canvas.clicked() {
                actions.push(if state.show_welcome {
                    InputAction::StartFromWelcome
                } else {
                    InputAction::TogglePlay
                });
            }
        });

    if state.show_welcome {
        welcome(ctx, &mut actions);
    }
    if state.show_about {
        about(ctx, &mut actions);
    }

    actions
}

fn controls(ui: &mut egui::Ui, synth: &Synth, state: &UiState, actions: &mut Vec<InputAction>) {
    ui.heading(RichText::new("GL1TCHWAVE_").color(ACCENT).monospace());
    ui.separator();

    ui.label("PRESETS");
    egui::Grid::new("preset-grid").num_columns(2).show(ui, |ui| {
        for (i, preset) in Preset::ALL.into_iter().enumerate() {
            ui.push_id(ids::preset_button(preset), |ui| {
                let button = egui::Button::new(preset.label()).selected(synth.active() == preset);
                if ui.add(button).clicked() {
                    actions.push(InputAction::load(preset));
                }
            });
            if i % 2 == 1 {
                ui.end_row();
            }
        }
    });
    ui.separator();

    ui.label("PARAMETERS");
    for name in ParamName::ALL {
        let mut value = synth.params().get(name);
        ui.horizontal(|ui| {
            ui.label(name.label());
            ui.push_id(ids::value(name), |ui| {
                ui.label(RichText::new(name.format_value(value)).monospace());
            });
        });
        ui.push_id(ids::slider(name), |ui| {
            let slider = egui::Slider::new(&mut value, name.slider_range()).show_value(false);
            if ui.add(slider).changed() {
                actions.push(InputAction::SetParameter(name, value));
            }
        });
    }
    ui.separator();

    ui.horizontal_wrapped(|ui| {
        let mut button = |ui: &mut egui::Ui, id: &str, label: &str, action: InputAction| {
            ui.push_id(id, |ui| {
                if ui.button(label).clicked() {
                    actions.push(action);
                }
            });
        };
        button(ui, ids::RANDOMIZE_BTN, "RANDOMIZE", InputAction::Randomize);
        button(ui, ids::FULLSCREEN_BTN, state.fullscreen_label(), InputAction::ToggleFullscreen);
        if synth.features().editor {
            button(ui, ids::TOGGLE_CODE_BTN, state.code_label(), InputAction::ToggleCode);
        }
        button(ui, ids::HELP_BTN, "HELP", InputAction::ShowWelcome);
    });
}

fn welcome(ctx: &egui::Context, actions: &mut Vec<InputAction>) {
    egui::Window::new("WELCOME TO GL1TCHWAVE_")
        .id(Id::new(ids::WELCOME_OVERLAY))
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(WELCOME_TEXT);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.push_id(ids::START_BTN, |ui| {
                    if ui.button("START_").clicked() {
                        actions.push(InputAction::StartFromWelcome);
                    }
                });
                ui.push_id(ids::ABOUT_BTN, |ui| {
                    if ui.button("ABOUT").clicked() {
                        actions.push(InputAction::ShowAbout);
                    }
                });
            });
        });
}

fn about(ctx: &egui::Context, actions: &mut Vec<InputAction>) {
    egui::Window::new("ABOUT GL1TCHWAVE_")
        .id(Id::new(ids::ABOUT_OVERLAY))
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(ABOUT_TEXT);
            ui.add_space(8.0);
            if ui.button("CLOSE_").clicked() {
                actions.push(InputAction::CloseAbout);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use glitchwave_core::{Features, ParameterSet, Status};

    fn setup() -> (UiState, Synth, fastrand::Rng) {
        (
            UiState::new(true),
            Synth::new(Features::FULL),
            fastrand::Rng::with_seed(3),
        )
    }

    #[test]
    fn ids_follow_control_prefixes() {
        assert_eq!(ids::slider(ParamName::Frequency), "freq-slider");
        assert_eq!(ids::value(ParamName::Frequency), "freq-value");
        assert_eq!(ids::slider(ParamName::Intensity), "intensity-slider");
        assert_eq!(ids::preset_button(Preset::Noise), "preset-btn-noise");
    }

    #[test]
    fn preset_button_loads_preset() {
        let (mut ui, mut synth, mut rng) = setup();
        let req = ui.apply(InputAction::load(Preset::Noise), &mut synth, &mut rng);
        assert_eq!(req, None);
        assert_eq!(*synth.params(), ParameterSet::new(10.0, 0.05, 0.8, 2.0));
        assert_eq!(synth.status(), Status::Preset(Preset::Noise));
    }

    #[test]
    fn unknown_preset_button_falls_back() {
        let (mut ui, mut synth, mut rng) = setup();
        ui.apply(InputAction::LoadPreset("glitter".into()), &mut synth, &mut rng);
        assert_eq!(synth.active(), Preset::Oscillator);
    }

    #[test]
    fn slider_sets_one_parameter() {
        let (mut ui, mut synth, mut rng) = setup();
        ui.apply(InputAction::SetParameter(ParamName::Scale, 2.5), &mut synth, &mut rng);
        assert_eq!(*synth.params(), ParameterSet::new(20.0, 0.1, 1.0, 2.5));
    }

    #[test]
    fn fullscreen_toggles_label_and_requests_window_change() {
        let (mut ui, mut synth, mut rng) = setup();
        assert_eq!(ui.fullscreen_label(), "FULLSCREEN");
        let req = ui.apply(InputAction::ToggleFullscreen, &mut synth, &mut rng);
        assert_eq!(req, Some(WindowRequest::Fullscreen(true)));
        assert_eq!(ui.fullscreen_label(), "EXIT FULLSCREEN");
        let req = ui.apply(InputAction::ToggleFullscreen, &mut synth, &mut rng);
        assert_eq!(req, Some(WindowRequest::Fullscreen(false)));
    }

    #[test]
    fn fullscreen_left_outside_the_ui_reenters_on_one_click() {
        let (mut ui, mut synth, mut rng) = setup();
        ui.apply(InputAction::ToggleFullscreen, &mut synth, &mut rng);
        assert_eq!(ui.fullscreen_label(), "EXIT FULLSCREEN");

        // Window manager drops fullscreen behind our back.
        ui.sync_fullscreen(false);
        assert_eq!(ui.fullscreen_label(), "FULLSCREEN");
        let req = ui.apply(InputAction::ToggleFullscreen, &mut synth, &mut rng);
        assert_eq!(req, Some(WindowRequest::Fullscreen(true)));
    }

    #[test]
    fn fullscreen_entered_outside_the_ui_exits_on_one_click() {
        let (mut ui, mut synth, mut rng) = setup();
        ui.sync_fullscreen(true);
        assert_eq!(ui.fullscreen_label(), "EXIT FULLSCREEN");
        let req = ui.apply(InputAction::ToggleFullscreen, &mut synth, &mut rng);
        assert_eq!(req, Some(WindowRequest::Fullscreen(false)));
    }

    #[test]
    fn code_panel_needs_editor_feature() {
        let (mut ui, mut synth, mut rng) = setup();
        ui.apply(InputAction::ToggleCode, &mut synth, &mut rng);
        assert!(ui.show_code);
        assert_eq!(ui.code_label(), "HIDE CODE");

        let mut simple_synth = Synth::new(Features::SIMPLE);
        let mut simple = UiState::new(false);
        simple.apply(InputAction::ToggleCode, &mut simple_synth, &mut rng);
        assert!(!simple.show_code);
    }

    #[test]
    fn start_hides_welcome_and_loads_oscillator() {
        let (mut ui, mut synth, mut rng) = setup();
        synth.load_preset("fractal");
        ui.apply(InputAction::StartFromWelcome, &mut synth, &mut rng);
        assert!(!ui.show_welcome);
        assert_eq!(synth.active(), Preset::Oscillator);
        ui.apply(InputAction::ShowWelcome, &mut synth, &mut rng);
        assert!(ui.show_welcome);
    }

    #[test]
    fn about_opens_and_closes() {
        let (mut ui, mut synth, mut rng) = setup();
        ui.apply(InputAction::ShowAbout, &mut synth, &mut rng);
        assert!(ui.show_about);
        ui.apply(InputAction::CloseAbout, &mut synth, &mut rng);
        assert!(!ui.show_about);
    }

    #[test]
    fn play_toggle_and_quit() {
        let (mut ui, mut synth, mut rng) = setup();
        ui.apply(InputAction::TogglePlay, &mut synth, &mut rng);
        assert_eq!(synth.status(), Status::Paused);
        assert_eq!(
            ui.apply(InputAction::Quit, &mut synth, &mut rng),
            Some(WindowRequest::Quit)
        );
    }

    #[test]
    fn draw_runs_headless() {
        let (ui, synth, _) = setup();
        let ctx = egui::Context::default();
        let mut actions = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            actions = draw(ctx, &synth, &ui);
        });
        assert!(actions.is_empty(), "{actions:?}");
    }

    /// Run a few frames that move the pointer to `pos`, press and release.
    fn click_at(pos: egui::Pos2, synth: &Synth, ui: &UiState) -> Vec<InputAction> {
        let ctx = egui::Context::default();
        let screen = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1280.0, 720.0));
        let button = |pressed| egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        };
        let frames = [
            vec![],
            vec![egui::Event::PointerMoved(pos)],
            vec![button(true)],
            vec![button(false)],
        ];

        let mut actions = Vec::new();
        for events in frames {
            let input = egui::RawInput {
                screen_rect: Some(screen),
                events,
                ..Default::default()
            };
            let mut frame_actions = Vec::new();
            let _ = ctx.run(input, |ctx| {
                frame_actions = draw(ctx, synth, ui);
            });
            actions.extend(frame_actions);
        }
        actions
    }

    // Top right: clear of the control panel, the status bar and the
    // centred welcome window.
    const CANVAS_POINT: egui::Pos2 = egui::pos2(1200.0, 100.0);

    #[test]
    fn canvas_click_toggles_play() {
        let synth = Synth::new(Features::FULL);
        let ui = UiState::new(false);
        let actions = click_at(CANVAS_POINT, &synth, &ui);
        assert_eq!(actions, vec![InputAction::TogglePlay]);
    }

    #[test]
    fn canvas_click_under_welcome_starts() {
        let synth = Synth::new(Features::FULL);
        let ui = UiState::new(true);
        let actions = click_at(CANVAS_POINT, &synth, &ui);
        assert_eq!(actions, vec![InputAction::StartFromWelcome]);
    }

    #[test]
    fn canvas_click_drives_transport() {
        let (mut ui, mut synth, mut rng) = setup();
        ui.show_welcome = false;
        for action in click_at(CANVAS_POINT, &synth, &ui) {
            ui.apply(action, &mut synth, &mut rng);
        }
        assert!(!synth.transport().is_playing());
        assert_eq!(synth.status().to_string(), "STATUS: PAUSED_");
    }
}
