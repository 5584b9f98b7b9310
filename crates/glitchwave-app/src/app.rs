use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context};
use glam::Vec2;
use glitchwave_core::audio::AudioLevelProvider;
use glitchwave_core::render_loop::{FrameOutcome, RenderLoop};
use glitchwave_core::sources::SlotId;
use glitchwave_core::{SpectrumSource, Synth};
use glitchwave_gpu::{PassRecorder, ShaderPrograms};
use winit::event::WindowEvent;
use winit::window::{Fullscreen, Window};

use crate::capture;
use crate::config::Config;
use crate::input::{InputAction, InputState, Key};
use crate::ui::{self, UiState, WindowRequest};

// ---------------------------------------------------------------------------
// Simple FPS counter: logs to console once per second
// ---------------------------------------------------------------------------

struct FpsCounter {
    frames_at_report: u64,
    last_report: Instant,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frames_at_report: 0,
            last_report: Instant::now(),
        }
    }

    /// `frames` is the render loop's running total.  Returns the FPS value if
    /// a full second has elapsed since the last report.
    fn tick(&mut self, frames: u64) -> Option<f32> {
        let elapsed = self.last_report.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            let fps = frames.saturating_sub(self.frames_at_report) as f32 / elapsed;
            self.frames_at_report = frames;
            self.last_report = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// egui overlay
// ---------------------------------------------------------------------------

struct Overlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    programs: ShaderPrograms,
    overlay: Overlay,

    synth: Synth,
    audio: AudioLevelProvider,
    render_loop: RenderLoop,
    ui: UiState,
    input: InputState,
    rng: fastrand::Rng,

    fps: FpsCounter,
    quit: bool,
}

impl App {
    /// Initialise wgpu, egui and the synth for a given window.  The window is
    /// wrapped in `Arc` so that the surface can hold a `'static` reference.
    pub fn new(window: Arc<Window>, config: &Config) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        // ---- Instance -------------------------------------------------------
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // ---- Surface --------------------------------------------------------
        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("create wgpu surface")?;

        // ---- Adapter --------------------------------------------------------
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no suitable GPU adapter found"))?;

        log::info!("GPU adapter: {}", adapter.get_info().name);

        // ---- Device & Queue -------------------------------------------------
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("glitchwave device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create GPU device")?;

        // ---- Surface configuration ------------------------------------------
        // Shader colours are written as-is, so prefer a linear (non-sRGB)
        // target; egui expects one too.
        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow!("surface reports no texture formats"))?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);
        log::info!(
            "Surface configured: {}×{} {:?} Fifo",
            surface_config.width,
            surface_config.height,
            format
        );

        let programs = ShaderPrograms::new(&device, format);

        // ---- egui -----------------------------------------------------------
        let ctx = egui::Context::default();
        ctx.set_visuals(egui::Visuals::dark());
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            &*window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(&device, format, None, 1, false);

        // ---- Synth ----------------------------------------------------------
        let features = config.features();
        let mut synth = Synth::new(features);
        synth.load_preset(&config.preset);

        let audio = if features.audio {
            let mut audio = AudioLevelProvider::new();
            audio.attach(
                capture::open_microphone(config.device.as_deref())
                    .map(|mic| Box::new(mic) as Box<dyn SpectrumSource>),
            );
            audio
        } else {
            log::info!("audio disabled, using synthetic level");
            AudioLevelProvider::disabled()
        };

        let (render_loop, _handle) = RenderLoop::start();

        Ok(Self {
            window,
            surface,
            device,
            queue,
            surface_config,
            programs,
            overlay: Overlay {
                ctx,
                state,
                renderer,
            },
            synth,
            audio,
            render_loop,
            ui: UiState::new(!config.skip_welcome),
            input: InputState::new(features.editor),
            rng: config.rng(),
            fps: FpsCounter::new(),
            quit: false,
        })
    }

    // -------------------------------------------------------------------------
    // Resize
    // -------------------------------------------------------------------------

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == 0 || new_height == 0 {
            return;
        }
        self.surface_config.width = new_width;
        self.surface_config.height = new_height;
        self.surface.configure(&self.device, &self.surface_config);
        log::debug!("Surface resized to {}×{}", new_width, new_height);
    }

    // -------------------------------------------------------------------------
    // Input: called by main.rs window_event handler
    // -------------------------------------------------------------------------

    /// Feed a window event to egui. Returns `true` if egui consumed it.
    pub fn on_window_event(&mut self, event: &WindowEvent) -> bool {
        let response = self.overlay.state.on_window_event(&self.window, event);
        response.consumed
    }

    /// Keys are ignored while a widget has keyboard focus.
    pub fn on_key_pressed(&self, key: Key) -> Option<InputAction> {
        if self.overlay.ctx.wants_keyboard_input() {
            return None;
        }
        self.input.on_key(key)
    }

    pub fn handle_action(&mut self, action: InputAction) {
        self.ui.sync_fullscreen(self.window.fullscreen().is_some());
        match self.ui.apply(action, &mut self.synth, &mut self.rng) {
            Some(WindowRequest::Fullscreen(on)) => {
                let mode = on.then_some(Fullscreen::Borderless(None));
                self.window.set_fullscreen(mode);
                log::info!("fullscreen: {on}");
            }
            Some(WindowRequest::Quit) => {
                log::info!("Quit requested");
                self.quit = true;
            }
            None => {}
        }
    }

    /// The host keeps scheduling frames while this is `true`.
    pub fn is_running(&self) -> bool {
        !self.quit && self.render_loop.handle().is_running()
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// The native build has no camera backend; requested slots fail soft.
    fn resolve_sources(&mut self) {
        let pending: Vec<SlotId> = self.synth.sources().pending().collect();
        for id in pending {
            self.synth
                .sources_mut()
                .resolve(id, Err(anyhow!("camera capture is not supported by this build")));
        }
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    /// Run one full frame: UI, actions, shader pass, overlay pass, present.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // --- UI --------------------------------------------------------------
        self.ui.sync_fullscreen(self.window.fullscreen().is_some());
        let raw_input = self.overlay.state.take_egui_input(&self.window);
        let mut actions = Vec::new();
        let full_output = self.overlay.ctx.run(raw_input, |ctx| {
            actions = ui::draw(ctx, &self.synth, &self.ui);
        });
        self.overlay
            .state
            .handle_platform_output(&self.window, full_output.platform_output);

        for action in actions {
            self.handle_action(action);
        }
        self.resolve_sources();

        if let Some(fps) = self.fps.tick(self.render_loop.frames()) {
            log::debug!(
                "FPS: {:.1}  preset: {}  time: {:.2}  params: {:?}",
                fps,
                self.synth.active().id(),
                self.synth.time(),
                self.synth.params(),
            );
        }

        let width = self.surface_config.width;
        let height = self.surface_config.height;

        // --- Acquire surface texture -----------------------------------------
        let output = self.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        // --- 1. Shader pass --------------------------------------------------
        let resolution = Vec2::new(width as f32, height as f32);
        let outcome = {
            let mut backend = PassRecorder::new(
                &self.device,
                &self.queue,
                &self.programs,
                &mut encoder,
                &surface_view,
            );
            self.render_loop
                .frame(&mut self.synth, &mut self.audio, resolution, &mut backend)
        };
        match outcome {
            Ok(FrameOutcome::Drawn(_)) => {}
            Ok(FrameOutcome::Stopped) => return Ok(()),
            Err(err) => {
                log::error!("shader pass failed, stopping render loop: {err}");
                self.render_loop.handle().stop();
                return Ok(());
            }
        }

        // --- 2. egui overlay pass --------------------------------------------
        let pixels_per_point = full_output.pixels_per_point;
        let paint_jobs = self
            .overlay
            .ctx
            .tessellate(full_output.shapes, pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point,
        };

        for (id, delta) in &full_output.textures_delta.set {
            self.overlay
                .renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }
        let extra = self.overlay.renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen,
        );

        {
            let rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.overlay
                .renderer
                .render(&mut rpass.forget_lifetime(), &paint_jobs, &screen);
        }

        for id in &full_output.textures_delta.free {
            self.overlay.renderer.free_texture(id);
        }

        self.queue
            .submit(extra.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();
        Ok(())
    }
}
