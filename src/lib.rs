// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod angles;
pub mod animation;
pub mod assets;
pub mod clock;
pub mod config;
pub mod error;
pub mod flames;
pub mod render;
pub mod time_source;
pub mod widgets;
pub mod zodiac;

// External crate imports
use pixels::{Pixels, SurfaceTexture};

// Standard library imports
use std::sync::Arc;
use std::time::Instant as FrameInstant;

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

pub use crate::clock::{ClockFace, Frame, HighlightState};
pub use crate::config::{ClockConfig, Color};
pub use crate::error::{AppError, ClockError};
pub use crate::time_source::{Clock, Direction, SystemClock, TimeSource, TIMEZONES};
pub use crate::widgets::{ClockCommand, UiEvent};
pub use crate::zodiac::{ZodiacRing, ZodiacSignRecord, SIGNS};

use crate::assets::RenderContext;
use crate::render::{build_clock_scene, Canvas, Scene};
use crate::widgets::Ui;

const REJECTED_TIME_MESSAGE: &str = "Invalid time format. Use HH:MM:SS";

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Main clock struct - the primary public interface
#[derive(Debug, Clone)]
pub struct ZodiacClock {
    config: ClockConfig,
}

impl ZodiacClock {
    pub fn new(config: ClockConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Opens the window and runs until it is closed.
    pub fn show(&self) -> Result<(), AppError> {
        let time = TimeSource::with_timezone_index(SystemClock, self.config.timezone_index);
        self.run_window(AppState::new(time, &self.config))
    }

    fn run_window(&self, mut app_state: AppState<SystemClock>) -> Result<(), AppError> {
        let logical_width = self.config.window_width;
        let logical_height = self.config.window_height;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                logical_width as f64,
                logical_height as f64,
            ))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = Arc::new(window);
        let window_clone = window.clone();

        // The buffer stays at the logical layout size; the surface scales it.
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(
            logical_width as u32,
            logical_height as u32,
            surface_texture,
        )?;

        let context = RenderContext::load(&self.config, app_state.face.ring().signs());
        log::info!(
            "clock started in {} (frame limit {} fps)",
            app_state.face.time().timezone().name(),
            self.config.max_framerate
        );

        let frame_duration = self.config.frame_duration();
        let mut last_frame = FrameInstant::now();
        let mut cursor = (0.0, 0.0);

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        log::info!("window closed");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            log::error!("surface resize failed: {err}");
                            window_target.exit();
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let pos = (position.x as f32, position.y as f32);
                        let (x, y) = pixels
                            .window_pos_to_pixel(pos)
                            .unwrap_or_else(|outside| pixels.clamp_pixel_pos(outside));
                        cursor = (x as f64, y as f64);
                        app_state.push(UiEvent::CursorMoved(cursor.0, cursor.1));
                    }
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } => app_state.push(UiEvent::Click(cursor.0, cursor.1)),
                    WindowEvent::KeyboardInput { event, .. }
                        if event.state == ElementState::Pressed =>
                    {
                        match &event.logical_key {
                            Key::Named(NamedKey::Backspace) => app_state.push(UiEvent::Backspace),
                            Key::Named(NamedKey::Enter) => app_state.push(UiEvent::Enter),
                            Key::Named(NamedKey::Escape) => app_state.push(UiEvent::Escape),
                            Key::Named(NamedKey::ArrowLeft) => app_state.push(UiEvent::Left),
                            Key::Named(NamedKey::ArrowRight) => app_state.push(UiEvent::Right),
                            Key::Character(text) => {
                                for c in text.chars() {
                                    app_state.push(UiEvent::Char(c));
                                }
                            }
                            _ => {}
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let scene = app_state.update(&self.config);
                        let mut canvas =
                            Canvas::new(pixels.frame_mut(), logical_width, logical_height);
                        scene.render(&mut canvas, &context);
                        if let Err(err) = pixels.render() {
                            log::error!("render failed: {err}");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = FrameInstant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// The clock core plus the widgets, fed by input gathered between frames.
struct AppState<C: Clock> {
    face: ClockFace<C>,
    ui: Ui,
    pending: Vec<UiEvent>,
}

impl<C: Clock> AppState<C> {
    fn new(time: TimeSource<C>, config: &ClockConfig) -> Self {
        let ring = ZodiacRing::default().with_tolerance(config.highlight_tolerance);
        let mut face = ClockFace::new(time, ring, config.animation)
            .with_highlight_sign(config.highlight_sign.clone());

        if let Some(initial) = &config.initial_time {
            if let Err(err) = face.set_override(initial) {
                log::warn!("starting on live time: {err}");
            }
        }

        Self {
            face,
            ui: Ui::new(config),
            pending: Vec::new(),
        }
    }

    fn push(&mut self, event: UiEvent) {
        self.pending.push(event);
    }

    fn apply(&mut self, command: ClockCommand) {
        match command {
            ClockCommand::SetTime(text) => {
                if self.face.set_override(&text).is_err() {
                    self.ui.reject_time(REJECTED_TIME_MESSAGE);
                }
            }
            ClockCommand::NextTimezone => self.face.select_timezone(Direction::Next),
            ClockCommand::PrevTimezone => self.face.select_timezone(Direction::Prev),
            ClockCommand::ClearOverride => self.face.clear_override(),
        }
    }

    /// Applies queued input, advances the clock one frame and lays out the scene.
    fn update(&mut self, config: &ClockConfig) -> Scene {
        for event in std::mem::take(&mut self.pending) {
            if let Some(command) = self.ui.handle(event) {
                self.apply(command);
            }
        }

        let frame = self.face.tick();
        let mut scene = Scene::new();
        build_clock_scene(&mut scene, &frame, self.face.ring(), config);
        self.ui
            .draw(&mut scene, self.face.time().timezone().name(), config);
        scene
    }
}
