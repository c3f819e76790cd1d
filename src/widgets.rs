//! Buttons, the time input field and the warning dialog.
//!
//! Widgets only see [`UiEvent`]s and only talk to the clock through
//! [`ClockCommand`]s, so they can be driven without a window.

use crate::config::{ClockConfig, Color, BLACK, PLACEHOLDER_TEXT, WARNING, WHITE};
use crate::render::{Align, DrawCommand, Scene};
use crate::time_source::is_partial_time;

/// Longest accepted input, `HH:MM:SS`.
const MAX_INPUT_LEN: usize = 8;

/// Top-left corner of the control strip.
const STRIP_ORIGIN: (i32, i32) = (50, 50);
const CONTROL_HEIGHT: i32 = 30;
const CONTROL_GAP: i32 = 10;
/// Extra space around the time input and before the timezone label.
const GROUP_GAP: i32 = 20;

const INPUT_ACTIVE_BG: Color = Color::new(100, 100, 100);
const WARNING_MARK: Color = Color::new(255, 255, 0);

/// Requests from the UI to the clock core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockCommand {
    SetTime(String),
    NextTimezone,
    PrevTimezone,
    ClearOverride,
}

/// Window input, already translated out of the windowing library.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    CursorMoved(f64, f64),
    Click(f64, f64),
    Char(char),
    Backspace,
    Enter,
    Escape,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= f64::from(self.x)
            && py >= f64::from(self.y)
            && px < f64::from(self.x + self.w)
            && py < f64::from(self.y + self.h)
    }

    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// A control of width `w` placed `gap` to the right of this one.
    const fn beside(&self, gap: i32, w: i32) -> Self {
        Self::new(self.right() + gap, self.y, w, self.h)
    }
}

#[derive(Debug, Clone)]
pub struct Button {
    label: String,
    rect: Rect,
    bg: Color,
    fg: Color,
    hovered: bool,
}

impl Button {
    pub fn new(label: &str, rect: Rect, bg: Color, fg: Color) -> Self {
        Self {
            label: label.to_string(),
            rect,
            bg,
            fg,
            hovered: false,
        }
    }

    /// Updates hover state; returns true when the event is a click on the button.
    pub fn handle(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::CursorMoved(x, y) => {
                self.hovered = self.rect.contains(x, y);
                false
            }
            UiEvent::Click(x, y) => self.rect.contains(x, y),
            _ => false,
        }
    }

    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn draw(&self, scene: &mut Scene, font_size: f32) {
        let Rect { x, y, w, h } = self.rect;
        let bg = if self.hovered { self.bg.lighten(20) } else { self.bg };
        scene.add_command(DrawCommand::Rect {
            x,
            y,
            w,
            h,
            color: bg,
            filled: true,
        });
        scene.add_command(DrawCommand::Rect {
            x,
            y,
            w,
            h,
            color: self.fg,
            filled: false,
        });
        let (cx, cy) = self.rect.center();
        scene.add_command(DrawCommand::Text {
            x: cx,
            y: cy,
            text: self.label.clone(),
            font_size,
            align: Align::Center,
            color: self.fg,
        });
    }
}

/// Single-line field accepting digits and ':'.
#[derive(Debug, Clone)]
pub struct TextInput {
    rect: Rect,
    text: String,
    placeholder: String,
    active: bool,
    warning: bool,
}

impl TextInput {
    pub fn new(rect: Rect, placeholder: &str) -> Self {
        Self {
            rect,
            text: String::new(),
            placeholder: placeholder.to_string(),
            active: false,
            warning: false,
        }
    }

    /// Returns the text when the user submits with Enter.
    pub fn handle(&mut self, event: UiEvent) -> Option<String> {
        match event {
            UiEvent::Click(x, y) => {
                self.active = self.rect.contains(x, y);
                return None;
            }
            _ if !self.active => return None,
            UiEvent::Char(c) if c.is_ascii_digit() || c == ':' => {
                if self.text.len() < MAX_INPUT_LEN {
                    self.text.push(c);
                }
            }
            UiEvent::Backspace => {
                self.text.pop();
            }
            UiEvent::Enter => {
                self.active = false;
                return Some(self.text.clone());
            }
            UiEvent::Escape => self.active = false,
            _ => {}
        }
        self.warning = !is_partial_time(&self.text);
        None
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn has_warning(&self) -> bool {
        self.warning
    }

    /// Marks the current text as rejected by the clock.
    pub fn flag_warning(&mut self) {
        self.warning = true;
    }

    pub fn draw(&self, scene: &mut Scene, font_size: f32) {
        let Rect { x, y, w, h } = self.rect;
        scene.add_command(DrawCommand::Rect {
            x,
            y,
            w,
            h,
            color: if self.active { INPUT_ACTIVE_BG } else { WHITE },
            filled: true,
        });
        scene.add_command(DrawCommand::Rect {
            x,
            y,
            w,
            h,
            color: if self.warning { WARNING } else { WHITE },
            filled: false,
        });

        let (text, color) = if self.text.is_empty() {
            (self.placeholder.clone(), PLACEHOLDER_TEXT)
        } else {
            (self.text.clone(), BLACK)
        };
        let (_, cy) = self.rect.center();
        scene.add_command(DrawCommand::Text {
            x: x + 5,
            y: cy,
            text,
            font_size,
            align: Align::Left,
            color,
        });

        if self.warning {
            scene.add_command(DrawCommand::Text {
                x: x + w - 12,
                y: cy,
                text: "!".to_string(),
                font_size,
                align: Align::Center,
                color: WARNING_MARK,
            });
        }
    }
}

/// Blocking message box with a single OK button.
#[derive(Debug, Clone)]
pub struct Modal {
    rect: Rect,
    message: Option<String>,
    ok: Button,
}

impl Modal {
    pub fn new(rect: Rect) -> Self {
        let ok = Rect::new(rect.x + rect.w / 2 - 35, rect.y + rect.h - 45, 70, 30);
        Self {
            rect,
            message: None,
            ok: Button::new("OK", ok, WHITE, BLACK),
        }
    }

    pub fn open(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub const fn is_open(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Consumes every event while open; closes on Enter, Escape or OK.
    pub fn handle(&mut self, event: UiEvent) {
        let clicked = self.ok.handle(event);
        if clicked || matches!(event, UiEvent::Enter | UiEvent::Escape) {
            self.message = None;
        }
    }

    pub fn draw(&self, scene: &mut Scene, font_size: f32) {
        let Some(message) = &self.message else {
            return;
        };
        let Rect { x, y, w, h } = self.rect;
        scene.add_command(DrawCommand::Rect {
            x,
            y,
            w,
            h,
            color: BLACK,
            filled: true,
        });
        scene.add_command(DrawCommand::Rect {
            x,
            y,
            w,
            h,
            color: WARNING,
            filled: false,
        });
        let (cx, _) = self.rect.center();
        scene.add_command(DrawCommand::Text {
            x: cx,
            y: y + h / 3,
            text: message.clone(),
            font_size,
            align: Align::Center,
            color: WHITE,
        });
        self.ok.draw(scene, font_size);
    }
}

/// The control strip above the dial plus the warning dialog.
#[derive(Debug, Clone)]
pub struct Ui {
    prev_timezone: Button,
    next_timezone: Button,
    time_input: TextInput,
    apply: Button,
    modal: Modal,
}

impl Ui {
    pub fn new(config: &ClockConfig) -> Self {
        let (cx, cy) = config.center();
        let prev = Rect::new(STRIP_ORIGIN.0, STRIP_ORIGIN.1, 30, CONTROL_HEIGHT);
        let next = prev.beside(CONTROL_GAP, 30);
        let input = next.beside(GROUP_GAP + CONTROL_GAP, 150);
        let apply = input.beside(CONTROL_GAP, 70);
        Self {
            prev_timezone: Button::new("<", prev, WHITE, BLACK),
            next_timezone: Button::new(">", next, WHITE, BLACK),
            time_input: TextInput::new(input, "HH:MM:SS"),
            apply: Button::new("Apply", apply, WHITE, BLACK),
            modal: Modal::new(Rect::new(cx - 160, cy - 60, 320, 120)),
        }
    }

    /// Where the timezone label starts: after the Apply button when it fits
    /// the window, otherwise on its own row under the strip.
    fn label_origin(&self, text: &str, config: &ClockConfig) -> (i32, i32) {
        let apply = self.apply.rect;
        let x = apply.right() + GROUP_GAP;
        let estimated_width = (text.chars().count() as f32 * config.hud_font_size * 0.5) as i32;
        if x + estimated_width <= config.window_width as i32 {
            (x, apply.center().1)
        } else {
            (STRIP_ORIGIN.0, apply.bottom() + GROUP_GAP)
        }
    }

    pub fn handle(&mut self, event: UiEvent) -> Option<ClockCommand> {
        if self.modal.is_open() {
            self.modal.handle(event);
            return None;
        }

        let typing = self.time_input.is_active();
        let submitted = self.time_input.handle(event);
        let prev = self.prev_timezone.handle(event);
        let next = self.next_timezone.handle(event);
        let apply = self.apply.handle(event);

        if let Some(text) = submitted {
            return Some(ClockCommand::SetTime(text));
        }
        if apply {
            return Some(ClockCommand::SetTime(self.time_input.text().to_string()));
        }
        if prev {
            return Some(ClockCommand::PrevTimezone);
        }
        if next {
            return Some(ClockCommand::NextTimezone);
        }

        match event {
            _ if typing => None,
            UiEvent::Left => Some(ClockCommand::PrevTimezone),
            UiEvent::Right => Some(ClockCommand::NextTimezone),
            UiEvent::Escape => Some(ClockCommand::ClearOverride),
            _ => None,
        }
    }

    /// Shows the dialog for a rejected override.
    pub fn reject_time(&mut self, message: impl Into<String>) {
        self.time_input.flag_warning();
        self.modal.open(message);
    }

    pub const fn modal(&self) -> &Modal {
        &self.modal
    }

    pub const fn time_input(&self) -> &TextInput {
        &self.time_input
    }

    pub fn draw(&self, scene: &mut Scene, timezone: &str, config: &ClockConfig) {
        let size = config.widget_font_size;
        self.prev_timezone.draw(scene, size);
        self.next_timezone.draw(scene, size);
        self.time_input.draw(scene, size);
        self.apply.draw(scene, size);
        let text = format!("Timezone: {timezone}");
        let (x, y) = self.label_origin(&text, config);
        scene.add_command(DrawCommand::Text {
            x,
            y,
            text,
            font_size: config.hud_font_size,
            align: Align::Left,
            color: config.foreground_color,
        });
        self.modal.draw(scene, size);
    }
}
