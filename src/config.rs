use std::path::PathBuf;
use std::time::Duration;

use bon::Builder;

use crate::animation::AnimationParams;

/// Color representation for clock elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Brightens each channel by `amount`, saturating at 255.
    pub const fn lighten(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_add(amount),
            g: self.g.saturating_add(amount),
            b: self.b.saturating_add(amount),
        }
    }
}

pub const BLACK: Color = Color::new(0, 0, 0);
pub const WHITE: Color = Color::new(255, 255, 255);
pub const GOLD: Color = Color::new(255, 215, 0);
pub const FLAME_ACTIVE: Color = Color::new(90, 180, 255);
pub const FLAME_INACTIVE: Color = Color::new(40, 75, 102);
pub const WARNING: Color = Color::new(255, 0, 0);
pub const PLACEHOLDER_TEXT: Color = Color::new(150, 150, 150);

/// Roman numerals clockwise from the top of the dial.
pub const ROMAN_NUMERALS: [&str; 12] = [
    "XII", "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI",
];

/// Fonts tried, in order, when no font path is configured.
pub const SYSTEM_FONT_CANDIDATES: [&str; 5] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/TTF/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
    "/Library/Fonts/Times New Roman.ttf",
    "C:\\Windows\\Fonts\\times.ttf",
];

/// Window, layout, palette and behaviour of the clock.
#[derive(Debug, Clone, Builder)]
pub struct ClockConfig {
    #[builder(default = "Zodiac Clock".to_string())]
    pub title: String,

    // Window configuration
    #[builder(default = 800)]
    pub window_width: usize,
    #[builder(default = 800)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    // Dial layout
    #[builder(default = 300)]
    pub outer_radius: i32,
    #[builder(default = 200)]
    pub zodiac_radius: i32,
    #[builder(default = 270)]
    pub flames_radius: i32,
    #[builder(default = 20)]
    pub marker_length: i32,
    #[builder(default = 40.0)]
    pub numerals_inset: f64,
    #[builder(default = 36.0)]
    pub numerals_font_size: f32,
    #[builder(default = 50)]
    pub sign_size: u32,

    // Hands
    #[builder(default = 150.0)]
    pub hour_hand_length: f64,
    #[builder(default = 220.0)]
    pub minute_hand_length: f64,
    #[builder(default = 240.0)]
    pub second_hand_length: f64,
    #[builder(default = 6.0)]
    pub hour_hand_width: f32,
    #[builder(default = 4.0)]
    pub minute_hand_width: f32,
    #[builder(default = 2.0)]
    pub second_hand_width: f32,

    // Zodiac behaviour
    #[builder(default = "Leo".to_string())]
    pub highlight_sign: String,
    #[builder(default = crate::zodiac::ACTIVE_TOLERANCE_DEG)]
    pub highlight_tolerance: f64,

    // Time
    #[builder(default = 0)]
    pub timezone_index: usize,
    pub initial_time: Option<String>,

    // Colors
    #[builder(default = BLACK)]
    pub background_color: Color,
    #[builder(default = WHITE)]
    pub foreground_color: Color,
    #[builder(default = GOLD)]
    pub accent_color: Color,
    #[builder(default = FLAME_ACTIVE)]
    pub flame_active_color: Color,
    #[builder(default = FLAME_INACTIVE)]
    pub flame_inactive_color: Color,

    // Assets
    pub font_path: Option<PathBuf>,
    #[builder(default = PathBuf::from("assets/zodiac"))]
    pub asset_dir: PathBuf,
    #[builder(default = 20.0)]
    pub hud_font_size: f32,
    #[builder(default = 24.0)]
    pub widget_font_size: f32,

    #[builder(default)]
    pub animation: AnimationParams,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClockConfig {
    /// Dial centre in window pixels.
    pub fn center(&self) -> (i32, i32) {
        (self.window_width as i32 / 2, self.window_height as i32 / 2)
    }

    /// Minimum time between redraws. Rates below 1 fps (zero, negative or
    /// NaN included) fall back to 1 fps.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.max_framerate.max(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_stock_clock() {
        let config = ClockConfig::default();
        assert_eq!(config.center(), (400, 400));
        assert_eq!(config.outer_radius, 300);
        assert_eq!(config.highlight_sign, "Leo");
        assert_eq!(config.highlight_tolerance, 8.0);
        assert!(config.initial_time.is_none());
    }

    #[test]
    fn builder_overrides_selected_fields() {
        let config = ClockConfig::builder()
            .window_width(400)
            .window_height(300)
            .initial_time("05:00:00".to_string())
            .build();
        assert_eq!(config.center(), (200, 150));
        assert_eq!(config.initial_time.as_deref(), Some("05:00:00"));
    }

    #[test]
    fn frame_duration_tolerates_any_rate() {
        let at = |fps: f64| ClockConfig::builder().max_framerate(fps).build().frame_duration();
        assert_eq!(at(50.0), Duration::from_millis(20));
        assert_eq!(at(0.0), Duration::from_secs(1));
        assert_eq!(at(-30.0), Duration::from_secs(1));
        assert_eq!(at(f64::NAN), Duration::from_secs(1));
        assert_eq!(at(f64::INFINITY), Duration::ZERO);
    }

    #[test]
    fn lighten_saturates() {
        assert_eq!(Color::new(250, 10, 0).lighten(20), Color::new(255, 30, 20));
    }
}
