//! The per-frame pipeline that turns "now" into drawable data.

use crate::angles::{self, HandAngles};
use crate::animation::{AnimationParams, AnimationState};
use crate::error::ClockError;
use crate::flames::{FlameTransition, HourFlameTrack, FLAME_COUNT};
use crate::time_source::{Clock, Direction, Instant, SystemClock, TimeSource};
use crate::zodiac::ZodiacRing;

/// Whether the target sign is lit this frame, and how strongly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightState {
    pub active: bool,
    /// Glow alpha in `0..=255`; zero while inactive.
    pub glow_alpha: f64,
    /// Phase of the orbiting dots, in degrees.
    pub orbit: f64,
}

impl HighlightState {
    pub fn derive(
        ring: &ZodiacRing,
        angles: &HandAngles,
        target: &str,
        animation: &AnimationState,
    ) -> Self {
        let active = angles::is_highlighted(ring, angles.hour, target);
        Self {
            active,
            glow_alpha: if active {
                animation.glow_alpha().clamp(0.0, 255.0)
            } else {
                0.0
            },
            orbit: animation.orbit(),
        }
    }
}

/// Everything the renderer needs for one frame, as plain data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub instant: Instant,
    pub angles: HandAngles,
    pub flames: [bool; FLAME_COUNT],
    pub flame_transition: FlameTransition,
    /// Ring index of the sign under the hour hand, if any.
    pub active_sign: Option<usize>,
    /// Ring index of the sign that receives the highlight effect.
    pub highlight_sign: Option<usize>,
    pub highlight: HighlightState,
    pub animation: AnimationState,
    pub override_active: bool,
}

#[derive(Debug, Clone)]
pub struct ClockFace<C: Clock = SystemClock> {
    time: TimeSource<C>,
    ring: ZodiacRing,
    flames: HourFlameTrack,
    animation: AnimationState,
    highlight_sign: String,
    was_highlighted: bool,
}

impl<C: Clock> ClockFace<C> {
    pub fn new(time: TimeSource<C>, ring: ZodiacRing, animation: AnimationParams) -> Self {
        Self {
            time,
            ring,
            flames: HourFlameTrack::new(),
            animation: AnimationState::new(animation),
            highlight_sign: "Leo".to_owned(),
            was_highlighted: false,
        }
    }

    /// Changes which sign gets the highlight effect.
    pub fn with_highlight_sign(mut self, name: impl Into<String>) -> Self {
        self.highlight_sign = name.into();
        self
    }

    pub fn with_animation(mut self, animation: AnimationState) -> Self {
        self.animation = animation;
        self
    }

    /// Advances one frame: read the time, derive the hand angles, update
    /// flames and the active sign, then step the animation.
    pub fn tick(&mut self) -> Frame {
        let instant = self.time.now();
        let angles = HandAngles::from_instant(&instant);
        let flame_transition = self.flames.observe(instant.hour);
        let active_sign = self.ring.active_index_for_angle(angles.hour);

        self.animation.advance();
        let highlight =
            HighlightState::derive(&self.ring, &angles, &self.highlight_sign, &self.animation);

        if highlight.active != self.was_highlighted {
            log::debug!(
                "{} highlight {} at {instant}",
                self.highlight_sign,
                if highlight.active { "on" } else { "off" }
            );
            self.was_highlighted = highlight.active;
        }

        Frame {
            instant,
            angles,
            flames: self.flames.flames(),
            flame_transition,
            active_sign,
            highlight_sign: self.ring.find(&self.highlight_sign),
            highlight,
            animation: self.animation,
            override_active: self.time.override_active(),
        }
    }

    pub fn set_override(&mut self, input: &str) -> Result<(), ClockError> {
        self.time.set_override(input)
    }

    pub fn clear_override(&mut self) {
        self.time.clear_override();
    }

    pub fn select_timezone(&mut self, direction: Direction) {
        self.time.select_timezone(direction);
    }

    pub const fn time(&self) -> &TimeSource<C> {
        &self.time
    }

    pub const fn ring(&self) -> &ZodiacRing {
        &self.ring
    }

    pub const fn flames(&self) -> &HourFlameTrack {
        &self.flames
    }

    pub fn highlight_sign(&self) -> &str {
        &self.highlight_sign
    }
}
