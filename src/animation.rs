//! Cosmetic per-frame counters.
//!
//! Everything here advances by a fixed amount per frame and never reads the
//! wall clock, so a paused or overridden clock keeps its ornaments moving.

use bon::Builder;
use rand::Rng;

/// Frame rate the per-frame steps are tuned for.
pub const NOMINAL_FRAME_RATE: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Builder)]
pub struct AnimationParams {
    /// Degrees per frame for the centre ornament.
    #[builder(default = 0.1)]
    pub rotation_step: f64,
    #[builder(default = 50.0)]
    pub glow_min: f64,
    #[builder(default = 200.0)]
    pub glow_max: f64,
    /// Alpha units per frame for the highlight glow ramp.
    #[builder(default = 2.0)]
    pub glow_step: f64,
    /// Degrees per frame for the dots orbiting the highlighted sign.
    #[builder(default = 100.0 / NOMINAL_FRAME_RATE)]
    pub orbit_step: f64,
    /// Radius swing of the pulsing ornament rings, in pixels.
    #[builder(default = 10.0)]
    pub pulse_amplitude: f64,
    /// Angular speed of the pulse in radians per nominal second.
    #[builder(default = 2.0)]
    pub pulse_speed: f64,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    params: AnimationParams,
    frame: u64,
    rotation: f64,
    glow_alpha: f64,
    glow_rising: bool,
    orbit: f64,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(AnimationParams::default())
    }
}

impl AnimationState {
    /// Starts the orbiting dots at a random phase.
    pub fn new(params: AnimationParams) -> Self {
        let mut rng = rand::rng();
        Self::with_phase(params, rng.random_range(0.0..360.0))
    }

    pub fn with_phase(params: AnimationParams, orbit: f64) -> Self {
        let (low, _) = glow_bounds(&params);
        Self {
            params,
            frame: 0,
            rotation: 0.0,
            glow_alpha: low,
            glow_rising: true,
            orbit: orbit.rem_euclid(360.0),
        }
    }

    pub fn advance(&mut self) {
        let params = self.params;
        self.frame = self.frame.wrapping_add(1);
        self.rotation = (self.rotation + params.rotation_step).rem_euclid(360.0);
        self.orbit = (self.orbit + params.orbit_step).rem_euclid(360.0);

        let (low, high) = glow_bounds(&params);
        if self.glow_rising {
            self.glow_alpha += params.glow_step;
            if self.glow_alpha >= high {
                self.glow_alpha = high;
                self.glow_rising = false;
            }
        } else {
            self.glow_alpha -= params.glow_step;
            if self.glow_alpha <= low {
                self.glow_alpha = low;
                self.glow_rising = true;
            }
        }
    }

    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Rotation of the centre ornament in `[0, 360)`.
    pub const fn rotation(&self) -> f64 {
        self.rotation
    }

    /// The central star turns at half the ornament speed.
    pub fn star_rotation(&self) -> f64 {
        self.rotation / 2.0
    }

    /// Highlight glow alpha, bounded by `glow_min..=glow_max`.
    pub const fn glow_alpha(&self) -> f64 {
        self.glow_alpha
    }

    pub const fn glow_rising(&self) -> bool {
        self.glow_rising
    }

    /// Phase of the dots orbiting the highlighted sign, in `[0, 360)`.
    pub const fn orbit(&self) -> f64 {
        self.orbit
    }

    /// Radius offset for the pulsing rings, in `[-amplitude, amplitude]`.
    pub fn pulse(&self) -> f64 {
        let seconds = self.frame as f64 / NOMINAL_FRAME_RATE;
        (seconds * self.params.pulse_speed).sin() * self.params.pulse_amplitude
    }

    pub const fn params(&self) -> &AnimationParams {
        &self.params
    }
}

fn glow_bounds(params: &AnimationParams) -> (f64, f64) {
    (
        params.glow_min.min(params.glow_max),
        params.glow_min.max(params.glow_max),
    )
}
