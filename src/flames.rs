//! Hour flames: a sand-timer that burns down over twelve hours and relights.
//!
//! Each dial hour owns one flame. When the observed dial hour changes, the
//! flame of the hour that just ended goes out. Once every flame is out the
//! whole track relights at once. Flames never relight individually.

use crate::zodiac::SIGN_COUNT;

/// Number of flames, one per dial hour.
pub const FLAME_COUNT: usize = SIGN_COUNT;

/// What a single observation did to the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlameTransition {
    /// The hour did not change (or this was the first observation).
    Unchanged,
    /// The flame for this dial hour went out.
    Extinguished(usize),
    /// The flame for this dial hour went out and, all twelve being out, the
    /// track relit.
    Relit(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourFlameTrack {
    lit: [bool; FLAME_COUNT],
    last_hour: Option<usize>,
}

impl Default for HourFlameTrack {
    fn default() -> Self {
        Self::new()
    }
}

impl HourFlameTrack {
    /// All flames lit, no hour observed yet.
    pub const fn new() -> Self {
        Self {
            lit: [true; FLAME_COUNT],
            last_hour: None,
        }
    }

    /// Feeds the current hour of day (0..=23, folded mod 12).
    pub fn observe(&mut self, hour_of_day: u8) -> FlameTransition {
        let hour = usize::from(hour_of_day) % FLAME_COUNT;
        let previous = self.last_hour.replace(hour);

        let Some(ended) = previous.filter(|&last| last != hour) else {
            return FlameTransition::Unchanged;
        };

        self.lit[ended] = false;
        log::debug!("flame {ended} extinguished at dial hour {hour}");

        if self.lit.iter().all(|lit| !lit) {
            self.lit = [true; FLAME_COUNT];
            log::debug!("all flames out, relighting track");
            return FlameTransition::Relit(ended);
        }

        FlameTransition::Extinguished(ended)
    }

    pub const fn flames(&self) -> [bool; FLAME_COUNT] {
        self.lit
    }

    pub fn is_lit(&self, hour: usize) -> bool {
        self.lit[hour % FLAME_COUNT]
    }

    pub fn lit_count(&self) -> usize {
        self.lit.iter().filter(|lit| **lit).count()
    }

    pub const fn last_hour(&self) -> Option<usize> {
        self.last_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_fully_lit() {
        let track = HourFlameTrack::new();
        assert_eq!(track.flames(), [true; FLAME_COUNT]);
        assert_eq!(track.last_hour(), None);
    }

    #[test]
    fn first_observation_only_records_the_hour() {
        let mut track = HourFlameTrack::new();
        assert_eq!(track.observe(15), FlameTransition::Unchanged);
        assert_eq!(track.last_hour(), Some(3));
        assert_eq!(track.lit_count(), FLAME_COUNT);
    }

    #[test]
    fn ended_hour_goes_out_at_the_boundary() {
        let mut track = HourFlameTrack::new();
        track.observe(9);
        assert_eq!(track.observe(9), FlameTransition::Unchanged);
        assert_eq!(track.observe(10), FlameTransition::Extinguished(9));
        assert!(!track.is_lit(9));
        assert!(track.is_lit(10));
        assert_eq!(track.lit_count(), FLAME_COUNT - 1);
    }

    #[test]
    fn am_and_pm_share_a_flame() {
        let mut track = HourFlameTrack::new();
        track.observe(2);
        assert_eq!(track.observe(14), FlameTransition::Unchanged);
    }

    #[test]
    fn full_cycle_relights_everything() {
        let mut track = HourFlameTrack::new();
        track.observe(0);
        for step in 1..FLAME_COUNT {
            assert_eq!(
                track.observe(step as u8),
                FlameTransition::Extinguished(step - 1)
            );
            assert_eq!(track.lit_count(), FLAME_COUNT - step);
        }
        assert_eq!(track.observe(12), FlameTransition::Relit(11));
        assert_eq!(track.flames(), [true; FLAME_COUNT]);
    }

    #[test]
    fn at_most_one_flame_per_change() {
        let mut track = HourFlameTrack::new();
        track.observe(1);
        track.observe(7);
        assert_eq!(track.lit_count(), FLAME_COUNT - 1);
        assert!(!track.is_lit(1));
    }

    #[test]
    fn burning_an_already_dark_flame_keeps_count() {
        let mut track = HourFlameTrack::new();
        track.observe(3);
        track.observe(4);
        track.observe(3);
        assert_eq!(track.observe(4), FlameTransition::Extinguished(3));
        assert_eq!(track.lit_count(), FLAME_COUNT - 2);
    }
}
