//! Hand angles, in degrees clockwise from the XII position.
//!
//! These are pure functions of an [`Instant`]; every result is normalised
//! into `[0, 360)`.

use crate::time_source::Instant;
use crate::zodiac::ZodiacRing;

/// Folds any angle into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let folded = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

/// 30° per hour plus 0.5° per minute.
pub fn hour_angle(instant: &Instant) -> f64 {
    normalize_degrees(f64::from(instant.hour % 12) * 30.0 + f64::from(instant.minute) * 0.5)
}

/// 6° per minute plus 0.1° per second.
pub fn minute_angle(instant: &Instant) -> f64 {
    normalize_degrees(f64::from(instant.minute) * 6.0 + f64::from(instant.second) * 0.1)
}

/// 6° per second, interpolated through the sub-second fraction.
pub fn second_angle(instant: &Instant) -> f64 {
    normalize_degrees(f64::from(instant.second) * 6.0 + instant.fraction * 6.0)
}

/// The three hand angles for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    pub fn from_instant(instant: &Instant) -> Self {
        Self {
            hour: hour_angle(instant),
            minute: minute_angle(instant),
            second: second_angle(instant),
        }
    }
}

/// Whether the hour hand currently points at the sign named `target`.
pub fn is_highlighted(ring: &ZodiacRing, hour_angle: f64, target: &str) -> bool {
    ring.active_sign_for_angle(hour_angle)
        .is_some_and(|sign| sign.name == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn at(hour: u8, minute: u8, second: u8, fraction: f64) -> Instant {
        Instant {
            hour,
            minute,
            second,
            fraction,
            timezone: Tz::Europe__Madrid,
        }
    }

    #[test]
    fn quarter_past_three() {
        let angles = HandAngles::from_instant(&at(15, 15, 30, 0.5));
        assert_eq!(angles.hour, 97.5);
        assert_eq!(angles.minute, 93.0);
        assert_eq!(angles.second, 183.0);
    }

    #[test]
    fn noon_and_midnight_point_up() {
        for hour in [0, 12] {
            let angles = HandAngles::from_instant(&at(hour, 0, 0, 0.0));
            assert_eq!(angles, HandAngles { hour: 0.0, minute: 0.0, second: 0.0 });
        }
    }

    #[test]
    fn angles_stay_in_range_at_the_extremes() {
        for hour in 0..24 {
            let angles = HandAngles::from_instant(&at(hour, 59, 59, 0.999_999));
            for angle in [angles.hour, angles.minute, angles.second] {
                assert!((0.0..360.0).contains(&angle), "{angle}");
            }
        }
    }

    #[test]
    fn normalisation_folds_large_and_negative_values() {
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert!(normalize_degrees(-1e-18) < 360.0);
    }

    #[test]
    fn same_input_same_output() {
        let instant = at(7, 42, 13, 0.123_456);
        let first = HandAngles::from_instant(&instant);
        for _ in 0..100 {
            let again = HandAngles::from_instant(&instant);
            assert_eq!(first.hour.to_bits(), again.hour.to_bits());
            assert_eq!(first.minute.to_bits(), again.minute.to_bits());
            assert_eq!(first.second.to_bits(), again.second.to_bits());
        }
    }

    #[test]
    fn leo_highlight_around_five_o_clock() {
        let ring = ZodiacRing::default();
        // 4:44 -> 142°, 5:16 -> 158°, 5:20 -> 160°
        assert!(is_highlighted(&ring, hour_angle(&at(4, 44, 0, 0.0)), "Leo"));
        assert!(is_highlighted(&ring, hour_angle(&at(17, 16, 0, 0.0)), "Leo"));
        assert!(!is_highlighted(&ring, hour_angle(&at(5, 20, 0, 0.0)), "Leo"));
        assert!(!is_highlighted(&ring, hour_angle(&at(6, 0, 0, 0.0)), "Leo"));
    }
}
