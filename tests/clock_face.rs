use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use zodiac_clock::animation::AnimationParams;
use zodiac_clock::flames::FlameTransition;
use zodiac_clock::{Clock, ClockError, ClockFace, Direction, TimeSource, ZodiacRing};

#[derive(Clone)]
struct ManualClock(Rc<Cell<DateTime<Utc>>>);

impl ManualClock {
    fn starting_at(time: DateTime<Utc>) -> Self {
        Self(Rc::new(Cell::new(time)))
    }

    fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.get()
    }
}

fn face_at_midnight() -> (ManualClock, ClockFace<ManualClock>) {
    let clock = ManualClock::starting_at(Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap());
    let mut face = ClockFace::new(
        TimeSource::new(clock.clone()),
        ZodiacRing::default(),
        AnimationParams::default(),
    );
    face.set_override("00:00:00").unwrap();
    (clock, face)
}

#[test]
fn flames_burn_down_over_twelve_hours_then_relight() {
    let (clock, mut face) = face_at_midnight();

    let first = face.tick();
    assert_eq!(first.flame_transition, FlameTransition::Unchanged);
    assert!(first.flames.iter().all(|lit| *lit));

    for hour in 1..12usize {
        clock.advance(Duration::hours(1));
        let frame = face.tick();
        assert_eq!(frame.flame_transition, FlameTransition::Extinguished(hour - 1));
        assert_eq!(frame.flames.iter().filter(|lit| !**lit).count(), hour);

        // Further frames within the same hour change nothing.
        clock.advance(Duration::minutes(30));
        assert_eq!(face.tick().flame_transition, FlameTransition::Unchanged);
        clock.advance(Duration::minutes(-30));
    }
    assert_eq!(face.flames().lit_count(), 1);
    assert!(face.flames().is_lit(11));

    clock.advance(Duration::hours(1));
    let frame = face.tick();
    assert_eq!(frame.instant.hour, 12);
    assert_eq!(frame.flame_transition, FlameTransition::Relit(11));
    assert!(frame.flames.iter().all(|lit| *lit));
}

#[test]
fn override_session_through_the_public_api() {
    let (clock, mut face) = face_at_midnight();

    face.set_override("04:50:00").unwrap();
    let frame = face.tick();
    assert!(frame.override_active);
    assert_eq!(frame.angles.hour, 145.0);
    assert!(frame.highlight.active);
    assert_eq!(frame.active_sign, face.ring().find("Leo"));

    clock.advance(Duration::minutes(30));
    let frame = face.tick();
    assert_eq!(frame.instant.to_string(), "05:20:00");
    assert!(!frame.highlight.active);
    assert_eq!(frame.active_sign, None);

    let err = face.set_override("5:10").unwrap_err();
    assert_eq!(
        err,
        ClockError::InvalidTimeFormat {
            input: "5:10".to_string()
        }
    );
    assert_eq!(face.tick().instant.to_string(), "05:20:00");

    face.select_timezone(Direction::Next);
    let frame = face.tick();
    assert_eq!(frame.instant.timezone.name(), "Europe/Rome");
    assert_eq!(frame.instant.to_string(), "05:20:00");

    face.clear_override();
    let frame = face.tick();
    assert!(!frame.override_active);
    // 08:30 UTC in Rome during winter time.
    assert_eq!(frame.instant.to_string(), "09:30:00");
}
