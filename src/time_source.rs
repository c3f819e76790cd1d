//! Resolution of "now" for the clock face.
//!
//! A [`TimeSource`] reads the real clock through the [`Clock`] trait and
//! either converts it into the selected timezone or, when the user has
//! applied an override, offsets the override by the real time elapsed since
//! it was applied. The override therefore behaves like a new epoch that keeps
//! ticking rather than a frozen display.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use regex::Regex;

use crate::error::ClockError;

/// Selectable timezones, in cycling order.
pub const TIMEZONES: [Tz; 6] = [
    Tz::Europe__Madrid,
    Tz::Europe__Rome,
    Tz::America__New_York,
    Tz::America__Sao_Paulo,
    Tz::Asia__Tokyo,
    Tz::America__Bogota,
];

static STRICT_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]\d|2[0-3]):([0-5]\d):([0-5]\d)$").expect("strict time pattern")
});

static PARTIAL_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2}:)?([0-9]{1,2}:)?[0-9]{1,2}$").expect("partial time pattern")
});

/// Source of real wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A resolved point in time for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instant {
    /// 0..=23
    pub hour: u8,
    /// 0..=59
    pub minute: u8,
    /// 0..=59
    pub second: u8,
    /// Sub-second fraction in `[0.0, 1.0)`.
    pub fraction: f64,
    pub timezone: Tz,
}

impl Instant {
    fn from_timelike<T: Timelike>(time: &T, timezone: Tz) -> Self {
        // Leap seconds report nanoseconds past 1e9.
        let nanos = time.nanosecond() % 1_000_000_000;
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second() as u8,
            fraction: f64::from(nanos) / 1_000_000_000.0,
            timezone,
        }
    }

    /// Hour of the day folded onto the 12-hour dial (0 is XII).
    pub const fn dial_hour(&self) -> u8 {
        self.hour % 12
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// A user-chosen display time and the real instant it was applied at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOverride {
    start: NaiveTime,
    anchor: DateTime<Utc>,
}

impl TimeOverride {
    /// The display time at the moment the override was applied.
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// The real instant the override was applied at.
    pub const fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    fn at(&self, real_now: DateTime<Utc>) -> NaiveTime {
        let elapsed = real_now.signed_duration_since(self.anchor);
        // Wraps past midnight; the day count is irrelevant to the dial.
        let (time, _days) = self.start.overflowing_add_signed(elapsed);
        time
    }
}

/// Direction for cycling through [`TIMEZONES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Parses a strict `HH:MM:SS` string.
pub fn parse_time(input: &str) -> Result<NaiveTime, ClockError> {
    let invalid = || ClockError::InvalidTimeFormat {
        input: input.to_owned(),
    };
    let caps = STRICT_TIME.captures(input).ok_or_else(invalid)?;
    let mut fields = [0u32; 3];
    for (slot, field) in fields.iter_mut().zip(1..=3usize) {
        *slot = caps[field].parse().map_err(|_| invalid())?;
    }
    NaiveTime::from_hms_opt(fields[0], fields[1], fields[2]).ok_or_else(invalid)
}

/// Loose check used while the user is still typing. The empty string passes.
pub fn is_partial_time(input: &str) -> bool {
    input.is_empty() || PARTIAL_TIME.is_match(input)
}

/// Resolves the current [`Instant`], honouring the override and timezone.
#[derive(Debug, Clone)]
pub struct TimeSource<C: Clock = SystemClock> {
    clock: C,
    timezone_index: usize,
    time_override: Option<TimeOverride>,
}

impl TimeSource<SystemClock> {
    pub fn system() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> TimeSource<C> {
    /// Starts on the first zone of [`TIMEZONES`] with no override.
    pub fn new(clock: C) -> Self {
        Self::with_timezone_index(clock, 0)
    }

    /// Starts on `TIMEZONES[index % TIMEZONES.len()]`.
    pub fn with_timezone_index(clock: C, index: usize) -> Self {
        Self {
            clock,
            timezone_index: index % TIMEZONES.len(),
            time_override: None,
        }
    }

    /// Starts on the zone with the given IANA name.
    pub fn with_timezone_name(clock: C, name: &str) -> Result<Self, ClockError> {
        let index = TIMEZONES
            .iter()
            .position(|tz| tz.name() == name)
            .ok_or_else(|| ClockError::UnknownTimezone {
                name: name.to_owned(),
            })?;
        Ok(Self::with_timezone_index(clock, index))
    }

    pub fn now(&self) -> Instant {
        let real_now = self.clock.now();
        let timezone = self.timezone();
        match &self.time_override {
            Some(time_override) => Instant::from_timelike(&time_override.at(real_now), timezone),
            None => Instant::from_timelike(&real_now.with_timezone(&timezone), timezone),
        }
    }

    /// Replaces any active override with `input`, anchored at the current
    /// real instant. On failure the previous state is left untouched.
    pub fn set_override(&mut self, input: &str) -> Result<(), ClockError> {
        let start = match parse_time(input) {
            Ok(start) => start,
            Err(err) => {
                log::warn!("rejected time override: {err}");
                return Err(err);
            }
        };
        self.time_override = Some(TimeOverride {
            start,
            anchor: self.clock.now(),
        });
        log::info!("time override set to {start}");
        Ok(())
    }

    /// Returns to live time in the selected timezone.
    pub fn clear_override(&mut self) {
        if self.time_override.take().is_some() {
            log::info!("time override cleared");
        }
    }

    pub const fn time_override(&self) -> Option<&TimeOverride> {
        self.time_override.as_ref()
    }

    pub const fn override_active(&self) -> bool {
        self.time_override.is_some()
    }

    /// Cycles the timezone, wrapping at both ends. An active override keeps
    /// its wall values.
    pub fn select_timezone(&mut self, direction: Direction) {
        let len = TIMEZONES.len();
        self.timezone_index = match direction {
            Direction::Next => (self.timezone_index + 1) % len,
            Direction::Prev => (self.timezone_index + len - 1) % len,
        };
        log::info!("timezone is now {}", self.timezone().name());
    }

    pub fn timezone(&self) -> Tz {
        TIMEZONES[self.timezone_index]
    }

    pub const fn timezone_index(&self) -> usize {
        self.timezone_index
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }
}
