//! The fixed ring of twelve zodiac signs.
//!
//! Signs live in an array ordered by base angle. Circular traversal is index
//! arithmetic modulo 12, so there are no back-references to maintain.

/// Number of signs on the ring.
pub const SIGN_COUNT: usize = 12;

/// Angular step between neighbouring signs.
pub const SIGN_STEP_DEG: f64 = 30.0;

/// Half-width of the window in which the hour hand activates a sign.
///
/// The hour hand sweeps 0.5° per minute, so ±8° keeps a sign lit for
/// about 16 minutes either side of its base angle, once per 12 hours.
pub const ACTIVE_TOLERANCE_DEG: f64 = 8.0;

/// One sign: name, image asset and base angle (clockwise from XII).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZodiacSignRecord {
    pub name: &'static str,
    pub asset: &'static str,
    pub base_angle: f64,
}

impl ZodiacSignRecord {
    const fn new(name: &'static str, asset: &'static str, base_angle: f64) -> Self {
        Self {
            name,
            asset,
            base_angle,
        }
    }

    /// Whether `angle` lies within `tolerance` degrees of this sign, measured
    /// the short way round the circle.
    pub fn is_within(&self, angle: f64, tolerance: f64) -> bool {
        angular_distance(self.base_angle, angle) <= tolerance
    }
}

/// Shortest distance between two directions, in `[0, 180]`.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

/// The sign table, sorted by base angle.
pub const SIGNS: [ZodiacSignRecord; SIGN_COUNT] = [
    ZodiacSignRecord::new("Pisces", "pisces.png", 0.0),
    ZodiacSignRecord::new("Aries", "aries.png", 30.0),
    ZodiacSignRecord::new("Taurus", "taurus.png", 60.0),
    ZodiacSignRecord::new("Gemini", "gemini.png", 90.0),
    ZodiacSignRecord::new("Cancer", "cancer.png", 120.0),
    ZodiacSignRecord::new("Leo", "leo.png", 150.0),
    ZodiacSignRecord::new("Virgo", "virgo.png", 180.0),
    ZodiacSignRecord::new("Libra", "libra.png", 210.0),
    ZodiacSignRecord::new("Scorpio", "scorpio.png", 240.0),
    ZodiacSignRecord::new("Sagittarius", "sagittarius.png", 270.0),
    ZodiacSignRecord::new("Capricorn", "capricorn.png", 300.0),
    ZodiacSignRecord::new("Aquarius", "aquarius.png", 330.0),
];

#[derive(Debug, Clone)]
pub struct ZodiacRing {
    signs: [ZodiacSignRecord; SIGN_COUNT],
    start: usize,
    tolerance: f64,
}

impl Default for ZodiacRing {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ZodiacRing {
    /// A ring whose walks begin at `SIGNS[start % 12]`.
    pub fn new(start: usize) -> Self {
        Self {
            signs: SIGNS,
            start: start % SIGN_COUNT,
            tolerance: ACTIVE_TOLERANCE_DEG,
        }
    }

    /// Overrides the activation window. Values of 15° or more make
    /// neighbouring windows overlap; the lowest index then wins.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub const fn signs(&self) -> &[ZodiacSignRecord; SIGN_COUNT] {
        &self.signs
    }

    pub fn get(&self, index: usize) -> &ZodiacSignRecord {
        &self.signs[index % SIGN_COUNT]
    }

    pub const fn next_index(index: usize) -> usize {
        (index + 1) % SIGN_COUNT
    }

    pub const fn prev_index(index: usize) -> usize {
        (index + SIGN_COUNT - 1) % SIGN_COUNT
    }

    /// Endless walk round the ring from the start sign. Take 12 for one lap.
    pub fn walk(&self) -> RingWalk<'_> {
        RingWalk {
            ring: self,
            index: self.start,
        }
    }

    /// One lap of [`walk`](Self::walk), each sign paired with its ring index.
    pub fn lap(&self) -> impl Iterator<Item = (usize, &ZodiacSignRecord)> + '_ {
        self.walk()
            .take(SIGN_COUNT)
            .enumerate()
            .map(move |(step, sign)| ((self.start + step) % SIGN_COUNT, sign))
    }

    /// Index of the sign with the given name.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.signs.iter().position(|sign| sign.name == name)
    }

    /// Index of the sign whose window contains the hour-hand angle.
    pub fn active_index_for_angle(&self, hour_angle: f64) -> Option<usize> {
        self.signs
            .iter()
            .position(|sign| sign.is_within(hour_angle, self.tolerance))
    }

    pub fn active_sign_for_angle(&self, hour_angle: f64) -> Option<ZodiacSignRecord> {
        self.active_index_for_angle(hour_angle)
            .map(|index| self.signs[index])
    }
}

/// Iterator returned by [`ZodiacRing::walk`]. Never ends.
#[derive(Debug, Clone)]
pub struct RingWalk<'a> {
    ring: &'a ZodiacRing,
    index: usize,
}

impl<'a> Iterator for RingWalk<'a> {
    type Item = &'a ZodiacSignRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let sign = &self.ring.signs[self.index];
        self.index = ZodiacRing::next_index(self.index);
        Some(sign)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_a_permutation_of_the_thirty_degree_steps() {
        let mut angles: Vec<i64> = SIGNS.iter().map(|s| s.base_angle as i64).collect();
        angles.sort_unstable();
        angles.dedup();
        assert_eq!(angles, (0..12).map(|i| i * 30).collect::<Vec<_>>());
        assert!(SIGNS.windows(2).all(|w| w[0].base_angle < w[1].base_angle));
    }

    #[test]
    fn walk_returns_to_start_after_twelve_steps() {
        let ring = ZodiacRing::new(5);
        let lap: Vec<&str> = ring.walk().take(13).map(|s| s.name).collect();
        assert_eq!(lap[0], "Leo");
        assert_eq!(lap[1], "Virgo");
        assert_eq!(lap[5], "Capricorn");
        assert_eq!(lap[6], "Aquarius");
        assert_eq!(lap[7], "Pisces");
        assert_eq!(lap[12], "Leo");
    }

    #[test]
    fn lap_pairs_signs_with_their_ring_index() {
        let ring = ZodiacRing::new(10);
        let lap: Vec<(usize, &str)> = ring.lap().map(|(i, s)| (i, s.name)).collect();
        assert_eq!(lap.len(), SIGN_COUNT);
        assert_eq!(lap[0], (10, "Capricorn"));
        assert_eq!(lap[2], (0, "Pisces"));
        assert!(lap.iter().all(|&(i, name)| SIGNS[i].name == name));
    }

    #[test]
    fn walk_is_restartable() {
        let ring = ZodiacRing::new(11);
        let first: Vec<_> = ring.walk().take(24).collect();
        let second: Vec<_> = ring.walk().take(24).collect();
        assert_eq!(first, second);
        assert_eq!(first[0].name, "Aquarius");
        assert_eq!(first[1].name, "Pisces");
    }

    #[test]
    fn neighbour_indices_wrap() {
        assert_eq!(ZodiacRing::next_index(11), 0);
        assert_eq!(ZodiacRing::prev_index(0), 11);
        for i in 0..SIGN_COUNT {
            assert_eq!(ZodiacRing::prev_index(ZodiacRing::next_index(i)), i);
        }
    }

    #[test]
    fn leo_is_active_within_its_window() {
        let ring = ZodiacRing::default();
        for tenth in 1420..=1580i32 {
            let angle = f64::from(tenth) / 10.0;
            assert_eq!(ring.active_sign_for_angle(angle).unwrap().name, "Leo", "{angle}");
        }
        assert!(ring.active_sign_for_angle(160.0).is_none());
        assert!(ring.active_sign_for_angle(141.9).is_none());
    }

    #[test]
    fn windows_wrap_through_zero() {
        let ring = ZodiacRing::default();
        assert_eq!(ring.active_sign_for_angle(355.0).unwrap().name, "Pisces");
        assert_eq!(ring.active_sign_for_angle(4.0).unwrap().name, "Pisces");
        assert_eq!(ring.active_sign_for_angle(-3.0).unwrap().name, "Pisces");
        assert_eq!(ring.active_sign_for_angle(335.0).unwrap().name, "Aquarius");
    }

    #[test]
    fn gaps_between_windows_match_nothing() {
        let ring = ZodiacRing::default();
        for gap in [15.0, 45.0, 100.0, 225.0, 345.0] {
            assert!(ring.active_index_for_angle(gap).is_none(), "{gap}");
        }
    }

    #[test]
    fn find_by_name() {
        let ring = ZodiacRing::default();
        assert_eq!(ring.find("Leo"), Some(5));
        assert_eq!(ring.find("Ophiuchus"), None);
    }

    #[test]
    fn angular_distance_is_symmetric_and_short() {
        assert_eq!(angular_distance(10.0, 350.0), 20.0);
        assert_eq!(angular_distance(350.0, 10.0), 20.0);
        assert_eq!(angular_distance(0.0, 180.0), 180.0);
        assert_eq!(angular_distance(720.0, 0.0), 0.0);
    }
}
