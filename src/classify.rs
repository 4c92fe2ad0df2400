//! Deciding which needles cross the ruled lines
//!
//! The lines are horizontal and sit at `y = kD` for every integer `k`, so
//! only the y coordinates of a needle matter. A needle crosses the family
//! exactly when the closed interval `[y_lo, y_hi]` contains a multiple of
//! `D`, which is answered with two `floor` calls instead of a walk over
//! candidate lines.
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::geom::{Field, Needle};
use crate::impl_display;
use crate::result::{check_spacing, ConfigError};

/// Infinite family of horizontal lines `y = k * spacing`, `k ∈ ℤ`
///
/// # Example
///
/// ```
/// use buffon::classify::LineFamily;
///
/// let lines = LineFamily::new(1.0).unwrap();
///
/// assert!(lines.crosses(0.0, 1.0));
/// assert!(lines.crosses(2.0, 2.0)); // lying on a line counts
/// assert!(!lines.crosses(0.2, 0.3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde1", serde(try_from = "LineFamilyParts"))]
pub struct LineFamily {
    spacing: f64,
}

#[cfg(feature = "serde1")]
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
struct LineFamilyParts {
    spacing: f64,
}

#[cfg(feature = "serde1")]
impl TryFrom<LineFamilyParts> for LineFamily {
    type Error = ConfigError;

    fn try_from(parts: LineFamilyParts) -> Result<Self, Self::Error> {
        LineFamily::new(parts.spacing)
    }
}

impl LineFamily {
    /// Create a new family of lines `spacing` apart
    pub fn new(spacing: f64) -> Result<Self, ConfigError> {
        check_spacing(spacing).map(LineFamily::new_unchecked)
    }

    /// Creates a new LineFamily without checking whether the spacing is
    /// valid.
    #[inline]
    pub fn new_unchecked(spacing: f64) -> Self {
        LineFamily { spacing }
    }

    /// Get the distance between neighboring lines, D
    #[inline]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Returns `true` if a line lies in the closed interval spanned by `y1`
    /// and `y2`.
    ///
    /// Touching a line at either end counts as crossing it, whatever the
    /// spacing.
    ///
    /// ```
    /// # use buffon::classify::LineFamily;
    /// let lines = LineFamily::new(0.1).unwrap();
    ///
    /// // 3 * 0.1 / 0.1 is 3.0000000000000004, still on the line
    /// let y = 3.0 * 0.1;
    /// assert!(lines.crosses(y, y));
    /// ```
    #[inline]
    pub fn crosses(&self, y1: f64, y2: f64) -> bool {
        let (lo, hi) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        let lo_k = lo / self.spacing;
        let floor_lo = lo_k.floor();
        let floor_hi = (hi / self.spacing).floor();
        // y / D can miss an integer by an ulp when y = k * D, so the lines
        // just outside the floor test are checked where they are placed
        floor_hi > floor_lo
            || lo_k == floor_lo
            || self.holds_line(lo_k.ceil() - 1.0, lo, hi)
            || self.holds_line(floor_hi + 1.0, lo, hi)
    }

    /// Returns `true` if line `k` lies in `[lo, hi]`
    #[inline]
    fn holds_line(&self, k: f64, lo: f64, hi: f64) -> bool {
        let line = k * self.spacing;
        lo <= line && line <= hi
    }

    /// Number of lines in the closed interval spanned by `y1` and `y2`
    ///
    /// Saturates at `u64::MAX`.
    ///
    /// # Example
    ///
    /// ```
    /// # use buffon::classify::LineFamily;
    /// let lines = LineFamily::new(0.5).unwrap();
    ///
    /// assert_eq!(lines.lines_crossed(0.1, 0.4), 0);
    /// assert_eq!(lines.lines_crossed(0.0, 1.0), 3);
    /// assert_eq!(lines.lines_crossed(1.2, -0.2), 3);
    /// ```
    pub fn lines_crossed(&self, y1: f64, y2: f64) -> u64 {
        let (lo, hi) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        let mut first = (lo / self.spacing).ceil();
        let mut last = (hi / self.spacing).floor();
        if self.holds_line(first - 1.0, lo, hi) {
            first -= 1.0;
        }
        if self.holds_line(last + 1.0, lo, hi) {
            last += 1.0;
        }
        if last < first {
            0
        } else {
            ((last - first) as u64).saturating_add(1)
        }
    }

    /// Line-by-line reference for [`crosses`](LineFamily::crosses).
    ///
    /// Walks every candidate line from just below `y_lo` to just above
    /// `y_hi`. Cost grows with `(y_hi - y_lo) / spacing`, so this is only
    /// used to check the closed form. Line indices are walked as `i64`, so
    /// the walk ends even where `f64` can no longer tell `k` from `k + 1`.
    pub fn sweep_crosses(&self, y1: f64, y2: f64) -> bool {
        let (lo, hi) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        let first = (lo / self.spacing).floor() as i64;
        let last = ((hi / self.spacing).floor() as i64).saturating_add(1);
        (first..=last).any(|k| {
            let line = k as f64 * self.spacing;
            lo <= line && line <= hi
        })
    }

    /// Returns `true` if `needle` crosses at least one line
    #[inline]
    pub fn needle_crosses(&self, needle: &Needle) -> bool {
        self.crosses(needle.start().y, needle.end().y)
    }

    /// Tag every needle with whether it crosses a line
    pub fn classify(&self, needles: &[Needle]) -> Vec<bool> {
        needles.iter().map(|n| self.needle_crosses(n)).collect()
    }

    /// Number of needles that cross at least one line
    pub fn count_crossings(&self, needles: &[Needle]) -> usize {
        needles.iter().filter(|n| self.needle_crosses(n)).count()
    }

    /// The y position of every line inside `field`, bottom to top
    ///
    /// Line indices are kept as `f64`, so fields more than 2^53 spacings
    /// from zero yield repeated positions rather than wrapped ones, and the
    /// number of lines saturates at `u64::MAX`.
    ///
    /// # Example
    ///
    /// ```
    /// # use buffon::classify::LineFamily;
    /// # use buffon::geom::Field;
    /// let lines = LineFamily::new(2.5).unwrap();
    /// let field = Field::new(0.0, 1.0, -1.0, 6.0).unwrap();
    ///
    /// let ys: Vec<f64> = lines.positions_within(&field).collect();
    /// assert_eq!(ys, vec![0.0, 2.5, 5.0]);
    /// ```
    pub fn positions_within(
        &self,
        field: &Field,
    ) -> impl Iterator<Item = f64> + '_ {
        let first = (field.y_min() / self.spacing).ceil();
        let last = (field.y_max() / self.spacing).floor();
        let count = if last < first {
            0
        } else {
            ((last - first) as u64).saturating_add(1)
        };
        (0..count).map(move |i| (first + i as f64) * self.spacing)
    }
}

impl From<&LineFamily> for String {
    fn from(lines: &LineFamily) -> String {
        format!("LineFamily(D: {})", lines.spacing)
    }
}

impl_display!(LineFamily);

/// Tag each needle in `needles` with whether it crosses one of the lines
/// `spacing` apart.
///
/// # Example
///
/// ```
/// use buffon::classify::classify_batch;
/// use buffon::geom::Needle;
///
/// let needles = vec![
///     Needle::new((0.0, 0.0).into(), (0.0, 1.0).into()),
///     Needle::new((0.0, 0.2).into(), (0.0, 0.3).into()),
/// ];
///
/// assert_eq!(classify_batch(&needles, 1.0).unwrap(), vec![true, false]);
/// assert!(classify_batch(&needles, 0.0).is_err());
/// ```
pub fn classify_batch(
    needles: &[Needle],
    spacing: f64,
) -> Result<Vec<bool>, ConfigError> {
    LineFamily::new(spacing).map(|lines| lines.classify(needles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::test_basic_impls;
    use proptest::prelude::*;

    test_basic_impls!(LineFamily::new(1.0).unwrap());

    #[cfg(feature = "serde1")]
    #[test]
    fn deserialize_rejects_non_positive_spacing() {
        assert!(serde_json::from_str::<LineFamily>(r#"{"spacing":0.0}"#).is_err());
        assert!(serde_json::from_str::<LineFamily>(r#"{"spacing":-2.0}"#).is_err());
        let lines: LineFamily = serde_json::from_str(r#"{"spacing":0.3}"#).unwrap();
        assert_eq!(lines.spacing(), 0.3);
    }

    fn vertical(y1: f64, y2: f64) -> Needle {
        Needle::new(Point::new(0.0, y1), Point::new(0.0, y2))
    }

    #[test]
    fn new_rejects_bad_spacing() {
        assert!(LineFamily::new(0.0).is_err());
        assert!(LineFamily::new(-1.0).is_err());
        assert!(LineFamily::new(f64::NAN).is_err());
        assert!(LineFamily::new(f64::INFINITY).is_err());
    }

    #[test]
    fn unit_needle_spanning_two_lines_crosses() {
        let needles = vec![vertical(0.0, 1.0)];
        assert_eq!(classify_batch(&needles, 1.0).unwrap(), vec![true]);
    }

    #[test]
    fn short_needle_between_lines_misses() {
        let needles = vec![vertical(0.2, 0.3)];
        assert_eq!(classify_batch(&needles, 1.0).unwrap(), vec![false]);
    }

    #[test]
    fn needle_lying_on_a_line_crosses() {
        for spacing in [0.5, 1.0, 0.1, 0.3, 0.7] {
            let lines = LineFamily::new(spacing).unwrap();
            for k in -50_i32..=50 {
                let y = f64::from(k) * spacing;
                let flat = Needle::new(Point::new(-1.0, y), Point::new(1.0, y));
                assert!(lines.needle_crosses(&flat), "D = {}, y = {}", spacing, y);
            }
        }
    }

    #[test]
    fn on_line_needles_off_by_an_ulp_in_quotient() {
        // y / D lands just above k for these
        let lines = LineFamily::new(0.1).unwrap();
        assert!(lines.crosses(3.0 * 0.1, 3.0 * 0.1));
        assert!(lines.crosses(-48.0 * 0.1, -48.0 * 0.1));
        assert_eq!(lines.lines_crossed(3.0 * 0.1, 3.0 * 0.1), 1);

        // touching the top end only
        let lines = LineFamily::new(0.7).unwrap();
        let y = 3.0 * 0.7;
        assert!(lines.crosses(y - 0.2, y));
        assert!(lines.sweep_crosses(y - 0.2, y));
    }

    #[test]
    fn sweep_terminates_beyond_exact_float_integers() {
        // y / D is past 2^53, where k + 1.0 == k
        let lines = LineFamily::new(1E-9).unwrap();
        assert!(lines.crosses(1E7, 1E7));
        let _ = lines.sweep_crosses(1E7, 1E7);
        let _ = lines.sweep_crosses(1E7, 1E7 + 1E-8);
    }

    #[test]
    fn positions_within_far_from_zero_do_not_wrap() {
        let lines = LineFamily::new(1E-9).unwrap();
        let field = Field::new(0.0, 1.0, -1E10, 0.0).unwrap();
        let first = lines.positions_within(&field).next().unwrap();
        assert::close(first, -1E10, 1E-3);

        let field = Field::new(0.0, 1.0, 0.0, 1E10).unwrap();
        let ys: Vec<f64> = lines.positions_within(&field).take(3).collect();
        assert::close(ys, vec![0.0, 1E-9, 2E-9], 1E-20);
    }

    #[test]
    fn touching_either_end_counts() {
        let lines = LineFamily::new(1.0).unwrap();
        assert!(lines.crosses(2.0, 2.4));
        assert!(lines.crosses(1.6, 2.0));
        assert!(lines.crosses(2.0, 1.6));
        assert!(!lines.crosses(1.6, 1.999));
    }

    #[test]
    fn negative_coordinates() {
        let lines = LineFamily::new(1.0).unwrap();
        assert!(lines.crosses(-0.5, 0.5));
        assert!(lines.crosses(-1.5, -0.9));
        assert!(lines.crosses(-1.0, -1.0));
        assert!(!lines.crosses(-0.7, -0.2));
    }

    #[test]
    fn long_needle_on_tiny_spacing() {
        let lines = LineFamily::new(1E-9).unwrap();
        assert!(lines.crosses(0.0, 1E6));
        assert_eq!(LineFamily::new(1.0).unwrap().lines_crossed(0.0, 1E6), 1_000_001);
    }

    #[test]
    fn empty_batch_classifies_to_empty() {
        let tags = classify_batch(&[], 1.0).unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn count_matches_classify() {
        let lines = LineFamily::new(1.0).unwrap();
        let needles = vec![
            vertical(0.0, 1.0),
            vertical(0.2, 0.3),
            vertical(3.5, 4.5),
            vertical(7.1, 7.9),
        ];
        let tags = lines.classify(&needles);
        assert_eq!(tags, vec![true, false, true, false]);
        assert_eq!(lines.count_crossings(&needles), 2);
    }

    #[test]
    fn positions_within_include_the_edges() {
        let lines = LineFamily::new(1.0).unwrap();
        let field = Field::default();
        let ys: Vec<f64> = lines.positions_within(&field).collect();
        assert_eq!(ys.len(), 11);
        assert_eq!(ys[0], 0.0);
        assert_eq!(ys[10], 10.0);
    }

    #[test]
    fn display() {
        let lines = LineFamily::new(0.5).unwrap();
        assert_eq!(lines.to_string(), "LineFamily(D: 0.5)");
    }

    fn spacing_strategy() -> impl Strategy<Value = f64> {
        // powers of two keep k * D and y / D exact, so the sweep and the
        // closed form see the same lines
        prop::sample::select(vec![0.125, 0.25, 0.5, 1.0, 2.0, 4.0])
    }

    fn any_spacing_strategy() -> impl Strategy<Value = f64> {
        prop_oneof![
            prop::sample::select(vec![0.1, 0.3, 0.7, 1.5, 0.01, 3.3]),
            0.001..10.0_f64,
        ]
    }

    proptest! {
        #[test]
        fn x_coordinates_do_not_matter(
            y1 in -50.0..50.0_f64,
            y2 in -50.0..50.0_f64,
            xa in -1E3..1E3_f64,
            xb in -1E3..1E3_f64,
            spacing in 0.01..10.0_f64,
        ) {
            let lines = LineFamily::new(spacing).unwrap();
            let a = Needle::new(Point::new(xa, y1), Point::new(xb, y2));
            let b = Needle::new(Point::new(xb, y1), Point::new(xa - 7.0, y2));
            prop_assert_eq!(lines.needle_crosses(&a), lines.needle_crosses(&b));
        }

        #[test]
        fn closed_form_agrees_with_sweep(
            y1 in -20.0..20.0_f64,
            len in 0.0..5.0_f64,
            spacing in spacing_strategy(),
        ) {
            let lines = LineFamily::new(spacing).unwrap();
            let y2 = y1 + len;
            prop_assert_eq!(lines.crosses(y1, y2), lines.sweep_crosses(y1, y2));
            prop_assert_eq!(lines.crosses(y2, y1), lines.sweep_crosses(y2, y1));
        }

        #[test]
        fn crossing_iff_a_line_is_counted(
            y1 in -20.0..20.0_f64,
            y2 in -20.0..20.0_f64,
            spacing in any_spacing_strategy(),
        ) {
            let lines = LineFamily::new(spacing).unwrap();
            prop_assert_eq!(lines.crosses(y1, y2), lines.lines_crossed(y1, y2) > 0);
        }

        #[test]
        fn on_line_needles_always_cross(
            k in -1000_i32..1000,
            spacing in any_spacing_strategy(),
        ) {
            let lines = LineFamily::new(spacing).unwrap();
            let y = f64::from(k) * spacing;
            prop_assert!(lines.crosses(y, y));
            prop_assert!(lines.sweep_crosses(y, y));
        }

        #[test]
        fn needles_ending_on_a_line_agree_with_sweep(
            k in -1000_i32..1000,
            len in 0.0..3.0_f64,
            spacing in any_spacing_strategy(),
        ) {
            let lines = LineFamily::new(spacing).unwrap();
            let y = f64::from(k) * spacing;
            prop_assert!(lines.crosses(y, y + len));
            prop_assert!(lines.crosses(y - len, y));
            prop_assert_eq!(lines.crosses(y, y + len), lines.sweep_crosses(y, y + len));
            prop_assert_eq!(lines.crosses(y - len, y), lines.sweep_crosses(y - len, y));
        }
    }
}
