//! Dropping needles on the field
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::consts::TWO_PI;
use crate::geom::{Field, Needle, Point};
use crate::impl_display;
use crate::result::{check_length, ConfigError};
use crate::traits::Sampleable;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Draws needles of a fixed length with a uniformly random origin inside a
/// [`Field`] and a uniformly random heading in `[0, 2π)`.
///
/// # Example
///
/// ```
/// use buffon::prelude::*;
///
/// let sampler = NeedleSampler::new(1.0, Field::default()).unwrap();
///
/// let mut rng = rand::thread_rng();
/// let needles: Vec<Needle> = sampler.sample(1_000, &mut rng);
///
/// assert_eq!(needles.len(), 1_000);
/// assert!(needles.iter().all(|n| Field::default().contains(&n.start())));
/// assert!(needles.iter().all(|n| (n.length() - 1.0).abs() < 1E-10));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde1", serde(try_from = "NeedleSamplerParts"))]
pub struct NeedleSampler {
    length: f64,
    field: Field,
}

impl NeedleSampler {
    /// Create a sampler for needles of `length` dropped on `field`
    pub fn new(length: f64, field: Field) -> Result<Self, ConfigError> {
        let length = check_length(length)?;
        Ok(NeedleSampler::new_unchecked(length, field))
    }

    /// Creates a new NeedleSampler without checking whether the length is
    /// valid.
    #[inline]
    pub fn new_unchecked(length: f64, field: Field) -> Self {
        NeedleSampler { length, field }
    }

    /// Get the needle length, L
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Get the field origins are drawn from
    #[inline]
    pub fn field(&self) -> &Field {
        &self.field
    }

    // x, y, and heading distributions
    #[inline]
    fn distributions(&self) -> (Uniform<f64>, Uniform<f64>, Uniform<f64>) {
        let (x_min, x_max, y_min, y_max) = self.field.bounds();
        (
            Uniform::new(x_min, x_max),
            Uniform::new(y_min, y_max),
            Uniform::new(0.0, TWO_PI),
        )
    }
}

impl Sampleable<Needle> for NeedleSampler {
    fn draw<R: Rng>(&self, rng: &mut R) -> Needle {
        let (ux, uy, utheta) = self.distributions();
        let origin = Point::new(ux.sample(rng), uy.sample(rng));
        Needle::from_polar(origin, self.length, utheta.sample(rng))
    }

    fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<Needle> {
        let mut needles = Vec::with_capacity(n);
        self.sample_into(n, rng, &mut needles);
        needles
    }

    fn sample_into<R: Rng>(&self, n: usize, rng: &mut R, buf: &mut Vec<Needle>) {
        let (ux, uy, utheta) = self.distributions();
        buf.reserve(n);
        buf.extend((0..n).map(|_| {
            let origin = Point::new(ux.sample(rng), uy.sample(rng));
            Needle::from_polar(origin, self.length, utheta.sample(rng))
        }));
    }
}

#[cfg(feature = "serde1")]
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
struct NeedleSamplerParts {
    length: f64,
    field: Field,
}

#[cfg(feature = "serde1")]
impl TryFrom<NeedleSamplerParts> for NeedleSampler {
    type Error = ConfigError;

    fn try_from(parts: NeedleSamplerParts) -> Result<Self, Self::Error> {
        NeedleSampler::new(parts.length, parts.field)
    }
}

impl From<&NeedleSampler> for String {
    fn from(sampler: &NeedleSampler) -> String {
        let (x_min, x_max, y_min, y_max) = sampler.field.bounds();
        format!(
            "NeedleSampler(L: {}, field: [{}, {}) × [{}, {}))",
            sampler.length, x_min, x_max, y_min, y_max
        )
    }
}

impl_display!(NeedleSampler);

/// Drop `n` needles of `length` on `field`.
///
/// Each needle is independent: origin uniform in the field, heading uniform
/// in `[0, 2π)`. Asking for zero needles yields an empty `Vec`.
///
/// # Example
///
/// ```
/// use buffon::sampler::sample_batch;
/// use buffon::geom::Field;
/// use rand::SeedableRng;
/// use rand_xoshiro::Xoshiro256Plus;
///
/// let mut rng = Xoshiro256Plus::seed_from_u64(7);
/// let field = Field::new(-1.0, 1.0, -1.0, 1.0).unwrap();
///
/// let needles = sample_batch(16, 0.5, &field, &mut rng).unwrap();
/// assert_eq!(needles.len(), 16);
///
/// assert!(sample_batch(0, 0.5, &field, &mut rng).unwrap().is_empty());
/// assert!(sample_batch(16, -0.5, &field, &mut rng).is_err());
/// ```
pub fn sample_batch<R: Rng>(
    n: usize,
    length: f64,
    field: &Field,
    rng: &mut R,
) -> Result<Vec<Needle>, ConfigError> {
    NeedleSampler::new(length, *field).map(|sampler| sampler.sample(n, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_basic_impls;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    const TOL: f64 = 1E-10;

    test_basic_impls!(NeedleSampler::new(1.0, Field::default()).unwrap());

    #[test]
    fn new_rejects_bad_length() {
        assert!(matches!(
            NeedleSampler::new(0.0, Field::default()),
            Err(ConfigError::LengthTooLow { .. })
        ));
        assert!(matches!(
            NeedleSampler::new(f64::NAN, Field::default()),
            Err(ConfigError::LengthNotFinite { .. })
        ));
    }

    #[cfg(feature = "serde1")]
    #[test]
    fn deserialize_checks_length_and_field() {
        let sampler = NeedleSampler::new(2.5, Field::default()).unwrap();
        let json = serde_json::to_string(&sampler).unwrap();
        let back: NeedleSampler = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sampler);

        let negative = r#"{"length":-1.0,"field":{"x_min":0.0,"x_max":1.0,"y_min":0.0,"y_max":1.0}}"#;
        assert!(serde_json::from_str::<NeedleSampler>(negative).is_err());

        let empty_field = r#"{"length":1.0,"field":{"x_min":1.0,"x_max":1.0,"y_min":0.0,"y_max":1.0}}"#;
        assert!(serde_json::from_str::<NeedleSampler>(empty_field).is_err());
    }

    #[test]
    fn zero_needles_is_empty() {
        let mut rng = Xoshiro256Plus::seed_from_u64(1);
        let sampler = NeedleSampler::new(1.0, Field::default()).unwrap();
        assert!(sampler.sample(0, &mut rng).is_empty());
    }

    #[test]
    fn origins_stay_in_field_and_lengths_are_fixed() {
        let mut rng = Xoshiro256Plus::seed_from_u64(2);
        let field = Field::new(-3.0, -1.0, 5.0, 9.0).unwrap();
        let sampler = NeedleSampler::new(2.5, field).unwrap();
        let needles = sampler.sample(5_000, &mut rng);

        assert!(needles.iter().all(|n| field.contains(&n.start())));
        needles
            .iter()
            .for_each(|n| assert::close(n.length(), 2.5, TOL));
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let sampler = NeedleSampler::new(1.0, Field::default()).unwrap();
        let xs = sampler.sample(100, &mut Xoshiro256Plus::seed_from_u64(42));
        let ys = sampler.sample(100, &mut Xoshiro256Plus::seed_from_u64(42));
        let zs = sampler.sample(100, &mut Xoshiro256Plus::seed_from_u64(43));
        assert_eq!(xs, ys);
        assert_ne!(xs, zs);
    }

    #[test]
    fn sample_into_appends_without_clobbering() {
        let mut rng = Xoshiro256Plus::seed_from_u64(3);
        let sampler = NeedleSampler::new(1.0, Field::default()).unwrap();
        let mut buf = sampler.sample(10, &mut rng);
        let head = buf.clone();

        sampler.sample_into(15, &mut rng, &mut buf);

        assert_eq!(buf.len(), 25);
        assert_eq!(&buf[..10], head.as_slice());
    }

    #[test]
    fn draw_and_sample_share_a_stream() {
        let sampler = NeedleSampler::new(1.0, Field::default()).unwrap();

        let mut rng = Xoshiro256Plus::seed_from_u64(11);
        let drawn: Vec<Needle> = (0..20).map(|_| sampler.draw(&mut rng)).collect();

        let mut rng = Xoshiro256Plus::seed_from_u64(11);
        let sampled = sampler.sample(20, &mut rng);

        assert_eq!(drawn, sampled);
    }

    #[test]
    fn headings_cover_the_circle() {
        let mut rng = Xoshiro256Plus::seed_from_u64(5);
        let sampler = NeedleSampler::new(1.0, Field::default()).unwrap();
        let n = 20_000;
        let mut quadrants = [0_usize; 4];
        sampler.sample_stream(&mut rng).take(n).for_each(|needle| {
            let dx = needle.end().x - needle.start().x;
            let dy = needle.end().y - needle.start().y;
            let ix = match (dx >= 0.0, dy >= 0.0) {
                (true, true) => 0,
                (false, true) => 1,
                (false, false) => 2,
                (true, false) => 3,
            };
            quadrants[ix] += 1;
        });

        // each quadrant should hold about a quarter of the headings
        for count in quadrants {
            let frac = count as f64 / n as f64;
            assert::close(frac, 0.25, 0.02);
        }
    }

    #[test]
    fn mean_vertical_extent_matches_theory() {
        // E|L sin θ| = 2L/π for θ ~ U[0, 2π)
        let mut rng = Xoshiro256Plus::seed_from_u64(9);
        let sampler = NeedleSampler::new(2.0, Field::default()).unwrap();
        let n = 100_000;
        let mean = sampler
            .sample(n, &mut rng)
            .iter()
            .map(|needle| {
                let (lo, hi) = needle.y_extent();
                hi - lo
            })
            .sum::<f64>()
            / n as f64;
        assert::close(mean, 4.0 / std::f64::consts::PI, 0.01);
    }
}
