//! Running crossing counts and the estimate of π they imply
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::batch::BatchResult;
use crate::consts::MIN_STABLE_RATIO;
use crate::impl_display;
use crate::result::{check_length, check_spacing, ConfigError};
use std::f64::consts::PI;
use std::fmt;

/// Whether an [`Estimator`] has seen any needles yet
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum AccumulatorState {
    /// No needles dropped, π cannot be estimated
    Empty,
    /// At least one needle dropped
    Accumulating,
}

/// An estimate of π, or the reason there is none.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum PiEstimate {
    /// The crossing ratio is too small (or undefined) to invert safely
    Unstable,
    /// `2L / (p D)`
    Estimate(f64),
}

impl PiEstimate {
    /// The estimate, if there is one
    #[inline]
    pub fn value(&self) -> Option<f64> {
        match self {
            PiEstimate::Estimate(pi) => Some(*pi),
            PiEstimate::Unstable => None,
        }
    }

    #[inline]
    pub fn is_stable(&self) -> bool {
        matches!(self, PiEstimate::Estimate(_))
    }
}

impl fmt::Display for PiEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PiEstimate::Estimate(pi) => write!(f, "{:.5}", pi),
            PiEstimate::Unstable => write!(f, "N/A"),
        }
    }
}

/// The estimator's state at one point in the run.
///
/// Plain data: everything a progress display or a plot needs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Snapshot {
    total_needles: usize,
    total_intersections: usize,
    ratio: Option<f64>,
    pi: PiEstimate,
    theoretical_ratio: f64,
}

impl Snapshot {
    /// Needles dropped so far
    #[inline]
    pub fn total_needles(&self) -> usize {
        self.total_needles
    }

    /// Needles that crossed a line so far
    #[inline]
    pub fn total_intersections(&self) -> usize {
        self.total_intersections
    }

    /// The observed crossing ratio, p̂. `None` before the first needle.
    #[inline]
    pub fn ratio(&self) -> Option<f64> {
        self.ratio
    }

    #[inline]
    pub fn pi(&self) -> PiEstimate {
        self.pi
    }

    /// The limit of p̂, `2L / (π D)`
    #[inline]
    pub fn theoretical_ratio(&self) -> f64 {
        self.theoretical_ratio
    }

    /// p̂ as a percentage
    pub fn percentage(&self) -> Option<f64> {
        self.ratio.map(|p| 100.0 * p)
    }

    /// Standard error of p̂, `sqrt(p̂ (1 - p̂) / n)`
    pub fn std_error(&self) -> Option<f64> {
        self.ratio
            .map(|p| (p * (1.0 - p) / self.total_needles as f64).sqrt())
    }

    /// Distance between the estimate and π
    pub fn abs_error(&self) -> Option<f64> {
        self.pi.value().map(|pi| (pi - PI).abs())
    }
}

impl From<&Snapshot> for String {
    fn from(snapshot: &Snapshot) -> String {
        let ratio = snapshot
            .ratio
            .map_or_else(|| String::from("N/A"), |p| format!("{:.4}", p));
        format!(
            "needles: {} | crossings: {} | p = {} | π ≈ {}",
            snapshot.total_needles, snapshot.total_intersections, ratio, snapshot.pi
        )
    }
}

impl_display!(Snapshot);

/// Accumulates crossing counts across batches and inverts the crossing
/// ratio into an estimate of π.
///
/// Counts only ever grow. Submitting the same batch twice counts it twice.
///
/// # Example
///
/// ```
/// use buffon::estimator::{Estimator, PiEstimate};
///
/// let mut est = Estimator::new(1.0, 1.0).unwrap();
/// assert_eq!(est.snapshot().pi(), PiEstimate::Unstable);
///
/// let snapshot = est.observe(10_000, 6_366).unwrap();
/// let pi = snapshot.pi().value().unwrap();
///
/// assert!((pi - std::f64::consts::PI).abs() < 1E-3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde1", serde(try_from = "EstimatorParts"))]
pub struct Estimator {
    length: f64,
    spacing: f64,
    theoretical_ratio: f64,
    needles: usize,
    intersections: usize,
}

impl Estimator {
    /// Create an empty estimator for needles of `length` on lines `spacing`
    /// apart
    pub fn new(length: f64, spacing: f64) -> Result<Self, ConfigError> {
        let length = check_length(length)?;
        let spacing = check_spacing(spacing)?;
        Ok(Estimator {
            length,
            spacing,
            theoretical_ratio: 2.0 * length / (PI * spacing),
            needles: 0,
            intersections: 0,
        })
    }

    /// Get the needle length, L
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Get the line spacing, D
    #[inline]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// `2L / (π D)`
    #[inline]
    pub fn theoretical_ratio(&self) -> f64 {
        self.theoretical_ratio
    }

    #[inline]
    pub fn total_needles(&self) -> usize {
        self.needles
    }

    #[inline]
    pub fn total_intersections(&self) -> usize {
        self.intersections
    }

    pub fn state(&self) -> AccumulatorState {
        if self.needles == 0 {
            AccumulatorState::Empty
        } else {
            AccumulatorState::Accumulating
        }
    }

    /// Fold a classified batch into the totals
    ///
    /// # Panics
    ///
    /// If the needle count would pass `usize::MAX`. Use
    /// [`observe`](Estimator::observe) to get an error instead.
    pub fn update(&mut self, batch: &BatchResult) -> Snapshot {
        if let Err(err) = self.add(batch.len(), batch.hits()) {
            panic!("{}", err);
        }
        self.snapshot()
    }

    /// Fold raw counts into the totals, e.g. partial sums computed
    /// elsewhere.
    ///
    /// Leaves the totals untouched and errors if `hits > needles` or if the
    /// needle count would pass `usize::MAX`.
    pub fn observe(
        &mut self,
        needles: usize,
        hits: usize,
    ) -> Result<Snapshot, ConfigError> {
        if hits > needles {
            Err(ConfigError::HitsExceedNeedles { needles, hits })
        } else {
            self.add(needles, hits).map(|_| self.snapshot())
        }
    }

    /// Add the totals of `other`, which must describe the same needles and
    /// lines. The combined needle count must fit in a `usize`.
    pub fn merge(&mut self, other: &Estimator) -> Result<(), ConfigError> {
        if self.length != other.length || self.spacing != other.spacing {
            Err(ConfigError::MismatchedGeometry {
                length: (self.length, other.length),
                spacing: (self.spacing, other.spacing),
            })
        } else {
            self.add(other.needles, other.intersections)
        }
    }

    /// Forget every observed needle
    pub fn reset(&mut self) {
        self.needles = 0;
        self.intersections = 0;
    }

    /// Current totals and the estimates derived from them
    pub fn snapshot(&self) -> Snapshot {
        let ratio = if self.needles == 0 {
            None
        } else {
            Some(self.intersections as f64 / self.needles as f64)
        };
        let pi = match ratio {
            Some(p) if p > MIN_STABLE_RATIO => {
                PiEstimate::Estimate(2.0 * self.length / (p * self.spacing))
            }
            _ => PiEstimate::Unstable,
        };
        Snapshot {
            total_needles: self.needles,
            total_intersections: self.intersections,
            ratio,
            pi,
            theoretical_ratio: self.theoretical_ratio,
        }
    }

    #[inline]
    fn add(&mut self, needles: usize, hits: usize) -> Result<(), ConfigError> {
        debug_assert!(hits <= needles);
        match (
            self.needles.checked_add(needles),
            self.intersections.checked_add(hits),
        ) {
            (Some(n), Some(k)) => {
                self.needles = n;
                self.intersections = k;
                Ok(())
            }
            _ => Err(ConfigError::CountOverflow {
                total: self.needles,
                added: needles,
            }),
        }
    }
}

/// Stored totals, checked by [`Estimator::new`] and
/// [`Estimator::observe`] on the way in
#[cfg(feature = "serde1")]
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
struct EstimatorParts {
    length: f64,
    spacing: f64,
    needles: usize,
    intersections: usize,
}

#[cfg(feature = "serde1")]
impl TryFrom<EstimatorParts> for Estimator {
    type Error = ConfigError;

    fn try_from(parts: EstimatorParts) -> Result<Self, Self::Error> {
        let mut est = Estimator::new(parts.length, parts.spacing)?;
        est.observe(parts.needles, parts.intersections)?;
        Ok(est)
    }
}

impl From<&Estimator> for String {
    fn from(est: &Estimator) -> String {
        format!(
            "Estimator(L: {}, D: {}, n: {}, k: {})",
            est.length, est.spacing, est.needles, est.intersections
        )
    }
}

impl_display!(Estimator);
