//! Driving batches of needles until a sample budget is spent
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::batch::BatchResult;
use crate::classify::LineFamily;
use crate::estimator::{Estimator, Snapshot};
use crate::geom::Field;
use crate::result::{check_length, check_spacing, ConfigError};
use crate::sampler::NeedleSampler;
use crate::traits::{Renderer, Sampleable};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

/// Everything needed to run one experiment
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct SimConfig {
    /// Needle length, L
    pub needle_length: f64,
    /// Distance between lines, D
    pub line_spacing: f64,
    /// Needles dropped per step
    pub batch_size: usize,
    /// Total needles to drop
    pub sample_budget: usize,
    /// Where needle origins land
    pub field: Field,
}

impl SimConfig {
    /// Create a validated configuration
    pub fn new(
        needle_length: f64,
        line_spacing: f64,
        batch_size: usize,
        sample_budget: usize,
        field: Field,
    ) -> Result<Self, ConfigError> {
        let config = SimConfig {
            needle_length,
            line_spacing,
            batch_size,
            sample_budget,
            field,
        };
        config.validate().map(|_| config)
    }

    /// Check every parameter, e.g. after deserializing a config
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_length(self.needle_length)?;
        check_spacing(self.line_spacing)?;
        if self.batch_size == 0 {
            return Err(ConfigError::BatchSizeZero);
        }
        let (x_min, x_max, y_min, y_max) = self.field.bounds();
        Field::new(x_min, x_max, y_min, y_max).map(|_| ())
    }

    /// Number of steps needed to spend the budget
    pub fn n_steps(&self) -> usize {
        if self.batch_size == 0 {
            0
        } else {
            (self.sample_budget + self.batch_size - 1) / self.batch_size
        }
    }
}

impl Default for SimConfig {
    /// Unit needles on unit-spaced lines, 2000 needles ten at a time on a
    /// 10-by-10 field
    fn default() -> Self {
        SimConfig {
            needle_length: 1.0,
            line_spacing: 1.0,
            batch_size: 10,
            sample_budget: 2_000,
            field: Field::default(),
        }
    }
}

/// The outcome of one step: the classified needles and the running totals
/// after folding them in.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub batch: BatchResult,
    pub snapshot: Snapshot,
}

/// Drops needles batch by batch, feeding each batch to an [`Estimator`].
///
/// Stopping early, e.g. by dropping the iterator, leaves a valid estimate
/// behind.
///
/// # Example
///
/// ```
/// use buffon::prelude::*;
///
/// let config = SimConfig::new(1.0, 1.0, 10, 25, Field::default()).unwrap();
/// let mut sim = Simulation::seeded(config, 0xABCD).unwrap();
///
/// // the final step only drops what is left of the budget
/// let sizes: Vec<usize> = sim.by_ref().map(|step| step.batch.len()).collect();
/// assert_eq!(sizes, vec![10, 10, 5]);
/// assert!(sim.is_done());
/// ```
#[derive(Debug, Clone)]
pub struct Simulation<R: Rng> {
    config: SimConfig,
    sampler: NeedleSampler,
    lines: LineFamily,
    estimator: Estimator,
    history: Vec<(usize, f64)>,
    rng: R,
}

impl<R: Rng> Simulation<R> {
    /// Validate `config` and set up an empty run drawing from `rng`
    pub fn new(config: SimConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let sampler = NeedleSampler::new(config.needle_length, config.field)?;
        let lines = LineFamily::new(config.line_spacing)?;
        let estimator =
            Estimator::new(config.needle_length, config.line_spacing)?;
        Ok(Simulation {
            history: Vec::with_capacity(config.n_steps()),
            config,
            sampler,
            lines,
            estimator,
            rng,
        })
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn lines(&self) -> &LineFamily {
        &self.lines
    }

    #[inline]
    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    /// `(needles dropped, crossing ratio)` after every step so far
    #[inline]
    pub fn history(&self) -> &[(usize, f64)] {
        &self.history
    }

    /// Needles left in the budget
    pub fn remaining(&self) -> usize {
        self.config
            .sample_budget
            .saturating_sub(self.estimator.total_needles())
    }

    pub fn is_done(&self) -> bool {
        self.remaining() == 0
    }

    /// Drop, classify, and count the next batch. `None` once the budget is
    /// spent.
    pub fn step(&mut self) -> Option<Step> {
        let n = self.config.batch_size.min(self.remaining());
        if n == 0 {
            return None;
        }

        let needles = self.sampler.sample(n, &mut self.rng);
        let batch = BatchResult::classify(needles, &self.lines);
        let snapshot = self.estimator.update(&batch);

        if let Some(ratio) = snapshot.ratio() {
            self.history.push((snapshot.total_needles(), ratio));
        }

        debug!(
            "dropped {} needles ({} crossing), {}",
            n,
            batch.hits(),
            snapshot
        );

        Some(Step { batch, snapshot })
    }

    /// Step until the budget is spent and return the final totals
    pub fn run(&mut self) -> Snapshot {
        while self.step().is_some() {}
        self.finish()
    }

    /// Step until the budget is spent, handing every step to `renderer`
    pub fn run_with<T: Renderer>(&mut self, renderer: &mut T) -> Snapshot {
        while let Some(step) = self.step() {
            renderer.render(&step.batch, &step.snapshot);
        }
        self.finish()
    }

    /// Clear the totals and history so the budget can be spent again. The
    /// random stream carries on from where it was.
    pub fn reset(&mut self) {
        self.estimator.reset();
        self.history.clear();
    }

    fn finish(&self) -> Snapshot {
        let snapshot = self.estimator.snapshot();
        info!(
            "finished {} needles: p = {:?} (theory {}), π ≈ {}",
            snapshot.total_needles(),
            snapshot.ratio(),
            snapshot.theoretical_ratio(),
            snapshot.pi()
        );
        snapshot
    }
}

impl Simulation<Xoshiro256Plus> {
    /// A reproducible run seeded with `seed`
    pub fn seeded(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Simulation::new(config, Xoshiro256Plus::seed_from_u64(seed))
    }
}

impl<R: Rng> Iterator for Simulation<R> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.step()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        let n = (remaining + self.config.batch_size - 1) / self.config.batch_size;
        (n, Some(n))
    }
}
