//! Data-parallel sampling and classification
//!
//! Needles are independent, so a batch can be split across threads and the
//! crossing counts summed afterwards. Random streams are split up front with
//! xoshiro jumps rather than handed out per thread, which keeps results
//! independent of how rayon schedules the work.
use crate::classify::LineFamily;
use crate::geom::Needle;
use crate::result::ConfigError;
use crate::sampler::NeedleSampler;
use crate::traits::Sampleable;
use log::trace;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use rayon::prelude::*;

/// Tag every needle with whether it crosses a line, in parallel
pub fn classify(needles: &[Needle], lines: &LineFamily) -> Vec<bool> {
    needles.par_iter().map(|n| lines.needle_crosses(n)).collect()
}

/// Number of needles that cross at least one line, in parallel
pub fn count_crossings(needles: &[Needle], lines: &LineFamily) -> usize {
    needles.par_iter().filter(|n| lines.needle_crosses(n)).count()
}

/// One independent random stream per chunk, each `2^128` draws past the
/// previous one.
fn streams(seed: u64, n_chunks: usize) -> Vec<Xoshiro256Plus> {
    let mut rng = Xoshiro256Plus::seed_from_u64(seed);
    (0..n_chunks)
        .map(|_| {
            let stream = rng.clone();
            rng.jump();
            stream
        })
        .collect()
}

/// Drop `n` needles in chunks of `chunk_size` across the rayon pool and
/// return `(needles, crossings)`.
///
/// The result depends only on `seed` and `chunk_size`, not on the number
/// of threads.
///
/// # Example
///
/// ```
/// use buffon::prelude::*;
/// use buffon::parallel::drop_needles;
///
/// let sampler = NeedleSampler::new(1.0, Field::default()).unwrap();
/// let lines = LineFamily::new(1.0).unwrap();
///
/// let (n, k) = drop_needles(&sampler, &lines, 100_000, 1337, 10_000).unwrap();
///
/// let mut est = Estimator::new(1.0, 1.0).unwrap();
/// let snapshot = est.observe(n, k).unwrap();
///
/// assert_eq!(n, 100_000);
/// assert!((snapshot.pi().value().unwrap() - std::f64::consts::PI).abs() < 0.05);
/// ```
pub fn drop_needles(
    sampler: &NeedleSampler,
    lines: &LineFamily,
    n: usize,
    seed: u64,
    chunk_size: usize,
) -> Result<(usize, usize), ConfigError> {
    if chunk_size == 0 {
        return Err(ConfigError::BatchSizeZero);
    }
    let n_chunks = (n + chunk_size - 1) / chunk_size;

    let counts = streams(seed, n_chunks)
        .into_par_iter()
        .enumerate()
        .map(|(ix, mut rng)| {
            let size = chunk_size.min(n - ix * chunk_size);
            let needles = sampler.sample(size, &mut rng);
            let hits = lines.count_crossings(&needles);
            trace!("chunk {}: {} of {} needles crossing", ix, hits, size);
            (size, hits)
        })
        .reduce(|| (0, 0), |(n1, k1), (n2, k2)| (n1 + n2, k1 + k2));

    Ok(counts)
}
