//! One simulation step's worth of classified needles
use crate::classify::LineFamily;
use crate::geom::Needle;

/// Needles paired with whether each one crosses a line.
///
/// # Example
///
/// ```
/// use buffon::prelude::*;
///
/// let lines = LineFamily::new(1.0).unwrap();
/// let batch = BatchResult::classify(
///     vec![
///         Needle::new((0.0, 0.0).into(), (0.0, 1.0).into()),
///         Needle::new((0.0, 0.2).into(), (0.0, 0.3).into()),
///     ],
///     &lines,
/// );
///
/// assert_eq!(batch.len(), 2);
/// assert_eq!(batch.hits(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchResult {
    needles: Vec<Needle>,
    crossings: Vec<bool>,
}

impl BatchResult {
    /// Pair `needles` with their crossing tags.
    ///
    /// # Panics
    ///
    /// If `needles` and `crossings` have different lengths
    pub fn new(needles: Vec<Needle>, crossings: Vec<bool>) -> Self {
        assert_eq!(
            needles.len(),
            crossings.len(),
            "every needle needs exactly one crossing tag"
        );
        BatchResult { needles, crossings }
    }

    /// Classify `needles` against `lines`
    pub fn classify(needles: Vec<Needle>, lines: &LineFamily) -> Self {
        let crossings = lines.classify(&needles);
        BatchResult { needles, crossings }
    }

    /// Number of needles in the batch
    #[inline]
    pub fn len(&self) -> usize {
        self.needles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }

    /// Number of needles that cross a line
    pub fn hits(&self) -> usize {
        self.crossings.iter().filter(|&&x| x).count()
    }

    #[inline]
    pub fn needles(&self) -> &[Needle] {
        &self.needles
    }

    #[inline]
    pub fn crossings(&self) -> &[bool] {
        &self.crossings
    }

    /// Iterate over `(needle, crosses)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&Needle, bool)> + '_ {
        self.needles.iter().zip(self.crossings.iter().copied())
    }

    /// Split the batch into the segments that cross a line and those that
    /// do not, e.g. for drawing them in different colors.
    pub fn split(&self) -> (Vec<[(f64, f64); 2]>, Vec<[(f64, f64); 2]>) {
        let hits = self.hits();
        let mut crossing = Vec::with_capacity(hits);
        let mut missing = Vec::with_capacity(self.len() - hits);
        self.iter().for_each(|(needle, crosses)| {
            if crosses {
                crossing.push(needle.segment());
            } else {
                missing.push(needle.segment());
            }
        });
        (crossing, missing)
    }

    /// Give back the owned needles and tags
    pub fn into_parts(self) -> (Vec<Needle>, Vec<bool>) {
        (self.needles, self.crossings)
    }
}
