//! Trait definitions
use rand::Rng;

/// A type from which values of type `X` can be drawn
pub trait Sampleable<X> {
    /// Single draw from the `Sampleable`
    fn draw<R: Rng>(&self, rng: &mut R) -> X;

    /// Multiple draws of the `Sampleable`
    fn sample<R: Rng>(&self, n: usize, mut rng: &mut R) -> Vec<X> {
        (0..n).map(|_| self.draw(&mut rng)).collect()
    }

    /// Append `n` draws to `buf`, reusing its allocation
    fn sample_into<R: Rng>(&self, n: usize, rng: &mut R, buf: &mut Vec<X>) {
        buf.reserve(n);
        (0..n).for_each(|_| buf.push(self.draw(rng)));
    }

    /// Create a never-ending iterator of samples
    fn sample_stream<'r, R: Rng>(
        &'r self,
        mut rng: &'r mut R,
    ) -> Box<dyn Iterator<Item = X> + 'r> {
        Box::new(std::iter::repeat_with(move || self.draw(&mut rng)))
    }
}

/// Receives every simulated batch along with the running estimate.
///
/// Drawing, plotting, or printing lives behind this trait so the simulation
/// never depends on a presentation library.
pub trait Renderer {
    fn render(
        &mut self,
        batch: &crate::batch::BatchResult,
        snapshot: &crate::estimator::Snapshot,
    );
}
