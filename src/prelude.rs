//! Re-imports for convenience
#[doc(no_inline)]
pub use crate::batch::BatchResult;
#[doc(no_inline)]
pub use crate::classify::{classify_batch, LineFamily};
#[doc(no_inline)]
pub use crate::estimator::{AccumulatorState, Estimator, PiEstimate, Snapshot};
#[doc(no_inline)]
pub use crate::geom::{Field, Needle, Point};
#[doc(no_inline)]
pub use crate::result::{ConfigError, ErrorKind};
#[doc(no_inline)]
pub use crate::sampler::{sample_batch, NeedleSampler};
#[doc(no_inline)]
pub use crate::simulation::{SimConfig, Simulation, Step};
#[doc(no_inline)]
pub use crate::traits::*;
