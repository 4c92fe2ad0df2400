//! Buffon needle estimation of π.
//!
//! Needles of length `L` are dropped on a field ruled with parallel lines
//! `D` apart. The probability that a needle crosses a line is `2L/(πD)`, so
//! the observed crossing ratio can be inverted into an estimate of π.
//!
//! # Example
//!
//! ```
//! use buffon::prelude::*;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256Plus;
//!
//! let config = SimConfig::new(1.0, 1.0, 1_000, 20_000, Field::default()).unwrap();
//! let mut rng = Xoshiro256Plus::seed_from_u64(1337);
//!
//! let snapshot = Simulation::new(config, &mut rng).unwrap().run();
//!
//! assert_eq!(snapshot.total_needles(), 20_000);
//! assert!((snapshot.ratio().unwrap() - snapshot.theoretical_ratio()).abs() < 0.02);
//! ```
pub mod batch;
pub mod classify;
pub mod consts;
pub mod estimator;
pub mod geom;
pub mod parallel;
pub mod prelude;
mod result;
pub mod sampler;
pub mod simulation;
pub mod traits;


pub use result::{ConfigError, ErrorKind};

/// Implements `Display` through the type's `From<&T> for String` impl
#[macro_export]
macro_rules! impl_display {
    ($kind: ty) => {
        impl ::std::fmt::Display for $kind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", String::from(self))
            }
        }
    };
}
