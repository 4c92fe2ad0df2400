//! Mathematical and numerical constants

/// 2π, the width of the angle interval needles are drawn from
pub const TWO_PI: f64 = std::f64::consts::TAU;

/// The smallest crossing ratio that is inverted into an estimate of π.
///
/// `2L / (p D)` blows up as `p` approaches zero; at or below this ratio the
/// estimate is reported as unstable instead.
pub const MIN_STABLE_RATIO: f64 = 0.01;
