/// Upper bound of the random spin-up length, in recursion steps.
/// Every reset runs the noise recursion a number of times uniformly
/// drawn in `1..=MAX_SPIN_UP_ITERATIONS`.
pub const MAX_SPIN_UP_ITERATIONS: usize = 1000;

/// Default polynomial degree used by [OrbitTable](crate::prelude::OrbitTable)
/// (10-point window, standard for 15' precise orbit products).
pub const DEFAULT_INTERPOLATION_ORDER: usize = 9;

/// Sentinel time origin, in seconds: a time origin will be drawn
/// randomly within the orbit source valid interval, at each reset.
pub const RANDOM_TIME_ORIGIN_S: f64 = 0.0;
