//! Default parameters and numeric limits used throughout the crate.

/// Default deterministic seed for query-decision randomness.
///
/// Same seed + same example stream = same query decisions.
/// The value `0x71756165726F` is "quaero" encoded in ASCII.
pub const DEFAULT_SEED: u64 = 0x71756165726F;

/// Default mellowness `c0` for the binary variant.
pub const DEFAULT_BINARY_MELLOWNESS: f32 = 8.0;

/// Default mellowness `c0` for the cost-sensitive variant (loss threshold).
pub const DEFAULT_COST_MELLOWNESS: f32 = 0.1;

/// Default multiplier `c1` on the per-class cost-range width threshold.
pub const DEFAULT_RANGE_MULTIPLIER: f32 = 0.5;

/// Default lower bound of the declared cost range.
pub const DEFAULT_COST_MIN: f32 = 0.0;

/// Default upper bound of the declared cost range.
pub const DEFAULT_COST_MAX: f32 = 1.0;

/// Label budget value meaning "unbounded".
pub const UNBOUNDED_LABELS: u64 = u64::MAX;

/// Iteration cap for the bisection root finder.
pub const BISECT_MAX_ITERATIONS: usize = 20;

/// Tolerance handed to the bisection search when constructing cost ranges.
pub const RANGE_TOLERANCE: f32 = 1e-6;
