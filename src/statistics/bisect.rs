//! Bounded bisection search for the largest feasible importance weight.
//!
//! Given a prediction headroom `fhat`, a variance budget `delta`, and a
//! local sensitivity `sens`, the feasible set is
//!
//! ```text
//! { w in [0, fhat/sens] : w * (fhat^2 - (fhat - sens*w)^2) <= delta }
//! ```
//!
//! The left-hand side is monotone in `w` on that interval, so the maximal
//! feasible weight is either the interval boundary (fast path) or the
//! root of the constraint, which bisection brackets in at most 20 steps.

use crate::constants::BISECT_MAX_ITERATIONS;

/// Return the largest `w in [0, fhat/sens]` with
/// `w * (fhat^2 - (fhat - sens*w)^2) <= delta`, within `tol`.
///
/// On the fast path (the full-range weight already satisfies the
/// constraint) the boundary is returned directly. Otherwise the search
/// runs at most `BISECT_MAX_ITERATIONS` bisection steps and returns the
/// lower bracket, so the returned weight never violates the constraint by
/// more than `tol`. Always terminates; there is no failure mode.
pub fn largest_feasible_weight(fhat: f32, delta: f32, sens: f32, tol: f32) -> f32 {
    let maxw = (fhat / sens).min(f32::MAX);

    // At w = fhat/sens the squared term vanishes and the constraint
    // reduces to maxw * fhat^2.
    if maxw * fhat * fhat <= delta {
        return maxw;
    }

    let mut lower = 0.0f32;
    let mut upper = maxw;

    for _ in 0..BISECT_MAX_ITERATIONS {
        let w = (upper + lower) / 2.0;
        let v = w * (fhat * fhat - (fhat - sens * w) * (fhat - sens * w)) - delta;
        if v > 0.0 {
            upper = w;
        } else {
            lower = w;
        }
        if v.abs() <= tol || upper - lower <= tol {
            break;
        }
    }

    lower
}
