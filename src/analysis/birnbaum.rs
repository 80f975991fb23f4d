//! The Birnbaum item-response function.

/// Fixed discrimination scale (logistic approximation of the normal ogive).
pub const DISCRIMINATION_SCALE: f64 = 1.71;

/// Numerically stable `exp(x) / (1 + exp(x))`.
#[inline]
pub fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let exp_x = x.exp();
        exp_x / (1.0 + exp_x)
    }
}

/// Probability of a correct answer at ability `theta` for an item with
/// guessing probability `c` and difficulty `delta`.
///
/// No parameter checks happen here; [`ItemParameters`](super::ItemParameters)
/// validates them once up front.
#[inline]
pub fn predict(c: f64, delta: f64, theta: f64) -> f64 {
    c + (1.0 - c) * logistic(DISCRIMINATION_SCALE * (theta - delta))
}

/// Same curve with the discrimination direction flipped: higher ability,
/// lower success.
#[inline]
pub fn predict_reversed(c: f64, delta: f64, theta: f64) -> f64 {
    c + (1.0 - c) * logistic(-DISCRIMINATION_SCALE * (theta - delta))
}
