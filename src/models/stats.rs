// Standard normal helpers used by the Black-Scholes formulas.

/// 1 / sqrt(2π)
const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal cumulative distribution function.
///
/// Evaluated as `0.5 * (1 + erf(x / sqrt(2)))` with `libm::erf`, which is odd to
/// the last bit, so `norm_cdf(x) + norm_cdf(-x) == 1` up to rounding and
/// `norm_cdf(0) == 0.5` exactly. Saturates to 0 / 1 in the far tails and for
/// ±infinity.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
}

/// Standard normal probability density function.
pub fn norm_pdf(x: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}
