//! Closed-form Black–Scholes values used as the reference for the grid pricer
//!
//! # Model
//!
//! Under risk-neutral geometric Brownian motion
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//! a European claim on `S_T` has the present value
//! ```text
//! V(S, T) = e^(-rT) * E^Q[payoff(S_T)]
//! ```
//! which for vanilla calls and puts reduces to the formulas below. The grid
//! pricer solves the same problem on a mesh; these functions are what it
//! converges to as `dx, dt → 0`.
//!
//! `t` is always time to expiry. [`bs_call_theta`] is the calendar-time theta
//! (`∂V/∂t`), which is the negative of the maturity sensitivity estimated by
//! [`crate::fdm::greeks`].

use crate::math_utils::{norm_cdf, norm_pdf};

/// `(d₁, d₂)` for spot `s`, strike `k`, rate `r`, vol `sigma`, expiry `t`
///
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
fn d1_d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> (f64, f64) {
    let vol_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Black–Scholes European call price: `S Φ(d₁) - K e^(-rT) Φ(d₂)`
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    s * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Black–Scholes European put price: `K e^(-rT) Φ(-d₂) - S Φ(-d₁)`
pub fn bs_put_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    k * (-r * t).exp() * norm_cdf(-d2) - s * norm_cdf(-d1)
}

/// Undiscounted Black call on a forward `f`
///
/// This is the value of `E[max(F e^(σW_T - σ²T/2) - K, 0)]`, i.e. the call
/// price with zero rate written on the forward.
pub fn black_call_price(f: f64, k: f64, sigma: f64, t: f64) -> f64 {
    bs_call_price(f, k, 0.0, sigma, t)
}

/// Call delta `∂C/∂S = Φ(d₁)`
pub fn bs_call_delta(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, sigma, t);
    norm_cdf(d1)
}

/// Put delta `∂P/∂S = Φ(d₁) - 1`
pub fn bs_put_delta(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    bs_call_delta(s, k, r, sigma, t) - 1.0
}

/// Gamma `φ(d₁) / (S σ √T)`, shared by calls and puts
pub fn bs_gamma(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, sigma, t);
    norm_pdf(d1) / (s * sigma * t.sqrt())
}

/// Vega `S φ(d₁) √T`, shared by calls and puts
pub fn bs_vega(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, sigma, t);
    s * norm_pdf(d1) * t.sqrt()
}

/// Calendar-time call theta `-S φ(d₁) σ / (2√T) - r K e^(-rT) Φ(d₂)`
pub fn bs_call_theta(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    -s * norm_pdf(d1) * sigma / (2.0 * t.sqrt()) - r * k * (-r * t).exp() * norm_cdf(d2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const S: f64 = 100.0;
    const K: f64 = 100.0;
    const R: f64 = 0.05;
    const SIGMA: f64 = 0.2;
    const T: f64 = 1.0;

    #[test]
    fn test_reference_values() {
        assert_relative_eq!(bs_call_price(S, K, R, SIGMA, T), 10.450_583_572_185_565, epsilon = 1e-9);
        assert_relative_eq!(bs_gamma(S, K, R, SIGMA, T), 0.018_762_017_345_847, epsilon = 1e-12);
        assert_relative_eq!(bs_vega(S, K, R, SIGMA, T), 37.524_034_691_693_79, epsilon = 1e-9);
        assert_relative_eq!(bs_call_theta(S, K, R, SIGMA, T), -6.414_027_546_438_197, epsilon = 1e-9);
    }

    #[test]
    fn test_put_call_parity() {
        for &k in &[80.0, 100.0, 125.0] {
            let parity = bs_call_price(S, k, R, SIGMA, T) - bs_put_price(S, k, R, SIGMA, T);
            assert_relative_eq!(parity, S - k * (-R * T).exp(), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_black_matches_zero_rate_call() {
        let f = S * (0.5 * SIGMA * SIGMA * T).exp();
        assert_relative_eq!(black_call_price(f, K, SIGMA, T), bs_call_price(f, K, 0.0, SIGMA, T));
        assert!(black_call_price(f, K, SIGMA, T) > black_call_price(S, K, SIGMA, T));
    }

    #[test]
    fn test_put_delta_offset() {
        let call = bs_call_delta(S, K, R, SIGMA, T);
        assert_relative_eq!(bs_put_delta(S, K, R, SIGMA, T), call - 1.0);
    }
}
