// src/math_utils.rs
use statrs::function::erf;
use std::f64::consts::{PI, SQRT_2};
use std::time::Instant;

pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erf::erfc(-x / SQRT_2)
}

pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Linear interpolation between `lo` and `hi` with weight `w` on `hi`
#[inline]
pub fn lerp(lo: f64, hi: f64, w: f64) -> f64 {
    lo + w * (hi - lo)
}

pub struct Timer {
    start_time: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}
