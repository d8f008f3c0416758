// src/models/rates.rs
use super::model::RateProvider;

/// Constant short rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatRate {
    pub r: f64,
}

impl FlatRate {
    pub fn new(r: f64) -> Self {
        FlatRate { r }
    }
}

impl RateProvider for FlatRate {
    fn rate(&self, _s: f64, _t: f64) -> f64 {
        self.r
    }
}
