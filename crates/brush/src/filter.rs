//! Exponential-decay smoothing filters

use crate::constants::MIN_TIME_CONSTANT;

/// Fraction of the gap between a raw value and its filtered value that is
/// closed after `elapsed` time with the given time constant.
///
/// Time constants at or below [`MIN_TIME_CONSTANT`] disable smoothing and
/// always return `1.0`.
#[inline]
pub fn decay_factor(time_constant: f32, elapsed: f32) -> f32 {
    if time_constant <= MIN_TIME_CONSTANT {
        1.0
    } else {
        1.0 - (-elapsed / time_constant).exp()
    }
}

/// A low-pass filtered scalar
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlowValue {
    value: f32,
}

impl SlowValue {
    pub fn new(value: f32) -> Self {
        Self { value }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.value
    }

    /// Snap to `value` without smoothing
    #[inline]
    pub fn snap(&mut self, value: f32) {
        self.value = value;
    }

    /// Blend `raw` into the filtered value by `factor` (see [`decay_factor`])
    #[inline]
    pub fn update(&mut self, raw: f32, factor: f32) -> f32 {
        self.value += (raw - self.value) * factor;
        self.value
    }
}
