//! Dab density estimation
//!
//! Decides how many dabs separate the confirmed brush state from a target.
//! Only base setting values are used so that a dab's own modulation cannot
//! feed back into the spacing of the segment it belongs to.

use crate::constants::{MAX_ACTUAL_RADIUS, MIN_ACTUAL_RADIUS};
use crate::settings::{BrushSettings, SettingId};

/// Clamp the cached actual radius, seeding it from the base radius when no
/// dab has been drawn yet or the cached value is not finite.
pub fn effective_actual_radius(actual_radius: f32, settings: &BrushSettings) -> f32 {
    let radius = if actual_radius == 0.0 || !actual_radius.is_finite() {
        settings.base(SettingId::RadiusLogarithmic).exp()
    } else {
        actual_radius
    };
    radius.clamp(MIN_ACTUAL_RADIUS, MAX_ACTUAL_RADIUS)
}

/// Fractional number of dabs needed to cover `distance` travelled over `elapsed` time
///
/// `actual_radius` must already be clamped (see [`effective_actual_radius`]).
pub fn count_dabs(settings: &BrushSettings, actual_radius: f32, distance: f32, elapsed: f32) -> f32 {
    let basic_radius = settings.base(SettingId::RadiusLogarithmic).exp();

    let by_actual = distance / actual_radius * settings.base(SettingId::DabsPerActualRadius);
    let by_basic = distance / basic_radius * settings.base(SettingId::DabsPerBasicRadius);
    let by_time = elapsed * settings.base(SettingId::DabsPerSecond);

    by_actual + by_basic + by_time
}
