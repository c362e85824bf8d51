//! Per-dab parameter resolution
//!
//! Turns the confirmed brush state and the evaluated settings into one
//! [`Dab`], updating the per-dab filters (painted position, velocity, the two
//! speed bands) and the persistent brush color along the way.

use brush_config::EngineConfig;
use rand::Rng;
use tracing::trace;

use crate::color::Hsv;
use crate::constants::{
    COLOR_PRESSURE_UNITS, COLOR_RANDOM_UNITS, MAX_DAB_RADIUS, OFFSET_BY_SPEED_SCALE,
    OFFSET_SPEED_SLOWNESS_SCALE, RADIUS_BY_SPEED_SCALE, RADIUS_SPEED_SLOWNESS_SCALE,
};
use crate::filter::decay_factor;
use crate::noise::gauss_noise;
use crate::settings::{BrushSettings, Inputs, ResolvedSettings, SettingId};
use crate::state::BrushState;
use crate::surface::Surface;
use crate::types::Dab;

const HSV_DYNAMICS: [SettingId; 6] = [
    SettingId::ColorHueByRandom,
    SettingId::ColorHueByPressure,
    SettingId::ColorSaturationByRandom,
    SettingId::ColorSaturationByPressure,
    SettingId::ColorValueByRandom,
    SettingId::ColorValueByPressure,
];

/// Resolve one dab for the confirmed state, paint it, and remember its radius
/// for the next density estimate. Returns whether the surface changed.
pub fn draw_dab<S, R>(
    state: &mut BrushState,
    settings: &BrushSettings,
    config: &EngineConfig,
    rng: &mut R,
    surface: &mut S,
) -> bool
where
    S: Surface + ?Sized,
    R: Rng + ?Sized,
{
    let dab = resolve_dab(state, settings, config, rng, &*surface);
    state.actual_radius = dab.radius;
    trace!(
        "draw_dab: pos=({:.1}, {:.1}), radius={:.2}, opacity={:.2}, hardness={:.2}, color={:?}",
        dab.x,
        dab.y,
        dab.radius,
        dab.opacity,
        dab.hardness,
        dab.color
    );
    surface.draw_dab(&dab)
}

/// Resolve the parameters of one dab without painting it
///
/// The surface is only read, and only when adapting the color from the image.
pub fn resolve_dab<S, R>(
    state: &mut BrushState,
    settings: &BrushSettings,
    config: &EngineConfig,
    rng: &mut R,
    surface: &S,
) -> Dab
where
    S: Surface + ?Sized,
    R: Rng + ?Sized,
{
    // interpolation can overshoot slightly
    state.pressure = state.pressure.clamp(0.0, 1.0);
    let pressure = state.pressure;

    // Inputs see the speed filters as left by the previous dab
    let inputs = Inputs::new(
        pressure,
        state.radius_speed_slow.get(),
        rng.gen_range(0.0f32..1.0),
        state.stroke_time(),
    );
    let s = settings.resolve(&inputs);

    let fac = decay_factor(s[SettingId::PositionT2], config.slow_position_elapsed);
    let mut x = state.x_slow.update(state.x, fac);
    let mut y = state.y_slow.update(state.y, fac);

    update_speed_filters(state, &s, config);

    let opacity = resolve_opacity(&s, pressure);
    let radius = resolve_radius(state, &s, pressure, rng);

    let offset_by_random = s[SettingId::OffsetByRandom];
    if offset_by_random != 0.0 {
        x += gauss_noise(rng) * offset_by_random;
        y += gauss_noise(rng) * offset_by_random;
    }

    let offset_by_speed = s[SettingId::OffsetBySpeed];
    if offset_by_speed != 0.0 {
        let scale = OFFSET_BY_SPEED_SCALE * state.offset_speed_slow.get() * offset_by_speed;
        x += state.dx_slow.get() * scale;
        y += state.dy_slow.get() * scale;
    }

    let adapt = s[SettingId::AdaptColorFromImage];
    if adapt > 0.0 {
        state.color = adapt_color(state.color, surface, x, y, adapt);
    }
    let (color, _) = apply_color_dynamics(state.color, &s, pressure, rng);

    Dab {
        x,
        y,
        radius,
        opacity,
        hardness: s[SettingId::Hardness],
        color,
        saturation_slowdown: s[SettingId::SaturationSlowdown],
    }
}

fn update_speed_filters(state: &mut BrushState, s: &ResolvedSettings, config: &EngineConfig) {
    let speed = state.step_speed();
    let elapsed = config.speed_time_scale * state.dtime;

    let fac = decay_factor(
        s[SettingId::OffsetBySpeedSlowness] * OFFSET_SPEED_SLOWNESS_SCALE,
        elapsed,
    );
    state.dx_slow.update(state.dx, fac);
    state.dy_slow.update(state.dy, fac);

    let fac = decay_factor(s[SettingId::OffsetBySpeedMagnitudeSlowness], elapsed);
    state.offset_speed_slow.update(speed, fac);

    let fac = decay_factor(
        s[SettingId::RadiusBySpeedSlowness] * RADIUS_SPEED_SLOWNESS_SCALE,
        elapsed,
    );
    state.radius_speed_slow.update(speed, fac);
}

/// Opacity scaled by pressure in proportion to `OpaqueByPressure`, clamped to [0, 1]
fn resolve_opacity(s: &ResolvedSettings, pressure: f32) -> f32 {
    let by_pressure = s[SettingId::OpaqueByPressure];
    let opacity = s[SettingId::Opaque] * (by_pressure * pressure + (1.0 - by_pressure));
    opacity.clamp(0.0, 1.0)
}

fn resolve_radius<R: Rng + ?Sized>(
    state: &BrushState,
    s: &ResolvedSettings,
    pressure: f32,
    rng: &mut R,
) -> f32 {
    let mut radius_log = s[SettingId::RadiusLogarithmic] + pressure * s[SettingId::RadiusByPressure];

    let by_random = s[SettingId::RadiusByRandom];
    if by_random != 0.0 {
        radius_log += (rng.gen_range(0.0f32..1.0) - 0.5) * by_random;
    }

    let by_speed = s[SettingId::RadiusBySpeed];
    if by_speed != 0.0 {
        radius_log += RADIUS_BY_SPEED_SCALE * state.radius_speed_slow.get() * by_speed;
    }

    radius_log.exp().clamp(f32::MIN_POSITIVE, MAX_DAB_RADIUS)
}

/// Pixel coordinate nearest to `v`, clamped to `[0, extent - 1]`
#[inline]
fn clamp_to_extent(v: f32, extent: u32) -> u32 {
    let max = extent.saturating_sub(1) as f32;
    v.round().clamp(0.0, max) as u32
}

/// Blend `color` toward the surface pixel under (`x`, `y`) by `strength`
pub fn adapt_color<S: Surface + ?Sized>(
    color: [u8; 3],
    surface: &S,
    x: f32,
    y: f32,
    strength: f32,
) -> [u8; 3] {
    let px = clamp_to_extent(x, surface.width());
    let py = clamp_to_extent(y, surface.height());
    let sampled = surface.get_pixel(px, py);

    let mut adapted = color;
    for (channel, (&current, &target)) in adapted.iter_mut().zip(color.iter().zip(&sampled)) {
        let blended = (1.0 - strength) * current as f32 + strength * target as f32;
        *channel = blended.round().clamp(0.0, 255.0) as u8;
    }
    adapted
}

/// Apply hue/saturation/value dynamics to `color`
///
/// Returns the color unchanged and `None` when no HSV dynamic is set;
/// otherwise the final RGB and the normalized HSV it was converted from.
pub fn apply_color_dynamics<R: Rng + ?Sized>(
    color: [u8; 3],
    s: &ResolvedSettings,
    pressure: f32,
    rng: &mut R,
) -> ([u8; 3], Option<Hsv>) {
    if HSV_DYNAMICS.iter().all(|&id| s[id] == 0.0) {
        return (color, None);
    }

    let mut hsv = Hsv::from_rgb(color);
    let mut jitter = |channel: &mut i32, by_random: SettingId, by_pressure: SettingId| {
        if s[by_random] != 0.0 {
            *channel += (gauss_noise(&mut *rng) * s[by_random] * COLOR_RANDOM_UNITS).round() as i32;
        }
        if s[by_pressure] != 0.0 {
            *channel += (pressure * s[by_pressure] * COLOR_PRESSURE_UNITS).round() as i32;
        }
    };
    jitter(&mut hsv.h, SettingId::ColorHueByRandom, SettingId::ColorHueByPressure);
    jitter(
        &mut hsv.s,
        SettingId::ColorSaturationByRandom,
        SettingId::ColorSaturationByPressure,
    );
    jitter(
        &mut hsv.v,
        SettingId::ColorValueByRandom,
        SettingId::ColorValueByPressure,
    );

    let hsv = hsv.normalized();
    (hsv.to_rgb(), Some(hsv))
}
