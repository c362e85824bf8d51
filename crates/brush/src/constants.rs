/// Time constants at or below this disable smoothing (snap instantly).
pub const MIN_TIME_CONSTANT: f32 = 0.001;

/// Number of control points in a response curve.
pub const CURVE_POINTS: usize = 4;

/// Lower clamp for the cached actual radius used by the density estimate.
pub const MIN_ACTUAL_RADIUS: f32 = 0.5;

/// Upper clamp for the cached actual radius used by the density estimate.
pub const MAX_ACTUAL_RADIUS: f32 = 500.0;

/// Largest radius a dab may be painted with.
pub const MAX_DAB_RADIUS: f32 = 100.0;

/// Scale of the offset-by-speed slowness setting.
pub const OFFSET_SPEED_SLOWNESS_SCALE: f32 = 0.01;

/// Scale of the radius-by-speed slowness setting.
pub const RADIUS_SPEED_SLOWNESS_SCALE: f32 = 0.001;

/// Contribution of the smoothed speed to the log radius.
pub const RADIUS_BY_SPEED_SCALE: f32 = 0.001;

/// Contribution of the smoothed speed to the directional offset.
pub const OFFSET_BY_SPEED_SCALE: f32 = 0.01;

/// HSV units per unit of a *_by_random color setting (times gaussian noise).
pub const COLOR_RANDOM_UNITS: f32 = 64.0;

/// HSV units per unit of a *_by_pressure color setting (times pressure).
pub const COLOR_PRESSURE_UNITS: f32 = 128.0;

/// Hue range in degrees.
pub const HUE_RANGE: i32 = 360;
