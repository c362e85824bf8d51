//! Per-brush dynamic state threaded through every stroke operation

use crate::filter::SlowValue;

/// Whether the brush is between strokes or interpolating one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokePhase {
    /// No confirmed sample; the next sample starts a stroke
    #[default]
    Idle,
    /// Interpolating from the confirmed state toward incoming samples
    Tracking,
}

/// Mutable simulation state of one brush
///
/// `time` is the simulated time of the last emitted dab, which generally lags
/// `last_sample_time` (the timestamp of the newest accepted input) by a
/// fraction of a dab.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrushState {
    pub phase: StrokePhase,

    /// Confirmed position
    pub x: f32,
    pub y: f32,
    /// Confirmed pressure, 0..1 once a dab has been resolved
    pub pressure: f32,
    /// Simulated time of the confirmed state
    pub time: f32,
    /// Timestamp of the newest accepted input sample
    pub last_sample_time: f32,
    /// Simulated time at which the current stroke began
    pub stroke_start_time: f32,

    /// Painted (smoothed) position
    pub x_slow: SlowValue,
    pub y_slow: SlowValue,
    /// Smoothed per-step velocity, drives the offset direction
    pub dx_slow: SlowValue,
    pub dy_slow: SlowValue,
    /// Smoothed speed magnitude driving offset-by-speed
    pub offset_speed_slow: SlowValue,
    /// Smoothed speed magnitude driving radius-by-speed
    pub radius_speed_slow: SlowValue,

    /// Per-step deltas of the last interpolation step
    pub dx: f32,
    pub dy: f32,
    pub dpressure: f32,
    pub dtime: f32,

    /// Radius of the most recent dab, 0 before the first one
    pub actual_radius: f32,
    /// Current brush color
    pub color: [u8; 3],
}

impl BrushState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a stroke at the given sample: every accumulator snaps to it and
    /// all velocity-derived filters are zeroed.
    pub fn begin_stroke(&mut self, x: f32, y: f32, pressure: f32, time: f32) {
        self.phase = StrokePhase::Tracking;
        self.x = x;
        self.y = y;
        self.pressure = pressure;
        self.time = time;
        self.last_sample_time = time;
        self.stroke_start_time = time;

        self.x_slow.snap(x);
        self.y_slow.snap(y);
        self.dx_slow.snap(0.0);
        self.dy_slow.snap(0.0);
        self.offset_speed_slow.snap(0.0);
        self.radius_speed_slow.snap(0.0);

        self.dx = 0.0;
        self.dy = 0.0;
        self.dpressure = 0.0;
        self.dtime = 0.0;
    }

    /// Return to idle. The next sample starts a new stroke.
    pub fn reset(&mut self) {
        self.phase = StrokePhase::Idle;
        self.time = 0.0;
    }

    /// Time elapsed since the current stroke began
    #[inline]
    pub fn stroke_time(&self) -> f32 {
        self.time - self.stroke_start_time
    }

    /// Instantaneous speed of the last interpolation step
    #[inline]
    pub fn step_speed(&self) -> f32 {
        if self.dtime > 0.0 {
            self.dx.hypot(self.dy) / self.dtime
        } else {
            0.0
        }
    }
}
