//! Brush engine: turns pointer samples into dabs
//!
//! [`Brush::stroke_to`] is the single entry point driving the simulation.
//! Every sample first moves a virtual cursor toward the raw position, then
//! the density estimate decides how many dabs separate the confirmed state
//! from that cursor, and the confirmed state walks there one dab at a time.

use brush_config::EngineConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::density::{count_dabs, effective_actual_radius};
use crate::error::BrushError;
use crate::filter::decay_factor;
use crate::mapping::ResponseCurve;
use crate::resolver;
use crate::settings::{BrushSettings, InputId, SettingId};
use crate::state::{BrushState, StrokePhase};
use crate::surface::Surface;
use crate::types::StrokeOutcome;

/// A brush: its parameter store, its simulation state, and its RNG
pub struct Brush {
    settings: BrushSettings,
    state: BrushState,
    config: EngineConfig,
    rng: StdRng,
}

impl Default for Brush {
    fn default() -> Self {
        Self::new()
    }
}

impl Brush {
    /// Create a brush with all settings zero and the default engine config
    pub fn new() -> Self {
        Self::from_valid_config(EngineConfig::default())
    }

    /// Create a brush with a fixed RNG seed, for reproducible strokes
    pub fn with_seed(seed: u64) -> Self {
        Self::from_valid_config(EngineConfig::seeded(seed))
    }

    /// Create a brush with a custom engine config
    pub fn with_config(config: EngineConfig) -> Result<Self, BrushError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            settings: BrushSettings::new(),
            state: BrushState::new(),
            config,
            rng,
        }
    }

    /// Get the parameter store
    pub fn settings(&self) -> &BrushSettings {
        &self.settings
    }

    /// Replace the whole parameter store
    pub fn load_settings(&mut self, settings: BrushSettings) {
        self.settings = settings;
    }

    /// Get the simulation state
    pub fn state(&self) -> &BrushState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current brush color
    pub fn color(&self) -> [u8; 3] {
        self.state.color
    }

    pub fn set_base_value(&mut self, id: SettingId, value: f32) {
        self.settings.set_base(id, value);
    }

    /// Write one control-point coordinate of a response curve
    ///
    /// Even `index` sets x of point `index / 2`, odd sets its y.
    ///
    /// # Panics
    /// If `index` is not in `0..8`.
    pub fn set_mapping(&mut self, id: SettingId, input: InputId, index: usize, value: f32) {
        self.settings.set_mapping(id, input, index, value);
    }

    pub fn remove_mapping(&mut self, id: SettingId, input: InputId) -> Option<ResponseCurve> {
        self.settings.remove_mapping(id, input)
    }

    pub fn set_color(&mut self, r: u8, g: u8, b: u8) {
        self.state.color = [r, g, b];
    }

    /// End the current stroke. The next sample starts a new one.
    pub fn reset(&mut self) {
        debug!("Brush::reset");
        self.state.reset();
    }

    /// Feed one input sample
    ///
    /// `time` must not decrease and uses the same units as the idle threshold
    /// and the time-constant settings. Returns how the sample was handled and
    /// how many dabs were drawn.
    pub fn stroke_to<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        x: f32,
        y: f32,
        pressure: f32,
        time: f32,
    ) -> StrokeOutcome {
        if !(x.is_finite() && y.is_finite() && pressure.is_finite() && time.is_finite()) {
            debug!(
                "Brush::stroke_to: discarded non-finite sample ({}, {}) p={} t={}",
                x, y, pressure, time
            );
            return StrokeOutcome::Discarded;
        }

        let tracking = self.state.phase == StrokePhase::Tracking;
        if tracking && time <= self.state.time {
            debug!(
                "Brush::stroke_to: discarded sample at t={:.4} (clock at {:.4})",
                time, self.state.time
            );
            return StrokeOutcome::Discarded;
        }

        let pressure = pressure.clamp(0.0, 1.0);

        if !tracking || time - self.state.last_sample_time > self.config.idle_threshold {
            debug!(
                "Brush::stroke_to: stroke start at ({:.1}, {:.1}), t={:.4}",
                x, y, time
            );
            self.state.begin_stroke(x, y, pressure, time);
            return StrokeOutcome::Started;
        }

        let (target_x, target_y) = self.virtual_target(x, y, time);

        self.state.actual_radius = effective_actual_radius(self.state.actual_radius, &self.settings);
        let distance = (target_x - self.state.x).hypot(target_y - self.state.y);
        // Estimated once per sample, not per dab
        let mut remaining = count_dabs(
            &self.settings,
            self.state.actual_radius,
            distance,
            time - self.state.time,
        );

        let mut dabs = 0;
        let mut changed = 0;
        while remaining >= 1.0 {
            // Recomputed every step so the walk lands exactly on the target
            let step = 1.0 / remaining;
            let state = &mut self.state;
            state.dx = step * (target_x - state.x);
            state.dy = step * (target_y - state.y);
            state.dpressure = step * (pressure - state.pressure);
            state.dtime = step * (time - state.time);

            state.x += state.dx;
            state.y += state.dy;
            state.pressure += state.dpressure;
            state.time += state.dtime;

            remaining -= 1.0;

            if resolver::draw_dab(
                &mut self.state,
                &self.settings,
                &self.config,
                &mut self.rng,
                &mut *surface,
            ) {
                changed += 1;
            }
            dabs += 1;
        }

        self.state.last_sample_time = time;

        if dabs > 0 {
            debug!(
                "Brush::stroke_to: {} dabs ({} changed) toward ({:.1}, {:.1}), t={:.4}",
                dabs, changed, target_x, target_y, time
            );
        }

        StrokeOutcome::Extended { dabs, changed }
    }

    /// Position the brush chases: the raw sample filtered by the position
    /// time constant over the wall time since the previous sample
    fn virtual_target(&self, x: f32, y: f32, time: f32) -> (f32, f32) {
        let elapsed = self.config.position_time_scale * (time - self.state.last_sample_time);
        let fac = decay_factor(self.settings.base(SettingId::PositionT), elapsed);
        (
            self.state.x + (x - self.state.x) * fac,
            self.state.y + (y - self.state.y) * fac,
        )
    }
}
