//! Stroke-to-dab brush engine
//!
//! This crate turns a stream of pointer samples into brush dabs:
//! - [`settings`] - Per-brush parameter store with per-input response curves
//! - [`mapping`] - Piecewise-linear response curves
//! - [`filter`] - Exponential-decay smoothing filters
//! - [`density`] - Dab density estimation
//! - [`engine`] - The stroke interpolator ([`Brush::stroke_to`])
//! - [`resolver`] - Per-dab radius, opacity, offset and color resolution
//! - [`surface`] - Surface contract and a CPU reference surface

pub mod color;
pub mod constants;
pub mod density;
pub mod engine;
pub mod error;
pub mod filter;
pub mod mapping;
mod noise;
pub mod resolver;
pub mod settings;
pub mod state;
pub mod surface;
pub mod types;

pub use brush_config::EngineConfig;
pub use color::Hsv;
pub use constants::*;
pub use engine::Brush;
pub use error::BrushError;
pub use filter::{decay_factor, SlowValue};
pub use mapping::ResponseCurve;
pub use settings::{BrushSettings, InputId, Inputs, ResolvedSettings, Setting, SettingId};
pub use state::{BrushState, StrokePhase};
pub use surface::{CpuSurface, RecordingSurface, Surface};
pub use types::{Dab, StrokeOutcome};
