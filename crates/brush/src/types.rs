use serde::{Deserialize, Serialize};

/// A single resolved brush dab, ready to be stamped onto a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dab {
    /// Center x in surface pixel coordinates
    pub x: f32,
    /// Center y in surface pixel coordinates
    pub y: f32,
    /// Radius in pixels, in (0, 100]
    pub radius: f32,
    /// Opacity 0.0-1.0
    pub opacity: f32,
    /// Hardness: 0.0 = soft, 1.0 = hard
    pub hardness: f32,
    /// RGB color
    pub color: [u8; 3],
    /// How much coverage drops where the pixel already has the dab color
    pub saturation_slowdown: f32,
}

/// Result of feeding one input sample to a brush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeOutcome {
    /// The sample did not advance the clock and was ignored
    Discarded,
    /// The sample started a new stroke; no dabs were drawn
    Started,
    /// The sample extended the current stroke
    Extended {
        /// Dabs emitted for this sample (possibly zero)
        dabs: usize,
        /// How many of those changed at least one pixel
        changed: usize,
    },
}

impl StrokeOutcome {
    /// Number of dabs emitted for the sample
    pub fn dabs(&self) -> usize {
        match self {
            StrokeOutcome::Extended { dabs, .. } => *dabs,
            _ => 0,
        }
    }
}
