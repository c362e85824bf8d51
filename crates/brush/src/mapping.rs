//! Piecewise-linear response curves mapping an input to a setting contribution

use serde::{Deserialize, Serialize};

use crate::constants::CURVE_POINTS;

/// Number of writable coordinates in a curve (x and y per point).
pub const CURVE_COORDS: usize = CURVE_POINTS * 2;

/// A response curve with a fixed number of control points
///
/// Points are stored in write order. Evaluation sorts them by x (stably, so
/// an earlier point keeps its place among points sharing an x) and then:
/// - below the first x, returns the first point's y
/// - above the last x, returns the last point's y
/// - between neighbours, interpolates linearly
/// - at a duplicated x, returns the y of the last point with that x
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseCurve {
    pub xvalues: [f32; CURVE_POINTS],
    pub yvalues: [f32; CURVE_POINTS],
}

impl ResponseCurve {
    /// Create a curve from explicit (x, y) points
    pub fn from_points(points: [(f32, f32); CURVE_POINTS]) -> Self {
        let mut curve = Self::default();
        for (i, (x, y)) in points.into_iter().enumerate() {
            curve.xvalues[i] = x;
            curve.yvalues[i] = y;
        }
        curve
    }

    /// Write one coordinate: even index is x of point `index / 2`, odd is y.
    ///
    /// # Panics
    /// If `index >= CURVE_COORDS`.
    pub fn set_coordinate(&mut self, index: usize, value: f32) {
        assert!(
            index < CURVE_COORDS,
            "control point coordinate index {index} out of range 0..{CURVE_COORDS}"
        );
        if index % 2 == 0 {
            self.xvalues[index / 2] = value;
        } else {
            self.yvalues[index / 2] = value;
        }
    }

    /// Control points sorted by ascending x
    fn sorted_points(&self) -> [(f32, f32); CURVE_POINTS] {
        let mut points = [(0.0, 0.0); CURVE_POINTS];
        for (i, point) in points.iter_mut().enumerate() {
            *point = (self.xvalues[i], self.yvalues[i]);
        }
        // Total order: positive NaN x-values sort last, negative NaN first
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points
    }

    /// Evaluate the curve at `input`
    pub fn evaluate(&self, input: f32) -> f32 {
        let points = self.sorted_points();
        let (first_x, first_y) = points[0];
        let (last_x, last_y) = points[CURVE_POINTS - 1];

        if input < first_x {
            return first_y;
        }
        if input >= last_x {
            return last_y;
        }

        let mut result = first_y;
        for pair in points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if input < x0 {
                break;
            }
            if input >= x1 {
                result = y1;
                continue;
            }
            // x0 <= input < x1, so x1 > x0
            let t = (input - x0) / (x1 - x0);
            result = y0 + (y1 - y0) * t;
            break;
        }
        result
    }
}
