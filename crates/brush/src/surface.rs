//! Surface contract consumed by the brush engine, plus a CPU reference surface

use tracing::trace;

use crate::types::Dab;

/// A raster target dabs are stamped onto
///
/// The brush engine only ever draws dabs and, when adapting its color from
/// the image, reads single pixels.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Paint one dab. Returns whether any pixel changed.
    fn draw_dab(&mut self, dab: &Dab) -> bool;

    /// Color at a pixel. Callers clamp coordinates to the surface bounds.
    fn get_pixel(&self, x: u32, y: u32) -> [u8; 3];
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn draw_dab(&mut self, dab: &Dab) -> bool {
        (**self).draw_dab(dab)
    }

    fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        (**self).get_pixel(x, y)
    }
}

/// An 8-bit RGB CPU surface
/// Stores pixels as [r, g, b] in row-major order
pub struct CpuSurface {
    /// Surface dimensions
    pub width: u32,
    pub height: u32,
    pixels: Vec<[u8; 3]>,
}

impl CpuSurface {
    /// Create a new surface with the given dimensions, initialized to white
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [255, 255, 255])
    }

    /// Create a new surface filled with a solid color
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![color; pixel_count],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Set a pixel at the given coordinates
    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Blend a color onto a pixel: out = src * alpha + dst * (1 - alpha)
    /// Returns whether the stored pixel changed
    #[inline]
    fn blend_pixel(&mut self, index: usize, color: [u8; 3], alpha: f32) -> bool {
        let dst = self.pixels[index];
        let mut out = dst;
        for i in 0..3 {
            let blended = color[i] as f32 * alpha + dst[i] as f32 * (1.0 - alpha);
            out[i] = blended.round().clamp(0.0, 255.0) as u8;
        }
        self.pixels[index] = out;
        out != dst
    }

    /// Raw pixel data, 3 bytes per pixel
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }
}

impl Surface for CpuSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn draw_dab(&mut self, dab: &Dab) -> bool {
        if dab.radius <= 0.0 || dab.opacity <= 0.0 {
            return false;
        }

        // Clamp the bounding box to the surface
        let x_min = ((dab.x - dab.radius).floor().max(0.0) as u32).min(self.width);
        let y_min = ((dab.y - dab.radius).floor().max(0.0) as u32).min(self.height);
        let x_max = ((dab.x + dab.radius).ceil().max(0.0) as u32).min(self.width);
        let y_max = ((dab.y + dab.radius).ceil().max(0.0) as u32).min(self.height);

        if x_min >= x_max || y_min >= y_max {
            trace!("CpuSurface::draw_dab: ({:.1}, {:.1}) outside surface", dab.x, dab.y);
            return false;
        }

        let mut changed = false;
        for py in y_min..y_max {
            for px in x_min..x_max {
                let dx = (px as f32 + 0.5) - dab.x;
                let dy = (py as f32 + 0.5) - dab.y;
                let distance_normalized = (dx * dx + dy * dy).sqrt() / dab.radius;
                if distance_normalized > 1.0 {
                    continue;
                }

                let falloff = calculate_hardness_falloff(distance_normalized, dab.hardness);
                if falloff <= 0.0 {
                    continue;
                }

                let index = self.index(px, py);
                let slowdown = saturation_slowdown_factor(
                    self.pixels[index],
                    dab.color,
                    dab.saturation_slowdown,
                );
                let alpha = (dab.opacity * falloff * slowdown).clamp(0.0, 1.0);
                changed |= self.blend_pixel(index, dab.color, alpha);
            }
        }
        changed
    }

    fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        self.pixel(x, y).unwrap_or_default()
    }
}

/// Calculate falloff based on hardness
/// distance_normalized is 0 at center, 1 at edge
/// hardness is 0.0 (soft) to 1.0 (hard)
#[inline]
pub fn calculate_hardness_falloff(distance_normalized: f32, hardness: f32) -> f32 {
    let t = distance_normalized.clamp(0.0, 1.0);
    let hardness = hardness.clamp(0.0, 1.0);
    let soft = 1.0 - t;
    let hard = if distance_normalized <= 1.0 { 1.0 } else { 0.0 };
    soft * (1.0 - hardness) + hard * hardness
}

/// Coverage multiplier that shrinks as the pixel approaches the dab color
#[inline]
fn saturation_slowdown_factor(pixel: [u8; 3], color: [u8; 3], slowdown: f32) -> f32 {
    if slowdown <= 0.0 {
        return 1.0;
    }
    let difference = (0..3)
        .map(|i| (pixel[i] as i32 - color[i] as i32).unsigned_abs())
        .max()
        .unwrap_or(0) as f32
        / 255.0;
    let similarity = 1.0 - difference;
    (1.0 - slowdown.min(1.0) * similarity).max(0.0)
}

/// A surface wrapper that records every dab drawn through it
pub struct RecordingSurface<S> {
    inner: S,
    dabs: Vec<Dab>,
}

impl<S: Surface> RecordingSurface<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            dabs: Vec::new(),
        }
    }

    /// Dabs recorded so far, in draw order
    pub fn dabs(&self) -> &[Dab] {
        &self.dabs
    }

    /// Take the recorded dabs, leaving the log empty
    pub fn take_dabs(&mut self) -> Vec<Dab> {
        std::mem::take(&mut self.dabs)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Surface> Surface for RecordingSurface<S> {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn draw_dab(&mut self, dab: &Dab) -> bool {
        self.dabs.push(*dab);
        self.inner.draw_dab(dab)
    }

    fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.inner.get_pixel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dab_at(x: f32, y: f32, radius: f32, color: [u8; 3]) -> Dab {
        Dab {
            x,
            y,
            radius,
            opacity: 1.0,
            hardness: 1.0,
            color,
            saturation_slowdown: 0.0,
        }
    }

    #[test]
    fn test_new_surface() {
        let surface = CpuSurface::new(100, 50);
        assert_eq!(surface.width(), 100);
        assert_eq!(surface.height(), 50);
        assert_eq!(surface.pixel_count(), 5000);
        assert_eq!(surface.as_bytes().len(), 15000);
        assert_eq!(surface.pixel(0, 0), Some([255, 255, 255]));
    }

    #[test]
    fn test_get_set_pixel() {
        let mut surface = CpuSurface::new(10, 10);
        surface.set_pixel(5, 5, [1, 2, 3]);
        assert_eq!(surface.pixel(5, 5), Some([1, 2, 3]));
        assert_eq!(surface.pixel(100, 100), None);
        // the trait accessor clamps instead
        surface.set_pixel(9, 9, [7, 7, 7]);
        assert_eq!(surface.get_pixel(100, 100), [7, 7, 7]);
    }

    #[test]
    fn test_hard_dab_paints_center() {
        let mut surface = CpuSurface::new(20, 20);
        assert!(surface.draw_dab(&dab_at(10.0, 10.0, 3.0, [255, 0, 0])));
        assert_eq!(surface.pixel(10, 10), Some([255, 0, 0]));
        assert_eq!(surface.pixel(0, 0), Some([255, 255, 255]));
    }

    #[test]
    fn test_redraw_same_color_reports_unchanged() {
        let mut surface = CpuSurface::new(20, 20);
        let dab = dab_at(10.0, 10.0, 3.0, [0, 0, 0]);
        assert!(surface.draw_dab(&dab));
        assert!(!surface.draw_dab(&dab));
    }

    #[test]
    fn test_dab_outside_surface() {
        let mut surface = CpuSurface::new(10, 10);
        assert!(!surface.draw_dab(&dab_at(-50.0, -50.0, 3.0, [0, 0, 0])));
        assert!(!surface.draw_dab(&dab_at(5.0, 5.0, 3.0, [0, 0, 0]).with_opacity(0.0)));
    }

    #[test]
    fn test_hardness_falloff() {
        assert_eq!(calculate_hardness_falloff(0.5, 1.0), 1.0);
        assert!((calculate_hardness_falloff(0.5, 0.0) - 0.5).abs() < 1e-6);
        assert!((calculate_hardness_falloff(0.5, 0.5) - 0.75).abs() < 1e-6);
        assert_eq!(calculate_hardness_falloff(1.5, 1.0), 0.0);
    }

    #[test]
    fn test_saturation_slowdown() {
        assert_eq!(saturation_slowdown_factor([0, 0, 0], [0, 0, 0], 0.0), 1.0);
        assert_eq!(saturation_slowdown_factor([0, 0, 0], [0, 0, 0], 1.0), 0.0);
        assert_eq!(saturation_slowdown_factor([255, 0, 0], [0, 0, 0], 1.0), 1.0);
    }

    #[test]
    fn test_recording_surface() {
        let mut surface = RecordingSurface::new(CpuSurface::new(10, 10));
        surface.draw_dab(&dab_at(5.0, 5.0, 2.0, [0, 0, 0]));
        surface.draw_dab(&dab_at(6.0, 5.0, 2.0, [0, 0, 0]));
        assert_eq!(surface.dabs().len(), 2);
        assert_eq!(surface.dabs()[1].x, 6.0);
        assert_eq!(surface.inner().pixel(5, 5), Some([0, 0, 0]));

        let dabs = surface.take_dabs();
        assert_eq!(dabs.len(), 2);
        assert!(surface.dabs().is_empty());
    }

    impl Dab {
        fn with_opacity(mut self, opacity: f32) -> Self {
            self.opacity = opacity;
            self
        }
    }
}
