//! End-to-end stroke scenarios driven through `Brush::stroke_to`

use brush_engine::{
    Brush, CpuSurface, Inputs, InputId, RecordingSurface, SettingId, StrokeOutcome, Surface,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn canvas() -> RecordingSurface<CpuSurface> {
    RecordingSurface::new(CpuSurface::new(128, 128))
}

fn basic_brush() -> Brush {
    let mut brush = Brush::with_seed(11);
    brush.set_base_value(SettingId::RadiusLogarithmic, 0.0);
    brush.set_base_value(SettingId::Opaque, 1.0);
    brush.set_base_value(SettingId::DabsPerSecond, 10.0);
    brush
}

#[test]
fn test_ten_dabs_per_second_in_place() {
    init_tracing();
    let mut brush = basic_brush();
    brush.set_color(40, 80, 120);
    let mut surface = canvas();

    assert_eq!(brush.stroke_to(&mut surface, 50.0, 50.0, 0.7, 1.0), StrokeOutcome::Started);
    let outcome = brush.stroke_to(&mut surface, 50.0, 50.0, 0.7, 2.0);

    assert_eq!(outcome.dabs(), 10);
    assert_eq!(surface.dabs().len(), 10);
    for dab in surface.dabs() {
        assert_eq!(dab.radius, 1.0);
        assert_eq!(dab.opacity, 1.0);
        assert_eq!(dab.color, [40, 80, 120]);
        assert_eq!((dab.x, dab.y), (50.0, 50.0));
    }
    assert_eq!(brush.color(), [40, 80, 120]);
}

#[test]
fn test_idle_gap_resets_stroke() {
    init_tracing();
    let mut brush = basic_brush();
    brush.set_base_value(SettingId::DabsPerActualRadius, 1.0);
    brush.set_base_value(SettingId::OffsetBySpeed, 1.0);
    let mut surface = canvas();

    brush.stroke_to(&mut surface, 10.0, 10.0, 1.0, 1.0);
    brush.stroke_to(&mut surface, 30.0, 20.0, 1.0, 1.5);
    assert!(!surface.dabs().is_empty());
    assert!(brush.state().dx_slow.get() != 0.0);
    let drawn = surface.dabs().len();

    let idle = brush.config().idle_threshold;
    let outcome = brush.stroke_to(&mut surface, 90.0, 70.0, 0.4, 1.5 + idle + 0.5);

    assert_eq!(outcome, StrokeOutcome::Started);
    assert_eq!(surface.dabs().len(), drawn);
    let state = brush.state();
    assert_eq!((state.x, state.y), (90.0, 70.0));
    assert_eq!((state.x_slow.get(), state.y_slow.get()), (90.0, 70.0));
    assert_eq!(state.dx_slow.get(), 0.0);
    assert_eq!(state.dy_slow.get(), 0.0);
    assert_eq!(state.offset_speed_slow.get(), 0.0);
    assert_eq!(state.radius_speed_slow.get(), 0.0);
}

#[test]
fn test_step_deltas_sum_to_displacement() {
    let mut brush = basic_brush();
    let mut surface = canvas();

    brush.stroke_to(&mut surface, 5.0, 7.0, 0.2, 1.0);
    let (x0, y0) = (brush.state().x, brush.state().y);

    // 10 dabs from time alone, no position smoothing: the walk ends on the sample
    let mut sum = (0.0f32, 0.0f32);
    let mut previous = (x0, y0);
    let mut probe = StepProbe::new(&mut surface);
    brush.stroke_to(&mut probe, 85.0, 47.0, 0.9, 2.0);
    for (x, y) in probe.positions {
        sum.0 += x - previous.0;
        sum.1 += y - previous.1;
        previous = (x, y);
    }

    assert!((sum.0 - 80.0).abs() < 1e-3, "dx sum = {}", sum.0);
    assert!((sum.1 - 40.0).abs() < 1e-3, "dy sum = {}", sum.1);
    assert!((brush.state().x - 85.0).abs() < 1e-3);
    assert!((brush.state().pressure - 0.9).abs() < 1e-5);
}

#[test]
fn test_step_deltas_sum_to_smoothed_target() {
    let mut brush = basic_brush();
    brush.set_base_value(SettingId::PositionT, 50.0);
    let position_time_scale = brush.config().position_time_scale;
    let mut surface = canvas();

    brush.stroke_to(&mut surface, 5.0, 7.0, 0.2, 1.0);
    let (x0, y0) = (brush.state().x, brush.state().y);

    // the walk chases the virtual target, which falls short of the sample
    let fac = 1.0 - (-position_time_scale * 1.0 / 50.0f32).exp();
    let target = (x0 + (85.0 - x0) * fac, y0 + (47.0 - y0) * fac);
    assert!(fac > 0.5 && fac < 0.95, "fac = {fac}");

    let mut sum = (0.0f32, 0.0f32);
    let mut previous = (x0, y0);
    let mut probe = StepProbe::new(&mut surface);
    let outcome = brush.stroke_to(&mut probe, 85.0, 47.0, 0.9, 2.0);
    for (x, y) in probe.positions {
        sum.0 += x - previous.0;
        sum.1 += y - previous.1;
        previous = (x, y);
    }

    assert_eq!(outcome.dabs(), 10);
    assert!((sum.0 - (target.0 - x0)).abs() < 1e-3, "dx sum = {}", sum.0);
    assert!((sum.1 - (target.1 - y0)).abs() < 1e-3, "dy sum = {}", sum.1);
    assert!((brush.state().x - target.0).abs() < 1e-3);
    assert!((brush.state().y - target.1).abs() < 1e-3);
}

#[test]
fn test_fractional_remainder_stays_pending() {
    let mut brush = basic_brush();
    let mut surface = canvas();

    brush.stroke_to(&mut surface, 0.0, 0.0, 1.0, 1.0);
    // 2.5 dabs worth over 0.25 time units
    let outcome = brush.stroke_to(&mut surface, 25.0, 0.0, 1.0, 1.25);

    assert_eq!(outcome.dabs(), 2);
    // two of 2.5 steps: 4/5 of the displacement
    assert!((brush.state().x - 20.0).abs() < 1e-3, "x = {}", brush.state().x);
    assert!(brush.state().time < brush.state().last_sample_time);
}

#[test]
fn test_resolved_ranges_under_heavy_dynamics() {
    init_tracing();
    let mut brush = Brush::with_seed(5);
    brush.set_base_value(SettingId::RadiusLogarithmic, 1.5);
    brush.set_base_value(SettingId::Opaque, 2.0);
    brush.set_base_value(SettingId::OpaqueByPressure, 0.7);
    brush.set_base_value(SettingId::RadiusByPressure, 4.0);
    brush.set_base_value(SettingId::RadiusByRandom, 3.0);
    brush.set_base_value(SettingId::RadiusBySpeed, 2.0);
    brush.set_base_value(SettingId::OffsetByRandom, 2.0);
    brush.set_base_value(SettingId::OffsetBySpeed, 0.5);
    brush.set_base_value(SettingId::DabsPerBasicRadius, 2.0);
    brush.set_base_value(SettingId::DabsPerSecond, 20.0);
    brush.set_base_value(SettingId::ColorHueByRandom, 2.0);
    brush.set_base_value(SettingId::ColorSaturationByPressure, 1.5);
    brush.set_base_value(SettingId::ColorValueByRandom, -1.0);
    brush.set_color(200, 30, 90);
    let mut surface = canvas();

    let mut time = 1.0;
    for i in 0..60 {
        let t = i as f32 * 0.3;
        let pressure = 0.5 + 0.6 * t.sin();
        brush.stroke_to(&mut surface, 64.0 + 40.0 * t.cos(), 64.0 + 40.0 * t.sin(), pressure, time);
        time += 0.02;
    }

    assert!(!surface.dabs().is_empty());
    for dab in surface.dabs() {
        assert!((0.0..=1.0).contains(&dab.opacity), "opacity {}", dab.opacity);
        assert!(dab.radius > 0.0 && dab.radius <= 100.0, "radius {}", dab.radius);
    }
    assert!((0.0..=1.0).contains(&brush.state().pressure));
}

#[test]
fn test_remove_mapping_matches_unmapped_brush() {
    let mut brush = basic_brush();
    let inputs = Inputs::new(0.6, 3.0, 0.2, 1.0);
    let before = brush.settings().evaluate(SettingId::RadiusLogarithmic, &inputs);

    brush.set_mapping(SettingId::RadiusLogarithmic, InputId::Pressure, 2, 1.0);
    brush.set_mapping(SettingId::RadiusLogarithmic, InputId::Pressure, 3, 2.0);
    assert_ne!(brush.settings().evaluate(SettingId::RadiusLogarithmic, &inputs), before);

    brush.remove_mapping(SettingId::RadiusLogarithmic, InputId::Pressure);
    assert_eq!(brush.settings().evaluate(SettingId::RadiusLogarithmic, &inputs), before);

    // and the painted radius is the unmodulated one again
    let mut surface = canvas();
    brush.stroke_to(&mut surface, 10.0, 10.0, 0.6, 1.0);
    brush.stroke_to(&mut surface, 10.0, 10.0, 0.6, 1.5);
    assert!(surface.dabs().iter().all(|d| d.radius == 1.0));
}

#[test]
fn test_adapt_color_from_image_persists() {
    init_tracing();
    let mut brush = basic_brush();
    brush.set_base_value(SettingId::Hardness, 1.0);
    brush.set_base_value(SettingId::AdaptColorFromImage, 1.0);
    brush.set_color(255, 255, 255);

    let mut background = CpuSurface::filled(32, 32, [20, 140, 60]);
    // the pixel under the dab position (rounded) differs from its neighbours
    background.set_pixel(16, 16, [200, 10, 10]);
    let mut surface = RecordingSurface::new(background);

    brush.stroke_to(&mut surface, 16.0, 16.0, 1.0, 1.0);
    // 1.5 dabs worth: exactly one drawn
    brush.stroke_to(&mut surface, 16.0, 16.0, 1.0, 1.15);
    assert_eq!(surface.dabs().len(), 1);
    assert_eq!(surface.dabs()[0].color, [200, 10, 10]);
    assert_eq!(brush.color(), [200, 10, 10]);

    // the dab repainted the sampled pixel with the sampled color; stays stable
    brush.set_base_value(SettingId::AdaptColorFromImage, 0.0);
    brush.stroke_to(&mut surface, 16.0, 16.0, 1.0, 1.65);
    assert_eq!(surface.dabs().len(), 6);
    assert!(surface.dabs().iter().all(|d| d.color == [200, 10, 10]));
    assert_eq!(brush.color(), [200, 10, 10]);
}

#[test]
fn test_reproducible_with_seed() {
    let run = || {
        let mut brush = basic_brush();
        brush.set_base_value(SettingId::RadiusByRandom, 1.0);
        brush.set_base_value(SettingId::OffsetByRandom, 1.0);
        let mut surface = canvas();
        brush.stroke_to(&mut surface, 20.0, 20.0, 1.0, 1.0);
        brush.stroke_to(&mut surface, 40.0, 30.0, 1.0, 2.0);
        surface.take_dabs()
    };
    assert_eq!(run(), run());
}

/// Records the confirmed position the brush had when each dab was drawn,
/// recovered from the dab itself (no smoothing or offsets configured).
struct StepProbe<'a, S: Surface> {
    inner: &'a mut S,
    positions: Vec<(f32, f32)>,
}

impl<'a, S: Surface> StepProbe<'a, S> {
    fn new(inner: &'a mut S) -> Self {
        Self {
            inner,
            positions: Vec::new(),
        }
    }
}

impl<S: Surface> Surface for StepProbe<'_, S> {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn draw_dab(&mut self, dab: &brush_engine::Dab) -> bool {
        self.positions.push((dab.x, dab.y));
        self.inner.draw_dab(dab)
    }

    fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.inner.get_pixel(x, y)
    }
}
