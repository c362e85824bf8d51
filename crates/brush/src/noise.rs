use rand::Rng;

/// Approximately normal noise with zero mean and unit variance.
///
/// Sum of four uniform draws, rescaled. Cheap and bounded to about ±3.46.
pub fn gauss_noise<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let sum: f32 = (0..4).map(|_| rng.gen_range(0.0f32..1.0)).sum();
    (sum - 2.0) * 3.0f32.sqrt()
}
