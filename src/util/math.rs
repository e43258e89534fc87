//! Angle and moment helpers shared by the rotation and scoring code.

/// Computes sine and cosine for an angle in degrees.
pub(crate) fn sin_cos_deg(angle_deg: f32) -> (f32, f32) {
    angle_deg.to_radians().sin_cos()
}

/// Population variance of integer samples, computed from exact moments.
///
/// `n * sum(x^2) - sum(x)^2` is evaluated in 128-bit integers, so the result
/// does not depend on the order of the samples.
pub(crate) fn variance_u64(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as u128;
    let mut sum = 0u128;
    let mut sum_sq = 0u128;
    for &v in values {
        let v = v as u128;
        sum += v;
        sum_sq += v * v;
    }
    let numer = n * sum_sq - sum * sum;
    numer as f64 / (n * n) as f64
}
