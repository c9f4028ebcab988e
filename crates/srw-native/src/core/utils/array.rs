/// Arithmetic sum of `values`; `0.0` for an empty slice.
#[inline]
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Multiplies every element of `values` by `factor` in place.
#[inline]
pub fn scale(values: &mut [f64], factor: f64) {
    for v in values.iter_mut() {
        *v *= factor;
    }
}
