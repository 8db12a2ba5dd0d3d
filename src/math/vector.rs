use crate::error::{NetError, Result};

/// Dot product of two equal-length sequences.
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(NetError::DimensionMismatch(format!(
            "vectors must be the same size to multiply - expected length {}, got {}",
            a.len(),
            b.len()
        )));
    }

    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}
