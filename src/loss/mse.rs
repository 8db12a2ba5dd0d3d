pub struct MseLoss;

impl MseLoss {
    /// Squared error of a single output: (y - ŷ)²
    pub fn loss(target: f64, predicted: f64) -> f64 {
        (target - predicted).powi(2)
    }

    /// Scalar MSE: mean((target - predicted)²)
    pub fn mean(targets: &[f64], predicted: &[f64]) -> f64 {
        let n = targets.len() as f64;
        targets.iter().zip(predicted.iter())
            .map(|(&y, &p)| MseLoss::loss(y, p))
            .sum::<f64>() / n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_error() {
        assert_eq!(MseLoss::loss(3.0, 1.0), 4.0);
        assert_eq!(MseLoss::mean(&[1.0, 2.0], &[0.0, 4.0]), 2.5);
    }
}
