pub struct MaeLoss;

impl MaeLoss {
    /// Absolute error of a single output: |y - ŷ|
    pub fn loss(target: f64, predicted: f64) -> f64 {
        (target - predicted).abs()
    }

    /// Scalar MAE: mean(|target - predicted|)
    pub fn mean(targets: &[f64], predicted: &[f64]) -> f64 {
        let n = targets.len() as f64;
        targets.iter().zip(predicted.iter())
            .map(|(&y, &p)| MaeLoss::loss(y, p))
            .sum::<f64>() / n
    }
}
