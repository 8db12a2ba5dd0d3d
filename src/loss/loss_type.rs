use serde::{Serialize, Deserialize};

use crate::loss::{mae::MaeLoss, mse::MseLoss};

/// Selects the loss a network reports after each forward pass.
///
/// The loss is for measurement only: the backward pass always starts from
/// the squared-error delta `values - target`.
///
/// - `Mse` — squared error per output, averaged.
/// - `Mae` — absolute error per output, averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    #[default]
    Mse,
    Mae,
}

impl LossType {
    /// Per-output loss `(target, predicted) -> real`.
    pub fn loss(&self, target: f64, predicted: f64) -> f64 {
        match self {
            LossType::Mse => MseLoss::loss(target, predicted),
            LossType::Mae => MaeLoss::loss(target, predicted),
        }
    }

    /// Mean loss over equal-length target/prediction slices.
    pub fn mean(&self, targets: &[f64], predicted: &[f64]) -> f64 {
        match self {
            LossType::Mse => MseLoss::mean(targets, predicted),
            LossType::Mae => MaeLoss::mean(targets, predicted),
        }
    }
}
