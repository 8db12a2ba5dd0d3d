use rand::{rngs::StdRng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};
use crate::layers::dense::BiasInit;
use crate::loss::loss_type::LossType;

/// Hyperparameters and initialization settings of a `NeuralNet`.
///
/// - `learning_rate` — SGD step size, must be finite and > 0
/// - `loss`          — loss reported by `train` / `evaluate`
/// - `bias_init`     — distribution for the initial biases of non-input layers
/// - `seed`          — fixes the generator used for weight and bias
///                     initialization; `None` seeds from OS entropy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetConfig {
    pub learning_rate: f64,
    #[serde(default)]
    pub loss: LossType,
    #[serde(default)]
    pub bias_init: BiasInit,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetConfig {
    pub fn new(learning_rate: f64, loss: LossType) -> Self {
        NetConfig {
            learning_rate,
            loss,
            ..NetConfig::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_bias_init(mut self, bias_init: BiasInit) -> Self {
        self.bias_init = bias_init;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_learning_rate(self.learning_rate)?;
        self.bias_init.validate()
    }

    /// Generator described by `seed`.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for NetConfig {
    fn default() -> Self {
        NetConfig {
            learning_rate: 0.01,
            loss: LossType::Mse,
            bias_init: BiasInit::default(),
            seed: None,
        }
    }
}

pub(crate) fn validate_learning_rate(learning_rate: f64) -> Result<()> {
    if learning_rate.is_finite() && learning_rate > 0.0 {
        Ok(())
    } else {
        Err(NetError::Construction(format!(
            "learning rate must be a positive finite number, got {learning_rate}"
        )))
    }
}
