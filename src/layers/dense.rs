use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{activation::activation::Activation, error::{NetError, Result}, math::matrix::Matrix};

/// Position of a layer in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerRole {
    Input,
    Hidden,
    Output,
}

/// Distribution the initial biases of non-input layers are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BiasInit {
    /// Independent draws from U(low, high).
    Uniform { low: f64, high: f64 },
}

impl BiasInit {
    pub fn validate(&self) -> Result<()> {
        match *self {
            BiasInit::Uniform { low, high } => {
                if low.is_finite() && high.is_finite() && low < high && (high - low).is_finite() {
                    Ok(())
                } else {
                    Err(NetError::Construction(format!(
                        "bias range must be finite with low < high, got [{low}, {high})"
                    )))
                }
            }
        }
    }

    fn sample<R: Rng>(&self, units: usize, rng: &mut R) -> Result<Vec<f64>> {
        self.validate()?;
        match *self {
            BiasInit::Uniform { low, high } => {
                Ok((0..units).map(|_| rng.gen_range(low..high)).collect())
            }
        }
    }
}

impl Default for BiasInit {
    fn default() -> Self {
        BiasInit::Uniform { low: 0.0, high: 1.0 }
    }
}

/// One stage of the chain.
///
/// `weights` holds the edges from this layer to the next one, shaped
/// `(next.units x self.units)`, so `weights.at(k, j)` is the weight from
/// unit `j` here to unit `k` in the successor. The output layer never has
/// weights. `next` is the successor's index in the owning network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    units: usize,
    pub(crate) values: Vec<f64>,
    pub(crate) pre_activation: Vec<f64>,
    pub(crate) bias: Vec<f64>,
    pub(crate) gradient: Vec<f64>,
    pub(crate) weights: Option<Matrix>,
    activation: Activation,
    role: LayerRole,
    next: Option<usize>,
}

impl Layer {
    /// Allocates a layer with zeroed buffers. Input layers get no bias;
    /// every other role draws its biases from `bias_init`.
    pub(crate) fn new<R: Rng>(
        units: usize,
        activation: Activation,
        role: LayerRole,
        bias_init: &BiasInit,
        rng: &mut R,
    ) -> Result<Layer> {
        if units < 1 {
            return Err(NetError::Construction(format!(
                "layer units must be greater than 0, got {units}"
            )));
        }

        let bias = match role {
            LayerRole::Input => Vec::new(),
            LayerRole::Hidden | LayerRole::Output => bias_init.sample(units, rng)?,
        };

        Ok(Layer {
            units,
            values: vec![0.0; units],
            pre_activation: vec![0.0; units],
            bias,
            gradient: vec![0.0; units],
            weights: None,
            activation,
            role,
            next: None,
        })
    }

    /// Links this layer to its successor and allocates the connecting
    /// weights with Glorot-uniform values (fan_in = self.units,
    /// fan_out = next_units).
    pub(crate) fn connect<R: Rng>(&mut self, next: usize, next_units: usize, rng: &mut R) -> Result<()> {
        self.weights = Some(Matrix::glorot_uniform(next_units, self.units, rng)?);
        self.next = Some(next);
        Ok(())
    }

    pub fn units(&self) -> usize {
        self.units
    }

    /// Post-activation outputs from the last forward pass.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Pre-activation `z` values from the last forward pass.
    pub fn pre_activation(&self) -> &[f64] {
        &self.pre_activation
    }

    /// Empty on the input layer.
    pub fn bias(&self) -> &[f64] {
        &self.bias
    }

    pub fn gradient(&self) -> &[f64] {
        &self.gradient
    }

    pub fn weights(&self) -> Option<&Matrix> {
        self.weights.as_ref()
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn role(&self) -> LayerRole {
        self.role
    }

    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// Replaces the outgoing weights. The new matrix must keep the shape
    /// allocated by `connect`.
    pub fn set_weights(&mut self, weights: Matrix) -> Result<()> {
        let current = self.weights.as_ref().ok_or_else(|| {
            NetError::Structural("layer has no outgoing weights to replace".into())
        })?;

        if current.rows() != weights.rows() || current.cols() != weights.cols() {
            return Err(NetError::DimensionMismatch(format!(
                "expected {}x{} weights, got {}x{}",
                current.rows(),
                current.cols(),
                weights.rows(),
                weights.cols()
            )));
        }

        self.weights = Some(weights);
        Ok(())
    }

    pub fn set_bias(&mut self, bias: &[f64]) -> Result<()> {
        if self.role == LayerRole::Input {
            return Err(NetError::Structural("input layer carries no bias".into()));
        }
        if bias.len() != self.units {
            return Err(NetError::DimensionMismatch(format!(
                "expected {} biases, got {}",
                self.units,
                bias.len()
            )));
        }

        self.bias.copy_from_slice(bias);
        Ok(())
    }
}
