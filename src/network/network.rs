use log::{debug, trace};
use rand::rngs::StdRng;

use crate::activation::activation::Activation;
use crate::error::{NetError, Result};
use crate::layers::dense::{BiasInit, Layer, LayerRole};
use crate::loss::loss_type::LossType;
use crate::math::vector::dot;
use crate::network::config::{validate_learning_rate, NetConfig};

const MISSING_WEIGHTS: &str = "every layer before the output layer owns outgoing weights";

/// A single chain Input -> Hidden* -> Output trained by per-sample SGD.
///
/// The network owns its layers; each layer owns its buffers and the weights
/// towards its successor. `train` and `predict` both overwrite the per-layer
/// buffers in place, so a network must not be driven from two places at once.
#[derive(Debug)]
pub struct NeuralNet {
    layers: Vec<Layer>,
    learning_rate: f64,
    loss: LossType,
    bias_init: BiasInit,
    rng: StdRng,
    trained: bool,
}

impl NeuralNet {
    /// Empty network with default initialization and an entropy-seeded generator.
    pub fn new(learning_rate: f64, loss: LossType) -> Result<NeuralNet> {
        NeuralNet::from_config(NetConfig::new(learning_rate, loss))
    }

    pub fn from_config(config: NetConfig) -> Result<NeuralNet> {
        let rng = config.rng();
        NeuralNet::with_rng(config, rng)
    }

    /// Uses `rng` for every weight and bias draw, ignoring `config.seed`.
    pub fn with_rng(config: NetConfig, rng: StdRng) -> Result<NeuralNet> {
        config.validate()?;

        Ok(NeuralNet {
            layers: Vec::new(),
            learning_rate: config.learning_rate,
            loss: config.loss,
            bias_init: config.bias_init,
            rng,
            trained: false,
        })
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Appends the input layer. Must be the first layer added.
    pub fn add_input_layer(&mut self, units: usize) -> Result<()> {
        if !self.layers.is_empty() {
            return Err(NetError::Structural("only the first layer can be an input layer".into()));
        }

        self.add_layer(units, Activation::Identity, LayerRole::Input)
    }

    pub fn add_hidden_layer(&mut self, units: usize, activation: Activation) -> Result<()> {
        self.check_appendable()?;
        self.add_layer(units, activation, LayerRole::Hidden)
    }

    pub fn add_output_layer(&mut self, units: usize, activation: Activation) -> Result<()> {
        self.check_appendable()?;
        self.add_layer(units, activation, LayerRole::Output)
    }

    fn check_appendable(&self) -> Result<()> {
        match (self.layers.first(), self.layers.last()) {
            (Some(first), _) if first.role() != LayerRole::Input => {
                Err(NetError::Structural("first layer must be an input layer".into()))
            }
            (None, _) => Err(NetError::Structural("first layer must be an input layer".into())),
            (_, Some(last)) if last.role() == LayerRole::Output => {
                Err(NetError::Structural("output layer already exists".into()))
            }
            _ => Ok(()),
        }
    }

    /// Builds the layer and, if it has a predecessor, connects the two.
    /// The connection is the only place weight matrices are created.
    fn add_layer(&mut self, units: usize, activation: Activation, role: LayerRole) -> Result<()> {
        let layer = Layer::new(units, activation, role, &self.bias_init, &mut self.rng)?;
        let index = self.layers.len();

        if let Some(prev) = self.layers.last_mut() {
            prev.connect(index, units, &mut self.rng)?;
            debug!("connected layer {} ({} units) -> layer {index} ({units} units)", index - 1, prev.units());
        }

        debug!("added {role:?} layer {index}: {units} units, {activation:?}");
        self.layers.push(layer);
        Ok(())
    }

    // ── Operation ─────────────────────────────────────────────────────────

    /// One online SGD step: a forward pass on `x` followed by a backward pass
    /// against `y`. Returns the loss of the forward pass, measured before the
    /// weights were updated.
    pub fn train(&mut self, x: &[f64], y: &[f64]) -> Result<f64> {
        self.check_trainable()?;
        self.check_lengths(x, y)?;

        self.forward(x)?;
        let loss = self.loss.mean(y, self.output_layer().values());
        self.backward(y)?;

        self.trained = true;
        debug!("train step: loss = {loss:.6}");
        Ok(loss)
    }

    /// Forward pass only; returns a copy of the output layer's values.
    pub fn predict(&mut self, x: &[f64]) -> Result<Vec<f64>> {
        if !self.trained {
            return Err(NetError::Untrained);
        }

        self.check_input(x)?;
        self.forward(x)?;
        Ok(self.output_layer().values().to_vec())
    }

    /// Loss of the current weights on one sample. Leaves the weights and the
    /// trained flag untouched.
    pub fn evaluate(&mut self, x: &[f64], y: &[f64]) -> Result<f64> {
        self.check_trainable()?;
        self.check_lengths(x, y)?;

        self.forward(x)?;
        Ok(self.loss.mean(y, self.output_layer().values()))
    }

    fn check_trainable(&self) -> Result<()> {
        let n = self.layers.len();
        let shaped = n >= 3
            && self.layers[0].role() == LayerRole::Input
            && self.layers[n - 1].role() == LayerRole::Output;

        if shaped {
            Ok(())
        } else {
            Err(NetError::Structural(
                "training requires 1 input layer, n hidden layers, and 1 output layer".into(),
            ))
        }
    }

    fn check_input(&self, x: &[f64]) -> Result<()> {
        let inputs = self.layers[0].units();
        if x.len() != inputs {
            return Err(NetError::DimensionMismatch(format!(
                "expected {inputs} x length, got {}",
                x.len()
            )));
        }
        Ok(())
    }

    fn check_lengths(&self, x: &[f64], y: &[f64]) -> Result<()> {
        self.check_input(x)?;

        let outputs = self.output_layer().units();
        if y.len() != outputs {
            return Err(NetError::DimensionMismatch(format!(
                "expected {outputs} y length, got {}",
                y.len()
            )));
        }

        Ok(())
    }

    /// Writes `x` into the input layer and propagates it through the chain,
    /// storing `z` and `f(z)` for every unit of every later layer. Callers
    /// have already checked `x` against the input width.
    fn forward(&mut self, x: &[f64]) -> Result<()> {
        let input = self
            .layers
            .first_mut()
            .ok_or_else(|| NetError::Structural("network has no layers".into()))?;
        input.values.copy_from_slice(x);

        for i in 0..self.layers.len() - 1 {
            let (head, tail) = self.layers.split_at_mut(i + 1);
            let current = &head[i];
            let next = &mut tail[0];
            let weights = current.weights.as_ref().expect(MISSING_WEIGHTS);

            for unit in 0..next.units() {
                let z = dot(&current.values, &weights.row_slice(unit)?)? + next.bias[unit];
                next.pre_activation[unit] = z;
                next.values[unit] = next.activation().function(z);
            }

            trace!("layer {}: values = {:?}", i + 1, next.values);
        }

        Ok(())
    }

    /// Walks the chain output-to-input. Each layer's gradient is complete
    /// before the shallower layer reads it, and the weights feeding a layer
    /// are updated as soon as that layer's gradient is known.
    fn backward(&mut self, y: &[f64]) -> Result<()> {
        let lr = self.learning_rate;

        for i in (1..self.layers.len()).rev() {
            let gradient = self.layer_gradient(i, y)?;

            let (head, tail) = self.layers.split_at_mut(i);
            let prev = &mut head[i - 1];
            let current = &mut tail[0];
            let weights = prev.weights.as_mut().expect(MISSING_WEIGHTS);

            for (j, &g) in gradient.iter().enumerate() {
                for (k, &input) in prev.values.iter().enumerate() {
                    let w = weights.at(j, k)?;
                    weights.set(j, k, w - lr * g * input)?;
                }
                current.bias[j] -= lr * g;
            }

            current.gradient = gradient;
        }

        Ok(())
    }

    /// `delta ⊙ f'(z)` for layer `i`.
    ///
    /// On the output layer `delta = values - y`. On a hidden layer the
    /// successor's gradient is pulled back through the weights connecting
    /// this layer to it (owned here, shaped next.units x units), so
    /// `delta[j] = Σ_k next.gradient[k] * weights.at(k, j)`.
    fn layer_gradient(&self, i: usize, y: &[f64]) -> Result<Vec<f64>> {
        let current = &self.layers[i];

        let delta: Vec<f64> = if current.role() == LayerRole::Output {
            current.values.iter().zip(y).map(|(v, t)| v - t).collect()
        } else {
            let next = &self.layers[current.next().expect("hidden layer is linked to its successor")];
            let weights = current.weights.as_ref().expect(MISSING_WEIGHTS);
            (0..current.units())
                .map(|j| dot(&next.gradient, &weights.col_slice(j)?))
                .collect::<Result<_>>()?
        };

        let activation = current.activation();
        Ok(delta
            .iter()
            .zip(current.pre_activation.iter())
            .map(|(d, &z)| d * activation.derivative(z))
            .collect())
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Mutable access for seeding known weights and biases; the layer's
    /// own setters keep its shapes intact. Linking layers stays with the
    /// network:
    ///
    /// ```compile_fail
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use strata_nn::{Activation, LossType, NeuralNet};
    ///
    /// let mut net = NeuralNet::new(0.1, LossType::Mse).unwrap();
    /// net.add_input_layer(2).unwrap();
    /// net.add_hidden_layer(2, Activation::ReLU).unwrap();
    /// net.add_output_layer(1, Activation::Identity).unwrap();
    /// net.layer_mut(1).unwrap().connect(5, 1, &mut StdRng::seed_from_u64(0)).unwrap();
    /// ```
    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        validate_learning_rate(learning_rate)?;
        self.learning_rate = learning_rate;
        Ok(())
    }

    pub fn loss_type(&self) -> LossType {
        self.loss
    }

    fn output_layer(&self) -> &Layer {
        self.layers.last().expect("network has an output layer")
    }
}
