use log::debug;
use serde::{Serialize, Deserialize};

use crate::activation::activation::Activation;
use crate::error::{NetError, Result};
use crate::network::config::NetConfig;
use crate::network::network::NeuralNet;

/// One layer of a network specification.
///
/// The activation of the first (input) layer is ignored: input layers are
/// always Identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub units: usize,
    #[serde(default = "default_activation")]
    pub activation: Activation,
}

fn default_activation() -> Activation {
    Activation::Identity
}

/// A serializable description of a network architecture and its
/// hyperparameters.
///
/// Only the architecture is described here; trained weights are never
/// written out. `layers` is ordered input -> output: the first entry becomes
/// the input layer, the last the output layer and everything in between a
/// hidden layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name, used only in log output.
    #[serde(default)]
    pub name: String,
    pub config: NetConfig,
    pub layers: Vec<LayerSpec>,
}

impl NetworkSpec {
    /// Replays the layer list through the `add_*_layer` API.
    pub fn build(&self) -> Result<NeuralNet> {
        let (input, rest) = self
            .layers
            .split_first()
            .ok_or_else(|| NetError::Structural("network spec has no layers".into()))?;
        let (output, hidden) = rest
            .split_last()
            .ok_or_else(|| NetError::Structural("network spec needs an output layer".into()))?;

        let mut net = NeuralNet::from_config(self.config.clone())?;
        net.add_input_layer(input.units)?;
        for layer in hidden {
            net.add_hidden_layer(layer.units, layer.activation)?;
        }
        net.add_output_layer(output.units, output.activation)?;

        debug!("built network '{}' with {} layers", self.name, net.layer_count());
        Ok(net)
    }

    pub fn input_units(&self) -> Option<usize> {
        self.layers.first().map(|l| l.units)
    }

    pub fn output_units(&self) -> Option<usize> {
        self.layers.last().map(|l| l.units)
    }

    pub fn from_json(json: &str) -> Result<NetworkSpec> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
