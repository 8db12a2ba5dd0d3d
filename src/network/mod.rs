pub mod config;
pub mod network;
pub mod spec;

pub use config::NetConfig;
pub use network::NeuralNet;
pub use spec::{NetworkSpec, LayerSpec};
