pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod data;
pub mod train;

// Convenience re-exports
pub use error::{NetError, Result};
pub use math::matrix::Matrix;
pub use math::vector::dot;
pub use activation::activation::Activation;
pub use layers::dense::{BiasInit, Layer, LayerRole};
pub use network::{NetConfig, NetworkSpec, LayerSpec, NeuralNet};
pub use loss::loss_type::LossType;
pub use data::{DataTable, TableReader};
pub use train::{fit, train_epoch, EpochStats, TrainConfig};
