pub mod dense;

pub use dense::{BiasInit, Layer, LayerRole};
