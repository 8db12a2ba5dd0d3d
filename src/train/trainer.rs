use std::time::Instant;

use log::info;

use crate::error::{NetError, Result};
use crate::network::network::NeuralNet;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// One online pass over the dataset in the given order: a `train` call per
/// sample. Returns the mean loss over the pass.
pub fn train_epoch(
    network: &mut NeuralNet,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64> {
    check_dataset(inputs, targets)?;

    let mut total_loss = 0.0;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        total_loss += network.train(input, target)?;
    }

    Ok(total_loss / inputs.len() as f64)
}

/// Runs `config.epochs` passes of `train_epoch` and returns the statistics
/// of every completed epoch.
pub fn fit(
    network: &mut NeuralNet,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    check_dataset(inputs, targets)?;

    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        let train_loss = train_epoch(network, inputs, targets)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        if config.log_every > 0 && (epoch % config.log_every == 0 || epoch == config.epochs) {
            info!("epoch {epoch}/{}: loss = {train_loss:.6} ({elapsed_ms} ms)", config.epochs);
        }

        history.push(EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            elapsed_ms,
        });
    }

    Ok(history)
}

fn check_dataset(inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
    if inputs.is_empty() {
        return Err(NetError::Construction("training data must not be empty".into()));
    }
    if inputs.len() != targets.len() {
        return Err(NetError::DimensionMismatch(format!(
            "{} inputs but {} targets",
            inputs.len(),
            targets.len()
        )));
    }
    Ok(())
}
