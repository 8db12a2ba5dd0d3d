// Thin command-line wrapper; all network logic lives in the library.
// Run the XOR demo with:
//   cargo run --example xor
use std::process;

use log::{error, info};
use strata_nn::{fit, NetError, NetworkSpec, TableReader, TrainConfig};

const DEFAULT_EPOCHS: usize = 100;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("usage: strata-nn <spec.json> <data.csv> [epochs]");
        process::exit(2);
    }

    if let Err(e) = run(&args[0], &args[1], args.get(2).map(String::as_str)) {
        error!("{e}");
        process::exit(1);
    }
}

/// Trains the network described by `spec_path` on every row of `data_path`.
/// The first `input units` columns are features, the rest are targets.
fn run(spec_path: &str, data_path: &str, epochs: Option<&str>) -> Result<(), NetError> {
    let epochs = match epochs {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|e| NetError::Construction(format!("invalid epoch count '{raw}': {e}")))?,
        None => DEFAULT_EPOCHS,
    };

    let spec = NetworkSpec::load_json(spec_path)?;
    let mut network = spec.build()?;
    let feature_cols = spec
        .input_units()
        .ok_or_else(|| NetError::Structural("network spec has no layers".into()))?;

    let table = TableReader::new(true, b',').read_path(data_path)?;
    let mut inputs = Vec::with_capacity(table.rows());
    let mut targets = Vec::with_capacity(table.rows());
    for row in 0..table.rows() {
        let (x, y) = table.split_row(row, feature_cols)?;
        inputs.push(x);
        targets.push(y);
    }

    let config = TrainConfig::new(epochs).with_log_every((epochs / 10).max(1));
    let history = fit(&mut network, &inputs, &targets, &config)?;

    if let Some(last) = history.last() {
        info!("trained '{}' for {} epochs: final loss = {:.6}", spec.name, last.epoch, last.train_loss);
    }
    Ok(())
}
