use strata_nn::{fit, Activation, LossType, NetConfig, NeuralNet, TrainConfig};

fn main() -> strata_nn::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = NetConfig::new(0.1, LossType::Mse).with_seed(2024);
    let mut network = NeuralNet::from_config(config)?;
    network.add_input_layer(2)?;
    network.add_hidden_layer(4, Activation::Sigmoid)?;
    network.add_output_layer(1, Activation::Sigmoid)?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    let epochs = 10000;
    fit(&mut network, &inputs, &expected_outputs, &TrainConfig::new(epochs).with_log_every(1000))?;

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.predict(input)?[0]);
    }

    Ok(())
}
