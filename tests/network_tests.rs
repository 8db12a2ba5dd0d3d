use strata_nn::{Activation, LayerRole, LossType, Matrix, NetConfig, NetError, NeuralNet};

fn seeded(lr: f64) -> NeuralNet {
    NeuralNet::from_config(NetConfig::new(lr, LossType::Mse).with_seed(17)).unwrap()
}

fn three_layer(lr: f64) -> NeuralNet {
    let mut net = seeded(lr);
    net.add_input_layer(3).unwrap();
    net.add_hidden_layer(4, Activation::Sigmoid).unwrap();
    net.add_output_layer(2, Activation::Identity).unwrap();
    net
}

#[test]
fn test_chain_shape_and_weight_shapes() {
    let mut net = seeded(0.01);
    net.add_input_layer(3).unwrap();
    net.add_hidden_layer(5, Activation::ReLU).unwrap();
    net.add_hidden_layer(4, Activation::Sigmoid).unwrap();
    net.add_output_layer(2, Activation::Identity).unwrap();

    let roles: Vec<_> = net.layers().iter().map(|l| l.role()).collect();
    assert_eq!(
        roles,
        vec![LayerRole::Input, LayerRole::Hidden, LayerRole::Hidden, LayerRole::Output]
    );

    let shapes: Vec<_> = net
        .layers()
        .iter()
        .map(|l| l.weights().map(|w| (w.rows(), w.cols())))
        .collect();
    assert_eq!(shapes, vec![Some((5, 3)), Some((4, 5)), Some((2, 4)), None]);

    assert_eq!(net.layer(0).unwrap().activation(), Activation::Identity);
    assert!(net.layer(0).unwrap().bias().is_empty());
    assert_eq!(net.layer(3).unwrap().bias().len(), 2);
}

#[test]
fn test_hidden_before_input_is_structural_error() {
    let mut net = seeded(0.01);
    assert!(matches!(
        net.add_hidden_layer(2, Activation::ReLU),
        Err(NetError::Structural(_))
    ));
    assert!(matches!(
        net.add_output_layer(2, Activation::ReLU),
        Err(NetError::Structural(_))
    ));
    assert_eq!(net.layer_count(), 0);
}

#[test]
fn test_duplicate_input_and_output_are_structural_errors() {
    let mut net = three_layer(0.01);
    assert!(matches!(net.add_input_layer(3), Err(NetError::Structural(_))));
    assert!(matches!(
        net.add_output_layer(1, Activation::Identity),
        Err(NetError::Structural(_))
    ));
    assert!(matches!(
        net.add_hidden_layer(1, Activation::Identity),
        Err(NetError::Structural(_))
    ));
    assert_eq!(net.layer_count(), 3);
}

#[test]
fn test_zero_units_is_construction_error() {
    let mut net = seeded(0.01);
    assert!(matches!(net.add_input_layer(0), Err(NetError::Construction(_))));
    net.add_input_layer(1).unwrap();
    assert!(matches!(
        net.add_hidden_layer(0, Activation::ReLU),
        Err(NetError::Construction(_))
    ));
}

#[test]
fn test_invalid_learning_rate_is_rejected() {
    assert!(matches!(NeuralNet::new(0.0, LossType::Mse), Err(NetError::Construction(_))));
    let mut net = seeded(0.01);
    assert!(net.set_learning_rate(-1.0).is_err());
    assert_eq!(net.learning_rate(), 0.01);
}

#[test]
fn test_training_requires_three_layers() {
    let mut net = seeded(0.01);
    net.add_input_layer(2).unwrap();
    net.add_output_layer(1, Activation::Identity).unwrap();

    assert!(matches!(net.train(&[1.0, 2.0], &[1.0]), Err(NetError::Structural(_))));
    assert!(!net.is_trained());
}

#[test]
fn test_training_without_output_layer_is_structural_error() {
    let mut net = seeded(0.01);
    net.add_input_layer(2).unwrap();
    net.add_hidden_layer(2, Activation::ReLU).unwrap();
    net.add_hidden_layer(2, Activation::ReLU).unwrap();

    assert!(matches!(net.train(&[1.0, 2.0], &[1.0, 1.0]), Err(NetError::Structural(_))));
}

#[test]
fn test_train_rejects_wrong_lengths() {
    let mut net = three_layer(0.01);
    assert!(matches!(
        net.train(&[1.0, 2.0], &[1.0, 1.0]),
        Err(NetError::DimensionMismatch(_))
    ));
    assert!(matches!(
        net.train(&[1.0, 2.0, 3.0], &[1.0]),
        Err(NetError::DimensionMismatch(_))
    ));
    assert!(!net.is_trained());
}

#[test]
fn test_predict_before_train_is_untrained_error() {
    let mut net = three_layer(0.01);
    assert!(matches!(net.predict(&[1.0, 2.0, 3.0]), Err(NetError::Untrained)));
}

#[test]
fn test_predict_after_train_returns_detached_copy() {
    let mut net = three_layer(0.01);
    net.train(&[0.1, 0.2, 0.3], &[1.0, -1.0]).unwrap();
    assert!(net.is_trained());

    let mut first = net.predict(&[0.1, 0.2, 0.3]).unwrap();
    assert_eq!(first.len(), 2);
    first[0] = 1e9;

    let second = net.predict(&[0.1, 0.2, 0.3]).unwrap();
    assert_ne!(second[0], 1e9);
    assert_eq!(net.layer(2).unwrap().values(), second.as_slice());

    assert!(matches!(net.predict(&[0.1]), Err(NetError::DimensionMismatch(_))));
}

#[test]
fn test_fixed_weights_forward_pass() {
    let mut net = seeded(0.01);
    net.add_input_layer(2).unwrap();
    net.add_hidden_layer(2, Activation::Identity).unwrap();
    net.add_output_layer(1, Activation::Identity).unwrap();

    net.layer_mut(0).unwrap()
        .set_weights(Matrix::from_rows(&[vec![1.0, 1.0], vec![1.0, 1.0]]).unwrap())
        .unwrap();
    net.layer_mut(1).unwrap().set_bias(&[0.0, 0.0]).unwrap();
    net.layer_mut(1).unwrap()
        .set_weights(Matrix::from_rows(&[vec![1.0, 1.0]]).unwrap())
        .unwrap();
    net.layer_mut(2).unwrap().set_bias(&[0.0]).unwrap();

    // Forward pass only: the loss against the exact answer is zero.
    assert_eq!(net.evaluate(&[1.0, 2.0], &[6.0]).unwrap(), 0.0);
    assert_eq!(net.layer(1).unwrap().pre_activation(), &[3.0, 3.0]);
    assert_eq!(net.layer(1).unwrap().values(), &[3.0, 3.0]);
    assert_eq!(net.layer(2).unwrap().pre_activation(), &[6.0]);
    assert_eq!(net.layer(2).unwrap().values(), &[6.0]);
}

#[test]
fn test_repeated_training_decreases_error() {
    let mut net = three_layer(0.01);
    let x = [0.5, -0.25, 1.0];
    let y = [2.0, -1.0];

    let mut previous = net.evaluate(&x, &y).unwrap();
    for _ in 0..10 {
        net.train(&x, &y).unwrap();
        let current = net.evaluate(&x, &y).unwrap();
        assert!(current < previous, "error went from {previous} to {current}");
        previous = current;
    }
}

#[test]
fn test_train_returns_loss_before_update() {
    let mut net = three_layer(0.01);
    let x = [0.2, 0.4, 0.6];
    let y = [1.0, 0.0];

    let before = net.evaluate(&x, &y).unwrap();
    let reported = net.train(&x, &y).unwrap();
    assert!((before - reported).abs() < 1e-12);
}

#[test]
fn test_relu_hidden_layer_learns_linear_target() {
    let mut net = NeuralNet::from_config(NetConfig::new(0.01, LossType::Mae).with_seed(4)).unwrap();
    net.add_input_layer(2).unwrap();
    net.add_hidden_layer(8, Activation::ReLU).unwrap();
    net.add_output_layer(1, Activation::Identity).unwrap();

    let samples: Vec<([f64; 2], [f64; 1])> = (0..20)
        .map(|i| {
            let a = i as f64 / 20.0;
            let b = 1.0 - a;
            ([a, b], [2.0 * a + b])
        })
        .collect();

    let error = |net: &mut NeuralNet| -> f64 {
        samples.iter().map(|(x, y)| net.evaluate(x, y).unwrap()).sum::<f64>() / samples.len() as f64
    };

    let initial = error(&mut net);
    for _ in 0..200 {
        for (x, y) in &samples {
            net.train(x, y).unwrap();
        }
    }
    assert!(error(&mut net) < initial);
}

#[test]
fn test_layer_mut_cannot_reshape_chain() {
    let mut net = seeded(0.01);
    net.add_input_layer(2).unwrap();
    net.add_hidden_layer(2, Activation::ReLU).unwrap();
    net.add_output_layer(1, Activation::Identity).unwrap();

    let hidden = net.layer_mut(1).unwrap();
    assert!(matches!(
        hidden.set_weights(Matrix::new(5, 2).unwrap()),
        Err(NetError::DimensionMismatch(_))
    ));
    assert!(matches!(hidden.set_bias(&[0.0]), Err(NetError::DimensionMismatch(_))));
    assert!(matches!(
        net.layer_mut(2).unwrap().set_weights(Matrix::new(1, 1).unwrap()),
        Err(NetError::Structural(_))
    ));

    assert_eq!(net.layer(1).unwrap().next(), Some(2));
    assert!(net.train(&[1.0, 2.0], &[1.0]).is_ok());
}
