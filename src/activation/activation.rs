use serde::{Serialize, Deserialize};

/// Per-unit nonlinearity paired with its derivative.
///
/// Both `function()` and `derivative()` take the pre-activation value `z`;
/// the backward pass never feeds an already-activated output into
/// `derivative()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    Identity,
    /// Identity rounded to the nearest integer on the way out. The derivative
    /// is still 1 so gradients pass straight through the rounding.
    IdentityRounded,
    ReLU,
    Sigmoid,
}

impl Activation {
    pub fn function(&self, z: f64) -> f64 {
        match self {
            Activation::Identity => z,
            Activation::IdentityRounded => z.round(),
            Activation::ReLU => if z > 0.0 { z } else { 0.0 },
            Activation::Sigmoid => sigmoid(z),
        }
    }

    pub fn derivative(&self, z: f64) -> f64 {
        match self {
            Activation::Identity | Activation::IdentityRounded => 1.0,
            Activation::ReLU => if z > 0.0 { 1.0 } else { 0.0 },
            Activation::Sigmoid => {
                let s = sigmoid(z);
                s * (1.0 - s)
            }
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn identity_pair() {
        assert_eq!(Activation::Identity.function(-3.25), -3.25);
        assert_eq!(Activation::Identity.derivative(-3.25), 1.0);
    }

    #[test]
    fn identity_rounded_pair() {
        assert_eq!(Activation::IdentityRounded.function(2.4), 2.0);
        assert_eq!(Activation::IdentityRounded.function(2.6), 3.0);
        assert_eq!(Activation::IdentityRounded.derivative(2.6), 1.0);
    }

    #[test]
    fn relu_pair() {
        assert_eq!(Activation::ReLU.function(-1.0), 0.0);
        assert_eq!(Activation::ReLU.function(1.5), 1.5);
        assert_eq!(Activation::ReLU.derivative(-1.0), 0.0);
        assert_eq!(Activation::ReLU.derivative(0.0), 0.0);
        assert_eq!(Activation::ReLU.derivative(0.1), 1.0);
    }

    #[test]
    fn sigmoid_pair() {
        assert!((Activation::Sigmoid.function(0.0) - 0.5).abs() < EPS);
        assert!((Activation::Sigmoid.derivative(0.0) - 0.25).abs() < EPS);

        let z = 1.3;
        let s = Activation::Sigmoid.function(z);
        assert!((Activation::Sigmoid.derivative(z) - s * (1.0 - s)).abs() < EPS);
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let h = 1e-6;
        for act in [Activation::Identity, Activation::ReLU, Activation::Sigmoid] {
            for &z in &[-2.0, -0.5, 0.7, 3.0] {
                let numeric = (act.function(z + h) - act.function(z - h)) / (2.0 * h);
                assert!((numeric - act.derivative(z)).abs() < 1e-6, "{act:?} at {z}");
            }
        }
    }
}
