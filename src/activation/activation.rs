use serde::{Deserialize, Serialize};

/// Built-in activations selectable from a config file.
///
/// Every derivative here takes the activation's **output** `y = f(x)`, not
/// its input. That is the calling convention the network uses during
/// backpropagation, and all four functions can express `f'` through `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
    Tanh,
    #[serde(rename = "relu")]
    ReLU,
    Identity,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => relu(x),
            ActivationFunction::Identity => x,
        }
    }

    /// Derivative evaluated on the output `y`.
    pub fn derivative(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid_derivative(y),
            ActivationFunction::Tanh => tanh_derivative(y),
            ActivationFunction::ReLU => relu_derivative(y),
            ActivationFunction::Identity => 1.0,
        }
    }

    /// The `(function, derivative)` pair the network stores.
    pub fn pair(&self) -> Activation {
        match self {
            ActivationFunction::Sigmoid => Activation::new(sigmoid, sigmoid_derivative),
            ActivationFunction::Tanh => Activation::new(f64::tanh, tanh_derivative),
            ActivationFunction::ReLU => Activation::new(relu, relu_derivative),
            ActivationFunction::Identity => Activation::new(identity, one),
        }
    }
}

/// A scalar nonlinearity paired with its derivative.
///
/// `derivative` receives the value `function` produced. Supplying a
/// derivative written in terms of the input (for example `1 - tanh(x)^2`
/// instead of `1 - y^2`) does not fail; it silently yields wrong gradients.
#[derive(Debug, Clone, Copy)]
pub struct Activation {
    pub function: fn(f64) -> f64,
    pub derivative: fn(f64) -> f64,
}

impl Activation {
    pub fn new(function: fn(f64) -> f64, derivative: fn(f64) -> f64) -> Activation {
        Activation { function, derivative }
    }

    pub fn sigmoid() -> Activation {
        ActivationFunction::Sigmoid.pair()
    }

    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        (self.function)(x)
    }

    #[inline]
    pub fn derivative_at_output(&self, y: f64) -> f64 {
        (self.derivative)(y)
    }
}

impl From<ActivationFunction> for Activation {
    fn from(kind: ActivationFunction) -> Self {
        kind.pair()
    }
}

/// Logistic sigmoid. Saturates to 0 or 1 for large |x|.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}

fn tanh_derivative(y: f64) -> f64 {
    1.0 - y * y
}

fn relu(x: f64) -> f64 {
    if x > 0.0 { x } else { 0.0 }
}

fn relu_derivative(y: f64) -> f64 {
    if y > 0.0 { 1.0 } else { 0.0 }
}

fn identity(x: f64) -> f64 {
    x
}

fn one(_: f64) -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ALL: [ActivationFunction; 4] = [
        ActivationFunction::Sigmoid,
        ActivationFunction::Tanh,
        ActivationFunction::ReLU,
        ActivationFunction::Identity,
    ];

    #[test]
    fn output_derivative_matches_finite_difference() {
        let h = 1e-6;
        for kind in ALL {
            for &x in &[-1.3, -0.4, 0.25, 0.7, 2.0] {
                let y = kind.function(x);
                let numeric = (kind.function(x + h) - kind.function(x - h)) / (2.0 * h);
                assert_abs_diff_eq!(kind.derivative(y), numeric, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn pair_agrees_with_enum() {
        for kind in ALL {
            let pair = kind.pair();
            for &x in &[-0.9, 0.0, 0.6] {
                assert_eq!(pair.apply(x), kind.function(x));
                let y = pair.apply(x);
                assert_eq!(pair.derivative_at_output(y), kind.derivative(y));
            }
        }
    }

    #[test]
    fn sigmoid_saturates_without_overflow() {
        assert_abs_diff_eq!(sigmoid(1000.0), 1.0);
        assert_abs_diff_eq!(sigmoid(-1000.0), 0.0);
        assert_abs_diff_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn config_names() {
        let kind: ActivationFunction = serde_json::from_str("\"relu\"").unwrap();
        assert_eq!(kind, ActivationFunction::ReLU);
        assert_eq!(serde_json::to_string(&ActivationFunction::Tanh).unwrap(), "\"tanh\"");
    }
}
