use log::{debug, trace};
use rand::Rng;

use crate::activation::Activation;
use crate::error::{check_len, Error, Result};
use crate::math::matrix::Matrix;

/// Feedforward network with exactly one hidden layer, trained online.
///
/// Weight matrices are row-major with one row per receiving unit:
/// `weights_input_hidden` is `hidden_size × input_size` and
/// `weights_hidden_output` is `output_size × hidden_size`.
///
/// Calls on one instance must be serialized; there is no internal locking.
#[derive(Debug, Clone)]
pub struct Network {
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    learning_rate: f64,
    weights_input_hidden: Matrix,
    biases_hidden: Vec<f64>,
    weights_hidden_output: Matrix,
    biases_output: Vec<f64>,
    activation: Activation,
    // Filled by `predict` only, for observers such as the activation viewer.
    last_input: Vec<f64>,
    last_hidden: Vec<f64>,
    last_output: Vec<f64>,
}

impl Network {
    /// Builds a network with every weight and bias drawn from U[-1, 1].
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        learning_rate: f64,
        activation: Activation,
    ) -> Result<Network> {
        Network::with_rng(
            input_size,
            hidden_size,
            output_size,
            learning_rate,
            activation,
            &mut rand::thread_rng(),
        )
    }

    /// Same as [`Network::new`] but draws from the supplied generator.
    pub fn with_rng<R: Rng + ?Sized>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        learning_rate: f64,
        activation: Activation,
        rng: &mut R,
    ) -> Result<Network> {
        validate_config(input_size, hidden_size, output_size, learning_rate)?;
        let network = Network {
            input_size,
            hidden_size,
            output_size,
            learning_rate,
            weights_input_hidden: Matrix::random_uniform(hidden_size, input_size, rng),
            biases_hidden: random_vector(hidden_size, rng),
            weights_hidden_output: Matrix::random_uniform(output_size, hidden_size, rng),
            biases_output: random_vector(output_size, rng),
            activation,
            last_input: Vec::new(),
            last_hidden: Vec::new(),
            last_output: Vec::new(),
        };
        debug!(
            "initialized {}-{}-{} network, learning rate {}",
            input_size, hidden_size, output_size, learning_rate
        );
        Ok(network)
    }

    /// Re-initializes in place, discarding all prior training.
    ///
    /// The arguments are validated first; on error the network is unchanged.
    pub fn initialize(
        &mut self,
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        learning_rate: f64,
        activation: Activation,
    ) -> Result<()> {
        *self = Network::new(input_size, hidden_size, output_size, learning_rate, activation)?;
        Ok(())
    }

    /// Builds a network from explicit parameters instead of random ones.
    ///
    /// Layer sizes are taken from the matrices: `weights_input_hidden` is
    /// `hidden × input`, `weights_hidden_output` is `output × hidden`.
    pub fn from_parameters(
        weights_input_hidden: Matrix,
        biases_hidden: Vec<f64>,
        weights_hidden_output: Matrix,
        biases_output: Vec<f64>,
        learning_rate: f64,
        activation: Activation,
    ) -> Result<Network> {
        let hidden_size = weights_input_hidden.rows();
        let input_size = weights_input_hidden.cols();
        let output_size = weights_hidden_output.rows();
        validate_config(input_size, hidden_size, output_size, learning_rate)?;

        if weights_hidden_output.cols() != hidden_size {
            return Err(Error::InvalidConfig(format!(
                "hidden-to-output weights have {} columns, expected {}",
                weights_hidden_output.cols(),
                hidden_size
            )));
        }
        if biases_hidden.len() != hidden_size {
            return Err(Error::InvalidConfig(format!(
                "{} hidden biases for {} hidden units",
                biases_hidden.len(),
                hidden_size
            )));
        }
        if biases_output.len() != output_size {
            return Err(Error::InvalidConfig(format!(
                "{} output biases for {} output units",
                biases_output.len(),
                output_size
            )));
        }

        Ok(Network {
            input_size,
            hidden_size,
            output_size,
            learning_rate,
            weights_input_hidden,
            biases_hidden,
            weights_hidden_output,
            biases_output,
            activation,
            last_input: Vec::new(),
            last_hidden: Vec::new(),
            last_output: Vec::new(),
        })
    }

    /// Forward pass. Returns the output activations and caches the input,
    /// hidden and output vectors for later inspection.
    pub fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        check_len("input", input, self.input_size)?;
        let (hidden, output) = self.forward(input);
        self.last_input = input.to_vec();
        self.last_hidden = hidden;
        self.last_output = output.clone();
        Ok(output)
    }

    /// One online gradient-descent step toward `target` for `input`.
    ///
    /// Activations are recomputed from `input`; a preceding `predict` is
    /// neither needed nor consulted, and the observation caches are left
    /// alone. Both gradients are derived from the pre-update weights before
    /// any parameter is written.
    pub fn backpropagate(&mut self, input: &[f64], target: &[f64]) -> Result<()> {
        check_len("input", input, self.input_size)?;
        check_len("target", target, self.output_size)?;

        let (hidden, output) = self.forward(input);
        let derivative = self.activation.derivative;

        // δ_out = (y - t) ⊙ f'(y)
        let output_gradients: Vec<f64> = output
            .iter()
            .zip(target)
            .map(|(&y, &t)| (y - t) * derivative(y))
            .collect();

        // δ_hid = (W_hoᵀ · δ_out) ⊙ f'(h), using W_ho before it is updated
        let hidden_gradients: Vec<f64> = (0..self.hidden_size)
            .map(|i| {
                let back: f64 = output_gradients
                    .iter()
                    .enumerate()
                    .map(|(k, g)| g * self.weights_hidden_output.get(k, i))
                    .sum();
                back * derivative(hidden[i])
            })
            .collect();

        let lr = self.learning_rate;
        update_layer(
            &mut self.weights_hidden_output,
            &mut self.biases_output,
            &output_gradients,
            &hidden,
            lr,
        );
        update_layer(
            &mut self.weights_input_hidden,
            &mut self.biases_hidden,
            &hidden_gradients,
            input,
            lr,
        );

        trace!(
            "backpropagate: squared error {:.6}, lr {}",
            output.iter().zip(target).map(|(y, t)| (y - t).powi(2)).sum::<f64>(),
            lr
        );
        Ok(())
    }

    fn forward(&self, input: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let hidden = activate(
            &self.weights_input_hidden,
            &self.biases_hidden,
            input,
            &self.activation,
        );
        let output = activate(
            &self.weights_hidden_output,
            &self.biases_output,
            &hidden,
            &self.activation,
        );
        (hidden, output)
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Replaces the learning rate. Zero freezes learning; non-finite values
    /// are rejected and the previous rate is kept.
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        if !learning_rate.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "learning rate must be finite, got {}",
                learning_rate
            )));
        }
        self.learning_rate = learning_rate;
        Ok(())
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn weights_input_hidden(&self) -> &Matrix {
        &self.weights_input_hidden
    }

    pub fn biases_hidden(&self) -> &[f64] {
        &self.biases_hidden
    }

    pub fn weights_hidden_output(&self) -> &Matrix {
        &self.weights_hidden_output
    }

    pub fn biases_output(&self) -> &[f64] {
        &self.biases_output
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Input of the most recent `predict`; empty before the first call.
    pub fn last_input(&self) -> &[f64] {
        &self.last_input
    }

    pub fn last_hidden_activations(&self) -> &[f64] {
        &self.last_hidden
    }

    pub fn last_output_activations(&self) -> &[f64] {
        &self.last_output
    }
}

fn validate_config(
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    learning_rate: f64,
) -> Result<()> {
    for (name, size) in [("input", input_size), ("hidden", hidden_size), ("output", output_size)] {
        if size == 0 {
            return Err(Error::InvalidConfig(format!("{} layer size must be positive", name)));
        }
    }
    if !learning_rate.is_finite() {
        return Err(Error::InvalidConfig(format!(
            "learning rate must be finite, got {}",
            learning_rate
        )));
    }
    Ok(())
}

fn random_vector<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f64> {
    (0..len).map(|_| rng.gen_range(-1.0..=1.0)).collect()
}

/// `f(W · x + b)` for one layer.
fn activate(weights: &Matrix, biases: &[f64], x: &[f64], activation: &Activation) -> Vec<f64> {
    weights
        .mul_vec(x)
        .into_iter()
        .zip(biases)
        .map(|(z, b)| activation.apply(z + b))
        .collect()
}

/// `W -= lr · δ ⊗ x`, `b -= lr · δ`.
fn update_layer(weights: &mut Matrix, biases: &mut [f64], gradients: &[f64], x: &[f64], lr: f64) {
    for (k, &g) in gradients.iter().enumerate() {
        for (w, &xi) in weights.row_mut(k).iter_mut().zip(x) {
            *w -= lr * g * xi;
        }
        biases[k] -= lr * g;
    }
}
