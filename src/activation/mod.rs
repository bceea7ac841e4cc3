pub mod activation;

pub use activation::{sigmoid, sigmoid_derivative, Activation, ActivationFunction};
