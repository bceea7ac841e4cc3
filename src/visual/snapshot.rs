use serde::Serialize;

use crate::network::network::Network;

/// Copy of the activations cached by the network's last `predict`, as read
/// by the viewer after each tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivationSnapshot {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub input: Vec<f64>,
    pub hidden: Vec<f64>,
    pub output: Vec<f64>,
}

impl ActivationSnapshot {
    pub fn capture(network: &Network) -> ActivationSnapshot {
        ActivationSnapshot {
            input_size: network.input_size(),
            hidden_size: network.hidden_size(),
            output_size: network.output_size(),
            input: network.last_input().to_vec(),
            hidden: network.last_hidden_activations().to_vec(),
            output: network.last_output_activations().to_vec(),
        }
    }

    /// True until the network has run its first `predict`.
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Per-layer RGB colours, each layer normalized by its own maximum.
    pub fn colors(&self) -> [Vec<[u8; 3]>; 3] {
        let paint = |values: &[f64]| -> Vec<[u8; 3]> {
            normalize_by_max(values).into_iter().map(neuron_color).collect()
        };
        [paint(&self.input), paint(&self.hidden), paint(&self.output)]
    }
}

/// Divides every value by the largest one.
///
/// Values are returned as-is when the maximum is not a positive finite
/// number, since dividing would flip signs or produce NaN.
pub fn normalize_by_max(values: &[f64]) -> Vec<f64> {
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max > 0.0 && max.is_finite() {
        values.iter().map(|v| v / max).collect()
    } else {
        values.to_vec()
    }
}

/// Linear blend from red (t = 0) to blue (t = 1); `t` is clamped to [0, 1].
pub fn neuron_color(t: f64) -> [u8; 3] {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let red = ((1.0 - t) * 255.0).round() as u8;
    let blue = (t * 255.0).round() as u8;
    [red, 0, blue]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Activation;
    use approx::assert_relative_eq;

    #[test]
    fn capture_before_and_after_predict() {
        let mut net = Network::new(2, 3, 2, 0.5, Activation::sigmoid()).unwrap();
        let empty = ActivationSnapshot::capture(&net);
        assert!(empty.is_empty());
        assert_eq!(empty.hidden_size, 3);

        let out = net.predict(&[0.3, 0.4]).unwrap();
        let snap = ActivationSnapshot::capture(&net);
        assert_eq!(snap.input, vec![0.3, 0.4]);
        assert_eq!(snap.hidden.len(), 3);
        assert_eq!(snap.output, out);
    }

    #[test]
    fn normalization_divides_by_maximum() {
        let n = normalize_by_max(&[0.2, 0.5, 0.25]);
        assert_relative_eq!(n[0], 0.4);
        assert_relative_eq!(n[1], 1.0);
        assert_relative_eq!(n[2], 0.5);
    }

    #[test]
    fn normalization_edge_cases() {
        assert!(normalize_by_max(&[]).is_empty());
        assert_eq!(normalize_by_max(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert_eq!(normalize_by_max(&[-1.0, -2.0]), vec![-1.0, -2.0]);
    }

    #[test]
    fn colour_endpoints_and_clamping() {
        assert_eq!(neuron_color(0.0), [255, 0, 0]);
        assert_eq!(neuron_color(1.0), [0, 0, 255]);
        assert_eq!(neuron_color(0.5), [128, 0, 128]);
        assert_eq!(neuron_color(-3.0), [255, 0, 0]);
        assert_eq!(neuron_color(7.0), [0, 0, 255]);
    }

    #[test]
    fn colors_per_layer() {
        let snap = ActivationSnapshot {
            input_size: 2,
            hidden_size: 1,
            output_size: 1,
            input: vec![0.5, 1.0],
            hidden: vec![0.3],
            output: vec![0.9],
        };
        let [input, hidden, output] = snap.colors();
        assert_eq!(input, vec![[128, 0, 128], [0, 0, 255]]);
        assert_eq!(hidden, vec![[0, 0, 255]]);
        assert_eq!(output.len(), 1);
    }
}
