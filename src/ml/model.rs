use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct AttritionModelConfig {
    /// Width of the encoded feature vector
    pub d_input:  usize,
    pub d_hidden: usize,
}

impl AttritionModelConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> AttritionModel<B> {
        let hidden = LinearConfig::new(self.d_input, self.d_hidden).init(device);
        let head   = LinearConfig::new(self.d_hidden, 2).init(device);
        AttritionModel { hidden, head }
    }
}

/// Two-layer perceptron: encoded features → ReLU hidden layer → two logits
/// (stay, resign).
#[derive(Module, Debug)]
pub struct AttritionModel<B: Backend> {
    pub hidden: Linear<B>,
    pub head:   Linear<B>,
}

impl<B: Backend> AttritionModel<B> {
    /// features: [batch, d_input] → logits: [batch, 2]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = burn::tensor::activation::relu(self.hidden.forward(features));
        self.head.forward(x)
    }

    /// features: [batch, d_input] → probabilities: [batch, 2], rows sum to 1
    pub fn predict_proba(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        burn::tensor::activation::softmax(self.forward(features), 1)
    }

    /// (d_input, d_hidden, d_output) read back from the weight shapes.
    /// Linear weights are stored as [d_in, d_out].
    pub fn dims(&self) -> (usize, usize, usize) {
        let [d_input, d_hidden] = self.hidden.weight.val().dims();
        let [_, d_output]       = self.head.weight.val().dims();
        (d_input, d_hidden, d_output)
    }
}
