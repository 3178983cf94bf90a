//! CNN architecture for produce freshness classification
//!
//! A frozen convolutional backbone with a classification head whose final
//! linear layer is sized to the label set. The architecture must match the
//! one used to produce the persisted weight record; only the head width
//! varies between the coarse and fine-grained variants.
//!
//! Inference runs on a non-autodiff backend, so a forward pass tracks no
//! gradients and mutates no parameters. `forward` takes `&self` and is safe
//! to call concurrently from multiple requests.

use burn::{
    config::Config,
    module::Module,
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig, MaxPool2d, MaxPool2dConfig},
        BatchNorm, BatchNormConfig, Linear, LinearConfig, PaddingConfig2d, Relu,
    },
    tensor::{backend::Backend, Tensor},
};

/// Configuration for the freshness classifier
#[derive(Config, Debug)]
pub struct FreshnessClassifierConfig {
    /// Number of output classes (2 coarse, 6 fine-grained)
    #[config(default = "6")]
    pub num_classes: usize,

    /// Input image size (square images)
    #[config(default = "224")]
    pub input_size: usize,

    /// Number of input channels (3 for RGB)
    #[config(default = "3")]
    pub in_channels: usize,

    /// Base number of convolutional filters
    #[config(default = "32")]
    pub base_filters: usize,
}

impl FreshnessClassifierConfig {
    /// Expected input tensor shape [batch, channels, height, width]
    pub fn expected_input_shape(&self) -> [usize; 4] {
        [1, self.in_channels, self.input_size, self.input_size]
    }
}

/// A backbone stage: Conv2d, BatchNorm, ReLU, MaxPool
#[derive(Module, Debug)]
pub struct ConvStage<B: Backend> {
    conv: Conv2d<B>,
    bn: BatchNorm<B, 2>,
    relu: Relu,
    pool: MaxPool2d,
}

impl<B: Backend> ConvStage<B> {
    fn new(in_channels: usize, out_channels: usize, device: &B::Device) -> Self {
        let conv = Conv2dConfig::new([in_channels, out_channels], [3, 3])
            .with_padding(PaddingConfig2d::Same)
            .init(device);
        let bn = BatchNormConfig::new(out_channels).init(device);
        let pool = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();

        Self {
            conv,
            bn,
            relu: Relu::new(),
            pool,
        }
    }

    fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.conv.forward(x);
        let x = self.bn.forward(x);
        let x = self.relu.forward(x);
        self.pool.forward(x)
    }
}

/// Produce freshness classifier
///
/// Architecture:
/// - 4 convolutional stages with doubling filter counts
/// - Global average pooling
/// - A single linear head sized to the label set
#[derive(Module, Debug)]
pub struct FreshnessClassifier<B: Backend> {
    stage1: ConvStage<B>,
    stage2: ConvStage<B>,
    stage3: ConvStage<B>,
    stage4: ConvStage<B>,
    global_pool: AdaptiveAvgPool2d,
    head: Linear<B>,
    num_classes: usize,
}

impl<B: Backend> FreshnessClassifier<B> {
    /// Create a new classifier with randomly initialized parameters.
    ///
    /// Real deployments overwrite these with a persisted weight record; see
    /// [`crate::model::loader::load_classifier`].
    pub fn new(config: &FreshnessClassifierConfig, device: &B::Device) -> Self {
        let base = config.base_filters;

        // 3 -> 32 -> 64 -> 128 -> 256 channels, spatial 224 -> 14
        let stage1 = ConvStage::new(config.in_channels, base, device);
        let stage2 = ConvStage::new(base, base * 2, device);
        let stage3 = ConvStage::new(base * 2, base * 4, device);
        let stage4 = ConvStage::new(base * 4, base * 8, device);

        let global_pool = AdaptiveAvgPool2dConfig::new([1, 1]).init();
        let head = LinearConfig::new(base * 8, config.num_classes).init(device);

        Self {
            stage1,
            stage2,
            stage3,
            stage4,
            global_pool,
            head,
            num_classes: config.num_classes,
        }
    }

    /// Single forward evaluation: input tensor to unnormalized scores.
    ///
    /// # Arguments
    /// * `x` - Input tensor of shape [batch_size, 3, height, width]
    ///
    /// # Returns
    /// * Logits tensor of shape [batch_size, num_classes]
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.stage1.forward(x);
        let x = self.stage2.forward(x);
        let x = self.stage3.forward(x);
        let x = self.stage4.forward(x);

        // [B, C, H, W] -> [B, C, 1, 1] -> [B, C]
        let x = self.global_pool.forward(x);
        let [batch_size, channels, _, _] = x.dims();
        let x = x.reshape([batch_size, channels]);

        self.head.forward(x)
    }

    /// Number of output classes
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{default_device, DefaultBackend};

    #[test]
    fn test_forward_logit_shape() {
        let device = default_device();
        let config = FreshnessClassifierConfig::new();
        let model = FreshnessClassifier::<DefaultBackend>::new(&config, &device);

        let input = Tensor::<DefaultBackend, 4>::zeros([1, 3, 224, 224], &device);
        let logits = model.forward(input);

        assert_eq!(logits.dims(), [1, 6]);
    }

    #[test]
    fn test_head_resized_to_label_set() {
        let device = default_device();
        let config = FreshnessClassifierConfig::new().with_num_classes(2);
        let model = FreshnessClassifier::<DefaultBackend>::new(&config, &device);

        assert_eq!(model.num_classes(), 2);

        let input = Tensor::<DefaultBackend, 4>::zeros([1, 3, 224, 224], &device);
        assert_eq!(model.forward(input).dims(), [1, 2]);
    }

    #[test]
    fn test_expected_input_shape() {
        let config = FreshnessClassifierConfig::new();
        assert_eq!(config.expected_input_shape(), [1, 3, 224, 224]);
    }
}
