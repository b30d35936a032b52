use crate::backend::{Backend, Dense, Flattenable};
use crate::error::{PipelineError, Result};

use super::init::Sampler;

/// Static description of one convolution stage of the trunk.
///
/// A spec carries everything needed to size the stage's parameters and to
/// predict its output extent; it holds no tensor data itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conv2dSpec {
    /// Stage label used in error reports
    pub name: &'static str,
    /// Channels the stage consumes
    pub in_channels: usize,
    /// Channels the stage emits
    pub out_channels: usize,
    /// Square kernel edge length
    pub kernel: usize,
    /// Zero padding applied to each spatial border
    pub padding: usize,
    /// Step of the kernel in both spatial directions
    pub stride: usize,
    /// Whether a max-pool follows this stage's activation
    pub pooled: bool,
}

impl Conv2dSpec {
    /// Output spatial extent for a given input extent, or `None` when the
    /// stride is zero or the padded input is smaller than the kernel.
    pub fn spatial_out(&self, input: usize) -> Option<usize> {
        if self.stride == 0 {
            return None;
        }
        let padded = input + 2 * self.padding;
        if padded < self.kernel {
            return None;
        }
        Some((padded - self.kernel) / self.stride + 1)
    }
}

/// Output extent of a non-overlapping max-pool, or `None` when the window is
/// zero or the input is smaller than the window.
///
/// The window advances by its own width, so a trailing remainder narrower
/// than the window is discarded.
pub fn pooled_extent(input: usize, window: usize) -> Option<usize> {
    if window == 0 || input < window {
        return None;
    }
    Some((input - window) / window + 1)
}

/// Static description of one fully connected stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearSpec {
    /// Stage label used in error reports
    pub name: &'static str,
    /// Features the stage consumes
    pub in_features: usize,
    /// Features the stage emits
    pub out_features: usize,
}

fn construction_error(stage: &'static str, source: PipelineError) -> PipelineError {
    PipelineError::Configuration {
        stage,
        reason: source.to_string(),
    }
}

/// Parameters of one convolution stage: its [`Conv2dSpec`] plus the weight
/// and bias tensors on the backend's device.
#[derive(Debug, Clone)]
pub(crate) struct Conv2dParams<B: Flattenable> {
    pub(crate) spec: Conv2dSpec,
    pub(crate) weight: B,
    pub(crate) bias: B::Bias,
}

impl<B: Flattenable> Conv2dParams<B> {
    /// Draws `[out_channels, in_channels, kernel, kernel]` weights and
    /// `[out_channels]` biases from the sampler and uploads them.
    pub(crate) fn allocate(
        spec: Conv2dSpec,
        sampler: &mut Sampler,
        device: &B::Device,
    ) -> Result<Self> {
        let fan_in = spec.in_channels * spec.kernel * spec.kernel;
        let weight = B::from_values(
            sampler.weights(fan_in, spec.out_channels * fan_in),
            &[spec.out_channels, spec.in_channels, spec.kernel, spec.kernel],
            device,
        )
        .map_err(|e| construction_error(spec.name, e))?;
        let bias = B::Bias::from_values(
            sampler.biases(fan_in, spec.out_channels),
            &[spec.out_channels],
            device,
        )
        .map_err(|e| construction_error(spec.name, e))?;
        Ok(Self { spec, weight, bias })
    }

    /// Convolves the input with this stage's parameters.
    pub(crate) fn apply(&self, input: &B) -> Result<B> {
        input.conv2d(&self.weight, &self.bias, self.spec.padding, self.spec.stride)
    }
}

/// Parameters of one fully connected stage over flattened activations.
#[derive(Debug, Clone)]
pub(crate) struct LinearParams<B: Flattenable> {
    pub(crate) spec: LinearSpec,
    pub(crate) weight: B::Flattened,
    pub(crate) bias: B::Bias,
}

impl<B: Flattenable> LinearParams<B> {
    /// Draws `[out_features, in_features]` weights and `[out_features]`
    /// biases from the sampler and uploads them.
    pub(crate) fn allocate(
        spec: LinearSpec,
        sampler: &mut Sampler,
        device: &B::Device,
    ) -> Result<Self> {
        let fan_in = spec.in_features;
        let weight = B::Flattened::from_values(
            sampler.weights(fan_in, spec.out_features * fan_in),
            &[spec.out_features, spec.in_features],
            device,
        )
        .map_err(|e| construction_error(spec.name, e))?;
        let bias = B::Bias::from_values(
            sampler.biases(fan_in, spec.out_features),
            &[spec.out_features],
            device,
        )
        .map_err(|e| construction_error(spec.name, e))?;
        Ok(Self { spec, weight, bias })
    }

    /// Applies the affine map `input * weight^T + bias`.
    pub(crate) fn apply(&self, input: &B::Flattened) -> Result<B::Flattened> {
        input.linear(&self.weight, &self.bias)
    }
}
