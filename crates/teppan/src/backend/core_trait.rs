use std::fmt::{Debug, Display};

use crate::error::Result;

/// The backend trait that must be fulfilled by any tensor type the pipeline runs on
pub trait Backend: Debug + Display + Clone + Send + Sync + 'static {
    /// Device handle used to place newly constructed tensors
    type Device: Clone + Debug + Send + Sync;

    /// Construct a tensor of the given `shape` from row-major host `values`
    fn from_values(values: Vec<f32>, shape: &[usize], device: &Self::Device) -> Result<Self>;

    /// Return the shape of this tensor
    fn shape(&self) -> Vec<usize>;

    /// Return the device this tensor lives on
    fn device(&self) -> Self::Device;

    /// Element-wise `max(x, 0)`
    fn relu(&self) -> Result<Self>;

    /// Zero each element independently with probability `1 - keep_probability`
    /// and scale the survivors by `1 / keep_probability`
    fn dropout(&self, keep_probability: f64) -> Result<Self>;

    /// Read the tensor back to the host in row-major order
    fn to_values(&self) -> Result<Vec<f32>>;
}

/// The trait fulfilled by rank-4 feature maps `(batch, channel, height, width)`
/// that can collapse into feature matrices
pub trait Flattenable: Backend {
    /// the rank-2 type we flatten to
    type Flattened: Dense<Device = Self::Device, Bias = Self::Bias>;

    /// the rank-1 type carrying per-channel biases
    type Bias: Backend<Device = Self::Device>;

    /// 2d convolution with `weight` of shape `(out, in, k, k)`, adding `bias`
    /// per output channel
    fn conv2d(&self, weight: &Self, bias: &Self::Bias, padding: usize, stride: usize)
        -> Result<Self>;

    /// Max-pool over square `window` blocks with stride equal to the window,
    /// dropping any remainder that does not fill a block
    fn max_pool2d(&self, window: usize) -> Result<Self>;

    /// Collapse every dimension after the batch dimension into a single
    /// feature axis
    fn flatten_features(&self) -> Result<Self::Flattened>;
}

/// The trait fulfilled by rank-2 feature matrices `(batch, features)` flowing
/// through fully-connected stages
pub trait Dense: Backend {
    /// the rank-1 type carrying per-feature biases
    type Bias: Backend<Device = Self::Device>;

    /// Affine projection `self @ weight^T + bias`, with `weight` of shape
    /// `(out_features, in_features)`
    fn linear(&self, weight: &Self, bias: &Self::Bias) -> Result<Self>;
}
