use super::{Backend, Dense, Flattenable};
use crate::error::{PipelineError, Result};
use candle_core::Tensor;

impl From<candle_core::Error> for PipelineError {
    fn from(value: candle_core::Error) -> Self {
        PipelineError::Backend(value.to_string())
    }
}

impl Backend for Tensor {
    type Device = candle_core::Device;

    fn from_values(values: Vec<f32>, shape: &[usize], device: &Self::Device) -> Result<Self> {
        Ok(Tensor::from_vec(values, shape, device)?)
    }

    fn shape(&self) -> Vec<usize> {
        self.dims().to_vec()
    }

    fn device(&self) -> Self::Device {
        self.device().clone()
    }

    fn relu(&self) -> Result<Self> {
        Ok(self.relu()?)
    }

    fn dropout(&self, keep_probability: f64) -> Result<Self> {
        let uniform = Tensor::rand(0f32, 1f32, self.shape(), self.device())?;
        let mask = uniform
            .lt(keep_probability)?
            .to_dtype(self.dtype())?
            .affine(1.0 / keep_probability, 0.0)?;
        Ok(self.mul(&mask)?)
    }

    fn to_values(&self) -> Result<Vec<f32>> {
        Ok(self.flatten_all()?.to_vec1::<f32>()?)
    }
}

impl Flattenable for Tensor {
    type Flattened = Tensor;
    type Bias = Tensor;

    fn conv2d(&self, weight: &Self, bias: &Self::Bias, padding: usize, stride: usize)
        -> Result<Self> {
        let out_channels = weight.dim(0)?;
        let x = self.conv2d(weight, padding, stride, 1, 1)?;
        let bias = bias.reshape((1, out_channels, 1, 1))?;
        Ok(x.broadcast_add(&bias)?)
    }

    fn max_pool2d(&self, window: usize) -> Result<Self> {
        Ok(self.max_pool2d(window)?)
    }

    fn flatten_features(&self) -> Result<Self::Flattened> {
        Ok(self.flatten_from(1)?)
    }
}

impl Dense for Tensor {
    type Bias = Tensor;

    fn linear(&self, weight: &Self, bias: &Self::Bias) -> Result<Self> {
        Ok(self.matmul(&weight.t()?)?.broadcast_add(bias)?)
    }
}
