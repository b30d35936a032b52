//! The burn implementation for backend provision.
//! Since burn Tensors are constrained with const generics, we must macro apply the
//! core operations at every rank the pipeline touches
use super::{Backend, Dense, Flattenable};
use crate::error::{PipelineError, Result};
use burn::prelude::{Backend as BurnBackend, Tensor};
use burn::tensor::activation::relu;
use burn::tensor::module::{conv2d, max_pool2d};
use burn::tensor::ops::ConvOptions;
use burn::tensor::{Distribution, TensorData};

macro_rules! impl_core_tensor_ops {
    ($d:literal) => {
        impl <B> Backend for Tensor<B, $d>
        where B: BurnBackend {
            type Device = B::Device;

            fn from_values(values: Vec<f32>, shape: &[usize], device: &Self::Device) -> Result<Self> {
                let dims: [usize; $d] = shape.try_into().map_err(|_| {
                    PipelineError::Backend(
                        format!("rank {} tensor cannot take shape {:?}", $d, shape)
                    )
                })?;
                let len = dims.iter().product::<usize>();
                if values.len() != len {
                    return Err(PipelineError::Backend(
                        format!("{} values cannot fill shape {:?}", values.len(), shape)
                    ));
                }
                let data = TensorData::new(values, [len]);
                Ok(Tensor::<B, 1>::from_data(data, device).reshape(dims))
            }

            fn shape(&self) -> Vec<usize> {
                self.shape().dims.to_vec()
            }

            fn device(&self) -> Self::Device {
                self.device()
            }

            fn relu(&self) -> Result<Self> {
                Ok(relu(self.clone()))
            }

            fn dropout(&self, keep_probability: f64) -> Result<Self> {
                let uniform = Self::random(
                    self.shape(),
                    Distribution::Uniform(0.0, 1.0),
                    &self.device(),
                );
                let mask = uniform
                    .lower_elem(keep_probability)
                    .float()
                    .mul_scalar(1.0 / keep_probability);
                Ok(self.clone().mul(mask))
            }

            fn to_values(&self) -> Result<Vec<f32>> {
                self.clone()
                    .into_data()
                    .to_vec::<f32>()
                    .map_err(|e| PipelineError::Backend(format!("host readback failed: {e:?}")))
            }
        }
    }
}

impl_core_tensor_ops!(1);
impl_core_tensor_ops!(2);
impl_core_tensor_ops!(4);

impl <B> Flattenable for Tensor<B, 4>
where B: BurnBackend {
    type Flattened = Tensor<B, 2>;
    type Bias = Tensor<B, 1>;

    fn conv2d(&self, weight: &Self, bias: &Self::Bias, padding: usize, stride: usize)
        -> Result<Self> {
        Ok(conv2d(
            self.clone(),
            weight.clone(),
            Some(bias.clone()),
            ConvOptions::new([stride, stride], [padding, padding], [1, 1], 1),
        ))
    }

    fn max_pool2d(&self, window: usize) -> Result<Self> {
        Ok(max_pool2d(
            self.clone(),
            [window, window],
            [window, window],
            [0, 0],
            [1, 1],
        ))
    }

    fn flatten_features(&self) -> Result<Self::Flattened> {
        Ok(self.clone().flatten(1, 3))
    }
}

impl <B> Dense for Tensor<B, 2>
where B: BurnBackend {
    type Bias = Tensor<B, 1>;

    fn linear(&self, weight: &Self, bias: &Self::Bias) -> Result<Self> {
        let projected = self.clone().matmul(weight.clone().transpose());
        Ok(projected + bias.clone().unsqueeze::<2>())
    }
}
