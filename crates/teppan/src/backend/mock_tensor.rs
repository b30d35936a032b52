use std::fmt;

use rand::Rng;

use crate::backend::{Backend, Dense, Flattenable};
use crate::error::{PipelineError, Result};

// A host-memory mock tensor with naive reference kernels, so tests can pin
// numeric behavior without enabling a backend feature
#[derive(Clone, Debug, PartialEq)]
pub struct MockTensor {
    pub(crate) shape: Vec<usize>,
    pub(crate) values: Vec<f32>,
}

// Placeholder device for the mock backend
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MockDevice;

impl MockTensor {
    pub fn new(values: Vec<f32>, shape: &[usize]) -> Self {
        assert_eq!(
            values.len(),
            shape.iter().product::<usize>(),
            "value count must fill the shape exactly"
        );
        Self {
            shape: shape.to_vec(),
            values,
        }
    }

    pub fn filled(shape: &[usize], value: f32) -> Self {
        Self::new(vec![value; shape.iter().product()], shape)
    }
}

impl fmt::Display for MockTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MockTensor({:?})", self.shape)
    }
}

impl Backend for MockTensor {
    type Device = MockDevice;

    fn from_values(values: Vec<f32>, shape: &[usize], _device: &Self::Device) -> Result<Self> {
        if values.len() != shape.iter().product::<usize>() {
            return Err(PipelineError::Backend(format!(
                "{} values cannot fill shape {:?}",
                values.len(),
                shape
            )));
        }
        Ok(Self::new(values, shape))
    }

    fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn device(&self) -> Self::Device {
        MockDevice
    }

    fn relu(&self) -> Result<Self> {
        let values = self.values.iter().map(|v| v.max(0.0)).collect();
        Ok(Self::new(values, &self.shape))
    }

    fn dropout(&self, keep_probability: f64) -> Result<Self> {
        let mut rng = rand::thread_rng();
        let values = self
            .values
            .iter()
            .map(|v| {
                if rng.gen_range(0.0..1.0) < keep_probability {
                    v / keep_probability as f32
                } else {
                    0.0
                }
            })
            .collect();
        Ok(Self::new(values, &self.shape))
    }

    fn to_values(&self) -> Result<Vec<f32>> {
        Ok(self.values.clone())
    }
}

impl Flattenable for MockTensor {
    type Flattened = MockTensor;
    type Bias = MockTensor;

    fn conv2d(&self, weight: &Self, bias: &Self::Bias, padding: usize, stride: usize)
        -> Result<Self> {
        let (batch, in_channels, height, width) =
            (self.shape[0], self.shape[1], self.shape[2], self.shape[3]);
        let (out_channels, kernel) = (weight.shape[0], weight.shape[2]);
        if weight.shape != [out_channels, in_channels, kernel, kernel] {
            return Err(PipelineError::Backend(format!(
                "conv weight {:?} does not match input {:?}",
                weight.shape, self.shape
            )));
        }
        if bias.shape != [out_channels] {
            return Err(PipelineError::Backend(format!(
                "conv bias {:?} does not match {} output channels",
                bias.shape, out_channels
            )));
        }
        if height + 2 * padding < kernel || width + 2 * padding < kernel {
            return Err(PipelineError::Backend(format!(
                "padded input {:?} is smaller than the {}-wide kernel",
                self.shape, kernel
            )));
        }

        let out_height = (height + 2 * padding - kernel) / stride + 1;
        let out_width = (width + 2 * padding - kernel) / stride + 1;
        let mut out = vec![0.0f32; batch * out_channels * out_height * out_width];

        let in_plane = height * width;
        let out_plane = out_height * out_width;
        for b in 0..batch {
            for oc in 0..out_channels {
                for oy in 0..out_height {
                    for ox in 0..out_width {
                        let mut acc = bias.values[oc];
                        for ic in 0..in_channels {
                            for ky in 0..kernel {
                                for kx in 0..kernel {
                                    let iy = (oy * stride + ky) as isize - padding as isize;
                                    let ix = (ox * stride + kx) as isize - padding as isize;
                                    if iy < 0
                                        || ix < 0
                                        || iy >= height as isize
                                        || ix >= width as isize
                                    {
                                        continue;
                                    }
                                    let input_idx = (b * in_channels + ic) * in_plane
                                        + iy as usize * width
                                        + ix as usize;
                                    let weight_idx = ((oc * in_channels + ic) * kernel + ky)
                                        * kernel
                                        + kx;
                                    acc += self.values[input_idx] * weight.values[weight_idx];
                                }
                            }
                        }
                        out[(b * out_channels + oc) * out_plane + oy * out_width + ox] = acc;
                    }
                }
            }
        }

        Ok(Self::new(out, &[batch, out_channels, out_height, out_width]))
    }

    fn max_pool2d(&self, window: usize) -> Result<Self> {
        let (batch, channels, height, width) =
            (self.shape[0], self.shape[1], self.shape[2], self.shape[3]);
        if height < window || width < window {
            return Err(PipelineError::Backend(format!(
                "input {:?} is smaller than the {}-wide pool window",
                self.shape, window
            )));
        }
        // stride equals the window; trailing rows and columns that do not
        // fill a full block are dropped
        let out_height = (height - window) / window + 1;
        let out_width = (width - window) / window + 1;
        let mut out = vec![0.0f32; batch * channels * out_height * out_width];

        let in_plane = height * width;
        let out_plane = out_height * out_width;
        for b in 0..batch {
            for c in 0..channels {
                for oy in 0..out_height {
                    for ox in 0..out_width {
                        let mut best = f32::NEG_INFINITY;
                        for ky in 0..window {
                            for kx in 0..window {
                                let iy = oy * window + ky;
                                let ix = ox * window + kx;
                                let idx = (b * channels + c) * in_plane + iy * width + ix;
                                best = best.max(self.values[idx]);
                            }
                        }
                        out[(b * channels + c) * out_plane + oy * out_width + ox] = best;
                    }
                }
            }
        }

        Ok(Self::new(out, &[batch, channels, out_height, out_width]))
    }

    fn flatten_features(&self) -> Result<Self::Flattened> {
        let batch = self.shape[0];
        let features = self.shape.iter().skip(1).product::<usize>();
        Ok(Self::new(self.values.clone(), &[batch, features]))
    }
}

impl Dense for MockTensor {
    type Bias = MockTensor;

    fn linear(&self, weight: &Self, bias: &Self::Bias) -> Result<Self> {
        let (batch, in_features) = (self.shape[0], self.shape[1]);
        let (out_features, weight_in) = (weight.shape[0], weight.shape[1]);
        if weight_in != in_features {
            return Err(PipelineError::Backend(format!(
                "linear weight {:?} does not match input {:?}",
                weight.shape, self.shape
            )));
        }
        if bias.shape != [out_features] {
            return Err(PipelineError::Backend(format!(
                "linear bias {:?} does not match {} output features",
                bias.shape, out_features
            )));
        }

        let mut out = vec![0.0f32; batch * out_features];
        for b in 0..batch {
            for o in 0..out_features {
                let mut acc = bias.values[o];
                for i in 0..in_features {
                    acc += self.values[b * in_features + i] * weight.values[o * in_features + i];
                }
                out[b * out_features + o] = acc;
            }
        }

        Ok(Self::new(out, &[batch, out_features]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_pool_blocks_of_increasing_integers() {
        let values = (0..36).map(|v| v as f32).collect::<Vec<_>>();
        let t = MockTensor::new(values, &[1, 1, 6, 6]);
        let pooled = t.max_pool2d(3).unwrap();
        assert_eq!(pooled.shape, vec![1, 1, 2, 2]);
        assert_eq!(pooled.values, vec![14.0, 17.0, 32.0, 35.0]);
    }

    #[test]
    fn test_max_pool_drops_remainder() {
        let values = (0..49).map(|v| v as f32).collect::<Vec<_>>();
        let t = MockTensor::new(values, &[1, 1, 7, 7]);
        let pooled = t.max_pool2d(3).unwrap();
        assert_eq!(pooled.shape, vec![1, 1, 2, 2]);
        assert_eq!(pooled.values, vec![16.0, 19.0, 37.0, 40.0]);
    }

    #[test]
    fn test_conv2d_padded_neighborhood_sums() {
        let input = MockTensor::new((1..=9).map(|v| v as f32).collect(), &[1, 1, 3, 3]);
        let weight = MockTensor::filled(&[1, 1, 3, 3], 1.0);
        let bias = MockTensor::filled(&[1], 0.0);
        let out = input.conv2d(&weight, &bias, 1, 1).unwrap();
        assert_eq!(out.shape, vec![1, 1, 3, 3]);
        assert_eq!(
            out.values,
            vec![12.0, 21.0, 16.0, 27.0, 45.0, 33.0, 24.0, 39.0, 28.0]
        );
    }

    #[test]
    fn test_conv2d_stride_subsamples() {
        let input = MockTensor::new((0..16).map(|v| v as f32).collect(), &[1, 1, 4, 4]);
        let weight = MockTensor::filled(&[1, 1, 1, 1], 1.0);
        let bias = MockTensor::filled(&[1], 0.0);
        let out = input.conv2d(&weight, &bias, 0, 2).unwrap();
        assert_eq!(out.shape, vec![1, 1, 2, 2]);
        assert_eq!(out.values, vec![0.0, 2.0, 8.0, 10.0]);
    }

    #[test]
    fn test_conv2d_bias_reaches_every_position() {
        let input = MockTensor::filled(&[1, 1, 3, 3], 0.0);
        let weight = MockTensor::filled(&[2, 1, 1, 1], 1.0);
        let bias = MockTensor::new(vec![10.0, 20.0], &[2]);
        let out = input.conv2d(&weight, &bias, 0, 1).unwrap();
        assert!(out.values[..9].iter().all(|v| *v == 10.0));
        assert!(out.values[9..].iter().all(|v| *v == 20.0));
    }

    #[test]
    fn test_linear_matches_hand_computation() {
        let x = MockTensor::new(vec![1.0, 2.0, 3.0], &[1, 3]);
        let weight = MockTensor::new(vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0], &[2, 3]);
        let bias = MockTensor::new(vec![0.5, -0.5], &[2]);
        let out = x.linear(&weight, &bias).unwrap();
        assert_eq!(out.values, vec![1.5, 5.5]);
    }

    #[test]
    fn test_relu_zeroes_negatives() {
        let t = MockTensor::new(vec![-2.0, -0.5, 0.0, 1.5], &[1, 4]);
        assert_eq!(t.relu().unwrap().values, vec![0.0, 0.0, 0.0, 1.5]);
    }

    #[test]
    fn test_dropout_preserves_expected_magnitude() {
        let t = MockTensor::filled(&[4, 4096], 1.0);
        let dropped = t.dropout(0.5).unwrap();
        assert!(dropped.values.iter().all(|v| *v == 0.0 || *v == 2.0));
        let mean = dropped.values.iter().sum::<f32>() / dropped.values.len() as f32;
        assert!((mean - 1.0).abs() < 0.1, "mean drifted to {mean}");
    }

    #[test]
    fn test_flatten_features_keeps_row_major_order() {
        let values = (0..24).map(|v| v as f32).collect::<Vec<_>>();
        let t = MockTensor::new(values.clone(), &[2, 3, 2, 2]);
        let flat = t.flatten_features().unwrap();
        assert_eq!(flat.shape, vec![2, 12]);
        assert_eq!(flat.values, values);
    }
}
