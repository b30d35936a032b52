use crate::backend::Backend;
use crate::error::{PipelineError, Result};
use super::constant::BATCH_DIM;

/// Computes the flattened feature count of a tensor.
///
/// This is the product of every dimension size after the leading batch
/// dimension, i.e. the width of the feature axis that flattening the tensor
/// would produce.
///
/// # Parameters
///
/// * `tensor` - Tensor of shape `(batch, ...rest)`, rank 2 or higher
///
/// # Returns
///
/// The product of all dimension sizes in `...rest`. The batch dimension
/// never participates, so the result is the same for every batch size.
///
/// # Implementation Notes
///
/// The count is recomputed from the tensor's actual shape on every call
/// rather than taken from a constant, so callers stay correct if the shapes
/// upstream of them change. Ranks below 2 have no feature dimensions and
/// yield the empty product, 1.
pub fn num_flat_features<B>(tensor: &B) -> usize
    where B: Backend
{
    tensor.shape()
        .iter()
        .skip(BATCH_DIM + 1)
        .product()
}

/// Validates that a tensor has exactly the shape a stage expects.
///
/// # Parameters
///
/// * `stage` - Name of the stage doing the check, used in the error
/// * `tensor` - The tensor to validate
/// * `expected` - The full shape the stage requires, batch dimension included
///
/// # Returns
///
/// `Ok(())` when the shapes match, otherwise a
/// [`PipelineError::ShapeMismatch`] carrying both shapes.
pub(crate) fn expect_shape<B>(stage: &'static str, tensor: &B, expected: &[usize]) -> Result<()>
    where B: Backend
{
    let actual = tensor.shape();
    if actual != expected {
        return Err(PipelineError::ShapeMismatch {
            stage,
            expected: expected.to_vec(),
            actual,
        });
    }
    Ok(())
}
