use crate::backend::Backend;
use crate::error::Result;

/// Defines a feed-forward model interface that processes tensors in a single pass.
///
/// This trait represents models that take an input tensor and produce an output
/// tensor in one synchronous forward pass, without iterative or autoregressive
/// behavior. Typical implementations include classification pipelines, encoders,
/// and fixed transformations.
///
/// # Type Parameters
///
/// * `I` - The input tensor type that implements [`Backend`]
/// * `O` - The output tensor type that implements [`Backend`]
///
/// # Implementation Notes
///
/// Implementations should:
/// * Handle batched inputs with the first dimension as the batch dimension
/// * Preserve the batch structure in outputs
/// * Contain no suspension points; a call runs to completion on the calling
///   thread, and shared parameters are read-only, so the same model value may
///   serve concurrent calls from several threads
///
/// # Example
///
/// ```ignore
/// use teppan::pipeline::Forward;
/// use teppan::Result;
///
/// struct MyModel {
///     weight: Tensor,
///     bias: Tensor,
/// }
///
/// impl Forward<Tensor, Tensor> for MyModel {
///     fn forward(&self, input: &Tensor) -> Result<Tensor> {
///         // Project the batch through the single affine stage
///         input.linear(&self.weight, &self.bias)
///     }
/// }
/// ```
pub trait Forward<I, O> where I: Backend, O: Backend
{
    /// Processes an input tensor and produces an output tensor.
    ///
    /// This method represents the core computation of the model.
    ///
    /// # Parameters
    ///
    /// * `input` - The input tensor to process, with an outer batch dimension
    ///
    /// # Returns
    ///
    /// The output tensor produced by the model, or the error that stopped it
    fn forward(&self, input: &I) -> Result<O>;
}
