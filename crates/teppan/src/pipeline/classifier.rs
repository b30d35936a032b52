use crate::backend::{Backend, Flattenable};
use crate::error::{PipelineError, Result};
use crate::tensor::constant::{BATCH_DIM, CHANNEL_DIM, HEIGHT_DIM, WIDTH_DIM};
use crate::tensor::operations::{expect_shape, num_flat_features};

use super::core_trait::Forward;
use super::init::WeightInit;
use super::stage::{Conv2dParams, LinearParams};
use super::topology::{fully_connected_head, ShapePlan, CONV_TRUNK, INPUT_EDGE, POOL_WINDOW};

/// Whether dropout stages are live or pass activations through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Dropout zeroes each activation with its drop probability and rescales
    /// the survivors, so repeated passes over the same input differ.
    Train,
    /// Dropout is an identity pass-through and the forward pass is
    /// deterministic for fixed parameters and input.
    #[default]
    Eval,
}

/// Keep probability of both dropout stages.
const DROPOUT_KEEP: f64 = 0.5;

/// Fixed-topology convolutional classifier over any [`Flattenable`] backend.
///
/// The pipeline is five convolution stages with interleaved activations and
/// max-pools, a flatten, and three fully connected stages, scoring 1000
/// classes for batches of `[N, 3, 224, 224]` inputs. The stage sequence is
/// baked in; what varies is the backend the tensors live on, the parameter
/// initialization, and the dropout [`Mode`].
///
/// Construction walks the stage table once and records the expected output
/// shape of every stage in a [`ShapePlan`]. The width of the first fully
/// connected stage comes from that walk rather than a constant, and each
/// forward pass re-checks the plan so a shape failure names the stage that
/// produced it.
///
/// All parameters are read-only after construction and the forward pass
/// keeps no interior state, so one value can serve concurrent calls from
/// several threads.
///
/// # Example
///
/// ```ignore
/// use candle_core::Device;
/// use teppan::pipeline::{AlexNet, WeightInit};
///
/// let model: AlexNet<candle_core::Tensor> =
///     AlexNet::new(&Device::Cpu, WeightInit::Uniform { seed: 42 })?;
/// let logits = model.forward(&batch)?;
/// ```
#[derive(Debug, Clone)]
pub struct AlexNet<B: Flattenable> {
    c1: Conv2dParams<B>,
    c3: Conv2dParams<B>,
    c6: Conv2dParams<B>,
    c8: Conv2dParams<B>,
    c10: Conv2dParams<B>,
    fc1: LinearParams<B>,
    fc2: LinearParams<B>,
    fc3: LinearParams<B>,
    plan: ShapePlan,
    mode: Mode,
}

impl<B: Flattenable> AlexNet<B> {
    /// Builds the pipeline on the given device, in [`Mode::Eval`].
    ///
    /// Parameter values are drawn host-side in stage declaration order, so a
    /// seeded [`WeightInit`] reproduces the same parameters on any backend.
    ///
    /// # Parameters
    ///
    /// * `device` - The device all parameter tensors are placed on
    /// * `init` - The distribution parameter values are drawn from
    ///
    /// # Returns
    ///
    /// The constructed pipeline, or a [`PipelineError::Configuration`] naming
    /// the stage whose shape arithmetic or parameter upload failed
    pub fn new(device: &B::Device, init: WeightInit) -> Result<Self> {
        let plan = ShapePlan::for_input(INPUT_EDGE, INPUT_EDGE)?;
        let [fc1, fc2, fc3] = fully_connected_head(plan.flattened_features);
        let [c1, c3, c6, c8, c10] = CONV_TRUNK;
        let mut sampler = init.sampler();

        Ok(Self {
            c1: Conv2dParams::allocate(c1, &mut sampler, device)?,
            c3: Conv2dParams::allocate(c3, &mut sampler, device)?,
            c6: Conv2dParams::allocate(c6, &mut sampler, device)?,
            c8: Conv2dParams::allocate(c8, &mut sampler, device)?,
            c10: Conv2dParams::allocate(c10, &mut sampler, device)?,
            fc1: LinearParams::allocate(fc1, &mut sampler, device)?,
            fc2: LinearParams::allocate(fc2, &mut sampler, device)?,
            fc3: LinearParams::allocate(fc3, &mut sampler, device)?,
            plan,
            mode: Mode::default(),
        })
    }

    /// Returns the active dropout mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches between stochastic and identity dropout.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Builder-style counterpart of [`set_mode`](Self::set_mode).
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the shapes construction derived for every stage.
    pub fn shape_plan(&self) -> &ShapePlan {
        &self.plan
    }

    /// Runs one forward pass and returns raw logits of shape `[N, 1000]`.
    ///
    /// The stage order is convolution, activation, and pool where the stage
    /// has one, through the trunk; then flatten, and the fully connected head
    /// with dropout ahead of each hidden stage. No softmax is applied.
    ///
    /// # Parameters
    ///
    /// * `input` - A `[N, 3, 224, 224]` batch with `N >= 1`
    ///
    /// # Returns
    ///
    /// The class scores, or a [`PipelineError::ShapeMismatch`] naming the
    /// stage at which activations deviated from the construction-time plan
    pub fn forward(&self, input: &B) -> Result<B::Flattened> {
        self.validate_input(input)?;
        let batch = input.shape()[BATCH_DIM];

        let trunk = [&self.c1, &self.c3, &self.c6, &self.c8, &self.c10];
        let mut x = input.clone();
        for (params, planned) in trunk.iter().zip(&self.plan.stages) {
            x = params.apply(&x)?.relu()?;
            if params.spec.pooled {
                x = x.max_pool2d(POOL_WINDOW)?;
            }
            expect_shape(
                params.spec.name,
                &x,
                &[batch, planned.channels, planned.height, planned.width],
            )?;
        }

        let features = num_flat_features(&x);
        if features != self.fc1.spec.in_features {
            return Err(PipelineError::ShapeMismatch {
                stage: self.fc1.spec.name,
                expected: vec![batch, self.fc1.spec.in_features],
                actual: vec![batch, features],
            });
        }
        let x = x.flatten_features()?;

        let x = self.dropout(x)?;
        let x = self.fc1.apply(&x)?.relu()?;
        let x = self.dropout(x)?;
        let x = self.fc2.apply(&x)?.relu()?;
        self.fc3.apply(&x)
    }

    fn dropout(&self, x: B::Flattened) -> Result<B::Flattened> {
        match self.mode {
            Mode::Train => x.dropout(DROPOUT_KEEP),
            Mode::Eval => Ok(x),
        }
    }

    fn validate_input(&self, input: &B) -> Result<()> {
        let shape = input.shape();
        let accepted = shape.len() == 4
            && shape[BATCH_DIM] >= 1
            && shape[CHANNEL_DIM] == self.plan.input_channels
            && shape[HEIGHT_DIM] == self.plan.input_height
            && shape[WIDTH_DIM] == self.plan.input_width;
        if accepted {
            return Ok(());
        }

        let batch = shape.first().copied().unwrap_or(1).max(1);
        Err(PipelineError::ShapeMismatch {
            stage: "input",
            expected: vec![
                batch,
                self.plan.input_channels,
                self.plan.input_height,
                self.plan.input_width,
            ],
            actual: shape,
        })
    }
}

impl<B: Flattenable> Forward<B, B::Flattened> for AlexNet<B> {
    fn forward(&self, input: &B) -> Result<B::Flattened> {
        AlexNet::forward(self, input)
    }
}
