use crate::error::{PipelineError, Result};

use super::stage::{pooled_extent, Conv2dSpec, LinearSpec};

/// Channels every input tensor must carry.
pub const INPUT_CHANNELS: usize = 3;

/// Height and width every input tensor must carry.
pub const INPUT_EDGE: usize = 224;

/// Window (and stride) of every max-pool in the trunk.
pub const POOL_WINDOW: usize = 3;

/// Feature width of both hidden fully connected stages.
pub const HIDDEN_FEATURES: usize = 4096;

/// Number of class scores the final stage emits.
pub const CLASS_COUNT: usize = 1000;

/// The convolutional trunk, in execution order.
///
/// Stage labels follow the position of each convolution in the flattened
/// layer sequence, counting the interleaved activations and pools.
pub(crate) const CONV_TRUNK: [Conv2dSpec; 5] = [
    Conv2dSpec {
        name: "C1",
        in_channels: 3,
        out_channels: 64,
        kernel: 11,
        padding: 2,
        stride: 1,
        pooled: true,
    },
    Conv2dSpec {
        name: "C3",
        in_channels: 64,
        out_channels: 192,
        kernel: 5,
        padding: 2,
        stride: 1,
        pooled: true,
    },
    Conv2dSpec {
        name: "C6",
        in_channels: 192,
        out_channels: 384,
        kernel: 3,
        padding: 1,
        stride: 1,
        pooled: false,
    },
    Conv2dSpec {
        name: "C8",
        in_channels: 384,
        out_channels: 256,
        kernel: 3,
        padding: 1,
        stride: 1,
        pooled: false,
    },
    Conv2dSpec {
        name: "C10",
        in_channels: 256,
        out_channels: 256,
        kernel: 3,
        padding: 1,
        stride: 1,
        pooled: true,
    },
];

/// The fully connected head, sized from the trunk's flattened output.
///
/// The width of the first stage is never hard-coded; it follows whatever
/// extent the trunk arithmetic produces, so a change to any kernel, padding,
/// or pool above automatically re-sizes the head.
pub(crate) fn fully_connected_head(flattened_features: usize) -> [LinearSpec; 3] {
    [
        LinearSpec {
            name: "FC1",
            in_features: flattened_features,
            out_features: HIDDEN_FEATURES,
        },
        LinearSpec {
            name: "FC2",
            in_features: HIDDEN_FEATURES,
            out_features: HIDDEN_FEATURES,
        },
        LinearSpec {
            name: "FC3",
            in_features: HIDDEN_FEATURES,
            out_features: CLASS_COUNT,
        },
    ]
}

/// Expected output of one trunk stage, after its pool when the stage has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagePlan {
    /// Label of the stage that produces this shape
    pub name: &'static str,
    /// Channels of the stage output
    pub channels: usize,
    /// Spatial height of the stage output
    pub height: usize,
    /// Spatial width of the stage output
    pub width: usize,
}

/// Every shape the forward pass checks against, computed once at construction
/// by walking the stage table.
///
/// The plan is what makes shape failures report the stage that caused them:
/// each trunk stage's real output is compared to its planned entry, and the
/// flattened width feeds the first fully connected stage instead of a
/// hard-coded constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapePlan {
    /// Channels the pipeline accepts
    pub input_channels: usize,
    /// Spatial height the pipeline accepts
    pub input_height: usize,
    /// Spatial width the pipeline accepts
    pub input_width: usize,
    /// Planned output of each trunk stage, in execution order
    pub stages: Vec<StagePlan>,
    /// Per-sample feature count after flattening the last trunk output
    pub flattened_features: usize,
}

impl ShapePlan {
    /// Walks the built-in trunk for a square input of the given edge length.
    pub(crate) fn for_input(height: usize, width: usize) -> Result<Self> {
        Self::walk(&CONV_TRUNK, INPUT_CHANNELS, height, width)
    }

    fn walk(
        trunk: &[Conv2dSpec],
        input_channels: usize,
        input_height: usize,
        input_width: usize,
    ) -> Result<Self> {
        let mut channels = input_channels;
        let mut height = input_height;
        let mut width = input_width;
        let mut stages = Vec::with_capacity(trunk.len());

        for spec in trunk {
            if spec.in_channels != channels {
                return Err(PipelineError::Configuration {
                    stage: spec.name,
                    reason: format!(
                        "expects {} input channels but the previous stage emits {}",
                        spec.in_channels, channels
                    ),
                });
            }
            height = Self::conv_extent(spec, height)?;
            width = Self::conv_extent(spec, width)?;
            if spec.pooled {
                height = Self::pool_extent(spec.name, height)?;
                width = Self::pool_extent(spec.name, width)?;
            }
            channels = spec.out_channels;
            stages.push(StagePlan {
                name: spec.name,
                channels,
                height,
                width,
            });
        }

        Ok(Self {
            input_channels,
            input_height,
            input_width,
            stages,
            flattened_features: channels * height * width,
        })
    }

    fn conv_extent(spec: &Conv2dSpec, input: usize) -> Result<usize> {
        spec.spatial_out(input).ok_or_else(|| PipelineError::Configuration {
            stage: spec.name,
            reason: format!(
                "padded extent {} is smaller than the {}-wide kernel",
                input + 2 * spec.padding,
                spec.kernel
            ),
        })
    }

    fn pool_extent(stage: &'static str, input: usize) -> Result<usize> {
        pooled_extent(input, POOL_WINDOW).ok_or_else(|| PipelineError::Configuration {
            stage,
            reason: format!(
                "extent {} is smaller than the {}-wide pool window",
                input, POOL_WINDOW
            ),
        })
    }
}
