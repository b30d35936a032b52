//! # Convolutional Inference Pipeline
//!
//! A module for single-pass image classification over a fixed stage topology.
//!
//! ## Overview
//!
//! This module provides a forward-only convolutional pipeline in the classic
//! five-convolution, three-linear arrangement. Construction derives every
//! intermediate shape from the stage table, allocates parameters on the
//! backend's device, and records the expectations each forward pass is
//! checked against. Inference is a pure function of parameters and input.
//!
//! ## Key Components
//!
//! * [`Forward`] - A trait for models that map one input tensor to one output tensor
//! * [`AlexNet`] - The fixed-topology pipeline, generic over any [`Flattenable`] backend
//! * [`WeightInit`] - Host-side parameter initialization, reproducible by seed
//! * [`Mode`] - Whether dropout stages are stochastic or identity
//! * [`ShapePlan`] - The per-stage shapes derived at construction
//!
//! ## Features
//!
//! - **Derived Sizing**: The flatten width and first linear stage follow the
//!   stage arithmetic instead of a hard-coded constant
//! - **Stage-Attributed Errors**: Shape failures name the stage that produced them
//! - **Backend Portability**: The same pipeline runs wherever the backend traits
//!   are implemented
//! - **Reproducible Parameters**: Equal seeds produce equal parameters on every
//!   backend
//!
//! # Example
//!
//! ```ignore
//! use candle_core::{Device, Tensor};
//! use teppan::pipeline::{AlexNet, Mode, WeightInit};
//!
//! let device = Device::Cpu;
//! let model: AlexNet<Tensor> = AlexNet::new(&device, WeightInit::Uniform { seed: 42 })?;
//!
//! // [batch, channels, height, width]
//! let batch = Tensor::zeros(&[8, 3, 224, 224], candle_core::DType::F32, &device)?;
//!
//! // 1000 raw class scores per sample
//! let logits = model.forward(&batch)?;
//! assert_eq!(logits.dims(), &[8, 1000]);
//! ```
//!
//! ## Implementation Details
//!
//! The trunk interleaves convolutions with activations and non-overlapping
//! max-pools; the head flattens per-sample features and applies three linear
//! stages with dropout ahead of each hidden one. Dropout is live only in
//! [`Mode::Train`]; the default [`Mode::Eval`] makes repeated passes
//! bit-identical. Parameters never change after construction, so a single
//! pipeline value can be shared across threads.
//!
//! [`Flattenable`]: crate::backend::Flattenable

mod classifier;
mod core_trait;
mod init;
mod stage;
mod topology;

pub use classifier::{AlexNet, Mode};
pub use core_trait::Forward;
pub use init::WeightInit;
pub use stage::{pooled_extent, Conv2dSpec, LinearSpec};
pub use topology::{
    ShapePlan, StagePlan, CLASS_COUNT, HIDDEN_FEATURES, INPUT_CHANNELS, INPUT_EDGE, POOL_WINDOW,
};
