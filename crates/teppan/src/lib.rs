//! # Teppan
//!
//! A fixed-topology convolutional inference library, cooking image batches
//! in a **single forward pass** over swappable tensor backends.
//!
//! ## Overview
//!
//! This library provides a forward-only implementation of the classic
//! five-convolution, three-linear image classifier, together with a
//! wall-clock throughput harness for measuring it. The stage sequence is
//! fixed; the tensor backend, the parameter initialization, and the dropout
//! mode are what callers choose.
//!
//! Key components include:
//!
//! - A tensor abstraction layer supporting various backends
//! - A fixed-topology pipeline that derives every intermediate shape from
//!   its stage table at construction
//! - Seed-reproducible host-side parameter initialization
//! - A throughput harness that times repeated forward passes
//!
//! ## Architecture
//!
//! The library is built around several key abstractions:
//!
//! ### Assumptions
//! Regardless of backend used, teppan reserves the dimensions of a rank-4
//! tensor with special meanings:
//!  - The `0th` dimension is reserved as the batch dimension
//!  - The `1st` dimension is reserved as the channel dimension
//!  - The `2nd` and `3rd` dimensions are the spatial height and width
//!
//! Once activations are flattened, the `1st` dimension holds the per-sample
//! features instead.
//!
//! ### Backend Traits
//!
//! The `Backend`, `Flattenable`, and `Dense` traits define the interface any
//! tensor implementation must satisfy to work with the library. This allows
//! the pipeline logic to remain independent of the specific tensor
//! implementation.
//!
//! ### Pipeline
//!
//! The `Forward` trait defines the interface for models that map one input
//! tensor to one output tensor, and `AlexNet` implements it with the fixed
//! convolutional topology. Construction walks the stage table once, so the
//! flatten width and the first linear stage are derived rather than assumed,
//! and each forward pass is validated against that plan.
//!
//! ## Features
//!
//! - **candle** - Enables candle backend
//! - **burn** - Enables burn backend
//!
//! ## Implementation Details
//!
//! Parameters are immutable after construction and the forward pass keeps no
//! interior state, so one pipeline value can serve concurrent calls from
//! several threads. Dropout stages are live only in train mode; in the
//! default eval mode repeated passes over the same input are bit-identical.
//!
//! Tensor operations are abstracted through the `Backend` trait family,
//! allowing different tensor implementations to be used without changing the
//! pipeline logic.


mod error;
mod tensor;

pub mod backend;
pub mod pipeline;
pub mod throughput;

/// Constants for client reference
pub use tensor::constant;

pub use error::{PipelineError, Result};
pub use tensor::operations::num_flat_features;
