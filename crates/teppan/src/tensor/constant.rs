/// # Constants with reserved meanings in Teppan

/// In a given tensor shape, Teppan reserves the `0th` dimension for batching
pub const BATCH_DIM: usize = 0;

/// In a feature-map shape `(batch, channel, height, width)`, the `1st`
/// dimension holds channels
pub const CHANNEL_DIM: usize = 1;

/// In a feature-map shape, the `2nd` dimension holds the spatial height
pub const HEIGHT_DIM: usize = 2;

/// In a feature-map shape, the `3rd` dimension holds the spatial width
pub const WIDTH_DIM: usize = 3;

/// In a flattened feature matrix `(batch, features)`, the `1st` dimension
/// holds features
pub const FEATURE_DIM: usize = 1;
