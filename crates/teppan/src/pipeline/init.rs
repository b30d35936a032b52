use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// How pipeline construction fills parameter storage.
///
/// Values are drawn on the host and uploaded through
/// [`Backend::from_values`](crate::backend::Backend::from_values), so the
/// same variant produces the same parameters on every backend and device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightInit {
    /// Every weight takes the given value and every bias is zero.
    ///
    /// Mostly useful in tests, where a pipeline with known parameters makes
    /// outputs predictable.
    Constant(f64),
    /// Weights and biases are drawn uniformly from `±1/sqrt(fan_in)`.
    ///
    /// Equal seeds yield equal parameters across runs.
    Uniform {
        /// Seed for the host-side generator
        seed: u64,
    },
}

impl WeightInit {
    /// Opens the value stream the stage allocators consume.
    ///
    /// Stages draw from the stream in declaration order, so the stream as a
    /// whole is as reproducible as its variant promises.
    pub(crate) fn sampler(&self) -> Sampler {
        match self {
            WeightInit::Constant(value) => Sampler {
                rng: None,
                constant: *value as f32,
            },
            WeightInit::Uniform { seed } => Sampler {
                rng: Some(StdRng::seed_from_u64(*seed)),
                constant: 0.0,
            },
        }
    }
}

/// Stream of parameter values consumed during construction.
pub(crate) struct Sampler {
    rng: Option<StdRng>,
    constant: f32,
}

impl Sampler {
    /// Draws `len` weight values for a stage with the given fan-in.
    pub(crate) fn weights(&mut self, fan_in: usize, len: usize) -> Vec<f32> {
        match &mut self.rng {
            Some(rng) => draw(rng, fan_in, len),
            None => vec![self.constant; len],
        }
    }

    /// Draws `len` bias values for a stage with the given fan-in.
    pub(crate) fn biases(&mut self, fan_in: usize, len: usize) -> Vec<f32> {
        match &mut self.rng {
            Some(rng) => draw(rng, fan_in, len),
            None => vec![0.0; len],
        }
    }
}

fn draw(rng: &mut StdRng, fan_in: usize, len: usize) -> Vec<f32> {
    let bound = 1.0 / (fan_in as f64).sqrt();
    let uniform = Uniform::new(-bound, bound);
    (0..len).map(|_| uniform.sample(rng) as f32).collect()
}
