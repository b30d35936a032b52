use burn::backend::ndarray::NdArrayDevice;
use burn::backend::NdArray;
use burn::tensor::Tensor;
use teppan::pipeline::{AlexNet, WeightInit};
use teppan::throughput::measure;

// Fewer timed passes than the candle demo: an ndarray convolution pass
// costs seconds where candle's gemm path costs fractions of a second.
const MEASURED_PASSES: usize = 10;

fn main() {
    let device = NdArrayDevice::default();
    let model = AlexNet::<Tensor<NdArray, 4>>::new(&device, WeightInit::Uniform { seed: 42 })
        .expect("constructs pipeline");
    println!(
        "trunk flattens to {} features per sample",
        model.shape_plan().flattened_features
    );

    let input = Tensor::<NdArray, 4>::ones([1, 3, 224, 224], &device);

    // One unmeasured pass so allocator and cache effects land outside the clock
    model.forward(&input).expect("warm-up pass");

    let report = measure(&model, &input, MEASURED_PASSES).expect("measured run");
    println!("burn-ndarray: {}", report);
}
