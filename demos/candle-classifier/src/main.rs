use std::sync::Arc;
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use teppan::pipeline::{AlexNet, WeightInit};
use teppan::throughput::measure;

const MEASURED_PASSES: usize = 50;
const WORKERS: usize = 4;
const PASSES_PER_WORKER: usize = 10;

#[tokio::main]
async fn main() {
    let device = Device::Cpu;
    let model = AlexNet::<Tensor>::new(&device, WeightInit::Uniform { seed: 42 })
        .expect("constructs pipeline");
    println!(
        "trunk flattens to {} features per sample",
        model.shape_plan().flattened_features
    );

    let input = Tensor::ones((1, 3, 224, 224), DType::F32, &device).expect("creates input batch");

    // One unmeasured pass so allocator and cache effects land outside the clock
    model.forward(&input).expect("warm-up pass");

    let report = measure(&model, &input, MEASURED_PASSES).expect("measured run");
    println!("single-threaded: {}", report);

    let shared = Arc::new(model);
    let started = Instant::now();
    let handles = (0..WORKERS)
        .map(|worker| {
            let model = shared.clone();
            let input = input.clone();

            tokio::task::spawn_blocking(move || {
                let report = measure(model.as_ref(), &input, PASSES_PER_WORKER)?;
                println!("worker {}: {}", worker, report);
                Ok::<_, teppan::PipelineError>(report)
            })
        })
        .collect::<Vec<_>>();

    let mut completed_passes = 0;
    for handle in futures::future::join_all(handles).await {
        match handle {
            Ok(Ok(report)) => completed_passes += report.passes(),
            Ok(Err(e)) => println!("worker failed: {}", e),
            Err(e) => println!("Err joining handle: {:?}", e),
        }
    }
    let elapsed = started.elapsed().as_secs_f64();
    println!(
        "{} workers: {} passes in {:.3}s ({:.2} passes/s)",
        WORKERS,
        completed_passes,
        elapsed,
        completed_passes as f64 / elapsed
    );
}
