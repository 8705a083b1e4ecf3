use newtox::bench::{Benchmark, BenchmarkReport};
use newtox::{Config, FrameRenderer};

const REPEATS: usize = 5;

fn benchmark_image(threads: usize, size: usize, attractors: bool) -> Benchmark {
    let mut config = Config {
        width: size,
        height: size,
        threads,
        ..Config::default()
    };
    if attractors {
        config = config.with_attractors();
    }
    let renderer = FrameRenderer::from_config(&config).expect("valid config");
    let name = &format!("image t={} r={}x{} a={}", threads, size, size, attractors);
    let f = move || {
        renderer.render(100);
    };
    Benchmark::iter(name, REPEATS, f)
}

fn main() -> std::io::Result<()> {
    BenchmarkReport::with_benches(&[
        benchmark_image(0, 432, false),
        benchmark_image(0, 432, true),
        benchmark_image(4, 432, false),
        benchmark_image(0, 1000, false),
        benchmark_image(4, 1000, false),
        benchmark_image(8, 1000, false),
    ])
    .report("image")
}
