use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use stackblur::{stack_blur_with_strategy, ExecutionStrategy, ImageSize};

fn bench_stackblur(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stack Blur");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for radius in [1, 4, 16, 64, 254].iter() {
            group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

            let parameter_string = format!("{}x{}x{}", width, height, radius);
            let image_size = ImageSize {
                width: *width,
                height: *height,
            };
            let image_data = (0..width * height * 4)
                .map(|i| (i % 251) as u8)
                .collect::<Vec<_>>();

            for (name, strategy) in [
                ("stack_blur_serial", ExecutionStrategy::Serial),
                ("stack_blur_parallel", ExecutionStrategy::Parallel),
            ] {
                group.bench_with_input(
                    BenchmarkId::new(format!("{}_c1", name), &parameter_string),
                    &image_data[..width * height],
                    |b, i| {
                        let mut data = i.to_vec();
                        b.iter(|| {
                            black_box(stack_blur_with_strategy(
                                &mut data, image_size, 1, *radius, strategy,
                            ))
                        })
                    },
                );

                group.bench_with_input(
                    BenchmarkId::new(format!("{}_c4", name), &parameter_string),
                    &image_data,
                    |b, i| {
                        let mut data = i.clone();
                        b.iter(|| {
                            black_box(stack_blur_with_strategy(
                                &mut data, image_size, 4, *radius, strategy,
                            ))
                        })
                    },
                );
            }
        }
    }
    group.finish();
}

criterion_group!(benches, bench_stackblur);
criterion_main!(benches);
