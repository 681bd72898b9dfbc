//! Performance benchmarks for design and filtering
//!
//! Run with: cargo bench -p bwfilter_dsp

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use bwfilter_dsp::{design_band_pass, design_low_pass, CascadeFilter};

fn benchmark_cascade_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");

    let buffer_sizes = [64, 256, 1024, 4096];

    for order in [2, 5, 10] {
        for size in buffer_sizes {
            group.throughput(Throughput::Elements(size as u64));

            group.bench_function(format!("low_pass_order{}_{}_samples", order, size), |b| {
                let coefficients = design_low_pass(order, 0.04).unwrap();
                let mut filter = CascadeFilter::with_coefficients(coefficients);
                let mut buffer: Vec<f64> = (0..size).map(|i| (i as f64 * 0.001).sin()).collect();

                b.iter(|| {
                    filter.process_buffer(black_box(&mut buffer)).unwrap();
                });
            });
        }
    }

    group.finish();
}

fn benchmark_design(c: &mut Criterion) {
    c.bench_function("design_low_pass_order10", |b| {
        b.iter(|| design_low_pass(black_box(10), black_box(0.04)).unwrap());
    });

    c.bench_function("design_band_pass_order10", |b| {
        b.iter(|| design_band_pass(black_box(10), black_box(0.04), black_box(0.01)).unwrap());
    });
}

fn benchmark_single_sample(c: &mut Criterion) {
    c.bench_function("cascade_process_single_sample", |b| {
        let mut filter = CascadeFilter::with_coefficients(design_band_pass(5, 0.04, 0.01).unwrap());

        b.iter(|| {
            black_box(filter.process(black_box(0.5)).unwrap());
        });
    });
}

criterion_group!(
    benches,
    benchmark_cascade_processing,
    benchmark_design,
    benchmark_single_sample
);

criterion_main!(benches);
