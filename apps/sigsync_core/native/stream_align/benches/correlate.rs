//! Correlation benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use receiver_physics::{QpskSource, Receiver, ReceiverParams};
use stream_align::*;

fn benchmark_correlate(c: &mut Criterion, kind: TransformKind, size: usize) {
    let reference = QpskSource::new(1).next_frame(size);
    let mut rx = Receiver::new(
        ReceiverParams::ideal().with_delay(37).with_phase(0.6).with_snr_db(10.0),
        2,
    );
    let secondary = rx.observe(&reference);

    let mut correlator = SpectralCorrelator::new(build_transform(kind, size).unwrap());

    c.bench_function(&format!("correlate_{}_{}", kind.name(), size), |b| {
        b.iter(|| black_box(correlator.correlate(&reference, &secondary).unwrap()))
    });
}

fn benchmark_correlate_rustfft(c: &mut Criterion) {
    benchmark_correlate(c, TransformKind::RustFft, 4096);
}

fn benchmark_correlate_radix2(c: &mut Criterion) {
    benchmark_correlate(c, TransformKind::Radix2, 4096);
}

criterion_group!(benches, benchmark_correlate_rustfft, benchmark_correlate_radix2);
criterion_main!(benches);
