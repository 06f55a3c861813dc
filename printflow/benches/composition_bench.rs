//! Benchmarks for endpoint composition.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use printflow::endpoint::{SharedEndpoint, StaticEndpoint};
use printflow::processors::{CompositeHttpProcessor, ProcessorNode, ProcessorRunner};
use printflow::testing::{CallLog, LayerProcessor};
use printflow::values::Values;
use std::sync::Arc;

fn composite(parts: usize, log: &CallLog) -> CompositeHttpProcessor {
    CompositeHttpProcessor::new(
        (0..parts)
            .map(|i| ProcessorNode::http(LayerProcessor::new(format!("part-{i}"), log.clone())))
            .collect(),
    )
}

fn composition_benchmark(c: &mut Criterion) {
    let log = CallLog::new();
    let raw: SharedEndpoint = Arc::new(StaticEndpoint::new("raw"));

    for parts in [1, 4, 16] {
        let processor = composite(parts, &log);
        c.bench_function(&format!("compose_{parts}"), |b| {
            b.iter(|| {
                log.clear();
                let mut values = Values::new();
                values.put_endpoint(raw.clone());
                ProcessorRunner::new()
                    .run(black_box(&processor), &mut values)
                    .map(|written| black_box(written.len()))
            });
        });
    }
}

criterion_group!(benches, composition_benchmark);
criterion_main!(benches);
