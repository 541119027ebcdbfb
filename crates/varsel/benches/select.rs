use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use varsel::{Attribute, AttributeContainer, Schema, Selector};
use varsel_platform::{Arch, OS, Platform};
use varsel_schema::DisambiguationRule;

const OSES: [&str; 3] = ["linux", "windows", "macos"];
const ARCHES: [&str; 2] = ["x86_64", "aarch64"];
const LIBCS: [&str; 2] = ["gnu", "musl"];
const FLAVORS: [&str; 2] = ["debug", "release"];

fn schema() -> Schema {
    Platform::new(OS::Linux, Arch::X86_64)
        .register(Schema::builder())
        .attribute(Attribute::raw("libc"))
        .attribute(Attribute::raw("flavor"))
        .disambiguation("libc", DisambiguationRule::prefer("gnu"))
        .disambiguation("flavor", DisambiguationRule::prefer("release"))
        .precedence(["os", "arch"])
        .build()
        .unwrap()
}

fn variants() -> Vec<AttributeContainer> {
    let mut variants = Vec::new();
    for os in OSES {
        for arch in ARCHES {
            for libc in LIBCS {
                for flavor in FLAVORS {
                    variants.push(AttributeContainer::raw([
                        ("os", os),
                        ("arch", arch),
                        ("libc", libc),
                        ("flavor", flavor),
                    ]));
                }
            }
        }
    }
    variants
}

fn bench_select(c: &mut Criterion) {
    let schema = schema();
    let selector = Selector::new(&schema);
    let candidates = variants();

    let requests = [
        ("empty", AttributeContainer::empty()),
        ("os", AttributeContainer::raw([("os", "linux")])),
        (
            "full",
            AttributeContainer::raw([
                ("os", "linux"),
                ("arch", "amd64"),
                ("libc", "musl"),
                ("flavor", "debug"),
            ]),
        ),
    ];

    let mut group = c.benchmark_group("select");
    for (name, requested) in &requests {
        group.bench_with_input(BenchmarkId::from_parameter(name), requested, |b, requested| {
            b.iter(|| selector.select(black_box(requested), black_box(&candidates)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_select);
criterion_main!(benches);
