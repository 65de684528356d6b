use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mkspk_setup::{
    setup::{reader::parse_setup, writer::render_setup},
    EpochRange, KernelSetupConfig,
};

fn full_config() -> KernelSetupConfig {
    KernelSetupConfig {
        frame_definition_file_path: Some("earth_moon_rotating.tf".into()),
        output_kernel_file_path: Some("halo.bsp".into()),
        valid_epoch_range: Some(EpochRange::new(7.64e8, 7.655e8)),
        ..Default::default()
    }
}

fn bench_render(c: &mut Criterion) {
    let config = full_config();
    c.bench_function("setup_file/render", |b| {
        b.iter(|| render_setup(black_box(&config)).unwrap())
    });
}

fn bench_parse(c: &mut Criterion) {
    let content = render_setup(&full_config()).unwrap();
    c.bench_function("setup_file/parse", |b| {
        b.iter(|| parse_setup(black_box(&content)).unwrap())
    });
}

criterion_group!(benches, bench_render, bench_parse);
criterion_main!(benches);
