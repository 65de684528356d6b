#![cfg(unix)]

mod common;

use common::{FakeMkspk, Workspace};
use mkspk_setup::{
    pipeline::companion_paths, setup::reader::parse_setup, states_to_spk, BuildOutcome,
    KernelSetupConfig, MkspkError, PipelineOptions, StateSample,
};
use nalgebra::Vector6;

fn halo_samples() -> Vec<StateSample> {
    (0..4)
        .map(|i| {
            let t = i as f64 * 3600.0;
            StateSample::from_et_seconds(
                7.64e8 + t,
                Vector6::new(384_400.0 + t, 0.0, 1_000.0, 0.0, 1.02, 0.0),
            )
        })
        .collect()
}

#[test]
fn test_states_to_spk_default_options() {
    let ws = Workspace::new();
    let kernel = ws.path("halo.bsp");
    let (setup_path, input_path) = companion_paths(&kernel);

    let mut invoker = ws.invoker(FakeMkspk::Concatenate);
    let outcome = states_to_spk(
        &halo_samples(),
        &kernel,
        &KernelSetupConfig::default(),
        &mut invoker,
        PipelineOptions::default(),
    )
    .unwrap();

    assert_eq!(outcome, BuildOutcome::Built(kernel.clone()));
    assert!(setup_path.exists());
    assert!(!input_path.exists());
    assert_eq!(ws.recorded_args()[1], setup_path.as_str());
    assert_eq!(ws.recorded_args()[3], input_path.as_str());

    let entries = parse_setup(&std::fs::read_to_string(&setup_path).unwrap()).unwrap();
    let earliest: f64 = entries.raw("EARLIEST_EPOCH").unwrap().parse().unwrap();
    let latest: f64 = entries.raw("LATEST_EPOCH").unwrap().parse().unwrap();
    assert!((earliest - 7.64e8).abs() < 1e-3);
    assert!((latest - (7.64e8 + 3.0 * 3600.0)).abs() < 1e-3);

    // the fake kernel is setup followed by the input records
    let kernel_text = std::fs::read_to_string(&kernel).unwrap();
    assert!(kernel_text.contains("et,x,y,z,vx,vy,vz\n"));
    assert_eq!(kernel_text.lines().filter(|l| l.starts_with("76")).count(), 4);
}

#[test]
fn test_states_to_spk_removes_everything_on_failure() {
    let ws = Workspace::new();
    let kernel = ws.path("halo.bsp");
    let (setup_path, input_path) = companion_paths(&kernel);

    let mut invoker = ws.invoker(FakeMkspk::Fail);
    let result = states_to_spk(
        &halo_samples(),
        &kernel,
        &KernelSetupConfig::default(),
        &mut invoker,
        PipelineOptions {
            keep_setup_file: false,
            keep_input_file: false,
        },
    );

    assert_eq!(result, Err(MkspkError::KernelNotProduced(kernel.clone())));
    assert!(!setup_path.exists());
    assert!(!input_path.exists());
}

#[test]
fn test_states_to_spk_keeps_input_when_asked() {
    let ws = Workspace::new();
    let kernel = ws.path("halo.bsp");
    let (_, input_path) = companion_paths(&kernel);

    let mut invoker = ws.invoker(FakeMkspk::Concatenate);
    states_to_spk(
        &halo_samples(),
        &kernel,
        &KernelSetupConfig::default(),
        &mut invoker,
        PipelineOptions {
            keep_setup_file: true,
            keep_input_file: true,
        },
    )
    .unwrap();

    let records = std::fs::read_to_string(&input_path).unwrap();
    assert_eq!(records.lines().count(), 5);
}
