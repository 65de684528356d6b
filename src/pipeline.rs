//! # States to SPK pipeline
//!
//! One call turning a list of [`StateSample`] into a `.bsp` kernel:
//!
//! ```text
//! halo.bsp ─┬─> halo_setup.txt   (setup::writer, epoch range taken from the samples)
//!           ├─> halo_input.txt   (trajectory_file)
//!           └─> mkspk            (invoker)
//! ```
//!
//! The two intermediate files live next to the kernel. They are removed once the build
//! is over, whatever its outcome, unless [`PipelineOptions`] asks to keep them. The
//! default keeps the setup file, which documents how the kernel was made, and removes
//! the input file.
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::{
    invoker::{check_kernel_extension, BuildOutcome, MkspkInvoker},
    mkspk_errors::MkspkError,
    setup::{
        config::{EpochRange, KernelSetupConfig},
        writer::write_setup_file,
    },
    trajectory_file::{write_trajectory_file, StateSample},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub keep_setup_file: bool,
    pub keep_input_file: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            keep_setup_file: true,
            keep_input_file: false,
        }
    }
}

/// Paths of the setup and input files used to build `kernel_path`.
///
/// `out/halo.bsp` gives `out/halo_setup.txt` and `out/halo_input.txt`.
pub fn companion_paths(kernel_path: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    let stem = kernel_path.file_stem().unwrap_or_default();
    (
        kernel_path.with_file_name(format!("{stem}_setup.txt")),
        kernel_path.with_file_name(format!("{stem}_input.txt")),
    )
}

/// Build `kernel_path` from `samples`.
///
/// Arguments
/// -----------------
/// * `samples` – States in chronological order.
/// * `kernel_path` – Kernel to produce, must end in `.bsp`.
/// * `config` – Setup keywords; its epoch range is replaced by the one of `samples`.
/// * `invoker` – How to run `mkspk`.
/// * `options` – Which intermediate files survive.
///
/// Return
/// ----------
/// * The [`BuildOutcome`] of the invoker.
/// * The first error met; a failed build is reported before a failed cleanup.
pub fn states_to_spk(
    samples: &[StateSample],
    kernel_path: &Utf8Path,
    config: &KernelSetupConfig,
    invoker: &mut MkspkInvoker,
    options: PipelineOptions,
) -> Result<BuildOutcome, MkspkError> {
    check_kernel_extension(kernel_path)?;
    let (setup_path, input_path) = companion_paths(kernel_path);

    let outcome = build_stages(
        samples,
        kernel_path,
        &setup_path,
        &input_path,
        config,
        invoker,
    );

    let mut cleanup = Ok(());
    if !options.keep_setup_file {
        cleanup = cleanup.and(remove_if_exists(&setup_path));
    }
    if !options.keep_input_file {
        cleanup = cleanup.and(remove_if_exists(&input_path));
    }

    let outcome = outcome?;
    cleanup?;
    Ok(outcome)
}

fn build_stages(
    samples: &[StateSample],
    kernel_path: &Utf8Path,
    setup_path: &Utf8Path,
    input_path: &Utf8Path,
    config: &KernelSetupConfig,
    invoker: &mut MkspkInvoker,
) -> Result<BuildOutcome, MkspkError> {
    let epochs: Vec<f64> = samples.iter().map(StateSample::et_seconds).collect();
    let config = KernelSetupConfig {
        valid_epoch_range: EpochRange::from_epochs(&epochs),
        ..config.clone()
    };

    write_setup_file(setup_path, &config)?;
    write_trajectory_file(input_path, samples, &config)?;
    invoker.build(setup_path, input_path, kernel_path)
}

fn remove_if_exists(path: &Utf8Path) -> Result<(), MkspkError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(%path, "Removed intermediate file");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(MkspkError::io("remove intermediate file", path, e)),
    }
}
