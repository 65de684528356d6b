//! # Trajectory input file
//!
//! Writes the delimiter-separated state samples that `mkspk` reads next to the setup
//! file. Each record holds `EPOCH X Y Z VX VY VZ` on one line, matching the
//! `DATA_ORDER` keyword, with:
//!
//! - the epoch in **TDB seconds past J2000** (`TIME_WRAPPER = '# ETSECONDS'`),
//! - positions in **km** and velocities in **km/s**,
//! - the delimiter of [`KernelSetupConfig::data_delimiter`],
//! - `ignore_first_line` header rows in front of the data.
use camino::Utf8Path;
use hifitime::Epoch;
use nalgebra::Vector6;
use tracing::info;

use crate::{
    constants::EtSeconds, mkspk_errors::MkspkError, setup::config::KernelSetupConfig,
};

const HEADER: [&str; 7] = ["et", "x", "y", "z", "vx", "vy", "vz"];

/// One state of the trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateSample {
    pub epoch: Epoch,
    /// `[x, y, z, vx, vy, vz]` in km and km/s
    pub state: Vector6<f64>,
}

impl StateSample {
    pub fn new(epoch: Epoch, state: Vector6<f64>) -> Self {
        StateSample { epoch, state }
    }

    /// Sample from an ephemeris time in TDB seconds past J2000.
    pub fn from_et_seconds(et: EtSeconds, state: Vector6<f64>) -> Self {
        StateSample::new(Epoch::from_et_seconds(et), state)
    }

    pub fn et_seconds(&self) -> EtSeconds {
        self.epoch.to_et_seconds()
    }
}

/// Write the trajectory input file of `mkspk`.
///
/// Arguments
/// -----------------
/// * `path` – Destination, created or truncated.
/// * `samples` – States in chronological order.
/// * `config` – Provides the delimiter and the number of header rows.
///
/// Return
/// ----------
/// * [`MkspkError::EmptyTrajectory`] when `samples` is empty.
/// * [`MkspkError::InvalidDelimiter`] when the delimiter is not a single ASCII byte.
/// * [`MkspkError::Io`] or [`MkspkError::CsvError`] when writing fails.
pub fn write_trajectory_file(
    path: &Utf8Path,
    samples: &[StateSample],
    config: &KernelSetupConfig,
) -> Result<(), MkspkError> {
    if samples.is_empty() {
        return Err(MkspkError::EmptyTrajectory);
    }
    let delimiter = config.delimiter_byte()?;

    let file = std::fs::File::create(path)
        .map_err(|e| MkspkError::io("create trajectory file", path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(file);

    for _ in 0..config.ignore_first_line {
        writer.write_record(HEADER)?;
    }

    for sample in samples {
        let s = &sample.state;
        writer.serialize((sample.et_seconds(), s[0], s[1], s[2], s[3], s[4], s[5]))?;
    }

    writer
        .flush()
        .map_err(|e| MkspkError::io("write trajectory file", path, e))?;
    info!(%path, records = samples.len(), "Generated trajectory file");
    Ok(())
}
