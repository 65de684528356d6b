//! Typed description of an `mkspk` setup file.
//!
//! [`KernelSetupConfig`] carries every keyword the writer knows how to emit.
//! Its [`Default`] is the conventional configuration used to turn a list of
//! ecliptic J2000 states (TDB seconds past J2000, km and km/s) into a type 9
//! SPK segment centered on the Earth–Moon barycenter.
//!
//! The record is meant to be built, written once with
//! [`write_setup_file`](crate::setup::writer::write_setup_file) and dropped: the
//! file on disk is the durable form.
//!
//! # Example
//! ```rust
//! use mkspk_setup::setup::config::KernelSetupConfig;
//!
//! let config = KernelSetupConfig {
//!     object_id: Some(-10005),
//!     reference_frame_name: "ECLIPJ2000".into(),
//!     ..Default::default()
//! };
//! assert_eq!(config.segment_id(), "SPK_STATES_09");
//! ```
use std::{fmt, str::FromStr};

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{EtSeconds, NaifId, SEGMENT_ID_PREFIX},
    mkspk_errors::MkspkError,
};

/// Kind of records found in the trajectory input file (`INPUT_DATA_TYPE`).
///
/// See also
/// ------------
/// * `FromStr` for `InputDataType` – Parses the keyword value, e.g. `"STATES"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputDataType {
    #[default]
    States,
    Elements,
    EqElements,
    TlElements,
}

impl InputDataType {
    /// Keyword value as understood by `mkspk`.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputDataType::States => "STATES",
            InputDataType::Elements => "ELEMENTS",
            InputDataType::EqElements => "EQ_ELEMENTS",
            InputDataType::TlElements => "TL_ELEMENTS",
        }
    }
}

impl fmt::Display for InputDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputDataType {
    type Err = MkspkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STATES" => Ok(InputDataType::States),
            "ELEMENTS" => Ok(InputDataType::Elements),
            "EQ_ELEMENTS" => Ok(InputDataType::EqElements),
            "TL_ELEMENTS" => Ok(InputDataType::TlElements),
            _ => Err(MkspkError::InvalidInputDataType(s.to_string())),
        }
    }
}

/// First and last epoch covered by the trajectory, written as commentary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochRange {
    pub earliest: EtSeconds,
    pub latest: EtSeconds,
}

impl EpochRange {
    pub fn new(earliest: EtSeconds, latest: EtSeconds) -> Self {
        EpochRange { earliest, latest }
    }

    /// Build the range from a list of epochs, keeping its first and last element.
    ///
    /// Return
    /// ----------
    /// * `None` when `epochs` is empty.
    pub fn from_epochs(epochs: &[EtSeconds]) -> Option<Self> {
        Some(EpochRange::new(*epochs.first()?, *epochs.last()?))
    }
}

/// Every keyword of an `mkspk` setup file.
///
/// Fields
/// -----------------
/// * `object_id` / `object_name` – Body whose trajectory is written; `OBJECT_ID` when
///   `object_id` is set, `OBJECT_NAME` otherwise.
/// * `center_id` / `center_name` – Center of motion; `CENTER_ID` when `center_id` is set,
///   `CENTER_NAME` otherwise.
/// * `ignore_first_line` – Number of header lines `mkspk` skips in the input file (0 or 1).
/// * `frame_definition_file_path`, `output_kernel_file_path` – Omitted from the file when `None`.
/// * `valid_epoch_range` – Written below `\begintext`, never read by `mkspk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelSetupConfig {
    pub input_data_type: InputDataType,
    pub output_kernel_type: i32,
    pub object_id: Option<NaifId>,
    pub object_name: Option<String>,
    pub center_id: Option<NaifId>,
    pub center_name: Option<String>,
    pub reference_frame_name: String,
    pub producer_id: String,
    pub data_delimiter: char,
    pub lines_per_record: u32,
    pub time_wrapper: String,
    pub ignore_first_line: u32,
    pub leapseconds_file_path: Utf8PathBuf,
    pub frame_definition_file_path: Option<Utf8PathBuf>,
    pub polynomial_degree: u32,
    pub output_kernel_file_path: Option<Utf8PathBuf>,
    pub valid_epoch_range: Option<EpochRange>,
}

impl Default for KernelSetupConfig {
    fn default() -> Self {
        KernelSetupConfig {
            input_data_type: InputDataType::States,
            output_kernel_type: 9,
            object_id: Some(-10005),
            object_name: Some("FOOBAR".into()),
            center_id: Some(3),
            center_name: Some("EARTH BARYCENTER".into()),
            reference_frame_name: "ECLIPJ2000".into(),
            producer_id: "Yuri".into(),
            data_delimiter: ',',
            lines_per_record: 1,
            time_wrapper: "# ETSECONDS".into(),
            ignore_first_line: 1,
            leapseconds_file_path: "naif0012.tls".into(),
            frame_definition_file_path: None,
            polynomial_degree: 9,
            output_kernel_file_path: None,
            valid_epoch_range: None,
        }
    }
}

impl KernelSetupConfig {
    /// Load a configuration from a JSON document; missing fields take their default value.
    pub fn from_json_str(json: &str) -> Result<Self, MkspkError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Value of the `SEGMENT_ID` keyword, derived from the SPK type.
    pub fn segment_id(&self) -> String {
        format!("{SEGMENT_ID_PREFIX}{}", self.output_kernel_type)
    }

    /// The delimiter as the single byte expected by the CSV writer.
    ///
    /// Return
    /// ----------
    /// * [`MkspkError::InvalidDelimiter`] if the delimiter is not ASCII.
    pub fn delimiter_byte(&self) -> Result<u8, MkspkError> {
        if self.data_delimiter.is_ascii() {
            Ok(self.data_delimiter as u8)
        } else {
            Err(MkspkError::InvalidDelimiter(self.data_delimiter))
        }
    }
}
