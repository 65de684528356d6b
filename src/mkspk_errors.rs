use std::time::Duration;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Line-level failures of the setup-file reader.
///
/// Variants
/// -----------------
/// * `OutsideSection` – Non-blank text found before the first `\begindata` / `\begintext` marker.
/// * `MalformedLine` – A data-section line that is not of the form `KEY = value`; payload is the unparsed tail.
/// * `UnterminatedQuote` – A quoted value without its closing `'`.
#[derive(Error, Debug, PartialEq)]
pub enum ParseSetupError {
    #[error("The line is outside of any \\begindata or \\begintext section")]
    OutsideSection,
    #[error("Expected `KEY = value`, could not parse: {0}")]
    MalformedLine(String),
    #[error("Unterminated quoted value: {0}")]
    UnterminatedQuote(String),
}

#[derive(Error, Debug)]
pub enum MkspkError {
    #[error("Output kernel must have the .bsp extension: {0}")]
    InvalidKernelExtension(Utf8PathBuf),

    #[error("mkspk ran but did not produce the kernel: {0}")]
    KernelNotProduced(Utf8PathBuf),

    #[error("Unable to {context} {path}: {source}")]
    Io {
        context: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error while parsing setup file line {line_number} ({line:?}): {source}")]
    SetupParse {
        line_number: usize,
        line: String,
        #[source]
        source: ParseSetupError,
    },

    #[error("Setup field {0} selected for output but its value is missing")]
    MissingSetupValue(&'static str),

    #[error("Setup field {0} contains a line break")]
    LineBreakInValue(&'static str),

    #[error("Invalid data delimiter {0:?}: mkspk expects a single ASCII character")]
    InvalidDelimiter(char),

    #[error("Cannot write a trajectory file without state samples")]
    EmptyTrajectory,

    #[error("CSV writer error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid configuration document: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unable to launch {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("Invalid input data type: {0}")]
    InvalidInputDataType(String),

    #[cfg(feature = "jpl-download")]
    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
}

impl MkspkError {
    pub(crate) fn io(
        context: &'static str,
        path: impl Into<Utf8PathBuf>,
        source: std::io::Error,
    ) -> Self {
        MkspkError::Io {
            context,
            path: path.into(),
            source,
        }
    }
}

impl PartialEq for MkspkError {
    fn eq(&self, other: &Self) -> bool {
        use MkspkError::*;
        match (self, other) {
            (InvalidKernelExtension(a), InvalidKernelExtension(b)) => a == b,
            (KernelNotProduced(a), KernelNotProduced(b)) => a == b,
            (MissingSetupValue(a), MissingSetupValue(b)) => a == b,
            (LineBreakInValue(a), LineBreakInValue(b)) => a == b,
            (InvalidDelimiter(a), InvalidDelimiter(b)) => a == b,
            (InvalidInputDataType(a), InvalidInputDataType(b)) => a == b,
            (
                SetupParse {
                    line_number: la,
                    source: sa,
                    ..
                },
                SetupParse {
                    line_number: lb,
                    source: sb,
                    ..
                },
            ) => la == lb && sa == sb,
            (
                Io {
                    context: ca,
                    path: pa,
                    ..
                },
                Io {
                    context: cb,
                    path: pb,
                    ..
                },
            ) => ca == cb && pa == pb,
            (Timeout { program: a, .. }, Timeout { program: b, .. }) => a == b,
            (SpawnFailed { program: a, .. }, SpawnFailed { program: b, .. }) => a == b,

            // not comparable: equal when same variant
            (CsvError(_), CsvError(_)) => true,
            (JsonError(_), JsonError(_)) => true,
            #[cfg(feature = "jpl-download")]
            (ReqwestError(_), ReqwestError(_)) => true,

            (EmptyTrajectory, EmptyTrajectory) => true,

            _ => false,
        }
    }
}
