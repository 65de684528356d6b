//! # Setup-file writer
//!
//! Serializes a [`KernelSetupConfig`] into the fixed-column text layout parsed by
//! the NAIF `mkspk` utility.
//!
//! ## Layout
//! -----------------
//! ```text
//! \begindata
//!    INPUT_DATA_TYPE   = 'STATES'
//!    OUTPUT_SPK_TYPE   = 9
//!    OBJECT_ID         = -10005
//!    ...
//! \begintext
//!    EARLIEST_EPOCH    = 764000000.0
//!    LATEST_EPOCH      = 765500000.0
//! ```
//!
//! Every keyword line is `KEY_INDENT` + key padded to `KEY_WIDTH` + `"= "` + value,
//! so all values start at [`VALUE_COLUMN`](crate::constants::VALUE_COLUMN).
//! Strings are single-quoted (an embedded `'` is doubled), integers are bare.
//!
//! ## Identification keywords
//! -----------------
//! * `OBJECT_ID` is written when `object_id` is set, `OBJECT_NAME` otherwise.
//!   A configuration carrying both (the default one does) keeps the historical
//!   output: a set `object_name` yields the `OBJECT_ID` line.
//! * `CENTER_ID` is written when `center_id` is set, `CENTER_NAME` otherwise.
//!
//! A body or center given by neither field is reported as
//! [`MkspkError::MissingSetupValue`]. String values may not contain a line break
//! ([`MkspkError::LineBreakInValue`]), it would split the keyword over two lines.
use std::fmt::Display;

use camino::Utf8Path;
use itertools::Itertools;
use tracing::info;

use crate::{
    constants::{BEGIN_DATA, BEGIN_TEXT, DATA_ORDER, INPUT_DATA_UNITS, KEY_INDENT, KEY_WIDTH},
    mkspk_errors::MkspkError,
    setup::config::KernelSetupConfig,
};

/// Quote a string value the way the NAIF text-kernel parser reads it back.
fn quoted(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Accumulates the lines of a setup file.
#[derive(Default)]
struct SetupLines(Vec<String>);

impl SetupLines {
    fn marker(&mut self, marker: &str) {
        self.0.push(marker.to_string());
    }

    fn bare(&mut self, key: &str, value: impl Display) {
        self.0
            .push(format!("{KEY_INDENT}{key:<width$}= {value}", width = KEY_WIDTH));
    }

    fn text(&mut self, key: &'static str, value: &str) -> Result<(), MkspkError> {
        if value.contains(['\n', '\r']) {
            return Err(MkspkError::LineBreakInValue(key));
        }
        self.bare(key, quoted(value));
        Ok(())
    }

    fn finish(self) -> String {
        let mut content = self.0.iter().join("\n");
        content.push('\n');
        content
    }
}

/// Render the full content of a setup file.
///
/// Arguments
/// -----------------
/// * `config` – The keywords to serialize.
///
/// Return
/// ----------
/// * The file content, newline terminated.
/// * [`MkspkError::MissingSetupValue`] when the body or the center has neither an id nor a name.
/// * [`MkspkError::LineBreakInValue`] when a string value spans several lines.
pub fn render_setup(config: &KernelSetupConfig) -> Result<String, MkspkError> {
    let mut lines = SetupLines::default();

    lines.marker(BEGIN_DATA);
    lines.text("INPUT_DATA_TYPE", config.input_data_type.as_str())?;
    lines.bare("OUTPUT_SPK_TYPE", config.output_kernel_type);

    match (config.object_id, &config.object_name) {
        (Some(object_id), _) => lines.bare("OBJECT_ID", object_id),
        (None, Some(object_name)) => lines.text("OBJECT_NAME", object_name)?,
        (None, None) => return Err(MkspkError::MissingSetupValue("OBJECT_ID")),
    }

    match (config.center_id, &config.center_name) {
        (Some(center_id), _) => lines.bare("CENTER_ID", center_id),
        (None, Some(center_name)) => lines.text("CENTER_NAME", center_name)?,
        (None, None) => return Err(MkspkError::MissingSetupValue("CENTER_NAME")),
    }

    lines.text("REF_FRAME_NAME", &config.reference_frame_name)?;
    lines.text("PRODUCER_ID", &config.producer_id)?;
    lines.text("DATA_ORDER", DATA_ORDER)?;
    lines.bare(
        "INPUT_DATA_UNITS",
        format!("({})", INPUT_DATA_UNITS.iter().map(|u| quoted(u)).join(" ")),
    );
    lines.text("DATA_DELIMITER", &config.data_delimiter.to_string())?;
    lines.bare("LINES_PER_RECORD", config.lines_per_record);
    lines.text("TIME_WRAPPER", &config.time_wrapper)?;
    lines.bare("IGNORE_FIRST_LINE", config.ignore_first_line);
    lines.text("LEAPSECONDS_FILE", config.leapseconds_file_path.as_str())?;

    if let Some(frame_def) = &config.frame_definition_file_path {
        lines.text("FRAME_DEF_FILE", frame_def.as_str())?;
    }

    lines.bare("POLYNOM_DEGREE", config.polynomial_degree);
    lines.text("SEGMENT_ID", &config.segment_id())?;

    if let Some(output) = &config.output_kernel_file_path {
        lines.text("OUTPUT_SPK_FILE", output.as_str())?;
    }

    lines.marker(BEGIN_TEXT);
    if let Some(range) = &config.valid_epoch_range {
        lines.bare("EARLIEST_EPOCH", format!("{:?}", range.earliest));
        lines.bare("LATEST_EPOCH", format!("{:?}", range.latest));
    }

    Ok(lines.finish())
}

/// Write a setup file, creating or truncating `path`.
///
/// Arguments
/// -----------------
/// * `path` – Destination of the setup file.
/// * `config` – The keywords to serialize.
///
/// Return
/// ----------
/// * [`MkspkError::Io`] if the file cannot be written; nothing is retried.
/// * Any error of [`render_setup`]; in that case the file is left untouched.
pub fn write_setup_file(path: &Utf8Path, config: &KernelSetupConfig) -> Result<(), MkspkError> {
    let content = render_setup(config)?;
    std::fs::write(path, content).map_err(|e| MkspkError::io("write setup file", path, e))?;
    info!(%path, "Generated setup file");
    Ok(())
}

#[cfg(test)]
mod setup_writer_test {
    use super::*;
    use crate::setup::config::EpochRange;

    fn lines_of(config: &KernelSetupConfig) -> Vec<String> {
        render_setup(config)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_render_default_config() {
        let expected = "\\begindata
   INPUT_DATA_TYPE   = 'STATES'
   OUTPUT_SPK_TYPE   = 9
   OBJECT_ID         = -10005
   CENTER_ID         = 3
   REF_FRAME_NAME    = 'ECLIPJ2000'
   PRODUCER_ID       = 'Yuri'
   DATA_ORDER        = 'EPOCH X Y Z VX VY VZ'
   INPUT_DATA_UNITS  = ('ANGLES=DEGREES' 'DISTANCES=km')
   DATA_DELIMITER    = ','
   LINES_PER_RECORD  = 1
   TIME_WRAPPER      = '# ETSECONDS'
   IGNORE_FIRST_LINE = 1
   LEAPSECONDS_FILE  = 'naif0012.tls'
   POLYNOM_DEGREE    = 9
   SEGMENT_ID        = 'SPK_STATES_09'
\\begintext
";
        assert_eq!(render_setup(&KernelSetupConfig::default()).unwrap(), expected);
    }

    #[test]
    fn test_id_and_name_keep_object_id() {
        let lines = lines_of(&KernelSetupConfig::default());
        assert!(lines.iter().any(|l| l.starts_with("   OBJECT_ID ")));
        assert!(!lines.iter().any(|l| l.contains("OBJECT_NAME")));
    }

    #[test]
    fn test_object_id_only() {
        let config = KernelSetupConfig {
            object_id: Some(-10005),
            object_name: None,
            ..Default::default()
        };
        let lines = lines_of(&config);
        assert!(lines.contains(&"   OBJECT_ID         = -10005".to_string()));
        assert!(!lines.iter().any(|l| l.contains("OBJECT_NAME")));
    }

    #[test]
    fn test_object_name_only() {
        let config = KernelSetupConfig {
            object_id: None,
            object_name: Some("HALO".into()),
            ..Default::default()
        };
        let lines = lines_of(&config);
        assert!(lines.contains(&"   OBJECT_NAME       = 'HALO'".to_string()));
        assert!(!lines.iter().any(|l| l.contains("OBJECT_ID")));
    }

    #[test]
    fn test_object_without_id_or_name() {
        let config = KernelSetupConfig {
            object_id: None,
            object_name: None,
            ..Default::default()
        };
        assert_eq!(
            render_setup(&config),
            Err(MkspkError::MissingSetupValue("OBJECT_ID"))
        );
    }

    #[test]
    fn test_center_selection() {
        let by_name = KernelSetupConfig {
            center_id: None,
            center_name: Some("MOON".into()),
            ..Default::default()
        };
        let lines = lines_of(&by_name);
        assert!(lines.contains(&"   CENTER_NAME       = 'MOON'".to_string()));
        assert!(!lines.iter().any(|l| l.contains("CENTER_ID")));

        let by_id = KernelSetupConfig {
            center_name: None,
            ..Default::default()
        };
        let lines = lines_of(&by_id);
        assert!(lines.contains(&"   CENTER_ID         = 3".to_string()));
        assert!(!lines.iter().any(|l| l.contains("CENTER_NAME")));

        let neither = KernelSetupConfig {
            center_id: None,
            center_name: None,
            ..Default::default()
        };
        assert_eq!(
            render_setup(&neither),
            Err(MkspkError::MissingSetupValue("CENTER_NAME"))
        );
    }

    #[test]
    fn test_optional_files_and_epoch_range() {
        let config = KernelSetupConfig {
            frame_definition_file_path: Some("earth_moon_rotating.tf".into()),
            output_kernel_file_path: Some("halo.bsp".into()),
            valid_epoch_range: Some(EpochRange::new(7.64e8, 7.655e8)),
            ..Default::default()
        };
        let lines = lines_of(&config);

        let frame = lines.iter().position(|l| l.contains("FRAME_DEF_FILE")).unwrap();
        let degree = lines.iter().position(|l| l.contains("POLYNOM_DEGREE")).unwrap();
        let output = lines.iter().position(|l| l.contains("OUTPUT_SPK_FILE")).unwrap();
        let text = lines.iter().position(|l| l == "\\begintext").unwrap();
        assert!(frame < degree && degree < output && output < text);

        assert_eq!(lines[frame], "   FRAME_DEF_FILE    = 'earth_moon_rotating.tf'");
        assert_eq!(lines[output], "   OUTPUT_SPK_FILE   = 'halo.bsp'");
        assert_eq!(
            &lines[text + 1..],
            [
                "   EARLIEST_EPOCH    = 764000000.0",
                "   LATEST_EPOCH      = 765500000.0"
            ]
        );
    }

    #[test]
    fn test_quote_is_doubled() {
        let config = KernelSetupConfig {
            producer_id: "O'Neill".into(),
            ..Default::default()
        };
        assert!(lines_of(&config).contains(&"   PRODUCER_ID       = 'O''Neill'".to_string()));
    }

    #[test]
    fn test_line_break_in_value_is_rejected() {
        let config = KernelSetupConfig {
            producer_id: "Yuri'\n   OBJECT_ID         = 1\n   X = '".into(),
            ..Default::default()
        };
        assert_eq!(
            render_setup(&config),
            Err(MkspkError::LineBreakInValue("PRODUCER_ID"))
        );

        let config = KernelSetupConfig {
            output_kernel_file_path: Some("halo\r.bsp".into()),
            ..Default::default()
        };
        assert_eq!(
            render_setup(&config),
            Err(MkspkError::LineBreakInValue("OUTPUT_SPK_FILE"))
        );
    }

    #[test]
    fn test_write_setup_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8Path::from_path(dir.path())
            .unwrap()
            .join("missing_dir")
            .join("setup.txt");
        let err = write_setup_file(&path, &KernelSetupConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            MkspkError::Io { context: "write setup file", path: ref p, .. } if *p == path
        ));
    }
}
