//! # Constants for mkspk setup files
//!
//! This module centralizes the **fixed literals** of the NAIF `mkspk` setup-file
//! grammar and a few defaults shared by the writer, the reader and the invoker.
//!
//! ## Overview
//!
//! - Column layout of a `KEY = value` line
//! - Section markers (`\begindata`, `\begintext`)
//! - Literal values that are always emitted (`DATA_ORDER`, `INPUT_DATA_UNITS`)
//! - Kernel file extension and the default name of the external executable

// -------------------------------------------------------------------------------------------------
// Setup-file layout
// -------------------------------------------------------------------------------------------------

/// Indentation written in front of every keyword line
pub const KEY_INDENT: &str = "   ";

/// Width of the keyword field, padding included (`"INPUT_DATA_TYPE   "`)
pub const KEY_WIDTH: usize = 18;

/// Column where the value of a keyword line starts (indent + key + `"= "`)
pub const VALUE_COLUMN: usize = KEY_INDENT.len() + KEY_WIDTH + 2;

/// Marker opening the machine-readable section
pub const BEGIN_DATA: &str = "\\begindata";

/// Marker opening the free-text section
pub const BEGIN_TEXT: &str = "\\begintext";

/// Prefix shared by every section marker line
pub const SECTION_TOKEN: &str = "\\begin";

// -------------------------------------------------------------------------------------------------
// Literal values
// -------------------------------------------------------------------------------------------------

/// Order of the fields in each record of the trajectory input file
pub const DATA_ORDER: &str = "EPOCH X Y Z VX VY VZ";

/// Units of the trajectory input file
pub const INPUT_DATA_UNITS: [&str; 2] = ["ANGLES=DEGREES", "DISTANCES=km"];

/// Prefix of the generated `SEGMENT_ID`, completed by the SPK type
pub const SEGMENT_ID_PREFIX: &str = "SPK_STATES_0";

// -------------------------------------------------------------------------------------------------
// Kernel build
// -------------------------------------------------------------------------------------------------

/// Extension the external tool expects for its output kernel
pub const SPK_EXTENSION: &str = "bsp";

/// Name of the NAIF utility looked up in `PATH`
pub const MKSPK_EXECUTABLE: &str = "mkspk";

/// Environment variable overriding [`MKSPK_EXECUTABLE`]
pub const MKSPK_EXE_ENV: &str = "MKSPK_EXE";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Ephemeris time, TDB seconds past J2000
pub type EtSeconds = f64;

/// NAIF integer code of a body
pub type NaifId = i32;
