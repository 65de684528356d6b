//! # mkspk-setup
//!
//! Prepare, run and check the NAIF `mkspk` utility, which turns a time-tagged list of
//! state vectors into a binary SPK trajectory kernel.
//!
//! ## Modules
//!
//! - [`setup`] – Write and read the fixed-format setup file that parameterizes `mkspk`.
//! - [`trajectory_file`] – Write the delimiter-separated state samples `mkspk` converts.
//! - [`invoker`] – Run `mkspk` and check that the kernel was produced.
//! - [`pipeline`] – States to kernel in one call.
//! - [`periodic_orbits`] – Fetch three-body periodic orbit families from JPL.
pub mod constants;
pub mod invoker;
pub mod mkspk_errors;
pub mod periodic_orbits;
pub mod pipeline;
pub mod setup;
pub mod trajectory_file;

pub use constants::*;
pub use invoker::{BuildOutcome, MkspkInvoker, OverwritePolicy};
pub use mkspk_errors::{MkspkError, ParseSetupError};
pub use pipeline::{states_to_spk, PipelineOptions};
pub use setup::{
    config::{EpochRange, InputDataType, KernelSetupConfig},
    reader::{read_setup_file, SetupEntries},
    writer::write_setup_file,
};
pub use trajectory_file::StateSample;
