//! # mkspk setup files
//!
//! - [`config`] – [`KernelSetupConfig`](config::KernelSetupConfig), the typed keywords.
//! - [`writer`] – Fixed-column serialization read by `mkspk`.
//! - [`reader`] – Recovery of the `KEY = value` assignments of an existing file.
pub mod config;
pub mod reader;
pub mod writer;
