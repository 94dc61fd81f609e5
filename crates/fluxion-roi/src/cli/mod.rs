// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! CLI module for the ROI simulator command-line interface.

pub mod args;
pub mod formatters;

pub use args::{Cli, Commands, OutputFormat, RunArgs};
pub use formatters::{CsvFormatter, TableFormatter};
