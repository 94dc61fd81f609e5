// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Error types for the ROI simulator

use thiserror::Error;

/// Every way a single simulation run can fail.
///
/// A failure aborts the whole run; no partial result is ever produced.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("reference data unavailable: {0}")]
    DataUnavailable(String),

    #[error("region not found in reduction table: {0}")]
    RegionNotFound(String),

    #[error("price column not found in price table: {0}")]
    ColumnNotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("malformed reference data: {0}")]
    MalformedData(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
