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

//! FluxION ROI Simulator
//!
//! Estimates what a battery installation saves a customer and how quickly it
//! pays for itself. Given a region, a monthly bill (or usage) and a tax
//! profile, it:
//!
//! - loads the regional reduction table and the historical power price table
//! - spreads the bill over the year using the region's seasonal price profile
//! - evaluates 1 to 4 units for coverage, net investment, payback and ROI under
//!   three electricity price growth scenarios
//! - recommends one configuration and projects it 25 years ahead
//!
//! # Example
//!
//! ```ignore
//! use fluxion_roi::{ConsumptionInput, SimulationRequest, SimulatorConfig, TaxProfile};
//!
//! let config = SimulatorConfig::default();
//! let request = SimulationRequest {
//!     region: "Tokyo".to_owned(),
//!     consumption: ConsumptionInput::MonthlyCost(80_000.0),
//!     tax: TaxProfile::individual(),
//! };
//! let result = fluxion_roi::run_simulation(&config, &request).await?;
//! println!("{}", result.recommendation.rationale);
//! ```

pub mod baseline;
pub mod cli;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod projection;
pub mod recommendation;
pub mod reference;
pub mod simulation;
pub mod tax;
pub mod types;

pub use config::SimulatorConfig;
pub use error::{Result, SimulationError};
pub use simulation::{run_simulation, run_simulation_with, simulate};
pub use types::{
    BusinessType, ConsumptionInput, CorporateTaxBracket, CreditRate, EquipmentConfiguration,
    GrowthScenario, IncomeTaxBracket, Recommendation, RecommendationReason, RegionProfile,
    SimulationRequest, SimulationResult, TaxIncentive, TaxProfile,
};
