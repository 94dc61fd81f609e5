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

//! Simulation orchestration.
//!
//! One run = validate input, load reference data, project the baseline,
//! evaluate every configuration, pick a recommendation, project it long-term.
//! Any failure aborts the run before a [`SimulationResult`] exists.

use crate::baseline::{project_baseline, resolve_monthly_cost};
use crate::config::SimulatorConfig;
use crate::error::{Result, SimulationError};
use crate::evaluator::{EvaluationInputs, evaluate_all};
use crate::projection::project;
use crate::recommendation::recommend;
use crate::reference::{ReferenceData, ReferenceDataClient, load_reference_data};
use crate::tax;
use crate::types::{SimulationRequest, SimulationResult};
use tracing::info;

/// Check the request before any network traffic. Returns the monthly bill.
pub fn validate_request(config: &SimulatorConfig, request: &SimulationRequest) -> Result<f64> {
    if request.region.trim().is_empty() {
        return Err(SimulationError::InvalidInput(
            "a region must be selected".to_owned(),
        ));
    }
    tax::tax_rate(&config.tax, request.tax.business)?;
    resolve_monthly_cost(request.consumption, &config.tariff)
}

/// Run the computation on already loaded reference data. Never blocks or yields.
pub fn simulate(
    config: &SimulatorConfig,
    request: &SimulationRequest,
    reference: &ReferenceData,
) -> Result<SimulationResult> {
    let monthly_cost = validate_request(config, request)?;
    let region = &reference.region;

    let baseline = project_baseline(
        monthly_cost,
        &reference.monthly_prices,
        region.reduction_rate_percent,
    );

    let inputs = EvaluationInputs {
        monthly_baseline_cost: monthly_cost,
        annual_baseline_cost: baseline.annual_baseline_cost,
        reduction_rate_percent: region.reduction_rate_percent,
        tax: request.tax,
    };
    let configurations = evaluate_all(config, &inputs)?;

    let recommendation = recommend(&configurations, &config.horizon).ok_or_else(|| {
        SimulationError::InvalidInput("no equipment configuration to compare".to_owned())
    })?;
    let recommended = configurations
        .iter()
        .find(|c| c.unit_count == recommendation.unit_count)
        .ok_or_else(|| {
            SimulationError::InvalidInput(format!(
                "recommended unit count {} was not evaluated",
                recommendation.unit_count
            ))
        })?;
    let projection = project(config, recommended, baseline.annual_baseline_cost);

    info!(
        "Simulation for {} complete: annual baseline {:.0}, recommended {} unit(s)",
        region.area, baseline.annual_baseline_cost, recommendation.unit_count
    );

    Ok(SimulationResult {
        region: region.clone(),
        monthly_baseline_cost: baseline.monthly_baseline_cost,
        annual_baseline_cost: baseline.annual_baseline_cost,
        annual_reduced_cost: baseline.annual_reduced_cost,
        annual_savings: baseline.annual_savings,
        average_monthly_savings: baseline.average_monthly_savings,
        monthly_costs: baseline.monthly_costs,
        configurations,
        recommendation,
        projection,
    })
}

/// Full run against the configured data sources.
///
/// The returned future owns everything it touches; dropping it mid-fetch
/// discards the run without side effects.
pub async fn run_simulation(
    config: &SimulatorConfig,
    request: &SimulationRequest,
) -> Result<SimulationResult> {
    let client = ReferenceDataClient::new(&config.data_sources)?;
    run_simulation_with(&client, config, request).await
}

pub async fn run_simulation_with(
    client: &ReferenceDataClient,
    config: &SimulatorConfig,
    request: &SimulationRequest,
) -> Result<SimulationResult> {
    validate_request(config, request)?;
    let reference = load_reference_data(client, &request.region).await?;
    simulate(config, request, &reference)
}
