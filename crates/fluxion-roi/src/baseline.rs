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

//! Seasonal baseline cost projection.
//!
//! A single declared monthly bill is spread over the calendar year using the
//! region's historical monthly price profile, then reduced by the region's
//! reduction rate.

use crate::config::TariffConfig;
use crate::error::{Result, SimulationError};
use crate::reference::MonthlyPrices;
use crate::types::{ConsumptionInput, MonthlyCostRow};
use chrono::Month;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineProjection {
    /// Declared or usage-derived bill the profile was scaled from
    pub monthly_baseline_cost: f64,
    /// January to December
    pub monthly_costs: Vec<MonthlyCostRow>,
    pub annual_baseline_cost: f64,
    pub annual_reduced_cost: f64,
    pub annual_savings: f64,
    pub average_monthly_savings: f64,
}

/// Turn the user's consumption input into a monthly bill.
///
/// Usage is converted with the retail unit price. Zero, negative and
/// non-finite values are rejected.
pub fn resolve_monthly_cost(input: ConsumptionInput, tariff: &TariffConfig) -> Result<f64> {
    let (value, what) = match input {
        ConsumptionInput::MonthlyCost(cost) => (cost, "monthly cost"),
        ConsumptionInput::MonthlyUsage(kwh) => (kwh, "monthly usage"),
    };
    if !value.is_finite() || value <= 0.0 {
        return Err(SimulationError::InvalidInput(format!(
            "{what} must be a positive number, got {value}"
        )));
    }

    Ok(match input {
        ConsumptionInput::MonthlyCost(cost) => cost,
        ConsumptionInput::MonthlyUsage(kwh) => kwh * tariff.retail_unit_price,
    })
}

/// Reduced cost for a month, rounded to the nearest yen
pub fn reduced_cost(baseline: f64, reduction_rate_percent: f64) -> f64 {
    (baseline * (1.0 - reduction_rate_percent / 100.0)).round()
}

pub fn month_label(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or_else(|| format!("Month {month}"), |m| m.name().to_owned())
}

pub fn project_baseline(
    monthly_cost: f64,
    prices: &MonthlyPrices,
    reduction_rate_percent: f64,
) -> BaselineProjection {
    let monthly_costs: Vec<MonthlyCostRow> = (1..=12)
        .map(|month| {
            let baseline_cost = (monthly_cost * prices.variation_ratio(month)).round();
            MonthlyCostRow {
                month,
                label: month_label(month),
                baseline_cost,
                reduced_cost: reduced_cost(baseline_cost, reduction_rate_percent),
            }
        })
        .collect();

    let annual_baseline_cost: f64 = monthly_costs.iter().map(|r| r.baseline_cost).sum();
    let annual_reduced_cost: f64 = monthly_costs.iter().map(|r| r.reduced_cost).sum();
    let annual_savings = annual_baseline_cost - annual_reduced_cost;

    BaselineProjection {
        monthly_baseline_cost: monthly_cost,
        monthly_costs,
        annual_baseline_cost,
        annual_reduced_cost,
        annual_savings,
        average_monthly_savings: annual_savings / 12.0,
    }
}
