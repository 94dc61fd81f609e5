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

//! Long-horizon cost projection of the recommended configuration, for charting

use crate::config::SimulatorConfig;
use crate::evaluator::{crossing_year, cumulative_savings, growth_factor};
use crate::types::{
    EquipmentConfiguration, GrowthScenario, LongHorizonProjection, ScenarioProjection,
};

/// Project yearly costs with and without the equipment for years `0..=projection_years`
/// under every growth scenario.
///
/// Year 0 is the purchase date at today's prices. Year `y >= 1` is grown by
/// `y - 1` years, the same indexing the cumulative savings use, so
/// `cumulative_savings[y]` is the running sum of `cost_without - cost_with`
/// over years `1..=y`.
pub fn project(
    config: &SimulatorConfig,
    recommended: &EquipmentConfiguration,
    annual_baseline: f64,
) -> LongHorizonProjection {
    let horizon = &config.horizon;
    let years: Vec<u32> = (0..=horizon.projection_years).collect();

    let scenarios = GrowthScenario::ALL
        .iter()
        .map(|scenario| {
            let rate = config.scenarios.rate(*scenario);
            let cost_without: Vec<f64> = years
                .iter()
                .map(|year| annual_baseline * growth_factor(rate, year.saturating_sub(1)))
                .collect();
            let cost_with: Vec<f64> = years
                .iter()
                .map(|year| {
                    (annual_baseline - recommended.annual_reduction)
                        * growth_factor(rate, year.saturating_sub(1))
                })
                .collect();

            let cumulative = cumulative_savings(
                annual_baseline,
                recommended.annual_reduction,
                rate,
                horizon.projection_years,
            );
            let net_position = cumulative
                .iter()
                .map(|saved| saved - recommended.net_investment)
                .collect();

            ScenarioProjection {
                scenario: *scenario,
                cost_without,
                cost_with,
                payback_year: crossing_year(&cumulative, recommended.net_investment),
                savings_at_checkpoint: cumulative
                    .get(horizon.savings_checkpoint_year as usize)
                    .copied()
                    .unwrap_or_default(),
                cumulative_savings: cumulative,
                net_position,
            }
        })
        .collect();

    LongHorizonProjection {
        unit_count: recommended.unit_count,
        years,
        checkpoint_year: horizon.savings_checkpoint_year,
        scenarios,
    }
}
