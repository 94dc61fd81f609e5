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

//! Equipment configuration evaluation.
//!
//! Every candidate unit count goes through [`evaluate_configuration`]: cost and
//! tax, peak-hour coverage, effective reduction, then payback and ROI under
//! each growth scenario.

use crate::config::SimulatorConfig;
use crate::error::Result;
use crate::tax;
use crate::types::{EquipmentConfiguration, GrowthScenario, ScenarioOutcome, TaxProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inputs shared by every configuration of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInputs {
    pub monthly_baseline_cost: f64,
    pub annual_baseline_cost: f64,
    pub reduction_rate_percent: f64,
    pub tax: TaxProfile,
}

/// Price multiplier after `years_elapsed` years of growth at `rate`
pub fn growth_factor(rate: f64, years_elapsed: u32) -> f64 {
    (1.0 + rate).powf(f64::from(years_elapsed))
}

/// Share of high-price-hour usage `unit_count` units can serve, clamped to 0-1
pub fn coverage_rate(config: &SimulatorConfig, monthly_baseline_cost: f64, unit_count: u8) -> f64 {
    let daily_capacity_kwh = f64::from(unit_count) * config.equipment.unit_daily_capacity_kwh;

    let daily_usage_kwh = monthly_baseline_cost * config.usage.variable_cost_ratio
        / config.tariff.retail_unit_price
        / config.tariff.days_per_month;
    let peak_usage_kwh = daily_usage_kwh * config.usage.high_price_hour_ratio;

    if peak_usage_kwh <= 0.0 {
        return 1.0;
    }
    (daily_capacity_kwh / peak_usage_kwh).clamp(0.0, 1.0)
}

/// Cumulative savings by year end; index 0 is the purchase date (0.0).
///
/// Year `y` pays `annual_baseline * g` before the equipment and
/// `(annual_baseline - annual_reduction) * g` after it, with
/// `g = (1 + rate)^(y - 1)`.
pub fn cumulative_savings(
    annual_baseline: f64,
    annual_reduction: f64,
    rate: f64,
    years: u32,
) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(years as usize + 1);
    let mut total = 0.0;
    cumulative.push(total);
    for year in 1..=years {
        let g = growth_factor(rate, year - 1);
        let before = annual_baseline * g;
        let after = (annual_baseline - annual_reduction) * g;
        total += before - after;
        cumulative.push(total);
    }
    cumulative
}

/// First fractional year at which `cumulative` reaches `target`.
///
/// Linear interpolation inside the crossing year. Only the years present in
/// `cumulative` are searched; `None` means no crossing within them.
pub fn crossing_year(cumulative: &[f64], target: f64) -> Option<f64> {
    if cumulative.first().is_some_and(|start| *start >= target) {
        return Some(0.0);
    }
    for (year, pair) in cumulative.windows(2).enumerate() {
        let (before, after) = (pair[0], pair[1]);
        if after >= target {
            let gained = after - before;
            let fraction = if gained > 0.0 {
                (target - before) / gained
            } else {
                1.0
            };
            return Some(year as f64 + fraction);
        }
    }
    None
}

/// Return on investment (%) given savings accumulated over the horizon
pub fn roi_percent(cumulative_over_horizon: f64, net_investment: f64) -> f64 {
    if net_investment <= 0.0 {
        return 0.0;
    }
    (cumulative_over_horizon - net_investment) / net_investment * 100.0
}

/// Payback and ROI of one configuration under one scenario
pub fn scenario_outcome(
    config: &SimulatorConfig,
    scenario: GrowthScenario,
    annual_baseline: f64,
    annual_reduction: f64,
    net_investment: f64,
) -> ScenarioOutcome {
    let horizon = &config.horizon;
    let years = horizon.payback_search_years.max(horizon.warranty_years);
    let cumulative = cumulative_savings(
        annual_baseline,
        annual_reduction,
        config.scenarios.rate(scenario),
        years,
    );

    let search = cumulative
        .get(..=horizon.payback_search_years as usize)
        .unwrap_or(&cumulative);
    let payback_year = crossing_year(search, net_investment);

    let over_warranty = cumulative
        .get(horizon.warranty_years as usize)
        .copied()
        .unwrap_or_default();

    ScenarioOutcome {
        scenario,
        payback_year,
        roi_percent: roi_percent(over_warranty, net_investment),
    }
}

pub fn evaluate_configuration(
    config: &SimulatorConfig,
    unit_count: u8,
    inputs: &EvaluationInputs,
) -> Result<EquipmentConfiguration> {
    let equipment = &config.equipment;
    let units = f64::from(unit_count);

    let product_price = units * equipment.unit_price;
    let installation_cost = units
        * equipment.unit_installation_cost
        * equipment.installation_discount(unit_count);
    let total_investment = product_price + installation_cost;
    let tax_savings = tax::tax_savings(&config.tax, &inputs.tax, product_price)?;
    let net_investment = total_investment - tax_savings;

    let coverage_rate = coverage_rate(config, inputs.monthly_baseline_cost, unit_count);
    let annual_reduction =
        inputs.reduction_rate_percent / 100.0 * coverage_rate * inputs.annual_baseline_cost;

    let outcomes = GrowthScenario::ALL
        .iter()
        .map(|scenario| {
            scenario_outcome(
                config,
                *scenario,
                inputs.annual_baseline_cost,
                annual_reduction,
                net_investment,
            )
        })
        .collect();

    debug!(
        "Evaluated {unit_count} unit(s): net={net_investment:.0}, coverage={:.1}%, reduction={annual_reduction:.0}/yr",
        coverage_rate * 100.0
    );

    Ok(EquipmentConfiguration {
        unit_count,
        product_price,
        installation_cost,
        total_investment,
        tax_savings,
        net_investment,
        annual_reduction,
        coverage_rate,
        outcomes,
    })
}

/// Evaluate every supported unit count, smallest first
pub fn evaluate_all(
    config: &SimulatorConfig,
    inputs: &EvaluationInputs,
) -> Result<Vec<EquipmentConfiguration>> {
    crate::config::EquipmentConfig::UNIT_COUNTS
        .iter()
        .map(|n| evaluate_configuration(config, *n, inputs))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BusinessType, CorporateTaxBracket, TaxIncentive};

    fn inputs(monthly: f64, rate: f64) -> EvaluationInputs {
        EvaluationInputs {
            monthly_baseline_cost: monthly,
            annual_baseline_cost: monthly * 12.0,
            reduction_rate_percent: rate,
            tax: TaxProfile::individual(),
        }
    }

    #[test]
    fn test_payback_exactly_six_years() {
        // 500k saved every year, 3M invested, flat prices
        let cumulative = cumulative_savings(1_000_000.0, 500_000.0, 0.0, 30);
        assert_eq!(crossing_year(&cumulative, 3_000_000.0), Some(6.0));
    }

    #[test]
    fn test_payback_interpolates_within_year() {
        let cumulative = cumulative_savings(1_000_000.0, 400_000.0, 0.0, 30);
        let year = crossing_year(&cumulative, 1_000_000.0).unwrap();
        assert!((year - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_payback_property_holds_with_growth() {
        let net = 4_321_000.0;
        let rate = 0.05;
        let cumulative = cumulative_savings(2_000_000.0, 310_000.0, rate, 30);
        let year = crossing_year(&cumulative, net).unwrap();

        let whole = year.floor() as usize;
        let before = cumulative[whole];
        let after = cumulative[whole + 1];
        let at_year = before + (year - whole as f64) * (after - before);
        assert!((at_year - net).abs() < 1e-6);
        assert!(cumulative[..=whole].iter().all(|c| *c < net));
    }

    #[test]
    fn test_payback_unrecoverable() {
        let cumulative = cumulative_savings(100_000.0, 10_000.0, 0.0, 30);
        assert_eq!(crossing_year(&cumulative, 1_000_000.0), None);

        let nothing = cumulative_savings(100_000.0, 0.0, 0.05, 30);
        assert_eq!(crossing_year(&nothing, 1.0), None);
    }

    #[test]
    fn test_zero_investment_pays_back_immediately() {
        let cumulative = cumulative_savings(100_000.0, 10_000.0, 0.0, 5);
        assert_eq!(crossing_year(&cumulative, 0.0), Some(0.0));
    }

    #[test]
    fn test_coverage_is_clamped() {
        let config = SimulatorConfig::default();
        // tiny bill: any unit covers everything
        assert_eq!(coverage_rate(&config, 1_000.0, 1), 1.0);
        for n in 1..=4 {
            let c = coverage_rate(&config, 5_000_000.0, n);
            assert!((0.0..=1.0).contains(&c));
        }
    }

    #[test]
    fn test_coverage_scales_with_units() {
        let config = SimulatorConfig::default();
        // 80k/month -> 1866.7 kWh/month -> 62.2 kWh/day -> 24.9 kWh peak
        let one = coverage_rate(&config, 80_000.0, 1);
        let two = coverage_rate(&config, 80_000.0, 2);
        let expected_one = 12.0 / (80_000.0 * 0.7 / 30.0 / 30.0 * 0.4);
        assert!((one - expected_one).abs() < 1e-12);
        assert!((two - 2.0 * expected_one).abs() < 1e-12);
        assert_eq!(coverage_rate(&config, 80_000.0, 3), 1.0);
    }

    #[test]
    fn test_reduction_scaled_by_coverage() {
        let mut config = SimulatorConfig::default();
        // half coverage for one unit: peak usage = 24 kWh/day
        config.usage.variable_cost_ratio = 1.0;
        config.usage.high_price_hour_ratio = 1.0;
        config.tariff.days_per_month = 1.0;
        config.tariff.retail_unit_price = 1.0;
        let evaluated = evaluate_configuration(&config, 1, &inputs(24.0, 40.0)).unwrap();

        assert!((evaluated.coverage_rate - 0.5).abs() < 1e-12);
        let annual_baseline = 24.0 * 12.0;
        assert!((evaluated.annual_reduction - 0.40 * 0.5 * annual_baseline).abs() < 1e-9);
    }

    #[test]
    fn test_investment_breakdown_with_volume_discount() {
        let config = SimulatorConfig::default();
        let evaluated = evaluate_configuration(&config, 3, &inputs(80_000.0, 40.0)).unwrap();

        assert!((evaluated.product_price - 4_500_000.0).abs() < 1e-6);
        assert!((evaluated.installation_cost - 3.0 * 300_000.0 * 0.85).abs() < 1e-6);
        assert!((evaluated.total_investment - 5_265_000.0).abs() < 1e-6);
        assert_eq!(evaluated.tax_savings, 0.0);
        assert!((evaluated.net_investment - evaluated.total_investment).abs() < 1e-6);
        assert_eq!(evaluated.outcomes.len(), 3);
    }

    #[test]
    fn test_tax_savings_reduce_net_investment() {
        let config = SimulatorConfig::default();
        let mut shared = inputs(80_000.0, 40.0);
        shared.tax = TaxProfile {
            business: BusinessType::Company(CorporateTaxBracket::Standard),
            incentive: TaxIncentive::ImmediateExpensing,
        };
        let evaluated = evaluate_configuration(&config, 2, &shared).unwrap();

        assert!((evaluated.tax_savings - 3_000_000.0 * 0.232).abs() < 1e-6);
        assert!(
            (evaluated.net_investment - (evaluated.total_investment - evaluated.tax_savings)).abs()
                < 1e-6
        );
    }

    #[test]
    fn test_roi_increases_with_growth_rate() {
        let config = SimulatorConfig::default();
        let evaluated = evaluate_configuration(&config, 2, &inputs(150_000.0, 35.0)).unwrap();

        let roi = |s| evaluated.outcome(s).unwrap().roi_percent;
        assert!(roi(GrowthScenario::NoChange) < roi(GrowthScenario::Standard));
        assert!(roi(GrowthScenario::Standard) < roi(GrowthScenario::Worst));

        let payback = |s| evaluated.outcome(s).unwrap().payback_year.unwrap();
        assert!(payback(GrowthScenario::Worst) <= payback(GrowthScenario::NoChange));
    }

    #[test]
    fn test_roi_formula() {
        assert!((roi_percent(6_000_000.0, 3_000_000.0) - 100.0).abs() < 1e-9);
        assert!((roi_percent(0.0, 3_000_000.0) + 100.0).abs() < 1e-9);
        assert_eq!(roi_percent(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_evaluate_all_orders_unit_counts() {
        let config = SimulatorConfig::default();
        let all = evaluate_all(&config, &inputs(80_000.0, 40.0)).unwrap();
        let counts: Vec<u8> = all.iter().map(|c| c.unit_count).collect();
        assert_eq!(counts, vec![1, 2, 3, 4]);
    }
}
