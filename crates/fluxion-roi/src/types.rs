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

//! Value types shared by the simulation stages.
//!
//! Everything here is owned by a single simulation run and is never mutated
//! after the stage that produced it returns.

use serde::{Deserialize, Serialize};

/// One row of the regional reduction table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    /// Area name (unique key)
    pub area: String,
    /// Achievable reduction of the electricity bill (0-100%)
    pub reduction_rate_percent: f64,
    /// Header of the price series column for this area
    pub price_column: String,
}

/// Annual electricity price growth assumption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthScenario {
    NoChange,
    Standard,
    Worst,
}

impl GrowthScenario {
    pub const ALL: [Self; 3] = [Self::NoChange, Self::Standard, Self::Worst];

    /// Stable identifier, matches the serialized form
    pub fn id(self) -> &'static str {
        match self {
            Self::NoChange => "no_change",
            Self::Standard => "standard",
            Self::Worst => "worst",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NoChange => "No change",
            Self::Standard => "Standard",
            Self::Worst => "Worst case",
        }
    }

    /// Chart colour
    pub fn color(self) -> &'static str {
        match self {
            Self::NoChange => "#6b7280",
            Self::Standard => "#2563eb",
            Self::Worst => "#dc2626",
        }
    }
}

/// The user's declared consumption. Exactly one form is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionInput {
    /// Monthly electricity bill (JPY)
    MonthlyCost(f64),
    /// Monthly usage (kWh), converted with the retail unit price
    MonthlyUsage(f64),
}

/// Sole proprietor income tax bracket, identified by its rate in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxBracket(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorporateTaxBracket {
    Reduced,
    Standard,
    Effective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Individual,
    SoleProprietor(IncomeTaxBracket),
    Company(CorporateTaxBracket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditRate {
    Standard,
    Enhanced,
}

/// How the equipment purchase is treated for tax purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxIncentive {
    ImmediateExpensing,
    TaxCredit(CreditRate),
    Depreciation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxProfile {
    pub business: BusinessType,
    pub incentive: TaxIncentive,
}

impl TaxProfile {
    pub fn individual() -> Self {
        Self {
            business: BusinessType::Individual,
            incentive: TaxIncentive::ImmediateExpensing,
        }
    }
}

/// Everything the user submits for one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub region: String,
    pub consumption: ConsumptionInput,
    pub tax: TaxProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCostRow {
    /// Calendar month, 1-12
    pub month: u32,
    pub label: String,
    pub baseline_cost: f64,
    pub reduced_cost: f64,
}

/// Payback and ROI of one configuration under one growth scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario: GrowthScenario,
    /// Fractional year at which cumulative savings reach the net investment.
    /// `None` when no crossing happens within the payback search horizon.
    pub payback_year: Option<f64>,
    /// Return over the warranty horizon (%)
    pub roi_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentConfiguration {
    pub unit_count: u8,
    pub product_price: f64,
    pub installation_cost: f64,
    pub total_investment: f64,
    pub tax_savings: f64,
    pub net_investment: f64,
    /// Effective first-year reduction after scaling by coverage (JPY)
    pub annual_reduction: f64,
    /// Share of high-price-hour usage the units can serve, 0-1
    pub coverage_rate: f64,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl EquipmentConfiguration {
    pub fn outcome(&self, scenario: GrowthScenario) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|o| o.scenario == scenario)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationReason {
    /// Enough coverage and payback within warranty
    MeetsCriteria,
    /// Nothing qualified and the best ROI still lacks coverage
    InsufficientCoverage,
    /// Nothing qualified; coverage is fine but payback runs past warranty
    BestEfficiency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub unit_count: u8,
    pub reason: RecommendationReason,
    pub rationale: String,
}

/// Yearly series for one growth scenario, index = year (0..=horizon)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub scenario: GrowthScenario,
    pub cost_without: Vec<f64>,
    pub cost_with: Vec<f64>,
    /// Savings accumulated by the end of each year
    pub cumulative_savings: Vec<f64>,
    /// Cumulative savings minus net investment
    pub net_position: Vec<f64>,
    pub payback_year: Option<f64>,
    pub savings_at_checkpoint: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongHorizonProjection {
    pub unit_count: u8,
    pub years: Vec<u32>,
    pub checkpoint_year: u32,
    pub scenarios: Vec<ScenarioProjection>,
}

impl LongHorizonProjection {
    pub fn scenario(&self, scenario: GrowthScenario) -> Option<&ScenarioProjection> {
        self.scenarios.iter().find(|s| s.scenario == scenario)
    }
}

/// Finished output of one run, read-only for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub region: RegionProfile,
    /// Declared or usage-derived monthly bill (JPY)
    pub monthly_baseline_cost: f64,
    pub annual_baseline_cost: f64,
    pub annual_reduced_cost: f64,
    pub annual_savings: f64,
    pub average_monthly_savings: f64,
    pub monthly_costs: Vec<MonthlyCostRow>,
    pub configurations: Vec<EquipmentConfiguration>,
    pub recommendation: Recommendation,
    pub projection: LongHorizonProjection,
}

impl SimulationResult {
    pub fn recommended(&self) -> Option<&EquipmentConfiguration> {
        self.configurations
            .iter()
            .find(|c| c.unit_count == self.recommendation.unit_count)
    }
}
