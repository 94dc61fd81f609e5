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

//! Simulator configuration
//!
//! All prices, ratios, tax tables and horizons used by the engine live in one
//! immutable [`SimulatorConfig`]. It is built once at start-up (defaults, optionally
//! overridden from a TOML file) and passed by reference into every component.

use crate::error::{Result, SimulationError};
use crate::types::GrowthScenario;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub data_sources: DataSources,
    pub tariff: TariffConfig,
    pub equipment: EquipmentConfig,
    pub usage: UsageModel,
    pub tax: TaxConfig,
    pub horizon: HorizonConfig,
    pub scenarios: ScenarioRates,
}

/// Remote reference datasets, both served as delimited text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSources {
    /// Regional reduction table: area name, reduction rate %, price column
    pub region_table_url: String,

    /// Historical power price table: date column followed by one column per price series
    pub price_table_url: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
}

impl DataSources {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            region_table_url: "https://data.solare.cz/roi/region_reduction.csv".to_owned(),
            price_table_url: "https://data.solare.cz/roi/power_price_history.csv".to_owned(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TariffConfig {
    /// Retail unit price used to convert usage to cost (JPY/kWh)
    pub retail_unit_price: f64,

    pub days_per_month: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            retail_unit_price: 30.0,
            days_per_month: 30.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentConfig {
    /// Product price of a single unit (JPY)
    pub unit_price: f64,

    /// Installation cost of a single unit before volume discount (JPY)
    pub unit_installation_cost: f64,

    /// Installation discount factor indexed by `unit_count - 1`
    pub installation_discounts: Vec<f64>,

    /// Energy one unit can shift per day (kWh)
    pub unit_daily_capacity_kwh: f64,
}

impl EquipmentConfig {
    pub const UNIT_COUNTS: [u8; 4] = [1, 2, 3, 4];

    /// Installation discount for `unit_count`; counts past the table use its last entry
    pub fn installation_discount(&self, unit_count: u8) -> f64 {
        let idx = usize::from(unit_count.saturating_sub(1));
        self.installation_discounts
            .get(idx)
            .or_else(|| self.installation_discounts.last())
            .copied()
            .unwrap_or(1.0)
    }
}

impl Default for EquipmentConfig {
    fn default() -> Self {
        Self {
            unit_price: 1_500_000.0,
            unit_installation_cost: 300_000.0,
            installation_discounts: vec![1.0, 0.9, 0.85, 0.8],
            unit_daily_capacity_kwh: 12.0,
        }
    }
}

/// Ratios used to estimate peak-hour usage from a monthly bill
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageModel {
    /// Share of the bill that scales with energy consumed
    pub variable_cost_ratio: f64,

    /// Share of daily usage falling into high-price hours
    pub high_price_hour_ratio: f64,
}

impl Default for UsageModel {
    fn default() -> Self {
        Self {
            variable_cost_ratio: 0.7,
            high_price_hour_ratio: 0.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxConfig {
    /// Progressive income tax brackets open to sole proprietors (percent)
    pub income_brackets_percent: Vec<u8>,

    /// Corporate rate for small companies on the reduced bracket
    pub corporate_reduced_rate: f64,

    pub corporate_standard_rate: f64,

    /// Corporate rate including local taxes
    pub corporate_effective_rate: f64,

    pub credit_rate_standard: f64,

    pub credit_rate_enhanced: f64,

    /// Straight-line depreciation term (years)
    pub depreciation_years: u32,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            income_brackets_percent: vec![5, 10, 20, 23, 33, 40, 45],
            corporate_reduced_rate: 0.15,
            corporate_standard_rate: 0.232,
            corporate_effective_rate: 0.30,
            credit_rate_standard: 0.07,
            credit_rate_enhanced: 0.10,
            depreciation_years: 6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizonConfig {
    /// Warranty term; ROI horizon and the payback ceiling for a recommendation
    pub warranty_years: u32,

    /// Last year searched for a payback crossing
    pub payback_search_years: u32,

    /// Length of the long-horizon chart projection
    pub projection_years: u32,

    /// Year at which cumulative projected savings are reported
    pub savings_checkpoint_year: u32,

    /// Minimum coverage for a configuration to be recommended outright
    pub min_recommended_coverage: f64,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            warranty_years: 16,
            payback_search_years: 30,
            projection_years: 25,
            savings_checkpoint_year: 20,
            min_recommended_coverage: 0.8,
        }
    }
}

/// Annual electricity price growth per scenario (fractions)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioRates {
    pub no_change: f64,
    pub standard: f64,
    pub worst: f64,
}

impl ScenarioRates {
    pub fn rate(&self, scenario: GrowthScenario) -> f64 {
        match scenario {
            GrowthScenario::NoChange => self.no_change,
            GrowthScenario::Standard => self.standard,
            GrowthScenario::Worst => self.worst,
        }
    }
}

impl Default for ScenarioRates {
    fn default() -> Self {
        Self {
            no_change: 0.0,
            standard: 0.03,
            worst: 0.05,
        }
    }
}

impl SimulatorConfig {
    /// Load a config from a TOML file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SimulationError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            SimulationError::Config(format!("Failed to parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(SimulationError::Config(msg.to_owned()));

        if self.tariff.retail_unit_price <= 0.0 || self.tariff.days_per_month <= 0.0 {
            return fail("tariff.retail_unit_price and tariff.days_per_month must be positive");
        }
        if self.equipment.unit_price <= 0.0
            || self.equipment.unit_installation_cost < 0.0
            || self.equipment.unit_daily_capacity_kwh <= 0.0
        {
            return fail("equipment prices and capacity must be positive");
        }
        let discounts = &self.equipment.installation_discounts;
        if discounts.len() != EquipmentConfig::UNIT_COUNTS.len() {
            return fail("equipment.installation_discounts must have one entry per unit count");
        }
        if discounts.windows(2).any(|w| w[1] >= w[0])
            || discounts.iter().any(|d| *d <= 0.0)
        {
            return fail(
                "equipment.installation_discounts must be positive and strictly decreasing",
            );
        }
        for ratio in [
            self.usage.variable_cost_ratio,
            self.usage.high_price_hour_ratio,
        ] {
            if ratio <= 0.0 || ratio > 1.0 {
                return fail("usage ratios must lie in (0, 1]");
            }
        }
        let tax = &self.tax;
        if tax.income_brackets_percent.is_empty() || tax.depreciation_years == 0 {
            return fail(
                "tax.income_brackets_percent must be non-empty and depreciation_years positive",
            );
        }
        for rate in [
            tax.corporate_reduced_rate,
            tax.corporate_standard_rate,
            tax.corporate_effective_rate,
            tax.credit_rate_standard,
            tax.credit_rate_enhanced,
        ] {
            if !(0.0..1.0).contains(&rate) {
                return fail("tax rates must lie in [0, 1)");
            }
        }
        if tax.income_brackets_percent.iter().any(|p| *p >= 100) {
            return fail("tax.income_brackets_percent entries must be below 100");
        }
        let horizon = &self.horizon;
        if horizon.warranty_years == 0
            || horizon.payback_search_years == 0
            || horizon.projection_years == 0
            || horizon.savings_checkpoint_year > horizon.projection_years
        {
            return fail("horizon years must be positive and the checkpoint within the projection");
        }
        if !(0.0..=1.0).contains(&horizon.min_recommended_coverage) {
            return fail("horizon.min_recommended_coverage must lie in [0, 1]");
        }
        if GrowthScenario::ALL
            .iter()
            .any(|s| self.scenarios.rate(*s) <= -1.0)
        {
            return fail("scenario growth rates must be greater than -100%");
        }
        Ok(())
    }

    /// Example config as a TOML string
    pub fn example_toml() -> String {
        r#"# FluxION ROI Simulator - configuration example
# Every key is optional; omitted keys keep their built-in values.

[data_sources]
region_table_url = "https://data.solare.cz/roi/region_reduction.csv"
price_table_url = "https://data.solare.cz/roi/power_price_history.csv"
timeout_secs = 15

[tariff]
retail_unit_price = 30.0
days_per_month = 30.0

[equipment]
unit_price = 1500000.0
unit_installation_cost = 300000.0
installation_discounts = [1.0, 0.9, 0.85, 0.8]
unit_daily_capacity_kwh = 12.0

[usage]
variable_cost_ratio = 0.7
high_price_hour_ratio = 0.4

[tax]
income_brackets_percent = [5, 10, 20, 23, 33, 40, 45]
corporate_reduced_rate = 0.15
corporate_standard_rate = 0.232
corporate_effective_rate = 0.30
credit_rate_standard = 0.07
credit_rate_enhanced = 0.10
depreciation_years = 6

[horizon]
warranty_years = 16
payback_search_years = 30
projection_years = 25
savings_checkpoint_year = 20
min_recommended_coverage = 0.8

[scenarios]
no_change = 0.0
standard = 0.03
worst = 0.05
"#
        .to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.horizon.warranty_years, 16);
        assert!((config.tariff.retail_unit_price - 30.0).abs() < f64::EPSILON);
        assert!((config.scenarios.rate(GrowthScenario::Standard) - 0.03).abs() < f64::EPSILON);
    }

    #[test]
    fn test_installation_discount_lookup() {
        let equipment = EquipmentConfig::default();
        assert!((equipment.installation_discount(1) - 1.0).abs() < f64::EPSILON);
        assert!((equipment.installation_discount(3) - 0.85).abs() < f64::EPSILON);
        assert!((equipment.installation_discount(4) - 0.8).abs() < f64::EPSILON);
        assert!((equipment.installation_discount(9) - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_example_toml_matches_defaults() {
        let parsed: SimulatorConfig = toml::from_str(&SimulatorConfig::example_toml()).unwrap();
        let defaults = SimulatorConfig::default();
        assert!(parsed.validate().is_ok());
        assert_eq!(
            parsed.equipment.installation_discounts,
            defaults.equipment.installation_discounts
        );
        assert_eq!(
            parsed.tax.income_brackets_percent,
            defaults.tax.income_brackets_percent
        );
        assert_eq!(parsed.data_sources.timeout_secs, defaults.data_sources.timeout_secs);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[tariff]\nretail_unit_price = 32.5\n").unwrap();

        let config = SimulatorConfig::from_file(file.path()).unwrap();
        assert!((config.tariff.retail_unit_price - 32.5).abs() < f64::EPSILON);
        assert!((config.tariff.days_per_month - 30.0).abs() < f64::EPSILON);
        assert_eq!(config.horizon.projection_years, 25);
    }

    #[test]
    fn test_rejects_non_decreasing_discounts() {
        let mut config = SimulatorConfig::default();
        config.equipment.installation_discounts = vec![1.0, 0.9, 0.9, 0.8];
        assert!(matches!(
            config.validate(),
            Err(SimulationError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[tariff\nretail_unit_price = ").unwrap();
        assert!(matches!(
            SimulatorConfig::from_file(file.path()),
            Err(SimulationError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = SimulatorConfig::from_file("/nonexistent/fluxion-roi.toml");
        assert!(matches!(result, Err(SimulationError::Config(_))));
    }
}
