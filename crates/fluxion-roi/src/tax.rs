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

//! Tax benefit of the equipment purchase

use crate::config::TaxConfig;
use crate::error::{Result, SimulationError};
use crate::types::{BusinessType, CorporateTaxBracket, CreditRate, TaxIncentive, TaxProfile};

/// Marginal tax rate for the profile, as a fraction.
///
/// Individuals have no deductible business expense and get 0. Sole proprietor
/// brackets must be one of the configured progressive brackets.
pub fn tax_rate(config: &TaxConfig, business: BusinessType) -> Result<f64> {
    match business {
        BusinessType::Individual => Ok(0.0),
        BusinessType::SoleProprietor(bracket) => {
            if config.income_brackets_percent.contains(&bracket.0) {
                Ok(f64::from(bracket.0) / 100.0)
            } else {
                Err(SimulationError::InvalidInput(format!(
                    "income tax bracket {}% is not one of {:?}",
                    bracket.0, config.income_brackets_percent
                )))
            }
        }
        BusinessType::Company(bracket) => Ok(match bracket {
            CorporateTaxBracket::Reduced => config.corporate_reduced_rate,
            CorporateTaxBracket::Standard => config.corporate_standard_rate,
            CorporateTaxBracket::Effective => config.corporate_effective_rate,
        }),
    }
}

pub fn credit_rate(config: &TaxConfig, rate: CreditRate) -> f64 {
    match rate {
        CreditRate::Standard => config.credit_rate_standard,
        CreditRate::Enhanced => config.credit_rate_enhanced,
    }
}

/// Tax saved on `product_price` under the chosen incentive.
///
/// Depreciation spreads the deduction over `depreciation_years` and sums it
/// back up undiscounted, which lands on the same figure as immediate
/// expensing. Kept that way until the intended timing model is confirmed.
pub fn tax_savings(config: &TaxConfig, profile: &TaxProfile, product_price: f64) -> Result<f64> {
    if profile.business == BusinessType::Individual {
        return Ok(0.0);
    }
    let rate = tax_rate(config, profile.business)?;

    Ok(match profile.incentive {
        TaxIncentive::ImmediateExpensing => product_price * rate,
        TaxIncentive::TaxCredit(credit) => product_price * credit_rate(config, credit),
        TaxIncentive::Depreciation => {
            let years = f64::from(config.depreciation_years);
            (product_price / years) * rate * years
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IncomeTaxBracket;

    const PRICE: f64 = 3_000_000.0;

    fn profile(business: BusinessType, incentive: TaxIncentive) -> TaxProfile {
        TaxProfile {
            business,
            incentive,
        }
    }

    #[test]
    fn test_individual_always_zero() {
        let config = TaxConfig::default();
        for incentive in [
            TaxIncentive::ImmediateExpensing,
            TaxIncentive::TaxCredit(CreditRate::Enhanced),
            TaxIncentive::Depreciation,
        ] {
            let savings =
                tax_savings(&config, &profile(BusinessType::Individual, incentive), PRICE).unwrap();
            assert_eq!(savings, 0.0);
        }
    }

    #[test]
    fn test_immediate_expensing_company() {
        let config = TaxConfig::default();
        let savings = tax_savings(
            &config,
            &profile(
                BusinessType::Company(CorporateTaxBracket::Standard),
                TaxIncentive::ImmediateExpensing,
            ),
            PRICE,
        )
        .unwrap();
        assert!((savings - 696_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_tax_credit_ignores_tax_rate() {
        let config = TaxConfig::default();
        let low = tax_savings(
            &config,
            &profile(
                BusinessType::SoleProprietor(IncomeTaxBracket(5)),
                TaxIncentive::TaxCredit(CreditRate::Standard),
            ),
            PRICE,
        )
        .unwrap();
        let high = tax_savings(
            &config,
            &profile(
                BusinessType::SoleProprietor(IncomeTaxBracket(45)),
                TaxIncentive::TaxCredit(CreditRate::Standard),
            ),
            PRICE,
        )
        .unwrap();
        assert!((low - 210_000.0).abs() < 1e-6);
        assert!((high - low).abs() < 1e-6);

        let enhanced = tax_savings(
            &config,
            &profile(
                BusinessType::Company(CorporateTaxBracket::Reduced),
                TaxIncentive::TaxCredit(CreditRate::Enhanced),
            ),
            PRICE,
        )
        .unwrap();
        assert!((enhanced - 300_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_depreciation_equals_immediate_expensing() {
        let config = TaxConfig::default();
        let business = BusinessType::SoleProprietor(IncomeTaxBracket(33));
        let immediate = tax_savings(
            &config,
            &profile(business, TaxIncentive::ImmediateExpensing),
            PRICE,
        )
        .unwrap();
        let depreciation =
            tax_savings(&config, &profile(business, TaxIncentive::Depreciation), PRICE).unwrap();
        assert!((immediate - 990_000.0).abs() < 1e-6);
        assert!((depreciation - immediate).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_income_bracket_rejected() {
        let config = TaxConfig::default();
        let result = tax_rate(&config, BusinessType::SoleProprietor(IncomeTaxBracket(17)));
        assert!(matches!(result, Err(SimulationError::InvalidInput(_))));
    }

    #[test]
    fn test_corporate_brackets() {
        let config = TaxConfig::default();
        let rate = |b| tax_rate(&config, BusinessType::Company(b)).unwrap();
        assert!((rate(CorporateTaxBracket::Reduced) - 0.15).abs() < 1e-12);
        assert!((rate(CorporateTaxBracket::Standard) - 0.232).abs() < 1e-12);
        assert!((rate(CorporateTaxBracket::Effective) - 0.30).abs() < 1e-12);
    }
}
