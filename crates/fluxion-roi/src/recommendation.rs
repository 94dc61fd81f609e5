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

//! Recommended configuration selection.
//!
//! Only the standard growth scenario is considered. A configuration qualifies
//! when it covers enough peak-hour usage and pays back within the warranty; the
//! qualifying one with the best ROI wins. If none qualifies, the best ROI overall
//! wins. Ties go to the smaller installation.

use crate::config::HorizonConfig;
use crate::types::{
    EquipmentConfiguration, GrowthScenario, Recommendation, RecommendationReason, ScenarioOutcome,
};
use tracing::info;

const SCENARIO: GrowthScenario = GrowthScenario::Standard;

fn configuration_name(n: u8) -> String {
    format!("The {n}-unit configuration")
}

fn qualifies(config: &EquipmentConfiguration, horizon: &HorizonConfig) -> bool {
    let within_warranty = config
        .outcome(SCENARIO)
        .and_then(|o| o.payback_year)
        .is_some_and(|year| year <= f64::from(horizon.warranty_years));
    config.coverage_rate >= horizon.min_recommended_coverage && within_warranty
}

/// Highest standard-scenario ROI, first one wins on ties
fn best_roi<'a>(
    candidates: impl Iterator<Item = &'a EquipmentConfiguration>,
) -> Option<(&'a EquipmentConfiguration, &'a ScenarioOutcome)> {
    let mut best: Option<(&EquipmentConfiguration, &ScenarioOutcome)> = None;
    for config in candidates {
        let Some(outcome) = config.outcome(SCENARIO) else {
            continue;
        };
        if best.is_none_or(|(_, b)| outcome.roi_percent > b.roi_percent) {
            best = Some((config, outcome));
        }
    }
    best
}

pub fn recommend(
    configurations: &[EquipmentConfiguration],
    horizon: &HorizonConfig,
) -> Option<Recommendation> {
    let warranty = horizon.warranty_years;

    if let Some((winner, outcome)) =
        best_roi(configurations.iter().filter(|c| qualifies(c, horizon)))
    {
        let payback = outcome.payback_year.unwrap_or_default();
        let rationale = format!(
            "{} is recommended: it covers {:.0}% of high-price-hour usage, pays back in {payback:.1} years \
             and returns {:.1}% over the {warranty}-year warranty.",
            configuration_name(winner.unit_count),
            winner.coverage_rate * 100.0,
            outcome.roi_percent,
        );
        info!("Recommendation: {rationale}");
        return Some(Recommendation {
            unit_count: winner.unit_count,
            reason: RecommendationReason::MeetsCriteria,
            rationale,
        });
    }

    let (winner, outcome) = best_roi(configurations.iter())?;
    let (reason, rationale) = if winner.coverage_rate < horizon.min_recommended_coverage {
        (
            RecommendationReason::InsufficientCoverage,
            format!(
                "No configuration reaches {:.0}% coverage with payback inside the {warranty}-year warranty. \
                 {} gives the best return ({:.1}%) but covers only {:.0}% of high-price-hour usage.",
                horizon.min_recommended_coverage * 100.0,
                configuration_name(winner.unit_count),
                outcome.roi_percent,
                winner.coverage_rate * 100.0,
            ),
        )
    } else {
        let payback = outcome.payback_year.map_or_else(
            || format!("takes more than {} years", horizon.payback_search_years),
            |year| format!("takes {year:.1} years"),
        );
        (
            RecommendationReason::BestEfficiency,
            format!(
                "No configuration pays back inside the {warranty}-year warranty. \
                 {} is the most efficient option: {:.1}% return, payback {payback}.",
                configuration_name(winner.unit_count),
                outcome.roi_percent,
            ),
        )
    };

    info!("Recommendation: {rationale}");
    Some(Recommendation {
        unit_count: winner.unit_count,
        reason,
        rationale,
    })
}
