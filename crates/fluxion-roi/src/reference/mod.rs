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

//! Reference data loading: the regional reduction table and the historical
//! power price table.

pub mod client;
pub mod delimited;
pub mod prices;
pub mod regions;

pub use client::{Dataset, ReferenceDataClient};
pub use prices::{MonthlyPrices, PriceTable};
pub use regions::RegionTable;

use crate::error::Result;
use crate::types::RegionProfile;
use tracing::info;

/// The slice of reference data one simulation needs
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub region: RegionProfile,
    pub monthly_prices: MonthlyPrices,
}

/// Fetch both datasets for `area`.
///
/// The price table is only requested after the region resolves, since the
/// region row names the price column to read.
pub async fn load_reference_data(
    client: &ReferenceDataClient,
    area: &str,
) -> Result<ReferenceData> {
    let regions = client.fetch_regions().await?;
    let region = regions.lookup(area)?;

    let prices = client.fetch_prices().await?;
    let monthly_prices = prices.monthly_averages(&region.price_column)?;

    info!(
        "Loaded reference data for {}: {}% reduction, {} of 12 months observed",
        region.area,
        region.reduction_rate_percent,
        monthly_prices.observed_months()
    );

    Ok(ReferenceData {
        region,
        monthly_prices,
    })
}
