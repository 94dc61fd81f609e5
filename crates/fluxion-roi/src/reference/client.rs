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

//! HTTP retrieval of the reference datasets

use super::delimited::parse_table;
use super::prices::PriceTable;
use super::regions::RegionTable;
use crate::config::DataSources;
use crate::error::{Result, SimulationError};
use tracing::{debug, info};

const USER_AGENT: &str = concat!("fluxion-roi/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    RegionTable,
    PriceTable,
}

impl Dataset {
    pub fn name(self) -> &'static str {
        match self {
            Self::RegionTable => "regional reduction table",
            Self::PriceTable => "historical price table",
        }
    }
}

/// Fetches both datasets with one shared connection pool and a bounded timeout.
/// No retries: a failed request surfaces immediately as `DataUnavailable`.
#[derive(Debug, Clone)]
pub struct ReferenceDataClient {
    client: reqwest::Client,
    sources: DataSources,
}

impl ReferenceDataClient {
    pub fn new(sources: &DataSources) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(sources.timeout())
            .build()
            .map_err(|e| {
                SimulationError::DataUnavailable(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            sources: sources.clone(),
        })
    }

    fn url(&self, dataset: Dataset) -> &str {
        match dataset {
            Dataset::RegionTable => &self.sources.region_table_url,
            Dataset::PriceTable => &self.sources.price_table_url,
        }
    }

    /// Download a dataset as text
    pub async fn fetch_text(&self, dataset: Dataset) -> Result<String> {
        let url = self.url(dataset);
        let name = dataset.name();
        info!("Fetching {name} from {url}");

        let response = self.client.get(url).send().await.map_err(|e| {
            SimulationError::DataUnavailable(format!("{name}: request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SimulationError::DataUnavailable(format!(
                "{name}: server returned {status}"
            )));
        }

        let body = response.text().await.map_err(|e| {
            SimulationError::DataUnavailable(format!("{name}: failed to read response: {e}"))
        })?;
        debug!("Fetched {name}: {} bytes", body.len());
        Ok(body)
    }

    pub async fn fetch_regions(&self) -> Result<RegionTable> {
        let text = self.fetch_text(Dataset::RegionTable).await?;
        Ok(RegionTable::from_rows(parse_table(&text)))
    }

    pub async fn fetch_prices(&self) -> Result<PriceTable> {
        let text = self.fetch_text(Dataset::PriceTable).await?;
        PriceTable::from_rows(parse_table(&text))
    }
}
