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

//! Historical power price table and its monthly averages

use super::delimited::parse_number;
use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parsed price table: header plus data rows
#[derive(Debug, Clone)]
pub struct PriceTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl PriceTable {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self> {
        let mut rows = rows.into_iter();
        let header = rows
            .next()
            .ok_or_else(|| SimulationError::MalformedData("price table is empty".to_owned()))?;
        Ok(Self {
            header,
            rows: rows.collect(),
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of a named price series. Column 0 is the date and never matches.
    pub fn column_index(&self, column: &str) -> Result<usize> {
        let column = column.trim();
        self.header
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, name)| name.as_str() == column)
            .map(|(idx, _)| idx)
            .ok_or_else(|| SimulationError::ColumnNotFound(column.to_owned()))
    }

    /// Average the named series per calendar month
    pub fn monthly_averages(&self, column: &str) -> Result<MonthlyPrices> {
        let idx = self.column_index(column)?;

        let mut skipped = 0_usize;
        let observations = self.rows.iter().filter_map(|row| {
            let point = row
                .first()
                .and_then(|date| month_of(date))
                .zip(row.get(idx).and_then(|cell| parse_number(cell)));
            if point.is_none() {
                skipped += 1;
            }
            point
        });
        let prices = MonthlyPrices::from_observations(observations);

        debug!(
            "Averaged column {column}: {} rows, {skipped} skipped, {} months observed",
            self.rows.len(),
            prices.observed_months()
        );
        Ok(prices)
    }
}

/// Month number from a `YYYY/M/D` style date (second `/` token)
pub fn month_of(date: &str) -> Option<u32> {
    date.split('/')
        .nth(1)
        .and_then(|token| token.trim().parse::<u32>().ok())
        .filter(|month| (1..=12).contains(month))
}

/// Mean price per calendar month; `None` where the series has no observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPrices {
    averages: [Option<f64>; 12],
}

impl MonthlyPrices {
    /// Group `(month, price)` points by month and average them
    pub fn from_observations(points: impl IntoIterator<Item = (u32, f64)>) -> Self {
        let mut sums = [0.0_f64; 12];
        let mut counts = [0_u32; 12];
        for (month, price) in points {
            let Some(slot) = month.checked_sub(1).and_then(|m| usize::try_from(m).ok()) else {
                continue;
            };
            if let (Some(sum), Some(count)) = (sums.get_mut(slot), counts.get_mut(slot)) {
                *sum += price;
                *count += 1;
            }
        }

        let mut averages = [None; 12];
        for ((avg, sum), count) in averages.iter_mut().zip(sums).zip(counts) {
            if count > 0 {
                *avg = Some(sum / f64::from(count));
            }
        }
        Self { averages }
    }

    /// Raw monthly average, `None` for unobserved months (1-12)
    pub fn observed(&self, month: u32) -> Option<f64> {
        month
            .checked_sub(1)
            .and_then(|m| self.averages.get(m as usize))
            .copied()
            .flatten()
    }

    pub fn observed_months(&self) -> usize {
        self.averages.iter().filter(|a| a.is_some()).count()
    }

    /// Mean of the monthly averages over the months that were observed
    pub fn overall_mean(&self) -> Option<f64> {
        let observed: Vec<f64> = self.averages.iter().flatten().copied().collect();
        if observed.is_empty() {
            None
        } else {
            Some(observed.iter().sum::<f64>() / observed.len() as f64)
        }
    }

    /// Month price relative to the overall mean. Exactly 1.0 for unobserved
    /// months and whenever the overall mean is missing or not positive.
    pub fn variation_ratio(&self, month: u32) -> f64 {
        match (self.observed(month), self.overall_mean()) {
            (Some(price), Some(mean)) if mean > 0.0 => price / mean,
            _ => 1.0,
        }
    }
}
