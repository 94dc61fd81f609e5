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

//! Regional reduction table

use super::delimited::parse_number;
use crate::error::{Result, SimulationError};
use crate::types::RegionProfile;
use tracing::debug;

/// Data rows of the regional table (header removed).
///
/// Rows are parsed on lookup, so a broken row only fails the runs that select it.
#[derive(Debug, Clone)]
pub struct RegionTable {
    rows: Vec<Vec<String>>,
}

impl RegionTable {
    /// Build from parsed rows; the first row is the header and is skipped
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .skip(1)
            .filter(|row| row.first().is_some_and(|area| !area.is_empty()))
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn lookup(&self, area: &str) -> Result<RegionProfile> {
        let area = area.trim();
        let row = self
            .rows
            .iter()
            .find(|row| row.first().is_some_and(|name| name == area))
            .ok_or_else(|| SimulationError::RegionNotFound(area.to_owned()))?;

        let (Some(rate_cell), Some(column)) = (row.get(1), row.get(2)) else {
            return Err(SimulationError::MalformedData(format!(
                "region row for {area} has {} cells, expected 3",
                row.len()
            )));
        };

        let reduction_rate_percent = parse_number(rate_cell).ok_or_else(|| {
            SimulationError::MalformedData(format!(
                "reduction rate for {area} is not a number: {rate_cell:?}"
            ))
        })?;
        if !(0.0..=100.0).contains(&reduction_rate_percent) {
            return Err(SimulationError::MalformedData(format!(
                "reduction rate for {area} is outside 0-100%: {reduction_rate_percent}"
            )));
        }
        if column.is_empty() {
            return Err(SimulationError::MalformedData(format!(
                "region {area} has no price column"
            )));
        }

        debug!("Resolved region {area}: rate={reduction_rate_percent}%, column={column}");

        Ok(RegionProfile {
            area: area.to_owned(),
            reduction_rate_percent,
            price_column: column.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::delimited::parse_table;

    fn table() -> RegionTable {
        RegionTable::from_rows(parse_table(
            "area,reduction_rate,price_column\n\
             Tokyo,40,tokyo\n\
             \"Kansai, Osaka\",35%,kansai\n\
             Broken,abc,tokyo\n\
             Short,20\n\
             Greedy,140,tokyo\n",
        ))
    }

    #[test]
    fn test_header_is_skipped() {
        let table = table();
        assert_eq!(table.len(), 5);
        assert!(matches!(
            table.lookup("area"),
            Err(SimulationError::RegionNotFound(_))
        ));
    }

    #[test]
    fn test_lookup_found() {
        let region = table().lookup("Tokyo").unwrap();
        assert_eq!(region.area, "Tokyo");
        assert!((region.reduction_rate_percent - 40.0).abs() < f64::EPSILON);
        assert_eq!(region.price_column, "tokyo");
    }

    #[test]
    fn test_lookup_quoted_area_with_comma() {
        let region = table().lookup(" Kansai, Osaka ").unwrap();
        assert!((region.reduction_rate_percent - 35.0).abs() < f64::EPSILON);
        assert_eq!(region.price_column, "kansai");
    }

    #[test]
    fn test_lookup_missing_region() {
        let err = table().lookup("Hokkaido").unwrap_err();
        assert!(matches!(err, SimulationError::RegionNotFound(ref name) if name == "Hokkaido"));
    }

    #[test]
    fn test_malformed_rows() {
        let table = table();
        assert!(matches!(
            table.lookup("Broken"),
            Err(SimulationError::MalformedData(_))
        ));
        assert!(matches!(
            table.lookup("Short"),
            Err(SimulationError::MalformedData(_))
        ));
        assert!(matches!(
            table.lookup("Greedy"),
            Err(SimulationError::MalformedData(_))
        ));
    }
}
