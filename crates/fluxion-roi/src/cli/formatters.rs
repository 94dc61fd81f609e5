// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Output formatters for CLI simulation results.

use crate::types::{GrowthScenario, SimulationResult};
use anyhow::{Context, Result};
use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_FULL};
use std::fmt::Write as _;
use std::path::Path;

/// Formatter for pretty ASCII tables
#[derive(Debug)]
pub struct TableFormatter;

/// Formatter for CSV export
#[derive(Debug)]
pub struct CsvFormatter;

/// Whole yen with thousands separators, e.g. `¥1,234,567`
pub fn yen(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-¥{grouped}")
    } else {
        format!("¥{grouped}")
    }
}

fn payback_text(payback: Option<f64>) -> String {
    payback.map_or_else(|| "never".to_owned(), |year| format!("{year:.1} yrs"))
}

fn bold(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).add_attribute(Attribute::Bold)
}

impl TableFormatter {
    /// Format a simulation result as summary plus tables
    pub fn format_result(result: &SimulationResult) -> String {
        let mut output = String::new();

        let _ = writeln!(
            output,
            "Region: {} | Reduction rate: {:.1}% | Monthly bill: {}",
            result.region.area,
            result.region.reduction_rate_percent,
            yen(result.monthly_baseline_cost)
        );
        let _ = writeln!(
            output,
            "Annual cost: {} -> {} | Savings: {}/yr ({}/month)\n",
            yen(result.annual_baseline_cost),
            yen(result.annual_reduced_cost),
            yen(result.annual_savings),
            yen(result.average_monthly_savings)
        );

        output.push_str(&Self::format_monthly(result));
        output.push('\n');
        output.push_str(&Self::format_configurations(result));
        output.push('\n');
        let _ = writeln!(output, "Recommendation: {}\n", result.recommendation.rationale);
        output.push_str(&Self::format_projection(result));
        output.push('\n');

        output
    }

    fn format_monthly(result: &SimulationResult) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![bold("Month"), bold("Baseline"), bold("Reduced")]);

        for row in &result.monthly_costs {
            table.add_row(vec![
                Cell::new(&row.label),
                Cell::new(yen(row.baseline_cost)),
                Cell::new(yen(row.reduced_cost)),
            ]);
        }
        table.to_string()
    }

    fn format_configurations(result: &SimulationResult) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            bold("Units"),
            bold("Net\ninvestment"),
            bold("Tax\nsavings"),
            bold("Coverage"),
            bold("Reduction\n/yr"),
            bold("Payback\n(0/3/5%)"),
            bold("ROI\n(standard)"),
        ]);

        for config in &result.configurations {
            let paybacks: Vec<String> = GrowthScenario::ALL
                .iter()
                .map(|s| payback_text(config.outcome(*s).and_then(|o| o.payback_year)))
                .collect();
            let roi = config
                .outcome(GrowthScenario::Standard)
                .map_or_else(|| "-".to_owned(), |o| format!("{:.1}%", o.roi_percent));

            let units = if config.unit_count == result.recommendation.unit_count {
                Cell::new(format!("{} *", config.unit_count))
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold)
            } else {
                Cell::new(config.unit_count)
            };

            table.add_row(vec![
                units,
                Cell::new(yen(config.net_investment)),
                Cell::new(yen(config.tax_savings)),
                Cell::new(format!("{:.0}%", config.coverage_rate * 100.0)),
                Cell::new(yen(config.annual_reduction)),
                Cell::new(paybacks.join(" / ")),
                Cell::new(roi),
            ]);
        }
        table.to_string()
    }

    fn format_projection(result: &SimulationResult) -> String {
        let projection = &result.projection;
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);

        let mut header = vec![bold("Year")];
        for scenario in &projection.scenarios {
            header.push(bold(format!("{}\nwithout", scenario.scenario.label())));
            header.push(bold(format!("{}\nwith", scenario.scenario.label())));
        }
        table.set_header(header);

        for (idx, year) in projection.years.iter().enumerate() {
            if year % 5 != 0 {
                continue;
            }
            let mut row = vec![Cell::new(year)];
            for scenario in &projection.scenarios {
                let without = scenario.cost_without.get(idx).copied().unwrap_or_default();
                let with = scenario.cost_with.get(idx).copied().unwrap_or_default();
                row.push(Cell::new(yen(without)));
                row.push(Cell::new(yen(with)));
            }
            table.add_row(row);
        }

        let mut output = table.to_string();
        output.push('\n');
        for scenario in &projection.scenarios {
            let _ = writeln!(
                output,
                "{}: payback {}, cumulative savings at year {}: {}",
                scenario.scenario.label(),
                payback_text(scenario.payback_year),
                projection.checkpoint_year,
                yen(scenario.savings_at_checkpoint)
            );
        }
        output
    }
}

impl CsvFormatter {
    /// Export the long-horizon projection, one row per year
    pub fn write_projection(result: &SimulationResult, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

        let projection = &result.projection;
        let mut header = vec!["year".to_owned()];
        for scenario in &projection.scenarios {
            let id = scenario.scenario.id();
            header.push(format!("{id}_cost_without"));
            header.push(format!("{id}_cost_with"));
            header.push(format!("{id}_cumulative_savings"));
            header.push(format!("{id}_net_position"));
        }
        writer.write_record(&header)?;

        for (idx, year) in projection.years.iter().enumerate() {
            let mut row = vec![year.to_string()];
            for scenario in &projection.scenarios {
                for series in [
                    &scenario.cost_without,
                    &scenario.cost_with,
                    &scenario.cumulative_savings,
                    &scenario.net_position,
                ] {
                    row.push(format!(
                        "{:.2}",
                        series.get(idx).copied().unwrap_or_default()
                    ));
                }
            }
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulatorConfig;
    use crate::reference::{MonthlyPrices, ReferenceData};
    use crate::simulation::simulate;
    use crate::types::{ConsumptionInput, RegionProfile, SimulationRequest, TaxProfile};

    fn result() -> SimulationResult {
        let reference = ReferenceData {
            region: RegionProfile {
                area: "Tokyo".to_owned(),
                reduction_rate_percent: 40.0,
                price_column: "tokyo".to_owned(),
            },
            monthly_prices: MonthlyPrices::from_observations([(1, 30.0), (7, 20.0)]),
        };
        let request = SimulationRequest {
            region: "Tokyo".to_owned(),
            consumption: ConsumptionInput::MonthlyCost(80_000.0),
            tax: TaxProfile::individual(),
        };
        simulate(&SimulatorConfig::default(), &request, &reference).unwrap()
    }

    #[test]
    fn test_yen_grouping() {
        assert_eq!(yen(0.0), "¥0");
        assert_eq!(yen(999.4), "¥999");
        assert_eq!(yen(1_000.0), "¥1,000");
        assert_eq!(yen(3_540_000.0), "¥3,540,000");
        assert_eq!(yen(-12_345.6), "-¥12,346");
    }

    #[test]
    fn test_table_contains_sections() {
        let text = TableFormatter::format_result(&result());
        assert!(text.contains("Region: Tokyo"));
        assert!(text.contains("January"));
        assert!(text.contains("December"));
        assert!(text.contains("Recommendation:"));
        assert!(text.contains("Worst case"));
    }

    #[test]
    fn test_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projection.csv");
        let result = result();
        CsvFormatter::write_projection(&result, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 1 + 4 * 3);
        assert_eq!(&headers[0], "year");
        assert_eq!(&headers[1], "no_change_cost_without");
        assert_eq!(reader.records().count(), result.projection.years.len());
    }
}
