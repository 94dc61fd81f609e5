// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! CLI argument definitions using clap.

use crate::types::{
    BusinessType, ConsumptionInput, CorporateTaxBracket, CreditRate, IncomeTaxBracket,
    SimulationRequest, TaxIncentive, TaxProfile,
};
use anyhow::{Result, bail};
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fluxion-roi")]
#[command(author, version, about = "FluxION battery investment simulator")]
#[command(
    long_about = "Estimate electricity cost savings, payback and ROI of a battery installation.\n\
    \nReference data (regional reduction rates and historical power prices) is fetched\n\
    from the configured endpoints on every run.\n\
    \nExamples:\n  \
    fluxion-roi run --region Tokyo --monthly-cost 80000\n  \
    fluxion-roi run --region Osaka --monthly-usage 2000 --business company --incentive credit\n  \
    fluxion-roi example-config > roi.toml"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one simulation and print the result
    Run(RunArgs),

    /// Print an example TOML configuration with the built-in defaults
    ExampleConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BusinessArg {
    Individual,
    SoleProprietor,
    Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CorporateBracketArg {
    Reduced,
    Standard,
    Effective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IncentiveArg {
    /// Expense the full product price this year
    Immediate,
    /// Investment tax credit
    Credit,
    /// Straight-line depreciation
    Depreciation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CreditRateArg {
    #[value(name = "7")]
    Seven,
    #[value(name = "10")]
    Ten,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Parser)]
#[command(group(
    ArgGroup::new("consumption")
        .required(true)
        .args(["monthly_cost", "monthly_usage"])
))]
pub struct RunArgs {
    /// Area name as listed in the regional reduction table
    #[arg(long)]
    pub region: String,

    /// Monthly electricity bill in JPY
    #[arg(long, value_name = "JPY")]
    pub monthly_cost: Option<f64>,

    /// Monthly electricity usage in kWh (converted with the retail unit price)
    #[arg(long, value_name = "KWH")]
    pub monthly_usage: Option<f64>,

    #[arg(long, value_enum, default_value_t = BusinessArg::Individual)]
    pub business: BusinessArg,

    /// Income tax bracket in percent (sole proprietors only)
    #[arg(long, value_name = "PERCENT")]
    pub income_bracket: Option<u8>,

    /// Corporate tax bracket (companies only)
    #[arg(long, value_enum, default_value_t = CorporateBracketArg::Standard)]
    pub corporate_bracket: CorporateBracketArg,

    #[arg(long, value_enum, default_value_t = IncentiveArg::Immediate)]
    pub incentive: IncentiveArg,

    /// Tax credit rate in percent, used with `--incentive credit`
    #[arg(long, value_enum, default_value_t = CreditRateArg::Seven)]
    pub credit_rate: CreditRateArg,

    /// TOML file overriding the built-in constants
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Write the long-horizon projection to a CSV file
    #[arg(long, value_name = "PATH")]
    pub csv_path: Option<PathBuf>,
}

impl RunArgs {
    pub fn consumption(&self) -> Result<ConsumptionInput> {
        match (self.monthly_cost, self.monthly_usage) {
            (Some(cost), None) => Ok(ConsumptionInput::MonthlyCost(cost)),
            (None, Some(usage)) => Ok(ConsumptionInput::MonthlyUsage(usage)),
            _ => bail!("exactly one of --monthly-cost or --monthly-usage is required"),
        }
    }

    pub fn tax_profile(&self) -> Result<TaxProfile> {
        let business = match self.business {
            BusinessArg::Individual => BusinessType::Individual,
            BusinessArg::SoleProprietor => {
                let Some(percent) = self.income_bracket else {
                    bail!("--income-bracket is required for sole proprietors");
                };
                BusinessType::SoleProprietor(IncomeTaxBracket(percent))
            }
            BusinessArg::Company => BusinessType::Company(match self.corporate_bracket {
                CorporateBracketArg::Reduced => CorporateTaxBracket::Reduced,
                CorporateBracketArg::Standard => CorporateTaxBracket::Standard,
                CorporateBracketArg::Effective => CorporateTaxBracket::Effective,
            }),
        };

        let incentive = match self.incentive {
            IncentiveArg::Immediate => TaxIncentive::ImmediateExpensing,
            IncentiveArg::Credit => TaxIncentive::TaxCredit(match self.credit_rate {
                CreditRateArg::Seven => CreditRate::Standard,
                CreditRateArg::Ten => CreditRate::Enhanced,
            }),
            IncentiveArg::Depreciation => TaxIncentive::Depreciation,
        };

        Ok(TaxProfile {
            business,
            incentive,
        })
    }

    pub fn to_request(&self) -> Result<SimulationRequest> {
        Ok(SimulationRequest {
            region: self.region.trim().to_owned(),
            consumption: self.consumption()?,
            tax: self.tax_profile()?,
        })
    }
}
