use clap::Args;
use rust_decimal::Decimal;

use qc_finance_core::savings::compound_interest::{
    self, CompoundInterestInput, CompoundingFrequency,
};

use super::{parse_enum, CommandOutput, CommandResult};
use crate::input;

/// Arguments for the compound interest projection
#[derive(Args)]
pub struct CompoundInterestArgs {
    /// Initial deposit
    #[arg(long, default_value = "0")]
    pub principal: Decimal,

    /// Deposit made at the end of every month
    #[arg(long, default_value = "0")]
    pub monthly: Decimal,

    /// Nominal annual rate (e.g. 0.05 for 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    #[arg(long)]
    pub years: Option<u32>,

    /// annually, semi-annually, quarterly, monthly or daily
    #[arg(long, value_parser = parse_enum::<CompoundingFrequency>)]
    pub compounding: Option<CompoundingFrequency>,

    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_compound_interest(args: CompoundInterestArgs) -> CommandResult {
    let savings_input: CompoundInterestInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => CompoundInterestInput {
            principal: args.principal,
            monthly_contribution: args.monthly,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
            compounding: args.compounding.unwrap_or_default(),
        },
    };
    CommandOutput::from_computation(compound_interest::calculate_compound_interest(&savings_input)?)
}
