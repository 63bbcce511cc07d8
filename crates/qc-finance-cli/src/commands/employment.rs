use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;

use qc_finance_core::employment::vacation_pay::{self, VacationPayInput};

use super::{CommandOutput, CommandResult, Context};
use crate::input;

/// Arguments for the vacation pay calculation
#[derive(Args)]
pub struct VacationPayArgs {
    /// Gross wages earned in the reference year
    #[arg(long)]
    pub earnings: Option<Decimal>,

    /// Completed years of continuous service
    #[arg(long)]
    pub years: Option<u32>,

    /// Hire date (YYYY-MM-DD); requires --as-of
    #[arg(long)]
    pub hire_date: Option<NaiveDate>,

    /// Date at which service is measured (YYYY-MM-DD)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_vacation_pay(args: VacationPayArgs, ctx: &Context) -> CommandResult {
    let vacation_input: VacationPayInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => VacationPayInput {
            annual_earnings: args
                .earnings
                .ok_or("--earnings is required (or provide --input)")?,
            years_of_service: args.years,
            hire_date: args.hire_date,
            as_of: args.as_of,
        },
    };
    CommandOutput::from_computation(vacation_pay::calculate_vacation_pay(&vacation_input, &ctx.rates)?)
}
