use clap::Args;
use rust_decimal::Decimal;

use qc_finance_core::family::daycare::{self, DaycareInput};

use super::{CommandOutput, CommandResult, Context};
use crate::input;

/// Arguments for the subsidized vs private daycare comparison
#[derive(Args)]
pub struct DaycareArgs {
    /// Daily fee of the private daycare
    #[arg(long)]
    pub private_rate: Option<Decimal>,

    /// Net family income used for the credit rate
    #[arg(long)]
    pub family_income: Option<Decimal>,

    #[arg(long, default_value = "1")]
    pub children: u32,

    #[arg(long, default_value = "261")]
    pub days: u32,

    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_daycare(args: DaycareArgs, ctx: &Context) -> CommandResult {
    let daycare_input: DaycareInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => DaycareInput {
            private_daily_rate: args
                .private_rate
                .ok_or("--private-rate is required (or provide --input)")?,
            days_per_year: args.days,
            children: args.children,
            family_income: args
                .family_income
                .ok_or("--family-income is required (or provide --input)")?,
        },
    };
    CommandOutput::from_computation(daycare::calculate_daycare(&daycare_input, &ctx.rates)?)
}
