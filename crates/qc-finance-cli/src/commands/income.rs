use clap::Args;
use rust_decimal::Decimal;

use qc_finance_core::income::payroll::{self, PayrollInput};
use qc_finance_core::income::tax_return::{self, TaxReturnInput};
use qc_finance_core::PayFrequency;

use super::{parse_enum, CommandOutput, CommandResult, Context};
use crate::input;

/// Arguments for the payroll / net income calculation
#[derive(Args)]
pub struct PayrollArgs {
    /// Annual gross employment income
    #[arg(long)]
    pub gross_income: Option<Decimal>,

    /// Pay cycle: weekly, biweekly, semi-monthly, monthly
    #[arg(long, value_parser = parse_enum::<PayFrequency>)]
    pub pay_frequency: Option<PayFrequency>,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the simplified annual return
#[derive(Args)]
pub struct TaxReturnArgs {
    #[arg(long)]
    pub employment_income: Option<Decimal>,

    #[arg(long, default_value = "0")]
    pub other_income: Decimal,

    /// RRSP contributions deducted this year
    #[arg(long, default_value = "0")]
    pub rrsp: Decimal,

    #[arg(long, default_value = "0")]
    pub union_dues: Decimal,

    /// Federal income tax withheld at source
    #[arg(long)]
    pub federal_withheld: Option<Decimal>,

    /// Quebec income tax withheld at source
    #[arg(long)]
    pub quebec_withheld: Option<Decimal>,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_payroll(args: PayrollArgs, ctx: &Context) -> CommandResult {
    let payroll_input: PayrollInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => PayrollInput {
            gross_income: args
                .gross_income
                .ok_or("--gross-income is required (or provide --input)")?,
            pay_frequency: args.pay_frequency.unwrap_or_default(),
        },
    };
    CommandOutput::from_computation(payroll::calculate_payroll(&payroll_input, &ctx.rates)?)
}

pub fn run_tax_return(args: TaxReturnArgs, ctx: &Context) -> CommandResult {
    let return_input: TaxReturnInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => TaxReturnInput {
            employment_income: args
                .employment_income
                .ok_or("--employment-income is required (or provide --input)")?,
            other_income: args.other_income,
            rrsp_deduction: args.rrsp,
            union_dues: args.union_dues,
            federal_tax_withheld: args
                .federal_withheld
                .ok_or("--federal-withheld is required (or provide --input)")?,
            quebec_tax_withheld: args
                .quebec_withheld
                .ok_or("--quebec-withheld is required (or provide --input)")?,
        },
    };
    CommandOutput::from_computation(tax_return::estimate_tax_return(&return_input, &ctx.rates)?)
}
