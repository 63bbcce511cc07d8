use clap::Args;
use rust_decimal::Decimal;

use qc_finance_core::lending::auto_loan::{self, AutoLoanInput};
use qc_finance_core::lending::mortgage::{self, MortgageInput};
use qc_finance_core::lending::student_loan::{self, StudentLoanInput};
use qc_finance_core::PaymentFrequency;

use super::{parse_enum, CommandOutput, CommandResult, Context};
use crate::input;

/// Arguments for the mortgage calculation
#[derive(Args)]
pub struct MortgageArgs {
    #[arg(long)]
    pub price: Option<Decimal>,

    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Nominal annual rate (e.g. 0.048 for 4.8%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    #[arg(long, default_value = "25")]
    pub years: u32,

    /// monthly or biweekly
    #[arg(long, value_parser = parse_enum::<PaymentFrequency>)]
    pub frequency: Option<PaymentFrequency>,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the auto loan calculation
#[derive(Args)]
pub struct AutoLoanArgs {
    #[arg(long)]
    pub price: Option<Decimal>,

    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    #[arg(long, default_value = "0")]
    pub trade_in: Decimal,

    /// Nominal annual rate (e.g. 0.069 for 6.9%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    #[arg(long, default_value = "60")]
    pub months: u32,

    /// monthly or biweekly
    #[arg(long, value_parser = parse_enum::<PaymentFrequency>)]
    pub frequency: Option<PaymentFrequency>,

    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the student loan calculation
#[derive(Args)]
pub struct StudentLoanArgs {
    #[arg(long)]
    pub principal: Option<Decimal>,

    #[arg(long)]
    pub rate: Option<Decimal>,

    #[arg(long, default_value = "120")]
    pub months: u32,

    /// Months of interest-only grace before repayment starts
    #[arg(long, default_value = "0")]
    pub grace_months: u32,

    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_mortgage(args: MortgageArgs, ctx: &Context) -> CommandResult {
    let mortgage_input: MortgageInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => MortgageInput {
            purchase_price: args.price.ok_or("--price is required (or provide --input)")?,
            down_payment: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            amortization_years: args.years,
            frequency: args.frequency.unwrap_or_default(),
        },
    };
    CommandOutput::from_computation(mortgage::calculate_mortgage(&mortgage_input, &ctx.rates)?)
}

pub fn run_auto_loan(args: AutoLoanArgs, ctx: &Context) -> CommandResult {
    let loan_input: AutoLoanInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => AutoLoanInput {
            vehicle_price: args.price.ok_or("--price is required (or provide --input)")?,
            down_payment: args.down_payment,
            trade_in_value: args.trade_in,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_months: args.months,
            frequency: args.frequency.unwrap_or_default(),
        },
    };
    CommandOutput::from_computation(auto_loan::calculate_auto_loan(&loan_input, &ctx.rates)?)
}

pub fn run_student_loan(args: StudentLoanArgs, ctx: &Context) -> CommandResult {
    let loan_input: StudentLoanInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => StudentLoanInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            repayment_months: args.months,
            grace_months: args.grace_months,
        },
    };
    CommandOutput::from_computation(student_loan::calculate_student_loan(&loan_input, &ctx.rates)?)
}
