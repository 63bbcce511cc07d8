mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use qc_finance_core::report::Locale;

use commands::consumer::SalesTaxArgs;
use commands::employment::VacationPayArgs;
use commands::family::DaycareArgs;
use commands::housing::{RentIncreaseArgs, TransferTaxArgs};
use commands::income::{PayrollArgs, TaxReturnArgs};
use commands::lending::{AutoLoanArgs, MortgageArgs, StudentLoanArgs};
use commands::rates::RatesArgs;
use commands::savings::CompoundInterestArgs;
use commands::CommandResult;

/// Quebec personal-finance calculations
#[derive(Parser)]
#[command(
    name = "qcf",
    version,
    about = "Quebec personal-finance calculations",
    long_about = "A CLI for Quebec personal-finance calculations with decimal precision. \
                  Covers payroll deductions, a simplified tax return, mortgages, auto and \
                  student loans, daycare, rent increases, transfer duties, vacation pay, \
                  GST/QST and compound interest."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Tax year of the rate table (defaults to the latest available)
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Additional rate table file (JSON or YAML)
    #[arg(long, global = true)]
    rates: Option<String>,

    /// Locale for the report output
    #[arg(long, default_value = "en-CA", global = true)]
    locale: LocaleArg,

    /// Log calculation steps to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Net pay after income tax, QPP, QPIP and EI
    Payroll(PayrollArgs),
    /// Estimate the refund or balance due on the annual returns
    TaxReturn(TaxReturnArgs),
    /// Mortgage payment, default insurance, stress test and biweekly comparison
    Mortgage(MortgageArgs),
    /// Auto loan with GST/QST on the net-of-trade price
    AutoLoan(AutoLoanArgs),
    /// Student loan repayment and interest tax credits
    StudentLoan(StudentLoanArgs),
    /// Subsidized versus private daycare cost
    Daycare(DaycareArgs),
    /// Recommended rent increase
    RentIncrease(RentIncreaseArgs),
    /// Land transfer duties (welcome tax)
    TransferTax(TransferTaxArgs),
    /// Statutory vacation pay
    VacationPay(VacationPayArgs),
    /// GST and QST, forward or reverse
    SalesTax(SalesTaxArgs),
    /// Savings projection with monthly contributions
    CompoundInterest(CompoundInterestArgs),
    /// Show the rate table in use
    Rates(RatesArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
    Report,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LocaleArg {
    #[value(name = "en-CA", alias = "en")]
    EnCa,
    #[value(name = "fr-CA", alias = "fr")]
    FrCa,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::EnCa => Locale::EnCa,
            LocaleArg::FrCa => Locale::FrCa,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Commands::Version = cli.command {
        println!("qcf {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    match run(cli.command, cli.year, cli.rates.as_deref()) {
        Ok(out) => {
            output::format_output(&cli.output, &out, cli.locale.into());
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

fn run(command: Commands, year: Option<i32>, rates_path: Option<&str>) -> CommandResult {
    if let Commands::CompoundInterest(args) = command {
        return commands::savings::run_compound_interest(args);
    }

    let ctx = commands::rates::build_context(year, rates_path)?;
    match command {
        Commands::Payroll(args) => commands::income::run_payroll(args, &ctx),
        Commands::TaxReturn(args) => commands::income::run_tax_return(args, &ctx),
        Commands::Mortgage(args) => commands::lending::run_mortgage(args, &ctx),
        Commands::AutoLoan(args) => commands::lending::run_auto_loan(args, &ctx),
        Commands::StudentLoan(args) => commands::lending::run_student_loan(args, &ctx),
        Commands::Daycare(args) => commands::family::run_daycare(args, &ctx),
        Commands::RentIncrease(args) => commands::housing::run_rent_increase(args, &ctx),
        Commands::TransferTax(args) => commands::housing::run_transfer_tax(args, &ctx),
        Commands::VacationPay(args) => commands::employment::run_vacation_pay(args, &ctx),
        Commands::SalesTax(args) => commands::consumer::run_sales_tax(args, &ctx),
        Commands::Rates(args) => commands::rates::run_rates(args, &ctx),
        Commands::CompoundInterest(_) | Commands::Version => {
            Err("command does not use a rate table".into())
        }
    }
}
