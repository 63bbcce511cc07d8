use clap::Args;
use rust_decimal::Decimal;
use serde_json::json;

use qc_finance_core::report::ReportLine;
use qc_finance_core::tables::{RateRegistry, RateTable};

use super::{CommandOutput, CommandResult, Context};
use crate::input;

/// Arguments for inspecting the rate tables
#[derive(Args)]
pub struct RatesArgs {
    /// List the available tax years instead of printing the selected table
    #[arg(long)]
    pub list: bool,
}

/// Built-in tables plus an optional `--rates` file, narrowed to one year.
///
/// Without `--year` the loaded file's year is used, else the latest
/// built-in year.
pub fn build_context(
    year: Option<i32>,
    rates_path: Option<&str>,
) -> Result<Context, Box<dyn std::error::Error>> {
    let mut registry = RateRegistry::builtin()?;
    let mut loaded_year = None;

    if let Some(path) = rates_path {
        let table: RateTable = input::file::read_structured(path)?;
        tracing::info!(path, tax_year = table.tax_year, "loaded rate table");
        loaded_year = Some(table.tax_year);
        registry.insert(table)?;
    }

    let rates = match year.or(loaded_year) {
        Some(y) => registry.get(y)?.clone(),
        None => registry.latest()?.clone(),
    };
    tracing::debug!(tax_year = rates.tax_year, "rate table selected");

    Ok(Context {
        rates,
        years: registry.years(),
    })
}

pub fn run_rates(args: RatesArgs, ctx: &Context) -> CommandResult {
    if args.list {
        return Ok(CommandOutput::plain(json!({
            "result": { "years": ctx.years },
        })));
    }
    Ok(CommandOutput {
        value: json!({ "result": serde_json::to_value(&ctx.rates)? }),
        summary: rate_summary(&ctx.rates),
    })
}

fn rate_summary(rates: &RateTable) -> Vec<ReportLine> {
    vec![
        ReportLine::number("Tax year", Decimal::from(rates.tax_year)),
        ReportLine::money("Federal basic personal amount", rates.federal.basic_personal_amount),
        ReportLine::rate("Federal top rate", rates.federal.brackets.top_rate()),
        ReportLine::money("Quebec basic personal amount", rates.quebec.basic_personal_amount),
        ReportLine::rate("Quebec top rate", rates.quebec.brackets.top_rate()),
        ReportLine::money("QPP maximum earnings", rates.payroll.pension_plan.max_earnings),
        ReportLine::rate("GST", rates.sales_tax.gst),
        ReportLine::rate("QST", rates.sales_tax.qst),
        ReportLine::money("RRSP dollar limit", rates.rrsp.dollar_limit),
    ]
}
