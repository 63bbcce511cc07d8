use clap::Args;
use rust_decimal::Decimal;

use qc_finance_core::housing::rent_increase::{self, RentIncreaseInput};
use qc_finance_core::housing::transfer_tax::{self, Municipality, TransferTaxInput};
use qc_finance_core::tables::HeatingType;

use super::{parse_enum, CommandOutput, CommandResult, Context};
use crate::input;

/// Arguments for the land transfer tax ("welcome tax")
#[derive(Args)]
pub struct TransferTaxArgs {
    #[arg(long)]
    pub price: Option<Decimal>,

    /// general or montreal
    #[arg(long, value_parser = parse_enum::<Municipality>)]
    pub municipality: Option<Municipality>,

    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the rent increase calculation
#[derive(Args)]
pub struct RentIncreaseArgs {
    /// Current monthly rent
    #[arg(long)]
    pub rent: Option<Decimal>,

    /// not-included, electricity, gas or oil
    #[arg(long, value_parser = parse_enum::<HeatingType>)]
    pub heating: Option<HeatingType>,

    /// Annual municipal and school tax increase for the dwelling
    #[arg(long, default_value = "0")]
    pub tax_increase: Decimal,

    /// Annual insurance increase for the dwelling
    #[arg(long, default_value = "0")]
    pub insurance_increase: Decimal,

    /// Annual maintenance increase for the dwelling
    #[arg(long, default_value = "0")]
    pub maintenance_increase: Decimal,

    /// Major renovation cost attributable to the dwelling
    #[arg(long, default_value = "0")]
    pub renovation: Decimal,

    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_transfer_tax(args: TransferTaxArgs, ctx: &Context) -> CommandResult {
    let tax_input: TransferTaxInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => TransferTaxInput {
            property_price: args.price.ok_or("--price is required (or provide --input)")?,
            municipality: args.municipality.unwrap_or_default(),
        },
    };
    CommandOutput::from_computation(transfer_tax::calculate_transfer_tax(&tax_input, &ctx.rates)?)
}

pub fn run_rent_increase(args: RentIncreaseArgs, ctx: &Context) -> CommandResult {
    let rent_input: RentIncreaseInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => RentIncreaseInput {
            current_rent: args.rent.ok_or("--rent is required (or provide --input)")?,
            heating: args.heating.unwrap_or_default(),
            municipal_tax_increase: args.tax_increase,
            insurance_increase: args.insurance_increase,
            maintenance_increase: args.maintenance_increase,
            renovation_cost: args.renovation,
        },
    };
    CommandOutput::from_computation(rent_increase::calculate_rent_increase(&rent_input, &ctx.rates)?)
}
