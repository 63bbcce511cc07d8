use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;
use serde::Serialize;

use qc_finance_core::tables::{RateRegistry, RateTable};
use qc_finance_core::{ComputationOutput, QcFinanceResult};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse `input_json`, run `calculate` against the built-in table for
/// `tax_year` (latest when absent) and serialise the envelope.
fn run_with_rates<I, T>(
    input_json: &str,
    tax_year: Option<i32>,
    calculate: impl FnOnce(&I, &RateTable) -> QcFinanceResult<ComputationOutput<T>>,
) -> NapiResult<String>
where
    I: DeserializeOwned,
    T: Serialize,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let registry = RateRegistry::builtin().map_err(to_napi_error)?;
    let rates = match tax_year {
        Some(year) => registry.get(year),
        None => registry.latest(),
    }
    .map_err(to_napi_error)?;
    let output = calculate(&input, rates).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Rate tables
// ---------------------------------------------------------------------------

#[napi]
pub fn tax_years() -> NapiResult<Vec<i32>> {
    Ok(RateRegistry::builtin().map_err(to_napi_error)?.years())
}

#[napi]
pub fn rate_table(tax_year: Option<i32>) -> NapiResult<String> {
    let registry = RateRegistry::builtin().map_err(to_napi_error)?;
    let rates = match tax_year {
        Some(year) => registry.get(year),
        None => registry.latest(),
    }
    .map_err(to_napi_error)?;
    serde_json::to_string(rates).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Income
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_payroll(input_json: String, tax_year: Option<i32>) -> NapiResult<String> {
    run_with_rates(
        &input_json,
        tax_year,
        qc_finance_core::income::payroll::calculate_payroll,
    )
}

#[napi]
pub fn estimate_tax_return(input_json: String, tax_year: Option<i32>) -> NapiResult<String> {
    run_with_rates(
        &input_json,
        tax_year,
        qc_finance_core::income::tax_return::estimate_tax_return,
    )
}

// ---------------------------------------------------------------------------
// Lending
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_mortgage(input_json: String, tax_year: Option<i32>) -> NapiResult<String> {
    run_with_rates(
        &input_json,
        tax_year,
        qc_finance_core::lending::mortgage::calculate_mortgage,
    )
}

#[napi]
pub fn calculate_auto_loan(input_json: String, tax_year: Option<i32>) -> NapiResult<String> {
    run_with_rates(
        &input_json,
        tax_year,
        qc_finance_core::lending::auto_loan::calculate_auto_loan,
    )
}

#[napi]
pub fn calculate_student_loan(input_json: String, tax_year: Option<i32>) -> NapiResult<String> {
    run_with_rates(
        &input_json,
        tax_year,
        qc_finance_core::lending::student_loan::calculate_student_loan,
    )
}

// ---------------------------------------------------------------------------
// Housing
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_transfer_tax(input_json: String, tax_year: Option<i32>) -> NapiResult<String> {
    run_with_rates(
        &input_json,
        tax_year,
        qc_finance_core::housing::transfer_tax::calculate_transfer_tax,
    )
}

#[napi]
pub fn calculate_rent_increase(input_json: String, tax_year: Option<i32>) -> NapiResult<String> {
    run_with_rates(
        &input_json,
        tax_year,
        qc_finance_core::housing::rent_increase::calculate_rent_increase,
    )
}

// ---------------------------------------------------------------------------
// Family, employment, consumer
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_daycare(input_json: String, tax_year: Option<i32>) -> NapiResult<String> {
    run_with_rates(
        &input_json,
        tax_year,
        qc_finance_core::family::daycare::calculate_daycare,
    )
}

#[napi]
pub fn calculate_vacation_pay(input_json: String, tax_year: Option<i32>) -> NapiResult<String> {
    run_with_rates(
        &input_json,
        tax_year,
        qc_finance_core::employment::vacation_pay::calculate_vacation_pay,
    )
}

#[napi]
pub fn calculate_sales_tax(input_json: String, tax_year: Option<i32>) -> NapiResult<String> {
    run_with_rates(
        &input_json,
        tax_year,
        qc_finance_core::consumer::sales_tax::calculate_sales_tax,
    )
}

// ---------------------------------------------------------------------------
// Savings
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_compound_interest(input_json: String) -> NapiResult<String> {
    let input: qc_finance_core::savings::compound_interest::CompoundInterestInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = qc_finance_core::savings::compound_interest::calculate_compound_interest(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
