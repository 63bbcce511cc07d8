pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod report;
pub mod table;

use qc_finance_core::report::Locale;

use crate::commands::CommandOutput;
use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, output: &CommandOutput, locale: Locale) {
    match format {
        OutputFormat::Json => json::print_json(&output.value),
        OutputFormat::Table => table::print_table(&output.value),
        OutputFormat::Csv => csv_out::print_csv(&output.value),
        OutputFormat::Minimal => minimal::print_minimal(&output.value),
        OutputFormat::Report => report::print_report(output, locale),
    }
}
