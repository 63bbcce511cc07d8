pub mod consumer;
pub mod employment;
pub mod family;
pub mod housing;
pub mod income;
pub mod lending;
pub mod rates;
pub mod savings;

use qc_finance_core::report::{ReportLine, Summarize};
use qc_finance_core::tables::RateTable;
use qc_finance_core::ComputationOutput;
use serde::Serialize;
use serde_json::Value;

pub type CommandResult = Result<CommandOutput, Box<dyn std::error::Error>>;

/// What a command hands to the output layer: the full envelope as JSON and
/// the headline lines for `--output report`.
pub struct CommandOutput {
    pub value: Value,
    pub summary: Vec<ReportLine>,
}

impl CommandOutput {
    pub fn from_computation<T: Serialize + Summarize>(output: ComputationOutput<T>) -> CommandResult {
        let summary = output.result.summary();
        Ok(CommandOutput {
            value: serde_json::to_value(&output)?,
            summary,
        })
    }

    pub fn plain(value: Value) -> Self {
        CommandOutput {
            value,
            summary: Vec::new(),
        }
    }
}

/// Rate table selected by `--year` / `--rates` for this invocation.
pub struct Context {
    pub rates: RateTable,
    pub years: Vec<i32>,
}

/// Parse a snake_case enum flag (`semi-monthly` or `semi_monthly`) through
/// its serde representation.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, String> {
    serde_json::from_value(Value::String(s.replace('-', "_"))).map_err(|e| e.to_string())
}
