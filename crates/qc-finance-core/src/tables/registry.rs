use std::collections::BTreeMap;

use super::builtin;
use super::rate_table::RateTable;
use crate::error::QcFinanceError;
use crate::QcFinanceResult;

/// Immutable-after-load collection of validated rate tables keyed by tax year.
#[derive(Debug, Clone, Default)]
pub struct RateRegistry {
    tables: BTreeMap<i32, RateTable>,
}

impl RateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every table shipped in the crate.
    pub fn builtin() -> QcFinanceResult<Self> {
        let mut registry = Self::new();
        registry.insert(builtin::rates_2024()?)?;
        registry.insert(builtin::rates_2025()?)?;
        Ok(registry)
    }

    /// Validate and register a table, replacing any table for the same year.
    pub fn insert(&mut self, table: RateTable) -> QcFinanceResult<()> {
        table.validate()?;
        tracing::debug!(tax_year = table.tax_year, "registered rate table");
        self.tables.insert(table.tax_year, table);
        Ok(())
    }

    pub fn get(&self, tax_year: i32) -> QcFinanceResult<&RateTable> {
        self.tables
            .get(&tax_year)
            .ok_or(QcFinanceError::UnknownTaxYear(tax_year))
    }

    /// The most recent tax year available.
    pub fn latest(&self) -> QcFinanceResult<&RateTable> {
        self.tables
            .values()
            .next_back()
            .ok_or_else(|| QcFinanceError::InvalidInput {
                field: "registry".into(),
                reason: "no rate tables registered".into(),
            })
    }

    pub fn years(&self) -> Vec<i32> {
        self.tables.keys().copied().collect()
    }
}
