//! Shared input guards used by every calculator's `validate_*_input` step.

use rust_decimal::Decimal;

use crate::error::QcFinanceError;
use crate::QcFinanceResult;

pub(crate) fn non_negative(field: &str, value: Decimal) -> QcFinanceResult<()> {
    if value < Decimal::ZERO {
        return Err(QcFinanceError::invalid(field, "must not be negative"));
    }
    Ok(())
}

pub(crate) fn positive(field: &str, value: Decimal) -> QcFinanceResult<()> {
    if value <= Decimal::ZERO {
        return Err(QcFinanceError::invalid(field, "must be positive"));
    }
    Ok(())
}

pub(crate) fn unit_rate(field: &str, value: Decimal) -> QcFinanceResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(QcFinanceError::invalid(
            field,
            "rate must be between 0 and 1 (decimal, not percent)",
        ));
    }
    Ok(())
}

pub(crate) fn positive_count(field: &str, value: u32) -> QcFinanceResult<()> {
    if value == 0 {
        return Err(QcFinanceError::invalid(field, "must be greater than zero"));
    }
    Ok(())
}

pub(crate) fn at_most(field: &str, value: u32, max: u32) -> QcFinanceResult<()> {
    if value > max {
        return Err(QcFinanceError::invalid(field, format!("must not exceed {max}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_guards() {
        assert!(non_negative("x", dec!(0)).is_ok());
        assert!(non_negative("x", dec!(-0.01)).is_err());
        assert!(positive("x", dec!(0)).is_err());
        assert!(unit_rate("x", dec!(1)).is_ok());
        assert!(unit_rate("x", dec!(4.8)).is_err());
        assert!(positive_count("x", 0).is_err());
        assert!(at_most("x", 40, 40).is_ok());
        assert!(at_most("x", 41, 40).is_err());
    }

    #[test]
    fn test_error_names_field() {
        let err = positive("term_years", dec!(0)).unwrap_err();
        assert!(err.to_string().contains("term_years"));
    }
}
