use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::report::{ReportLine, Summarize};
use crate::tables::RateTable;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::validate;
use crate::{QcFinanceError, QcFinanceResult};

/// Either `years_of_service` or both `hire_date` and `as_of` must be given.
/// When both are present the dates win.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationPayInput {
    /// Gross wages earned during the reference year.
    pub annual_earnings: Money,
    #[serde(default)]
    pub years_of_service: Option<u32>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacationPayResult {
    pub annual_earnings: Money,
    pub years_of_service: u32,
    pub vacation_rate: Rate,
    pub vacation_weeks: u32,
    pub vacation_pay: Money,
    pub pay_per_vacation_week: Money,
}

/// Completed years between two dates. An anniversary counts on its own day.
pub fn completed_years(hire_date: NaiveDate, as_of: NaiveDate) -> QcFinanceResult<u32> {
    if as_of < hire_date {
        return Err(QcFinanceError::DateError(format!(
            "as_of {as_of} is before hire_date {hire_date}"
        )));
    }
    let mut years = as_of.year() - hire_date.year();
    if (as_of.month(), as_of.day()) < (hire_date.month(), hire_date.day()) {
        years -= 1;
    }
    u32::try_from(years).map_err(|_| QcFinanceError::DateError("negative service period".into()))
}

pub fn calculate_vacation_pay(
    input: &VacationPayInput,
    rates: &RateTable,
) -> QcFinanceResult<ComputationOutput<VacationPayResult>> {
    validate::non_negative("annual_earnings", input.annual_earnings)?;
    let years_of_service = resolve_service_years(input)?;

    let table = &rates.vacation_pay;
    let (vacation_rate, vacation_weeks) = if years_of_service >= table.extended_service_years {
        (table.extended_rate, table.extended_weeks)
    } else {
        (table.base_rate, table.base_weeks)
    };
    let vacation_pay = input.annual_earnings * vacation_rate;
    let pay_per_vacation_week = if vacation_weeks == 0 {
        Decimal::ZERO
    } else {
        vacation_pay / Decimal::from(vacation_weeks)
    };

    tracing::debug!(
        years_of_service,
        rate = %vacation_rate,
        pay = %vacation_pay,
        "vacation pay computed"
    );

    let output = VacationPayResult {
        annual_earnings: input.annual_earnings,
        years_of_service,
        vacation_rate,
        vacation_weeks,
        vacation_pay,
        pay_per_vacation_week,
    };

    Ok(with_metadata(
        "Vacation pay: statutory percentage of reference-year earnings, rate and weeks \
         by years of continuous service",
        &serde_json::json!({
            "annual_earnings": input.annual_earnings.to_string(),
            "years_of_service": years_of_service,
            "extended_service_years": table.extended_service_years,
        }),
        Vec::new(),
        Some(rates.tax_year),
        output,
    ))
}

fn resolve_service_years(input: &VacationPayInput) -> QcFinanceResult<u32> {
    match (input.hire_date, input.as_of, input.years_of_service) {
        (Some(hire_date), Some(as_of), _) => completed_years(hire_date, as_of),
        (Some(_), None, _) => Err(QcFinanceError::invalid(
            "as_of",
            "required with hire_date; the current date is never assumed",
        )),
        (None, _, Some(years)) => Ok(years),
        (None, _, None) => Err(QcFinanceError::invalid(
            "years_of_service",
            "provide years_of_service or hire_date with as_of",
        )),
    }
}

impl Summarize for VacationPayResult {
    fn summary(&self) -> Vec<ReportLine> {
        vec![
            ReportLine::money("Annual earnings", self.annual_earnings),
            ReportLine::number("Years of service", Decimal::from(self.years_of_service)),
            ReportLine::rate("Vacation rate", self.vacation_rate),
            ReportLine::number("Vacation weeks", Decimal::from(self.vacation_weeks)),
            ReportLine::money("Vacation pay", self.vacation_pay),
            ReportLine::money("Per vacation week", self.pay_per_vacation_week),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::builtin::rates_2025;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn with_years(years: u32) -> VacationPayResult {
        let input = VacationPayInput {
            annual_earnings: dec!(50_000),
            years_of_service: Some(years),
            hire_date: None,
            as_of: None,
        };
        calculate_vacation_pay(&input, &rates_2025().unwrap())
            .unwrap()
            .result
    }

    #[test]
    fn test_base_rate_under_three_years() {
        let r = with_years(2);
        assert_eq!(r.vacation_rate, dec!(0.04));
        assert_eq!(r.vacation_weeks, 2);
        assert_eq!(r.vacation_pay, dec!(2_000));
        assert_eq!(r.pay_per_vacation_week, dec!(1_000));
    }

    #[test]
    fn test_extended_rate_from_three_years() {
        let r = with_years(3);
        assert_eq!(r.vacation_rate, dec!(0.06));
        assert_eq!(r.vacation_weeks, 3);
        assert_eq!(r.vacation_pay, dec!(3_000));
    }

    #[test]
    fn test_completed_years_anniversary() {
        assert_eq!(completed_years(date(2021, 6, 15), date(2024, 6, 14)).unwrap(), 2);
        assert_eq!(completed_years(date(2021, 6, 15), date(2024, 6, 15)).unwrap(), 3);
        assert_eq!(completed_years(date(2021, 6, 15), date(2021, 6, 15)).unwrap(), 0);
    }

    #[test]
    fn test_dates_take_precedence() {
        let input = VacationPayInput {
            annual_earnings: dec!(40_000),
            years_of_service: Some(10),
            hire_date: Some(date(2023, 1, 9)),
            as_of: Some(date(2025, 1, 8)),
        };
        let r = calculate_vacation_pay(&input, &rates_2025().unwrap())
            .unwrap()
            .result;
        assert_eq!(r.years_of_service, 1);
        assert_eq!(r.vacation_pay, dec!(1_600));
    }

    #[test]
    fn test_as_of_before_hire_is_date_error() {
        let input = VacationPayInput {
            annual_earnings: dec!(40_000),
            years_of_service: None,
            hire_date: Some(date(2025, 3, 1)),
            as_of: Some(date(2024, 3, 1)),
        };
        let err = calculate_vacation_pay(&input, &rates_2025().unwrap()).unwrap_err();
        assert!(matches!(err, QcFinanceError::DateError(_)));
    }

    #[test]
    fn test_missing_service_information() {
        let input = VacationPayInput {
            annual_earnings: dec!(40_000),
            years_of_service: None,
            hire_date: Some(date(2020, 3, 1)),
            as_of: None,
        };
        assert!(calculate_vacation_pay(&input, &rates_2025().unwrap()).is_err());
    }
}
