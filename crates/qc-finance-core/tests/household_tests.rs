use chrono::NaiveDate;
use qc_finance_core::consumer::sales_tax::{calculate_sales_tax, SalesTaxInput};
use qc_finance_core::employment::vacation_pay::{calculate_vacation_pay, VacationPayInput};
use qc_finance_core::family::daycare::{calculate_daycare, DaycareInput, DaycareOption};
use qc_finance_core::housing::rent_increase::{calculate_rent_increase, RentIncreaseInput};
use qc_finance_core::housing::transfer_tax::{
    calculate_transfer_tax, Municipality, TransferTaxInput,
};
use qc_finance_core::report::{Locale, Summarize};
use qc_finance_core::savings::compound_interest::{
    calculate_compound_interest, CompoundInterestInput, CompoundingFrequency,
};
use qc_finance_core::tables::builtin::{rates_2024, rates_2025};
use qc_finance_core::tables::HeatingType;
use rust_decimal_macros::dec;

// ===========================================================================
// Land transfer tax
// ===========================================================================

#[test]
fn test_transfer_tax_breakdown_sums_to_total() {
    let rates = rates_2025().unwrap();
    for price in [dec!(61_500), dec!(307_800), dec!(552_300), dec!(3_500_000)] {
        for municipality in [Municipality::General, Municipality::Montreal] {
            let r = calculate_transfer_tax(
                &TransferTaxInput {
                    property_price: price,
                    municipality,
                },
                &rates,
            )
            .unwrap()
            .result;
            let sum: rust_decimal::Decimal = r.breakdown.iter().map(|s| s.tax).sum();
            assert_eq!(sum, r.total_tax);
            assert!(r.effective_rate <= dec!(0.04));
        }
    }
}

#[test]
fn test_transfer_tax_first_bracket_only() {
    let r = calculate_transfer_tax(
        &TransferTaxInput {
            property_price: dec!(50_000),
            municipality: Municipality::General,
        },
        &rates_2024().unwrap(),
    )
    .unwrap()
    .result;
    assert_eq!(r.total_tax, dec!(250));
    assert_eq!(r.effective_rate, dec!(0.005));
}

// ===========================================================================
// Rent increase
// ===========================================================================

#[test]
fn test_rent_increase_heating_types_ordered() {
    let rates = rates_2025().unwrap();
    let new_rent = |heating| {
        calculate_rent_increase(
            &RentIncreaseInput {
                current_rent: dec!(1_200),
                heating,
                municipal_tax_increase: dec!(0),
                insurance_increase: dec!(0),
                maintenance_increase: dec!(0),
                renovation_cost: dec!(0),
            },
            &rates,
        )
        .unwrap()
        .result
        .new_rent
    };
    assert!(new_rent(HeatingType::NotIncluded) < new_rent(HeatingType::Electricity));
    assert!(new_rent(HeatingType::Electricity) < new_rent(HeatingType::Gas));
    assert!(new_rent(HeatingType::Gas) < new_rent(HeatingType::Oil));
}

// ===========================================================================
// Daycare
// ===========================================================================

#[test]
fn test_daycare_high_income_band() {
    let r = calculate_daycare(
        &DaycareInput {
            private_daily_rate: dec!(40),
            days_per_year: 261,
            children: 1,
            family_income: dec!(200_000),
        },
        &rates_2025().unwrap(),
    )
    .unwrap()
    .result;
    assert_eq!(r.credit_rate, dec!(0.67));
    assert_eq!(r.private_annual_cost, dec!(10_440));
    assert_eq!(r.tax_credit, dec!(6_994.8));
    assert_eq!(r.cheaper_option, DaycareOption::Subsidized);
}

// ===========================================================================
// Vacation pay
// ===========================================================================

#[test]
fn test_vacation_pay_from_dates() {
    let r = calculate_vacation_pay(
        &VacationPayInput {
            annual_earnings: dec!(62_000),
            years_of_service: None,
            hire_date: NaiveDate::from_ymd_opt(2019, 9, 3),
            as_of: NaiveDate::from_ymd_opt(2025, 4, 30),
        },
        &rates_2025().unwrap(),
    )
    .unwrap()
    .result;
    assert_eq!(r.years_of_service, 5);
    assert_eq!(r.vacation_weeks, 3);
    assert_eq!(r.vacation_pay, dec!(3_720));
}

// ===========================================================================
// Sales tax
// ===========================================================================

#[test]
fn test_sales_tax_forward_and_reverse_agree() {
    let rates = rates_2025().unwrap();
    let forward = calculate_sales_tax(
        &SalesTaxInput {
            amount: dec!(100),
            tax_included: false,
        },
        &rates,
    )
    .unwrap()
    .result;
    assert_eq!(forward.total_amount, dec!(114.975));

    let reverse = calculate_sales_tax(
        &SalesTaxInput {
            amount: forward.total_amount,
            tax_included: true,
        },
        &rates,
    )
    .unwrap()
    .result;
    assert_eq!(reverse.pre_tax_amount, dec!(100));
    assert_eq!(reverse.gst, dec!(5));
}

// ===========================================================================
// Compound interest and reporting
// ===========================================================================

#[test]
fn test_compound_interest_projection_is_monotone() {
    let r = calculate_compound_interest(&CompoundInterestInput {
        principal: dec!(5_000),
        monthly_contribution: dec!(250),
        annual_rate: dec!(0.045),
        years: 15,
        compounding: CompoundingFrequency::Quarterly,
    })
    .unwrap()
    .result;
    assert_eq!(r.projection.len(), 15);
    for pair in r.projection.windows(2) {
        assert!(pair[1].balance > pair[0].balance);
        assert!(pair[1].interest > pair[0].interest);
    }
    assert_eq!(r.total_contributions, dec!(5_000) + dec!(250) * dec!(180));
}

#[test]
fn test_summary_renders_in_both_locales() {
    let r = calculate_transfer_tax(
        &TransferTaxInput {
            property_price: dec!(500_000),
            municipality: Municipality::General,
        },
        &rates_2025().unwrap(),
    )
    .unwrap()
    .result;

    let en = r.render_summary(Locale::EnCa);
    let fr = r.render_summary(Locale::FrCa);
    assert_eq!(en.len(), fr.len());
    assert!(en.iter().any(|(_, v)| v == "$5,653.50"));
    assert!(fr.iter().any(|(_, v)| v == "5 653,50 $"));
}
