//! Rate tables shipped with the crate.
//!
//! Figures are the published annual parameters for Quebec residents.
//! Adding a year means adding a function here and registering it in
//! [`RateRegistry::builtin`](super::RateRegistry::builtin).

use rust_decimal_macros::dec;

use super::bracket::{BracketTable, TaxBracket};
use super::rate_table::*;
use crate::types::{Money, Rate};
use crate::QcFinanceResult;

fn band(min: Money, max: Money, rate: Rate) -> TaxBracket {
    TaxBracket::new(min, Some(max), rate)
}

fn top(min: Money, rate: Rate) -> TaxBracket {
    TaxBracket::new(min, None, rate)
}

fn sales_tax() -> SalesTaxRates {
    SalesTaxRates {
        gst: dec!(0.05),
        qst: dec!(0.09975),
    }
}

fn vacation_pay() -> VacationPayRates {
    VacationPayRates {
        base_rate: dec!(0.04),
        base_weeks: 2,
        extended_rate: dec!(0.06),
        extended_weeks: 3,
        extended_service_years: 3,
    }
}

fn mortgage_rules() -> MortgageRules {
    MortgageRules {
        insurance_free_ratio: dec!(0.20),
        insurance_tiers: vec![
            InsuranceTier {
                min_down_payment_ratio: dec!(0.15),
                premium_rate: dec!(0.028),
            },
            InsuranceTier {
                min_down_payment_ratio: dec!(0.10),
                premium_rate: dec!(0.031),
            },
            InsuranceTier {
                min_down_payment_ratio: dec!(0),
                premium_rate: dec!(0.040),
            },
        ],
        max_insurable_price: dec!(1_500_000),
        stress_test_buffer: dec!(0.02),
        min_down_payment_first_tier: dec!(500_000),
        min_down_payment_first_rate: dec!(0.05),
        min_down_payment_above_rate: dec!(0.10),
    }
}

fn student_loan() -> StudentLoanRates {
    StudentLoanRates {
        federal_interest_credit_rate: dec!(0.15),
        quebec_interest_credit_rate: dec!(0.20),
    }
}

fn daycare_bands() -> Vec<CreditBand> {
    vec![
        CreditBand {
            max_income: Some(dec!(24_095)),
            rate: dec!(0.78),
        },
        CreditBand {
            max_income: Some(dec!(150_000)),
            rate: dec!(0.70),
        },
        CreditBand {
            max_income: None,
            rate: dec!(0.67),
        },
    ]
}

pub fn rates_2024() -> QcFinanceResult<RateTable> {
    Ok(RateTable {
        tax_year: 2024,
        federal: IncomeTaxSchedule {
            brackets: BracketTable::new(
                "federal-2024",
                vec![
                    band(dec!(0), dec!(55_867), dec!(0.15)),
                    band(dec!(55_867), dec!(111_733), dec!(0.205)),
                    band(dec!(111_733), dec!(173_205), dec!(0.26)),
                    band(dec!(173_205), dec!(246_752), dec!(0.29)),
                    top(dec!(246_752), dec!(0.33)),
                ],
            )?,
            basic_personal_amount: dec!(15_705),
            abatement_rate: dec!(0.165),
        },
        quebec: IncomeTaxSchedule {
            brackets: BracketTable::new(
                "quebec-2024",
                vec![
                    band(dec!(0), dec!(51_780), dec!(0.14)),
                    band(dec!(51_780), dec!(103_545), dec!(0.19)),
                    band(dec!(103_545), dec!(126_000), dec!(0.24)),
                    top(dec!(126_000), dec!(0.2575)),
                ],
            )?,
            basic_personal_amount: dec!(18_056),
            abatement_rate: dec!(0),
        },
        payroll: PayrollRates {
            pension_plan: PensionPlanRates {
                rate: dec!(0.064),
                max_earnings: dec!(68_500),
                exemption: dec!(3_500),
            },
            parental_insurance: InsuranceRates {
                rate: dec!(0.00494),
                max_earnings: dec!(94_000),
            },
            employment_insurance: InsuranceRates {
                rate: dec!(0.0132),
                max_earnings: dec!(63_200),
            },
        },
        transfer_tax: TransferTaxRates {
            general: BracketTable::new(
                "transfer-general-2024",
                vec![
                    band(dec!(0), dec!(58_900), dec!(0.005)),
                    band(dec!(58_900), dec!(294_600), dec!(0.01)),
                    top(dec!(294_600), dec!(0.015)),
                ],
            )?,
            montreal: BracketTable::new(
                "transfer-montreal-2024",
                vec![
                    band(dec!(0), dec!(58_900), dec!(0.005)),
                    band(dec!(58_900), dec!(294_600), dec!(0.01)),
                    band(dec!(294_600), dec!(552_300), dec!(0.015)),
                    band(dec!(552_300), dec!(1_104_700), dec!(0.02)),
                    band(dec!(1_104_700), dec!(2_136_500), dec!(0.025)),
                    band(dec!(2_136_500), dec!(3_113_000), dec!(0.035)),
                    top(dec!(3_113_000), dec!(0.04)),
                ],
            )?,
        },
        sales_tax: sales_tax(),
        vacation_pay: vacation_pay(),
        daycare: DaycareRates {
            subsidized_daily_rate: dec!(8.85),
            max_eligible_expense_per_child: dec!(11_000),
            credit_bands: daycare_bands(),
        },
        mortgage: mortgage_rules(),
        student_loan: student_loan(),
        rent: RentRules {
            base_index: dec!(0.045),
            heating: HeatingAdjustments {
                electricity: dec!(0.011),
                gas: dec!(0.018),
                oil: dec!(0.025),
            },
            renovation_rate: dec!(0.05),
        },
        rrsp: RrspRules {
            dollar_limit: dec!(31_560),
        },
    })
}

pub fn rates_2025() -> QcFinanceResult<RateTable> {
    Ok(RateTable {
        tax_year: 2025,
        federal: IncomeTaxSchedule {
            brackets: BracketTable::new(
                "federal-2025",
                vec![
                    band(dec!(0), dec!(57_375), dec!(0.15)),
                    band(dec!(57_375), dec!(114_750), dec!(0.205)),
                    band(dec!(114_750), dec!(177_882), dec!(0.26)),
                    band(dec!(177_882), dec!(253_414), dec!(0.29)),
                    top(dec!(253_414), dec!(0.33)),
                ],
            )?,
            basic_personal_amount: dec!(16_129),
            abatement_rate: dec!(0.165),
        },
        quebec: IncomeTaxSchedule {
            brackets: BracketTable::new(
                "quebec-2025",
                vec![
                    band(dec!(0), dec!(53_255), dec!(0.14)),
                    band(dec!(53_255), dec!(106_495), dec!(0.19)),
                    band(dec!(106_495), dec!(129_590), dec!(0.24)),
                    top(dec!(129_590), dec!(0.2575)),
                ],
            )?,
            basic_personal_amount: dec!(18_571),
            abatement_rate: dec!(0),
        },
        payroll: PayrollRates {
            pension_plan: PensionPlanRates {
                rate: dec!(0.064),
                max_earnings: dec!(71_300),
                exemption: dec!(3_500),
            },
            parental_insurance: InsuranceRates {
                rate: dec!(0.00494),
                max_earnings: dec!(98_000),
            },
            employment_insurance: InsuranceRates {
                rate: dec!(0.0131),
                max_earnings: dec!(65_700),
            },
        },
        transfer_tax: TransferTaxRates {
            general: BracketTable::new(
                "transfer-general-2025",
                vec![
                    band(dec!(0), dec!(61_500), dec!(0.005)),
                    band(dec!(61_500), dec!(307_800), dec!(0.01)),
                    top(dec!(307_800), dec!(0.015)),
                ],
            )?,
            montreal: BracketTable::new(
                "transfer-montreal-2025",
                vec![
                    band(dec!(0), dec!(61_500), dec!(0.005)),
                    band(dec!(61_500), dec!(307_800), dec!(0.01)),
                    band(dec!(307_800), dec!(552_300), dec!(0.015)),
                    band(dec!(552_300), dec!(1_104_700), dec!(0.02)),
                    band(dec!(1_104_700), dec!(2_136_500), dec!(0.025)),
                    band(dec!(2_136_500), dec!(3_113_000), dec!(0.035)),
                    top(dec!(3_113_000), dec!(0.04)),
                ],
            )?,
        },
        sales_tax: sales_tax(),
        vacation_pay: vacation_pay(),
        daycare: DaycareRates {
            subsidized_daily_rate: dec!(9.10),
            max_eligible_expense_per_child: dec!(11_470),
            credit_bands: daycare_bands(),
        },
        mortgage: mortgage_rules(),
        student_loan: student_loan(),
        rent: RentRules {
            base_index: dec!(0.059),
            heating: HeatingAdjustments {
                electricity: dec!(0.011),
                gas: dec!(0.018),
                oil: dec!(0.025),
            },
            renovation_rate: dec!(0.05),
        },
        rrsp: RrspRules {
            dollar_limit: dec!(32_490),
        },
    })
}
