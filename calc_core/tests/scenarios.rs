use calc_core::amortization::{amortize, LoanTerms, RepaymentType};
use calc_core::calculations::{calculate_item, CalculationItem, CalculationOutcome};
use calc_core::formulas::{bmi, bmi_category, discount, weighted_average_cost, BmiCategory, DiscountMode};
use calc_core::formulas::{StockPosition, StockTransaction};
use calc_core::tax::{lottery_withholding, progressive_tax, LotteryTaxTable, TaxBracket};
use calc_core::units::{Centimeters, Kilograms};
use calc_core::{CalcError, EngineSettings};

fn run(json: &str) -> Result<CalculationOutcome, CalcError> {
    let item: CalculationItem = serde_json::from_str(json).expect("valid calculation item");
    calculate_item(&item, &EngineSettings::default())
}

#[test]
fn test_bmi_scenario() {
    let value = bmi(Centimeters(170.0), Kilograms(65.0)).unwrap();
    assert!((value - 22.49).abs() < 0.01);
    assert_eq!(bmi_category(value), BmiCategory::Normal);

    match run(r#"{ "type": "bmi", "height_cm": "170", "weight_kg": "65" }"#).unwrap() {
        CalculationOutcome::Bmi(r) => {
            assert_eq!(r.category, BmiCategory::Normal);
            assert!(r.ideal_weight_min < r.weight_kg && r.weight_kg < r.ideal_weight_max);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_bmi_boundaries_belong_to_upper_category() {
    let expected = [
        (18.5, BmiCategory::Normal),
        (23.0, BmiCategory::Over),
        (25.0, BmiCategory::ObeseMild),
        (30.0, BmiCategory::ObeseModerate),
        (35.0, BmiCategory::ObeseSevere),
    ];
    for (boundary, category) in expected {
        assert_eq!(bmi_category(boundary), category, "bmi {boundary}");
    }
}

#[test]
fn test_lottery_jackpot_scenario() {
    match run(r#"{ "type": "lottery", "win_amount": "1,000,000,000", "lottery_type": "lotto" }"#).unwrap() {
        CalculationOutcome::Lottery(r) => {
            assert_eq!(r.taxable_amount, 999_999_000.0);
            assert!((r.total_tax - 296_999_670.0).abs() < 1e-3);
            assert!((r.take_home - 703_000_330.0).abs() < 1e-3);
            assert_eq!(r.withholding.breakdown.len(), 2);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_lottery_flat_tier_agrees_at_high_threshold() {
    let table = LotteryTaxTable::default();
    let at = lottery_withholding(300_000_000.0, &table).unwrap();
    let above = lottery_withholding(300_000_001.0, &table).unwrap();
    assert!((at.result.total_tax - 66_000_000.0).abs() < 1e-6);
    assert!((above.result.total_tax - at.result.total_tax - 0.33).abs() < 1e-6);
}

#[test]
fn test_progressive_tax_monotone_across_boundaries() {
    let brackets = [
        TaxBracket::new(0.0, 0.06),
        TaxBracket::new(14_000_000.0, 0.15),
        TaxBracket::new(50_000_000.0, 0.24),
    ];
    let mut previous = 0.0;
    for amount in [0.0, 1.0, 13_999_999.0, 14_000_000.0, 14_000_001.0, 50_000_000.0, 90_000_000.0] {
        let tax = progressive_tax(amount, &brackets).unwrap().total_tax;
        assert!(tax >= previous, "tax fell at {amount}");
        previous = tax;
    }
    let at = progressive_tax(14_000_000.0, &brackets).unwrap().total_tax;
    assert!((at - 840_000.0).abs() < 1e-6);
}

#[test]
fn test_mortgage_scenario() {
    let terms = LoanTerms::from_years(300_000_000.0, 3.5, 30.0, RepaymentType::EqualInstallment).unwrap();
    let schedule = amortize(&terms).unwrap();
    assert_eq!(schedule.payments.len(), 360);
    assert!((schedule.first_month_payment() - 1_347_134.06).abs() < 0.01);
    assert!((schedule.total_principal() - 300_000_000.0).abs() < 1e-3);
    assert_eq!(schedule.payments.last().map(|p| p.remaining_balance), Some(0.0));

    let json = r#"{
        "type": "mortgage",
        "principal": "300,000,000",
        "annual_rate_percent": "3.5",
        "term_years": "30",
        "repayment_type": "EQUAL_INSTALLMENT"
    }"#;
    match run(json).unwrap() {
        CalculationOutcome::Mortgage(r) => {
            assert_eq!(r.schedule.len(), 12);
            assert!((r.total_interest - schedule.total_interest()).abs() < 1e-6);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_equal_principal_repays_in_full() {
    let terms = LoanTerms::from_years(120_000_000.0, 4.2, 10.0, RepaymentType::EqualPrincipal).unwrap();
    let schedule = amortize(&terms).unwrap();
    assert!((schedule.total_principal() - 120_000_000.0).abs() < 1e-3);
    assert_eq!(schedule.payments.last().map(|p| p.remaining_balance), Some(0.0));
}

#[test]
fn test_discount_duality() {
    let original = 48_000.0;
    for rate in [0.0, 12.5, 30.0, 99.0] {
        let by_rate = discount(original, DiscountMode::Rate(rate)).unwrap();
        let by_amount = discount(original, DiscountMode::Amount(original * rate / 100.0)).unwrap();
        assert!((by_rate.final_price - by_amount.final_price).abs() < 1e-9);
    }
}

#[test]
fn test_cost_basis_rules() {
    let start = StockPosition::new(100.0, 50_000.0);

    let after_zero_buy = weighted_average_cost(start, &[StockTransaction::buy(0.0, 99_999.0)]).unwrap();
    assert_eq!(after_zero_buy.average_cost, 50_000.0);

    let emptied = weighted_average_cost(start, &[StockTransaction::sell(100.0, 60_000.0)]).unwrap();
    assert_eq!(emptied.shares, 0.0);
    assert!(emptied.average_cost.is_finite());

    let err = weighted_average_cost(start, &[StockTransaction::sell(101.0, 60_000.0)]).unwrap_err();
    assert_eq!(err, CalcError::insufficient_shares(101.0, 100.0));
    assert_eq!(err.error_code(), "INSUFFICIENT_SHARES");
}

#[test]
fn test_salary_and_discount_documents() {
    match run(r#"{ "type": "salary", "annual_salary": "36,000,000", "dependents": 2 }"#).unwrap() {
        CalculationOutcome::Salary(r) => {
            assert!((r.net_monthly - 2_548_397.74845).abs() < 1e-4);
            assert_eq!(r.dependents, 2);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    match run(r#"{ "type": "discount", "original_price": 80000, "mode": "amount", "value": "12,000" }"#).unwrap() {
        CalculationOutcome::Discount(r) => assert!((r.discount_rate - 15.0).abs() < 1e-9),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_rejections_produce_no_result() {
    let rejected = [
        r#"{ "type": "bmi", "height_cm": "0", "weight_kg": "65" }"#,
        r#"{ "type": "lottery", "win_amount": "abc" }"#,
        r#"{ "type": "mortgage", "principal": 1000000, "annual_rate_percent": 3, "term_years": "" }"#,
        r#"{ "type": "discount", "original_price": 100, "mode": "rate", "value": 101 }"#,
        r#"{ "type": "stock_average", "existing_shares": 1, "existing_average_cost": 10,
             "transactions": [{ "kind": "SELL", "shares": 2, "price": 10 }] }"#,
    ];
    for json in rejected {
        let err = run(json).unwrap_err();
        assert!(!err.is_recoverable(), "{json}");
    }
}

#[test]
fn test_outcome_json_is_tagged() {
    let outcome = run(r#"{ "type": "bmi", "height_cm": 180, "weight_kg": 72 }"#).unwrap();
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["type"], "bmi");
    assert_eq!(value["category"], "NORMAL");
}
