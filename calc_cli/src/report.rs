//! Human-readable reports and clipboard text for calculation outcomes.

use std::fmt::Write;

use calc_core::calculations::{
    BmiResult, CalculationOutcome, LotteryResult, MortgageResult, SalaryResult, StockAverageResult,
};
use calc_core::formulas::DiscountResult;

use crate::format::{format_currency, format_decimal, format_number, format_percent};

const RULE: &str = "═══════════════════════════════════════";

/// Share counts may be fractional; whole counts print without decimals.
fn format_shares(shares: f64) -> String {
    if shares.fract() == 0.0 {
        format!("{}주", format_number(shares))
    } else {
        format!("{}주", format_decimal(shares, 4).trim_end_matches('0').trim_end_matches('.'))
    }
}

/// Short summary meant for pasting elsewhere.
pub fn copy_text(outcome: &CalculationOutcome) -> String {
    match outcome {
        CalculationOutcome::Bmi(r) => format!(
            "신장: {}cm\n체중: {}kg\nBMI: {}\n분류: {}",
            r.height_cm,
            r.weight_kg,
            format_decimal(r.bmi, 1),
            r.category
        ),
        CalculationOutcome::Lottery(r) => format!(
            "{} 당첨금: {}\n실수령액: {}\n세금: {}",
            r.lottery_type.name(),
            format_currency(r.win_amount),
            format_currency(r.take_home),
            format_currency(r.total_tax)
        ),
        CalculationOutcome::Mortgage(r) => format!(
            "대출금액: {}\n{} 방식\n첫달 상환액: {}\n총 이자: {}",
            format_currency(r.principal),
            r.repayment_type,
            format_currency(r.first_month_payment),
            format_currency(r.total_interest)
        ),
        CalculationOutcome::Salary(r) => format!(
            "연봉: {}\n월 실수령액: {}\n연 실수령액: {}",
            format_currency(r.annual_salary),
            format_currency(r.net_monthly),
            format_currency(r.net_annual)
        ),
        CalculationOutcome::Discount(r) => format!(
            "원래 가격: {}\n할인율: {}\n할인금액: {}\n최종 가격: {}",
            format_currency(r.original_price),
            format_percent(r.discount_rate, 1),
            format_currency(r.discount_amount),
            format_currency(r.final_price)
        ),
        CalculationOutcome::StockAverage(r) => format!(
            "평균 단가: {}\n총 보유 주식: {}\n총 투자 금액: {}",
            format_currency(r.average_cost),
            format_shares(r.total_shares),
            format_currency(r.total_cost)
        ),
    }
}

/// Full report with every figure of the outcome.
pub fn render(outcome: &CalculationOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  {}", outcome.kind().title());
    let _ = writeln!(out, "{RULE}");

    let body = match outcome {
        CalculationOutcome::Bmi(r) => bmi_lines(r),
        CalculationOutcome::Lottery(r) => lottery_lines(r),
        CalculationOutcome::Mortgage(r) => mortgage_lines(r),
        CalculationOutcome::Salary(r) => salary_lines(r),
        CalculationOutcome::Discount(r) => discount_lines(r),
        CalculationOutcome::StockAverage(r) => stock_lines(r),
    };
    for (label, value) in body {
        let _ = writeln!(out, "  {label:<14} {value}");
    }
    let _ = writeln!(out, "{RULE}");
    out
}

type Lines = Vec<(String, String)>;

fn row(label: &str, value: String) -> (String, String) {
    (label.to_string(), value)
}

fn bmi_lines(r: &BmiResult) -> Lines {
    let (lower, upper) = r.category.range();
    let range = if upper.is_finite() {
        format!("{lower} ~ {upper}")
    } else {
        format!("{lower} 이상")
    };
    vec![
        row("신장", format!("{}cm", format_decimal(r.height_cm, 1))),
        row("체중", format!("{}kg", format_decimal(r.weight_kg, 1))),
        row("BMI", format_decimal(r.bmi, 1)),
        row("분류", format!("{} ({range})", r.category)),
        row(
            "표준 체중",
            format!(
                "{}kg ~ {}kg",
                format_decimal(r.ideal_weight_min, 1),
                format_decimal(r.ideal_weight_max, 1)
            ),
        ),
        row("표준 체중과 차이", format!("{:+.1}kg", r.weight_difference)),
    ]
}

fn lottery_lines(r: &LotteryResult) -> Lines {
    let mut lines = vec![
        row("복권 종류", r.lottery_type.name().to_string()),
        row("당첨금", format_currency(r.win_amount)),
        row("복권 구입비", format_currency(r.ticket_cost)),
        row("과세 대상", format_currency(r.taxable_amount.max(0.0))),
    ];
    for bracket in &r.withholding.breakdown {
        lines.push(row(
            &bracket.bracket_label,
            format!(
                "{} × {} = {}",
                format_currency(bracket.amount_in_bracket),
                format_percent(bracket.rate * 100.0, 0),
                format_currency(bracket.tax_in_bracket)
            ),
        ));
    }
    lines.extend([
        row("총 세금", format_currency(r.total_tax)),
        row("실효 세율", format_percent(r.effective_tax_rate, 2)),
        row("실수령액", format_currency(r.take_home)),
    ]);
    lines
}

fn mortgage_lines(r: &MortgageResult) -> Lines {
    let mut lines = vec![
        row("대출금액", format_currency(r.principal)),
        row("연 이율", format_percent(r.annual_rate_percent, 2)),
        row("상환 기간", format!("{}개월", r.total_months)),
        row("상환 방식", r.repayment_type.to_string()),
        row("첫달 상환액", format_currency(r.first_month_payment)),
        row("마지막달 상환액", format_currency(r.last_month_payment)),
        row("총 이자", format_currency(r.total_interest)),
        row("총 상환액", format_currency(r.total_payment)),
    ];
    for p in &r.schedule {
        lines.push(row(
            &format!("{}회차", p.month),
            format!(
                "{} (원금 {}, 이자 {}, 잔액 {})",
                format_currency(p.total_payment),
                format_number(p.principal_payment),
                format_number(p.interest_payment),
                format_number(p.remaining_balance)
            ),
        ));
    }
    lines
}

fn salary_lines(r: &SalaryResult) -> Lines {
    let ins = &r.insurance_breakdown;
    vec![
        row("연봉", format_currency(r.annual_salary)),
        row("부양가족", format!("{}명", r.dependents)),
        row("월 급여", format_currency(r.monthly_gross)),
        row("국민연금", format_currency(ins.national_pension)),
        row("건강보험", format_currency(ins.health_insurance)),
        row("장기요양보험", format_currency(ins.long_term_care)),
        row("고용보험", format_currency(ins.employment_insurance)),
        row("4대보험 합계", format_currency(r.total_insurance)),
        row("소득세", format_currency(r.income_tax)),
        row("지방소득세", format_currency(r.local_tax)),
        row("월 실수령액", format_currency(r.net_monthly)),
        row("연 실수령액", format_currency(r.net_annual)),
    ]
}

fn discount_lines(r: &DiscountResult) -> Lines {
    vec![
        row("원래 가격", format_currency(r.original_price)),
        row("할인율", format_percent(r.discount_rate, 1)),
        row("할인금액", format_currency(r.discount_amount)),
        row("최종 가격", format_currency(r.final_price)),
        row("절약 금액", format_currency(r.savings)),
    ]
}

fn stock_lines(r: &StockAverageResult) -> Lines {
    let mut lines = vec![
        row("평균 단가", format_currency(r.average_cost)),
        row("총 보유 주식", format_shares(r.total_shares)),
        row("총 투자 금액", format_currency(r.total_cost)),
    ];
    if r.realized_proceeds > 0.0 {
        lines.extend([
            row("매도 금액", format_currency(r.realized_proceeds)),
            row("매도 원가", format_currency(r.realized_cost)),
            row("실현 손익", format_currency(r.realized_gain)),
        ]);
    }
    lines
}
