//! Menu-driven prompt loop.
//!
//! Each calculator keeps its own [`Session`], so the previous inputs are
//! offered again as defaults and a rejected input leaves the last result in
//! place.

use std::io::{self, BufRead, Write};

use calc_core::calculations::bmi::BmiCalculator;
use calc_core::calculations::discount::{DiscountCalculator, DiscountInputMode};
use calc_core::calculations::lottery::LotteryCalculator;
use calc_core::calculations::mortgage::MortgageCalculator;
use calc_core::calculations::salary::SalaryCalculator;
use calc_core::calculations::stock_average::StockAverageCalculator;
use calc_core::calculations::{Calculator, CalculationOutcome, CalculatorKind};
use calc_core::session::Session;
use calc_core::{EngineSettings, NumericInput};

use crate::{parse_choice, parse_transaction, print_error, print_outcome};

fn read_line() -> io::Result<String> {
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}

/// Ask for a value; an empty answer keeps the current one.
fn prompt(label: &str, current: &mut NumericInput) -> io::Result<()> {
    print!("{label} [{}]: ", current.raw());
    let line = read_line()?;
    if !line.is_empty() {
        *current = NumericInput::Text(line);
    }
    Ok(())
}

fn prompt_text(label: &str, current: &str) -> io::Result<String> {
    print!("{label} [{current}]: ");
    let line = read_line()?;
    Ok(if line.is_empty() { current.to_string() } else { line })
}

/// Submit a session and print either the new result or the error.
fn submit<C: Calculator>(
    session: &mut Session<C>,
    settings: &EngineSettings,
    json: bool,
    wrap: fn(C::Output) -> CalculationOutcome,
) {
    match session.submit(settings) {
        Ok(output) => print_outcome(&wrap(output.clone()), json),
        Err(err) => {
            print_error(&err);
            if session.result().is_some() {
                println!("(이전 결과가 유지됩니다)");
            }
        }
    }
}

#[derive(Default)]
struct Sessions {
    stock: Session<StockAverageCalculator>,
    lottery: Session<LotteryCalculator>,
    salary: Session<SalaryCalculator>,
    mortgage: Session<MortgageCalculator>,
    discount: Session<DiscountCalculator>,
    bmi: Session<BmiCalculator>,
}

impl Sessions {
    fn run(&mut self, kind: CalculatorKind, settings: &EngineSettings, json: bool) -> io::Result<()> {
        match kind {
            CalculatorKind::StockAverage => {
                let input = &mut self.stock.input;
                prompt("보유 주식 수", &mut input.existing_shares)?;
                prompt("보유 평균 단가", &mut input.existing_average_cost)?;
                println!("거래 입력 (buy:수량@가격 또는 sell:수량@가격, 빈 줄로 종료)");
                let mut transactions = Vec::new();
                loop {
                    print!("  거래 {}: ", transactions.len() + 1);
                    let line = read_line()?;
                    if line.is_empty() {
                        break;
                    }
                    match parse_transaction(&line) {
                        Ok(tx) => transactions.push(tx),
                        Err(err) => println!("  {}", err),
                    }
                }
                if !transactions.is_empty() {
                    input.transactions = transactions;
                }
                submit(&mut self.stock, settings, json, CalculationOutcome::StockAverage);
            }
            CalculatorKind::Lottery => {
                let input = &mut self.lottery.input;
                prompt("당첨금 (원)", &mut input.win_amount)?;
                let raw = prompt_text("복권 종류 (lotto/pension/scratch/other)", "lotto")?;
                match parse_choice("lottery_type", &raw) {
                    Ok(kind) => input.lottery_type = kind,
                    Err(err) => println!("{err}"),
                }
                submit(&mut self.lottery, settings, json, CalculationOutcome::Lottery);
            }
            CalculatorKind::Salary => {
                let input = &mut self.salary.input;
                prompt("연봉 (원)", &mut input.annual_salary)?;
                let raw = prompt_text("부양가족 수 (본인 포함)", &input.dependents.to_string())?;
                match raw.parse() {
                    Ok(n) => input.dependents = n,
                    Err(_) => println!("부양가족 수는 1~8 사이의 정수입니다"),
                }
                submit(&mut self.salary, settings, json, CalculationOutcome::Salary);
            }
            CalculatorKind::Mortgage => {
                let input = &mut self.mortgage.input;
                prompt("대출금액 (원)", &mut input.principal)?;
                prompt("연 이율 (%)", &mut input.annual_rate_percent)?;
                prompt("대출 기간 (년)", &mut input.term_years)?;
                let raw = prompt_text("상환 방식 (equal_installment/equal_principal)", "equal_installment")?;
                match parse_choice("repayment_type", &raw) {
                    Ok(kind) => input.repayment_type = kind,
                    Err(err) => println!("{err}"),
                }
                submit(&mut self.mortgage, settings, json, CalculationOutcome::Mortgage);
            }
            CalculatorKind::Discount => {
                let input = &mut self.discount.input;
                prompt("원래 가격 (원)", &mut input.original_price)?;
                let presets: Vec<String> = settings.discount_presets.iter().map(|p| format!("{p}%")).collect();
                println!("빠른 선택: {} (p1~p{})", presets.join(", "), presets.len());
                let raw = prompt_text("할인율(%) 또는 =할인금액 또는 p번호", &input.value.raw())?;
                if let Some(amount) = raw.strip_prefix('=') {
                    input.mode = DiscountInputMode::Amount;
                    input.value = NumericInput::Text(amount.trim().to_string());
                } else if let Some(preset) = raw
                    .strip_prefix('p')
                    .and_then(|n| n.parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| settings.discount_presets.get(i))
                {
                    input.apply_preset(*preset);
                } else {
                    input.mode = DiscountInputMode::Rate;
                    input.value = NumericInput::Text(raw);
                }
                submit(&mut self.discount, settings, json, CalculationOutcome::Discount);
            }
            CalculatorKind::Bmi => {
                let input = &mut self.bmi.input;
                prompt("신장 (cm)", &mut input.height_cm)?;
                prompt("체중 (kg)", &mut input.weight_kg)?;
                submit(&mut self.bmi, settings, json, CalculationOutcome::Bmi);
            }
        }
        Ok(())
    }

    fn reset(&mut self, kind: CalculatorKind) {
        match kind {
            CalculatorKind::StockAverage => self.stock.reset(),
            CalculatorKind::Lottery => self.lottery.reset(),
            CalculatorKind::Salary => self.salary.reset(),
            CalculatorKind::Mortgage => self.mortgage.reset(),
            CalculatorKind::Discount => self.discount.reset(),
            CalculatorKind::Bmi => self.bmi.reset(),
        }
    }
}

fn print_menu() {
    println!();
    println!("계산기 - 일상 계산기 모음");
    println!("=========================");
    for (i, kind) in CalculatorKind::ALL.iter().enumerate() {
        println!(
            "  {}. {} [{}] - {}",
            i + 1,
            kind.title(),
            kind.category().title(),
            kind.description()
        );
    }
    println!("  r<번호>. 입력 초기화    q. 종료");
}

/// Run the prompt loop until `q` or end of input.
pub fn run(settings: &EngineSettings, json: bool) -> io::Result<()> {
    let mut sessions = Sessions::default();

    loop {
        print_menu();
        print!("선택: ");
        let choice = match read_line() {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            Err(e) => return Err(e),
        };

        if choice.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        let (resetting, number) = match choice.strip_prefix('r') {
            Some(rest) => (true, rest),
            None => (false, choice.as_str()),
        };
        let kind = number
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| CalculatorKind::ALL.get(i).copied());

        match kind {
            Some(kind) if resetting => {
                sessions.reset(kind);
                println!("{} 입력을 초기화했습니다", kind.title());
            }
            Some(kind) => {
                println!();
                println!("[{}]", kind.title());
                match sessions.run(kind, settings, json) {
                    Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
                    other => other?,
                }
            }
            None => println!("잘못된 선택입니다: {choice}"),
        }
    }
}
