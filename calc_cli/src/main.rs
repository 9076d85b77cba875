//! # Gyesangi CLI Application
//!
//! Terminal front end for the everyday calculators in `calc_core`.
//!
//! ```text
//! calc_cli lottery --amount 1,000,000,000
//! calc_cli --json mortgage --principal 300000000 --rate 3.5 --years 30
//! calc_cli run inputs.json
//! calc_cli                       # interactive menu
//! ```
//!
//! Log output goes to stderr and is controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=calc_core=debug`).

mod format;
mod interactive;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::info;
use serde::de::DeserializeOwned;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use calc_core::calculations::bmi::BmiInput;
use calc_core::calculations::discount::{DiscountInput, DiscountInputMode};
use calc_core::calculations::lottery::LotteryInput;
use calc_core::calculations::mortgage::MortgageInput;
use calc_core::calculations::salary::SalaryInput;
use calc_core::calculations::stock_average::{StockAverageInput, TransactionInput};
use calc_core::formulas::TransactionKind;
use calc_core::{calculate_item, load_settings, CalcError, CalcResult, CalculationItem};
use calc_core::{CalculationOutcome, EngineSettings, NumericInput};

#[derive(Parser, Debug)]
#[command(name = "calc_cli", version, about = "Everyday calculators: stocks, lottery, salary, mortgage, discount, BMI")]
struct Cli {
    #[arg(long, global = true, help = "Settings JSON file overriding the default rate tables")]
    settings: Option<PathBuf>,
    #[arg(long, global = true, help = "Print results as JSON instead of a report")]
    json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Body-mass index
    Bmi {
        #[arg(long, help = "Height in cm")]
        height: String,
        #[arg(long, help = "Weight in kg")]
        weight: String,
    },
    /// Lottery prize take-home amount
    Lottery {
        #[arg(long, help = "Prize amount in won")]
        amount: String,
        #[arg(long, default_value = "lotto", help = "lotto, pension, scratch or other")]
        kind: String,
    },
    /// Monthly net pay from annual salary
    Salary {
        #[arg(long, help = "Annual salary in won")]
        annual: String,
        #[arg(long, default_value_t = 1)]
        dependents: u32,
    },
    /// Loan repayment schedule
    Mortgage {
        #[arg(long)]
        principal: String,
        #[arg(long, help = "Annual interest rate in percent")]
        rate: String,
        #[arg(long, help = "Loan term in years")]
        years: String,
        #[arg(long, default_value = "equal_installment", help = "equal_installment or equal_principal")]
        repayment: String,
    },
    /// Discounted price from a rate or an amount
    Discount {
        #[arg(long)]
        price: String,
        #[arg(long, conflicts_with = "amount", required_unless_present = "amount", help = "Discount rate in percent")]
        rate: Option<String>,
        #[arg(long, help = "Discount amount in won")]
        amount: Option<String>,
    },
    /// Average cost of a stock position
    Stock {
        #[arg(long, default_value = "", help = "Shares already held")]
        shares: String,
        #[arg(long, default_value = "", help = "Average cost of the shares already held")]
        average_cost: String,
        #[arg(long = "tx", value_name = "buy:SHARES@PRICE", help = "Trade, in order; repeatable")]
        transactions: Vec<String>,
    },
    /// Run one calculation or a list of calculations from a JSON file
    Run { file: PathBuf },
    /// Menu-driven prompt loop
    Interactive,
    /// Print the effective settings as JSON
    Settings,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}

/// Parse a snake_case (or serde alias) name into one of the engine's enums.
pub(crate) fn parse_choice<T: DeserializeOwned>(field: &str, raw: &str) -> CalcResult<T> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_string()))
        .map_err(|_| CalcError::invalid_input(field, raw, "Unknown option"))
}

/// Parse `buy:SHARES@PRICE` / `sell:SHARES@PRICE`.
pub(crate) fn parse_transaction(raw: &str) -> CalcResult<TransactionInput> {
    let invalid = || CalcError::invalid_input("transactions", raw, "Expected buy:SHARES@PRICE or sell:SHARES@PRICE");

    let (kind, rest) = raw.split_once(':').ok_or_else(invalid)?;
    let kind = match kind.trim().to_ascii_lowercase().as_str() {
        "buy" => TransactionKind::Buy,
        "sell" => TransactionKind::Sell,
        _ => return Err(invalid()),
    };
    let (shares, price) = rest.split_once('@').ok_or_else(invalid)?;
    Ok(TransactionInput::new(kind, shares.trim(), price.trim()))
}

fn text(raw: String) -> NumericInput {
    NumericInput::Text(raw)
}

fn build_item(command: Command) -> CalcResult<CalculationItem> {
    Ok(match command {
        Command::Bmi { height, weight } => CalculationItem::Bmi(BmiInput {
            height_cm: text(height),
            weight_kg: text(weight),
        }),
        Command::Lottery { amount, kind } => CalculationItem::Lottery(LotteryInput {
            win_amount: text(amount),
            lottery_type: parse_choice("lottery_type", &kind)?,
        }),
        Command::Salary { annual, dependents } => CalculationItem::Salary(SalaryInput {
            annual_salary: text(annual),
            dependents,
        }),
        Command::Mortgage {
            principal,
            rate,
            years,
            repayment,
        } => CalculationItem::Mortgage(MortgageInput {
            principal: text(principal),
            annual_rate_percent: text(rate),
            term_years: text(years),
            repayment_type: parse_choice("repayment_type", &repayment)?,
        }),
        Command::Discount { price, rate, amount } => {
            let (mode, value) = match (rate, amount) {
                (Some(rate), _) => (DiscountInputMode::Rate, rate),
                (None, Some(amount)) => (DiscountInputMode::Amount, amount),
                (None, None) => return Err(CalcError::missing_field("discount_rate")),
            };
            CalculationItem::Discount(DiscountInput {
                original_price: text(price),
                mode,
                value: text(value),
            })
        }
        Command::Stock {
            shares,
            average_cost,
            transactions,
        } => CalculationItem::StockAverage(StockAverageInput {
            existing_shares: text(shares),
            existing_average_cost: text(average_cost),
            transactions: transactions
                .iter()
                .map(|raw| parse_transaction(raw))
                .collect::<CalcResult<Vec<_>>>()?,
        }),
        Command::Run { .. } | Command::Interactive | Command::Settings => {
            return Err(CalcError::Internal {
                message: "not a calculator command".to_string(),
            })
        }
    })
}

/// Read a JSON file holding one `CalculationItem` or an array of them.
fn read_items(path: &Path) -> CalcResult<Vec<CalculationItem>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let value: serde_json::Value = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let items = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|item| vec![item])
    };
    items.map_err(|e| CalcError::SerializationError { reason: e.to_string() })
}

pub(crate) fn print_outcome(outcome: &CalculationOutcome, json: bool) {
    if json {
        match serde_json::to_string_pretty(outcome) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Error: {e}"),
        }
        return;
    }
    print!("{}", report::render(outcome));
    println!();
    println!("복사용 텍스트:");
    println!("{}", report::copy_text(outcome));
}

pub(crate) fn print_error(err: &CalcError) {
    eprintln!("Error: {err}");
    eprintln!("{}", err.user_message());
    if let Ok(json) = serde_json::to_string_pretty(err) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{json}");
    }
}

fn run(cli: Cli) -> CalcResult<()> {
    let settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => EngineSettings::default(),
    };

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => interactive::run(&settings, cli.json)
            .map_err(|e| CalcError::file_error("read", "stdin", e.to_string())),
        Command::Settings => {
            let json = serde_json::to_string_pretty(&settings).map_err(|e| CalcError::SerializationError {
                reason: e.to_string(),
            })?;
            println!("{json}");
            Ok(())
        }
        Command::Run { file } => {
            let items = read_items(&file)?;
            info!("running {} calculation(s) from {}", items.len(), file.display());
            // Every item is attempted; the first failure is reported at the end
            let mut first_error = None;
            for item in &items {
                match calculate_item(item, &settings) {
                    Ok(outcome) => print_outcome(&outcome, cli.json),
                    Err(err) => {
                        print_error(&err);
                        first_error.get_or_insert(err);
                    }
                }
            }
            first_error.map_or(Ok(()), Err)
        }
        command => {
            let item = build_item(command)?;
            let outcome = calculate_item(&item, &settings)?;
            print_outcome(&outcome, cli.json);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}
