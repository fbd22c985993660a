use clap::{Args, Parser, Subcommand, ValueEnum};
use emiquote::application::calculator::{LoanCalculator, QuoteRequest};
use emiquote::domain::currency::{CurrencyFormatter, Grouping};
use emiquote::interfaces::csv::record_writer::RecordWriter;
use emiquote::interfaces::csv::request_reader::RequestReader;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Currency symbol prefixed to displayed amounts
    #[arg(long, global = true, default_value = "₹")]
    symbol: String,

    /// Digit grouping used for displayed amounts
    #[arg(long, global = true, value_enum, default_value_t = Grouping::Indian)]
    grouping: Grouping,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the monthly installment and totals for one loan
    Quote {
        #[command(flatten)]
        loan: LoanArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Write the month-by-month amortization schedule as CSV
    Schedule {
        #[command(flatten)]
        loan: LoanArgs,
    },
    /// Quote every request in a CSV file (principal, rate, tenure)
    Batch {
        /// Input requests CSV file
        input: PathBuf,
    },
}

#[derive(Args)]
struct LoanArgs {
    /// Amount borrowed
    #[arg(long)]
    principal: Decimal,

    /// Nominal annual interest rate, in percent
    #[arg(long)]
    rate: Decimal,

    /// Loan duration in whole years
    #[arg(long)]
    tenure: u32,
}

impl From<LoanArgs> for QuoteRequest {
    fn from(args: LoanArgs) -> Self {
        Self {
            principal: args.principal,
            rate: args.rate,
            tenure: args.tenure,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();
    let calculator = LoanCalculator::new(CurrencyFormatter::new(cli.symbol, cli.grouping));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Quote { loan, format } => {
            let report = calculator.report(&loan.into()).into_diagnostic()?;
            match format {
                Format::Text => {
                    writeln!(out, "Monthly payment: {}", report.display.monthly_payment)
                        .into_diagnostic()?;
                    writeln!(out, "Total interest:  {}", report.display.total_interest)
                        .into_diagnostic()?;
                    writeln!(out, "Total payment:   {}", report.display.total_payment)
                        .into_diagnostic()?;
                }
                Format::Json => {
                    serde_json::to_writer_pretty(&mut out, &report).into_diagnostic()?;
                    writeln!(out).into_diagnostic()?;
                }
            }
        }
        Command::Schedule { loan } => {
            let rows = calculator.schedule(&loan.into()).into_diagnostic()?;
            let mut writer = RecordWriter::new(out);
            writer.write_records(rows).into_diagnostic()?;
        }
        Command::Batch { input } => {
            let reader = RequestReader::from_path(input).into_diagnostic()?;
            let mut writer = RecordWriter::new(out);
            for request in reader.requests() {
                match request {
                    Ok(request) => match calculator.process_request(request) {
                        Ok(record) => writer.write_record(&record).into_diagnostic()?,
                        Err(e) => tracing::warn!("Error processing request: {}", e),
                    },
                    Err(e) => tracing::warn!("Error reading request: {}", e),
                }
            }
            writer.flush().into_diagnostic()?;
        }
    }

    Ok(())
}
