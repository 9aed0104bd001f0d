//! Command-line patent term calculator.
//!
//! Usage:
//!     patent-term calculate --filing-date 2010-06-01 --grant-date 2012-06-01
//!     patent-term calculate --type design --filing-date 2016-03-01 --grant-date 2018-03-01
//!     patent-term calculate --form form.json --format json
//!     patent-term guide

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use patentterm_calc::calculate;
use patentterm_explain::{build_report, render_guide, render_text, summarize_term};
use patentterm_form::{parse_date, PatentForm};
use tracing::info;

#[derive(Parser)]
#[command(name = "patent-term")]
#[command(about = "Estimate patent expiration dates and maintenance fee windows")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Date to count down from (YYYY-MM-DD), defaults to the local date
    #[arg(long, global = true)]
    today: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the expiration date of a patent
    Calculate {
        /// Patent type (utility, design, plant), defaults to utility
        #[arg(short = 't', long = "type")]
        patent_type: Option<String>,

        /// Filing date (YYYY-MM-DD)
        #[arg(short, long)]
        filing_date: Option<String>,

        /// Grant (issue) date (YYYY-MM-DD)
        #[arg(short, long)]
        grant_date: Option<String>,

        /// Earliest effective filing date when domestic benefit is claimed
        #[arg(long)]
        eefd: Option<String>,

        /// Expiration date of the terminal disclaimer reference patent
        #[arg(long)]
        td_date: Option<String>,

        /// Read all form fields, including the patent type, from a JSON file
        #[arg(
            long,
            conflicts_with_all = ["patent_type", "filing_date", "grant_date", "eefd", "td_date"]
        )]
        form: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the term rules quick reference
    Guide,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Summary,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patentterm=info".parse()?)
                .add_directive("patent_term=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let today = match cli.today.as_deref() {
        Some(value) => parse_date("today", value)?,
        None => Local::now().date_naive(),
    };

    match cli.command {
        Commands::Calculate {
            patent_type,
            filing_date,
            grant_date,
            eefd,
            td_date,
            form,
            format,
        } => {
            let form = match form {
                Some(path) => load_form(&path)?,
                None => form_from_flags(patent_type, filing_date, grant_date, eefd, td_date),
            };
            run_calculate(form, today, format)?;
        }
        Commands::Guide => {
            print!("{}", render_guide());
        }
    }

    Ok(())
}

fn form_from_flags(
    patent_type: Option<String>,
    filing_date: Option<String>,
    grant_date: Option<String>,
    eefd: Option<String>,
    td_date: Option<String>,
) -> PatentForm {
    PatentForm {
        patent_type: patent_type.unwrap_or_default(),
        filing_date: filing_date.unwrap_or_default(),
        grant_date: grant_date.unwrap_or_default(),
        has_domestic_benefit: eefd.is_some(),
        eefd: eefd.unwrap_or_default(),
        has_terminal_disclaimer: td_date.is_some(),
        td_expiration_date: td_date.unwrap_or_default(),
    }
}

fn load_form(path: &str) -> Result<PatentForm> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path))
}

fn run_calculate(form: PatentForm, today: NaiveDate, format: OutputFormat) -> Result<()> {
    let input = form.into_input()?;
    let result = calculate(&input, today)?;

    info!(
        patent_type = %input.patent_type,
        expiration = %result.expiration_date,
        expired = result.is_expired,
        "term calculated"
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Summary => println!("{}", summarize_term(&result)),
        OutputFormat::Text => print!("{}", render_text(&build_report(&result))),
    }

    Ok(())
}
