// Terminal front end for the two contract actions
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt, EnvFilter};

use clauseguard_client::forms::{GdprContractForm, RiskAssessmentForm, SubmitOutcome};
use clauseguard_client::notifications::Notifier;
use clauseguard_client::risk_indicator::{ab5_message, RiskIndicator, RiskLevel};
use clauseguard_client::HttpActionsClient;
use clauseguard_common::models::{FieldError, RiskAssessmentResult};

#[derive(Parser, Debug)]
#[command(name = "clauseguard")]
#[command(author, version, about = "ClauseGuard - contract risk checks and GDPR contract drafts")]
struct Args {
    /// Base URL of the ClauseGuard server
    #[arg(long, env = "CLAUSEGUARD_SERVER_URL", default_value = "http://localhost:8080")]
    server: String,

    /// Session token issued by `clauseguard-server issue-token`
    #[arg(long, env = "CLAUSEGUARD_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a contract for risk and AB-5 exposure
    Assess {
        /// Read the contract from this file ("-" for stdin)
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Contract text given inline
        #[arg(long)]
        text: Option<String>,
    },
    /// Draft a GDPR-compliant web development contract
    Gdpr {
        /// Client's country or region
        #[arg(long)]
        location: String,

        /// Scope of the web development project
        #[arg(long)]
        details: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("clauseguard=warn".parse().unwrap_or_default());
    let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let api = Arc::new(HttpActionsClient::new(args.server.clone(), args.token.clone()));
    let notifier = Arc::new(Notifier::new());

    let outcome = match args.command {
        Command::Assess { file, text } => {
            let contract = match read_contract(file, text) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("{} {}", "error:".red().bold(), e);
                    return ExitCode::FAILURE;
                }
            };
            let form = RiskAssessmentForm::new(api, notifier.clone());
            form.set_contract_text(contract);
            println!("Analyzing contract...");
            let outcome = form.submit().await;
            print_notifications(&notifier);
            if let Some(result) = form.result() {
                print_assessment(&result);
            }
            outcome
        }
        Command::Gdpr { location, details } => {
            let form = GdprContractForm::new(api, notifier.clone());
            form.set_client_location(location);
            form.set_web_development_details(details);
            println!("Generating contract...");
            let outcome = form.submit().await;
            print_notifications(&notifier);
            if let Some(text) = form.contract_text() {
                println!("\n{}\n", "Generated GDPR Contract".bold());
                println!("{}", text);
            }
            outcome
        }
    };

    match outcome {
        SubmitOutcome::Succeeded => ExitCode::SUCCESS,
        SubmitOutcome::Invalid(errors) => {
            print_field_errors(&errors);
            ExitCode::from(2)
        }
        SubmitOutcome::Busy | SubmitOutcome::Failed(_) => ExitCode::FAILURE,
    }
}

fn read_contract(file: Option<PathBuf>, text: Option<String>) -> anyhow::Result<String> {
    match (file, text) {
        (_, Some(text)) => Ok(text),
        (Some(path), None) if path.as_os_str() == "-" => read_stdin(),
        (Some(path), None) => fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e)),
        (None, None) => read_stdin(),
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn print_notifications(notifier: &Notifier) {
    for n in notifier.drain() {
        let title = if n.is_destructive() {
            n.title.as_str().red().bold()
        } else {
            n.title.as_str().green().bold()
        };
        println!("{} {}", title, n.description);
    }
}

fn print_field_errors(errors: &[FieldError]) {
    for e in errors {
        eprintln!("{} {}: {}", "invalid".yellow().bold(), e.field, e.message);
    }
}

fn print_assessment(result: &RiskAssessmentResult) {
    let badge = RiskIndicator::new(Some(result.risk_score)).to_string();
    let badge = match RiskLevel::from_score(result.risk_score) {
        RiskLevel::High => badge.as_str().red().bold(),
        RiskLevel::Medium => badge.as_str().yellow().bold(),
        RiskLevel::Low => badge.as_str().green().bold(),
    };

    println!("\n{}", "Assessment Results".bold());
    println!("  Overall Risk Score: {}", badge);

    let ab5 = ab5_message(result.ab5_violation);
    println!(
        "  California AB-5:    {}",
        if result.ab5_violation { ab5.red() } else { ab5.green() }
    );

    if !result.risky_clauses.is_empty() {
        println!("\n{}", "Potentially Risky Clauses".bold());
        for clause in &result.risky_clauses {
            println!("  - {}", clause);
        }
    }
    if !result.suggested_replacements.is_empty() {
        println!("\n{}", "Suggested Replacements / Mitigations".bold());
        for suggestion in &result.suggested_replacements {
            println!("  - {}", suggestion);
        }
    }
}
