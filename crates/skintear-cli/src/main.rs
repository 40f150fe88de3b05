use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use skintear_core::record::parse_assessment_date;
use skintear_core::{
    select_template, IntakeForm, RiskCategory, RiskFactor, RiskFactorSet, Section,
    ValidationError,
};

mod cli;

use cli::{AssessArgs, Cli, Commands};

/// Exit code when the submission must be corrected and resubmitted.
const EXIT_VALIDATION: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    match &cli.command {
        Commands::Assess(args) => assess(args, cli.json),
        Commands::Questions => {
            questions(cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Guidance { category } => {
            guidance((*category).into(), cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn assess(args: &AssessArgs, json: bool) -> Result<ExitCode> {
    let mut form = match &args.file {
        Some(path) => IntakeForm::from_path(path)
            .with_context(|| format!("failed to load submission {}", path.display()))?,
        None => IntakeForm::default(),
    };

    if let Some(case_id) = &args.case_id {
        form.case_id = case_id.clone();
    }

    if let Some(text) = &args.date {
        let date = parse_assessment_date(text).with_context(|| {
            format!("invalid assessment date {text:?} (expected DD/MM/YYYY or YYYY-MM-DD)")
        })?;
        form.assessment_date = Some(date);
    }

    form.risk_factors.merge(&parse_answers(&args.answers)?);
    if let Some(rest) = args.rest {
        form.risk_factors.fill_unanswered(rest.into());
    }

    let submission = form.into_submission(Local::now().date_naive());

    match skintear_core::assess(&submission) {
        Ok(report) => {
            info!(category = %report.risk_category, "assessment submitted");
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Assessment submitted successfully!\n");
                print!("{}", report.to_markdown());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_validation_error(&err, json)?;
            Ok(ExitCode::from(EXIT_VALIDATION))
        }
    }
}

/// Parse `key=value` answer flags into a partial set.
fn parse_answers(pairs: &[String]) -> Result<RiskFactorSet> {
    let mut entries = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("answer {pair:?} must be written as key=value"))?;
        entries.push((key.trim(), Some(value)));
    }
    RiskFactorSet::from_entries(entries).context("invalid --answers")
}

fn print_validation_error(err: &ValidationError, json: bool) -> Result<()> {
    let unanswered: &[RiskFactor] = match err {
        ValidationError::IncompleteAnswers { unanswered } => unanswered.as_slice(),
        ValidationError::MissingCaseId => &[],
    };

    if json {
        let payload = serde_json::json!({
            "error": err.kind(),
            "message": err.to_string(),
            "unanswered": unanswered,
        });
        eprintln!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        eprintln!("{}", err);
        for factor in unanswered {
            eprintln!("  - {} {}", factor.key(), factor.label());
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct QuestionRow {
    key: &'static str,
    name: &'static str,
    label: &'static str,
    section: Section,
    high_risk_indicator: bool,
}

fn questions(json: bool) -> Result<()> {
    if json {
        let rows: Vec<QuestionRow> = RiskFactor::ALL
            .iter()
            .map(|&f| QuestionRow {
                key: f.key(),
                name: f.name(),
                label: f.label(),
                section: f.section(),
                high_risk_indicator: f.is_high_risk_indicator(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for section in Section::ALL {
        println!("{}", section.label());
        for factor in RiskFactor::ALL.iter().filter(|f| f.section() == section) {
            let marker = if factor.is_high_risk_indicator() {
                "  [high-risk indicator]"
            } else {
                ""
            };
            println!("  {:<4} {}{}", factor.key(), factor.label(), marker);
        }
    }
    Ok(())
}

fn guidance(category: RiskCategory, json: bool) -> Result<()> {
    let template = select_template(category);
    if json {
        println!("{}", serde_json::to_string_pretty(template)?);
    } else {
        println!("Risk Category: {}\n", category);
        print!("{}", template.to_markdown());
    }
    Ok(())
}
