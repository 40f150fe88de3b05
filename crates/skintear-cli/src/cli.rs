use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use skintear_core::{Answer, RiskCategory};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "skintear", version, about = "Skin tear risk assessment")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence"
    )]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate and classify one submission
    Assess(AssessArgs),
    /// List the fourteen risk factor questions
    Questions,
    /// Show the guidance block for a risk category
    Guidance {
        #[arg(value_enum)]
        category: CategoryArg,
    },
}

#[derive(Args, Debug)]
pub struct AssessArgs {
    #[arg(short, long, help = "Submission document (.json is read as JSON, anything else as YAML)")]
    pub file: Option<PathBuf>,
    #[arg(long, help = "Case number (overrides the document)")]
    pub case_id: Option<String>,
    #[arg(long, help = "Assessment date, DD/MM/YYYY or YYYY-MM-DD (defaults to today)")]
    pub date: Option<String>,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Answers as key=value pairs, e.g. q1=yes,impaired_visual=no"
    )]
    pub answers: Vec<String>,
    #[arg(long, value_enum, help = "Answer given to every factor still unanswered")]
    pub rest: Option<AnswerArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AnswerArg {
    Yes,
    No,
}

impl From<AnswerArg> for Answer {
    fn from(value: AnswerArg) -> Self {
        match value {
            AnswerArg::Yes => Answer::Yes,
            AnswerArg::No => Answer::No,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CategoryArg {
    NoRisk,
    AtRisk,
    HighRisk,
}

impl From<CategoryArg> for RiskCategory {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::NoRisk => RiskCategory::NoRisk,
            CategoryArg::AtRisk => RiskCategory::AtRisk,
            CategoryArg::HighRisk => RiskCategory::HighRisk,
        }
    }
}
