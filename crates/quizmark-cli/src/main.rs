//! quizmark CLI: check quiz answers from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod presenter;

#[derive(Parser)]
#[command(name = "quizmark", version, about = "Forgiving quiz answer checker")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Session file (overrides config and QUIZMARK_SESSION)
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(Subcommand)]
enum Commands {
    /// Check answers for an exercise
    Check {
        /// Answer table TOML file
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Exercise number (default: the current exercise)
        #[arg(long)]
        exercise: Option<u32>,

        /// Answer for the next question, in order; repeat for each question
        #[arg(long = "answer", short = 'a')]
        values: Vec<String>,

        /// Output format: text, json
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the score and per-exercise progress
    Status {
        /// Answer table TOML file
        #[arg(long)]
        answers: Option<PathBuf>,
    },

    /// Move between exercises: a number, `next`, `previous` or `final`
    Go {
        target: String,

        /// Answer table TOML file
        #[arg(long)]
        answers: Option<PathBuf>,
    },

    /// Write a recap of the session
    Recap {
        /// Answer table TOML file
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Output format: text, json, html
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output file (required for html)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Discard the session and start over
    Reset {
        /// Answer table TOML file
        #[arg(long)]
        answers: Option<PathBuf>,
    },

    /// Validate answer table TOML files
    Validate {
        /// Path to answer table file or directory
        #[arg(long)]
        answers: PathBuf,
    },

    /// Show how a text normalizes, optionally judged against an expected answer
    Normalize {
        text: String,

        /// Expected answer to compare against
        #[arg(long)]
        expected: Option<String>,
    },

    /// Reveal the expected answers of an exercise
    Answers {
        /// Answer table TOML file
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Exercise number
        #[arg(long)]
        exercise: u32,
    },

    /// Create starter config and example answer table
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizmark=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let global = commands::GlobalArgs {
        config: cli.config,
        session: cli.session,
    };

    let result = match cli.command {
        Commands::Check {
            answers,
            exercise,
            values,
            format,
        } => commands::check::execute(&global, answers, exercise, values, format),
        Commands::Status { answers } => commands::status::execute(&global, answers),
        Commands::Go { target, answers } => commands::go::execute(&global, answers, target),
        Commands::Recap {
            answers,
            format,
            output,
        } => commands::recap::execute(&global, answers, format, output),
        Commands::Reset { answers } => commands::reset::execute(&global, answers),
        Commands::Validate { answers } => commands::validate::execute(answers),
        Commands::Normalize { text, expected } => commands::normalize::execute(&global, text, expected),
        Commands::Answers { answers, exercise } => {
            commands::answers::execute(&global, answers, exercise)
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
