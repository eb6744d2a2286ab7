//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::review::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "sqlpilot", version)]
#[command(about = "AI SQL reviewer: writes a <name>.review.md for each .sql file")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input .sql file or directory containing .sql files
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory for .review.md files (default: alongside inputs)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Model name (default: config, then $OPENAI_MODEL, then gpt-4.1-mini)
    #[arg(short, long)]
    model: Option<String>,

    /// Prompts directory (system.md, reviewer.md, output_schema.md)
    #[arg(short, long)]
    prompts: Option<PathBuf>,

    /// Print the assembled prompts, do not call the model or write files
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config and credential status
    Config,
}

#[derive(Debug)]
pub enum CliAction {
    InspectConfig,
    Review(RunOptions),
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Cli::parse().into_action()
    }

    fn into_action(self) -> Result<CliAction, String> {
        if let Some(Commands::Config) = self.command {
            return Ok(CliAction::InspectConfig);
        }

        let Some(input) = self.input else {
            return Err(
                "--input is required (a .sql file or a directory containing .sql files)"
                    .to_string(),
            );
        };

        Ok(CliAction::Review(RunOptions {
            input,
            out_dir: self.out,
            model: self.model,
            prompts_dir: self.prompts,
            dry_run: self.dry_run,
        }))
    }
}
