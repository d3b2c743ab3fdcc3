use crate::core::dashboard::Tab;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "vigilance")]
#[command(about = "Terminal dashboard for the Vigilance forensic accounting engine")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults to ./vigilance.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override server.base_url
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Override output.path (where reports are saved)
    #[arg(long, global = true)]
    pub output: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Paint the built-in sample dataset
    Demo {
        #[arg(long, default_value = "dashboard")]
        tab: Tab,
    },

    /// Upload a workbook, paint the result and optionally export it
    Analyze {
        /// Excel workbook to analyze
        file: PathBuf,

        /// Question for the AI auditor (repeatable)
        #[arg(long = "ask")]
        questions: Vec<String>,

        /// Download the PDF report into the output directory
        #[arg(long)]
        export_pdf: bool,

        /// Save the data explorer table as CSV under this file name
        #[arg(long)]
        csv: Option<String>,

        #[arg(long, default_value = "dashboard")]
        tab: Tab,
    },

    /// Interactive dashboard session
    Shell {
        /// Workbook to analyze right away
        file: Option<PathBuf>,
    },
}
