use crate::core::dashboard::{Dashboard, Tab, LOADING_TEXT};
use crate::domain::ports::{AnalysisService, ConfigProvider, Storage};
use crate::render::sidebar;
use crate::utils::error::Result;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Analyze(Option<PathBuf>),
    Tab(Tab),
    Show,
    Ask(String),
    Prompt(usize),
    History,
    Open(usize),
    Export,
    Csv(Option<String>),
    Help,
    Quit,
    Empty,
}

impl ShellCommand {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        match verb.to_ascii_lowercase().as_str() {
            "" => Ok(ShellCommand::Empty),
            "analyze" | "upload" => Ok(ShellCommand::Analyze(arg.map(PathBuf::from))),
            "tab" => rest.parse().map(ShellCommand::Tab),
            "show" | "view" => Ok(ShellCommand::Show),
            "ask" => arg
                .map(ShellCommand::Ask)
                .ok_or_else(|| "ask needs a question".to_string()),
            "prompt" => parse_index(rest).map(ShellCommand::Prompt),
            "history" => Ok(ShellCommand::History),
            "open" => parse_index(rest).map(ShellCommand::Open),
            "export" | "pdf" => Ok(ShellCommand::Export),
            "csv" => Ok(ShellCommand::Csv(arg)),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(format!("unknown command '{}', type 'help'", other)),
        }
    }
}

fn parse_index(arg: &str) -> std::result::Result<usize, String> {
    arg.parse::<usize>()
        .map_err(|_| format!("expected a number, got '{}'", arg))
}

/// Reads commands line by line until `quit` or end of input. Failures are
/// printed as alerts and never end the session.
pub async fn run_shell<A, S, C, R, W>(
    dashboard: &mut Dashboard<A, S, C>,
    reader: R,
    mut writer: W,
) -> Result<()>
where
    A: AnalysisService,
    S: Storage,
    C: ConfigProvider,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    writer.write_all(dashboard.view().as_bytes()).await?;
    writer.write_all(b"> ").await?;
    writer.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writer.write_all(format!("❌ {}\n> ", message).as_bytes()).await?;
                writer.flush().await?;
                continue;
            }
        };
        tracing::debug!("Shell command: {:?}", command);

        let output = match command {
            ShellCommand::Quit => break,
            ShellCommand::Empty => String::new(),
            ShellCommand::Analyze(path) => match dashboard.begin_analysis(path.as_deref()).await {
                Ok(upload) => {
                    writer
                        .write_all(format!("⏳ {} ({})\n", LOADING_TEXT, upload.file_name()).as_bytes())
                        .await?;
                    writer.flush().await?;

                    let analyzed = dashboard.finish_analysis(upload).await.map(|_| ());
                    match analyzed {
                        Ok(()) => dashboard.view(),
                        Err(e) => alert(&e),
                    }
                }
                Err(e) => alert(&e),
            },
            ShellCommand::Tab(tab) => {
                dashboard.show_tab(tab);
                dashboard.view()
            }
            ShellCommand::Show => dashboard.view(),
            ShellCommand::Ask(question) => {
                let reply = dashboard.ask(&question).await;
                format!("AI AUDITOR: {}\n", reply)
            }
            ShellCommand::Prompt(index) => match dashboard.quick_prompt(index).await {
                Some(reply) => format!("AI AUDITOR: {}\n", reply),
                None => format!("❌ no quick prompt number {}\n", index),
            },
            ShellCommand::History => sidebar::history_panel(dashboard.history(), dashboard.palette()),
            ShellCommand::Open(index) => {
                if dashboard.open_history(index).is_some() {
                    dashboard.view()
                } else {
                    format!("❌ no history entry number {}\n", index)
                }
            }
            ShellCommand::Export => match dashboard.export_pdf().await {
                Ok(Some(path)) => format!("📄 Report saved to {}\n", path),
                Ok(None) => "Nothing to export yet.\n".to_string(),
                Err(e) => alert(&e),
            },
            ShellCommand::Csv(file_name) => {
                match dashboard.export_explorer_csv(file_name.as_deref()).await {
                    Ok(Some(path)) => format!("💾 Data explorer saved to {}\n", path),
                    Ok(None) => "Nothing to export yet.\n".to_string(),
                    Err(e) => alert(&e),
                }
            }
            ShellCommand::Help => {
                dashboard.open_help();
                let view = dashboard.view();
                dashboard.close_help();
                view
            }
        };

        writer.write_all(output.as_bytes()).await?;
        writer.write_all(b"> ").await?;
        writer.flush().await?;
    }

    Ok(())
}

fn alert(error: &crate::utils::error::DashError) -> String {
    tracing::error!("{} (category: {:?})", error, error.category());
    format!(
        "❌ {}\n💡 {}\n",
        error.user_friendly_message(),
        error.recovery_suggestion()
    )
}
