use clap::Parser;
use vigilance_dash::config::toml_config::DEFAULT_CONFIG_PATH;
use vigilance_dash::config::Command;
use vigilance_dash::core::shell::run_shell;
use vigilance_dash::core::ConfigProvider;
use vigilance_dash::utils::error::{DashError, ErrorSeverity};
use vigilance_dash::utils::{logger, validation::Validate};
use vigilance_dash::{AnalysisResult, CliConfig, Dashboard, ForensicClient, LocalStorage, TomlConfig};

type AppDashboard = Dashboard<ForensicClient, LocalStorage, TomlConfig>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Config first: it picks the log format.
    let mut config = match TomlConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting vigilance dashboard");
    match TomlConfig::source_path(cli.config.as_deref()) {
        Some(path) => tracing::debug!("Configuration loaded from {}", path),
        None => tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_PATH),
    }
    config.apply_overrides(cli.server.clone(), cli.output.clone(), cli.no_color);
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let client = match ForensicClient::with_timeout(config.server_url(), config.request_timeout()) {
        Ok(client) => client,
        Err(e) => exit_with(e),
    };
    let storage = LocalStorage::new(config.output_path().to_string());
    let mut dashboard = Dashboard::new(client, storage, config);

    if let Err(e) = run(&mut dashboard, cli.command).await {
        exit_with(e);
    }

    Ok(())
}

async fn run(dashboard: &mut AppDashboard, command: Option<Command>) -> Result<(), DashError> {
    match command.unwrap_or(Command::Shell { file: None }) {
        Command::Demo { tab } => {
            dashboard.render_all(AnalysisResult::sample());
            dashboard.show_tab(tab);
            println!("{}", dashboard.view());
        }
        Command::Analyze {
            file,
            questions,
            export_pdf,
            csv,
            tab,
        } => {
            dashboard.sign_in().await?;
            dashboard.run_analysis(Some(&file)).await?;
            dashboard.show_tab(tab);
            println!("{}", dashboard.view());

            for question in &questions {
                let reply = dashboard.ask(question).await;
                println!("AI AUDITOR: {}", reply);
            }

            if export_pdf {
                if let Some(path) = dashboard.export_pdf().await? {
                    println!("📄 Report saved to {}", path);
                }
            }

            if let Some(file_name) = csv {
                if let Some(path) = dashboard.export_explorer_csv(Some(&file_name)).await? {
                    println!("💾 Data explorer saved to {}", path);
                }
            }
        }
        Command::Shell { file } => {
            // sample dataset until the first upload
            dashboard.render_all(AnalysisResult::sample());

            let signed_in = match dashboard.sign_in().await {
                Ok(signed_in) => signed_in,
                Err(e) => {
                    eprintln!("❌ {}", e.user_friendly_message());
                    eprintln!("💡 {}", e.recovery_suggestion());
                    false
                }
            };

            if let Some(file) = file {
                if let Err(e) = dashboard.run_analysis(Some(&file)).await {
                    eprintln!("❌ {}", e.user_friendly_message());
                }
            }

            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_shell(dashboard, stdin, tokio::io::stdout()).await?;

            if signed_in {
                if let Err(e) = dashboard.sign_out().await {
                    tracing::warn!("Logout failed: {}", e);
                }
            }
        }
    }

    Ok(())
}

fn exit_with(e: DashError) -> ! {
    tracing::error!(
        "❌ Dashboard command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,      // warning only
        ErrorSeverity::Medium => 2,   // retryable
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3, // system
    };
    std::process::exit(exit_code);
}
