use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wk2mmd::prelude::*;
use wk2mmd::ConfigError;

#[derive(Parser)]
#[command(name = "wk2mmd")]
#[command(about = "Generate a Mermaid diagram from a GitHub Actions workflow file", long_about = None)]
#[command(version)]
struct Cli {
    /// Workflow URL (github.com blob or raw) or local path
    #[arg(value_name = "WORKFLOW")]
    workflow: String,

    /// Maximum depth for recursive 'uses' analysis
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    depth: Option<u32>,

    /// Mermaid diagram type: flowchart or sequence
    #[arg(short = 't', long)]
    diagram_type: Option<String>,

    /// GitHub token for accessing private repositories (default: $GITHUB_TOKEN)
    #[arg(short = 'k', long)]
    token: Option<String>,

    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print every referenced 'uses' value instead of a diagram
    #[arg(long)]
    list_uses: bool,

    /// Log level: debug, info, warn, error
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_tracing(log_level: &str) {
    let level = match log_level {
        "debug" | "info" | "warn" | "error" => log_level,
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wk2mmd={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(&cli.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Analysis failed");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    tracing::debug!(
        workflow = %cli.workflow,
        depth = config.depth,
        diagram = %config.diagram,
        "Running workflow analysis"
    );

    let runner = WorkflowRunner::new(&config)?;

    if cli.list_uses {
        for uses in runner.list_uses(&cli.workflow, config.depth).await? {
            println!("{}", uses);
        }
        return Ok(());
    }

    let output = runner
        .run(&cli.workflow, config.depth, &config.diagram)
        .await?;
    print!("{}", output);
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AnalyzerConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };

    if let Some(depth) = cli.depth {
        config.depth = depth as usize;
    }
    if let Some(diagram) = &cli.diagram_type {
        config.diagram = diagram.clone();
    }
    if let Some(token) = &cli.token {
        config.token = Some(token.clone());
    }

    let config = config.with_env_token();
    config.validate()?;
    Ok(config)
}
