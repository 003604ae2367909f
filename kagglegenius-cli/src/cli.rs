use crate::render::{ColumnsView, ReportView, SnapshotView};
use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use kagglegenius_core::{
    gemini_session, load_config, load_demo, prompt, profile_file, ConfigOverrides, DemoKind,
    GeminiClient, Report, Session,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

/// Shown one per tick while the analysis request is outstanding.
const PROGRESS_PHASES: [&str; 5] = [
    "Identifying Problem Type...",
    "Designing Feature Pipeline...",
    "Selecting Optimal Architectures...",
    "Synthesizing Baseline Code...",
    "Finalizing Grandmaster Report...",
];
const PROGRESS_TICK: Duration = Duration::from_secs(2);

const RECONFIGURE_HINT: &str =
    "Set GEMINI_API_KEY, pass --api-key, or add api_key to kagglegenius.toml.";

#[derive(Parser)]
#[command(name = "kagglegenius")]
#[command(about = "Profile CSV datasets and get an ML strategy report from Gemini")]
pub struct Cli {
    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a CSV file without contacting the model
    Profile {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Profile a CSV file and request a full analysis report
    Analyze(AnalyzeArgs),
    /// Show a bundled demo report (titanic, housing, fraud)
    Demo {
        #[arg(short, long)]
        dataset: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[arg(short, long)]
    pub file: PathBuf,
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,
    #[arg(long)]
    pub endpoint: Option<String>,
    #[arg(short, long)]
    pub model: Option<String>,
    /// TOML config file (defaults to ./kagglegenius.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Print the request prompt instead of calling the model
    #[arg(long)]
    pub dry_run: bool,
    /// Save the report as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Ask follow-up questions after the report
    #[arg(long)]
    pub chat: bool,
}

pub async fn profile_command(file: PathBuf, format: OutputFormat) -> Result<()> {
    info!("Profiling {}", file.display());

    let snapshot = profile_file(&file).await.map_err(|e| {
        error!("Failed to profile {}: {}", file.display(), e);
        anyhow!(e.user_message())
    })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        OutputFormat::Text => print!("{}", SnapshotView(&snapshot)),
    }

    Ok(())
}

pub async fn analyze_command(args: AnalyzeArgs) -> Result<()> {
    let config = load_config(&ConfigOverrides {
        config_path: args.config.clone(),
        api_key: args.api_key.clone(),
        endpoint: args.endpoint.clone(),
        model: args.model.clone(),
    })?;
    info!(model = %config.model, "Running analysis on {}", args.file.display());

    let mut session = gemini_session(&config)?;

    let snapshot = session
        .load_file(&args.file)
        .await
        .map_err(|e| {
            error!("Failed to profile {}: {}", args.file.display(), e);
            anyhow!(e.user_message())
        })?
        .clone();
    print!("{}", SnapshotView(&snapshot));
    println!();

    if args.dry_run {
        let prompt =
            prompt::analysis_prompt(&snapshot.columns, snapshot.row_count, &snapshot.sample_rows)?;
        println!("🔍 DRY RUN MODE - No LLM calls will be made");
        println!("============================================");
        println!("Endpoint: {}", session.analyst().backend().url());
        println!();
        println!("{}", prompt);
        return Ok(());
    }

    println!("🤖 Sending dataset metadata to {}...", config.model);
    let report = run_analysis(&mut session).await?;

    println!();
    print!("{}", ReportView(&report));

    if let Some(output_path) = &args.output {
        let json_output = serde_json::to_string_pretty(&report)?;
        tokio::fs::write(output_path, json_output).await?;
        info!("Report saved to {}", output_path.display());
        println!("💾 Report saved to {}", output_path.display());
    }

    if args.chat {
        chat_loop(&mut session).await?;
    }

    Ok(())
}

/// Drives the analysis request while printing progress phases on a fixed tick.
async fn run_analysis(session: &mut Session<GeminiClient>) -> Result<Report> {
    let result = {
        let analysis = session.analyze();
        tokio::pin!(analysis);

        let mut ticker = tokio::time::interval(PROGRESS_TICK);
        let mut phases = PROGRESS_PHASES.iter();

        loop {
            tokio::select! {
                result = &mut analysis => break result.cloned(),
                _ = ticker.tick() => {
                    if let Some(phase) = phases.next() {
                        println!("⏳ {}", phase);
                    }
                }
            }
        }
    };

    result.map_err(|e| {
        error!("Analysis failed: {}", e);
        if e.needs_reconfiguration() {
            eprintln!("🔑 {}", RECONFIGURE_HINT);
        }
        anyhow!(e.user_message())
    })
}

async fn chat_loop(session: &mut Session<GeminiClient>) -> Result<()> {
    if let Some(greeting) = session.transcript().last() {
        println!();
        println!("💬 {}", greeting.content);
        println!("   (type 'exit' or 'quit' to leave)");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        match session.ask(line).await {
            Ok(answer) => println!("🤖 {}\n", answer),
            Err(e) => {
                warn!("Chat request failed: {}", e);
                println!("🤖 {}\n", e.user_message());
            }
        }
    }

    println!();
    Ok(())
}

pub async fn demo_command(dataset: String, format: OutputFormat) -> Result<()> {
    let kind: DemoKind = dataset.parse()?;
    let demo = load_demo(kind)?;
    info!("Loaded demo dataset {}", demo.name);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&demo.report)?),
        OutputFormat::Text => {
            println!("📦 {} ({})", demo.name, demo.category);
            println!("Rows: {}", demo.row_count);
            println!();
            print!(
                "{}",
                ColumnsView {
                    columns: &demo.columns,
                    row_count: demo.row_count,
                }
            );
            println!();
            print!("{}", ReportView(&demo.report));
        }
    }

    Ok(())
}
