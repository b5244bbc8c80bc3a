use crate::api::{ApiClient, ClientConfig};
use crate::model::Parameters;
use crate::orchestrator::{process_run_completion, RunController, RunState};
use crate::params::ParamsStore;
use crate::view::ResultView;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

/// Write `lines` through the output writer and wait for it to drain.
async fn emit(lines: Vec<OutputLine>) {
    let (tx, handle) = spawn_output_writer();
    for line in lines {
        let _ = tx.send(line);
    }
    drop(tx);
    let _ = handle.await;
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "schedule-cli",
    version,
    about = "Client for the course-schedule optimization service (GA + CSP)"
)]
pub struct Cli {
    /// Base URL of the optimization service
    #[arg(long, default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Request timeout (a run waits for the whole optimization)
    #[arg(long, default_value = "300s")]
    pub timeout: humantime::Duration,

    /// Run once, print the result as JSON and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Run once, print a text summary and the schedule table and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Print the presets offered by the service and exit
    #[arg(long)]
    pub list_presets: bool,

    /// Maximum number of generations (G)
    #[arg(long, default_value_t = 200, allow_negative_numbers = true)]
    pub max_generations: i64,

    /// Population size (N)
    #[arg(long, default_value_t = 60, allow_negative_numbers = true)]
    pub population_size: i64,

    /// Mutation rate (p_m)
    #[arg(long, default_value_t = 0.2, allow_negative_numbers = true)]
    pub mutation_rate: f64,

    /// Tournament size (k)
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    pub tournament_size: i64,

    /// Apply the preset at this index (from the service's preset list) before running
    #[arg(long)]
    pub preset: Option<usize>,

    /// Export the schedule as PDF after a successful run
    #[arg(long)]
    pub export_pdf: bool,

    /// Export the schedule as XLSX after a successful run
    #[arg(long)]
    pub export_xlsx: bool,

    /// Directory for exported files
    #[arg(long, default_value = ".")]
    pub output_dir: std::path::PathBuf,

    /// Start a run as soon as the TUI launches
    #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
    pub run_on_launch: bool,
}

pub async fn run(args: Cli) -> Result<()> {
    let interactive = !args.json && !args.text && !args.list_presets;
    init_tracing(interactive);

    if args.list_presets {
        return run_list_presets(&args).await;
    }

    if interactive {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            // Fallback when built without TUI support.
            return run_once(args).await;
        }
    }

    run_once(args).await
}

/// Logs go to stderr; the TUI keeps them off unless `RUST_LOG` asks otherwise.
fn init_tracing(interactive: bool) {
    let default = if interactive { "off" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build the HTTP client configuration from CLI arguments.
pub fn build_client_config(args: &Cli) -> ClientConfig {
    ClientConfig {
        base_url: args.base_url.clone(),
        timeout: Duration::from(args.timeout),
        user_agent: format!("schedule-cli/{}", env!("CARGO_PKG_VERSION")),
    }
}

/// Parameters given on the command line, before any preset.
pub fn initial_parameters(args: &Cli) -> Parameters {
    Parameters {
        max_generations: args.max_generations,
        population_size: args.population_size,
        mutation_rate: args.mutation_rate,
        tournament_size: args.tournament_size,
    }
}

/// Resolve `--preset` against the service's list into a parameter store.
pub async fn build_params_store(args: &Cli, client: &ApiClient) -> Result<ParamsStore> {
    let mut store = ParamsStore::new(initial_parameters(args));
    if let Some(idx) = args.preset {
        let presets = client.list_presets().await.context("fetch presets")?;
        store.set_presets(presets);
        store.apply_preset_at(idx).ok_or_else(|| {
            anyhow::anyhow!(
                "preset index {idx} out of range ({} presets available)",
                store.presets().len()
            )
        })?;
    }
    Ok(store)
}

async fn run_list_presets(args: &Cli) -> Result<()> {
    let client = ApiClient::new(&build_client_config(args))?;
    let presets = client.list_presets().await.context("fetch presets")?;
    let lines = if args.json {
        vec![OutputLine::Stdout(serde_json::to_string_pretty(&presets)?)]
    } else {
        presets
            .iter()
            .enumerate()
            .map(|(i, p)| OutputLine::Stdout(format!("{i:>2}  {}", p.label())))
            .collect()
    };
    emit(lines).await;
    Ok(())
}

/// One run in text or JSON mode.
async fn run_once(args: Cli) -> Result<()> {
    let client = ApiClient::new(&build_client_config(&args))?;
    let params = build_params_store(&args, &client).await?.current();

    let mut machine = RunController::default();
    machine.begin();
    if !args.json {
        emit(vec![OutputLine::Stderr(format!(
            "Running: G={}, N={}, p_m={}, k={}",
            params.max_generations,
            params.population_size,
            params.mutation_rate,
            params.tournament_size
        ))])
        .await;
    }
    machine.finish(client.request_run(&params).await);

    let result = match (machine.state(), machine.result()) {
        (RunState::Succeeded, Some(r)) => Arc::clone(r),
        _ => {
            return Err(anyhow::anyhow!(
                "{}",
                machine.error().unwrap_or("run did not complete")
            ))
        }
    };

    let processed = process_run_completion(&args, &result);

    let mut lines = Vec::new();
    if args.json {
        lines.push(OutputLine::Stdout(serde_json::to_string_pretty(&*result)?));
    } else {
        let view = ResultView::from_result(&result);
        let summary = crate::text_summary::build_text_summary(&result, &view);
        lines.extend(summary.lines.into_iter().map(OutputLine::Stdout));
    }
    lines.extend(processed.export_messages.into_iter().map(OutputLine::Stderr));
    emit(lines).await;
    Ok(())
}
